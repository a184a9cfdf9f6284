use std::fs;

use tempfile::TempDir;

use clubbook::{
    entity::{Club, Competition},
    persist::{EntityStorage, PersistError, json::JsonFileStorage},
};

const CLUBS_DOC: &str = r#"{
    "clubs": [
        {"name": "Simply Lift", "email": "john@simplylift.co", "points": "13"},
        {"name": "Iron Temple", "email": "admin@irontemple.com", "points": "4"},
        {"name": "She Lifts", "email": "kate@shelifts.co.uk", "points": "12"}
    ]
}"#;

const COMPETITIONS_DOC: &str = r#"{
    "competitions": [
        {"name": "Spring Festival", "date": "2030-03-27 10:00:00", "numberOfPlaces": "25"},
        {"name": "Fall Classic", "date": "2020-10-22 13:30:00", "numberOfPlaces": "13"}
    ]
}"#;

fn seeded_storage(tmp: &TempDir) -> JsonFileStorage {
    let clubs_path = tmp.path().join("clubs.json");
    let competitions_path = tmp.path().join("competitions.json");
    fs::write(&clubs_path, CLUBS_DOC).expect("write clubs");
    fs::write(&competitions_path, COMPETITIONS_DOC).expect("write competitions");
    JsonFileStorage::open(clubs_path, competitions_path)
}

#[test]
fn load_reads_both_collections_in_document_order() {
    let tmp = TempDir::new().expect("tmp");
    let storage = seeded_storage(&tmp);

    let (clubs, competitions) = storage.load().expect("load");

    let names: Vec<&str> = clubs.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Simply Lift", "Iron Temple", "She Lifts"]);
    assert_eq!(clubs[0].points, "13");
    assert_eq!(clubs[1].email, "admin@irontemple.com");

    assert_eq!(competitions.len(), 2);
    assert_eq!(competitions[0].date, "2030-03-27 10:00:00");
    assert_eq!(competitions[1].number_of_places, "13");
}

#[test]
fn save_then_load_round_trips_records_and_string_encoding() {
    let tmp = TempDir::new().expect("tmp");
    let mut storage = seeded_storage(&tmp);

    let clubs = vec![Club {
        name: "Simply Lift".to_string(),
        email: "john@simplylift.co".to_string(),
        points: "8".to_string(),
    }];
    let competitions = vec![Competition {
        name: "Spring Festival".to_string(),
        date: "2030-03-27 10:00:00".to_string(),
        number_of_places: "20".to_string(),
    }];

    storage.save_clubs(&clubs).expect("save clubs");
    storage.save_competitions(&competitions).expect("save competitions");

    let (reloaded_clubs, reloaded_competitions) = storage.load().expect("reload");
    assert_eq!(reloaded_clubs, clubs);
    assert_eq!(reloaded_competitions, competitions);

    // The counters stay string-encoded on disk, under the document keys.
    let raw = fs::read_to_string(tmp.path().join("clubs.json")).expect("read raw");
    assert!(raw.contains(r#""points": "8""#), "raw doc: {raw}");
    let raw = fs::read_to_string(tmp.path().join("competitions.json")).expect("read raw");
    assert!(raw.contains(r#""numberOfPlaces": "20""#), "raw doc: {raw}");
}

#[test]
fn save_replaces_prior_contents_entirely() {
    let tmp = TempDir::new().expect("tmp");
    let mut storage = seeded_storage(&tmp);

    storage
        .save_clubs(&[Club {
            name: "She Lifts".to_string(),
            email: "kate@shelifts.co.uk".to_string(),
            points: "12".to_string(),
        }])
        .expect("save");

    let (clubs, _) = storage.load().expect("reload");
    assert_eq!(clubs.len(), 1);
    assert_eq!(clubs[0].name, "She Lifts");
}

#[test]
fn missing_document_fails_load() {
    let tmp = TempDir::new().expect("tmp");
    let storage = JsonFileStorage::open(
        tmp.path().join("absent-clubs.json"),
        tmp.path().join("absent-competitions.json"),
    );
    assert!(matches!(storage.load(), Err(PersistError::Io(_))));
}

#[test]
fn malformed_document_fails_load() {
    let tmp = TempDir::new().expect("tmp");
    let clubs_path = tmp.path().join("clubs.json");
    fs::write(&clubs_path, "{not json").expect("write");
    fs::write(tmp.path().join("competitions.json"), COMPETITIONS_DOC).expect("write");

    let storage = JsonFileStorage::open(clubs_path, tmp.path().join("competitions.json"));
    assert!(matches!(storage.load(), Err(PersistError::Serde(_))));
}

#[test]
fn missing_top_level_key_fails_load() {
    let tmp = TempDir::new().expect("tmp");
    let clubs_path = tmp.path().join("clubs.json");
    fs::write(&clubs_path, r#"{"members": []}"#).expect("write");
    fs::write(tmp.path().join("competitions.json"), COMPETITIONS_DOC).expect("write");

    let storage = JsonFileStorage::open(clubs_path, tmp.path().join("competitions.json"));
    assert!(matches!(storage.load(), Err(PersistError::MissingKey("clubs"))));
}
