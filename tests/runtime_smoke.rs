use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::NaiveDateTime;

use clubbook::{
    booking::{BookingOutcome, RejectReason},
    core::store::EntityStore,
    engine::BookingEngine,
    entity::{Club, Competition},
    persist::{EntityStorage, PersistError, PersistResult},
    runtime::{
        events::BookingEvent,
        handle::{RuntimeConfig, spawn_booking},
    },
    types::DATE_FORMAT,
};

fn now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-06-01 12:00:00", DATE_FORMAT).expect("now")
}

fn sample_store() -> EntityStore {
    EntityStore::from_collections(
        vec![Club {
            name: "Simply Lift".to_string(),
            email: "john@simplylift.co".to_string(),
            points: "10".to_string(),
        }],
        vec![Competition {
            name: "Spring Festival".to_string(),
            date: "2030-03-27 10:00:00".to_string(),
            number_of_places: "25".to_string(),
        }],
    )
}

#[tokio::test]
async fn booking_over_the_handle_commits_and_emits_events() {
    let handle = spawn_booking(BookingEngine::new(sample_store()), RuntimeConfig::default());
    let mut sub = handle.subscribe();

    let club = handle
        .resolve_club("john@simplylift.co")
        .await
        .expect("resolve")
        .expect("club");
    assert_eq!(club.points, "10");

    let outcome = handle
        .attempt_booking_at("Spring Festival", "Simply Lift", "4", now())
        .await
        .expect("booking");
    assert!(matches!(outcome, BookingOutcome::Committed { places: 4, .. }));

    let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
        .await
        .expect("event timeout")
        .expect("recv");
    assert_eq!(
        evt,
        BookingEvent::Committed {
            club: "Simply Lift".to_string(),
            competition: "Spring Festival".to_string(),
            places: 4,
        },
    );

    let clubs = handle.clubs().await.expect("clubs");
    assert_eq!(clubs[0].points, "6");
    let competitions = handle.competitions().await.expect("competitions");
    assert_eq!(competitions[0].number_of_places, "21");

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn writer_task_serializes_competing_bookings() {
    let handle = spawn_booking(BookingEngine::new(sample_store()), RuntimeConfig::default());

    // Two 7-place requests against a 10-point budget: under serialized
    // execution exactly one can be admitted.
    let first = handle
        .attempt_booking_at("Spring Festival", "Simply Lift", "7", now())
        .await
        .expect("first");
    let second = handle
        .attempt_booking_at("Spring Festival", "Simply Lift", "7", now())
        .await
        .expect("second");

    assert!(matches!(first, BookingOutcome::Committed { .. }));
    assert_eq!(
        second,
        BookingOutcome::Rejected(RejectReason::InsufficientPoints),
    );

    handle.shutdown().await.expect("shutdown");
}

struct FailingStorage {
    fail_saves: Arc<AtomicBool>,
}

impl EntityStorage for FailingStorage {
    fn load(&self) -> PersistResult<(Vec<Club>, Vec<Competition>)> {
        Ok((Vec::new(), Vec::new()))
    }

    fn save_clubs(&mut self, _clubs: &[Club]) -> PersistResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            Err(PersistError::Io(std::io::Error::other("disk full")))
        } else {
            Ok(())
        }
    }

    fn save_competitions(&mut self, _competitions: &[Competition]) -> PersistResult<()> {
        self.save_clubs(&[])
    }
}

#[tokio::test]
async fn failed_save_surfaces_as_persistence_failure_event() {
    let fail_saves = Arc::new(AtomicBool::new(true));
    let engine = BookingEngine::with_storage(
        sample_store(),
        Box::new(FailingStorage {
            fail_saves: Arc::clone(&fail_saves),
        }),
    );
    let handle = spawn_booking(engine, RuntimeConfig::default());
    let mut sub = handle.subscribe();

    let outcome = handle
        .attempt_booking_at("Spring Festival", "Simply Lift", "3", now())
        .await
        .expect("booking");
    assert_eq!(outcome, BookingOutcome::PersistenceFailure);

    let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
        .await
        .expect("event timeout")
        .expect("recv");
    assert_eq!(
        evt,
        BookingEvent::SaveFailed {
            club: "Simply Lift".to_string(),
            competition: "Spring Festival".to_string(),
        },
    );

    // The in-memory mutation stands; a later booking sees the decrement.
    let clubs = handle.clubs().await.expect("clubs");
    assert_eq!(clubs[0].points, "7");

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn commands_after_shutdown_report_channel_closed() {
    let handle = spawn_booking(BookingEngine::new(sample_store()), RuntimeConfig::default());
    handle.shutdown().await.expect("shutdown");

    // The writer task is gone; give the runtime a beat to drop the receiver.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(handle.clubs().await.is_err());
}
