//! JSON document storage: one file per collection.
//!
//! Layout matches the historical data files: `{"clubs": [...]}` and
//! `{"competitions": [...]}`, with `points` and `numberOfPlaces` kept as
//! strings so the documents round-trip unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::entity::{Club, Competition};

use super::{EntityStorage, PersistError, PersistResult};

const CLUBS_KEY: &str = "clubs";
const COMPETITIONS_KEY: &str = "competitions";

#[derive(Serialize)]
struct ClubsDoc<'a> {
    clubs: &'a [Club],
}

#[derive(Serialize)]
struct CompetitionsDoc<'a> {
    competitions: &'a [Competition],
}

/// JSON file implementation of [`EntityStorage`].
pub struct JsonFileStorage {
    clubs_path: PathBuf,
    competitions_path: PathBuf,
}

impl JsonFileStorage {
    /// Binds storage to the two document paths. No I/O happens until
    /// [`EntityStorage::load`] or a save.
    pub fn open(clubs_path: impl AsRef<Path>, competitions_path: impl AsRef<Path>) -> Self {
        Self {
            clubs_path: clubs_path.as_ref().to_path_buf(),
            competitions_path: competitions_path.as_ref().to_path_buf(),
        }
    }

    fn load_collection<T: DeserializeOwned>(
        path: &Path,
        key: &'static str,
    ) -> PersistResult<Vec<T>> {
        let text = fs::read_to_string(path)?;
        let mut doc: serde_json::Value = serde_json::from_str(&text)?;
        let Some(records) = doc.get_mut(key) else {
            return Err(PersistError::MissingKey(key));
        };
        Ok(serde_json::from_value(records.take())?)
    }

    fn save_document<T: Serialize>(path: &Path, doc: &T) -> PersistResult<()> {
        let payload = serde_json::to_vec_pretty(doc)?;
        // Write-then-rename so a crash mid-save leaves the old document
        // intact rather than a truncated one.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl EntityStorage for JsonFileStorage {
    fn load(&self) -> PersistResult<(Vec<Club>, Vec<Competition>)> {
        let clubs = Self::load_collection(&self.clubs_path, CLUBS_KEY)?;
        let competitions = Self::load_collection(&self.competitions_path, COMPETITIONS_KEY)?;
        Ok((clubs, competitions))
    }

    fn save_clubs(&mut self, clubs: &[Club]) -> PersistResult<()> {
        Self::save_document(&self.clubs_path, &ClubsDoc { clubs })
    }

    fn save_competitions(&mut self, competitions: &[Competition]) -> PersistResult<()> {
        Self::save_document(
            &self.competitions_path,
            &CompetitionsDoc { competitions },
        )
    }
}
