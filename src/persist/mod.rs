//! Storage abstraction and JSON document implementation.

/// JSON file-backed storage.
pub mod json;

use crate::entity::{Club, Competition};

/// Storage failures, for both load and save.
#[derive(Debug)]
pub enum PersistError {
    /// Underlying file I/O failed.
    Io(std::io::Error),
    /// A document failed to encode or decode.
    Serde(serde_json::Error),
    /// A document is valid JSON but lacks its expected top-level key.
    MissingKey(&'static str),
}

impl From<std::io::Error> for PersistError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Result alias for storage operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Durable backing for the entity collections.
///
/// `load` failures are fatal to startup and must be surfaced, never
/// papered over with empty collections. `save_*` rewrite a full collection;
/// a failed save must not be reported as success, since in-memory state has
/// typically already advanced by the time a save runs.
pub trait EntityStorage: Send {
    /// Reads both collections, in storage order.
    fn load(&self) -> PersistResult<(Vec<Club>, Vec<Competition>)>;
    /// Replaces the stored club collection.
    fn save_clubs(&mut self, clubs: &[Club]) -> PersistResult<()>;
    /// Replaces the stored competition collection.
    fn save_competitions(&mut self, competitions: &[Competition]) -> PersistResult<()>;
}
