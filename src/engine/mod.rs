//! Booking engine: lookup, admission, and commit.

/// Past/future gate for competition dates.
pub mod temporal;
/// Pure ordered admission checks.
pub mod validator;

use chrono::NaiveDateTime;

use crate::{
    booking::{Admitted, BookingOutcome, MissingEntity},
    core::store::{EntityStore, StoreError},
    entity::{Club, Competition},
    persist::{EntityStorage, PersistError, PersistResult},
};

/// Commit failures, after admission.
#[derive(Debug)]
pub enum CommitError {
    /// The admitted entities vanished from the store between admission and
    /// commit. Cannot happen under serialized access.
    Store(StoreError),
    /// A save failed; the in-memory mutation is already applied.
    Persist(PersistError),
}

impl From<StoreError> for CommitError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<PersistError> for CommitError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

/// Synchronous booking engine over one [`EntityStore`].
///
/// Owns the store and an optional storage backend. Correct only under
/// serialized access: one transaction (validate then commit) must finish
/// before the next begins. [`crate::runtime::handle::spawn_booking`] wraps
/// an engine in a single-writer task that enforces exactly that.
pub struct BookingEngine {
    store: EntityStore,
    storage: Option<Box<dyn EntityStorage>>,
}

impl BookingEngine {
    /// In-memory engine with no storage backend; commits skip persistence.
    pub fn new(store: EntityStore) -> Self {
        Self {
            store,
            storage: None,
        }
    }

    /// Engine over an already-built store, persisting through `storage`.
    pub fn with_storage(store: EntityStore, storage: Box<dyn EntityStorage>) -> Self {
        Self {
            store,
            storage: Some(storage),
        }
    }

    /// Loads both collections from `storage` and builds the engine.
    ///
    /// A load failure is fatal to startup: without clubs and competitions
    /// no valid booking is possible, so the error propagates to the caller
    /// instead of starting with silently empty state.
    pub fn open(storage: Box<dyn EntityStorage>) -> PersistResult<Self> {
        let (clubs, competitions) = storage.load()?;
        Ok(Self::with_storage(
            EntityStore::from_collections(clubs, competitions),
            storage,
        ))
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// All clubs in storage order, for listing surfaces.
    pub fn clubs(&self) -> &[Club] {
        self.store.clubs()
    }

    /// All competitions in storage order, for listing surfaces.
    pub fn competitions(&self) -> &[Competition] {
        self.store.competitions()
    }

    /// Resolves a club by exact email. The email's shape (`@`, `.`) is the
    /// boundary's concern; this is a lookup, not a security check.
    pub fn resolve_club(&self, email: &str) -> Option<Club> {
        self.store.club_by_email(email).cloned()
    }

    /// Resolves the pair of entities a booking form needs, competition
    /// first to match user-facing messaging order.
    pub fn resolve_booking_context(
        &self,
        competition_name: &str,
        club_name: &str,
    ) -> Option<(Club, Competition)> {
        let competition = self.store.competition_by_name(competition_name)?.clone();
        let club = self.store.club_by_name(club_name)?.clone();
        Some((club, competition))
    }

    /// Runs one full booking transaction: boundary checks, lookup,
    /// admission, commit.
    ///
    /// `places_raw` is the caller-supplied text; a non-numeric value or a
    /// blank name is [`BookingOutcome::InvalidInput`] and never reaches the
    /// validator. `now` is injected so outcomes are deterministic.
    pub fn attempt_booking(
        &mut self,
        competition_name: &str,
        club_name: &str,
        places_raw: &str,
        now: NaiveDateTime,
    ) -> BookingOutcome {
        let competition_name = competition_name.trim();
        let club_name = club_name.trim();
        if competition_name.is_empty() || club_name.is_empty() {
            return BookingOutcome::InvalidInput;
        }
        let Ok(requested) = places_raw.trim().parse::<i64>() else {
            return BookingOutcome::InvalidInput;
        };

        let Some(competition) = self.store.competition_by_name(competition_name) else {
            return BookingOutcome::NotFound(MissingEntity::Competition(
                competition_name.to_string(),
            ));
        };
        let Some(club) = self.store.club_by_name(club_name) else {
            return BookingOutcome::NotFound(MissingEntity::Club(club_name.to_string()));
        };

        let admitted = match validator::validate(club, competition, requested, now) {
            Ok(admitted) => admitted,
            Err(reason) => return BookingOutcome::Rejected(reason),
        };

        match self.commit(club_name, competition_name, &admitted) {
            Ok((club, competition)) => BookingOutcome::Committed {
                club,
                competition,
                places: admitted.places,
            },
            Err(CommitError::Store(StoreError::MissingClub(name))) => {
                BookingOutcome::NotFound(MissingEntity::Club(name))
            }
            Err(CommitError::Store(StoreError::MissingCompetition(name))) => {
                BookingOutcome::NotFound(MissingEntity::Competition(name))
            }
            Err(CommitError::Persist(_)) => BookingOutcome::PersistenceFailure,
        }
    }

    /// Applies an admitted decision and persists both collections.
    ///
    /// Saves clubs first, then competitions. On a save failure the
    /// in-memory counters are already advanced and stay that way; the
    /// expected recovery is a retried save of the same state, not a
    /// rollback.
    pub fn commit(
        &mut self,
        club_name: &str,
        competition_name: &str,
        admitted: &Admitted,
    ) -> Result<(Club, Competition), CommitError> {
        let (club, competition) =
            self.store
                .apply_admission(club_name, competition_name, admitted)?;

        if let Some(storage) = self.storage.as_mut() {
            storage.save_clubs(self.store.clubs())?;
            storage.save_competitions(self.store.competitions())?;
        }

        Ok((club, competition))
    }

    /// Re-saves both collections as they stand, the recovery path after a
    /// [`CommitError::Persist`].
    pub fn resave(&mut self) -> PersistResult<()> {
        if let Some(storage) = self.storage.as_mut() {
            storage.save_clubs(self.store.clubs())?;
            storage.save_competitions(self.store.competitions())?;
        }
        Ok(())
    }
}
