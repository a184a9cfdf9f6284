use crate::{
    booking::Admitted,
    core::indices::FirstMatchIndex,
    entity::{Club, Competition},
};

/// Mutation failures against the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No club with this name.
    MissingClub(String),
    /// No competition with this name.
    MissingCompetition(String),
}

/// Authoritative in-memory collections with first-match lookup indices.
///
/// Collections keep storage (insertion) order; indices are built first-wins
/// so duplicate emails or names resolve to the earliest record. Lookups are
/// exact-string and case-sensitive. The store performs no I/O.
#[derive(Debug, Default)]
pub struct EntityStore {
    clubs: Vec<Club>,
    competitions: Vec<Competition>,
    club_by_email: FirstMatchIndex,
    club_by_name: FirstMatchIndex,
    competition_by_name: FirstMatchIndex,
}

impl EntityStore {
    /// Builds a store from loaded collections, indexing first-wins.
    pub fn from_collections(clubs: Vec<Club>, competitions: Vec<Competition>) -> Self {
        let mut store = Self {
            clubs,
            competitions,
            ..Self::default()
        };

        for (idx, club) in store.clubs.iter().enumerate() {
            store
                .club_by_email
                .entry(club.email.clone())
                .or_insert(idx);
            store.club_by_name.entry(club.name.clone()).or_insert(idx);
        }
        for (idx, comp) in store.competitions.iter().enumerate() {
            store
                .competition_by_name
                .entry(comp.name.clone())
                .or_insert(idx);
        }

        store
    }

    /// All clubs in storage order.
    pub fn clubs(&self) -> &[Club] {
        &self.clubs
    }

    /// All competitions in storage order.
    pub fn competitions(&self) -> &[Competition] {
        &self.competitions
    }

    /// First club whose email matches exactly.
    pub fn club_by_email(&self, email: &str) -> Option<&Club> {
        self.club_by_email
            .get(email)
            .and_then(|idx| self.clubs.get(*idx))
    }

    /// First club whose name matches exactly.
    pub fn club_by_name(&self, name: &str) -> Option<&Club> {
        self.club_by_name
            .get(name)
            .and_then(|idx| self.clubs.get(*idx))
    }

    /// First competition whose name matches exactly.
    pub fn competition_by_name(&self, name: &str) -> Option<&Competition> {
        self.competition_by_name
            .get(name)
            .and_then(|idx| self.competitions.get(*idx))
    }

    /// Applies an admitted decision: writes both post-commit counters back
    /// as strings. Returns the updated records for the caller to report.
    ///
    /// Persistence is not this store's concern; see the engine's commit.
    pub fn apply_admission(
        &mut self,
        club_name: &str,
        competition_name: &str,
        admitted: &Admitted,
    ) -> Result<(Club, Competition), StoreError> {
        let club_idx = *self
            .club_by_name
            .get(club_name)
            .ok_or_else(|| StoreError::MissingClub(club_name.to_string()))?;
        let comp_idx = *self
            .competition_by_name
            .get(competition_name)
            .ok_or_else(|| StoreError::MissingCompetition(competition_name.to_string()))?;

        self.clubs[club_idx].points = admitted.new_points.to_string();
        self.competitions[comp_idx].number_of_places = admitted.new_places.to_string();

        Ok((
            self.clubs[club_idx].clone(),
            self.competitions[comp_idx].clone(),
        ))
    }
}
