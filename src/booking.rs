//! Booking decision and outcome value types.

use crate::{
    entity::{Club, Competition},
    types::{PlaceCount, Points},
};

/// Admission decision carrying the post-commit counter values.
///
/// Produced only by [`crate::engine::validator::validate`], which guarantees
/// both values are the old counters minus the requested count and that
/// neither underflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admitted {
    /// Places granted by this admission.
    pub places: PlaceCount,
    /// Club points after the commit.
    pub new_points: Points,
    /// Competition capacity after the commit.
    pub new_places: PlaceCount,
}

/// Business-rule rejection reasons, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Requested count is zero or negative.
    NonPositiveRequest,
    /// Requested count exceeds the overflow guard.
    RequestTooLarge,
    /// Stored club points are not a parseable non-negative integer.
    CorruptClubData,
    /// Club holds fewer points than requested.
    InsufficientPoints,
    /// Stored competition capacity is not a parseable non-negative integer.
    CorruptCompetitionData,
    /// Competition has fewer remaining places than requested.
    InsufficientCapacity,
    /// Requested count exceeds the per-booking ceiling.
    ExceedsPerBookingCap,
    /// Competition start time is already in the past.
    CompetitionElapsed,
}

/// Which entity a lookup failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingEntity {
    /// No club with this name or email.
    Club(String),
    /// No competition with this name.
    Competition(String),
}

/// Terminal outcome of one booking transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// Admitted, applied, and persisted; carries the updated entities.
    Committed {
        /// Club after the points decrement.
        club: Club,
        /// Competition after the capacity decrement.
        competition: Competition,
        /// Places booked by this transaction.
        places: PlaceCount,
    },
    /// Refused by a business rule; no state was touched.
    Rejected(RejectReason),
    /// Club or competition could not be resolved; no state was touched.
    NotFound(MissingEntity),
    /// Request shape was malformed (blank name, non-numeric count); never
    /// reaches the validator.
    InvalidInput,
    /// Admitted and applied in memory, but a save failed. Memory and disk
    /// diverge until a save succeeds; retrying re-saves the same state.
    PersistenceFailure,
}
