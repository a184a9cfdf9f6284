//! Runtime event stream payloads.

use crate::types::PlaceCount;

/// Events emitted from the single-writer booking loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingEvent {
    /// A booking was admitted, applied, and persisted.
    Committed {
        /// Booking club name.
        club: String,
        /// Booked competition name.
        competition: String,
        /// Places booked.
        places: PlaceCount,
    },
    /// A booking was applied in memory but a save failed; memory and disk
    /// diverge until a later save succeeds.
    SaveFailed {
        /// Booking club name.
        club: String,
        /// Booked competition name.
        competition: String,
    },
}
