//! Shared primitive aliases and booking-rule constants.

/// Spendable club budget, in points.
pub type Points = u32;
/// Bookable competition capacity, in places.
pub type PlaceCount = u32;

/// Per-transaction booking ceiling, independent of points or capacity.
pub const MAX_PLACES_PER_BOOKING: i64 = 12;
/// Upper guard against pathological request magnitudes.
pub const MAX_REQUEST_MAGNITUDE: i64 = 999_999;
/// Exact storage format for competition dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
