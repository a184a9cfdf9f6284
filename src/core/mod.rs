//! In-memory authoritative entity store and index helpers.

/// Helper index aliases.
pub mod indices;
/// Authoritative club/competition store and lookups.
pub mod store;
