//! Pure admission pipeline for booking requests.

use chrono::NaiveDateTime;

use crate::{
    booking::{Admitted, RejectReason},
    entity::{Club, Competition},
    engine::temporal,
    types::{MAX_PLACES_PER_BOOKING, MAX_REQUEST_MAGNITUDE, PlaceCount},
};

/// Decides whether `requested` places may be booked by `club` against
/// `competition`.
///
/// Checks run in a fixed order and short-circuit on the first failure; the
/// order is part of the contract because callers surface the specific
/// reason to users. No mutation, no I/O: identical inputs always yield the
/// identical outcome.
pub fn validate(
    club: &Club,
    competition: &Competition,
    requested: i64,
    now: NaiveDateTime,
) -> Result<Admitted, RejectReason> {
    if requested <= 0 {
        return Err(RejectReason::NonPositiveRequest);
    }
    if requested > MAX_REQUEST_MAGNITUDE {
        return Err(RejectReason::RequestTooLarge);
    }

    let points = club
        .parsed_points()
        .ok_or(RejectReason::CorruptClubData)?;
    if requested > i64::from(points) {
        return Err(RejectReason::InsufficientPoints);
    }

    let places = competition
        .parsed_places()
        .ok_or(RejectReason::CorruptCompetitionData)?;
    if requested > i64::from(places) {
        return Err(RejectReason::InsufficientCapacity);
    }

    if requested > MAX_PLACES_PER_BOOKING {
        return Err(RejectReason::ExceedsPerBookingCap);
    }
    if temporal::is_past(&competition.date, now) {
        return Err(RejectReason::CompetitionElapsed);
    }

    // Bounded by the points and capacity checks above, so neither
    // subtraction can underflow.
    let requested = requested as PlaceCount;
    Ok(Admitted {
        places: requested,
        new_points: points - requested,
        new_places: places - requested,
    })
}
