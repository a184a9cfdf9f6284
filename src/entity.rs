//! Club and Competition domain records.
//!
//! Counters are stored as strings to preserve the on-disk document format;
//! parsing them is a fallible operation owned by the validator, never an
//! assumption baked into arithmetic.

use serde::{Deserialize, Serialize};

use crate::types::{PlaceCount, Points};

/// A club holding spendable points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    /// Unique club name.
    pub name: String,
    /// Unique email, the external lookup key.
    pub email: String,
    /// Spendable budget, string-encoded in storage.
    pub points: String,
}

/// A competition with remaining bookable capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    /// Unique competition name.
    pub name: String,
    /// Start timestamp in `YYYY-MM-DD HH:MM:SS` form.
    pub date: String,
    /// Remaining capacity, string-encoded in storage.
    #[serde(rename = "numberOfPlaces")]
    pub number_of_places: String,
}

impl Club {
    /// Parses the stored points counter. `None` means the stored value is
    /// not a non-negative integer.
    pub fn parsed_points(&self) -> Option<Points> {
        self.points.trim().parse().ok()
    }
}

impl Competition {
    /// Parses the stored capacity counter. `None` means the stored value is
    /// not a non-negative integer.
    pub fn parsed_places(&self) -> Option<PlaceCount> {
        self.number_of_places.trim().parse().ok()
    }
}
