//! # Logical Timestamps
//!
//! `Timestamp` is a host-supplied logical time value. A ledger host passes
//! its block height; a service host passes Unix epoch seconds. The core only
//! relies on ordering and on subtraction between two timestamps, which yields
//! a duration in the same unit.
//!
//! Hosts running on wall-clock time can convert from `chrono::DateTime<Utc>`
//! with [`Timestamp::from_utc`]; sub-second precision is discarded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A logical point in time, in host-defined units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The origin of logical time.
    pub const ZERO: Timestamp = Timestamp(0);

    /// Create a timestamp from a raw logical value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Create a timestamp from a UTC datetime, as Unix epoch seconds.
    ///
    /// Datetimes before the Unix epoch are rejected.
    pub fn from_utc(dt: DateTime<Utc>) -> Result<Self, CoreError> {
        let secs = dt.timestamp();
        u64::try_from(secs)
            .map(Self)
            .map_err(|_| CoreError::BeforeEpoch(dt.to_rfc3339()))
    }

    /// The raw logical value.
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Elapsed logical units from `earlier` to `self`, or `None` if `earlier`
    /// is not strictly before `self`.
    pub fn duration_since(&self, earlier: Timestamp) -> Option<u64> {
        if earlier < *self {
            Some(self.0 - earlier.0)
        } else {
            None
        }
    }

    /// Interpret the value as Unix epoch seconds.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.0).ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}

impl From<u64> for Timestamp {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}
