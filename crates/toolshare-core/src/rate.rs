//! # Hourly Rates and Rental Cost
//!
//! Rates are integers in the smallest currency unit per hour. The cost of a
//! rental window is `rate * (end - start) / seconds_per_hour`, truncated.
//! The product is formed in `u128` so it cannot overflow; only a quotient
//! that exceeds `u64` is rejected.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::temporal::Timestamp;

/// Length of the billing hour in logical time units.
pub const SECONDS_PER_HOUR: u64 = 3600;

/// Price per hour in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourlyRate(pub u64);

impl HourlyRate {
    /// The raw rate.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Cost of renting from `start` to `end` with an hour of
    /// `seconds_per_hour` logical units.
    ///
    /// # Errors
    ///
    /// - [`CoreError::EmptyWindow`] unless `end > start`.
    /// - [`CoreError::ZeroBillingPeriod`] if `seconds_per_hour` is zero.
    /// - [`CoreError::CostOverflow`] if the cost does not fit `u64`.
    pub fn cost_for(
        &self,
        start: Timestamp,
        end: Timestamp,
        seconds_per_hour: u64,
    ) -> Result<u64, CoreError> {
        let duration = end.duration_since(start).ok_or(CoreError::EmptyWindow {
            start: start.get(),
            end: end.get(),
        })?;
        if seconds_per_hour == 0 {
            return Err(CoreError::ZeroBillingPeriod);
        }
        let cost = u128::from(self.0) * u128::from(duration) / u128::from(seconds_per_hour);
        u64::try_from(cost).map_err(|_| CoreError::CostOverflow {
            rate: self.0,
            duration,
        })
    }
}

impl From<u64> for HourlyRate {
    fn from(rate: u64) -> Self {
        Self(rate)
    }
}

impl std::fmt::Display for HourlyRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/h", self.0)
    }
}
