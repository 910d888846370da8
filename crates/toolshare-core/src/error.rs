//! # Core Errors
//!
//! Validation failures raised by the core value types. Higher crates wrap
//! these into their own taxonomies via `#[from]`.

use thiserror::Error;

/// Validation error in a core value type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A rental window whose end is not strictly after its start.
    #[error("rental window must end after it starts (start {start}, end {end})")]
    EmptyWindow {
        /// Requested start, in logical units.
        start: u64,
        /// Requested end, in logical units.
        end: u64,
    },

    /// The computed cost does not fit the currency representation.
    #[error("cost of {rate}/hour over {duration} units overflows")]
    CostOverflow {
        /// Hourly rate in the smallest currency unit.
        rate: u64,
        /// Rental duration in logical units.
        duration: u64,
    },

    /// The billing period length must be positive.
    #[error("seconds per hour must be positive")]
    ZeroBillingPeriod,

    /// A review rating outside the accepted bounds.
    #[error("rating {rating} is outside {min}..={max}")]
    RatingOutOfRange {
        /// Submitted rating.
        rating: u8,
        /// Lowest accepted rating.
        min: u8,
        /// Highest accepted rating.
        max: u8,
    },

    /// A datetime before the Unix epoch cannot become a logical timestamp.
    #[error("datetime {0} is before the Unix epoch")]
    BeforeEpoch(String),
}
