//! # Marketplace Errors
//!
//! The error taxonomy every public ledger operation returns. Each kind maps
//! onto a conventional response code via [`MarketError::status_code`], which
//! hosts use when translating results onto their own transport.

use thiserror::Error;

use toolshare_core::{BookingId, CoreError, EquipmentId, Timestamp};
use toolshare_state::LifecycleError;

/// Error returned by registry, booking, and review operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// The referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller lacks the role or ownership the operation requires.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The availability check rejected the requested window.
    #[error("{equipment} is unavailable from {start} to {end}")]
    Unavailable {
        /// Requested equipment.
        equipment: EquipmentId,
        /// Requested start.
        start: Timestamp,
        /// Requested end.
        end: Timestamp,
    },

    /// The booking's status does not permit the operation.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The booking already carries a review.
    #[error("{0} has already been reviewed")]
    AlreadyReviewed(BookingId),

    /// An argument failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] CoreError),
}

impl MarketError {
    /// Conventional response code for this error kind.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Forbidden(_) => 403,
            Self::Unavailable { .. } => 410,
            Self::InvalidState(_) | Self::AlreadyReviewed(_) => 409,
            Self::Validation(_) => 400,
        }
    }
}

impl From<LifecycleError> for MarketError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::Forbidden { .. } => Self::Forbidden(err.to_string()),
            LifecycleError::InvalidTransition { .. }
            | LifecycleError::Terminal { .. }
            | LifecycleError::Payment { .. } => Self::InvalidState(err.to_string()),
        }
    }
}
