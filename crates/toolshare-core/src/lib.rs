//! # toolshare-core — Foundational Types for the Marketplace
//!
//! Defines the value types every other toolshare crate builds on. This crate
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `EquipmentId`, `BookingId`, and
//!    `ReviewId` are distinct types, so a booking id cannot be passed where an
//!    equipment id is expected. Callers are identified by the opaque
//!    `Identity` newtype, never a bare string.
//!
//! 2. **Logical time.** `Timestamp` is a host-supplied logical clock value
//!    (block height, epoch seconds). Nothing in the core reads the wall clock.
//!
//! 3. **Explicit call context.** Every mutating operation receives a
//!    `CallContext` carrying the caller and the current logical time. There
//!    is no ambient "current principal".
//!
//! 4. **Truncating integer cost arithmetic.** `HourlyRate::cost_for` computes
//!    `rate * duration / seconds_per_hour` in `u128` and refuses results that
//!    do not fit `u64`.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod context;
pub mod error;
pub mod identity;
pub mod rate;
pub mod temporal;

pub use context::CallContext;
pub use error::CoreError;
pub use identity::{BookingId, EquipmentId, Identity, ReviewId};
pub use rate::{HourlyRate, SECONDS_PER_HOUR};
pub use temporal::Timestamp;
