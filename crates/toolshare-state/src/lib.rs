//! # toolshare-state — Booking Lifecycle State Machine
//!
//! Implements the booking lifecycle as an enum with validated transitions.
//! Each transition is a [`BookingAction`] gated by the caller's [`Role`]
//! relative to the booking; invalid transitions return structured errors
//! naming the current state, the attempted target, and the role.
//!
//! ## States
//!
//! ```text
//! Pending ──confirm──▶ Confirmed
//!    │                     │
//!    ├──complete───────────┼──complete──▶ Completed (terminal)
//!    │                     │
//!    └──cancel─────────────┴──cancel────▶ Cancelled (terminal)
//! ```
//!
//! Payment status is tracked alongside the booking status but moves
//! independently: `Pending ──record_payment──▶ Paid`.

pub mod lifecycle;

pub use lifecycle::{
    BookingAction, BookingLifecycle, BookingStatus, BookingTransitionRecord, LifecycleError,
    PaymentStatus, Role,
};
