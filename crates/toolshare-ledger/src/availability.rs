//! # Availability Check
//!
//! Whether a requested rental window is free is decided outside the
//! booking engine. The host injects an [`AvailabilityCheck`]; the engine
//! consults it after the equipment is found and the window is valid, and
//! before any booking state is touched.

use toolshare_core::Timestamp;

use crate::registry::Equipment;

/// Host-supplied predicate over (equipment, start, end).
pub trait AvailabilityCheck: Send + Sync {
    /// Whether `equipment` may be booked from `start` to `end`.
    fn is_available(&self, equipment: &Equipment, start: Timestamp, end: Timestamp) -> bool;
}

/// Accepts every window.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAvailable;

impl AvailabilityCheck for AlwaysAvailable {
    fn is_available(&self, _equipment: &Equipment, _start: Timestamp, _end: Timestamp) -> bool {
        true
    }
}

impl<F> AvailabilityCheck for F
where
    F: Fn(&Equipment, Timestamp, Timestamp) -> bool + Send + Sync,
{
    fn is_available(&self, equipment: &Equipment, start: Timestamp, end: Timestamp) -> bool {
        self(equipment, start, end)
    }
}
