//! # Identity and Record Id Newtypes
//!
//! `Identity` is the opaque reference to an owner, renter, or reviewer
//! (an account name, a public key, a principal). The core only ever compares
//! identities for equality.
//!
//! Record ids are dense, 1-based sequence numbers. Each entity kind gets its
//! own newtype so the three id spaces cannot be confused.

use serde::{Deserialize, Serialize};

/// Opaque caller, owner, renter, or reviewer reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wrap a principal reference.
    pub fn new(principal: impl Into<String>) -> Self {
        Self(principal.into())
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Sequential identifier of a registered equipment listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentId(pub u64);

/// Sequential identifier of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

/// Sequential identifier of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(pub u64);

impl EquipmentId {
    /// The raw sequence number.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl BookingId {
    /// The raw sequence number.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl ReviewId {
    /// The raw sequence number.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EquipmentId {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl From<u64> for BookingId {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl From<u64> for ReviewId {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl std::fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "equipment:{}", self.0)
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "booking:{}", self.0)
    }
}

impl std::fmt::Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "review:{}", self.0)
    }
}
