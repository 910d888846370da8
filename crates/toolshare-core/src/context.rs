//! # Call Context
//!
//! The identity context of a single operation: who is calling and what the
//! host's logical clock reads. The host builds one per call.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::temporal::Timestamp;

/// Caller identity and logical time for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// The principal invoking the operation.
    pub caller: Identity,
    /// The host's current logical time.
    pub now: Timestamp,
}

impl CallContext {
    /// Build a context for `caller` at logical time `now`.
    pub fn new(caller: impl Into<Identity>, now: Timestamp) -> Self {
        Self {
            caller: caller.into(),
            now,
        }
    }

    /// Whether the caller is `identity`.
    pub fn is(&self, identity: &Identity) -> bool {
        &self.caller == identity
    }
}
