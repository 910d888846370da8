//! # Booking Lifecycle
//!
//! ## Design Decision
//!
//! The lifecycle uses an enum with validated transitions rather than
//! typestate types. Bookings are loaded from a store and driven by callers
//! whose role is only known at runtime, so the check has to happen at
//! runtime anyway.
//!
//! Authorization is checked before state: a caller without the required role
//! is told so regardless of the booking's status. Terminal states
//! (`Completed`, `Cancelled`) accept no further status transitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use toolshare_core::{Identity, Timestamp};

// ─── Booking Status ──────────────────────────────────────────────────

/// The lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Requested by the renter, awaiting the owner.
    Pending,
    /// Accepted by the equipment owner.
    Confirmed,
    /// Rental finished (terminal).
    Completed,
    /// Withdrawn by either party (terminal).
    Cancelled,
}

impl BookingStatus {
    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// The status name as stored by hosts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment flag of a booking. Only the flag is tracked, not settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// No payment acknowledged yet.
    #[default]
    Pending,
    /// The owner acknowledged payment.
    Paid,
}

impl PaymentStatus {
    /// The flag name as stored by hosts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Roles and Actions ───────────────────────────────────────────────

/// The caller's relation to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Owner of the booked equipment.
    Owner,
    /// The identity that created the booking.
    Renter,
    /// Anyone else.
    ThirdParty,
}

impl Role {
    /// Classify `caller` against the equipment owner and the renter.
    ///
    /// An owner booking their own equipment is classified as `Owner`, whose
    /// permissions include everything a renter may do.
    pub fn of(caller: &Identity, owner: &Identity, renter: &Identity) -> Self {
        if caller == owner {
            Self::Owner
        } else if caller == renter {
            Self::Renter
        } else {
            Self::ThirdParty
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Owner => "owner",
            Self::Renter => "renter",
            Self::ThirdParty => "third party",
        };
        f.write_str(s)
    }
}

/// An operation on an existing booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingAction {
    /// Owner accepts a pending booking.
    Confirm,
    /// Either party marks the rental finished.
    Complete,
    /// Either party withdraws the booking.
    Cancel,
    /// Owner acknowledges payment.
    RecordPayment,
}

impl BookingAction {
    /// Whether `role` may perform this action.
    pub fn permits(&self, role: Role) -> bool {
        match self {
            Self::Confirm | Self::RecordPayment => role == Role::Owner,
            Self::Complete | Self::Cancel => matches!(role, Role::Owner | Role::Renter),
        }
    }

    /// The status this action moves the booking to, if it is a status
    /// transition.
    pub fn target(&self) -> Option<BookingStatus> {
        match self {
            Self::Confirm => Some(BookingStatus::Confirmed),
            Self::Complete => Some(BookingStatus::Completed),
            Self::Cancel => Some(BookingStatus::Cancelled),
            Self::RecordPayment => None,
        }
    }

    /// Whether the action may start from `status`.
    pub fn allowed_from(&self, status: BookingStatus) -> bool {
        match self {
            Self::Confirm => status == BookingStatus::Pending,
            Self::Complete | Self::Cancel => {
                matches!(status, BookingStatus::Pending | BookingStatus::Confirmed)
            }
            Self::RecordPayment => status != BookingStatus::Cancelled,
        }
    }
}

impl std::fmt::Display for BookingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Confirm => "confirm",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
            Self::RecordPayment => "record payment for",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors that can occur during booking lifecycle transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The caller's role does not permit the action.
    #[error("{role} may not {action} the booking")]
    Forbidden {
        /// The caller's role.
        role: Role,
        /// The attempted action.
        action: BookingAction,
    },

    /// Attempted transition is not valid from the current status.
    #[error("invalid booking transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: BookingStatus,
        /// Attempted target status.
        to: BookingStatus,
    },

    /// The booking is in a terminal status.
    #[error("booking is in terminal state {state}")]
    Terminal {
        /// The terminal status.
        state: BookingStatus,
    },

    /// Payment cannot be recorded in the current status.
    #[error("cannot record payment: booking is {status}, payment is {payment}")]
    Payment {
        /// Current booking status.
        status: BookingStatus,
        /// Current payment flag.
        payment: PaymentStatus,
    },
}

// ─── Transition Record ───────────────────────────────────────────────

/// Record of a booking status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingTransitionRecord {
    /// Status before the transition.
    pub from_state: BookingStatus,
    /// Status after the transition.
    pub to_state: BookingStatus,
    /// Role of the caller that drove it.
    pub role: Role,
    /// Logical time of the transition.
    pub timestamp: Timestamp,
}

// ─── Lifecycle ───────────────────────────────────────────────────────

/// Status, payment flag, and transition history of one booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BookingLifecycle {
    /// Current status.
    pub status: BookingStatus,
    /// Current payment flag.
    pub payment_status: PaymentStatus,
    /// Ordered log of all status transitions.
    pub transitions: Vec<BookingTransitionRecord>,
}

impl Default for BookingLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingLifecycle {
    /// A new lifecycle: pending, unpaid, no history.
    pub fn new() -> Self {
        Self {
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            transitions: Vec::new(),
        }
    }

    /// Owner confirms (PENDING → CONFIRMED).
    pub fn confirm(&mut self, role: Role, at: Timestamp) -> Result<BookingStatus, LifecycleError> {
        self.apply(BookingAction::Confirm, role, at)
    }

    /// Owner or renter completes (PENDING | CONFIRMED → COMPLETED).
    pub fn complete(&mut self, role: Role, at: Timestamp) -> Result<BookingStatus, LifecycleError> {
        self.apply(BookingAction::Complete, role, at)
    }

    /// Owner or renter cancels (PENDING | CONFIRMED → CANCELLED).
    pub fn cancel(&mut self, role: Role, at: Timestamp) -> Result<BookingStatus, LifecycleError> {
        self.apply(BookingAction::Cancel, role, at)
    }

    /// Apply a status-moving action on behalf of `role`.
    ///
    /// Checks, in order: the role is permitted, the booking is not terminal,
    /// the action may start from the current status. `RecordPayment` is
    /// routed to [`BookingLifecycle::record_payment`].
    pub fn apply(
        &mut self,
        action: BookingAction,
        role: Role,
        at: Timestamp,
    ) -> Result<BookingStatus, LifecycleError> {
        let Some(target) = action.target() else {
            self.record_payment(role)?;
            return Ok(self.status);
        };
        self.require_role(action, role)?;
        if self.status.is_terminal() {
            return Err(LifecycleError::Terminal { state: self.status });
        }
        if !action.allowed_from(self.status) {
            return Err(LifecycleError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }
        self.do_transition(target, role, at);
        Ok(target)
    }

    /// Owner acknowledges payment (payment PENDING → PAID).
    ///
    /// Rejected for cancelled bookings and for bookings already paid.
    pub fn record_payment(&mut self, role: Role) -> Result<(), LifecycleError> {
        self.require_role(BookingAction::RecordPayment, role)?;
        if !BookingAction::RecordPayment.allowed_from(self.status)
            || self.payment_status == PaymentStatus::Paid
        {
            return Err(LifecycleError::Payment {
                status: self.status,
                payment: self.payment_status,
            });
        }
        self.payment_status = PaymentStatus::Paid;
        Ok(())
    }

    /// Whether the booking reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    fn require_role(&self, action: BookingAction, role: Role) -> Result<(), LifecycleError> {
        if action.permits(role) {
            Ok(())
        } else {
            Err(LifecycleError::Forbidden { role, action })
        }
    }

    fn do_transition(&mut self, to: BookingStatus, role: Role, at: Timestamp) {
        self.transitions.push(BookingTransitionRecord {
            from_state: self.status,
            to_state: to,
            role,
            timestamp: at,
        });
        self.status = to;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn t(n: u64) -> Timestamp {
        Timestamp::new(n)
    }

    fn confirmed() -> BookingLifecycle {
        let mut b = BookingLifecycle::new();
        b.confirm(Role::Owner, t(1)).unwrap();
        b
    }

    // ── Basic lifecycle ──────────────────────────────────────────────

    #[test]
    fn test_new_booking_is_pending_and_unpaid() {
        let b = BookingLifecycle::new();
        assert_eq!(b.status, BookingStatus::Pending);
        assert_eq!(b.payment_status, PaymentStatus::Pending);
        assert!(b.transitions.is_empty());
    }

    #[test]
    fn test_owner_confirms_pending() {
        let mut b = BookingLifecycle::new();
        assert_eq!(b.confirm(Role::Owner, t(5)).unwrap(), BookingStatus::Confirmed);
        assert_eq!(b.status, BookingStatus::Confirmed);
    }

    #[test]
    fn test_renter_cannot_confirm() {
        let mut b = BookingLifecycle::new();
        assert_eq!(
            b.confirm(Role::Renter, t(5)),
            Err(LifecycleError::Forbidden {
                role: Role::Renter,
                action: BookingAction::Confirm
            })
        );
        assert_eq!(b.status, BookingStatus::Pending);
    }

    #[test]
    fn test_reconfirm_is_invalid() {
        let mut b = confirmed();
        assert_eq!(
            b.confirm(Role::Owner, t(2)),
            Err(LifecycleError::InvalidTransition {
                from: BookingStatus::Confirmed,
                to: BookingStatus::Confirmed
            })
        );
    }

    #[test]
    fn test_complete_from_pending_and_confirmed() {
        for role in [Role::Owner, Role::Renter] {
            let mut b = BookingLifecycle::new();
            b.complete(role, t(1)).unwrap();
            assert_eq!(b.status, BookingStatus::Completed);

            let mut b = confirmed();
            b.complete(role, t(2)).unwrap();
            assert_eq!(b.status, BookingStatus::Completed);
        }
    }

    #[test]
    fn test_cancel_from_pending_and_confirmed() {
        for role in [Role::Owner, Role::Renter] {
            let mut b = BookingLifecycle::new();
            b.cancel(role, t(1)).unwrap();
            assert_eq!(b.status, BookingStatus::Cancelled);

            let mut b = confirmed();
            b.cancel(role, t(2)).unwrap();
            assert_eq!(b.status, BookingStatus::Cancelled);
        }
    }

    #[test]
    fn test_third_party_forbidden_everywhere() {
        for action in [
            BookingAction::Confirm,
            BookingAction::Complete,
            BookingAction::Cancel,
            BookingAction::RecordPayment,
        ] {
            let mut b = BookingLifecycle::new();
            assert!(matches!(
                b.apply(action, Role::ThirdParty, t(1)),
                Err(LifecycleError::Forbidden { .. })
            ));
            assert_eq!(b, BookingLifecycle::new());
        }
    }

    // ── Terminal states ──────────────────────────────────────────────

    #[test]
    fn test_completed_is_terminal() {
        let mut b = confirmed();
        b.complete(Role::Renter, t(2)).unwrap();
        assert!(b.is_terminal());
        assert_eq!(
            b.cancel(Role::Owner, t(3)),
            Err(LifecycleError::Terminal {
                state: BookingStatus::Completed
            })
        );
        assert_eq!(
            b.complete(Role::Owner, t(3)),
            Err(LifecycleError::Terminal {
                state: BookingStatus::Completed
            })
        );
        assert_eq!(b.status, BookingStatus::Completed);
    }

    #[test]
    fn test_cancelled_is_terminal() {
        let mut b = BookingLifecycle::new();
        b.cancel(Role::Renter, t(1)).unwrap();
        assert!(matches!(
            b.complete(Role::Owner, t(2)),
            Err(LifecycleError::Terminal { .. })
        ));
        assert!(matches!(
            b.confirm(Role::Owner, t(2)),
            Err(LifecycleError::Terminal { .. })
        ));
    }

    #[test]
    fn test_forbidden_reported_before_terminal() {
        let mut b = BookingLifecycle::new();
        b.cancel(Role::Owner, t(1)).unwrap();
        assert!(matches!(
            b.confirm(Role::Renter, t(2)),
            Err(LifecycleError::Forbidden { .. })
        ));
    }

    // ── Payment ──────────────────────────────────────────────────────

    #[test]
    fn test_owner_records_payment_once() {
        let mut b = confirmed();
        b.record_payment(Role::Owner).unwrap();
        assert_eq!(b.payment_status, PaymentStatus::Paid);
        assert!(matches!(
            b.record_payment(Role::Owner),
            Err(LifecycleError::Payment { .. })
        ));
    }

    #[test]
    fn test_payment_after_completion_allowed() {
        let mut b = confirmed();
        b.complete(Role::Owner, t(2)).unwrap();
        b.record_payment(Role::Owner).unwrap();
        assert_eq!(b.payment_status, PaymentStatus::Paid);
        assert_eq!(b.status, BookingStatus::Completed);
    }

    #[test]
    fn test_payment_on_cancelled_rejected() {
        let mut b = BookingLifecycle::new();
        b.cancel(Role::Renter, t(1)).unwrap();
        assert_eq!(
            b.record_payment(Role::Owner),
            Err(LifecycleError::Payment {
                status: BookingStatus::Cancelled,
                payment: PaymentStatus::Pending
            })
        );
    }

    #[test]
    fn test_renter_cannot_record_payment() {
        let mut b = confirmed();
        assert!(matches!(
            b.record_payment(Role::Renter),
            Err(LifecycleError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_payment_does_not_log_transition() {
        let mut b = confirmed();
        b.record_payment(Role::Owner).unwrap();
        assert_eq!(b.transitions.len(), 1);
    }

    // ── Roles ────────────────────────────────────────────────────────

    #[test]
    fn test_role_classification() {
        let owner = Identity::new("owner");
        let renter = Identity::new("renter");
        assert_eq!(Role::of(&owner, &owner, &renter), Role::Owner);
        assert_eq!(Role::of(&renter, &owner, &renter), Role::Renter);
        assert_eq!(
            Role::of(&Identity::new("mallory"), &owner, &renter),
            Role::ThirdParty
        );
        // Owner renting their own equipment.
        assert_eq!(Role::of(&owner, &owner, &owner), Role::Owner);
    }

    // ── Transition log ───────────────────────────────────────────────

    #[test]
    fn test_transition_log_records_all_changes() {
        let mut b = BookingLifecycle::new();
        b.confirm(Role::Owner, t(10)).unwrap();
        b.complete(Role::Renter, t(20)).unwrap();

        assert_eq!(b.transitions.len(), 2);
        assert_eq!(b.transitions[0].from_state, BookingStatus::Pending);
        assert_eq!(b.transitions[0].to_state, BookingStatus::Confirmed);
        assert_eq!(b.transitions[0].role, Role::Owner);
        assert_eq!(b.transitions[0].timestamp, t(10));
        assert_eq!(b.transitions[1].from_state, BookingStatus::Confirmed);
        assert_eq!(b.transitions[1].to_state, BookingStatus::Completed);
        assert_eq!(b.transitions[1].role, Role::Renter);
    }

    #[test]
    fn test_failed_transition_leaves_no_record() {
        let mut b = confirmed();
        let _ = b.confirm(Role::Owner, t(2));
        let _ = b.cancel(Role::ThirdParty, t(3));
        assert_eq!(b.transitions.len(), 1);
    }

    // ── Display and serialization ────────────────────────────────────

    #[test]
    fn test_status_display() {
        assert_eq!(BookingStatus::Pending.to_string(), "pending");
        assert_eq!(BookingStatus::Confirmed.to_string(), "confirmed");
        assert_eq!(BookingStatus::Completed.to_string(), "completed");
        assert_eq!(BookingStatus::Cancelled.to_string(), "cancelled");
        assert_eq!(PaymentStatus::Paid.to_string(), "paid");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Completed).unwrap(),
            "\"completed\""
        );
        let parsed: PaymentStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, PaymentStatus::Pending);
    }

    #[test]
    fn test_error_messages() {
        let err = LifecycleError::Forbidden {
            role: Role::ThirdParty,
            action: BookingAction::Cancel,
        };
        assert_eq!(err.to_string(), "third party may not cancel the booking");
        let err = LifecycleError::InvalidTransition {
            from: BookingStatus::Confirmed,
            to: BookingStatus::Confirmed,
        };
        assert_eq!(err.to_string(), "invalid booking transition: confirmed -> confirmed");
    }
}
