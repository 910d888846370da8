//! # Booking Engine
//!
//! Owns bookings. A renter books a window on a registered listing; the
//! total cost is fixed at creation from the listing's rate at that moment.
//! The booking then moves through the lifecycle in `toolshare-state`:
//!
//! | Operation        | Who               | From                 | To          |
//! |------------------|-------------------|----------------------|-------------|
//! | `confirm`        | owner             | pending              | confirmed   |
//! | `complete`       | owner or renter   | pending, confirmed   | completed   |
//! | `cancel`         | owner or renter   | pending, confirmed   | cancelled   |
//! | `record_payment` | owner             | any but cancelled    | (paid flag) |
//!
//! Every transition first resolves the booking, then the booked equipment
//! (for its owner), then classifies the caller, and finally validates and
//! applies the transition under a single write lock.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use toolshare_core::{BookingId, CallContext, EquipmentId, Identity, Timestamp};
use toolshare_state::{BookingAction, BookingLifecycle, BookingStatus, PaymentStatus, Role};

use crate::availability::{AlwaysAvailable, AvailabilityCheck};
use crate::config::{BillingConfig, ConfigError};
use crate::error::MarketError;
use crate::registry::EquipmentRegistry;
use crate::store::{IdSequence, Store};

/// A reservation of one listing for a time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Booking {
    /// Sequential id.
    pub id: BookingId,
    /// The booked listing.
    pub equipment_id: EquipmentId,
    /// The identity that created the booking.
    pub renter: Identity,
    /// Start of the rental window.
    pub start_time: Timestamp,
    /// End of the rental window.
    pub end_time: Timestamp,
    /// Cost fixed at creation, in the smallest currency unit.
    pub total_cost: u64,
    /// Status, payment flag, and transition history.
    #[serde(flatten)]
    pub lifecycle: BookingLifecycle,
    /// Free-text notes from the renter.
    pub notes: String,
    /// Logical time of creation.
    #[serde(rename = "creation-date")]
    pub created_at: Timestamp,
}

impl Booking {
    /// Current status.
    pub fn status(&self) -> BookingStatus {
        self.lifecycle.status
    }

    /// Current payment flag.
    pub fn payment_status(&self) -> PaymentStatus {
        self.lifecycle.payment_status
    }
}

/// Bookings keyed by id, backed by an [`EquipmentRegistry`].
///
/// Clones share records, id counter, registry, and availability check.
#[derive(Clone)]
pub struct BookingEngine {
    registry: EquipmentRegistry,
    records: Store<BookingId, Booking>,
    ids: IdSequence,
    availability: Arc<dyn AvailabilityCheck>,
    billing: BillingConfig,
}

impl std::fmt::Debug for BookingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingEngine")
            .field("registry", &self.registry)
            .field("records", &self.records)
            .field("ids", &self.ids)
            .field("billing", &self.billing)
            .finish_non_exhaustive()
    }
}

impl BookingEngine {
    /// An empty engine over `registry`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if `billing` has a zero-length hour.
    pub fn new(
        registry: EquipmentRegistry,
        availability: impl AvailabilityCheck + 'static,
        billing: BillingConfig,
    ) -> Result<Self, ConfigError> {
        billing.validate()?;
        Ok(Self::assemble(registry, Arc::new(availability), billing))
    }

    /// An engine that accepts every window and bills by the standard hour.
    pub fn with_registry(registry: EquipmentRegistry) -> Self {
        Self::assemble(registry, Arc::new(AlwaysAvailable), BillingConfig::default())
    }

    /// Build without checking `billing`; callers validate first.
    pub(crate) fn assemble(
        registry: EquipmentRegistry,
        availability: Arc<dyn AvailabilityCheck>,
        billing: BillingConfig,
    ) -> Self {
        Self {
            registry,
            records: Store::new(),
            ids: IdSequence::new(),
            availability,
            billing,
        }
    }

    /// The registry this engine reads listings from.
    pub fn registry(&self) -> &EquipmentRegistry {
        &self.registry
    }

    /// Book `equipment_id` from `start` to `end` as the caller.
    ///
    /// # Errors
    ///
    /// - [`MarketError::NotFound`] if the equipment is unknown.
    /// - [`MarketError::Validation`] if `end <= start` or the cost overflows.
    /// - [`MarketError::Unavailable`] if the availability check rejects the window.
    pub fn create(
        &self,
        ctx: &CallContext,
        equipment_id: EquipmentId,
        start: Timestamp,
        end: Timestamp,
        notes: impl Into<String>,
    ) -> Result<BookingId, MarketError> {
        let equipment = self
            .registry
            .get(equipment_id)
            .ok_or_else(|| MarketError::NotFound(equipment_id.to_string()))?;

        let total_cost = equipment
            .listing
            .hourly_rate
            .cost_for(start, end, self.billing.seconds_per_hour)
            .map_err(|e| {
                tracing::debug!(
                    equipment_id = %equipment_id,
                    error = %e,
                    "booking window rejected"
                );
                MarketError::from(e)
            })?;

        if !self.availability.is_available(&equipment, start, end) {
            tracing::warn!(
                equipment_id = %equipment_id,
                start = %start,
                end = %end,
                "requested window unavailable"
            );
            return Err(MarketError::Unavailable {
                equipment: equipment_id,
                start,
                end,
            });
        }

        let id = BookingId(self.ids.next_id());
        self.records.insert(
            id,
            Booking {
                id,
                equipment_id,
                renter: ctx.caller.clone(),
                start_time: start,
                end_time: end,
                total_cost,
                lifecycle: BookingLifecycle::new(),
                notes: notes.into(),
                created_at: ctx.now,
            },
        );
        tracing::info!(
            booking_id = %id,
            equipment_id = %equipment_id,
            renter = %ctx.caller,
            total_cost,
            "booking created"
        );
        Ok(id)
    }

    /// Owner accepts a pending booking.
    pub fn confirm(&self, ctx: &CallContext, id: BookingId) -> Result<BookingId, MarketError> {
        self.transition(ctx, id, BookingAction::Confirm)
    }

    /// Owner or renter marks the rental finished.
    pub fn complete(&self, ctx: &CallContext, id: BookingId) -> Result<BookingId, MarketError> {
        self.transition(ctx, id, BookingAction::Complete)
    }

    /// Owner or renter withdraws the booking.
    pub fn cancel(&self, ctx: &CallContext, id: BookingId) -> Result<BookingId, MarketError> {
        self.transition(ctx, id, BookingAction::Cancel)
    }

    /// Owner acknowledges payment for the booking.
    pub fn record_payment(
        &self,
        ctx: &CallContext,
        id: BookingId,
    ) -> Result<BookingId, MarketError> {
        self.transition(ctx, id, BookingAction::RecordPayment)
    }

    /// Look up a booking.
    pub fn get(&self, id: BookingId) -> Option<Booking> {
        self.records.get(&id)
    }

    /// All bookings of `equipment_id`, in id order.
    pub fn list_for_equipment(&self, equipment_id: EquipmentId) -> Vec<Booking> {
        self.records.filter(|b| b.equipment_id == equipment_id)
    }

    /// All bookings made by `renter`, in id order.
    pub fn list_for_renter(&self, renter: &Identity) -> Vec<Booking> {
        self.records.filter(|b| &b.renter == renter)
    }

    /// Number of bookings.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no booking exists.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn transition(
        &self,
        ctx: &CallContext,
        id: BookingId,
        action: BookingAction,
    ) -> Result<BookingId, MarketError> {
        let booking = self
            .records
            .get(&id)
            .ok_or_else(|| MarketError::NotFound(id.to_string()))?;
        let equipment = self
            .registry
            .get(booking.equipment_id)
            .ok_or_else(|| MarketError::NotFound(booking.equipment_id.to_string()))?;
        let role = Role::of(&ctx.caller, &equipment.owner, &booking.renter);

        let result = match self
            .records
            .try_update(&id, |b| b.lifecycle.apply(action, role, ctx.now))
        {
            Some(applied) => applied.map_err(MarketError::from),
            None => Err(MarketError::NotFound(id.to_string())),
        };

        match &result {
            Ok(status) => {
                tracing::info!(booking_id = %id, %action, %role, %status, "booking updated")
            }
            Err(MarketError::Forbidden(reason)) => tracing::warn!(
                booking_id = %id,
                caller = %ctx.caller,
                %action,
                %reason,
                "booking action denied"
            ),
            Err(e) => tracing::debug!(booking_id = %id, error = %e, "booking action rejected"),
        }
        result.map(|_| id)
    }
}
