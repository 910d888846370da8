//! # Equipment Registry
//!
//! Owns equipment listings. Anyone may register a listing and becomes its
//! owner; only the owner may update it. Listings are never deleted, and
//! owner and registration time never change.

use serde::{Deserialize, Serialize};

use toolshare_core::{CallContext, EquipmentId, HourlyRate, Identity, Timestamp};

use crate::error::MarketError;
use crate::store::{IdSequence, Store};

/// The owner-editable fields of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EquipmentListing {
    /// Display name.
    pub name: String,
    /// Category, e.g. "loom" or "table saw".
    pub equipment_type: String,
    /// Free-text description.
    pub description: String,
    /// Where the equipment can be used or collected.
    pub location: String,
    /// Price per hour in the smallest currency unit.
    pub hourly_rate: HourlyRate,
    /// Free-text availability note, e.g. "Weekdays 9am-5pm".
    pub availability: String,
    /// Free-text condition note, e.g. "excellent".
    pub maintenance_status: String,
}

/// A registered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Equipment {
    /// Sequential id.
    pub id: EquipmentId,
    /// The registering identity.
    pub owner: Identity,
    /// Owner-editable fields.
    #[serde(flatten)]
    pub listing: EquipmentListing,
    /// Logical time of registration.
    #[serde(rename = "registration-date")]
    pub registered_at: Timestamp,
}

/// Equipment listings keyed by id.
///
/// Clones share the same records and id counter.
#[derive(Debug, Clone, Default)]
pub struct EquipmentRegistry {
    records: Store<EquipmentId, Equipment>,
    ids: IdSequence,
}

impl EquipmentRegistry {
    /// An empty registry whose first id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listing owned by the caller.
    pub fn register(&self, ctx: &CallContext, listing: EquipmentListing) -> EquipmentId {
        let id = EquipmentId(self.ids.next_id());
        self.records.insert(
            id,
            Equipment {
                id,
                owner: ctx.caller.clone(),
                listing,
                registered_at: ctx.now,
            },
        );
        tracing::info!(equipment_id = %id, owner = %ctx.caller, "equipment registered");
        id
    }

    /// Replace every owner-editable field of a listing.
    ///
    /// # Errors
    ///
    /// - [`MarketError::NotFound`] if `id` is unknown.
    /// - [`MarketError::Forbidden`] if the caller is not the owner.
    pub fn update(
        &self,
        ctx: &CallContext,
        id: EquipmentId,
        listing: EquipmentListing,
    ) -> Result<EquipmentId, MarketError> {
        let result = self
            .records
            .try_update(&id, |equipment| {
                if !ctx.is(&equipment.owner) {
                    return Err(MarketError::Forbidden(format!(
                        "{} is not the owner of {id}",
                        ctx.caller
                    )));
                }
                equipment.listing = listing;
                Ok(id)
            })
            .unwrap_or_else(|| Err(MarketError::NotFound(id.to_string())));

        match &result {
            Ok(_) => tracing::info!(equipment_id = %id, "equipment updated"),
            Err(MarketError::Forbidden(reason)) => tracing::warn!(
                equipment_id = %id,
                caller = %ctx.caller,
                %reason,
                "equipment update denied"
            ),
            Err(e) => tracing::debug!(equipment_id = %id, error = %e, "equipment update rejected"),
        }
        result
    }

    /// Look up a listing.
    pub fn get(&self, id: EquipmentId) -> Option<Equipment> {
        self.records.get(&id)
    }

    /// All listings owned by `owner`, in id order.
    pub fn list_by_owner(&self, owner: &Identity) -> Vec<Equipment> {
        self.records.filter(|e| &e.owner == owner)
    }

    /// Number of registered listings.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
