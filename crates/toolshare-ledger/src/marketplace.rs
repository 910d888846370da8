//! # Marketplace
//!
//! Wires the registry, booking engine, and review ledger together over
//! shared storage. Each component handle is a cheap clone of the same
//! underlying records, so a host can hand them to separate callers.

use std::path::Path;
use std::sync::Arc;

use crate::availability::{AlwaysAvailable, AvailabilityCheck};
use crate::booking::BookingEngine;
use crate::config::{ConfigError, MarketplaceConfig};
use crate::registry::EquipmentRegistry;
use crate::review::ReviewLedger;

/// The three marketplace components and the configuration they were built with.
#[derive(Debug, Clone)]
pub struct Marketplace {
    equipment: EquipmentRegistry,
    bookings: BookingEngine,
    reviews: ReviewLedger,
    config: MarketplaceConfig,
}

impl Marketplace {
    /// A marketplace that accepts every rental window.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if `config` fails [`MarketplaceConfig::validate`].
    pub fn new(config: MarketplaceConfig) -> Result<Self, ConfigError> {
        Self::with_availability(config, AlwaysAvailable)
    }

    /// A marketplace that consults `check` before accepting a booking.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if `config` fails [`MarketplaceConfig::validate`].
    pub fn with_availability(
        config: MarketplaceConfig,
        check: impl AvailabilityCheck + 'static,
    ) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "marketplace configuration rejected");
            return Err(e);
        }
        Ok(Self::assemble(config, Arc::new(check)))
    }

    /// Load configuration from a YAML file and build a marketplace from it.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::new(MarketplaceConfig::load(path)?)
    }

    fn assemble(config: MarketplaceConfig, check: Arc<dyn AvailabilityCheck>) -> Self {
        let equipment = EquipmentRegistry::new();
        let bookings = BookingEngine::assemble(equipment.clone(), check, config.billing);
        let reviews = ReviewLedger::assemble(bookings.clone(), config.reviews);
        tracing::debug!(
            seconds_per_hour = config.billing.seconds_per_hour,
            min_rating = config.reviews.min_rating,
            max_rating = config.reviews.max_rating,
            one_per_booking = config.reviews.one_per_booking,
            "marketplace initialized"
        );
        Self {
            equipment,
            bookings,
            reviews,
            config,
        }
    }

    /// Equipment registry.
    pub fn equipment(&self) -> &EquipmentRegistry {
        &self.equipment
    }

    /// Booking engine.
    pub fn bookings(&self) -> &BookingEngine {
        &self.bookings
    }

    /// Review ledger.
    pub fn reviews(&self) -> &ReviewLedger {
        &self.reviews
    }

    /// Configuration in effect.
    pub fn config(&self) -> &MarketplaceConfig {
        &self.config
    }
}

impl Default for Marketplace {
    fn default() -> Self {
        Self::assemble(MarketplaceConfig::default(), Arc::new(AlwaysAvailable))
    }
}
