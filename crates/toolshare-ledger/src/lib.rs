//! # toolshare-ledger — Equipment Sharing Marketplace Ledger
//!
//! The record-keeping half of a peer-to-peer equipment rental marketplace:
//! owners list equipment, renters book it for a time window, owners move
//! bookings through their lifecycle, and renters review completed rentals.
//!
//! ## Components
//!
//! | Module          | Responsibility                                          |
//! |-----------------|---------------------------------------------------------|
//! | `registry`      | Register and update equipment listings                  |
//! | `booking`       | Create bookings, drive confirm/complete/cancel/payment  |
//! | `review`        | Accept one review per completed booking from its renter |
//! | `availability`  | Host-injected window check consulted on booking         |
//! | `marketplace`   | Builds the three components over shared storage         |
//! | `config`        | YAML billing and review policy                          |
//! | `store`         | Lock-guarded keyed records and id sequences             |
//!
//! ## Invariants
//!
//! - Ids are sequential per record kind, start at 1, and are only consumed
//!   by operations that succeed.
//! - A failed operation leaves every record unchanged.
//! - Every mutating operation receives an explicit [`CallContext`]; nothing
//!   reads an ambient caller or the wall clock.
//!
//! ## Logging
//!
//! Successful mutations log at `info`, authorization failures at `warn`,
//! other rejections at `debug`, all through `tracing`. Installing a
//! subscriber is left to the host.
//!
//! [`CallContext`]: toolshare_core::CallContext

pub mod availability;
pub mod booking;
pub mod config;
pub mod error;
pub mod marketplace;
pub mod registry;
pub mod review;
pub mod store;

pub use availability::{AlwaysAvailable, AvailabilityCheck};
pub use booking::{Booking, BookingEngine};
pub use config::{BillingConfig, ConfigError, MarketplaceConfig, ReviewPolicy};
pub use error::MarketError;
pub use marketplace::Marketplace;
pub use registry::{Equipment, EquipmentListing, EquipmentRegistry};
pub use review::{Review, ReviewLedger};
pub use store::{IdSequence, Store};
