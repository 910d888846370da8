//! # Review Ledger
//!
//! Append-only renter reviews. A review is accepted only from the booking's
//! renter, for the equipment that booking was for, once the booking is
//! completed. Any of those three failing is one authorization failure.
//! Accepted reviews are immutable.

use serde::{Deserialize, Serialize};

use toolshare_core::{BookingId, CallContext, EquipmentId, Identity, ReviewId, Timestamp};
use toolshare_state::BookingStatus;

use crate::booking::BookingEngine;
use crate::config::{ConfigError, ReviewPolicy};
use crate::error::MarketError;
use crate::store::{IdSequence, Store};

/// A renter's rating of a completed rental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Review {
    /// Sequential id.
    pub id: ReviewId,
    /// The reviewed listing.
    pub equipment_id: EquipmentId,
    /// The completed booking the review is for.
    pub booking_id: BookingId,
    /// The booking's renter.
    pub reviewer: Identity,
    /// Score within the configured bounds.
    pub rating: u8,
    /// Free-text comments.
    pub comments: String,
    /// Logical time of submission.
    #[serde(rename = "review-date")]
    pub reviewed_at: Timestamp,
}

/// Reviews keyed by id, checked against a [`BookingEngine`].
#[derive(Debug, Clone)]
pub struct ReviewLedger {
    bookings: BookingEngine,
    records: Store<ReviewId, Review>,
    ids: IdSequence,
    policy: ReviewPolicy,
}

impl ReviewLedger {
    /// An empty ledger over `bookings`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if the policy's rating bounds are inverted.
    pub fn new(bookings: BookingEngine, policy: ReviewPolicy) -> Result<Self, ConfigError> {
        policy.validate()?;
        Ok(Self::assemble(bookings, policy))
    }

    /// Build without checking `policy`; callers validate first.
    pub(crate) fn assemble(bookings: BookingEngine, policy: ReviewPolicy) -> Self {
        Self {
            bookings,
            records: Store::new(),
            ids: IdSequence::new(),
            policy,
        }
    }

    /// The booking engine reviews are checked against.
    pub fn bookings(&self) -> &BookingEngine {
        &self.bookings
    }

    /// Submit a review of `equipment_id` for `booking_id` as the caller.
    ///
    /// # Errors
    ///
    /// - [`MarketError::NotFound`] if the booking is unknown.
    /// - [`MarketError::Forbidden`] unless the caller is the booking's renter,
    ///   the booking is for `equipment_id`, and the booking is completed.
    /// - [`MarketError::Validation`] if `rating` is out of bounds.
    /// - [`MarketError::AlreadyReviewed`] if the booking already has a review
    ///   and the policy allows only one.
    pub fn submit(
        &self,
        ctx: &CallContext,
        equipment_id: EquipmentId,
        booking_id: BookingId,
        rating: u8,
        comments: impl Into<String>,
    ) -> Result<ReviewId, MarketError> {
        let booking = self
            .bookings
            .get(booking_id)
            .ok_or_else(|| MarketError::NotFound(booking_id.to_string()))?;

        if !ctx.is(&booking.renter)
            || booking.equipment_id != equipment_id
            || booking.status() != BookingStatus::Completed
        {
            tracing::warn!(
                booking_id = %booking_id,
                equipment_id = %equipment_id,
                caller = %ctx.caller,
                status = %booking.status(),
                "review not permitted"
            );
            return Err(MarketError::Forbidden(format!(
                "{} may not review {equipment_id} for {booking_id}",
                ctx.caller
            )));
        }

        self.policy.check_rating(rating).map_err(|e| {
            tracing::debug!(booking_id = %booking_id, error = %e, "review rating rejected");
            MarketError::from(e)
        })?;

        let comments = comments.into();
        let one_per_booking = self.policy.one_per_booking;
        let id = self.records.with_write(|reviews| {
            if one_per_booking && reviews.values().any(|r| r.booking_id == booking_id) {
                return Err(MarketError::AlreadyReviewed(booking_id));
            }
            let id = ReviewId(self.ids.next_id());
            reviews.insert(
                id,
                Review {
                    id,
                    equipment_id,
                    booking_id,
                    reviewer: ctx.caller.clone(),
                    rating,
                    comments,
                    reviewed_at: ctx.now,
                },
            );
            Ok(id)
        });

        match &id {
            Ok(id) => tracing::info!(
                review_id = %id,
                booking_id = %booking_id,
                rating,
                "review submitted"
            ),
            Err(e) => tracing::debug!(booking_id = %booking_id, error = %e, "review rejected"),
        }
        id
    }

    /// Look up a review.
    pub fn get(&self, id: ReviewId) -> Option<Review> {
        self.records.get(&id)
    }

    /// The first review submitted for `booking_id`.
    pub fn for_booking(&self, booking_id: BookingId) -> Option<Review> {
        self.records
            .filter(|r| r.booking_id == booking_id)
            .into_iter()
            .next()
    }

    /// All reviews of `equipment_id`, in id order.
    pub fn list_for_equipment(&self, equipment_id: EquipmentId) -> Vec<Review> {
        self.records.filter(|r| r.equipment_id == equipment_id)
    }

    /// Mean rating of `equipment_id`, or `None` if it has no reviews.
    pub fn average_rating(&self, equipment_id: EquipmentId) -> Option<f64> {
        let reviews = self.list_for_equipment(equipment_id);
        if reviews.is_empty() {
            return None;
        }
        let total: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();
        Some(total as f64 / reviews.len() as f64)
    }

    /// Number of reviews.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no review exists.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
