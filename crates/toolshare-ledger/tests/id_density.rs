//! # Id Allocation Properties
//!
//! Failed operations must never consume an id: whatever mix of accepted and
//! rejected calls a host makes, the ids handed out are exactly 1..=n.

use proptest::prelude::*;

use toolshare_core::{BookingId, CallContext, EquipmentId, HourlyRate, ReviewId, Timestamp};
use toolshare_ledger::{Equipment, EquipmentListing, Marketplace, MarketplaceConfig};

/// One host call, possibly doomed to fail.
#[derive(Debug, Clone)]
enum Call {
    Register,
    Book { equipment: u64, start: u64, len: u64 },
    Complete { booking: u64 },
    Review { booking: u64, rating: u8 },
}

fn call_strategy() -> impl Strategy<Value = Call> {
    prop_oneof![
        Just(Call::Register),
        (0u64..6, 0u64..20_000, 0u64..10_000)
            .prop_map(|(equipment, start, len)| Call::Book { equipment, start, len }),
        (0u64..8).prop_map(|booking| Call::Complete { booking }),
        (0u64..8, 0u8..8).prop_map(|(booking, rating)| Call::Review { booking, rating }),
    ]
}

fn listing() -> EquipmentListing {
    EquipmentListing {
        name: "Drill Press".to_string(),
        equipment_type: "drill press".to_string(),
        description: "Benchtop, 12 speed".to_string(),
        location: "Maker Space".to_string(),
        hourly_rate: HourlyRate(250),
        availability: "Daily".to_string(),
        maintenance_status: "good".to_string(),
    }
}

proptest! {
    #[test]
    fn test_ids_stay_dense_under_failures(calls in prop::collection::vec(call_strategy(), 1..60)) {
        // Windows starting in an odd thousand are taken.
        let market = Marketplace::with_availability(
            MarketplaceConfig::default(),
            |_: &Equipment, start: Timestamp, _: Timestamp| (start.get() / 1000) % 2 == 0,
        )
        .unwrap();
        let owner = CallContext::new("owner", Timestamp::new(1));
        let renter = CallContext::new("renter", Timestamp::new(2));

        let mut equipment = Vec::new();
        let mut bookings = Vec::new();
        let mut reviews = Vec::new();

        for call in calls {
            match call {
                Call::Register => {
                    equipment.push(market.equipment().register(&owner, listing()));
                }
                Call::Book { equipment: e, start, len } => {
                    let result = market.bookings().create(
                        &renter,
                        EquipmentId(e),
                        Timestamp::new(start),
                        Timestamp::new(start + len),
                        "",
                    );
                    if let Ok(id) = result {
                        bookings.push(id);
                    }
                }
                Call::Complete { booking } => {
                    let _ = market.bookings().complete(&renter, BookingId(booking));
                }
                Call::Review { booking, rating } => {
                    let result = market.reviews().submit(
                        &renter,
                        EquipmentId(1),
                        BookingId(booking),
                        rating,
                        "",
                    );
                    if let Ok(id) = result {
                        reviews.push(id);
                    }
                }
            }
        }

        let expected: Vec<_> = (1..=equipment.len() as u64).map(EquipmentId).collect();
        prop_assert_eq!(equipment, expected);
        let expected: Vec<_> = (1..=bookings.len() as u64).map(BookingId).collect();
        prop_assert_eq!(&bookings, &expected);
        let expected: Vec<_> = (1..=reviews.len() as u64).map(ReviewId).collect();
        prop_assert_eq!(&reviews, &expected);

        prop_assert_eq!(market.bookings().len(), bookings.len());
        prop_assert_eq!(market.reviews().len(), reviews.len());
    }

    #[test]
    fn test_cost_matches_truncating_formula(
        rate in 0u64..1_000_000,
        start in 0u64..1_000_000,
        len in 1u64..1_000_000,
    ) {
        let market = Marketplace::default();
        let owner = CallContext::new("owner", Timestamp::new(0));
        let id = market.equipment().register(&owner, EquipmentListing {
            hourly_rate: HourlyRate(rate),
            ..listing()
        });
        let booking = market
            .bookings()
            .create(&owner, id, Timestamp::new(start), Timestamp::new(start + len), "")
            .unwrap();
        prop_assert_eq!(market.bookings().get(booking).unwrap().total_cost, rate * len / 3600);
    }
}
