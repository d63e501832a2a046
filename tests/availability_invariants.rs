//! Property tests: random create/cancel sequences keep rooms and bookings
//! consistent and never reuse a booking id.

#![allow(clippy::panic)]

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use roomify::domain::{BookingId, NewBooking, RoomId, RoomStatus};
use roomify::service::HotelRepository;
use roomify::store::{MemoryBackend, Store};

#[derive(Debug, Clone)]
enum Op {
    Book { room: u32, nights: i64 },
    Cancel { pick: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u32..=8, 1i64..=14).prop_map(|(room, nights)| Op::Book { room, nights }),
        (0usize..32).prop_map(|pick| Op::Cancel { pick }),
    ]
}

fn repo() -> HotelRepository<MemoryBackend> {
    let mut repo = HotelRepository::new(Store::new(MemoryBackend::new(), "prop"));
    let Ok(_) = repo.initialize() else {
        panic!("initialize failed");
    };
    repo
}

fn check_in() -> NaiveDate {
    let Some(d) = NaiveDate::from_ymd_opt(2024, 3, 1) else {
        panic!("valid date");
    };
    d
}

/// Every room is `booked` exactly when a confirmed booking references it.
fn assert_consistent(repo: &HotelRepository<MemoryBackend>) {
    let Ok(rooms) = repo.list_rooms() else {
        panic!("list rooms failed");
    };
    let Ok(bookings) = repo.list_bookings() else {
        panic!("list bookings failed");
    };
    for room in &rooms {
        let held = bookings
            .iter()
            .any(|b| b.room_id == room.id && b.is_active());
        assert_eq!(
            room.status == RoomStatus::Booked,
            held,
            "room {} status {} vs held {held}",
            room.id,
            room.status
        );
    }
}

proptest! {
    #[test]
    fn availability_matches_confirmed_bookings(ops in prop::collection::vec(op(), 1..40)) {
        let mut repo = repo();
        let mut issued: Vec<BookingId> = Vec::new();

        for op in ops {
            match op {
                Op::Book { room, nights } => {
                    let input = NewBooking {
                        room_id: RoomId::new(room),
                        guest_name: "Guest".to_string(),
                        guest_email: "guest@example.com".to_string(),
                        guest_phone: None,
                        check_in: check_in(),
                        check_out: check_in() + Duration::days(nights),
                    };
                    if let Ok(outcome) = repo.create_booking(input) {
                        prop_assert!(outcome.room_update_succeeded());
                        prop_assert_eq!(i64::from(outcome.booking.nights), nights);
                        issued.push(outcome.booking.id);
                    }
                }
                Op::Cancel { pick } => {
                    if let Some(id) = issued.get(pick % issued.len().max(1)) {
                        prop_assert!(matches!(repo.cancel_booking(*id), Ok(true)));
                    }
                }
            }
            assert_consistent(&repo);
        }

        let unique: HashSet<_> = issued.iter().collect();
        prop_assert_eq!(unique.len(), issued.len());
        prop_assert!(issued.windows(2).all(|w| matches!(w, [a, b] if a < b)));
    }

    #[test]
    fn live_total_is_price_times_nights_plus_tax(room in 1u32..=7, nights in 1i64..=30) {
        let mut repo = repo();
        let input = NewBooking {
            room_id: RoomId::new(room),
            guest_name: "Guest".to_string(),
            guest_email: "guest@example.com".to_string(),
            guest_phone: None,
            check_in: check_in(),
            check_out: check_in() + Duration::days(nights),
        };
        let Ok(outcome) = repo.create_booking(input) else {
            panic!("create failed");
        };
        let Ok(totals) = repo.compute_total(&outcome.booking) else {
            panic!("totals failed");
        };
        prop_assert_eq!(totals.subtotal, outcome.booking.total_price);
        prop_assert!((totals.total - totals.subtotal * 1.12).abs() < 0.01);
        prop_assert_eq!(repo.compute_total(&outcome.booking).ok(), Some(totals));
    }
}
