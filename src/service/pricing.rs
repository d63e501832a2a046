//! Receipt totals computed from live room and tax data.
//!
//! These totals use the room's *current* price and the *current* tax rate.
//! They are what a receipt shows and can differ from
//! [`Booking::total_price`], which is fixed when the booking is made.

use chrono::NaiveDate;
use serde::Serialize;

use super::HotelRepository;
use crate::domain::Booking;
use crate::domain::stay::nights_between;
use crate::error::Result;
use crate::store::KeyValueBackend;

/// Subtotal, tax and total for one stay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BookingTotals {
    /// `price * nights`.
    pub subtotal: f64,
    /// `subtotal * tax_rate`.
    pub tax: f64,
    /// `subtotal + tax`.
    pub total: f64,
    /// Nights charged.
    pub nights: u32,
}

impl BookingTotals {
    /// All-zero totals, returned when the booked room no longer exists.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            subtotal: 0.0,
            tax: 0.0,
            total: 0.0,
            nights: 0,
        }
    }

    /// Computes totals for a stay at `price` per night.
    ///
    /// Nights are clamped to at least 1. Money values are rounded to cents.
    #[must_use]
    pub fn compute(price: f64, tax_rate: f64, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        let nights = nights_between(check_in, check_out);
        let subtotal = round_cents(price * f64::from(nights));
        let tax = round_cents(subtotal * tax_rate);
        Self {
            subtotal,
            tax,
            total: round_cents(subtotal + tax),
            nights,
        }
    }
}

/// Rounds a currency amount to two decimal places.
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Computes the live totals for `booking`.
///
/// Looks up the booking's room and the hotel tax rate through `repo`. If
/// the room is gone the result is [`BookingTotals::zero`], so a receipt for
/// a deleted room shows zeros.
///
/// # Errors
///
/// Returns an error if rooms or config cannot be read from the store.
pub fn compute_total<B: KeyValueBackend>(
    repo: &HotelRepository<B>,
    booking: &Booking,
) -> Result<BookingTotals> {
    let Some(room) = repo.get_room(booking.room_id)? else {
        tracing::debug!(booking_id = %booking.id, room_id = %booking.room_id, "room missing; zero totals");
        return Ok(BookingTotals::zero());
    };
    let tax_rate = repo.hotel_config()?.tax_rate;
    Ok(BookingTotals::compute(
        room.price,
        tax_rate,
        booking.check_in,
        booking.check_out,
    ))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::booking::tests::sample_booking;
    use crate::domain::{BookingStatus, RoomId, RoomPatch};
    use crate::store::{MemoryBackend, Store, keys};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(y, m, d) else {
            panic!("invalid date");
        };
        date
    }

    fn repo() -> HotelRepository<MemoryBackend> {
        let mut repo = HotelRepository::new(Store::new(MemoryBackend::new(), "test"));
        let Ok(_) = repo.initialize() else {
            panic!("initialize failed");
        };
        repo
    }

    #[test]
    fn two_nights_at_120_with_twelve_percent_tax() {
        let totals = BookingTotals::compute(120.0, 0.12, date(2024, 1, 10), date(2024, 1, 12));
        assert_eq!(totals.nights, 2);
        assert_eq!(totals.subtotal, 240.0);
        assert_eq!(totals.tax, 28.8);
        assert_eq!(totals.total, 268.8);
    }

    #[test]
    fn same_day_prices_as_one_night() {
        let totals = BookingTotals::compute(250.0, 0.0, date(2024, 1, 10), date(2024, 1, 10));
        assert_eq!(totals.nights, 1);
        assert_eq!(totals.total, 250.0);
    }

    #[test]
    fn round_cents_fixes_float_noise() {
        assert_eq!(round_cents(240.0 * 0.12), 28.8);
        assert_eq!(round_cents(0.1 + 0.2), 0.3);
    }

    #[test]
    fn compute_total_uses_live_room_price() {
        let mut repo = repo();
        let booking = sample_booking(1, BookingStatus::Confirmed);

        let Ok(before) = repo.compute_total(&booking) else {
            panic!("compute failed");
        };
        assert_eq!(before.total, 268.8);

        let patch = RoomPatch {
            price: Some(100.0),
            ..RoomPatch::new(RoomId::new(1))
        };
        assert!(matches!(repo.update_room(patch), Ok(true)));

        let Ok(after) = repo.compute_total(&booking) else {
            panic!("compute failed");
        };
        assert_eq!(after.subtotal, 200.0);
        assert_eq!(booking.total_price, 240.0);
    }

    #[test]
    fn compute_total_is_deterministic() {
        let repo = repo();
        let booking = sample_booking(1, BookingStatus::Confirmed);
        let first = repo.compute_total(&booking).ok();
        let second = repo.compute_total(&booking).ok();
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn missing_room_yields_zero_totals() {
        let mut repo = repo();
        assert!(repo.store_mut().write_records::<crate::domain::Room>(keys::ROOMS, &[]).is_ok());
        let booking = sample_booking(1, BookingStatus::Confirmed);
        assert!(matches!(repo.compute_total(&booking), Ok(t) if t == BookingTotals::zero()));
    }

    #[test]
    fn uninitialized_config_means_no_tax() {
        let mut repo = repo();
        assert!(repo.store_mut().remove(keys::HOTEL_INFO).is_ok());
        let booking = sample_booking(1, BookingStatus::Confirmed);
        let Ok(totals) = repo.compute_total(&booking) else {
            panic!("compute failed");
        };
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, totals.subtotal);
    }
}
