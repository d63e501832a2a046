//! Read-only projections for the dashboard and receipt list.

use serde::Serialize;

use super::pricing::round_cents;
use crate::domain::{Booking, BookingFilter, BookingStatus, Room, RoomStatus};

/// Number of bookings shown in the dashboard's recent list.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Headline figures for the operations dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Rooms in inventory.
    pub total_rooms: usize,
    /// Rooms with status `available`.
    pub available_rooms: usize,
    /// Rooms not available (booked or under maintenance).
    pub occupied_rooms: usize,
    /// Bookings ever made, cancelled ones included.
    pub total_bookings: usize,
    /// Confirmed bookings.
    pub active_bookings: usize,
    /// Sum of booked totals, excluding cancelled bookings.
    pub revenue: f64,
    /// `occupied / total` as a whole percentage, rounded half up.
    pub occupancy_rate: u32,
}

impl DashboardStats {
    /// Computes the figures from the current collections.
    #[must_use]
    pub fn collect(rooms: &[Room], bookings: &[Booking]) -> Self {
        let total_rooms = rooms.len();
        let available_rooms = rooms
            .iter()
            .filter(|room| room.status == RoomStatus::Available)
            .count();
        let occupied_rooms = total_rooms.saturating_sub(available_rooms);
        let revenue: f64 = bookings
            .iter()
            .filter(|booking| booking.status != BookingStatus::Cancelled)
            .map(|booking| booking.total_price)
            .sum();

        Self {
            total_rooms,
            available_rooms,
            occupied_rooms,
            total_bookings: bookings.len(),
            active_bookings: bookings.iter().filter(|b| b.is_active()).count(),
            revenue: round_cents(revenue),
            occupancy_rate: percent(occupied_rooms, total_rooms),
        }
    }
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let rounded = (part.saturating_mul(100).saturating_add(whole / 2)) / whole;
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Returns up to `limit` bookings ordered newest first.
#[must_use]
pub fn recent_bookings(mut bookings: Vec<Booking>, limit: usize) -> Vec<Booking> {
    bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    bookings.truncate(limit);
    bookings
}

/// Returns bookings that have a receipt (confirmed or cancelled), narrowed
/// by an optional search query.
#[must_use]
pub fn receipts(mut bookings: Vec<Booking>, query: Option<&str>) -> Vec<Booking> {
    let filter = BookingFilter {
        status: None,
        query: query.map(str::to_string),
    };
    bookings.retain(|booking| {
        matches!(
            booking.status,
            BookingStatus::Confirmed | BookingStatus::Cancelled
        ) && filter.matches(booking)
    });
    bookings
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::booking::tests::sample_booking;
    use crate::domain::seed::default_rooms;

    #[test]
    fn empty_inventory_has_zero_occupancy() {
        let stats = DashboardStats::collect(&[], &[]);
        assert_eq!(stats.occupancy_rate, 0);
        assert_eq!(stats.revenue, 0.0);
    }

    #[test]
    fn revenue_excludes_cancelled_bookings() {
        let mut rooms = default_rooms();
        if let Some(room) = rooms.first_mut() {
            room.status = RoomStatus::Booked;
        }
        let bookings = vec![
            sample_booking(1, BookingStatus::Confirmed),
            sample_booking(2, BookingStatus::Cancelled),
            sample_booking(3, BookingStatus::Completed),
        ];

        let stats = DashboardStats::collect(&rooms, &bookings);
        assert_eq!(stats.total_rooms, 7);
        assert_eq!(stats.available_rooms, 6);
        assert_eq!(stats.occupied_rooms, 1);
        assert_eq!(stats.total_bookings, 3);
        assert_eq!(stats.active_bookings, 1);
        assert_eq!(stats.revenue, 480.0);
        // 1 of 7 is 14.28%
        assert_eq!(stats.occupancy_rate, 14);
    }

    #[test]
    fn occupancy_rounds_half_up() {
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(1, 2), 50);
        assert_eq!(percent(7, 7), 100);
    }

    #[test]
    fn recent_is_newest_first_and_limited() {
        let mut bookings: Vec<Booking> = (1..=7)
            .map(|id| sample_booking(id, BookingStatus::Confirmed))
            .collect();
        for (offset, booking) in bookings.iter_mut().enumerate() {
            booking.created_at += Duration::minutes(i64::try_from(offset).unwrap_or(0));
        }

        let recent = recent_bookings(bookings, DEFAULT_RECENT_LIMIT);
        let ids: Vec<u64> = recent.iter().map(|b| b.id.get()).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn receipts_skip_completed_and_apply_query() {
        let mut bob = sample_booking(3, BookingStatus::Cancelled);
        bob.guest_name = "Bob Stone".to_string();
        bob.guest_email = "bob@example.org".to_string();
        let bookings = vec![
            sample_booking(1, BookingStatus::Confirmed),
            sample_booking(2, BookingStatus::Completed),
            bob,
        ];

        assert_eq!(receipts(bookings.clone(), None).len(), 2);
        let found = receipts(bookings, Some("stone"));
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|b| b.id.get()), Some(3));
    }
}
