//! Booking records and their lifecycle status.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, RoomId};

/// Lifecycle status of a booking.
///
/// Bookings are created `Confirmed` and move to `Cancelled` through the
/// repository. `Completed` is a valid stored state that nothing in this
/// crate transitions into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Active booking holding its room.
    Confirmed,
    /// Cancelled by the guest or staff.
    Cancelled,
    /// Stay finished.
    Completed,
}

impl BookingStatus {
    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored booking.
///
/// `room_number`, `room_type` and `price_per_night` are snapshots taken at
/// creation; later room edits do not touch them. Only `status` and
/// `cancelled_at` change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Repository-assigned identifier.
    pub id: BookingId,
    /// Room this booking holds.
    pub room_id: RoomId,
    /// Room number at booking time.
    pub room_number: String,
    /// Room type at booking time.
    pub room_type: String,
    /// Nightly rate at booking time.
    pub price_per_night: f64,
    /// Guest full name.
    pub guest_name: String,
    /// Guest contact email.
    pub guest_email: String,
    /// Guest phone number, if given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    /// First night of the stay.
    pub check_in: NaiveDate,
    /// Departure day (exclusive).
    pub check_out: NaiveDate,
    /// Number of nights, at least 1.
    pub nights: u32,
    /// `price_per_night * nights`, fixed at creation.
    pub total_price: f64,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Cancellation instant, set only when cancelled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Returns `true` if the booking currently holds its room.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// Returns `true` if `query` (already lowercased) appears in the guest
    /// name, guest email, or room number.
    fn matches_query(&self, query: &str) -> bool {
        self.guest_name.to_lowercase().contains(query)
            || self.guest_email.to_lowercase().contains(query)
            || self.room_number.to_lowercase().contains(query)
    }
}

/// Caller input for creating a booking.
///
/// Id, nights, price and timestamps are derived by the repository and
/// cannot be supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    /// Room to book.
    pub room_id: RoomId,
    /// Guest full name.
    pub guest_name: String,
    /// Guest contact email.
    pub guest_email: String,
    /// Optional phone number; blank strings are stored as `None`.
    #[serde(default)]
    pub guest_phone: Option<String>,
    /// First night.
    pub check_in: NaiveDate,
    /// Departure day.
    pub check_out: NaiveDate,
}

/// Booking list filter: optional status plus free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    /// Keep only bookings in this status.
    pub status: Option<BookingStatus>,
    /// Case-insensitive search over guest name, email, and room number.
    pub query: Option<String>,
}

impl BookingFilter {
    /// Filter that keeps only the given status.
    #[must_use]
    pub fn status(status: BookingStatus) -> Self {
        Self {
            status: Some(status),
            query: None,
        }
    }

    /// Filter that only applies a search query.
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            status: None,
            query: Some(query.into()),
        }
    }

    /// Returns `true` if `booking` passes the filter.
    ///
    /// A blank query matches everything.
    #[must_use]
    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(status) = self.status
            && booking.status != status
        {
            return false;
        }
        match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => booking.matches_query(&q.to_lowercase()),
            _ => true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_booking(id: u64, status: BookingStatus) -> Booking {
        let Some(check_in) = NaiveDate::from_ymd_opt(2024, 1, 10) else {
            panic!("valid date");
        };
        let Some(check_out) = NaiveDate::from_ymd_opt(2024, 1, 12) else {
            panic!("valid date");
        };
        Booking {
            id: BookingId::new(id),
            room_id: RoomId::new(1),
            room_number: "101".to_string(),
            room_type: "Standard".to_string(),
            price_per_night: 120.0,
            guest_name: "Alice Martin".to_string(),
            guest_email: "alice@example.com".to_string(),
            guest_phone: None,
            check_in,
            check_out,
            nights: 2,
            total_price: 240.0,
            status,
            created_at: Utc::now(),
            cancelled_at: None,
        }
    }

    #[test]
    fn serializes_camel_case_and_omits_unset_optionals() {
        let booking = sample_booking(1, BookingStatus::Confirmed);
        let Ok(value) = serde_json::to_value(&booking) else {
            panic!("serialization failed");
        };
        assert_eq!(value.get("roomId").and_then(serde_json::Value::as_u64), Some(1));
        assert_eq!(value.get("checkIn").and_then(|v| v.as_str()), Some("2024-01-10"));
        assert_eq!(value.get("status").and_then(|v| v.as_str()), Some("confirmed"));
        assert!(value.get("cancelledAt").is_none());
        assert!(value.get("guestPhone").is_none());
    }

    #[test]
    fn filter_by_status() {
        let confirmed = sample_booking(1, BookingStatus::Confirmed);
        let cancelled = sample_booking(2, BookingStatus::Cancelled);
        let filter = BookingFilter::status(BookingStatus::Cancelled);
        assert!(!filter.matches(&confirmed));
        assert!(filter.matches(&cancelled));
    }

    #[test]
    fn search_covers_name_email_and_room_number() {
        let booking = sample_booking(1, BookingStatus::Confirmed);
        assert!(BookingFilter::search("ALICE").matches(&booking));
        assert!(BookingFilter::search("example.com").matches(&booking));
        assert!(BookingFilter::search("101").matches(&booking));
        assert!(!BookingFilter::search("bob").matches(&booking));
        assert!(BookingFilter::search("   ").matches(&booking));
    }
}
