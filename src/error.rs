//! Crate error type with stable numeric codes.
//!
//! [`RoomifyError`] is the central error type. Each variant carries a
//! numeric code and an [`ErrorCategory`] so a presentation layer can turn a
//! failure into a user-facing message without matching on every variant.
//!
//! "Not found" on `update_room` / `cancel_booking` is deliberately *not* an
//! error: those operations report it as `Ok(false)`.

use crate::domain::{BookingId, BookingStatus, RoomId, RoomStatus};

/// Coarse grouping of [`RoomifyError`] variants.
///
/// # Error Code Ranges
///
/// | Range     | Category   |
/// |-----------|------------|
/// | 1000–1999 | Validation |
/// | 2000–2099 | Not Found  |
/// | 2100–2999 | Conflict   |
/// | 3000–3999 | Storage    |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller supplied invalid input.
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// The operation conflicts with current entity state.
    Conflict,
    /// The persistence medium rejected a read or write.
    Storage,
}

/// Error enum for every fallible operation in the crate.
#[derive(Debug, thiserror::Error)]
pub enum RoomifyError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Room with the given ID was not found.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// Booking with the given ID was not found.
    #[error("booking not found: {0}")]
    BookingNotFound(BookingId),

    /// The room cannot take a new booking in its current status.
    #[error("room {room_id} is not available (status: {status})")]
    RoomUnavailable {
        /// Room that was requested.
        room_id: RoomId,
        /// Its status at the time of the request.
        status: RoomStatus,
    },

    /// The booking cannot move to the requested status.
    #[error("booking {booking_id} cannot be cancelled from status {from}")]
    InvalidStatusTransition {
        /// Booking that was targeted.
        booking_id: BookingId,
        /// Its status at the time of the request.
        from: BookingStatus,
    },

    /// The backend refused a write because it would exceed its capacity.
    #[error("storage quota exceeded writing {key}: {required} bytes needed, limit {limit}")]
    StorageQuotaExceeded {
        /// Fully-qualified key that was being written.
        key: String,
        /// Total bytes the namespace would hold after the write.
        required: usize,
        /// Configured byte limit.
        limit: usize,
    },

    /// Generic storage backend failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem failure in a file-backed store.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RoomifyError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::RoomNotFound(_) => 2001,
            Self::BookingNotFound(_) => 2002,
            Self::RoomUnavailable { .. } => 2101,
            Self::InvalidStatusTransition { .. } => 2102,
            Self::StorageQuotaExceeded { .. } => 3001,
            Self::Storage(_) => 3002,
            Self::Serialization(_) => 3003,
            Self::Io(_) => 3004,
        }
    }

    /// Returns the category this variant belongs to.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRequest(_) => ErrorCategory::Validation,
            Self::RoomNotFound(_) | Self::BookingNotFound(_) => ErrorCategory::NotFound,
            Self::RoomUnavailable { .. } | Self::InvalidStatusTransition { .. } => {
                ErrorCategory::Conflict
            }
            Self::StorageQuotaExceeded { .. }
            | Self::Storage(_)
            | Self::Serialization(_)
            | Self::Io(_) => ErrorCategory::Storage,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RoomifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_fall_in_category_ranges() {
        let cases = [
            RoomifyError::InvalidRequest("x".to_string()),
            RoomifyError::RoomNotFound(RoomId::new(9)),
            RoomifyError::BookingNotFound(BookingId::new(9)),
            RoomifyError::RoomUnavailable {
                room_id: RoomId::new(1),
                status: RoomStatus::Booked,
            },
            RoomifyError::Storage("disk".to_string()),
        ];
        for err in &cases {
            let code = err.error_code();
            let expected = match code {
                1000..=1999 => ErrorCategory::Validation,
                2000..=2099 => ErrorCategory::NotFound,
                2100..=2999 => ErrorCategory::Conflict,
                _ => ErrorCategory::Storage,
            };
            assert_eq!(err.category(), expected, "code {code}");
        }
    }

    #[test]
    fn quota_error_is_a_storage_error() {
        let err = RoomifyError::StorageQuotaExceeded {
            key: "roomify/roomify-bookings".to_string(),
            required: 10,
            limit: 5,
        };
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(err.to_string().contains("roomify-bookings"));
    }

    #[test]
    fn unavailable_message_names_status() {
        let err = RoomifyError::RoomUnavailable {
            room_id: RoomId::new(3),
            status: RoomStatus::Maintenance,
        };
        assert_eq!(
            err.to_string(),
            "room 3 is not available (status: maintenance)"
        );
    }
}
