//! Room records, availability status, and partial updates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::RoomId;
use crate::error::{Result, RoomifyError};

/// Availability of a room.
///
/// A room is `Booked` exactly when a confirmed booking references it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// Free to book.
    Available,
    /// Held by a confirmed booking.
    Booked,
    /// Taken out of service by staff.
    Maintenance,
}

impl RoomStatus {
    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Booked => "booked",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Stable identifier.
    pub id: RoomId,
    /// Display number, e.g. `"101"`.
    pub number: String,
    /// Category label, e.g. `"Deluxe"`.
    #[serde(rename = "type")]
    pub room_type: String,
    /// Maximum number of guests (at least 1).
    pub capacity: u32,
    /// Nightly rate in currency units (positive).
    pub price: f64,
    /// Amenities in display order.
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Current availability.
    pub status: RoomStatus,
    /// Opaque image reference for the presentation layer.
    #[serde(default)]
    pub image: String,
}

impl Room {
    /// Returns `true` if the room can take a new booking.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == RoomStatus::Available
    }

    /// Checks the numeric field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`RoomifyError::InvalidRequest`] if `capacity` is zero or
    /// `price` is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(RoomifyError::InvalidRequest(format!(
                "room {}: capacity must be at least 1",
                self.id
            )));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(RoomifyError::InvalidRequest(format!(
                "room {}: price must be positive",
                self.id
            )));
        }
        Ok(())
    }
}

/// Partial room update keyed by `id`.
///
/// `None` fields are left untouched when the patch is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPatch {
    /// Room to update.
    pub id: RoomId,
    /// New display number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// New category label.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    /// New capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// New nightly rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Replacement amenity list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
    /// New image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl RoomPatch {
    /// Creates an empty patch for the given room.
    #[must_use]
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            number: None,
            room_type: None,
            capacity: None,
            price: None,
            amenities: None,
            status: None,
            image: None,
        }
    }

    /// Creates a patch that only changes the status.
    #[must_use]
    pub fn status(id: RoomId, status: RoomStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::new(id)
        }
    }

    /// Returns a copy of `room` with every supplied field merged in.
    #[must_use]
    pub fn merged_into(&self, room: &Room) -> Room {
        let mut merged = room.clone();
        if let Some(number) = &self.number {
            merged.number.clone_from(number);
        }
        if let Some(room_type) = &self.room_type {
            merged.room_type.clone_from(room_type);
        }
        if let Some(capacity) = self.capacity {
            merged.capacity = capacity;
        }
        if let Some(price) = self.price {
            merged.price = price;
        }
        if let Some(amenities) = &self.amenities {
            merged.amenities.clone_from(amenities);
        }
        if let Some(status) = self.status {
            merged.status = status;
        }
        if let Some(image) = &self.image {
            merged.image.clone_from(image);
        }
        merged
    }
}

/// Room list filter used by the inventory view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoomFilter {
    /// Every room.
    #[default]
    All,
    /// Only rooms with status `available`.
    Available,
    /// Rooms whose type matches, ignoring case.
    Type(String),
}

impl RoomFilter {
    /// Returns `true` if `room` passes the filter.
    #[must_use]
    pub fn matches(&self, room: &Room) -> bool {
        match self {
            Self::All => true,
            Self::Available => room.is_available(),
            Self::Type(wanted) => room.room_type.eq_ignore_ascii_case(wanted),
        }
    }
}
