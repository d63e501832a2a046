//! First-run seed data.

use super::{HotelConfig, Room, RoomId, RoomStatus};

const STANDARD_IMAGE: &str = "https://images.unsplash.com/photo-1631049307264-da0ec9d70304?q=80&w=2070";
const DELUXE_IMAGE: &str = "https://images.unsplash.com/photo-1618773928121-c32242e63f39?q=80&w=2070";
const SUITE_IMAGE: &str = "https://images.unsplash.com/photo-1591088398332-8a7791972843?q=80&w=2067";
const PRESIDENTIAL_IMAGE: &str =
    "https://images.unsplash.com/photo-1582719478250-c89cae4dc85b?q=80&w=2070";

const STANDARD_AMENITIES: &[&str] = &["WiFi", "TV", "Air Conditioning"];
const DELUXE_AMENITIES: &[&str] = &["WiFi", "TV", "Air Conditioning", "Mini Bar", "Balcony"];
const SUITE_AMENITIES: &[&str] = &[
    "WiFi",
    "TV",
    "Air Conditioning",
    "Mini Bar",
    "Balcony",
    "Jacuzzi",
];
const PRESIDENTIAL_AMENITIES: &[&str] = &[
    "WiFi",
    "TV",
    "Air Conditioning",
    "Mini Bar",
    "Balcony",
    "Jacuzzi",
    "Kitchen",
    "Private Pool",
];

/// Returns the default hotel configuration.
#[must_use]
pub fn default_hotel_config() -> HotelConfig {
    HotelConfig {
        name: "Roomify Suites".to_string(),
        address: "123 Luxury Lane, Cityville".to_string(),
        phone: "+1 (555) 123-4567".to_string(),
        email: "info@roomifysuites.com".to_string(),
        tax_rate: 0.12,
    }
}

/// Returns the default room inventory: seven rooms, ids 1 to 7, all
/// available.
#[must_use]
pub fn default_rooms() -> Vec<Room> {
    [
        (1, "101", "Standard", 2, 120.0, STANDARD_AMENITIES, STANDARD_IMAGE),
        (2, "102", "Standard", 2, 120.0, STANDARD_AMENITIES, STANDARD_IMAGE),
        (3, "201", "Deluxe", 3, 180.0, DELUXE_AMENITIES, DELUXE_IMAGE),
        (4, "202", "Deluxe", 3, 180.0, DELUXE_AMENITIES, DELUXE_IMAGE),
        (5, "301", "Suite", 4, 250.0, SUITE_AMENITIES, SUITE_IMAGE),
        (6, "302", "Suite", 4, 250.0, SUITE_AMENITIES, SUITE_IMAGE),
        (
            7,
            "401",
            "Presidential Suite",
            6,
            500.0,
            PRESIDENTIAL_AMENITIES,
            PRESIDENTIAL_IMAGE,
        ),
    ]
    .into_iter()
    .map(|(id, number, room_type, capacity, price, amenities, image)| Room {
        id: RoomId::new(id),
        number: number.to_string(),
        room_type: room_type.to_string(),
        capacity,
        price,
        amenities: amenities.iter().map(|a| (*a).to_string()).collect(),
        status: RoomStatus::Available,
        image: image.to_string(),
    })
    .collect()
}
