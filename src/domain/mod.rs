//! Domain layer: hotel configuration, rooms, bookings, and stay arithmetic.
//!
//! These are plain data types with serde derives matching the persisted
//! JSON layout. The invariants that span collections live in
//! [`crate::service::HotelRepository`].

pub mod booking;
pub mod hotel;
pub mod ids;
pub mod room;
pub mod seed;
pub mod stay;

pub use booking::{Booking, BookingFilter, BookingStatus, NewBooking};
pub use hotel::HotelConfig;
pub use ids::{BookingId, RoomId};
pub use room::{Room, RoomFilter, RoomPatch, RoomStatus};
