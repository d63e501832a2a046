//! # roomify
//!
//! Booking and room inventory core for a small hotel-operations app.
//!
//! All state lives in a synchronous key-value store private to the
//! application. The [`service::HotelRepository`] is the only writer and
//! keeps three collections consistent: the hotel configuration, the room
//! inventory, and the booking log. A room is `booked` exactly when a
//! confirmed booking references it.
//!
//! ## Architecture
//!
//! ```text
//! Presentation layer (external)
//!     │
//!     ├── HotelRepository (service/)
//!     ├── Pricing, Dashboard (service/)
//!     │
//!     ├── Rooms, Bookings, HotelConfig (domain/)
//!     │
//!     └── Store<B: KeyValueBackend> (store/)
//!             ├── MemoryBackend
//!             └── FileBackend
//! ```
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use roomify::domain::{NewBooking, RoomId};
//! use roomify::service::HotelRepository;
//! use roomify::store::{MemoryBackend, Store};
//!
//! # fn main() -> roomify::error::Result<()> {
//! let mut repo = HotelRepository::new(Store::new(MemoryBackend::new(), "demo"));
//! repo.initialize()?;
//!
//! let dates = NaiveDate::from_ymd_opt(2024, 1, 10).zip(NaiveDate::from_ymd_opt(2024, 1, 12));
//! # let Some((check_in, check_out)) = dates else { return Ok(()) };
//! let outcome = repo.create_booking(NewBooking {
//!     room_id: RoomId::new(1),
//!     guest_name: "Alice".to_string(),
//!     guest_email: "a@x.com".to_string(),
//!     guest_phone: None,
//!     check_in,
//!     check_out,
//! })?;
//! assert_eq!(outcome.booking.nights, 2);
//! assert!(outcome.room_update_succeeded());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod store;
