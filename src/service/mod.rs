//! Service layer: the hotel repository and the calculations built on it.

pub mod dashboard;
pub mod pricing;
pub mod repository;

pub use dashboard::{DEFAULT_RECENT_LIMIT, DashboardStats};
pub use pricing::{BookingTotals, compute_total};
pub use repository::{
    BookingOutcome, CancelOutcome, HotelRepository, InitReport, Receipt, RoomSync,
};
