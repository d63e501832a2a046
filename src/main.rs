//! roomify bootstrap entry point.
//!
//! Opens the configured file store, seeds any missing collections, and logs
//! a dashboard summary.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use roomify::config::AppConfig;
use roomify::service::{DEFAULT_RECENT_LIMIT, HotelRepository};
use roomify::store::{FileBackend, Store};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let store_dir = config.store_dir();
    tracing::info!(dir = %store_dir.display(), namespace = %config.namespace, "starting roomify");

    let backend = FileBackend::open(&store_dir, config.store_quota())
        .with_context(|| format!("opening store at {}", store_dir.display()))?;
    let mut repo = HotelRepository::new(Store::new(backend, config.namespace.clone()));
    let report = repo
        .initialize()
        .inspect_err(|err| {
            tracing::error!(
                code = err.error_code(),
                category = ?err.category(),
                error = %err,
                "store initialization failed"
            );
        })
        .context("seeding store")?;
    tracing::info!(?report, "store ready");

    let hotel = repo.hotel_config().context("reading hotel config")?;
    let stats = repo.dashboard().context("computing dashboard")?;
    tracing::info!(
        hotel = %hotel.name,
        total_rooms = stats.total_rooms,
        available_rooms = stats.available_rooms,
        active_bookings = stats.active_bookings,
        total_bookings = stats.total_bookings,
        revenue = stats.revenue,
        occupancy_rate = stats.occupancy_rate,
        "dashboard"
    );

    for booking in repo
        .recent_bookings(DEFAULT_RECENT_LIMIT)
        .context("listing recent bookings")?
    {
        let receipt = repo.receipt(booking.id).context("computing receipt")?;
        tracing::info!(
            booking_id = %receipt.booking.id,
            guest = %receipt.booking.guest_name,
            room = %receipt.booking.room_number,
            status = %receipt.booking.status,
            total = receipt.totals.total,
            "recent booking"
        );
    }

    Ok(())
}
