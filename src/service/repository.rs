//! Hotel repository: the only writer of rooms, bookings, and config.
//!
//! Every operation reads the current collection from the [`Store`],
//! modifies a local copy, and writes it back. A rejected write therefore
//! leaves the stored collection exactly as it was.
//!
//! Cross-collection updates (booking write, then room status write) are not
//! atomic. The second step is best-effort and its result is reported to
//! the caller instead of failing the primary operation.

use chrono::Utc;
use serde::Serialize;

use super::dashboard::{self, DashboardStats};
use super::pricing::{self, BookingTotals};
use crate::domain::seed::{default_hotel_config, default_rooms};
use crate::domain::stay::{nights_between, validate_stay};
use crate::domain::{
    Booking, BookingFilter, BookingId, BookingStatus, HotelConfig, NewBooking, Room, RoomFilter,
    RoomId, RoomPatch, RoomStatus,
};
use crate::error::{Result, RoomifyError};
use crate::store::{KeyValueBackend, Store, keys};

/// Which keys `initialize` had to seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Hotel configuration was absent and has been written.
    pub seeded_config: bool,
    /// Room inventory was absent and has been written.
    pub seeded_rooms: bool,
    /// Booking log was absent and has been written.
    pub seeded_bookings: bool,
}

impl InitReport {
    /// Returns `true` if any key was seeded.
    #[must_use]
    pub const fn seeded_any(&self) -> bool {
        self.seeded_config || self.seeded_rooms || self.seeded_bookings
    }
}

/// Result of the best-effort room status update that follows a booking
/// change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomSync {
    /// The room status was written.
    Updated,
    /// The room no longer exists; nothing was written.
    RoomMissing,
    /// The room exists but the write was rejected.
    WriteFailed(String),
}

impl RoomSync {
    /// Returns `true` if the room now carries the intended status.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self, Self::Updated)
    }
}

/// Outcome of [`HotelRepository::create_booking`].
///
/// The booking has been persisted. `room_sync` says whether the room was
/// also marked `booked`.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingOutcome {
    /// The stored booking.
    pub booking: Booking,
    /// Result of marking the room as booked.
    pub room_sync: RoomSync,
}

impl BookingOutcome {
    /// Returns `true` if the room status update went through.
    #[must_use]
    pub const fn room_update_succeeded(&self) -> bool {
        self.room_sync.succeeded()
    }
}

/// Outcome of [`HotelRepository::cancel_booking_detailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOutcome {
    /// `false` if no booking had the requested id.
    pub cancelled: bool,
    /// Result of resetting the room to `available`.
    ///
    /// `None` when no reset was attempted: the booking was absent or
    /// already cancelled, or another confirmed booking still holds the room.
    pub room_sync: Option<RoomSync>,
}

/// A booking together with its live totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    /// The stored booking.
    pub booking: Booking,
    /// Totals at the room's current price and tax rate.
    pub totals: BookingTotals,
}

/// Authoritative access to the hotel's rooms, bookings, and configuration.
///
/// Holds an explicit [`Store`] handle; call [`Self::initialize`] once before
/// use. Mutations take `&mut self`, so there is exactly one writer.
#[derive(Debug)]
pub struct HotelRepository<B> {
    store: Store<B>,
    last_booking_id: Option<BookingId>,
}

impl<B: KeyValueBackend> HotelRepository<B> {
    /// Creates a repository over `store`. Nothing is read or written yet.
    #[must_use]
    pub fn new(store: Store<B>) -> Self {
        Self {
            store,
            last_booking_id: None,
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    /// Returns the underlying store mutably.
    pub fn store_mut(&mut self) -> &mut Store<B> {
        &mut self.store
    }

    /// Consumes the repository, returning its store.
    #[must_use]
    pub fn into_store(self) -> Store<B> {
        self.store
    }

    /// Seeds whichever of the three keys is absent.
    ///
    /// Each key is checked on its own, so a store holding rooms but no
    /// bookings only gets an empty booking log. Calling this on a fully
    /// populated store writes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or a seed write fails.
    pub fn initialize(&mut self) -> Result<InitReport> {
        let mut report = InitReport::default();

        if !self.store.contains(keys::HOTEL_INFO)? {
            self.store
                .write_object(keys::HOTEL_INFO, &default_hotel_config())?;
            report.seeded_config = true;
        }
        if !self.store.contains(keys::ROOMS)? {
            self.store.write_records(keys::ROOMS, &default_rooms())?;
            report.seeded_rooms = true;
        }
        if !self.store.contains(keys::BOOKINGS)? {
            self.store.write_records::<Booking>(keys::BOOKINGS, &[])?;
            report.seeded_bookings = true;
        }

        tracing::info!(
            namespace = self.store.namespace(),
            seeded_config = report.seeded_config,
            seeded_rooms = report.seeded_rooms,
            seeded_bookings = report.seeded_bookings,
            "store initialized"
        );
        Ok(report)
    }

    // ── Hotel configuration ────────────────────────────────────────────

    /// Returns the hotel configuration, or an empty-shaped default if the
    /// store was never initialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value cannot be read or decoded.
    pub fn hotel_config(&self) -> Result<HotelConfig> {
        Ok(self
            .store
            .read_object::<HotelConfig>(keys::HOTEL_INFO)?
            .unwrap_or_default())
    }

    // ── Rooms ──────────────────────────────────────────────────────────

    /// Returns all rooms in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value cannot be read or decoded.
    pub fn list_rooms(&self) -> Result<Vec<Room>> {
        self.store.read_records(keys::ROOMS)
    }

    /// Returns the rooms passing `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value cannot be read or decoded.
    pub fn find_rooms(&self, filter: &RoomFilter) -> Result<Vec<Room>> {
        let mut rooms = self.list_rooms()?;
        rooms.retain(|room| filter.matches(room));
        Ok(rooms)
    }

    /// Returns the room with `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value cannot be read or decoded.
    pub fn get_room(&self, id: RoomId) -> Result<Option<Room>> {
        Ok(self.list_rooms()?.into_iter().find(|room| room.id == id))
    }

    /// Merges `patch` onto the stored room with the same id.
    ///
    /// Returns `Ok(false)` without writing if no such room exists. Only the
    /// fields the patch supplies are checked, so a status change goes
    /// through even when stored data predates the checks.
    ///
    /// # Errors
    ///
    /// Returns [`RoomifyError::InvalidRequest`] if the patch sets an invalid
    /// capacity or price, or a number another room already uses, and a
    /// storage error if the write is rejected.
    pub fn update_room(&mut self, patch: RoomPatch) -> Result<bool> {
        let mut rooms = self.list_rooms()?;
        let Some(current) = rooms.iter().find(|room| room.id == patch.id) else {
            tracing::debug!(room_id = %patch.id, "update_room: no such room");
            return Ok(false);
        };

        let merged = patch.merged_into(current);
        if patch.capacity.is_some() || patch.price.is_some() {
            merged.validate()?;
        }
        if patch.number.is_some()
            && rooms
                .iter()
                .any(|other| other.id != merged.id && other.number == merged.number)
        {
            return Err(RoomifyError::InvalidRequest(format!(
                "room number {} is already in use",
                merged.number
            )));
        }

        if let Some(slot) = rooms.iter_mut().find(|room| room.id == merged.id) {
            *slot = merged;
        }
        self.store.write_records(keys::ROOMS, &rooms)?;
        tracing::debug!(room_id = %patch.id, status = ?patch.status, "room updated");
        Ok(true)
    }

    // ── Bookings ───────────────────────────────────────────────────────

    /// Returns all bookings in creation order. Cancelled bookings stay in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value cannot be read or decoded.
    pub fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.store.read_records(keys::BOOKINGS)
    }

    /// Returns the bookings passing `filter`, in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value cannot be read or decoded.
    pub fn find_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>> {
        let mut bookings = self.list_bookings()?;
        bookings.retain(|booking| filter.matches(booking));
        Ok(bookings)
    }

    /// Returns the booking with `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value cannot be read or decoded.
    pub fn get_booking(&self, id: BookingId) -> Result<Option<Booking>> {
        Ok(self
            .list_bookings()?
            .into_iter()
            .find(|booking| booking.id == id))
    }

    /// Creates a confirmed booking and marks its room as booked.
    ///
    /// The room's number, type and price are copied onto the booking. The
    /// room status update runs after the booking is stored and its result
    /// is reported in [`BookingOutcome::room_sync`]; a failure there does
    /// not undo the booking.
    ///
    /// # Errors
    ///
    /// - [`RoomifyError::InvalidRequest`] for a blank guest name, an email
    ///   without `@`, or a check-out not after check-in.
    /// - [`RoomifyError::RoomNotFound`] if the room does not exist.
    /// - [`RoomifyError::RoomUnavailable`] if the room is not `available`.
    /// - A storage error if the booking write is rejected or the id space is
    ///   exhausted; nothing is stored in that case.
    pub fn create_booking(&mut self, input: NewBooking) -> Result<BookingOutcome> {
        let guest_name = input.guest_name.trim();
        let guest_email = input.guest_email.trim();
        if guest_name.is_empty() {
            return Err(RoomifyError::InvalidRequest(
                "guest name is required".to_string(),
            ));
        }
        if !guest_email.contains('@') {
            return Err(RoomifyError::InvalidRequest(format!(
                "invalid guest email: {guest_email:?}"
            )));
        }
        validate_stay(input.check_in, input.check_out)?;

        let room = self
            .get_room(input.room_id)?
            .ok_or(RoomifyError::RoomNotFound(input.room_id))?;
        if !room.is_available() {
            return Err(RoomifyError::RoomUnavailable {
                room_id: room.id,
                status: room.status,
            });
        }

        let mut bookings = self.list_bookings()?;
        let id = self.next_booking_id(&bookings)?;
        let nights = nights_between(input.check_in, input.check_out);
        let booking = Booking {
            id,
            room_id: room.id,
            room_number: room.number.clone(),
            room_type: room.room_type.clone(),
            price_per_night: room.price,
            guest_name: guest_name.to_string(),
            guest_email: guest_email.to_string(),
            guest_phone: input
                .guest_phone
                .map(|phone| phone.trim().to_string())
                .filter(|phone| !phone.is_empty()),
            check_in: input.check_in,
            check_out: input.check_out,
            nights,
            total_price: room.price * f64::from(nights),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
            cancelled_at: None,
        };

        bookings.push(booking.clone());
        self.store.write_records(keys::BOOKINGS, &bookings)?;
        self.last_booking_id = Some(id);
        tracing::info!(
            booking_id = %id,
            room_id = %room.id,
            nights,
            total_price = booking.total_price,
            "booking created"
        );

        let room_sync = self.sync_room_status(room.id, RoomStatus::Booked);
        Ok(BookingOutcome { booking, room_sync })
    }

    /// Cancels a booking and frees its room.
    ///
    /// Returns `Ok(false)` if no booking has `id`. Cancelling an already
    /// cancelled booking returns `Ok(true)` and changes nothing, so a room
    /// that was re-booked in the meantime keeps its status. The room reset
    /// is best-effort: a missing room or a rejected room write is logged
    /// and the cancellation still stands.
    ///
    /// # Errors
    ///
    /// Returns [`RoomifyError::InvalidStatusTransition`] for a completed
    /// booking, and a storage error if the booking write is rejected.
    pub fn cancel_booking(&mut self, id: BookingId) -> Result<bool> {
        Ok(self.cancel_booking_detailed(id)?.cancelled)
    }

    /// Same as [`Self::cancel_booking`], but also reports what happened to
    /// the room.
    ///
    /// # Errors
    ///
    /// See [`Self::cancel_booking`].
    pub fn cancel_booking_detailed(&mut self, id: BookingId) -> Result<CancelOutcome> {
        let mut bookings = self.list_bookings()?;
        let Some(booking) = bookings.iter_mut().find(|booking| booking.id == id) else {
            tracing::debug!(booking_id = %id, "cancel_booking: no such booking");
            return Ok(CancelOutcome {
                cancelled: false,
                room_sync: None,
            });
        };

        match booking.status {
            BookingStatus::Confirmed => {}
            BookingStatus::Cancelled => {
                tracing::debug!(booking_id = %id, "booking already cancelled");
                return Ok(CancelOutcome {
                    cancelled: true,
                    room_sync: None,
                });
            }
            BookingStatus::Completed => {
                return Err(RoomifyError::InvalidStatusTransition {
                    booking_id: id,
                    from: booking.status,
                });
            }
        }

        booking.status = BookingStatus::Cancelled;
        booking.cancelled_at = Some(Utc::now());
        let room_id = booking.room_id;

        self.store.write_records(keys::BOOKINGS, &bookings)?;
        tracing::info!(booking_id = %id, room_id = %room_id, "booking cancelled");

        let still_held = bookings
            .iter()
            .any(|other| other.room_id == room_id && other.is_active());
        let room_sync = if still_held {
            tracing::debug!(%room_id, "room still held by another booking");
            None
        } else {
            Some(self.sync_room_status(room_id, RoomStatus::Available))
        };
        Ok(CancelOutcome {
            cancelled: true,
            room_sync,
        })
    }

    // ── Derived views ──────────────────────────────────────────────────

    /// Computes the live receipt total for `booking`.
    ///
    /// See [`pricing::compute_total`].
    ///
    /// # Errors
    ///
    /// Returns an error if rooms or config cannot be read.
    pub fn compute_total(&self, booking: &Booking) -> Result<BookingTotals> {
        pricing::compute_total(self, booking)
    }

    /// Returns the booking with `id` and its live totals.
    ///
    /// # Errors
    ///
    /// Returns [`RoomifyError::BookingNotFound`] if no booking has `id`, or
    /// an error if the store cannot be read.
    pub fn receipt(&self, id: BookingId) -> Result<Receipt> {
        let booking = self
            .get_booking(id)?
            .ok_or(RoomifyError::BookingNotFound(id))?;
        let totals = self.compute_total(&booking)?;
        Ok(Receipt { booking, totals })
    }

    /// Returns the headline dashboard figures.
    ///
    /// # Errors
    ///
    /// Returns an error if rooms or bookings cannot be read.
    pub fn dashboard(&self) -> Result<DashboardStats> {
        Ok(DashboardStats::collect(
            &self.list_rooms()?,
            &self.list_bookings()?,
        ))
    }

    /// Returns up to `limit` bookings, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if bookings cannot be read.
    pub fn recent_bookings(&self, limit: usize) -> Result<Vec<Booking>> {
        Ok(dashboard::recent_bookings(self.list_bookings()?, limit))
    }

    /// Returns confirmed and cancelled bookings matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if bookings cannot be read.
    pub fn receipts(&self, query: Option<&str>) -> Result<Vec<Booking>> {
        Ok(dashboard::receipts(self.list_bookings()?, query))
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn next_booking_id(&self, bookings: &[Booking]) -> Result<BookingId> {
        let persisted = bookings.iter().map(|booking| booking.id).max();
        match persisted.max(self.last_booking_id) {
            None => Ok(BookingId::new(1)),
            Some(last) => last.next().ok_or_else(|| {
                RoomifyError::Storage(format!("booking id space exhausted after {last}"))
            }),
        }
    }

    fn sync_room_status(&mut self, room_id: RoomId, status: RoomStatus) -> RoomSync {
        match self.update_room(RoomPatch::status(room_id, status)) {
            Ok(true) => RoomSync::Updated,
            Ok(false) => {
                tracing::warn!(%room_id, %status, "room missing; status not updated");
                RoomSync::RoomMissing
            }
            Err(err) => {
                tracing::warn!(%room_id, %status, error = %err, "room status write failed");
                RoomSync::WriteFailed(err.to_string())
            }
        }
    }
}
