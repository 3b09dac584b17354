//! Booking ledger service.
//!
//! Owns the booking collection and enforces the trip lifecycle: admission
//! control on creation and edits, owner-or-admin management rights, driver
//! confirmation and carpool requests. Each mutation is persisted through the
//! [`SnapshotStore`] before it becomes visible.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::ports::{BOOKINGS_KEY, SnapshotStore};
use crate::domain::snapshot::{load_collection, persist_collection};
use crate::domain::{
    Account, Booking, BookingId, BookingRequest, BookingStatus, BookingValidationError,
    CarpoolRequest, Error, NotificationIntent, NotificationKind, Notified, OwnerSnapshot,
    PricingRule, TripDetails, is_within_lead_time,
};

fn validation_error(err: BookingValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.reason(),
    }))
}

fn not_found(id: &BookingId) -> Error {
    Error::not_found(format!("booking {id} not found"))
}

/// Ledger of shuttle bookings.
pub struct BookingLedger {
    store: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
    pricing: PricingRule,
    bookings: Mutex<Vec<Booking>>,
}

impl BookingLedger {
    /// Load stored bookings; an empty store yields an empty ledger.
    pub async fn load(
        store: Arc<dyn SnapshotStore>,
        clock: Arc<dyn Clock>,
        pricing: PricingRule,
    ) -> Result<Self, Error> {
        let mut bookings: Vec<Booking> = load_collection(store.as_ref(), BOOKINGS_KEY)
            .await?
            .unwrap_or_default();
        bookings.sort_by_key(|booking| booking.trip().scheduled_at());
        info!(count = bookings.len(), base_fare = %pricing.base(), "loaded bookings");
        Ok(Self {
            store,
            clock,
            pricing,
            bookings: Mutex::new(bookings),
        })
    }

    /// Create a pending booking owned by `owner`.
    pub async fn create(
        &self,
        owner: &Account,
        request: BookingRequest,
    ) -> Result<Notified<Booking>, Error> {
        if !owner.role().can_book() {
            return Err(Error::forbidden("drivers cannot create bookings"));
        }
        let trip = TripDetails::try_from(request).map_err(validation_error)?;
        trip.ensure_carpool_eligible().map_err(validation_error)?;
        self.admit(&trip)?;

        let cost = self.pricing.fare_for(trip.time());
        let booking = Booking::new(OwnerSnapshot::from(owner), trip, cost, self.clock.utc());

        let mut bookings = self.bookings.lock().await;
        let mut next = bookings.clone();
        next.push(booking.clone());
        self.commit(&mut bookings, next).await?;

        info!(booking_id = %booking.id(), owner_id = %owner.id(), cost = %cost, "booking created");
        let intent = NotificationIntent::new(NotificationKind::BookingCreated, owner.email());
        Ok(Notified::new(booking, intent))
    }

    /// Replace a booking's trip fields and recompute its fare.
    ///
    /// Ownership, status and carpool requests are preserved.
    pub async fn edit(
        &self,
        id: &BookingId,
        caller: &Account,
        request: BookingRequest,
    ) -> Result<Notified<Booking>, Error> {
        let mut bookings = self.bookings.lock().await;
        let mut next = bookings.clone();
        let booking = next
            .iter_mut()
            .find(|booking| booking.id() == *id)
            .ok_or_else(|| not_found(id))?;
        ensure_manager(booking, caller)?;

        let trip = TripDetails::try_from(request).map_err(validation_error)?;
        self.admit(&trip)?;
        let cost = self.pricing.fare_for(trip.time());
        booking.replace_trip(trip, cost);
        let updated = booking.clone();
        self.commit(&mut bookings, next).await?;

        let kind = match updated.status() {
            BookingStatus::Confirmed => NotificationKind::BookingConfirmedUpdate,
            BookingStatus::Pending => NotificationKind::BookingUpdate,
        };
        info!(booking_id = %id, caller_id = %caller.id(), "booking edited");
        let intent = NotificationIntent::new(kind, updated.owner().email.as_str());
        Ok(Notified::new(updated, intent))
    }

    /// Flip a booking between pending and confirmed.
    ///
    /// An unknown booking is reported before the caller's role is checked.
    pub async fn toggle_confirmation(
        &self,
        id: &BookingId,
        caller: &Account,
    ) -> Result<Notified<Booking>, Error> {
        let mut bookings = self.bookings.lock().await;
        let mut next = bookings.clone();
        let booking = next
            .iter_mut()
            .find(|booking| booking.id() == *id)
            .ok_or_else(|| not_found(id))?;
        if !caller.role().can_confirm_trips() {
            return Err(Error::forbidden("only drivers and administrators confirm trips"));
        }
        let status = booking.toggle_status();
        let updated = booking.clone();
        self.commit(&mut bookings, next).await?;

        let kind = match status {
            BookingStatus::Confirmed => NotificationKind::Confirmed,
            BookingStatus::Pending => NotificationKind::Rejected,
        };
        info!(booking_id = %id, caller_id = %caller.id(), status = ?status, "booking confirmation toggled");
        let intent = NotificationIntent::new(kind, updated.owner().email.as_str());
        Ok(Notified::new(updated, intent))
    }

    /// Remove a booking. Returns the removed record.
    pub async fn cancel(
        &self,
        id: &BookingId,
        caller: &Account,
    ) -> Result<Notified<Booking>, Error> {
        let mut bookings = self.bookings.lock().await;
        let position = bookings
            .iter()
            .position(|booking| booking.id() == *id)
            .ok_or_else(|| not_found(id))?;
        let mut next = bookings.clone();
        let removed = next.remove(position);
        ensure_manager(&removed, caller)?;
        self.commit(&mut bookings, next).await?;

        info!(booking_id = %id, caller_id = %caller.id(), "booking cancelled");
        let intent =
            NotificationIntent::new(NotificationKind::BookingCancelled, removed.owner().email.as_str());
        Ok(Notified::new(removed, intent))
    }

    /// Ask to share another rider's trip.
    ///
    /// The booking's carpool flag is not consulted.
    pub async fn request_carpool(
        &self,
        id: &BookingId,
        requester: &Account,
    ) -> Result<Notified<Booking>, Error> {
        let mut bookings = self.bookings.lock().await;
        let mut next = bookings.clone();
        let booking = next
            .iter_mut()
            .find(|booking| booking.id() == *id)
            .ok_or_else(|| not_found(id))?;
        if !requester.role().can_book() {
            return Err(Error::forbidden("drivers cannot request carpools"));
        }
        if booking.is_owned_by(requester) {
            return Err(Error::self_request("cannot request a carpool on your own booking"));
        }
        if booking.has_carpool_request_from(requester) {
            let current = serde_json::to_value(&*booking)
                .map_err(|err| Error::internal(format!("could not encode booking: {err}")))?;
            return Err(Error::duplicate_request("carpool already requested")
                .with_details(json!({ "booking": current })));
        }
        booking.push_carpool_request(CarpoolRequest::from_account(requester, self.clock.utc()));
        let updated = booking.clone();
        self.commit(&mut bookings, next).await?;

        info!(booking_id = %id, requester_id = %requester.id(), "carpool requested");
        let intent = NotificationIntent::new(
            NotificationKind::CarpoolRequested,
            updated.owner().email.as_str(),
        )
        .with_context(json!({
            "ownerName": updated.owner().name,
            "requesterName": requester.name(),
            "requesterEmail": requester.email(),
        }));
        Ok(Notified::new(updated, intent))
    }

    /// Every booking ordered by scheduled date then time.
    pub async fn list(&self) -> Vec<Booking> {
        self.bookings.lock().await.clone()
    }

    /// Look up a booking by id.
    pub async fn find(&self, id: &BookingId) -> Option<Booking> {
        self.bookings
            .lock()
            .await
            .iter()
            .find(|booking| booking.id() == *id)
            .cloned()
    }

    fn admit(&self, trip: &TripDetails) -> Result<(), Error> {
        let now = self.clock.local().naive_local();
        if is_within_lead_time(trip.date(), trip.time(), now) {
            return Err(Error::lead_time_violation(
                "trips must be booked at least 72 hours in advance",
            )
            .with_details(json!({
                "scheduledAt": trip.scheduled_at().to_string(),
            })));
        }
        Ok(())
    }

    /// Sort, persist and only then publish `next`.
    ///
    /// The sort is stable: bookings scheduled at the same moment keep their
    /// insertion order.
    async fn commit(&self, live: &mut Vec<Booking>, mut next: Vec<Booking>) -> Result<(), Error> {
        next.sort_by_key(|booking| booking.trip().scheduled_at());
        persist_collection(self.store.as_ref(), BOOKINGS_KEY, &next).await?;
        *live = next;
        Ok(())
    }
}

fn ensure_manager(booking: &Booking, caller: &Account) -> Result<(), Error> {
    if booking.is_owned_by(caller) || caller.role().is_admin() {
        return Ok(());
    }
    Err(Error::forbidden("only the owner or an administrator may change this booking"))
}

#[cfg(test)]
#[path = "booking_ledger_tests.rs"]
mod tests;
