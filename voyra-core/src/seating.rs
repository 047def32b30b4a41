use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;
use voyra_catalog::{AvailabilityView, BookedSeats, TransportMode};

use crate::booking::{booked_seats, Booking, BookingFilter, BookingStatus, NewBooking, PaymentStatus};
use crate::calendar::TravelDay;
use crate::repository::{BookingRepository, Repositories};
use crate::seat_layout::SeatLayout;
use crate::{CoreError, CoreResult};

pub const DEFAULT_MAX_SEATS: usize = 9;

/// Seats held by confirmed bookings of one vehicle + route on one day.
pub(crate) async fn confirmed_seats(
    bookings: &dyn BookingRepository,
    vehicle_id: Uuid,
    route_id: Uuid,
    day: &TravelDay,
) -> CoreResult<BookedSeats> {
    let filter = BookingFilter::confirmed_on(vehicle_id, route_id, day);
    let found = bookings.list_bookings(&filter).await?;
    Ok(booked_seats(&found))
}

/// Admin booking listing query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    pub status: Option<String>,
    pub date: Option<String>,
    #[serde(alias = "flightId", alias = "busId")]
    pub vehicle_id: Option<Uuid>,
}

/// Seat availability, booking and cancellation.
pub struct SeatingService {
    repos: Repositories,
    offset: FixedOffset,
    max_seats: usize,
}

impl SeatingService {
    pub fn new(repos: Repositories, offset: FixedOffset, max_seats: usize) -> Self {
        Self {
            repos,
            offset,
            max_seats,
        }
    }

    async fn layout_for(&self, mode: TransportMode, vehicle_id: Uuid) -> CoreResult<SeatLayout> {
        self.repos
            .layouts
            .get_layout(vehicle_id)
            .await?
            .filter(|layout| layout.mode == mode)
            .ok_or(CoreError::SeatMapNotFound { mode, vehicle_id })
    }

    /// The vehicle's seat map with each seat marked booked or free for the
    /// route on the given day.
    pub async fn availability(
        &self,
        mode: TransportMode,
        vehicle_id: Uuid,
        route_id: Uuid,
        date: &str,
    ) -> CoreResult<AvailabilityView> {
        let day = TravelDay::parse(date, self.offset)?;
        let layout = self.layout_for(mode, vehicle_id).await?;
        let booked = confirmed_seats(self.repos.bookings.as_ref(), vehicle_id, route_id, &day).await?;

        debug!(
            vehicle_id = %vehicle_id,
            route_id = %route_id,
            date = %day.date(),
            booked = booked.len(),
            "resolved seat availability"
        );
        Ok(AvailabilityView::new(&layout.map, &booked))
    }

    /// Books seats for the caller. Payment is not processed; a successful
    /// booking is confirmed with a completed payment.
    pub async fn book(&self, user_id: Uuid, input: NewBooking, now: DateTime<Utc>) -> CoreResult<Booking> {
        let seats = input.validated_seats(self.max_seats)?;
        let mode = input.mode;

        let route = self
            .repos
            .routes
            .get_route(input.route_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Route not found".into()))?;
        if route.vehicle_id != input.vehicle_id || route.mode != mode {
            return Err(CoreError::Validation(format!("Route does not belong to this {}", mode)));
        }
        if !route.is_active {
            return Err(CoreError::Validation("Route is not active".into()));
        }

        let day = TravelDay::parse(&input.date, self.offset)?;
        if day.date() < TravelDay::today(now, self.offset).date() {
            return Err(CoreError::Validation("Cannot book a journey in the past".into()));
        }
        if !route.runs_on(day.date()) {
            return Err(CoreError::Validation(format!(
                "Route does not operate on {}",
                day.weekday()
            )));
        }

        let layout = self.layout_for(mode, input.vehicle_id).await?;
        if let Some(unknown) = seats.iter().find(|s| !layout.map.contains(&s.seat_number)) {
            return Err(CoreError::Validation(format!(
                "Seat {} does not exist on this {}",
                unknown.seat_number, mode
            )));
        }

        let booked = confirmed_seats(self.repos.bookings.as_ref(), input.vehicle_id, route.id, &day).await?;
        let taken: Vec<&str> = seats
            .iter()
            .map(|s| s.seat_number.as_str())
            .filter(|number| booked.contains(number))
            .collect();
        if !taken.is_empty() {
            warn!(route_id = %route.id, date = %day.date(), seats = ?taken, "seats already booked");
            return Err(CoreError::Conflict(format!("Seats already booked: {}", taken.join(", "))));
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            user_id,
            mode,
            vehicle_id: input.vehicle_id,
            route_id: route.id,
            journey_date: day.at(route.departure()?),
            total_amount: route.price * seats.len() as i64,
            seats,
            booking_status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Completed,
            created_at: now,
        };
        self.repos.bookings.insert_booking(&booking).await?;

        info!(
            booking_id = %booking.id,
            user_id = %user_id,
            route_id = %booking.route_id,
            seats = booking.seats.len(),
            amount = booking.total_amount,
            "booking confirmed"
        );
        Ok(booking)
    }

    /// Cancels a booking. Only its owner or an admin may do so.
    pub async fn cancel(&self, booking_id: Uuid, actor: Uuid, is_admin: bool) -> CoreResult<Booking> {
        let mut booking = self
            .repos
            .bookings
            .get_booking(booking_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Booking not found".into()))?;

        if booking.user_id != actor && !is_admin {
            warn!(booking_id = %booking_id, actor = %actor, "cancel refused: not the owner");
            return Err(CoreError::Forbidden("Not authorized to cancel this booking".into()));
        }
        if booking.booking_status == BookingStatus::Cancelled {
            return Err(CoreError::Conflict("Booking is already cancelled".into()));
        }

        self.repos
            .bookings
            .set_booking_status(booking_id, BookingStatus::Cancelled, PaymentStatus::Refunded)
            .await?;
        booking.booking_status = BookingStatus::Cancelled;
        booking.payment_status = PaymentStatus::Refunded;

        info!(booking_id = %booking_id, actor = %actor, "booking cancelled");
        Ok(booking)
    }

    pub async fn bookings_for_user(&self, user_id: Uuid) -> CoreResult<Vec<Booking>> {
        let filter = BookingFilter {
            user_id: Some(user_id),
            ..Default::default()
        };
        Ok(self.repos.bookings.list_bookings(&filter).await?)
    }

    pub async fn list_bookings(&self, query: BookingQuery) -> CoreResult<Vec<Booking>> {
        let mut filter = BookingFilter {
            vehicle_id: query.vehicle_id,
            ..Default::default()
        };
        if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
            filter.status = Some(status.parse()?);
        }
        if let Some(date) = query.date.as_deref().filter(|d| !d.is_empty()) {
            filter = filter.within(&TravelDay::parse(date, self.offset)?);
        }
        Ok(self.repos.bookings.list_bookings(&filter).await?)
    }
}
