use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;
use voyra_catalog::{BookedSeats, TransportMode};

use crate::calendar::TravelDay;
use crate::{require_text, CoreError, CoreResult};

text_enum! {
    pub enum BookingStatus ("booking status") {
        Pending => "pending",
        Confirmed => "confirmed",
        Cancelled => "cancelled",
    }
}

text_enum! {
    pub enum PaymentStatus ("payment status") {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
        Refunded => "refunded",
    }
}

text_enum! {
    pub enum Gender ("gender") {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerSeat {
    pub seat_number: String,
    pub passenger_name: String,
    pub age: u8,
    pub gender: Gender,
}

impl PassengerSeat {
    fn validate(&self) -> CoreResult<PassengerSeat> {
        if !(1..=120).contains(&self.age) {
            return Err(CoreError::Validation(format!(
                "Passenger age must be between 1 and 120 (seat {})",
                self.seat_number
            )));
        }
        Ok(PassengerSeat {
            seat_number: require_text("a seat number", &self.seat_number)?,
            passenger_name: require_text("passenger name", &self.passenger_name)?,
            age: self.age,
            gender: self.gender,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mode: TransportMode,
    pub vehicle_id: Uuid,
    pub route_id: Uuid,
    pub journey_date: DateTime<Utc>,
    pub seats: Vec<PassengerSeat>,
    pub total_amount: i64,
    pub booking_status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn seat_numbers(&self) -> impl Iterator<Item = &str> {
        self.seats.iter().map(|s| s.seat_number.as_str())
    }

    pub fn is_confirmed(&self) -> bool {
        self.booking_status == BookingStatus::Confirmed
    }
}

fn default_mode() -> TransportMode {
    TransportMode::Flight
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[serde(default = "default_mode")]
    pub mode: TransportMode,
    #[serde(alias = "flightId", alias = "busId")]
    pub vehicle_id: Uuid,
    pub route_id: Uuid,
    #[serde(alias = "journeyDate")]
    pub date: String,
    pub seats: Vec<PassengerSeat>,
}

impl NewBooking {
    /// Seat count bounds, per-passenger checks and duplicate seat numbers.
    pub fn validated_seats(&self, max_seats: usize) -> CoreResult<Vec<PassengerSeat>> {
        if self.seats.is_empty() {
            return Err(CoreError::Validation("Please select at least one seat".into()));
        }
        if self.seats.len() > max_seats {
            return Err(CoreError::Validation(format!(
                "A booking can hold at most {} seats",
                max_seats
            )));
        }

        let mut seen = HashSet::with_capacity(self.seats.len());
        let mut seats = Vec::with_capacity(self.seats.len());
        for seat in &self.seats {
            let seat = seat.validate()?;
            if !seen.insert(seat.seat_number.clone()) {
                return Err(CoreError::Validation(format!(
                    "Seat {} selected more than once",
                    seat.seat_number
                )));
            }
            seats.push(seat);
        }
        Ok(seats)
    }
}

/// Booking query used by the seat resolver, the delete guards and the admin
/// listing. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub user_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub route_id: Option<Uuid>,
    pub journey_from: Option<DateTime<Utc>>,
    pub journey_until: Option<DateTime<Utc>>,
}

impl BookingFilter {
    /// Confirmed bookings of one vehicle + route on one travel day.
    pub fn confirmed_on(vehicle_id: Uuid, route_id: Uuid, day: &TravelDay) -> Self {
        let (start, end) = day.bounds();
        Self {
            status: Some(BookingStatus::Confirmed),
            vehicle_id: Some(vehicle_id),
            route_id: Some(route_id),
            journey_from: Some(start),
            journey_until: Some(end),
            ..Default::default()
        }
    }

    pub fn within(mut self, day: &TravelDay) -> Self {
        let (start, end) = day.bounds();
        self.journey_from = Some(start);
        self.journey_until = Some(end);
        self
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        self.status.map_or(true, |s| booking.booking_status == s)
            && self.user_id.map_or(true, |id| booking.user_id == id)
            && self.vehicle_id.map_or(true, |id| booking.vehicle_id == id)
            && self.route_id.map_or(true, |id| booking.route_id == id)
            && self.journey_from.map_or(true, |from| booking.journey_date >= from)
            && self.journey_until.map_or(true, |until| booking.journey_date <= until)
    }
}

/// Flattens the seats of confirmed bookings into one de-duplicated set.
pub fn booked_seats<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> BookedSeats {
    bookings
        .into_iter()
        .filter(|b| b.is_confirmed())
        .flat_map(|b| b.seat_numbers())
        .collect()
}
