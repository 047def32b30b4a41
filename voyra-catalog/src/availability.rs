use serde::Serialize;
use std::collections::HashSet;

use crate::seat::{Seat, SeatMap};

/// De-duplicated seat numbers taken by confirmed bookings for one
/// vehicle + route + travel day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedSeats(HashSet<String>);

impl BookedSeats {
    pub fn new() -> Self {
        Self(HashSet::new())
    }

    pub fn insert(&mut self, seat_number: impl Into<String>) -> bool {
        self.0.insert(seat_number.into())
    }

    pub fn contains(&self, seat_number: &str) -> bool {
        self.0.contains(seat_number)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for BookedSeats {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for BookedSeats {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAvailability {
    #[serde(flatten)]
    pub seat: Seat,
    pub is_booked: bool,
}

/// Marks every seat of the map as booked or free, preserving map order.
/// Booked numbers that do not exist in the map are ignored.
pub fn resolve(seat_map: &SeatMap, booked: &BookedSeats) -> Vec<SeatAvailability> {
    seat_map
        .seats()
        .iter()
        .map(|seat| SeatAvailability {
            is_booked: booked.contains(&seat.seat_number),
            seat: seat.clone(),
        })
        .collect()
}

/// Payload of the seat endpoints: `{layout, totalSeats, seats}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityView {
    pub layout: String,
    pub total_seats: u32,
    pub seats: Vec<SeatAvailability>,
}

impl AvailabilityView {
    pub fn new(seat_map: &SeatMap, booked: &BookedSeats) -> Self {
        Self {
            layout: seat_map.layout().to_string(),
            total_seats: seat_map.total_seats(),
            seats: resolve(seat_map, booked),
        }
    }

    pub fn booked_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_booked).count()
    }

    pub fn available_count(&self) -> usize {
        self.seats.len() - self.booked_count()
    }
}

/// Seats of the map still free, without building the full view.
pub fn available_count(seat_map: &SeatMap, booked: &BookedSeats) -> usize {
    seat_map
        .seats()
        .iter()
        .filter(|seat| !booked.contains(&seat.seat_number))
        .count()
}
