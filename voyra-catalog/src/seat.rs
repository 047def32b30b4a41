use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::LayoutError;

/// Seat category, mirrors the class that owns the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeatType {
    Economy,
    PremiumEconomy,
    Business,
    First,
    Seater,
    Sleeper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatPosition {
    Window,
    Aisle,
    Middle,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deck {
    Main,
    Upper,
    Lower,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub seat_number: String,
    pub row: u32,
    pub column: u32,
    #[serde(rename = "type")]
    pub seat_type: SeatType,
    pub position: SeatPosition,
    pub deck: Deck,
}

/// An ordered, validated list of seats for one vehicle.
///
/// Construction goes through [`SeatMap::new`] (also used when deserializing),
/// so a value of this type always satisfies:
/// * `seats.len() == total_seats`
/// * seat numbers are unique
/// * `(row, column)` pairs are unique and start at 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSeatMap")]
pub struct SeatMap {
    layout: String,
    total_seats: u32,
    seats: Vec<Seat>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeatMap {
    layout: String,
    total_seats: u32,
    seats: Vec<Seat>,
}

impl TryFrom<RawSeatMap> for SeatMap {
    type Error = LayoutError;

    fn try_from(raw: RawSeatMap) -> Result<Self, Self::Error> {
        SeatMap::new(raw.layout, raw.total_seats, raw.seats)
    }
}

impl SeatMap {
    pub fn new(layout: impl Into<String>, total_seats: u32, seats: Vec<Seat>) -> Result<Self, LayoutError> {
        let layout = layout.into().trim().to_string();
        if layout.is_empty() {
            return Err(LayoutError::MissingLabel);
        }

        if seats.len() != total_seats as usize {
            return Err(LayoutError::LayoutMismatch {
                declared: total_seats,
                actual: seats.len(),
            });
        }

        let mut numbers = HashSet::with_capacity(seats.len());
        let mut positions = HashSet::with_capacity(seats.len());
        for seat in &seats {
            if seat.row == 0 || seat.column == 0 || seat.seat_number.trim().is_empty() {
                return Err(LayoutError::InvalidSeat(seat.seat_number.clone()));
            }
            if !numbers.insert(seat.seat_number.as_str()) {
                return Err(LayoutError::DuplicateSeatNumber(seat.seat_number.clone()));
            }
            if !positions.insert((seat.row, seat.column)) {
                return Err(LayoutError::DuplicatePosition {
                    row: seat.row,
                    column: seat.column,
                });
            }
        }

        Ok(Self {
            layout,
            total_seats,
            seats,
        })
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn total_seats(&self) -> u32 {
        self.total_seats
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn find(&self, seat_number: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.seat_number == seat_number)
    }

    pub fn contains(&self, seat_number: &str) -> bool {
        self.find(seat_number).is_some()
    }

    pub fn into_parts(self) -> (String, u32, Vec<Seat>) {
        (self.layout, self.total_seats, self.seats)
    }
}
