use serde::Serialize;
use uuid::Uuid;
use voyra_catalog::TransportMode;

use crate::bus::Bus;
use crate::flight::Flight;

/// Either kind of seat-bearing vehicle.
#[derive(Debug, Clone, PartialEq)]
pub enum Vehicle {
    Flight(Flight),
    Bus(Bus),
}

impl Vehicle {
    pub fn id(&self) -> Uuid {
        match self {
            Vehicle::Flight(f) => f.id,
            Vehicle::Bus(b) => b.id,
        }
    }

    pub fn mode(&self) -> TransportMode {
        match self {
            Vehicle::Flight(_) => TransportMode::Flight,
            Vehicle::Bus(_) => TransportMode::Bus,
        }
    }

    pub fn class_name(&self) -> &'static str {
        use voyra_catalog::SeatClass;
        match self {
            Vehicle::Flight(f) => f.class.name(),
            Vehicle::Bus(b) => b.seat_type.name(),
        }
    }

    pub fn total_seats(&self) -> u32 {
        match self {
            Vehicle::Flight(f) => f.total_seats,
            Vehicle::Bus(b) => b.total_seats,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Vehicle::Flight(f) => f.is_active,
            Vehicle::Bus(b) => b.is_active,
        }
    }

    pub fn summary(&self) -> VehicleSummary {
        match self {
            Vehicle::Flight(f) => VehicleSummary {
                id: f.id,
                mode: TransportMode::Flight,
                name: f.name.clone(),
                number: f.flight_number.clone(),
                operator: f.airline.clone(),
                class: self.class_name(),
                rating: f.rating,
                total_seats: f.total_seats,
            },
            Vehicle::Bus(b) => VehicleSummary {
                id: b.id,
                mode: TransportMode::Bus,
                name: b.name.clone(),
                number: b.bus_number.clone(),
                operator: b.operator.clone(),
                class: self.class_name(),
                rating: b.rating,
                total_seats: b.total_seats,
            },
        }
    }
}

/// The vehicle part of a search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    pub id: Uuid,
    pub mode: TransportMode,
    pub name: String,
    pub number: String,
    pub operator: String,
    pub class: &'static str,
    pub rating: f64,
    pub total_seats: u32,
}
