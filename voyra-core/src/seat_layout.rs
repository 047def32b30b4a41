use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use voyra_catalog::{Seat, SeatMap, TransportMode};

/// A vehicle's persisted seat map. One per vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatLayout {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub mode: TransportMode,
    #[serde(flatten)]
    pub map: SeatMap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SeatLayout {
    pub fn new(vehicle_id: Uuid, mode: TransportMode, map: SeatMap, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            mode,
            map,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Hand-built layout for a vehicle that has none yet.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSeatLayout {
    #[serde(alias = "flightId", alias = "busId")]
    pub vehicle_id: Uuid,
    pub layout: String,
    pub seats: Vec<Seat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatLayoutUpdate {
    pub layout: Option<String>,
    pub seats: Option<Vec<Seat>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateLayout {
    #[serde(alias = "seatType")]
    pub class: Option<String>,
}
