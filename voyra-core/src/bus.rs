use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use voyra_catalog::BusSeatType;

use crate::{check_rating, require_text, CoreError, CoreResult};

text_enum! {
    pub enum BusType ("bus type") {
        Ac => "AC",
        NonAc => "Non-AC",
        Sleeper => "Sleeper",
        SemiSleeper => "Semi-Sleeper",
        Volvo => "Volvo",
        Luxury => "Luxury",
    }
}

text_enum! {
    pub enum BusAmenity ("bus amenity") {
        Wifi => "WiFi",
        ChargingPoint => "Charging Point",
        WaterBottle => "Water Bottle",
        Blanket => "Blanket",
        Tv => "TV",
        ReadingLight => "Reading Light",
        EmergencyExit => "Emergency Exit",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bus {
    pub id: Uuid,
    pub name: String,
    pub bus_number: String,
    pub bus_type: BusType,
    pub seat_type: BusSeatType,
    pub total_seats: u32,
    pub amenities: Vec<BusAmenity>,
    pub operator: String,
    pub rating: f64,
    pub review_count: u32,
    pub images: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBus {
    pub name: String,
    pub bus_number: String,
    pub bus_type: BusType,
    pub seat_type: String,
    pub operator: String,
    #[serde(default)]
    pub amenities: Vec<BusAmenity>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl NewBus {
    pub fn into_bus(self, seat_type: BusSeatType, total_seats: u32, now: DateTime<Utc>) -> CoreResult<Bus> {
        check_rating(self.rating)?;
        Ok(Bus {
            id: Uuid::new_v4(),
            name: require_text("bus name", &self.name)?,
            bus_number: require_text("bus number", &self.bus_number)?.to_uppercase(),
            bus_type: self.bus_type,
            seat_type,
            total_seats,
            amenities: self.amenities,
            operator: require_text("operator name", &self.operator)?,
            rating: self.rating,
            review_count: self.review_count,
            images: self.images,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusUpdate {
    pub name: Option<String>,
    pub bus_number: Option<String>,
    pub bus_type: Option<BusType>,
    pub seat_type: Option<String>,
    pub operator: Option<String>,
    pub amenities: Option<Vec<BusAmenity>>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub images: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl BusUpdate {
    pub fn apply(self, bus: &mut Bus, now: DateTime<Utc>) -> CoreResult<()> {
        if let Some(seat_type) = self.seat_type {
            if seat_type.trim() != bus.seat_type.to_string() {
                return Err(CoreError::Validation(
                    "Changing the seat type requires regenerating the seat layout".into(),
                ));
            }
        }
        if let Some(name) = self.name {
            bus.name = require_text("bus name", &name)?;
        }
        if let Some(number) = self.bus_number {
            bus.bus_number = require_text("bus number", &number)?.to_uppercase();
        }
        if let Some(operator) = self.operator {
            bus.operator = require_text("operator name", &operator)?;
        }
        if let Some(rating) = self.rating {
            check_rating(rating)?;
            bus.rating = rating;
        }
        if let Some(bus_type) = self.bus_type {
            bus.bus_type = bus_type;
        }
        if let Some(amenities) = self.amenities {
            bus.amenities = amenities;
        }
        if let Some(count) = self.review_count {
            bus.review_count = count;
        }
        if let Some(images) = self.images {
            bus.images = images;
        }
        if let Some(active) = self.is_active {
            bus.is_active = active;
        }
        bus.updated_at = now;
        Ok(())
    }
}
