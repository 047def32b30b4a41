use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use voyra_catalog::CabinClass;

use crate::{check_rating, require_text, CoreError, CoreResult};

text_enum! {
    pub enum AircraftType ("aircraft type") {
        AirbusA320 => "Airbus A320",
        Boeing737 => "Boeing 737",
        Boeing747 => "Boeing 747",
        AirbusA380 => "Airbus A380",
        EmbraerE190 => "Embraer E190",
        Boeing777 => "Boeing 777",
        AirbusA350 => "Airbus A350",
        Boeing787 => "Boeing 787 Dreamliner",
        Boeing737Max => "Boeing 737 MAX",
        AirbusA321Neo => "Airbus A321neo",
    }
}

text_enum! {
    pub enum FlightAmenity ("flight amenity") {
        Wifi => "WiFi",
        InFlightMeal => "In-flight Meal",
        ExtraLegroom => "Extra Legroom",
        UsbPort => "USB Port",
        Entertainment => "Entertainment System",
        RecliningSeats => "Reclining Seats",
        PriorityBoarding => "Priority Boarding",
        LoungeAccess => "Lounge Access",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: Uuid,
    pub name: String,
    pub flight_number: String,
    pub airline: String,
    pub aircraft_type: AircraftType,
    pub class: CabinClass,
    pub total_seats: u32,
    pub amenities: Vec<FlightAmenity>,
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

/// Admin payload for a new flight. `class` stays a string until it is
/// resolved against the class registry, so unknown names surface as a
/// class error instead of a body rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFlight {
    pub name: String,
    pub flight_number: String,
    pub airline: String,
    pub aircraft_type: AircraftType,
    pub class: String,
    #[serde(default)]
    pub amenities: Vec<FlightAmenity>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl NewFlight {
    pub fn into_flight(self, class: CabinClass, total_seats: u32, now: DateTime<Utc>) -> CoreResult<Flight> {
        check_rating(self.rating)?;
        Ok(Flight {
            id: Uuid::new_v4(),
            name: require_text("flight name", &self.name)?,
            flight_number: require_text("flight number", &self.flight_number)?.to_uppercase(),
            airline: require_text("airline", &self.airline)?,
            aircraft_type: self.aircraft_type,
            class,
            total_seats,
            amenities: self.amenities,
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
pub struct FlightUpdate {
    pub name: Option<String>,
    pub flight_number: Option<String>,
    pub airline: Option<String>,
    pub aircraft_type: Option<AircraftType>,
    pub class: Option<String>,
    pub amenities: Option<Vec<FlightAmenity>>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub images: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl FlightUpdate {
    pub fn apply(self, flight: &mut Flight, now: DateTime<Utc>) -> CoreResult<()> {
        if let Some(class) = self.class {
            if class.trim() != flight.class.to_string() {
                return Err(CoreError::Validation(
                    "Changing the class requires regenerating the seat layout".into(),
                ));
            }
        }
        if let Some(name) = self.name {
            flight.name = require_text("flight name", &name)?;
        }
        if let Some(number) = self.flight_number {
            flight.flight_number = require_text("flight number", &number)?.to_uppercase();
        }
        if let Some(airline) = self.airline {
            flight.airline = require_text("airline", &airline)?;
        }
        if let Some(rating) = self.rating {
            check_rating(rating)?;
            flight.rating = rating;
        }
        if let Some(aircraft) = self.aircraft_type {
            flight.aircraft_type = aircraft;
        }
        if let Some(amenities) = self.amenities {
            flight.amenities = amenities;
        }
        if let Some(count) = self.review_count {
            flight.review_count = count;
        }
        if let Some(images) = self.images {
            flight.images = images;
        }
        if let Some(active) = self.is_active {
            flight.is_active = active;
        }
        flight.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> NewFlight {
        serde_json::from_value(serde_json::json!({
            "name": "Morning Hopper",
            "flightNumber": "ai-202",
            "airline": "Air Voyra",
            "aircraftType": "Boeing 737",
            "class": "Business",
            "amenities": ["WiFi", "In-flight Meal"]
        }))
        .unwrap()
    }

    #[test]
    fn test_new_flight_defaults() {
        let input = payload();
        assert!(input.is_active);
        assert_eq!(input.rating, 0.0);

        let flight = input.into_flight(CabinClass::Business, 40, Utc::now()).unwrap();
        assert_eq!(flight.flight_number, "AI-202");
        assert_eq!(flight.amenities, vec![FlightAmenity::Wifi, FlightAmenity::InFlightMeal]);
    }

    #[test]
    fn test_rejects_blank_fields_and_bad_rating() {
        let mut input = payload();
        input.airline = "   ".into();
        assert!(matches!(
            input.into_flight(CabinClass::Business, 40, Utc::now()),
            Err(CoreError::Validation(_))
        ));

        let mut input = payload();
        input.rating = 7.5;
        assert!(input.into_flight(CabinClass::Business, 40, Utc::now()).is_err());
    }

    #[test]
    fn test_unknown_aircraft_is_rejected() {
        let result: Result<NewFlight, _> = serde_json::from_value(serde_json::json!({
            "name": "x", "flightNumber": "x", "airline": "x",
            "aircraftType": "Concorde", "class": "Economy"
        }));
        assert!(result.is_err());
        assert!("Concorde".parse::<AircraftType>().is_err());
        assert_eq!(
            "Boeing 787 Dreamliner".parse::<AircraftType>().unwrap(),
            AircraftType::Boeing787
        );
    }

    #[test]
    fn test_update_refuses_class_change() {
        let mut flight = payload().into_flight(CabinClass::Business, 40, Utc::now()).unwrap();

        let same_class = FlightUpdate {
            class: Some("Business".into()),
            rating: Some(4.5),
            ..Default::default()
        };
        same_class.apply(&mut flight, Utc::now()).unwrap();
        assert_eq!(flight.rating, 4.5);

        let other_class = FlightUpdate {
            class: Some("Economy".into()),
            ..Default::default()
        };
        assert!(other_class.apply(&mut flight, Utc::now()).is_err());
        assert_eq!(flight.class, CabinClass::Business);
    }

    #[test]
    fn test_wire_format() {
        let flight = payload().into_flight(CabinClass::FirstClass, 12, Utc::now()).unwrap();
        let value = serde_json::to_value(&flight).unwrap();
        assert_eq!(value["class"], "First Class");
        assert_eq!(value["aircraftType"], "Boeing 737");
        assert_eq!(value["totalSeats"], 12);
        assert_eq!(value["isActive"], true);
    }
}
