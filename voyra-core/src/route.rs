use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use voyra_catalog::TransportMode;

use crate::calendar::{weekday_name, WEEKDAYS};
use crate::{require_text, CoreError, CoreResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: Uuid,
    pub mode: TransportMode,
    pub vehicle_id: Uuid,
    pub source: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub distance: Option<u32>,
    pub price: i64,
    pub days: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Route {
    /// Routes without explicit days run every day.
    pub fn runs_on(&self, date: NaiveDate) -> bool {
        let weekday = weekday_name(date);
        self.days.is_empty() || self.days.iter().any(|day| day == weekday)
    }

    pub fn departure(&self) -> CoreResult<NaiveTime> {
        parse_clock("departure time", &self.departure_time)
    }
}

pub(crate) fn parse_clock(field: &str, value: &str) -> CoreResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| CoreError::Validation(format!("Invalid {} (expected HH:MM): {}", field, value)))
}

fn check_days(days: &[String]) -> CoreResult<Vec<String>> {
    let mut normalized: Vec<String> = Vec::with_capacity(days.len());
    for day in days {
        let day = day.trim();
        if !WEEKDAYS.contains(&day) {
            return Err(CoreError::Validation(format!("Invalid day: {}", day)));
        }
        if !normalized.iter().any(|d| d == day) {
            normalized.push(day.to_string());
        }
    }
    Ok(normalized)
}

fn check_price(price: i64) -> CoreResult<()> {
    if price <= 0 {
        return Err(CoreError::Validation("Price must be greater than zero".into()));
    }
    Ok(())
}

fn default_mode() -> TransportMode {
    TransportMode::Flight
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoute {
    #[serde(default = "default_mode")]
    pub mode: TransportMode,
    #[serde(alias = "flight", alias = "flightId", alias = "bus", alias = "busId")]
    pub vehicle_id: Uuid,
    pub source: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    #[serde(default)]
    pub distance: Option<u32>,
    pub price: i64,
    #[serde(default)]
    pub days: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl NewRoute {
    pub fn into_route(self, now: DateTime<Utc>) -> CoreResult<Route> {
        parse_clock("departure time", &self.departure_time)?;
        parse_clock("arrival time", &self.arrival_time)?;
        check_price(self.price)?;

        Ok(Route {
            id: Uuid::new_v4(),
            mode: self.mode,
            vehicle_id: self.vehicle_id,
            source: require_text("source", &self.source)?,
            destination: require_text("destination", &self.destination)?,
            departure_time: self.departure_time.trim().to_string(),
            arrival_time: self.arrival_time.trim().to_string(),
            duration: require_text("duration", &self.duration)?,
            distance: self.distance,
            price: self.price,
            days: check_days(&self.days)?,
            is_active: self.is_active,
            created_at: now,
        })
    }
}

/// Partial route edit. The owning vehicle cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteUpdate {
    pub source: Option<String>,
    pub destination: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration: Option<String>,
    pub distance: Option<u32>,
    pub price: Option<i64>,
    pub days: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl RouteUpdate {
    pub fn apply(self, route: &mut Route) -> CoreResult<()> {
        if let Some(source) = self.source {
            route.source = require_text("source", &source)?;
        }
        if let Some(destination) = self.destination {
            route.destination = require_text("destination", &destination)?;
        }
        if let Some(time) = self.departure_time {
            parse_clock("departure time", &time)?;
            route.departure_time = time.trim().to_string();
        }
        if let Some(time) = self.arrival_time {
            parse_clock("arrival time", &time)?;
            route.arrival_time = time.trim().to_string();
        }
        if let Some(duration) = self.duration {
            route.duration = require_text("duration", &duration)?;
        }
        if let Some(distance) = self.distance {
            route.distance = Some(distance);
        }
        if let Some(price) = self.price {
            check_price(price)?;
            route.price = price;
        }
        if let Some(days) = self.days {
            route.days = check_days(&days)?;
        }
        if let Some(active) = self.is_active {
            route.is_active = active;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_route(days: serde_json::Value) -> NewRoute {
        serde_json::from_value(serde_json::json!({
            "flight": Uuid::new_v4(),
            "source": "Chennai (MAA)",
            "destination": "Bengaluru (BLR)",
            "departureTime": "06:15",
            "arrivalTime": "07:20",
            "duration": "1h 05m",
            "price": 3499,
            "days": days
        }))
        .unwrap()
    }

    #[test]
    fn test_accepts_legacy_vehicle_key() {
        let input = new_route(serde_json::json!(["Monday"]));
        assert_eq!(input.mode, TransportMode::Flight);
        assert!(input.is_active);
    }

    #[test]
    fn test_runs_on_weekdays() {
        let route = new_route(serde_json::json!(["Monday", "Friday", "Monday"]))
            .into_route(Utc::now())
            .unwrap();
        assert_eq!(route.days, vec!["Monday", "Friday"]);

        let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        assert!(route.runs_on(monday));
        assert!(!route.runs_on(tuesday));

        let daily = new_route(serde_json::json!([])).into_route(Utc::now()).unwrap();
        assert!(daily.runs_on(tuesday));
    }

    #[test]
    fn test_rejects_bad_times_days_and_price() {
        let mut input = new_route(serde_json::json!([]));
        input.departure_time = "6am".into();
        assert!(input.into_route(Utc::now()).is_err());

        let input = new_route(serde_json::json!(["Funday"]));
        assert!(matches!(input.into_route(Utc::now()), Err(CoreError::Validation(_))));

        let mut input = new_route(serde_json::json!([]));
        input.price = 0;
        assert!(input.into_route(Utc::now()).is_err());
    }

    #[test]
    fn test_update_validates() {
        let mut route = new_route(serde_json::json!([])).into_route(Utc::now()).unwrap();
        let update = RouteUpdate {
            arrival_time: Some("25:00".into()),
            ..Default::default()
        };
        assert!(update.apply(&mut route).is_err());

        let update = RouteUpdate {
            price: Some(4100),
            days: Some(vec!["Sunday".into()]),
            ..Default::default()
        };
        update.apply(&mut route).unwrap();
        assert_eq!(route.price, 4100);
        assert_eq!(route.days, vec!["Sunday"]);
    }
}
