use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;
use uuid::Uuid;
use voyra_catalog::{lookup, TransportMode};

use crate::bus::Bus;
use crate::calendar::TravelDay;
use crate::flight::Flight;
use crate::repository::Repositories;
use crate::route::Route;
use crate::seating::confirmed_seats;
use crate::vehicle::{Vehicle, VehicleSummary};
use crate::{CoreError, CoreResult};

pub const DEFAULT_FEATURED_LIMIT: usize = 6;
pub const MAX_FEATURED_LIMIT: usize = 50;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub source: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
    pub class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: Uuid,
    pub vehicle: VehicleSummary,
    pub source: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub price: i64,
    pub available_seats: u32,
    pub total_seats: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetails<V> {
    #[serde(flatten)]
    pub vehicle: V,
    pub routes: Vec<Route>,
}

/// Case-insensitive place matching over three query forms: as typed, first
/// word only, and with parentheses removed. A route matches when both its
/// source and destination contain the same form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceMatcher {
    pairs: Vec<(String, String)>,
}

fn first_word(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}

fn without_parentheses(text: &str) -> String {
    text.chars().filter(|c| *c != '(' && *c != ')').collect()
}

impl PlaceMatcher {
    pub fn new(source: &str, destination: &str) -> Self {
        let (source, destination) = (source.trim(), destination.trim());
        let candidates = [
            (source.to_string(), destination.to_string()),
            (first_word(source).to_string(), first_word(destination).to_string()),
            (without_parentheses(source), without_parentheses(destination)),
        ];

        let mut pairs: Vec<(String, String)> = Vec::with_capacity(candidates.len());
        for (s, d) in candidates {
            let pair = (s.trim().to_lowercase(), d.trim().to_lowercase());
            if pair.0.is_empty() || pair.1.is_empty() || pairs.contains(&pair) {
                continue;
            }
            pairs.push(pair);
        }
        Self { pairs }
    }

    pub fn matches(&self, source: &str, destination: &str) -> bool {
        let (source, destination) = (source.to_lowercase(), destination.to_lowercase());
        self.pairs
            .iter()
            .any(|(s, d)| source.contains(s.as_str()) && destination.contains(d.as_str()))
    }
}

/// Public catalogue reads: featured vehicles, locations, details and route
/// search with live seat counts.
pub struct SearchService {
    repos: Repositories,
    offset: FixedOffset,
}

impl SearchService {
    pub fn new(repos: Repositories, offset: FixedOffset) -> Self {
        Self { repos, offset }
    }

    pub fn featured_limit(requested: Option<usize>, default: usize) -> usize {
        requested.filter(|n| *n > 0).unwrap_or(default).min(MAX_FEATURED_LIMIT)
    }

    pub async fn featured_flights(&self, limit: usize) -> CoreResult<Vec<Flight>> {
        Ok(self.repos.flights.featured_flights(limit).await?)
    }

    pub async fn featured_buses(&self, limit: usize) -> CoreResult<Vec<Bus>> {
        Ok(self.repos.buses.featured_buses(limit).await?)
    }

    /// Sorted, de-duplicated sources and destinations of active routes.
    pub async fn locations(&self, mode: TransportMode) -> CoreResult<Vec<String>> {
        let routes = self.repos.routes.active_routes(mode).await?;
        let places: BTreeSet<String> = routes
            .into_iter()
            .flat_map(|route| [route.source, route.destination])
            .collect();
        Ok(places.into_iter().collect())
    }

    pub async fn flight_details(&self, id: Uuid) -> CoreResult<VehicleDetails<Flight>> {
        let flight = self
            .repos
            .flights
            .get_flight(id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Flight not found".into()))?;
        let routes = self.repos.routes.routes_for_vehicle(id, true).await?;
        Ok(VehicleDetails { vehicle: flight, routes })
    }

    pub async fn bus_details(&self, id: Uuid) -> CoreResult<VehicleDetails<Bus>> {
        let bus = self
            .repos
            .buses
            .get_bus(id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Bus not found".into()))?;
        let routes = self.repos.routes.routes_for_vehicle(id, true).await?;
        Ok(VehicleDetails { vehicle: bus, routes })
    }

    async fn vehicle(&self, mode: TransportMode, id: Uuid) -> CoreResult<Option<Vehicle>> {
        Ok(match mode {
            TransportMode::Flight => self.repos.flights.get_flight(id).await?.map(Vehicle::Flight),
            TransportMode::Bus => self.repos.buses.get_bus(id).await?.map(Vehicle::Bus),
        })
    }

    pub async fn search(&self, mode: TransportMode, query: SearchQuery) -> CoreResult<Vec<SearchResult>> {
        let (source, destination, date) = match (
            query.source.as_deref().map(str::trim).filter(|s| !s.is_empty()),
            query.destination.as_deref().map(str::trim).filter(|s| !s.is_empty()),
            query.date.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        ) {
            (Some(s), Some(d), Some(t)) => (s, d, t),
            _ => {
                return Err(CoreError::Validation(
                    "Please provide source, destination, and date".into(),
                ))
            }
        };

        let class = match query.class.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(name) => Some(lookup(mode, name)?.name),
            None => None,
        };
        let day = TravelDay::parse(date, self.offset)?;
        let matcher = PlaceMatcher::new(source, destination);

        let mut vehicles: HashMap<Uuid, Option<Vehicle>> = HashMap::new();
        let mut results = Vec::new();

        for route in self.repos.routes.active_routes(mode).await? {
            if !matcher.matches(&route.source, &route.destination) || !route.runs_on(day.date()) {
                continue;
            }

            if !vehicles.contains_key(&route.vehicle_id) {
                let vehicle = self.vehicle(mode, route.vehicle_id).await?;
                vehicles.insert(route.vehicle_id, vehicle);
            }
            let Some(Some(vehicle)) = vehicles.get(&route.vehicle_id) else {
                continue;
            };
            if !vehicle.is_active() || class.is_some_and(|c| c != vehicle.class_name()) {
                continue;
            }

            let booked = confirmed_seats(self.repos.bookings.as_ref(), vehicle.id(), route.id, &day).await?;
            let total_seats = vehicle.total_seats();
            results.push(SearchResult {
                id: route.id,
                vehicle: vehicle.summary(),
                available_seats: total_seats.saturating_sub(booked.len() as u32),
                total_seats,
                source: route.source,
                destination: route.destination,
                departure_time: route.departure_time,
                arrival_time: route.arrival_time,
                duration: route.duration,
                price: route.price,
            });
        }

        results.sort_by(|a, b| a.departure_time.cmp(&b.departure_time));
        debug!(%mode, source, destination, date = %day.date(), results = results.len(), "search finished");
        Ok(results)
    }
}
