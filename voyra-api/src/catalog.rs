//! Handlers shared by the public flight and bus endpoints.

use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use voyra_catalog::{class_names, lookup, AvailabilityView, TransportMode};
use voyra_core::search::{SearchQuery, SearchResult, SearchService};
use voyra_shared::Envelope;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
}

impl FeaturedQuery {
    pub fn limit(&self, state: &AppState) -> usize {
        SearchService::featured_limit(self.limit, state.featured_limit)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatQuery {
    pub route_id: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub name: &'static str,
    pub layout: &'static str,
    pub total_seats: u32,
}

pub fn classes(mode: TransportMode) -> Result<Json<Envelope<Vec<ClassInfo>>>, AppError> {
    let classes = class_names(mode)
        .into_iter()
        .map(|name| {
            lookup(mode, name).map(|d| ClassInfo {
                name: d.name,
                layout: d.label,
                total_seats: d.total_seats,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(Envelope::list(classes)))
}

pub async fn locations(state: &AppState, mode: TransportMode) -> Result<Json<Envelope<Vec<String>>>, AppError> {
    let places = state.search.locations(mode).await?;
    Ok(Json(Envelope::list(places)))
}

pub async fn search(
    state: &AppState,
    mode: TransportMode,
    query: SearchQuery,
) -> Result<Json<Envelope<Vec<SearchResult>>>, AppError> {
    let results = state.search.search(mode, query).await?;
    Ok(Json(Envelope::list(results)))
}

pub async fn seats(
    state: &AppState,
    mode: TransportMode,
    vehicle_id: Uuid,
    query: SeatQuery,
) -> Result<Json<Envelope<AvailabilityView>>, AppError> {
    let (route_id, date) = match (
        query.route_id.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        query.date.as_deref().map(str::trim).filter(|s| !s.is_empty()),
    ) {
        (Some(route_id), Some(date)) => (route_id, date),
        _ => return Err(AppError::ValidationError("Please provide routeId and date".into())),
    };
    let route_id = Uuid::parse_str(route_id)
        .map_err(|_| AppError::ValidationError(format!("Invalid routeId: {}", route_id)))?;

    let view = state.seating.availability(mode, vehicle_id, route_id, date).await?;
    Ok(Json(Envelope::data(view)))
}
