use axum::{extract::State, routing::get, Json, Router};
use uuid::Uuid;
use voyra_catalog::{AvailabilityView, TransportMode};
use voyra_core::bus::Bus;
use voyra_core::search::{SearchQuery, SearchResult, VehicleDetails};
use voyra_shared::Envelope;

use crate::catalog::{self, ClassInfo, FeaturedQuery, SeatQuery};
use crate::error::AppError;
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/buses", get(featured_buses))
        .route("/api/buses/classes", get(bus_classes))
        .route("/api/buses/locations", get(bus_locations))
        .route("/api/buses/search", get(search_buses))
        .route("/api/buses/{id}", get(bus_details))
        .route("/api/buses/{id}/seats", get(bus_seats))
}

async fn featured_buses(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<FeaturedQuery>,
) -> Result<Json<Envelope<Vec<Bus>>>, AppError> {
    let buses = state.search.featured_buses(query.limit(&state)).await?;
    Ok(Json(Envelope::list(buses)))
}

async fn bus_classes() -> Result<Json<Envelope<Vec<ClassInfo>>>, AppError> {
    catalog::classes(TransportMode::Bus)
}

async fn bus_locations(State(state): State<AppState>) -> Result<Json<Envelope<Vec<String>>>, AppError> {
    catalog::locations(&state, TransportMode::Bus).await
}

async fn search_buses(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Envelope<Vec<SearchResult>>>, AppError> {
    catalog::search(&state, TransportMode::Bus, query).await
}

async fn bus_details(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Envelope<VehicleDetails<Bus>>>, AppError> {
    let details = state.search.bus_details(id).await?;
    Ok(Json(Envelope::data(details)))
}

async fn bus_seats(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<SeatQuery>,
) -> Result<Json<Envelope<AvailabilityView>>, AppError> {
    catalog::seats(&state, TransportMode::Bus, id, query).await
}
