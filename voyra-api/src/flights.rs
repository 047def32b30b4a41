use axum::{extract::State, routing::get, Json, Router};
use uuid::Uuid;
use voyra_catalog::{AvailabilityView, TransportMode};
use voyra_core::flight::Flight;
use voyra_core::search::{SearchQuery, SearchResult, VehicleDetails};
use voyra_shared::Envelope;

use crate::catalog::{self, ClassInfo, FeaturedQuery, SeatQuery};
use crate::error::AppError;
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/flights", get(featured_flights))
        .route("/api/flights/classes", get(flight_classes))
        .route("/api/flights/locations", get(flight_locations))
        .route("/api/flights/search", get(search_flights))
        .route("/api/flights/{id}", get(flight_details))
        .route("/api/flights/{id}/seats", get(flight_seats))
}

async fn featured_flights(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<FeaturedQuery>,
) -> Result<Json<Envelope<Vec<Flight>>>, AppError> {
    let flights = state.search.featured_flights(query.limit(&state)).await?;
    Ok(Json(Envelope::list(flights)))
}

async fn flight_classes() -> Result<Json<Envelope<Vec<ClassInfo>>>, AppError> {
    catalog::classes(TransportMode::Flight)
}

async fn flight_locations(State(state): State<AppState>) -> Result<Json<Envelope<Vec<String>>>, AppError> {
    catalog::locations(&state, TransportMode::Flight).await
}

async fn search_flights(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Envelope<Vec<SearchResult>>>, AppError> {
    catalog::search(&state, TransportMode::Flight, query).await
}

async fn flight_details(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Envelope<VehicleDetails<Flight>>>, AppError> {
    let details = state.search.flight_details(id).await?;
    Ok(Json(Envelope::data(details)))
}

async fn flight_seats(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<SeatQuery>,
) -> Result<Json<Envelope<AvailabilityView>>, AppError> {
    catalog::seats(&state, TransportMode::Flight, id, query).await
}
