use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use voyra_catalog::TransportMode;
use voyra_core::booking::Booking;
use voyra_core::bus::{Bus, BusUpdate, NewBus};
use voyra_core::flight::{Flight, FlightUpdate, NewFlight};
use voyra_core::route::{NewRoute, Route, RouteUpdate};
use voyra_core::seat_layout::{NewSeatLayout, RegenerateLayout, SeatLayout, SeatLayoutUpdate};
use voyra_core::seating::BookingQuery;
use voyra_core::stats::DashboardStats;
use voyra_core::user::User;
use voyra_shared::Envelope;

use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::admin_auth_middleware;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightCreated {
    pub flight: Flight,
    pub seat_layout: SeatLayout,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusCreated {
    pub bus: Bus,
    pub seat_layout: SeatLayout,
}

#[derive(Debug, Default, Deserialize)]
pub struct RouteListQuery {
    pub mode: Option<TransportMode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusRequest {
    pub is_active: bool,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admin/flights", get(list_flights).post(add_flight))
        .route("/api/admin/flights/{id}", put(update_flight).delete(delete_flight))
        .route("/api/admin/buses", get(list_buses).post(add_bus))
        .route("/api/admin/buses/{id}", put(update_bus).delete(delete_bus))
        .route("/api/admin/routes", get(list_routes).post(add_route))
        .route("/api/admin/routes/{id}", put(update_route).delete(delete_route))
        .route("/api/admin/seat-layouts", post(create_seat_layout))
        .route("/api/admin/seat-layouts/{vehicle_id}", put(update_seat_layout))
        .route("/api/admin/seat-layouts/{vehicle_id}/regenerate", post(regenerate_seat_layout))
        .route("/api/admin/bookings", get(list_bookings))
        .route("/api/admin/stats", get(dashboard_stats))
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/{id}", put(set_user_status))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}

// ============================================================================
// Flights
// ============================================================================

async fn list_flights(State(state): State<AppState>) -> Result<Json<Envelope<Vec<Flight>>>, AppError> {
    Ok(Json(Envelope::list(state.fleet.list_flights().await?)))
}

async fn add_flight(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewFlight>,
) -> Result<(StatusCode, Json<Envelope<FlightCreated>>), AppError> {
    let (flight, seat_layout) = state.fleet.add_flight(req, Utc::now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(FlightCreated { flight, seat_layout }).with_message("Flight added successfully")),
    ))
}

async fn update_flight(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<FlightUpdate>,
) -> Result<Json<Envelope<Flight>>, AppError> {
    let flight = state.fleet.update_flight(id, req, Utc::now()).await?;
    Ok(Json(Envelope::data(flight).with_message("Flight updated successfully")))
}

async fn delete_flight(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Envelope<()>>, AppError> {
    state.fleet.delete_flight(id, Utc::now()).await?;
    Ok(Json(Envelope::message("Flight deleted successfully")))
}

// ============================================================================
// Buses
// ============================================================================

async fn list_buses(State(state): State<AppState>) -> Result<Json<Envelope<Vec<Bus>>>, AppError> {
    Ok(Json(Envelope::list(state.fleet.list_buses().await?)))
}

async fn add_bus(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewBus>,
) -> Result<(StatusCode, Json<Envelope<BusCreated>>), AppError> {
    let (bus, seat_layout) = state.fleet.add_bus(req, Utc::now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(BusCreated { bus, seat_layout }).with_message("Bus added successfully")),
    ))
}

async fn update_bus(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<BusUpdate>,
) -> Result<Json<Envelope<Bus>>, AppError> {
    let bus = state.fleet.update_bus(id, req, Utc::now()).await?;
    Ok(Json(Envelope::data(bus).with_message("Bus updated successfully")))
}

async fn delete_bus(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<Envelope<()>>, AppError> {
    state.fleet.delete_bus(id, Utc::now()).await?;
    Ok(Json(Envelope::message("Bus deleted successfully")))
}

// ============================================================================
// Routes
// ============================================================================

async fn list_routes(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RouteListQuery>,
) -> Result<Json<Envelope<Vec<Route>>>, AppError> {
    Ok(Json(Envelope::list(state.fleet.list_routes(query.mode).await?)))
}

async fn add_route(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewRoute>,
) -> Result<(StatusCode, Json<Envelope<Route>>), AppError> {
    let route = state.fleet.add_route(req, Utc::now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(route).with_message("Route added successfully")),
    ))
}

async fn update_route(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<RouteUpdate>,
) -> Result<Json<Envelope<Route>>, AppError> {
    let route = state.fleet.update_route(id, req).await?;
    Ok(Json(Envelope::data(route).with_message("Route updated successfully")))
}

async fn delete_route(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<Envelope<()>>, AppError> {
    state.fleet.delete_route(id, Utc::now()).await?;
    Ok(Json(Envelope::message("Route deleted successfully")))
}

// ============================================================================
// Seat layouts
// ============================================================================

async fn create_seat_layout(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewSeatLayout>,
) -> Result<(StatusCode, Json<Envelope<SeatLayout>>), AppError> {
    let layout = state.fleet.create_seat_layout(req, Utc::now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(layout).with_message("Seat layout created successfully")),
    ))
}

async fn update_seat_layout(
    State(state): State<AppState>,
    ApiPath(vehicle_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<SeatLayoutUpdate>,
) -> Result<Json<Envelope<SeatLayout>>, AppError> {
    let layout = state.fleet.update_seat_layout(vehicle_id, req, Utc::now()).await?;
    Ok(Json(Envelope::data(layout).with_message("Seat layout updated successfully")))
}

/// The body is optional; an empty one regenerates the current class.
async fn regenerate_seat_layout(
    State(state): State<AppState>,
    ApiPath(vehicle_id): ApiPath<Uuid>,
    body: Bytes,
) -> Result<Json<Envelope<SeatLayout>>, AppError> {
    let req: RegenerateLayout = if body.iter().all(u8::is_ascii_whitespace) {
        RegenerateLayout::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::ValidationError(e.to_string()))?
    };
    let layout = state
        .fleet
        .regenerate_seat_layout(vehicle_id, req.class, Utc::now())
        .await?;
    Ok(Json(Envelope::data(layout).with_message("Seat layout regenerated successfully")))
}

// ============================================================================
// Bookings, stats and users
// ============================================================================

async fn list_bookings(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BookingQuery>,
) -> Result<Json<Envelope<Vec<Booking>>>, AppError> {
    Ok(Json(Envelope::list(state.seating.list_bookings(query).await?)))
}

async fn dashboard_stats(State(state): State<AppState>) -> Result<Json<Envelope<DashboardStats>>, AppError> {
    Ok(Json(Envelope::data(state.stats.dashboard().await?)))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Envelope<Vec<User>>>, AppError> {
    Ok(Json(Envelope::list(state.users.travellers().await?)))
}

async fn set_user_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UserStatusRequest>,
) -> Result<Json<Envelope<User>>, AppError> {
    let user = state.users.set_active(id, req.is_active).await?;
    let message = if user.is_active {
        "User activated successfully"
    } else {
        "User deactivated successfully"
    };
    Ok(Json(Envelope::data(user).with_message(message)))
}
