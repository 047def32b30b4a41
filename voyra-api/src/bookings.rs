use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::Utc;
use uuid::Uuid;
use voyra_core::booking::{Booking, NewBooking};
use voyra_shared::Envelope;

use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::{user_auth_middleware, Claims};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/mine", get(my_bookings))
        .route("/api/bookings/{id}/cancel", put(cancel_booking))
        .route_layer(middleware::from_fn_with_state(state, user_auth_middleware))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(req): ApiJson<NewBooking>,
) -> Result<(StatusCode, Json<Envelope<Booking>>), AppError> {
    let booking = state.seating.book(claims.sub, req, Utc::now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(booking).with_message("Booking confirmed")),
    ))
}

async fn my_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Envelope<Vec<Booking>>>, AppError> {
    let bookings = state.seating.bookings_for_user(claims.sub).await?;
    Ok(Json(Envelope::list(bookings)))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Envelope<Booking>>, AppError> {
    let booking = state.seating.cancel(id, claims.sub, claims.is_admin()).await?;
    Ok(Json(Envelope::data(booking).with_message("Booking cancelled successfully")))
}
