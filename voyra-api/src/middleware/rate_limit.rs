use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

/// Fixed-window limit per client IP. Fails open when Redis is unreachable.
pub async fn rate_limit_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(limiter) = state.rate_limiter.as_ref() else {
        return next.run(req).await;
    };

    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".into());
    let key = format!("ratelimit:{}", ip);

    match limiter
        .redis
        .check_rate_limit(&key, limiter.limit, limiter.window_seconds)
        .await
    {
        Ok(true) => next.run(req).await,
        Ok(false) => {
            warn!(%ip, "rate limit exceeded");
            AppError::RateLimitError("Too many requests, please try again later".into()).into_response()
        }
        Err(e) => {
            warn!(error = %e, "rate limiter unavailable, allowing request");
            next.run(req).await
        }
    }
}
