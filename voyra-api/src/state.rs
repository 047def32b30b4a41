use chrono::FixedOffset;
use std::sync::Arc;
use voyra_core::{FleetService, Repositories, SearchService, SeatingService, StatsService, UserDirectory};
use voyra_store::app_config::{BookingConfig, RateLimitConfig};
use voyra_store::RedisClient;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
}

#[derive(Clone)]
pub struct RateLimiter {
    pub redis: Arc<RedisClient>,
    pub limit: i64,
    pub window_seconds: i64,
}

impl RateLimiter {
    pub fn new(redis: RedisClient, config: &RateLimitConfig) -> Self {
        Self {
            redis: Arc::new(redis),
            limit: config.requests_per_window,
            window_seconds: config.window_seconds,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub fleet: Arc<FleetService>,
    pub seating: Arc<SeatingService>,
    pub search: Arc<SearchService>,
    pub stats: Arc<StatsService>,
    pub users: Arc<UserDirectory>,
    pub auth: AuthConfig,
    pub featured_limit: usize,
    /// `None` disables rate limiting.
    pub rate_limiter: Option<RateLimiter>,
}

impl AppState {
    pub fn new(repos: Repositories, auth: AuthConfig, offset: FixedOffset, booking: &BookingConfig) -> Self {
        Self {
            fleet: Arc::new(FleetService::new(repos.clone())),
            seating: Arc::new(SeatingService::new(repos.clone(), offset, booking.max_seats_per_booking)),
            search: Arc::new(SearchService::new(repos.clone(), offset)),
            stats: Arc::new(StatsService::new(repos.clone())),
            users: Arc::new(UserDirectory::new(repos.users)),
            auth,
            featured_limit: booking.featured_limit,
            rate_limiter: None,
        }
    }

    pub fn with_rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }
}
