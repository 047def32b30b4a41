pub mod app_config;
pub mod booking_repo;
pub mod bus_repo;
pub mod database;
pub mod flight_repo;
pub mod memory;
pub mod redis_repo;
pub mod route_repo;
pub mod seat_layout_repo;
pub mod user_repo;

use sqlx::PgPool;
use std::str::FromStr;
use std::sync::Arc;
use voyra_core::repository::{RepoError, RepoResult};
use voyra_core::Repositories;

pub use app_config::Config;
pub use database::DbClient;
pub use memory::InMemoryStore;
pub use redis_repo::RedisClient;

/// Postgres-backed repositories sharing one pool.
pub fn pg_repositories(pool: PgPool) -> Repositories {
    Repositories {
        flights: Arc::new(flight_repo::PgFlightRepository::new(pool.clone())),
        buses: Arc::new(bus_repo::PgBusRepository::new(pool.clone())),
        routes: Arc::new(route_repo::PgRouteRepository::new(pool.clone())),
        layouts: Arc::new(seat_layout_repo::PgSeatLayoutRepository::new(pool.clone())),
        bookings: Arc::new(booking_repo::PgBookingRepository::new(pool.clone())),
        users: Arc::new(user_repo::PgUserRepository::new(pool)),
    }
}

pub(crate) fn texts<T: ToString>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

pub(crate) fn parse_texts<T>(items: &[String]) -> RepoResult<Vec<T>>
where
    T: FromStr,
    T::Err: Into<RepoError>,
{
    items.iter().map(|s| s.parse::<T>().map_err(Into::into)).collect()
}

pub(crate) fn convert_rows<R, T>(rows: Vec<R>) -> RepoResult<Vec<T>>
where
    T: TryFrom<R, Error = RepoError>,
{
    rows.into_iter().map(T::try_from).collect()
}
