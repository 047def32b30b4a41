use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use voyra_catalog::TransportMode;

use crate::booking::{Booking, BookingFilter, BookingStatus, PaymentStatus};
use crate::bus::Bus;
use crate::flight::Flight;
use crate::route::Route;
use crate::seat_layout::SeatLayout;
use crate::user::{Role, User};

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;
pub type RepoResult<T> = Result<T, RepoError>;

#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn insert_flight(&self, flight: &Flight) -> RepoResult<()>;

    async fn get_flight(&self, id: Uuid) -> RepoResult<Option<Flight>>;

    async fn find_flight_by_number(&self, flight_number: &str) -> RepoResult<Option<Flight>>;

    async fn update_flight(&self, flight: &Flight) -> RepoResult<()>;

    async fn delete_flight(&self, id: Uuid) -> RepoResult<bool>;

    /// Newest first.
    async fn list_flights(&self) -> RepoResult<Vec<Flight>>;

    /// Active flights, best rated first, then newest.
    async fn featured_flights(&self, limit: usize) -> RepoResult<Vec<Flight>>;

    async fn count_flights(&self) -> RepoResult<u64>;
}

#[async_trait]
pub trait BusRepository: Send + Sync {
    async fn insert_bus(&self, bus: &Bus) -> RepoResult<()>;

    async fn get_bus(&self, id: Uuid) -> RepoResult<Option<Bus>>;

    async fn find_bus_by_number(&self, bus_number: &str) -> RepoResult<Option<Bus>>;

    async fn update_bus(&self, bus: &Bus) -> RepoResult<()>;

    async fn delete_bus(&self, id: Uuid) -> RepoResult<bool>;

    async fn list_buses(&self) -> RepoResult<Vec<Bus>>;

    async fn featured_buses(&self, limit: usize) -> RepoResult<Vec<Bus>>;

    async fn count_buses(&self) -> RepoResult<u64>;
}

#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn insert_route(&self, route: &Route) -> RepoResult<()>;

    async fn get_route(&self, id: Uuid) -> RepoResult<Option<Route>>;

    async fn update_route(&self, route: &Route) -> RepoResult<()>;

    async fn delete_route(&self, id: Uuid) -> RepoResult<bool>;

    async fn delete_routes_for_vehicle(&self, vehicle_id: Uuid) -> RepoResult<u64>;

    /// Newest first, optionally restricted to one mode.
    async fn list_routes(&self, mode: Option<TransportMode>) -> RepoResult<Vec<Route>>;

    async fn routes_for_vehicle(&self, vehicle_id: Uuid, active_only: bool) -> RepoResult<Vec<Route>>;

    async fn active_routes(&self, mode: TransportMode) -> RepoResult<Vec<Route>>;

    async fn count_routes(&self) -> RepoResult<u64>;
}

#[async_trait]
pub trait SeatLayoutRepository: Send + Sync {
    /// Fails if the vehicle already has a layout.
    async fn insert_layout(&self, layout: &SeatLayout) -> RepoResult<()>;

    async fn get_layout(&self, vehicle_id: Uuid) -> RepoResult<Option<SeatLayout>>;

    async fn replace_layout(&self, layout: &SeatLayout) -> RepoResult<()>;

    async fn delete_layout(&self, vehicle_id: Uuid) -> RepoResult<bool>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert_booking(&self, booking: &Booking) -> RepoResult<()>;

    async fn get_booking(&self, id: Uuid) -> RepoResult<Option<Booking>>;

    async fn set_booking_status(
        &self,
        id: Uuid,
        booking_status: BookingStatus,
        payment_status: PaymentStatus,
    ) -> RepoResult<bool>;

    /// Newest first.
    async fn list_bookings(&self, filter: &BookingFilter) -> RepoResult<Vec<Booking>>;

    async fn count_bookings(&self, filter: &BookingFilter) -> RepoResult<u64>;

    /// Sum of `total_amount` over bookings whose payment completed.
    async fn completed_revenue(&self) -> RepoResult<i64>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert_user(&self, user: &User) -> RepoResult<()>;

    async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>>;

    async fn list_users(&self, role: Option<Role>) -> RepoResult<Vec<User>>;

    async fn set_user_active(&self, id: Uuid, is_active: bool) -> RepoResult<Option<User>>;

    async fn count_users(&self, role: Option<Role>) -> RepoResult<u64>;
}

/// Every store the services need, behind trait objects so Postgres and the
/// in-memory store are interchangeable.
#[derive(Clone)]
pub struct Repositories {
    pub flights: Arc<dyn FlightRepository>,
    pub buses: Arc<dyn BusRepository>,
    pub routes: Arc<dyn RouteRepository>,
    pub layouts: Arc<dyn SeatLayoutRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    /// One value implementing every trait, e.g. the in-memory store.
    pub fn from_single<R>(store: Arc<R>) -> Self
    where
        R: FlightRepository
            + BusRepository
            + RouteRepository
            + SeatLayoutRepository
            + BookingRepository
            + UserRepository
            + 'static,
    {
        Self {
            flights: store.clone(),
            buses: store.clone(),
            routes: store.clone(),
            layouts: store.clone(),
            bookings: store.clone(),
            users: store,
        }
    }
}
