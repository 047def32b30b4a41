use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use voyra_catalog::TransportMode;
use voyra_core::booking::{Booking, BookingFilter, BookingStatus, PaymentStatus};
use voyra_core::bus::Bus;
use voyra_core::flight::Flight;
use voyra_core::repository::{
    BookingRepository, BusRepository, FlightRepository, RepoResult, RouteRepository, SeatLayoutRepository,
    UserRepository,
};
use voyra_core::route::Route;
use voyra_core::seat_layout::SeatLayout;
use voyra_core::user::{Role, User};

/// Keeps every collection in process memory. Used by tests and by
/// `storage.backend = "memory"`; nothing survives a restart.
#[derive(Default)]
pub struct InMemoryStore {
    flights: RwLock<HashMap<Uuid, Flight>>,
    buses: RwLock<HashMap<Uuid, Bus>>,
    routes: RwLock<HashMap<Uuid, Route>>,
    // Keyed by vehicle id.
    layouts: RwLock<HashMap<Uuid, SeatLayout>>,
    bookings: RwLock<HashMap<Uuid, Booking>>,
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn missing(what: &str, id: Uuid) -> Box<dyn std::error::Error + Send + Sync> {
    format!("{} {} does not exist", what, id).into()
}

fn by_rating<T>(items: &mut [T], rating: impl Fn(&T) -> f64, created: impl Fn(&T) -> chrono::DateTime<chrono::Utc>) {
    items.sort_by(|a, b| {
        rating(b)
            .total_cmp(&rating(a))
            .then_with(|| created(b).cmp(&created(a)))
    });
}

#[async_trait]
impl FlightRepository for InMemoryStore {
    async fn insert_flight(&self, flight: &Flight) -> RepoResult<()> {
        let mut flights = self.flights.write().await;
        if flights.values().any(|f| f.flight_number == flight.flight_number) {
            return Err(format!("flight number {} already exists", flight.flight_number).into());
        }
        flights.insert(flight.id, flight.clone());
        Ok(())
    }

    async fn get_flight(&self, id: Uuid) -> RepoResult<Option<Flight>> {
        Ok(self.flights.read().await.get(&id).cloned())
    }

    async fn find_flight_by_number(&self, flight_number: &str) -> RepoResult<Option<Flight>> {
        let flights = self.flights.read().await;
        Ok(flights.values().find(|f| f.flight_number == flight_number).cloned())
    }

    async fn update_flight(&self, flight: &Flight) -> RepoResult<()> {
        let mut flights = self.flights.write().await;
        let slot = flights.get_mut(&flight.id).ok_or_else(|| missing("flight", flight.id))?;
        *slot = flight.clone();
        Ok(())
    }

    async fn delete_flight(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.flights.write().await.remove(&id).is_some())
    }

    async fn list_flights(&self) -> RepoResult<Vec<Flight>> {
        let mut flights: Vec<Flight> = self.flights.read().await.values().cloned().collect();
        flights.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(flights)
    }

    async fn featured_flights(&self, limit: usize) -> RepoResult<Vec<Flight>> {
        let mut flights: Vec<Flight> = self
            .flights
            .read()
            .await
            .values()
            .filter(|f| f.is_active)
            .cloned()
            .collect();
        by_rating(&mut flights, |f| f.rating, |f| f.created_at);
        flights.truncate(limit);
        Ok(flights)
    }

    async fn count_flights(&self) -> RepoResult<u64> {
        Ok(self.flights.read().await.len() as u64)
    }
}

#[async_trait]
impl BusRepository for InMemoryStore {
    async fn insert_bus(&self, bus: &Bus) -> RepoResult<()> {
        let mut buses = self.buses.write().await;
        if buses.values().any(|b| b.bus_number == bus.bus_number) {
            return Err(format!("bus number {} already exists", bus.bus_number).into());
        }
        buses.insert(bus.id, bus.clone());
        Ok(())
    }

    async fn get_bus(&self, id: Uuid) -> RepoResult<Option<Bus>> {
        Ok(self.buses.read().await.get(&id).cloned())
    }

    async fn find_bus_by_number(&self, bus_number: &str) -> RepoResult<Option<Bus>> {
        let buses = self.buses.read().await;
        Ok(buses.values().find(|b| b.bus_number == bus_number).cloned())
    }

    async fn update_bus(&self, bus: &Bus) -> RepoResult<()> {
        let mut buses = self.buses.write().await;
        let slot = buses.get_mut(&bus.id).ok_or_else(|| missing("bus", bus.id))?;
        *slot = bus.clone();
        Ok(())
    }

    async fn delete_bus(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.buses.write().await.remove(&id).is_some())
    }

    async fn list_buses(&self) -> RepoResult<Vec<Bus>> {
        let mut buses: Vec<Bus> = self.buses.read().await.values().cloned().collect();
        buses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(buses)
    }

    async fn featured_buses(&self, limit: usize) -> RepoResult<Vec<Bus>> {
        let mut buses: Vec<Bus> = self
            .buses
            .read()
            .await
            .values()
            .filter(|b| b.is_active)
            .cloned()
            .collect();
        by_rating(&mut buses, |b| b.rating, |b| b.created_at);
        buses.truncate(limit);
        Ok(buses)
    }

    async fn count_buses(&self) -> RepoResult<u64> {
        Ok(self.buses.read().await.len() as u64)
    }
}

#[async_trait]
impl RouteRepository for InMemoryStore {
    async fn insert_route(&self, route: &Route) -> RepoResult<()> {
        self.routes.write().await.insert(route.id, route.clone());
        Ok(())
    }

    async fn get_route(&self, id: Uuid) -> RepoResult<Option<Route>> {
        Ok(self.routes.read().await.get(&id).cloned())
    }

    async fn update_route(&self, route: &Route) -> RepoResult<()> {
        let mut routes = self.routes.write().await;
        let slot = routes.get_mut(&route.id).ok_or_else(|| missing("route", route.id))?;
        *slot = route.clone();
        Ok(())
    }

    async fn delete_route(&self, id: Uuid) -> RepoResult<bool> {
        Ok(self.routes.write().await.remove(&id).is_some())
    }

    async fn delete_routes_for_vehicle(&self, vehicle_id: Uuid) -> RepoResult<u64> {
        let mut routes = self.routes.write().await;
        let before = routes.len();
        routes.retain(|_, r| r.vehicle_id != vehicle_id);
        Ok((before - routes.len()) as u64)
    }

    async fn list_routes(&self, mode: Option<TransportMode>) -> RepoResult<Vec<Route>> {
        let mut routes: Vec<Route> = self
            .routes
            .read()
            .await
            .values()
            .filter(|r| mode.map_or(true, |m| r.mode == m))
            .cloned()
            .collect();
        routes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(routes)
    }

    async fn routes_for_vehicle(&self, vehicle_id: Uuid, active_only: bool) -> RepoResult<Vec<Route>> {
        let mut routes: Vec<Route> = self
            .routes
            .read()
            .await
            .values()
            .filter(|r| r.vehicle_id == vehicle_id && (r.is_active || !active_only))
            .cloned()
            .collect();
        routes.sort_by(|a, b| a.departure_time.cmp(&b.departure_time));
        Ok(routes)
    }

    async fn active_routes(&self, mode: TransportMode) -> RepoResult<Vec<Route>> {
        let mut routes: Vec<Route> = self
            .routes
            .read()
            .await
            .values()
            .filter(|r| r.mode == mode && r.is_active)
            .cloned()
            .collect();
        routes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(routes)
    }

    async fn count_routes(&self) -> RepoResult<u64> {
        Ok(self.routes.read().await.len() as u64)
    }
}

#[async_trait]
impl SeatLayoutRepository for InMemoryStore {
    async fn insert_layout(&self, layout: &SeatLayout) -> RepoResult<()> {
        let mut layouts = self.layouts.write().await;
        if layouts.contains_key(&layout.vehicle_id) {
            return Err(format!("vehicle {} already has a seat layout", layout.vehicle_id).into());
        }
        layouts.insert(layout.vehicle_id, layout.clone());
        Ok(())
    }

    async fn get_layout(&self, vehicle_id: Uuid) -> RepoResult<Option<SeatLayout>> {
        Ok(self.layouts.read().await.get(&vehicle_id).cloned())
    }

    async fn replace_layout(&self, layout: &SeatLayout) -> RepoResult<()> {
        let mut layouts = self.layouts.write().await;
        let slot = layouts
            .get_mut(&layout.vehicle_id)
            .ok_or_else(|| missing("seat layout for vehicle", layout.vehicle_id))?;
        *slot = layout.clone();
        Ok(())
    }

    async fn delete_layout(&self, vehicle_id: Uuid) -> RepoResult<bool> {
        Ok(self.layouts.write().await.remove(&vehicle_id).is_some())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn insert_booking(&self, booking: &Booking) -> RepoResult<()> {
        self.bookings.write().await.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn get_booking(&self, id: Uuid) -> RepoResult<Option<Booking>> {
        Ok(self.bookings.read().await.get(&id).cloned())
    }

    async fn set_booking_status(
        &self,
        id: Uuid,
        booking_status: BookingStatus,
        payment_status: PaymentStatus,
    ) -> RepoResult<bool> {
        let mut bookings = self.bookings.write().await;
        Ok(match bookings.get_mut(&id) {
            Some(booking) => {
                booking.booking_status = booking_status;
                booking.payment_status = payment_status;
                true
            }
            None => false,
        })
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> RepoResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .read()
            .await
            .values()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn count_bookings(&self, filter: &BookingFilter) -> RepoResult<u64> {
        let bookings = self.bookings.read().await;
        Ok(bookings.values().filter(|b| filter.matches(b)).count() as u64)
    }

    async fn completed_revenue(&self) -> RepoResult<i64> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .values()
            .filter(|b| b.payment_status == PaymentStatus::Completed)
            .map(|b| b.total_amount)
            .sum())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert_user(&self, user: &User) -> RepoResult<()> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err("email already registered".into());
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn list_users(&self, role: Option<Role>) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|u| role.map_or(true, |r| u.role == r))
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn set_user_active(&self, id: Uuid, is_active: bool) -> RepoResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            user.is_active = is_active;
            user.clone()
        }))
    }

    async fn count_users(&self, role: Option<Role>) -> RepoResult<u64> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| role.map_or(true, |r| u.role == r)).count() as u64)
    }
}
