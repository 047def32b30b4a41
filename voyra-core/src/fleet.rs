use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;
use voyra_catalog::{BusSeatType, CabinClass, SeatClass, SeatMap, TransportMode};

use crate::booking::{BookingFilter, BookingStatus};
use crate::bus::{Bus, BusUpdate, NewBus};
use crate::flight::{Flight, FlightUpdate, NewFlight};
use crate::repository::Repositories;
use crate::route::{NewRoute, Route, RouteUpdate};
use crate::seat_layout::{NewSeatLayout, SeatLayout, SeatLayoutUpdate};
use crate::vehicle::Vehicle;
use crate::{CoreError, CoreResult};

/// Generates the registry map for a class. A failure here means a static
/// descriptor is inconsistent, which is a bug rather than bad input.
fn registry_map<C: SeatClass>(class: C) -> CoreResult<SeatMap> {
    class.descriptor().generate().map_err(|err| {
        error!(class = class.name(), error = %err, "seat map generation failed");
        CoreError::Internal(format!("seat map for {} could not be generated", class.name()))
    })
}

fn resolve_class<C: SeatClass>(current: C, requested: Option<&str>) -> CoreResult<C> {
    match requested {
        Some(name) => Ok(C::parse(name)?),
        None => Ok(current),
    }
}

/// Admin operations on flights, buses, routes and seat layouts.
pub struct FleetService {
    repos: Repositories,
}

impl FleetService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn list_flights(&self) -> CoreResult<Vec<Flight>> {
        Ok(self.repos.flights.list_flights().await?)
    }

    /// Creates the flight and its seat layout from the class registry.
    pub async fn add_flight(&self, input: NewFlight, now: DateTime<Utc>) -> CoreResult<(Flight, SeatLayout)> {
        let class = CabinClass::parse(&input.class)?;
        let map = registry_map(class)?;
        let flight = input.into_flight(class, map.total_seats(), now)?;

        if self.repos.flights.find_flight_by_number(&flight.flight_number).await?.is_some() {
            return Err(CoreError::Conflict(format!(
                "Flight number {} already exists",
                flight.flight_number
            )));
        }

        self.repos.flights.insert_flight(&flight).await?;
        let layout = SeatLayout::new(flight.id, TransportMode::Flight, map, now);
        if let Err(err) = self.repos.layouts.insert_layout(&layout).await {
            warn!(flight_id = %flight.id, error = %err, "seat layout insert failed, removing flight");
            self.repos.flights.delete_flight(flight.id).await?;
            return Err(err.into());
        }

        info!(
            flight_id = %flight.id,
            flight_number = %flight.flight_number,
            class = %flight.class,
            seats = flight.total_seats,
            "flight added"
        );
        Ok((flight, layout))
    }

    pub async fn update_flight(&self, id: Uuid, update: FlightUpdate, now: DateTime<Utc>) -> CoreResult<Flight> {
        let mut flight = self
            .repos
            .flights
            .get_flight(id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Flight not found".into()))?;

        update.apply(&mut flight, now)?;
        if let Some(other) = self.repos.flights.find_flight_by_number(&flight.flight_number).await? {
            if other.id != id {
                return Err(CoreError::Conflict(format!(
                    "Flight number {} already exists",
                    flight.flight_number
                )));
            }
        }

        self.repos.flights.update_flight(&flight).await?;
        info!(flight_id = %id, "flight updated");
        Ok(flight)
    }

    /// Removes the flight with its routes and seat layout.
    pub async fn delete_flight(&self, id: Uuid, now: DateTime<Utc>) -> CoreResult<()> {
        if self.repos.flights.get_flight(id).await?.is_none() {
            return Err(CoreError::NotFound("Flight not found".into()));
        }
        self.ensure_no_upcoming(
            BookingFilter {
                vehicle_id: Some(id),
                ..Default::default()
            },
            now,
            "Cannot delete flight with active bookings",
        )
        .await?;

        let routes = self.repos.routes.delete_routes_for_vehicle(id).await?;
        self.repos.layouts.delete_layout(id).await?;
        self.repos.flights.delete_flight(id).await?;
        info!(flight_id = %id, routes, "flight deleted");
        Ok(())
    }

    pub async fn list_buses(&self) -> CoreResult<Vec<Bus>> {
        Ok(self.repos.buses.list_buses().await?)
    }

    pub async fn add_bus(&self, input: NewBus, now: DateTime<Utc>) -> CoreResult<(Bus, SeatLayout)> {
        let seat_type = BusSeatType::parse(&input.seat_type)?;
        let map = registry_map(seat_type)?;
        let bus = input.into_bus(seat_type, map.total_seats(), now)?;

        if self.repos.buses.find_bus_by_number(&bus.bus_number).await?.is_some() {
            return Err(CoreError::Conflict(format!("Bus number {} already exists", bus.bus_number)));
        }

        self.repos.buses.insert_bus(&bus).await?;
        let layout = SeatLayout::new(bus.id, TransportMode::Bus, map, now);
        if let Err(err) = self.repos.layouts.insert_layout(&layout).await {
            warn!(bus_id = %bus.id, error = %err, "seat layout insert failed, removing bus");
            self.repos.buses.delete_bus(bus.id).await?;
            return Err(err.into());
        }

        info!(
            bus_id = %bus.id,
            bus_number = %bus.bus_number,
            seat_type = %bus.seat_type,
            seats = bus.total_seats,
            "bus added"
        );
        Ok((bus, layout))
    }

    pub async fn update_bus(&self, id: Uuid, update: BusUpdate, now: DateTime<Utc>) -> CoreResult<Bus> {
        let mut bus = self
            .repos
            .buses
            .get_bus(id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Bus not found".into()))?;

        update.apply(&mut bus, now)?;
        if let Some(other) = self.repos.buses.find_bus_by_number(&bus.bus_number).await? {
            if other.id != id {
                return Err(CoreError::Conflict(format!("Bus number {} already exists", bus.bus_number)));
            }
        }

        self.repos.buses.update_bus(&bus).await?;
        info!(bus_id = %id, "bus updated");
        Ok(bus)
    }

    pub async fn delete_bus(&self, id: Uuid, now: DateTime<Utc>) -> CoreResult<()> {
        if self.repos.buses.get_bus(id).await?.is_none() {
            return Err(CoreError::NotFound("Bus not found".into()));
        }
        self.ensure_no_upcoming(
            BookingFilter {
                vehicle_id: Some(id),
                ..Default::default()
            },
            now,
            "Cannot delete bus with active bookings",
        )
        .await?;

        let routes = self.repos.routes.delete_routes_for_vehicle(id).await?;
        self.repos.layouts.delete_layout(id).await?;
        self.repos.buses.delete_bus(id).await?;
        info!(bus_id = %id, routes, "bus deleted");
        Ok(())
    }

    pub async fn vehicle(&self, mode: TransportMode, id: Uuid) -> CoreResult<Option<Vehicle>> {
        Ok(match mode {
            TransportMode::Flight => self.repos.flights.get_flight(id).await?.map(Vehicle::Flight),
            TransportMode::Bus => self.repos.buses.get_bus(id).await?.map(Vehicle::Bus),
        })
    }

    /// Looks the id up as a flight first, then as a bus.
    pub async fn find_vehicle(&self, id: Uuid) -> CoreResult<Option<Vehicle>> {
        if let Some(vehicle) = self.vehicle(TransportMode::Flight, id).await? {
            return Ok(Some(vehicle));
        }
        self.vehicle(TransportMode::Bus, id).await
    }

    pub async fn list_routes(&self, mode: Option<TransportMode>) -> CoreResult<Vec<Route>> {
        Ok(self.repos.routes.list_routes(mode).await?)
    }

    pub async fn add_route(&self, input: NewRoute, now: DateTime<Utc>) -> CoreResult<Route> {
        let mode = input.mode;
        if self.vehicle(mode, input.vehicle_id).await?.is_none() {
            return Err(CoreError::NotFound(match mode {
                TransportMode::Flight => "Flight not found".into(),
                TransportMode::Bus => "Bus not found".into(),
            }));
        }

        let route = input.into_route(now)?;
        self.repos.routes.insert_route(&route).await?;
        info!(
            route_id = %route.id,
            vehicle_id = %route.vehicle_id,
            source = %route.source,
            destination = %route.destination,
            "route added"
        );
        Ok(route)
    }

    pub async fn update_route(&self, id: Uuid, update: RouteUpdate) -> CoreResult<Route> {
        let mut route = self
            .repos
            .routes
            .get_route(id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Route not found".into()))?;

        update.apply(&mut route)?;
        self.repos.routes.update_route(&route).await?;
        info!(route_id = %id, "route updated");
        Ok(route)
    }

    pub async fn delete_route(&self, id: Uuid, now: DateTime<Utc>) -> CoreResult<()> {
        if self.repos.routes.get_route(id).await?.is_none() {
            return Err(CoreError::NotFound("Route not found".into()));
        }
        self.ensure_no_upcoming(
            BookingFilter {
                route_id: Some(id),
                ..Default::default()
            },
            now,
            "Cannot delete route with active bookings",
        )
        .await?;

        self.repos.routes.delete_route(id).await?;
        info!(route_id = %id, "route deleted");
        Ok(())
    }

    /// Stores a hand-built layout for a vehicle that has none.
    pub async fn create_seat_layout(&self, input: NewSeatLayout, now: DateTime<Utc>) -> CoreResult<SeatLayout> {
        let vehicle = self
            .find_vehicle(input.vehicle_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Vehicle not found".into()))?;

        if self.repos.layouts.get_layout(vehicle.id()).await?.is_some() {
            return Err(CoreError::Conflict(format!(
                "Seat layout already exists for this {}",
                vehicle.mode()
            )));
        }

        let map = SeatMap::new(input.layout, vehicle.total_seats(), input.seats)?;
        let layout = SeatLayout::new(vehicle.id(), vehicle.mode(), map, now);
        self.repos.layouts.insert_layout(&layout).await?;
        info!(vehicle_id = %layout.vehicle_id, seats = layout.map.total_seats(), "seat layout created");
        Ok(layout)
    }

    /// Administrative correction of an existing layout's label or seats.
    pub async fn update_seat_layout(
        &self,
        vehicle_id: Uuid,
        update: SeatLayoutUpdate,
        now: DateTime<Utc>,
    ) -> CoreResult<SeatLayout> {
        let vehicle = self
            .find_vehicle(vehicle_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Vehicle not found".into()))?;
        let mut layout = self
            .repos
            .layouts
            .get_layout(vehicle_id)
            .await?
            .ok_or(CoreError::SeatMapNotFound {
                mode: vehicle.mode(),
                vehicle_id,
            })?;

        let (label, _, seats) = layout.map.clone().into_parts();
        layout.map = SeatMap::new(
            update.layout.unwrap_or(label),
            vehicle.total_seats(),
            update.seats.unwrap_or(seats),
        )?;
        layout.updated_at = now;

        self.repos.layouts.replace_layout(&layout).await?;
        info!(vehicle_id = %vehicle_id, layout = layout.map.layout(), "seat layout updated");
        Ok(layout)
    }

    /// Rebuilds the layout from the class registry. Passing a class switches
    /// the vehicle to it, which is refused while confirmed future bookings
    /// exist.
    pub async fn regenerate_seat_layout(
        &self,
        vehicle_id: Uuid,
        class: Option<String>,
        now: DateTime<Utc>,
    ) -> CoreResult<SeatLayout> {
        let vehicle = self
            .find_vehicle(vehicle_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Vehicle not found".into()))?;
        let requested = class.as_deref();
        let previous = vehicle.clone();

        let (mode, map, switched) = match vehicle {
            Vehicle::Flight(mut flight) => {
                let target = resolve_class(flight.class, requested)?;
                let map = registry_map(target)?;
                let switched = if target != flight.class {
                    self.guard_class_change(vehicle_id, now).await?;
                    flight.class = target;
                    flight.total_seats = map.total_seats();
                    flight.updated_at = now;
                    Some(Vehicle::Flight(flight))
                } else {
                    None
                };
                (TransportMode::Flight, map, switched)
            }
            Vehicle::Bus(mut bus) => {
                let target = resolve_class(bus.seat_type, requested)?;
                let map = registry_map(target)?;
                let switched = if target != bus.seat_type {
                    self.guard_class_change(vehicle_id, now).await?;
                    bus.seat_type = target;
                    bus.total_seats = map.total_seats();
                    bus.updated_at = now;
                    Some(Vehicle::Bus(bus))
                } else {
                    None
                };
                (TransportMode::Bus, map, switched)
            }
        };

        if let Some(updated) = &switched {
            self.save_vehicle(updated).await?;
        }

        // The vehicle and its layout must agree on the seat count.
        let layout = match self.store_layout(vehicle_id, mode, map, now).await {
            Ok(layout) => layout,
            Err(err) => {
                if switched.is_some() {
                    warn!(vehicle_id = %vehicle_id, error = %err, "layout write failed, restoring vehicle class");
                    self.save_vehicle(&previous).await?;
                }
                return Err(err);
            }
        };

        info!(vehicle_id = %vehicle_id, layout = layout.map.layout(), "seat layout regenerated");
        Ok(layout)
    }

    async fn save_vehicle(&self, vehicle: &Vehicle) -> CoreResult<()> {
        match vehicle {
            Vehicle::Flight(flight) => self.repos.flights.update_flight(flight).await?,
            Vehicle::Bus(bus) => self.repos.buses.update_bus(bus).await?,
        }
        Ok(())
    }

    async fn store_layout(
        &self,
        vehicle_id: Uuid,
        mode: TransportMode,
        map: SeatMap,
        now: DateTime<Utc>,
    ) -> CoreResult<SeatLayout> {
        match self.repos.layouts.get_layout(vehicle_id).await? {
            Some(mut existing) => {
                existing.map = map;
                existing.updated_at = now;
                self.repos.layouts.replace_layout(&existing).await?;
                Ok(existing)
            }
            None => {
                let layout = SeatLayout::new(vehicle_id, mode, map, now);
                self.repos.layouts.insert_layout(&layout).await?;
                Ok(layout)
            }
        }
    }

    async fn guard_class_change(&self, vehicle_id: Uuid, now: DateTime<Utc>) -> CoreResult<()> {
        self.ensure_no_upcoming(
            BookingFilter {
                vehicle_id: Some(vehicle_id),
                ..Default::default()
            },
            now,
            "Cannot change the class while confirmed bookings are upcoming",
        )
        .await
    }

    async fn ensure_no_upcoming(&self, mut filter: BookingFilter, now: DateTime<Utc>, message: &str) -> CoreResult<()> {
        filter.status = Some(BookingStatus::Confirmed);
        filter.journey_from = Some(now);
        let upcoming = self.repos.bookings.count_bookings(&filter).await?;
        if upcoming > 0 {
            warn!(upcoming, "{}", message);
            return Err(CoreError::Validation(message.to_string()));
        }
        Ok(())
    }
}
