use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use voyra_catalog::{CabinClass, Seat, TransportMode};
use voyra_core::booking::NewBooking;
use voyra_core::calendar::service_offset;
use voyra_core::flight::{FlightUpdate, NewFlight};
use voyra_core::repository::{FlightRepository, RepoResult, SeatLayoutRepository};
use voyra_core::route::NewRoute;
use voyra_core::search::SearchQuery;
use voyra_core::seat_layout::{NewSeatLayout, SeatLayout, SeatLayoutUpdate};
use voyra_core::{CoreError, FleetService, Repositories, SearchService, SeatingService};
use voyra_store::InMemoryStore;

struct Services {
    fleet: FleetService,
    seating: SeatingService,
    search: SearchService,
}

fn services() -> Services {
    let repos = Repositories::from_single(Arc::new(InMemoryStore::new()));
    let offset = service_offset(330).unwrap();
    Services {
        fleet: FleetService::new(repos.clone()),
        seating: SeatingService::new(repos.clone(), offset, 9),
        search: SearchService::new(repos, offset),
    }
}

fn new_flight(number: &str, class: &str) -> NewFlight {
    serde_json::from_value(json!({
        "name": "Deccan Shuttle",
        "flightNumber": number,
        "airline": "Voyra Air",
        "aircraftType": "Boeing 737",
        "class": class
    }))
    .unwrap()
}

fn new_route(flight_id: Uuid) -> NewRoute {
    serde_json::from_value(json!({
        "flightId": flight_id,
        "source": "Mumbai (BOM)",
        "destination": "Goa (GOI)",
        "departureTime": "09:15",
        "arrivalTime": "10:25",
        "duration": "1h 10m",
        "price": 3200
    }))
    .unwrap()
}

fn booking(flight_id: Uuid, route_id: Uuid, date: &str, seats: &[&str]) -> NewBooking {
    let seats: Vec<_> = seats
        .iter()
        .map(|n| json!({ "seatNumber": n, "passengerName": "Asha", "age": 27, "gender": "female" }))
        .collect();
    serde_json::from_value(json!({
        "flightId": flight_id,
        "routeId": route_id,
        "date": date,
        "seats": seats
    }))
    .unwrap()
}

/// Layout store whose replace always fails.
struct FailingLayouts(Arc<InMemoryStore>);

#[async_trait::async_trait]
impl SeatLayoutRepository for FailingLayouts {
    async fn insert_layout(&self, layout: &SeatLayout) -> RepoResult<()> {
        self.0.insert_layout(layout).await
    }

    async fn get_layout(&self, vehicle_id: Uuid) -> RepoResult<Option<SeatLayout>> {
        self.0.get_layout(vehicle_id).await
    }

    async fn replace_layout(&self, _layout: &SeatLayout) -> RepoResult<()> {
        Err("layout store unavailable".into())
    }

    async fn delete_layout(&self, vehicle_id: Uuid) -> RepoResult<bool> {
        self.0.delete_layout(vehicle_id).await
    }
}

fn travel_date(days: i64) -> String {
    (Utc::now() + Duration::days(days)).format("%Y-%m-%d").to_string()
}

#[tokio::test]
async fn test_first_class_flight_gets_registry_layout() {
    let s = services();
    let (flight, layout) = s.fleet.add_flight(new_flight("vy-1", "First Class"), Utc::now()).await.unwrap();

    assert_eq!(flight.total_seats, 12);
    assert_eq!(layout.map.layout(), "1x1x1");
    assert_eq!(layout.mode, TransportMode::Flight);
    let numbers: Vec<&str> = layout.map.seats().iter().take(3).map(|s| s.seat_number.as_str()).collect();
    assert_eq!(numbers, ["1A", "1F", "1K"]);
}

#[tokio::test]
async fn test_hand_built_layout_rules() {
    let s = services();
    let (flight, layout) = s.fleet.add_flight(new_flight("vy-2", "Business"), Utc::now()).await.unwrap();

    let seats: Vec<Seat> = layout.map.seats().to_vec();
    let duplicate = NewSeatLayout {
        vehicle_id: flight.id,
        layout: "2x2".into(),
        seats: seats.clone(),
    };
    let err = s.fleet.create_seat_layout(duplicate, Utc::now()).await.unwrap_err();
    assert!(matches!(err, CoreError::Conflict(ref msg) if msg == "Seat layout already exists for this flight"));

    let short = SeatLayoutUpdate {
        layout: None,
        seats: Some(seats[..39].to_vec()),
    };
    let err = s.fleet.update_seat_layout(flight.id, short, Utc::now()).await.unwrap_err();
    assert!(matches!(err, CoreError::Layout(_)));

    let relabel = SeatLayoutUpdate {
        layout: Some("2-2".into()),
        seats: None,
    };
    let updated = s.fleet.update_seat_layout(flight.id, relabel, Utc::now()).await.unwrap();
    assert_eq!(updated.map.layout(), "2-2");
    assert_eq!(updated.map.total_seats(), 40);

    let missing = NewSeatLayout {
        vehicle_id: Uuid::new_v4(),
        layout: "2x2".into(),
        seats,
    };
    let err = s.fleet.create_seat_layout(missing, Utc::now()).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

#[tokio::test]
async fn test_class_change_only_through_regeneration() {
    let s = services();
    let (flight, _) = s.fleet.add_flight(new_flight("vy-3", "Economy"), Utc::now()).await.unwrap();

    let update = FlightUpdate {
        class: Some("Business".into()),
        ..Default::default()
    };
    let err = s.fleet.update_flight(flight.id, update, Utc::now()).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    let rename = FlightUpdate {
        name: Some("Konkan Shuttle".into()),
        class: Some("Economy".into()),
        ..Default::default()
    };
    let renamed = s.fleet.update_flight(flight.id, rename, Utc::now()).await.unwrap();
    assert_eq!(renamed.name, "Konkan Shuttle");
    assert_eq!(renamed.total_seats, 120);
}

#[tokio::test]
async fn test_regeneration_refused_with_upcoming_bookings() {
    let s = services();
    let now = Utc::now();
    let (flight, _) = s.fleet.add_flight(new_flight("vy-4", "Economy"), now).await.unwrap();
    let route = s.fleet.add_route(new_route(flight.id), now).await.unwrap();
    s.seating
        .book(Uuid::new_v4(), booking(flight.id, route.id, &travel_date(3), &["12C"]), now)
        .await
        .unwrap();

    let err = s
        .fleet
        .regenerate_seat_layout(flight.id, Some("Business".into()), now)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    let same = s.fleet.regenerate_seat_layout(flight.id, None, now).await.unwrap();
    assert_eq!(same.map.total_seats(), 120);
}

#[tokio::test]
async fn test_failed_layout_write_restores_vehicle_class() {
    let store = Arc::new(InMemoryStore::new());
    let now = Utc::now();
    let (flight, _) = FleetService::new(Repositories::from_single(store.clone()))
        .add_flight(new_flight("vy-7", "Economy"), now)
        .await
        .unwrap();

    let broken = FleetService::new(Repositories {
        layouts: Arc::new(FailingLayouts(store.clone())),
        ..Repositories::from_single(store.clone())
    });
    let err = broken
        .regenerate_seat_layout(flight.id, Some("Business".into()), now)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Repository(_)));

    let stored = store.get_flight(flight.id).await.unwrap().unwrap();
    assert_eq!(stored.class, CabinClass::Economy);
    assert_eq!(stored.total_seats, 120);
    let layout = store.get_layout(flight.id).await.unwrap().unwrap();
    assert_eq!(layout.map.total_seats(), 120);
}

#[tokio::test]
async fn test_inactive_vehicles_drop_out_of_search() {
    let s = services();
    let now = Utc::now();
    let (flight, _) = s.fleet.add_flight(new_flight("vy-8", "Economy"), now).await.unwrap();
    s.fleet.add_route(new_route(flight.id), now).await.unwrap();
    let query = || SearchQuery {
        source: Some("Mumbai".into()),
        destination: Some("Goa".into()),
        date: Some(travel_date(1)),
        class: None,
    };
    assert_eq!(s.search.search(TransportMode::Flight, query()).await.unwrap().len(), 1);

    let retire = FlightUpdate {
        is_active: Some(false),
        ..Default::default()
    };
    s.fleet.update_flight(flight.id, retire, now).await.unwrap();
    assert!(s.search.search(TransportMode::Flight, query()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_route_needs_existing_vehicle() {
    let s = services();
    let err = s.fleet.add_route(new_route(Uuid::new_v4()), Utc::now()).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound(ref msg) if msg == "Flight not found"));
}

#[tokio::test]
async fn test_cancelled_bookings_free_their_seats() {
    let s = services();
    let now = Utc::now();
    let (flight, _) = s.fleet.add_flight(new_flight("vy-5", "Premium Economy"), now).await.unwrap();
    let route = s.fleet.add_route(new_route(flight.id), now).await.unwrap();
    let date = travel_date(2);
    let traveller = Uuid::new_v4();

    let first = s
        .seating
        .book(traveller, booking(flight.id, route.id, &date, &["4A", "4B"]), now)
        .await
        .unwrap();
    assert_eq!(first.total_amount, 6400);

    let view = s
        .seating
        .availability(TransportMode::Flight, flight.id, route.id, &date)
        .await
        .unwrap();
    assert_eq!(view.total_seats, 60);
    assert_eq!(view.available_count(), 58);

    s.seating.cancel(first.id, traveller, false).await.unwrap();
    let view = s
        .seating
        .availability(TransportMode::Flight, flight.id, route.id, &date)
        .await
        .unwrap();
    assert_eq!(view.available_count(), 60);

    let results = s
        .search
        .search(
            TransportMode::Flight,
            SearchQuery {
                source: Some("mumbai".into()),
                destination: Some("GOA".into()),
                date: Some(date.clone()),
                class: Some("Premium Economy".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].available_seats, 60);
}

#[tokio::test]
async fn test_bus_search_ignores_flight_routes() {
    let s = services();
    let now = Utc::now();
    let (flight, _) = s.fleet.add_flight(new_flight("vy-6", "Economy"), now).await.unwrap();
    s.fleet.add_route(new_route(flight.id), now).await.unwrap();

    let results = s
        .search
        .search(
            TransportMode::Bus,
            SearchQuery {
                source: Some("Mumbai".into()),
                destination: Some("Goa".into()),
                date: Some(travel_date(1)),
                class: None,
            },
        )
        .await
        .unwrap();
    assert!(results.is_empty());
    assert_eq!(s.search.locations(TransportMode::Flight).await.unwrap(), ["Goa (GOI)", "Mumbai (BOM)"]);
    assert!(s.search.locations(TransportMode::Bus).await.unwrap().is_empty());
}
