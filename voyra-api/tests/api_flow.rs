use axum::{
    body::{to_bytes, Body},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, Request, StatusCode,
    },
    Router,
};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;
use voyra_api::{
    app,
    middleware::Claims,
    state::{AppState, AuthConfig},
};
use voyra_core::calendar::service_offset;
use voyra_core::repository::UserRepository;
use voyra_core::user::{Role, User};
use voyra_core::Repositories;
use voyra_shared::Masked;
use voyra_store::app_config::BookingConfig;
use voyra_store::InMemoryStore;

const SECRET: &str = "integration-secret";

struct TestApp {
    router: Router,
    store: Arc<InMemoryStore>,
    admin: String,
    user: String,
    user_id: Uuid,
}

async fn seed_user(store: &InMemoryStore, name: &str, email: &str, role: Role) -> Uuid {
    let user = User {
        id: Uuid::new_v4(),
        name: name.into(),
        email: Masked::new(email.into()),
        phone: None,
        role,
        is_active: true,
        created_at: Utc::now(),
    };
    store.insert_user(&user).await.unwrap();
    user.id
}

fn token(id: Uuid, role: Role) -> String {
    Claims::new(id, role, Duration::hours(1)).sign(SECRET).unwrap()
}

fn day(offset_days: i64) -> NaiveDate {
    (Utc::now() + Duration::days(offset_days)).date_naive()
}

fn ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

async fn spawn_app() -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let admin_id = seed_user(&store, "Ops Admin", "ops@voyra.test", Role::Admin).await;
    let user_id = seed_user(&store, "Priya", "priya@example.com", Role::User).await;

    let state = AppState::new(
        Repositories::from_single(store.clone()),
        AuthConfig {
            secret: SECRET.into(),
        },
        service_offset(0).unwrap(),
        &BookingConfig::default(),
    );

    TestApp {
        router: app(state),
        store,
        admin: token(admin_id, Role::Admin),
        user: token(user_id, Role::User),
        user_id,
    }
}

impl TestApp {
    async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    async fn add_flight(&self, number: &str, class: &str) -> (StatusCode, Value) {
        let body = json!({
            "name": "Coastal Hopper",
            "flightNumber": number,
            "airline": "Voyra Air",
            "aircraftType": "Airbus A320",
            "class": class,
            "amenities": ["WiFi", "In-flight Meal"],
            "rating": 4.4
        });
        self.request(Method::POST, "/api/admin/flights", Some(&self.admin), Some(body))
            .await
    }

    async fn add_business_flight(&self) -> String {
        let (status, body) = self.add_flight("vy-101", "Business").await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"]["flight"]["id"].as_str().unwrap().to_string()
    }

    async fn add_route(&self, route: Value) -> String {
        let (status, body) = self
            .request(Method::POST, "/api/admin/routes", Some(&self.admin), Some(route))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    async fn add_chennai_route(&self, flight_id: &str) -> String {
        self.add_route(json!({
            "flightId": flight_id,
            "source": "Chennai (MAA)",
            "destination": "Bengaluru (BLR)",
            "departureTime": "06:30",
            "arrivalTime": "07:40",
            "duration": "1h 10m",
            "price": 4500
        }))
        .await
    }

    async fn book(&self, token: &str, flight_id: &str, route_id: &str, date: NaiveDate, seats: &[&str]) -> (StatusCode, Value) {
        let seats: Vec<Value> = seats
            .iter()
            .map(|number| {
                json!({
                    "seatNumber": number,
                    "passengerName": "Priya",
                    "age": 31,
                    "gender": "female"
                })
            })
            .collect();
        let body = json!({
            "flightId": flight_id,
            "routeId": route_id,
            "date": ymd(date),
            "seats": seats
        });
        self.request(Method::POST, "/api/bookings", Some(token), Some(body)).await
    }
}

fn seat<'a>(view: &'a Value, number: &str) -> &'a Value {
    view["data"]["seats"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["seatNumber"] == number)
        .unwrap()
}

fn booked_count(view: &Value) -> usize {
    view["data"]["seats"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["isBooked"] == true)
        .count()
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_business_flight_booking_flow() {
    let app = spawn_app().await;

    let (status, created) = app.add_flight("vy-101", "Business").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    assert_eq!(created["data"]["flight"]["flightNumber"], "VY-101");
    assert_eq!(created["data"]["flight"]["totalSeats"], 40);
    assert_eq!(created["data"]["seatLayout"]["layout"], "2x2");
    assert_eq!(created["data"]["seatLayout"]["totalSeats"], 40);
    assert_eq!(created["data"]["seatLayout"]["seats"].as_array().unwrap().len(), 40);

    let flight_id = created["data"]["flight"]["id"].as_str().unwrap().to_string();
    let route_id = app.add_chennai_route(&flight_id).await;
    let travel = day(7);

    let (status, booking) = app.book(&app.user, &flight_id, &route_id, travel, &["5D"]).await;
    assert_eq!(status, StatusCode::CREATED, "{}", booking);
    assert_eq!(booking["data"]["bookingStatus"], "confirmed");
    assert_eq!(booking["data"]["paymentStatus"], "completed");
    assert_eq!(booking["data"]["totalAmount"], 4500);

    let uri = format!("/api/flights/{}/seats?routeId={}&date={}", flight_id, route_id, ymd(travel));
    let (status, view) = app.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["data"]["layout"], "2x2");
    assert_eq!(view["data"]["totalSeats"], 40);
    assert_eq!(booked_count(&view), 1);
    assert_eq!(seat(&view, "5D")["isBooked"], true);
    assert_eq!(seat(&view, "5D")["position"], "aisle");
    assert_eq!(seat(&view, "5C")["isBooked"], false);

    let next_day = format!("/api/flights/{}/seats?routeId={}&date={}", flight_id, route_id, ymd(day(8)));
    let (_, view) = app.get(&next_day).await;
    assert_eq!(booked_count(&view), 0);

    let (status, again) = app.book(&app.user, &flight_id, &route_id, travel, &["5D", "6A"]).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(again["success"], false);
    assert_eq!(again["message"], "Seats already booked: 5D");

    let (status, mine) = app
        .request(Method::GET, "/api/bookings/mine", Some(&app.user), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine["count"], 1);
    assert_eq!(mine["data"][0]["userId"], app.user_id.to_string());
}

#[tokio::test]
async fn test_search_counts_booked_seats() {
    let app = spawn_app().await;
    let flight_id = app.add_business_flight().await;
    let route_id = app.add_chennai_route(&flight_id).await;
    let travel = day(5);

    let (status, _) = app.book(&app.user, &flight_id, &route_id, travel, &["1A", "1C"]).await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!(
        "/api/flights/search?source=chennai&destination=bengaluru&date={}",
        ymd(travel)
    );
    let (status, results) = app.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(results["count"], 1);
    assert_eq!(results["data"][0]["id"], route_id);
    assert_eq!(results["data"][0]["availableSeats"], 38);
    assert_eq!(results["data"][0]["totalSeats"], 40);
    assert_eq!(results["data"][0]["vehicle"]["class"], "Business");

    let (_, other_day) = app
        .get(&format!(
            "/api/flights/search?source=Chennai&destination=Bengaluru&date={}",
            ymd(day(6))
        ))
        .await;
    assert_eq!(other_day["data"][0]["availableSeats"], 40);

    let (_, economy) = app.get(&format!("{}&class=Economy", uri)).await;
    assert_eq!(economy["count"], 0);

    let (status, unknown) = app.get(&format!("{}&class=Royal", uri)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown["message"], "Invalid flight seat class: Royal");

    let (status, missing) = app.get("/api/flights/search?source=Chennai").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(missing["message"], "Please provide source, destination, and date");

    let (_, locations) = app.get("/api/flights/locations").await;
    assert_eq!(locations["data"], json!(["Bengaluru (BLR)", "Chennai (MAA)"]));
}

#[tokio::test]
async fn test_unknown_class_is_rejected() {
    let app = spawn_app().await;
    let (status, body) = app.add_flight("vy-999", "Royal Suite").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid flight seat class: Royal Suite");

    let (_, flights) = app
        .request(Method::GET, "/api/admin/flights", Some(&app.admin), None)
        .await;
    assert_eq!(flights["count"], 0);
}

#[tokio::test]
async fn test_duplicate_flight_number_conflicts() {
    let app = spawn_app().await;
    app.add_business_flight().await;
    let (status, _) = app.add_flight("VY-101", "Economy").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_admin_routes_require_admin_token() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/admin/stats").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = app
        .request(Method::GET, "/api/admin/stats", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(Method::GET, "/api/admin/stats", Some(&app.user), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let stranger = token(Uuid::new_v4(), Role::Admin);
    let (status, _) = app
        .request(Method::GET, "/api/admin/stats", Some(&stranger), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.request(Method::GET, "/api/bookings/mine", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_seat_query_validation() {
    let app = spawn_app().await;
    let flight_id = app.add_business_flight().await;

    let (status, body) = app.get(&format!("/api/flights/{}/seats", flight_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide routeId and date");

    let (status, _) = app
        .get(&format!("/api/flights/{}/seats?routeId=abc&date={}", flight_id, ymd(day(1))))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let route_id = app.add_chennai_route(&flight_id).await;
    let (status, body) = app
        .get(&format!(
            "/api/flights/{}/seats?routeId={}&date=%2B262142-12-31",
            flight_id, route_id
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid date: +262142-12-31");

    let (status, _) = app
        .get("/api/flights/search?source=Chennai&destination=Bengaluru&date=%2B262142-12-31")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            Method::GET,
            "/api/admin/bookings?date=%2B262142-12-31",
            Some(&app.admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .get(&format!(
            "/api/flights/{}/seats?routeId={}&date={}",
            Uuid::new_v4(),
            Uuid::new_v4(),
            ymd(day(1))
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Seat layout not found for this flight");

    let (status, _) = app.get("/api/flights/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_releases_seats() {
    let app = spawn_app().await;
    let other_id = seed_user(&app.store, "Arjun", "arjun@example.com", Role::User).await;
    let other = token(other_id, Role::User);

    let flight_id = app.add_business_flight().await;
    let route_id = app.add_chennai_route(&flight_id).await;
    let travel = day(3);

    let (_, booking) = app.book(&app.user, &flight_id, &route_id, travel, &["2A"]).await;
    let booking_id = booking["data"]["id"].as_str().unwrap().to_string();
    let cancel_uri = format!("/api/bookings/{}/cancel", booking_id);

    let (status, _) = app.request(Method::PUT, &cancel_uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, cancelled) = app.request(Method::PUT, &cancel_uri, Some(&app.user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["data"]["bookingStatus"], "cancelled");
    assert_eq!(cancelled["data"]["paymentStatus"], "refunded");

    let (status, _) = app.request(Method::PUT, &cancel_uri, Some(&app.admin), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.book(&other, &flight_id, &route_id, travel, &["2A"]).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_booking_rules() {
    let app = spawn_app().await;
    let flight_id = app.add_business_flight().await;
    let route_id = app.add_chennai_route(&flight_id).await;

    let (status, body) = app.book(&app.user, &flight_id, &route_id, day(-1), &["1A"]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot book a journey in the past");

    let (status, body) = app.book(&app.user, &flight_id, &route_id, day(2), &["1B"]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Seat 1B does not exist on this flight");

    let (status, _) = app.book(&app.user, &flight_id, &route_id, day(2), &["1A", "1A"]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let ten: Vec<String> = (1..=10).map(|row| format!("{}A", row)).collect();
    let ten: Vec<&str> = ten.iter().map(String::as_str).collect();
    let (status, _) = app.book(&app.user, &flight_id, &route_id, day(2), &ten).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .book(&app.user, &flight_id, &Uuid::new_v4().to_string(), day(2), &["1A"])
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn test_delete_guarded_by_upcoming_bookings() {
    let app = spawn_app().await;
    let flight_id = app.add_business_flight().await;
    let route_id = app.add_chennai_route(&flight_id).await;
    let (status, _) = app.book(&app.user, &flight_id, &route_id, day(4), &["3F"]).await;
    assert_eq!(status, StatusCode::CREATED);

    let flight_uri = format!("/api/admin/flights/{}", flight_id);
    let (status, body) = app.request(Method::DELETE, &flight_uri, Some(&app.admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot delete flight with active bookings");

    let (_, mine) = app
        .request(Method::GET, "/api/bookings/mine", Some(&app.user), None)
        .await;
    let booking_id = mine["data"][0]["id"].as_str().unwrap().to_string();
    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/api/bookings/{}/cancel", booking_id),
            Some(&app.user),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.request(Method::DELETE, &flight_uri, Some(&app.admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Flight deleted successfully");

    let (status, _) = app.get(&format!("/api/flights/{}", flight_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, routes) = app
        .request(Method::GET, "/api/admin/routes", Some(&app.admin), None)
        .await;
    assert_eq!(routes["count"], 0);
}

#[tokio::test]
async fn test_semi_sleeper_bus_with_weekday_route() {
    let app = spawn_app().await;
    let body = json!({
        "name": "Night Rider",
        "busNumber": "tn-01-ab-1234",
        "busType": "Semi-Sleeper",
        "seatType": "Semi-Sleeper",
        "operator": "KPN Travels",
        "amenities": ["Blanket", "Charging Point"]
    });
    let (status, created) = app
        .request(Method::POST, "/api/admin/buses", Some(&app.admin), Some(body))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", created);
    assert_eq!(created["data"]["bus"]["busNumber"], "TN-01-AB-1234");
    assert_eq!(created["data"]["bus"]["totalSeats"], 35);

    let layout = &created["data"]["seatLayout"];
    assert_eq!(layout["layout"], "2x2+1x2");
    let seats = layout["seats"].as_array().unwrap();
    assert_eq!(seats.len(), 35);
    assert_eq!(seats[19]["deck"], "lower");
    assert_eq!(seats[20]["seatNumber"], "21");
    assert_eq!(seats[20]["deck"], "upper");
    assert_eq!(seats[20]["row"], 6);
    assert_eq!(seats[20]["type"], "sleeper");

    let bus_id = created["data"]["bus"]["id"].as_str().unwrap().to_string();
    let travel = day(9);
    let route_id = app
        .add_route(json!({
            "mode": "bus",
            "busId": bus_id,
            "source": "Namakkal (Bus Stand)",
            "destination": "Hosur (Bus Stand)",
            "departureTime": "21:00",
            "arrivalTime": "03:30",
            "duration": "6h 30m",
            "price": 850,
            "days": [travel.format("%A").to_string()]
        }))
        .await;

    let booking = |date: NaiveDate| {
        json!({
            "mode": "bus",
            "busId": bus_id,
            "routeId": route_id,
            "date": ymd(date),
            "seats": [{ "seatNumber": "21", "passengerName": "Kavin", "age": 40, "gender": "male" }]
        })
    };

    let (status, body) = app
        .request(Method::POST, "/api/bookings", Some(&app.user), Some(booking(day(10))))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Route does not operate on"));

    let (status, _) = app
        .request(Method::POST, "/api/bookings", Some(&app.user), Some(booking(travel)))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, results) = app
        .get(&format!(
            "/api/buses/search?source=Namakkal&destination=Hosur&date={}&class=Semi-Sleeper",
            ymd(travel)
        ))
        .await;
    assert_eq!(results["count"], 1);
    assert_eq!(results["data"][0]["availableSeats"], 34);

    let (status, flight_view) = app
        .get(&format!("/api/flights/{}/seats?routeId={}&date={}", bus_id, route_id, ymd(travel)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{}", flight_view);
}

#[tokio::test]
async fn test_regenerate_switches_class() {
    let app = spawn_app().await;
    let flight_id = app.add_business_flight().await;
    let uri = format!("/api/admin/seat-layouts/{}/regenerate", flight_id);

    let (status, same) = app.request(Method::POST, &uri, Some(&app.admin), None).await;
    assert_eq!(status, StatusCode::OK, "{}", same);
    assert_eq!(same["data"]["layout"], "2x2");

    let (status, economy) = app
        .request(Method::POST, &uri, Some(&app.admin), Some(json!({ "class": "Economy" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(economy["data"]["layout"], "3x3");
    assert_eq!(economy["data"]["totalSeats"], 120);

    let (_, details) = app.get(&format!("/api/flights/{}", flight_id)).await;
    assert_eq!(details["data"]["class"], "Economy");
    assert_eq!(details["data"]["totalSeats"], 120);

    let (status, _) = app
        .request(Method::POST, &uri, Some(&app.admin), Some(json!({ "class": "Cargo" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deactivated_user_is_locked_out() {
    let app = spawn_app().await;
    let uri = format!("/api/admin/users/{}", app.user_id);

    let (status, body) = app
        .request(Method::PUT, &uri, Some(&app.admin), Some(json!({ "isActive": false })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isActive"], false);

    let (status, body) = app
        .request(Method::GET, "/api/bookings/mine", Some(&app.user), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Account is deactivated");

    let (_, users) = app
        .request(Method::GET, "/api/admin/users", Some(&app.admin), None)
        .await;
    assert_eq!(users["count"], 1);
}

#[tokio::test]
async fn test_dashboard_stats() {
    let app = spawn_app().await;
    let flight_id = app.add_business_flight().await;
    let route_id = app.add_chennai_route(&flight_id).await;
    app.book(&app.user, &flight_id, &route_id, day(2), &["1A", "1C"]).await;
    let (_, second) = app.book(&app.user, &flight_id, &route_id, day(2), &["2A"]).await;
    let cancel = format!("/api/bookings/{}/cancel", second["data"]["id"].as_str().unwrap());
    app.request(Method::PUT, &cancel, Some(&app.user), None).await;

    let (status, stats) = app
        .request(Method::GET, "/api/admin/stats", Some(&app.admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["data"]["bookings"], json!({ "total": 2, "confirmed": 1, "cancelled": 1 }));
    assert_eq!(stats["data"]["revenue"], 9000);
    assert_eq!(stats["data"]["flights"], 1);
    assert_eq!(stats["data"]["buses"], 0);
    assert_eq!(stats["data"]["routes"], 1);
    assert_eq!(stats["data"]["users"], 1);

    let (_, confirmed) = app
        .request(
            Method::GET,
            &format!("/api/admin/bookings?status=confirmed&date={}", ymd(day(2))),
            Some(&app.admin),
            None,
        )
        .await;
    assert_eq!(confirmed["count"], 1);

    let (status, _) = app
        .request(Method::GET, "/api/admin/bookings?status=lost", Some(&app.admin), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_featured_and_classes() {
    let app = spawn_app().await;
    app.add_business_flight().await;
    app.add_flight("vy-202", "Economy").await;

    let (_, featured) = app.get("/api/flights?limit=1").await;
    assert_eq!(featured["count"], 1);

    let (_, all) = app.get("/api/flights").await;
    assert_eq!(all["count"], 2);

    let (status, _) = app.get("/api/flights?limit=many").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, classes) = app.get("/api/buses/classes").await;
    assert_eq!(classes["count"], 3);
    assert_eq!(classes["data"][1], json!({ "name": "Semi-Sleeper", "layout": "2x2+1x2", "totalSeats": 35 }));
}
