use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use voyra_core::flight::Flight;
use voyra_core::repository::{FlightRepository, RepoError, RepoResult};

use crate::{convert_rows, parse_texts, texts};

pub struct PgFlightRepository {
    pool: PgPool,
}

impl PgFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    id: Uuid,
    name: String,
    flight_number: String,
    airline: String,
    aircraft_type: String,
    class: String,
    total_seats: i32,
    amenities: Vec<String>,
    rating: f64,
    review_count: i32,
    images: Vec<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<FlightRow> for Flight {
    type Error = RepoError;

    fn try_from(row: FlightRow) -> Result<Self, Self::Error> {
        Ok(Flight {
            id: row.id,
            name: row.name,
            flight_number: row.flight_number,
            airline: row.airline,
            aircraft_type: row.aircraft_type.parse()?,
            class: row.class.parse()?,
            total_seats: u32::try_from(row.total_seats)?,
            amenities: parse_texts(&row.amenities)?,
            rating: row.rating,
            review_count: u32::try_from(row.review_count)?,
            images: row.images,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl FlightRepository for PgFlightRepository {
    async fn insert_flight(&self, flight: &Flight) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO flights (id, name, flight_number, airline, aircraft_type, class, total_seats,
                                 amenities, rating, review_count, images, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(flight.id)
        .bind(&flight.name)
        .bind(&flight.flight_number)
        .bind(&flight.airline)
        .bind(flight.aircraft_type.as_str())
        .bind(flight.class.to_string())
        .bind(i32::try_from(flight.total_seats)?)
        .bind(texts(&flight.amenities))
        .bind(flight.rating)
        .bind(i32::try_from(flight.review_count)?)
        .bind(&flight.images)
        .bind(flight.is_active)
        .bind(flight.created_at)
        .bind(flight.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_flight(&self, id: Uuid) -> RepoResult<Option<Flight>> {
        let row = sqlx::query_as::<_, FlightRow>("SELECT * FROM flights WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Flight::try_from).transpose()
    }

    async fn find_flight_by_number(&self, flight_number: &str) -> RepoResult<Option<Flight>> {
        let row = sqlx::query_as::<_, FlightRow>("SELECT * FROM flights WHERE flight_number = $1")
            .bind(flight_number)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Flight::try_from).transpose()
    }

    async fn update_flight(&self, flight: &Flight) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE flights
            SET name = $2, flight_number = $3, airline = $4, aircraft_type = $5, class = $6,
                total_seats = $7, amenities = $8, rating = $9, review_count = $10, images = $11,
                is_active = $12, updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(flight.id)
        .bind(&flight.name)
        .bind(&flight.flight_number)
        .bind(&flight.airline)
        .bind(flight.aircraft_type.as_str())
        .bind(flight.class.to_string())
        .bind(i32::try_from(flight.total_seats)?)
        .bind(texts(&flight.amenities))
        .bind(flight.rating)
        .bind(i32::try_from(flight.review_count)?)
        .bind(&flight.images)
        .bind(flight.is_active)
        .bind(flight.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_flight(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM flights WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_flights(&self) -> RepoResult<Vec<Flight>> {
        let rows = sqlx::query_as::<_, FlightRow>("SELECT * FROM flights ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        convert_rows(rows)
    }

    async fn featured_flights(&self, limit: usize) -> RepoResult<Vec<Flight>> {
        let rows = sqlx::query_as::<_, FlightRow>(
            "SELECT * FROM flights WHERE is_active ORDER BY rating DESC, created_at DESC LIMIT $1",
        )
        .bind(i64::try_from(limit)?)
        .fetch_all(&self.pool)
        .await?;
        convert_rows(rows)
    }

    async fn count_flights(&self) -> RepoResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM flights")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count)?)
    }
}
