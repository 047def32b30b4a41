use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use voyra_core::bus::Bus;
use voyra_core::repository::{BusRepository, RepoError, RepoResult};

use crate::{convert_rows, parse_texts, texts};

pub struct PgBusRepository {
    pool: PgPool,
}

impl PgBusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BusRow {
    id: Uuid,
    name: String,
    bus_number: String,
    bus_type: String,
    seat_type: String,
    total_seats: i32,
    amenities: Vec<String>,
    operator: String,
    rating: f64,
    review_count: i32,
    images: Vec<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BusRow> for Bus {
    type Error = RepoError;

    fn try_from(row: BusRow) -> Result<Self, Self::Error> {
        Ok(Bus {
            id: row.id,
            name: row.name,
            bus_number: row.bus_number,
            bus_type: row.bus_type.parse()?,
            seat_type: row.seat_type.parse()?,
            total_seats: u32::try_from(row.total_seats)?,
            amenities: parse_texts(&row.amenities)?,
            operator: row.operator,
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
impl BusRepository for PgBusRepository {
    async fn insert_bus(&self, bus: &Bus) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO buses (id, name, bus_number, bus_type, seat_type, total_seats, amenities,
                               operator, rating, review_count, images, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(bus.id)
        .bind(&bus.name)
        .bind(&bus.bus_number)
        .bind(bus.bus_type.as_str())
        .bind(bus.seat_type.to_string())
        .bind(i32::try_from(bus.total_seats)?)
        .bind(texts(&bus.amenities))
        .bind(&bus.operator)
        .bind(bus.rating)
        .bind(i32::try_from(bus.review_count)?)
        .bind(&bus.images)
        .bind(bus.is_active)
        .bind(bus.created_at)
        .bind(bus.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_bus(&self, id: Uuid) -> RepoResult<Option<Bus>> {
        let row = sqlx::query_as::<_, BusRow>("SELECT * FROM buses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Bus::try_from).transpose()
    }

    async fn find_bus_by_number(&self, bus_number: &str) -> RepoResult<Option<Bus>> {
        let row = sqlx::query_as::<_, BusRow>("SELECT * FROM buses WHERE bus_number = $1")
            .bind(bus_number)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Bus::try_from).transpose()
    }

    async fn update_bus(&self, bus: &Bus) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE buses
            SET name = $2, bus_number = $3, bus_type = $4, seat_type = $5, total_seats = $6,
                amenities = $7, operator = $8, rating = $9, review_count = $10, images = $11,
                is_active = $12, updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(bus.id)
        .bind(&bus.name)
        .bind(&bus.bus_number)
        .bind(bus.bus_type.as_str())
        .bind(bus.seat_type.to_string())
        .bind(i32::try_from(bus.total_seats)?)
        .bind(texts(&bus.amenities))
        .bind(&bus.operator)
        .bind(bus.rating)
        .bind(i32::try_from(bus.review_count)?)
        .bind(&bus.images)
        .bind(bus.is_active)
        .bind(bus.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_bus(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM buses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_buses(&self) -> RepoResult<Vec<Bus>> {
        let rows = sqlx::query_as::<_, BusRow>("SELECT * FROM buses ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        convert_rows(rows)
    }

    async fn featured_buses(&self, limit: usize) -> RepoResult<Vec<Bus>> {
        let rows = sqlx::query_as::<_, BusRow>(
            "SELECT * FROM buses WHERE is_active ORDER BY rating DESC, created_at DESC LIMIT $1",
        )
        .bind(i64::try_from(limit)?)
        .fetch_all(&self.pool)
        .await?;
        convert_rows(rows)
    }

    async fn count_buses(&self) -> RepoResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM buses")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count)?)
    }
}
