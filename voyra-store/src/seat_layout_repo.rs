use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;
use voyra_catalog::{Seat, SeatMap};
use voyra_core::repository::{RepoError, RepoResult, SeatLayoutRepository};
use voyra_core::seat_layout::SeatLayout;

pub struct PgSeatLayoutRepository {
    pool: PgPool,
}

impl PgSeatLayoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SeatLayoutRow {
    id: Uuid,
    vehicle_id: Uuid,
    mode: String,
    layout: String,
    total_seats: i32,
    seats: Json<Vec<Seat>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SeatLayoutRow> for SeatLayout {
    type Error = RepoError;

    // Stored maps are re-validated on the way out.
    fn try_from(row: SeatLayoutRow) -> Result<Self, Self::Error> {
        Ok(SeatLayout {
            id: row.id,
            vehicle_id: row.vehicle_id,
            mode: row.mode.parse()?,
            map: SeatMap::new(row.layout, u32::try_from(row.total_seats)?, row.seats.0)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl SeatLayoutRepository for PgSeatLayoutRepository {
    async fn insert_layout(&self, layout: &SeatLayout) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO seat_layouts (id, vehicle_id, mode, layout, total_seats, seats, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(layout.id)
        .bind(layout.vehicle_id)
        .bind(layout.mode.as_str())
        .bind(layout.map.layout())
        .bind(i32::try_from(layout.map.total_seats())?)
        .bind(Json(layout.map.seats()))
        .bind(layout.created_at)
        .bind(layout.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_layout(&self, vehicle_id: Uuid) -> RepoResult<Option<SeatLayout>> {
        let row = sqlx::query_as::<_, SeatLayoutRow>("SELECT * FROM seat_layouts WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(SeatLayout::try_from).transpose()
    }

    async fn replace_layout(&self, layout: &SeatLayout) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE seat_layouts
            SET layout = $2, total_seats = $3, seats = $4, updated_at = $5
            WHERE vehicle_id = $1
            "#,
        )
        .bind(layout.vehicle_id)
        .bind(layout.map.layout())
        .bind(i32::try_from(layout.map.total_seats())?)
        .bind(Json(layout.map.seats()))
        .bind(layout.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_layout(&self, vehicle_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM seat_layouts WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
