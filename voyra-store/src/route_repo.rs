use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use voyra_catalog::TransportMode;
use voyra_core::repository::{RepoError, RepoResult, RouteRepository};
use voyra_core::route::Route;

use crate::convert_rows;

pub struct PgRouteRepository {
    pool: PgPool,
}

impl PgRouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RouteRow {
    id: Uuid,
    mode: String,
    vehicle_id: Uuid,
    source: String,
    destination: String,
    departure_time: String,
    arrival_time: String,
    duration: String,
    distance: Option<i32>,
    price: i64,
    days: Vec<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<RouteRow> for Route {
    type Error = RepoError;

    fn try_from(row: RouteRow) -> Result<Self, Self::Error> {
        Ok(Route {
            id: row.id,
            mode: row.mode.parse()?,
            vehicle_id: row.vehicle_id,
            source: row.source,
            destination: row.destination,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            duration: row.duration,
            distance: row.distance.map(u32::try_from).transpose()?,
            price: row.price,
            days: row.days,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl RouteRepository for PgRouteRepository {
    async fn insert_route(&self, route: &Route) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO routes (id, mode, vehicle_id, source, destination, departure_time, arrival_time,
                                duration, distance, price, days, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(route.id)
        .bind(route.mode.as_str())
        .bind(route.vehicle_id)
        .bind(&route.source)
        .bind(&route.destination)
        .bind(&route.departure_time)
        .bind(&route.arrival_time)
        .bind(&route.duration)
        .bind(route.distance.map(i32::try_from).transpose()?)
        .bind(route.price)
        .bind(&route.days)
        .bind(route.is_active)
        .bind(route.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_route(&self, id: Uuid) -> RepoResult<Option<Route>> {
        let row = sqlx::query_as::<_, RouteRow>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Route::try_from).transpose()
    }

    async fn update_route(&self, route: &Route) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE routes
            SET source = $2, destination = $3, departure_time = $4, arrival_time = $5, duration = $6,
                distance = $7, price = $8, days = $9, is_active = $10
            WHERE id = $1
            "#,
        )
        .bind(route.id)
        .bind(&route.source)
        .bind(&route.destination)
        .bind(&route.departure_time)
        .bind(&route.arrival_time)
        .bind(&route.duration)
        .bind(route.distance.map(i32::try_from).transpose()?)
        .bind(route.price)
        .bind(&route.days)
        .bind(route.is_active)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_route(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_routes_for_vehicle(&self, vehicle_id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM routes WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list_routes(&self, mode: Option<TransportMode>) -> RepoResult<Vec<Route>> {
        let rows = sqlx::query_as::<_, RouteRow>(
            "SELECT * FROM routes WHERE ($1::TEXT IS NULL OR mode = $1) ORDER BY created_at DESC",
        )
        .bind(mode.map(|m| m.as_str()))
        .fetch_all(&self.pool)
        .await?;
        convert_rows(rows)
    }

    async fn routes_for_vehicle(&self, vehicle_id: Uuid, active_only: bool) -> RepoResult<Vec<Route>> {
        let rows = sqlx::query_as::<_, RouteRow>(
            "SELECT * FROM routes WHERE vehicle_id = $1 AND (is_active OR NOT $2) ORDER BY departure_time",
        )
        .bind(vehicle_id)
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;
        convert_rows(rows)
    }

    async fn active_routes(&self, mode: TransportMode) -> RepoResult<Vec<Route>> {
        let rows = sqlx::query_as::<_, RouteRow>(
            "SELECT * FROM routes WHERE mode = $1 AND is_active ORDER BY created_at DESC",
        )
        .bind(mode.as_str())
        .fetch_all(&self.pool)
        .await?;
        convert_rows(rows)
    }

    async fn count_routes(&self) -> RepoResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM routes")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count)?)
    }
}
