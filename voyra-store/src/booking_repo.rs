use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;
use voyra_core::booking::{Booking, BookingFilter, BookingStatus, PassengerSeat, PaymentStatus};
use voyra_core::repository::{BookingRepository, RepoError, RepoResult};

use crate::convert_rows;

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    user_id: Uuid,
    mode: String,
    vehicle_id: Uuid,
    route_id: Uuid,
    journey_date: DateTime<Utc>,
    seats: Json<Vec<PassengerSeat>>,
    total_amount: i64,
    booking_status: String,
    payment_status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = RepoError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            user_id: row.user_id,
            mode: row.mode.parse()?,
            vehicle_id: row.vehicle_id,
            route_id: row.route_id,
            journey_date: row.journey_date,
            seats: row.seats.0,
            total_amount: row.total_amount,
            booking_status: row.booking_status.parse()?,
            payment_status: row.payment_status.parse()?,
            created_at: row.created_at,
        })
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &BookingFilter) {
    builder.push(" WHERE TRUE");
    if let Some(status) = filter.status {
        builder.push(" AND booking_status = ").push_bind(status.as_str());
    }
    if let Some(user_id) = filter.user_id {
        builder.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(vehicle_id) = filter.vehicle_id {
        builder.push(" AND vehicle_id = ").push_bind(vehicle_id);
    }
    if let Some(route_id) = filter.route_id {
        builder.push(" AND route_id = ").push_bind(route_id);
    }
    if let Some(from) = filter.journey_from {
        builder.push(" AND journey_date >= ").push_bind(from);
    }
    if let Some(until) = filter.journey_until {
        builder.push(" AND journey_date <= ").push_bind(until);
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn insert_booking(&self, booking: &Booking) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, user_id, mode, vehicle_id, route_id, journey_date, seats,
                                  total_amount, booking_status, payment_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(booking.id)
        .bind(booking.user_id)
        .bind(booking.mode.as_str())
        .bind(booking.vehicle_id)
        .bind(booking.route_id)
        .bind(booking.journey_date)
        .bind(Json(&booking.seats))
        .bind(booking.total_amount)
        .bind(booking.booking_status.as_str())
        .bind(booking.payment_status.as_str())
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_booking(&self, id: Uuid) -> RepoResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Booking::try_from).transpose()
    }

    async fn set_booking_status(
        &self,
        id: Uuid,
        booking_status: BookingStatus,
        payment_status: PaymentStatus,
    ) -> RepoResult<bool> {
        let result = sqlx::query("UPDATE bookings SET booking_status = $2, payment_status = $3 WHERE id = $1")
            .bind(id)
            .bind(booking_status.as_str())
            .bind(payment_status.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> RepoResult<Vec<Booking>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM bookings");
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC");

        let rows = builder.build_query_as::<BookingRow>().fetch_all(&self.pool).await?;
        convert_rows(rows)
    }

    async fn count_bookings(&self, filter: &BookingFilter) -> RepoResult<u64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM bookings");
        push_filter(&mut builder, filter);

        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(u64::try_from(count)?)
    }

    async fn completed_revenue(&self) -> RepoResult<i64> {
        let revenue: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_amount), 0)::BIGINT FROM bookings WHERE payment_status = 'completed'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(revenue)
    }
}
