use serde::Serialize;

use crate::booking::{BookingFilter, BookingStatus};
use crate::repository::Repositories;
use crate::user::Role;
use crate::CoreResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCounts {
    pub total: u64,
    pub confirmed: u64,
    pub cancelled: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub bookings: BookingCounts,
    pub revenue: i64,
    pub flights: u64,
    pub buses: u64,
    pub routes: u64,
    pub users: u64,
}

pub struct StatsService {
    repos: Repositories,
}

impl StatsService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn dashboard(&self) -> CoreResult<DashboardStats> {
        let bookings = &self.repos.bookings;
        let with_status = |status| BookingFilter {
            status: Some(status),
            ..Default::default()
        };

        Ok(DashboardStats {
            bookings: BookingCounts {
                total: bookings.count_bookings(&BookingFilter::default()).await?,
                confirmed: bookings.count_bookings(&with_status(BookingStatus::Confirmed)).await?,
                cancelled: bookings.count_bookings(&with_status(BookingStatus::Cancelled)).await?,
            },
            revenue: bookings.completed_revenue().await?,
            flights: self.repos.flights.count_flights().await?,
            buses: self.repos.buses.count_buses().await?,
            routes: self.repos.routes.count_routes().await?,
            users: self.repos.users.count_users(Some(Role::User)).await?,
        })
    }
}
