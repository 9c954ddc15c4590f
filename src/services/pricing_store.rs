use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::error;

use crate::db;
use crate::errors::AppError;
use crate::models::RoutePrice;

/// Supply and demand evidence for a route inside a date window.
#[derive(Debug, Clone, Copy)]
pub struct SupplyDemand {
    /// Active traveler cards departing inside the window
    pub travelers: i64,
    /// Active sender cards whose time frame overlaps the window
    pub senders: i64,
}

/// Read-only view of the storage layer the pricing engine depends on.
///
/// Absent data comes back as `None` or zero counts; only connectivity-level
/// failures surface as errors, and those propagate to the caller untouched.
#[async_trait]
pub trait PricingStore: Send + Sync {
    async fn get_route_price(
        &self,
        origin_city_id: i64,
        destination_city_id: i64,
    ) -> Result<Option<RoutePrice>, AppError>;

    async fn get_average_origin_price(&self, origin_city_id: i64) -> Result<Option<f64>, AppError>;

    async fn count_route_listings(
        &self,
        origin_city_id: i64,
        destination_city_id: i64,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError>;

    async fn count_supply_demand(
        &self,
        origin_city_id: i64,
        destination_city_id: i64,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<SupplyDemand, AppError>;
}

/// Postgres-backed store used in production.
pub struct PgPricingStore {
    pool: PgPool,
}

impl PgPricingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PricingStore for PgPricingStore {
    async fn get_route_price(
        &self,
        origin_city_id: i64,
        destination_city_id: i64,
    ) -> Result<Option<RoutePrice>, AppError> {
        db::route_price_queries::fetch_route(&self.pool, origin_city_id, destination_city_id)
            .await
            .map_err(|e| {
                error!(
                    "Failed to fetch route price for {} -> {}: {}",
                    origin_city_id, destination_city_id, e
                );
                AppError::Db(e)
            })
    }

    async fn get_average_origin_price(&self, origin_city_id: i64) -> Result<Option<f64>, AppError> {
        db::route_price_queries::fetch_origin_average(&self.pool, origin_city_id)
            .await
            .map_err(|e| {
                error!("Failed to fetch origin average for {}: {}", origin_city_id, e);
                AppError::Db(e)
            })
    }

    async fn count_route_listings(
        &self,
        origin_city_id: i64,
        destination_city_id: i64,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        db::card_queries::count_created_on_route(
            &self.pool,
            origin_city_id,
            destination_city_id,
            since,
        )
        .await
        .map_err(|e| {
            error!(
                "Failed to count listings for {} -> {}: {}",
                origin_city_id, destination_city_id, e
            );
            AppError::Db(e)
        })
    }

    async fn count_supply_demand(
        &self,
        origin_city_id: i64,
        destination_city_id: i64,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<SupplyDemand, AppError> {
        let travelers = db::card_queries::count_travelers_in_window(
            &self.pool,
            origin_city_id,
            destination_city_id,
            window_start,
            window_end,
        )
        .await
        .map_err(|e| {
            error!(
                "Failed to count travelers for {} -> {}: {}",
                origin_city_id, destination_city_id, e
            );
            AppError::Db(e)
        })?;

        let senders = db::card_queries::count_senders_overlapping(
            &self.pool,
            origin_city_id,
            destination_city_id,
            window_start,
            window_end,
        )
        .await
        .map_err(|e| {
            error!(
                "Failed to count senders for {} -> {}: {}",
                origin_city_id, destination_city_id, e
            );
            AppError::Db(e)
        })?;

        Ok(SupplyDemand { travelers, senders })
    }
}
