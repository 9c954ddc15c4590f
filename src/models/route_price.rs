use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-route base price, maintained by the admin/ingestion side.
///
/// At most one row exists per ordered (origin, destination) pair. The
/// pricing engine only ever reads these rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoutePrice {
    pub id: Uuid,
    pub origin_city_id: i64,
    pub destination_city_id: i64,
    /// Ticket price for the underlying trip, USD
    pub base_ticket_price_usd: f64,
    /// Derived per-kg price used as the engine's base price
    pub price_per_kg_suggested: f64,
    /// "manual" or the name of the external feed that produced the row
    pub source: String,
    pub last_updated: DateTime<Utc>,
}
