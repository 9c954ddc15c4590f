use sqlx::PgPool;

use crate::models::RoutePrice;

pub async fn fetch_route(
    pool: &PgPool,
    origin_city_id: i64,
    destination_city_id: i64,
) -> Result<Option<RoutePrice>, sqlx::Error> {
    sqlx::query_as::<_, RoutePrice>(
        r#"
        SELECT id, origin_city_id, destination_city_id, base_ticket_price_usd,
               price_per_kg_suggested, source, last_updated
        FROM route_prices
        WHERE origin_city_id = $1 AND destination_city_id = $2
        "#,
    )
    .bind(origin_city_id)
    .bind(destination_city_id)
    .fetch_optional(pool)
    .await
}

/// Mean suggested per-kg price over every route leaving the origin.
/// `None` when the origin has no priced routes at all.
pub async fn fetch_origin_average(
    pool: &PgPool,
    origin_city_id: i64,
) -> Result<Option<f64>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<f64>>(
        "SELECT AVG(price_per_kg_suggested) FROM route_prices WHERE origin_city_id = $1",
    )
    .bind(origin_city_id)
    .fetch_one(pool)
    .await
}
