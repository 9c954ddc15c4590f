use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Cards created on the exact route since the given instant, regardless of
/// direction of travel role. Feeds the route-competition factor.
pub async fn count_created_on_route(
    pool: &PgPool,
    origin_city_id: i64,
    destination_city_id: i64,
    since: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM cards
        WHERE origin_city_id = $1
          AND destination_city_id = $2
          AND created_at >= $3
        "#,
    )
    .bind(origin_city_id)
    .bind(destination_city_id)
    .bind(since)
    .fetch_one(pool)
    .await
}

/// Active traveler cards whose departure timestamp falls inside the window.
pub async fn count_travelers_in_window(
    pool: &PgPool,
    origin_city_id: i64,
    destination_city_id: i64,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM cards
        WHERE origin_city_id = $1
          AND destination_city_id = $2
          AND is_sender = FALSE
          AND status = 'active'
          AND ticket_date_time BETWEEN $3 AND $4
        "#,
    )
    .bind(origin_city_id)
    .bind(destination_city_id)
    .bind(window_start)
    .bind(window_end)
    .fetch_one(pool)
    .await
}

/// Active sender cards whose requested time frame overlaps the window.
pub async fn count_senders_overlapping(
    pool: &PgPool,
    origin_city_id: i64,
    destination_city_id: i64,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM cards
        WHERE origin_city_id = $1
          AND destination_city_id = $2
          AND is_sender = TRUE
          AND status = 'active'
          AND start_time_frame <= $4
          AND end_time_frame >= $3
        "#,
    )
    .bind(origin_city_id)
    .bind(destination_city_id)
    .bind(window_start)
    .bind(window_end)
    .fetch_one(pool)
    .await
}
