use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::PriceSuggestion;
use crate::services::pricing_service::PriceQuery;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_price_suggestion))
}

/// Raw query params. City ids arrive as strings so a malformed id can be
/// rejected with 422 instead of axum's blanket 400.
#[derive(Debug, Deserialize)]
struct PriceSuggestionParams {
    origin_city_id: Option<String>,
    destination_city_id: Option<String>,
    travel_date: Option<String>,
    weight: Option<f64>,
    category_id: Option<i64>,
}

async fn get_price_suggestion(
    Query(params): Query<PriceSuggestionParams>,
    State(state): State<AppState>,
) -> Result<Json<PriceSuggestion>, AppError> {
    let origin_city_id = require_city_id(params.origin_city_id.as_deref(), "origin_city_id")?;
    let destination_city_id =
        require_city_id(params.destination_city_id.as_deref(), "destination_city_id")?;

    let travel_date = params.travel_date.as_deref().map(parse_travel_date).transpose()?;

    if let Some(weight) = params.weight {
        if weight <= 0.0 {
            return Err(AppError::UnprocessableEntity {
                field: "weight",
                reason: "must be positive".to_string(),
            });
        }
    }

    info!(
        "GET /price-suggestion - route {} -> {}",
        origin_city_id, destination_city_id
    );

    let query = PriceQuery {
        origin_city_id,
        destination_city_id,
        travel_date,
        weight: params.weight,
        category_id: params.category_id,
    };

    let suggestion = state.engine.calculate(&query).await.map_err(|e| {
        error!(
            "Failed to compute price suggestion for route {} -> {}: {}",
            origin_city_id, destination_city_id, e
        );
        e
    })?;
    Ok(Json(suggestion))
}

fn require_city_id(value: Option<&str>, field: &'static str) -> Result<i64, AppError> {
    let raw = value.ok_or(AppError::UnprocessableEntity {
        field,
        reason: "required".to_string(),
    })?;
    raw.parse::<i64>().map_err(|_| AppError::UnprocessableEntity {
        field,
        reason: format!("not a valid city id: {}", raw),
    })
}

/// Accepts a full RFC 3339 timestamp or a bare calendar date (midnight UTC).
fn parse_travel_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(AppError::Validation(format!("Malformed travel_date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    #[test]
    fn test_require_city_id() {
        assert_eq!(require_city_id(Some("42"), "origin_city_id").unwrap(), 42);
        assert!(require_city_id(None, "origin_city_id").is_err());
        assert!(require_city_id(Some("abc"), "origin_city_id").is_err());
        assert!(require_city_id(Some("1.5"), "origin_city_id").is_err());
    }

    #[test]
    fn test_parse_travel_date_rfc3339() {
        let parsed = parse_travel_date("2026-07-15T09:30:00Z").unwrap();
        assert_eq!(parsed.date_naive().month(), 7);
        assert_eq!(parsed.date_naive().day(), 15);
    }

    #[test]
    fn test_parse_travel_date_bare_date() {
        let parsed = parse_travel_date("2026-07-15").unwrap();
        assert_eq!(parsed.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_parse_travel_date_malformed() {
        assert!(matches!(parse_travel_date("next tuesday"), Err(AppError::Validation(_))));
        assert!(matches!(parse_travel_date("2026-15-99"), Err(AppError::Validation(_))));
    }
}
