use tracing::warn;

use crate::config::PricingConfig;
use crate::errors::AppError;
use crate::models::PriceSource;
use crate::services::pricing_store::PricingStore;

/// Outcome of the base-price fallback chain. Not persisted.
#[derive(Debug, Clone)]
pub struct BasePriceResolution {
    pub price_per_kg: f64,
    pub ticket_price_usd: Option<f64>,
    pub source: PriceSource,
}

/// Resolve a per-kg base price for a directed route.
///
/// Missing data never fails the request: the chain falls through the direct
/// row, the reverse-direction row, the origin-wide average, and finally the
/// configured floor constant. Store errors still propagate.
pub async fn resolve(
    store: &dyn PricingStore,
    config: &PricingConfig,
    origin_city_id: i64,
    destination_city_id: i64,
) -> Result<BasePriceResolution, AppError> {
    if let Some(row) = store.get_route_price(origin_city_id, destination_city_id).await? {
        return Ok(BasePriceResolution {
            price_per_kg: row.price_per_kg_suggested,
            ticket_price_usd: Some(row.base_ticket_price_usd),
            source: PriceSource::Database,
        });
    }

    if let Some(row) = store.get_route_price(destination_city_id, origin_city_id).await? {
        return Ok(BasePriceResolution {
            price_per_kg: row.price_per_kg_suggested,
            ticket_price_usd: Some(row.base_ticket_price_usd),
            source: PriceSource::Reverse,
        });
    }

    if let Some(average) = store.get_average_origin_price(origin_city_id).await? {
        return Ok(BasePriceResolution {
            price_per_kg: average,
            ticket_price_usd: None,
            source: PriceSource::Estimate,
        });
    }

    warn!(
        "No price data for route {} -> {}, using fallback constant",
        origin_city_id, destination_city_id
    );
    Ok(BasePriceResolution {
        price_per_kg: config.fallback_price_per_kg,
        ticket_price_usd: None,
        source: PriceSource::Estimate,
    })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::models::RoutePrice;
    use crate::services::pricing_store::SupplyDemand;

    struct FakeStore {
        routes: Vec<RoutePrice>,
        origin_average: Option<f64>,
    }

    #[async_trait]
    impl PricingStore for FakeStore {
        async fn get_route_price(
            &self,
            origin_city_id: i64,
            destination_city_id: i64,
        ) -> Result<Option<RoutePrice>, AppError> {
            Ok(self
                .routes
                .iter()
                .find(|r| {
                    r.origin_city_id == origin_city_id
                        && r.destination_city_id == destination_city_id
                })
                .cloned())
        }

        async fn get_average_origin_price(&self, _origin: i64) -> Result<Option<f64>, AppError> {
            Ok(self.origin_average)
        }

        async fn count_route_listings(
            &self,
            _origin: i64,
            _destination: i64,
            _since: DateTime<Utc>,
        ) -> Result<i64, AppError> {
            Ok(0)
        }

        async fn count_supply_demand(
            &self,
            _origin: i64,
            _destination: i64,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<SupplyDemand, AppError> {
            Ok(SupplyDemand { travelers: 0, senders: 0 })
        }
    }

    fn route(origin: i64, destination: i64, ticket: f64, per_kg: f64) -> RoutePrice {
        RoutePrice {
            id: Uuid::new_v4(),
            origin_city_id: origin,
            destination_city_id: destination,
            base_ticket_price_usd: ticket,
            price_per_kg_suggested: per_kg,
            source: "manual".to_string(),
            last_updated: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_direct_route_wins() {
        let store = FakeStore {
            routes: vec![route(1, 2, 300.0, 4.2), route(2, 1, 280.0, 3.9)],
            origin_average: Some(5.0),
        };
        let result = resolve(&store, &PricingConfig::default(), 1, 2).await.unwrap();
        assert_eq!(result.source, PriceSource::Database);
        assert_eq!(result.price_per_kg, 4.2);
        assert_eq!(result.ticket_price_usd, Some(300.0));
    }

    #[tokio::test]
    async fn test_reverse_route_second() {
        let store = FakeStore {
            routes: vec![route(2, 1, 280.0, 3.9)],
            origin_average: Some(5.0),
        };
        let result = resolve(&store, &PricingConfig::default(), 1, 2).await.unwrap();
        assert_eq!(result.source, PriceSource::Reverse);
        assert_eq!(result.price_per_kg, 3.9);
        assert_eq!(result.ticket_price_usd, Some(280.0));
    }

    #[tokio::test]
    async fn test_origin_average_third_has_no_ticket_price() {
        let store = FakeStore { routes: vec![], origin_average: Some(5.5) };
        let result = resolve(&store, &PricingConfig::default(), 1, 2).await.unwrap();
        assert_eq!(result.source, PriceSource::Estimate);
        assert_eq!(result.price_per_kg, 5.5);
        assert_eq!(result.ticket_price_usd, None);
    }

    #[tokio::test]
    async fn test_fallback_constant_last() {
        let store = FakeStore { routes: vec![], origin_average: None };
        let config = PricingConfig::default();
        let result = resolve(&store, &config, 1, 2).await.unwrap();
        assert_eq!(result.source, PriceSource::Estimate);
        assert_eq!(result.price_per_kg, config.fallback_price_per_kg);
        assert_eq!(result.ticket_price_usd, None);
    }
}
