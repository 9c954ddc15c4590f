use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::config::PricingConfig;
use crate::errors::AppError;
use crate::models::{round2, BreakdownStep, Confidence, FactorSet, PriceSource, PriceSuggestion};
use crate::services::base_price_service;
use crate::services::category_lookup::CategoryLookup;
use crate::services::factors;
use crate::services::pricing_store::PricingStore;

/// A validated price-suggestion request.
#[derive(Debug, Clone)]
pub struct PriceQuery {
    pub origin_city_id: i64,
    pub destination_city_id: i64,
    pub travel_date: Option<DateTime<Utc>>,
    pub weight: Option<f64>,
    pub category_id: Option<i64>,
}

/// The pricing aggregator. Holds only immutable configuration and handles
/// to its read capabilities; every request is independent.
pub struct PricingEngine {
    config: PricingConfig,
    store: Arc<dyn PricingStore>,
    categories: Arc<dyn CategoryLookup>,
}

impl PricingEngine {
    pub fn new(
        config: PricingConfig,
        store: Arc<dyn PricingStore>,
        categories: Arc<dyn CategoryLookup>,
    ) -> Self {
        Self { config, store, categories }
    }

    /// Compute a price suggestion for a route: two store reads (base price,
    /// route/demand counts), then pure arithmetic.
    pub async fn calculate(&self, query: &PriceQuery) -> Result<PriceSuggestion, AppError> {
        self.calculate_at(query, Utc::now()).await
    }

    /// Same as [`calculate`](Self::calculate) but with an explicit
    /// evaluation instant, so urgency and window math are reproducible.
    pub async fn calculate_at(
        &self,
        query: &PriceQuery,
        now: DateTime<Utc>,
    ) -> Result<PriceSuggestion, AppError> {
        let base = base_price_service::resolve(
            self.store.as_ref(),
            &self.config,
            query.origin_city_id,
            query.destination_city_id,
        )
        .await?;

        let since = now - Duration::days(self.config.route_window_days);
        let monthly_count = self
            .store
            .count_route_listings(query.origin_city_id, query.destination_city_id, since)
            .await?;

        let window_center = query.travel_date.unwrap_or(now);
        let half_window = Duration::days(self.config.demand_window_days);
        let supply_demand = self
            .store
            .count_supply_demand(
                query.origin_city_id,
                query.destination_city_id,
                window_center - half_window,
                window_center + half_window,
            )
            .await?;

        let category = match query.category_id {
            Some(id) => self.categories.category_factor(id).await.unwrap_or(1.0),
            None => 1.0,
        };

        let factor_set = FactorSet {
            route: factors::route_factor(monthly_count),
            season: query
                .travel_date
                .map(|d| factors::season_factor(d.date_naive()))
                .unwrap_or(1.0),
            demand: factors::demand_factor(supply_demand.travelers, supply_demand.senders),
            urgency: query
                .travel_date
                .map(|d| factors::urgency_factor((d - now).num_days()))
                .unwrap_or(1.0),
            weight: query.weight.map(factors::weight_factor).unwrap_or(1.0),
            category,
        };

        let multiplier = factor_set.product();
        let raw_price = base.price_per_kg * multiplier * self.config.global_multiplier;
        let final_price = raw_price.clamp(self.config.min_price, self.config.max_price);

        // Confidence, breakdown and message all derive from the base price
        // and the factors, not from the clamped result.
        let confidence = score_confidence(base.source, &factor_set);
        let breakdown = build_breakdown(base.price_per_kg, &factor_set);
        let message = build_message(base.source, &factor_set);

        info!(
            "Price suggestion for route {} -> {}: {:.2} USD/kg (source {:?}, confidence {:?})",
            query.origin_city_id, query.destination_city_id, final_price, base.source, confidence
        );

        Ok(PriceSuggestion {
            suggested_price_per_kg: round2(final_price),
            currency: "USD".to_string(),
            min_price: round2(final_price * (1.0 - self.config.range_band)),
            max_price: round2(final_price * (1.0 + self.config.range_band)),
            confidence,
            base_ticket_price: base.ticket_price_usd,
            source: base.source,
            factors: factor_set.rounded(),
            breakdown,
            message,
        })
    }
}

/// Reliability points in tenths: base source 4/3/1, demand signal 3/1,
/// route signal 2/1, season always 1. >= 8 is high, >= 5 medium.
fn score_confidence(source: PriceSource, factor_set: &FactorSet) -> Confidence {
    let mut tenths = match source {
        PriceSource::Database => 4,
        PriceSource::Reverse => 3,
        PriceSource::Estimate => 1,
    };
    // A demand factor of exactly 1.50 may be a genuine surge value or the
    // no-supply sentinel; the ambiguity is accepted and scored as no signal.
    tenths += if factor_set.demand != factors::NO_SUPPLY_DEMAND_FACTOR { 3 } else { 1 };
    tenths += if factor_set.route != factors::RARE_ROUTE_FACTOR { 2 } else { 1 };
    tenths += 1;
    Confidence::from_tenths(tenths)
}

/// Cumulative trace from the base price through every non-neutral factor,
/// in fixed order. Neutral (1.0) factors are omitted.
fn build_breakdown(base_price_per_kg: f64, factor_set: &FactorSet) -> Vec<BreakdownStep> {
    let mut steps = vec![BreakdownStep {
        label: "Base price".to_string(),
        factor: 1.0,
        value: round2(base_price_per_kg),
    }];

    let labelled: [(f64, &str); 6] = [
        (
            factor_set.route,
            if factor_set.route > 1.0 { "Route (under-served)" } else { "Route (competitive)" },
        ),
        (
            factor_set.season,
            if factor_set.season > 1.0 { "Seasonal (peak)" } else { "Seasonal (off-peak)" },
        ),
        (
            factor_set.demand,
            if factor_set.demand > 1.0 { "Demand (high)" } else { "Demand (low)" },
        ),
        (factor_set.urgency, "Urgency (last-minute)"),
        (
            factor_set.weight,
            if factor_set.weight > 1.0 { "Weight (small package)" } else { "Weight (bulk)" },
        ),
        (factor_set.category, "Category"),
    ];

    let mut running = base_price_per_kg;
    for (factor, label) in labelled {
        if factor != 1.0 {
            running *= factor;
            steps.push(BreakdownStep {
                label: label.to_string(),
                factor: round2(factor),
                value: round2(running),
            });
        }
    }
    steps
}

/// Short human-readable note listing the notable deviations, or a generic
/// line when nothing stands out.
fn build_message(source: PriceSource, factor_set: &FactorSet) -> String {
    let mut clauses: Vec<&str> = Vec::new();
    if factor_set.season > 1.0 {
        clauses.push("peak season");
    } else if factor_set.season < 1.0 {
        clauses.push("off-peak season");
    }
    if factor_set.demand >= 1.3 {
        clauses.push("high demand");
    } else if factor_set.demand < 0.9 {
        clauses.push("low demand");
    }
    if factor_set.urgency >= 1.2 {
        clauses.push("urgent travel");
    }
    if factor_set.route < 1.0 {
        clauses.push("popular route");
    } else if factor_set.route >= factors::RARE_ROUTE_FACTOR {
        clauses.push("rare route");
    }

    if !clauses.is_empty() {
        format!("Price adjusted for: {}", clauses.join(", "))
    } else if source == PriceSource::Estimate {
        "Estimated price (limited data for this route)".to_string()
    } else {
        "Standard pricing for this route".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral_factors() -> FactorSet {
        FactorSet { route: 1.0, season: 1.0, demand: 1.0, urgency: 1.0, weight: 1.0, category: 1.0 }
    }

    #[test]
    fn test_confidence_full_signal_is_high() {
        let confidence = score_confidence(PriceSource::Database, &neutral_factors());
        // 4 + 3 + 2 + 1 = 10 tenths
        assert_eq!(confidence, Confidence::High);
    }

    #[test]
    fn test_confidence_boundary_at_eight_tenths() {
        // reverse (3) + demand signal (3) + rare route (1) + season (1) = 8
        let factors = FactorSet { route: 1.30, ..neutral_factors() };
        assert_eq!(score_confidence(PriceSource::Reverse, &factors), Confidence::High);
    }

    #[test]
    fn test_confidence_boundary_at_five_tenths() {
        // estimate (1) + no demand signal (1) + route signal (2) + season (1) = 5
        let factors = FactorSet { demand: 1.50, ..neutral_factors() };
        assert_eq!(score_confidence(PriceSource::Estimate, &factors), Confidence::Medium);
    }

    #[test]
    fn test_confidence_no_signals_is_low() {
        // estimate (1) + sentinel demand (1) + rare route (1) + season (1) = 4
        let factors = FactorSet { route: 1.30, demand: 1.50, ..neutral_factors() };
        assert_eq!(score_confidence(PriceSource::Estimate, &factors), Confidence::Low);
    }

    #[test]
    fn test_demand_sentinel_ambiguity_preserved() {
        // A legitimately computed 1.50 surge scores the same as no signal.
        let factors = FactorSet { demand: 1.50, ..neutral_factors() };
        assert_eq!(score_confidence(PriceSource::Database, &factors), Confidence::Medium);
    }

    #[test]
    fn test_breakdown_skips_neutral_factors() {
        let steps = build_breakdown(4.0, &neutral_factors());
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].label, "Base price");
        assert_eq!(steps[0].factor, 1.0);
        assert_eq!(steps[0].value, 4.0);
    }

    #[test]
    fn test_breakdown_cumulative_in_fixed_order() {
        let factors = FactorSet {
            route: 1.30,
            season: 1.25,
            demand: 1.0,
            urgency: 1.0,
            weight: 0.90,
            category: 1.0,
        };
        let steps = build_breakdown(2.0, &factors);
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[1].label, "Route (under-served)");
        assert_eq!(steps[1].value, 2.6);
        assert_eq!(steps[2].label, "Seasonal (peak)");
        assert_eq!(steps[2].value, 3.25);
        assert_eq!(steps[3].label, "Weight (bulk)");
        // Last step reconstructs base * product of non-neutral factors
        let expected = 2.0 * factors.product();
        assert!((steps[3].value - round2(expected)).abs() < 1e-9);
    }

    #[test]
    fn test_message_lists_notable_deviations() {
        let factors = FactorSet {
            route: 0.85,
            season: 1.25,
            demand: 1.45,
            urgency: 1.35,
            weight: 1.0,
            category: 1.0,
        };
        let message = build_message(PriceSource::Database, &factors);
        assert_eq!(
            message,
            "Price adjusted for: peak season, high demand, urgent travel, popular route"
        );
    }

    #[test]
    fn test_message_offpeak_and_low_demand() {
        let factors = FactorSet { season: 0.90, demand: 0.80, ..neutral_factors() };
        let message = build_message(PriceSource::Database, &factors);
        assert_eq!(message, "Price adjusted for: off-peak season, low demand");
    }

    #[test]
    fn test_message_fallbacks() {
        assert_eq!(
            build_message(PriceSource::Estimate, &neutral_factors()),
            "Estimated price (limited data for this route)"
        );
        assert_eq!(
            build_message(PriceSource::Database, &neutral_factors()),
            "Standard pricing for this route"
        );
    }
}
