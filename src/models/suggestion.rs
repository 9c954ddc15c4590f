use serde::{Deserialize, Serialize};

/// Where the base price for a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    /// Direct row for the requested route
    Database,
    /// Row for the opposite direction of the route
    Reverse,
    /// Origin-wide average or the fixed fallback constant
    Estimate,
}

/// Qualitative reliability rating of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Classify an accumulated reliability score expressed in tenths
    /// (so the 0.8 and 0.5 thresholds are exact integer comparisons).
    pub fn from_tenths(tenths: u32) -> Self {
        if tenths >= 8 {
            Confidence::High
        } else if tenths >= 5 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// The six pricing multipliers.
///
/// A fixed-shape struct rather than a name-keyed map, so a factor can't be
/// silently dropped; it serializes to a JSON map at the API boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FactorSet {
    pub route: f64,
    pub season: f64,
    pub demand: f64,
    pub urgency: f64,
    pub weight: f64,
    pub category: f64,
}

impl FactorSet {
    pub fn product(&self) -> f64 {
        self.route * self.season * self.demand * self.urgency * self.weight * self.category
    }

    /// Copy with every factor rounded to 2 decimal places, for the response
    /// body. Internal math stays unrounded.
    pub fn rounded(&self) -> Self {
        Self {
            route: round2(self.route),
            season: round2(self.season),
            demand: round2(self.demand),
            urgency: round2(self.urgency),
            weight: round2(self.weight),
            category: round2(self.category),
        }
    }
}

/// One cumulative step in the price breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownStep {
    pub label: String,
    pub factor: f64,
    /// Running total after applying this step's factor, USD/kg
    pub value: f64,
}

/// The engine's output. Built fresh per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSuggestion {
    pub suggested_price_per_kg: f64,
    pub currency: String,
    pub min_price: f64,
    pub max_price: f64,
    pub confidence: Confidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_ticket_price: Option<f64>,
    pub source: PriceSource,
    pub factors: FactorSet,
    pub breakdown: Vec<BreakdownStep>,
    pub message: String,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_and_confidence_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&PriceSource::Database).unwrap(), "\"database\"");
        assert_eq!(serde_json::to_string(&PriceSource::Reverse).unwrap(), "\"reverse\"");
        assert_eq!(serde_json::to_string(&Confidence::Low).unwrap(), "\"low\"");
    }

    #[test]
    fn test_confidence_thresholds_exact() {
        assert_eq!(Confidence::from_tenths(10), Confidence::High);
        assert_eq!(Confidence::from_tenths(8), Confidence::High);
        assert_eq!(Confidence::from_tenths(7), Confidence::Medium);
        assert_eq!(Confidence::from_tenths(5), Confidence::Medium);
        assert_eq!(Confidence::from_tenths(4), Confidence::Low);
        assert_eq!(Confidence::from_tenths(0), Confidence::Low);
    }

    #[test]
    fn test_factor_product() {
        let factors = FactorSet {
            route: 1.3,
            season: 1.25,
            demand: 1.0,
            urgency: 1.0,
            weight: 0.9,
            category: 1.0,
        };
        assert!((factors.product() - 1.3 * 1.25 * 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(7.3125), 7.31);
        assert_eq!(round2(7.315), 7.32);
        assert_eq!(round2(1.0), 1.0);
    }
}
