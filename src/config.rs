/// Tuning constants for the pricing engine.
///
/// Constructed once at startup and handed to `PricingEngine::new`; there is
/// no process-global settings object.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Overall calibration applied on top of the per-factor multipliers
    pub global_multiplier: f64,
    /// Hard floor for a suggested per-kg price, USD
    pub min_price: f64,
    /// Hard ceiling for a suggested per-kg price, USD
    pub max_price: f64,
    /// Last-resort per-kg price when no route data exists at all, USD
    pub fallback_price_per_kg: f64,
    /// Half-width of the quoted price range (0.15 = ±15%)
    pub range_band: f64,
    /// Trailing window for the route-competition listing count
    pub route_window_days: i64,
    /// Half-width of the supply/demand window around the travel date
    pub demand_window_days: i64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            global_multiplier: 2.5,
            min_price: 1.0,
            max_price: 50.0,
            fallback_price_per_kg: 1.5,
            range_band: 0.15,
            route_window_days: 30,
            demand_window_days: 7,
        }
    }
}
