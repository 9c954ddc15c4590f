use async_trait::async_trait;

/// Capability seam for per-category price multipliers.
///
/// Category-specific pricing data has never been wired up on the platform
/// side, so the default implementation reports no multiplier and the engine
/// treats the factor as neutral. A real lookup can be swapped in without
/// touching the aggregator.
#[async_trait]
pub trait CategoryLookup: Send + Sync {
    /// Multiplier for the given product category, if one is known.
    async fn category_factor(&self, category_id: i64) -> Option<f64>;
}

/// Default lookup: no category table available.
pub struct NoopCategoryLookup;

#[async_trait]
impl CategoryLookup for NoopCategoryLookup {
    async fn category_factor(&self, _category_id: i64) -> Option<f64> {
        None
    }
}
