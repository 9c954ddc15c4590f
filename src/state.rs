use std::sync::Arc;

use crate::services::pricing_service::PricingEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<PricingEngine>,
}
