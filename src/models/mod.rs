mod route_price;
mod suggestion;

pub use route_price::RoutePrice;
pub use suggestion::{round2, BreakdownStep, Confidence, FactorSet, PriceSource, PriceSuggestion};
