pub mod base_price_service;
pub mod category_lookup;
pub mod factors;
pub mod pricing_service;
pub mod pricing_store;
