pub mod card_queries;
pub mod route_price_queries;
