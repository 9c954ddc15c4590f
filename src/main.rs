use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use packmate_backend::app;
use packmate_backend::config::PricingConfig;
use packmate_backend::logging::{init_logging, LoggingConfig};
use packmate_backend::services::category_lookup::NoopCategoryLookup;
use packmate_backend::services::pricing_service::PricingEngine;
use packmate_backend::services::pricing_store::PgPricingStore;
use packmate_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_logging(LoggingConfig::from_env()).map_err(|e| anyhow::anyhow!("{e}"))?;

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    let engine = PricingEngine::new(
        PricingConfig::default(),
        Arc::new(PgPricingStore::new(pool)),
        Arc::new(NoopCategoryLookup),
    );
    let state = AppState { engine: Arc::new(engine) };
    let app = app::create_app(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Packmate pricing backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
