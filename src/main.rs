use anyhow::Result;
use deal_analysis_backend::analysis::market_gateway::{MarketDataSource, StaticMarketGateway};
use deal_analysis_backend::analysis::narrative::{AnthropicClient, NarrativeClient};
use deal_analysis_backend::analysis::orchestrator::AnalysisOrchestrator;
use deal_analysis_backend::analysis::property_gateway::{
    EstatedGateway, MockPropertyGateway, PropertyDataSource,
};
use deal_analysis_backend::analytics::AnalyticsStore;
use deal_analysis_backend::config::Config;
use deal_analysis_backend::routes::{app, waitlist::WaitlistStore, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let property_source: Arc<dyn PropertyDataSource> = match &config.estated_api_key {
        Some(key) => {
            info!("Property data: Estated API (strict: {})", config.property_data_strict);
            Arc::new(EstatedGateway::new(key.clone(), config.property_data_strict))
        }
        None => {
            info!("Property data: no credential configured, using synthetic generator");
            Arc::new(MockPropertyGateway)
        }
    };
    let market_source: Arc<dyn MarketDataSource> = Arc::new(StaticMarketGateway);
    let narrative_client: Arc<dyn NarrativeClient> =
        Arc::new(AnthropicClient::new(config.anthropic_api_key.clone()));

    let state = AppState {
        orchestrator: Arc::new(AnalysisOrchestrator::new(
            property_source,
            market_source,
            narrative_client,
        )),
        analytics: Arc::new(AnalyticsStore::new()),
        waitlist: Arc::new(WaitlistStore::new()),
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("Deal analysis API server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
