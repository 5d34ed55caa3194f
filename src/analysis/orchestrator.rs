//! Analysis orchestrator - sequences gateways, calculator, prompt and
//! narrative into one response envelope
//!
//! The two gateway fetches have no data dependency and run concurrently.
//! The only error that can surface from here is property-data
//! unavailability in strict mode; everything downstream of the LLM call
//! absorbs its own failures.

use crate::analysis::financials;
use crate::analysis::market_gateway::MarketDataSource;
use crate::analysis::narrative::NarrativeClient;
use crate::analysis::prompt;
use crate::analysis::property_gateway::PropertyDataSource;
use crate::analysis::types::{AnalysisRequest, AnalysisResult};
use crate::error::ApiError;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub struct AnalysisOrchestrator {
    property_source: Arc<dyn PropertyDataSource>,
    market_source: Arc<dyn MarketDataSource>,
    narrative_client: Arc<dyn NarrativeClient>,
}

impl AnalysisOrchestrator {
    pub fn new(
        property_source: Arc<dyn PropertyDataSource>,
        market_source: Arc<dyn MarketDataSource>,
        narrative_client: Arc<dyn NarrativeClient>,
    ) -> Self {
        Self {
            property_source,
            market_source,
            narrative_client,
        }
    }

    /// Run the full pipeline for one validated request
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError> {
        info!(
            "Analyzing property: {} with strategy: {}",
            request.address, request.strategy
        );

        let (property, market) = tokio::join!(
            self.property_source.fetch(&request.address),
            self.market_source.fetch(&request.address),
        );
        let property = property?;
        let market = market?;

        let metrics = financials::compute(&property, request.strategy);

        let prompt_text = prompt::build(&property, &market, request.strategy);
        let insights = self.narrative_client.analyze(&prompt_text).await;

        info!(
            "Analysis complete for {}: dealScore {} ({:?})",
            request.address, insights.deal_score, insights.provenance
        );

        Ok(AnalysisResult {
            address: request.address.clone(),
            strategy: request.strategy,
            basic_info: property,
            financials: metrics,
            ai_insights: insights,
            market_data: market,
            timestamp: Utc::now(),
        })
    }
}
