//! Narrative analysis client - one LLM call with fail-open degradation
//!
//! A single attempt against the Anthropic Messages API with a bounded
//! timeout. Any transport error, non-success status, or response-shape
//! mismatch yields the fixed fallback analysis instead of an error, so
//! the orchestrator never sees a hard failure from this component.

use crate::analysis::parse;
use crate::analysis::types::{
    FinancingLikelihood, MarketPosition, NarrativeAnalysis, Provenance, ValuationAssessment,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MODEL: &str = "claude-3-haiku-20240307";
const MAX_TOKENS: u32 = 2000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait NarrativeClient: Send + Sync {
    /// Infallible by contract: degraded results substitute for errors
    async fn analyze(&self, prompt: &str) -> NarrativeAnalysis;
}

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_url: ANTHROPIC_BASE_URL.to_string(),
            model: MODEL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    async fn request_completion(&self, prompt: &str) -> anyhow::Result<String> {
        let body = MessageRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("LLM API returned {}", status));
        }

        let payload: MessageResponse = response.json().await?;
        let text = payload
            .content
            .first()
            .map(|block| block.text.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM response carried no content blocks"))?;

        Ok(text)
    }
}

#[async_trait]
impl NarrativeClient for AnthropicClient {
    async fn analyze(&self, prompt: &str) -> NarrativeAnalysis {
        match self.request_completion(prompt).await {
            Ok(text) => {
                let analysis = parse::parse(&text);
                info!("Narrative analysis provenance: {:?}", analysis.provenance);
                analysis
            }
            Err(err) => {
                warn!("Narrative analysis failed, substituting fallback: {}", err);
                fallback_analysis()
            }
        }
    }
}

/// The fixed, hand-authored fallback substituted whenever the LLM call
/// fails. Identical on every invocation.
pub fn fallback_analysis() -> NarrativeAnalysis {
    NarrativeAnalysis {
        deal_score: 7.5,
        summary: "This property shows good investment potential based on the available data and market conditions.".to_string(),
        strengths: vec![
            "Property is in good condition".to_string(),
            "Market shows steady appreciation".to_string(),
            "Good rental demand in area".to_string(),
        ],
        risks: vec![
            "Market conditions may change".to_string(),
            "Property may need maintenance".to_string(),
            "Local regulations should be verified".to_string(),
        ],
        recommendations: vec![
            "Conduct thorough property inspection".to_string(),
            "Verify rental comps in the area".to_string(),
            "Consider negotiating price".to_string(),
        ],
        valuation_assessment: ValuationAssessment::Market,
        financing_likelihood: FinancingLikelihood::ConventionalOnly,
        top_red_flag: "Property condition requires thorough inspection".to_string(),
        market_position: MarketPosition::Average,
        exit_strategy: "Long-term hold with gradual appreciation".to_string(),
        provenance: Provenance::Fallback,
    }
}
