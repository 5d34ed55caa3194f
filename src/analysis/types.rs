//! Core data types for the analysis pipeline
//! Pure data structures with no behavior

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Investment strategies supported by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Rental,
    Flip,
    Brrrr,
    Wholesale,
}

impl Strategy {
    /// Parse from the wire value, e.g. "rental"
    pub fn parse(s: &str) -> Option<Strategy> {
        match s {
            "rental" => Some(Strategy::Rental),
            "flip" => Some(Strategy::Flip),
            "brrrr" => Some(Strategy::Brrrr),
            "wholesale" => Some(Strategy::Wholesale),
            _ => None,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Rental => write!(f, "rental"),
            Strategy::Flip => write!(f, "flip"),
            Strategy::Brrrr => write!(f, "brrrr"),
            Strategy::Wholesale => write!(f, "wholesale"),
        }
    }
}

/// Property types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    SingleFamily,
    MultiFamily,
    Condo,
    Townhouse,
    Commercial,
    Land,
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyType::SingleFamily => write!(f, "single_family"),
            PropertyType::MultiFamily => write!(f, "multi_family"),
            PropertyType::Condo => write!(f, "condo"),
            PropertyType::Townhouse => write!(f, "townhouse"),
            PropertyType::Commercial => write!(f, "commercial"),
            PropertyType::Land => write!(f, "land"),
        }
    }
}

/// Canonical, gateway-normalized view of one address.
///
/// Every field carries a defined default when the upstream source omits it,
/// so downstream consumers never see a missing value. Constructed once per
/// request by the property gateway and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub address: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub square_footage: u32,
    pub year_built: u32,
    pub lot_size_acres: f64,
    pub property_type: PropertyType,
}

/// One comparable sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparable {
    pub address: String,
    pub price: f64,
    pub square_footage: u32,
    pub price_per_square_foot: f64,
}

/// Comparable-sales snapshot for one address.
/// Comparables are ordered by relevance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketContext {
    pub median_price: f64,
    pub price_appreciation_percent: f64,
    pub average_days_on_market: u32,
    pub comparables: Vec<Comparable>,
}

/// Monthly rent estimate band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentRange {
    pub min: f64,
    pub max: f64,
}

/// Deterministic derived numbers. Pure function of (PropertyRecord, Strategy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    pub estimated_rent_range: RentRange,
    pub monthly_cash_flow: f64,
    pub cap_rate_percent: f64,
    pub cash_on_cash_return_percent: f64,
    pub simplified_roi_percent: f64,
    pub monthly_expenses: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuationAssessment {
    Overvalued,
    Market,
    Undervalued,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinancingLikelihood {
    #[serde(rename = "fha-eligible")]
    FhaEligible,
    #[serde(rename = "conventional-only")]
    ConventionalOnly,
    #[serde(rename = "cash-required")]
    CashRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketPosition {
    Better,
    Average,
    Worse,
}

/// Whether a narrative came from the model or from the canned fallback.
/// Surfaced in the envelope and in logs so a default dealScore of 7.5 can
/// be told apart from a genuine one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Model,
    Fallback,
}

/// Strategy-specific qualitative result, either LLM-derived or fallback.
/// Always fully populated - every field has a defined fallback value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeAnalysis {
    pub deal_score: f64,
    pub summary: String,
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
    pub recommendations: Vec<String>,
    pub valuation_assessment: ValuationAssessment,
    pub financing_likelihood: FinancingLikelihood,
    pub top_red_flag: String,
    pub market_position: MarketPosition,
    pub exit_strategy: String,
    pub provenance: Provenance,
}

/// Validated analysis input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub address: String,
    pub strategy: Strategy,
}

/// Final response envelope assembled by the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub address: String,
    pub strategy: Strategy,
    pub basic_info: PropertyRecord,
    pub financials: FinancialMetrics,
    pub ai_insights: NarrativeAnalysis,
    pub market_data: MarketContext,
    pub timestamp: DateTime<Utc>,
}
