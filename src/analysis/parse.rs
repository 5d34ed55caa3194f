//! Response parser - extract a structured analysis from free-form LLM text
//!
//! The model is asked for JSON but replies with prose around it often
//! enough that extraction has to be defensive. The scanner is
//! nesting-aware: it tracks brace depth and string/escape state and only
//! accepts a balanced span, so a reply containing several JSON-like spans
//! cannot mis-extract. Two degradation tiers exist and are both reachable:
//! a balanced span that fails to deserialize, and text with no balanced
//! span at all.

use crate::analysis::types::{
    FinancingLikelihood, MarketPosition, NarrativeAnalysis, Provenance, ValuationAssessment,
};
use serde_json::Value;
use tracing::warn;

/// Find the first balanced `{...}` span in the text.
///
/// Brace characters inside JSON string literals (including escaped quotes)
/// do not affect the depth count.
fn extract_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

fn read_string(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn read_string_list(value: &Value, key: &str, default: &[&str]) -> Vec<String> {
    let items: Vec<String> = value
        .get(key)
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default();

    if items.is_empty() {
        default.iter().map(|s| s.to_string()).collect()
    } else {
        items
    }
}

fn read_deal_score(value: &Value) -> f64 {
    let score = value
        .get("dealScore")
        .and_then(Value::as_f64)
        .unwrap_or(7.5);
    score.clamp(1.0, 10.0)
}

/// Lenient enum readers: the model tends to append reasoning to the enum
/// value ("overvalued - priced above comps"), so classify by substring.
fn read_valuation(value: &Value) -> ValuationAssessment {
    let raw = read_string(value, "valuationAssessment", "market").to_lowercase();
    if raw.contains("under") {
        ValuationAssessment::Undervalued
    } else if raw.contains("over") {
        ValuationAssessment::Overvalued
    } else {
        ValuationAssessment::Market
    }
}

fn read_financing(value: &Value) -> FinancingLikelihood {
    let raw = read_string(value, "financingLikelihood", "conventional-only").to_lowercase();
    if raw.contains("fha") {
        FinancingLikelihood::FhaEligible
    } else if raw.contains("cash") {
        FinancingLikelihood::CashRequired
    } else {
        FinancingLikelihood::ConventionalOnly
    }
}

fn read_market_position(value: &Value) -> MarketPosition {
    let raw = read_string(value, "marketPosition", "average").to_lowercase();
    if raw.contains("better") {
        MarketPosition::Better
    } else if raw.contains("worse") {
        MarketPosition::Worse
    } else {
        MarketPosition::Average
    }
}

/// Build a NarrativeAnalysis from a parsed JSON object, default-filling any
/// absent field so the result is always fully populated.
fn from_value(value: &Value) -> NarrativeAnalysis {
    NarrativeAnalysis {
        deal_score: read_deal_score(value),
        summary: read_string(value, "summary", "Analysis completed successfully."),
        strengths: read_string_list(
            value,
            "strengths",
            &["Good investment opportunity", "Favorable market conditions"],
        ),
        risks: read_string_list(
            value,
            "risks",
            &["Market volatility", "Property condition unknown"],
        ),
        recommendations: read_string_list(
            value,
            "recommendations",
            &["Conduct due diligence", "Verify financial projections"],
        ),
        valuation_assessment: read_valuation(value),
        financing_likelihood: read_financing(value),
        top_red_flag: read_string(
            value,
            "topRedFlag",
            "Property condition requires thorough inspection",
        ),
        market_position: read_market_position(value),
        exit_strategy: read_string(
            value,
            "exitStrategy",
            "Long-term hold with gradual appreciation",
        ),
        provenance: Provenance::Model,
    }
}

/// Degraded analysis used when no structured object could be recovered.
/// The summary is the first line of whatever the model did say.
fn degraded(raw_text: &str) -> NarrativeAnalysis {
    let first_line = raw_text.lines().next().unwrap_or("").trim();
    let summary = if first_line.is_empty() {
        "Analysis completed successfully.".to_string()
    } else {
        first_line.to_string()
    };

    NarrativeAnalysis {
        deal_score: 7.5,
        summary,
        strengths: vec![
            "Good investment opportunity".to_string(),
            "Favorable market conditions".to_string(),
        ],
        risks: vec![
            "Market volatility".to_string(),
            "Property condition unknown".to_string(),
        ],
        recommendations: vec![
            "Conduct due diligence".to_string(),
            "Verify financial projections".to_string(),
        ],
        valuation_assessment: ValuationAssessment::Market,
        financing_likelihood: FinancingLikelihood::ConventionalOnly,
        top_red_flag: "Property condition requires thorough inspection".to_string(),
        market_position: MarketPosition::Average,
        exit_strategy: "Long-term hold with gradual appreciation".to_string(),
        provenance: Provenance::Fallback,
    }
}

/// Parse free-form model output into a fully-populated NarrativeAnalysis
pub fn parse(raw_text: &str) -> NarrativeAnalysis {
    match extract_balanced_object(raw_text) {
        Some(span) => match serde_json::from_str::<Value>(span) {
            Ok(value) if value.is_object() => from_value(&value),
            Ok(_) | Err(_) => {
                warn!("Model reply contained a brace span that is not a JSON object, degrading");
                degraded(raw_text)
            }
        },
        None => {
            warn!("Model reply contained no balanced JSON object, degrading");
            degraded(raw_text)
        }
    }
}
