//! Property analysis pipeline - gateways, calculator, prompt, LLM client,
//! parser and orchestrator

pub mod financials;
pub mod market_gateway;
pub mod narrative;
pub mod orchestrator;
pub mod parse;
pub mod prompt;
pub mod property_gateway;
pub mod types;

pub use types::*;
