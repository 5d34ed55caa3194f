//! Market context gateway - comparable sales and neighborhood statistics
//!
//! Currently serves a static snapshot; the trait seam exists so a real
//! comparables provider can be substituted without touching downstream
//! consumers.

use crate::analysis::types::{Comparable, MarketContext};
use crate::error::ApiError;
use async_trait::async_trait;

#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch(&self, address: &str) -> Result<MarketContext, ApiError>;
}

/// Fixed comparable-sales snapshot
pub struct StaticMarketGateway;

#[async_trait]
impl MarketDataSource for StaticMarketGateway {
    async fn fetch(&self, _address: &str) -> Result<MarketContext, ApiError> {
        Ok(MarketContext {
            median_price: 295_000.0,
            price_appreciation_percent: 4.2,
            average_days_on_market: 28,
            comparables: vec![
                Comparable {
                    address: "456 Oak St".to_string(),
                    price: 275_000.0,
                    square_footage: 1800,
                    price_per_square_foot: 153.0,
                },
                Comparable {
                    address: "789 Pine Ave".to_string(),
                    price: 310_000.0,
                    square_footage: 1950,
                    price_per_square_foot: 159.0,
                },
                Comparable {
                    address: "321 Elm Dr".to_string(),
                    price: 268_000.0,
                    square_footage: 1750,
                    price_per_square_foot: 153.0,
                },
            ],
        })
    }
}
