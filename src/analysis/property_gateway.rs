//! Property data gateway - fetch and normalize raw attributes for an address
//!
//! Two implementations behind one seam: a real provider client (Estated) and
//! a randomized synthetic generator used when no credential is configured.
//! The synthetic path is a development/demo fallback, not a production data
//! source.

use crate::analysis::types::{PropertyRecord, PropertyType};
use crate::error::ApiError;
use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

const ESTATED_BASE_URL: &str = "https://api.estated.com/v4/property";
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Source of canonical property records, keyed by address
#[async_trait]
pub trait PropertyDataSource: Send + Sync {
    async fn fetch(&self, address: &str) -> Result<PropertyRecord, ApiError>;
}

/// Raw provider payload - heterogeneous field names, everything optional
#[derive(Debug, Deserialize)]
struct ProviderPayload {
    address: Option<String>,
    estimated_value: Option<f64>,
    market_value: Option<f64>,
    bedrooms: Option<u32>,
    bathrooms: Option<f64>,
    sqft: Option<u32>,
    year_built: Option<u32>,
    lot_size: Option<f64>,
    property_type: Option<String>,
}

/// Map a provider property-type string onto the canonical enum.
/// Unrecognized strings fall back to single_family with a warning.
fn parse_property_type(raw: &str) -> PropertyType {
    let lower = raw.to_lowercase();

    if lower.contains("multi") || lower.contains("duplex") || lower.contains("apartment") {
        PropertyType::MultiFamily
    } else if lower.contains("condo") {
        PropertyType::Condo
    } else if lower.contains("town") || lower.contains("terrace") {
        PropertyType::Townhouse
    } else if lower.contains("commercial") || lower.contains("retail") || lower.contains("office")
    {
        PropertyType::Commercial
    } else if lower.contains("land") || lower.contains("lot") || lower.contains("vacant") {
        PropertyType::Land
    } else if lower.contains("single") || lower.contains("house") || lower.contains("family") {
        PropertyType::SingleFamily
    } else {
        warn!("Unrecognized property type {:?}, defaulting to single_family", raw);
        PropertyType::SingleFamily
    }
}

/// Client for the Estated property-data API
pub struct EstatedGateway {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    /// When set, an upstream failure is surfaced instead of degrading to
    /// the synthetic generator
    strict: bool,
}

impl EstatedGateway {
    pub fn new(api_key: String, strict: bool) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_url: ESTATED_BASE_URL.to_string(),
            strict,
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    async fn fetch_upstream(&self, address: &str) -> anyhow::Result<PropertyRecord> {
        info!("Fetching property data for {}", address);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("address", address)])
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("property API returned {}", status));
        }

        let payload: ProviderPayload = response.json().await?;
        Ok(normalize(payload, address))
    }
}

/// Normalize a provider payload onto PropertyRecord, substituting the
/// per-field defaults for any absent value so nothing downstream ever sees
/// a missing field.
fn normalize(payload: ProviderPayload, requested_address: &str) -> PropertyRecord {
    PropertyRecord {
        address: payload
            .address
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| requested_address.to_string()),
        price: payload.estimated_value.or(payload.market_value).unwrap_or(0.0),
        bedrooms: payload.bedrooms.unwrap_or(0),
        bathrooms: payload.bathrooms.unwrap_or(0.0),
        square_footage: payload.sqft.unwrap_or(0),
        year_built: payload.year_built.unwrap_or(0),
        lot_size_acres: payload.lot_size.unwrap_or(0.0),
        property_type: payload
            .property_type
            .as_deref()
            .map(parse_property_type)
            .unwrap_or(PropertyType::SingleFamily),
    }
}

#[async_trait]
impl PropertyDataSource for EstatedGateway {
    async fn fetch(&self, address: &str) -> Result<PropertyRecord, ApiError> {
        match self.fetch_upstream(address).await {
            Ok(record) => Ok(record),
            Err(err) if self.strict => {
                warn!("Property data fetch failed for {}: {}", address, err);
                Err(ApiError::PropertyDataUnavailable(err.to_string()))
            }
            Err(err) => {
                warn!(
                    "Property data fetch failed for {}, using synthetic record: {}",
                    address, err
                );
                Ok(synthetic_record(address))
            }
        }
    }
}

/// Synthetic property generator used when no provider credential is
/// configured. Ranges mirror a plausible single-family listing.
pub struct MockPropertyGateway;

#[async_trait]
impl PropertyDataSource for MockPropertyGateway {
    async fn fetch(&self, address: &str) -> Result<PropertyRecord, ApiError> {
        info!("No property API credential, generating synthetic record for {}", address);
        Ok(synthetic_record(address))
    }
}

fn synthetic_record(address: &str) -> PropertyRecord {
    let mut rng = rand::thread_rng();

    PropertyRecord {
        address: address.to_string(),
        price: rng.gen_range(200_000..700_000) as f64,
        bedrooms: rng.gen_range(2..=5),
        bathrooms: rng.gen_range(1..=3) as f64,
        square_footage: rng.gen_range(1500..2500),
        year_built: rng.gen_range(1990..=2019),
        lot_size_acres: rng.gen_range(0.1..0.6),
        property_type: PropertyType::SingleFamily,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property_type() {
        assert_eq!(parse_property_type("Single Family"), PropertyType::SingleFamily);
        assert_eq!(parse_property_type("Multi-Family Dwelling"), PropertyType::MultiFamily);
        assert_eq!(parse_property_type("Condominium"), PropertyType::Condo);
        assert_eq!(parse_property_type("Townhouse"), PropertyType::Townhouse);
        assert_eq!(parse_property_type("Commercial Retail"), PropertyType::Commercial);
        assert_eq!(parse_property_type("Vacant Land"), PropertyType::Land);
        assert_eq!(parse_property_type("???"), PropertyType::SingleFamily);
    }

    #[test]
    fn test_normalize_fills_defaults() {
        let payload = ProviderPayload {
            address: None,
            estimated_value: None,
            market_value: Some(410_000.0),
            bedrooms: None,
            bathrooms: None,
            sqft: Some(1900),
            year_built: None,
            lot_size: None,
            property_type: None,
        };

        let record = normalize(payload, "77 Cedar Ln, Denver, CO 80202");

        assert_eq!(record.address, "77 Cedar Ln, Denver, CO 80202");
        assert_eq!(record.price, 410_000.0);
        assert_eq!(record.bedrooms, 0);
        assert_eq!(record.bathrooms, 0.0);
        assert_eq!(record.square_footage, 1900);
        assert_eq!(record.year_built, 0);
        assert_eq!(record.lot_size_acres, 0.0);
        assert_eq!(record.property_type, PropertyType::SingleFamily);
    }

    #[test]
    fn test_normalize_prefers_estimated_value() {
        let payload = ProviderPayload {
            address: Some("12 Birch Rd".to_string()),
            estimated_value: Some(350_000.0),
            market_value: Some(420_000.0),
            bedrooms: Some(4),
            bathrooms: Some(2.5),
            sqft: Some(2100),
            year_built: Some(1998),
            lot_size: Some(0.3),
            property_type: Some("Townhouse".to_string()),
        };

        let record = normalize(payload, "ignored");

        assert_eq!(record.address, "12 Birch Rd");
        assert_eq!(record.price, 350_000.0);
        assert_eq!(record.bathrooms, 2.5);
        assert_eq!(record.property_type, PropertyType::Townhouse);
    }

    #[test]
    fn test_synthetic_record_ranges() {
        for _ in 0..50 {
            let record = synthetic_record("10 Smith St, Austin, TX");

            assert_eq!(record.address, "10 Smith St, Austin, TX");
            assert!((200_000.0..700_000.0).contains(&record.price));
            assert!((2..=5).contains(&record.bedrooms));
            assert!((1.0..=3.0).contains(&record.bathrooms));
            assert!((1500..2500).contains(&record.square_footage));
            assert!((1990..=2019).contains(&record.year_built));
            assert!((0.1..0.6).contains(&record.lot_size_acres));
            assert_eq!(record.property_type, PropertyType::SingleFamily);
        }
    }

    #[tokio::test]
    async fn test_strict_mode_surfaces_unavailable() {
        // Nothing listens on this port, so the upstream call fails fast
        let gateway = EstatedGateway::new("test-key".to_string(), true)
            .with_base_url("http://127.0.0.1:9/v4/property");

        let result = gateway.fetch("10 Smith St, Austin, TX").await;
        assert!(matches!(result, Err(ApiError::PropertyDataUnavailable(_))));
    }

    #[tokio::test]
    async fn test_non_strict_degrades_to_synthetic() {
        let gateway = EstatedGateway::new("test-key".to_string(), false)
            .with_base_url("http://127.0.0.1:9/v4/property");

        let record = gateway.fetch("10 Smith St, Austin, TX").await.unwrap();
        assert_eq!(record.address, "10 Smith St, Austin, TX");
        assert!(record.price >= 200_000.0);
    }
}
