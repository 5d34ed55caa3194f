//! In-memory search analytics - append-and-query store for address
//! searches, popularity and trending-area roll-ups
//!
//! A single mutex around the table is enough here: entries are append-only
//! and no cross-request ordering is promised. Swap for a database only if
//! persistence across restarts becomes a requirement.

use crate::analysis::financials::round1;
use crate::analysis::types::Strategy;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::info;

/// One tracked address search
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSearch {
    pub address: String,
    pub strategy: Strategy,
    pub timestamp: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub deal_score: Option<f64>,
    pub purchased: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularAddress {
    pub address: String,
    pub strategy: Strategy,
    pub search_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingArea {
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub search_count: usize,
    pub average_deal_score: f64,
    pub strategies: HashMap<String, usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyStat {
    pub total: usize,
    pub purchased: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionStats {
    pub total_searches: usize,
    pub total_purchases: usize,
    pub conversion_rate: f64,
    pub strategy_stats: HashMap<String, StrategyStat>,
    pub average_deal_score: f64,
    pub high_value_reports: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingInsights {
    pub hotspots: Vec<TrendingArea>,
    pub trending_areas: Vec<TrendingArea>,
    pub conversion_stats: ConversionStats,
    pub popular_addresses: Vec<PopularAddress>,
    pub insights: Vec<String>,
}

/// Split "street, city, ST zip" into grouping keys, defaulting to Unknown
fn parse_address(address: &str) -> (String, String, String) {
    let parts: Vec<&str> = address.split(',').collect();
    let last = parts.last().map(|s| s.trim()).unwrap_or("");
    let mut state_zip = last.split_whitespace();

    let state = state_zip.next().unwrap_or("Unknown").to_string();
    let zip = state_zip.next().unwrap_or("Unknown").to_string();
    let city = if parts.len() >= 2 {
        parts[parts.len() - 2].trim().to_string()
    } else {
        "Unknown".to_string()
    };

    (city, state, zip)
}

#[derive(Default)]
pub struct AnalyticsStore {
    searches: Mutex<Vec<AddressSearch>>,
}

impl AnalyticsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one address search
    pub fn track_search(&self, address: &str, strategy: Strategy, user_agent: Option<String>) {
        let mut searches = self.searches.lock().unwrap();
        searches.push(AddressSearch {
            address: address.to_string(),
            strategy,
            timestamp: Utc::now(),
            user_agent,
            deal_score: None,
            purchased: false,
        });
        info!("Address search tracked: {} ({})", address, strategy);
    }

    /// Mark the earliest unpurchased search for this address as purchased
    pub fn track_purchase(&self, address: &str, deal_score: f64) {
        let mut searches = self.searches.lock().unwrap();
        if let Some(search) = searches
            .iter_mut()
            .find(|s| s.address == address && !s.purchased)
        {
            search.purchased = true;
            search.deal_score = Some(deal_score);
            info!("Report purchase tracked: {} (score: {})", address, deal_score);
        }
    }

    /// Most searched addresses, descending by count
    pub fn popular_addresses(&self, limit: usize) -> Vec<PopularAddress> {
        let searches = self.searches.lock().unwrap();

        let mut counts: HashMap<String, PopularAddress> = HashMap::new();
        for search in searches.iter() {
            counts
                .entry(search.address.clone())
                .and_modify(|entry| entry.search_count += 1)
                .or_insert(PopularAddress {
                    address: search.address.clone(),
                    strategy: search.strategy,
                    search_count: 1,
                });
        }

        let mut popular: Vec<PopularAddress> = counts.into_values().collect();
        popular.sort_by(|a, b| b.search_count.cmp(&a.search_count));
        popular.truncate(limit);
        popular
    }

    /// Areas grouped by parsed city/state/zip, descending by search count
    pub fn trending_areas(&self, limit: usize) -> Vec<TrendingArea> {
        let searches = self.searches.lock().unwrap();

        struct AreaAccum {
            area: TrendingArea,
            total_score: f64,
            score_count: usize,
        }

        let mut areas: HashMap<String, AreaAccum> = HashMap::new();
        for search in searches.iter() {
            let (city, state, zip) = parse_address(&search.address);
            let key = format!("{}, {} {}", city, state, zip);

            let accum = areas.entry(key).or_insert_with(|| AreaAccum {
                area: TrendingArea {
                    city,
                    state,
                    zip_code: zip,
                    search_count: 0,
                    average_deal_score: 0.0,
                    strategies: HashMap::new(),
                },
                total_score: 0.0,
                score_count: 0,
            });

            accum.area.search_count += 1;
            *accum
                .area
                .strategies
                .entry(search.strategy.to_string())
                .or_insert(0) += 1;
            if let Some(score) = search.deal_score {
                accum.total_score += score;
                accum.score_count += 1;
            }
        }

        let mut trending: Vec<TrendingArea> = areas
            .into_values()
            .map(|accum| {
                let mut area = accum.area;
                area.average_deal_score = if accum.score_count > 0 {
                    round1(accum.total_score / accum.score_count as f64)
                } else {
                    0.0
                };
                area
            })
            .collect();

        trending.sort_by(|a, b| b.search_count.cmp(&a.search_count));
        trending.truncate(limit);
        trending
    }

    pub fn conversion_stats(&self) -> ConversionStats {
        let searches = self.searches.lock().unwrap();

        let total_searches = searches.len();
        let total_purchases = searches.iter().filter(|s| s.purchased).count();
        let conversion_rate = if total_searches > 0 {
            round1(total_purchases as f64 / total_searches as f64 * 100.0)
        } else {
            0.0
        };

        let mut strategy_stats: HashMap<String, StrategyStat> = HashMap::new();
        for search in searches.iter() {
            let stat = strategy_stats.entry(search.strategy.to_string()).or_default();
            stat.total += 1;
            if search.purchased {
                stat.purchased += 1;
            }
        }

        let scores: Vec<f64> = searches
            .iter()
            .filter(|s| s.purchased)
            .filter_map(|s| s.deal_score)
            .collect();
        let average_deal_score = if scores.is_empty() {
            0.0
        } else {
            round1(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        ConversionStats {
            total_searches,
            total_purchases,
            conversion_rate,
            strategy_stats,
            average_deal_score,
            high_value_reports: scores.iter().filter(|&&score| score >= 8.0).count(),
        }
    }

    /// Marketing roll-up: hotspots, trends and conversion in one payload
    pub fn marketing_insights(&self) -> MarketingInsights {
        let trending = self.trending_areas(10);
        let stats = self.conversion_stats();
        let popular = self.popular_addresses(5);

        let hotspots: Vec<TrendingArea> = trending
            .iter()
            .filter(|area| area.search_count >= 5 && area.average_deal_score >= 7.5)
            .cloned()
            .collect();

        let top_strategy = stats
            .strategy_stats
            .iter()
            .max_by_key(|(_, stat)| stat.total)
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| "rental".to_string());

        let insights = vec![
            format!("{} high-opportunity markets identified", hotspots.len()),
            format!(
                "{}% search-to-purchase conversion rate",
                stats.conversion_rate
            ),
            format!(
                "{} properties scored 8+ (premium deals)",
                stats.high_value_reports
            ),
            format!("Top strategy: {}", top_strategy),
        ];

        MarketingInsights {
            hotspots,
            trending_areas: trending.into_iter().take(5).collect(),
            conversion_stats: stats,
            popular_addresses: popular,
            insights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        assert_eq!(
            parse_address("123 Main St, Austin, TX 78701"),
            ("Austin".to_string(), "TX".to_string(), "78701".to_string())
        );
        assert_eq!(
            parse_address("nowhere"),
            (
                "Unknown".to_string(),
                "nowhere".to_string(),
                "Unknown".to_string()
            )
        );
    }

    #[test]
    fn test_popular_addresses_ordering() {
        let store = AnalyticsStore::new();
        store.track_search("123 Main St, Austin, TX 78701", Strategy::Rental, None);
        store.track_search("123 Main St, Austin, TX 78701", Strategy::Flip, None);
        store.track_search("9 Side Rd, Waco, TX 76701", Strategy::Rental, None);

        let popular = store.popular_addresses(10);
        assert_eq!(popular.len(), 2);
        assert_eq!(popular[0].address, "123 Main St, Austin, TX 78701");
        assert_eq!(popular[0].search_count, 2);

        let limited = store.popular_addresses(1);
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_trending_groups_by_area() {
        let store = AnalyticsStore::new();
        store.track_search("123 Main St, Austin, TX 78701", Strategy::Rental, None);
        store.track_search("500 Oak Ave, Austin, TX 78701", Strategy::Flip, None);
        store.track_search("9 Side Rd, Waco, TX 76701", Strategy::Rental, None);

        let trending = store.trending_areas(10);
        assert_eq!(trending.len(), 2);
        assert_eq!(trending[0].city, "Austin");
        assert_eq!(trending[0].search_count, 2);
        assert_eq!(trending[0].strategies.get("rental"), Some(&1));
        assert_eq!(trending[0].strategies.get("flip"), Some(&1));
    }

    #[test]
    fn test_purchase_updates_scores_and_stats() {
        let store = AnalyticsStore::new();
        store.track_search("123 Main St, Austin, TX 78701", Strategy::Rental, None);
        store.track_search("9 Side Rd, Waco, TX 76701", Strategy::Flip, None);
        store.track_purchase("123 Main St, Austin, TX 78701", 8.4);

        let stats = store.conversion_stats();
        assert_eq!(stats.total_searches, 2);
        assert_eq!(stats.total_purchases, 1);
        assert_eq!(stats.conversion_rate, 50.0);
        assert_eq!(stats.average_deal_score, 8.4);
        assert_eq!(stats.high_value_reports, 1);
        assert_eq!(stats.strategy_stats.get("rental").unwrap().purchased, 1);
        assert_eq!(stats.strategy_stats.get("flip").unwrap().purchased, 0);
    }

    #[test]
    fn test_purchase_for_unknown_address_is_noop() {
        let store = AnalyticsStore::new();
        store.track_purchase("404 Nowhere Ln, Austin, TX 78701", 9.0);
        assert_eq!(store.conversion_stats().total_purchases, 0);
    }

    #[test]
    fn test_marketing_insights_shape() {
        let store = AnalyticsStore::new();
        for _ in 0..5 {
            store.track_search("123 Main St, Austin, TX 78701", Strategy::Rental, None);
            store.track_purchase("123 Main St, Austin, TX 78701", 8.0);
        }

        let insights = store.marketing_insights();
        assert_eq!(insights.hotspots.len(), 1);
        assert_eq!(insights.insights.len(), 4);
        assert!(insights.insights[3].contains("rental"));
    }

    #[test]
    fn test_empty_store_stats() {
        let store = AnalyticsStore::new();
        let stats = store.conversion_stats();

        assert_eq!(stats.total_searches, 0);
        assert_eq!(stats.conversion_rate, 0.0);
        assert_eq!(stats.average_deal_score, 0.0);
        assert!(store.popular_addresses(10).is_empty());
        assert!(store.trending_areas(10).is_empty());
    }
}
