//! Client for the external wallet-analysis backend.
//!
//! One endpoint, one GET, no retries: the backend does all the heavy
//! lifting and this service only forwards parameters and relays what
//! comes back.

use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Inbound query parameters, kept as raw strings so that whatever the
/// caller supplied is forwarded verbatim. A parameter supplied as the
/// literal string "false" is still forwarded; an empty string is treated
/// as absent. That asymmetry matches the shipped behavior of the product
/// and callers rely on it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisQuery {
    pub address: Option<String>,
    pub quick_trade_minutes: Option<String>,
    pub days: Option<String>,
    pub quick_trade: Option<String>,
    pub is_coin_transferred_from_another_account: Option<String>,
    pub coin_traded_to_another_wallet: Option<String>,
    pub is_unrealized_profit: Option<String>,
}

impl AnalysisQuery {
    /// Wallet address with surrounding whitespace stripped, if usable.
    pub fn trimmed_address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }

    /// The (name, value) pairs to forward upstream, in a stable order.
    /// Only supplied, non-empty values appear.
    pub fn forwarded_pairs(&self) -> Vec<(&'static str, &str)> {
        let candidates: [(&'static str, Option<&String>); 7] = [
            ("address", self.address.as_ref()),
            ("quick_trade_minutes", self.quick_trade_minutes.as_ref()),
            ("days", self.days.as_ref()),
            ("quick_trade", self.quick_trade.as_ref()),
            (
                "is_coin_transferred_from_another_account",
                self.is_coin_transferred_from_another_account.as_ref(),
            ),
            (
                "coin_traded_to_another_wallet",
                self.coin_traded_to_another_wallet.as_ref(),
            ),
            ("is_unrealized_profit", self.is_unrealized_profit.as_ref()),
        ];

        candidates
            .into_iter()
            .filter_map(|(name, value)| {
                let value = value.map(String::as_str)?;
                let value = if name == "address" {
                    value.trim()
                } else {
                    value
                };
                (!value.is_empty()).then_some((name, value))
            })
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("analysis API unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("analysis API returned invalid JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

/// What came back from the analysis API, status and parsed body together,
/// so callers can relay business-level errors instead of flattening
/// everything into a generic failure.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

pub struct AnalysisClient {
    base_url: String,
    client: reqwest::Client,
}

impl AnalysisClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn analysis_url(&self, query: &AnalysisQuery) -> String {
        let mut url = Url::parse(&format!("{}/wallet/analysis", self.base_url))
            .expect("upstream base_url must be a valid absolute URL");
        {
            let mut qp = url.query_pairs_mut();
            for (name, value) in query.forwarded_pairs() {
                qp.append_pair(name, value);
            }
        }
        url.to_string()
    }

    /// Issue the single outbound GET. Non-success upstream statuses are NOT
    /// errors here: the reply carries the status so the proxy can relay it.
    pub async fn fetch_analysis(&self, query: &AnalysisQuery) -> Result<UpstreamReply, UpstreamError> {
        let url = self.analysis_url(query);
        debug!(url = %url, "fetching wallet analysis");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        let body = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) if status.is_success() => return Err(UpstreamError::Decode(err)),
            // A non-JSON error page (load balancer, reverse proxy) still has
            // to reach the caller as something structured.
            Err(_) => json!({
                "success": false,
                "error": format!("analysis API returned {status}"),
            }),
        };

        debug!(status = %status, "wallet analysis response received");
        Ok(UpstreamReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AnalysisClient {
        AnalysisClient::new("http://localhost:5001/", 300)
    }

    #[test]
    fn test_url_with_address_only() {
        let query = AnalysisQuery {
            address: Some("ABC123".to_string()),
            ..Default::default()
        };
        let url = client().analysis_url(&query);
        assert_eq!(url, "http://localhost:5001/wallet/analysis?address=ABC123");
    }

    #[test]
    fn test_url_omits_unsupplied_parameters() {
        let query = AnalysisQuery {
            address: Some("ABC123".to_string()),
            days: Some("7".to_string()),
            ..Default::default()
        };
        let url = client().analysis_url(&query);
        assert!(url.contains("address=ABC123"));
        assert!(url.contains("days=7"));
        assert!(!url.contains("quick_trade_minutes"));
        assert!(!url.contains("is_unrealized_profit"));
    }

    #[test]
    fn test_literal_false_is_forwarded_but_empty_is_not() {
        let query = AnalysisQuery {
            address: Some("ABC123".to_string()),
            quick_trade: Some("false".to_string()),
            days: Some(String::new()),
            ..Default::default()
        };
        let pairs = query.forwarded_pairs();
        assert!(pairs.contains(&("quick_trade", "false")));
        assert!(!pairs.iter().any(|(name, _)| *name == "days"));
    }

    #[test]
    fn test_scenario_exact_parameter_set() {
        let query = AnalysisQuery {
            address: Some("ABC123".to_string()),
            days: Some("7".to_string()),
            quick_trade_minutes: Some("5".to_string()),
            is_unrealized_profit: Some("true".to_string()),
            ..Default::default()
        };
        let url = client().analysis_url(&query);
        assert_eq!(
            url,
            "http://localhost:5001/wallet/analysis?address=ABC123&quick_trade_minutes=5&days=7&is_unrealized_profit=true"
        );
    }

    #[test]
    fn test_address_is_trimmed() {
        let query = AnalysisQuery {
            address: Some("  ABC123  ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.trimmed_address(), Some("ABC123"));
        let pairs = query.forwarded_pairs();
        assert_eq!(pairs, vec![("address", "ABC123")]);
    }

    #[test]
    fn test_blank_address_is_absent() {
        let query = AnalysisQuery {
            address: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.trimmed_address(), None);
        assert!(query.forwarded_pairs().is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let query = AnalysisQuery {
            address: Some("A".to_string()),
            ..Default::default()
        };
        let url = client().analysis_url(&query);
        assert!(!url.contains("//wallet"));
    }

    #[test]
    fn test_address_is_percent_encoded() {
        let query = AnalysisQuery {
            address: Some("a b&c".to_string()),
            ..Default::default()
        };
        let url = client().analysis_url(&query);
        assert!(url.contains("address=a+b%26c") || url.contains("address=a%20b%26c"));
    }
}
