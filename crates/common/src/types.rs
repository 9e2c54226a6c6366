//! Wire shapes of the external wallet-analysis API.
//!
//! Everything here is consumed read-only: the service relays or renders these
//! records, it never creates or mutates them. Monetary and percentage fields
//! stay decimal strings on the wire; parsing happens only in display helpers.

use serde::{Deserialize, Serialize};

/// Per-token analysis record from `GET /wallet/analysis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenAnalysis {
    pub token_address: String,
    #[serde(default)]
    pub token_name: String,
    #[serde(default)]
    pub token_symbol: String,
    #[serde(default)]
    pub token_image_url: String,
    #[serde(default)]
    pub current_price_usd: String,
    pub total_buy_amount: String,
    pub total_sell_amount: String,
    pub total_buy_value_usd: String,
    pub total_sell_value_usd: String,
    pub profit_usd: String,
    pub roi_percentage: String,
    pub is_quick_trade: bool,
    pub is_coin_transferred_from_another_account: bool,
    pub coin_traded_to_another_wallet: bool,
    pub is_unrealized_profit: bool,
    /// Unix seconds; 0 means "never bought/sold in the window".
    pub first_buy_time: i64,
    pub last_sell_time: i64,
    pub trade_duration_minutes: i64,
}

/// Aggregates computed upstream across all records of one wallet query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_coins_analyzed: i64,
    pub quick_trade_count: i64,
    pub profitable_trades_count: i64,
    pub loss_trades_count: i64,
    pub transferred_from_another_account_count: i64,
    pub traded_to_another_wallet_count: i64,
    pub unrealized_profit_count: i64,
    pub total_profit_usd: String,
    pub total_roi_percentage: String,
    pub total_buy_value_usd: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisData {
    pub wallet_address: String,
    pub analysis: Vec<TokenAnalysis>,
    pub summary: AnalysisSummary,
}

/// Success/error envelope the upstream wraps around `AnalysisData`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalysisData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
