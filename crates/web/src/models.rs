//! View models for the analysis templates.
//! These are the typed structs that templates render — no HTTP or upstream
//! logic here, so every display rule is unit-testable.

use chrono::DateTime;
use common::types::{AnalysisData, AnalysisSummary, TokenAnalysis};
use rust_decimal::Decimal;

/// Summary panel of one wallet query.
pub struct SummaryView {
    pub wallet_address: String,
    pub total_coins: i64,
    pub quick_trade_count: i64,
    pub quick_trade_share: String,
    pub profitable_count: i64,
    pub profitable_share: String,
    pub loss_count: i64,
    pub loss_share: String,
    pub transferred_in_count: i64,
    pub transferred_in_share: String,
    pub transferred_out_count: i64,
    pub transferred_out_share: String,
    pub unrealized_count: i64,
    pub unrealized_share: String,
    pub total_profit_display: String,
    pub total_profit_color: String,
    pub total_profit_bg: String,
    pub total_roi_display: String,
    pub total_roi_color: String,
    pub total_roi_bg: String,
    pub total_invested_display: String,
}

/// One token card in the results list.
pub struct TokenCard {
    pub token_address: String,
    pub address_short: String,
    pub solscan_url: String,
    pub display_name: String,
    pub symbol: String,
    pub image_url: String,
    pub is_quick_trade: bool,
    pub transferred_in: bool,
    pub transferred_out: bool,
    pub unrealized: bool,
    pub profit_display: String,
    pub profit_color: String,
    pub border_color: String,
    pub roi_display: String,
    pub roi_color: String,
    pub buy_value_display: String,
    pub sell_value_display: String,
    pub buy_amount_display: String,
    pub sell_amount_display: String,
    pub first_buy_display: String,
    pub last_sell_display: String,
    pub duration_minutes: i64,
}

impl SummaryView {
    pub fn from_data(data: &AnalysisData) -> Self {
        let s: &AnalysisSummary = &data.summary;
        let total = s.total_coins_analyzed;
        let profit_negative = is_negative(&s.total_profit_usd);
        let roi_negative = is_negative(&s.total_roi_percentage);

        Self {
            wallet_address: data.wallet_address.clone(),
            total_coins: total,
            quick_trade_count: s.quick_trade_count,
            quick_trade_share: share_pct(s.quick_trade_count, total),
            profitable_count: s.profitable_trades_count,
            profitable_share: share_pct(s.profitable_trades_count, total),
            loss_count: s.loss_trades_count,
            loss_share: share_pct(s.loss_trades_count, total),
            transferred_in_count: s.transferred_from_another_account_count,
            transferred_in_share: share_pct(s.transferred_from_another_account_count, total),
            transferred_out_count: s.traded_to_another_wallet_count,
            transferred_out_share: share_pct(s.traded_to_another_wallet_count, total),
            unrealized_count: s.unrealized_profit_count,
            unrealized_share: share_pct(s.unrealized_profit_count, total),
            total_profit_display: format_usd(&s.total_profit_usd),
            total_profit_color: pnl_text_color(profit_negative),
            total_profit_bg: pnl_bg_color(profit_negative),
            total_roi_display: format_percent(&s.total_roi_percentage),
            total_roi_color: pnl_text_color(roi_negative),
            total_roi_bg: pnl_bg_color(roi_negative),
            total_invested_display: format_usd(&s.total_buy_value_usd),
        }
    }
}

impl TokenCard {
    pub fn from_token(token: &TokenAnalysis) -> Self {
        let profit_negative = is_negative(&token.profit_usd);
        let roi_negative = is_negative(&token.roi_percentage);

        let display_name = if !token.token_name.is_empty() {
            token.token_name.clone()
        } else if !token.token_symbol.is_empty() {
            token.token_symbol.clone()
        } else {
            "İsimsiz Token".to_string()
        };

        Self {
            address_short: shorten_address(&token.token_address),
            solscan_url: format!("https://solscan.io/token/{}", token.token_address),
            token_address: token.token_address.clone(),
            display_name,
            symbol: token.token_symbol.clone(),
            image_url: token.token_image_url.clone(),
            is_quick_trade: token.is_quick_trade,
            transferred_in: token.is_coin_transferred_from_another_account,
            transferred_out: token.coin_traded_to_another_wallet,
            unrealized: token.is_unrealized_profit,
            profit_display: format_usd(&token.profit_usd),
            profit_color: pnl_text_color(profit_negative),
            border_color: if profit_negative {
                "border-red-500".to_string()
            } else {
                "border-green-500".to_string()
            },
            roi_display: format_percent(&token.roi_percentage),
            roi_color: pnl_text_color(roi_negative),
            buy_value_display: format_usd(&token.total_buy_value_usd),
            sell_value_display: format_usd(&token.total_sell_value_usd),
            buy_amount_display: format_amount(&token.total_buy_amount),
            sell_amount_display: format_amount(&token.total_sell_amount),
            first_buy_display: format_unix(token.first_buy_time),
            last_sell_display: format_unix(token.last_sell_time),
            duration_minutes: token.trade_duration_minutes,
        }
    }
}

pub fn token_cards(data: &AnalysisData) -> Vec<TokenCard> {
    data.analysis.iter().map(TokenCard::from_token).collect()
}

fn pnl_text_color(negative: bool) -> String {
    let class = if negative { "text-red-600" } else { "text-green-600" };
    class.to_string()
}

fn pnl_bg_color(negative: bool) -> String {
    let class = if negative { "bg-red-50" } else { "bg-green-50" };
    class.to_string()
}

/// True when the wire string parses to a value below zero. Unparseable
/// strings count as non-negative so they render in the neutral style.
pub fn is_negative(raw: &str) -> bool {
    raw.trim()
        .parse::<Decimal>()
        .map(|d| d < Decimal::ZERO)
        .unwrap_or(false)
}

/// Share of `count` in `total` with one decimal. A zero total renders as
/// "0.0%" instead of NaN.
pub fn share_pct(count: i64, total: i64) -> String {
    if total <= 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", (count as f64 / total as f64) * 100.0)
}

/// USD with two decimals and thousands separators: "1425" -> "$1,425.00".
/// Unparseable input renders as "-".
pub fn format_usd(raw: &str) -> String {
    let Ok(value) = raw.trim().parse::<Decimal>() else {
        return "-".to_string();
    };
    let rounded = value.round_dp(2).abs();
    let text = format!("{rounded:.2}");
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if value < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${}.{frac_part}", group_thousands(int_part))
}

/// Percent fields arrive as whole-number percents: "42.5" -> "42.50%".
pub fn format_percent(raw: &str) -> String {
    let Ok(value) = raw.trim().parse::<Decimal>() else {
        return "-".to_string();
    };
    format!("{:.2}%", value.round_dp(2))
}

/// Token amounts keep their wire precision but gain separators:
/// "1234567.5" -> "1,234,567.5".
pub fn format_amount(raw: &str) -> String {
    let Ok(value) = raw.trim().parse::<Decimal>() else {
        return "-".to_string();
    };
    let text = value.abs().normalize().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let sign = if value < Decimal::ZERO { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{}.{frac}", group_thousands(int_part)),
        None => format!("{sign}{}", group_thousands(int_part)),
    }
}

/// Unix seconds to "YYYY-MM-DD HH:MM" (UTC); zero/invalid renders as "-".
pub fn format_unix(ts: i64) -> String {
    if ts <= 0 {
        return "-".to_string();
    }
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// "So1111...111112" — first and last six characters of the mint address.
pub fn shorten_address(addr: &str) -> String {
    if addr.len() > 12 {
        format!("{}...{}", &addr[..6], &addr[addr.len() - 6..])
    } else {
        addr.to_string()
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
