use crate::error::ApiError;
use chrono::{DateTime, TimeZone, Utc};
use core_types::{Session, SummaryStats, Trade};
use rust_decimal::Decimal;
use serde::Deserialize;

// The backend speaks camelCase JSON, sends money as strings to dodge float
// rounding, and timestamps as epoch milliseconds.

/// One trade record from `GET /api/v1/trades`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrade {
    pub id: i64,
    pub instrument: String,
    pub asset_class: String,
    pub direction: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub entry_price: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub exit_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub lot_size: Decimal,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub profit_loss_usd: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub profit_loss_pips: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub risk_reward_ratio: Decimal,
    pub status: String,
    pub entry_time: i64,
    pub exit_time: Option<i64>,
    pub session: Option<String>,
    pub strategy: Option<String>,
}

fn timestamp_from_millis(millis: i64) -> Result<DateTime<Utc>, ApiError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ApiError::InvalidData(format!("Invalid timestamp: {millis}")))
}

impl TryFrom<RawTrade> for Trade {
    type Error = ApiError;

    fn try_from(raw: RawTrade) -> Result<Self, Self::Error> {
        Ok(Trade {
            id: raw.id,
            instrument: raw.instrument,
            asset_class: raw.asset_class.parse()?,
            direction: raw.direction.parse()?,
            entry_price: raw.entry_price,
            exit_price: raw.exit_price,
            lot_size: raw.lot_size,
            profit_loss_usd: raw.profit_loss_usd,
            profit_loss_pips: raw.profit_loss_pips,
            risk_reward_ratio: raw.risk_reward_ratio,
            status: raw.status.parse()?,
            entry_time: timestamp_from_millis(raw.entry_time)?,
            exit_time: raw.exit_time.map(timestamp_from_millis).transpose()?,
            // A label this client does not know is dropped, not fatal: the
            // engine treats such trades as session-less.
            session: raw.session.as_deref().and_then(|s| s.parse::<Session>().ok()),
            strategy: raw.strategy,
        })
    }
}

/// The pre-aggregated counters from `GET /api/v1/stats`. Authoritative:
/// these are passed through to the achievement table, never recomputed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSummaryStats {
    pub total_trades: u64,
    pub open_trades: u64,
    pub closed_trades: u64,
    pub winning_trades: u64,
    pub losing_trades: u64,
    pub breakeven_trades: u64,
    #[serde(with = "rust_decimal::serde::str")]
    pub win_rate_pct: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_pips: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub gross_profit: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub net_profit: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub profit_factor: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub average_win_pips: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub average_loss_pips: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub largest_win: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub largest_loss: Decimal,
    pub free_trades_remaining: u64,
}

impl From<RawSummaryStats> for SummaryStats {
    fn from(raw: RawSummaryStats) -> Self {
        SummaryStats {
            total_trades: raw.total_trades,
            open_trades: raw.open_trades,
            closed_trades: raw.closed_trades,
            winning_trades: raw.winning_trades,
            losing_trades: raw.losing_trades,
            breakeven_trades: raw.breakeven_trades,
            win_rate_pct: raw.win_rate_pct,
            total_pips: raw.total_pips,
            gross_profit: raw.gross_profit,
            net_profit: raw.net_profit,
            profit_factor: raw.profit_factor,
            average_win_pips: raw.average_win_pips,
            average_loss_pips: raw.average_loss_pips,
            largest_win: raw.largest_win,
            largest_loss: raw.largest_loss,
            free_trades_remaining: raw.free_trades_remaining,
        }
    }
}

/// An error body from the journal API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{AssetClass, Direction, TradeStatus};
    use rust_decimal_macros::dec;

    fn sample_trade_json() -> &'static str {
        r#"{
            "id": 42,
            "instrument": "XAUUSD",
            "assetClass": "commodity",
            "direction": "sell",
            "entryPrice": "2031.50",
            "exitPrice": "2019.25",
            "lotSize": "0.10",
            "profitLossUsd": "122.50",
            "profitLossPips": "122.5",
            "riskRewardRatio": "1.5",
            "status": "closed",
            "entryTime": 1709543400000,
            "exitTime": 1709560800000,
            "session": "New York",
            "strategy": "breakout"
        }"#
    }

    #[test]
    fn raw_trade_decodes_and_converts() {
        let raw: RawTrade = serde_json::from_str(sample_trade_json()).unwrap();
        let trade = Trade::try_from(raw).unwrap();

        assert_eq!(trade.id, 42);
        assert_eq!(trade.asset_class, AssetClass::Commodity);
        assert_eq!(trade.direction, Direction::Sell);
        assert_eq!(trade.status, TradeStatus::Closed);
        assert_eq!(trade.profit_loss_usd, Some(dec!(122.50)));
        assert_eq!(trade.session, Some(Session::NewYork));
        assert!(trade.exit_time.is_some());
    }

    #[test]
    fn open_trade_without_settlement_fields_decodes() {
        let json = r#"{
            "id": 7,
            "instrument": "EURUSD",
            "assetClass": "forex",
            "direction": "buy",
            "entryPrice": "1.0850",
            "lotSize": "1.00",
            "riskRewardRatio": "2",
            "status": "open",
            "entryTime": 1709543400000,
            "exitTime": null,
            "session": null,
            "strategy": null
        }"#;
        let raw: RawTrade = serde_json::from_str(json).unwrap();
        let trade = Trade::try_from(raw).unwrap();

        assert_eq!(trade.status, TradeStatus::Open);
        assert_eq!(trade.exit_price, None);
        assert_eq!(trade.profit_loss_usd, None);
        assert_eq!(trade.realized_pnl(), None);
    }

    #[test]
    fn unknown_session_label_becomes_none() {
        let json = sample_trade_json().replace("New York", "Frankfurt");
        let raw: RawTrade = serde_json::from_str(&json).unwrap();
        let trade = Trade::try_from(raw).unwrap();
        assert_eq!(trade.session, None);
    }

    #[test]
    fn unknown_asset_class_is_rejected() {
        let json = sample_trade_json().replace("commodity", "crypto");
        let raw: RawTrade = serde_json::from_str(&json).unwrap();
        assert!(matches!(Trade::try_from(raw), Err(ApiError::InvalidData(_))));
    }

    #[test]
    fn summary_stats_decode() {
        let json = r#"{
            "totalTrades": 48,
            "openTrades": 3,
            "closedTrades": 45,
            "winningTrades": 27,
            "losingTrades": 16,
            "breakevenTrades": 2,
            "winRatePct": "60.0",
            "totalPips": "812.5",
            "grossProfit": "5230.00",
            "netProfit": "3180.00",
            "profitFactor": "2.55",
            "averageWinPips": "42.1",
            "averageLossPips": "-20.3",
            "largestWin": "640.00",
            "largestLoss": "-310.00",
            "freeTradesRemaining": 0
        }"#;
        let raw: RawSummaryStats = serde_json::from_str(json).unwrap();
        let stats = SummaryStats::from(raw);
        assert_eq!(stats.total_trades, 48);
        assert_eq!(stats.net_profit, dec!(3180.00));
        assert_eq!(stats.win_rate_pct, dec!(60.0));
    }
}
