use crate::enums::{AssetClass, Direction, Session, TradeStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single journal entry, as recorded by the trader and served by the
/// backend. Immutable from the analytics engine's perspective: the engine
/// only ever holds a read-only view of a slice of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: i64,
    /// Symbol the trade was taken on, e.g. "EURUSD", "XAUUSD", "US30".
    pub instrument: String,
    pub asset_class: AssetClass,
    pub direction: Direction,
    pub entry_price: Decimal,
    /// Absent while the position is still open.
    pub exit_price: Option<Decimal>,
    pub lot_size: Decimal,
    /// Settled P/L in account currency. Present only once the trade closes.
    pub profit_loss_usd: Option<Decimal>,
    pub profit_loss_pips: Option<Decimal>,
    pub risk_reward_ratio: Decimal,
    pub status: TradeStatus,
    pub entry_time: DateTime<Utc>,
    /// Required when `status` is `Closed`.
    pub exit_time: Option<DateTime<Utc>>,
    /// Trading session active at entry, when the trader recorded one.
    pub session: Option<Session>,
    pub strategy: Option<String>,
}

impl Trade {
    /// The settled P/L of this trade, or `None` while it is open.
    ///
    /// Open trades never contribute a realized P/L, even if the backend
    /// sent a provisional `profit_loss_usd` for them.
    pub fn realized_pnl(&self) -> Option<Decimal> {
        match self.status {
            TradeStatus::Closed => self.profit_loss_usd,
            TradeStatus::Open => None,
        }
    }

    /// Settlement timestamp for ordering the profit curve. Falls back to
    /// the entry time for malformed closed trades missing `exit_time`.
    pub fn settled_at(&self) -> DateTime<Utc> {
        self.exit_time.unwrap_or(self.entry_time)
    }
}

/// Pre-aggregated account counters computed by the backend. These are an
/// authoritative external input: the analytics engine passes them through
/// to the achievement table and never recomputes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_trades: u64,
    pub open_trades: u64,
    pub closed_trades: u64,
    pub winning_trades: u64,
    pub losing_trades: u64,
    pub breakeven_trades: u64,
    pub win_rate_pct: Decimal,
    pub total_pips: Decimal,
    pub gross_profit: Decimal,
    pub net_profit: Decimal,
    pub profit_factor: Decimal,
    pub average_win_pips: Decimal,
    pub average_loss_pips: Decimal,
    pub largest_win: Decimal,
    pub largest_loss: Decimal,
    /// Trades left on the free tier before the paywall kicks in.
    pub free_trades_remaining: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn closed_trade(pnl: Decimal) -> Trade {
        Trade {
            id: 1,
            instrument: "EURUSD".to_string(),
            asset_class: AssetClass::Forex,
            direction: Direction::Buy,
            entry_price: dec!(1.0850),
            exit_price: Some(dec!(1.0900)),
            lot_size: dec!(0.5),
            profit_loss_usd: Some(pnl),
            profit_loss_pips: Some(dec!(50)),
            risk_reward_ratio: dec!(2),
            status: TradeStatus::Closed,
            entry_time: Utc.with_ymd_and_hms(2024, 3, 4, 8, 30, 0).unwrap(),
            exit_time: Some(Utc.with_ymd_and_hms(2024, 3, 4, 14, 0, 0).unwrap()),
            session: Some(Session::London),
            strategy: None,
        }
    }

    #[test]
    fn open_trades_have_no_realized_pnl() {
        let mut trade = closed_trade(dec!(250));
        trade.status = TradeStatus::Open;
        assert_eq!(trade.realized_pnl(), None);
    }

    #[test]
    fn settled_at_falls_back_to_entry_time() {
        let mut trade = closed_trade(dec!(250));
        trade.exit_time = None;
        assert_eq!(trade.settled_at(), trade.entry_time);
    }
}
