use core_types::Session;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Scalar risk/performance metrics derived from the closed-trade history.
///
/// Produced by `AnalyticsEngine::advanced_metrics`. A zeroed instance (the
/// `Default`) is what an account with no settled trades reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedMetrics {
    /// Mean settled P/L divided by its population standard deviation.
    /// Zero when the variance is zero; this is a documented policy, not a
    /// missing value.
    pub sharpe_ratio: Decimal,
    pub max_drawdown_usd: Decimal,
    /// Expected P/L per trade: win_rate * avg_win - (1 - win_rate) * avg_loss.
    pub expectancy_usd: Decimal,
    /// Winners over all settled trades. Breakeven trades stay in the
    /// denominator.
    pub win_rate: Decimal,
    pub max_win_streak: u32,
    pub max_loss_streak: u32,
    pub average_win_usd: Decimal,
    /// Average loss expressed as a non-negative magnitude.
    pub average_loss_usd: Decimal,
}

impl AdvancedMetrics {
    /// Creates a zeroed-out metrics record, the shape reported for an
    /// account with no settled trades.
    pub fn new() -> Self {
        Self {
            sharpe_ratio: Decimal::ZERO,
            max_drawdown_usd: Decimal::ZERO,
            expectancy_usd: Decimal::ZERO,
            win_rate: Decimal::ZERO,
            max_win_streak: 0,
            max_loss_streak: 0,
            average_win_usd: Decimal::ZERO,
            average_loss_usd: Decimal::ZERO,
        }
    }
}

impl Default for AdvancedMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// One point on the cumulative profit curve: a settlement-date label and
/// the running total up to and including that trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub label: String,
    pub cumulative_profit: Decimal,
}

/// Aggregate performance of a single instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentPerformance {
    pub instrument: String,
    pub total_profit: Decimal,
    pub trade_count: u32,
}

/// Aggregate performance of one trading session. The session breakdown
/// always contains all four sessions so the dashboard never has to handle
/// a missing category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPerformance {
    pub session: Session,
    /// wins / (wins + losses); zero for a session with no trades.
    pub win_rate: Decimal,
    pub total_profit: Decimal,
    pub trade_count: u32,
}

/// One $50-wide P/L histogram bin.
///
/// `lower_bound` is the signed lower edge of the bin's interval in dollars
/// and is the sort key; the display label is derived from it, never parsed
/// back out of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionBucket {
    pub lower_bound: Decimal,
    pub label: String,
    pub count: u32,
}

/// The full statistics bundle backing the journal dashboard.
///
/// Recomputed from scratch from the current trade collection on every
/// input change. Plain immutable data: the presentation layer only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStatsSnapshot {
    #[serde(flatten)]
    pub advanced: AdvancedMetrics,
    pub profit_curve: Vec<CurvePoint>,
    pub performance_by_instrument: Vec<InstrumentPerformance>,
    pub performance_by_session: Vec<SessionPerformance>,
    pub win_loss_distribution: Vec<DistributionBucket>,
}
