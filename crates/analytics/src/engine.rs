use crate::report::{
    AdvancedMetrics, AggregateStatsSnapshot, CurvePoint, DistributionBucket,
    InstrumentPerformance, SessionPerformance,
};
use chrono::{DateTime, Utc};
use core_types::{Session, Trade};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Width of one win/loss histogram bin, in dollars.
const BUCKET_WIDTH_USD: Decimal = dec!(50);

/// The instrument ranking is capped to the top performers.
const TOP_INSTRUMENTS: usize = 10;

/// A stateless calculator for deriving dashboard statistics from the
/// journal's trade collection.
///
/// Every method is a pure function of its input slice: same trades in the
/// same order always produce the same output, and nothing is cached or
/// mutated between calls. Realized-metric math only ever sees trades that
/// are closed with a settled P/L; open trades are filtered out up front.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the full statistics bundle for the dashboard.
    ///
    /// Degrades per metric: with no settled trades the scalar metrics come
    /// back zeroed, the series empty, and the session breakdown still
    /// carries all four sessions.
    pub fn snapshot(&self, trades: &[Trade]) -> AggregateStatsSnapshot {
        debug!(total_trades = trades.len(), "recomputing aggregate stats snapshot");

        AggregateStatsSnapshot {
            advanced: self.advanced_metrics(trades).unwrap_or_default(),
            profit_curve: self.profit_curve(trades),
            performance_by_instrument: self.performance_by_instrument(trades),
            performance_by_session: self.performance_by_session(trades),
            win_loss_distribution: self.win_loss_distribution(trades),
        }
    }

    /// Scalar risk metrics over the settled trades, in their input order.
    ///
    /// Returns `None` when no trade has settled yet; callers treat that as
    /// "nothing to display", not as an error.
    pub fn advanced_metrics(&self, trades: &[Trade]) -> Option<AdvancedMetrics> {
        let pnls: Vec<Decimal> = trades.iter().filter_map(Trade::realized_pnl).collect();
        if pnls.is_empty() {
            return None;
        }

        let (win_rate, average_win_usd, average_loss_usd, expectancy_usd) =
            Self::expectancy(&pnls);
        let (max_win_streak, max_loss_streak) = Self::streaks(&pnls);

        Some(AdvancedMetrics {
            sharpe_ratio: Self::sharpe_ratio(&pnls),
            max_drawdown_usd: Self::max_drawdown(&pnls),
            expectancy_usd,
            win_rate,
            max_win_streak,
            max_loss_streak,
            average_win_usd,
            average_loss_usd,
        })
    }

    /// Cumulative P/L over time, one point per settled trade, ordered by
    /// settlement time (entry time for malformed records missing one).
    pub fn profit_curve(&self, trades: &[Trade]) -> Vec<CurvePoint> {
        let mut settled: Vec<(DateTime<Utc>, Decimal)> = trades
            .iter()
            .filter_map(|t| t.realized_pnl().map(|pnl| (t.settled_at(), pnl)))
            .collect();
        settled.sort_by_key(|&(at, _)| at);

        let mut cumulative = Decimal::ZERO;
        settled
            .into_iter()
            .map(|(at, pnl)| {
                cumulative += pnl;
                CurvePoint {
                    label: at.format("%b %d").to_string(),
                    cumulative_profit: cumulative,
                }
            })
            .collect()
    }

    /// Settled P/L and trade count per instrument, best performers first,
    /// capped at the top ten. The sort is stable so instruments with equal
    /// profit keep their first-seen order.
    pub fn performance_by_instrument(&self, trades: &[Trade]) -> Vec<InstrumentPerformance> {
        let mut groups: Vec<InstrumentPerformance> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for trade in trades {
            let Some(pnl) = trade.realized_pnl() else {
                continue;
            };
            let slot = *index.entry(trade.instrument.clone()).or_insert_with(|| {
                groups.push(InstrumentPerformance {
                    instrument: trade.instrument.clone(),
                    total_profit: Decimal::ZERO,
                    trade_count: 0,
                });
                groups.len() - 1
            });
            groups[slot].total_profit += pnl;
            groups[slot].trade_count += 1;
        }

        groups.sort_by(|a, b| b.total_profit.cmp(&a.total_profit));
        groups.truncate(TOP_INSTRUMENTS);
        groups
    }

    /// Win rate, settled P/L, and trade count for each of the four trading
    /// sessions. All four are always present, so the dashboard never has to
    /// special-case a missing category.
    ///
    /// A breakeven trade counts as a loss here, matching the streak policy.
    pub fn performance_by_session(&self, trades: &[Trade]) -> Vec<SessionPerformance> {
        Session::ALL
            .iter()
            .map(|&session| {
                let mut wins = 0u32;
                let mut losses = 0u32;
                let mut total_profit = Decimal::ZERO;

                for trade in trades {
                    if trade.session != Some(session) {
                        continue;
                    }
                    let Some(pnl) = trade.realized_pnl() else {
                        continue;
                    };
                    if pnl > Decimal::ZERO {
                        wins += 1;
                    } else {
                        losses += 1;
                    }
                    total_profit += pnl;
                }

                let trade_count = wins + losses;
                let win_rate = if trade_count == 0 {
                    Decimal::ZERO
                } else {
                    Decimal::from(wins) / Decimal::from(trade_count)
                };

                SessionPerformance {
                    session,
                    win_rate,
                    total_profit,
                    trade_count,
                }
            })
            .collect()
    }

    /// Histogram of settled P/L in $50-wide bins, sorted ascending by the
    /// signed lower edge of each bin rather than by its display label.
    pub fn win_loss_distribution(&self, trades: &[Trade]) -> Vec<DistributionBucket> {
        let mut counts: BTreeMap<Decimal, u32> = BTreeMap::new();
        for trade in trades {
            let Some(pnl) = trade.realized_pnl() else {
                continue;
            };
            *counts.entry(Self::bucket_lower_bound(pnl)).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .map(|(lower_bound, count)| DistributionBucket {
                lower_bound,
                label: Self::bucket_label(lower_bound),
                count,
            })
            .collect()
    }

    /// Mean settled P/L over its population standard deviation; zero when
    /// the variance is zero, so a string of identical results never reads
    /// as infinitely good.
    fn sharpe_ratio(pnls: &[Decimal]) -> Decimal {
        let n = Decimal::from(pnls.len());
        let mean = pnls.iter().sum::<Decimal>() / n;
        let variance = pnls
            .iter()
            .map(|pnl| (*pnl - mean) * (*pnl - mean))
            .sum::<Decimal>()
            / n;
        if variance <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        match variance.sqrt() {
            Some(std_dev) if std_dev > Decimal::ZERO => mean / std_dev,
            _ => Decimal::ZERO,
        }
    }

    /// Peak-to-trough decline of the running balance, walked in input
    /// order. The peak only moves up; it never resets.
    fn max_drawdown(pnls: &[Decimal]) -> Decimal {
        let mut balance = Decimal::ZERO;
        let mut peak = Decimal::ZERO;
        let mut max_drawdown = Decimal::ZERO;

        for pnl in pnls {
            balance += *pnl;
            if balance > peak {
                peak = balance;
            }
            let drawdown = peak - balance;
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
        }

        max_drawdown
    }

    /// Returns (win_rate, average_win, average_loss, expectancy).
    ///
    /// Breakeven trades join the win-rate denominator but neither average;
    /// the average loss is a non-negative magnitude.
    fn expectancy(pnls: &[Decimal]) -> (Decimal, Decimal, Decimal, Decimal) {
        let winners: Vec<Decimal> = pnls.iter().copied().filter(|p| *p > Decimal::ZERO).collect();
        let losers: Vec<Decimal> = pnls.iter().copied().filter(|p| *p < Decimal::ZERO).collect();

        let win_rate = Decimal::from(winners.len()) / Decimal::from(pnls.len());
        let average_win = if winners.is_empty() {
            Decimal::ZERO
        } else {
            winners.iter().sum::<Decimal>() / Decimal::from(winners.len())
        };
        let average_loss = if losers.is_empty() {
            Decimal::ZERO
        } else {
            losers.iter().sum::<Decimal>().abs() / Decimal::from(losers.len())
        };
        let expectancy = win_rate * average_win - (Decimal::ONE - win_rate) * average_loss;

        (win_rate, average_win, average_loss, expectancy)
    }

    /// Longest win and loss runs in input order. A breakeven trade counts
    /// as a loss; the streak restarts at 1 whenever the classification
    /// flips.
    fn streaks(pnls: &[Decimal]) -> (u32, u32) {
        let mut max_win = 0u32;
        let mut max_loss = 0u32;
        let mut current = 0u32;
        let mut previous: Option<bool> = None;

        for pnl in pnls {
            let is_win = *pnl > Decimal::ZERO;
            if previous == Some(is_win) {
                current += 1;
            } else {
                current = 1;
            }
            previous = Some(is_win);
            if is_win {
                max_win = max_win.max(current);
            } else {
                max_loss = max_loss.max(current);
            }
        }

        (max_win, max_loss)
    }

    /// Signed lower edge of the bin a settled P/L falls into. Magnitudes
    /// are floor-divided into $50 steps on each side of zero, so a $73 win
    /// lands in [50, 100) and a $12 loss in (-50, 0].
    fn bucket_lower_bound(pnl: Decimal) -> Decimal {
        if pnl >= Decimal::ZERO {
            (pnl / BUCKET_WIDTH_USD).floor() * BUCKET_WIDTH_USD
        } else {
            let magnitude_step = (pnl.abs() / BUCKET_WIDTH_USD).floor() * BUCKET_WIDTH_USD;
            -magnitude_step - BUCKET_WIDTH_USD
        }
    }

    /// Sign-preserving display label for a bin, derived from its numeric
    /// edge: "+$50" for [50, 100), "-$0" for (-50, 0].
    fn bucket_label(lower_bound: Decimal) -> String {
        if lower_bound < Decimal::ZERO {
            format!("-${}", (-lower_bound - BUCKET_WIDTH_USD).normalize())
        } else {
            format!("+${}", lower_bound.normalize())
        }
    }
}
