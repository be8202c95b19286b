use crate::report::AdvancedMetrics;
use core_types::SummaryStats;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Progress toward one named milestone.
///
/// `progress` is the raw underlying counter, not clamped to `target`, so
/// the dashboard can show "12 / 10" style overshoot if it wants to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementProgress {
    pub id: &'static str,
    pub title: &'static str,
    pub unlocked: bool,
    pub progress: Decimal,
    pub target: Decimal,
}

impl AchievementProgress {
    fn reached(id: &'static str, title: &'static str, progress: Decimal, target: Decimal) -> Self {
        Self {
            id,
            title,
            unlocked: progress >= target,
            progress,
            target,
        }
    }
}

/// Maps the backend's summary counters and the derived metrics onto the
/// fixed milestone list. A declarative lookup, not a computation: the
/// counters themselves are authoritative external input and are never
/// recomputed here.
pub fn achievement_progress(
    summary: &SummaryStats,
    metrics: &AdvancedMetrics,
) -> Vec<AchievementProgress> {
    let total_trades = Decimal::from(summary.total_trades);

    vec![
        AchievementProgress::reached("first_trade", "First Steps", total_trades, dec!(1)),
        AchievementProgress::reached("ten_trades", "Finding a Rhythm", total_trades, dec!(10)),
        AchievementProgress::reached("fifty_trades", "Seasoned Trader", total_trades, dec!(50)),
        AchievementProgress::reached("hundred_trades", "Century Club", total_trades, dec!(100)),
        AchievementProgress::reached(
            "thousand_club",
            "Thousand Dollar Club",
            summary.net_profit,
            dec!(1000),
        ),
        AchievementProgress::reached(
            "big_winner",
            "Big Winner",
            summary.largest_win,
            dec!(500),
        ),
        AchievementProgress::reached(
            "sharpshooter",
            "Sharpshooter",
            summary.win_rate_pct,
            dec!(60),
        ),
        AchievementProgress::reached(
            "hot_streak",
            "Hot Streak",
            Decimal::from(metrics.max_win_streak),
            dec!(5),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total_trades: u64) -> SummaryStats {
        SummaryStats {
            total_trades,
            open_trades: 0,
            closed_trades: total_trades,
            winning_trades: 0,
            losing_trades: 0,
            breakeven_trades: 0,
            win_rate_pct: Decimal::ZERO,
            total_pips: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            net_profit: Decimal::ZERO,
            profit_factor: Decimal::ZERO,
            average_win_pips: Decimal::ZERO,
            average_loss_pips: Decimal::ZERO,
            largest_win: Decimal::ZERO,
            largest_loss: Decimal::ZERO,
            free_trades_remaining: 0,
        }
    }

    fn find<'a>(table: &'a [AchievementProgress], id: &str) -> &'a AchievementProgress {
        table.iter().find(|a| a.id == id).unwrap()
    }

    #[test]
    fn ten_trades_locks_at_nine_and_unlocks_at_ten() {
        let metrics = AdvancedMetrics::default();

        let table = achievement_progress(&summary(9), &metrics);
        let nine = find(&table, "ten_trades");
        assert!(!nine.unlocked);
        assert_eq!(nine.progress, dec!(9));
        assert_eq!(nine.target, dec!(10));

        let table = achievement_progress(&summary(10), &metrics);
        assert!(find(&table, "ten_trades").unlocked);
    }

    #[test]
    fn streak_milestone_reads_the_derived_metrics() {
        let metrics = AdvancedMetrics {
            max_win_streak: 5,
            ..AdvancedMetrics::default()
        };
        let table = achievement_progress(&summary(20), &metrics);
        assert!(find(&table, "hot_streak").unlocked);
        assert!(find(&table, "first_trade").unlocked);
        assert!(!find(&table, "thousand_club").unlocked);
    }

    #[test]
    fn progress_is_not_clamped_to_target() {
        let table = achievement_progress(&summary(250), &AdvancedMetrics::default());
        let hundred = find(&table, "hundred_trades");
        assert!(hundred.unlocked);
        assert_eq!(hundred.progress, dec!(250));
    }
}
