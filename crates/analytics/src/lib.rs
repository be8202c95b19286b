//! # Journal Analytics Engine
//!
//! This crate derives the trading-performance statistics shown on the
//! journal dashboard. It acts as the "unbiased judge" of the account.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless
//!   calculator. It takes the full trade collection as input and produces an
//!   `AggregateStatsSnapshot` as output. Every call recomputes from scratch;
//!   nothing is patched in place, which makes it trivially safe to re-run
//!   whenever the trade list changes and easy to test.
//! - **Degrade, never fail:** empty or partially populated input yields
//!   zeroed/empty metrics, never an error or a panic.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: the calculation logic.
//! - `AggregateStatsSnapshot` / `AdvancedMetrics`: the derived statistics.
//! - `achievement_progress`: the milestone table derived from the backend's
//!   summary counters plus the advanced metrics.

// Declare the modules that constitute this crate.
pub mod achievements;
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use achievements::{achievement_progress, AchievementProgress};
pub use engine::AnalyticsEngine;
pub use report::{
    AdvancedMetrics, AggregateStatsSnapshot, CurvePoint, DistributionBucket,
    InstrumentPerformance, SessionPerformance,
};
