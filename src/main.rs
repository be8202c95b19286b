use analytics::{achievement_progress, AggregateStatsSnapshot, AnalyticsEngine};
use api_client::{HttpJournalClient, JournalApi};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use tracing_subscriber::EnvFilter;

/// The main entry point for the journal analytics CLI.
#[tokio::main]
async fn main() {
    // Load environment variables (API key, log filter) from .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Report(args) => handle_report(args).await,
        Commands::Achievements(args) => handle_achievements(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Performance analytics for your trading journal, from the command line.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the trade history and print the full statistics snapshot.
    Report(OutputArgs),

    /// Show milestone progress derived from the account summary.
    Achievements(OutputArgs),
}

#[derive(Parser)]
struct OutputArgs {
    /// Emit machine-readable JSON instead of tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_report(args: OutputArgs) -> anyhow::Result<()> {
    let config = configuration::load_config()?;
    let client = HttpJournalClient::new(&config.api)?;

    let trades = client.fetch_trades().await?;
    tracing::info!(total_trades = trades.len(), "fetched trade history");

    let engine = AnalyticsEngine::new();
    let snapshot = engine.snapshot(&trades);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("Statistics over {} trades\n", trades.len());
    print_overview(&snapshot);
    print_instruments(&snapshot);
    print_sessions(&snapshot);
    print_distribution(&snapshot);
    print_curve(&snapshot);

    Ok(())
}

async fn handle_achievements(args: OutputArgs) -> anyhow::Result<()> {
    let config = configuration::load_config()?;
    let client = HttpJournalClient::new(&config.api)?;

    let summary = client.fetch_summary_stats().await?;
    let trades = client.fetch_trades().await?;
    let engine = AnalyticsEngine::new();
    let metrics = engine.advanced_metrics(&trades).unwrap_or_default();
    let table_data = achievement_progress(&summary, &metrics);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&table_data)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Milestone", "Progress", "Target", "Unlocked"]);
    for entry in &table_data {
        table.add_row(vec![
            entry.title.to_string(),
            entry.progress.round_dp(2).to_string(),
            entry.target.to_string(),
            if entry.unlocked { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}

// ==============================================================================
// Table Rendering
// ==============================================================================

fn print_overview(snapshot: &AggregateStatsSnapshot) {
    let advanced = &snapshot.advanced;
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        "Sharpe ratio".to_string(),
        advanced.sharpe_ratio.round_dp(2).to_string(),
    ]);
    table.add_row(vec![
        "Max drawdown ($)".to_string(),
        advanced.max_drawdown_usd.round_dp(2).to_string(),
    ]);
    table.add_row(vec![
        "Expectancy ($/trade)".to_string(),
        advanced.expectancy_usd.round_dp(2).to_string(),
    ]);
    table.add_row(vec![
        "Win rate".to_string(),
        format!("{}%", (advanced.win_rate * rust_decimal::Decimal::ONE_HUNDRED).round_dp(1)),
    ]);
    table.add_row(vec![
        "Average win ($)".to_string(),
        advanced.average_win_usd.round_dp(2).to_string(),
    ]);
    table.add_row(vec![
        "Average loss ($)".to_string(),
        advanced.average_loss_usd.round_dp(2).to_string(),
    ]);
    table.add_row(vec![
        "Longest win streak".to_string(),
        advanced.max_win_streak.to_string(),
    ]);
    table.add_row(vec![
        "Longest loss streak".to_string(),
        advanced.max_loss_streak.to_string(),
    ]);
    println!("{table}\n");
}

fn print_instruments(snapshot: &AggregateStatsSnapshot) {
    if snapshot.performance_by_instrument.is_empty() {
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Instrument", "Total P/L ($)", "Trades"]);
    for entry in &snapshot.performance_by_instrument {
        table.add_row(vec![
            entry.instrument.clone(),
            entry.total_profit.round_dp(2).to_string(),
            entry.trade_count.to_string(),
        ]);
    }
    println!("Top instruments\n{table}\n");
}

fn print_sessions(snapshot: &AggregateStatsSnapshot) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Session", "Win rate", "Total P/L ($)", "Trades"]);
    for entry in &snapshot.performance_by_session {
        table.add_row(vec![
            entry.session.to_string(),
            format!("{}%", (entry.win_rate * rust_decimal::Decimal::ONE_HUNDRED).round_dp(1)),
            entry.total_profit.round_dp(2).to_string(),
            entry.trade_count.to_string(),
        ]);
    }
    println!("Performance by session\n{table}\n");
}

fn print_distribution(snapshot: &AggregateStatsSnapshot) {
    if snapshot.win_loss_distribution.is_empty() {
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Bucket", "Trades"]);
    for bucket in &snapshot.win_loss_distribution {
        table.add_row(vec![bucket.label.clone(), bucket.count.to_string()]);
    }
    println!("Win/loss distribution\n{table}\n");
}

fn print_curve(snapshot: &AggregateStatsSnapshot) {
    if snapshot.profit_curve.is_empty() {
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Settled", "Cumulative P/L ($)"]);
    // The full curve can run to hundreds of points; the tail is what the
    // terminal reader cares about.
    let tail = snapshot.profit_curve.len().saturating_sub(15);
    for point in &snapshot.profit_curve[tail..] {
        table.add_row(vec![
            point.label.clone(),
            point.cumulative_profit.round_dp(2).to_string(),
        ]);
    }
    println!("Profit curve (last {} trades)\n{table}", snapshot.profit_curve.len() - tail);
}
