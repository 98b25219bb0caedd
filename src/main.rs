use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use core_types::{as_percent, Property};
use pipeline::{BatchReport, Pipeline};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// The main entry point for the DealScope analysis application.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Analyze(args) => {
            if let Err(e) = handle_analyze(args).await {
                eprintln!("Error during analysis: {}", e);
                std::process::exit(1);
            }
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Screens real-estate listings, scores them as investments and derives a
/// negotiation strategy for each candidate.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the analysis pipeline over a listings file.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// Path to the JSON listings inventory.
    #[arg(long)]
    listings: PathBuf,

    /// Path to the run configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Emit the full report as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Analyze Command Logic
// ==============================================================================

/// Handles the orchestration of one analysis run: load the configuration,
/// read the inventory, run the pipeline, render the report.
async fn handle_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = configuration::load_config(&args.config)
        .with_context(|| format!("failed to load configuration from {}", args.config.display()))?;

    let raw = std::fs::read_to_string(&args.listings)
        .with_context(|| format!("failed to read listings from {}", args.listings.display()))?;
    let inventory: Vec<Property> =
        serde_json::from_str(&raw).context("listings file is not a valid inventory")?;
    info!(listings = inventory.len(), "loaded inventory");

    let pipeline = Pipeline::new(config)?;
    let report = pipeline.run(&inventory).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }

    Ok(())
}

fn render_report(report: &BatchReport) {
    println!(
        "Run {} — {} analyzed, {} failed",
        report.run_id,
        report.results.len(),
        report.failures.len()
    );

    if !report.results.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            "ID", "Address", "Asking", "Cap Rate", "CoC", "Cash Flow/mo", "Score", "Risk",
            "Max Offer", "Opening",
        ]);
        for r in &report.results {
            table.add_row(vec![
                r.property.id.clone(),
                format!("{}, {}", r.property.address, r.property.city),
                format!("${}", r.property.price.round_dp(0)),
                format!("{}%", as_percent(r.metrics.cap_rate)),
                format!("{}%", as_percent(r.metrics.cash_on_cash)),
                format!("${}", r.metrics.monthly_cash_flow.round_dp(2)),
                r.score.value.to_string(),
                r.score.risk_tier.to_string(),
                format!("${}", r.strategy.max_offer),
                format!("${}", r.strategy.opening_offer),
            ]);
        }
        println!("{table}");
    }

    if !report.failures.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["ID", "Stage", "Reason"]);
        for (id, failure) in &report.failures {
            table.add_row(vec![
                id.clone(),
                format!("{:?}", failure.stage),
                failure.detail.clone(),
            ]);
        }
        println!("{table}");
    }

    for r in &report.results {
        println!("\n{} — negotiation talking points:", r.property.id);
        for (i, point) in r.strategy.talking_points.iter().enumerate() {
            println!("  {}. {}", i + 1, point);
        }
    }
}
