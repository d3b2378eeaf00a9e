//! Command-line interface.

pub mod output;
mod route;
mod run;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::error::Result;

#[derive(Debug, Parser)]
#[command(
    name = "spreadscan",
    version,
    about = "Cross-exchange spot arbitrage scanner"
)]
pub struct Cli {
    /// Path to the TOML config file.
    #[arg(short, long, global = true, default_value = "spreadscan.toml")]
    pub config: PathBuf,

    /// Override the configured log level.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit JSON logs.
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Poll exchanges and rank fee-adjusted arbitrage opportunities.
    Run(RunArgs),
    /// Resolve the cheapest transfer network between two exchanges.
    Route(RouteArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Seconds between poll cycles.
    #[arg(long)]
    pub interval: Option<f64>,

    /// Minimum fee-adjusted spread to report, in basis points.
    #[arg(long)]
    pub min_spread_bps: Option<Decimal>,

    /// How many ranked opportunities to display.
    #[arg(long)]
    pub top: Option<usize>,

    /// Comma-separated exchanges to scan.
    #[arg(long)]
    pub exchanges: Option<String>,

    /// Minimum 24h quote volume per exchange, in USDT.
    #[arg(long)]
    pub min_qv_usd: Option<Decimal>,

    /// Symbol to always evaluate and report; repeatable.
    #[arg(long = "pin", value_name = "SYMBOL")]
    pub pinned: Vec<String>,
}

#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Exchange to withdraw from.
    #[arg(long)]
    pub from: String,

    /// Exchange to deposit into.
    #[arg(long)]
    pub to: String,

    /// Currency code, e.g. USDT.
    #[arg(long)]
    pub currency: String,
}

/// Execute the selected subcommand.
pub async fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Run(args) => run::execute(cli, args).await,
        Commands::Route(args) => route::execute(cli, args).await,
    }
}
