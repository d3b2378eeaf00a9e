//! Handler for the `run` command.

use crate::app::App;
use crate::cli::{Cli, RunArgs};
use crate::config::Config;
use crate::error::Result;
use tracing::info;

/// Load configuration, apply CLI overrides, and start the scan loop.
pub async fn execute(cli: &Cli, args: &RunArgs) -> Result<()> {
    let mut config = Config::load_or_default(&cli.config)?;

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }
    if let Some(interval) = args.interval {
        config.scanner.interval_secs = interval;
    }
    if let Some(min_spread_bps) = args.min_spread_bps {
        config.scanner.min_spread_bps = min_spread_bps;
    }
    if let Some(top) = args.top {
        config.scanner.top_n = top;
    }
    if let Some(min_qv_usd) = args.min_qv_usd {
        config.scanner.min_quote_volume_usd = min_qv_usd;
    }
    if let Some(ref exchanges) = args.exchanges {
        config.exchanges = exchanges
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
    }
    for symbol in &args.pinned {
        if !config.scanner.pinned_symbols.contains(symbol) {
            config.scanner.pinned_symbols.push(symbol.clone());
        }
    }

    config.validate()?;
    config.init_logging();

    info!(
        exchanges = ?config.exchanges,
        min_spread_bps = %config.scanner.min_spread_bps,
        min_quote_volume_usd = %config.scanner.min_quote_volume_usd,
        "spreadscan starting"
    );

    App::run(config).await
}
