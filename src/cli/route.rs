//! Handler for the `route` command: one-shot transfer-network resolution
//! between two exchanges.

use crate::cli::{output, Cli, RouteArgs};
use crate::config::Config;
use crate::domain::NetworkTable;
use crate::error::Result;
use crate::exchange::{create_exchange, Exchange};
use crate::resolver;

pub async fn execute(cli: &Cli, args: &RouteArgs) -> Result<()> {
    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }
    config.init_logging();

    let src = create_exchange(&args.from)?;
    let dst = create_exchange(&args.to)?;
    let currency = args.currency.to_uppercase();

    let src_table = currency_table(src.as_ref(), &currency).await?;
    let dst_table = currency_table(dst.as_ref(), &currency).await?;

    output::section(&format!("{} -> {} : {}", src.name(), dst.name(), currency));

    match resolver::best_common_network(&src_table, &dst_table, &currency)? {
        Some(best) => {
            output::key_value("Network", &best.network);
            let fee = match best.withdraw_fee {
                Some(fee) => format!("{fee} {currency}"),
                None => "unknown".to_string(),
            };
            output::key_value("Withdraw fee", fee);
        }
        None => {
            output::note("No common network with withdrawal and deposit enabled.");
            // Informational fallback: cheapest way off the source venue.
            match resolver::best_withdraw_network(&src_table, &currency)? {
                Some(best) => {
                    let fee = match best.withdraw_fee {
                        Some(fee) => format!("fee {fee} {currency}"),
                        None => "fee unknown".to_string(),
                    };
                    output::key_value(
                        &format!("Best withdrawal off {}", src.name()),
                        format!("{} ({fee})", best.network),
                    );
                }
                None => {
                    output::note(&format!(
                        "{} reports no withdrawal-enabled network for {}",
                        src.name(),
                        currency
                    ));
                }
            }
        }
    }
    Ok(())
}

async fn currency_table(exchange: &dyn Exchange, currency: &str) -> Result<NetworkTable> {
    let mut table = NetworkTable::new();
    let entries = exchange.currency_networks(currency).await?;
    if !entries.is_empty() {
        table.insert(currency, entries);
    }
    Ok(table)
}
