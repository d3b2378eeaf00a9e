//! Application orchestration: connect to the configured exchanges and run
//! the polling scan loop.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::cache::{NetworkCache, Resolution, RouteKey, RouteNetworks};
use crate::cli::output;
use crate::config::Config;
use crate::domain::{split_symbol, NetworkTable, Opportunity, TickersByExchange};
use crate::error::{Error, Result};
use crate::exchange::{create_exchange, Exchange};
use crate::fees::FeeSchedule;
use crate::resolver;
use crate::scanner;

type ExchangeMap = HashMap<String, Arc<dyn Exchange>>;

pub struct App;

impl App {
    /// Run the scan loop until cancelled from outside.
    pub async fn run(config: Config) -> Result<()> {
        let (exchanges, symbols) = connect_exchanges(&config).await?;
        if symbols.is_empty() {
            warn!("no USDT spot symbols found on the online exchanges");
            return Ok(());
        }

        info!(
            exchanges = exchanges.len(),
            symbols = symbols.len(),
            "Scan session starting"
        );

        let fees = FeeSchedule::from(&config.fees);
        let min_spread_pct = config.min_spread_pct();
        let interval = Duration::from_secs_f64(config.scanner.interval_secs);
        // Route resolutions are deterministic for fixed tables; keep them for
        // the whole session and start fresh next session.
        let mut cache = NetworkCache::new();

        loop {
            let tickers = fetch_all_tickers(&exchanges, &symbols).await;

            let opps = scanner::compute_opportunities(
                &symbols,
                &tickers,
                &fees,
                min_spread_pct,
                config.scanner.min_quote_volume_usd,
            )?;
            let opps = scanner::append_pinned(opps, &config.scanner.pinned_symbols, &tickers, &fees);
            let opps = if opps.is_empty() {
                debug!("scan produced nothing; falling back to best candidates");
                scanner::best_candidates(&symbols, &tickers, &fees, config.scanner.top_n)
            } else {
                opps
            };

            let top: Vec<Opportunity> = opps.into_iter().take(config.scanner.top_n).collect();
            resolve_networks(
                &exchanges,
                &top,
                &mut cache,
                config.scanner.network_checks,
                config.scanner.network_concurrency,
            )
            .await;

            println!("{}", output::render_opportunities(&top, &cache));
            tokio::time::sleep(interval).await;
        }
    }
}

/// Connect to every configured exchange, dropping the ones that fail.
/// At least two must survive for cross-exchange arbitrage to exist.
async fn connect_exchanges(config: &Config) -> Result<(ExchangeMap, Vec<String>)> {
    let mut exchanges = ExchangeMap::new();
    let mut union: BTreeSet<String> = BTreeSet::new();

    for name in &config.exchanges {
        let exchange = match create_exchange(name) {
            Ok(exchange) => exchange,
            Err(err) => {
                warn!(exchange = %name, error = %err, "Skipping exchange");
                continue;
            }
        };
        match exchange.spot_symbols().await {
            Ok(symbols) => {
                info!(exchange = %name, symbols = symbols.len(), "Exchange online");
                union.extend(symbols);
                exchanges.insert(exchange.name().to_string(), exchange);
            }
            Err(err) => {
                warn!(exchange = %name, error = %err, "Exchange unavailable, continuing without it");
            }
        }
    }

    if exchanges.len() < 2 {
        return Err(Error::NotEnoughExchanges {
            online: exchanges.len(),
            requested: config.exchanges.len(),
        });
    }
    Ok((exchanges, union.into_iter().collect()))
}

/// Fetch tickers from every exchange concurrently. A failed fetch degrades
/// to an empty map for that exchange, same as "no data".
async fn fetch_all_tickers(exchanges: &ExchangeMap, symbols: &[String]) -> TickersByExchange {
    let fetches = exchanges.values().map(|exchange| async move {
        (exchange.name().to_string(), exchange.fetch_tickers(symbols).await)
    });

    let mut book = TickersByExchange::new();
    for (name, result) in join_all(fetches).await {
        match result {
            Ok(tickers) => {
                book.insert(name, tickers);
            }
            Err(err) => {
                warn!(exchange = %name, error = %err, "Ticker fetch failed; treating as no data");
                book.insert(name, Default::default());
            }
        }
    }
    book
}

/// Resolve transfer networks for the top opportunities not already cached,
/// fanning out under a bounded semaphore to respect upstream rate limits.
async fn resolve_networks(
    exchanges: &ExchangeMap,
    opps: &[Opportunity],
    cache: &mut NetworkCache,
    checks: usize,
    concurrency: usize,
) {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut handles = Vec::new();

    for opp in opps.iter().take(checks) {
        let key = RouteKey::new(
            opp.buy_exchange.as_str(),
            opp.sell_exchange.as_str(),
            opp.symbol.as_str(),
        );
        if cache.contains(&key) {
            continue;
        }
        let (Some(buy), Some(sell)) = (
            exchanges.get(&opp.buy_exchange).cloned(),
            exchanges.get(&opp.sell_exchange).cloned(),
        ) else {
            cache.insert(
                key,
                RouteNetworks {
                    base: Resolution::NoRoute,
                    quote: Resolution::NoRoute,
                },
            );
            continue;
        };

        let symbol = opp.symbol.clone();
        let semaphore = semaphore.clone();
        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            let networks = resolve_route(buy.as_ref(), sell.as_ref(), &symbol).await;
            (key, networks)
        }));
    }

    for handle in handles {
        match handle.await {
            Ok((key, networks)) => cache.insert(key, networks),
            Err(err) => warn!(error = %err, "network resolution task failed"),
        }
    }
}

async fn resolve_route(buy: &dyn Exchange, sell: &dyn Exchange, symbol: &str) -> RouteNetworks {
    let Some((base, quote)) = split_symbol(symbol) else {
        return RouteNetworks {
            base: Resolution::NoRoute,
            quote: Resolution::NoRoute,
        };
    };
    RouteNetworks {
        base: resolve_leg(buy, sell, base).await,
        quote: resolve_leg(buy, sell, quote).await,
    }
}

/// Resolve one currency of a route: funds move off the buy exchange onto
/// the sell exchange.
async fn resolve_leg(buy: &dyn Exchange, sell: &dyn Exchange, currency: &str) -> Resolution {
    let src = currency_table(buy, currency).await;
    let dst = currency_table(sell, currency).await;
    match resolver::best_common_network(&src, &dst, currency) {
        Ok(result) => Resolution::from(result),
        Err(err) => {
            warn!(currency, error = %err, "network resolution rejected");
            Resolution::NoRoute
        }
    }
}

async fn currency_table(exchange: &dyn Exchange, currency: &str) -> NetworkTable {
    let mut table = NetworkTable::new();
    match exchange.currency_networks(currency).await {
        Ok(entries) if !entries.is_empty() => table.insert(currency, entries),
        Ok(_) => {}
        Err(err) => {
            debug!(exchange = exchange.name(), currency, error = %err, "no network data");
        }
    }
    table
}
