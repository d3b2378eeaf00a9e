use std::fs;
use std::path::PathBuf;

use rust_decimal_macros::dec;
use spreadscan::config::Config;
use spreadscan::error::{ConfigError, Error};
use tempfile::TempDir;

fn write_temp_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("spreadscan.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn defaults_are_usable_without_a_file() {
    let config = Config::load_or_default("/nonexistent/spreadscan.toml").unwrap();

    assert_eq!(config.exchanges, vec!["bitget", "bingx", "bybit"]);
    assert_eq!(config.scanner.interval_secs, 5.0);
    assert_eq!(config.scanner.min_quote_volume_usd, dec!(50000));
    assert_eq!(config.scanner.top_n, 20);
    assert!(config.scanner.pinned_symbols.is_empty());
    assert_eq!(config.fees.default_taker, dec!(0.001));
    assert_eq!(config.logging.level, "info");
    config.validate().expect("defaults must validate");
}

#[test]
fn full_config_round_trips() {
    let toml = r#"
exchanges = ["bybit", "bitget"]

[scanner]
interval_secs = 2.5
min_spread_bps = 15
min_quote_volume_usd = 100000
top_n = 10
pinned_symbols = ["BTC/USDT", "TON/USDT"]
network_checks = 5
network_concurrency = 2

[fees]
default_taker = 0.002

[fees.taker]
bybit = 0.0018

[logging]
level = "debug"
format = "json"
"#;
    let dir = TempDir::new().expect("temp dir");
    let path = write_temp_config(&dir, toml);
    let config = Config::load(&path).unwrap();

    assert_eq!(config.exchanges, vec!["bybit", "bitget"]);
    assert_eq!(config.scanner.interval_secs, 2.5);
    assert_eq!(config.scanner.min_spread_bps, dec!(15));
    // Basis points convert to percent for the scanner.
    assert_eq!(config.min_spread_pct(), dec!(0.15));
    assert_eq!(config.scanner.pinned_symbols.len(), 2);
    assert_eq!(config.fees.taker["bybit"], dec!(0.0018));
    assert_eq!(config.logging.format, "json");
}

#[test]
fn rejects_non_positive_interval() {
    let toml = r#"
[scanner]
interval_secs = 0.0
"#;
    let dir = TempDir::new().expect("temp dir");
    let path = write_temp_config(&dir, toml);
    let result = Config::load(&path);

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "scanner.interval_secs",
            ..
        })) => {}
        Err(err) => panic!("expected invalid interval error, got {err}"),
        Ok(_) => panic!("expected invalid interval to be rejected"),
    }
}

#[test]
fn rejects_fee_rate_of_one_or_more() {
    let toml = r#"
[fees]
default_taker = 1.0
"#;
    let dir = TempDir::new().expect("temp dir");
    let path = write_temp_config(&dir, toml);
    let result = Config::load(&path);

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "fees.default_taker",
            ..
        })) => {}
        Err(err) => panic!("expected invalid fee error, got {err}"),
        Ok(_) => panic!("expected invalid fee to be rejected"),
    }
}

#[test]
fn rejects_empty_exchange_list() {
    let toml = r#"
exchanges = []
"#;
    let dir = TempDir::new().expect("temp dir");
    let path = write_temp_config(&dir, toml);
    let result = Config::load(&path);

    match result {
        Err(Error::Config(ConfigError::MissingField { field: "exchanges" })) => {}
        Err(err) => panic!("expected missing exchanges error, got {err}"),
        Ok(_) => panic!("expected empty exchange list to be rejected"),
    }
}

#[test]
fn rejects_zero_top_n() {
    let toml = r#"
[scanner]
top_n = 0
"#;
    let dir = TempDir::new().expect("temp dir");
    let path = write_temp_config(&dir, toml);
    let result = Config::load(&path);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "scanner.top_n",
            ..
        }))
    ));
}
