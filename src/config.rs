//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file; every field has a default so a
//! missing file falls back to a usable configuration, and the CLI applies
//! its overrides on top.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Exchanges to scan, lowercase names.
    #[serde(default = "default_exchanges")]
    pub exchanges: Vec<String>,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub fees: FeesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_exchanges() -> Vec<String> {
    vec![
        "bitget".to_string(),
        "bingx".to_string(),
        "bybit".to_string(),
    ]
}

/// Scan-loop thresholds and pacing.
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    /// Seconds between poll cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: f64,
    /// Minimum fee-adjusted spread to report, in basis points.
    #[serde(default)]
    pub min_spread_bps: Decimal,
    /// Per-exchange 24h quote-turnover floor; zero disables the gate.
    #[serde(default = "default_min_quote_volume_usd")]
    pub min_quote_volume_usd: Decimal,
    /// How many ranked opportunities to display.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Symbols always evaluated and reported, thresholds notwithstanding.
    #[serde(default)]
    pub pinned_symbols: Vec<String>,
    /// How many top opportunities get network resolution per cycle.
    #[serde(default = "default_network_checks")]
    pub network_checks: usize,
    /// Concurrent network-resolution fetches (upstream rate-limit guard).
    #[serde(default = "default_network_concurrency")]
    pub network_concurrency: usize,
}

fn default_interval_secs() -> f64 {
    5.0
}

fn default_min_quote_volume_usd() -> Decimal {
    Decimal::from(50_000)
}

fn default_top_n() -> usize {
    20
}

fn default_network_checks() -> usize {
    3
}

fn default_network_concurrency() -> usize {
    4
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            min_spread_bps: Decimal::ZERO,
            min_quote_volume_usd: default_min_quote_volume_usd(),
            top_n: default_top_n(),
            pinned_symbols: Vec::new(),
            network_checks: default_network_checks(),
            network_concurrency: default_network_concurrency(),
        }
    }
}

/// Taker fee rates per exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct FeesConfig {
    /// Rate applied to exchanges without an override (fraction, 0.001 = 0.1%).
    #[serde(default = "default_taker")]
    pub default_taker: Decimal,
    /// Per-exchange overrides, keyed by exchange name.
    #[serde(default)]
    pub taker: HashMap<String, Decimal>,
}

fn default_taker() -> Decimal {
    Decimal::new(1, 3)
}

impl Default for FeesConfig {
    fn default() -> Self {
        Self {
            default_taker: default_taker(),
            taker: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "pretty" or "json".
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exchanges: default_exchanges(),
            scanner: ScannerConfig::default(),
            fees: FeesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file, falling back to defaults when the file does
    /// not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.exchanges.is_empty() {
            return Err(ConfigError::MissingField { field: "exchanges" }.into());
        }
        if self.scanner.interval_secs <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "scanner.interval_secs",
                reason: "must be positive".to_string(),
            }
            .into());
        }
        if self.scanner.top_n == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scanner.top_n",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.scanner.min_quote_volume_usd < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "scanner.min_quote_volume_usd",
                reason: "must not be negative".to_string(),
            }
            .into());
        }
        if self.scanner.network_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scanner.network_concurrency",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        self.validate_fee("fees.default_taker", self.fees.default_taker)?;
        for rate in self.fees.taker.values() {
            self.validate_fee("fees.taker", *rate)?;
        }
        Ok(())
    }

    fn validate_fee(&self, field: &'static str, rate: Decimal) -> Result<()> {
        if rate < Decimal::ZERO || rate >= Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field,
                reason: format!("fee rate {rate} must be in [0, 1)"),
            }
            .into());
        }
        Ok(())
    }

    /// Minimum spread threshold in percent (config carries basis points).
    pub fn min_spread_pct(&self) -> Decimal {
        self.scanner.min_spread_bps / Decimal::ONE_HUNDRED
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}
