use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Caller contract violations.
///
/// The scanner and resolver silently skip malformed market data; the only
/// conditions they surface as errors are degenerate arguments that indicate
/// an integration bug in the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("symbol list must contain at least one symbol")]
    EmptySymbols,

    #[error("currency code must not be empty")]
    EmptyCurrency,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("unsupported exchange: {0}")]
    UnsupportedExchange(String),

    #[error("not enough exchanges online: {online} of {requested} (need at least 2)")]
    NotEnoughExchanges { online: usize, requested: usize },

    #[error("exchange {exchange}: {reason}")]
    Exchange { exchange: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
