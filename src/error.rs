use thiserror::Error;

/// Problems with the card configuration. Nothing is rendered when one occurs.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("No forecast entity configured")]
    MissingEntity,

    #[error("Unknown forecast entity: {0} (expected file:<path> or noaa:<station>)")]
    UnknownEntity(String),

    #[error("{field} must be a non-negative integer, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("num_hours must be at least 1")]
    ZeroHours,
}

/// A refresh request that the forecast cannot satisfy.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error(
        "Too many forecast hours requested in num_hours. Must be <= number of forecast hours ({available})."
    )]
    TooManyHours { requested: usize, available: usize },

    #[error("num_hours must be at least 1")]
    EmptyWindow,
}

/// Failures while loading forecast data from a source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid NOAA timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Display type already registered: {0}")]
    Duplicate(String),
}
