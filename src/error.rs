// src/error.rs
use thiserror::Error;

/// Fatal startup problems. Raised before any feed is fetched.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config path from {var} does not exist: {path}")]
    MissingPath { var: &'static str, path: String },

    #[error("parsing TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("parsing JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("eligibility term list is empty")]
    EmptyEligibility,

    #[error("invalid window `{name}`: {value} (must be at least 1 day)")]
    InvalidWindow { name: &'static str, value: u32 },

    #[error("invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("invalid whole-word pattern for term `{term}`: {source}")]
    Pattern {
        term: String,
        #[source]
        source: regex::Error,
    },
}

/// Feed-level failures. The orchestrator recovers these into an empty entry list.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("building feed url: {0}")]
    Url(String),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned status {0}")]
    Status(u16),

    #[error("malformed feed: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serializing job board: {0}")]
    Json(#[from] serde_json::Error),
}
