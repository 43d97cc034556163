// src/error.rs
//! Error taxonomy. Only `ConfigError` is fatal; fetch and parse failures are
//! caught at their call boundary and degrade to an empty contribution.

use thiserror::Error;

/// Network, timeout, or HTTP-status failure while fetching a document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Malformed feed document. Callers map this to an empty item sequence.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed feed xml: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Invalid or unreadable configuration. Raised before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate tool name in config: {0}")]
    DuplicateTool(String),
}
