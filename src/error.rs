// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for sitegauge

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SitegaugeError>;

#[derive(Error, Debug)]
pub enum SitegaugeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Document fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Completion service error: {0}")]
    Completion(String),
}
