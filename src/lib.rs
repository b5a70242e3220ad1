//! Quotes-Scroll: a paginated JSON API crawler
//!
//! This crate implements a crawler that walks a page-indexed quotes API,
//! projects each quote record to a flat output shape, and follows the
//! `has_next`/`page` cursor in the response body until exhausted.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Quotes-Scroll operations
#[derive(Debug, Error)]
pub enum ScrollError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request failed for {url} after {attempts} attempts: {error}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        error: String,
    },

    #[error("Page error for {url}: {source}")]
    Page {
        url: String,
        source: crawler::PageError,
    },

    #[error("Offsite request refused: {url} is not within allowed domains")]
    Offsite { url: String },

    #[error("Sink error: {0}")]
    Sink(#[from] output::SinkError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// Result type alias for Quotes-Scroll operations
pub type Result<T> = std::result::Result<T, ScrollError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{FetchRequest, PageError, PageOutput, QuoteRecord, UrlTemplate};
pub use crate::url::{domain_allowed, extract_domain};
