//! Fefelog: archiver and statistics engine for Fefes Blog
//!
//! This crate downloads the blog's monthly index pages and individual post
//! pages into flat-file content stores, then extracts structural and textual
//! statistics (update/quote/table counts, link and media lists, posting-time
//! distribution, word/domain/filetype frequencies) from the archived posts.

pub mod analysis;
pub mod archive;
pub mod config;
pub mod extract;
pub mod links;
pub mod store;

use thiserror::Error;

/// Main error type for fefelog operations
#[derive(Debug, Error)]
pub enum FefelogError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Archive is empty, nothing to analyze")]
    EmptyArchive,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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
}

/// Result type alias for fefelog operations
pub type Result<T> = std::result::Result<T, FefelogError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use analysis::PostDataset;
pub use config::Config;
pub use extract::PostRecord;
pub use store::ContentStore;
