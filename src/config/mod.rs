//! Configuration loading for fefelog
//!
//! Configuration lives in one TOML file describing the blog endpoints, the
//! month range to archive, the store directories and the analysis outputs.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{
    AnalysisConfig, ArchiveConfig, BlogConfig, ClientConfig, Config, OutputConfig, RangeConfig,
};
pub use validation::validate;
