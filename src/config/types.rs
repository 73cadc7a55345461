use crate::ConfigError;
use chrono::NaiveDateTime;
use serde::Deserialize;

/// Format accepted for the `cutover` timestamp
pub(crate) const CUTOVER_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Main configuration structure for fefelog
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub blog: BlogConfig,
    pub range: RangeConfig,
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub client: ClientConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Blog endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BlogConfig {
    /// Month index URL template; the `YYYYMM` identifier is appended
    #[serde(rename = "month-url")]
    pub month_url: String,

    /// Post URL template; the post identifier is appended
    #[serde(rename = "post-url")]
    pub post_url: String,

    /// The blog's own host, used to classify links as internal
    pub domain: String,
}

/// Inclusive month range to archive
#[derive(Debug, Clone, Deserialize)]
pub struct RangeConfig {
    #[serde(rename = "start-year")]
    pub start_year: i32,

    #[serde(rename = "start-month")]
    pub start_month: u32,

    #[serde(rename = "end-year")]
    pub end_year: i32,

    #[serde(rename = "end-month")]
    pub end_month: u32,
}

/// Content store locations
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    /// Directory holding raw month index bodies, keyed by `YYYYMM`
    #[serde(rename = "month-dir")]
    pub month_dir: String,

    /// Directory holding raw post bodies, keyed by the post identifier
    #[serde(rename = "post-dir")]
    pub post_dir: String,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("fefelog/{}", env!("CARGO_PKG_VERSION"))
}

/// Analysis output locations
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Raw capitalized-word occurrences, one per line
    #[serde(rename = "words-path")]
    pub words_path: String,

    /// Raw link occurrences, one per line
    #[serde(rename = "links-path")]
    pub links_path: String,

    /// Raw link domain occurrences, one per line
    #[serde(rename = "domains-path")]
    pub domains_path: String,

    /// Raw link filetype occurrences, one per line
    #[serde(rename = "filetypes-path")]
    pub filetypes_path: String,

    /// Posting-time bar chart (all posts)
    #[serde(rename = "times-chart-path")]
    pub times_chart_path: String,

    /// Posting-time bar chart, posts before the cutover excluded
    #[serde(rename = "times-chart-fixed-path")]
    pub times_chart_fixed_path: String,
}

/// Analysis tuning
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Posts created before this local timestamp are dropped from the
    /// corrected posting-time chart. Early archive entries carry file times
    /// that do not reflect the true local posting time.
    #[serde(default = "default_cutover")]
    pub cutover: String,

    /// 30-minute slot highlighted in the raw posting-time chart
    #[serde(rename = "highlight-slot", default = "default_highlight_slot")]
    pub highlight_slot: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cutover: default_cutover(),
            highlight_slot: default_highlight_slot(),
        }
    }
}

fn default_cutover() -> String {
    "2005-07-01 13:00:00".to_string()
}

fn default_highlight_slot() -> usize {
    25
}

impl AnalysisConfig {
    /// Parses the configured cutover timestamp
    pub fn cutover_time(&self) -> Result<NaiveDateTime, ConfigError> {
        NaiveDateTime::parse_from_str(&self.cutover, CUTOVER_FORMAT).map_err(|e| {
            ConfigError::Validation(format!("invalid cutover {:?}: {}", self.cutover, e))
        })
    }
}
