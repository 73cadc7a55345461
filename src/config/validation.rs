use crate::analysis::SLOTS_PER_DAY;
use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration
///
/// Checks performed:
/// - both months are in 1..=12 and the range start is not after its end
/// - the month and post URL templates parse as absolute URLs
/// - the blog domain is a bare host, not a URL
/// - store directories, the user agent and all output paths are non-empty
/// - the cutover timestamp parses and the highlight slot exists
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_range(config)?;
    validate_blog(config)?;
    validate_paths(config)?;
    validate_analysis(config)?;
    Ok(())
}

fn validate_range(config: &Config) -> Result<(), ConfigError> {
    let range = &config.range;

    for (label, month) in [("start-month", range.start_month), ("end-month", range.end_month)] {
        if !(1..=12).contains(&month) {
            return Err(ConfigError::Validation(format!(
                "{} must be in 1..=12, got {}",
                label, month
            )));
        }
    }

    if (range.start_year, range.start_month) > (range.end_year, range.end_month) {
        return Err(ConfigError::Validation(format!(
            "range start {:04}-{:02} is after range end {:04}-{:02}",
            range.start_year, range.start_month, range.end_year, range.end_month
        )));
    }

    Ok(())
}

fn validate_blog(config: &Config) -> Result<(), ConfigError> {
    for (label, template) in [
        ("month-url", &config.blog.month_url),
        ("post-url", &config.blog.post_url),
    ] {
        Url::parse(template)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {} ({})", label, template, e)))?;
    }

    let domain = &config.blog.domain;
    if domain.is_empty() {
        return Err(ConfigError::Validation("blog domain must not be empty".into()));
    }
    if domain.contains("://") || domain.contains('/') {
        return Err(ConfigError::Validation(format!(
            "blog domain must be a bare host, got {:?}",
            domain
        )));
    }

    Ok(())
}

fn validate_paths(config: &Config) -> Result<(), ConfigError> {
    let paths = [
        ("month-dir", &config.archive.month_dir),
        ("post-dir", &config.archive.post_dir),
        ("user-agent", &config.client.user_agent),
        ("words-path", &config.output.words_path),
        ("links-path", &config.output.links_path),
        ("domains-path", &config.output.domains_path),
        ("filetypes-path", &config.output.filetypes_path),
        ("times-chart-path", &config.output.times_chart_path),
        ("times-chart-fixed-path", &config.output.times_chart_fixed_path),
    ];

    for (label, value) in paths {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!("{} must not be empty", label)));
        }
    }

    Ok(())
}

fn validate_analysis(config: &Config) -> Result<(), ConfigError> {
    config.analysis.cutover_time()?;

    if config.analysis.highlight_slot >= SLOTS_PER_DAY {
        return Err(ConfigError::Validation(format!(
            "highlight-slot must be below {}, got {}",
            SLOTS_PER_DAY, config.analysis.highlight_slot
        )));
    }

    Ok(())
}
