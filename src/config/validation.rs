use crate::config::types::{Config, OutputConfig, ScraperConfig, SearchConfig};
use crate::scraper::MIN_SLEEP_MS;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_search_config(&config.search)?;
    validate_scraper_config(&config.scraper)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates search configuration
///
/// An empty cflt list is fatal here, before any fetch occurs.
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.cflts.is_empty() {
        return Err(ConfigError::Validation(
            "cflts must contain at least one category filter".to_string(),
        ));
    }

    for cflt in &config.cflts {
        if cflt.trim().is_empty() {
            return Err(ConfigError::Validation(
                "cflts must not contain empty entries".to_string(),
            ));
        }
    }

    for district in &config.districts {
        if district.trim().is_empty() {
            return Err(ConfigError::Validation(
                "districts must not contain empty entries".to_string(),
            ));
        }
    }

    // District scoping is rendered relative to the city
    if !config.districts.is_empty() && config.city.trim().is_empty() {
        return Err(ConfigError::Validation(
            "districts require a non-empty city".to_string(),
        ));
    }

    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.max_sleep_ms < MIN_SLEEP_MS {
        return Err(ConfigError::Validation(format!(
            "max_sleep_ms must be >= {}ms, got {}ms",
            MIN_SLEEP_MS, config.max_sleep_ms
        )));
    }

    if config.debug {
        let has_fixture = config
            .fixture_path
            .as_deref()
            .is_some_and(|p| !p.trim().is_empty());
        if !has_fixture {
            return Err(ConfigError::Validation(
                "debug mode requires fixture_path".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.workbook_path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "workbook_path cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}
