use crate::config::types::{Config, CrawlConfig, LeagueEntry, OutputConfig};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_site(&config.site.base_url)?;
    validate_output_config(&config.output)?;
    validate_leagues(&config.leagues)?;
    if let Some(proxy) = &config.proxy {
        Url::parse(&proxy.url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid proxy url: {}", e)))?;
    }
    Ok(())
}

/// Validates crawl behavior configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.start_year > config.end_year {
        return Err(ConfigError::Validation(format!(
            "start-year ({}) must not be after end-year ({})",
            config.start_year, config.end_year
        )));
    }

    if config.retry_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "retry-attempts must be >= 1, got {}",
            config.retry_attempts
        )));
    }

    if config.page_delay_min_ms > config.page_delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "page-delay-min-ms ({}) must not exceed page-delay-max-ms ({})",
            config.page_delay_min_ms, config.page_delay_max_ms
        )));
    }

    if config.batch_size < 1 {
        return Err(ConfigError::Validation(format!(
            "batch-size must be >= 1, got {}",
            config.batch_size
        )));
    }

    if config.fetch_timeout_ms < 1_000 {
        return Err(ConfigError::Validation(format!(
            "fetch-timeout-ms must be >= 1000ms, got {}ms",
            config.fetch_timeout_ms
        )));
    }

    Ok(())
}

fn validate_site(base_url: &str) -> Result<(), ConfigError> {
    Url::parse(base_url).map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (name, path) in [
        ("clubs-path", &config.clubs_path),
        ("players-path", &config.players_path),
        ("error-log-path", &config.error_log_path),
    ] {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }
    Ok(())
}

/// Validates the league table: non-empty, unique codes, no blank fields
fn validate_leagues(leagues: &[LeagueEntry]) -> Result<(), ConfigError> {
    if leagues.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[league]] entry is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for league in leagues {
        if league.code.is_empty() || league.slug.is_empty() {
            return Err(ConfigError::Validation(
                "league code and slug cannot be empty".to_string(),
            ));
        }
        if !seen.insert(&league.code) {
            return Err(ConfigError::Validation(format!(
                "duplicate league code '{}'",
                league.code
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_inverted_year_range_is_rejected() {
        let mut config = Config::default();
        config.crawl.start_year = 2025;
        config.crawl.end_year = 2006;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_retry_attempts_is_rejected() {
        let mut config = Config::default();
        config.crawl.retry_attempts = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_inverted_delay_range_is_rejected() {
        let mut config = Config::default();
        config.crawl.page_delay_min_ms = 5_000;
        config.crawl.page_delay_max_ms = 2_000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_league_table_is_rejected() {
        let mut config = Config::default();
        config.leagues.clear();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_duplicate_league_code_is_rejected() {
        let mut config = Config::default();
        let duplicate = config.leagues[0].clone();
        config.leagues.push(duplicate);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let mut config = Config::default();
        config.site.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }
}
