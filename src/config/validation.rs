use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration
///
/// # Checks
///
/// * At least one seed is configured
/// * `interval` is at least one second
/// * Size ceilings are non-zero and the file ceiling is not below the page
///   ceiling
/// * `download-location` and `db-path` are non-empty
/// * Every seed URL parses as an absolute HTTP(S) URL
/// * Every seed pattern compiles (pattern failure here is fatal, never a
///   per-link runtime failure)
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[seed]] entry is required".to_string(),
        ));
    }

    if config.harvester.interval == 0 {
        return Err(ConfigError::Validation(
            "interval must be at least 1 second".to_string(),
        ));
    }

    if config.harvester.max_page_bytes == 0 || config.harvester.max_file_bytes == 0 {
        return Err(ConfigError::Validation(
            "size ceilings must be non-zero".to_string(),
        ));
    }

    if config.harvester.max_file_bytes < config.harvester.max_page_bytes {
        return Err(ConfigError::Validation(
            "max-file-bytes must not be smaller than max-page-bytes".to_string(),
        ));
    }

    if config.harvester.download_location.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "download-location must not be empty".to_string(),
        ));
    }

    if config.harvester.db_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "db-path must not be empty".to_string(),
        ));
    }

    for seed in &config.seeds {
        let url = Url::parse(&seed.url).map_err(|_| ConfigError::InvalidUrl(seed.url.clone()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(seed.url.clone()));
        }

        // Compiling here surfaces pattern errors at startup
        seed.compile()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{HarvesterConfig, SeedConfig};
    use std::path::PathBuf;

    fn base_config() -> Config {
        Config {
            harvester: HarvesterConfig {
                download_location: PathBuf::from("./downloads"),
                db_path: PathBuf::from("./history.json"),
                interval: 3600,
                run_count: 0,
                request_delay: 50,
                max_page_bytes: 4 * 1024 * 1024,
                max_file_bytes: 256 * 1024 * 1024,
            },
            seeds: vec![SeedConfig {
                url: "https://example.com/".to_string(),
                crawl_pattern: None,
                file_pattern: r"\.pdf$".to_string(),
                depth: 2,
            }],
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&base_config()).is_ok());
    }

    #[test]
    fn test_no_seeds() {
        let mut config = base_config();
        config.seeds.clear();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_zero_interval() {
        let mut config = base_config();
        config.harvester.interval = 0;
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_file_ceiling_below_page_ceiling() {
        let mut config = base_config();
        config.harvester.max_file_bytes = 1024;
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_relative_seed_url() {
        let mut config = base_config();
        config.seeds[0].url = "/just/a/path".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::InvalidUrl(_)
        ));
    }

    #[test]
    fn test_non_http_seed_url() {
        let mut config = base_config();
        config.seeds[0].url = "ftp://example.com/".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::InvalidUrl(_)
        ));
    }

    #[test]
    fn test_bad_seed_pattern() {
        let mut config = base_config();
        config.seeds[0].file_pattern = "[unclosed".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::InvalidPattern { .. }
        ));
    }
}
