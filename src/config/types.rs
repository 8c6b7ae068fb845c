use crate::ConfigError;
use regex::Regex;
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for linkharvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub harvester: HarvesterConfig,
    #[serde(default, rename = "seed")]
    pub seeds: Vec<SeedConfig>,
}

/// Process-wide harvester configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HarvesterConfig {
    /// Directory where downloaded files are written
    #[serde(rename = "download-location")]
    pub download_location: PathBuf,

    /// Path to the persisted download-history file (JSON array of URLs)
    #[serde(rename = "db-path")]
    pub db_path: PathBuf,

    /// Seconds between scheduled run starts
    pub interval: u64,

    /// Number of runs to execute before stopping (0 = unbounded)
    #[serde(rename = "run-count", default)]
    pub run_count: u32,

    /// Milliseconds to pause before each page fetch
    #[serde(rename = "request-delay", default = "default_request_delay")]
    pub request_delay: u64,

    /// Size ceiling for speculative page fetches, in bytes
    #[serde(rename = "max-page-bytes", default = "default_max_page_bytes")]
    pub max_page_bytes: usize,

    /// Size ceiling for confirmed file downloads, in bytes
    #[serde(rename = "max-file-bytes", default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
}

fn default_request_delay() -> u64 {
    50
}

fn default_max_page_bytes() -> usize {
    4 * 1024 * 1024
}

fn default_max_file_bytes() -> usize {
    256 * 1024 * 1024
}

/// One seed entry: a start page plus the patterns that steer its traversal
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// The URL to start crawling from
    pub url: String,

    /// Pattern a discovered href must match to be recursed into as a page.
    /// Absent means every discovered link is eligible.
    #[serde(rename = "crawl-pattern", default)]
    pub crawl_pattern: Option<String>,

    /// Pattern deciding whether a discovered link is downloaded as a file
    #[serde(rename = "file-pattern")]
    pub file_pattern: String,

    /// Maximum number of link hops to follow from this seed
    pub depth: u32,
}

impl SeedConfig {
    /// Compiles this seed's pattern strings into a ready-to-run [`SeedTask`]
    ///
    /// # Returns
    ///
    /// * `Ok(SeedTask)` - Both patterns compiled successfully
    /// * `Err(ConfigError::InvalidPattern)` - A pattern failed to compile
    pub fn compile(&self) -> Result<SeedTask, ConfigError> {
        let crawl_pattern = self
            .crawl_pattern
            .as_deref()
            .map(|p| compile_pattern(p))
            .transpose()?;
        let file_pattern = compile_pattern(&self.file_pattern)?;

        Ok(SeedTask {
            url: self.url.clone(),
            crawl_pattern,
            file_pattern,
            depth: self.depth,
        })
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// A seed with its patterns compiled, as consumed by the scheduler
#[derive(Debug, Clone)]
pub struct SeedTask {
    pub url: String,
    pub crawl_pattern: Option<Regex>,
    pub file_pattern: Regex,
    pub depth: u32,
}
