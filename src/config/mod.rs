//! Configuration module for linkharvest
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, including compiling the per-seed crawl and file patterns.
//!
//! # Example
//!
//! ```no_run
//! use linkharvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Seeds: {}", config.seeds.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HarvesterConfig, SeedConfig, SeedTask};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

// Re-export validation
pub use validation::validate;
