//! Crawler module: fetching, link extraction, and the traversal engine
//!
//! - HTTP fetching with a hard size ceiling
//! - Pattern-based anchor extraction from HTML
//! - The recursive, depth-bounded crawl engine

mod engine;
mod extractor;
mod fetcher;

pub use engine::CrawlEngine;
pub use extractor::{extract_links, Link};
pub use fetcher::{build_http_client, fetch, FetchedResource};
