//! Visited-state tracking for one traversal
//!
//! The store is the crawl engine's memory: how far each canonical URL has been
//! explored, whether it was fetched, whether it was saved as a file, and the
//! links its page body yielded the one time it was fetched.

mod visited;

pub use visited::{VisitedEntry, VisitedStore};
