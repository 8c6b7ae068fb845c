//! Persisted download history
//!
//! The history file is a JSON array of absolute file URLs that have already
//! been downloaded. It is read once at process start to seed the visited
//! store, and rewritten in full after each seed's run completes. A missing or
//! unreadable file means "no prior history", never a fatal error; only file
//! outcomes persist across runs, page exploration is re-done every run.

use std::collections::HashSet;
use std::path::Path;

/// Loads the set of previously downloaded file URLs
///
/// Read or parse failures degrade to an empty history with a warning.
pub fn load_history(path: &Path) -> HashSet<String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            if path.exists() {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "could not read history file, starting with empty history"
                );
            } else {
                tracing::info!(path = %path.display(), "no history file, starting fresh");
            }
            return HashSet::new();
        }
    };

    match serde_json::from_str::<Vec<String>>(&content) {
        Ok(urls) => urls.into_iter().collect(),
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "history file is not a JSON array of URLs, starting with empty history"
            );
            HashSet::new()
        }
    }
}

/// Rewrites the history file with the full current URL set
///
/// Output is sorted so successive runs produce stable diffs.
pub fn save_history(path: &Path, urls: &HashSet<String>) -> std::io::Result<()> {
    let mut sorted: Vec<&String> = urls.iter().collect();
    sorted.sort();

    let json = serde_json::to_string_pretty(&sorted)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    std::fs::write(path, json)
}
