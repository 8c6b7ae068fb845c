use crate::crawler::Link;
use std::collections::HashMap;

/// Exploration metadata for one canonical URL
#[derive(Debug, Clone)]
pub struct VisitedEntry {
    /// The depth budget active the last time this URL was explored as a page.
    /// −1 means it has never been explored; a later visit re-explores only
    /// with a strictly larger budget.
    pub depth_explored: i64,

    /// True once a page fetch or file fetch has completed for this URL
    pub downloaded: bool,

    /// True once this URL has been saved as a file. Terminal: a file-flagged
    /// URL is never fetched again and never explored as a page.
    pub is_file: bool,

    /// Links extracted the one time this URL's body was fetched, reused on
    /// every later visit regardless of depth
    pub links: Vec<Link>,
}

impl Default for VisitedEntry {
    fn default() -> Self {
        Self {
            depth_explored: -1,
            downloaded: false,
            is_file: false,
            links: Vec::new(),
        }
    }
}

impl VisitedEntry {
    /// Returns true if a visit with the given depth budget has nothing left
    /// to do on this entry
    pub fn satisfies(&self, depth_budget: i64) -> bool {
        self.is_file || self.depth_explored >= depth_budget
    }
}

/// Mapping from canonical URL to exploration metadata
///
/// One store is shared by reference through every recursive call of a
/// traversal, so all branches accumulate into the same knowledge. The store is
/// `Clone` so the orchestrator can hand each seed an isolated copy of the
/// history-seeded base store.
#[derive(Debug, Clone, Default)]
pub struct VisitedStore {
    entries: HashMap<String, VisitedEntry>,
}

impl VisitedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store seeded from persisted download history
    ///
    /// Each remembered file URL becomes a permanently-resolved entry
    /// (`downloaded`, `is_file`, no links) so it is never re-downloaded and
    /// never explored as a page. Page-exploration history is deliberately not
    /// carried across runs.
    pub fn from_history<'a, I>(urls: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let entries = urls
            .into_iter()
            .map(|url| {
                (
                    url.clone(),
                    VisitedEntry {
                        downloaded: true,
                        is_file: true,
                        ..VisitedEntry::default()
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Looks up the entry for a canonical URL, creating it with default
    /// metadata on first reference
    pub fn entry_mut(&mut self, url: &str) -> &mut VisitedEntry {
        self.entries.entry(url.to_string()).or_default()
    }

    pub fn get(&self, url: &str) -> Option<&VisitedEntry> {
        self.entries.get(url)
    }

    /// Returns true if this URL has been saved as a file
    pub fn is_file(&self, url: &str) -> bool {
        self.entries.get(url).is_some_and(|e| e.is_file)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
