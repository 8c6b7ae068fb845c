//! The recursive, depth-bounded crawl engine
//!
//! One engine serves a whole scheduled run. Each `crawl` call walks one seed's
//! subtree: fetch the page (once per URL, ever), extract its links, save the
//! ones matching the file pattern, and recurse with a decremented depth budget
//! into the ones matching the crawl pattern. Per-link failures are logged and
//! skipped; only an unusable destination directory aborts a seed.

use crate::config::HarvesterConfig;
use crate::crawler::{build_http_client, extract_links, fetch};
use crate::saver::save;
use crate::state::VisitedStore;
use crate::url::canonicalize;
use crate::{HarvestError, Result};
use regex::Regex;
use reqwest::Client;
use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;
use url::Url;

/// Depth-bounded traversal engine
pub struct CrawlEngine {
    client: Client,
    dest_dir: PathBuf,
    max_page_bytes: usize,
    max_file_bytes: usize,
    request_delay: Duration,
}

impl CrawlEngine {
    /// Builds an engine from the process-wide harvester settings
    pub fn new(settings: &HarvesterConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            dest_dir: settings.download_location.clone(),
            max_page_bytes: settings.max_page_bytes,
            max_file_bytes: settings.max_file_bytes,
            request_delay: Duration::from_millis(settings.request_delay),
        })
    }

    /// Crawls one seed URL to the given depth
    ///
    /// The visited store is shared by reference through the whole recursion,
    /// so repeated calls against the same store perform no redundant page
    /// fetches.
    ///
    /// # Arguments
    ///
    /// * `seed` - The start URL
    /// * `crawl_pattern` - Pattern an href must match to be recursed into;
    ///   `None` follows every link
    /// * `file_pattern` - Pattern deciding which links are downloaded as files
    /// * `max_depth` - Number of link hops permitted past the seed
    /// * `visited` - The traversal's shared visited store
    ///
    /// # Returns
    ///
    /// The set of file URLs newly downloaded in this subtree. Per-link
    /// failures never surface here; the only errors are local ones such as an
    /// unusable destination directory.
    pub async fn crawl(
        &self,
        seed: &str,
        crawl_pattern: Option<&Regex>,
        file_pattern: &Regex,
        max_depth: u32,
        visited: &mut VisitedStore,
    ) -> Result<HashSet<String>> {
        tokio::fs::create_dir_all(&self.dest_dir)
            .await
            .map_err(|source| HarvestError::InvalidDestination {
                path: self.dest_dir.clone(),
                source,
            })?;

        let mut found = HashSet::new();
        match canonicalize(seed, None) {
            Some(url) => {
                self.explore(
                    url,
                    crawl_pattern,
                    file_pattern,
                    i64::from(max_depth),
                    visited,
                    &mut found,
                )
                .await;
            }
            None => tracing::warn!(seed, "seed URL is not a valid HTTP(S) URL, skipping"),
        }
        Ok(found)
    }

    /// One recursion step: explore `page` with the remaining `depth` budget
    ///
    /// Boxed because async fns cannot recurse directly.
    fn explore<'a>(
        &'a self,
        page: Url,
        crawl_pattern: Option<&'a Regex>,
        file_pattern: &'a Regex,
        depth: i64,
        visited: &'a mut VisitedStore,
        found: &'a mut HashSet<String>,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            if depth < 0 {
                return;
            }

            let key = page.to_string();
            {
                let entry = visited.entry_mut(&key);
                // Already covered by an equal-or-deeper exploration, or a
                // saved file rather than a page
                if entry.satisfies(depth) {
                    return;
                }
                entry.depth_explored = depth;
            }

            let fetched = visited.get(&key).is_some_and(|e| e.downloaded);
            if !fetched {
                // Fixed pacing delay against the target server
                tokio::time::sleep(self.request_delay).await;

                tracing::debug!(url = %key, depth, "fetching page");
                let outcome = fetch(&self.client, &page, self.max_page_bytes).await;

                let entry = visited.entry_mut(&key);
                entry.downloaded = true;
                match outcome {
                    Ok(res) if res.is_success() && !res.body.is_empty() => {
                        entry.links = extract_links(&String::from_utf8_lossy(&res.body));
                        tracing::debug!(url = %key, links = entry.links.len(), "page explored");
                    }
                    Ok(res) => {
                        // Dead page: contributes nothing, not retried later
                        tracing::debug!(
                            url = %key,
                            status = res.status.as_u16(),
                            "page yielded no content"
                        );
                        return;
                    }
                    Err(err) => {
                        tracing::warn!(url = %key, error = %err, "page fetch failed");
                        return;
                    }
                }
            }

            let links = visited.get(&key).map(|e| e.links.clone()).unwrap_or_default();
            for link in links {
                let Some(target) = canonicalize(&link.href, Some(&page)) else {
                    continue;
                };
                let target_key = target.to_string();

                if !visited.is_file(&target_key)
                    && (file_pattern.is_match(&link.href) || file_pattern.is_match(&link.text))
                {
                    match self.download_file(&target).await {
                        Ok(path) => {
                            tracing::info!(
                                url = %target_key,
                                path = %path.display(),
                                "downloaded file"
                            );
                            let entry = visited.entry_mut(&target_key);
                            entry.downloaded = true;
                            entry.is_file = true;
                            found.insert(target_key.clone());
                        }
                        Err(err) => {
                            // Leaves the URL eligible for a future run
                            tracing::warn!(
                                url = %target_key,
                                error = %err,
                                "file download failed"
                            );
                        }
                    }
                }

                if depth > 0 && crawl_pattern.map_or(true, |p| p.is_match(&link.href)) {
                    self.explore(target, crawl_pattern, file_pattern, depth - 1, visited, found)
                        .await;
                }
            }
        })
    }

    /// Fetches a confirmed file link under the large ceiling and saves it
    async fn download_file(&self, url: &Url) -> Result<PathBuf> {
        let resource = fetch(&self.client, url, self.max_file_bytes).await?;

        if !resource.is_success() {
            return Err(HarvestError::BadStatus {
                url: url.to_string(),
                status: resource.status.as_u16(),
            });
        }
        if resource.body.is_empty() {
            return Err(HarvestError::EmptyBody {
                url: url.to_string(),
            });
        }

        Ok(save(&resource, url, &self.dest_dir).await?)
    }
}
