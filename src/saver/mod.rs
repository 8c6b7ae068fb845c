//! File saving with collision-free naming
//!
//! A fetched resource is written under a name taken from its
//! `Content-Disposition` header when present, otherwise from the last segment
//! of its URL path. Existing files are never overwritten: the saver probes
//! `name (1).ext`, `name (2).ext`, ... until a free path is found. The probe
//! guards against this process's own prior downloads and files present at
//! scan time; it is not atomic against external concurrent writers.

use crate::crawler::FetchedResource;
use crate::SaveError;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};
use std::path::{Path, PathBuf};
use url::Url;

/// Saves a fetched resource into `dest_dir`, returning the path written
///
/// # Filename resolution
///
/// 1. The `filename` parameter of a `Content-Disposition` header, if present
///    and non-empty (surrounding quotes stripped, any path components
///    discarded)
/// 2. Otherwise the last segment of the URL path, percent-decoded
///
/// If neither yields a usable name the save fails with
/// [`SaveError::NoFilename`] and nothing is written.
pub async fn save(
    resource: &FetchedResource,
    url: &Url,
    dest_dir: &Path,
) -> Result<PathBuf, SaveError> {
    let name = filename_from_headers(&resource.headers)
        .or_else(|| filename_from_url(url))
        .ok_or_else(|| SaveError::NoFilename {
            url: url.to_string(),
        })?;

    let path = unique_path(dest_dir, &name);
    tokio::fs::write(&path, &resource.body)
        .await
        .map_err(|source| SaveError::Io {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}

/// Extracts a filename from a `Content-Disposition` header, if any
fn filename_from_headers(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;

    for part in value.split(';') {
        if let Some(raw) = part.trim().strip_prefix("filename=") {
            let name = raw.trim().trim_matches('"').trim();
            // Discard any path components smuggled into the header
            let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }
    None
}

/// Derives a filename from the last segment of the URL path, percent-decoded
fn filename_from_url(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}

/// Finds a free path for `name` in `dir` by appending ` (N)` before the
/// extension
fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = split_name(name);
    let mut counter = 1u32;
    loop {
        let candidate = dir.join(format!("{} ({}){}", stem, counter, ext));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Splits a filename into stem and extension (extension includes the dot)
///
/// A leading dot is part of the stem, so `.bashrc` has no extension.
fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}
