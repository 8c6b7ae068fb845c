//! URL canonicalization
//!
//! Discovered hrefs arrive in many spellings: relative paths, attribute-encoded
//! ampersands, fragments, non-HTTP schemes. This module reduces each candidate
//! to the single canonical form the visited store keys on, or rejects it.

use url::Url;

/// Resolves a possibly-relative href into its canonical absolute form
///
/// # Canonicalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Replace literal `&amp;` with `&` (hrefs embedded in HTML
///    attribute-encode ampersands)
/// 3. Resolve against `base` if given, otherwise parse as absolute
/// 4. Reject any scheme other than http/https (mailto, javascript, data, ...)
/// 5. Drop the fragment, keeping origin + path + query
///
/// # Arguments
///
/// * `href` - The raw href candidate
/// * `base` - The URL of the page the href was found on, if any
///
/// # Returns
///
/// * `Some(Url)` - The canonical URL
/// * `None` - Malformed or non-HTTP(S); callers skip the candidate
///
/// # Examples
///
/// ```
/// use linkharvest::url::canonicalize;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/").unwrap();
/// let url = canonicalize("../files/report.pdf#page=2", Some(&base)).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/files/report.pdf");
/// ```
pub fn canonicalize(href: &str, base: Option<&Url>) -> Option<Url> {
    let href = href.trim().replace("&amp;", "&");
    if href.is_empty() {
        return None;
    }

    let mut url = match base {
        Some(base) => base.join(&href).ok()?,
        None => Url::parse(&href).ok()?,
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    url.set_fragment(None);
    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/docs/index.html").unwrap()
    }

    #[test]
    fn test_absolute_href() {
        let url = canonicalize("https://other.com/file.pdf", Some(&base())).unwrap();
        assert_eq!(url.as_str(), "https://other.com/file.pdf");
    }

    #[test]
    fn test_relative_href() {
        let url = canonicalize("page2.html", Some(&base())).unwrap();
        assert_eq!(url.as_str(), "https://example.com/docs/page2.html");
    }

    #[test]
    fn test_root_relative_href() {
        let url = canonicalize("/files/a.zip", Some(&base())).unwrap();
        assert_eq!(url.as_str(), "https://example.com/files/a.zip");
    }

    #[test]
    fn test_fragment_dropped() {
        let url = canonicalize("https://example.com/page#section", None).unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_query_kept() {
        let url = canonicalize("https://example.com/dl?id=7#x", None).unwrap();
        assert_eq!(url.as_str(), "https://example.com/dl?id=7");
    }

    #[test]
    fn test_amp_entity_unescaped() {
        let url = canonicalize("https://example.com/dl?a=1&amp;b=2", None).unwrap();
        assert_eq!(url.as_str(), "https://example.com/dl?a=1&b=2");
    }

    #[test]
    fn test_mailto_rejected() {
        assert!(canonicalize("mailto:someone@example.com", Some(&base())).is_none());
    }

    #[test]
    fn test_javascript_rejected() {
        assert!(canonicalize("javascript:void(0)", Some(&base())).is_none());
    }

    #[test]
    fn test_relative_without_base_rejected() {
        assert!(canonicalize("page2.html", None).is_none());
    }

    #[test]
    fn test_empty_href_rejected() {
        assert!(canonicalize("   ", Some(&base())).is_none());
    }

    #[test]
    fn test_two_spellings_same_canonical_url() {
        let a = canonicalize("../docs/page2.html", Some(&base())).unwrap();
        let b = canonicalize("https://example.com/docs/page2.html#top", None).unwrap();
        assert_eq!(a, b);
    }
}
