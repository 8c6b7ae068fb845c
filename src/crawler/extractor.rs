//! Pattern-based anchor extraction
//!
//! Link discovery is a tolerant regex scan, not DOM parsing: any element that
//! opens with an anchor tag, carries an href attribute, and is eventually
//! closed counts as a link. Malformed or unterminated anchors are silently
//! skipped.

use regex::Regex;
use std::sync::LazyLock;

/// One discovered link: the raw href and the anchor's visible text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// The href attribute value, exactly as written
    pub href: String,

    /// The anchor's inner text, tags stripped and whitespace trimmed
    pub text: String,
}

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*(?:"([^"]*)"|'([^']*)')[^>]*>(.*?)</a>"#)
        .expect("anchor regex is valid")
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex is valid"));

/// Scans an HTML document for anchors and returns its links in document order
///
/// # Arguments
///
/// * `html` - The HTML text to scan
///
/// # Example
///
/// ```
/// use linkharvest::crawler::extract_links;
///
/// let links = extract_links(r#"<a href="/report.pdf"><b>Q3</b> report</a>"#);
/// assert_eq!(links[0].href, "/report.pdf");
/// assert_eq!(links[0].text, "Q3 report");
/// ```
pub fn extract_links(html: &str) -> Vec<Link> {
    ANCHOR_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let href = caps.get(1).or_else(|| caps.get(2))?.as_str().to_string();
            let inner = caps.get(3).map_or("", |m| m.as_str());
            let text = TAG_RE.replace_all(inner, "").trim().to_string();
            Some(Link { href, text })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_anchor() {
        let links = extract_links(r#"<a href="/page">Click here</a>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "/page");
        assert_eq!(links[0].text, "Click here");
    }

    #[test]
    fn test_single_quoted_href() {
        let links = extract_links(r#"<a href='/page'>Link</a>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "/page");
    }

    #[test]
    fn test_attributes_around_href() {
        let links = extract_links(r#"<a class="nav" href="/a" target="_blank">A</a>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "/a");
    }

    #[test]
    fn test_inner_markup_stripped() {
        let links = extract_links(r#"<a href="/r.pdf"><span>Quarterly</span> <b>report</b></a>"#);
        assert_eq!(links[0].text, "Quarterly report");
    }

    #[test]
    fn test_multiline_anchor() {
        let html = "<a href=\"/page\">\n  Line one\n</a>";
        let links = extract_links(html);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "Line one");
    }

    #[test]
    fn test_document_order() {
        let html = r#"
            <a href="/first">1</a>
            <p>filler</p>
            <a href="/second">2</a>
            <a href="/third">3</a>
        "#;
        let hrefs: Vec<_> = extract_links(html).into_iter().map(|l| l.href).collect();
        assert_eq!(hrefs, vec!["/first", "/second", "/third"]);
    }

    #[test]
    fn test_unterminated_anchor_skipped() {
        let links = extract_links(r#"<a href="/broken">never closed"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_anchor_without_href_skipped() {
        let links = extract_links(r#"<a name="top">anchor</a><a href="/ok">ok</a>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "/ok");
    }

    #[test]
    fn test_case_insensitive_tags() {
        let links = extract_links(r#"<A HREF="/page">UP</A>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "/page");
    }

    #[test]
    fn test_empty_href_kept_raw() {
        // The extractor reports what it sees; the canonicalizer rejects it
        let links = extract_links(r#"<a href="">nothing</a>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "");
    }

    #[test]
    fn test_no_links() {
        assert!(extract_links("<html><body><p>plain</p></body></html>").is_empty());
    }
}
