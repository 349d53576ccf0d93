//! Open Graph metadata extraction.
//!
//! Fetches a page and pulls `og:title`, `og:description`, and `og:image`
//! out of its `<meta>` tags with regex — missing tags are simply absent,
//! never an error.

use regex::Regex;
use reqwest::Client;

use crate::error::{ApiError, ApiResult};

/// Open Graph preview data for a web page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenGraph {
    /// `og:title`.
    pub title: Option<String>,
    /// `og:description`.
    pub description: Option<String>,
    /// `og:image`.
    pub image: Option<String>,
}

impl OpenGraph {
    /// Extract Open Graph tags from raw HTML.
    pub fn from_html(html: &str) -> Self {
        Self {
            title: extract_meta_tag(html, "og:title"),
            description: extract_meta_tag(html, "og:description"),
            image: extract_meta_tag(html, "og:image"),
        }
    }
}

/// Fetch a page and extract its Open Graph metadata.
pub async fn fetch_open_graph(http: &Client, url: &str) -> ApiResult<OpenGraph> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: String::new(),
        });
    }
    let html = response.text().await?;
    Ok(OpenGraph::from_html(&html))
}

/// Pull the `content` attribute of a `<meta property="..." content="...">`
/// tag (also matches `name=`, which some sites use for OG properties).
fn extract_meta_tag(html: &str, property: &str) -> Option<String> {
    let pattern = format!(
        r#"(?is)<meta[^>]+(?:property|name)\s*=\s*["']{}["'][^>]+content\s*=\s*["']([^"']+)["'][^>]*>"#,
        regex::escape(property)
    );
    let regex = Regex::new(&pattern).ok()?;
    regex
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head>
        <meta property="og:title" content="Example Title" />
        <meta property="og:description" content="Some description." />
        <meta property="og:image" content="https://example.com/cover.png" />
        </head><body></body></html>
    "#;

    #[test]
    fn extracts_all_tags() {
        let og = OpenGraph::from_html(PAGE);
        assert_eq!(og.title.as_deref(), Some("Example Title"));
        assert_eq!(og.description.as_deref(), Some("Some description."));
        assert_eq!(og.image.as_deref(), Some("https://example.com/cover.png"));
    }

    #[test]
    fn missing_tags_are_none() {
        let og = OpenGraph::from_html("<html><head><title>plain</title></head></html>");
        assert_eq!(og, OpenGraph::default());
    }

    #[test]
    fn partial_tags() {
        let html = r#"<meta property="og:title" content="Only Title">"#;
        let og = OpenGraph::from_html(html);
        assert_eq!(og.title.as_deref(), Some("Only Title"));
        assert!(og.description.is_none());
        assert!(og.image.is_none());
    }

    #[test]
    fn matches_name_attribute_and_single_quotes() {
        let html = r#"<meta name='og:title' content='Quoted'>"#;
        assert_eq!(
            extract_meta_tag(html, "og:title").as_deref(),
            Some("Quoted")
        );
    }

    #[test]
    fn empty_content_is_none() {
        let html = r#"<meta property="og:title" content="">"#;
        assert!(extract_meta_tag(html, "og:title").is_none());
    }

    #[test]
    fn is_case_insensitive() {
        let html = r#"<META PROPERTY="og:title" CONTENT="Loud">"#;
        assert_eq!(extract_meta_tag(html, "og:title").as_deref(), Some("Loud"));
    }
}
