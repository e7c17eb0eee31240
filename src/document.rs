// SPDX-License-Identifier: PMPL-1.0-or-later
//! Parsed document handle: the final URL, the raw HTML, and a queryable DOM.
//!
//! A `ParsedDocument` is an immutable value supplied fresh per analysis.
//! Malformed markup still yields a queryable tree; checks degrade instead
//! of erroring on fragments.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());

/// An immutable fetched-and-parsed page.
pub struct ParsedDocument {
    url: Url,
    html: String,
    dom: Html,
}

impl ParsedDocument {
    /// Parse raw HTML retrieved from `url`.
    pub fn parse(url: Url, html: impl Into<String>) -> Self {
        let html = html.into();
        let dom = Html::parse_document(&html);
        Self { url, html, dom }
    }

    /// Final URL after redirects.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Raw HTML as received.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// The parsed DOM for direct selector queries.
    pub fn dom(&self) -> &Html {
        &self.dom
    }

    /// Hostname of the page, if the URL has one.
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// Whether any element matches the selector.
    pub fn exists(&self, selector: &str) -> bool {
        let sel = Selector::parse(selector).expect("valid selector");
        self.dom.select(&sel).next().is_some()
    }

    /// Number of elements matching the selector.
    pub fn count(&self, selector: &str) -> usize {
        let sel = Selector::parse(selector).expect("valid selector");
        self.dom.select(&sel).count()
    }

    /// Trimmed text content of the first matching element, if non-empty.
    pub fn first_text(&self, selector: &str) -> Option<String> {
        let sel = Selector::parse(selector).expect("valid selector");
        let el = self.dom.select(&sel).next()?;
        let text = el.text().collect::<String>();
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    /// Trimmed attribute value of the first matching element, if non-empty.
    pub fn first_attr(&self, selector: &str, attr: &str) -> Option<String> {
        let sel = Selector::parse(selector).expect("valid selector");
        self.dom
            .select(&sel)
            .next()
            .and_then(|el| el.value().attr(attr))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Content of `<meta name="...">`.
    pub fn meta_name(&self, name: &str) -> Option<String> {
        self.first_attr(&format!("meta[name=\"{}\"]", name), "content")
    }

    /// Content of `<meta property="...">` (Open Graph style).
    pub fn meta_property(&self, property: &str) -> Option<String> {
        self.first_attr(&format!("meta[property=\"{}\"]", property), "content")
    }

    /// Visible text of the page: everything except script and style content.
    ///
    /// Recomputed per call; callers that need it repeatedly should hold on
    /// to the result.
    pub fn visible_text(&self) -> String {
        let stripped = SCRIPT_RE.replace_all(&self.html, " ");
        let stripped = STYLE_RE.replace_all(&stripped, " ");
        let fragment = Html::parse_document(&stripped);
        let mut text = String::new();
        for chunk in fragment.root_element().text() {
            let chunk = chunk.trim();
            if !chunk.is_empty() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(chunk);
            }
        }
        text
    }
}

#[cfg(test)]
pub(crate) fn test_document(html: &str) -> ParsedDocument {
    let url = Url::parse("https://example.com/page").expect("valid test url");
    ParsedDocument::parse(url, html)
}
