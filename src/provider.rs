// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document provider: fetches pages and the robots.txt/sitemap side files.
//!
//! The robots.txt and sitemap lookups are best-effort. A timeout or non-200
//! response resolves to `None` ("no such file"); only the initial document
//! fetch itself can fail an analysis.

use crate::document::ParsedDocument;
use crate::error::{Result, SitegaugeError};
use crate::robots::RobotsTxt;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;
use url::Url;

static SITEMAP_LOC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<loc>\s*(.*?)\s*</loc>").unwrap());

/// Fetches documents and their side files.
///
/// Futures are not `Send`: a fetched document owns a DOM tree that must
/// stay on one thread.
#[async_trait(?Send)]
pub trait DocumentProvider {
    /// Fetch and parse a page. Errors here mean the whole analysis fails.
    async fn fetch_document(&self, url: &str) -> Result<ParsedDocument>;

    /// Fetch `/robots.txt` for the page's origin. `None` means absent.
    async fn fetch_robots_txt(&self, origin: &Url) -> Option<RobotsTxt>;

    /// Fetch `/sitemap.xml` and return its `<loc>` URLs. `None` means absent.
    async fn fetch_sitemap(&self, origin: &Url) -> Option<Vec<String>>;
}

/// HTTP-backed provider with a bounded per-request timeout.
pub struct HttpProvider {
    client: reqwest::Client,
}

impl HttpProvider {
    pub fn new(config: &crate::config::HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_text(&self, url: Url) -> Option<String> {
        match self.client.get(url.clone()).send().await {
            Ok(resp) if resp.status().is_success() => resp.text().await.ok(),
            Ok(resp) => {
                debug!("side lookup {} returned {}", url, resp.status());
                None
            }
            Err(e) => {
                debug!("side lookup {} failed: {}", url, e);
                None
            }
        }
    }
}

#[async_trait(?Send)]
impl DocumentProvider for HttpProvider {
    async fn fetch_document(&self, url: &str) -> Result<ParsedDocument> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SitegaugeError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }
        let final_url = resp.url().clone();
        let html = resp.text().await?;
        Ok(ParsedDocument::parse(final_url, html))
    }

    async fn fetch_robots_txt(&self, origin: &Url) -> Option<RobotsTxt> {
        let url = origin.join("/robots.txt").ok()?;
        let text = self.fetch_text(url).await?;
        Some(RobotsTxt::parse(&text))
    }

    async fn fetch_sitemap(&self, origin: &Url) -> Option<Vec<String>> {
        let url = origin.join("/sitemap.xml").ok()?;
        let text = self.fetch_text(url).await?;
        let urls: Vec<String> = SITEMAP_LOC_RE
            .captures_iter(&text)
            .map(|cap| cap[1].to_string())
            .collect();
        Some(urls)
    }
}

/// The two network side-lookups an analysis depends on, fetched once up
/// front so the evaluators stay synchronous and pure.
#[derive(Debug, Clone, Default)]
pub struct SideLookups {
    pub robots: Option<RobotsTxt>,
    pub sitemap: Option<Vec<String>>,
}

impl SideLookups {
    pub async fn fetch(provider: &dyn DocumentProvider, origin: &Url) -> Self {
        Self {
            robots: provider.fetch_robots_txt(origin).await,
            sitemap: provider.fetch_sitemap(origin).await,
        }
    }

    pub fn robots_present(&self) -> bool {
        self.robots.is_some()
    }

    pub fn sitemap_present(&self) -> bool {
        self.sitemap.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sitemap_loc_extraction() {
        let xml = r#"<?xml version="1.0"?>
            <urlset>
              <url><loc>https://example.com/</loc></url>
              <url><loc> https://example.com/about </loc></url>
            </urlset>"#;
        let urls: Vec<String> = SITEMAP_LOC_RE
            .captures_iter(xml)
            .map(|cap| cap[1].to_string())
            .collect();
        assert_eq!(urls, vec!["https://example.com/", "https://example.com/about"]);
    }

    #[test]
    fn test_side_lookups_default_to_absent() {
        let side = SideLookups::default();
        assert!(!side.robots_present());
        assert!(!side.sitemap_present());
    }
}
