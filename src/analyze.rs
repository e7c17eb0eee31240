// SPDX-License-Identifier: PMPL-1.0-or-later
//! End-to-end analysis of one URL.

use crate::document::ParsedDocument;
use crate::error::Result;
use crate::llm::{evaluate_llm_readiness, overall_llm_score, LlmReadinessResult};
use crate::provider::{DocumentProvider, SideLookups};
use crate::seo::{evaluate_seo, overall_seo_score, Grade, SeoResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Complete scoring snapshot for one URL at one point in time. A
/// re-analysis produces an entirely new value; nothing is updated in
/// place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteAnalysis {
    /// Final URL after redirects
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    pub seo: SeoResult,
    pub seo_score: u32,
    pub seo_grade: Grade,
    pub llm: LlmReadinessResult,
    pub llm_score: u32,
    pub llm_grade: Grade,
}

/// Fetch a URL and run both evaluators.
///
/// Only the initial document fetch can fail; the robots.txt and sitemap
/// lookups degrade to "absent" on any error.
pub async fn analyze_url(provider: &dyn DocumentProvider, url: &str) -> Result<SiteAnalysis> {
    let doc = provider.fetch_document(url).await?;
    info!("fetched {} ({} bytes)", doc.url(), doc.html().len());

    let side = SideLookups::fetch(provider, doc.url()).await;
    Ok(analyze_document(&doc, &side))
}

/// Run both evaluators over an already-fetched document. Pure given the
/// document and side-lookup state.
pub fn analyze_document(doc: &ParsedDocument, side: &SideLookups) -> SiteAnalysis {
    let seo = evaluate_seo(doc, side);
    let llm = evaluate_llm_readiness(doc, side);
    let seo_score = overall_seo_score(&seo);
    let llm_score = overall_llm_score(&llm);

    SiteAnalysis {
        url: doc.url().to_string(),
        fetched_at: Utc::now(),
        seo,
        seo_score,
        seo_grade: Grade::from_score(seo_score),
        llm,
        llm_score,
        llm_grade: Grade::from_score(llm_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::test_document;

    #[test]
    fn test_analysis_scores_stay_in_range() {
        let doc = test_document(
            r#"<html lang="en"><head><title>A reasonable page title for testing</title></head>
               <body><h1>A reasonable page</h1><p>Some words.</p></body></html>"#,
        );
        let analysis = analyze_document(&doc, &SideLookups::default());
        assert!(analysis.seo_score <= 100);
        assert!(analysis.llm_score <= 100);
        assert_eq!(analysis.url, "https://example.com/page");
    }
}
