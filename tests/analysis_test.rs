// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for the SEO and LLM-readiness evaluators

use sitegauge::document::ParsedDocument;
use sitegauge::llm::{evaluate_llm_readiness, overall_llm_score, LLM_WEIGHTS};
use sitegauge::provider::SideLookups;
use sitegauge::robots::RobotsTxt;
use sitegauge::seo::{evaluate_seo, overall_seo_score, SEO_WEIGHTS};
use url::Url;

fn document(url: &str, html: &str) -> ParsedDocument {
    ParsedDocument::parse(Url::parse(url).expect("valid url"), html)
}

fn side_with_robots(robots_txt: &str) -> SideLookups {
    SideLookups {
        robots: Some(RobotsTxt::parse(robots_txt)),
        sitemap: Some(vec!["https://example.com/".to_string()]),
    }
}

/// A page built to satisfy the title, heading, and technical checks.
fn well_formed_page() -> String {
    let title = "t".repeat(55);
    let description = "d".repeat(155);
    format!(
        r#"<html lang="en"><head>
            <title>{}</title>
            <meta charset="utf-8">
            <meta name="description" content="{}">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <link rel="canonical" href="https://example.com/page">
        </head><body>
            <h1>{}</h1>
            <h2>Details</h2>
            <p>Body text.</p>
        </body></html>"#,
        title, description, title
    )
}

#[test]
fn well_formed_page_scores_full_on_core_checks() {
    let doc = document("https://example.com/page", &well_formed_page());
    let side = side_with_robots("User-agent: *\nAllow: /\n");
    let result = evaluate_seo(&doc, &side);

    assert_eq!(result.title.score, 100, "title: {:?}", result.title.issues);
    assert_eq!(result.title.length, 55);
    assert_eq!(result.description.score, 100);
    assert_eq!(result.headings.score, 100);
    assert_eq!(result.images.score, 100, "zero images is fully scored");
    assert_eq!(result.technical.score, 100, "technical: {:?}", result.technical.issues);
}

#[test]
fn all_sub_scores_stay_in_range() {
    let pages = [
        "".to_string(),
        "<p>fragment".to_string(),
        well_formed_page(),
        "<html><body>".to_string() + &"<img src=x.png>".repeat(30) + "</body></html>",
    ];

    for html in &pages {
        let doc = document("http://example.com/", html);
        let side = SideLookups::default();
        let seo = evaluate_seo(&doc, &side);
        let llm = evaluate_llm_readiness(&doc, &side);

        for score in [
            seo.title.score,
            seo.description.score,
            seo.headings.score,
            seo.images.score,
            seo.links.score,
            seo.technical.score,
            seo.social.score,
            seo.content.score,
            seo.advanced.score,
            llm.structured_data.score,
            llm.content_clarity.score,
            llm.author_info.score,
            llm.ai_crawler_access.score,
            llm.citability.score,
        ] {
            assert!(score <= 100, "sub-score out of range: {}", score);
        }

        assert!(overall_seo_score(&seo) <= 100);
        assert!(overall_llm_score(&llm) <= 100);
    }
}

#[test]
fn evaluation_is_idempotent() {
    let doc = document("https://example.com/page", &well_formed_page());
    let side = side_with_robots("User-agent: *\nAllow: /\n");

    let first = evaluate_seo(&doc, &side);
    let second = evaluate_seo(&doc, &side);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap(),
        "same document and side state must produce identical results"
    );

    let first = evaluate_llm_readiness(&doc, &side);
    let second = evaluate_llm_readiness(&doc, &side);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[test]
fn weight_tables_sum_to_one() {
    let seo_sum: f64 = SEO_WEIGHTS.iter().map(|(_, w)| w).sum();
    let llm_sum: f64 = LLM_WEIGHTS.iter().map(|(_, w)| w).sum();
    assert!((seo_sum - 1.0).abs() < 1e-9);
    assert!((llm_sum - 1.0).abs() < 1e-9);
}

#[test]
fn missing_title_reports_exact_issue() {
    let doc = document("https://example.com/", "<html><head></head><body></body></html>");
    let result = evaluate_seo(&doc, &SideLookups::default());
    assert_eq!(result.title.score, 0);
    assert_eq!(result.title.issues, vec!["No title tag found".to_string()]);
}

#[test]
fn blanket_robots_block_cuts_crawler_score_to_25() {
    let doc = document("https://example.com/", &well_formed_page());
    let side = side_with_robots("User-agent: *\nDisallow: /\n");
    let result = evaluate_llm_readiness(&doc, &side);

    assert_eq!(result.ai_crawler_access.score, 25);
    assert_eq!(result.ai_crawler_access.issues.len(), 3);
}

#[test]
fn http_scheme_is_penalized() {
    let doc = document("http://example.com/", &well_formed_page());
    let side = side_with_robots("User-agent: *\nAllow: /\n");
    let result = evaluate_seo(&doc, &side);
    assert_eq!(result.technical.score, 70);
    assert!(!result.technical.https);
}

#[test]
fn rich_article_scores_high_on_llm_readiness() {
    let para = "This article explains the measurement in plain language. ".repeat(3);
    let html = format!(
        r#"<html lang="en"><head>
            <title>Measurement Explained</title>
            <meta name="author" content="Ada Lovelace">
            <meta property="article:published_time" content="2026-01-15">
            <meta property="article:modified_time" content="2026-02-01">
            <script type="application/ld+json">
            {{"@context": "https://schema.org", "@type": "Article", "headline": "Measurement"}}
            </script>
        </head><body>
            <h1>Measurement</h1>
            <h2>Frequently asked questions</h2>
            <p>{p}</p><p>{p}</p>
            <blockquote>Measure twice, cut once.</blockquote>
            <p>Usage grew 42% to 3 million sites. Source: annual survey.</p>
        </body></html>"#,
        p = para
    );
    let doc = document("https://example.com/article", &html);
    let side = side_with_robots("User-agent: *\nAllow: /\n");
    let result = evaluate_llm_readiness(&doc, &side);

    assert_eq!(result.structured_data.score, 100);
    assert_eq!(result.author_info.score, 100);
    assert_eq!(result.ai_crawler_access.score, 100);
    assert_eq!(result.citability.score, 100);
    assert!(overall_llm_score(&result) >= 90);
}
