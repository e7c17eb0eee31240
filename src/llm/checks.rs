// SPDX-License-Identifier: PMPL-1.0-or-later
//! The individual LLM-readiness checks.

use super::{
    AiCrawlerAccessCheck, AuthorInfoCheck, CitabilityCheck, ContentClarityCheck,
    StructuredDataCheck,
};
use crate::document::ParsedDocument;
use crate::provider::SideLookups;
use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;
use tracing::debug;

/// schema.org types that make a page markedly easier to cite.
const USEFUL_SCHEMA_TYPES: &[&str] = &[
    "Article",
    "FAQPage",
    "HowTo",
    "Organization",
    "Person",
    "Product",
];

static FAQ_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)faq|questions|frequently").unwrap());
static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+)?\s*%").unwrap());
static LARGE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d[\d,.]*\s*(million|billion)\b").unwrap());

/// Collect schema.org `@type` values from a JSON-LD value, recursing into
/// `@graph` and arrays.
fn collect_json_ld_types(value: &serde_json::Value, types: &mut Vec<String>) {
    match value {
        serde_json::Value::Object(map) => {
            match map.get("@type") {
                Some(serde_json::Value::String(t)) => types.push(t.clone()),
                Some(serde_json::Value::Array(items)) => {
                    for item in items {
                        if let Some(t) = item.as_str() {
                            types.push(t.to_string());
                        }
                    }
                }
                _ => {}
            }
            if let Some(graph) = map.get("@graph") {
                collect_json_ld_types(graph, types);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                collect_json_ld_types(item, types);
            }
        }
        _ => {}
    }
}

/// JSON-LD and microdata detection. Malformed JSON-LD blocks are skipped,
/// not errors.
pub fn check_structured_data(doc: &ParsedDocument) -> StructuredDataCheck {
    let ld_sel = Selector::parse("script[type=\"application/ld+json\"]").expect("valid selector");
    let item_sel = Selector::parse("[itemtype]").expect("valid selector");

    let mut types = Vec::new();
    let mut has_json_ld = false;

    for script in doc.dom().select(&ld_sel) {
        let raw = script.text().collect::<String>();
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => {
                has_json_ld = true;
                collect_json_ld_types(&value, &mut types);
            }
            Err(e) => debug!("skipping malformed JSON-LD block: {}", e),
        }
    }

    let mut has_microdata = false;
    for el in doc.dom().select(&item_sel) {
        if let Some(itemtype) = el.value().attr("itemtype") {
            if let Some(idx) = itemtype.find("schema.org/") {
                has_microdata = true;
                let type_name = &itemtype[idx + "schema.org/".len()..];
                if !type_name.is_empty() {
                    types.push(type_name.to_string());
                }
            }
        }
    }

    let mut score: u32 = 0;
    let mut issues = Vec::new();

    if has_json_ld || has_microdata {
        score = 70;
        let useful = types
            .iter()
            .any(|t| USEFUL_SCHEMA_TYPES.contains(&t.as_str()));
        if useful {
            score += 30;
        } else {
            issues.push(
                "No high-value schema.org type found (Article, FAQPage, HowTo, Organization, Person, Product)"
                    .to_string(),
            );
        }
    } else {
        issues.push("No structured data (JSON-LD or microdata) found".to_string());
    }

    StructuredDataCheck {
        score: score.min(100),
        issues,
        types,
        has_json_ld,
        has_microdata,
    }
}

/// Paragraph digestibility, FAQ presence, and definition markup.
pub fn check_content_clarity(doc: &ParsedDocument) -> ContentClarityCheck {
    let p_sel = Selector::parse("p").expect("valid selector");
    let heading_sel = Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector");

    let lengths: Vec<usize> = doc
        .dom()
        .select(&p_sel)
        .map(|p| p.text().collect::<String>().trim().len())
        .collect();
    let paragraph_count = lengths.len();
    let avg_paragraph_length = if paragraph_count == 0 {
        0
    } else {
        (lengths.iter().sum::<usize>() as f64 / paragraph_count as f64).round() as u32
    };

    let mut score: i32 = 50;
    let mut issues = Vec::new();

    if paragraph_count == 0 {
        score -= 20;
        issues.push("No paragraph elements found".to_string());
    } else if (100..=300).contains(&avg_paragraph_length) {
        score += 20;
    } else if avg_paragraph_length > 500 {
        score -= 10;
        issues.push(format!(
            "Paragraphs are long (average {} characters); shorter paragraphs are easier to cite",
            avg_paragraph_length
        ));
    }

    let has_faq = doc.exists("[itemtype$=\"schema.org/FAQPage\"]")
        || doc
            .dom()
            .select(&heading_sel)
            .any(|h| FAQ_HEADING_RE.is_match(&h.text().collect::<String>()))
        || doc.exists("details");
    if has_faq {
        score += 20;
    } else {
        issues.push("No FAQ section detected".to_string());
    }

    let has_definitions =
        doc.exists("dl") || doc.exists("abbr[title]") || doc.exists("[role=\"definition\"]");
    if has_definitions {
        score += 10;
    }

    ContentClarityCheck {
        score: score.clamp(0, 100) as u32,
        issues,
        paragraph_count,
        avg_paragraph_length,
        has_faq,
        has_definitions,
    }
}

/// E-E-A-T signals: author identity, publish date, modified date.
pub fn check_author_info(doc: &ParsedDocument) -> AuthorInfoCheck {
    let has_author = doc.meta_name("author").is_some()
        || doc.exists("a[rel=\"author\"]")
        || doc.exists("[itemprop=\"author\"]")
        || doc.exists("[itemtype$=\"schema.org/Person\"]");

    let has_publish_date = doc.meta_property("article:published_time").is_some()
        || doc.exists("[itemprop=\"datePublished\"]")
        || doc.exists("time[datetime]");

    let has_modified_date = doc.meta_property("article:modified_time").is_some()
        || doc.exists("[itemprop=\"dateModified\"]");

    let mut score: u32 = 30;
    let mut issues = Vec::new();

    if has_author {
        score += 30;
    } else {
        issues.push("No author information found".to_string());
    }
    if has_publish_date {
        score += 25;
    } else {
        issues.push("No publish date found".to_string());
    }
    if has_modified_date {
        score += 15;
    } else {
        issues.push("No last-modified date found".to_string());
    }

    AuthorInfoCheck {
        score: score.min(100),
        issues,
        has_author,
        has_publish_date,
        has_modified_date,
    }
}

/// Whether the major AI crawlers may read the site, per robots.txt.
///
/// The Anthropic family requires both of its user agents to be allowed;
/// blocking either counts the family as blocked.
pub fn check_ai_crawler_access(side: &SideLookups) -> AiCrawlerAccessCheck {
    let Some(ref robots) = side.robots else {
        return AiCrawlerAccessCheck {
            score: 100,
            issues: vec![
                "No robots.txt found; AI crawlers have default full access".to_string(),
            ],
            robots_found: false,
            blocked: Vec::new(),
        };
    };

    let mut blocked = Vec::new();
    let mut issues = Vec::new();

    if robots.blocks_entirely("GPTBot") {
        blocked.push("GPTBot".to_string());
        issues.push("GPTBot (OpenAI) is blocked by robots.txt".to_string());
    }
    if robots.blocks_entirely("anthropic-ai") || robots.blocks_entirely("Claude-Web") {
        blocked.push("Anthropic".to_string());
        issues.push(
            "Anthropic crawlers (anthropic-ai, Claude-Web) are blocked by robots.txt".to_string(),
        );
    }
    if robots.blocks_entirely("PerplexityBot") {
        blocked.push("PerplexityBot".to_string());
        issues.push("PerplexityBot is blocked by robots.txt".to_string());
    }

    let score = 100u32.saturating_sub(blocked.len() as u32 * 25);

    AiCrawlerAccessCheck {
        score,
        issues,
        robots_found: true,
        blocked,
    }
}

/// Citability markers: quotes, statistics, and sources.
pub fn check_citability(doc: &ParsedDocument) -> CitabilityCheck {
    let text = doc.visible_text();
    let text_lower = text.to_lowercase();

    let has_quotes =
        doc.exists("blockquote") || (text.contains('\u{201C}') && text.contains('\u{201D}'));

    let has_statistics = PERCENT_RE.is_match(&text)
        || LARGE_NUMBER_RE.is_match(&text)
        || doc.exists("table");

    let has_sources = doc.exists("a[rel=\"cite\"]")
        || doc.exists("cite")
        || doc.exists("sup > a")
        || text_lower.contains("source")
        || text_lower.contains("reference");

    let mut score: u32 = 30;
    let mut issues = Vec::new();

    if has_quotes {
        score += 20;
    } else {
        issues.push("No quotable passages found".to_string());
    }
    if has_statistics {
        score += 30;
    } else {
        issues.push("No statistics or data points found".to_string());
    }
    if has_sources {
        score += 20;
    } else {
        issues.push("No cited sources found".to_string());
    }

    CitabilityCheck {
        score: score.min(100),
        issues,
        has_quotes,
        has_statistics,
        has_sources,
    }
}
