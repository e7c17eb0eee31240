// SPDX-License-Identifier: PMPL-1.0-or-later
//! LLM-readiness rule evaluator.
//!
//! Scores how citable a page is for large language models: structured
//! data, content clarity, E-E-A-T author signals, AI crawler access, and
//! citability markers. Same contract as the SEO evaluator: five pure,
//! independent checks producing 0-100 scores with issues.

pub mod checks;

use crate::document::ParsedDocument;
use crate::provider::SideLookups;
use serde::{Deserialize, Serialize};

/// Weight of each check in the overall score. Sums to 1.00.
pub const LLM_WEIGHTS: [(&str, f64); 5] = [
    ("structured_data", 0.25),
    ("content_clarity", 0.20),
    ("author_info", 0.20),
    ("ai_crawler_access", 0.20),
    ("citability", 0.15),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredDataCheck {
    pub score: u32,
    pub issues: Vec<String>,
    /// schema.org types found, from JSON-LD `@type` and microdata `itemtype`.
    pub types: Vec<String>,
    pub has_json_ld: bool,
    pub has_microdata: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentClarityCheck {
    pub score: u32,
    pub issues: Vec<String>,
    pub paragraph_count: usize,
    /// Average paragraph text length in characters, rounded.
    pub avg_paragraph_length: u32,
    pub has_faq: bool,
    pub has_definitions: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorInfoCheck {
    pub score: u32,
    pub issues: Vec<String>,
    pub has_author: bool,
    pub has_publish_date: bool,
    pub has_modified_date: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiCrawlerAccessCheck {
    pub score: u32,
    pub issues: Vec<String>,
    pub robots_found: bool,
    /// Crawler families blocked by robots.txt.
    pub blocked: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitabilityCheck {
    pub score: u32,
    pub issues: Vec<String>,
    pub has_quotes: bool,
    pub has_statistics: bool,
    pub has_sources: bool,
}

/// Fixed-shape LLM-readiness result; every field is always populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmReadinessResult {
    pub structured_data: StructuredDataCheck,
    pub content_clarity: ContentClarityCheck,
    pub author_info: AuthorInfoCheck,
    pub ai_crawler_access: AiCrawlerAccessCheck,
    pub citability: CitabilityCheck,
}

/// Run all LLM-readiness checks.
pub fn evaluate_llm_readiness(doc: &ParsedDocument, side: &SideLookups) -> LlmReadinessResult {
    LlmReadinessResult {
        structured_data: checks::check_structured_data(doc),
        content_clarity: checks::check_content_clarity(doc),
        author_info: checks::check_author_info(doc),
        ai_crawler_access: checks::check_ai_crawler_access(side),
        citability: checks::check_citability(doc),
    }
}

/// Weighted overall LLM-readiness score, rounded to the nearest integer.
pub fn overall_llm_score(result: &LlmReadinessResult) -> u32 {
    let weighted: f64 = LLM_WEIGHTS
        .iter()
        .map(|(part, weight)| {
            let score = match *part {
                "structured_data" => result.structured_data.score,
                "content_clarity" => result.content_clarity.score,
                "author_info" => result.author_info.score,
                "ai_crawler_access" => result.ai_crawler_access.score,
                "citability" => result.citability.score,
                _ => unreachable!("unknown weight entry"),
            };
            score as f64 * weight
        })
        .sum();
    weighted.round() as u32
}
