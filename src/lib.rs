// SPDX-License-Identifier: PMPL-1.0-or-later
//! Sitegauge - URL presentation scoring engine
//!
//! Fetches a page and scores it against three rubrics:
//!
//! - **SEO**: traditional discoverability factors (title, meta tags,
//!   headings, links, technical hygiene)
//! - **LLM readiness**: how citable the page is for large language models
//!   (structured data, E-E-A-T signals, AI crawler access)
//! - **WCAG**: success-criteria auditing with automated, AI-assisted, and
//!   routed-to-human test paths, aggregated into POUR principle scores
//!
//! The evaluators are pure functions over a parsed document plus the
//! robots.txt/sitemap side lookups; two analyses never share state and may
//! run fully in parallel.

pub mod ai;
pub mod analyze;
pub mod config;
pub mod document;
pub mod error;
pub mod llm;
pub mod provider;
pub mod report;
pub mod robots;
pub mod seo;
pub mod wcag;

pub use analyze::{analyze_document, analyze_url, SiteAnalysis};
pub use document::ParsedDocument;
pub use error::{Result, SitegaugeError};
pub use llm::{evaluate_llm_readiness, overall_llm_score, LlmReadinessResult};
pub use provider::{DocumentProvider, HttpProvider, SideLookups};
pub use seo::{evaluate_seo, overall_seo_score, Grade, SeoResult};
pub use wcag::criteria::{criteria_for_level, criterion_by_id};
pub use wcag::pour::{calculate_pour_scores, calculate_summary};
pub use wcag::router::run_wcag_audit;
