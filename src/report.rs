// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for analyses and WCAG audits.
//!
//! Supports two output formats:
//! - Text: human-readable scores with issue explanations
//! - JSON: structured results for programmatic consumption

use crate::analyze::SiteAnalysis;
use crate::wcag::{AuditSummary, PourScores, TestStatus, WcagTestResult};
use serde_json::json;
use std::collections::BTreeMap;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Render a full SEO + LLM analysis.
pub fn generate_analysis_report(analysis: &SiteAnalysis, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_analysis_text(analysis),
        OutputFormat::Json => serde_json::to_string_pretty(analysis)
            .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize analysis: {}\"}}", e)),
    }
}

fn push_section(output: &mut String, name: &str, score: u32, issues: &[String]) {
    output.push_str(&format!("  {:<18} {:>3}/100\n", name, score));
    for issue in issues {
        output.push_str(&format!("    - {}\n", issue));
    }
}

fn generate_analysis_text(analysis: &SiteAnalysis) -> String {
    let mut output = String::new();

    output.push_str("=== Sitegauge Analysis Report ===\n\n");
    output.push_str(&format!("URL: {}\n", analysis.url));
    output.push_str(&format!("Fetched: {}\n\n", analysis.fetched_at.to_rfc3339()));

    output.push_str(&format!(
        "SEO score: {}/100 ({})\n",
        analysis.seo_score,
        analysis.seo_grade.label()
    ));
    let seo = &analysis.seo;
    push_section(&mut output, "Title", seo.title.score, &seo.title.issues);
    push_section(&mut output, "Description", seo.description.score, &seo.description.issues);
    push_section(&mut output, "Headings", seo.headings.score, &seo.headings.issues);
    push_section(&mut output, "Images", seo.images.score, &seo.images.issues);
    push_section(&mut output, "Links", seo.links.score, &seo.links.issues);
    push_section(&mut output, "Technical", seo.technical.score, &seo.technical.issues);
    push_section(&mut output, "Social", seo.social.score, &seo.social.issues);
    push_section(&mut output, "Content", seo.content.score, &seo.content.issues);
    push_section(&mut output, "Advanced", seo.advanced.score, &seo.advanced.issues);

    output.push_str(&format!(
        "\nLLM readiness score: {}/100 ({})\n",
        analysis.llm_score,
        analysis.llm_grade.label()
    ));
    let llm = &analysis.llm;
    push_section(&mut output, "Structured data", llm.structured_data.score, &llm.structured_data.issues);
    push_section(&mut output, "Content clarity", llm.content_clarity.score, &llm.content_clarity.issues);
    push_section(&mut output, "Author info", llm.author_info.score, &llm.author_info.issues);
    push_section(&mut output, "AI crawler access", llm.ai_crawler_access.score, &llm.ai_crawler_access.issues);
    push_section(&mut output, "Citability", llm.citability.score, &llm.citability.issues);

    output
}

/// Render only the SEO half of an analysis.
pub fn generate_seo_report(analysis: &SiteAnalysis, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&analysis.seo)
            .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize result: {}\"}}", e)),
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str(&format!(
                "SEO score for {}: {}/100 ({})\n",
                analysis.url,
                analysis.seo_score,
                analysis.seo_grade.label()
            ));
            let seo = &analysis.seo;
            push_section(&mut output, "Title", seo.title.score, &seo.title.issues);
            push_section(&mut output, "Description", seo.description.score, &seo.description.issues);
            push_section(&mut output, "Headings", seo.headings.score, &seo.headings.issues);
            push_section(&mut output, "Images", seo.images.score, &seo.images.issues);
            push_section(&mut output, "Links", seo.links.score, &seo.links.issues);
            push_section(&mut output, "Technical", seo.technical.score, &seo.technical.issues);
            push_section(&mut output, "Social", seo.social.score, &seo.social.issues);
            push_section(&mut output, "Content", seo.content.score, &seo.content.issues);
            push_section(&mut output, "Advanced", seo.advanced.score, &seo.advanced.issues);
            output
        }
    }
}

/// Render only the LLM-readiness half of an analysis.
pub fn generate_llm_report(analysis: &SiteAnalysis, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&analysis.llm)
            .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize result: {}\"}}", e)),
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str(&format!(
                "LLM readiness score for {}: {}/100 ({})\n",
                analysis.url,
                analysis.llm_score,
                analysis.llm_grade.label()
            ));
            let llm = &analysis.llm;
            push_section(&mut output, "Structured data", llm.structured_data.score, &llm.structured_data.issues);
            push_section(&mut output, "Content clarity", llm.content_clarity.score, &llm.content_clarity.issues);
            push_section(&mut output, "Author info", llm.author_info.score, &llm.author_info.issues);
            push_section(&mut output, "AI crawler access", llm.ai_crawler_access.score, &llm.ai_crawler_access.issues);
            push_section(&mut output, "Citability", llm.citability.score, &llm.citability.issues);
            output
        }
    }
}

/// Render a WCAG audit: POUR scores, status tallies, and failed criteria.
pub fn generate_audit_report(
    results: &BTreeMap<String, WcagTestResult>,
    scores: &PourScores,
    summary: &AuditSummary,
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => generate_audit_text(results, scores, summary),
        OutputFormat::Json => {
            let value = json!({
                "scores": scores,
                "summary": summary,
                "results": results,
            });
            serde_json::to_string_pretty(&value)
                .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize audit: {}\"}}", e))
        }
    }
}

fn generate_audit_text(
    results: &BTreeMap<String, WcagTestResult>,
    scores: &PourScores,
    summary: &AuditSummary,
) -> String {
    let mut output = String::new();

    output.push_str("=== Sitegauge WCAG Audit Report ===\n\n");
    output.push_str(&format!("  Perceivable:    {:>3}%\n", scores.perceivable));
    output.push_str(&format!("  Operable:       {:>3}%\n", scores.operable));
    output.push_str(&format!("  Understandable: {:>3}%\n", scores.understandable));
    output.push_str(&format!("  Robust:         {:>3}%\n", scores.robust));
    output.push_str(&format!("  Overall:        {:>3}%\n\n", scores.overall));

    output.push_str(&format!(
        "Criteria: {} passed, {} failed, {} not applicable, {} need a browser, {} need manual review, {} not checked\n\n",
        summary.passed,
        summary.failed,
        summary.not_applicable,
        summary.needs_browser,
        summary.needs_manual,
        summary.not_checked,
    ));

    let failed: Vec<&WcagTestResult> = results
        .values()
        .filter(|r| r.status == TestStatus::Failed)
        .collect();

    if failed.is_empty() {
        output.push_str("No failed criteria.\n");
        return output;
    }

    for result in failed {
        output.push_str(&format!("--- {} (confidence {:.1}) ---\n", result.criterion, result.confidence));
        for issue in &result.issues {
            output.push_str(&format!(
                "  [{}] {}\n    Element: {}\n    Fix: {}\n",
                match issue.severity {
                    crate::wcag::IssueSeverity::Critical => "CRITICAL",
                    crate::wcag::IssueSeverity::Serious => "SERIOUS",
                    crate::wcag::IssueSeverity::Moderate => "MODERATE",
                    crate::wcag::IssueSeverity::Minor => "MINOR",
                },
                issue.description,
                issue.element,
                issue.fix
            ));
        }
        if let Some(ref obs) = result.observations {
            output.push_str(&format!("  Observations: {}\n", obs));
        }
        output.push('\n');
    }

    output
}
