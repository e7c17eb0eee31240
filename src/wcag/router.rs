// SPDX-License-Identifier: PMPL-1.0-or-later
//! Test router: resolves each criterion to exactly one terminal result.
//!
//! Routing per criterion, one transition per audit:
//! - automated with a registered check: run it in-process
//! - ai-assisted: prompt the completion collaborator and parse its verdict
//! - browser-required / manual: deterministic terminal states
//!
//! The router never retries. Any completion failure (call error, missing
//! JSON, unusable verdict) degrades to `not-checked` with zero confidence;
//! nothing here aborts the audit.

use super::automated::automated_check_for;
use super::{IssueSeverity, TestStatus, TestType, WcagCriterion, WcagIssue, WcagTestResult};
use crate::ai::CompletionClient;
use crate::document::ParsedDocument;
use futures::future::join_all;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

const NEEDS_BROWSER_NOTE: &str =
    "Requires a rendered page; run a browser-based audit for this criterion.";
const NEEDS_MANUAL_NOTE: &str = "Requires human judgment.";
const NOT_CHECKED_NOTE: &str = "AI-assisted check could not be completed.";

/// How much of the page is quoted into an AI prompt.
const PROMPT_HTML_LIMIT: usize = 6000;

/// Focus hints for criteria that benefit from a specialized prompt. Any
/// criterion not listed gets the generic template.
const PROMPT_FOCUS: &[(&str, &str)] = &[
    ("1.3.2", "Check whether the DOM order of the content matches its visual reading order."),
    ("1.3.3", "Look for instructions that rely only on shape, color, size, or position (\"click the round button\", \"see the box on the right\")."),
    ("1.4.1", "Look for information conveyed by color alone, such as links distinguished only by color or form errors shown only in red."),
    ("1.4.5", "Look for images whose content is text that could be rendered as real text."),
    ("2.1.1", "Look for mouse-only interaction patterns: onclick on non-interactive elements, missing keyboard handlers, hover-only menus."),
    ("2.2.2", "Look for carousels, tickers, or animations without pause, stop, or hide controls."),
    ("2.4.4", "Judge whether each link's purpose is clear from its text alone; flag bare \"click here\" or \"read more\" links."),
    ("2.4.5", "Check whether the page offers more than one way to find content: navigation, search, sitemap link."),
    ("2.4.6", "Judge whether headings and form labels actually describe their topic or purpose."),
    ("3.1.2", "Look for passages in a different language than the page that lack their own lang attribute."),
    ("3.3.1", "Check whether form validation errors are identified in text next to the offending field."),
    ("3.3.3", "Check whether error messages suggest how to fix the input."),
    ("3.3.8", "Check whether login requires transcription or puzzle-solving without an alternative such as paste or WebAuthn."),
    ("4.1.3", "Look for status messages (cart updates, search counts, toasts) lacking role=\"status\" or aria-live."),
];

/// Build the prompt for an AI-assisted criterion.
fn build_prompt(criterion: &WcagCriterion, doc: &ParsedDocument) -> String {
    let focus = PROMPT_FOCUS
        .iter()
        .find(|(id, _)| *id == criterion.id)
        .map(|(_, hint)| *hint)
        .unwrap_or("Assess the page against this criterion using the markup provided.");

    let mut excerpt = doc.html().to_string();
    if excerpt.len() > PROMPT_HTML_LIMIT {
        let mut cut = PROMPT_HTML_LIMIT;
        while !excerpt.is_char_boundary(cut) {
            cut -= 1;
        }
        excerpt.truncate(cut);
    }

    format!(
        "You are auditing a web page against WCAG {version} success criterion {id} \
         \"{title}\" (Level {level}): {description}\n\
         {focus}\n\n\
         Respond with a single JSON object and nothing else:\n\
         {{\"status\": \"passed\" | \"failed\" | \"not-applicable\", \
         \"confidence\": 0.0-1.0, \
         \"issues\": [{{\"element\": \"selector or snippet\", \"description\": \"...\", \
         \"severity\": \"critical\" | \"serious\" | \"moderate\" | \"minor\", \"fix\": \"...\"}}], \
         \"observations\": \"...\"}}\n\n\
         Page HTML (truncated):\n{excerpt}",
        version = criterion.version.map(|v| v.to_string()).unwrap_or_else(|| "2.1".to_string()),
        id = criterion.id,
        title = criterion.title,
        level = criterion.level,
        description = criterion.description,
        focus = focus,
        excerpt = excerpt,
    )
}

/// Extract the first brace-balanced JSON object from free-form text.
///
/// Narrow adapter for completion responses that wrap JSON in prose or
/// markdown fences. Fails closed: no balanced object means `None`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[derive(Debug, Deserialize)]
struct RawVerdict {
    status: Option<String>,
    confidence: Option<f32>,
    #[serde(default)]
    issues: Vec<RawIssue>,
    observations: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    element: Option<String>,
    description: Option<String>,
    severity: Option<String>,
    fix: Option<String>,
}

fn parse_status(raw: &str) -> Option<TestStatus> {
    match raw.trim().to_lowercase().as_str() {
        "passed" => Some(TestStatus::Passed),
        "failed" => Some(TestStatus::Failed),
        "not-applicable" | "not_applicable" => Some(TestStatus::NotApplicable),
        _ => None,
    }
}

fn parse_severity(raw: Option<&str>) -> IssueSeverity {
    match raw.map(|s| s.trim().to_lowercase()).as_deref() {
        Some("critical") => IssueSeverity::Critical,
        Some("serious") => IssueSeverity::Serious,
        Some("minor") => IssueSeverity::Minor,
        _ => IssueSeverity::Moderate,
    }
}

/// Map a completion response to a test result. Unusable responses map to
/// `not-checked` rather than erroring.
fn verdict_from_response(criterion_id: &str, response: &str) -> WcagTestResult {
    let Some(json) = extract_json_object(response) else {
        debug!("no JSON object in completion response for {}", criterion_id);
        return WcagTestResult::terminal(criterion_id, TestStatus::NotChecked, NOT_CHECKED_NOTE);
    };

    let raw: RawVerdict = match serde_json::from_str(json) {
        Ok(v) => v,
        Err(e) => {
            debug!("unparseable verdict for {}: {}", criterion_id, e);
            return WcagTestResult::terminal(criterion_id, TestStatus::NotChecked, NOT_CHECKED_NOTE);
        }
    };

    let Some(status) = raw.status.as_deref().and_then(parse_status) else {
        debug!("verdict for {} has no usable status", criterion_id);
        return WcagTestResult::terminal(criterion_id, TestStatus::NotChecked, NOT_CHECKED_NOTE);
    };

    let issues = raw
        .issues
        .into_iter()
        .map(|i| WcagIssue {
            element: i.element.unwrap_or_else(|| "<unknown>".to_string()),
            description: i.description.unwrap_or_else(|| "Issue reported without description".to_string()),
            severity: parse_severity(i.severity.as_deref()),
            fix: i.fix.unwrap_or_else(|| "Review this element against the criterion".to_string()),
        })
        .collect();

    WcagTestResult::tested(
        criterion_id,
        status,
        raw.confidence.unwrap_or(0.5),
        issues,
        raw.observations,
    )
}

async fn run_ai_test(
    ai: &dyn CompletionClient,
    criterion_id: String,
    prompt: String,
) -> WcagTestResult {
    match ai.complete(&prompt).await {
        Ok(response) => verdict_from_response(&criterion_id, &response),
        Err(e) => {
            warn!("completion call failed for {}: {}", criterion_id, e);
            WcagTestResult::terminal(&criterion_id, TestStatus::NotChecked, NOT_CHECKED_NOTE)
        }
    }
}

/// Run an audit over the given criteria.
///
/// Automated and terminal routes resolve synchronously; AI-assisted
/// criteria fan out as independent completion calls, each with its own
/// tolerant-failure contract.
pub async fn run_wcag_audit(
    criteria: &[&WcagCriterion],
    doc: &ParsedDocument,
    ai: &dyn CompletionClient,
) -> BTreeMap<String, WcagTestResult> {
    let mut results = BTreeMap::new();
    let mut pending: Vec<(String, String)> = Vec::new();

    for criterion in criteria {
        match criterion.test_type {
            TestType::Automated => {
                if let Some(check) = automated_check_for(&criterion.id) {
                    let outcome = check(doc);
                    results.insert(
                        criterion.id.clone(),
                        WcagTestResult::tested(
                            &criterion.id,
                            outcome.status,
                            1.0,
                            outcome.issues,
                            outcome.observations,
                        ),
                    );
                } else {
                    // Routed as automated but nothing registered: hand off
                    // to a human instead of guessing.
                    results.insert(
                        criterion.id.clone(),
                        WcagTestResult::terminal(
                            &criterion.id,
                            TestStatus::NeedsManual,
                            NEEDS_MANUAL_NOTE,
                        ),
                    );
                }
            }
            TestType::AiAssisted => {
                pending.push((criterion.id.clone(), build_prompt(criterion, doc)));
            }
            TestType::BrowserRequired => {
                results.insert(
                    criterion.id.clone(),
                    WcagTestResult::terminal(
                        &criterion.id,
                        TestStatus::NeedsBrowser,
                        NEEDS_BROWSER_NOTE,
                    ),
                );
            }
            TestType::Manual => {
                results.insert(
                    criterion.id.clone(),
                    WcagTestResult::terminal(
                        &criterion.id,
                        TestStatus::NeedsManual,
                        NEEDS_MANUAL_NOTE,
                    ),
                );
            }
        }
    }

    let ai_results = join_all(
        pending
            .into_iter()
            .map(|(id, prompt)| run_ai_test(ai, id, prompt)),
    )
    .await;

    for result in ai_results {
        results.insert(result.criterion.clone(), result);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::DisabledCompletionClient;
    use crate::document::test_document;
    use crate::error::{Result, SitegaugeError};
    use crate::wcag::criteria::criteria_for_level;
    use crate::wcag::{WcagLevel, WcagVersion};
    use async_trait::async_trait;

    struct CannedClient(String);

    #[async_trait]
    impl CompletionClient for CannedClient {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl CompletionClient for FailingClient {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(SitegaugeError::Completion("service down".to_string()))
        }
    }

    #[test]
    fn test_extract_json_object_plain() {
        assert_eq!(extract_json_object(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_extract_json_object_with_prose_and_fences() {
        let text = "Here is my verdict:\n```json\n{\"status\": \"passed\", \"nested\": {\"x\": 2}}\n```\nHope it helps!";
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"status": "passed", "nested": {"x": 2}}"#)
        );
    }

    #[test]
    fn test_extract_json_object_braces_in_strings() {
        let text = r#"{"note": "a } inside", "ok": true} trailing"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"note": "a } inside", "ok": true}"#)
        );
    }

    #[test]
    fn test_extract_json_object_unbalanced_fails_closed() {
        assert_eq!(extract_json_object(r#"{"a": 1"#), None);
        assert_eq!(extract_json_object("no json at all"), None);
    }

    #[test]
    fn test_verdict_maps_statuses_and_issues() {
        let response = r#"The page fails.
            {"status": "failed", "confidence": 0.8,
             "issues": [{"element": ".menu", "description": "Color-only link styling",
                         "severity": "serious", "fix": "Add underlines"}],
             "observations": "Links rely on color"}"#;
        let result = verdict_from_response("1.4.1", response);
        assert_eq!(result.status, TestStatus::Failed);
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].severity, IssueSeverity::Serious);
    }

    #[test]
    fn test_verdict_without_status_is_not_checked() {
        let result = verdict_from_response("1.4.1", r#"{"confidence": 0.9}"#);
        assert_eq!(result.status, TestStatus::NotChecked);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_verdict_unknown_severity_defaults_to_moderate() {
        let response = r#"{"status": "failed", "issues": [{"description": "x", "severity": "catastrophic"}]}"#;
        let result = verdict_from_response("2.4.4", response);
        assert_eq!(result.issues[0].severity, IssueSeverity::Moderate);
    }

    #[tokio::test]
    async fn test_audit_routes_every_criterion_once() {
        let doc = test_document(
            r#"<html lang="en"><head><title>Audit fixture</title></head>
               <body><main><h1>Fixture</h1><h2>Section</h2></main></body></html>"#,
        );
        let criteria = criteria_for_level(WcagLevel::AA, WcagVersion::V2_2);
        let results = run_wcag_audit(&criteria, &doc, &DisabledCompletionClient).await;

        assert_eq!(results.len(), criteria.len());
        for criterion in &criteria {
            let result = &results[&criterion.id];
            match criterion.test_type {
                TestType::BrowserRequired => {
                    assert_eq!(result.status, TestStatus::NeedsBrowser)
                }
                TestType::Manual => assert_eq!(result.status, TestStatus::NeedsManual),
                TestType::AiAssisted => assert_eq!(result.status, TestStatus::NotChecked),
                TestType::Automated => assert!(matches!(
                    result.status,
                    TestStatus::Passed | TestStatus::Failed | TestStatus::NotApplicable
                )),
            }
        }
    }

    #[tokio::test]
    async fn test_audit_uses_ai_verdicts() {
        let doc = test_document(
            r#"<html lang="en"><head><title>t</title></head><body><main></main></body></html>"#,
        );
        let criteria = criteria_for_level(WcagLevel::AA, WcagVersion::V2_2);
        let client = CannedClient(
            r#"{"status": "passed", "confidence": 0.7, "observations": "fine"}"#.to_string(),
        );
        let results = run_wcag_audit(&criteria, &doc, &client).await;

        let ai_result = &results["1.4.1"];
        assert_eq!(ai_result.status, TestStatus::Passed);
        assert_eq!(ai_result.confidence, 0.7);
    }

    #[tokio::test]
    async fn test_audit_survives_failing_ai_service() {
        let doc = test_document("<html><body></body></html>");
        let criteria = criteria_for_level(WcagLevel::AA, WcagVersion::V2_2);
        let results = run_wcag_audit(&criteria, &doc, &FailingClient).await;

        assert_eq!(results.len(), criteria.len());
        assert_eq!(results["1.4.1"].status, TestStatus::NotChecked);
        assert_eq!(results["1.4.1"].confidence, 0.0);
    }
}
