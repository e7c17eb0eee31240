// SPDX-License-Identifier: PMPL-1.0-or-later
//! WCAG success-criteria auditing.
//!
//! - `criteria`: the static catalog of success criteria with test routing
//! - `automated`: in-process checks for automatable criteria
//! - `router`: dispatches each criterion to its test path
//! - `pour`: Perceivable/Operable/Understandable/Robust scoring

pub mod automated;
pub mod criteria;
pub mod pour;
pub mod router;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// WCAG conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// WCAG specification version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagVersion {
    #[serde(rename = "2.1")]
    V2_1,
    #[serde(rename = "2.2")]
    V2_2,
}

impl std::fmt::Display for WcagVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagVersion::V2_1 => write!(f, "2.1"),
            WcagVersion::V2_2 => write!(f, "2.2"),
        }
    }
}

impl std::str::FromStr for WcagVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2.1" => Ok(WcagVersion::V2_1),
            "2.2" => Ok(WcagVersion::V2_2),
            other => Err(format!("Unknown WCAG version: {}", other)),
        }
    }
}

/// The four WCAG principles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Principle {
    Perceivable,
    Operable,
    Understandable,
    Robust,
}

impl Principle {
    pub const ALL: [Principle; 4] = [
        Principle::Perceivable,
        Principle::Operable,
        Principle::Understandable,
        Principle::Robust,
    ];
}

impl std::fmt::Display for Principle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Principle::Perceivable => write!(f, "Perceivable"),
            Principle::Operable => write!(f, "Operable"),
            Principle::Understandable => write!(f, "Understandable"),
            Principle::Robust => write!(f, "Robust"),
        }
    }
}

/// How a criterion is tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestType {
    /// Checked in-process against the parsed document
    Automated,
    /// Judged by the text-completion collaborator
    AiAssisted,
    /// Needs a rendered page (layout, contrast, focus)
    BrowserRequired,
    /// Needs human judgment
    Manual,
}

/// Terminal status of one criterion in one audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestStatus {
    Passed,
    Failed,
    NotApplicable,
    NotChecked,
    NeedsBrowser,
    NeedsManual,
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestStatus::Passed => write!(f, "passed"),
            TestStatus::Failed => write!(f, "failed"),
            TestStatus::NotApplicable => write!(f, "not-applicable"),
            TestStatus::NotChecked => write!(f, "not-checked"),
            TestStatus::NeedsBrowser => write!(f, "needs-browser"),
            TestStatus::NeedsManual => write!(f, "needs-manual"),
        }
    }
}

/// Severity of an accessibility issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Critical,
    Serious,
    Moderate,
    Minor,
}

/// One concrete accessibility problem with its remediation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WcagIssue {
    /// Selector or markup snippet identifying the element
    pub element: String,
    pub description: String,
    pub severity: IssueSeverity,
    /// Actionable remediation text
    pub fix: String,
}

impl WcagIssue {
    pub fn new(element: &str, description: &str, severity: IssueSeverity, fix: &str) -> Self {
        Self {
            element: element.to_string(),
            description: description.to_string(),
            severity,
            fix: fix.to_string(),
        }
    }
}

/// One WCAG success criterion from the static catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WcagCriterion {
    /// Criterion number, e.g. "1.4.3". Unique across the catalog.
    pub id: String,
    pub title: String,
    pub level: WcagLevel,
    pub principle: Principle,
    /// Guideline number, e.g. "1.4"
    pub guideline: String,
    pub guideline_title: String,
    pub description: String,
    pub test_type: TestType,
    pub w3c_url: String,
    /// Set only for criteria introduced after 2.1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<WcagVersion>,
}

/// Write-once result of testing one criterion in one audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WcagTestResult {
    /// Criterion id this result belongs to
    pub criterion: String,
    pub status: TestStatus,
    /// 0.0..=1.0; zero for anything not actually tested
    pub confidence: f32,
    pub issues: Vec<WcagIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    pub tested_at: DateTime<Utc>,
}

impl WcagTestResult {
    /// A result produced by an actual test run.
    pub fn tested(
        criterion: &str,
        status: TestStatus,
        confidence: f32,
        issues: Vec<WcagIssue>,
        observations: Option<String>,
    ) -> Self {
        Self {
            criterion: criterion.to_string(),
            status,
            confidence: confidence.clamp(0.0, 1.0),
            issues,
            observations,
            tested_at: Utc::now(),
        }
    }

    /// A deterministic terminal result (needs-browser, needs-manual,
    /// not-checked) with zero confidence.
    pub fn terminal(criterion: &str, status: TestStatus, observation: &str) -> Self {
        Self {
            criterion: criterion.to_string(),
            status,
            confidence: 0.0,
            issues: Vec::new(),
            observations: Some(observation.to_string()),
            tested_at: Utc::now(),
        }
    }
}

/// Per-principle pass percentages plus the combined overall score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PourScores {
    pub perceivable: u32,
    pub operable: u32,
    pub understandable: u32,
    pub robust: u32,
    pub overall: u32,
}

/// Plain status tallies over a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub passed: usize,
    pub failed: usize,
    pub needs_browser: usize,
    pub needs_manual: usize,
    pub not_applicable: usize,
    pub not_checked: usize,
}

impl AuditSummary {
    pub fn total(&self) -> usize {
        self.passed
            + self.failed
            + self.needs_browser
            + self.needs_manual
            + self.not_applicable
            + self.not_checked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(WcagLevel::A < WcagLevel::AA);
        assert!(WcagLevel::AA < WcagLevel::AAA);
    }

    #[test]
    fn test_version_parse_and_display() {
        assert_eq!("2.1".parse::<WcagVersion>().unwrap(), WcagVersion::V2_1);
        assert_eq!("2.2".parse::<WcagVersion>().unwrap(), WcagVersion::V2_2);
        assert!("3.0".parse::<WcagVersion>().is_err());
        assert_eq!(WcagVersion::V2_2.to_string(), "2.2");
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&TestStatus::NotApplicable).unwrap();
        assert_eq!(json, "\"not-applicable\"");
        let json = serde_json::to_string(&TestStatus::NeedsBrowser).unwrap();
        assert_eq!(json, "\"needs-browser\"");
    }

    #[test]
    fn test_confidence_is_clamped() {
        let result = WcagTestResult::tested("1.1.1", TestStatus::Passed, 1.7, vec![], None);
        assert_eq!(result.confidence, 1.0);
        let result = WcagTestResult::tested("1.1.1", TestStatus::Passed, -0.3, vec![], None);
        assert_eq!(result.confidence, 0.0);
    }
}
