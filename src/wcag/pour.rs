// SPDX-License-Identifier: PMPL-1.0-or-later
//! POUR aggregation: per-principle pass percentages over audit results.
//!
//! Only criteria that were actually tested ({passed, failed,
//! not-applicable}) enter a principle's denominator; criteria awaiting
//! browser or manual testing neither help nor hurt the score. A principle
//! with nothing tested scores 100 (vacuous compliance, preserved from
//! observed behavior).

use super::criteria::criteria_for_level;
use super::{AuditSummary, PourScores, Principle, TestStatus, WcagLevel, WcagTestResult, WcagVersion};
use std::collections::BTreeMap;

fn is_counted(status: TestStatus) -> bool {
    matches!(
        status,
        TestStatus::Passed | TestStatus::Failed | TestStatus::NotApplicable
    )
}

fn is_effectively_passed(status: TestStatus) -> bool {
    matches!(status, TestStatus::Passed | TestStatus::NotApplicable)
}

fn percentage(passed: usize, counted: usize) -> u32 {
    if counted == 0 {
        100
    } else {
        (passed as f64 / counted as f64 * 100.0).round() as u32
    }
}

/// Recompute POUR scores wholesale from a result set.
///
/// The overall score is a combined tally across all four principles, not
/// an average of the four percentages.
pub fn calculate_pour_scores(
    results: &BTreeMap<String, WcagTestResult>,
    level: WcagLevel,
    version: WcagVersion,
) -> PourScores {
    let criteria = criteria_for_level(level, version);

    let mut passed_by_principle: [usize; 4] = [0; 4];
    let mut counted_by_principle: [usize; 4] = [0; 4];

    for criterion in criteria {
        let Some(result) = results.get(&criterion.id) else {
            continue;
        };
        if !is_counted(result.status) {
            continue;
        }
        let idx = Principle::ALL
            .iter()
            .position(|p| *p == criterion.principle)
            .expect("principle in ALL");
        counted_by_principle[idx] += 1;
        if is_effectively_passed(result.status) {
            passed_by_principle[idx] += 1;
        }
    }

    let total_passed: usize = passed_by_principle.iter().sum();
    let total_counted: usize = counted_by_principle.iter().sum();

    PourScores {
        perceivable: percentage(passed_by_principle[0], counted_by_principle[0]),
        operable: percentage(passed_by_principle[1], counted_by_principle[1]),
        understandable: percentage(passed_by_principle[2], counted_by_principle[2]),
        robust: percentage(passed_by_principle[3], counted_by_principle[3]),
        overall: percentage(total_passed, total_counted),
    }
}

/// Plain status tallies over all results, independent of the POUR
/// denominator logic. The tallies always sum to the result-set size.
pub fn calculate_summary(results: &BTreeMap<String, WcagTestResult>) -> AuditSummary {
    let mut summary = AuditSummary::default();
    for result in results.values() {
        match result.status {
            TestStatus::Passed => summary.passed += 1,
            TestStatus::Failed => summary.failed += 1,
            TestStatus::NeedsBrowser => summary.needs_browser += 1,
            TestStatus::NeedsManual => summary.needs_manual += 1,
            TestStatus::NotApplicable => summary.not_applicable += 1,
            TestStatus::NotChecked => summary.not_checked += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, status: TestStatus) -> (String, WcagTestResult) {
        (
            id.to_string(),
            WcagTestResult::tested(id, status, 1.0, vec![], None),
        )
    }

    #[test]
    fn test_counted_statuses() {
        assert!(is_counted(TestStatus::Passed));
        assert!(is_counted(TestStatus::Failed));
        assert!(is_counted(TestStatus::NotApplicable));
        assert!(!is_counted(TestStatus::NeedsBrowser));
        assert!(!is_counted(TestStatus::NeedsManual));
        assert!(!is_counted(TestStatus::NotChecked));
    }

    #[test]
    fn test_principle_with_no_counted_criteria_is_vacuously_compliant() {
        // Documented ambiguous policy: zero tested criteria scores 100.
        let results: BTreeMap<String, WcagTestResult> = [
            result("1.1.1", TestStatus::Passed),
            result("1.3.1", TestStatus::Failed),
        ]
        .into_iter()
        .collect();

        let scores = calculate_pour_scores(&results, WcagLevel::AA, WcagVersion::V2_2);
        assert_eq!(scores.perceivable, 50);
        // Nothing tested under these principles
        assert_eq!(scores.operable, 100);
        assert_eq!(scores.understandable, 100);
        assert_eq!(scores.robust, 100);
        // Overall tallies only what was counted: 1 of 2
        assert_eq!(scores.overall, 50);
    }

    #[test]
    fn test_not_applicable_counts_as_effectively_passed() {
        let results: BTreeMap<String, WcagTestResult> = [
            result("1.1.1", TestStatus::NotApplicable),
            result("1.3.1", TestStatus::Failed),
        ]
        .into_iter()
        .collect();

        let scores = calculate_pour_scores(&results, WcagLevel::AA, WcagVersion::V2_2);
        assert_eq!(scores.perceivable, 50);
    }

    #[test]
    fn test_overall_is_a_combined_tally_not_an_average() {
        // Perceivable: 1/2 passed. Robust: 3/3 passed.
        // Average of percentages would be (50 + 100 + 100 + 100) / 4; the
        // combined tally is 4/5 = 80.
        let results: BTreeMap<String, WcagTestResult> = [
            result("1.1.1", TestStatus::Passed),
            result("1.3.1", TestStatus::Failed),
            result("4.1.1", TestStatus::Passed),
            result("4.1.2", TestStatus::Passed),
            result("4.1.3", TestStatus::Passed),
        ]
        .into_iter()
        .collect();

        let scores = calculate_pour_scores(&results, WcagLevel::AA, WcagVersion::V2_2);
        assert_eq!(scores.overall, 80);
    }

    #[test]
    fn test_untested_statuses_excluded_from_denominator() {
        let results: BTreeMap<String, WcagTestResult> = [
            result("1.1.1", TestStatus::Passed),
            result("1.4.3", TestStatus::NeedsBrowser),
            result("1.2.1", TestStatus::NeedsManual),
            result("1.4.1", TestStatus::NotChecked),
        ]
        .into_iter()
        .collect();

        let scores = calculate_pour_scores(&results, WcagLevel::AA, WcagVersion::V2_2);
        assert_eq!(scores.perceivable, 100);
        assert_eq!(scores.overall, 100);
    }

    #[test]
    fn test_results_outside_the_selection_are_ignored() {
        // 1.4.6 is AAA; an AA-level score ignores it.
        let results: BTreeMap<String, WcagTestResult> = [
            result("1.1.1", TestStatus::Passed),
            result("1.4.6", TestStatus::Failed),
        ]
        .into_iter()
        .collect();

        let scores = calculate_pour_scores(&results, WcagLevel::AA, WcagVersion::V2_2);
        assert_eq!(scores.perceivable, 100);
    }

    #[test]
    fn test_summary_tallies_sum_to_result_count() {
        let results: BTreeMap<String, WcagTestResult> = [
            result("1.1.1", TestStatus::Passed),
            result("1.3.1", TestStatus::Failed),
            result("1.4.3", TestStatus::NeedsBrowser),
            result("1.2.1", TestStatus::NeedsManual),
            result("1.3.5", TestStatus::NotApplicable),
            result("1.4.1", TestStatus::NotChecked),
        ]
        .into_iter()
        .collect();

        let summary = calculate_summary(&results);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.needs_browser, 1);
        assert_eq!(summary.needs_manual, 1);
        assert_eq!(summary.not_applicable, 1);
        assert_eq!(summary.not_checked, 1);
        assert_eq!(summary.total(), results.len());
    }
}
