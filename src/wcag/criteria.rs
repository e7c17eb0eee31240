// SPDX-License-Identifier: PMPL-1.0-or-later
//! Static catalog of WCAG success criteria.
//!
//! Loaded once at first use and never mutated. Identity is the criterion
//! id; ids are unique and follow `<principle>.<guideline>.<item>`
//! numbering. Criteria introduced by WCAG 2.2 carry a `version` marker so
//! 2.1 audits can exclude them.

use super::{Principle, TestType, WcagCriterion, WcagLevel, WcagVersion};
use std::collections::HashMap;
use std::sync::LazyLock;

const GUIDELINE_TITLES: &[(&str, &str)] = &[
    ("1.1", "Text Alternatives"),
    ("1.2", "Time-based Media"),
    ("1.3", "Adaptable"),
    ("1.4", "Distinguishable"),
    ("2.1", "Keyboard Accessible"),
    ("2.2", "Enough Time"),
    ("2.3", "Seizures and Physical Reactions"),
    ("2.4", "Navigable"),
    ("2.5", "Input Modalities"),
    ("3.1", "Readable"),
    ("3.2", "Predictable"),
    ("3.3", "Input Assistance"),
    ("4.1", "Compatible"),
];

fn criterion(
    id: &str,
    title: &str,
    level: WcagLevel,
    test_type: TestType,
    description: &str,
) -> WcagCriterion {
    let (guideline, _) = id.rsplit_once('.').expect("criterion id has three parts");
    let principle = match id.as_bytes()[0] {
        b'1' => Principle::Perceivable,
        b'2' => Principle::Operable,
        b'3' => Principle::Understandable,
        b'4' => Principle::Robust,
        _ => unreachable!("criterion ids start with 1-4"),
    };
    let guideline_title = GUIDELINE_TITLES
        .iter()
        .find(|(g, _)| *g == guideline)
        .map(|(_, t)| *t)
        .expect("guideline present in title table");

    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    WcagCriterion {
        id: id.to_string(),
        title: title.to_string(),
        level,
        principle,
        guideline: guideline.to_string(),
        guideline_title: guideline_title.to_string(),
        description: description.to_string(),
        test_type,
        w3c_url: format!("https://www.w3.org/WAI/WCAG22/Understanding/{}.html", slug),
        version: None,
    }
}

fn criterion_v22(
    id: &str,
    title: &str,
    level: WcagLevel,
    test_type: TestType,
    description: &str,
) -> WcagCriterion {
    WcagCriterion {
        version: Some(WcagVersion::V2_2),
        ..criterion(id, title, level, test_type, description)
    }
}

static CRITERIA: LazyLock<Vec<WcagCriterion>> = LazyLock::new(|| {
    use TestType::{AiAssisted, Automated, BrowserRequired, Manual};
    use WcagLevel::{A, AA, AAA};

    vec![
        // Perceivable
        criterion("1.1.1", "Non-text Content", A, Automated,
            "All non-text content has a text alternative serving the equivalent purpose."),
        criterion("1.2.1", "Audio-only and Video-only (Prerecorded)", A, Manual,
            "Prerecorded audio-only and video-only media have text or audio alternatives."),
        criterion("1.2.2", "Captions (Prerecorded)", A, Manual,
            "Captions are provided for all prerecorded audio content in synchronized media."),
        criterion("1.2.3", "Audio Description or Media Alternative (Prerecorded)", A, Manual,
            "An alternative or audio description is provided for prerecorded video content."),
        criterion("1.2.4", "Captions (Live)", AA, Manual,
            "Captions are provided for all live audio content in synchronized media."),
        criterion("1.2.5", "Audio Description (Prerecorded)", AA, Manual,
            "Audio description is provided for all prerecorded video content."),
        criterion("1.3.1", "Info and Relationships", A, Automated,
            "Information, structure, and relationships conveyed through presentation are programmatically determinable."),
        criterion("1.3.2", "Meaningful Sequence", A, AiAssisted,
            "The reading sequence of content is programmatically determinable when it affects meaning."),
        criterion("1.3.3", "Sensory Characteristics", A, AiAssisted,
            "Instructions do not rely solely on sensory characteristics such as shape, color, or location."),
        criterion("1.3.4", "Orientation", AA, BrowserRequired,
            "Content does not restrict its view to a single display orientation."),
        criterion("1.3.5", "Identify Input Purpose", AA, Automated,
            "The purpose of common input fields is programmatically determinable via autocomplete."),
        criterion("1.4.1", "Use of Color", A, AiAssisted,
            "Color is not the only visual means of conveying information or distinguishing elements."),
        criterion("1.4.2", "Audio Control", A, Manual,
            "Audio that plays automatically for more than three seconds can be paused or stopped."),
        criterion("1.4.3", "Contrast (Minimum)", AA, BrowserRequired,
            "Text has a contrast ratio of at least 4.5:1 (3:1 for large text)."),
        criterion("1.4.4", "Resize Text", AA, BrowserRequired,
            "Text can be resized up to 200 percent without loss of content or functionality."),
        criterion("1.4.5", "Images of Text", AA, AiAssisted,
            "Text is used to convey information rather than images of text."),
        criterion("1.4.6", "Contrast (Enhanced)", AAA, BrowserRequired,
            "Text has a contrast ratio of at least 7:1 (4.5:1 for large text)."),
        criterion("1.4.10", "Reflow", AA, BrowserRequired,
            "Content reflows to 320 CSS pixels wide without two-dimensional scrolling."),
        criterion("1.4.11", "Non-text Contrast", AA, BrowserRequired,
            "UI components and graphical objects have a contrast ratio of at least 3:1."),
        criterion("1.4.12", "Text Spacing", AA, BrowserRequired,
            "No loss of content when users adjust letter, word, line, and paragraph spacing."),
        criterion("1.4.13", "Content on Hover or Focus", AA, BrowserRequired,
            "Content appearing on hover or focus is dismissible, hoverable, and persistent."),
        // Operable
        criterion("2.1.1", "Keyboard", A, AiAssisted,
            "All functionality is operable through a keyboard interface."),
        criterion("2.1.2", "No Keyboard Trap", A, BrowserRequired,
            "Keyboard focus can always be moved away from any component."),
        criterion("2.1.4", "Character Key Shortcuts", A, Manual,
            "Single-character shortcuts can be turned off, remapped, or are active only on focus."),
        criterion("2.2.1", "Timing Adjustable", A, Manual,
            "Time limits can be turned off, adjusted, or extended by the user."),
        criterion("2.2.2", "Pause, Stop, Hide", A, AiAssisted,
            "Moving, blinking, or auto-updating content can be paused, stopped, or hidden."),
        criterion("2.3.1", "Three Flashes or Below Threshold", A, Manual,
            "Nothing flashes more than three times per second."),
        criterion("2.4.1", "Bypass Blocks", A, Automated,
            "A mechanism exists to skip blocks of repeated content."),
        criterion("2.4.2", "Page Titled", A, Automated,
            "Pages have titles describing their topic or purpose."),
        criterion("2.4.3", "Focus Order", A, BrowserRequired,
            "Focusable components receive focus in an order that preserves meaning."),
        criterion("2.4.4", "Link Purpose (In Context)", A, AiAssisted,
            "The purpose of each link is determinable from its text or context."),
        criterion("2.4.5", "Multiple Ways", AA, AiAssisted,
            "More than one way is available to locate a page within a set of pages."),
        criterion("2.4.6", "Headings and Labels", AA, AiAssisted,
            "Headings and labels describe topic or purpose."),
        criterion("2.4.7", "Focus Visible", AA, BrowserRequired,
            "Keyboard focus indicators are visible."),
        criterion_v22("2.4.11", "Focus Not Obscured (Minimum)", AA, BrowserRequired,
            "Focused components are not entirely hidden by author-created content."),
        criterion("2.5.1", "Pointer Gestures", A, Manual,
            "Multipoint or path-based gestures have single-pointer alternatives."),
        criterion("2.5.2", "Pointer Cancellation", A, Manual,
            "Single-pointer functionality can be cancelled or aborted."),
        criterion("2.5.3", "Label in Name", A, Automated,
            "The accessible name of a component contains its visible label text."),
        criterion("2.5.4", "Motion Actuation", A, Manual,
            "Functionality triggered by device motion has a UI alternative."),
        criterion_v22("2.5.7", "Dragging Movements", AA, Manual,
            "Dragging actions have a single-pointer alternative."),
        criterion_v22("2.5.8", "Target Size (Minimum)", AA, BrowserRequired,
            "Pointer targets are at least 24 by 24 CSS pixels, with exceptions."),
        // Understandable
        criterion("3.1.1", "Language of Page", A, Automated,
            "The default human language of the page is programmatically determinable."),
        criterion("3.1.2", "Language of Parts", AA, AiAssisted,
            "The language of passages differing from the page language is programmatically determinable."),
        criterion("3.2.1", "On Focus", A, BrowserRequired,
            "Receiving focus does not initiate a change of context."),
        criterion("3.2.2", "On Input", A, BrowserRequired,
            "Changing a setting does not automatically change context without warning."),
        criterion("3.2.3", "Consistent Navigation", AA, Manual,
            "Navigation mechanisms repeated across pages occur in the same relative order."),
        criterion("3.2.4", "Consistent Identification", AA, Manual,
            "Components with the same functionality are identified consistently across pages."),
        criterion("3.3.1", "Error Identification", A, AiAssisted,
            "Input errors are identified and described to the user in text."),
        criterion("3.3.2", "Labels or Instructions", A, Automated,
            "Labels or instructions are provided when content requires user input."),
        criterion("3.3.3", "Error Suggestion", AA, AiAssisted,
            "Known input errors come with correction suggestions."),
        criterion("3.3.4", "Error Prevention (Legal, Financial, Data)", AA, Manual,
            "Submissions with legal or financial consequences are reversible, checked, or confirmed."),
        criterion_v22("3.3.7", "Redundant Entry", A, Manual,
            "Previously entered information is auto-populated or available for selection."),
        criterion_v22("3.3.8", "Accessible Authentication (Minimum)", AA, AiAssisted,
            "Authentication does not require a cognitive function test without alternatives."),
        // Robust
        criterion("4.1.1", "Parsing", A, Automated,
            "Markup has complete tags, proper nesting, and unique ids."),
        criterion("4.1.2", "Name, Role, Value", A, Automated,
            "UI components expose their name, role, and value to assistive technology."),
        criterion("4.1.3", "Status Messages", AA, AiAssisted,
            "Status messages are programmatically determinable without receiving focus."),
    ]
});

static INDEX: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    CRITERIA
        .iter()
        .enumerate()
        .map(|(idx, c)| (c.id.as_str(), idx))
        .collect()
});

/// Every criterion in the catalog, in numbering order.
pub fn all_criteria() -> &'static [WcagCriterion] {
    &CRITERIA
}

/// Criteria applicable at a conformance level and specification version.
///
/// Level AA includes A; AAA includes everything. Criteria introduced after
/// the requested version are excluded.
pub fn criteria_for_level(level: WcagLevel, version: WcagVersion) -> Vec<&'static WcagCriterion> {
    CRITERIA
        .iter()
        .filter(|c| c.level <= level)
        .filter(|c| c.version.map_or(true, |v| v <= version))
        .collect()
}

/// Look up one criterion by its exact id.
pub fn criterion_by_id(id: &str) -> Option<&'static WcagCriterion> {
    INDEX.get(id).map(|&idx| &CRITERIA[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = all_criteria().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), all_criteria().len());
    }

    #[test]
    fn test_level_a_21_selection() {
        let selected = criteria_for_level(WcagLevel::A, WcagVersion::V2_1);
        assert!(selected.iter().all(|c| c.level == WcagLevel::A));
        assert!(selected.iter().all(|c| c.version.is_none()));
        // 3.3.7 is Level A but 2.2-only
        assert!(!selected.iter().any(|c| c.id == "3.3.7"));
        assert!(selected.iter().any(|c| c.id == "1.1.1"));
    }

    #[test]
    fn test_level_aa_includes_a() {
        let selected = criteria_for_level(WcagLevel::AA, WcagVersion::V2_2);
        assert!(selected.iter().any(|c| c.id == "1.1.1")); // A
        assert!(selected.iter().any(|c| c.id == "1.4.3")); // AA
        assert!(!selected.iter().any(|c| c.id == "1.4.6")); // AAA
    }

    #[test]
    fn test_aaa_at_22_selects_everything() {
        let selected = criteria_for_level(WcagLevel::AAA, WcagVersion::V2_2);
        assert_eq!(selected.len(), all_criteria().len());
    }

    #[test]
    fn test_version_21_excludes_22_only_criteria() {
        let selected = criteria_for_level(WcagLevel::AAA, WcagVersion::V2_1);
        for id in ["2.4.11", "2.5.7", "2.5.8", "3.3.7", "3.3.8"] {
            assert!(
                !selected.iter().any(|c| c.id == id),
                "{} should be excluded at version 2.1",
                id
            );
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let c = criterion_by_id("1.4.3").expect("1.4.3 in catalog");
        assert_eq!(c.title, "Contrast (Minimum)");
        assert_eq!(c.level, WcagLevel::AA);
        assert_eq!(c.principle, Principle::Perceivable);
        assert_eq!(c.guideline, "1.4");
        assert_eq!(c.guideline_title, "Distinguishable");
        assert!(criterion_by_id("9.9.9").is_none());
    }

    #[test]
    fn test_w3c_url_slugs() {
        let c = criterion_by_id("1.1.1").unwrap();
        assert_eq!(
            c.w3c_url,
            "https://www.w3.org/WAI/WCAG22/Understanding/non-text-content.html"
        );
        let c = criterion_by_id("3.3.4").unwrap();
        assert_eq!(
            c.w3c_url,
            "https://www.w3.org/WAI/WCAG22/Understanding/error-prevention-legal-financial-data.html"
        );
    }

    #[test]
    fn test_principles_follow_id_numbering() {
        for c in all_criteria() {
            let expected = match c.id.as_bytes()[0] {
                b'1' => Principle::Perceivable,
                b'2' => Principle::Operable,
                b'3' => Principle::Understandable,
                _ => Principle::Robust,
            };
            assert_eq!(c.principle, expected, "principle mismatch for {}", c.id);
        }
    }
}
