// SPDX-License-Identifier: PMPL-1.0-or-later
//! In-process checks for automatable WCAG criteria.
//!
//! Each check inspects the parsed document and resolves to passed, failed,
//! or not-applicable with concrete issues. Criteria whose automated check
//! finds no applicable elements resolve to not-applicable rather than
//! vacuously passing.

use super::{IssueSeverity, TestStatus, WcagIssue};
use crate::document::ParsedDocument;
use scraper::{ElementRef, Selector};
use std::collections::HashMap;

/// Outcome of one automated check.
pub struct AutomatedOutcome {
    pub status: TestStatus,
    pub issues: Vec<WcagIssue>,
    pub observations: Option<String>,
}

impl AutomatedOutcome {
    fn passed(observations: &str) -> Self {
        Self {
            status: TestStatus::Passed,
            issues: Vec::new(),
            observations: Some(observations.to_string()),
        }
    }

    fn not_applicable(observations: &str) -> Self {
        Self {
            status: TestStatus::NotApplicable,
            issues: Vec::new(),
            observations: Some(observations.to_string()),
        }
    }

    fn from_issues(issues: Vec<WcagIssue>, pass_note: &str) -> Self {
        if issues.is_empty() {
            Self::passed(pass_note)
        } else {
            Self {
                status: TestStatus::Failed,
                issues,
                observations: None,
            }
        }
    }
}

pub type AutomatedCheck = fn(&ParsedDocument) -> AutomatedOutcome;

/// The automated check registered for a criterion id, if any.
pub fn automated_check_for(id: &str) -> Option<AutomatedCheck> {
    match id {
        "1.1.1" => Some(check_non_text_content),
        "1.3.1" => Some(check_info_and_relationships),
        "1.3.5" => Some(check_input_purpose),
        "2.4.1" => Some(check_bypass_blocks),
        "2.4.2" => Some(check_page_titled),
        "2.5.3" => Some(check_label_in_name),
        "3.1.1" => Some(check_language_of_page),
        "3.3.2" => Some(check_labels_or_instructions),
        "4.1.1" => Some(check_parsing),
        "4.1.2" => Some(check_name_role_value),
        _ => None,
    }
}

/// Short opening-tag snippet for issue reporting.
fn element_snippet(el: &ElementRef) -> String {
    let attrs: String = el
        .value()
        .attrs()
        .map(|(k, v)| format!(" {}=\"{}\"", k, v))
        .collect();
    let mut snippet = format!("<{}{}>", el.value().name(), attrs);
    if snippet.len() > 120 {
        let mut cut = 117;
        while !snippet.is_char_boundary(cut) {
            cut -= 1;
        }
        snippet.truncate(cut);
        snippet.push_str("...");
    }
    snippet
}

/// 1.1.1 Non-text Content: every image needs an alt attribute. An empty
/// alt marks a decorative image and is acceptable here.
fn check_non_text_content(doc: &ParsedDocument) -> AutomatedOutcome {
    let img_sel = Selector::parse("img").expect("valid selector");
    let images: Vec<_> = doc.dom().select(&img_sel).collect();

    if images.is_empty() {
        return AutomatedOutcome::not_applicable("No images on the page");
    }

    let issues: Vec<WcagIssue> = images
        .iter()
        .filter(|img| img.value().attr("alt").is_none())
        .map(|img| {
            WcagIssue::new(
                &element_snippet(img),
                "Image is missing an alt attribute",
                IssueSeverity::Critical,
                "Add alt=\"description\" for informative images or alt=\"\" for decorative ones",
            )
        })
        .collect();

    AutomatedOutcome::from_issues(issues, "All images carry alt attributes")
}

/// 1.3.1 Info and Relationships: heading levels must not skip, and data
/// tables need header cells.
fn check_info_and_relationships(doc: &ParsedDocument) -> AutomatedOutcome {
    let heading_sel = Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector");
    let table_sel = Selector::parse("table").expect("valid selector");
    let th_sel = Selector::parse("th").expect("valid selector");

    let headings: Vec<_> = doc.dom().select(&heading_sel).collect();
    let tables: Vec<_> = doc.dom().select(&table_sel).collect();

    if headings.is_empty() && tables.is_empty() {
        return AutomatedOutcome::not_applicable("No headings or tables on the page");
    }

    let mut issues = Vec::new();
    let mut prev_level = 0usize;
    for heading in &headings {
        let level = (heading.value().name().as_bytes()[1] - b'0') as usize;
        if prev_level > 0 && level > prev_level + 1 {
            issues.push(WcagIssue::new(
                &element_snippet(heading),
                &format!("Heading level jumps from h{} to h{}", prev_level, level),
                IssueSeverity::Moderate,
                "Use sequential heading levels so document structure is programmatically clear",
            ));
        }
        prev_level = level;
    }

    for table in &tables {
        if table.select(&th_sel).next().is_none() {
            issues.push(WcagIssue::new(
                &element_snippet(table),
                "Table has no header cells",
                IssueSeverity::Moderate,
                "Mark header cells with <th scope=\"col\"> or <th scope=\"row\">",
            ));
        }
    }

    AutomatedOutcome::from_issues(issues, "Heading structure and tables expose their relationships")
}

/// 1.3.5 Identify Input Purpose: identity-collecting inputs should declare
/// autocomplete.
fn check_input_purpose(doc: &ParsedDocument) -> AutomatedOutcome {
    let input_sel = Selector::parse("input[type=\"email\"], input[type=\"tel\"], input[type=\"url\"]")
        .expect("valid selector");
    let inputs: Vec<_> = doc.dom().select(&input_sel).collect();

    if inputs.is_empty() {
        return AutomatedOutcome::not_applicable("No identity-collecting inputs on the page");
    }

    let issues: Vec<WcagIssue> = inputs
        .iter()
        .filter(|input| input.value().attr("autocomplete").is_none())
        .map(|input| {
            let input_type = input.value().attr("type").unwrap_or("text");
            WcagIssue::new(
                &element_snippet(input),
                &format!("<input type=\"{}\"> has no autocomplete attribute", input_type),
                IssueSeverity::Moderate,
                &format!("Add autocomplete=\"{}\" so the field's purpose is machine-readable", input_type),
            )
        })
        .collect();

    AutomatedOutcome::from_issues(issues, "Identity-collecting inputs declare their purpose")
}

/// 2.4.1 Bypass Blocks: a skip link or content landmarks must exist.
fn check_bypass_blocks(doc: &ParsedDocument) -> AutomatedOutcome {
    let has_landmark =
        doc.exists("main") || doc.exists("[role=\"main\"]") || doc.exists("nav");
    let skip_sel = Selector::parse("a[href^=\"#\"]").expect("valid selector");
    let has_skip_link = doc.dom().select(&skip_sel).next().is_some();

    if has_landmark || has_skip_link {
        AutomatedOutcome::passed("Landmark regions or a skip link provide a bypass mechanism")
    } else {
        AutomatedOutcome::from_issues(
            vec![WcagIssue::new(
                "<body>",
                "No skip link or landmark regions found",
                IssueSeverity::Serious,
                "Add a \"skip to content\" link or mark regions with <main> and <nav>",
            )],
            "",
        )
    }
}

/// 2.4.2 Page Titled: the document needs a non-empty title.
fn check_page_titled(doc: &ParsedDocument) -> AutomatedOutcome {
    match doc.first_text("title") {
        Some(title) => AutomatedOutcome::passed(&format!("Page title: \"{}\"", title)),
        None => AutomatedOutcome::from_issues(
            vec![WcagIssue::new(
                "<head>",
                "Page has no title",
                IssueSeverity::Serious,
                "Add a <title> describing the page's topic or purpose",
            )],
            "",
        ),
    }
}

/// 2.5.3 Label in Name: an aria-label must contain the visible label text.
fn check_label_in_name(doc: &ParsedDocument) -> AutomatedOutcome {
    let labelled_sel =
        Selector::parse("a[aria-label], button[aria-label]").expect("valid selector");
    let candidates: Vec<_> = doc.dom().select(&labelled_sel).collect();

    if candidates.is_empty() {
        return AutomatedOutcome::not_applicable("No elements override their visible label");
    }

    let mut issues = Vec::new();
    for el in &candidates {
        let visible = el.text().collect::<String>();
        let visible = visible.trim().to_lowercase();
        if visible.is_empty() {
            continue;
        }
        let aria_label = el.value().attr("aria-label").unwrap_or("").to_lowercase();
        if !aria_label.contains(&visible) {
            issues.push(WcagIssue::new(
                &element_snippet(el),
                &format!(
                    "aria-label \"{}\" does not contain the visible text \"{}\"",
                    aria_label, visible
                ),
                IssueSeverity::Serious,
                "Start the accessible name with the visible label so voice control users can activate it",
            ));
        }
    }

    AutomatedOutcome::from_issues(issues, "Accessible names contain their visible labels")
}

/// 3.1.1 Language of Page: `<html>` needs a non-empty lang attribute.
fn check_language_of_page(doc: &ParsedDocument) -> AutomatedOutcome {
    match doc.first_attr("html", "lang") {
        Some(lang) => AutomatedOutcome::passed(&format!("Page language: {}", lang)),
        None => AutomatedOutcome::from_issues(
            vec![WcagIssue::new(
                "<html>",
                "The <html> element has no lang attribute",
                IssueSeverity::Serious,
                "Add lang=\"en\" (or the appropriate BCP 47 tag) to <html>",
            )],
            "",
        ),
    }
}

/// Input types that do not need a visible label.
const EXEMPT_INPUT_TYPES: &[&str] = &["hidden", "submit", "reset", "button", "image"];

fn has_ancestor_label(el: &ElementRef) -> bool {
    let mut node = el.parent();
    while let Some(n) = node {
        if let Some(parent_el) = ElementRef::wrap(n) {
            if parent_el.value().name() == "label" {
                return true;
            }
        }
        node = n.parent();
    }
    false
}

/// 3.3.2 Labels or Instructions: every form field needs an associated
/// label, aria-label, aria-labelledby, or title.
fn check_labels_or_instructions(doc: &ParsedDocument) -> AutomatedOutcome {
    let field_sel = Selector::parse("input, select, textarea").expect("valid selector");
    let label_sel = Selector::parse("label[for]").expect("valid selector");

    let label_fors: Vec<&str> = doc
        .dom()
        .select(&label_sel)
        .filter_map(|l| l.value().attr("for"))
        .collect();

    let mut applicable = 0usize;
    let mut issues = Vec::new();

    for field in doc.dom().select(&field_sel) {
        if field.value().name() == "input" {
            let input_type = field.value().attr("type").unwrap_or("text");
            if EXEMPT_INPUT_TYPES.contains(&input_type) {
                continue;
            }
        }
        applicable += 1;

        let labelled_by_for = field
            .value()
            .attr("id")
            .map(|id| label_fors.contains(&id))
            .unwrap_or(false);
        let has_aria = field.value().attr("aria-label").is_some()
            || field.value().attr("aria-labelledby").is_some();
        let has_title = field.value().attr("title").is_some();

        if !labelled_by_for && !has_aria && !has_title && !has_ancestor_label(&field) {
            issues.push(WcagIssue::new(
                &element_snippet(&field),
                "Form field has no associated label",
                IssueSeverity::Serious,
                "Associate a <label for=\"...\">, wrap the field in a <label>, or add aria-label",
            ));
        }
    }

    if applicable == 0 {
        return AutomatedOutcome::not_applicable("No form fields on the page");
    }

    AutomatedOutcome::from_issues(issues, "All form fields are labelled")
}

/// 4.1.1 Parsing: element ids must be unique.
fn check_parsing(doc: &ParsedDocument) -> AutomatedOutcome {
    let id_sel = Selector::parse("[id]").expect("valid selector");

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for el in doc.dom().select(&id_sel) {
        if let Some(id) = el.value().attr("id") {
            *counts.entry(id).or_default() += 1;
        }
    }

    let mut duplicates: Vec<(&str, usize)> =
        counts.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicates.sort();

    let issues: Vec<WcagIssue> = duplicates
        .iter()
        .map(|(id, n)| {
            WcagIssue::new(
                &format!("#{}", id),
                &format!("id \"{}\" is used {} times", id, n),
                IssueSeverity::Serious,
                "Make element ids unique so assistive technology can resolve references",
            )
        })
        .collect();

    AutomatedOutcome::from_issues(issues, "All element ids are unique")
}

/// 4.1.2 Name, Role, Value: interactive elements need accessible names and
/// must not hide themselves from assistive technology while focusable.
fn check_name_role_value(doc: &ParsedDocument) -> AutomatedOutcome {
    let button_sel = Selector::parse("button").expect("valid selector");
    let link_sel = Selector::parse("a[href]").expect("valid selector");
    let img_alt_sel = Selector::parse("img[alt]").expect("valid selector");
    let hidden_sel = Selector::parse(
        "a[aria-hidden=\"true\"], button[aria-hidden=\"true\"], input[aria-hidden=\"true\"], \
         select[aria-hidden=\"true\"], textarea[aria-hidden=\"true\"]",
    )
    .expect("valid selector");

    let mut issues = Vec::new();

    for el in doc
        .dom()
        .select(&button_sel)
        .chain(doc.dom().select(&link_sel))
    {
        let has_text = !el.text().collect::<String>().trim().is_empty();
        let has_aria = el.value().attr("aria-label").is_some()
            || el.value().attr("aria-labelledby").is_some()
            || el.value().attr("title").is_some();
        let has_named_image = el
            .select(&img_alt_sel)
            .any(|img| !img.value().attr("alt").unwrap_or("").trim().is_empty());

        if !has_text && !has_aria && !has_named_image {
            issues.push(WcagIssue::new(
                &element_snippet(&el),
                &format!("<{}> has no accessible name", el.value().name()),
                IssueSeverity::Critical,
                "Add text content, aria-label, or a labelled image inside the element",
            ));
        }
    }

    for el in doc.dom().select(&hidden_sel) {
        issues.push(WcagIssue::new(
            &element_snippet(&el),
            "Focusable element is hidden from assistive technology with aria-hidden=\"true\"",
            IssueSeverity::Serious,
            "Remove aria-hidden or take the element out of the tab order with tabindex=\"-1\"",
        ));
    }

    AutomatedOutcome::from_issues(issues, "Interactive elements expose name, role, and value")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::test_document;

    #[test]
    fn test_non_text_content_na_without_images() {
        let doc = test_document("<html><body><p>words</p></body></html>");
        let outcome = check_non_text_content(&doc);
        assert_eq!(outcome.status, TestStatus::NotApplicable);
    }

    #[test]
    fn test_non_text_content_accepts_decorative_alt() {
        let doc = test_document(r#"<html><body><img src="a.png" alt=""></body></html>"#);
        let outcome = check_non_text_content(&doc);
        assert_eq!(outcome.status, TestStatus::Passed);
    }

    #[test]
    fn test_non_text_content_fails_on_missing_alt() {
        let doc = test_document(r#"<html><body><img src="a.png"></body></html>"#);
        let outcome = check_non_text_content(&doc);
        assert_eq!(outcome.status, TestStatus::Failed);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].severity, IssueSeverity::Critical);
    }

    #[test]
    fn test_heading_skip_detected() {
        let doc = test_document("<html><body><h1>a</h1><h3>b</h3></body></html>");
        let outcome = check_info_and_relationships(&doc);
        assert_eq!(outcome.status, TestStatus::Failed);
        assert!(outcome.issues[0].description.contains("h1 to h3"));
    }

    #[test]
    fn test_table_without_headers_detected() {
        let doc = test_document(
            "<html><body><h1>t</h1><table><tr><td>1</td></tr></table></body></html>",
        );
        let outcome = check_info_and_relationships(&doc);
        assert_eq!(outcome.status, TestStatus::Failed);
        assert!(outcome.issues[0].description.contains("header cells"));
    }

    #[test]
    fn test_input_purpose() {
        let doc = test_document(r#"<html><body><input type="email"></body></html>"#);
        assert_eq!(check_input_purpose(&doc).status, TestStatus::Failed);

        let doc = test_document(
            r#"<html><body><input type="email" autocomplete="email"></body></html>"#,
        );
        assert_eq!(check_input_purpose(&doc).status, TestStatus::Passed);

        let doc = test_document(r#"<html><body><input type="text"></body></html>"#);
        assert_eq!(check_input_purpose(&doc).status, TestStatus::NotApplicable);
    }

    #[test]
    fn test_bypass_blocks() {
        let doc = test_document("<html><body><main><p>content</p></main></body></html>");
        assert_eq!(check_bypass_blocks(&doc).status, TestStatus::Passed);

        let doc = test_document("<html><body><div><p>content</p></div></body></html>");
        assert_eq!(check_bypass_blocks(&doc).status, TestStatus::Failed);

        let doc = test_document(
            r##"<html><body><a href="#content">Skip</a><div id="content"></div></body></html>"##,
        );
        assert_eq!(check_bypass_blocks(&doc).status, TestStatus::Passed);
    }

    #[test]
    fn test_page_titled() {
        let doc = test_document("<html><head><title>Docs</title></head></html>");
        assert_eq!(check_page_titled(&doc).status, TestStatus::Passed);

        let doc = test_document("<html><head></head></html>");
        assert_eq!(check_page_titled(&doc).status, TestStatus::Failed);
    }

    #[test]
    fn test_label_in_name() {
        let doc = test_document(
            r#"<html><body><button aria-label="Search the site">Search</button></body></html>"#,
        );
        assert_eq!(check_label_in_name(&doc).status, TestStatus::Passed);

        let doc = test_document(
            r#"<html><body><button aria-label="Go">Search</button></body></html>"#,
        );
        assert_eq!(check_label_in_name(&doc).status, TestStatus::Failed);

        let doc = test_document("<html><body><button>Search</button></body></html>");
        assert_eq!(check_label_in_name(&doc).status, TestStatus::NotApplicable);
    }

    #[test]
    fn test_language_of_page() {
        let doc = test_document(r#"<html lang="en"><body></body></html>"#);
        assert_eq!(check_language_of_page(&doc).status, TestStatus::Passed);

        let doc = test_document("<html><body></body></html>");
        assert_eq!(check_language_of_page(&doc).status, TestStatus::Failed);
    }

    #[test]
    fn test_labels_for_fields() {
        let doc = test_document(
            r#"<html><body>
                <label for="name">Name</label><input id="name" type="text">
                <label>Email <input type="email" autocomplete="email"></label>
                <input type="submit" value="Go">
            </body></html>"#,
        );
        assert_eq!(check_labels_or_instructions(&doc).status, TestStatus::Passed);

        let doc = test_document(r#"<html><body><input type="text"></body></html>"#);
        assert_eq!(check_labels_or_instructions(&doc).status, TestStatus::Failed);

        let doc = test_document("<html><body><p>no forms</p></body></html>");
        assert_eq!(
            check_labels_or_instructions(&doc).status,
            TestStatus::NotApplicable
        );
    }

    #[test]
    fn test_duplicate_ids() {
        let doc = test_document(
            r#"<html><body><div id="x"></div><span id="x"></span></body></html>"#,
        );
        let outcome = check_parsing(&doc);
        assert_eq!(outcome.status, TestStatus::Failed);
        assert!(outcome.issues[0].description.contains("2 times"));

        let doc = test_document(r#"<html><body><div id="x"></div></body></html>"#);
        assert_eq!(check_parsing(&doc).status, TestStatus::Passed);
    }

    #[test]
    fn test_name_role_value() {
        let doc = test_document(
            r#"<html><body><button><i class="icon"></i></button></body></html>"#,
        );
        let outcome = check_name_role_value(&doc);
        assert_eq!(outcome.status, TestStatus::Failed);

        let doc = test_document(
            r#"<html><body>
                <button aria-label="Close">X</button>
                <a href="/home"><img src="logo.png" alt="Home"></a>
            </body></html>"#,
        );
        assert_eq!(check_name_role_value(&doc).status, TestStatus::Passed);
    }

    #[test]
    fn test_aria_hidden_focusable_flagged() {
        let doc = test_document(
            r#"<html><body><button aria-hidden="true">Hidden</button></body></html>"#,
        );
        let outcome = check_name_role_value(&doc);
        assert_eq!(outcome.status, TestStatus::Failed);
        assert!(outcome.issues[0].description.contains("aria-hidden"));
    }

    #[test]
    fn test_registry_covers_all_automated_criteria() {
        use crate::wcag::criteria::all_criteria;
        use crate::wcag::TestType;
        for c in all_criteria() {
            if c.test_type == TestType::Automated {
                assert!(
                    automated_check_for(&c.id).is_some(),
                    "criterion {} is routed as automated but has no check",
                    c.id
                );
            }
        }
    }
}
