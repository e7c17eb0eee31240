// SPDX-License-Identifier: PMPL-1.0-or-later
//! Traditional SEO rule evaluator.
//!
//! Nine independent checks, each a pure function of the parsed document
//! (plus the robots/sitemap side lookups for the technical check). Every
//! check returns a final 0-100 score with explanatory issues; absence of
//! markup is a scored state, never an error.

pub mod checks;

use crate::document::ParsedDocument;
use crate::provider::SideLookups;
use serde::{Deserialize, Serialize};

/// Weight of each check in the overall score. Sums to 1.00.
pub const SEO_WEIGHTS: [(&str, f64); 9] = [
    ("title", 0.15),
    ("description", 0.12),
    ("headings", 0.12),
    ("images", 0.10),
    ("links", 0.08),
    ("technical", 0.18),
    ("social", 0.10),
    ("content", 0.10),
    ("advanced", 0.05),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleCheck {
    pub score: u32,
    pub issues: Vec<String>,
    pub text: Option<String>,
    pub length: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DescriptionCheck {
    pub score: u32,
    pub issues: Vec<String>,
    pub text: Option<String>,
    pub length: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeadingsCheck {
    pub score: u32,
    pub issues: Vec<String>,
    pub h1_count: usize,
    pub h2_count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImagesCheck {
    pub score: u32,
    pub issues: Vec<String>,
    pub total: usize,
    pub missing_alt: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinksCheck {
    pub score: u32,
    pub issues: Vec<String>,
    pub internal: usize,
    pub external: usize,
    pub nofollow: usize,
    pub empty_anchors: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicalCheck {
    pub score: u32,
    pub issues: Vec<String>,
    pub https: bool,
    pub canonical: bool,
    pub viewport: bool,
    pub robots_txt: bool,
    pub sitemap: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialCheck {
    pub score: u32,
    pub issues: Vec<String>,
    pub og_title: bool,
    pub og_description: bool,
    pub og_image: bool,
    pub twitter_card: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentCheck {
    pub score: u32,
    pub issues: Vec<String>,
    pub word_count: usize,
    /// Visible text length as a percentage of raw HTML length.
    pub text_html_ratio: f64,
    pub h1_matches_title: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvancedCheck {
    pub score: u32,
    pub issues: Vec<String>,
    pub lang: bool,
    pub charset: Option<String>,
    pub favicon: bool,
    pub apple_touch_icon: bool,
    pub theme_color: bool,
}

/// Fixed-shape SEO analysis result: every field is always populated, so
/// consumers never need presence checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoResult {
    pub title: TitleCheck,
    pub description: DescriptionCheck,
    pub headings: HeadingsCheck,
    pub images: ImagesCheck,
    pub links: LinksCheck,
    pub technical: TechnicalCheck,
    pub social: SocialCheck,
    pub content: ContentCheck,
    pub advanced: AdvancedCheck,
}

/// Run all SEO checks. Checks are independent and order-insensitive.
pub fn evaluate_seo(doc: &ParsedDocument, side: &SideLookups) -> SeoResult {
    SeoResult {
        title: checks::check_title(doc),
        description: checks::check_description(doc),
        headings: checks::check_headings(doc),
        images: checks::check_images(doc),
        links: checks::check_links(doc),
        technical: checks::check_technical(doc, side),
        social: checks::check_social(doc),
        content: checks::check_content(doc),
        advanced: checks::check_advanced(doc),
    }
}

/// Weighted overall SEO score, rounded to the nearest integer.
pub fn overall_seo_score(result: &SeoResult) -> u32 {
    let weighted: f64 = SEO_WEIGHTS
        .iter()
        .map(|(part, weight)| {
            let score = match *part {
                "title" => result.title.score,
                "description" => result.description.score,
                "headings" => result.headings.score,
                "images" => result.images.score,
                "links" => result.links.score,
                "technical" => result.technical.score,
                "social" => result.social.score,
                "content" => result.content.score,
                "advanced" => result.advanced.score,
                _ => unreachable!("unknown weight entry"),
            };
            score as f64 * weight
        })
        .sum();
    weighted.round() as u32
}

/// Score band for presenting an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grade {
    Excellent,
    Good,
    NeedsWork,
    Poor,
}

impl Grade {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=49 => Grade::Poor,
            50..=69 => Grade::NeedsWork,
            70..=89 => Grade::Good,
            _ => Grade::Excellent,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Grade::Excellent => "EXCELLENT",
            Grade::Good => "GOOD",
            Grade::NeedsWork => "NEEDS WORK",
            Grade::Poor => "POOR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = SEO_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-9, "SEO weights must sum to 1.00, got {}", sum);
    }

    #[test]
    fn test_overall_score_of_perfect_result() {
        let mut result = SeoResult::default();
        result.title.score = 100;
        result.description.score = 100;
        result.headings.score = 100;
        result.images.score = 100;
        result.links.score = 100;
        result.technical.score = 100;
        result.social.score = 100;
        result.content.score = 100;
        result.advanced.score = 100;
        assert_eq!(overall_seo_score(&result), 100);
    }

    #[test]
    fn test_overall_score_of_zero_result() {
        assert_eq!(overall_seo_score(&SeoResult::default()), 0);
    }

    #[test]
    fn test_overall_score_rounds() {
        let mut result = SeoResult::default();
        // Only the title contributes: 55 * 0.15 = 8.25 -> 8
        result.title.score = 55;
        assert_eq!(overall_seo_score(&result), 8);
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(Grade::from_score(0), Grade::Poor);
        assert_eq!(Grade::from_score(49), Grade::Poor);
        assert_eq!(Grade::from_score(50), Grade::NeedsWork);
        assert_eq!(Grade::from_score(70), Grade::Good);
        assert_eq!(Grade::from_score(90), Grade::Excellent);
        assert_eq!(Grade::from_score(100), Grade::Excellent);
    }
}
