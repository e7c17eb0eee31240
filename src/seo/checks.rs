// SPDX-License-Identifier: PMPL-1.0-or-later
//! The individual SEO checks.
//!
//! Each check starts from 100 and subtracts fixed penalties, flooring at
//! zero. Penalties are independent and stack; evaluation order never
//! matters because every check computes its final score in one pass.

use super::{
    AdvancedCheck, ContentCheck, DescriptionCheck, HeadingsCheck, ImagesCheck, LinksCheck,
    SocialCheck, TechnicalCheck, TitleCheck,
};
use crate::document::ParsedDocument;
use crate::provider::SideLookups;
use scraper::Selector;

fn floor_score(score: i32) -> u32 {
    score.max(0) as u32
}

/// Title tag presence and length (recommended 30-60 characters).
pub fn check_title(doc: &ParsedDocument) -> TitleCheck {
    let Some(text) = doc.first_text("title") else {
        return TitleCheck {
            score: 0,
            issues: vec!["No title tag found".to_string()],
            text: None,
            length: 0,
        };
    };

    let length = text.chars().count();
    let mut score = 100;
    let mut issues = Vec::new();

    if length < 30 {
        score -= 30;
        issues.push(format!(
            "Title is too short ({} characters, recommended 30-60)",
            length
        ));
    } else if length > 60 {
        score -= 20;
        issues.push(format!(
            "Title is too long ({} characters, recommended 30-60)",
            length
        ));
    }

    TitleCheck {
        score: floor_score(score),
        issues,
        text: Some(text),
        length,
    }
}

/// Meta description presence and length (recommended 70-160 characters).
pub fn check_description(doc: &ParsedDocument) -> DescriptionCheck {
    let Some(text) = doc.meta_name("description") else {
        return DescriptionCheck {
            score: 0,
            issues: vec!["No meta description found".to_string()],
            text: None,
            length: 0,
        };
    };

    let length = text.chars().count();
    let mut score = 100;
    let mut issues = Vec::new();

    if length < 70 {
        score -= 30;
        issues.push(format!(
            "Meta description is too short ({} characters, recommended 70-160)",
            length
        ));
    } else if length > 160 {
        score -= 20;
        issues.push(format!(
            "Meta description is too long ({} characters, recommended 70-160)",
            length
        ));
    }

    DescriptionCheck {
        score: floor_score(score),
        issues,
        text: Some(text),
        length,
    }
}

/// Heading structure: exactly one H1, at least one H2.
pub fn check_headings(doc: &ParsedDocument) -> HeadingsCheck {
    let h1_count = doc.count("h1");
    let h2_count = doc.count("h2");

    let mut score = 100;
    let mut issues = Vec::new();

    if h1_count == 0 {
        score -= 40;
        issues.push("No H1 heading found".to_string());
    } else if h1_count > 1 {
        score -= 20;
        issues.push(format!(
            "Multiple H1 headings found ({}); use exactly one",
            h1_count
        ));
    }

    if h2_count == 0 {
        score -= 20;
        issues.push("No H2 headings found".to_string());
    }

    HeadingsCheck {
        score: floor_score(score),
        issues,
        h1_count,
        h2_count,
    }
}

/// Image alt-text coverage. Missing and empty alt both count against the
/// score here; the WCAG audit is where decorative `alt=""` is accepted.
pub fn check_images(doc: &ParsedDocument) -> ImagesCheck {
    let img_sel = Selector::parse("img").expect("valid selector");
    let mut total = 0;
    let mut missing_alt = 0;

    for img in doc.dom().select(&img_sel) {
        total += 1;
        match img.value().attr("alt") {
            Some(alt) if !alt.trim().is_empty() => {}
            _ => missing_alt += 1,
        }
    }

    let mut score = 100;
    let mut issues = Vec::new();

    if missing_alt > 0 {
        let penalty = (missing_alt as i32 * 10).min(50);
        score -= penalty;
        let percent = ((missing_alt as f64 / total as f64) * 100.0).round() as u32;
        issues.push(format!(
            "{} of {} images missing alt text ({}%)",
            missing_alt, total, percent
        ));
    }

    ImagesCheck {
        score: floor_score(score),
        issues,
        total,
        missing_alt,
    }
}

/// Link profile: internal/external split, nofollow count, empty anchors.
pub fn check_links(doc: &ParsedDocument) -> LinksCheck {
    let a_sel = Selector::parse("a[href]").expect("valid selector");
    let img_sel = Selector::parse("img").expect("valid selector");
    let page_host = doc.host().map(str::to_string);

    let mut internal = 0;
    let mut external = 0;
    let mut nofollow = 0;
    let mut empty_anchors = 0;

    for anchor in doc.dom().select(&a_sel) {
        let href = anchor.value().attr("href").unwrap_or("");

        if let Ok(resolved) = doc.url().join(href) {
            if matches!(resolved.scheme(), "http" | "https") {
                if resolved.host_str().map(str::to_string) == page_host {
                    internal += 1;
                } else {
                    external += 1;
                }
            }
        }

        if anchor
            .value()
            .attr("rel")
            .map(|rel| rel.split_whitespace().any(|r| r.eq_ignore_ascii_case("nofollow")))
            .unwrap_or(false)
        {
            nofollow += 1;
        }

        let text = anchor.text().collect::<String>();
        let has_image = anchor.select(&img_sel).next().is_some();
        if text.trim().is_empty() && !has_image {
            empty_anchors += 1;
        }
    }

    let mut score = 100;
    let mut issues = Vec::new();

    if empty_anchors > 0 {
        let penalty = (empty_anchors as i32 * 5).min(20);
        score -= penalty;
        issues.push(format!(
            "{} links have no anchor text",
            empty_anchors
        ));
    }

    if internal == 0 {
        score -= 10;
        issues.push("No internal links found".to_string());
    }

    LinksCheck {
        score: floor_score(score),
        issues,
        internal,
        external,
        nofollow,
        empty_anchors,
    }
}

/// Technical hygiene: HTTPS, canonical, viewport, robots.txt, sitemap.
///
/// The two side lookups were fetched up front with bounded timeouts; a
/// failed lookup reads as "absent" and costs the same penalty.
pub fn check_technical(doc: &ParsedDocument, side: &SideLookups) -> TechnicalCheck {
    let https = doc.url().scheme() == "https";
    let canonical = doc.exists("link[rel=\"canonical\"]");
    let viewport = doc.meta_name("viewport").is_some();
    let robots_txt = side.robots_present();
    let sitemap = side.sitemap_present();

    let mut score = 100;
    let mut issues = Vec::new();

    if !https {
        score -= 30;
        issues.push("Page is not served over HTTPS".to_string());
    }
    if !canonical {
        score -= 10;
        issues.push("No canonical link found".to_string());
    }
    if !viewport {
        score -= 20;
        issues.push("No viewport meta tag found".to_string());
    }
    if !robots_txt {
        score -= 10;
        issues.push("No robots.txt found".to_string());
    }
    if !sitemap {
        score -= 10;
        issues.push("No sitemap.xml found".to_string());
    }

    TechnicalCheck {
        score: floor_score(score),
        issues,
        https,
        canonical,
        viewport,
        robots_txt,
        sitemap,
    }
}

/// Open Graph and Twitter Card tags for social sharing.
pub fn check_social(doc: &ParsedDocument) -> SocialCheck {
    let og_title = doc.meta_property("og:title").is_some();
    let og_description = doc.meta_property("og:description").is_some();
    let og_image = doc.meta_property("og:image").is_some();
    let twitter_card = doc.meta_name("twitter:card").is_some();

    let mut score = 100;
    let mut issues = Vec::new();

    if !og_title {
        score -= 20;
        issues.push("Missing og:title tag".to_string());
    }
    if !og_description {
        score -= 15;
        issues.push("Missing og:description tag".to_string());
    }
    if !og_image {
        score -= 25;
        issues.push("Missing og:image tag".to_string());
    }
    if !twitter_card {
        score -= 10;
        issues.push("Missing twitter:card tag".to_string());
    }

    SocialCheck {
        score: floor_score(score),
        issues,
        og_title,
        og_description,
        og_image,
        twitter_card,
    }
}

/// Content readability heuristics: word count, text-to-HTML ratio, and
/// H1/title alignment.
pub fn check_content(doc: &ParsedDocument) -> ContentCheck {
    let text = doc.visible_text();
    let word_count = text.split_whitespace().count();
    let text_html_ratio = if doc.html().is_empty() {
        0.0
    } else {
        text.len() as f64 / doc.html().len() as f64 * 100.0
    };

    let mut score = 100;
    let mut issues = Vec::new();

    if word_count < 300 {
        score -= 30;
        issues.push(format!(
            "Thin content: only {} words (recommended at least 300)",
            word_count
        ));
    } else if word_count < 500 {
        score -= 10;
        issues.push(format!(
            "Content is short ({} words); consider expanding",
            word_count
        ));
    }

    if text_html_ratio < 10.0 {
        score -= 20;
        issues.push(format!(
            "Low text-to-HTML ratio ({:.0}%)",
            text_html_ratio
        ));
    }

    // An H1 that shares no 3+-character token with the title suggests the
    // page headline and the search snippet will disagree.
    let mut h1_matches_title = true;
    if let (Some(h1), Some(title)) = (doc.first_text("h1"), doc.first_text("title")) {
        let h1_lower = h1.to_lowercase();
        let title_lower = title.to_lowercase();
        let aligned = title_lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.len() >= 3)
            .any(|token| h1_lower.contains(token));
        if !aligned {
            h1_matches_title = false;
            score -= 10;
            issues.push("H1 heading does not reflect the page title".to_string());
        }
    }

    ContentCheck {
        score: floor_score(score),
        issues,
        word_count,
        text_html_ratio,
        h1_matches_title,
    }
}

/// Document-level polish: lang, charset, favicon, touch icon, theme color.
pub fn check_advanced(doc: &ParsedDocument) -> AdvancedCheck {
    let lang = doc.first_attr("html", "lang").is_some();
    let charset = doc.first_attr("meta[charset]", "charset");
    let favicon =
        doc.exists("link[rel=\"icon\"]") || doc.exists("link[rel=\"shortcut icon\"]");
    let apple_touch_icon = doc.exists("link[rel=\"apple-touch-icon\"]");
    let theme_color = doc.meta_name("theme-color").is_some();

    let mut score = 100;
    let mut issues = Vec::new();

    if !lang {
        score -= 15;
        issues.push("Missing lang attribute on <html>".to_string());
    }

    match charset {
        None => {
            score -= 10;
            issues.push("No charset declaration found".to_string());
        }
        Some(ref cs) if !cs.eq_ignore_ascii_case("utf-8") => {
            score -= 5;
            issues.push(format!("Charset is {}; UTF-8 is recommended", cs));
        }
        Some(_) => {}
    }

    if !favicon {
        score -= 10;
        issues.push("No favicon link found".to_string());
    }
    if !apple_touch_icon {
        score -= 5;
        issues.push("No apple-touch-icon link found".to_string());
    }
    if !theme_color {
        score -= 5;
        issues.push("No theme-color meta tag found".to_string());
    }

    AdvancedCheck {
        score: floor_score(score),
        issues,
        lang,
        charset,
        favicon,
        apple_touch_icon,
        theme_color,
    }
}
