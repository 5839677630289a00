use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::{CategoryScore, Section, EMAIL, PHONE};

static PROFILE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linkedin|github").expect("profile link regex is valid"));

/// How well an ATS parser is likely to ingest the resume: file format,
/// extractable text, standard sections, contact details and line hygiene.
pub fn analyze_ats_compatibility(text: &str, filename: &str) -> CategoryScore {
    let mut score = 0;
    let mut feedback = Vec::new();

    let filename = filename.to_lowercase();
    if filename.ends_with(".pdf") || filename.ends_with(".docx") {
        score += 20;
        feedback.push("✓ ATS-friendly file format".to_string());
    } else {
        feedback.push("⚠ Consider using PDF or DOCX format".to_string());
    }

    if text.chars().count() > 100 {
        score += 15;
        feedback.push("✓ Text successfully extracted".to_string());
    } else {
        feedback.push("✗ Poor text extraction quality".to_string());
        return CategoryScore::new(score.max(10), feedback);
    }

    let sections_found = Section::ALL.iter().filter(|s| s.present_in(text)).count() as u32;
    score += (sections_found * 8).min(40);
    if sections_found >= 4 {
        feedback.push("✓ Good section structure".to_string());
    } else {
        feedback.push("⚠ Missing some standard sections".to_string());
    }

    let mut contact_score = 0;
    if EMAIL.is_match(text) {
        contact_score += 5;
    }
    if PHONE.is_match(text) {
        contact_score += 5;
    }
    if PROFILE_LINK.is_match(text) {
        contact_score += 5;
    }
    score += contact_score;
    if contact_score >= 10 {
        feedback.push("✓ Complete contact information".to_string());
    } else {
        feedback.push("⚠ Ensure all contact details are included".to_string());
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let non_empty = lines.iter().filter(|l| !l.trim().is_empty()).count();
    if non_empty as f64 / lines.len().max(1) as f64 > 0.7 {
        score += 10;
        feedback.push("✓ Clean formatting detected".to_string());
    }

    CategoryScore::new(score, feedback)
}
