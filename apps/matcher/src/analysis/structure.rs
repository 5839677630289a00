use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::{CategoryScore, Section};

pub const REQUIRED_SECTIONS: [Section; 4] = [
    Section::Contact,
    Section::Experience,
    Section::Education,
    Section::Skills,
];

pub const OPTIONAL_SECTIONS: [Section; 4] = [
    Section::Summary,
    Section::Certifications,
    Section::Projects,
    Section::Achievements,
];

static TITLE_CASE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*:?$").expect("header regex is valid")
});

/// All-caps, Title Case (optionally colon-terminated), or markdown-style.
pub fn is_header_line(line: &str) -> bool {
    let has_cased = line.chars().any(|c| c.is_uppercase() || c.is_lowercase());
    let all_caps = has_cased && !line.chars().any(char::is_lowercase);
    all_caps
        || TITLE_CASE_HEADER.is_match(line)
        || line.starts_with("##")
        || line.starts_with("**")
}

pub fn analyze_structure_completeness(text: &str) -> CategoryScore {
    let mut feedback = Vec::new();

    let found_required = REQUIRED_SECTIONS.iter().filter(|s| s.present_in(text)).count();
    let found_optional = OPTIONAL_SECTIONS.iter().filter(|s| s.present_in(text)).count() as u32;

    // Required sections share 50 points; halves round up.
    let mut score = (found_required as f64 / REQUIRED_SECTIONS.len() as f64 * 50.0).round() as u32;
    if found_required == REQUIRED_SECTIONS.len() {
        feedback.push("✓ All required sections present".to_string());
    } else {
        let missing = REQUIRED_SECTIONS.len() - found_required;
        feedback.push(format!("⚠ Missing {missing} required section(s)"));
    }

    score += (found_optional * 8).min(30);
    if found_optional >= 2 {
        feedback.push("✓ Good section variety".to_string());
    }

    let headers = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && is_header_line(l))
        .count();
    if headers >= 3 {
        score += 20;
        feedback.push("✓ Clear section organization".to_string());
    } else {
        feedback.push("⚠ Add clear section headers".to_string());
    }

    CategoryScore::new(score, feedback)
}
