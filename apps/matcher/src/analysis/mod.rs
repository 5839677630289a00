// Whole-resume quality analysis: five rule-based category analyzers, the
// narrative insights built on top of them, and the comprehensive report,
// comparison and batch ranking that tie everything together.

pub mod ats;
pub mod compare;
pub mod content;
pub mod grammar;
pub mod industry;
pub mod insights;
pub mod keywords;
pub mod report;
pub mod structure;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use report::ResumeAnalyzer;

/// Score (0 – 100) and human-readable feedback for one analysis category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: u32,
    pub feedback: Vec<String>,
}

impl CategoryScore {
    pub(crate) fn new(score: u32, feedback: Vec<String>) -> Self {
        Self {
            score: score.min(100),
            feedback,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section detection (shared by the ATS and structure analyzers)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
    Projects,
    Achievements,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Contact,
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Certifications,
        Section::Projects,
        Section::Achievements,
    ];

    fn pattern(self) -> &'static str {
        match self {
            Section::Contact => r"(?i)contact|phone|email|address|linkedin",
            Section::Summary => r"(?i)summary|profile|objective|about",
            Section::Experience => r"(?i)experience|employment|work|career|professional",
            Section::Education => r"(?i)education|academic|degree|university|college|school",
            Section::Skills => r"(?i)skills|competencies|technical|abilities",
            Section::Certifications => r"(?i)certification|license|credential",
            Section::Projects => r"(?i)projects|portfolio|work samples",
            Section::Achievements => r"(?i)achievement|award|recognition|honor",
        }
    }

    /// Any of the section's cue words appears, case-insensitively, anywhere in the text.
    pub fn present_in(self, text: &str) -> bool {
        SECTION_PATTERNS[self as usize].is_match(text)
    }
}

static SECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    Section::ALL
        .iter()
        .map(|s| Regex::new(s.pattern()).expect("section pattern is valid"))
        .collect()
});

pub(crate) static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").expect("email regex is valid")
});

pub(crate) static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").expect("phone regex is valid")
});

/// Number of non-overlapping matches of `re` in `text`.
pub(crate) fn count_matches(re: &Regex, text: &str) -> usize {
    re.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_match_case_insensitively() {
        assert!(Section::Experience.present_in("WORK HISTORY"));
        assert!(Section::Education.present_in("B.Sc., State University"));
        assert!(!Section::Certifications.present_in("Python developer"));
    }

    #[test]
    fn test_section_table_covers_every_section() {
        assert_eq!(SECTION_PATTERNS.len(), Section::ALL.len());
        for (i, section) in Section::ALL.iter().enumerate() {
            assert_eq!(*section as usize, i);
        }
    }

    #[test]
    fn test_contact_patterns() {
        assert!(EMAIL.is_match("reach me at jane.doe@example.com"));
        assert!(PHONE.is_match("555-123-4567"));
        assert!(PHONE.is_match("555.123.4567"));
        assert!(!PHONE.is_match("55-12-45"));
    }

    #[test]
    fn test_category_score_is_capped() {
        assert_eq!(CategoryScore::new(130, vec![]).score, 100);
    }
}
