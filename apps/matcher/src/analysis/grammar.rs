use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::{count_matches, CategoryScore};
use crate::text::sentences;

const BASELINE: i32 = 80;

const COMMON_MISSPELLINGS: &[(&str, &str)] = &[
    ("recieve", "receive"),
    ("seperate", "separate"),
    ("definately", "definitely"),
    ("occured", "occurred"),
    ("begining", "beginning"),
    ("managment", "management"),
    ("enviroment", "environment"),
    ("sucessful", "successful"),
];

/// Lower-case "i am", runs of whitespace, repeated terminal punctuation and
/// whitespace before punctuation.
static GRAMMAR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"\bi\s+am\b", r"\s{2,}", r"[.!?]{2,}", r"\s+[.!?]"]
        .iter()
        .map(|p| Regex::new(p).expect("grammar pattern is valid"))
        .collect()
});

static ACRONYM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,}\b").expect("acronym regex is valid"));

pub fn misspellings_in(text: &str) -> Vec<(&'static str, &'static str)> {
    let text_lower = text.to_lowercase();
    COMMON_MISSPELLINGS
        .iter()
        .filter(|(wrong, _)| text_lower.contains(wrong))
        .copied()
        .collect()
}

pub fn grammar_issue_count(text: &str) -> usize {
    GRAMMAR_PATTERNS.iter().map(|re| count_matches(re, text)).sum()
}

/// Share of sentences that do not open with an upper-case letter.
pub fn capitalization_error_ratio(text: &str) -> f64 {
    let sentences = sentences(text);
    let errors = sentences
        .iter()
        .filter(|s| !s.chars().next().is_some_and(char::is_uppercase))
        .count();
    errors as f64 / sentences.len().max(1) as f64
}

pub fn analyze_grammar_spelling(text: &str) -> CategoryScore {
    let mut score = BASELINE;
    let mut feedback = Vec::new();

    let total_errors = misspellings_in(text).len() + grammar_issue_count(text);
    if total_errors == 0 {
        feedback.push("✓ Excellent grammar and spelling".to_string());
    } else if total_errors <= 3 {
        score -= 10;
        feedback.push("⚠ Minor grammar/spelling issues detected".to_string());
    } else {
        score -= 25;
        feedback.push("✗ Multiple grammar/spelling issues found".to_string());
    }

    if ACRONYM.is_match(text) {
        feedback.push("✓ Proper use of acronyms".to_string());
    }

    if capitalization_error_ratio(text) < 0.1 {
        feedback.push("✓ Good capitalization".to_string());
    } else {
        score -= 10;
        feedback.push("⚠ Check sentence capitalization".to_string());
    }

    CategoryScore::new(score.clamp(0, 100) as u32, feedback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_keeps_baseline() {
        let result = analyze_grammar_spelling("Built REST services in Rust. Shipped weekly releases.");
        assert_eq!(result.score, 80);
        assert!(result.feedback.contains(&"✓ Proper use of acronyms".to_string()));
    }

    #[test]
    fn test_minor_issues() {
        let result = analyze_grammar_spelling("Improved deployment managment. Reduced toil !");
        // one misspelling, one space before punctuation
        assert_eq!(result.score, 70);
    }

    #[test]
    fn test_many_issues_and_lowercase_sentences() {
        let text = "i am an engineer.. we recieve  tickets . it definately occured!!";
        let result = analyze_grammar_spelling(text);
        assert_eq!(result.score, 45);
        assert!(result.feedback.contains(&"⚠ Check sentence capitalization".to_string()));
    }

    #[test]
    fn test_misspellings_report_corrections() {
        assert_eq!(
            misspellings_in("A sucessful launch"),
            vec![("sucessful", "successful")]
        );
    }

    #[test]
    fn test_capitalization_ratio() {
        assert_eq!(capitalization_error_ratio("Good. bad. Fine."), 1.0 / 3.0);
        assert_eq!(capitalization_error_ratio(""), 0.0);
    }
}
