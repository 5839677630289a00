use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::industry::action_verb_count;
use crate::analysis::{count_matches, CategoryScore};
use crate::text::{sentences, words};

/// Percentages, dollar amounts, counted audiences and achievement verbs.
static QUANTIFIERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\d+%",
        r"\$\d+[,\d]*",
        r"(?i)\d+[,\d]*\+?\s*(?:users|customers|employees|projects)",
        r"(?i)increased|decreased|improved|reduced.*?\d+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("quantifier pattern is valid"))
    .collect()
});

const INFORMAL_WORDS: &[&str] = &["awesome", "cool", "stuff", "things", "got", "gonna", "wanna"];

/// Number of quantified-achievement markers in the text.
pub fn quantified_achievements(text: &str) -> usize {
    QUANTIFIERS.iter().map(|re| count_matches(re, text)).sum()
}

/// Mean words per sentence; 0 for text without sentences.
pub fn average_sentence_length(text: &str) -> f64 {
    let sentences = sentences(text);
    let total: usize = sentences.iter().map(|s| words(s).len()).sum();
    total as f64 / sentences.len().max(1) as f64
}

/// Length, action verbs, metrics, sentence rhythm and register.
pub fn analyze_content_quality(text: &str) -> CategoryScore {
    let mut score = 0;
    let mut feedback = Vec::new();
    let text_lower = text.to_lowercase();
    let tokens = words(&text_lower);

    let word_count = tokens.len();
    if (300..=800).contains(&word_count) {
        score += 20;
        feedback.push("✓ Optimal length".to_string());
    } else if word_count < 300 {
        score += 10;
        feedback.push("⚠ Consider adding more detail".to_string());
    } else {
        score += 15;
        feedback.push("⚠ Consider condensing content".to_string());
    }

    let verbs = action_verb_count(&text_lower);
    if verbs >= 10 {
        score += 25;
        feedback.push("✓ Strong use of action verbs".to_string());
    } else if verbs >= 5 {
        score += 15;
        feedback.push("⚠ Good action verb usage".to_string());
    } else {
        feedback.push("✗ Add more action verbs".to_string());
    }

    let quantified = quantified_achievements(text);
    if quantified >= 5 {
        score += 25;
        feedback.push("✓ Excellent use of metrics".to_string());
    } else if quantified >= 2 {
        score += 15;
        feedback.push("⚠ Good quantifiable achievements".to_string());
    } else {
        feedback.push("⚠ Add more quantifiable results".to_string());
    }

    let avg = average_sentence_length(text);
    if (15.0..=25.0).contains(&avg) {
        score += 15;
        feedback.push("✓ Good sentence structure".to_string());
    } else {
        feedback.push("⚠ Vary sentence length for readability".to_string());
    }

    // whole words only; "school" is not "cool"
    let informal = INFORMAL_WORDS.iter().any(|w| tokens.contains(w));
    if informal {
        feedback.push("⚠ Use more formal language".to_string());
    } else {
        score += 15;
        feedback.push("✓ Professional language".to_string());
    }

    CategoryScore::new(score, feedback)
}
