use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::industry::best_industry_presence;
use crate::analysis::{count_matches, CategoryScore};
use crate::matching::composite::JobMatchOutcome;
use crate::matching::MatchEngine;
use crate::text::words;

/// Acronyms, dotted names, years of experience, versions and language suffixes.
static TECH_VOCABULARY: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b[A-Z]{2,}\b",
        r"\b\w+\.\w+\b",
        r"\b\d+\+?\s*years?\b",
        r"\b(?:v\d+|\d+\.\d+)\b",
        r"\b\w+(?:js|py|cpp|cs)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("tech vocabulary pattern is valid"))
    .collect()
});

const TECH_TERMS: &[&str] = &[
    "api", "framework", "library", "database", "cloud", "devops", "agile", "scrum",
    "microservices", "container", "deployment", "ci/cd", "testing", "automation",
];

/// Pattern hits plus distinct tech terms present.
pub fn technical_term_count(text: &str) -> usize {
    let text_lower = text.to_lowercase();
    let pattern_hits: usize = TECH_VOCABULARY.iter().map(|re| count_matches(re, text)).sum();
    let term_hits = TECH_TERMS.iter().filter(|t| text_lower.contains(**t)).count();
    pattern_hits + term_hits
}

/// Frequency of the most common word over all words; `None` when the text
/// has no meaningful (non-stop-word, 3+ character) words.
pub fn max_keyword_density(engine: &MatchEngine, text_lower: &str) -> Option<f64> {
    let tokens = words(text_lower);
    let stop_words = &engine.tables().stop_words;
    let meaningful = tokens
        .iter()
        .any(|w| w.chars().count() > 2 && !stop_words.contains(w));
    if !meaningful {
        return None;
    }

    let mut freq: HashMap<&str, usize> = HashMap::new();
    for token in &tokens {
        *freq.entry(token).or_insert(0) += 1;
    }
    let max = freq.values().copied().max().unwrap_or(0);
    Some(max as f64 / tokens.len() as f64)
}

/// Job alignment, industry vocabulary, technical vocabulary and keyword density.
pub fn analyze_keywords(engine: &MatchEngine, text: &str, job_description: &str) -> CategoryScore {
    let mut score = 0;
    let mut feedback = Vec::new();
    let text_lower = text.to_lowercase();

    if !job_description.trim().is_empty() {
        match engine.generate_job_match_insights(text, job_description) {
            JobMatchOutcome::Analyzed(report) => {
                score += (report.overall_match * 0.4) as u32;
                feedback.push(format!(
                    "✓ Job Match: {} ({}%)",
                    report.match_level.level, report.overall_match
                ));
                feedback.push(format!(
                    "• Keyword Match: {}%",
                    report.component_scores.keyword_match
                ));
                feedback.push(format!(
                    "• Skills Match: {}%",
                    report.component_scores.skills_match
                ));
                if !report.missing_keywords.is_empty() {
                    let shown: Vec<&str> = report
                        .missing_keywords
                        .iter()
                        .take(5)
                        .map(String::as_str)
                        .collect();
                    feedback.push(format!("⚠ Missing keywords: {}", shown.join(", ")));
                }
                if report.overall_match < 60.0 {
                    feedback.push("⚠ Consider adding more job-relevant keywords and skills".to_string());
                } else if report.overall_match >= 80.0 {
                    feedback.push("✓ Excellent alignment with job requirements".to_string());
                }
            }
            JobMatchOutcome::NoJobDescription { .. } => {
                let similarity = engine.lexical_similarity(text, job_description);
                score += (similarity * 100.0 * 0.4) as u32;
                if similarity > 0.3 {
                    feedback.push("✓ Good job description alignment".to_string());
                } else {
                    feedback.push("⚠ Low job description match - add relevant keywords".to_string());
                }
            }
        }
    }

    let (industry, presence) = best_industry_presence(&text_lower);
    let hits = presence as u32;
    if presence > 5.0 {
        score += 25;
        feedback.push(format!("✓ Excellent {industry} keyword presence ({hits} matches)"));
    } else if presence > 3.0 {
        score += 20;
        feedback.push(format!("✓ Strong {industry} keyword presence ({hits} matches)"));
    } else if presence > 1.0 {
        score += 10;
        feedback.push(format!("⚠ Some {industry} keywords found ({hits} matches)"));
    } else {
        feedback.push("⚠ Add more industry-specific keywords".to_string());
    }

    let tech = technical_term_count(text);
    if tech > 15 {
        score += 25;
        feedback.push(format!("✓ Rich technical vocabulary ({tech} technical terms)"));
    } else if tech > 10 {
        score += 20;
        feedback.push(format!("✓ Good technical vocabulary ({tech} technical terms)"));
    } else if tech > 5 {
        score += 10;
        feedback.push(format!("⚠ Consider adding more technical terms ({tech} found)"));
    } else {
        feedback.push("⚠ Add more technical terminology".to_string());
    }

    if let Some(density) = max_keyword_density(engine, &text_lower) {
        if density < 0.03 {
            score += 10;
            feedback.push("✓ Natural keyword distribution".to_string());
        } else if density < 0.05 {
            score += 5;
            feedback.push("⚠ Watch keyword density".to_string());
        } else {
            feedback.push("⚠ Avoid keyword stuffing - vary your vocabulary".to_string());
        }
    }

    CategoryScore::new(score, feedback)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str =
        "Senior Python developer with 7 years of experience building REST APIs with Django and AWS.";
    const JOB: &str =
        "Looking for a backend engineer with 5+ years experience, Python, Django, AWS, and Docker required.";

    #[test]
    fn test_technical_term_count() {
        // REST, AWS, "7 years", plus the term "api" inside "apis"
        assert_eq!(technical_term_count(RESUME), 4);
        // AWS, Node.js, React.js, v18
        assert_eq!(technical_term_count("Node.js v18 and React.js on AWS"), 4);
    }

    #[test]
    fn test_job_match_feedback_leads() {
        let engine = MatchEngine::default();
        let result = analyze_keywords(&engine, RESUME, JOB);
        assert_eq!(result.feedback[0], "✓ Job Match: Good Match (61.5%)");
        assert_eq!(result.feedback[1], "• Keyword Match: 60%");
        assert!(result
            .feedback
            .contains(&"⚠ Missing keywords: backend, docker".to_string()));
    }

    #[test]
    fn test_job_match_points() {
        let engine = MatchEngine::default();
        let with_job = analyze_keywords(&engine, RESUME, JOB).score;
        let without_job = analyze_keywords(&engine, RESUME, "").score;
        // 61.5 * 0.4, truncated
        assert_eq!(with_job - without_job, 24);
    }

    #[test]
    fn test_whitespace_job_earns_no_alignment_points() {
        let engine = MatchEngine::default();
        let blank = analyze_keywords(&engine, RESUME, "\n  \t");
        assert_eq!(blank.score, analyze_keywords(&engine, RESUME, "").score);
        assert!(!blank
            .feedback
            .iter()
            .any(|f| f.contains("job description alignment")));
    }

    #[test]
    fn test_keyword_stuffing_is_flagged() {
        let engine = MatchEngine::default();
        let result = analyze_keywords(&engine, "python python python python developer", "");
        assert!(result
            .feedback
            .contains(&"⚠ Avoid keyword stuffing - vary your vocabulary".to_string()));
    }

    #[test]
    fn test_density_requires_meaningful_words() {
        let engine = MatchEngine::default();
        assert_eq!(max_keyword_density(&engine, "the and of it"), None);
        assert_eq!(max_keyword_density(&engine, "rust rust go"), Some(2.0 / 3.0));
    }
}
