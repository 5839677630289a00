//! Industry vocabularies, action-verb categories and industry detection.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::AppError;

/// Declaration order breaks ties in detection.
pub const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "technology",
        &[
            "python", "java", "javascript", "react", "node.js", "aws", "docker", "kubernetes",
            "api", "database",
        ],
    ),
    (
        "marketing",
        &[
            "seo", "sem", "social media", "analytics", "campaign", "brand", "content", "digital",
            "roi", "conversion",
        ],
    ),
    (
        "finance",
        &[
            "financial", "accounting", "budget", "audit", "compliance", "risk", "investment",
            "excel", "modeling",
        ],
    ),
    (
        "healthcare",
        &[
            "patient", "clinical", "medical", "treatment", "diagnosis", "healthcare", "hipaa",
            "emr", "quality",
        ],
    ),
    (
        "sales",
        &[
            "sales", "revenue", "quota", "pipeline", "crm", "prospecting", "closing",
            "relationship", "targets",
        ],
    ),
];

pub const ACTION_VERBS: &[(&str, &[&str])] = &[
    (
        "leadership",
        &["led", "managed", "directed", "supervised", "coordinated", "guided", "mentored", "coached"],
    ),
    (
        "achievement",
        &["achieved", "accomplished", "delivered", "exceeded", "surpassed", "completed", "finished"],
    ),
    (
        "creation",
        &["created", "developed", "designed", "built", "established", "founded", "launched", "initiated"],
    ),
    (
        "improvement",
        &["improved", "enhanced", "optimized", "streamlined", "upgraded", "modernized", "transformed"],
    ),
    (
        "analysis",
        &["analyzed", "evaluated", "assessed", "investigated", "researched", "examined", "studied"],
    ),
    (
        "communication",
        &["presented", "communicated", "negotiated", "collaborated", "facilitated", "consulted"],
    ),
];

pub fn keywords_for(industry: &str) -> Option<&'static [&'static str]> {
    INDUSTRY_KEYWORDS
        .iter()
        .find(|(name, _)| *name == industry)
        .map(|(_, keywords)| *keywords)
}

/// Industry whose vocabulary has the most full hits in the text.
pub fn detect_industry(text: &str) -> &'static str {
    let text_lower = text.to_lowercase();
    let mut best = INDUSTRY_KEYWORDS[0].0;
    let mut best_hits = 0;
    for &(industry, keywords) in INDUSTRY_KEYWORDS {
        let hits = keywords.iter().filter(|k| text_lower.contains(**k)).count();
        if hits > best_hits {
            best = industry;
            best_hits = hits;
        }
    }
    best
}

/// Best industry by weighted presence: a full keyword hit counts 1, a hit on
/// any single word of a multi-word keyword counts 0.5.
pub fn best_industry_presence(text_lower: &str) -> (&'static str, f64) {
    let mut best = (INDUSTRY_KEYWORDS[0].0, 0.0);
    for &(industry, keywords) in INDUSTRY_KEYWORDS {
        let presence: f64 = keywords
            .iter()
            .map(|k| {
                if text_lower.contains(*k) {
                    1.0
                } else if k.split_whitespace().any(|part| text_lower.contains(part)) {
                    0.5
                } else {
                    0.0
                }
            })
            .sum();
        if presence > best.1 {
            best = (industry, presence);
        }
    }
    best
}

/// Count of action verbs (across all categories) that occur in the text.
pub fn action_verb_count(text_lower: &str) -> usize {
    ACTION_VERBS
        .iter()
        .flat_map(|(_, verbs)| verbs.iter())
        .filter(|verb| text_lower.contains(**verb))
        .count()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryKeywords {
    pub industry: String,
    pub keywords: Vec<String>,
    pub action_verbs: BTreeMap<String, Vec<String>>,
}

/// Keyword suggestions for one industry. Lookup is case-insensitive.
pub fn industry_keywords(industry: &str) -> Result<IndustryKeywords, AppError> {
    let keywords = keywords_for(&industry.to_lowercase()).ok_or_else(|| {
        let available: Vec<&str> = INDUSTRY_KEYWORDS.iter().map(|(name, _)| *name).collect();
        AppError::NotFound(format!(
            "Industry '{industry}' not found. Available: {}",
            available.join(", ")
        ))
    })?;

    Ok(IndustryKeywords {
        industry: industry.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        action_verbs: ACTION_VERBS
            .iter()
            .map(|(category, verbs)| {
                (
                    category.to_string(),
                    verbs.iter().map(|v| v.to_string()).collect(),
                )
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_industry_picks_most_hits() {
        assert_eq!(
            detect_industry("Managed patient care, clinical trials and diagnosis workflows"),
            "healthcare"
        );
        assert_eq!(detect_industry("Grew revenue and beat quota via CRM pipeline"), "sales");
    }

    #[test]
    fn test_detect_industry_ties_go_to_declaration_order() {
        assert_eq!(detect_industry("Knitting and gardening"), "technology");
    }

    #[test]
    fn test_partial_multiword_hits_count_half() {
        let (industry, presence) = best_industry_presence("seo and social campaigns");
        assert_eq!(industry, "marketing");
        // seo 1, social media 0.5, campaign 1
        assert_eq!(presence, 2.5);
    }

    #[test]
    fn test_industry_keywords_lookup_is_case_insensitive() {
        let kw = industry_keywords("Finance").unwrap();
        assert_eq!(kw.industry, "Finance");
        assert!(kw.keywords.contains(&"audit".to_string()));
        assert_eq!(kw.action_verbs.len(), 6);
        assert!(kw.action_verbs["leadership"].contains(&"mentored".to_string()));
    }

    #[test]
    fn test_unknown_industry_lists_available() {
        let err = industry_keywords("astrology").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let message = err.to_string();
        assert!(message.contains("astrology"));
        assert!(message.contains("technology, marketing, finance, healthcare, sales"));
    }

    #[test]
    fn test_action_verb_count() {
        assert_eq!(action_verb_count("designed and launched; mentored interns"), 3);
        assert_eq!(action_verb_count(""), 0);
    }
}
