//! Composite scorer: blends the five component signals into one weighted
//! match, maps it to a tier and derives gap-driven recommendations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::engine::MatchEngine;
use crate::text::round1;

pub const MAX_MISSING_KEYWORDS: usize = 15;
pub const MAX_SUGGESTED_KEYWORDS: usize = 10;
pub const NO_JOB_DESCRIPTION: &str = "No job description provided for matching analysis";

// ────────────────────────────────────────────────────────────────────────────
// Components and weights
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchWeights {
    pub lexical: f64,
    pub keyword_overlap: f64,
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

/// Keyword and skill presence dominate tenure and credentials.
pub const MATCH_WEIGHTS: MatchWeights = MatchWeights {
    lexical: 0.25,
    keyword_overlap: 0.30,
    skills: 0.25,
    experience: 0.10,
    education: 0.10,
};

impl MatchWeights {
    #[cfg(test)]
    pub fn total(&self) -> f64 {
        self.lexical + self.keyword_overlap + self.skills + self.experience + self.education
    }
}

/// The five component scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchComponents {
    pub lexical: f64,
    pub keyword_overlap: f64,
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

impl MatchComponents {
    pub fn overall(&self) -> f64 {
        self.weighted(&MATCH_WEIGHTS)
    }

    pub fn weighted(&self, w: &MatchWeights) -> f64 {
        w.lexical * self.lexical
            + w.keyword_overlap * self.keyword_overlap
            + w.skills * self.skills
            + w.experience * self.experience
            + w.education * self.education
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tiers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl MatchTier {
    /// Breakpoints are inclusive lower bounds.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Excellent
        } else if score >= 0.6 {
            Self::Good
        } else if score >= 0.4 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent Match",
            Self::Good => "Good Match",
            Self::Moderate => "Moderate Match",
            Self::Low => "Low Match",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Excellent => "Your resume strongly aligns with the job requirements",
            Self::Good => "Your resume shows good alignment with some areas for improvement",
            Self::Moderate => "Your resume has potential but needs significant optimization",
            Self::Low => "Your resume requires major updates to align with this job",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Excellent => "green",
            Self::Good => "blue",
            Self::Moderate => "orange",
            Self::Low => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchLevel {
    pub level: String,
    pub description: String,
    pub color: String,
}

impl From<MatchTier> for MatchLevel {
    fn from(tier: MatchTier) -> Self {
        Self {
            level: tier.label().to_string(),
            description: tier.description().to_string(),
            color: tier.color().to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Report
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub priority: Priority,
    pub suggestion: String,
}

impl Recommendation {
    fn new(category: &str, priority: Priority, suggestion: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            priority,
            suggestion: suggestion.into(),
        }
    }
}

/// Percentages, one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub keyword_match: f64,
    pub skills_match: f64,
    pub experience_match: f64,
    pub education_match: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatchReport {
    pub overall_match: f64, // 0 – 100, one decimal
    pub component_scores: ComponentScores,
    pub missing_keywords: Vec<String>, // sorted, at most 15
    pub recommendations: Vec<Recommendation>,
    pub match_level: MatchLevel,
}

/// Either a populated report or the no-job-description sentinel. Callers must
/// branch before reading scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobMatchOutcome {
    Analyzed(JobMatchReport),
    NoJobDescription { error: String },
}

impl JobMatchOutcome {
    pub fn no_job_description() -> Self {
        Self::NoJobDescription {
            error: NO_JOB_DESCRIPTION.to_string(),
        }
    }

    pub fn report(&self) -> Option<&JobMatchReport> {
        match self {
            Self::Analyzed(report) => Some(report),
            Self::NoJobDescription { .. } => None,
        }
    }
}

/// Gap-driven advice, one entry per component below its threshold.
pub fn recommendations_for(components: &MatchComponents, missing_keywords: &[String]) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if components.keyword_overlap < 0.6 {
        let shown: Vec<&str> = missing_keywords
            .iter()
            .take(MAX_SUGGESTED_KEYWORDS)
            .map(String::as_str)
            .collect();
        recommendations.push(Recommendation::new(
            "Keywords",
            Priority::High,
            format!("Add missing keywords: {}", shown.join(", ")),
        ));
    }

    if components.skills < 0.7 {
        recommendations.push(Recommendation::new(
            "Skills",
            Priority::High,
            "Highlight more relevant technical skills mentioned in the job description",
        ));
    }

    if components.experience < 0.8 {
        recommendations.push(Recommendation::new(
            "Experience",
            Priority::Medium,
            "Emphasize relevant work experience and projects that align with job requirements",
        ));
    }

    recommendations
}

// ────────────────────────────────────────────────────────────────────────────
// Engine entry points
// ────────────────────────────────────────────────────────────────────────────

impl MatchEngine {
    pub fn match_components(&self, resume_text: &str, job_text: &str) -> MatchComponents {
        MatchComponents {
            lexical: self.lexical_similarity(resume_text, job_text),
            keyword_overlap: self.keyword_overlap(resume_text, job_text),
            skills: self.skills_match(resume_text, job_text),
            experience: self.experience_match(resume_text, job_text),
            education: self.education_match(resume_text, job_text),
        }
    }

    /// Weighted blend of all five components, in [0, 1].
    pub fn text_similarity(&self, resume_text: &str, job_text: &str) -> f64 {
        self.match_components(resume_text, job_text).overall()
    }

    pub fn generate_job_match_insights(&self, resume_text: &str, job_text: &str) -> JobMatchOutcome {
        if job_text.trim().is_empty() {
            return JobMatchOutcome::no_job_description();
        }

        let components = self.match_components(resume_text, job_text);
        let overall = components.overall();

        let job_keywords = self.extract_job_keywords(job_text);
        let resume_keywords = self.extract_resume_keywords(resume_text);
        let mut missing_keywords = job_keywords.missing_from(&resume_keywords);
        let recommendations = recommendations_for(&components, &missing_keywords);
        missing_keywords.truncate(MAX_MISSING_KEYWORDS);

        let tier = MatchTier::from_score(overall);
        debug!(
            "job match {:.3} ({}) from {:?}",
            overall,
            tier.label(),
            components
        );

        JobMatchOutcome::Analyzed(JobMatchReport {
            overall_match: round1(overall * 100.0),
            component_scores: ComponentScores {
                keyword_match: round1(components.keyword_overlap * 100.0),
                skills_match: round1(components.skills * 100.0),
                experience_match: round1(components.experience * 100.0),
                education_match: round1(components.education * 100.0),
            },
            missing_keywords,
            recommendations,
            match_level: tier.into(),
        })
    }
}
