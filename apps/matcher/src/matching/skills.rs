//! Taxonomy-based skill coverage.

use serde::Serialize;

use crate::matching::engine::MatchEngine;
use crate::matching::{or_fallback, ScoringError};

/// Returned when the job asks for nothing in the taxonomy.
pub const SKILLS_NEUTRAL: f64 = 0.5;
pub const SKILLS_FALLBACK: f64 = 0.3;

/// Coverage of one category the job actually asks for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCoverage {
    pub category: String,
    pub required: Vec<String>,
    pub matched: Vec<String>,
    pub score: f64,
}

impl MatchEngine {
    /// Per-category coverage for every category with at least one job skill.
    pub fn try_skill_coverage(
        &self,
        resume_text: &str,
        job_text: &str,
    ) -> Result<Vec<CategoryCoverage>, ScoringError> {
        self.check_inputs(&[job_text])?;
        let job_lower = job_text.to_lowercase();

        let required: Vec<_> = self
            .tables
            .taxonomy
            .categories()
            .iter()
            .map(|category| (category, category.present_in(&job_lower)))
            .filter(|(_, job_skills)| !job_skills.is_empty())
            .collect();
        if required.is_empty() {
            return Ok(Vec::new());
        }

        self.check_inputs(&[resume_text])?;
        let resume_lower = resume_text.to_lowercase();

        let coverage = required
            .into_iter()
            .map(|(category, job_skills)| {
                let resume_skills = category.present_in(&resume_lower);
                let matched: Vec<String> = job_skills
                    .intersection(&resume_skills)
                    .map(|s| s.to_string())
                    .collect();
                CategoryCoverage {
                    category: category.name.clone(),
                    score: matched.len() as f64 / job_skills.len() as f64,
                    required: job_skills.iter().map(|s| s.to_string()).collect(),
                    matched,
                }
            })
            .collect();

        Ok(coverage)
    }

    /// Mean coverage over the categories the job requires.
    pub fn try_skills_match(&self, resume_text: &str, job_text: &str) -> Result<f64, ScoringError> {
        let coverage = self.try_skill_coverage(resume_text, job_text)?;
        if coverage.is_empty() {
            return Ok(SKILLS_NEUTRAL);
        }
        let total: f64 = coverage.iter().map(|c| c.score).sum();
        Ok(total / coverage.len() as f64)
    }

    pub fn skills_match(&self, resume_text: &str, job_text: &str) -> f64 {
        or_fallback(
            "skills",
            self.try_skills_match(resume_text, job_text),
            SKILLS_FALLBACK,
        )
    }
}
