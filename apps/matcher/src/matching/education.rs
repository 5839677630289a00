use crate::matching::engine::MatchEngine;
use crate::matching::{or_fallback, ScoringError};

pub const EDUCATION_NO_REQUIREMENT: f64 = 0.7;
pub const EDUCATION_FALLBACK: f64 = 0.6;

impl MatchEngine {
    /// Compares the highest credential named by each side. A job naming no
    /// credential scores 0.7 whatever the resume holds.
    pub fn try_education_match(&self, resume_text: &str, job_text: &str) -> Result<f64, ScoringError> {
        self.check_inputs(&[job_text])?;
        let table = &self.tables.education;
        let Some(required) = table.highest_level_in(&job_text.to_lowercase()) else {
            return Ok(EDUCATION_NO_REQUIREMENT);
        };

        self.check_inputs(&[resume_text])?;
        let held = table
            .highest_level_in(&resume_text.to_lowercase())
            .map_or(0, |level| level.rank());

        let score = if held >= required.rank() {
            1.0
        } else if held + 1 >= required.rank() {
            0.8
        } else {
            0.4
        };
        Ok(score)
    }

    pub fn education_match(&self, resume_text: &str, job_text: &str) -> f64 {
        or_fallback(
            "education",
            self.try_education_match(resume_text, job_text),
            EDUCATION_FALLBACK,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::tables::ScoringTables;
    use std::sync::Arc;

    #[test]
    fn test_higher_degree_satisfies_requirement() {
        let engine = MatchEngine::default();
        let score = engine.education_match(
            "MS in Computer Science",
            "Bachelor's degree in a related field required",
        );
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_no_requirement_is_fixed() {
        let engine = MatchEngine::default();
        for resume in ["", "PhD in physics", "Self-taught"] {
            assert_eq!(engine.education_match(resume, ""), EDUCATION_NO_REQUIREMENT);
            assert_eq!(
                engine.education_match(resume, "Backend engineer, remote"),
                EDUCATION_NO_REQUIREMENT
            );
        }
    }

    #[test]
    fn test_one_level_short() {
        let engine = MatchEngine::default();
        assert_eq!(engine.education_match("Bachelor of Science", "Master's preferred"), 0.8);
        assert_eq!(engine.education_match("Associate degree", "BSc required"), 0.8);
    }

    #[test]
    fn test_two_or_more_levels_short() {
        let engine = MatchEngine::default();
        assert_eq!(engine.education_match("Bootcamp certificate", "PhD required"), 0.4);
    }

    #[test]
    fn test_missing_credential_with_certificate_requirement() {
        // held rank 0 is exactly one below a certificate
        let engine = MatchEngine::default();
        assert_eq!(engine.education_match("Self-taught", "Certification required"), 0.8);
        assert_eq!(engine.education_match("Self-taught", "Bachelor required"), 0.4);
    }

    #[test]
    fn test_falls_back_on_oversized_input() {
        let engine = MatchEngine::new(Arc::new(ScoringTables::default()), 4);
        assert_eq!(
            engine.education_match("Master of Arts", "Bachelor required"),
            EDUCATION_FALLBACK
        );
    }

    #[test]
    fn test_no_requirement_ignores_resume_size() {
        let engine = MatchEngine::new(Arc::new(ScoringTables::default()), 16);
        let resume = "Senior Python developer, Master of Science in CS";
        assert_eq!(engine.education_match(resume, ""), EDUCATION_NO_REQUIREMENT);
        assert_eq!(engine.education_match(resume, "Friendly team"), EDUCATION_NO_REQUIREMENT);
        // a stated requirement still scans the resume
        assert_eq!(engine.education_match(resume, "BSc required"), EDUCATION_FALLBACK);
    }
}
