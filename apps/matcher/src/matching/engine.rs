use std::sync::Arc;

use chrono::{Datelike, Utc};

use crate::config::DEFAULT_MAX_TEXT_BYTES;
use crate::matching::keywords::{self, ExtractionMode, KeywordSet};
use crate::matching::tables::ScoringTables;
use crate::matching::{or_fallback, ScoringError};

pub const KEYWORD_OVERLAP_NEUTRAL: f64 = 0.5;
pub const KEYWORD_OVERLAP_FALLBACK: f64 = 0.3;

/// Entry point of the scoring core. Cheap to clone; holds only shared
/// read-only tables and per-process limits, so concurrent callers need no locking.
///
/// The individual matchers live in sibling modules as `impl MatchEngine` blocks.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    pub(crate) tables: Arc<ScoringTables>,
    max_text_bytes: usize,
    /// Year that "present"/"current" resolves to in date ranges.
    pub(crate) reference_year: i32,
}

impl MatchEngine {
    pub fn new(tables: Arc<ScoringTables>, max_text_bytes: usize) -> Self {
        Self {
            tables,
            max_text_bytes,
            reference_year: Utc::now().year(),
        }
    }

    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    pub fn tables(&self) -> &ScoringTables {
        &self.tables
    }

    /// Rejects texts above the configured ceiling. Each matcher checks a text
    /// just before scanning it, after its job-side neutral short-circuit.
    pub(crate) fn check_inputs(&self, texts: &[&str]) -> Result<(), ScoringError> {
        for text in texts {
            if text.len() > self.max_text_bytes {
                return Err(ScoringError::InputTooLarge {
                    len: text.len(),
                    limit: self.max_text_bytes,
                });
            }
        }
        Ok(())
    }

    pub fn extract_job_keywords(&self, job_text: &str) -> KeywordSet {
        keywords::extract_keywords(job_text, ExtractionMode::JobDescription, &self.tables.stop_words)
    }

    pub fn extract_resume_keywords(&self, resume_text: &str) -> KeywordSet {
        keywords::extract_keywords(resume_text, ExtractionMode::Resume, &self.tables.stop_words)
    }

    /// |job ∩ resume| / |job| over the two extraction modes.
    pub fn try_keyword_overlap(&self, resume_text: &str, job_text: &str) -> Result<f64, ScoringError> {
        self.check_inputs(&[job_text])?;
        let job_keywords = self.extract_job_keywords(job_text);
        if job_keywords.is_empty() {
            return Ok(KEYWORD_OVERLAP_NEUTRAL);
        }

        self.check_inputs(&[resume_text])?;
        let resume_keywords = self.extract_resume_keywords(resume_text);

        Ok(job_keywords.overlap(&resume_keywords) as f64 / job_keywords.len() as f64)
    }

    pub fn keyword_overlap(&self, resume_text: &str, job_text: &str) -> f64 {
        or_fallback(
            "keyword overlap",
            self.try_keyword_overlap(resume_text, job_text),
            KEYWORD_OVERLAP_FALLBACK,
        )
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(Arc::new(ScoringTables::default()), DEFAULT_MAX_TEXT_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_overlap_ratio() {
        let engine = MatchEngine::default();
        let score = engine.keyword_overlap(
            "Python and AWS engineer",
            "Python, Docker, AWS and Kubernetes required.",
        );
        assert!((score - 0.5).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_keyword_overlap_neutral_without_job_keywords() {
        let engine = MatchEngine::default();
        assert_eq!(engine.keyword_overlap("Python developer", "We are hiring."), 0.5);
        assert_eq!(engine.keyword_overlap("Python developer", ""), 0.5);
    }

    #[test]
    fn test_keyword_overlap_falls_back_on_oversized_input() {
        let engine = MatchEngine::new(Arc::new(ScoringTables::default()), 16);
        let err = engine
            .try_keyword_overlap("a resume far longer than sixteen bytes", "python")
            .unwrap_err();
        assert!(matches!(err, ScoringError::InputTooLarge { limit: 16, .. }));
        assert_eq!(
            engine.keyword_overlap("a resume far longer than sixteen bytes", "python"),
            KEYWORD_OVERLAP_FALLBACK
        );
    }

    #[test]
    fn test_keyword_overlap_neutral_ignores_resume_size() {
        let engine = MatchEngine::new(Arc::new(ScoringTables::default()), 16);
        let resume = "a resume far longer than sixteen bytes";
        assert_eq!(engine.keyword_overlap(resume, ""), KEYWORD_OVERLAP_NEUTRAL);
        assert_eq!(engine.keyword_overlap(resume, "We are hiring."), KEYWORD_OVERLAP_NEUTRAL);
    }

    #[test]
    fn test_engine_clones_share_tables() {
        let engine = MatchEngine::default();
        let clone = engine.clone();
        assert!(Arc::ptr_eq(&engine.tables, &clone.tables));
    }
}
