use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::ats::analyze_ats_compatibility;
use crate::analysis::content::analyze_content_quality;
use crate::analysis::grammar::analyze_grammar_spelling;
use crate::analysis::insights::{generate_detailed_insights, DetailedInsights, InsightScores};
use crate::analysis::keywords::analyze_keywords;
use crate::analysis::structure::analyze_structure_completeness;
use crate::errors::AppError;
use crate::matching::composite::JobMatchReport;
use crate::matching::tables::ScoringTables;
use crate::matching::MatchEngine;
use crate::text::{round1, sentences, words};

/// Trimmed resumes shorter than this are rejected as unreadable.
pub const MIN_RESUME_CHARS: usize = 50;

pub const ANALYSIS_METHOD: &str = "Advanced Analysis";

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// One value per analysis category, keyed by the category's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerCategory<T> {
    #[serde(rename = "ATS Compatibility")]
    pub ats: T,
    #[serde(rename = "Keyword Optimization")]
    pub keywords: T,
    #[serde(rename = "Content Quality")]
    pub content: T,
    #[serde(rename = "Grammar & Spelling")]
    pub grammar: T,
    #[serde(rename = "Structure & Completeness")]
    pub structure: T,
}

impl<T> PerCategory<T> {
    pub const NAMES: [&'static str; 5] = [
        "ATS Compatibility",
        "Keyword Optimization",
        "Content Quality",
        "Grammar & Spelling",
        "Structure & Completeness",
    ];

    /// Display name and value, in report order.
    pub fn entries(&self) -> [(&'static str, &T); 5] {
        [
            (Self::NAMES[0], &self.ats),
            (Self::NAMES[1], &self.keywords),
            (Self::NAMES[2], &self.content),
            (Self::NAMES[3], &self.grammar),
            (Self::NAMES[4], &self.structure),
        ]
    }

    /// Pairs this category set with another, field by field.
    pub fn zip_with<U, V>(&self, other: &PerCategory<U>, f: impl Fn(&T, &U) -> V) -> PerCategory<V> {
        PerCategory {
            ats: f(&self.ats, &other.ats),
            keywords: f(&self.keywords, &other.keywords),
            content: f(&self.content, &other.content),
            grammar: f(&self.grammar, &other.grammar),
            structure: f(&self.structure, &other.structure),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub readability_score: f64, // 0 – 100
    pub analysis_time_seconds: f64,
    pub text_similarity_to_job: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub overall_score: f64,
    pub score_level: String,
    pub score_color: String,
    pub detailed_scores: PerCategory<u32>,
    pub feedback: PerCategory<Vec<String>>,
    pub detailed_insights: DetailedInsights,
    pub analysis_method: String,
    pub word_count: usize,
    pub analysis_timestamp: DateTime<Utc>,
    pub metrics: AnalysisMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_match_analysis: Option<JobMatchReport>,
}

/// Overall resume grade: (level, color).
pub fn score_level(overall: f64) -> (&'static str, &'static str) {
    if overall >= 85.0 {
        ("Excellent", "green")
    } else if overall >= 70.0 {
        ("Good", "blue")
    } else if overall >= 55.0 {
        ("Fair", "orange")
    } else {
        ("Needs Improvement", "red")
    }
}

/// Words-per-sentence mapped onto 0 – 100, centred on 10 words = 50.
pub fn readability_score(avg_sentence_length: f64) -> f64 {
    ((avg_sentence_length - 10.0) * 5.0 + 50.0).clamp(0.0, 100.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Analyzer
// ────────────────────────────────────────────────────────────────────────────

/// Runs every category analyzer plus the job-match pipeline over one resume.
#[derive(Debug, Clone)]
pub struct ResumeAnalyzer {
    engine: MatchEngine,
}

impl ResumeAnalyzer {
    pub fn new(engine: MatchEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    fn tables(&self) -> &ScoringTables {
        self.engine.tables()
    }

    pub fn analyze_resume_comprehensive(
        &self,
        text: &str,
        job_description: &str,
        filename: &str,
    ) -> Result<AnalysisReport, AppError> {
        if text.trim().chars().count() < MIN_RESUME_CHARS {
            return Err(AppError::Validation(
                "Resume content appears to be too short or unreadable.".to_string(),
            ));
        }

        let started = Instant::now();

        let ats = analyze_ats_compatibility(text, filename);
        let keywords = analyze_keywords(&self.engine, text, job_description);
        let content = analyze_content_quality(text);
        let grammar = analyze_grammar_spelling(text);
        let structure = analyze_structure_completeness(text);

        let detailed_insights = generate_detailed_insights(
            text,
            job_description,
            InsightScores {
                ats: ats.score,
                keywords: keywords.score,
                content: content.score,
            },
            &self.tables().stop_words,
        );

        let detailed_scores = PerCategory {
            ats: ats.score,
            keywords: keywords.score,
            content: content.score,
            grammar: grammar.score,
            structure: structure.score,
        };
        let total: u32 = detailed_scores.entries().iter().map(|(_, s)| **s).sum();
        let overall = total as f64 / PerCategory::<u32>::NAMES.len() as f64;
        let (level, color) = score_level(overall);

        let word_count = words(text).len();
        let sentence_count = sentences(text).len();
        let avg_sentence_length = word_count as f64 / sentence_count.max(1) as f64;

        let (job_match_analysis, text_similarity_to_job) = if job_description.trim().is_empty() {
            (None, 0.0)
        } else {
            let report = self
                .engine
                .generate_job_match_insights(text, job_description)
                .report()
                .cloned();
            (report, self.engine.text_similarity(text, job_description))
        };

        let elapsed = started.elapsed().as_secs_f64();
        let metrics = AnalysisMetrics {
            word_count,
            sentence_count,
            avg_sentence_length,
            readability_score: readability_score(avg_sentence_length),
            analysis_time_seconds: (elapsed * 100.0).round() / 100.0,
            text_similarity_to_job,
        };

        let analysis_id = Uuid::new_v4();
        info!(
            "resume analysis {} finished: overall {:.1} ({}) in {:.3}s",
            analysis_id, overall, level, elapsed
        );
        debug!("category scores: {:?}", detailed_scores);

        Ok(AnalysisReport {
            analysis_id,
            overall_score: round1(overall),
            score_level: level.to_string(),
            score_color: color.to_string(),
            detailed_scores,
            feedback: PerCategory {
                ats: ats.feedback,
                keywords: keywords.feedback,
                content: content.feedback,
                grammar: grammar.feedback,
                structure: structure.feedback,
            },
            detailed_insights,
            analysis_method: ANALYSIS_METHOD.to_string(),
            word_count,
            analysis_timestamp: Utc::now(),
            metrics,
            job_match_analysis,
        })
    }
}

impl Default for ResumeAnalyzer {
    fn default() -> Self {
        Self::new(MatchEngine::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "JANE DOE\n\
        jane.doe@example.com | 555-123-4567 | linkedin.com/in/janedoe\n\
        SUMMARY\n\
        Senior Python developer with 7 years of experience building REST APIs with Django and AWS.\n\
        EXPERIENCE\n\
        Led a team of 4 engineers and improved API latency by 40% for 20,000 users.\n\
        EDUCATION\n\
        Bachelor of Science in Computer Science\n\
        SKILLS\n\
        Python, Django, PostgreSQL, Docker, AWS";

    const JOB: &str =
        "Looking for a backend engineer with 5+ years experience, Python, Django, AWS, and Docker required.";

    #[test]
    fn test_short_resume_is_rejected() {
        let analyzer = ResumeAnalyzer::default();
        let err = analyzer
            .analyze_resume_comprehensive("   too short   ", "", "")
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation error: Resume content appears to be too short or unreadable."
        );
    }

    #[test]
    fn test_overall_is_mean_of_categories() {
        let analyzer = ResumeAnalyzer::default();
        let report = analyzer.analyze_resume_comprehensive(RESUME, "", "resume.pdf").unwrap();
        let s = &report.detailed_scores;
        let mean = (s.ats + s.keywords + s.content + s.grammar + s.structure) as f64 / 5.0;
        assert_eq!(report.overall_score, round1(mean));
        assert_eq!(report.score_level, score_level(mean).0);
        assert_eq!(report.analysis_method, "Advanced Analysis");
        assert!(report.job_match_analysis.is_none());
        assert_eq!(report.metrics.text_similarity_to_job, 0.0);
    }

    #[test]
    fn test_job_description_adds_match_analysis() {
        let analyzer = ResumeAnalyzer::default();
        let report = analyzer.analyze_resume_comprehensive(RESUME, JOB, "").unwrap();
        let job_match = report.job_match_analysis.expect("job match embedded");
        assert!(job_match.overall_match > 0.0);
        assert!(report.metrics.text_similarity_to_job > 0.0);
    }

    #[test]
    fn test_whitespace_job_keeps_sentinel_out_of_report() {
        let analyzer = ResumeAnalyzer::default();
        let report = analyzer.analyze_resume_comprehensive(RESUME, "  \n", "").unwrap();
        assert!(report.job_match_analysis.is_none());
        assert_eq!(report.metrics.text_similarity_to_job, 0.0);
        let without_job = analyzer.analyze_resume_comprehensive(RESUME, "", "").unwrap();
        assert_eq!(report.detailed_scores.keywords, without_job.detailed_scores.keywords);
    }

    #[test]
    fn test_score_levels() {
        assert_eq!(score_level(85.0), ("Excellent", "green"));
        assert_eq!(score_level(70.0), ("Good", "blue"));
        assert_eq!(score_level(55.0), ("Fair", "orange"));
        assert_eq!(score_level(54.9), ("Needs Improvement", "red"));
    }

    #[test]
    fn test_readability_is_clamped() {
        assert_eq!(readability_score(10.0), 50.0);
        assert_eq!(readability_score(0.0), 0.0);
        assert_eq!(readability_score(40.0), 100.0);
    }

    #[test]
    fn test_report_wire_shape() {
        let analyzer = ResumeAnalyzer::default();
        let report = analyzer.analyze_resume_comprehensive(RESUME, "", "").unwrap();
        let value = serde_json::to_value(&report).unwrap();
        for key in PerCategory::<u32>::NAMES {
            assert!(value["detailed_scores"][key].is_u64(), "score for {key}");
            assert!(value["feedback"][key].is_array(), "feedback for {key}");
        }
        assert!(value.get("job_match_analysis").is_none());
        assert!(value["analysis_id"].is_string());
    }
}
