use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::report::{AnalysisReport, PerCategory, ResumeAnalyzer};
use crate::errors::AppError;
use crate::models::resume::ResumeInput;

pub const MAX_BATCH_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparedResume {
    pub filename: String,
    pub analysis: AnalysisReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Winners {
    pub overall: String,
    pub categories: PerCategory<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeComparison {
    pub resume1: ComparedResume,
    pub resume2: ComparedResume,
    pub winner: Winners,
    pub score_differences: PerCategory<u32>,
    pub comparison_timestamp: DateTime<Utc>,
}

/// One batch entry: either a full analysis or the reason it failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResume {
    pub filename: String,
    pub overall_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Box<AnalysisReport>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRanking {
    pub batch_results: Vec<RankedResume>,
    pub total_analyzed: usize,
    pub analysis_timestamp: DateTime<Utc>,
}

impl ResumeAnalyzer {
    /// Analyzes both resumes against the same job; ties go to the second.
    pub fn compare_resumes(
        &self,
        first: &ResumeInput,
        second: &ResumeInput,
        job_description: &str,
    ) -> Result<ResumeComparison, AppError> {
        let a = self.analyze_resume_comprehensive(&first.text, job_description, &first.name)?;
        let b = self.analyze_resume_comprehensive(&second.text, job_description, &second.name)?;

        let pick = |x: f64, y: f64| {
            if x > y {
                first.name.clone()
            } else {
                second.name.clone()
            }
        };

        let winner = Winners {
            overall: pick(a.overall_score, b.overall_score),
            categories: a
                .detailed_scores
                .zip_with(&b.detailed_scores, |x, y| pick(*x as f64, *y as f64)),
        };
        let score_differences = a.detailed_scores.zip_with(&b.detailed_scores, |x, y| x.abs_diff(*y));

        info!(
            "compared '{}' ({:.1}) with '{}' ({:.1}); winner '{}'",
            first.name, a.overall_score, second.name, b.overall_score, winner.overall
        );

        Ok(ResumeComparison {
            resume1: ComparedResume {
                filename: first.name.clone(),
                analysis: a,
            },
            resume2: ComparedResume {
                filename: second.name.clone(),
                analysis: b,
            },
            winner,
            score_differences,
            comparison_timestamp: Utc::now(),
        })
    }

    /// Analyzes up to [`MAX_BATCH_SIZE`] resumes and orders them best first.
    /// Entries that fail analysis stay in the batch with a score of 0.
    pub fn rank_resumes(
        &self,
        batch: &[ResumeInput],
        job_description: &str,
    ) -> Result<BatchRanking, AppError> {
        if batch.len() > MAX_BATCH_SIZE {
            return Err(AppError::Validation(format!(
                "Maximum {MAX_BATCH_SIZE} resumes allowed per batch"
            )));
        }

        let mut results: Vec<RankedResume> = batch
            .iter()
            .map(|resume| {
                match self.analyze_resume_comprehensive(&resume.text, job_description, &resume.name) {
                    Ok(report) => RankedResume {
                        filename: resume.name.clone(),
                        overall_score: report.overall_score,
                        error: None,
                        analysis: Some(Box::new(report)),
                    },
                    Err(e) => {
                        warn!("batch entry '{}' failed: {e}", resume.name);
                        RankedResume {
                            filename: resume.name.clone(),
                            overall_score: 0.0,
                            error: Some(e.to_string()),
                            analysis: None,
                        }
                    }
                }
            })
            .collect();

        // stable: equal scores keep submission order
        results.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));

        info!("ranked {} resumes", results.len());
        Ok(BatchRanking {
            total_analyzed: results.len(),
            batch_results: results,
            analysis_timestamp: Utc::now(),
        })
    }
}
