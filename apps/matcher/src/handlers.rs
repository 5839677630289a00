use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::analysis::industry::industry_keywords;
use crate::cli::Commands;
use crate::errors::AppError;
use crate::models::profile::ProfileStats;
use crate::models::resume::ResumeInput;
use crate::profiles::analyze_coding_profiles;
use crate::profiles::readiness::TargetLevel;
use crate::state::AppState;

/// Runs one command and returns its JSON result.
pub fn dispatch(state: &AppState, command: Commands) -> Result<Value, AppError> {
    match command {
        Commands::Match { resume, job } => handle_match(state, &resume, job.as_deref()),
        Commands::Analyze {
            resume,
            job,
            filename,
        } => handle_analyze(state, &resume, job.as_deref(), filename.as_deref()),
        Commands::Compare {
            resume_a,
            resume_b,
            job,
        } => handle_compare(state, &resume_a, &resume_b, job.as_deref()),
        Commands::Rank { resumes, job } => handle_rank(state, &resumes, job.as_deref()),
        Commands::Keywords { industry } => to_json(&industry_keywords(&industry)?),
        Commands::Profiles {
            resume,
            stats,
            level,
        } => handle_profiles(state, &resume, stats.as_deref(), level.as_deref()),
    }
}

pub fn handle_match(state: &AppState, resume: &Path, job: Option<&Path>) -> Result<Value, AppError> {
    let resume_text = read_text(resume)?;
    let job_text = read_optional(job)?;
    info!("match: {}", resume.display());
    to_json(&state.engine().generate_job_match_insights(&resume_text, &job_text))
}

pub fn handle_analyze(
    state: &AppState,
    resume: &Path,
    job: Option<&Path>,
    filename: Option<&str>,
) -> Result<Value, AppError> {
    let text = read_text(resume)?;
    let job_text = read_optional(job)?;
    let filename = filename.map(str::to_string).unwrap_or_else(|| display_name(resume));
    info!("analyze: {filename}");
    let report = state
        .analyzer
        .analyze_resume_comprehensive(&text, &job_text, &filename)?;
    to_json(&report)
}

pub fn handle_compare(
    state: &AppState,
    resume_a: &Path,
    resume_b: &Path,
    job: Option<&Path>,
) -> Result<Value, AppError> {
    let a = read_resume(resume_a)?;
    let b = read_resume(resume_b)?;
    let job_text = read_optional(job)?;
    to_json(&state.analyzer.compare_resumes(&a, &b, &job_text)?)
}

pub fn handle_rank(state: &AppState, resumes: &[impl AsRef<Path>], job: Option<&Path>) -> Result<Value, AppError> {
    let batch = resumes
        .iter()
        .map(|p| read_resume(p.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    let job_text = read_optional(job)?;
    to_json(&state.analyzer.rank_resumes(&batch, &job_text)?)
}

pub fn handle_profiles(
    state: &AppState,
    resume: &Path,
    stats: Option<&Path>,
    level: Option<&str>,
) -> Result<Value, AppError> {
    let text = read_text(resume)?;
    let stats: Vec<ProfileStats> = match stats {
        Some(path) => serde_json::from_str(&read_text(path)?)?,
        None => Vec::new(),
    };
    let level = TargetLevel::parse_or_default(level.unwrap_or(&state.config.readiness_target_level));
    to_json(&analyze_coding_profiles(&text, stats, level))
}

// ────────────────────────────────────────────────────────────────────────────
// Input helpers
// ────────────────────────────────────────────────────────────────────────────

pub fn read_text(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))
}

/// A missing optional input reads as empty text.
fn read_optional(path: Option<&Path>) -> Result<String, AppError> {
    path.map(read_text).transpose().map(Option::unwrap_or_default)
}

fn read_resume(path: &Path) -> Result<ResumeInput, AppError> {
    Ok(ResumeInput::new(display_name(path), read_text(path)?))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, AppError> {
    Ok(serde_json::to_value(value)?)
}
