//! Years-of-experience matching: the largest requirement stated by the job
//! against the largest figure evidenced by the resume.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::matching::engine::MatchEngine;
use crate::matching::{or_fallback, ScoringError};

pub const EXPERIENCE_NO_REQUIREMENT: f64 = 0.5;
pub const EXPERIENCE_NO_EVIDENCE: f64 = 0.3;
pub const EXPERIENCE_FALLBACK: f64 = 0.5;

static JOB_REQUIREMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+)[+\-\s]*(?:years?|yrs?)\s*(?:of\s*)?(?:experience|exp)")
        .expect("job experience regex is valid")
});

/// "N years experience" and "experience ... N years".
static RESUME_YEARS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"([0-9]+)[+\s]*(?:years?|yrs?)\s*(?:of\s*)?(?:experience|exp)",
        r"(?:experience|exp).*?([0-9]+)[+\s]*(?:years?|yrs?)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("resume experience regex is valid"))
    .collect()
});

/// "2018 - present", "2015 – 2019".
static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{4})\s*[-–]\s*(present|current|[0-9]{4})")
        .expect("date range regex is valid")
});

/// Figures that overflow are skipped rather than failing the whole scan.
fn parse_years(raw: &str) -> Option<u32> {
    match raw.parse::<u32>() {
        Ok(years) => Some(years),
        Err(_) => {
            debug!("skipping out-of-range year figure '{raw}'");
            None
        }
    }
}

/// Largest stated requirement, if the job states one.
pub fn required_years(job_lower: &str) -> Option<u32> {
    JOB_REQUIREMENT
        .captures_iter(job_lower)
        .filter_map(|caps| parse_years(&caps[1]))
        .max()
}

/// Largest figure of held experience. Date ranges contribute their span,
/// with open-ended ranges closing at `reference_year`.
pub fn held_years(resume_lower: &str, reference_year: i32) -> Option<u32> {
    let stated = RESUME_YEARS
        .iter()
        .flat_map(|pattern| pattern.captures_iter(resume_lower))
        .filter_map(|caps| parse_years(&caps[1]));

    let spans = DATE_RANGE.captures_iter(resume_lower).filter_map(|caps| {
        let start = parse_years(&caps[1])? as i64;
        let end = match &caps[2] {
            "present" | "current" => reference_year as i64,
            year => parse_years(year)? as i64,
        };
        Some((end - start).max(0) as u32)
    });

    stated.chain(spans).max()
}

/// Fixed step function of held vs. required years.
pub fn score_years(held: u32, required: u32) -> f64 {
    let held = held as f64;
    let required = required as f64;
    if held >= required {
        1.0
    } else if held >= required * 0.8 {
        0.8
    } else if held >= required * 0.5 {
        0.6
    } else {
        0.3
    }
}

impl MatchEngine {
    pub fn try_experience_match(&self, resume_text: &str, job_text: &str) -> Result<f64, ScoringError> {
        self.check_inputs(&[job_text])?;
        let Some(required) = required_years(&job_text.to_lowercase()) else {
            return Ok(EXPERIENCE_NO_REQUIREMENT);
        };

        self.check_inputs(&[resume_text])?;
        match held_years(&resume_text.to_lowercase(), self.reference_year) {
            Some(held) => Ok(score_years(held, required)),
            None => Ok(EXPERIENCE_NO_EVIDENCE),
        }
    }

    pub fn experience_match(&self, resume_text: &str, job_text: &str) -> f64 {
        or_fallback(
            "experience",
            self.try_experience_match(resume_text, job_text),
            EXPERIENCE_FALLBACK,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::tables::ScoringTables;
    use std::sync::Arc;

    fn engine() -> MatchEngine {
        MatchEngine::default().with_reference_year(2025)
    }

    #[test]
    fn test_no_requirement_is_neutral() {
        let e = engine();
        for resume in ["", "10 years of experience", "Junior developer"] {
            assert_eq!(e.experience_match(resume, ""), EXPERIENCE_NO_REQUIREMENT);
        }
        assert_eq!(
            e.experience_match("5 years experience", "Great culture, remote friendly."),
            EXPERIENCE_NO_REQUIREMENT
        );
    }

    #[test]
    fn test_partial_match_three_of_five() {
        let score = engine().experience_match("3 years experience", "5+ years experience required");
        assert_eq!(score, 0.6);
    }

    #[test]
    fn test_meets_requirement() {
        let score = engine().experience_match("6 years of experience", "5 years experience");
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_close_to_requirement() {
        assert_eq!(engine().experience_match("4 years experience", "5 years experience"), 0.8);
    }

    #[test]
    fn test_significant_gap() {
        assert_eq!(engine().experience_match("1 year experience", "5 years experience"), 0.3);
    }

    #[test]
    fn test_requirement_without_evidence() {
        let score = engine().experience_match("Enthusiastic learner", "3-5 years of experience");
        assert_eq!(score, EXPERIENCE_NO_EVIDENCE);
    }

    #[test]
    fn test_largest_requirement_wins() {
        assert_eq!(
            required_years("2 years experience with go, 7 yrs exp with java"),
            Some(7)
        );
    }

    #[test]
    fn test_experience_then_years_phrase() {
        assert_eq!(
            held_years("professional experience spanning 9 years", 2025),
            Some(9)
        );
    }

    #[test]
    fn test_date_ranges_count_their_span() {
        assert_eq!(held_years("acme corp 2015 - 2019", 2025), Some(4));
        assert_eq!(held_years("initech 2019 – present", 2025), Some(6));
        assert_eq!(held_years("globex 2021-current", 2025), Some(4));
    }

    #[test]
    fn test_inverted_range_counts_as_zero() {
        assert_eq!(held_years("2020 - 2018", 2025), Some(0));
    }

    #[test]
    fn test_score_thresholds_are_inclusive() {
        assert_eq!(score_years(10, 10), 1.0);
        assert_eq!(score_years(8, 10), 0.8);
        assert_eq!(score_years(5, 10), 0.6);
        assert_eq!(score_years(4, 10), 0.3);
    }

    #[test]
    fn test_out_of_range_number_is_skipped() {
        let e = engine();
        let job = "99999999999 years experience, or 5 years experience with rust";
        assert_eq!(required_years(job), Some(5));
        assert_eq!(e.experience_match("5 years experience", job), 1.0);
        assert_eq!(
            held_years("99999999999 years experience, 3 years experience", 2025),
            Some(3)
        );
    }

    #[test]
    fn test_no_requirement_ignores_resume_size() {
        let e = MatchEngine::new(Arc::new(ScoringTables::default()), 16).with_reference_year(2025);
        let resume = "Senior engineer with 10 years of experience";
        assert_eq!(e.experience_match(resume, ""), EXPERIENCE_NO_REQUIREMENT);
        assert_eq!(e.experience_match(resume, "Remote team"), EXPERIENCE_NO_REQUIREMENT);
    }
}
