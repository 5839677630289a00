use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::profile::{Platform, ProfileStats};
use crate::text::round1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetLevel {
    #[default]
    EntryLevel,
    MidLevel,
    SeniorLevel,
}

impl TargetLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetLevel::EntryLevel => "entry_level",
            TargetLevel::MidLevel => "mid_level",
            TargetLevel::SeniorLevel => "senior_level",
        }
    }

    /// Unknown names assess against entry level.
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            warn!("unknown target level '{raw}'; assessing against entry_level");
            TargetLevel::EntryLevel
        })
    }

    pub fn thresholds(self, platform: Platform) -> Thresholds {
        let (rating, problems_solved) = match (self, platform) {
            (TargetLevel::EntryLevel, Platform::Leetcode) => (1200.0, 50),
            (TargetLevel::EntryLevel, Platform::Codeforces) => (800.0, 50),
            (TargetLevel::EntryLevel, Platform::Codechef) => (1400.0, 30),
            (TargetLevel::MidLevel, Platform::Leetcode) => (1600.0, 150),
            (TargetLevel::MidLevel, Platform::Codeforces) => (1200.0, 100),
            (TargetLevel::MidLevel, Platform::Codechef) => (1800.0, 80),
            (TargetLevel::SeniorLevel, Platform::Leetcode) => (2000.0, 300),
            (TargetLevel::SeniorLevel, Platform::Codeforces) => (1600.0, 200),
            (TargetLevel::SeniorLevel, Platform::Codechef) => (2200.0, 150),
        };
        Thresholds {
            rating,
            problems_solved,
        }
    }
}

impl FromStr for TargetLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entry_level" | "entry" => Ok(TargetLevel::EntryLevel),
            "mid_level" | "mid" => Ok(TargetLevel::MidLevel),
            "senior_level" | "senior" => Ok(TargetLevel::SeniorLevel),
            other => Err(format!("unknown target level '{other}'")),
        }
    }
}

impl fmt::Display for TargetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub rating: f64,
    pub problems_solved: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Assessment output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentDetails {
    pub rating: f64,
    pub required_rating: f64,
    pub problems_solved: u32,
    pub required_problems: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contests_attended: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformAssessment {
    pub platform: Platform,
    pub username: String,
    pub score: f64, // 0 – 100
    pub meets_requirements: bool,
    pub details: AssessmentDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessAssessment {
    pub overall_score: f64,
    pub readiness_level: String,
    pub platform_assessments: Vec<PlatformAssessment>,
    pub recommendations: Vec<String>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub target_level: TargetLevel,
}

pub const NOT_READY: &str = "Not Ready";

pub fn readiness_label(overall: f64) -> &'static str {
    if overall >= 80.0 {
        "Excellent - Ready for Senior Roles"
    } else if overall >= 65.0 {
        "Good - Ready for Mid-Level Roles"
    } else if overall >= 50.0 {
        "Fair - Ready for Entry-Level Roles"
    } else if overall >= 30.0 {
        "Developing - Continue Practice"
    } else {
        "Beginner - Needs Significant Improvement"
    }
}

/// `value / required`, capped at 1 and floored at 0.
fn ratio(value: f64, required: f64) -> f64 {
    (value / required).clamp(0.0, 1.0)
}

/// Scores one successfully fetched profile against the level's thresholds.
pub fn assess_platform(stats: &ProfileStats, level: TargetLevel) -> PlatformAssessment {
    let platform = stats.platform();
    let t = level.thresholds(platform);
    let rating = stats.rating();
    let problems = stats.problems_solved();

    let rating_ratio = ratio(rating, t.rating);
    let problems_ratio = ratio(problems as f64, t.problems_solved as f64);

    let (score, contests_attended, rank) = match stats {
        // activity history is not available; consistency is credited in full
        ProfileStats::Leetcode(s) => (
            rating_ratio * 40.0 + problems_ratio * 40.0 + 20.0,
            Some(s.contests_attended),
            None,
        ),
        ProfileStats::Codeforces(s) => (
            rating_ratio * 50.0 + problems_ratio * 30.0 + ratio(s.contribution as f64, 50.0) * 20.0,
            None,
            Some(s.rank.clone()),
        ),
        ProfileStats::Codechef(_) => (rating_ratio * 60.0 + problems_ratio * 40.0, None, None),
    };

    PlatformAssessment {
        platform,
        username: stats.username().to_string(),
        score,
        meets_requirements: rating >= t.rating && problems >= t.problems_solved,
        details: AssessmentDetails {
            rating,
            required_rating: t.rating,
            problems_solved: problems,
            required_problems: t.problems_solved,
            contests_attended,
            rank,
        },
    }
}

/// Assesses every successfully fetched profile; failed fetches are skipped.
pub fn assess_job_readiness(stats: &[ProfileStats], target_level: TargetLevel) -> ReadinessAssessment {
    let platform_assessments: Vec<PlatformAssessment> = stats
        .iter()
        .filter(|s| s.is_success())
        .map(|s| assess_platform(s, target_level))
        .collect();

    let (overall, readiness_level) = if platform_assessments.is_empty() {
        (0.0, NOT_READY)
    } else {
        let total: f64 = platform_assessments.iter().map(|a| a.score).sum();
        let overall = total / platform_assessments.len() as f64;
        (overall, readiness_label(overall))
    };

    let mut strengths = Vec::new();
    let mut areas_for_improvement = Vec::new();
    for a in &platform_assessments {
        if a.meets_requirements {
            strengths.push(format!(
                "Meets {} requirements on {} ({})",
                target_level, a.platform, a.username
            ));
        } else {
            areas_for_improvement.push(format!(
                "{} ({}) below {} requirements: rating {}/{}, problems {}/{}",
                a.platform,
                a.username,
                target_level,
                a.details.rating,
                a.details.required_rating,
                a.details.problems_solved,
                a.details.required_problems
            ));
        }
    }

    let recommendations = generate_coding_recommendations(&platform_assessments, overall);
    debug!(
        "readiness {:.1} ({}) over {} profiles",
        overall,
        readiness_level,
        platform_assessments.len()
    );

    ReadinessAssessment {
        overall_score: round1(overall),
        readiness_level: readiness_level.to_string(),
        platform_assessments: platform_assessments
            .into_iter()
            .map(|a| PlatformAssessment {
                score: round1(a.score),
                ..a
            })
            .collect(),
        recommendations,
        strengths,
        areas_for_improvement,
        target_level,
    }
}

/// Practice suggestions per assessed platform, then general ones driven by
/// the overall score.
pub fn generate_coding_recommendations(assessments: &[PlatformAssessment], overall: f64) -> Vec<String> {
    let mut recommendations: Vec<&str> = Vec::new();

    for a in assessments {
        let d = &a.details;
        match a.platform {
            Platform::Leetcode => {
                if d.rating < 1400.0 {
                    recommendations.push("Focus on LeetCode Easy and Medium problems to build rating");
                }
                if d.problems_solved < 100 {
                    recommendations.push("Solve more LeetCode problems - aim for 2-3 problems daily");
                }
                if d.contests_attended.unwrap_or(0) < 5 {
                    recommendations.push("Participate in LeetCode weekly contests for rating boost");
                }
            }
            Platform::Codeforces => {
                if d.rating < 1000.0 {
                    recommendations.push("Practice Codeforces problems rated 800-1200 to improve rating");
                }
                if d.problems_solved < 50 {
                    recommendations.push("Solve more Codeforces problems - focus on implementation and math");
                }
            }
            Platform::Codechef => {
                if d.rating < 1600.0 {
                    recommendations.push("Participate in CodeChef contests to improve rating");
                }
                if d.problems_solved < 50 {
                    recommendations.push("Practice CodeChef problems in different categories");
                }
            }
        }
    }

    if overall < 30.0 {
        recommendations.extend([
            "Start with basic programming concepts and data structures",
            "Dedicate 1-2 hours daily to coding practice",
            "Focus on one platform initially to build momentum",
        ]);
    } else if overall < 60.0 {
        recommendations.extend([
            "Practice consistently across multiple platforms",
            "Focus on weak areas identified in the assessment",
            "Join coding communities for motivation and learning",
        ]);
    }

    recommendations.into_iter().map(str::to_string).collect()
}
