// Competitive-programming profiles: link extraction from resume text and
// job-readiness assessment over externally supplied platform stats.

pub mod links;
pub mod readiness;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::profile::{Platform, ProfileStats};
use links::{extract_profile_links, ProfileLinks};
use readiness::{assess_job_readiness, ReadinessAssessment, TargetLevel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub total_profiles: usize,
    pub accessible_profiles: usize,
    pub total_problems_solved: u64,
    /// Mean over profiles that report a positive rating.
    pub average_rating: f64,
    /// Platforms where an accessible profile clears the entry-level problem count.
    pub platforms_with_good_activity: Vec<Platform>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodingProfileAnalysis {
    pub profiles_found: ProfileLinks,
    pub profile_statistics: Vec<ProfileStats>,
    pub job_readiness_assessment: Option<ReadinessAssessment>,
    pub summary: ProfileSummary,
}

pub fn summarize_profiles(links: &ProfileLinks, stats: &[ProfileStats]) -> ProfileSummary {
    let accessible: Vec<&ProfileStats> = stats.iter().filter(|s| s.is_success()).collect();

    let total_problems_solved = accessible.iter().map(|s| s.problems_solved() as u64).sum();

    let ratings: Vec<f64> = accessible
        .iter()
        .map(|s| s.rating())
        .filter(|r| *r > 0.0)
        .collect();
    let average_rating = if ratings.is_empty() {
        0.0
    } else {
        ratings.iter().sum::<f64>() / ratings.len() as f64
    };

    let platforms_with_good_activity = Platform::ALL
        .into_iter()
        .filter(|p| {
            let required = TargetLevel::EntryLevel.thresholds(*p).problems_solved;
            accessible
                .iter()
                .any(|s| s.platform() == *p && s.problems_solved() >= required)
        })
        .collect();

    ProfileSummary {
        total_profiles: links.total(),
        accessible_profiles: accessible.len(),
        total_problems_solved,
        average_rating,
        platforms_with_good_activity,
    }
}

/// Extracts profile links from the resume and assesses the supplied stats.
/// The readiness assessment is present only when at least one profile was
/// fetched successfully.
pub fn analyze_coding_profiles(
    resume_text: &str,
    stats: Vec<ProfileStats>,
    target_level: TargetLevel,
) -> CodingProfileAnalysis {
    let profiles_found = extract_profile_links(resume_text);
    let summary = summarize_profiles(&profiles_found, &stats);

    let job_readiness_assessment = stats
        .iter()
        .any(ProfileStats::is_success)
        .then(|| assess_job_readiness(&stats, target_level));

    info!(
        "coding profiles: {} found, {} accessible",
        summary.total_profiles, summary.accessible_profiles
    );

    CodingProfileAnalysis {
        profiles_found,
        profile_statistics: stats,
        job_readiness_assessment,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{CodeforcesStats, FetchStatus, LeetcodeStats};

    const RESUME: &str = "Jane Doe | https://leetcode.com/janedoe | https://codeforces.com/profile/jd";

    fn stats() -> Vec<ProfileStats> {
        vec![
            ProfileStats::Leetcode(LeetcodeStats {
                username: "janedoe".into(),
                total_solved: 120,
                contest_rating: 1500.0,
                contests_attended: 8,
                ..Default::default()
            }),
            ProfileStats::Codeforces(CodeforcesStats {
                username: "jd".into(),
                rating: 0.0,
                problems_solved: 10,
                ..Default::default()
            }),
        ]
    }

    #[test]
    fn test_summary_totals() {
        let links = extract_profile_links(RESUME);
        let summary = summarize_profiles(&links, &stats());
        assert_eq!(summary.total_profiles, 2);
        assert_eq!(summary.accessible_profiles, 2);
        assert_eq!(summary.total_problems_solved, 130);
        // the unrated codeforces profile does not drag the mean down
        assert_eq!(summary.average_rating, 1500.0);
        assert_eq!(summary.platforms_with_good_activity, vec![Platform::Leetcode]);
    }

    #[test]
    fn test_analysis_includes_assessment_when_any_profile_is_accessible() {
        let analysis = analyze_coding_profiles(RESUME, stats(), TargetLevel::EntryLevel);
        let assessment = analysis.job_readiness_assessment.expect("assessment present");
        assert_eq!(assessment.platform_assessments.len(), 2);
        assert_eq!(analysis.profile_statistics.len(), 2);
    }

    #[test]
    fn test_no_accessible_profiles_means_no_assessment() {
        let failed = vec![ProfileStats::Leetcode(LeetcodeStats {
            username: "janedoe".into(),
            status: FetchStatus::Error,
            ..Default::default()
        })];
        let analysis = analyze_coding_profiles(RESUME, failed, TargetLevel::EntryLevel);
        assert!(analysis.job_readiness_assessment.is_none());
        assert_eq!(analysis.summary.accessible_profiles, 0);
        assert_eq!(analysis.summary.average_rating, 0.0);
    }

    #[test]
    fn test_resume_without_links() {
        let analysis = analyze_coding_profiles("No links here", Vec::new(), TargetLevel::MidLevel);
        assert_eq!(analysis.summary.total_profiles, 0);
        assert!(analysis.job_readiness_assessment.is_none());
    }
}
