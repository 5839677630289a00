use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Leetcode,
    Codeforces,
    Codechef,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Leetcode, Platform::Codeforces, Platform::Codechef];

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Leetcode => "LeetCode",
            Platform::Codeforces => "Codeforces",
            Platform::Codechef => "CodeChef",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Outcome of fetching a profile from its platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    #[default]
    Success,
    Error,
}

// ────────────────────────────────────────────────────────────────────────────
// Per-platform stats, as a stats provider reports them
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeetcodeStats {
    pub username: String,
    pub status: FetchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub total_solved: u32,
    pub easy_solved: u32,
    pub medium_solved: u32,
    pub hard_solved: u32,
    pub contest_rating: f64,
    pub contests_attended: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeforcesStats {
    pub username: String,
    pub status: FetchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub rating: f64,
    pub max_rating: f64,
    pub rank: String,
    pub problems_solved: u32,
    pub contribution: i64, // may be negative
}

impl Default for CodeforcesStats {
    fn default() -> Self {
        Self {
            username: String::new(),
            status: FetchStatus::Success,
            message: None,
            rating: 0.0,
            max_rating: 0.0,
            rank: "unrated".to_string(),
            problems_solved: 0,
            contribution: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodechefStats {
    pub username: String,
    pub status: FetchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub rating: f64,
    pub problems_solved: u32,
}

/// Stats for one profile, tagged by `platform` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "snake_case")]
pub enum ProfileStats {
    Leetcode(LeetcodeStats),
    Codeforces(CodeforcesStats),
    Codechef(CodechefStats),
}

impl ProfileStats {
    pub fn platform(&self) -> Platform {
        match self {
            ProfileStats::Leetcode(_) => Platform::Leetcode,
            ProfileStats::Codeforces(_) => Platform::Codeforces,
            ProfileStats::Codechef(_) => Platform::Codechef,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            ProfileStats::Leetcode(s) => &s.username,
            ProfileStats::Codeforces(s) => &s.username,
            ProfileStats::Codechef(s) => &s.username,
        }
    }

    pub fn status(&self) -> FetchStatus {
        match self {
            ProfileStats::Leetcode(s) => s.status,
            ProfileStats::Codeforces(s) => s.status,
            ProfileStats::Codechef(s) => s.status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == FetchStatus::Success
    }

    /// Contest rating on LeetCode, platform rating elsewhere.
    pub fn rating(&self) -> f64 {
        match self {
            ProfileStats::Leetcode(s) => s.contest_rating,
            ProfileStats::Codeforces(s) => s.rating,
            ProfileStats::Codechef(s) => s.rating,
        }
    }

    pub fn problems_solved(&self) -> u32 {
        match self {
            ProfileStats::Leetcode(s) => s.total_solved,
            ProfileStats::Codeforces(s) => s.problems_solved,
            ProfileStats::Codechef(s) => s.problems_solved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_tagged_stats_with_defaults() {
        let raw = r#"[
            {"platform": "leetcode", "username": "jane", "status": "success",
             "total_solved": 420, "contest_rating": 1750.4, "contests_attended": 12},
            {"platform": "codeforces", "username": "tourist", "rating": 3800, "problems_solved": 2500},
            {"platform": "codechef", "username": "chef", "status": "error", "message": "Profile not found"}
        ]"#;
        let stats: Vec<ProfileStats> = serde_json::from_str(raw).unwrap();

        assert_eq!(stats[0].platform(), Platform::Leetcode);
        assert_eq!(stats[0].rating(), 1750.4);
        assert_eq!(stats[0].problems_solved(), 420);

        let ProfileStats::Codeforces(cf) = &stats[1] else {
            panic!("expected codeforces stats");
        };
        assert_eq!(cf.rank, "unrated");
        assert!(stats[1].is_success());

        assert!(!stats[2].is_success());
        assert_eq!(stats[2].username(), "chef");
    }

    #[test]
    fn test_unknown_platform_is_rejected() {
        let raw = r#"{"platform": "hackerrank", "username": "x"}"#;
        assert!(serde_json::from_str::<ProfileStats>(raw).is_err());
    }

    #[test]
    fn test_serializes_platform_tag() {
        let stats = ProfileStats::Codechef(CodechefStats {
            username: "chef".into(),
            rating: 1500.0,
            ..Default::default()
        });
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["platform"], "codechef");
        assert_eq!(value["status"], "success");
        assert!(value.get("message").is_none());
    }
}
