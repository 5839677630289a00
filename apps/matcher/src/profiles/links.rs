use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::profile::Platform;

/// Scheme-prefixed, `www.`-prefixed and bare `<host>.com/` URLs, scanned in that order.
static URL_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        r#"(?i)https?://[^\s<>"{}|\\^`\[\]]*"#,
        r#"(?i)www\.[^\s<>"{}|\\^`\[\]]*"#,
        r#"(?i)[a-z0-9.-]+\.com/[^\s<>"{}|\\^`\[\]]*"#,
    ]
    .map(|p| Regex::new(p).expect("url pattern is valid"))
});

struct PlatformRule {
    platform: Platform,
    host: &'static str,
    profile: Regex,
    reserved: &'static [&'static str],
}

static PLATFORM_RULES: LazyLock<[PlatformRule; 3]> = LazyLock::new(|| {
    [
        PlatformRule {
            platform: Platform::Leetcode,
            host: "leetcode.com",
            profile: Regex::new(r"(?i)leetcode\.com/(?:u/)?([^/\s]+)").expect("leetcode pattern is valid"),
            reserved: &["problems", "contest", "discuss", "explore"],
        },
        PlatformRule {
            platform: Platform::Codeforces,
            host: "codeforces.com",
            profile: Regex::new(r"(?i)codeforces\.com/profile/([^/\s]+)")
                .expect("codeforces pattern is valid"),
            reserved: &["contests", "problemset", "gym"],
        },
        PlatformRule {
            platform: Platform::Codechef,
            host: "codechef.com",
            profile: Regex::new(r"(?i)codechef\.com/users/([^/\s]+)").expect("codechef pattern is valid"),
            reserved: &["ide", "problems", "contests"],
        },
    ]
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLink {
    pub username: String,
    /// As written in the resume.
    pub url: String,
    pub clean_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLinks {
    pub leetcode: Vec<ProfileLink>,
    pub codeforces: Vec<ProfileLink>,
    pub codechef: Vec<ProfileLink>,
}

impl ProfileLinks {
    pub fn get(&self, platform: Platform) -> &[ProfileLink] {
        match platform {
            Platform::Leetcode => &self.leetcode,
            Platform::Codeforces => &self.codeforces,
            Platform::Codechef => &self.codechef,
        }
    }

    fn get_mut(&mut self, platform: Platform) -> &mut Vec<ProfileLink> {
        match platform {
            Platform::Leetcode => &mut self.leetcode,
            Platform::Codeforces => &mut self.codeforces,
            Platform::Codechef => &mut self.codechef,
        }
    }

    pub fn total(&self) -> usize {
        Platform::ALL.iter().map(|p| self.get(*p).len()).sum()
    }
}

pub fn clean_profile_url(platform: Platform, username: &str) -> String {
    match platform {
        Platform::Leetcode => format!("https://leetcode.com/{username}/"),
        Platform::Codeforces => format!("https://codeforces.com/profile/{username}"),
        Platform::Codechef => format!("https://www.codechef.com/users/{username}"),
    }
}

/// Every URL-like fragment in the text, first spelling kept per
/// case-insensitive duplicate.
pub fn find_urls(text: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    URL_PATTERNS
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| m.as_str()))
        .filter(|url| seen.insert(url.to_lowercase()))
        .collect()
}

/// Finds LeetCode, Codeforces and CodeChef profile links. The same profile
/// reached through several URL spellings is reported once.
pub fn extract_profile_links(text: &str) -> ProfileLinks {
    let mut links = ProfileLinks::default();
    let mut seen_profiles = HashSet::new();

    for url in find_urls(text) {
        let url_lower = url.to_lowercase();
        let Some(rule) = PLATFORM_RULES.iter().find(|r| url_lower.contains(r.host)) else {
            continue;
        };
        let Some(caps) = rule.profile.captures(url) else {
            continue;
        };

        let username = caps[1]
            .trim_matches('/')
            .trim_end_matches(['.', ',', ';', ':', ')']);
        if username.is_empty() || rule.reserved.contains(&username.to_lowercase().as_str()) {
            continue;
        }
        if !seen_profiles.insert((rule.platform, username.to_lowercase())) {
            continue;
        }

        links.get_mut(rule.platform).push(ProfileLink {
            username: username.to_string(),
            url: url.to_string(),
            clean_url: clean_profile_url(rule.platform, username),
        });
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_each_platform() {
        let text = "Profiles: https://leetcode.com/janedoe/ | https://codeforces.com/profile/jd_cf \
                    and www.codechef.com/users/chefjane";
        let links = extract_profile_links(text);

        assert_eq!(links.leetcode.len(), 1);
        assert_eq!(links.leetcode[0].username, "janedoe");
        assert_eq!(links.leetcode[0].clean_url, "https://leetcode.com/janedoe/");
        assert_eq!(links.codeforces[0].username, "jd_cf");
        assert_eq!(links.codeforces[0].clean_url, "https://codeforces.com/profile/jd_cf");
        assert_eq!(links.codechef[0].clean_url, "https://www.codechef.com/users/chefjane");
        assert_eq!(links.total(), 3);
    }

    #[test]
    fn test_same_profile_is_reported_once() {
        // matched by the scheme, www and bare-host patterns alike
        let links = extract_profile_links("See https://www.leetcode.com/JaneDoe and leetcode.com/janedoe");
        assert_eq!(links.leetcode.len(), 1);
        assert_eq!(links.leetcode[0].username, "JaneDoe");
    }

    #[test]
    fn test_reserved_paths_are_not_profiles() {
        let text = "https://leetcode.com/problems/two-sum https://codeforces.com/contests \
                    https://www.codechef.com/ide https://codeforces.com/profile/gym";
        assert_eq!(extract_profile_links(text).total(), 0);
    }

    #[test]
    fn test_leetcode_user_prefix_and_trailing_punctuation() {
        let links = extract_profile_links("LeetCode: https://leetcode.com/u/jane_doe, GitHub: github.com/jane");
        assert_eq!(links.leetcode[0].username, "jane_doe");
        assert!(links.codeforces.is_empty());
    }

    #[test]
    fn test_find_urls_deduplicates_case_insensitively() {
        let urls = find_urls("https://Example.com/a https://example.com/A");
        assert_eq!(urls[0], "https://Example.com/a");
        assert!(!urls.contains(&"https://example.com/A"));
    }
}
