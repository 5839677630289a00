//! Keyword extraction. Job descriptions and resumes are mined differently:
//! job text yields technical-term and requirement-clause matches, resume text
//! yields its plain vocabulary.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::matching::tables::StopWords;

/// Technical terms recognised verbatim in job descriptions.
static TECH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b(?:python|java|javascript|react|node\.js|sql|aws|docker|kubernetes|git)\b",
        r"\b(?:django|flask|spring|express|fastapi)\b",
        r"\b(?:machine learning|data science|artificial intelligence|deep learning)\b",
        r"\b(?:frontend|backend|full[- ]?stack|devops|mobile|web)\b",
        r"\b(?:agile|scrum|kanban|ci/cd|microservices|api)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("tech pattern is valid"))
    .collect()
});

/// "experience with X", "required: X", "tools: X" and friends. The capture
/// runs to the next period and is split into individual items.
static REQUIREMENT_CLAUSES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:experience with|proficient in|knowledge of|familiar with)\s+([^.]+)",
        r"(?:required|must have|should have):\s*([^.]+)",
        r"(?:skills|technologies|tools):\s*([^.]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("requirement pattern is valid"))
    .collect()
});

static CLAUSE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;/&]").expect("separator regex is valid"));

/// Words with optional dotted/hyphenated tails and trailing `+`/`#`
/// (`node.js`, `full-stack`, `c++`, `c#`).
static RESUME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\w+(?:[.\-+#]\w+)*[+#]*").expect("resume token regex is valid")
});

const MIN_KEYWORD_CHARS: usize = 3;

/// Where a keyword came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordSource {
    TechPattern,
    RequirementClause,
    Token,
}

/// Which side of the match a text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    JobDescription,
    Resume,
}

/// Normalized keywords, each tagged with the rule that first produced it.
/// Iteration is lexicographic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeywordSet {
    entries: BTreeMap<String, KeywordSource>,
}

impl KeywordSet {
    /// Normalizes and inserts a candidate. Returns false when the candidate is
    /// shorter than three characters or a stop word. An existing entry keeps
    /// its original source.
    pub fn admit(&mut self, raw: &str, source: KeywordSource, stop_words: &StopWords) -> bool {
        let token = raw.trim().to_lowercase();
        if token.chars().count() < MIN_KEYWORD_CHARS || stop_words.contains(&token) {
            return false;
        }
        self.entries.entry(token).or_insert(source);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.entries.contains_key(keyword)
    }

    #[cfg(test)]
    pub fn source_of(&self, keyword: &str) -> Option<KeywordSource> {
        self.entries.get(keyword).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of keywords present in both sets.
    pub fn overlap(&self, other: &KeywordSet) -> usize {
        self.iter().filter(|k| other.contains(k)).count()
    }

    /// Keywords in `self` that `other` lacks, in lexicographic order.
    pub fn missing_from(&self, other: &KeywordSet) -> Vec<String> {
        self.iter()
            .filter(|k| !other.contains(k))
            .map(str::to_string)
            .collect()
    }
}

pub fn extract_keywords(text: &str, mode: ExtractionMode, stop_words: &StopWords) -> KeywordSet {
    match mode {
        ExtractionMode::JobDescription => extract_job_keywords(text, stop_words),
        ExtractionMode::Resume => extract_resume_keywords(text, stop_words),
    }
}

/// Technical-term matches plus requirement-clause items.
pub fn extract_job_keywords(text: &str, stop_words: &StopWords) -> KeywordSet {
    let mut keywords = KeywordSet::default();
    let text_lower = text.to_lowercase();

    for pattern in TECH_PATTERNS.iter() {
        for m in pattern.find_iter(&text_lower) {
            keywords.admit(m.as_str(), KeywordSource::TechPattern, stop_words);
        }
    }

    for pattern in REQUIREMENT_CLAUSES.iter() {
        for caps in pattern.captures_iter(&text_lower) {
            let Some(clause) = caps.get(1) else {
                continue;
            };
            for item in CLAUSE_SEPARATORS.split(clause.as_str()) {
                keywords.admit(item, KeywordSource::RequirementClause, stop_words);
            }
        }
    }

    keywords
}

/// Every non-stop-word token of three or more characters that is not purely numeric.
pub fn extract_resume_keywords(text: &str, stop_words: &StopWords) -> KeywordSet {
    let mut keywords = KeywordSet::default();
    let text_lower = text.to_lowercase();

    for m in RESUME_TOKEN.find_iter(&text_lower) {
        let token = m.as_str();
        if token.chars().all(char::is_numeric) {
            continue;
        }
        keywords.admit(token, KeywordSource::Token, stop_words);
    }

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_words() -> StopWords {
        StopWords::default()
    }

    #[test]
    fn test_empty_text_yields_empty_sets() {
        assert!(extract_job_keywords("", &stop_words()).is_empty());
        assert!(extract_resume_keywords("", &stop_words()).is_empty());
    }

    #[test]
    fn test_job_tech_patterns_are_case_insensitive() {
        let kws = extract_job_keywords(
            "We use Python, Docker and Kubernetes. Machine Learning a plus.",
            &stop_words(),
        );
        for expected in ["python", "docker", "kubernetes", "machine learning"] {
            assert!(kws.contains(expected), "missing {expected}");
            assert_eq!(kws.source_of(expected), Some(KeywordSource::TechPattern));
        }
    }

    #[test]
    fn test_javascript_is_not_truncated_to_java() {
        let kws = extract_job_keywords("Strong JavaScript skills", &stop_words());
        assert!(kws.contains("javascript"));
        assert!(!kws.contains("java"));
    }

    #[test]
    fn test_requirement_clause_items_are_split() {
        let kws = extract_job_keywords(
            "Experience with Terraform, Ansible; Helm/ArgoCD & Vault. Nice team.",
            &stop_words(),
        );
        for expected in ["terraform", "ansible", "helm", "argocd", "vault"] {
            assert!(kws.contains(expected), "missing {expected}");
            assert_eq!(kws.source_of(expected), Some(KeywordSource::RequirementClause));
        }
        assert!(!kws.contains("nice team"));
    }

    #[test]
    fn test_colon_clauses() {
        let kws = extract_job_keywords(
            "Must have: GraphQL, gRPC. Tools: Jira, Confluence.",
            &stop_words(),
        );
        for expected in ["graphql", "grpc", "jira", "confluence"] {
            assert!(kws.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_short_and_stop_word_items_are_dropped() {
        let kws = extract_job_keywords("Tools: go, R, the, Rust.", &stop_words());
        assert!(kws.contains("rust"));
        assert!(!kws.contains("go"));
        assert!(!kws.contains("r"));
        assert!(!kws.contains("the"));
    }

    #[test]
    fn test_tech_pattern_source_wins_over_clause() {
        let kws = extract_job_keywords("Proficient in python, pandas.", &stop_words());
        assert_eq!(kws.source_of("python"), Some(KeywordSource::TechPattern));
        assert_eq!(kws.source_of("pandas"), Some(KeywordSource::RequirementClause));
    }

    #[test]
    fn test_resume_tokens_filter_digits_and_stop_words() {
        let kws = extract_resume_keywords(
            "Built 12 services with Node.js and C++ in 2021; shipped 2021-2023.",
            &stop_words(),
        );
        assert!(kws.contains("built"));
        assert!(kws.contains("services"));
        assert!(kws.contains("node.js"));
        assert!(kws.contains("c++"));
        assert!(kws.contains("shipped"));
        assert!(kws.contains("2021-2023"));
        assert!(!kws.contains("with"));
        assert!(!kws.contains("and"));
        assert!(!kws.contains("2021"));
        assert!(kws.iter().all(|k| k.chars().count() >= 3));
    }

    #[test]
    fn test_resume_extraction_ignores_clause_rules() {
        let kws = extract_resume_keywords("Skills: Python, Django.", &stop_words());
        assert!(kws.contains("skills"));
        assert!(kws.contains("python"));
        assert!(kws.iter().all(|k| kws.source_of(k) == Some(KeywordSource::Token)));
    }

    #[test]
    fn test_missing_from_is_sorted_difference() {
        let sw = stop_words();
        let job = extract_job_keywords("Python, Docker, AWS and Kubernetes required.", &sw);
        let resume = extract_resume_keywords("Python and AWS engineer", &sw);
        assert_eq!(job.missing_from(&resume), vec!["docker", "kubernetes"]);
        assert_eq!(job.overlap(&resume), 2);
    }

    #[test]
    fn test_extract_keywords_dispatches_on_mode() {
        let sw = stop_words();
        let text = "Experience with Rust.";
        assert_eq!(
            extract_keywords(text, ExtractionMode::JobDescription, &sw),
            extract_job_keywords(text, &sw)
        );
        assert_eq!(
            extract_keywords(text, ExtractionMode::Resume, &sw),
            extract_resume_keywords(text, &sw)
        );
    }
}
