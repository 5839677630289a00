//! Read-only lookup tables for the match pipeline: skill taxonomy, education
//! levels and stop words. Built once at startup and shared behind an `Arc`.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::text::ENGLISH_STOP_WORDS;

const BUILTIN_TAXONOMY: &[(&str, &[&str])] = &[
    (
        "programming",
        &[
            "python", "java", "javascript", "typescript", "c++", "c#", "php", "ruby", "go", "rust",
            "scala", "kotlin", "swift", "dart", "r", "matlab", "perl", "shell", "bash",
        ],
    ),
    (
        "web_frontend",
        &[
            "react", "vue", "angular", "html", "css", "sass", "less", "bootstrap", "tailwind",
            "jquery", "webpack", "babel", "npm", "yarn", "typescript",
        ],
    ),
    (
        "web_backend",
        &[
            "node.js", "express", "django", "flask", "spring", "rails", "laravel", "asp.net",
            "fastapi", "nestjs", "koa", "gin", "fiber",
        ],
    ),
    (
        "databases",
        &[
            "mysql", "postgresql", "mongodb", "redis", "elasticsearch", "sqlite", "oracle",
            "sql server", "cassandra", "dynamodb", "firebase",
        ],
    ),
    (
        "cloud_devops",
        &[
            "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "gitlab", "github actions",
            "terraform", "ansible", "chef", "puppet", "vagrant",
        ],
    ),
    (
        "data_science",
        &[
            "pandas", "numpy", "scikit-learn", "tensorflow", "pytorch", "keras", "matplotlib",
            "seaborn", "plotly", "jupyter", "r", "stata", "spss",
        ],
    ),
    (
        "mobile",
        &[
            "android", "ios", "react native", "flutter", "swift", "kotlin", "xamarin", "ionic",
            "cordova", "native script",
        ],
    ),
];

const EDUCATION_SYNONYMS: &[(&str, EducationLevel)] = &[
    ("phd", EducationLevel::Doctorate),
    ("doctorate", EducationLevel::Doctorate),
    ("ph.d", EducationLevel::Doctorate),
    ("masters", EducationLevel::Master),
    ("master", EducationLevel::Master),
    ("msc", EducationLevel::Master),
    ("mba", EducationLevel::Master),
    ("ms", EducationLevel::Master),
    ("bachelors", EducationLevel::Bachelor),
    ("bachelor", EducationLevel::Bachelor),
    ("bsc", EducationLevel::Bachelor),
    ("ba", EducationLevel::Bachelor),
    ("btech", EducationLevel::Bachelor),
    ("be", EducationLevel::Bachelor),
    ("associate", EducationLevel::Associate),
    ("diploma", EducationLevel::Associate),
    ("certificate", EducationLevel::Certificate),
    ("certification", EducationLevel::Certificate),
];

/// Compiles a matcher for `token` that only fires when the token is not glued
/// to a neighbouring ASCII letter or digit. Expects lower-cased haystacks.
pub(crate) fn token_matcher(token: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        "(?:^|[^a-z0-9]){}(?:[^a-z0-9]|$)",
        regex::escape(token)
    ))
}

fn normalize_token(token: &str) -> String {
    token.trim().to_lowercase()
}

// ────────────────────────────────────────────────────────────────────────────
// Skill taxonomy
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Skill {
    token: String,
    matcher: Regex,
}

/// One named category of canonical skill tokens.
#[derive(Debug, Clone)]
pub struct SkillCategory {
    pub name: String,
    skills: Vec<Skill>,
}

impl SkillCategory {
    #[cfg(test)]
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.token.as_str())
    }

    /// Category skills mentioned in `text_lower`.
    pub fn present_in<'a>(&'a self, text_lower: &str) -> BTreeSet<&'a str> {
        self.skills
            .iter()
            .filter(|s| s.matcher.is_match(text_lower))
            .map(|s| s.token.as_str())
            .collect()
    }
}

/// Category name → ordered, de-duplicated, lower-case skill tokens.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    categories: Vec<SkillCategory>,
}

impl SkillTaxonomy {
    /// Normalizes and validates raw category lists. Tokens are trimmed and
    /// lower-cased, blanks dropped, and repeats within a category removed
    /// (first occurrence wins). A category left empty is an error.
    pub fn new<I, S>(categories: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: AsRef<str>,
    {
        let mut built = Vec::new();

        for (name, raw_skills) in categories {
            let name = name.as_ref().trim().to_string();
            if name.is_empty() {
                return Err(AppError::Config(
                    "skill taxonomy category names cannot be empty".to_string(),
                ));
            }

            let mut seen = HashSet::new();
            let mut skills = Vec::new();
            for raw in raw_skills {
                let token = normalize_token(raw.as_ref());
                if token.is_empty() || !seen.insert(token.clone()) {
                    continue;
                }
                let matcher = token_matcher(&token).map_err(|e| {
                    AppError::Config(format!("invalid skill token '{token}': {e}"))
                })?;
                skills.push(Skill { token, matcher });
            }

            if skills.is_empty() {
                return Err(AppError::Config(format!(
                    "skill taxonomy category '{name}' has no skills"
                )));
            }

            built.push(SkillCategory { name, skills });
        }

        if built.is_empty() {
            return Err(AppError::Config(
                "skill taxonomy must contain at least one category".to_string(),
            ));
        }

        Ok(Self { categories: built })
    }

    /// Loads a `{ "category": ["skill", ...] }` JSON document.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        let parsed: BTreeMap<String, Vec<String>> = serde_json::from_str(&raw)?;
        Self::new(parsed)
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::new(
            BUILTIN_TAXONOMY
                .iter()
                .map(|(name, skills)| (*name, skills.to_vec())),
        )
        .expect("built-in skill taxonomy is valid")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Education levels
// ────────────────────────────────────────────────────────────────────────────

/// Ordered credential levels; a higher rank is a higher credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    Certificate = 1,
    Associate = 2,
    Bachelor = 3,
    Master = 4,
    Doctorate = 5,
}

impl EducationLevel {
    pub fn rank(self) -> u8 {
        self as u8
    }
}

/// Surface forms ("mba", "btech", ...) mapped to exactly one level each.
#[derive(Debug, Clone)]
pub struct EducationTable {
    synonyms: Vec<(String, EducationLevel, Regex)>,
}

impl EducationTable {
    pub fn new<S: AsRef<str>>(
        entries: impl IntoIterator<Item = (S, EducationLevel)>,
    ) -> Result<Self, AppError> {
        let mut levels: HashMap<String, EducationLevel> = HashMap::new();
        let mut synonyms = Vec::new();

        for (raw, level) in entries {
            let synonym = normalize_token(raw.as_ref());
            if synonym.is_empty() {
                continue;
            }
            match levels.get(&synonym) {
                Some(existing) if *existing != level => {
                    return Err(AppError::Config(format!(
                        "education synonym '{synonym}' maps to both {existing:?} and {level:?}"
                    )));
                }
                Some(_) => continue,
                None => {}
            }
            let matcher = token_matcher(&synonym).map_err(|e| {
                AppError::Config(format!("invalid education synonym '{synonym}': {e}"))
            })?;
            levels.insert(synonym.clone(), level);
            synonyms.push((synonym, level, matcher));
        }

        Ok(Self { synonyms })
    }

    /// Highest level whose synonym appears in `text_lower`, if any.
    pub fn highest_level_in(&self, text_lower: &str) -> Option<EducationLevel> {
        self.synonyms
            .iter()
            .filter(|(_, _, matcher)| matcher.is_match(text_lower))
            .map(|(_, level, _)| *level)
            .max()
    }

    #[cfg(test)]
    pub fn level_of(&self, synonym: &str) -> Option<EducationLevel> {
        let synonym = normalize_token(synonym);
        self.synonyms
            .iter()
            .find(|(s, _, _)| *s == synonym)
            .map(|(_, level, _)| *level)
    }
}

impl Default for EducationTable {
    fn default() -> Self {
        Self::new(EDUCATION_SYNONYMS.iter().copied())
            .expect("built-in education synonyms are valid")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stop words and the bundle
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct StopWords(HashSet<String>);

impl StopWords {
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self(ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()).collect())
    }
}

/// Every read-only table the scoring core consults.
#[derive(Debug, Clone, Default)]
pub struct ScoringTables {
    pub taxonomy: SkillTaxonomy,
    pub education: EducationTable,
    pub stop_words: StopWords,
}

impl ScoringTables {
    pub fn load(config: &Config) -> Result<Self, AppError> {
        let taxonomy = match &config.skill_taxonomy_path {
            Some(path) => {
                let taxonomy = SkillTaxonomy::from_json_file(path)?;
                info!(
                    "Loaded skill taxonomy from {} ({} categories)",
                    path.display(),
                    taxonomy.categories().len()
                );
                taxonomy
            }
            None => SkillTaxonomy::default(),
        };

        Ok(Self {
            taxonomy,
            education: EducationTable::default(),
            stop_words: StopWords::default(),
        })
    }
}
