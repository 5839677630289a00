//! TF-IDF cosine similarity between a resume and a job description.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::matching::engine::MatchEngine;
use crate::matching::tables::StopWords;
use crate::matching::{or_fallback, ScoringError};

pub const LEXICAL_NEUTRAL: f64 = 0.5;
pub const LEXICAL_FALLBACK: f64 = 0.3;

/// Two or more word characters.
static TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("term regex is valid"));

#[derive(Debug, Clone, PartialEq)]
pub struct TfidfParams {
    /// Inclusive n-gram bounds.
    pub ngram_range: (usize, usize),
    pub max_features: usize,
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum share of documents a term may appear in.
    pub max_df: f64,
}

impl Default for TfidfParams {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            max_features: 1000,
            min_df: 1,
            max_df: 0.95,
        }
    }
}

/// Dense, L2-normalized document vectors over a shared vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfMatrix {
    pub vocabulary: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    /// Cosine of two rows. Rows are unit length, or all zeros when a document
    /// kept no terms, so the dot product is the cosine.
    pub fn cosine(&self, a: usize, b: usize) -> f64 {
        match (self.rows.get(a), self.rows.get(b)) {
            (Some(x), Some(y)) => x.iter().zip(y).map(|(p, q)| p * q).sum(),
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TfidfVectorizer<'a> {
    params: &'a TfidfParams,
    stop_words: &'a StopWords,
}

impl<'a> TfidfVectorizer<'a> {
    pub fn new(params: &'a TfidfParams, stop_words: &'a StopWords) -> Self {
        Self { params, stop_words }
    }

    /// Lower-cases, drops stop words, then joins neighbouring survivors into n-grams.
    pub fn analyze(&self, doc: &str) -> Vec<String> {
        let lower = doc.to_lowercase();
        let tokens: Vec<&str> = TERM
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(t))
            .collect();

        let (min_n, max_n) = self.params.ngram_range;
        let mut terms = Vec::new();
        for n in min_n.max(1)..=max_n {
            if tokens.len() < n {
                break;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }

    pub fn fit_transform(&self, docs: &[&str]) -> Result<TfidfMatrix, ScoringError> {
        let n_docs = docs.len();
        let counts: Vec<HashMap<String, usize>> = docs
            .iter()
            .map(|doc| {
                let mut tf = HashMap::new();
                for term in self.analyze(doc) {
                    *tf.entry(term).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut df: HashMap<&str, usize> = HashMap::new();
        let mut corpus_count: HashMap<&str, usize> = HashMap::new();
        for tf in &counts {
            for (term, count) in tf {
                *df.entry(term).or_insert(0) += 1;
                *corpus_count.entry(term).or_insert(0) += count;
            }
        }

        // Ceiling so that a share like 0.95 of two documents still admits both.
        let max_doc_count = (self.params.max_df * n_docs as f64 - 1e-9).ceil().max(0.0) as usize;
        let mut kept: Vec<(&str, usize)> = corpus_count
            .into_iter()
            .filter(|(term, _)| {
                let d = df[term];
                d >= self.params.min_df && d <= max_doc_count
            })
            .collect();

        if kept.is_empty() {
            return Err(ScoringError::EmptyVocabulary);
        }

        kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        kept.truncate(self.params.max_features);
        kept.sort_by(|a, b| a.0.cmp(b.0));

        let vocabulary: Vec<String> = kept.iter().map(|(t, _)| t.to_string()).collect();
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|t| ((1 + n_docs) as f64 / (1 + df[t.as_str()]) as f64).ln() + 1.0)
            .collect();

        let rows = counts
            .iter()
            .map(|tf| {
                let mut row: Vec<f64> = vocabulary
                    .iter()
                    .zip(&idf)
                    .map(|(term, w)| tf.get(term).copied().unwrap_or(0) as f64 * w)
                    .collect();
                let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|v| *v /= norm);
                }
                row
            })
            .collect();

        Ok(TfidfMatrix { vocabulary, rows })
    }
}

impl MatchEngine {
    pub fn try_lexical_similarity(&self, resume_text: &str, job_text: &str) -> Result<f64, ScoringError> {
        if job_text.trim().is_empty() {
            return Ok(LEXICAL_NEUTRAL);
        }
        self.check_inputs(&[resume_text, job_text])?;

        let params = TfidfParams::default();
        let vectorizer = TfidfVectorizer::new(&params, &self.tables.stop_words);
        let matrix = vectorizer.fit_transform(&[resume_text, job_text])?;
        let similarity = matrix.cosine(0, 1).clamp(0.0, 1.0);

        debug!(
            "lexical similarity {similarity:.4} over {} terms",
            matrix.vocabulary.len()
        );
        Ok(similarity)
    }

    pub fn lexical_similarity(&self, resume_text: &str, job_text: &str) -> f64 {
        or_fallback(
            "lexical",
            self.try_lexical_similarity(resume_text, job_text),
            LEXICAL_FALLBACK,
        )
    }
}
