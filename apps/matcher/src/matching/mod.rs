// Job-match pipeline: keyword, skill, experience, education and lexical
// signals blended into one weighted score.
// Every component is pure over two text inputs plus the shared read-only tables.

pub mod composite;
pub mod education;
pub mod engine;
pub mod experience;
pub mod keywords;
pub mod lexical;
pub mod skills;
pub mod tables;

use thiserror::Error;
use tracing::warn;

pub use engine::MatchEngine;

/// Recoverable failure inside one scoring component. Never escapes the
/// component: callers substitute that component's fallback score.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("input of {len} bytes exceeds the {limit}-byte scoring limit")]
    InputTooLarge { len: usize, limit: usize },

    #[error("no terms remain after tokenization and pruning")]
    EmptyVocabulary,
}

/// Unwraps a component score or substitutes its fixed fallback.
pub(crate) fn or_fallback(component: &str, result: Result<f64, ScoringError>, fallback: f64) -> f64 {
    match result {
        Ok(score) => score,
        Err(e) => {
            warn!("{component} scoring failed ({e}); using fallback {fallback}");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_fallback_passes_scores_through() {
        assert_eq!(or_fallback("skills", Ok(0.75), 0.3), 0.75);
    }

    #[test]
    fn test_or_fallback_substitutes_on_error() {
        assert_eq!(
            or_fallback("lexical", Err(ScoringError::EmptyVocabulary), 0.3),
            0.3
        );
    }
}
