use std::sync::Arc;

use crate::analysis::ResumeAnalyzer;
use crate::config::Config;
use crate::errors::AppError;
use crate::matching::tables::ScoringTables;
use crate::matching::MatchEngine;

/// Shared application state handed to every command handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    /// Owns the match engine and, through it, the shared scoring tables.
    pub analyzer: ResumeAnalyzer,
}

impl AppState {
    /// Loads the scoring tables once and wires them into the analyzer.
    pub fn build(config: Config) -> Result<Self, AppError> {
        let tables = Arc::new(ScoringTables::load(&config)?);
        let engine = MatchEngine::new(tables, config.max_text_bytes);
        Ok(Self {
            config,
            analyzer: ResumeAnalyzer::new(engine),
        })
    }

    pub fn engine(&self) -> &MatchEngine {
        self.analyzer.engine()
    }
}
