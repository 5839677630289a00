use serde::{Deserialize, Serialize};

/// A named resume text, as submitted to comparison and batch ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeInput {
    /// Display name, usually the source filename.
    pub name: String,
    pub text: String,
}

impl ResumeInput {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}
