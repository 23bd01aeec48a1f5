use thiserror::Error;

/// Errors that end a scoring or weight-validation call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("Invalid weight configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Invalid profile {id}: {reason}")]
    InvalidProfile { id: String, reason: String },

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
}

impl MatchError {
    /// Stable code surfaced to API callers
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::InvalidConfiguration(_) => "InvalidConfiguration",
            MatchError::EmptyInput(_) => "EmptyInput",
            MatchError::InvalidProfile { .. } => "InvalidProfile",
            MatchError::DuplicateId { .. } => "DuplicateId",
        }
    }
}

/// Warning code for skill tags outside the controlled vocabulary
pub const UNKNOWN_SKILL_TAG: &str = "UnknownSkillTag";
