use serde::{Deserialize, Serialize};
use crate::core::MatchError;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl From<&MatchError> for ErrorResponse {
    fn from(err: &MatchError) -> Self {
        Self {
            error: err.code().to_string(),
            message: err.to_string(),
            status_code: 400,
        }
    }
}
