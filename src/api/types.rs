//! API response types

use serde::Serialize;

/// Health probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub vocabulary_size: usize,
    pub min_count: usize,
    pub max_count: usize,
}

/// Build version
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub name: &'static str,
    pub version: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
