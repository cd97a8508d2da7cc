//! Dialog error types

use crate::word_pool::PoolError;
use thiserror::Error;

/// Errors that reach the caller instead of becoming a spoken prompt
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// The dispatcher forwarded an intent the game does not know
    #[error("Unknown intent: {0}")]
    UnknownIntent(String),
    /// Word selection could not be satisfied by the configured vocabulary
    #[error(transparent)]
    Pool(#[from] PoolError),
}
