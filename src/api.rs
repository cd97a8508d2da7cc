//! HTTP API for the skill endpoint

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::platform::SkillHandler;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub skill: Arc<SkillHandler>,
}

impl AppState {
    pub fn new(skill: SkillHandler) -> Self {
        Self {
            skill: Arc::new(skill),
        }
    }
}
