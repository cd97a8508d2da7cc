//! Remember Me - a word memorization game for voice assistants
//!
//! The dialog state machine lives in [`dialog`]; [`platform`] adapts voice
//! platform envelopes to it and [`api`] serves them over HTTP.

pub mod api;
pub mod config;
pub mod dialog;
pub mod platform;
pub mod word_pool;
