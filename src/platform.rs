//! Voice platform integration
//!
//! Translates platform envelopes into dialog turns and back: application id
//! checks, intent name mapping, session attributes and SSML output.

mod dispatch;
pub mod envelope;
pub mod ssml;

pub use dispatch::{PlatformError, SkillHandler};
pub use envelope::{RequestEnvelope, ResponseEnvelope};
