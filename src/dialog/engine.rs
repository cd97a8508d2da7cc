//! Dialog engine: one entry point per turn
//!
//! Wraps the pure [`transition`] with the game rules and a shared random
//! source. The engine keeps no session state between calls.

use super::intent::Slots;
use super::speech::SpokenResponse;
use super::state::{GameContext, Session};
use super::transition::transition;
use super::{DialogError, Intent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Mutex;

pub struct DialogEngine {
    context: GameContext,
    rng: Mutex<StdRng>,
}

impl DialogEngine {
    /// Engine seeded from OS entropy
    pub fn new(context: GameContext) -> Self {
        Self::with_rng(context, StdRng::from_entropy())
    }

    /// Engine with reproducible word selection
    pub fn with_seed(context: GameContext, seed: u64) -> Self {
        Self::with_rng(context, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(context: GameContext, rng: StdRng) -> Self {
        Self {
            context,
            rng: Mutex::new(rng),
        }
    }

    pub fn context(&self) -> &GameContext {
        &self.context
    }

    /// Handle one turn named by intent.
    ///
    /// Fails with [`DialogError::UnknownIntent`] when `intent_name` is not a
    /// game intent; the caller decides how to answer in that case.
    pub fn handle(
        &self,
        intent_name: &str,
        slots: &Slots,
        session: &Session,
    ) -> Result<(Session, SpokenResponse), DialogError> {
        let intent = Intent::parse(intent_name, slots).inspect_err(|e| {
            tracing::debug!(intent = %intent_name, error = %e, "Rejected intent");
        })?;
        self.apply(intent, session)
    }

    /// Start or restart the game
    pub fn launch(&self, session: &Session) -> Result<(Session, SpokenResponse), DialogError> {
        self.apply(Intent::Launch, session)
    }

    /// Handle an already parsed intent
    pub fn apply(
        &self,
        intent: Intent,
        session: &Session,
    ) -> Result<(Session, SpokenResponse), DialogError> {
        let kind = intent.kind();
        let from = session.stage;

        let result = {
            // A panic while sampling leaves the generator usable
            let mut rng = self
                .rng
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            transition(session, &self.context, intent, &mut *rng)
        };

        match result {
            Ok(result) => {
                tracing::info!(
                    intent = kind,
                    from = %from,
                    to = %result.session.stage,
                    remaining = result.session.remaining_words.len(),
                    end_session = !result.response.continue_session,
                    "Dialog transition"
                );
                Ok((result.session, result.response))
            }
            Err(e) => {
                tracing::error!(intent = kind, stage = %from, error = %e, "Dialog transition failed");
                Err(e)
            }
        }
    }
}
