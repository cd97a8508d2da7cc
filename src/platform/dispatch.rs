//! Request dispatch between the voice platform and the dialog engine

use super::envelope::{
    CardPayload, IntentRequest, OutputSpeech, Reprompt, Request, RequestEnvelope, ResponseBody,
    ResponseEnvelope, ENVELOPE_VERSION,
};
use super::ssml;
use crate::dialog::intent::{self, ANSWER_SLOT};
use crate::dialog::{DialogEngine, DialogError, Session, SlotValue, Slots, SpokenResponse, Stage};
use serde_json::Value;
use thiserror::Error;

const FALLBACK_SPEECH: &str = "Sorry, I didn't understand that.";

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Invalid applicationId: {0}")]
    InvalidApplicationId(String),
    #[error("Request carries no applicationId")]
    MissingApplicationId,
    #[error("Dialog failed: {0}")]
    Dialog(#[from] DialogError),
}

/// Platform intent name to game intent name, plus any implied slot
fn map_intent(name: &str) -> (&str, Option<(&'static str, &'static str)>) {
    match name {
        "LaunchIntent" => (intent::LAUNCH, None),
        "NumberOfWordsIntent" => (intent::PROVIDE_COUNT, None),
        "WordRecognitionIntent" => (intent::PROVIDE_WORDS, None),
        "AMAZON.YesIntent" => (intent::CONFIRM_DONE, Some((ANSWER_SLOT, "yes"))),
        "AMAZON.NoIntent" => (intent::CONFIRM_DONE, Some((ANSWER_SLOT, "no"))),
        "AMAZON.HelpIntent" => (intent::HELP, None),
        "AMAZON.StopIntent" => (intent::STOP, None),
        "AMAZON.CancelIntent" => (intent::CANCEL, None),
        other => (other, None),
    }
}

/// Handles platform envelopes for the game
pub struct SkillHandler {
    engine: DialogEngine,
    application_id: Option<String>,
}

impl SkillHandler {
    /// `application_id` of `None` accepts requests from any application
    pub fn new(engine: DialogEngine, application_id: Option<String>) -> Self {
        Self {
            engine,
            application_id,
        }
    }

    pub fn engine(&self) -> &DialogEngine {
        &self.engine
    }

    pub fn handle(&self, envelope: &RequestEnvelope) -> Result<ResponseEnvelope, PlatformError> {
        self.verify_application(envelope)?;

        let session_id = envelope.session_id().unwrap_or("-");
        let _span = tracing::info_span!("skill_request", session_id).entered();
        if envelope.is_new_session() {
            tracing::info!(session_id, "Session started");
        }

        let session = decode_session(envelope.attributes(), session_id);

        match &envelope.request {
            Request::LaunchRequest(_) => {
                tracing::info!(session_id, "Launch");
                let (session, response) = self.engine.launch(&session)?;
                Ok(respond(&session, &response))
            }
            Request::IntentRequest(request) => self.handle_intent(request, &session, session_id),
            Request::SessionEndedRequest(ended) => {
                tracing::info!(
                    session_id,
                    reason = ended.reason.as_deref().unwrap_or("unknown"),
                    "Session ended"
                );
                Ok(empty_response())
            }
            Request::Unsupported => {
                tracing::warn!(session_id, "Ignoring unsupported request type");
                Ok(empty_response())
            }
        }
    }

    fn handle_intent(
        &self,
        request: &IntentRequest,
        session: &Session,
        session_id: &str,
    ) -> Result<ResponseEnvelope, PlatformError> {
        let (name, implied) = map_intent(&request.intent.name);

        let mut slots: Slots = request
            .intent
            .slots
            .iter()
            .map(|(slot, payload)| (slot.clone(), payload.value.clone()))
            .collect();
        if let Some((slot, value)) = implied {
            slots.insert(slot.to_string(), Some(SlotValue::from(value)));
        }

        tracing::debug!(session_id, platform_intent = %request.intent.name, intent = name, "Dispatching intent");

        match self.engine.handle(name, &slots, session) {
            Ok((session, response)) => Ok(respond(&session, &response)),
            Err(DialogError::UnknownIntent(name)) => {
                tracing::warn!(session_id, intent = %name, "Unknown intent, answering with fallback");
                Ok(fallback_response(session))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn verify_application(&self, envelope: &RequestEnvelope) -> Result<(), PlatformError> {
        let Some(expected) = &self.application_id else {
            return Ok(());
        };
        match envelope.application_id() {
            Some(actual) if actual == expected => Ok(()),
            Some(actual) => {
                tracing::warn!(application_id = %actual, "Rejected request for another application");
                Err(PlatformError::InvalidApplicationId(actual.to_string()))
            }
            None => Err(PlatformError::MissingApplicationId),
        }
    }
}

/// Session from platform attributes; anything unreadable or inconsistent
/// starts fresh
fn decode_session(attributes: Option<&Value>, session_id: &str) -> Session {
    let Some(attributes) = attributes else {
        return Session::default();
    };
    let session: Session = match serde_json::from_value(attributes.clone()) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(session_id, error = %e, "Unreadable session attributes, starting fresh");
            return Session::default();
        }
    };

    // Past AwaitingCount there must be a round to play
    if !session.is_consistent() || (session.stage != Stage::AwaitingCount && !session.has_round()) {
        tracing::warn!(
            session_id,
            stage = %session.stage,
            targets = session.target_words.len(),
            "Inconsistent session attributes, starting fresh"
        );
        return Session::default();
    }
    session
}

fn encode_session(session: &Session) -> Option<Value> {
    serde_json::to_value(session).ok()
}

fn respond(session: &Session, response: &SpokenResponse) -> ResponseEnvelope {
    ResponseEnvelope {
        version: ENVELOPE_VERSION.to_string(),
        session_attributes: encode_session(session),
        response: ResponseBody {
            output_speech: Some(OutputSpeech::Ssml {
                ssml: ssml::render(&response.speech),
            }),
            card: response.card.as_ref().map(|card| CardPayload::Simple {
                title: card.title.clone(),
                content: card.content.clone(),
            }),
            reprompt: response.reprompt.as_ref().map(|speech| Reprompt {
                output_speech: OutputSpeech::Ssml {
                    ssml: ssml::render(speech),
                },
            }),
            should_end_session: !response.continue_session,
        },
    }
}

fn fallback_response(session: &Session) -> ResponseEnvelope {
    let speech = || OutputSpeech::PlainText {
        text: FALLBACK_SPEECH.to_string(),
    };
    ResponseEnvelope {
        version: ENVELOPE_VERSION.to_string(),
        session_attributes: encode_session(session),
        response: ResponseBody {
            output_speech: Some(speech()),
            card: None,
            reprompt: Some(Reprompt {
                output_speech: speech(),
            }),
            should_end_session: false,
        },
    }
}

fn empty_response() -> ResponseEnvelope {
    ResponseEnvelope {
        version: ENVELOPE_VERSION.to_string(),
        session_attributes: None,
        response: ResponseBody {
            should_end_session: true,
            ..ResponseBody::default()
        },
    }
}
