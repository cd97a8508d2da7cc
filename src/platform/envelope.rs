//! Voice platform request and response envelopes

use crate::dialog::SlotValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const ENVELOPE_VERSION: &str = "1.0";

// ============================================================================
// Inbound
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub session: Option<SessionInfo>,
    #[serde(default)]
    pub context: Option<Context>,
    pub request: Request,
}

impl RequestEnvelope {
    /// Application id from the session, falling back to the system context
    pub fn application_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|s| s.application.as_ref())
            .or_else(|| self.context.as_ref().map(|c| &c.system.application))
            .map(|app| app.application_id.as_str())
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.session_id.as_str())
    }

    pub fn is_new_session(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.new)
    }

    /// Raw session attributes, if the platform sent any
    pub fn attributes(&self) -> Option<&Value> {
        self.session
            .as_ref()
            .and_then(|s| s.attributes.as_ref())
            .filter(|v| !v.is_null())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    #[serde(default)]
    pub new: bool,
    pub session_id: String,
    #[serde(default)]
    pub application: Option<Application>,
    #[serde(default)]
    pub attributes: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Context {
    #[serde(rename = "System")]
    pub system: SystemContext,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemContext {
    pub application: Application,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    LaunchRequest(RequestInfo),
    IntentRequest(IntentRequest),
    SessionEndedRequest(SessionEndedRequest),
    /// Request types the game does not handle
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    #[serde(default)]
    pub request_id: Option<String>,
    pub intent: IntentPayload,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndedRequest {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntentPayload {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, SlotPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotPayload {
    #[serde(default)]
    pub value: Option<SlotValue>,
}

// ============================================================================
// Outbound
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<Value>,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
    PlainText { text: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum CardPayload {
    Simple { title: String, content: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_intent_request() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "version": "1.0",
            "session": {
                "new": false,
                "sessionId": "s-1",
                "application": { "applicationId": "app-1" },
                "attributes": { "stage": "awaitingWords" }
            },
            "request": {
                "type": "IntentRequest",
                "requestId": "r-1",
                "intent": {
                    "name": "WordRecognitionIntent",
                    "slots": {
                        "word_one": { "name": "word_one", "value": "chair" },
                        "word_two": { "name": "word_two" }
                    }
                }
            }
        }))
        .unwrap();

        assert_eq!(envelope.application_id(), Some("app-1"));
        assert_eq!(envelope.session_id(), Some("s-1"));
        assert!(!envelope.is_new_session());
        let Request::IntentRequest(request) = envelope.request else {
            panic!("expected intent request");
        };
        assert_eq!(request.intent.name, "WordRecognitionIntent");
        assert_eq!(
            request.intent.slots["word_one"].value,
            Some(SlotValue::Text("chair".to_string()))
        );
        assert!(request.intent.slots["word_two"].value.is_none());
    }

    #[test]
    fn test_application_id_from_context() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "context": { "System": { "application": { "applicationId": "app-2" } } },
            "request": { "type": "LaunchRequest" }
        }))
        .unwrap();
        assert_eq!(envelope.application_id(), Some("app-2"));
        assert!(matches!(envelope.request, Request::LaunchRequest(_)));
    }

    #[test]
    fn test_unsupported_request_type() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "request": { "type": "AudioPlayer.PlaybackStarted" }
        }))
        .unwrap();
        assert!(matches!(envelope.request, Request::Unsupported));
    }

    #[test]
    fn test_response_shape() {
        let envelope = ResponseEnvelope {
            version: ENVELOPE_VERSION.to_string(),
            session_attributes: None,
            response: ResponseBody {
                output_speech: Some(OutputSpeech::Ssml {
                    ssml: "<speak>Hi</speak>".to_string(),
                }),
                card: Some(CardPayload::Simple {
                    title: "T".to_string(),
                    content: "C".to_string(),
                }),
                reprompt: None,
                should_end_session: true,
            },
        };
        let value = serde_json::to_value(envelope).unwrap();
        assert_eq!(value["response"]["outputSpeech"]["type"], "SSML");
        assert_eq!(value["response"]["card"]["type"], "Simple");
        assert_eq!(value["response"]["shouldEndSession"], true);
        assert!(value.get("sessionAttributes").is_none());
    }
}
