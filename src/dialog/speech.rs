//! Spoken responses produced by transitions

use std::time::Duration;

/// Pause read out after each word in a list
pub const WORD_PAUSE: Duration = Duration::from_secs(1);

/// Title shown on every card
pub const CARD_TITLE: &str = "Remember Me";

/// One piece of speech: text or a pause of some length
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Pause(Duration),
}

/// Plain text with abstract pause markers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Speech {
    segments: Vec<Segment>,
}

impl Speech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new().then(text)
    }

    /// Append text, separated from any earlier text by a space
    #[must_use]
    pub fn then(mut self, text: impl Into<String>) -> Self {
        self.segments.push(Segment::Text(text.into()));
        self
    }

    #[must_use]
    pub fn pause(mut self, duration: Duration) -> Self {
        self.segments.push(Segment::Pause(duration));
        self
    }

    /// Append each word followed by a pause
    #[must_use]
    pub fn paced_words<'a>(mut self, words: impl IntoIterator<Item = &'a String>) -> Self {
        for word in words {
            self = self.then(word.clone()).pause(WORD_PAUSE);
        }
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Text segments joined by single spaces, pauses dropped
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Text(text) => Some(text.as_str()),
                Segment::Pause(_) => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Simple card shown alongside the speech
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub content: String,
}

impl Card {
    pub fn for_speech(speech: &Speech) -> Self {
        Self {
            title: CARD_TITLE.to_string(),
            content: speech.plain_text(),
        }
    }
}

/// What the assistant says back for one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenResponse {
    pub speech: Speech,
    /// Played if the user stays silent
    pub reprompt: Option<Speech>,
    pub card: Option<Card>,
    /// `false` once the conversation is over
    pub continue_session: bool,
}

impl SpokenResponse {
    /// Keep the conversation open and wait for an answer
    pub fn ask(speech: Speech, reprompt: Speech) -> Self {
        Self {
            speech,
            reprompt: Some(reprompt),
            card: None,
            continue_session: true,
        }
    }

    /// Say something and end the conversation
    pub fn tell(speech: Speech) -> Self {
        Self {
            speech,
            reprompt: None,
            card: None,
            continue_session: false,
        }
    }

    /// Attach a card mirroring the speech
    #[must_use]
    pub fn with_card(mut self) -> Self {
        self.card = Some(Card::for_speech(&self.speech));
        self
    }

    pub fn speech_text(&self) -> String {
        self.speech.plain_text()
    }
}
