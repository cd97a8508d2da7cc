//! Intents that drive the dialog

use super::DialogError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const LAUNCH: &str = "Launch";
pub const PROVIDE_COUNT: &str = "ProvideCount";
pub const PROVIDE_WORDS: &str = "ProvideWords";
pub const CONFIRM_DONE: &str = "ConfirmDone";
pub const HELP: &str = "Help";
pub const STOP: &str = "Stop";
pub const CANCEL: &str = "Cancel";

/// Slot carrying the requested number of words
pub const COUNT_SLOT: &str = "NumberOfWords";

/// Slot carrying the yes/no answer to "are you done?"
pub const ANSWER_SLOT: &str = "Answer";

/// Word slots, in the order they are reconciled
pub const WORD_SLOTS: [&str; 10] = [
    "word_one",
    "word_two",
    "word_three",
    "word_four",
    "word_five",
    "word_six",
    "word_seven",
    "word_eight",
    "word_nine",
    "word_ten",
];

/// A slot value as delivered by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SlotValue {
    /// Interpret the value as a whole number, if it is one
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SlotValue::Integer(n) => Some(*n),
            SlotValue::Float(_) => None,
            SlotValue::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Non-empty textual form of the value
    pub fn as_text(&self) -> Option<String> {
        match self {
            SlotValue::Integer(n) => Some(n.to_string()),
            SlotValue::Float(f) => Some(f.to_string()),
            SlotValue::Text(text) if text.trim().is_empty() => None,
            SlotValue::Text(text) => Some(text.clone()),
        }
    }
}

impl From<&str> for SlotValue {
    fn from(value: &str) -> Self {
        SlotValue::Text(value.to_string())
    }
}

impl From<i64> for SlotValue {
    fn from(value: i64) -> Self {
        SlotValue::Integer(value)
    }
}

/// Slot name to optional value
pub type Slots = HashMap<String, Option<SlotValue>>;

/// A recognized user action with its parsed slots
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Launch,
    /// `None` when the spoken count was missing or not a whole number
    ProvideCount { count: Option<i64> },
    /// Filled word slots, in slot order
    ProvideWords { words: Vec<String> },
    /// `None` when the answer could not be read as yes or no
    ConfirmDone { done: Option<bool> },
    Help,
    Stop,
    Cancel,
}

impl Intent {
    /// Parse an intent name and its slots.
    ///
    /// Fails with [`DialogError::UnknownIntent`] for names outside the game.
    pub fn parse(name: &str, slots: &Slots) -> Result<Self, DialogError> {
        let intent = match name {
            LAUNCH => Intent::Launch,
            PROVIDE_COUNT => Intent::ProvideCount {
                count: slot(slots, COUNT_SLOT).and_then(SlotValue::as_integer),
            },
            PROVIDE_WORDS => Intent::ProvideWords {
                words: WORD_SLOTS
                    .iter()
                    .filter_map(|name| slot(slots, name).and_then(SlotValue::as_text))
                    .collect(),
            },
            CONFIRM_DONE => Intent::ConfirmDone {
                done: slot(slots, ANSWER_SLOT)
                    .and_then(SlotValue::as_text)
                    .and_then(|answer| parse_answer(&answer)),
            },
            HELP => Intent::Help,
            STOP => Intent::Stop,
            CANCEL => Intent::Cancel,
            other => return Err(DialogError::UnknownIntent(other.to_string())),
        };
        Ok(intent)
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::Launch => LAUNCH,
            Intent::ProvideCount { .. } => PROVIDE_COUNT,
            Intent::ProvideWords { .. } => PROVIDE_WORDS,
            Intent::ConfirmDone { .. } => CONFIRM_DONE,
            Intent::Help => HELP,
            Intent::Stop => STOP,
            Intent::Cancel => CANCEL,
        }
    }
}

fn slot<'a>(slots: &'a Slots, name: &str) -> Option<&'a SlotValue> {
    slots.get(name).and_then(Option::as_ref)
}

fn parse_answer(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "yes" | "yeah" | "yep" | "sure" => Some(true),
        "no" | "nope" | "not yet" => Some(false),
        _ => None,
    }
}
