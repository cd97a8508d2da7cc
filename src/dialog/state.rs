//! Session state types

use crate::word_pool::{PoolError, WordPool};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Smallest word count a player may ask for
pub const DEFAULT_MIN_COUNT: usize = 1;

/// Largest word count a player may ask for
pub const DEFAULT_MAX_COUNT: usize = 10;

/// Position in the game dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    /// Waiting for the user to say how many words they want
    #[default]
    AwaitingCount,
    /// Words have been read out, waiting for the user to repeat them
    AwaitingWords,
    /// Asked whether the user has finished recalling
    AwaitingConfirmation,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::AwaitingCount => "awaiting_count",
            Stage::AwaitingWords => "awaiting_words",
            Stage::AwaitingConfirmation => "awaiting_confirmation",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the game knows about one conversation.
///
/// Owned by the caller between turns. Every target word lives in exactly one
/// of `remaining_words` and `uttered_words`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub stage: Stage,
    /// Words chosen for the current round, in the order they were read out
    pub target_words: Vec<String>,
    /// Target words not yet recalled, in target order
    pub remaining_words: Vec<String>,
    /// Recalled words, in the order the user said them
    pub uttered_words: Vec<String>,
    /// Words heard that were not outstanding at the time
    pub misrecognized_words: Vec<String>,
}

impl Session {
    /// Start a round with freshly drawn words
    pub fn with_targets(target_words: Vec<String>) -> Self {
        Self {
            stage: Stage::AwaitingWords,
            remaining_words: target_words.clone(),
            target_words,
            uttered_words: Vec::new(),
            misrecognized_words: Vec::new(),
        }
    }

    pub fn has_round(&self) -> bool {
        !self.target_words.is_empty()
    }

    pub fn all_recalled(&self) -> bool {
        self.remaining_words.is_empty()
    }

    /// Reconcile one spoken word against the outstanding words.
    ///
    /// Returns `true` when the word was outstanding and is now recalled.
    pub fn record_word(&mut self, word: &str) -> bool {
        if let Some(index) = self.remaining_words.iter().position(|w| w == word) {
            let recalled = self.remaining_words.remove(index);
            self.uttered_words.push(recalled);
            true
        } else {
            self.misrecognized_words.push(word.to_string());
            false
        }
    }

    /// Check the partition between remaining and uttered words
    pub fn is_consistent(&self) -> bool {
        let targets: HashSet<&String> = self.target_words.iter().collect();
        if targets.len() != self.target_words.len() {
            return false;
        }

        let remaining: HashSet<&String> = self.remaining_words.iter().collect();
        let uttered: HashSet<&String> = self.uttered_words.iter().collect();

        remaining.len() == self.remaining_words.len()
            && uttered.len() == self.uttered_words.len()
            && remaining.is_disjoint(&uttered)
            && remaining.union(&uttered).copied().collect::<HashSet<_>>() == targets
    }
}

/// Game rules shared by every session (immutable configuration)
#[derive(Debug, Clone)]
pub struct GameContext {
    pub pool: WordPool,
    pub min_count: usize,
    pub max_count: usize,
}

impl GameContext {
    /// Fails with [`PoolError::InvalidCount`] for an empty or inverted range
    /// and [`PoolError::PoolExhausted`] when the pool cannot serve `max_count`.
    pub fn new(pool: WordPool, min_count: usize, max_count: usize) -> Result<Self, PoolError> {
        if min_count == 0 || min_count > max_count {
            return Err(PoolError::InvalidCount {
                requested: min_count,
                min: 1,
                max: max_count,
            });
        }
        if pool.len() < max_count {
            return Err(PoolError::PoolExhausted {
                requested: max_count,
                available: pool.len(),
            });
        }
        Ok(Self {
            pool,
            min_count,
            max_count,
        })
    }

    /// Built-in vocabulary with the default 1..=10 range
    pub fn builtin() -> Result<Self, PoolError> {
        Self::new(
            WordPool::builtin(DEFAULT_MAX_COUNT)?,
            DEFAULT_MIN_COUNT,
            DEFAULT_MAX_COUNT,
        )
    }

    /// The requested count, if it is a whole number within range
    pub fn accept_count(&self, count: Option<i64>) -> Option<usize> {
        let n = usize::try_from(count?).ok()?;
        (self.min_count..=self.max_count).contains(&n).then_some(n)
    }
}
