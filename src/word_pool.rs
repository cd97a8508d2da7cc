//! Vocabulary and random word selection
//!
//! Draws distinct words without replacement. Selection is uniform over
//! subsets of the requested size.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Built-in vocabulary used when none is configured
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "chair",
    "table",
    "pen",
    "computer",
    "pencil",
    "eraser",
    "fan",
    "light",
    "bed",
    "stove",
    "car",
    "cup",
    "toothbrush",
    "guitar",
    "phone",
    "book",
    "aeroplane",
    "bottle",
    "shirt",
    "pant",
];

/// Rejected draws allowed per requested word before switching to a shuffle
const REJECTIONS_PER_WORD: usize = 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Word count {requested} is outside the allowed range {min}..={max}")]
    InvalidCount {
        requested: usize,
        min: usize,
        max: usize,
    },
    #[error("Vocabulary holds {available} distinct words but {requested} were requested")]
    PoolExhausted { requested: usize, available: usize },
}

/// A fixed set of distinct candidate words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Build a pool that can serve at least `max_count` distinct words.
    ///
    /// Duplicates and blank entries are dropped, keeping first occurrence
    /// order. Fails with [`PoolError::PoolExhausted`] when what remains is
    /// smaller than `max_count`.
    pub fn new<I, S>(vocabulary: I, max_count: usize) -> Result<Self, PoolError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: Vec<String> = Vec::new();
        for word in vocabulary {
            let word = word.into();
            if word.trim().is_empty() || words.contains(&word) {
                continue;
            }
            words.push(word);
        }

        if words.len() < max_count {
            return Err(PoolError::PoolExhausted {
                requested: max_count,
                available: words.len(),
            });
        }

        Ok(Self { words })
    }

    /// Pool over [`DEFAULT_VOCABULARY`]
    pub fn builtin(max_count: usize) -> Result<Self, PoolError> {
        Self::new(DEFAULT_VOCABULARY.iter().copied(), max_count)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Draw `n` distinct words.
    ///
    /// Uses rejection sampling on uniformly drawn indices. If the rejection
    /// budget runs out, falls back to a partial shuffle, which keeps the
    /// call bounded no matter how unlucky the draws are.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<String>, PoolError> {
        if n > self.words.len() {
            return Err(PoolError::PoolExhausted {
                requested: n,
                available: self.words.len(),
            });
        }

        let mut chosen: Vec<usize> = Vec::with_capacity(n);
        let mut rejections = 0;
        let budget = n.saturating_mul(REJECTIONS_PER_WORD);

        while chosen.len() < n {
            let index = rng.gen_range(0..self.words.len());
            if chosen.contains(&index) {
                rejections += 1;
                if rejections > budget {
                    tracing::debug!(n, rejections, "Rejection budget exceeded, shuffling");
                    return Ok(self
                        .words
                        .choose_multiple(rng, n)
                        .cloned()
                        .collect());
                }
                continue;
            }
            chosen.push(index);
        }

        Ok(chosen.into_iter().map(|i| self.words[i].clone()).collect())
    }
}
