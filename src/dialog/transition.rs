//! Pure state transition function
//!
//! Given a session, the game rules, an intent and a random source, produce
//! the next session and what to say. No I/O happens here.

use super::speech::{Speech, SpokenResponse};
use super::state::{GameContext, Session, Stage};
use super::{DialogError, Intent};
use rand::Rng;

const START_AGAIN: &str = "Do you want to start the game again?";
const ARE_YOU_DONE: &str = "Are you done saying the words?";
const GOODBYE: &str = "Goodbye";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub session: Session,
    pub response: SpokenResponse,
}

impl TransitionResult {
    pub fn new(session: Session, response: SpokenResponse) -> Self {
        Self { session, response }
    }
}

/// Pure transition function.
///
/// Bad counts and out-of-turn intents become corrective prompts. The only
/// error is a vocabulary too small for an accepted count, which a validated
/// [`GameContext`] rules out.
pub fn transition<R: Rng + ?Sized>(
    session: &Session,
    context: &GameContext,
    intent: Intent,
    rng: &mut R,
) -> Result<TransitionResult, DialogError> {
    let result = match (session.stage, intent) {
        // ============================================================
        // Stage-independent intents
        // ============================================================
        (_, Intent::Launch) => TransitionResult::new(
            Session::default(),
            SpokenResponse::ask(launch_speech(context), count_reprompt(context)).with_card(),
        ),

        (stage, Intent::Help) => {
            let help = help_speech(stage, context);
            TransitionResult::new(session.clone(), SpokenResponse::ask(help.clone(), help))
        }

        (_, Intent::Stop | Intent::Cancel) => {
            TransitionResult::new(session.clone(), SpokenResponse::tell(Speech::text(GOODBYE)))
        }

        // ============================================================
        // Choosing the number of words
        // ============================================================
        (Stage::AwaitingCount, Intent::ProvideCount { count }) => {
            match context.accept_count(count) {
                Some(n) => {
                    let words = context.pool.sample(n, rng)?;
                    let speech = Speech::text(format!("So here are your {n} words:"))
                        .paced_words(&words);
                    TransitionResult::new(
                        Session::with_targets(words),
                        SpokenResponse::ask(speech, words_reprompt()).with_card(),
                    )
                }
                None => TransitionResult::new(
                    session.clone(),
                    SpokenResponse::ask(
                        Speech::text(format!(
                            "Please say a valid number between {}.",
                            range_words(context)
                        )),
                        count_reprompt(context),
                    )
                    .with_card(),
                ),
            }
        }

        // "Do you want to start the game again?" is a yes/no question
        (Stage::AwaitingCount, Intent::ConfirmDone { done: Some(true) }) => {
            TransitionResult::new(
                session.clone(),
                SpokenResponse::ask(
                    Speech::text("How many words do you want to remember?")
                        .then(format!("You can pick any number between {}.", range_words(context))),
                    count_reprompt(context),
                ),
            )
        }

        (Stage::AwaitingCount, Intent::ConfirmDone { .. }) => TransitionResult::new(
            session.clone(),
            SpokenResponse::ask(
                Speech::text(format!(
                    "You can say a number between {} to play, or say stop to leave.",
                    range_words(context)
                )),
                count_reprompt(context),
            ),
        ),

        // ============================================================
        // Recalling words
        // ============================================================
        (Stage::AwaitingWords, Intent::ProvideWords { words }) => {
            let mut next = session.clone();
            for word in &words {
                next.record_word(word);
            }
            next.stage = Stage::AwaitingConfirmation;

            let speech = if words.is_empty() {
                Speech::text("I didn't catch any words.")
            } else {
                Speech::text("So you said:").paced_words(&words)
            };
            TransitionResult::new(
                next,
                SpokenResponse::ask(speech.then(ARE_YOU_DONE), confirm_reprompt()).with_card(),
            )
        }

        // ============================================================
        // Confirming the round is over
        // ============================================================
        (Stage::AwaitingConfirmation, Intent::ConfirmDone { done: Some(true) }) => {
            let speech = if session.all_recalled() {
                Speech::text("Congrats, you remembered all the words!")
            } else {
                let missed = session.remaining_words.len();
                let noun = if missed == 1 { "word" } else { "words" };
                Speech::text(format!("You missed {missed} {noun}:"))
                    .paced_words(&session.remaining_words)
            };
            TransitionResult::new(session.clone(), SpokenResponse::tell(speech).with_card())
        }

        (Stage::AwaitingConfirmation, Intent::ConfirmDone { done: Some(false) }) => {
            let mut next = session.clone();
            next.stage = Stage::AwaitingWords;
            TransitionResult::new(
                next,
                SpokenResponse::ask(Speech::text("Okay, please continue."), words_reprompt()),
            )
        }

        (Stage::AwaitingConfirmation, Intent::ConfirmDone { done: None }) => {
            TransitionResult::new(
                session.clone(),
                SpokenResponse::ask(
                    Speech::text("Please say yes or no.").then(ARE_YOU_DONE),
                    confirm_reprompt(),
                ),
            )
        }

        // ============================================================
        // Out-of-turn intents
        // ============================================================
        (
            _,
            Intent::ProvideCount { .. } | Intent::ProvideWords { .. } | Intent::ConfirmDone { .. },
        ) => {
            let mut next = session.clone();
            next.stage = Stage::AwaitingCount;
            TransitionResult::new(
                next,
                SpokenResponse::ask(Speech::text(START_AGAIN), Speech::text(START_AGAIN))
                    .with_card(),
            )
        }
    };

    Ok(result)
}

fn launch_speech(context: &GameContext) -> Speech {
    Speech::text(
        "Remember Me is a memorization game where I read out random words and \
         you are challenged to repeat them back in any order!",
    )
    .then("How many words do you want to remember?")
    .then(format!(
        "The most you can pick is {}.",
        number_word(context.max_count)
    ))
}

fn help_speech(stage: Stage, context: &GameContext) -> Speech {
    match stage {
        Stage::AwaitingCount => Speech::text(
            "Remember Me reads out some random words and you repeat them back in any order.",
        )
        .then(format!(
            "To start, say how many words you want, between {}, or you can say exit.",
            range_words(context)
        )),
        Stage::AwaitingWords => Speech::text(
            "Say the words you remember, in any order. You can say several at once, or you can say exit.",
        ),
        Stage::AwaitingConfirmation => Speech::text(
            "Say yes if you have finished saying the words, or no to keep going. You can also say exit.",
        ),
    }
}

fn count_reprompt(context: &GameContext) -> Speech {
    Speech::text(format!(
        "You can say any number between {}.",
        range_words(context)
    ))
}

fn words_reprompt() -> Speech {
    Speech::text("Say the words you remember, in any order.")
}

fn confirm_reprompt() -> Speech {
    Speech::text(ARE_YOU_DONE).then("You can say yes or no.")
}

fn range_words(context: &GameContext) -> String {
    format!(
        "{} and {}",
        number_word(context.min_count),
        number_word(context.max_count)
    )
}

/// Spell out small numbers the way they are spoken
fn number_word(n: usize) -> String {
    const WORDS: [&str; 21] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
        "nineteen", "twenty",
    ];
    WORDS
        .get(n)
        .map_or_else(|| n.to_string(), |word| (*word).to_string())
}
