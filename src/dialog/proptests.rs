//! Property-based tests for the dialog state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> GameContext {
    GameContext::builtin().unwrap()
}

fn step(session: &Session, intent: Intent, seed: u64) -> TransitionResult {
    transition(session, &test_context(), intent, &mut StdRng::seed_from_u64(seed)).unwrap()
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Mostly vocabulary words, with some strangers and case variants mixed in
fn arb_spoken_word() -> impl Strategy<Value = String> {
    let vocabulary: Vec<String> = test_context().pool.words().to_vec();
    prop_oneof![
        4 => proptest::sample::select(vocabulary.clone()),
        1 => proptest::sample::select(vocabulary).prop_map(|w| w.to_uppercase()),
        1 => "[a-z]{3,8}",
    ]
}

fn arb_word_turn() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(arb_spoken_word(), 0..=10)
}

fn arb_stage() -> impl Strategy<Value = Stage> {
    prop_oneof![
        Just(Stage::AwaitingCount),
        Just(Stage::AwaitingWords),
        Just(Stage::AwaitingConfirmation),
    ]
}

fn arb_round() -> impl Strategy<Value = Session> {
    (1usize..=10, any::<u64>()).prop_map(|(n, seed)| {
        step(&Session::default(), Intent::ProvideCount { count: Some(n as i64) }, seed).session
    })
}

fn arb_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::Launch),
        proptest::option::of(-5i64..20).prop_map(|count| Intent::ProvideCount { count }),
        arb_word_turn().prop_map(|words| Intent::ProvideWords { words }),
        proptest::option::of(any::<bool>()).prop_map(|done| Intent::ConfirmDone { done }),
        Just(Intent::Help),
        Just(Intent::Stop),
        Just(Intent::Cancel),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Invariant 1: remaining and uttered words partition the targets after
    // any sequence of recall turns
    #[test]
    fn prop_recall_keeps_partition(
        round in arb_round(),
        turns in proptest::collection::vec(arb_word_turn(), 1..5)
    ) {
        let mut session = round;
        for words in turns {
            session.stage = Stage::AwaitingWords;
            session = step(&session, Intent::ProvideWords { words }, 0).session;

            prop_assert!(session.is_consistent(), "Partition broken: {:?}", session);
            let remaining: HashSet<&String> = session.remaining_words.iter().collect();
            let uttered: HashSet<&String> = session.uttered_words.iter().collect();
            prop_assert!(remaining.is_disjoint(&uttered));
        }
    }

    // Invariant 2: every spoken word is counted exactly once
    #[test]
    fn prop_every_word_is_accounted(round in arb_round(), words in arb_word_turn()) {
        let before = round.clone();
        let after = step(&round, Intent::ProvideWords { words: words.clone() }, 0).session;

        let recalled = after.uttered_words.len() - before.uttered_words.len();
        let missed = after.misrecognized_words.len() - before.misrecognized_words.len();
        prop_assert_eq!(recalled + missed, words.len());
        prop_assert_eq!(after.stage, Stage::AwaitingConfirmation);
    }

    // Invariant 3: repeating a recalled word only adds a misrecognition
    #[test]
    fn prop_repeat_word_is_idempotent(round in arb_round(), pick in any::<prop::sample::Index>()) {
        let word = pick.get(&round.target_words).clone();
        let once = step(&round, Intent::ProvideWords { words: vec![word.clone()] }, 0).session;

        let mut again_from = once.clone();
        again_from.stage = Stage::AwaitingWords;
        let twice = step(&again_from, Intent::ProvideWords { words: vec![word.clone()] }, 0).session;

        prop_assert_eq!(&twice.remaining_words, &once.remaining_words);
        prop_assert_eq!(&twice.uttered_words, &once.uttered_words);
        prop_assert_eq!(twice.misrecognized_words.last(), Some(&word));
        prop_assert_eq!(twice.misrecognized_words.len(), once.misrecognized_words.len() + 1);
    }

    // Invariant 4: out-of-range counts never touch the word lists
    #[test]
    fn prop_invalid_count_changes_nothing(
        count in prop_oneof![Just(None), (-100i64..=0).prop_map(Some), (11i64..1000).prop_map(Some)],
        seed in any::<u64>()
    ) {
        let result = step(&Session::default(), Intent::ProvideCount { count }, seed);
        prop_assert_eq!(result.session, Session::default());
        prop_assert!(result.response.continue_session);
    }

    // Invariant 5: accepted counts produce that many distinct targets
    #[test]
    fn prop_valid_count_draws_distinct_words(n in 1i64..=10, seed in any::<u64>()) {
        let session = step(&Session::default(), Intent::ProvideCount { count: Some(n) }, seed).session;
        let distinct: HashSet<&String> = session.target_words.iter().collect();

        prop_assert_eq!(session.stage, Stage::AwaitingWords);
        prop_assert_eq!(session.target_words.len() as i64, n);
        prop_assert_eq!(distinct.len() as i64, n);
        prop_assert!(session.is_consistent());
    }

    // Invariant 6: only Stop, Cancel and a confirmed finish end the conversation
    #[test]
    fn prop_only_terminal_intents_end(
        round in arb_round(),
        stage in arb_stage(),
        intent in arb_intent()
    ) {
        let mut session = round;
        session.stage = stage;
        let terminal = matches!(intent, Intent::Stop | Intent::Cancel)
            || (stage == Stage::AwaitingConfirmation
                && intent == Intent::ConfirmDone { done: Some(true) });

        let result = step(&session, intent, 0);
        prop_assert_eq!(!result.response.continue_session, terminal);
        if result.response.continue_session {
            prop_assert!(result.response.reprompt.is_some());
        } else {
            prop_assert!(result.response.reprompt.is_none());
        }
    }

    // Invariant 7: any intent from a consistent session leaves it consistent
    #[test]
    fn prop_transitions_preserve_consistency(
        round in arb_round(),
        stage in arb_stage(),
        intents in proptest::collection::vec(arb_intent(), 1..8)
    ) {
        let mut session = round;
        session.stage = stage;
        for (i, intent) in intents.into_iter().enumerate() {
            session = step(&session, intent, i as u64).session;
            prop_assert!(session.is_consistent(), "Broken after step {}: {:?}", i, session);
        }
    }
}
