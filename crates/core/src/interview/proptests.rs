//! Property-based tests for the interview state machine.
//!
//! Random sequences of candidate turns, valid or not, are fed through an
//! interview backed by a scripted model that sometimes fails. Whatever the
//! sequence, the script position never moves backwards and the record only
//! holds fields of states already passed.

use proptest::prelude::*;
use talentscout_test_model::{PresetResponse, TestModelProvider};

use crate::{ConversationState, InterviewBuilder, Reply};

#[derive(Clone, Debug)]
enum Turn {
    Valid,
    BadEmail,
    BadPhone,
    Free(String),
}

fn arb_turn() -> impl Strategy<Value = Turn> {
    prop_oneof![
        3 => Just(Turn::Valid),
        1 => Just(Turn::BadEmail),
        1 => Just(Turn::BadPhone),
        1 => "[a-zA-Z ,]{0,20}".prop_map(Turn::Free),
    ]
}

fn input_for(turn: &Turn, state: Option<ConversationState>) -> String {
    match turn {
        Turn::Valid => match state {
            Some(ConversationState::CollectEmail) => "dev@example.com".into(),
            Some(ConversationState::CollectPhone) => "+15551234567".into(),
            _ => "an answer".into(),
        },
        Turn::BadEmail => "not-an-email".into(),
        Turn::BadPhone => "555-CALL-NOW".into(),
        Turn::Free(text) => text.clone(),
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn state_index_never_decreases(
        turns in prop::collection::vec(arb_turn(), 1..30),
        failures in prop::collection::vec(any::<bool>(), 31),
        conclude in prop::collection::vec(any::<bool>(), 31),
    ) {
        let mut provider = TestModelProvider::default();
        for (fail, conclude) in failures.iter().zip(&conclude) {
            let text = if *conclude { "Thank you!" } else { "Go on." };
            let mut step = PresetResponse::with_text(text);
            if *fail {
                step = step.with_failures(1);
            }
            provider.add_response_step(step);
        }
        let mut interview =
            InterviewBuilder::with_model_provider(provider).build();

        runtime().block_on(async {
            interview.greet().await;
            let mut last_index = interview.state_index();
            for turn in &turns {
                let state = interview.state();
                let input = input_for(turn, state);
                let reply = interview.respond(&input).await;

                let index = interview.state_index();
                prop_assert!(index >= last_index);
                if !reply.is_generated() {
                    prop_assert_eq!(index, last_index);
                }
                if matches!(reply, Reply::Rejected { .. }) {
                    prop_assert!(
                        matches!(
                            state,
                            Some(
                                ConversationState::CollectEmail
                                    | ConversationState::CollectPhone
                            )
                        ) || input.trim().is_empty()
                    );
                }

                for (field, _) in interview.candidate().iter() {
                    let passed = ConversationState::ALL[..index]
                        .iter()
                        .any(|state| state.field() == Some(field));
                    prop_assert!(passed, "{field} recorded before its state");
                }
                last_index = index;
            }
            Ok(())
        })?;
    }
}
