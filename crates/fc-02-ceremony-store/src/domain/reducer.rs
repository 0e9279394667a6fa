//! The ceremony reducer.
//!
//! `reduce` is total and pure: every event produces a defined next state,
//! and the closed event union makes the match exhaustive at compile time.
//! Durable side effects (persisting answers, resetting the stored epoch)
//! belong to the dispatch path in `store.rs`, never here.

use crate::domain::entities::{CeremonySession, ValidationState};
use crate::events::CeremonyEvent;
use fc_01_flip_codec::decode_flip_set;
use shared_types::AnswerOption;

/// Apply one event to the ceremony state.
///
/// # Panics
///
/// Panics on violated caller contracts, which signal a caller bug rather
/// than a recoverable condition:
///
/// - `PickFlip` with an out-of-range index;
/// - `AnswerFlip` / `ReportAbuse` with an empty flip list.
#[must_use]
pub fn reduce(state: ValidationState, event: CeremonyEvent) -> ValidationState {
    match event {
        CeremonyEvent::LoadValidation(snapshot) => snapshot,

        CeremonyEvent::StartFetchFlips => ValidationState {
            session: CeremonySession {
                loading: true,
                ..state.session
            },
            ..state
        },

        CeremonyEvent::FetchFlipsSucceeded { hashes, contents } => {
            let flips = decode_flip_set(&hashes, &contents);
            ValidationState {
                session: CeremonySession {
                    hashes,
                    flips,
                    loading: false,
                    ..state.session
                },
                ..state
            }
        }

        CeremonyEvent::FetchMissingFlipsSucceeded { contents } => {
            let flips = decode_flip_set(&state.session.hashes, &contents);
            ValidationState {
                session: CeremonySession {
                    flips,
                    loading: false,
                    ..state.session
                },
                ..state
            }
        }

        // `loading` intentionally stays true on failure: the fetch is
        // unresolved and a retry is pending at the collaborator layer.
        CeremonyEvent::FetchFlipsFailed { error } => ValidationState {
            session: CeremonySession {
                loading: true,
                error: Some(error),
                ..state.session
            },
            ..state
        },

        CeremonyEvent::PrevFlip => ValidationState {
            session: CeremonySession {
                current_index: state.session.current_index.saturating_sub(1),
                ..state.session
            },
            ..state
        },

        CeremonyEvent::NextFlip => ValidationState {
            session: CeremonySession {
                current_index: (state.session.current_index + 1)
                    .min(state.session.flips.len().saturating_sub(1)),
                ..state.session
            },
            ..state
        },

        CeremonyEvent::PickFlip { index } => {
            assert!(
                index < state.session.flips.len(),
                "PickFlip index {index} out of range for {} flips",
                state.session.flips.len()
            );
            ValidationState {
                session: CeremonySession {
                    current_index: index,
                    ..state.session
                },
                ..state
            }
        }

        CeremonyEvent::AnswerFlip { option } => {
            let mut session = state.session;
            assert!(!session.flips.is_empty(), "AnswerFlip with no flips");
            session.flips[session.current_index].answer = Some(option);
            session.can_submit = all_answered(&session);
            ValidationState { session, ..state }
        }

        CeremonyEvent::ReportAbuse => {
            let mut session = state.session;
            assert!(!session.flips.is_empty(), "ReportAbuse with no flips");
            // Overwrite semantics: an existing answer is replaced.
            session.flips[session.current_index].answer = Some(AnswerOption::Inappropriate);
            session.current_index = (session.current_index + 1).min(session.flips.len() - 1);
            session.can_submit = all_answered(&session);
            ValidationState { session, ..state }
        }

        CeremonyEvent::SubmitShortAnswers { answers, epoch } => ValidationState {
            epoch,
            short_answers: answers,
            short_answers_submitted: true,
            session: CeremonySession::default(),
            ..state
        },

        CeremonyEvent::SubmitLongAnswers { answers, epoch } => ValidationState {
            epoch,
            long_answers: answers,
            long_answers_submitted: true,
            session: CeremonySession::default(),
            ..state
        },

        CeremonyEvent::ResetEpoch { epoch } => ValidationState {
            epoch,
            short_answers: Vec::new(),
            long_answers: Vec::new(),
            short_answers_submitted: false,
            long_answers_submitted: false,
            session: CeremonySession::default(),
        },
    }
}

/// `can_submit` rule: every flip carries an answer. Vacuously true on an
/// empty list.
fn all_answered(session: &CeremonySession) -> bool {
    session.flips.iter().all(|f| f.answer.is_some())
}
