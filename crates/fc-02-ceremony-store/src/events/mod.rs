//! Ceremony events - the closed union of state transitions.

use crate::domain::ValidationState;
use shared_types::{AnswerOption, Epoch, FlipContent, FlipHashEntry, SubmittedAnswer};

/// Every transition the ceremony store can apply.
///
/// The union is closed: the reducer matches it exhaustively, so an
/// unhandled event kind is a compile error rather than a runtime throw.
#[derive(Debug, Clone)]
pub enum CeremonyEvent {
    /// Replace the entire state with the persisted snapshot. Startup only.
    LoadValidation(ValidationState),

    /// A flip fetch has been initiated.
    StartFetchFlips,

    /// A full flip fetch resolved: decode `contents` against `hashes`.
    FetchFlipsSucceeded {
        /// The hash list as requested, in request order.
        hashes: Vec<FlipHashEntry>,
        /// Fetched content; may cover a subset or superset of `hashes`.
        contents: Vec<FlipContent>,
    },

    /// A follow-up fetch for missing content resolved: re-decode against
    /// the session's existing hash list.
    FetchMissingFlipsSucceeded {
        /// Fetched content; may cover a subset or superset of the request.
        contents: Vec<FlipContent>,
    },

    /// A flip fetch failed at the transport layer.
    FetchFlipsFailed {
        /// Human-readable transport error.
        error: String,
    },

    /// Move the cursor one flip back.
    PrevFlip,

    /// Move the cursor one flip forward.
    NextFlip,

    /// Jump the cursor to `index`. The index must be in range.
    PickFlip {
        /// Target position in the flip list.
        index: usize,
    },

    /// Answer the current flip. Requires a non-empty flip list.
    AnswerFlip {
        /// The chosen answer.
        option: AnswerOption,
    },

    /// Report the current flip as inappropriate and advance the cursor.
    /// Requires a non-empty flip list.
    ReportAbuse,

    /// Short-session answers were durably recorded and accepted upstream.
    SubmitShortAnswers {
        /// The submitted payload, one record per flip.
        answers: Vec<SubmittedAnswer>,
        /// Epoch the submission belongs to.
        epoch: Epoch,
    },

    /// Long-session answers were durably recorded and accepted upstream.
    SubmitLongAnswers {
        /// The submitted payload, one record per flip.
        answers: Vec<SubmittedAnswer>,
        /// Epoch the submission belongs to.
        epoch: Epoch,
    },

    /// The external epoch advanced. The caller guarantees the new epoch
    /// differs from the stored one; the reducer does not re-check.
    ResetEpoch {
        /// The new epoch.
        epoch: Epoch,
    },
}
