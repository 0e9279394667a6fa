//! Ceremony state entities.

use serde::{Deserialize, Serialize};
use shared_types::{Epoch, Flip, FlipHashEntry, SubmittedAnswer};

/// Per-ceremony state, one per short/long session.
///
/// Created empty at epoch reset, populated by fetch-success events,
/// mutated by navigation/answer events, and consumed wholesale by a
/// successful submit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CeremonySession {
    /// The requested hash list, in request order.
    pub hashes: Vec<FlipHashEntry>,
    /// Flips in display order (not necessarily `hashes` order).
    pub flips: Vec<Flip>,
    /// Cursor into `flips`, clamped to `[0, len-1]`.
    pub current_index: usize,
    /// Whether a flip fetch is unresolved.
    pub loading: bool,
    /// Derived: every flip in `flips` has an answer. Vacuously true on an
    /// empty list; the submission trigger additionally requires at least
    /// one real answer.
    pub can_submit: bool,
    /// Last fetch error, if any.
    pub error: Option<String>,
}

impl Default for CeremonySession {
    fn default() -> Self {
        Self {
            hashes: Vec::new(),
            flips: Vec::new(),
            current_index: 0,
            loading: true,
            can_submit: false,
            error: None,
        }
    }
}

impl CeremonySession {
    /// Whether any flip carries a real answer.
    #[must_use]
    pub fn has_any_answer(&self) -> bool {
        self.flips.iter().any(|f| f.answer.is_some())
    }
}

/// Validation state, durable across sessions within an epoch.
///
/// Exactly one `CeremonySession` is live at a time; submitting or
/// epoch-resetting replaces it wholesale. `epoch` only advances
/// monotonically, driven externally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationState {
    /// Last epoch this state was computed for.
    pub epoch: Epoch,
    /// Short-session answers, empty until submitted.
    pub short_answers: Vec<SubmittedAnswer>,
    /// Long-session answers, empty until submitted.
    pub long_answers: Vec<SubmittedAnswer>,
    /// Whether the short-session answers were submitted this epoch.
    pub short_answers_submitted: bool,
    /// Whether the long-session answers were submitted this epoch.
    pub long_answers_submitted: bool,
    /// The live ceremony session.
    pub session: CeremonySession,
}
