//! # Core Domain Entities
//!
//! Defines the ceremony client entities shared across subsystems.
//!
//! ## Clusters
//!
//! - **Flips**: `Flip`, `FlipHashEntry`, `FlipContent`
//! - **Answers**: `AnswerOption`, `SubmittedAnswer`
//! - **Epoch & Phase**: `Epoch`, `ValidationPeriod`, `EpochPhase`

use serde::{Deserialize, Serialize};

/// A coarse-grained external time period. Ceremonies and submitted answers
/// are scoped to one epoch and reset when it advances.
pub type Epoch = u64;

// =============================================================================
// CLUSTER A: ANSWERS
// =============================================================================

/// A participant's answer to a single flip.
///
/// `None` here is a real answer (the "neither ordering is right" choice),
/// distinct from an unanswered flip, which is modeled as `Option::None`
/// at the `Flip.answer` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerOption {
    /// Neither ordering (wire code 0).
    None,
    /// The left ordering (wire code 1).
    Left,
    /// The right ordering (wire code 2).
    Right,
    /// Flip reported as inappropriate (wire code 3).
    Inappropriate,
}

impl AnswerOption {
    /// Wire code used in submission payloads.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            AnswerOption::None => 0,
            AnswerOption::Left => 1,
            AnswerOption::Right => 2,
            AnswerOption::Inappropriate => 3,
        }
    }
}

/// Wire code for a possibly-unanswered flip.
///
/// Unanswered flips are submitted as code 0, the same code as an explicit
/// `AnswerOption::None`; the distinction exists only client-side.
#[must_use]
pub fn answer_code(answer: Option<AnswerOption>) -> u8 {
    answer.map_or(0, AnswerOption::code)
}

/// One record of a submission payload.
///
/// `easy` is carried for protocol compatibility; this client always
/// submits `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    /// Answer wire code (0-3).
    pub answer: u8,
    /// Whether the participant marked the flip as easy.
    pub easy: bool,
}

impl SubmittedAnswer {
    /// Build the payload record for a possibly-unanswered flip.
    #[must_use]
    pub fn from_answer(answer: Option<AnswerOption>) -> Self {
        Self {
            answer: answer_code(answer),
            easy: false,
        }
    }
}

// =============================================================================
// CLUSTER B: EPOCH & PHASE
// =============================================================================

/// The externally-reported phase of the current epoch.
///
/// Only `ShortSession` and `LongSession` carry answer sets; the remaining
/// periods exist so the notifier contract is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationPeriod {
    /// No ceremony in progress.
    None,
    /// Candidate flips are being drawn for the upcoming ceremony.
    FlipLottery,
    /// The short timed session.
    ShortSession,
    /// The long timed session.
    LongSession,
    /// Ceremony over, results pending.
    AfterLongSession,
}

/// Snapshot of the epoch/phase notifier, readable synchronously at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochPhase {
    /// Current epoch number. Advances monotonically, driven externally.
    pub epoch: Epoch,
    /// Current period within the epoch.
    pub current_period: ValidationPeriod,
}

impl Default for EpochPhase {
    fn default() -> Self {
        Self {
            epoch: 0,
            current_period: ValidationPeriod::None,
        }
    }
}

// =============================================================================
// CLUSTER C: FLIPS
// =============================================================================

/// A requested flip hash and whether its content was reported retrievable
/// at request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipHashEntry {
    /// Opaque content identifier, unique within a session's hash list.
    pub hash: String,
    /// Whether content has been retrieved upstream.
    pub ready: bool,
}

/// Raw fetched content for one flip, hex-encoded as delivered by the
/// content transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipContent {
    /// Hash correlating this content back to the requested hash list.
    pub hash: String,
    /// Hex-encoded record payload, with or without a `0x` prefix.
    pub hex: String,
}

/// One puzzle instance.
///
/// `pics` and `orders` are both present or both absent: decode is atomic
/// per flip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flip {
    /// Opaque content identifier.
    pub hash: String,
    /// Whether content has been retrieved.
    pub ready: bool,
    /// Ordered image references, verbatim from the decoded record.
    pub pics: Option<Vec<Vec<u8>>>,
    /// Ordered permutation-order sequences, one small integer per image.
    pub orders: Option<Vec<Vec<u8>>>,
    /// The participant's answer, if any.
    pub answer: Option<AnswerOption>,
}

impl Flip {
    /// Placeholder for content not yet retrieved (or not decodable).
    #[must_use]
    pub fn placeholder(hash: impl Into<String>, ready: bool) -> Self {
        Self {
            hash: hash.into(),
            ready,
            pics: None,
            orders: None,
            answer: None,
        }
    }

    /// Whether this flip carries decoded content.
    #[must_use]
    pub fn is_decoded(&self) -> bool {
        self.pics.is_some()
    }
}
