//! The submission trigger service.
//!
//! Each session's answers are submitted at most once, as close to the
//! session deadline as possible, without requiring the user to act.

use crate::error::Result;
use crate::ports::{AnswerTransport, EpochPhaseSource};
use fc_02_ceremony_store::{CeremonyEvent, CeremonyStore};
use parking_lot::RwLock;
use shared_types::{Epoch, Flip, SubmittedAnswer, ValidationPeriod};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The seconds-remaining value that fires a submission.
///
/// Exactly 1 rather than 0: the epoch/period flip and the final tick land
/// on the same instant, and submitting one second early avoids racing the
/// boundary.
pub const SUBMIT_AT_SECONDS_LEFT: u64 = 1;

/// Operational counters for the trigger.
#[derive(Debug, Clone, Default)]
pub struct SubmissionStatus {
    /// Ticks received from the host timer.
    pub ticks_observed: u64,
    /// Successful submissions (transport call + durable record + event).
    pub submissions_sent: u64,
    /// Failed attempts; each is retried on the next qualifying tick.
    pub submission_failures: u64,
    /// Epoch of the most recent successful submission.
    pub last_submitted_epoch: Option<Epoch>,
}

/// Watches session ticks and submits unsent answers at the deadline.
pub struct SubmissionService {
    /// The ceremony store: state reads and submit-event dispatch.
    store: Arc<CeremonyStore>,

    /// Answer delivery to the validation endpoint.
    transport: Arc<dyn AnswerTransport>,

    /// The epoch/phase notifier, read synchronously per tick.
    epoch_source: Arc<dyn EpochPhaseSource>,

    /// Operational counters.
    status: RwLock<SubmissionStatus>,
}

impl SubmissionService {
    /// Create a trigger over the given collaborators.
    pub fn new(
        store: Arc<CeremonyStore>,
        transport: Arc<dyn AnswerTransport>,
        epoch_source: Arc<dyn EpochPhaseSource>,
    ) -> Self {
        Self {
            store,
            transport,
            epoch_source,
            status: RwLock::new(SubmissionStatus::default()),
        }
    }

    /// Current operational counters.
    pub fn status(&self) -> SubmissionStatus {
        self.status.read().clone()
    }

    /// Map a session's flips to the submission payload.
    ///
    /// Every flip appears: unanswered flips are submitted as answer code
    /// 0, never omitted.
    #[must_use]
    pub fn build_payload(flips: &[Flip]) -> Vec<SubmittedAnswer> {
        flips
            .iter()
            .map(|f| SubmittedAnswer::from_answer(f.answer))
            .collect()
    }

    /// Process one seconds-remaining tick.
    ///
    /// On the qualifying tick, submits the current session's answers if
    /// the corresponding flag is unset and at least one real answer
    /// exists. A failure leaves the flag unset so the next qualifying
    /// tick retries.
    pub async fn handle_tick(&self, seconds_remaining: u64) -> Result<()> {
        self.status.write().ticks_observed += 1;

        if seconds_remaining != SUBMIT_AT_SECONDS_LEFT {
            return Ok(());
        }

        let phase = self.epoch_source.current();
        match phase.current_period {
            ValidationPeriod::ShortSession | ValidationPeriod::LongSession => {
                match self.try_submit(phase.epoch, phase.current_period).await {
                    Ok(true) => {
                        let mut status = self.status.write();
                        status.submissions_sent += 1;
                        status.last_submitted_epoch = Some(phase.epoch);
                        Ok(())
                    }
                    Ok(false) => Ok(()),
                    Err(e) => {
                        self.status.write().submission_failures += 1;
                        Err(e)
                    }
                }
            }
            _ => Ok(()),
        }
    }

    /// Attempt one submission for the given period.
    ///
    /// Returns `Ok(true)` if a submission was delivered and recorded,
    /// `Ok(false)` if nothing needed doing.
    async fn try_submit(&self, epoch: Epoch, period: ValidationPeriod) -> Result<bool> {
        let short = period == ValidationPeriod::ShortSession;
        let state = self.store.state();

        let already_submitted = if short {
            state.short_answers_submitted
        } else {
            state.long_answers_submitted
        };
        if already_submitted {
            return Ok(false);
        }

        if !state.session.has_any_answer() {
            debug!(
                "[fc-03] Session ending with no real answers, nothing to submit (epoch {})",
                epoch
            );
            return Ok(false);
        }

        let payload = Self::build_payload(&state.session.flips);
        let correlation_id = Uuid::new_v4().to_string();
        info!(
            "[fc-03] Submitting {} session answers: {} records, epoch {}",
            if short { "short" } else { "long" },
            payload.len(),
            epoch
        );

        // Reserved protocol parameters, always zero from this client.
        if short {
            self.transport.submit_short_answers(&payload, 0, 0).await?;
        } else {
            self.transport.submit_long_answers(&payload, 0, 0).await?;
        }

        // The flag may have flipped while the call was in flight.
        let state = self.store.state();
        let already_submitted = if short {
            state.short_answers_submitted
        } else {
            state.long_answers_submitted
        };
        if already_submitted {
            warn!(
                "[fc-03] Answers were recorded while the transport call was in flight, \
                 skipping duplicate dispatch (epoch {})",
                epoch
            );
            return Ok(false);
        }

        let event = if short {
            CeremonyEvent::SubmitShortAnswers {
                answers: payload.clone(),
                epoch,
            }
        } else {
            CeremonyEvent::SubmitLongAnswers {
                answers: payload.clone(),
                epoch,
            }
        };
        self.store.dispatch(event).await?;

        let event_flow = serde_json::json!({
            "subsystem_id": "fc-03",
            "event_type": if short { "ShortAnswersSubmitted" } else { "LongAnswersSubmitted" },
            "correlation_id": correlation_id,
            "epoch": epoch,
            "answer_count": payload.len(),
        });
        info!("EVENT_FLOW_JSON {}", event_flow);

        Ok(true)
    }

    /// Consume the host's tick stream until it closes.
    ///
    /// Failed attempts are logged and retried on the next qualifying
    /// tick; the loop itself never gives up.
    pub async fn run(self: Arc<Self>, mut ticks: mpsc::Receiver<u64>) {
        info!("[fc-03] Submission trigger started");
        while let Some(seconds) = ticks.recv().await {
            if let Err(e) = self.handle_tick(seconds).await {
                warn!(
                    "[fc-03] Submission attempt failed: {} (retrying on next qualifying tick)",
                    e
                );
            }
        }
        info!("[fc-03] Tick source closed, submission trigger stopped");
    }
}
