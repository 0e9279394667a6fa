//! # Restart Integration Tests
//!
//! Answers must be submitted exactly once per session before the deadline,
//! even across application restarts. These tests run two "processes"
//! against the same on-disk snapshot.

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use client_runtime::adapters::FileValidationStore;
    use fc_02_ceremony_store::{CeremonyEvent, CeremonyStore, ValidationState};
    use fc_03_submission::{
        AnswerTransport, FixedEpochSource, RecordingTransport, SubmissionService,
    };
    use shared_types::{AnswerOption, EpochPhase, Flip, ValidationPeriod};

    fn snapshot_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("fc-restart-{}-{}", name, uuid::Uuid::new_v4()))
            .join("validation.bin")
    }

    fn short_phase(epoch: u64) -> EpochPhase {
        EpochPhase {
            epoch,
            current_period: ValidationPeriod::ShortSession,
        }
    }

    fn answered_session(state: &mut ValidationState, count: usize) {
        state.session.flips = (0..count)
            .map(|i| Flip {
                answer: Some(AnswerOption::Left),
                ..Flip::placeholder(format!("flip-{i}"), true)
            })
            .collect();
        state.session.loading = false;
        state.session.can_submit = true;
    }

    /// Boot a store + trigger against the snapshot file, as one process
    /// lifetime would.
    async fn boot(
        path: &PathBuf,
        transport: Arc<RecordingTransport>,
        epoch: u64,
    ) -> (Arc<CeremonyStore>, Arc<SubmissionService>) {
        let persistence = Arc::new(FileValidationStore::open(path).unwrap());
        let store = Arc::new(CeremonyStore::new(persistence));
        store.load().await.unwrap();
        let service = Arc::new(SubmissionService::new(
            store.clone(),
            transport,
            Arc::new(FixedEpochSource::new(short_phase(epoch))),
        ));
        (store, service)
    }

    #[tokio::test]
    async fn test_submitted_flag_survives_restart() {
        let path = snapshot_path("survives");
        let transport = Arc::new(RecordingTransport::new());

        // Process 1: answer and submit.
        {
            let (store, service) = boot(&path, transport.clone(), 3).await;
            let mut state = store.state();
            answered_session(&mut state, 2);
            store
                .dispatch(CeremonyEvent::LoadValidation(state))
                .await
                .unwrap();
            service.handle_tick(1).await.unwrap();
            assert!(store.state().short_answers_submitted);
        }

        // The on-disk snapshot is a plain bincode ValidationState.
        let bytes = std::fs::read(&path).unwrap();
        let on_disk: ValidationState = bincode::deserialize(&bytes).unwrap();
        assert!(on_disk.short_answers_submitted);
        assert_eq!(on_disk.epoch, 3);

        // Process 2: same session still open at the deadline.
        {
            let (store, service) = boot(&path, transport.clone(), 3).await;
            assert!(store.state().short_answers_submitted);

            // Even with a re-fetched, re-answered session, the flag blocks
            // a second submission.
            let mut state = store.state();
            answered_session(&mut state, 2);
            store
                .dispatch(CeremonyEvent::LoadValidation(state))
                .await
                .unwrap();
            service.handle_tick(1).await.unwrap();
        }

        assert_eq!(transport.submissions().len(), 1);
    }

    #[tokio::test]
    async fn test_crash_before_dispatch_resubmits_idempotently() {
        let path = snapshot_path("crash");
        let transport = Arc::new(RecordingTransport::new());

        // Process 1: the transport call succeeds but the process dies
        // before the submit event is dispatched - nothing durable.
        {
            let (store, _service) = boot(&path, transport.clone(), 3).await;
            let mut state = store.state();
            answered_session(&mut state, 2);
            store
                .dispatch(CeremonyEvent::LoadValidation(state))
                .await
                .unwrap();
            let payload = SubmissionService::build_payload(&store.state().session.flips);
            transport.submit_short_answers(&payload, 0, 0).await.unwrap();
            // Crash: no dispatch, no durable record.
        }

        // Process 2: the flag is still clear, so the trigger submits
        // again; the endpoint must tolerate the duplicate.
        {
            let (store, service) = boot(&path, transport.clone(), 3).await;
            assert!(!store.state().short_answers_submitted);

            let mut state = store.state();
            answered_session(&mut state, 2);
            store
                .dispatch(CeremonyEvent::LoadValidation(state))
                .await
                .unwrap();
            service.handle_tick(1).await.unwrap();
            assert!(store.state().short_answers_submitted);
        }

        // At-least-once delivery: two identical submissions on the wire.
        let submissions = transport.submissions();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].payload, submissions[1].payload);

        // Process 3: durable flag now blocks any further attempt.
        {
            let (_store, service) = boot(&path, transport.clone(), 3).await;
            service.handle_tick(1).await.unwrap();
        }
        assert_eq!(transport.submissions().len(), 2);
    }

    #[tokio::test]
    async fn test_epoch_reset_survives_restart() {
        let path = snapshot_path("epoch");
        let transport = Arc::new(RecordingTransport::new());

        {
            let (store, _service) = boot(&path, transport.clone(), 4).await;
            store
                .dispatch(CeremonyEvent::SubmitShortAnswers {
                    answers: vec![],
                    epoch: 4,
                })
                .await
                .unwrap();
            store
                .dispatch(CeremonyEvent::ResetEpoch { epoch: 5 })
                .await
                .unwrap();
        }

        let (store, _service) = boot(&path, transport, 5).await;
        let state = store.state();
        assert_eq!(state.epoch, 5);
        assert!(!state.short_answers_submitted);
        assert!(state.short_answers.is_empty());
    }
}
