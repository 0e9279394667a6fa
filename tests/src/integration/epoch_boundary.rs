//! # Epoch Boundary Integration Tests
//!
//! The watcher resets per-epoch state when the notifier reports a new
//! epoch, archives the outgoing flip content first, and guards the
//! ResetEpoch precondition so the reducer never sees a same-epoch reset.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fc_02_ceremony_store::{CeremonyEvent, CeremonyStore, InMemoryValidationStore};
    use fc_03_submission::{
        EpochWatcher, FixedEpochSource, RecordingArchiver, RecordingTransport, SubmissionService,
    };
    use shared_types::{
        AnswerOption, EpochPhase, Flip, SubmittedAnswer, ValidationPeriod,
    };
    use tokio::sync::watch;

    fn phase(epoch: u64, period: ValidationPeriod) -> EpochPhase {
        EpochPhase {
            epoch,
            current_period: period,
        }
    }

    async fn store_at_epoch(epoch: u64) -> Arc<CeremonyStore> {
        let store = Arc::new(CeremonyStore::new(Arc::new(InMemoryValidationStore::new())));
        store.load().await.unwrap();
        if epoch > 0 {
            store
                .dispatch(CeremonyEvent::ResetEpoch { epoch })
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_epoch_change_clears_both_answer_sets() {
        let store = store_at_epoch(4).await;
        store
            .dispatch(CeremonyEvent::SubmitShortAnswers {
                answers: vec![SubmittedAnswer {
                    answer: 1,
                    easy: false,
                }],
                epoch: 4,
            })
            .await
            .unwrap();
        store
            .dispatch(CeremonyEvent::SubmitLongAnswers {
                answers: vec![SubmittedAnswer {
                    answer: 2,
                    easy: false,
                }],
                epoch: 4,
            })
            .await
            .unwrap();

        let archiver = Arc::new(RecordingArchiver::new());
        let watcher = EpochWatcher::new(store.clone(), archiver.clone());
        let applied = watcher
            .observe(phase(5, ValidationPeriod::FlipLottery))
            .await
            .unwrap();
        assert!(applied);

        let state = store.state();
        assert_eq!(state.epoch, 5);
        assert!(state.short_answers.is_empty());
        assert!(state.long_answers.is_empty());
        assert!(!state.short_answers_submitted);
        assert!(!state.long_answers_submitted);

        archiver.wait_archived().await;
        assert_eq!(archiver.archived(), vec![4]);
    }

    #[tokio::test]
    async fn test_notifier_noise_causes_no_spurious_resets() {
        let store = store_at_epoch(4).await;
        let archiver = Arc::new(RecordingArchiver::new());
        let watcher = Arc::new(EpochWatcher::new(store.clone(), archiver.clone()));

        let (tx, rx) = watch::channel(phase(4, ValidationPeriod::FlipLottery));
        let handle = tokio::spawn(watcher.clone().run(rx));

        // Period changes within the same epoch are not epoch changes.
        tx.send(phase(4, ValidationPeriod::ShortSession)).unwrap();
        tx.send(phase(4, ValidationPeriod::LongSession)).unwrap();
        tx.send(phase(4, ValidationPeriod::AfterLongSession)).unwrap();
        tx.send(phase(5, ValidationPeriod::FlipLottery)).unwrap();
        drop(tx);
        handle.await.unwrap();

        assert_eq!(store.epoch(), 5);
        // Exactly one reset was dispatched across all notifications.
        assert_eq!(store.events_applied(), 2 + 1);
    }

    #[tokio::test]
    async fn test_submission_after_reset_uses_new_epoch() {
        let store = store_at_epoch(4).await;

        // New epoch arrives.
        let archiver = Arc::new(RecordingArchiver::new());
        let watcher = EpochWatcher::new(store.clone(), archiver);
        watcher
            .observe(phase(5, ValidationPeriod::ShortSession))
            .await
            .unwrap();

        // A session in the new epoch.
        let mut seeded = store.state();
        seeded.session.flips = vec![Flip {
            answer: Some(AnswerOption::Left),
            ..Flip::placeholder("flip-0", true)
        }];
        seeded.session.loading = false;
        store
            .dispatch(CeremonyEvent::LoadValidation(seeded))
            .await
            .unwrap();

        let transport = Arc::new(RecordingTransport::new());
        let service = SubmissionService::new(
            store.clone(),
            transport.clone(),
            Arc::new(FixedEpochSource::new(phase(5, ValidationPeriod::ShortSession))),
        );
        service.handle_tick(1).await.unwrap();

        assert_eq!(store.state().epoch, 5);
        assert!(store.state().short_answers_submitted);
        assert_eq!(transport.submissions().len(), 1);
    }

    #[tokio::test]
    async fn test_boundary_tick_with_flipped_period_does_not_submit() {
        // The epoch/period flip and the final tick land on the same
        // instant: if the notifier already reports the next period when
        // the 1-second tick arrives, nothing must fire.
        let store = store_at_epoch(4).await;
        let mut seeded = store.state();
        seeded.session.flips = vec![Flip {
            answer: Some(AnswerOption::Left),
            ..Flip::placeholder("flip-0", true)
        }];
        seeded.session.loading = false;
        store
            .dispatch(CeremonyEvent::LoadValidation(seeded))
            .await
            .unwrap();

        let transport = Arc::new(RecordingTransport::new());
        let service = SubmissionService::new(
            store.clone(),
            transport.clone(),
            Arc::new(FixedEpochSource::new(phase(
                4,
                ValidationPeriod::AfterLongSession,
            ))),
        );
        service.handle_tick(1).await.unwrap();

        assert!(transport.submissions().is_empty());
        assert!(!store.state().short_answers_submitted);
    }
}
