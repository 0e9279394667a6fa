//! # Ceremony Flow Integration Tests
//!
//! Drives a full session through the real subsystems wired together the
//! way client-runtime wires them: fc-01 decodes fetched content, fc-02
//! applies events, fc-03 submits at the deadline.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fc_01_flip_codec::encode_flip_record;
    use fc_02_ceremony_store::{CeremonyEvent, CeremonyStore, InMemoryValidationStore};
    use fc_03_submission::{FixedEpochSource, RecordingTransport, SubmissionService};
    use shared_types::{
        AnswerOption, EpochPhase, FlipContent, FlipHashEntry, ValidationPeriod,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Generate a decodable flip set for one session.
    fn fixture_flips(epoch: u64, count: usize) -> (Vec<FlipHashEntry>, Vec<FlipContent>) {
        let mut hashes = Vec::new();
        let mut contents = Vec::new();
        for i in 0..count {
            let hash = format!("epoch{epoch}-flip{i}");
            let pics: Vec<Vec<u8>> = (0..4)
                .map(|p| format!("{hash}-pic{p}").into_bytes())
                .collect();
            let orders: Vec<Vec<u8>> = vec![vec![0, 1, 2, 3], vec![3, 2, 1, 0]];
            let raw = encode_flip_record(&pics, &orders);
            hashes.push(FlipHashEntry {
                hash: hash.clone(),
                ready: true,
            });
            contents.push(FlipContent {
                hash,
                hex: format!("0x{}", hex::encode(raw)),
            });
        }
        (hashes, contents)
    }

    struct Harness {
        store: Arc<CeremonyStore>,
        persistence: Arc<InMemoryValidationStore>,
        transport: Arc<RecordingTransport>,
        epoch_source: Arc<FixedEpochSource>,
        service: Arc<SubmissionService>,
    }

    fn harness(phase: EpochPhase) -> Harness {
        let persistence = Arc::new(InMemoryValidationStore::new());
        let store = Arc::new(CeremonyStore::new(persistence.clone()));
        let transport = Arc::new(RecordingTransport::new());
        let epoch_source = Arc::new(FixedEpochSource::new(phase));
        let service = Arc::new(SubmissionService::new(
            store.clone(),
            transport.clone(),
            epoch_source.clone(),
        ));
        Harness {
            store,
            persistence,
            transport,
            epoch_source,
            service,
        }
    }

    fn phase(epoch: u64, period: ValidationPeriod) -> EpochPhase {
        EpochPhase {
            epoch,
            current_period: period,
        }
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_full_short_session_flow() {
        let h = harness(phase(3, ValidationPeriod::ShortSession));
        h.store.load().await.unwrap();

        // Fetch.
        h.store.dispatch(CeremonyEvent::StartFetchFlips).await.unwrap();
        let (hashes, contents) = fixture_flips(3, 3);
        h.store
            .dispatch(CeremonyEvent::FetchFlipsSucceeded { hashes, contents })
            .await
            .unwrap();

        let state = h.store.state();
        assert!(!state.session.loading);
        assert!(state.session.flips.iter().all(|f| f.is_decoded()));
        assert!(!state.session.can_submit);

        // Answer two of three; the last stays unanswered.
        h.store
            .dispatch(CeremonyEvent::AnswerFlip {
                option: AnswerOption::Left,
            })
            .await
            .unwrap();
        h.store.dispatch(CeremonyEvent::NextFlip).await.unwrap();
        h.store
            .dispatch(CeremonyEvent::AnswerFlip {
                option: AnswerOption::None,
            })
            .await
            .unwrap();
        assert!(!h.store.state().session.can_submit);

        // Ticks count down; only the 1-second tick fires.
        for seconds in [5, 4, 3, 2] {
            h.service.handle_tick(seconds).await.unwrap();
            assert!(h.transport.submissions().is_empty());
        }
        h.service.handle_tick(1).await.unwrap();

        // The unanswered flip was submitted as answer code 0, not omitted.
        let submissions = h.transport.submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(
            submissions[0]
                .payload
                .iter()
                .map(|a| a.answer)
                .collect::<Vec<_>>(),
            vec![1, 0, 0]
        );

        // Store and durable record agree.
        let state = h.store.state();
        assert!(state.short_answers_submitted);
        assert!(state.session.flips.is_empty());
        assert!(h.persistence.record().short_answers_submitted);

        // A later qualifying tick in the same session does nothing.
        h.service.handle_tick(1).await.unwrap();
        assert_eq!(h.transport.submissions().len(), 1);
    }

    #[tokio::test]
    async fn test_short_then_long_session_submit_independently() {
        let h = harness(phase(3, ValidationPeriod::ShortSession));
        h.store.load().await.unwrap();

        // Short session.
        let (hashes, contents) = fixture_flips(3, 2);
        h.store
            .dispatch(CeremonyEvent::FetchFlipsSucceeded { hashes, contents })
            .await
            .unwrap();
        h.store
            .dispatch(CeremonyEvent::AnswerFlip {
                option: AnswerOption::Left,
            })
            .await
            .unwrap();
        h.service.handle_tick(1).await.unwrap();
        assert!(h.store.state().short_answers_submitted);

        // Long session: fresh flips, long flag still clear.
        h.epoch_source.set(phase(3, ValidationPeriod::LongSession));
        let (hashes, contents) = fixture_flips(3, 4);
        h.store
            .dispatch(CeremonyEvent::FetchFlipsSucceeded { hashes, contents })
            .await
            .unwrap();
        for index in 0..4 {
            h.store
                .dispatch(CeremonyEvent::PickFlip { index })
                .await
                .unwrap();
            h.store
                .dispatch(CeremonyEvent::AnswerFlip {
                    option: AnswerOption::Right,
                })
                .await
                .unwrap();
        }
        h.service.handle_tick(1).await.unwrap();

        let state = h.store.state();
        assert!(state.long_answers_submitted);
        assert_eq!(state.long_answers.len(), 4);
        // Short-side answers were preserved through the long submission.
        assert!(state.short_answers_submitted);
        assert_eq!(state.short_answers.len(), 2);

        let submissions = h.transport.submissions();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].period, ValidationPeriod::ShortSession);
        assert_eq!(submissions[1].period, ValidationPeriod::LongSession);
    }

    #[tokio::test]
    async fn test_abuse_reports_flow_into_payload() {
        let h = harness(phase(3, ValidationPeriod::ShortSession));
        h.store.load().await.unwrap();

        let (hashes, contents) = fixture_flips(3, 2);
        h.store
            .dispatch(CeremonyEvent::FetchFlipsSucceeded { hashes, contents })
            .await
            .unwrap();

        // Report both flips; the cursor advances on its own.
        h.store.dispatch(CeremonyEvent::ReportAbuse).await.unwrap();
        h.store.dispatch(CeremonyEvent::ReportAbuse).await.unwrap();
        assert!(h.store.state().session.can_submit);

        h.service.handle_tick(1).await.unwrap();
        assert_eq!(
            h.transport.submissions()[0]
                .payload
                .iter()
                .map(|a| a.answer)
                .collect::<Vec<_>>(),
            vec![3, 3]
        );
    }

    #[tokio::test]
    async fn test_random_answer_orders_reach_can_submit_exactly_once() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0xF11F);
        for round in 0..8usize {
            let h = harness(phase(3, ValidationPeriod::ShortSession));
            h.store.load().await.unwrap();

            let count = 2 + round % 4;
            let (hashes, contents) = fixture_flips(3, count);
            h.store
                .dispatch(CeremonyEvent::FetchFlipsSucceeded { hashes, contents })
                .await
                .unwrap();

            // Answer the flips in a random order, re-answering some.
            let mut answered = vec![false; count];
            while answered.iter().any(|a| !a) {
                let index = rng.gen_range(0..count);
                let option = match rng.gen_range(0..3) {
                    0 => AnswerOption::None,
                    1 => AnswerOption::Left,
                    _ => AnswerOption::Right,
                };
                h.store
                    .dispatch(CeremonyEvent::PickFlip { index })
                    .await
                    .unwrap();
                h.store
                    .dispatch(CeremonyEvent::AnswerFlip { option })
                    .await
                    .unwrap();
                answered[index] = true;

                // can_submit tracks "every flip answered" exactly.
                assert_eq!(
                    h.store.state().session.can_submit,
                    answered.iter().all(|a| *a)
                );
            }
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_session_retry_pending() {
        let h = harness(phase(3, ValidationPeriod::ShortSession));
        h.store.load().await.unwrap();

        h.store.dispatch(CeremonyEvent::StartFetchFlips).await.unwrap();
        h.store
            .dispatch(CeremonyEvent::FetchFlipsFailed {
                error: "content host unreachable".to_string(),
            })
            .await
            .unwrap();

        let state = h.store.state();
        assert!(state.session.loading);
        assert!(state.session.error.is_some());

        // Nothing to submit at the deadline.
        h.service.handle_tick(1).await.unwrap();
        assert!(h.transport.submissions().is_empty());

        // A late missing-content fetch resolves the session.
        let (hashes, contents) = fixture_flips(3, 1);
        h.store
            .dispatch(CeremonyEvent::FetchFlipsSucceeded {
                hashes: hashes.clone(),
                contents: vec![],
            })
            .await
            .unwrap();
        h.store
            .dispatch(CeremonyEvent::FetchMissingFlipsSucceeded { contents })
            .await
            .unwrap();

        let state = h.store.state();
        assert!(!state.session.loading);
        assert!(state.session.flips[0].is_decoded());
    }
}
