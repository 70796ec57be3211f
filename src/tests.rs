//! Lifecycle Integration Tests
//!
//! End-to-end request lifecycles, event delivery and concurrent access.

#[cfg(test)]
mod integration_tests {
    use std::sync::Arc;

    use crate::config::Config;
    use crate::error::LendingError;
    use crate::registry::RequestStatus;
    use crate::services::{EventHub, LendingEvent, LendingService, RecordingSink};
    use crate::types::Address;

    fn addr(suffix: &str) -> Address {
        Address::new(&format!("0x{:0>40}", suffix)).unwrap()
    }

    fn owner() -> Address {
        addr("a")
    }

    fn service_with_recorder() -> (Arc<LendingService>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let service = LendingService::new(owner(), 0, sink.clone());
        (Arc::new(service), sink)
    }

    // =============================================================
    // Lifecycle Tests
    // =============================================================

    mod lifecycle_tests {
        use super::*;

        #[tokio::test]
        async fn test_ids_are_sequential() {
            let (service, _) = service_with_recorder();

            for expected in 1..=20u64 {
                let id = service.submit_request(&addr("1"), 100).await.unwrap();
                assert_eq!(id, expected);
            }
            assert_eq!(service.request_count().await, 20);
        }

        #[tokio::test]
        async fn test_rejected_amount_creates_nothing() {
            let (service, sink) = service_with_recorder();
            service.submit_request(&addr("1"), 100).await.unwrap();

            assert!(matches!(
                service.submit_request(&addr("1"), 0).await,
                Err(LendingError::InvalidAmount { .. })
            ));

            // 실패한 제출은 id를 소비하지 않음
            assert_eq!(service.request_count().await, 1);
            assert_eq!(service.submit_request(&addr("1"), 5).await, Ok(2));
            assert_eq!(sink.len(), 2);
        }

        #[tokio::test]
        async fn test_full_lifecycle() {
            let (service, sink) = service_with_recorder();
            let borrower = addr("1");

            let id = service.submit_request(&borrower, 100).await.unwrap();
            service.approve_request(&owner(), id).await.unwrap();

            assert_eq!(
                service.reject_request(&owner(), id).await,
                Err(LendingError::InvalidTransition {
                    id,
                    from: RequestStatus::Approved,
                    to: RequestStatus::Rejected,
                })
            );

            assert_eq!(
                sink.events(),
                vec![
                    LendingEvent::RequestSubmitted {
                        requester: borrower,
                        amount: 100,
                        id,
                    },
                    LendingEvent::RequestApproved { id },
                ]
            );
        }

        #[tokio::test]
        async fn test_missing_request() {
            let (service, _) = service_with_recorder();
            assert_eq!(service.get_request(999).await, Err(LendingError::NotFound(999)));

            service.submit_request(&addr("1"), 100).await.unwrap();
            assert_eq!(service.get_request(999).await, Err(LendingError::NotFound(999)));
        }

        #[tokio::test]
        async fn test_owner_may_submit() {
            let (service, _) = service_with_recorder();

            let id = service.submit_request(&owner(), 100).await.unwrap();
            service.reject_request(&owner(), id).await.unwrap();
            assert_eq!(service.get_request(id).await.unwrap().status, RequestStatus::Rejected);
        }
    }

    // =============================================================
    // Event Hub Tests
    // =============================================================

    mod hub_tests {
        use super::*;

        #[tokio::test]
        async fn test_service_with_hub() {
            let config = Config::new(owner());
            let hub = Arc::new(EventHub::new(config.event_channel_capacity));
            let service = LendingService::from_config(&config, hub.clone());

            let borrower = addr("1");
            let mut all = hub.subscribe();
            let mut mine = hub.subscribe_requester(&borrower).await;

            let id = service.submit_request(&borrower, 250).await.unwrap();
            service.approve_request(&config.owner, id).await.unwrap();

            for rx in [&mut all, &mut mine] {
                assert_eq!(
                    rx.recv().await.unwrap(),
                    LendingEvent::RequestSubmitted {
                        requester: borrower.clone(),
                        amount: 250,
                        id,
                    }
                );
                assert_eq!(rx.recv().await.unwrap(), LendingEvent::RequestApproved { id });
            }
        }

        #[tokio::test]
        async fn test_failed_operations_are_silent() {
            let hub = Arc::new(EventHub::default());
            let service = LendingService::new(owner(), 0, hub.clone());
            let mut rx = hub.subscribe();

            let _ = service.submit_request(&addr("1"), 0).await;
            let _ = service.approve_request(&addr("1"), 1).await;
            let _ = service.approve_request(&owner(), 1).await;

            assert!(rx.try_recv().is_err());
        }
    }

    // =============================================================
    // Concurrency Tests
    // =============================================================

    mod concurrency_tests {
        use super::*;

        #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
        async fn test_concurrent_submits_never_duplicate_ids() {
            let (service, sink) = service_with_recorder();

            let handles: Vec<_> = (0..100u128)
                .map(|i| {
                    let service = service.clone();
                    tokio::spawn(async move { service.submit_request(&addr("1"), i + 1).await })
                })
                .collect();

            let mut ids = Vec::new();
            for handle in handles {
                ids.push(handle.await.unwrap().unwrap());
            }
            ids.sort_unstable();
            assert_eq!(ids, (1..=100).collect::<Vec<u64>>());

            // 알림 순서 = 적용 순서
            let notified: Vec<_> = sink.events().iter().map(LendingEvent::request_id).collect();
            assert_eq!(notified, (1..=100).collect::<Vec<u64>>());
        }

        #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
        async fn test_concurrent_approve_and_reject() {
            let (service, sink) = service_with_recorder();

            for _ in 0..50 {
                let id = service.submit_request(&addr("1"), 100).await.unwrap();

                let approve = {
                    let service = service.clone();
                    tokio::spawn(async move { service.approve_request(&owner(), id).await })
                };
                let reject = {
                    let service = service.clone();
                    tokio::spawn(async move { service.reject_request(&owner(), id).await })
                };

                let results = [approve.await.unwrap(), reject.await.unwrap()];
                let succeeded = results.iter().filter(|r| r.is_ok()).count();
                assert_eq!(succeeded, 1, "request {id}: {results:?}");

                let failure = results.iter().find_map(|r| r.clone().err()).unwrap();
                assert!(matches!(failure, LendingError::InvalidTransition { .. }));

                let status = service.get_request(id).await.unwrap().status;
                assert!(status.is_terminal());
            }

            // 제출 50건 + 결정 50건
            assert_eq!(sink.len(), 100);
        }

        #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
        async fn test_reads_see_whole_transitions() {
            let (service, _) = service_with_recorder();
            for _ in 0..20 {
                service.submit_request(&addr("1"), 100).await.unwrap();
            }

            let writer = {
                let service = service.clone();
                tokio::spawn(async move {
                    for id in 1..=20 {
                        service.approve_request(&owner(), id).await.unwrap();
                    }
                })
            };

            for _ in 0..20 {
                for request in service.snapshot().await {
                    // status와 decided_at은 항상 함께 바뀜
                    assert_eq!(request.status.is_terminal(), request.decided_at.is_some());
                }
                tokio::task::yield_now().await;
            }

            writer.await.unwrap();
            assert_eq!(service.requests_with_status(RequestStatus::Approved).await.len(), 20);
        }
    }
}
