//! # Integration Test Flows
//!
//! Drives the manager through `UlnManagerHandler` exactly as the operator
//! binary does: encoded operations in envelopes, results and events out.
//!
//! ## Flows Tested:
//!
//! 1. **Full lifecycle**: deploy, configure both sides in either order, reconfigure
//! 2. **Multiple paths**: one source to several destinations, listed by `paths_from`
//! 3. **Durable store**: the same flow over `FileBackedKVStore`
//! 4. **Concurrency**: independent callers on separate threads

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use shared_types::Eid;
    use std::sync::Arc;
    use uln_manager::{
        ConnectionState, Direction, FileBackedKVStore, Operation, OperationResult, PathKey,
        UlnEvent, UlnManagerApi, UlnManagerConfig, UlnManagerHandler, UlnManagerService,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn set(direction: Direction, key: PathKey, payload: Vec<u8>) -> Operation {
        match direction {
            Direction::Send => Operation::SetSendConfig { key, payload },
            Direction::Receive => Operation::SetReceiveConfig { key, payload },
        }
    }

    fn version(result: OperationResult) -> u64 {
        match result {
            OperationResult::ConfigVersion { version, .. } => version,
            other => panic!("expected a config version, got {other:?}"),
        }
    }

    // =============================================================================
    // FULL LIFECYCLE
    // =============================================================================

    #[test]
    fn test_full_lifecycle_receive_first() {
        let (handler, sink) = handler();
        let src = random_account();
        let dst = random_account();
        let key = path(src, dst);

        let path_id = match handler
            .handle(&signed(src, &Operation::DeployConnection(key)))
            .unwrap()
        {
            OperationResult::PathDeployed { path_id } => path_id,
            other => panic!("unexpected {other:?}"),
        };

        assert_eq!(
            version(
                handler
                    .handle(&signed(dst, &set(Direction::Receive, key, vec![1])))
                    .unwrap()
            ),
            1
        );
        assert_eq!(
            version(
                handler
                    .handle(&signed(src, &set(Direction::Send, key, vec![2])))
                    .unwrap()
            ),
            1
        );
        assert_eq!(
            version(
                handler
                    .handle(&signed(dst, &set(Direction::Receive, key, vec![3])))
                    .unwrap()
            ),
            2
        );

        let config = match handler
            .handle(&signed(
                src,
                &Operation::GetConfig {
                    key,
                    direction: Direction::Receive,
                },
            ))
            .unwrap()
        {
            OperationResult::Config(config) => config,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(config.payload, vec![3]);
        assert_eq!(config.version, 2);

        assert_eq!(
            sink.take(),
            vec![
                UlnEvent::PathDeployed { path_id, key },
                UlnEvent::ReceiveConfigUpdated { key, version: 1 },
                UlnEvent::SendConfigUpdated { key, version: 1 },
                UlnEvent::ReceiveConfigUpdated { key, version: 2 },
            ]
        );
    }

    #[test]
    fn test_path_id_is_stable_across_lookups() {
        let (handler, _) = handler();
        let src = random_account();
        let key = path(src, random_account());
        handler
            .handle(&signed(src, &Operation::DeployConnection(key)))
            .unwrap();

        let first = handler.service().lookup_path(&key).unwrap();
        handler
            .handle(&signed(src, &set(Direction::Send, key, vec![9])))
            .unwrap();
        let second = handler.service().lookup_path(&key).unwrap();
        assert_eq!(first.id(), second.id());
        assert_eq!(first.id(), key.path_id());
    }

    // =============================================================================
    // MULTIPLE PATHS
    // =============================================================================

    #[test]
    fn test_one_source_many_destinations() {
        let (handler, _) = handler();
        let src = random_account();
        let destinations: Vec<_> = (0..5).map(|_| random_account()).collect();

        for dst in &destinations {
            handler
                .handle(&signed(src, &Operation::DeployConnection(path(src, *dst))))
                .unwrap();
        }
        // A path on another endpoint must not show up.
        let elsewhere = PathKey::new(Eid(40161), src, ARBITRUM, destinations[0]);
        handler
            .handle(&signed(src, &Operation::DeployConnection(elsewhere)))
            .unwrap();

        let paths = handler.service().paths_from(ETHEREUM, &src).unwrap();
        assert_eq!(paths.len(), destinations.len());
        assert!(paths.iter().all(|p| p.src_oapp() == &src));

        // Each destination configures only its own receive side.
        for dst in &destinations {
            handler
                .handle(&signed(*dst, &set(Direction::Receive, path(src, *dst), vec![1])))
                .unwrap();
        }
        let err = handler
            .handle(&signed(
                destinations[0],
                &set(Direction::Receive, path(src, destinations[1]), vec![1]),
            ))
            .unwrap_err();
        assert_eq!(err.kind(), uln_manager::ErrorKind::Unauthorized);
    }

    #[test]
    fn test_reverse_paths_are_distinct() {
        let (handler, _) = handler();
        let a = random_account();
        let b = random_account();

        handler
            .handle(&signed(a, &Operation::DeployConnection(path(a, b))))
            .unwrap();
        handler
            .handle(&signed(b, &Operation::DeployConnection(path(b, a))))
            .unwrap();

        assert_ne!(path(a, b).path_id(), path(b, a).path_id());
        let status = handler.service().connection_status(&path(b, a)).unwrap();
        assert_eq!(status.state, ConnectionState::Deployed);
    }

    // =============================================================================
    // DURABLE STORE
    // =============================================================================

    #[test]
    fn test_flow_over_file_backed_store() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("uln.store");
        let src = random_account();
        let dst = random_account();
        let key = path(src, dst);
        let config = UlnManagerConfig::default();

        {
            let store = FileBackedKVStore::open(&file).unwrap();
            let handler = UlnManagerHandler::new(
                UlnManagerService::new(store, config.clone()),
                config.clone(),
            );
            handler
                .handle(&signed(src, &Operation::DeployConnection(key)))
                .unwrap();
            handler
                .handle(&signed(dst, &set(Direction::Receive, key, vec![5, 5])))
                .unwrap();
            // Rejected operations must not reach the file either.
            let _ = handler.handle(&signed(src, &set(Direction::Receive, key, vec![6])));
        }

        let service = UlnManagerService::new(FileBackedKVStore::open(&file).unwrap(), config);
        let receive = service.get_config(&key, Direction::Receive).unwrap();
        assert_eq!(receive.payload, vec![5, 5]);
        assert_eq!(receive.version, 1);
        assert!(!service.connection_status(&key).unwrap().send_configured());
    }

    // =============================================================================
    // CONCURRENCY
    // =============================================================================

    #[test]
    fn test_independent_callers_on_threads() {
        let (handler, sink) = handler();
        let handler = Arc::new(handler);

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let handler = Arc::clone(&handler);
                std::thread::spawn(move || {
                    let src = random_account();
                    let dst = random_account();
                    let key = path(src, dst);
                    handler
                        .handle(&signed(src, &Operation::DeployConnection(key)))
                        .unwrap();
                    for _ in 0..4 {
                        handler
                            .handle(&signed(src, &set(Direction::Send, key, vec![1])))
                            .unwrap();
                    }
                    key
                })
            })
            .collect();

        for thread in threads {
            let key = thread.join().unwrap();
            let config = handler.service().get_config(&key, Direction::Send).unwrap();
            assert_eq!(config.version, 4);
        }
        assert_eq!(sink.events().len(), 8 * 5);
    }
}
