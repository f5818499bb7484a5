//! # Path Hijack
//!
//! An attacker deploys a path from their own OApp to a victim OApp, then
//! tries to take over the victim's receive side so that messages over the
//! forged path would verify under attacker-chosen rules.
//!
//! ## Attack Steps
//!
//! 1. Deploy `attacker → victim` (allowed: the attacker owns the source)
//! 2. Set the receive config on that path (must be refused)
//! 3. Deploy `victim → attacker` claiming the victim as source (must be refused)
//! 4. Set the send config of a victim-owned path (must be refused)

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use proptest::prelude::*;
    use uln_manager::{
        ConnectionState, ErrorKind, MutationKind, Operation, OperationResult, UlnError, UlnEvent,
    };

    #[test]
    fn test_forged_path_deploys_but_receive_side_stays_with_victim() {
        let (handler, sink) = handler();
        let attacker = random_account();
        let victim = random_account();
        let key = path(attacker, victim);

        let deployed = handler
            .handle(&signed(attacker, &Operation::DeployConnection(key)))
            .unwrap();
        assert!(matches!(deployed, OperationResult::PathDeployed { .. }));
        let before = snapshot(&handler);

        let err = handler
            .handle(&signed(
                attacker,
                &Operation::SetReceiveConfig {
                    key,
                    payload: vec![0x00; 32],
                },
            ))
            .unwrap_err();

        assert_eq!(
            err,
            UlnError::Unauthorized {
                claimed_owner: victim,
                caller: attacker,
            }
        );
        assert_eq!(snapshot(&handler), before);
        assert_eq!(
            sink.events().last(),
            Some(&UlnEvent::OperationRejected {
                operation: MutationKind::SetReceiveConfig,
                key,
                caller: attacker,
                kind: ErrorKind::Unauthorized,
            })
        );

        let status = handler
            .handle(&signed(attacker, &Operation::ConnectionStatus(key)))
            .unwrap();
        match status {
            OperationResult::Status(status) => {
                assert_eq!(status.state, ConnectionState::Deployed);
                assert!(!status.receive_configured());
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_victim_keeps_control_after_attack() {
        let (handler, _) = handler();
        let attacker = random_account();
        let victim = random_account();
        let key = path(attacker, victim);

        handler
            .handle(&signed(attacker, &Operation::DeployConnection(key)))
            .unwrap();
        let _ = handler.handle(&signed(
            attacker,
            &Operation::SetReceiveConfig {
                key,
                payload: vec![0xEE],
            },
        ));

        let result = handler
            .handle(&signed(
                victim,
                &Operation::SetReceiveConfig {
                    key,
                    payload: vec![0x01],
                },
            ))
            .unwrap();
        assert_eq!(
            result,
            OperationResult::ConfigVersion {
                direction: uln_manager::Direction::Receive,
                version: 1,
            }
        );
    }

    #[test]
    fn test_deploy_impersonating_source_refused() {
        let (handler, _) = handler();
        let attacker = random_account();
        let victim = random_account();

        let err = handler
            .handle(&signed(
                attacker,
                &Operation::DeployConnection(path(victim, attacker)),
            ))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(snapshot(&handler).is_empty());
    }

    #[test]
    fn test_send_side_of_victim_path_refused() {
        let (handler, _) = handler();
        let attacker = random_account();
        let victim = random_account();
        let key = path(victim, attacker);

        handler
            .handle(&signed(victim, &Operation::DeployConnection(key)))
            .unwrap();
        let before = snapshot(&handler);

        // The attacker is the destination here; the send side is not theirs.
        let err = handler
            .handle(&signed(
                attacker,
                &Operation::SetSendConfig {
                    key,
                    payload: vec![0xEE],
                },
            ))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(snapshot(&handler), before);
    }

    #[test]
    fn test_redeploy_cannot_reset_victim_config() {
        let (handler, _) = handler();
        let source = random_account();
        let victim = random_account();
        let key = path(source, victim);

        handler
            .handle(&signed(source, &Operation::DeployConnection(key)))
            .unwrap();
        handler
            .handle(&signed(
                victim,
                &Operation::SetReceiveConfig {
                    key,
                    payload: vec![0x01],
                },
            ))
            .unwrap();
        let before = snapshot(&handler);

        let err = handler
            .handle(&signed(source, &Operation::DeployConnection(key)))
            .unwrap_err();
        assert_eq!(err, UlnError::PathAlreadyExists(key));
        assert_eq!(snapshot(&handler), before);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_receive_side_only_writable_by_destination(
            payload in proptest::collection::vec(any::<u8>(), 0..128),
        ) {
            let (handler, _) = handler();
            let attacker = random_account();
            let victim = random_account();
            let key = path(attacker, victim);
            handler.handle(&signed(attacker, &Operation::DeployConnection(key))).unwrap();
            let before = snapshot(&handler);

            let result = handler.handle(&signed(
                attacker,
                &Operation::SetReceiveConfig { key, payload },
            ));
            prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::Unauthorized);
            prop_assert_eq!(snapshot(&handler), before);
        }
    }
}
