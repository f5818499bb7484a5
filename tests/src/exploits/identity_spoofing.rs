//! # Identity Spoofing
//!
//! Attempts to act as another account without being its envelope origin:
//! naming the victim inside the payload, stripping the origin, or sending
//! malformed bytes that might be read as an identity.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use shared_types::OperationEnvelope;
    use uln_manager::ipc::opcodes;
    use uln_manager::{DecodeError, ErrorKind, Operation, PathKey, UlnError, UlnManagerApi};

    #[test]
    fn test_victim_named_in_payload_is_not_the_caller() {
        let (handler, _) = handler();
        let source = random_account();
        let victim = random_account();
        let attacker = random_account();
        let key = path(source, victim);
        handler
            .handle(&signed(source, &Operation::DeployConnection(key)))
            .unwrap();

        // Append the victim account after the payload, as a "requester" field.
        let mut bytes = Operation::SetReceiveConfig {
            key,
            payload: vec![1],
        }
        .encode();
        bytes.extend_from_slice(victim.as_bytes());

        let err = handler
            .handle(&OperationEnvelope::new(attacker, bytes))
            .unwrap_err();
        assert_eq!(err, UlnError::Decode(DecodeError::TrailingBytes(32)));

        // The victim's account inside the config payload is just bytes.
        let err = handler
            .handle(&signed(
                attacker,
                &Operation::SetReceiveConfig {
                    key,
                    payload: victim.as_bytes().to_vec(),
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
    }

    #[test]
    fn test_stripped_origin_is_fatal_and_writes_nothing() {
        let (handler, sink) = handler();
        let source = random_account();
        let op = Operation::DeployConnection(path(source, random_account()));

        let err = handler
            .handle(&OperationEnvelope::unattributed(op.encode()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedContext);
        assert!(err.is_fatal());
        assert!(snapshot(&handler).is_empty());
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_truncated_key_never_reaches_guard() {
        let (handler, sink) = handler();
        let mut bytes = opcodes::DEPLOY_CONNECTION.to_be_bytes().to_vec();
        bytes.extend_from_slice(&[0xAA; 20]);

        let err = handler
            .handle(&OperationEnvelope::new(random_account(), bytes))
            .unwrap_err();
        assert!(matches!(
            err,
            UlnError::Decode(DecodeError::Truncated { .. })
        ));
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_oversized_config_rejected_before_state() {
        let (handler, _) = handler();
        let source = random_account();
        let key = path(source, random_account());
        handler
            .handle(&signed(source, &Operation::DeployConnection(key)))
            .unwrap();
        let before = snapshot(&handler);

        let err = handler
            .handle(&signed(
                source,
                &Operation::SetSendConfig {
                    key,
                    payload: vec![0; 4097],
                },
            ))
            .unwrap_err();
        assert!(matches!(
            err,
            UlnError::Decode(DecodeError::PayloadTooLarge { len: 4097, .. })
        ));
        assert_eq!(snapshot(&handler), before);
    }

    #[test]
    fn test_reads_do_not_need_ownership() {
        let (handler, _) = handler();
        let source = random_account();
        let key: PathKey = path(source, random_account());
        handler
            .handle(&signed(source, &Operation::DeployConnection(key)))
            .unwrap();

        let path = handler.service().lookup_path(&key).unwrap();
        assert_eq!(path.key(), &key);
        assert!(handler
            .handle(&signed(random_account(), &Operation::LookupPath(key)))
            .is_ok());
    }
}
