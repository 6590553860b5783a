//! Persisted layout of the registry: the three keyed stores plus the owner.

use crate::error::RegistryError;
use crate::guards::{require_non_empty_hash, require_non_empty_name, require_valid_target};
use idreg_store::{Identity, VerificationRequest};
use idreg_types::Principal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;

/// A point-in-time copy of all registry state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub owner: Principal,
    pub verifiers: Vec<Principal>,
    pub identities: Vec<(Principal, Identity)>,
    /// Requests in global filing order.
    pub requests: Vec<VerificationRequest>,
}

impl RegistrySnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, RegistryError> {
        bincode::serialize(self).map_err(|e| RegistryError::Snapshot(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RegistryError> {
        bincode::deserialize(bytes).map_err(|e| RegistryError::Snapshot(e.to_string()))
    }

    /// Reject states the registry operations could never have produced.
    ///
    /// Every verifier is non-null, every record exists with a non-empty name
    /// and document, no principal is listed twice, and every request belongs
    /// to a registered principal.
    pub fn validate(&self) -> Result<(), RegistryError> {
        require_valid_target(&self.owner).map_err(|e| corrupt("owner", e))?;
        for verifier in &self.verifiers {
            require_valid_target(verifier).map_err(|e| corrupt(verifier, e))?;
        }

        let mut registered = HashSet::with_capacity(self.identities.len());
        for (principal, identity) in &self.identities {
            if !identity.exists() {
                return Err(RegistryError::Snapshot(format!(
                    "{principal}: record has no registration time"
                )));
            }
            require_non_empty_name(&identity.name).map_err(|e| corrupt(principal, e))?;
            require_non_empty_hash(&identity.document_hash).map_err(|e| corrupt(principal, e))?;
            if !registered.insert(*principal) {
                return Err(RegistryError::Snapshot(format!(
                    "{principal}: record listed twice"
                )));
            }
        }

        for request in &self.requests {
            if !registered.contains(&request.requester) {
                return Err(RegistryError::Snapshot(format!(
                    "{}: request filed without an identity",
                    request.requester
                )));
            }
        }
        Ok(())
    }
}

fn corrupt(context: impl Display, error: RegistryError) -> RegistryError {
    RegistryError::Snapshot(format!("{context}: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IdentityRegistry;
    use idreg_nullables::{NullClock, NullEventSink};
    use idreg_types::Timestamp;

    fn populated() -> IdentityRegistry {
        let owner = Principal::repeat(0xAA);
        let mut reg =
            IdentityRegistry::new(owner, NullClock::new(50), NullEventSink::new()).unwrap();
        let alice = Principal::repeat(1);
        let bob = Principal::repeat(2);
        reg.register(&alice, "Alice", "hashA".into()).unwrap();
        reg.register(&bob, "Bob", "hashB".into()).unwrap();
        reg.authorize_verifier(&owner, &bob).unwrap();
        reg.verify(&bob, &alice, 2).unwrap();
        reg.request_verification(&alice, "hashA2".into(), "renew").unwrap();
        reg.request_verification(&bob, "hashB2".into(), "").unwrap();
        reg.request_verification(&alice, "hashA3".into(), "again").unwrap();
        reg.deactivate(&bob, &bob).unwrap();
        reg
    }

    #[test]
    fn bytes_round_trip() {
        let snapshot = populated().snapshot().unwrap();
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(RegistrySnapshot::from_bytes(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn restore_reproduces_state() {
        let original = populated();
        let snapshot = original.snapshot().unwrap();
        let restored =
            IdentityRegistry::restore(snapshot.clone(), NullClock::new(60), NullEventSink::new())
                .unwrap();

        assert_eq!(restored.snapshot().unwrap(), snapshot);
        let alice = Principal::repeat(1);
        assert!(restored.is_verified(&alice).unwrap());
        let hashes: Vec<_> = restored
            .requests(&alice)
            .unwrap()
            .into_iter()
            .map(|r| r.document_hash.to_string())
            .collect();
        assert_eq!(hashes, vec!["hashA2", "hashA3"]);
    }

    #[test]
    fn restore_reseeds_missing_owner() {
        let mut snapshot = populated().snapshot().unwrap();
        snapshot.verifiers.retain(|v| *v != snapshot.owner);
        let restored =
            IdentityRegistry::restore(snapshot, NullClock::new(60), NullEventSink::new()).unwrap();
        assert!(restored.is_verifier(&Principal::repeat(0xAA)).unwrap());
    }

    fn restore(snapshot: RegistrySnapshot) -> Result<IdentityRegistry, RegistryError> {
        IdentityRegistry::restore(snapshot, NullClock::new(60), NullEventSink::new())
    }

    #[test]
    fn populated_snapshot_is_valid() {
        populated().snapshot().unwrap().validate().unwrap();
    }

    #[test]
    fn restore_rejects_blank_record() {
        let mut snapshot = populated().snapshot().unwrap();
        snapshot.identities.push((
            Principal::repeat(9),
            Identity::new("", "".into(), Timestamp::new(5)),
        ));
        assert!(matches!(restore(snapshot), Err(RegistryError::Snapshot(_))));
    }

    #[test]
    fn restore_rejects_blank_document() {
        let mut snapshot = populated().snapshot().unwrap();
        snapshot.identities.push((
            Principal::repeat(9),
            Identity::new("Carol", "".into(), Timestamp::new(5)),
        ));
        assert!(matches!(restore(snapshot), Err(RegistryError::Snapshot(_))));
    }

    #[test]
    fn restore_rejects_null_verifier() {
        let mut snapshot = populated().snapshot().unwrap();
        snapshot.verifiers.push(Principal::ZERO);
        assert!(matches!(restore(snapshot), Err(RegistryError::Snapshot(_))));
    }

    #[test]
    fn restore_rejects_null_owner() {
        let mut snapshot = populated().snapshot().unwrap();
        snapshot.owner = Principal::ZERO;
        assert!(matches!(restore(snapshot), Err(RegistryError::Snapshot(_))));
    }

    #[test]
    fn restore_rejects_request_without_identity() {
        let mut snapshot = populated().snapshot().unwrap();
        snapshot.requests.push(VerificationRequest::new(
            Principal::repeat(7),
            "ghost".into(),
            "",
            Timestamp::new(5),
        ));
        assert!(matches!(restore(snapshot), Err(RegistryError::Snapshot(_))));
    }

    #[test]
    fn restore_rejects_unset_registration_time() {
        let mut snapshot = populated().snapshot().unwrap();
        snapshot.identities.push((
            Principal::repeat(9),
            Identity::new("Carol", "hashC".into(), Timestamp::EPOCH),
        ));
        assert!(matches!(restore(snapshot), Err(RegistryError::Snapshot(_))));
    }

    #[test]
    fn restore_rejects_duplicate_record() {
        let mut snapshot = populated().snapshot().unwrap();
        let first = snapshot.identities[0].clone();
        snapshot.identities.push(first);
        assert!(matches!(restore(snapshot), Err(RegistryError::Snapshot(_))));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(matches!(
            RegistrySnapshot::from_bytes(&[1, 2, 3]),
            Err(RegistryError::Snapshot(_))
        ));
    }
}
