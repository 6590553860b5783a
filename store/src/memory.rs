//! In-memory backends for the three keyed stores.

use crate::identity::IdentityStore;
use crate::records::{Identity, VerificationRequest};
use crate::request::RequestStore;
use crate::verifier::VerifierStore;
use crate::StoreError;
use idreg_types::Principal;
use std::collections::{BTreeSet, HashMap};

/// Identity records keyed by principal.
#[derive(Clone, Debug, Default)]
pub struct MemoryIdentityStore {
    records: HashMap<Principal, Identity>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn get_identity(&self, principal: &Principal) -> Result<Option<Identity>, StoreError> {
        Ok(self.records.get(principal).cloned())
    }

    fn put_identity(
        &mut self,
        principal: &Principal,
        identity: &Identity,
    ) -> Result<(), StoreError> {
        self.records.insert(*principal, identity.clone());
        Ok(())
    }

    fn identity_count(&self) -> Result<u64, StoreError> {
        Ok(self.records.len() as u64)
    }

    fn iter_identities(&self) -> Result<Vec<(Principal, Identity)>, StoreError> {
        let mut all: Vec<_> = self
            .records
            .iter()
            .map(|(p, id)| (*p, id.clone()))
            .collect();
        all.sort_by_key(|(p, _)| *p);
        Ok(all)
    }
}

/// Verifier membership as an ordered set, so listings are deterministic.
#[derive(Clone, Debug, Default)]
pub struct MemoryVerifierStore {
    members: BTreeSet<Principal>,
}

impl MemoryVerifierStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VerifierStore for MemoryVerifierStore {
    fn is_verifier(&self, principal: &Principal) -> Result<bool, StoreError> {
        Ok(self.members.contains(principal))
    }

    fn insert_verifier(&mut self, principal: &Principal) -> Result<bool, StoreError> {
        Ok(self.members.insert(*principal))
    }

    fn remove_verifier(&mut self, principal: &Principal) -> Result<bool, StoreError> {
        Ok(self.members.remove(principal))
    }

    fn verifiers(&self) -> Result<Vec<Principal>, StoreError> {
        Ok(self.members.iter().copied().collect())
    }

    fn verifier_count(&self) -> Result<u64, StoreError> {
        Ok(self.members.len() as u64)
    }
}

/// Append-only request log.
///
/// All requests live in one contiguous `Vec` in filing order. Each principal
/// keeps a list of slot positions into it, so a per-principal sequence is a
/// list of back-references rather than its own growable list of records.
#[derive(Clone, Debug, Default)]
pub struct RequestArena {
    slots: Vec<VerificationRequest>,
    index: HashMap<Principal, Vec<usize>>,
}

impl RequestArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            index: HashMap::new(),
        }
    }

    /// Total number of requests across all principals.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Look up a request by its global slot.
    pub fn slot(&self, position: usize) -> Option<&VerificationRequest> {
        self.slots.get(position)
    }

    /// Global slots of `principal`'s requests, oldest first.
    pub fn slots_for(&self, principal: &Principal) -> &[usize] {
        self.index.get(principal).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl RequestStore for RequestArena {
    fn append_request(&mut self, request: VerificationRequest) -> Result<u64, StoreError> {
        let position = self.slots.len();
        let owned = self.index.entry(request.requester).or_default();
        owned.push(position);
        let index = (owned.len() - 1) as u64;
        self.slots.push(request);
        Ok(index)
    }

    fn requests_for(&self, principal: &Principal) -> Result<Vec<VerificationRequest>, StoreError> {
        Ok(self
            .slots_for(principal)
            .iter()
            .filter_map(|&pos| self.slots.get(pos).cloned())
            .collect())
    }

    fn request_at(
        &self,
        principal: &Principal,
        index: u64,
    ) -> Result<Option<VerificationRequest>, StoreError> {
        let Ok(index) = usize::try_from(index) else {
            return Ok(None);
        };
        Ok(self
            .slots_for(principal)
            .get(index)
            .and_then(|&pos| self.slots.get(pos))
            .cloned())
    }

    fn request_count_for(&self, principal: &Principal) -> Result<u64, StoreError> {
        Ok(self.slots_for(principal).len() as u64)
    }

    fn iter_requests(&self) -> Result<Vec<VerificationRequest>, StoreError> {
        Ok(self.slots.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idreg_types::Timestamp;

    fn request(who: u8, hash: &str, at: u64) -> VerificationRequest {
        VerificationRequest::new(Principal::repeat(who), hash.into(), "", Timestamp::new(at))
    }

    #[test]
    fn identity_put_get() {
        let mut store = MemoryIdentityStore::new();
        let p = Principal::repeat(1);
        assert_eq!(store.get_identity(&p).unwrap(), None);
        assert!(!store.identity_exists(&p).unwrap());

        let id = Identity::new("alice", "hashA".into(), Timestamp::new(3));
        store.put_identity(&p, &id).unwrap();
        assert_eq!(store.get_identity(&p).unwrap(), Some(id));
        assert!(store.identity_exists(&p).unwrap());
        assert_eq!(store.identity_count().unwrap(), 1);
    }

    #[test]
    fn identity_iteration_is_sorted() {
        let mut store = MemoryIdentityStore::new();
        for b in [9u8, 3, 5] {
            let id = Identity::new("x", "h".into(), Timestamp::new(1));
            store.put_identity(&Principal::repeat(b), &id).unwrap();
        }
        let keys: Vec<_> = store
            .iter_identities()
            .unwrap()
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        assert_eq!(
            keys,
            vec![Principal::repeat(3), Principal::repeat(5), Principal::repeat(9)]
        );
    }

    #[test]
    fn verifier_membership() {
        let mut store = MemoryVerifierStore::new();
        let p = Principal::repeat(4);
        assert!(store.insert_verifier(&p).unwrap());
        assert!(!store.insert_verifier(&p).unwrap());
        assert!(store.is_verifier(&p).unwrap());
        assert_eq!(store.verifier_count().unwrap(), 1);
        assert!(store.remove_verifier(&p).unwrap());
        assert!(!store.remove_verifier(&p).unwrap());
        assert!(!store.is_verifier(&p).unwrap());
    }

    #[test]
    fn arena_keeps_per_principal_order() {
        let mut arena = RequestArena::with_capacity(4);
        assert_eq!(arena.append_request(request(1, "a1", 1)).unwrap(), 0);
        assert_eq!(arena.append_request(request(2, "b1", 2)).unwrap(), 0);
        assert_eq!(arena.append_request(request(1, "a2", 3)).unwrap(), 1);

        let ones = arena.requests_for(&Principal::repeat(1)).unwrap();
        let hashes: Vec<_> = ones.iter().map(|r| r.document_hash.as_str()).collect();
        assert_eq!(hashes, vec!["a1", "a2"]);
        assert_eq!(arena.slots_for(&Principal::repeat(1)), &[0, 2]);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn arena_back_references() {
        let mut arena = RequestArena::new();
        arena.append_request(request(1, "a1", 1)).unwrap();
        arena.append_request(request(2, "b1", 2)).unwrap();
        arena.append_request(request(1, "a2", 3)).unwrap();

        let second = arena.request_at(&Principal::repeat(1), 1).unwrap().unwrap();
        assert_eq!(second.document_hash.as_str(), "a2");
        assert_eq!(arena.slot(1).unwrap().document_hash.as_str(), "b1");
        assert!(arena.request_at(&Principal::repeat(1), 2).unwrap().is_none());
        assert!(arena.request_at(&Principal::repeat(1), u64::MAX).unwrap().is_none());
    }

    #[test]
    fn arena_unknown_principal_is_empty() {
        let arena = RequestArena::new();
        let p = Principal::repeat(8);
        assert!(arena.is_empty());
        assert!(arena.requests_for(&p).unwrap().is_empty());
        assert_eq!(arena.request_count_for(&p).unwrap(), 0);
        assert!(arena.slots_for(&p).is_empty());
    }
}
