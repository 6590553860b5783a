//! Thread-safe handle over a single registry.
//!
//! All three stores sit behind one mutex, so each operation's
//! read-check-write sequence runs without interleaving.

use crate::engine::IdentityRegistry;
use crate::error::RegistryError;
use crate::snapshot::RegistrySnapshot;
use idreg_store::{
    Identity, IdentityStore, MemoryIdentityStore, MemoryVerifierStore, RequestArena,
    RequestStore, StoreError, VerificationRequest, VerifierStore,
};
use idreg_types::{DocumentHash, Principal, VerificationLevel};
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable, `Send + Sync` handle to one [`IdentityRegistry`].
pub struct SharedRegistry<I = MemoryIdentityStore, V = MemoryVerifierStore, R = RequestArena> {
    inner: Arc<Mutex<IdentityRegistry<I, V, R>>>,
}

impl<I, V, R> Clone for SharedRegistry<I, V, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I, V, R> SharedRegistry<I, V, R>
where
    I: IdentityStore,
    V: VerifierStore,
    R: RequestStore,
{
    pub fn new(registry: IdentityRegistry<I, V, R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, IdentityRegistry<I, V, R>>, RegistryError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("registry lock poisoned".into()).into())
    }

    /// Run `f` with exclusive access to the registry.
    pub fn with<T>(
        &self,
        f: impl FnOnce(&mut IdentityRegistry<I, V, R>) -> Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        let mut guard = self.lock()?;
        f(&mut guard)
    }

    pub fn register(
        &self,
        caller: &Principal,
        name: &str,
        document_hash: DocumentHash,
    ) -> Result<(), RegistryError> {
        self.lock()?.register(caller, name, document_hash)
    }

    pub fn verify(&self, caller: &Principal, user: &Principal, level: u8) -> Result<(), RegistryError> {
        self.lock()?.verify(caller, user, level)
    }

    pub fn request_verification(
        &self,
        caller: &Principal,
        document_hash: DocumentHash,
        notes: &str,
    ) -> Result<u64, RegistryError> {
        self.lock()?.request_verification(caller, document_hash, notes)
    }

    pub fn update_document_hash(
        &self,
        caller: &Principal,
        new_hash: DocumentHash,
    ) -> Result<(), RegistryError> {
        self.lock()?.update_document_hash(caller, new_hash)
    }

    pub fn deactivate(&self, caller: &Principal, target: &Principal) -> Result<(), RegistryError> {
        self.lock()?.deactivate(caller, target)
    }

    pub fn authorize_verifier(
        &self,
        caller: &Principal,
        target: &Principal,
    ) -> Result<(), RegistryError> {
        self.lock()?.authorize_verifier(caller, target)
    }

    pub fn revoke_verifier(&self, caller: &Principal, target: &Principal) -> Result<(), RegistryError> {
        self.lock()?.revoke_verifier(caller, target)
    }

    pub fn identity(&self, principal: &Principal) -> Result<Identity, RegistryError> {
        self.lock()?.identity(principal)
    }

    pub fn verification_level(
        &self,
        principal: &Principal,
    ) -> Result<VerificationLevel, RegistryError> {
        self.lock()?.verification_level(principal)
    }

    pub fn is_verified(&self, principal: &Principal) -> Result<bool, RegistryError> {
        self.lock()?.is_verified(principal)
    }

    pub fn requests(&self, principal: &Principal) -> Result<Vec<VerificationRequest>, RegistryError> {
        self.lock()?.requests(principal)
    }

    pub fn request(
        &self,
        principal: &Principal,
        index: u64,
    ) -> Result<Option<VerificationRequest>, RegistryError> {
        self.lock()?.request(principal, index)
    }

    pub fn is_verifier(&self, principal: &Principal) -> Result<bool, RegistryError> {
        self.lock()?.is_verifier(principal)
    }

    pub fn verifiers(&self) -> Result<Vec<Principal>, RegistryError> {
        self.lock()?.verifiers()
    }

    pub fn owner(&self) -> Result<Principal, RegistryError> {
        Ok(*self.lock()?.owner())
    }

    /// Capture all state under one lock.
    pub fn snapshot(&self) -> Result<RegistrySnapshot, RegistryError> {
        self.lock()?.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idreg_nullables::{NullClock, NullEventSink};
    use std::thread;

    fn owner() -> Principal {
        Principal::repeat(0xAA)
    }

    fn shared() -> SharedRegistry {
        SharedRegistry::new(
            IdentityRegistry::new(owner(), NullClock::new(10), NullEventSink::new()).unwrap(),
        )
    }

    #[test]
    fn handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedRegistry>();
    }

    #[test]
    fn concurrent_registration_of_same_principal_succeeds_once() {
        let reg = shared();
        let alice = Principal::repeat(1);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let reg = reg.clone();
                thread::spawn(move || reg.register(&alice, "Alice", "hashA".into()).is_ok())
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
        assert!(reg.identity(&alice).unwrap().is_active);
    }

    #[test]
    fn concurrent_requests_all_land() {
        let reg = shared();
        let alice = Principal::repeat(1);
        reg.register(&alice, "Alice", "hashA".into()).unwrap();
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let reg = reg.clone();
                thread::spawn(move || {
                    reg.request_verification(&alice, format!("h{i}").into(), "")
                        .unwrap()
                })
            })
            .collect();
        let mut indices: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..16).collect::<Vec<_>>());
        assert_eq!(reg.requests(&alice).unwrap().len(), 16);
    }

    #[test]
    fn read_passthroughs_match_the_engine() {
        let reg = shared();
        let alice = Principal::repeat(1);
        reg.register(&alice, "Alice", "hashA".into()).unwrap();
        reg.request_verification(&alice, "hashA2".into(), "renew").unwrap();

        assert_eq!(reg.owner().unwrap(), owner());
        assert_eq!(reg.verifiers().unwrap(), vec![owner()]);
        let first = reg.request(&alice, 0).unwrap().unwrap();
        assert_eq!(first.notes, "renew");
        assert_eq!(reg.request(&alice, 1).unwrap(), None);

        let snapshot = reg.snapshot().unwrap();
        assert_eq!(snapshot, reg.with(|r| r.snapshot()).unwrap());
        assert_eq!(snapshot.requests.len(), 1);
    }

    #[test]
    fn with_runs_a_compound_sequence_under_one_lock() {
        let reg = shared();
        let alice = Principal::repeat(1);
        reg.with(|r| {
            r.register(&alice, "Alice", "hashA".into())?;
            r.verify(&owner(), &alice, 1)
        })
        .unwrap();
        assert!(reg.is_verified(&alice).unwrap());
        assert_eq!(
            reg.verification_level(&alice).unwrap(),
            VerificationLevel::Basic
        );
    }
}
