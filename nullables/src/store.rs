//! Nullable store: in-memory identity storage with switchable write failures.

use idreg_store::{Identity, IdentityStore, StoreError};
use idreg_types::Principal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// An in-memory identity store whose writes can be made to fail.
///
/// Cloning shares the failure switch, so a test can keep a handle after
/// moving the store into a registry.
#[derive(Clone, Default)]
pub struct NullIdentityStore {
    records: HashMap<Principal, Identity>,
    fail_writes: Arc<AtomicBool>,
}

impl NullIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put_identity` fail with a backend error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl IdentityStore for NullIdentityStore {
    fn get_identity(&self, principal: &Principal) -> Result<Option<Identity>, StoreError> {
        Ok(self.records.get(principal).cloned())
    }

    fn put_identity(
        &mut self,
        principal: &Principal,
        identity: &Identity,
    ) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected write failure".into()));
        }
        self.records.insert(*principal, identity.clone());
        Ok(())
    }

    fn identity_count(&self) -> Result<u64, StoreError> {
        Ok(self.records.len() as u64)
    }

    fn iter_identities(&self) -> Result<Vec<(Principal, Identity)>, StoreError> {
        Ok(self
            .records
            .iter()
            .map(|(p, id)| (*p, id.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idreg_types::Timestamp;

    #[test]
    fn switch_is_shared_between_clones() {
        let mut store = NullIdentityStore::new();
        let handle = store.clone();
        let p = Principal::repeat(1);
        let id = Identity::new("alice", "h".into(), Timestamp::new(1));

        store.put_identity(&p, &id).unwrap();
        handle.fail_writes(true);
        assert!(matches!(
            store.put_identity(&p, &id),
            Err(StoreError::Backend(_))
        ));
        handle.fail_writes(false);
        store.put_identity(&p, &id).unwrap();
        assert_eq!(store.identity_count().unwrap(), 1);
    }
}
