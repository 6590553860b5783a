//! Verifier registry: which principals may set verification levels.
//!
//! The owner is seeded as a member on construction and cannot be removed.
//! Only the owner may authorize or revoke other verifiers.

use crate::error::RegistryError;
use crate::guards::{require_owner, require_valid_target};
use idreg_store::VerifierStore;
use idreg_types::{Principal, RegistryEvent, Timestamp};

pub struct VerifierRegistry<V> {
    owner: Principal,
    store: V,
}

impl<V: VerifierStore> VerifierRegistry<V> {
    /// Wrap `store` and seed `owner` as a permanent member.
    pub fn new(owner: Principal, mut store: V) -> Result<Self, RegistryError> {
        require_valid_target(&owner)?;
        store.insert_verifier(&owner)?;
        Ok(Self { owner, store })
    }

    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    pub fn is_authorized(&self, principal: &Principal) -> Result<bool, RegistryError> {
        Ok(self.store.is_verifier(principal)?)
    }

    pub fn members(&self) -> Result<Vec<Principal>, RegistryError> {
        Ok(self.store.verifiers()?)
    }

    pub fn count(&self) -> Result<u64, RegistryError> {
        Ok(self.store.verifier_count()?)
    }

    pub(crate) fn store(&self) -> &V {
        &self.store
    }

    /// Grant verifier authority to `target`.
    pub fn authorize(
        &mut self,
        caller: &Principal,
        target: &Principal,
        now: Timestamp,
    ) -> Result<RegistryEvent, RegistryError> {
        if let Err(e) = require_owner(caller, &self.owner) {
            tracing::warn!(%caller, %target, "non-owner attempted to authorize a verifier");
            return Err(e);
        }
        require_valid_target(target)?;
        if self.store.is_verifier(target)? {
            return Err(RegistryError::AlreadyAuthorized(*target));
        }

        self.store.insert_verifier(target)?;
        tracing::debug!(verifier = %target, "verifier authorized");
        Ok(RegistryEvent::VerifierAuthorized {
            verifier: *target,
            at: now,
        })
    }

    /// Withdraw verifier authority from `target`.
    ///
    /// Verifications `target` already granted are left untouched.
    pub fn revoke(
        &mut self,
        caller: &Principal,
        target: &Principal,
        now: Timestamp,
    ) -> Result<RegistryEvent, RegistryError> {
        if let Err(e) = require_owner(caller, &self.owner) {
            tracing::warn!(%caller, %target, "non-owner attempted to revoke a verifier");
            return Err(e);
        }
        if !self.store.is_verifier(target)? {
            return Err(RegistryError::NotAuthorized(*target));
        }
        if *target == self.owner {
            return Err(RegistryError::CannotRevokeOwner);
        }

        self.store.remove_verifier(target)?;
        tracing::debug!(verifier = %target, "verifier revoked");
        Ok(RegistryEvent::VerifierRevoked {
            verifier: *target,
            at: now,
        })
    }
}
