//! Verifier membership storage trait.

use crate::StoreError;
use idreg_types::Principal;

/// Set of principals that currently hold verifier authority.
pub trait VerifierStore {
    fn is_verifier(&self, principal: &Principal) -> Result<bool, StoreError>;

    /// Add a member. Returns `false` if it was already present.
    fn insert_verifier(&mut self, principal: &Principal) -> Result<bool, StoreError>;

    /// Remove a member. Returns `false` if it was not present.
    fn remove_verifier(&mut self, principal: &Principal) -> Result<bool, StoreError>;

    fn verifiers(&self) -> Result<Vec<Principal>, StoreError>;

    fn verifier_count(&self) -> Result<u64, StoreError> {
        self.verifiers().map(|v| v.len() as u64)
    }
}
