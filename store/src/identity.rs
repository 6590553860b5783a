//! Identity storage trait.

use crate::records::Identity;
use crate::StoreError;
use idreg_types::Principal;

/// Keyed storage of identity records, one per principal.
pub trait IdentityStore {
    fn get_identity(&self, principal: &Principal) -> Result<Option<Identity>, StoreError>;
    fn put_identity(&mut self, principal: &Principal, identity: &Identity)
        -> Result<(), StoreError>;
    fn identity_count(&self) -> Result<u64, StoreError>;
    fn iter_identities(&self) -> Result<Vec<(Principal, Identity)>, StoreError>;

    /// Whether a record exists, judged by its creation timestamp.
    fn identity_exists(&self, principal: &Principal) -> Result<bool, StoreError> {
        Ok(self
            .get_identity(principal)?
            .is_some_and(|identity| identity.exists()))
    }
}
