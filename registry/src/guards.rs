//! Precondition checks evaluated at the start of each operation.
//!
//! Each guard is a standalone predicate returning the typed failure for the
//! rule it enforces. Operations compose them in order and bail on the first
//! error, before touching any store.

use crate::error::RegistryError;
use idreg_store::{Identity, VerifierStore};
use idreg_types::{DocumentHash, Principal, VerificationLevel};

pub fn require_owner(caller: &Principal, owner: &Principal) -> Result<(), RegistryError> {
    if caller != owner {
        return Err(RegistryError::Unauthorized(*caller));
    }
    Ok(())
}

/// The caller must be the owner or act on their own record.
pub fn require_self_or_owner(
    caller: &Principal,
    target: &Principal,
    owner: &Principal,
) -> Result<(), RegistryError> {
    if caller != target && caller != owner {
        return Err(RegistryError::Unauthorized(*caller));
    }
    Ok(())
}

pub fn require_verifier<V: VerifierStore>(
    caller: &Principal,
    verifiers: &V,
) -> Result<(), RegistryError> {
    if !verifiers.is_verifier(caller)? {
        return Err(RegistryError::Unauthorized(*caller));
    }
    Ok(())
}

/// Unwrap a looked-up record, failing if none exists.
pub fn require_exists(
    principal: &Principal,
    record: Option<Identity>,
) -> Result<Identity, RegistryError> {
    record
        .filter(Identity::exists)
        .ok_or(RegistryError::NoSuchIdentity(*principal))
}

pub fn require_absent(
    principal: &Principal,
    record: Option<&Identity>,
) -> Result<(), RegistryError> {
    if record.is_some_and(Identity::exists) {
        return Err(RegistryError::AlreadyExists(*principal));
    }
    Ok(())
}

pub fn require_active(principal: &Principal, identity: &Identity) -> Result<(), RegistryError> {
    if !identity.is_active {
        return Err(RegistryError::InactiveIdentity(*principal));
    }
    Ok(())
}

pub fn require_non_empty_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() {
        return Err(RegistryError::EmptyName);
    }
    Ok(())
}

pub fn require_non_empty_hash(hash: &DocumentHash) -> Result<(), RegistryError> {
    if hash.is_empty() {
        return Err(RegistryError::EmptyHash);
    }
    Ok(())
}

/// Parse a raw level and reject anything a verifier may not assign.
pub fn require_grantable_level(raw: u8) -> Result<VerificationLevel, RegistryError> {
    VerificationLevel::try_from(raw)
        .ok()
        .filter(|level| level.is_grantable())
        .ok_or(RegistryError::InvalidLevel(raw))
}

pub fn require_valid_target(target: &Principal) -> Result<(), RegistryError> {
    if target.is_zero() {
        return Err(RegistryError::InvalidTarget);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use idreg_store::MemoryVerifierStore;
    use idreg_types::Timestamp;

    fn p(b: u8) -> Principal {
        Principal::repeat(b)
    }

    fn record() -> Identity {
        Identity::new("alice", "hashA".into(), Timestamp::new(1))
    }

    #[test]
    fn owner_guard() {
        assert!(require_owner(&p(1), &p(1)).is_ok());
        assert_eq!(
            require_owner(&p(2), &p(1)),
            Err(RegistryError::Unauthorized(p(2)))
        );
    }

    #[test]
    fn self_or_owner_guard() {
        assert!(require_self_or_owner(&p(2), &p(2), &p(1)).is_ok());
        assert!(require_self_or_owner(&p(1), &p(2), &p(1)).is_ok());
        assert_eq!(
            require_self_or_owner(&p(3), &p(2), &p(1)),
            Err(RegistryError::Unauthorized(p(3)))
        );
    }

    #[test]
    fn verifier_guard_reads_membership() {
        let mut verifiers = MemoryVerifierStore::new();
        assert!(require_verifier(&p(5), &verifiers).is_err());
        verifiers.insert_verifier(&p(5)).unwrap();
        assert!(require_verifier(&p(5), &verifiers).is_ok());
    }

    #[test]
    fn existence_guards() {
        assert_eq!(
            require_exists(&p(1), None),
            Err(RegistryError::NoSuchIdentity(p(1)))
        );
        let unset = Identity::new("x", "h".into(), Timestamp::EPOCH);
        assert!(require_exists(&p(1), Some(unset.clone())).is_err());
        assert!(require_absent(&p(1), Some(&unset)).is_ok());
        assert_eq!(require_exists(&p(1), Some(record())), Ok(record()));
        assert_eq!(
            require_absent(&p(1), Some(&record())),
            Err(RegistryError::AlreadyExists(p(1)))
        );
    }

    #[test]
    fn active_guard() {
        let mut id = record();
        assert!(require_active(&p(1), &id).is_ok());
        id.is_active = false;
        assert_eq!(
            require_active(&p(1), &id),
            Err(RegistryError::InactiveIdentity(p(1)))
        );
    }

    #[test]
    fn input_guards() {
        assert_eq!(require_non_empty_name(""), Err(RegistryError::EmptyName));
        assert!(require_non_empty_name("a").is_ok());
        assert_eq!(
            require_non_empty_hash(&DocumentHash::default()),
            Err(RegistryError::EmptyHash)
        );
        assert!(require_non_empty_hash(&"h".into()).is_ok());
    }

    #[test]
    fn level_guard() {
        assert_eq!(require_grantable_level(0), Err(RegistryError::InvalidLevel(0)));
        assert_eq!(require_grantable_level(4), Err(RegistryError::InvalidLevel(4)));
        assert_eq!(require_grantable_level(2), Ok(VerificationLevel::Enhanced));
    }

    #[test]
    fn target_guard() {
        assert_eq!(
            require_valid_target(&Principal::ZERO),
            Err(RegistryError::InvalidTarget)
        );
        assert!(require_valid_target(&p(1)).is_ok());
    }
}
