use idreg_store::StoreError;
use idreg_types::Principal;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("caller {0} is not permitted to perform this operation")]
    Unauthorized(Principal),

    #[error("no identity registered for {0}")]
    NoSuchIdentity(Principal),

    #[error("identity for {0} already exists")]
    AlreadyExists(Principal),

    #[error("identity for {0} is inactive")]
    InactiveIdentity(Principal),

    #[error("name must not be empty")]
    EmptyName,

    #[error("document hash must not be empty")]
    EmptyHash,

    #[error("verification level {0} cannot be granted (expected 1..=3)")]
    InvalidLevel(u8),

    #[error("{0} is already an authorized verifier")]
    AlreadyAuthorized(Principal),

    #[error("{0} is not an authorized verifier")]
    NotAuthorized(Principal),

    #[error("the owner cannot be revoked")]
    CannotRevokeOwner,

    #[error("the null principal is not a valid target")]
    InvalidTarget,

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}
