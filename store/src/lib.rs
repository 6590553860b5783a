//! Storage for the identity registry.
//!
//! The registry persists exactly three keyed stores, all addressed by
//! principal: identity records, verifier membership, and the request log.
//! The engine depends only on the traits; the in-memory backends in
//! [`memory`] are what it runs on by default.

pub mod error;
pub mod identity;
pub mod memory;
pub mod records;
pub mod request;
pub mod verifier;

pub use error::StoreError;
pub use identity::IdentityStore;
pub use memory::{MemoryIdentityStore, MemoryVerifierStore, RequestArena};
pub use records::{Identity, VerificationRequest};
pub use request::RequestStore;
pub use verifier::VerifierStore;
