//! Identity registry: the access-control and state-transition core.
//!
//! A principal owns at most one identity record. Verifiers (appointed by the
//! owner) assign trust levels, holders file re-verification requests and
//! swap documents, and records can be deactivated but never deleted.
//!
//! - [`VerifierRegistry`]: who may verify, managed by the owner.
//! - [`IdentityRegistry`]: the operation engine over all three stores.
//! - [`SharedRegistry`]: a mutex-guarded handle for multi-threaded callers.

pub mod config;
pub mod engine;
pub mod error;
pub mod guards;
pub mod shared;
pub mod snapshot;
pub mod verifiers;

pub use config::RegistryConfig;
pub use engine::IdentityRegistry;
pub use error::RegistryError;
pub use shared::SharedRegistry;
pub use snapshot::RegistrySnapshot;
pub use verifiers::VerifierRegistry;
