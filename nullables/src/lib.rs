//! Nullable infrastructure for deterministic testing.
//!
//! The registry's external collaborators (clock, event sink, storage) are
//! abstracted behind traits. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Record what they were handed, for assertions
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod events;
pub mod store;

pub use clock::NullClock;
pub use events::NullEventSink;
pub use store::NullIdentityStore;
