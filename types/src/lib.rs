//! Fundamental types for the identity registry.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! principals, timestamps, verification levels, document references, events,
//! and the clock and event-sink seams the registry talks to.

pub mod clock;
pub mod document;
pub mod error;
pub mod event;
pub mod level;
pub mod principal;
pub mod time;

pub use clock::{Clock, SystemClock};
pub use document::DocumentHash;
pub use error::TypesError;
pub use event::{EventBus, EventSink, NullSink, RegistryEvent};
pub use level::VerificationLevel;
pub use principal::Principal;
pub use time::Timestamp;
