//! Events emitted by the registry for off-core indexers.

use crate::{DocumentHash, Principal, Timestamp, VerificationLevel};
use serde::{Deserialize, Serialize};

/// One event per successful mutating operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A new identity record was created.
    Registered {
        principal: Principal,
        name: String,
        document_hash: DocumentHash,
        at: Timestamp,
    },
    /// A verifier set the verification level of an identity.
    Verified {
        principal: Principal,
        level: VerificationLevel,
        verifier: Principal,
        at: Timestamp,
    },
    /// An identity holder filed a re-verification request.
    VerificationRequested {
        principal: Principal,
        document_hash: DocumentHash,
        /// Position of the request in the holder's sequence.
        index: u64,
        at: Timestamp,
    },
    /// The document reference changed and verification was reset.
    DocumentUpdated {
        principal: Principal,
        document_hash: DocumentHash,
        at: Timestamp,
    },
    /// An identity was deactivated.
    Deactivated {
        principal: Principal,
        by: Principal,
        at: Timestamp,
    },
    VerifierAuthorized { verifier: Principal, at: Timestamp },
    VerifierRevoked { verifier: Principal, at: Timestamp },
}

impl RegistryEvent {
    /// Short stable name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Registered { .. } => "registered",
            Self::Verified { .. } => "verified",
            Self::VerificationRequested { .. } => "verification_requested",
            Self::DocumentUpdated { .. } => "document_updated",
            Self::Deactivated { .. } => "deactivated",
            Self::VerifierAuthorized { .. } => "verifier_authorized",
            Self::VerifierRevoked { .. } => "verifier_revoked",
        }
    }
}

/// Append-only destination for registry events.
///
/// Delivery is fire-and-forget: no registry logic depends on it.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &RegistryEvent);
}

/// A sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &RegistryEvent) {}
}

impl<S: EventSink + ?Sized> EventSink for std::sync::Arc<S> {
    fn emit(&self, event: &RegistryEvent) {
        (**self).emit(event)
    }
}

/// Synchronous fan-out sink.
///
/// Listeners are invoked inline on the emitting thread while the registry
/// lock is held; keep handlers fast.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&RegistryEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&RegistryEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for EventBus {
    fn emit(&self, event: &RegistryEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}
