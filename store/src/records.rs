//! Record types held by the three keyed stores.

use idreg_types::{DocumentHash, Principal, Timestamp, VerificationLevel};
use serde::{Deserialize, Serialize};

/// The identity record of one principal.
///
/// At most one ever exists per principal; it is never removed, only
/// deactivated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name. Non-empty at creation.
    pub name: String,
    /// Reference to the off-core document backing this identity.
    pub document_hash: DocumentHash,
    pub verification_level: VerificationLevel,
    /// Creation time. Set once; [`Timestamp::EPOCH`] means "no record".
    pub registered_at: Timestamp,
    pub is_active: bool,
    /// Principal that last set `verification_level`, if any.
    pub verifier: Option<Principal>,
}

impl Identity {
    /// A freshly registered, active, unverified record.
    pub fn new(name: impl Into<String>, document_hash: DocumentHash, now: Timestamp) -> Self {
        Self {
            name: name.into(),
            document_hash,
            verification_level: VerificationLevel::Unverified,
            registered_at: now,
            is_active: true,
            verifier: None,
        }
    }

    pub fn exists(&self) -> bool {
        self.registered_at.is_set()
    }

    /// Verified means a non-zero level on a record that is still active.
    pub fn is_verified(&self) -> bool {
        self.is_active && self.verification_level.is_grantable()
    }
}

/// A re-verification request filed by an identity holder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Always the principal owning the enclosing sequence.
    pub requester: Principal,
    /// Snapshot of the document reference submitted for review.
    pub document_hash: DocumentHash,
    pub requested_at: Timestamp,
    /// Set on creation. Nothing in the registry clears it.
    pub is_pending: bool,
    pub notes: String,
}

impl VerificationRequest {
    pub fn new(
        requester: Principal,
        document_hash: DocumentHash,
        notes: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            requester,
            document_hash,
            requested_at: now,
            is_pending: true,
            notes: notes.into(),
        }
    }
}
