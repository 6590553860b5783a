//! Operation engine: the access-controlled state transitions over the
//! identity store, verifier registry, and request log.
//!
//! Per principal the lifecycle is `NonExistent -> Active(level) -> Inactive`.
//! Every operation runs its guards first and writes to at most one store
//! afterwards, so a failed operation leaves no trace. The event for a
//! successful operation is emitted only after its write has landed.

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::guards::{
    require_absent, require_active, require_exists, require_grantable_level,
    require_non_empty_hash, require_non_empty_name, require_self_or_owner, require_verifier,
};
use crate::snapshot::RegistrySnapshot;
use crate::verifiers::VerifierRegistry;
use idreg_store::{
    Identity, IdentityStore, MemoryIdentityStore, MemoryVerifierStore, RequestArena,
    RequestStore, VerificationRequest, VerifierStore,
};
use idreg_types::{
    Clock, DocumentHash, EventSink, Principal, RegistryEvent, Timestamp, VerificationLevel,
};

/// The registry engine. One instance owns all registry state.
pub struct IdentityRegistry<
    I = MemoryIdentityStore,
    V = MemoryVerifierStore,
    R = RequestArena,
> {
    verifiers: VerifierRegistry<V>,
    identities: I,
    requests: R,
    clock: Box<dyn Clock>,
    sink: Box<dyn EventSink>,
}

impl IdentityRegistry {
    /// An empty in-memory registry owned by `owner`.
    pub fn new(
        owner: Principal,
        clock: impl Clock + 'static,
        sink: impl EventSink + 'static,
    ) -> Result<Self, RegistryError> {
        Self::with_stores(
            owner,
            MemoryIdentityStore::new(),
            MemoryVerifierStore::new(),
            RequestArena::new(),
            clock,
            sink,
        )
    }

    /// An empty in-memory registry built from `config`.
    pub fn from_config(
        config: &RegistryConfig,
        clock: impl Clock + 'static,
        sink: impl EventSink + 'static,
    ) -> Result<Self, RegistryError> {
        Self::with_stores(
            config.owner_principal()?,
            MemoryIdentityStore::new(),
            MemoryVerifierStore::new(),
            RequestArena::with_capacity(config.request_capacity),
            clock,
            sink,
        )
    }

    /// Rebuild an in-memory registry from a snapshot.
    ///
    /// The snapshot is validated first; see [`RegistrySnapshot::validate`].
    /// The owner is re-seeded as a verifier if the snapshot lacks it.
    pub fn restore(
        snapshot: RegistrySnapshot,
        clock: impl Clock + 'static,
        sink: impl EventSink + 'static,
    ) -> Result<Self, RegistryError> {
        snapshot.validate()?;
        let mut verifiers = MemoryVerifierStore::new();
        for member in &snapshot.verifiers {
            verifiers.insert_verifier(member)?;
        }
        let mut identities = MemoryIdentityStore::new();
        for (principal, identity) in &snapshot.identities {
            identities.put_identity(principal, identity)?;
        }
        let mut requests = RequestArena::with_capacity(snapshot.requests.len());
        for request in snapshot.requests {
            requests.append_request(request)?;
        }

        tracing::info!(
            owner = %snapshot.owner,
            identities = snapshot.identities.len(),
            verifiers = snapshot.verifiers.len(),
            "registry restored from snapshot"
        );
        Self::with_stores(snapshot.owner, identities, verifiers, requests, clock, sink)
    }
}

impl<I, V, R> IdentityRegistry<I, V, R>
where
    I: IdentityStore,
    V: VerifierStore,
    R: RequestStore,
{
    /// Assemble a registry over caller-supplied stores.
    pub fn with_stores(
        owner: Principal,
        identities: I,
        verifiers: V,
        requests: R,
        clock: impl Clock + 'static,
        sink: impl EventSink + 'static,
    ) -> Result<Self, RegistryError> {
        Ok(Self {
            verifiers: VerifierRegistry::new(owner, verifiers)?,
            identities,
            requests,
            clock: Box::new(clock),
            sink: Box::new(sink),
        })
    }

    // ── Mutating operations ────────────────────────────────────────────

    /// Create the caller's identity record.
    pub fn register(
        &mut self,
        caller: &Principal,
        name: &str,
        document_hash: DocumentHash,
    ) -> Result<(), RegistryError> {
        require_absent(caller, self.identities.get_identity(caller)?.as_ref())?;
        require_non_empty_name(name)?;
        require_non_empty_hash(&document_hash)?;

        let now = self.registration_time();
        let identity = Identity::new(name, document_hash.clone(), now);
        self.identities.put_identity(caller, &identity)?;

        tracing::info!(principal = %caller, %name, "identity registered");
        self.emit(RegistryEvent::Registered {
            principal: *caller,
            name: name.to_string(),
            document_hash,
            at: now,
        });
        Ok(())
    }

    /// Set the verification level of `user`. Caller must be a verifier.
    ///
    /// `level` is the raw tier number; only 1..=3 may be granted.
    pub fn verify(
        &mut self,
        caller: &Principal,
        user: &Principal,
        level: u8,
    ) -> Result<(), RegistryError> {
        if let Err(e) = require_verifier(caller, self.verifiers.store()) {
            tracing::warn!(%caller, %user, "verify rejected: caller is not a verifier");
            return Err(e);
        }
        let mut identity = require_exists(user, self.identities.get_identity(user)?)?;
        require_active(user, &identity)?;
        let level = require_grantable_level(level)?;

        identity.verification_level = level;
        identity.verifier = Some(*caller);
        self.identities.put_identity(user, &identity)?;

        tracing::info!(principal = %user, verifier = %caller, %level, "identity verified");
        let at = self.clock.now();
        self.emit(RegistryEvent::Verified {
            principal: *user,
            level,
            verifier: *caller,
            at,
        });
        Ok(())
    }

    /// File a re-verification request for the caller's own identity.
    ///
    /// Returns the position of the request in the caller's sequence.
    pub fn request_verification(
        &mut self,
        caller: &Principal,
        document_hash: DocumentHash,
        notes: &str,
    ) -> Result<u64, RegistryError> {
        let identity = require_exists(caller, self.identities.get_identity(caller)?)?;
        require_active(caller, &identity)?;
        require_non_empty_hash(&document_hash)?;

        let now = self.clock.now();
        let request = VerificationRequest::new(*caller, document_hash.clone(), notes, now);
        let index = self.requests.append_request(request)?;

        tracing::debug!(principal = %caller, index, "verification requested");
        self.emit(RegistryEvent::VerificationRequested {
            principal: *caller,
            document_hash,
            index,
            at: now,
        });
        Ok(index)
    }

    /// Replace the caller's document reference.
    ///
    /// Any prior verification was bound to the old document, so the level
    /// drops back to `Unverified` and the verifier is cleared.
    pub fn update_document_hash(
        &mut self,
        caller: &Principal,
        new_hash: DocumentHash,
    ) -> Result<(), RegistryError> {
        let mut identity = require_exists(caller, self.identities.get_identity(caller)?)?;
        require_active(caller, &identity)?;
        require_non_empty_hash(&new_hash)?;

        let previous_level = identity.verification_level;
        identity.document_hash = new_hash.clone();
        identity.verification_level = VerificationLevel::Unverified;
        identity.verifier = None;
        self.identities.put_identity(caller, &identity)?;

        tracing::info!(
            principal = %caller,
            %previous_level,
            "document updated, verification reset"
        );
        let at = self.clock.now();
        self.emit(RegistryEvent::DocumentUpdated {
            principal: *caller,
            document_hash: new_hash,
            at,
        });
        Ok(())
    }

    /// Deactivate `target`. Allowed for the owner or the holder themself.
    ///
    /// There is no way back: an inactive identity stays inactive.
    pub fn deactivate(
        &mut self,
        caller: &Principal,
        target: &Principal,
    ) -> Result<(), RegistryError> {
        if let Err(e) = require_self_or_owner(caller, target, self.verifiers.owner()) {
            tracing::warn!(%caller, %target, "deactivate rejected: not owner or holder");
            return Err(e);
        }
        let mut identity = require_exists(target, self.identities.get_identity(target)?)?;

        identity.is_active = false;
        self.identities.put_identity(target, &identity)?;

        tracing::info!(principal = %target, by = %caller, "identity deactivated");
        let at = self.clock.now();
        self.emit(RegistryEvent::Deactivated {
            principal: *target,
            by: *caller,
            at,
        });
        Ok(())
    }

    /// Grant verifier authority. Owner only.
    pub fn authorize_verifier(
        &mut self,
        caller: &Principal,
        target: &Principal,
    ) -> Result<(), RegistryError> {
        let now = self.clock.now();
        let event = self.verifiers.authorize(caller, target, now)?;
        self.emit(event);
        Ok(())
    }

    /// Withdraw verifier authority. Owner only; the owner itself is exempt.
    pub fn revoke_verifier(
        &mut self,
        caller: &Principal,
        target: &Principal,
    ) -> Result<(), RegistryError> {
        let now = self.clock.now();
        let event = self.verifiers.revoke(caller, target, now)?;
        self.emit(event);
        Ok(())
    }

    // ── Read-only accessors ────────────────────────────────────────────

    /// The full record of `principal`.
    pub fn identity(&self, principal: &Principal) -> Result<Identity, RegistryError> {
        require_exists(principal, self.identities.get_identity(principal)?)
    }

    /// The current level of `principal`. Fails for unknown principals.
    pub fn verification_level(
        &self,
        principal: &Principal,
    ) -> Result<VerificationLevel, RegistryError> {
        Ok(self.identity(principal)?.verification_level)
    }

    /// True when the record exists, is active, and carries a non-zero level.
    pub fn is_verified(&self, principal: &Principal) -> Result<bool, RegistryError> {
        Ok(self
            .identities
            .get_identity(principal)?
            .is_some_and(|identity| identity.exists() && identity.is_verified()))
    }

    /// Every request `principal` has filed, oldest first.
    pub fn requests(&self, principal: &Principal) -> Result<Vec<VerificationRequest>, RegistryError> {
        Ok(self.requests.requests_for(principal)?)
    }

    /// The request at `index` in the sequence of `principal`, if filed.
    pub fn request(
        &self,
        principal: &Principal,
        index: u64,
    ) -> Result<Option<VerificationRequest>, RegistryError> {
        Ok(self.requests.request_at(principal, index)?)
    }

    /// Whether `principal` may currently set verification levels.
    pub fn is_verifier(&self, principal: &Principal) -> Result<bool, RegistryError> {
        self.verifiers.is_authorized(principal)
    }

    /// All current verifiers, owner included.
    pub fn verifiers(&self) -> Result<Vec<Principal>, RegistryError> {
        self.verifiers.members()
    }

    /// Number of current verifiers.
    pub fn verifier_count(&self) -> Result<u64, RegistryError> {
        self.verifiers.count()
    }

    /// Number of records ever created, inactive ones included.
    pub fn identity_count(&self) -> Result<u64, RegistryError> {
        Ok(self.identities.identity_count()?)
    }

    /// The fixed owner principal.
    pub fn owner(&self) -> &Principal {
        self.verifiers.owner()
    }

    /// Capture the three keyed stores.
    pub fn snapshot(&self) -> Result<RegistrySnapshot, RegistryError> {
        Ok(RegistrySnapshot {
            owner: *self.verifiers.owner(),
            verifiers: self.verifiers.members()?,
            identities: self.identities.iter_identities()?,
            requests: self.requests.iter_requests()?,
        })
    }

    // ── Internals ──────────────────────────────────────────────────────

    /// `registered_at` doubles as the existence marker, so a clock reading
    /// of zero is bumped to one second past the epoch.
    fn registration_time(&self) -> Timestamp {
        self.clock.now().max(Timestamp::new(1))
    }

    fn emit(&self, event: RegistryEvent) {
        tracing::trace!(kind = event.kind(), "emitting registry event");
        self.sink.emit(&event);
    }
}
