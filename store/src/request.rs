//! Verification request log trait.

use crate::records::VerificationRequest;
use crate::StoreError;
use idreg_types::Principal;

/// Append-only, per-principal sequence of verification requests.
pub trait RequestStore {
    /// Append a request to its requester's sequence.
    ///
    /// Returns the position of the new entry within that sequence.
    fn append_request(&mut self, request: VerificationRequest) -> Result<u64, StoreError>;

    /// All requests filed by `principal`, oldest first. Empty if none.
    fn requests_for(&self, principal: &Principal) -> Result<Vec<VerificationRequest>, StoreError>;

    /// The request at `index` in `principal`'s sequence.
    fn request_at(
        &self,
        principal: &Principal,
        index: u64,
    ) -> Result<Option<VerificationRequest>, StoreError>;

    fn request_count_for(&self, principal: &Principal) -> Result<u64, StoreError> {
        self.requests_for(principal).map(|r| r.len() as u64)
    }

    /// Every request in global filing order.
    fn iter_requests(&self) -> Result<Vec<VerificationRequest>, StoreError>;
}
