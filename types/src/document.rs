//! Opaque reference to an externally stored document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A content reference into an external blob store.
///
/// The registry only stores and compares it; it never fetches or parses
/// what the reference points at.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentHash(String);

impl DocumentHash {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DocumentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentHash {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DocumentHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}
