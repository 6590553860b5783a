//! Errors raised while constructing or parsing core types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid principal: {0}")]
    InvalidPrincipal(String),

    #[error("verification level {0} is out of range (0..=3)")]
    InvalidLevel(u8),
}
