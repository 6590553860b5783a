//! Verification trust tiers.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The trust tier assigned to an identity by a verifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum VerificationLevel {
    /// Registered but never verified, or verification was reset.
    #[default]
    Unverified = 0,
    Basic = 1,
    Enhanced = 2,
    Premium = 3,
}

impl VerificationLevel {
    pub const ALL: [Self; 4] = [Self::Unverified, Self::Basic, Self::Enhanced, Self::Premium];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether a verifier may assign this level. `Unverified` is only ever
    /// reached by creation or by a document update.
    pub fn is_grantable(self) -> bool {
        !matches!(self, Self::Unverified)
    }
}

impl TryFrom<u8> for VerificationLevel {
    type Error = TypesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unverified),
            1 => Ok(Self::Basic),
            2 => Ok(Self::Enhanced),
            3 => Ok(Self::Premium),
            other => Err(TypesError::InvalidLevel(other)),
        }
    }
}

impl From<VerificationLevel> for u8 {
    fn from(level: VerificationLevel) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for VerificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unverified => "unverified",
            Self::Basic => "basic",
            Self::Enhanced => "enhanced",
            Self::Premium => "premium",
        };
        f.write_str(name)
    }
}
