//! Security levels for one-time signatures.

use tanglekit_ternary::constants::{KEY_FRAGMENT_TRIT_LEN, SIG_FRAGMENT_TRYTE_LEN};

use crate::SigningError;

/// How many key fragments back an address.
///
/// Each additional level adds one 6561-trit key fragment and one 2187-tryte
/// signature fragment, trading bundle size for forgery resistance after the
/// one permitted use of the key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SecurityLevel {
    Low = 1,
    #[default]
    Medium = 2,
    High = 3,
}

impl SecurityLevel {
    /// Number of key fragments at this level.
    pub fn fragments(self) -> usize {
        self as usize
    }

    /// Private key length in trits.
    pub fn key_trit_len(self) -> usize {
        self.fragments() * KEY_FRAGMENT_TRIT_LEN
    }

    /// Signature length in trytes.
    pub fn signature_tryte_len(self) -> usize {
        self.fragments() * SIG_FRAGMENT_TRYTE_LEN
    }

    /// Infer the level that produced a key of `trit_len` trits.
    pub fn from_key_trit_len(trit_len: usize) -> Result<Self, SigningError> {
        if trit_len % KEY_FRAGMENT_TRIT_LEN != 0 {
            return Err(SigningError::InvalidKeyLength(trit_len));
        }
        match trit_len / KEY_FRAGMENT_TRIT_LEN {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            _ => Err(SigningError::InvalidKeyLength(trit_len)),
        }
    }
}

impl TryFrom<u8> for SecurityLevel {
    type Error = SigningError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            other => Err(SigningError::InvalidSecurityLevel(other)),
        }
    }
}
