//! Signing error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("invalid seed length: {0} trytes")]
    InvalidSeedLength(usize),

    #[error("invalid subseed length: {0} trits")]
    InvalidSubseedLength(usize),

    #[error("invalid security level: {0}")]
    InvalidSecurityLevel(u8),

    #[error("invalid key length: {0} trits")]
    InvalidKeyLength(usize),

    #[error("invalid key fragment length: {0} trits")]
    InvalidFragmentLength(usize),

    #[error("invalid bundle hash length: {0} trytes")]
    InvalidBundleHashLength(usize),

    #[error("signature does not match address")]
    InvalidSignature,

    #[error(transparent)]
    Ternary(#[from] tanglekit_ternary::TernaryError),

    #[error(transparent)]
    Sponge(#[from] tanglekit_sponge::SpongeError),
}
