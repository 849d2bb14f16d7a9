//! Checksum error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("invalid address length: {0} trytes")]
    InvalidAddressLength(usize),

    #[error("invalid checksum length: {0} trytes")]
    InvalidChecksumLength(usize),

    #[error("checksum mismatch for address")]
    ChecksumMismatch,

    #[error(transparent)]
    Ternary(#[from] tanglekit_ternary::TernaryError),

    #[error(transparent)]
    Sponge(#[from] tanglekit_sponge::SpongeError),
}
