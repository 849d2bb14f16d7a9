//! Bundle error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("invalid transaction length: {0} trytes")]
    InvalidTransactionLength(usize),

    #[error("invalid bundle: {reason}")]
    InvalidBundle { reason: &'static str },

    #[error("bundle values sum to {0}, expected 0")]
    NonZeroValueSum(i64),

    #[error("no input transaction for address {0}")]
    UnknownInputAddress(String),

    #[error(transparent)]
    Signing(#[from] tanglekit_signing::SigningError),

    #[error(transparent)]
    Ternary(#[from] tanglekit_ternary::TernaryError),

    #[error(transparent)]
    Sponge(#[from] tanglekit_sponge::SpongeError),
}
