//! Proof-of-work error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkError {
    #[error("invalid transaction length: {0} trytes")]
    InvalidTransactionLength(usize),

    #[error("invalid minimum weight magnitude: {0}")]
    InvalidWeightMagnitude(usize),

    #[error("insufficient work: {actual} trailing zero trits, {required} required")]
    InsufficientWork { required: usize, actual: usize },

    #[error("work generation was cancelled")]
    Cancelled,

    #[error(transparent)]
    Ternary(#[from] tanglekit_ternary::TernaryError),

    #[error(transparent)]
    Sponge(#[from] tanglekit_sponge::SpongeError),
}
