use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpongeError {
    #[error("input trit length {len} must be a multiple of {multiple}")]
    InvalidTritsLength { len: usize, multiple: usize },

    #[error("squeeze length {len} must be a positive multiple of {multiple}")]
    InvalidSqueezeLength { len: usize, multiple: usize },

    #[error("byte conversion is only defined for {expected}-byte chunks, got {len}")]
    InvalidBytesLength { len: usize, expected: usize },

    #[error(transparent)]
    Ternary(#[from] tanglekit_ternary::TernaryError),
}
