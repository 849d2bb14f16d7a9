use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TernaryError {
    #[error("invalid trit value {0}, must be -1, 0 or 1")]
    InvalidTrit(i8),

    #[error("invalid tryte character {0:?}")]
    InvalidTryteCharacter(char),

    #[error("invalid length {len}: {reason}")]
    InvalidLength { len: usize, reason: &'static str },

    #[error("trytes length must be even for ASCII conversion, got {0}")]
    OddLength(usize),

    #[error("string contains non 7-bit ASCII characters")]
    InvalidAsciiCharacter,
}
