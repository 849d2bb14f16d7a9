//! Hash sponges for the tanglekit ledger client.
//!
//! Two interchangeable constructions sit behind the [`Sponge`] trait:
//!
//! - **[`Curl`]**: the native ternary permutation (27 or 81 rounds)
//! - **[`Kerl`]**: Keccak-384 reached through the trit/byte bridge
//!
//! The variant is picked at construction via [`SpongeKind`]; nothing
//! downstream inspects which one it got.

pub mod bytes;
pub mod curl;
pub mod error;
pub mod kerl;

pub use bytes::{bytes_to_trits, trits_to_bytes};
pub use curl::{Curl, CurlRounds, STATE_LEN};
pub use error::SpongeError;
pub use kerl::Kerl;

use tanglekit_ternary::constants::HASH_TRIT_LEN;
use tanglekit_ternary::{trits_to_trytes, trytes_to_trits, Trit, Trits};

/// The sponge capability: arbitrary-length absorb, block-wise squeeze,
/// reset to the freshly constructed state.
pub trait Sponge {
    fn absorb(&mut self, input: &[Trit]) -> Result<(), SpongeError>;
    fn squeeze(&mut self, length: usize) -> Result<Trits, SpongeError>;
    fn reset(&mut self);
}

/// The closed set of sponge constructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpongeKind {
    CurlP27,
    CurlP81,
    Kerl,
}

impl SpongeKind {
    /// Construct a fresh sponge of this kind.
    pub fn create(self) -> Box<dyn Sponge> {
        match self {
            Self::CurlP27 => Box::new(Curl::new(CurlRounds::P27)),
            Self::CurlP81 => Box::new(Curl::new(CurlRounds::P81)),
            Self::Kerl => Box::new(Kerl::new()),
        }
    }
}

/// Hash a tryte string through the given sponge kind into one hash block.
pub fn hash_trytes(kind: SpongeKind, trytes: &str) -> Result<String, SpongeError> {
    let input = trytes_to_trits(trytes)?;
    let mut sponge = kind.create();
    sponge.absorb(&input)?;
    let out = sponge.squeeze(HASH_TRIT_LEN)?;
    Ok(trits_to_trytes(&out)?)
}
