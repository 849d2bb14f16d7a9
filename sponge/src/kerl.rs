//! Kerl: the Keccak-384-backed ternary sponge.
//!
//! Each hash-width trit block crosses the byte bridge into the running
//! Keccak state. Squeezing extracts the current digest, converts it back to
//! trits and chains the bit-complemented digest forward as the next input,
//! so multi-block squeezes form a deterministic stream.

use sha3::{Digest, Keccak384};

use tanglekit_ternary::constants::{HASH_BYTE_LEN, HASH_TRIT_LEN};
use tanglekit_ternary::{Trit, Trits};

use crate::bytes::{bytes_to_trits, trits_to_bytes};
use crate::{Sponge, SpongeError};

/// The binary-hash-backed sponge.
#[derive(Clone, Default)]
pub struct Kerl {
    keccak: Keccak384,
}

impl Kerl {
    pub fn new() -> Self {
        Self {
            keccak: Keccak384::new(),
        }
    }

    /// One-shot helper: absorb `input` and squeeze a single hash block.
    pub fn hash(input: &[Trit]) -> Result<Trits, SpongeError> {
        let mut kerl = Self::new();
        kerl.absorb(input)?;
        kerl.squeeze(HASH_TRIT_LEN)
    }
}

impl Sponge for Kerl {
    fn absorb(&mut self, input: &[Trit]) -> Result<(), SpongeError> {
        if input.is_empty() || input.len() % HASH_TRIT_LEN != 0 {
            return Err(SpongeError::InvalidTritsLength {
                len: input.len(),
                multiple: HASH_TRIT_LEN,
            });
        }

        for chunk in input.chunks_exact(HASH_TRIT_LEN) {
            let bytes = trits_to_bytes(chunk)?;
            Digest::update(&mut self.keccak, bytes);
        }
        Ok(())
    }

    fn squeeze(&mut self, length: usize) -> Result<Trits, SpongeError> {
        if length == 0 || length % HASH_TRIT_LEN != 0 {
            return Err(SpongeError::InvalidSqueezeLength {
                len: length,
                multiple: HASH_TRIT_LEN,
            });
        }

        let mut out = Trits::with_capacity(length);
        let mut digest = [0u8; HASH_BYTE_LEN];
        for _ in 0..length / HASH_TRIT_LEN {
            let result = Digest::finalize_reset(&mut self.keccak);
            digest.copy_from_slice(&result);
            out.extend_from_slice(&bytes_to_trits(&digest)?);

            // Chain the complemented digest forward for the next block.
            for b in &mut digest {
                *b = !*b;
            }
            Digest::update(&mut self.keccak, digest);
        }
        Ok(out)
    }

    fn reset(&mut self) {
        Digest::reset(&mut self.keccak);
    }
}
