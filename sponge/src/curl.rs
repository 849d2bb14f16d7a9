//! Curl: the native ternary sponge permutation.
//!
//! The state is three hash widths (729 trits). Each round rewrites every
//! state trit through a fixed nonlinear substitution of two state trits
//! selected by a precomputed index walk. There is no key material anywhere;
//! the permutation is fully deterministic.

use tanglekit_ternary::constants::HASH_TRIT_LEN;
use tanglekit_ternary::{validate_trits, Trit, Trits};

use crate::{Sponge, SpongeError};

/// Trit width of the Curl state.
pub const STATE_LEN: usize = HASH_TRIT_LEN * 3;

/// Substitution box indexed by `a + 4b + 5` for trit pair `(a, b)`.
/// The entries at indices 3 and 7 are unreachable for valid trits.
const TRUTH_TABLE: [Trit; 11] = [1, 0, -1, 2, 1, -1, 0, 2, -1, 1, 0];

/// The fixed index walk: step +364 while below 365, then -365, covering the
/// whole state exactly once per position pair.
const INDICES: [usize; STATE_LEN + 1] = {
    let mut idx = [0usize; STATE_LEN + 1];
    let mut i = 0;
    while i < STATE_LEN {
        idx[i + 1] = if idx[i] < 365 {
            idx[i] + 364
        } else {
            idx[i] - 365
        };
        i += 1;
    }
    idx
};

/// Round count for the permutation. 27 is the legacy setting; 81 is the
/// default used for transaction hashing and proof-of-work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurlRounds {
    P27 = 27,
    P81 = 81,
}

/// The native ternary sponge.
#[derive(Clone)]
pub struct Curl {
    state: [Trit; STATE_LEN],
    rounds: CurlRounds,
}

impl Curl {
    pub fn new(rounds: CurlRounds) -> Self {
        Self {
            state: [0; STATE_LEN],
            rounds,
        }
    }

    /// Direct view of the state, needed by nonce searchers that re-run the
    /// final permutation themselves.
    pub fn state(&self) -> &[Trit; STATE_LEN] {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut [Trit; STATE_LEN] {
        &mut self.state
    }

    pub fn rounds(&self) -> CurlRounds {
        self.rounds
    }

    /// Apply the full permutation to the state.
    pub fn transform(&mut self) {
        transform(&mut self.state, self.rounds as usize);
    }

    /// One-shot helper: absorb `input` and squeeze a single hash block.
    pub fn hash(input: &[Trit], rounds: CurlRounds) -> Result<Trits, SpongeError> {
        let mut curl = Self::new(rounds);
        curl.absorb(input)?;
        curl.squeeze(HASH_TRIT_LEN)
    }
}

/// Apply `rounds` substitution rounds to a full state.
pub fn transform(state: &mut [Trit; STATE_LEN], rounds: usize) {
    let mut scratch = [0 as Trit; STATE_LEN];
    for _ in 0..rounds {
        scratch.copy_from_slice(&state[..]);
        for (i, s) in state.iter_mut().enumerate() {
            let a = scratch[INDICES[i]];
            let b = scratch[INDICES[i + 1]];
            *s = TRUTH_TABLE[(a + (b << 2) + 5) as usize];
        }
    }
}

impl Sponge for Curl {
    /// Absorb trits of any length; blocks past the first hash width are
    /// processed in order, the final block may be short.
    fn absorb(&mut self, input: &[Trit]) -> Result<(), SpongeError> {
        validate_trits(input)?;
        for chunk in input.chunks(HASH_TRIT_LEN) {
            self.state[..chunk.len()].copy_from_slice(chunk);
            self.transform();
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
        for _ in 0..length / HASH_TRIT_LEN {
            out.extend_from_slice(&self.state[..HASH_TRIT_LEN]);
            self.transform();
        }
        Ok(out)
    }

    fn reset(&mut self) {
        self.state = [0; STATE_LEN];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanglekit_ternary::{trits_to_trytes, trytes_to_trits};

    #[test]
    fn index_walk_is_a_permutation() {
        let mut seen = [false; STATE_LEN];
        for idx in INDICES.iter().take(STATE_LEN) {
            assert!(!seen[*idx]);
            seen[*idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn curl_p81_known_vector() {
        let input = trytes_to_trits("PDFIDVWRXONZSPJJQVZVVMLGSVB").unwrap();
        let hash = Curl::hash(&input, CurlRounds::P81).unwrap();
        assert_eq!(
            trits_to_trytes(&hash).unwrap(),
            "UXBXSI9LHCPYFFZXOWALCBTUIVXYKMCEDDIFXXGXJ9ZLEWKOTXSGYHPEAD9SXSRAWM9TPPXWZMZSIEKGX"
        );
    }

    #[test]
    fn deterministic_across_instances() {
        let input = trytes_to_trits("TANGLEKITCURLDETERMINISM").unwrap();
        let h1 = Curl::hash(&input, CurlRounds::P81).unwrap();
        let h2 = Curl::hash(&input, CurlRounds::P81).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn rounds_matter() {
        let input = trytes_to_trits("ROUNDS").unwrap();
        assert_ne!(
            Curl::hash(&input, CurlRounds::P27).unwrap(),
            Curl::hash(&input, CurlRounds::P81).unwrap()
        );
    }

    #[test]
    fn squeeze_rejects_partial_blocks() {
        let mut curl = Curl::new(CurlRounds::P81);
        assert!(matches!(
            curl.squeeze(100),
            Err(SpongeError::InvalidSqueezeLength { len: 100, .. })
        ));
        assert!(curl.squeeze(0).is_err());
    }

    #[test]
    fn reset_restores_fresh_state() {
        let input = trytes_to_trits("RESETME").unwrap();
        let mut curl = Curl::new(CurlRounds::P81);
        curl.absorb(&input).unwrap();
        curl.reset();

        let mut fresh = Curl::new(CurlRounds::P81);
        fresh.absorb(&input).unwrap();
        curl.absorb(&input).unwrap();
        assert_eq!(
            curl.squeeze(HASH_TRIT_LEN).unwrap(),
            fresh.squeeze(HASH_TRIT_LEN).unwrap()
        );
    }

    #[test]
    fn multi_block_squeeze_chains() {
        let input = trytes_to_trits("CHAINEDSQUEEZE").unwrap();
        let mut one = Curl::new(CurlRounds::P81);
        one.absorb(&input).unwrap();
        let both = one.squeeze(HASH_TRIT_LEN * 2).unwrap();

        let mut two = Curl::new(CurlRounds::P81);
        two.absorb(&input).unwrap();
        let first = two.squeeze(HASH_TRIT_LEN).unwrap();
        let second = two.squeeze(HASH_TRIT_LEN).unwrap();

        assert_eq!(&both[..HASH_TRIT_LEN], first.as_slice());
        assert_eq!(&both[HASH_TRIT_LEN..], second.as_slice());
    }
}
