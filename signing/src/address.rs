//! Key digests and address derivation.

use zeroize::Zeroizing;

use tanglekit_ternary::constants::{
    HASH_TRIT_LEN, KEY_FRAGMENT_TRIT_LEN, KEY_SEGMENT_HASH_ROUNDS, MAX_SECURITY_LEVEL,
};
use tanglekit_ternary::{trits_to_trytes, Trits};
use tanglekit_sponge::{Kerl, Sponge};

use crate::keys::{key, subseed};
use crate::{SecurityLevel, SigningError};

/// Derive the public digests of a private key, one per key fragment.
///
/// Every 243-trit segment of a fragment is hashed 26 times, then the whole
/// hardened fragment is hashed once more into the fragment digest. A verifier
/// recovers the same digests from a signature without ever seeing the key.
pub fn digests(key: &[i8]) -> Result<Trits, SigningError> {
    let level = SecurityLevel::from_key_trit_len(key.len())?;
    let mut out = Trits::with_capacity(level.fragments() * HASH_TRIT_LEN);
    let mut kerl = Kerl::new();

    for fragment in key.chunks_exact(KEY_FRAGMENT_TRIT_LEN) {
        let mut buf = Zeroizing::new(fragment.to_vec());
        for segment in buf.chunks_exact_mut(HASH_TRIT_LEN) {
            for _ in 0..KEY_SEGMENT_HASH_ROUNDS {
                kerl.reset();
                kerl.absorb(segment)?;
                segment.copy_from_slice(&kerl.squeeze(HASH_TRIT_LEN)?);
            }
        }
        kerl.reset();
        kerl.absorb(&buf)?;
        out.extend_from_slice(&kerl.squeeze(HASH_TRIT_LEN)?);
    }

    Ok(out)
}

/// Fold key digests into the address trits.
pub fn address_from_digests(digests: &[i8]) -> Result<Trits, SigningError> {
    let fragments = digests.len() / HASH_TRIT_LEN;
    if digests.len() % HASH_TRIT_LEN != 0 || fragments == 0 || fragments > MAX_SECURITY_LEVEL {
        return Err(SigningError::InvalidFragmentLength(digests.len()));
    }

    let mut kerl = Kerl::new();
    kerl.absorb(digests)?;
    Ok(kerl.squeeze(HASH_TRIT_LEN)?)
}

/// Derive the address trytes for a seed, key index and security level.
pub fn new_address(seed: &str, index: u64, level: SecurityLevel) -> Result<String, SigningError> {
    let sub = subseed(seed, index)?;
    let k = key(&sub, level)?;
    let address = address_from_digests(&digests(&k)?)?;
    Ok(trits_to_trytes(&address)?)
}
