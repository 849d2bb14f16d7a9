//! Signature generation and verification.
//!
//! A signature fragment is the key fragment with each segment hashed
//! `13 - v` times, where `v` is the matching normalized hash value. The
//! verifier hashes each segment the remaining `v + 13` times, which lands
//! back on the hardened key segment, and folds the result into the address.

use tanglekit_ternary::constants::{
    HASH_TRIT_LEN, KEY_FRAGMENT_TRIT_LEN, KEY_SEGMENTS_PER_FRAGMENT, MAX_SECURITY_LEVEL,
    MAX_TRYTE_VALUE, MIN_TRYTE_VALUE,
};
use tanglekit_ternary::{trytes_to_trits, Trit, Trits};
use tanglekit_sponge::{Kerl, Sponge};

use crate::address::address_from_digests;
use crate::normalize::normalized_bundle_hash;
use crate::SigningError;

/// Sign one fragment of a normalized bundle hash with one key fragment.
pub fn signature_fragment(
    normalized_chunk: &[i8],
    key_fragment: &[i8],
) -> Result<Trits, SigningError> {
    check_fragment_inputs(normalized_chunk, key_fragment)?;

    let mut fragment = key_fragment.to_vec();
    let mut kerl = Kerl::new();
    for (segment, v) in fragment
        .chunks_exact_mut(HASH_TRIT_LEN)
        .zip(normalized_chunk)
    {
        for _ in 0..(MAX_TRYTE_VALUE - v) {
            kerl.reset();
            kerl.absorb(segment)?;
            segment.copy_from_slice(&kerl.squeeze(HASH_TRIT_LEN)?);
        }
    }
    Ok(fragment)
}

/// Recover the key digest a signature fragment commits to.
pub fn sig_fragment_digest(
    normalized_chunk: &[i8],
    signature_fragment: &[i8],
) -> Result<Trits, SigningError> {
    check_fragment_inputs(normalized_chunk, signature_fragment)?;

    let mut fragment = signature_fragment.to_vec();
    let mut kerl = Kerl::new();
    for (segment, v) in fragment
        .chunks_exact_mut(HASH_TRIT_LEN)
        .zip(normalized_chunk)
    {
        for _ in 0..(v - MIN_TRYTE_VALUE) {
            kerl.reset();
            kerl.absorb(segment)?;
            segment.copy_from_slice(&kerl.squeeze(HASH_TRIT_LEN)?);
        }
    }

    kerl.reset();
    kerl.absorb(&fragment)?;
    Ok(kerl.squeeze(HASH_TRIT_LEN)?)
}

/// Verify signature fragments against an address and a bundle hash.
///
/// Fragment `i` covers normalized chunk `i mod 3`, so a level-2 or level-3
/// signature arrives as consecutive fragments of the same address. A
/// signature that recomputes to a different address is `InvalidSignature`.
pub fn validate_signatures(
    expected_address: &str,
    fragments: &[String],
    bundle_hash: &str,
) -> Result<(), SigningError> {
    if fragments.is_empty() || fragments.len() > MAX_SECURITY_LEVEL {
        return Err(SigningError::InvalidFragmentLength(fragments.len()));
    }

    let normalized = normalized_bundle_hash(bundle_hash)?;
    let mut digests = Trits::with_capacity(fragments.len() * HASH_TRIT_LEN);
    for (i, fragment) in fragments.iter().enumerate() {
        let fragment_trits = trytes_to_trits(fragment)?;
        let chunk = &normalized[(i % 3) * KEY_SEGMENTS_PER_FRAGMENT..][..KEY_SEGMENTS_PER_FRAGMENT];
        digests.extend_from_slice(&sig_fragment_digest(chunk, &fragment_trits)?);
    }

    let address = address_from_digests(&digests)?;
    let expected = trytes_to_trits(expected_address)?;
    if trits_eq_ct(&address, &expected) {
        Ok(())
    } else {
        Err(SigningError::InvalidSignature)
    }
}

fn check_fragment_inputs(normalized_chunk: &[i8], fragment: &[i8]) -> Result<(), SigningError> {
    if normalized_chunk.len() != KEY_SEGMENTS_PER_FRAGMENT {
        return Err(SigningError::InvalidBundleHashLength(normalized_chunk.len()));
    }
    if fragment.len() != KEY_FRAGMENT_TRIT_LEN {
        return Err(SigningError::InvalidFragmentLength(fragment.len()));
    }
    Ok(())
}

/// Trit slice comparison that does not short-circuit on the first mismatch.
fn trits_eq_ct(a: &[Trit], b: &[Trit]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b) {
        diff |= (x ^ y) as u8;
    }
    diff == 0
}
