//! Bundle hash normalization.

use tanglekit_ternary::constants::{
    HASH_TRYTE_LEN, KEY_SEGMENTS_PER_FRAGMENT, MAX_SECURITY_LEVEL, MAX_TRYTE_VALUE,
    MIN_TRYTE_VALUE,
};
use tanglekit_ternary::tryte_value;

use crate::SigningError;

/// Tryte values of a normalized bundle hash, one fragment's worth per
/// security level.
pub type NormalizedHash = [i8; HASH_TRYTE_LEN];

/// Normalize a bundle hash for signing.
///
/// Each 27-value chunk is nudged to sum to zero, so that across a chunk the
/// signing rounds and the verification rounds always total the same work.
/// Without this an attacker who sees one signature could forge signatures
/// for hashes whose values are all closer to 13.
pub fn normalized_bundle_hash(bundle_hash: &str) -> Result<NormalizedHash, SigningError> {
    if bundle_hash.len() != HASH_TRYTE_LEN {
        return Err(SigningError::InvalidBundleHashLength(bundle_hash.len()));
    }

    let mut normalized = [0i8; HASH_TRYTE_LEN];
    for (v, c) in normalized.iter_mut().zip(bundle_hash.chars()) {
        *v = tryte_value(c)?;
    }

    for chunk in normalized.chunks_exact_mut(KEY_SEGMENTS_PER_FRAGMENT) {
        let mut sum: i32 = chunk.iter().map(|v| *v as i32).sum();
        while sum > 0 {
            for v in chunk.iter_mut() {
                if *v > MIN_TRYTE_VALUE {
                    *v -= 1;
                    break;
                }
            }
            sum -= 1;
        }
        while sum < 0 {
            for v in chunk.iter_mut() {
                if *v < MAX_TRYTE_VALUE {
                    *v += 1;
                    break;
                }
            }
            sum += 1;
        }
    }

    Ok(normalized)
}

/// Whether a normalized hash contains the value 13 ('M') in the chunks a
/// signature at `security` would cover.
pub fn has_max_value(normalized: &NormalizedHash, security: usize) -> bool {
    let covered = security.min(MAX_SECURITY_LEVEL) * KEY_SEGMENTS_PER_FRAGMENT;
    normalized[..covered].contains(&MAX_TRYTE_VALUE)
}
