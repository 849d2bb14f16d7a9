//! Private key material derivation.
//!
//! A seed plus an index deterministically yields a subseed, and the subseed
//! yields one fragment of key trits per security level. Everything returned
//! here is wrapped in [`Zeroizing`] so the trits are wiped on drop.

use zeroize::Zeroizing;

use tanglekit_ternary::constants::{HASH_TRIT_LEN, HASH_TRYTE_LEN};
use tanglekit_ternary::{add_trits, int_to_trits, trytes_to_trits, Trits};
use tanglekit_sponge::{Kerl, Sponge};

use crate::{SecurityLevel, SigningError};

/// Derive the subseed for `index` from an 81-tryte seed.
///
/// The index is added to the seed as a balanced-ternary number before
/// hashing, so consecutive indexes walk distinct, unlinkable subseeds.
pub fn subseed(seed: &str, index: u64) -> Result<Zeroizing<Trits>, SigningError> {
    if seed.len() != HASH_TRYTE_LEN {
        return Err(SigningError::InvalidSeedLength(seed.len()));
    }

    let seed_trits = Zeroizing::new(trytes_to_trits(seed)?);
    let incremented = Zeroizing::new(add_trits(&seed_trits, &int_to_trits(index as i64)));

    let mut kerl = Kerl::new();
    kerl.absorb(&incremented)?;
    Ok(Zeroizing::new(kerl.squeeze(HASH_TRIT_LEN)?))
}

/// Derive the private key for a subseed at the given security level.
///
/// The key is one squeezed stream of `level * 6561` trits.
pub fn key(subseed: &[i8], level: SecurityLevel) -> Result<Zeroizing<Trits>, SigningError> {
    if subseed.len() != HASH_TRIT_LEN {
        return Err(SigningError::InvalidSubseedLength(subseed.len()));
    }

    let mut kerl = Kerl::new();
    kerl.absorb(subseed)?;
    Ok(Zeroizing::new(kerl.squeeze(level.key_trit_len())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str =
        "ZLNM9UHJWKTTDEZOTH9CXDEIFUJQCIACDPJIXPOWBDW9LTBHC9AQRIXTIHYLIIURLZCXNSTGNIVC9ISVB";

    #[test]
    fn subseed_is_index_dependent() {
        let s0 = subseed(SEED, 0).unwrap();
        let s1 = subseed(SEED, 1).unwrap();
        assert_eq!(s0.len(), HASH_TRIT_LEN);
        assert_ne!(*s0, *s1);
    }

    #[test]
    fn subseed_is_deterministic() {
        assert_eq!(*subseed(SEED, 7).unwrap(), *subseed(SEED, 7).unwrap());
    }

    #[test]
    fn subseed_rejects_short_seed() {
        assert!(matches!(
            subseed("ABC", 0),
            Err(SigningError::InvalidSeedLength(3))
        ));
    }

    #[test]
    fn key_length_tracks_security() {
        let sub = subseed(SEED, 0).unwrap();
        for level in [SecurityLevel::Low, SecurityLevel::Medium, SecurityLevel::High] {
            let k = key(&sub, level).unwrap();
            assert_eq!(k.len(), level.key_trit_len());
        }
    }

    #[test]
    fn higher_level_key_extends_lower() {
        // The key stream is a single squeeze, so level 1 is a prefix of level 2.
        let sub = subseed(SEED, 0).unwrap();
        let low = key(&sub, SecurityLevel::Low).unwrap();
        let medium = key(&sub, SecurityLevel::Medium).unwrap();
        assert_eq!(*low, medium[..low.len()]);
    }

    #[test]
    fn key_rejects_wrong_subseed_length() {
        assert!(key(&[0; 81], SecurityLevel::Low).is_err());
    }
}
