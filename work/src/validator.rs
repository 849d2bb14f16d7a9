//! Proof-of-work validation.

use tanglekit_bundle::TRANSACTION_TRYTE_LEN;
use tanglekit_sponge::{Curl, CurlRounds, Sponge};
use tanglekit_ternary::constants::{HASH_TRIT_LEN, HASH_TRYTE_LEN};
use tanglekit_ternary::{trailing_zeros, trytes_to_trits};

use crate::WorkError;

/// Check that a transaction's hash carries at least `mwm` trailing zero
/// trits.
///
/// The hash is CurlP81 over the full wire form, nonce included, so the check
/// is a pure function of the attached transaction.
pub fn validate_work(tx_trytes: &str, mwm: usize) -> Result<(), WorkError> {
    if tx_trytes.len() != TRANSACTION_TRYTE_LEN {
        return Err(WorkError::InvalidTransactionLength(tx_trytes.len()));
    }
    if mwm == 0 || mwm > HASH_TRIT_LEN {
        return Err(WorkError::InvalidWeightMagnitude(mwm));
    }

    let trits = trytes_to_trits(tx_trytes)?;
    let mut curl = Curl::new(CurlRounds::P81);
    curl.absorb(&trits)?;
    let hash = curl.squeeze(HASH_TRIT_LEN)?;

    let actual = trailing_zeros(&hash);
    if actual < mwm {
        return Err(WorkError::InsufficientWork {
            required: mwm,
            actual,
        });
    }
    Ok(())
}

/// Trailing zero trits of an 81-tryte transaction hash, the weight actually
/// attached to it.
pub fn weight_magnitude(hash_trytes: &str) -> Result<usize, WorkError> {
    if hash_trytes.len() != HASH_TRYTE_LEN {
        return Err(WorkError::InvalidTransactionLength(hash_trytes.len()));
    }
    Ok(trailing_zeros(&trytes_to_trits(hash_trytes)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanglekit_bundle::Transaction;

    #[test]
    fn rejects_wrong_length_and_mwm() {
        assert!(matches!(
            validate_work("ABC", 3),
            Err(WorkError::InvalidTransactionLength(3))
        ));
        let trytes = Transaction::default().to_trytes().unwrap();
        assert!(matches!(
            validate_work(&trytes, 0),
            Err(WorkError::InvalidWeightMagnitude(0))
        ));
        assert!(validate_work(&trytes, 244).is_err());
    }

    #[test]
    fn unworked_transaction_usually_fails_high_mwm() {
        // An all-nines transaction has no reason to carry 14 zero trits.
        let trytes = Transaction::default().to_trytes().unwrap();
        assert!(matches!(
            validate_work(&trytes, 14),
            Err(WorkError::InsufficientWork { required: 14, .. })
        ));
    }

    #[test]
    fn weight_magnitude_counts_the_hash_tail() {
        assert_eq!(weight_magnitude(&"9".repeat(81)).unwrap(), 243);
        let mut trytes = "9".repeat(80);
        trytes.push('M');
        assert_eq!(weight_magnitude(&trytes).unwrap(), 0);
        assert!(weight_magnitude("SHORT").is_err());
    }
}
