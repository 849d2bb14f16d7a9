//! Bundle assembly, finalization, signing and validation.
//!
//! A bundle is an atomic group of transactions bound together by one Kerl
//! hash over their essences. Inputs (negative values) must carry signatures
//! over that hash; a bundle is only meaningful once every invariant below
//! holds.

use tracing::debug;

use tanglekit_ternary::constants::{
    HASH_TRIT_LEN, KEY_FRAGMENT_TRIT_LEN, KEY_SEGMENTS_PER_FRAGMENT, MAX_SECURITY_LEVEL,
};
use tanglekit_ternary::{increment_trits, trits_to_trytes, trytes_to_trits};
use tanglekit_signing::{
    has_max_value, key, normalized_bundle_hash, signature_fragment, subseed, validate_signatures,
    SecurityLevel,
};
use tanglekit_sponge::{Kerl, Sponge};

use crate::transaction::Transaction;
use crate::transfer::BundleEntry;
use crate::BundleError;

/// An input the caller controls: where the funds sit and how to re-derive
/// the one-time key.
#[derive(Clone, Debug)]
pub struct Input {
    pub address: String,
    pub key_index: u64,
    pub security: SecurityLevel,
}

/// Append one entry's worth of transactions to a bundle under construction.
///
/// The entry's value rides on its first transaction; message continuation
/// rows carry value zero. Indexes are restitched over the whole bundle.
pub fn add_entry(bundle: &mut Vec<Transaction>, entry: &BundleEntry) {
    for (i, fragment) in entry
        .signature_message_fragments
        .iter()
        .take(entry.length)
        .enumerate()
    {
        bundle.push(Transaction {
            signature_message_fragment: fragment.clone(),
            address: entry.address.clone(),
            value: if i == 0 { entry.value } else { 0 },
            obsolete_tag: entry.tag.clone(),
            tag: entry.tag.clone(),
            timestamp: entry.timestamp,
            ..Transaction::default()
        });
    }
    restitch_indexes(bundle);
}

/// Compute the bundle hash and stamp it on every transaction.
///
/// Normalized hashes containing the value 13 would leave one signature
/// segment unhashed, exposing a key segment verbatim. The obsolete tag of
/// the head transaction is incremented and the bundle re-hashed until the
/// normalized hash is free of 13s.
pub fn finalize(bundle: &mut [Transaction]) -> Result<String, BundleError> {
    if bundle.is_empty() {
        return Err(BundleError::InvalidBundle {
            reason: "bundle must contain at least one transaction",
        });
    }
    restitch_indexes(bundle);

    let value_sum: i64 = bundle.iter().map(|tx| tx.value).sum();
    if value_sum != 0 {
        return Err(BundleError::NonZeroValueSum(value_sum));
    }

    let hash = loop {
        let mut kerl = Kerl::new();
        for tx in bundle.iter() {
            kerl.absorb(&tx.essence_trits()?)?;
        }
        let hash_trits = kerl.squeeze(HASH_TRIT_LEN)?;
        let hash = trits_to_trytes(&hash_trits)?;

        let normalized = normalized_bundle_hash(&hash)?;
        if !has_max_value(&normalized, MAX_SECURITY_LEVEL) {
            break hash;
        }

        let mut tag_trits = trytes_to_trits(&bundle[0].obsolete_tag)?;
        increment_trits(&mut tag_trits);
        bundle[0].obsolete_tag = trits_to_trytes(&tag_trits)?;
    };

    for tx in bundle.iter_mut() {
        tx.bundle = hash.clone();
    }
    Ok(hash)
}

/// Sign every input transaction of a finalized bundle.
///
/// Each negative-value transaction whose address matches an input gets
/// `security` consecutive signature fragments, spilling into the following
/// zero-value transactions at the same address.
pub fn sign_inputs(
    bundle: &mut [Transaction],
    seed: &str,
    inputs: &[Input],
) -> Result<(), BundleError> {
    let indexes: Vec<usize> = bundle
        .iter()
        .enumerate()
        .filter(|(_, tx)| tx.value < 0)
        .map(|(i, _)| i)
        .collect();

    for i in indexes {
        let address = bundle[i].address.clone();
        let input = inputs
            .iter()
            .find(|input| input.address == address)
            .ok_or_else(|| BundleError::UnknownInputAddress(address.clone()))?;

        let bundle_hash = bundle[i].bundle.clone();
        let normalized = normalized_bundle_hash(&bundle_hash)?;

        let sub = subseed(seed, input.key_index)?;
        let k = key(&sub, input.security)?;

        let mut fragments = Vec::with_capacity(input.security.fragments());
        for (f, key_fragment) in k.chunks_exact(KEY_FRAGMENT_TRIT_LEN).enumerate() {
            let chunk = &normalized[(f % 3) * KEY_SEGMENTS_PER_FRAGMENT..]
                [..KEY_SEGMENTS_PER_FRAGMENT];
            fragments.push(trits_to_trytes(&signature_fragment(chunk, key_fragment)?)?);
        }
        add_signature_fragments(bundle, i, &address, &fragments)?;
    }
    Ok(())
}

/// Splice signature fragments into a bundle starting at `offset`.
///
/// Fragments past the first must land on zero-value transactions at the
/// same address, the rows `add_entry` reserved for them.
pub fn add_signature_fragments(
    bundle: &mut [Transaction],
    offset: usize,
    address: &str,
    fragments: &[String],
) -> Result<(), BundleError> {
    for (i, fragment) in fragments.iter().enumerate() {
        let tx = bundle
            .get_mut(offset + i)
            .ok_or(BundleError::InvalidBundle {
                reason: "not enough transactions to hold signature fragments",
            })?;
        if tx.address != address || (i > 0 && tx.value != 0) {
            return Err(BundleError::InvalidBundle {
                reason: "signature continuation row does not match input address",
            });
        }
        tx.signature_message_fragment = fragment.clone();
    }
    Ok(())
}

/// Check every structural and cryptographic invariant of a bundle.
pub fn validate_bundle(bundle: &[Transaction]) -> Result<(), BundleError> {
    if bundle.is_empty() {
        return Err(BundleError::InvalidBundle {
            reason: "bundle must contain at least one transaction",
        });
    }

    let last_index = bundle.len() - 1;
    let bundle_hash = &bundle[0].bundle;
    let mut value_sum: i64 = 0;

    for (i, tx) in bundle.iter().enumerate() {
        if tx.current_index != i {
            debug!(index = i, current_index = tx.current_index, "index gap");
            return Err(BundleError::InvalidBundle {
                reason: "current_index must be contiguous from zero",
            });
        }
        if tx.last_index != last_index {
            debug!(index = i, last_index = tx.last_index, "last_index mismatch");
            return Err(BundleError::InvalidBundle {
                reason: "last_index must equal bundle length minus one",
            });
        }
        if &tx.bundle != bundle_hash {
            debug!(index = i, "bundle hash mismatch between transactions");
            return Err(BundleError::InvalidBundle {
                reason: "every transaction must carry the same bundle hash",
            });
        }
        value_sum += tx.value;
    }

    if value_sum != 0 {
        debug!(value_sum, "bundle does not balance");
        return Err(BundleError::NonZeroValueSum(value_sum));
    }

    let mut kerl = Kerl::new();
    for tx in bundle {
        kerl.absorb(&tx.essence_trits()?)?;
    }
    let recomputed = trits_to_trytes(&kerl.squeeze(HASH_TRIT_LEN)?)?;
    if &recomputed != bundle_hash {
        debug!("stamped bundle hash does not match recomputed essence hash");
        return Err(BundleError::InvalidBundle {
            reason: "bundle hash does not match transaction essences",
        });
    }

    validate_input_signatures(bundle, bundle_hash)
}

/// Verify the one-time signatures of every input in the bundle.
fn validate_input_signatures(
    bundle: &[Transaction],
    bundle_hash: &str,
) -> Result<(), BundleError> {
    let mut i = 0;
    while i < bundle.len() {
        let tx = &bundle[i];
        if tx.value >= 0 {
            i += 1;
            continue;
        }

        // Consecutive same-address zero-value rows extend the signature.
        let mut fragments = vec![tx.signature_message_fragment.clone()];
        let mut j = i + 1;
        while j < bundle.len()
            && fragments.len() < MAX_SECURITY_LEVEL
            && bundle[j].address == tx.address
            && bundle[j].value == 0
        {
            fragments.push(bundle[j].signature_message_fragment.clone());
            j += 1;
        }

        validate_signatures(&tx.address, &fragments, bundle_hash)?;
        i = j;
    }
    Ok(())
}

/// The tail (index zero) transaction of a bundle, if present.
pub fn tail_transaction(bundle: &[Transaction]) -> Option<&Transaction> {
    bundle.iter().find(|tx| tx.current_index == 0)
}

fn restitch_indexes(bundle: &mut [Transaction]) {
    let last = bundle.len().saturating_sub(1);
    for (i, tx) in bundle.iter_mut().enumerate() {
        tx.current_index = i;
        tx.last_index = last;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TAG_TRYTE_LEN;
    use crate::transfer::{transfers_to_bundle_entries, Transfer};
    use tanglekit_signing::new_address;

    const SEED: &str =
        "ZLNM9UHJWKTTDEZOTH9CXDEIFUJQCIACDPJIXPOWBDW9LTBHC9AQRIXTIHYLIIURLZCXNSTGNIVC9ISVB";

    fn output_address() -> String {
        "RECEIVER9".repeat(9)
    }

    fn build_signed_bundle(security: SecurityLevel) -> Vec<Transaction> {
        let input_address = new_address(SEED, 5, security).unwrap();
        let transfers = vec![Transfer::new(&output_address(), 100)];
        let entries = transfers_to_bundle_entries(1_700_000_000, &transfers).unwrap();

        let mut bundle = Vec::new();
        for entry in &entries {
            add_entry(&mut bundle, entry);
        }
        // The input entry: spend 100 from the derived address, reserving
        // rows for the signature fragments.
        let input_entry = BundleEntry {
            length: security.fragments(),
            address: input_address.clone(),
            value: -100,
            tag: "9".repeat(TAG_TRYTE_LEN),
            timestamp: 1_700_000_000,
            signature_message_fragments: vec![
                "9".repeat(2187);
                security.fragments()
            ],
        };
        add_entry(&mut bundle, &input_entry);

        finalize(&mut bundle).unwrap();
        sign_inputs(
            &mut bundle,
            SEED,
            &[Input {
                address: input_address,
                key_index: 5,
                security,
            }],
        )
        .unwrap();
        bundle
    }

    #[test]
    fn finalize_stamps_uniform_hash_and_indexes() {
        let entries = transfers_to_bundle_entries(
            1000,
            &[
                Transfer::new(&output_address(), 3),
                Transfer::new(&"OTHER9OUT".repeat(9), -3),
            ],
        )
        .unwrap();
        let mut bundle = Vec::new();
        for entry in &entries {
            add_entry(&mut bundle, entry);
        }
        let hash = finalize(&mut bundle).unwrap();

        assert_eq!(hash.len(), 81);
        for (i, tx) in bundle.iter().enumerate() {
            assert_eq!(tx.current_index, i);
            assert_eq!(tx.last_index, bundle.len() - 1);
            assert_eq!(tx.bundle, hash);
        }
    }

    #[test]
    fn finalized_hash_normalizes_without_max_value() {
        let entries =
            transfers_to_bundle_entries(1000, &[Transfer::new(&output_address(), 0)]).unwrap();
        let mut bundle = Vec::new();
        add_entry(&mut bundle, &entries[0]);
        let hash = finalize(&mut bundle).unwrap();

        let normalized = normalized_bundle_hash(&hash).unwrap();
        assert!(!has_max_value(&normalized, MAX_SECURITY_LEVEL));
    }

    #[test]
    fn signed_bundle_validates() {
        let bundle = build_signed_bundle(SecurityLevel::Low);
        validate_bundle(&bundle).unwrap();
    }

    #[test]
    fn signed_bundle_validates_at_level_two() {
        let bundle = build_signed_bundle(SecurityLevel::Medium);
        assert_eq!(bundle.len(), 3);
        validate_bundle(&bundle).unwrap();
    }

    #[test]
    fn unbalanced_bundle_rejected() {
        let entries =
            transfers_to_bundle_entries(1000, &[Transfer::new(&output_address(), 7)]).unwrap();
        let mut bundle = Vec::new();
        add_entry(&mut bundle, &entries[0]);
        assert!(matches!(
            finalize(&mut bundle),
            Err(BundleError::NonZeroValueSum(7))
        ));
    }

    #[test]
    fn tampered_value_rejected() {
        let mut bundle = build_signed_bundle(SecurityLevel::Low);
        bundle[0].value += 1;
        bundle[1].value -= 1;
        // Still balances, but the stamped hash no longer matches.
        assert!(matches!(
            validate_bundle(&bundle),
            Err(BundleError::InvalidBundle { .. })
        ));
    }

    #[test]
    fn tampered_signature_rejected() {
        let mut bundle = build_signed_bundle(SecurityLevel::Low);
        let input_index = bundle.iter().position(|tx| tx.value < 0).unwrap();
        let mut fragment: Vec<char> =
            bundle[input_index].signature_message_fragment.chars().collect();
        fragment[0] = if fragment[0] == 'A' { 'B' } else { 'A' };
        bundle[input_index].signature_message_fragment = fragment.into_iter().collect();
        assert!(matches!(
            validate_bundle(&bundle),
            Err(BundleError::Signing(_))
        ));
    }

    #[test]
    fn broken_indexes_rejected() {
        let mut bundle = build_signed_bundle(SecurityLevel::Low);
        bundle[1].current_index = 5;
        assert!(validate_bundle(&bundle).is_err());
    }

    #[test]
    fn tail_is_index_zero() {
        let bundle = build_signed_bundle(SecurityLevel::Low);
        assert_eq!(tail_transaction(&bundle).unwrap().current_index, 0);
        assert!(tail_transaction(&[]).is_none());
    }

    #[test]
    fn sign_inputs_requires_known_address() {
        let mut bundle = build_signed_bundle(SecurityLevel::Low);
        let result = sign_inputs(&mut bundle, SEED, &[]);
        assert!(matches!(result, Err(BundleError::UnknownInputAddress(_))));
    }

    #[test]
    fn empty_bundle_rejected() {
        assert!(finalize(&mut []).is_err());
        assert!(validate_bundle(&[]).is_err());
    }
}
