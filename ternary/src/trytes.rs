//! Tryte strings over the 27-symbol alphabet.

use crate::constants::TRYTE_ALPHABET;
use crate::trits::{Trit, Trits, TRYTE_TO_TRITS};
use crate::TernaryError;

/// Alphabet index of a tryte character, or `None` if out of domain.
pub fn tryte_index(c: char) -> Option<usize> {
    match c {
        '9' => Some(0),
        'A'..='Z' => Some(c as usize - 'A' as usize + 1),
        _ => None,
    }
}

/// The balanced value (-13..=13) a single tryte character encodes.
pub fn tryte_value(c: char) -> Result<i8, TernaryError> {
    let idx = tryte_index(c).ok_or(TernaryError::InvalidTryteCharacter(c))? as i8;
    Ok(if idx > 13 { idx - 27 } else { idx })
}

/// Validate a tryte string: non-empty and alphabet-only.
pub fn validate_trytes(trytes: &str) -> Result<(), TernaryError> {
    if trytes.is_empty() {
        return Err(TernaryError::InvalidLength {
            len: 0,
            reason: "trytes must not be empty",
        });
    }
    match trytes.chars().find(|c| tryte_index(*c).is_none()) {
        Some(c) => Err(TernaryError::InvalidTryteCharacter(c)),
        None => Ok(()),
    }
}

/// Convert a tryte string into trits, three per tryte.
pub fn trytes_to_trits(trytes: &str) -> Result<Trits, TernaryError> {
    let mut trits = Trits::with_capacity(trytes.len() * 3);
    for c in trytes.chars() {
        let idx = tryte_index(c).ok_or(TernaryError::InvalidTryteCharacter(c))?;
        trits.extend_from_slice(&TRYTE_TO_TRITS[idx]);
    }
    Ok(trits)
}

/// Convert three trits worth of value into the corresponding tryte character.
pub fn trits_triplet_to_tryte(triplet: &[Trit; 3]) -> char {
    let mut j = triplet[0] + triplet[1] * 3 + triplet[2] * 9;
    if j < 0 {
        j += 27;
    }
    TRYTE_ALPHABET.as_bytes()[j as usize] as char
}

/// Right-pad a tryte string with the zero symbol `9` up to `size`.
pub fn pad_trytes(trytes: &str, size: usize) -> String {
    let mut out = String::with_capacity(size.max(trytes.len()));
    out.push_str(trytes);
    while out.len() < size {
        out.push('9');
    }
    out
}
