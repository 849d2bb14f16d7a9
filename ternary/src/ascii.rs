//! ASCII payload codec: one byte maps to two trytes via (b % 27, b / 27).

use crate::constants::TRYTE_ALPHABET;
use crate::trytes::tryte_index;
use crate::TernaryError;

/// Encode a 7-bit ASCII string as trytes, two per character.
pub fn ascii_to_trytes(input: &str) -> Result<String, TernaryError> {
    if !input.is_ascii() {
        return Err(TernaryError::InvalidAsciiCharacter);
    }

    let alphabet = TRYTE_ALPHABET.as_bytes();
    let mut trytes = String::with_capacity(input.len() * 2);
    for b in input.bytes() {
        trytes.push(alphabet[(b % 27) as usize] as char);
        trytes.push(alphabet[(b / 27) as usize] as char);
    }
    Ok(trytes)
}

/// Decode trytes produced by [`ascii_to_trytes`] back into an ASCII string.
pub fn trytes_to_ascii(trytes: &str) -> Result<String, TernaryError> {
    if trytes.len() % 2 != 0 {
        return Err(TernaryError::OddLength(trytes.len()));
    }

    let chars: Vec<char> = trytes.chars().collect();
    let mut out = String::with_capacity(chars.len() / 2);
    for pair in chars.chunks_exact(2) {
        let lo = tryte_index(pair[0]).ok_or(TernaryError::InvalidTryteCharacter(pair[0]))?;
        let hi = tryte_index(pair[1]).ok_or(TernaryError::InvalidTryteCharacter(pair[1]))?;
        let byte = lo + hi * 27;
        if byte > 0x7F {
            return Err(TernaryError::InvalidAsciiCharacter);
        }
        out.push(byte as u8 as char);
    }
    Ok(out)
}
