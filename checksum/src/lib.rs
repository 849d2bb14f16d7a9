//! Address checksums.
//!
//! A checksum is the tail of the Kerl hash of the input trytes, appended so
//! that transcription errors are caught before funds move. Addresses carry a
//! 9-tryte checksum; arbitrary trytes may take shorter ones down to 3.

pub mod error;

pub use error::ChecksumError;

use tanglekit_ternary::constants::{
    ADDRESS_CHECKSUM_TRYTE_LEN, ADDRESS_WITH_CHECKSUM_TRYTE_LEN, HASH_TRIT_LEN, HASH_TRYTE_LEN,
    MIN_CHECKSUM_TRYTE_LEN,
};
use tanglekit_ternary::{pad_trytes, trits_to_trytes, trytes_to_trits};
use tanglekit_sponge::{Kerl, Sponge};

/// Append a checksum of `checksum_len` trytes to the input.
///
/// Address inputs must be exactly one hash (81 trytes) and take the full
/// 9-tryte checksum; an address that already carries its checksum is
/// returned unchanged. Other inputs are padded with the zero symbol up to a
/// whole number of hash blocks before hashing.
pub fn add_checksum(
    input: &str,
    is_address: bool,
    checksum_len: usize,
) -> Result<String, ChecksumError> {
    if is_address {
        match input.len() {
            HASH_TRYTE_LEN => {}
            ADDRESS_WITH_CHECKSUM_TRYTE_LEN => return Ok(input.to_string()),
            len => return Err(ChecksumError::InvalidAddressLength(len)),
        }
        if checksum_len != ADDRESS_CHECKSUM_TRYTE_LEN {
            return Err(ChecksumError::InvalidChecksumLength(checksum_len));
        }
    } else if checksum_len < MIN_CHECKSUM_TRYTE_LEN {
        return Err(ChecksumError::InvalidChecksumLength(checksum_len));
    }

    let blocks = input.len().div_ceil(HASH_TRYTE_LEN).max(1);
    let padded = pad_trytes(input, blocks * HASH_TRYTE_LEN);

    let mut kerl = Kerl::new();
    kerl.absorb(&trytes_to_trits(&padded)?)?;
    let digest = trits_to_trytes(&kerl.squeeze(HASH_TRIT_LEN)?)?;

    let mut out = String::with_capacity(input.len() + checksum_len);
    out.push_str(input);
    out.push_str(&digest[HASH_TRYTE_LEN - checksum_len..]);
    Ok(out)
}

/// Strip the checksum from an address if one is present.
pub fn remove_checksum(address: &str) -> Result<String, ChecksumError> {
    match address.len() {
        HASH_TRYTE_LEN => Ok(address.to_string()),
        ADDRESS_WITH_CHECKSUM_TRYTE_LEN => Ok(address[..HASH_TRYTE_LEN].to_string()),
        len => Err(ChecksumError::InvalidAddressLength(len)),
    }
}

/// Check that a 90-tryte address carries a correct checksum.
pub fn valid_checksum(address_with_checksum: &str) -> Result<(), ChecksumError> {
    if address_with_checksum.len() != ADDRESS_WITH_CHECKSUM_TRYTE_LEN {
        return Err(ChecksumError::InvalidAddressLength(
            address_with_checksum.len(),
        ));
    }
    let address = &address_with_checksum[..HASH_TRYTE_LEN];
    let expected = add_checksum(address, true, ADDRESS_CHECKSUM_TRYTE_LEN)?;
    if address_with_checksum == expected {
        Ok(())
    } else {
        Err(ChecksumError::ChecksumMismatch)
    }
}
