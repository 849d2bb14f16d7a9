//! The handful of magic numbers every other crate depends on, in one place.

/// Base of the trinary system.
pub const RADIX: i8 = 3;

/// The 27 tryte symbols; index i encodes the trit triplet with value
/// i for i <= 13 and i - 27 for i > 13.
pub const TRYTE_ALPHABET: &str = "9ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Minimum value a single tryte can encode.
pub const MIN_TRYTE_VALUE: i8 = -13;
/// Maximum value a single tryte can encode.
pub const MAX_TRYTE_VALUE: i8 = 13;

/// Standard hash width in trits, for Curl and Kerl alike.
pub const HASH_TRIT_LEN: usize = 243;
/// Hash width in trytes.
pub const HASH_TRYTE_LEN: usize = HASH_TRIT_LEN / 3;
/// Byte width of a hash-sized trit block in the binary bridge.
pub const HASH_BYTE_LEN: usize = 48;
/// Number of u32 limbs backing a 48-byte integer.
pub const LIMB_LEN: usize = HASH_BYTE_LEN / 4;

/// Segments per one-time-signature key fragment.
pub const KEY_SEGMENTS_PER_FRAGMENT: usize = 27;
/// Trit length of one key fragment (27 segments of hash width).
pub const KEY_FRAGMENT_TRIT_LEN: usize = HASH_TRIT_LEN * KEY_SEGMENTS_PER_FRAGMENT;
/// Chained hash rounds applied to every key segment during digest derivation.
pub const KEY_SEGMENT_HASH_ROUNDS: usize = 26;

/// Tryte length of one signature/message fragment.
pub const SIG_FRAGMENT_TRYTE_LEN: usize = KEY_FRAGMENT_TRIT_LEN / 3;

/// Tryte length of the checksum appended to addresses.
pub const ADDRESS_CHECKSUM_TRYTE_LEN: usize = 9;
/// Tryte length of an address carrying its checksum.
pub const ADDRESS_WITH_CHECKSUM_TRYTE_LEN: usize = HASH_TRYTE_LEN + ADDRESS_CHECKSUM_TRYTE_LEN;
/// Smallest checksum length `add_checksum` accepts.
pub const MIN_CHECKSUM_TRYTE_LEN: usize = 3;

/// Highest supported security level.
pub const MAX_SECURITY_LEVEL: usize = 3;

/// Default minimum weight magnitude (trailing zero trits) for proof-of-work.
pub const DEFAULT_MIN_WEIGHT_MAGNITUDE: usize = 14;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_lengths_consistent() {
        assert_eq!(HASH_TRYTE_LEN, 81);
        assert_eq!(KEY_FRAGMENT_TRIT_LEN, 6561);
        assert_eq!(SIG_FRAGMENT_TRYTE_LEN, 2187);
        assert_eq!(ADDRESS_WITH_CHECKSUM_TRYTE_LEN, 90);
        assert_eq!(TRYTE_ALPHABET.len(), 27);
    }
}
