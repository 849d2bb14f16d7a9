//! Bridge between a 243-trit hash block and its 48-byte big-endian
//! two's-complement integer form.
//!
//! Balanced ternary over 242 digits covers [-(3^242-1)/2, (3^242-1)/2] while
//! 384-bit two's complement is asymmetric around zero, so the conversion
//! recentres the value by HALF_3 = (3^242-1)/2. The 243rd trit is outside
//! the byte domain: it is ignored on encode and always zero on decode.

use std::cmp::Ordering;

use tanglekit_bigint as bigint;
use tanglekit_ternary::constants::{HASH_BYTE_LEN, HASH_TRIT_LEN, LIMB_LEN};
use tanglekit_ternary::{Trit, Trits};

use crate::SpongeError;

/// (3^242 - 1) / 2 as u32 limbs, least-significant first.
const HALF_3: [u32; LIMB_LEN] = [
    0xa5ce_8964,
    0x9f00_7669,
    0x1484_504f,
    0x3ade_00d9,
    0x0c24_486e,
    0x5097_9d57,
    0x79a4_c702,
    0x48bb_ae36,
    0xa9f6_808b,
    0xaa06_a805,
    0xa87f_abdf,
    0x5e69_ebef,
];

/// Encode a hash-width trit block as 48 big-endian bytes.
pub fn trits_to_bytes(trits: &[Trit]) -> Result<[u8; HASH_BYTE_LEN], SpongeError> {
    if trits.len() != HASH_TRIT_LEN {
        return Err(SpongeError::InvalidTritsLength {
            len: trits.len(),
            multiple: HASH_TRIT_LEN,
        });
    }

    // The 243rd trit carries no information in the byte domain.
    let digits = &trits[..HASH_TRIT_LEN - 1];
    let mut base = [0u32; LIMB_LEN];

    if digits.iter().all(|t| *t == -1) {
        // All information-bearing trits at -1 is the value -HALF_3; the
        // Horner loop below would collapse it to zero, so build its two's
        // complement directly.
        base.copy_from_slice(&HALF_3);
        bigint::not(&mut base);
        bigint::add_small(&mut base, 1);
    } else {
        // Horner evaluation of the unbalanced digits (t + 1), most
        // significant trit first.
        for t in digits.iter().rev() {
            let mut carry = 0u32;
            for limb in base.iter_mut() {
                let v = u64::from(*limb) * 3 + u64::from(carry);
                *limb = v as u32;
                carry = (v >> 32) as u32;
            }
            bigint::add_small(&mut base, (t + 1) as u32);
        }

        // Recentre: shift out of the unbalanced [0, 3^242) window.
        if !bigint::is_null(&base) {
            if bigint::cmp(&HALF_3, &base) != Ordering::Greater {
                bigint::sub(&mut base, &HALF_3);
            } else {
                let mut tmp = HALF_3;
                bigint::sub(&mut tmp, &base);
                bigint::not(&mut tmp);
                bigint::add_small(&mut tmp, 1);
                base = tmp;
            }
        }
    }

    let mut bytes = [0u8; HASH_BYTE_LEN];
    for (chunk, limb) in bytes.chunks_exact_mut(4).zip(base.iter().rev()) {
        chunk.copy_from_slice(&limb.to_be_bytes());
    }
    Ok(bytes)
}

/// Decode 48 big-endian bytes into a hash-width trit block.
pub fn bytes_to_trits(bytes: &[u8]) -> Result<Trits, SpongeError> {
    if bytes.len() != HASH_BYTE_LEN {
        return Err(SpongeError::InvalidBytesLength {
            len: bytes.len(),
            expected: HASH_BYTE_LEN,
        });
    }

    let mut base = [0u32; LIMB_LEN];
    for (chunk, limb) in bytes.chunks_exact(4).zip(base.iter_mut().rev()) {
        *limb = u32::from_be_bytes(chunk.try_into().unwrap());
    }

    let mut trits = vec![0 as Trit; HASH_TRIT_LEN];
    if bigint::is_null(&base) {
        return Ok(trits);
    }

    let mut flip = false;
    if base[LIMB_LEN - 1] >> 31 == 0 {
        // Non-negative: recentre into the unbalanced window.
        bigint::add(&mut base, &HALF_3);
    } else {
        bigint::not(&mut base);
        if bigint::cmp(&base, &HALF_3) == Ordering::Greater {
            bigint::sub(&mut base, &HALF_3);
            flip = true;
        } else {
            bigint::add_small(&mut base, 1);
            let mut tmp = HALF_3;
            bigint::sub(&mut tmp, &base);
            base = tmp;
        }
    }

    // Repeated division by three yields the unbalanced digits.
    for t in trits.iter_mut().take(HASH_TRIT_LEN - 1) {
        let mut rem = 0u64;
        for limb in base.iter_mut().rev() {
            let acc = (rem << 32) | u64::from(*limb);
            *limb = (acc / 3) as u32;
            rem = acc % 3;
        }
        *t = rem as Trit - 1;
    }

    if flip {
        for t in &mut trits {
            *t = -*t;
        }
    }
    Ok(trits)
}
