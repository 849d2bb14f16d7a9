//! Trit sequences and the balanced-ternary integer codec.

use crate::constants::{RADIX, TRYTE_ALPHABET};
use crate::TernaryError;

/// A balanced-ternary digit: -1, 0 or 1.
pub type Trit = i8;

/// An owned sequence of trits, least-significant trit first.
pub type Trits = Vec<Trit>;

/// Trit triplets for each tryte, in alphabet order (`9`, `A`, ..., `Z`).
pub(crate) const TRYTE_TO_TRITS: [[Trit; 3]; 27] = [
    [0, 0, 0],
    [1, 0, 0],
    [-1, 1, 0],
    [0, 1, 0],
    [1, 1, 0],
    [-1, -1, 1],
    [0, -1, 1],
    [1, -1, 1],
    [-1, 0, 1],
    [0, 0, 1],
    [1, 0, 1],
    [-1, 1, 1],
    [0, 1, 1],
    [1, 1, 1],
    [-1, -1, -1],
    [0, -1, -1],
    [1, -1, -1],
    [-1, 0, -1],
    [0, 0, -1],
    [1, 0, -1],
    [-1, 1, -1],
    [0, 1, -1],
    [1, 1, -1],
    [-1, -1, 0],
    [0, -1, 0],
    [1, -1, 0],
    [-1, 0, 0],
];

/// Check a single trit for domain validity.
pub fn is_valid_trit(t: Trit) -> bool {
    (-1..=1).contains(&t)
}

/// Validate every trit of a slice.
pub fn validate_trits(trits: &[Trit]) -> Result<(), TernaryError> {
    match trits.iter().find(|t| !is_valid_trit(**t)) {
        Some(t) => Err(TernaryError::InvalidTrit(*t)),
        None => Ok(()),
    }
}

/// Interpret trits as a balanced-ternary integer.
///
/// The result silently wraps outside the i64 range; callers feed short
/// slices (value fields are at most 81 trits, well within range only for
/// realistic ledger values).
pub fn trits_to_int(trits: &[Trit]) -> i64 {
    trits
        .iter()
        .rev()
        .fold(0i64, |acc, t| acc.wrapping_mul(3).wrapping_add(*t as i64))
}

/// Encode an integer in balanced ternary, least-significant trit first.
///
/// Zero encodes as a single zero trit.
pub fn int_to_trits(value: i64) -> Trits {
    if value == 0 {
        return vec![0];
    }

    let negative = value < 0;
    let mut v = value.unsigned_abs();
    let mut trits = Trits::new();

    while v != 0 {
        let mut t = ((v + 1) % RADIX as u64) as i8 - 1;
        if negative {
            t = -t;
        }
        trits.push(t);
        v = (v + 1) / RADIX as u64;
    }
    trits
}

/// Convert trits into trytes. Length must be a multiple of three.
pub fn trits_to_trytes(trits: &[Trit]) -> Result<String, TernaryError> {
    if trits.len() % 3 != 0 {
        return Err(TernaryError::InvalidLength {
            len: trits.len(),
            reason: "trit length must be a multiple of 3",
        });
    }
    validate_trits(trits)?;

    let alphabet = TRYTE_ALPHABET.as_bytes();
    let mut trytes = String::with_capacity(trits.len() / 3);
    for chunk in trits.chunks_exact(3) {
        let mut j = chunk[0] + chunk[1] * 3 + chunk[2] * 9;
        if j < 0 {
            j += 27;
        }
        trytes.push(alphabet[j as usize] as char);
    }
    Ok(trytes)
}

/// Right-pad trits with zeroes up to `size`. Longer inputs are returned as is.
pub fn pad_trits(trits: &[Trit], size: usize) -> Trits {
    let mut out = trits.to_vec();
    if out.len() < size {
        out.resize(size, 0);
    }
    out
}

/// Number of trailing zero trits, counted from the most-significant end.
pub fn trailing_zeros(trits: &[Trit]) -> usize {
    trits.iter().rev().take_while(|t| **t == 0).count()
}

// Balanced-ternary full adder, digit by digit.

fn trit_sum(a: Trit, b: Trit) -> Trit {
    match a + b {
        2 => -1,
        -2 => 1,
        s => s,
    }
}

fn trit_cons(a: Trit, b: Trit) -> Trit {
    if a == b {
        a
    } else {
        0
    }
}

fn trit_any(a: Trit, b: Trit) -> Trit {
    (a + b).signum()
}

fn full_add(a: Trit, b: Trit, carry: Trit) -> (Trit, Trit) {
    let s = trit_sum(a, b);
    let c1 = trit_cons(a, b);
    let c2 = trit_cons(s, carry);
    (trit_sum(s, carry), trit_any(c1, c2))
}

/// Add two balanced-ternary numbers. The result is as long as the longer
/// operand; a final carry out is dropped.
pub fn add_trits(a: &[Trit], b: &[Trit]) -> Trits {
    let len = a.len().max(b.len());
    let mut out = vec![0; len];
    let mut carry = 0;
    for (i, o) in out.iter_mut().enumerate() {
        let ai = a.get(i).copied().unwrap_or(0);
        let bi = b.get(i).copied().unwrap_or(0);
        let (s, c) = full_add(ai, bi, carry);
        *o = s;
        carry = c;
    }
    out
}

/// Increment trits in place by one, rolling over at the representational top.
pub fn increment_trits(trits: &mut [Trit]) {
    for t in trits.iter_mut() {
        *t += 1;
        if *t <= 1 {
            return;
        }
        *t = -1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_round_trip() {
        for v in [-364, -13, -1, 0, 1, 2, 13, 27, 364, 1_000_000, -1_000_000] {
            assert_eq!(trits_to_int(&int_to_trits(v)), v, "value {v}");
        }
    }

    #[test]
    fn int_to_trits_zero() {
        assert_eq!(int_to_trits(0), vec![0]);
    }

    #[test]
    fn trits_to_trytes_known() {
        // N is the most negative tryte (-13), M the most positive (13).
        assert_eq!(trits_to_trytes(&[-1, -1, -1]).unwrap(), "N");
        assert_eq!(trits_to_trytes(&[1, 1, 1]).unwrap(), "M");
        assert_eq!(trits_to_trytes(&[0, 0, 0]).unwrap(), "9");
        assert_eq!(trits_to_trytes(&[1, 0, 0]).unwrap(), "A");
    }

    #[test]
    fn trits_to_trytes_rejects_bad_length() {
        assert!(matches!(
            trits_to_trytes(&[0, 1]),
            Err(TernaryError::InvalidLength { .. })
        ));
    }

    #[test]
    fn trits_to_trytes_rejects_bad_trit() {
        assert_eq!(
            trits_to_trytes(&[0, 2, 0]),
            Err(TernaryError::InvalidTrit(2))
        );
    }

    #[test]
    fn add_trits_with_carry() {
        // 1 + 1 = 2 = (-1, 1) in balanced ternary.
        assert_eq!(add_trits(&[1, 0], &[1, 0]), vec![-1, 1]);
        // 13 + 1 = 14.
        let sum = add_trits(&int_to_trits(13), &int_to_trits(1));
        assert_eq!(trits_to_int(&sum), 14);
    }

    #[test]
    fn add_trits_negative_operand() {
        let sum = add_trits(&int_to_trits(100), &int_to_trits(-42));
        assert_eq!(trits_to_int(&sum), 58);
    }

    #[test]
    fn increment_matches_add_one() {
        let mut t = pad_trits(&int_to_trits(41), 9);
        increment_trits(&mut t);
        assert_eq!(trits_to_int(&t), 42);
    }

    #[test]
    fn trailing_zeros_counts_high_end() {
        assert_eq!(trailing_zeros(&[1, -1, 0, 0, 0]), 3);
        assert_eq!(trailing_zeros(&[0, 0]), 2);
        assert_eq!(trailing_zeros(&[0, 1]), 0);
    }
}
