//! Fixed-width unsigned limb arithmetic.
//!
//! Numbers are slices of u32 limbs, least-significant limb first. The
//! operations are exactly the handful the ternary/binary bridge and the
//! key-index increment need: ripple-carry add, complement-based subtract,
//! small-scalar add and most-significant-first compare. Nothing here
//! allocates.

use std::cmp::Ordering;

/// Add two limbs and a carry, returning the wrapped sum and carry out.
pub fn full_add(lh: u32, rh: u32, carry: bool) -> (u32, bool) {
    let (v, c1) = lh.overflowing_add(rh);
    let (v, c2) = v.overflowing_add(carry as u32);
    (v, c1 || c2)
}

/// In-place ripple-carry addition. Both operands must have the same limb
/// count; the final carry out wraps silently.
///
/// # Panics
/// Panics if the operands differ in length (programming error, not input).
pub fn add(lh: &mut [u32], rh: &[u32]) {
    assert_eq!(lh.len(), rh.len(), "add is not defined for differing limb counts");

    let mut carry = false;
    for (l, r) in lh.iter_mut().zip(rh) {
        let (v, c) = full_add(*l, *r, carry);
        *l = v;
        carry = c;
    }
}

/// In-place subtraction via addition of the bitwise complement plus one.
///
/// Precondition: `lh >= rh`. A borrow out of the top limb means an internal
/// invariant was violated upstream; it is a debug assertion, not an error.
pub fn sub(lh: &mut [u32], rh: &[u32]) {
    assert_eq!(lh.len(), rh.len(), "sub is not defined for differing limb counts");

    let mut no_borrow = true;
    for (l, r) in lh.iter_mut().zip(rh) {
        let (v, c) = full_add(*l, !*r, no_borrow);
        *l = v;
        no_borrow = c;
    }
    debug_assert!(no_borrow, "sub underflowed: lh < rh");
}

/// Bitwise complement of every limb.
pub fn not(b: &mut [u32]) {
    for limb in b {
        *limb = !*limb;
    }
}

/// True if every limb is zero.
pub fn is_null(b: &[u32]) -> bool {
    b.iter().all(|limb| *limb == 0)
}

/// Compare two equal-length numbers, scanning from the most significant limb.
///
/// # Panics
/// Panics if the operands differ in length.
pub fn cmp(lh: &[u32], rh: &[u32]) -> Ordering {
    assert_eq!(lh.len(), rh.len(), "cmp is not defined for differing limb counts");

    for (l, r) in lh.iter().rev().zip(rh.iter().rev()) {
        match l.cmp(r) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

/// Add a single-limb scalar, propagating the carry upward. Returns the index
/// past the last limb touched.
pub fn add_small(b: &mut [u32], a: u32) -> usize {
    let (v, mut carry) = full_add(b[0], a, false);
    b[0] = v;

    let mut i = 1;
    while carry {
        let (v, c) = full_add(b[i], 0, carry);
        b[i] = v;
        carry = c;
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_ripples_carry() {
        let mut a = [u32::MAX, 0, 0];
        add(&mut a, &[1, 0, 0]);
        assert_eq!(a, [0, 1, 0]);
    }

    #[test]
    fn add_wraps_top_carry() {
        let mut a = [u32::MAX, u32::MAX];
        add(&mut a, &[1, 0]);
        assert_eq!(a, [0, 0]);
    }

    #[test]
    fn sub_borrows_across_limbs() {
        let mut a = [0, 1];
        sub(&mut a, &[1, 0]);
        assert_eq!(a, [u32::MAX, 0]);
    }

    #[test]
    fn sub_to_zero() {
        let mut a = [7, 9];
        sub(&mut a, &[7, 9]);
        assert!(is_null(&a));
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn sub_underflow_asserts() {
        let mut a = [0, 0];
        sub(&mut a, &[1, 0]);
    }

    #[test]
    fn add_small_reports_limbs_touched() {
        let mut a = [u32::MAX, u32::MAX, 5, 0];
        let touched = add_small(&mut a, 1);
        assert_eq!(a, [0, 0, 6, 0]);
        assert_eq!(touched, 3);

        let mut b = [3, 0];
        assert_eq!(add_small(&mut b, 4), 1);
        assert_eq!(b, [7, 0]);
    }

    #[test]
    fn cmp_is_most_significant_first() {
        assert_eq!(cmp(&[9, 1], &[0, 2]), Ordering::Less);
        assert_eq!(cmp(&[9, 2], &[0, 2]), Ordering::Greater);
        assert_eq!(cmp(&[5, 5], &[5, 5]), Ordering::Equal);
    }

    #[test]
    fn not_flips_all_bits() {
        let mut a = [0u32, u32::MAX];
        not(&mut a);
        assert_eq!(a, [u32::MAX, 0]);
    }
}
