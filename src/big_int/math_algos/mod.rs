//! Algorithms on little endian limb slices.
//!
//! Nothing in here allocates the result, every destination is handed in with its exact length.
//! Temporary space comes from [`crate::util::scratch`].
#![allow(clippy::wildcard_imports)]
use std::cmp::Ordering;

use super::limbs::Limb;

pub mod div;
pub mod mul;

pub use add::{add, add_limb_self, add_self};
pub use div::{div_rem, div_rem_limb, div_rem_with, divide, divide_with, remainder, remainder_with};
pub use mul::{mul_limb_add_self, multiply, multiply_with, square, square_with};
pub use sub::{sub, sub_self};

/// number of limbs without the leading zeros
pub fn actual_len<D: Limb>(limbs: &[D]) -> usize {
    limbs.iter().rposition(|it| !it.is_zero()).map_or(0, |i| i + 1)
}
/// `limbs` without its leading zeros
pub fn trimmed<D: Limb>(limbs: &[D]) -> &[D] {
    &limbs[..actual_len(limbs)]
}

/// compares two magnitudes, leading zero limbs are ignored
pub fn compare<D: Limb>(lhs: &[D], rhs: &[D]) -> Ordering {
    let (lhs, rhs) = (trimmed(lhs), trimmed(rhs));
    lhs.len()
        .cmp(&rhs.len())
        .then_with(|| lhs.iter().rev().cmp(rhs.iter().rev()))
}

pub mod add {
    use super::*;

    /// `dst` = `lhs` + `rhs`
    ///
    /// needs `lhs.len() >= rhs.len()` and `dst.len() == lhs.len() + 1`
    pub fn add<D: Limb>(lhs: &[D], rhs: &[D], dst: &mut [D]) {
        assert!(lhs.len() >= rhs.len(), "lhs needs to be the longer number");
        assert_eq!(
            dst.len(),
            lhs.len() + 1,
            "dst needs exactly one limb more than lhs"
        );
        let mut carry = false;
        for (i, (&lhs, &rhs)) in lhs.iter().zip(rhs).enumerate() {
            (dst[i], carry) = lhs.add_carry(rhs, carry);
        }
        let (tail, top) = dst[rhs.len()..].split_at_mut(lhs.len() - rhs.len());
        top[0] = D::from(carry_into(&lhs[rhs.len()..], tail, carry));
    }

    /// copies `src` into `dst` and adds `carry`, the addition stops as soon as the carry is absorbed
    fn carry_into<D: Limb>(src: &[D], dst: &mut [D], mut carry: bool) -> bool {
        let mut i = 0;
        while carry && i < src.len() {
            (dst[i], carry) = src[i].overflowing_add(D::ONE);
            i += 1;
        }
        dst[i..].copy_from_slice(&src[i..]);
        carry
    }

    /// `lhs` += `rhs`, returns the carry out of `lhs`
    pub fn add_assign<D: Limb>(lhs: &mut [D], rhs: &[D]) -> bool {
        assert!(lhs.len() >= rhs.len(), "lhs needs to be the longer number");
        let (low, high) = lhs.split_at_mut(rhs.len());
        let mut carry = false;
        for (digit, &rhs) in low.iter_mut().zip(rhs) {
            (*digit, carry) = digit.add_carry(rhs, carry);
        }
        for digit in high {
            if !carry {
                break;
            }
            (*digit, carry) = digit.overflowing_add(D::ONE);
        }
        carry
    }

    /// `lhs` += `rhs`, the sum has to fit into `lhs`
    pub fn add_self<D: Limb>(lhs: &mut [D], rhs: &[D]) {
        let carry = add_assign(lhs, rhs);
        assert!(!carry, "sum didn't fit into lhs");
    }

    /// `lhs` += `value`, returns the carry out of `lhs`
    pub fn add_limb_self<D: Limb>(lhs: &mut [D], value: D) -> bool {
        let mut carry = value;
        for digit in lhs {
            if carry.is_zero() {
                return false;
            }
            let (sum, overflow) = digit.overflowing_add(carry);
            *digit = sum;
            carry = D::from(overflow);
        }
        !carry.is_zero()
    }
}

pub mod sub {
    use super::*;

    /// `dst` = `lhs` - `rhs`
    ///
    /// needs `lhs >= rhs`, `lhs.len() >= rhs.len()` and `dst.len() == lhs.len()`
    pub fn sub<D: Limb>(lhs: &[D], rhs: &[D], dst: &mut [D]) {
        assert!(lhs.len() >= rhs.len(), "lhs needs to be the longer number");
        assert_eq!(dst.len(), lhs.len(), "dst needs as many limbs as lhs");
        let mut borrow = false;
        for (i, (&lhs, &rhs)) in lhs.iter().zip(rhs).enumerate() {
            (dst[i], borrow) = lhs.sub_borrow(rhs, borrow);
        }
        let mut i = rhs.len();
        while borrow && i < lhs.len() {
            (dst[i], borrow) = lhs[i].overflowing_sub(D::ONE);
            i += 1;
        }
        assert!(!borrow, "lhs is smaller than rhs");
        dst[i..].copy_from_slice(&lhs[i..]);
    }

    /// `lhs` -= `rhs`, returns the borrow out of `lhs`
    pub fn sub_assign<D: Limb>(lhs: &mut [D], rhs: &[D]) -> bool {
        assert!(lhs.len() >= rhs.len(), "lhs needs to be the longer number");
        let (low, high) = lhs.split_at_mut(rhs.len());
        let mut borrow = false;
        for (digit, &rhs) in low.iter_mut().zip(rhs) {
            (*digit, borrow) = digit.sub_borrow(rhs, borrow);
        }
        for digit in high {
            if !borrow {
                break;
            }
            (*digit, borrow) = digit.overflowing_sub(D::ONE);
        }
        borrow
    }

    /// `lhs` -= `rhs`, needs `lhs >= rhs`
    pub fn sub_self<D: Limb>(lhs: &mut [D], rhs: &[D]) {
        let borrow = sub_assign(lhs, rhs);
        assert!(!borrow, "lhs is smaller than rhs");
    }
}

pub(crate) mod shift {
    use super::*;

    /// `dst` = `src` << `shift`, returns the bits pushed out of the top limb.
    /// needs `dst.len() == src.len()`
    pub fn shl_into<D: Limb>(src: &[D], shift: u32, dst: &mut [D]) -> D {
        assert_eq!(dst.len(), src.len(), "shifts keep the length");
        let mut lower = D::ZERO;
        for (slot, &digit) in dst.iter_mut().zip(src) {
            *slot = digit.shl_with(lower, shift);
            lower = digit;
        }
        D::ZERO.shl_with(lower, shift)
    }

    /// `dst` = `src` >> `shift`, the shifted out bits are expected to be zero.
    /// needs `dst.len() == src.len()`
    pub fn shr_into<D: Limb>(src: &[D], shift: u32, dst: &mut [D]) {
        assert_eq!(dst.len(), src.len(), "shifts keep the length");
        debug_assert!(
            src.first()
                .map_or(true, |it| D::ZERO.shr_with(*it, shift).is_zero()),
            "shifted out set bits"
        );
        let mut upper = D::ZERO;
        for (slot, &digit) in dst.iter_mut().zip(src).rev() {
            *slot = digit.shr_with(upper, shift);
            upper = digit;
        }
    }

    /// `limbs` <<= 1, returns the bit pushed out
    pub fn shl_one<D: Limb>(limbs: &mut [D]) -> D {
        let mut lower = D::ZERO;
        for digit in limbs {
            let next = *digit;
            *digit = digit.shl_with(lower, 1);
            lower = next;
        }
        D::ZERO.shl_with(lower, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimming() {
        assert_eq!(actual_len::<u32>(&[]), 0);
        assert_eq!(actual_len(&[0u32, 0]), 0);
        assert_eq!(trimmed(&[1u64, 0, 2, 0, 0]), &[1, 0, 2]);
    }

    #[test]
    fn compare_ignores_leading_zeros() {
        assert_eq!(compare(&[1u32, 2, 0], &[1, 2]), Ordering::Equal);
        assert_eq!(compare(&[5u32, 1], &[u32::MAX]), Ordering::Greater);
        assert_eq!(compare(&[5u32, 1], &[6, 1]), Ordering::Less);
        assert_eq!(compare::<u64>(&[], &[0]), Ordering::Equal);
        assert_eq!(compare(&[0u64, 0, 1], &[u64::MAX, u64::MAX]), Ordering::Greater);
    }

    mod t_add {
        use super::*;

        #[test]
        fn carry_stops_in_tail() {
            let mut dst = [0; 5];
            add(&[u32::MAX, u32::MAX, 7, 9], &[1], &mut dst);
            assert_eq!(dst, [0, 0, 8, 9, 0]);
        }
        #[test]
        fn carry_out() {
            let mut dst = [0; 3];
            add(&[u32::MAX, u32::MAX], &[1, 0], &mut dst);
            assert_eq!(dst, [0, 0, 1]);
        }
        #[test]
        fn in_place() {
            let mut lhs = [u64::MAX, 3, 0];
            add_self(&mut lhs, &[2, u64::MAX]);
            assert_eq!(lhs, [1, 3, 1]);
        }
        #[test]
        #[should_panic(expected = "sum didn't fit into lhs")]
        fn in_place_overflow() {
            let mut lhs = [u32::MAX, u32::MAX];
            add_self(&mut lhs, &[1]);
        }
        #[test]
        #[should_panic(expected = "one limb more")]
        fn wrong_dst() {
            let mut dst = [0; 2];
            add(&[1u32, 2], &[1], &mut dst);
        }
        #[test]
        fn single_limb() {
            let mut lhs = [u32::MAX, u32::MAX, 4];
            assert!(!add_limb_self(&mut lhs, 3));
            assert_eq!(lhs, [2, 0, 5]);
            let mut lhs = [u32::MAX];
            assert!(add_limb_self(&mut lhs, 1));
            assert_eq!(lhs, [0]);
        }
    }

    mod t_sub {
        use super::*;

        #[test]
        fn borrow_stops_in_tail() {
            let mut dst = [0; 4];
            sub(&[0u32, 0, 7, 9], &[1], &mut dst);
            assert_eq!(dst, [u32::MAX, u32::MAX, 6, 9]);
        }
        #[test]
        fn in_place() {
            let mut lhs = [1u64, 3, 1];
            sub_self(&mut lhs, &[2, u64::MAX]);
            assert_eq!(lhs, [u64::MAX, 3, 0]);
        }
        #[test]
        #[should_panic(expected = "lhs is smaller than rhs")]
        fn negative() {
            let mut dst = [0; 2];
            sub(&[1u32, 2], &[2, 2], &mut dst);
        }
        #[test]
        #[should_panic(expected = "lhs is smaller than rhs")]
        fn negative_in_place() {
            let mut lhs = [0u32, 1];
            sub_self(&mut lhs, &[1, 1]);
        }
    }

    mod t_shift {
        use super::{shift::*, *};

        #[test]
        fn left() {
            let mut dst = [0; 2];
            let out = shl_into(&[0x8000_0001u32, 0xf000_0000], 4, &mut dst);
            assert_eq!(dst, [0x0000_0010, 0x0000_0008]);
            assert_eq!(out, 0xf);
        }
        #[test]
        fn right() {
            let mut dst = [0; 2];
            shr_into(&[0x0000_0010u32, 0x0000_0008], 4, &mut dst);
            assert_eq!(dst, [0x8000_0001, 0]);
        }
        #[test]
        fn by_one() {
            let mut limbs = [0x8000_0001u32, 0xc000_0000];
            assert_eq!(shl_one(&mut limbs), 1);
            assert_eq!(limbs, [0x2, 0x8000_0001]);
        }
    }
}
