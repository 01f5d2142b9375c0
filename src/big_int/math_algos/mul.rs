//! multiplication and squaring
use super::{
    actual_len,
    add::{add, add_self},
    shift::shl_one,
    trimmed,
};
use crate::{big_int::limbs::Limb, config::Thresholds, util::scratch};

/// `dst` = `lhs` * `rhs`
///
/// needs `lhs.len() >= rhs.len()`, `dst.len() == lhs.len() + rhs.len()` and `dst` to be zeroed
pub fn multiply<D: Limb>(lhs: &[D], rhs: &[D], dst: &mut [D]) {
    multiply_with(lhs, rhs, dst, &Thresholds::DEFAULT);
}
/// same as [`multiply`] with custom thresholds
pub fn multiply_with<D: Limb>(lhs: &[D], rhs: &[D], dst: &mut [D], cfg: &Thresholds) {
    assert!(lhs.len() >= rhs.len(), "lhs needs to be the longer number");
    assert_eq!(
        dst.len(),
        lhs.len() + rhs.len(),
        "dst needs room for both factors"
    );
    debug_assert!(dst.iter().all(|it| it.is_zero()), "dst needs to be zeroed");
    let threshold = cfg.multiply_threshold();
    if rhs.len() >= threshold {
        tracing::trace!(lhs = lhs.len(), rhs = rhs.len(), "karatsuba multiply");
    }
    multiply_rec(lhs, rhs, dst, threshold);
}
/// [`multiply_with`] for factors in any order
pub(crate) fn multiply_any_with<D: Limb>(a: &[D], b: &[D], dst: &mut [D], cfg: &Thresholds) {
    if a.len() >= b.len() {
        multiply_with(a, b, dst, cfg);
    } else {
        multiply_with(b, a, dst, cfg);
    }
}

fn multiply_ordered<D: Limb>(a: &[D], b: &[D], dst: &mut [D], threshold: usize) {
    if a.len() >= b.len() {
        multiply_rec(a, b, dst, threshold);
    } else {
        multiply_rec(b, a, dst, threshold);
    }
}

fn multiply_rec<D: Limb>(lhs: &[D], rhs: &[D], dst: &mut [D], threshold: usize) {
    debug_assert!(lhs.len() >= rhs.len());
    debug_assert_eq!(dst.len(), lhs.len() + rhs.len());
    if rhs.len() < threshold {
        schoolbook(lhs, rhs, dst);
        return;
    }
    let n = lhs.len().div_ceil(2);
    if rhs.len() <= n + 1 {
        multiply_unbalanced(lhs, rhs, dst, n, threshold);
    } else {
        karatsuba(lhs, rhs, dst, n, threshold);
    }
}

fn schoolbook<D: Limb>(lhs: &[D], rhs: &[D], dst: &mut [D]) {
    for (i, &factor) in rhs.iter().enumerate() {
        if factor.is_zero() {
            continue;
        }
        let mut carry = D::ZERO;
        for (slot, &digit) in dst[i..i + lhs.len()].iter_mut().zip(lhs) {
            (*slot, carry) = digit.mul_add_carry(factor, *slot, carry);
        }
        dst[i + lhs.len()] = carry;
    }
}

/// `rhs` fits into the lower half of `lhs` plus one limb, so only `lhs` is split
fn multiply_unbalanced<D: Limb>(lhs: &[D], rhs: &[D], dst: &mut [D], n: usize, threshold: usize) {
    let (low, high) = lhs.split_at(n);
    let overlap = n..n + rhs.len();
    multiply_ordered(low, rhs, &mut dst[..overlap.end], threshold);

    let saved = scratch::acquire_copy(&dst[overlap.clone()]);
    dst[overlap].fill(D::ZERO);
    multiply_ordered(high, rhs, &mut dst[n..], threshold);
    add_self(&mut dst[n..], trimmed(&saved));
}

/// (a1*B^n + a0) * (b1*B^n + b0) = z2*B^2n + z1*B^n + z0
/// with z1 = (a0 + a1)(b0 + b1) - z2 - z0
fn karatsuba<D: Limb>(lhs: &[D], rhs: &[D], dst: &mut [D], n: usize, threshold: usize) {
    let (lhs_low, lhs_high) = lhs.split_at(n);
    let (rhs_low, rhs_high) = rhs.split_at(n);
    {
        let (z0, z2) = dst.split_at_mut(2 * n);
        multiply_rec(lhs_low, rhs_low, z0, threshold);
        multiply_rec(lhs_high, rhs_high, z2, threshold);
    }

    let mut lhs_fold = scratch::acquire::<D>(n + 1);
    let mut rhs_fold = scratch::acquire::<D>(n + 1);
    add(lhs_low, lhs_high, &mut lhs_fold);
    add(rhs_low, rhs_high, &mut rhs_fold);
    let (lhs_fold, rhs_fold) = (trimmed(&lhs_fold), trimmed(&rhs_fold));

    let mut z1 = scratch::acquire::<D>(2 * n + 2);
    multiply_ordered(
        lhs_fold,
        rhs_fold,
        &mut z1[..lhs_fold.len() + rhs_fold.len()],
        threshold,
    );
    let (z0, z2) = dst.split_at(2 * n);
    subtract_core(z0, z2, &mut z1);

    let len = actual_len(&z1);
    add_self(&mut dst[n..], &z1[..len]);
}

/// `core` -= `longer` + `shorter` in one pass, the running borrow never exceeds 2
fn subtract_core<D: Limb>(longer: &[D], shorter: &[D], core: &mut [D]) {
    debug_assert!(longer.len() >= shorter.len());
    debug_assert!(core.len() >= longer.len());
    let mut borrow = 0u8;
    for (i, slot) in core.iter_mut().enumerate() {
        if i >= longer.len() && borrow == 0 {
            break;
        }
        let (value, borrow_1) = slot.overflowing_sub(longer.get(i).copied().unwrap_or(D::ZERO));
        let (value, borrow_2) = value.overflowing_sub(shorter.get(i).copied().unwrap_or(D::ZERO));
        let (value, borrow_3) = value.overflowing_sub(D::from(borrow));
        *slot = value;
        borrow = u8::from(borrow_1) + u8::from(borrow_2) + u8::from(borrow_3);
    }
    assert_eq!(borrow, 0, "core was smaller than the subtracted parts");
}

/// `dst` = `value`^2
///
/// needs `dst.len() == 2 * value.len()` and `dst` to be zeroed
pub fn square<D: Limb>(value: &[D], dst: &mut [D]) {
    square_with(value, dst, &Thresholds::DEFAULT);
}
/// same as [`square`] with custom thresholds
pub fn square_with<D: Limb>(value: &[D], dst: &mut [D], cfg: &Thresholds) {
    assert_eq!(
        dst.len(),
        2 * value.len(),
        "dst needs twice the limbs of value"
    );
    debug_assert!(dst.iter().all(|it| it.is_zero()), "dst needs to be zeroed");
    let threshold = cfg.square_threshold();
    if value.len() >= threshold {
        tracing::trace!(len = value.len(), "karatsuba square");
    }
    square_rec(value, dst, threshold);
}

fn square_rec<D: Limb>(value: &[D], dst: &mut [D], threshold: usize) {
    if value.len() < threshold {
        schoolbook_square(value, dst);
        return;
    }
    let n = value.len() / 2;
    let (low, high) = value.split_at(n);
    {
        let (dst_low, dst_high) = dst.split_at_mut(2 * n);
        square_rec(low, dst_low, threshold);
        square_rec(high, dst_high, threshold);
    }

    let mut fold = scratch::acquire::<D>(high.len() + 1);
    add(high, low, &mut fold);
    let fold = trimmed(&fold);
    let mut core = scratch::acquire::<D>(2 * high.len() + 2);
    square_rec(fold, &mut core[..2 * fold.len()], threshold);

    let (dst_low, dst_high) = dst.split_at(2 * n);
    subtract_core(dst_high, dst_low, &mut core);
    let len = actual_len(&core);
    add_self(&mut dst[n..], &core[..len]);
}

fn schoolbook_square<D: Limb>(value: &[D], dst: &mut [D]) {
    // every cross product once
    for (i, &factor) in value.iter().enumerate() {
        if factor.is_zero() {
            continue;
        }
        let mut carry = D::ZERO;
        for (j, &digit) in value.iter().enumerate().skip(i + 1) {
            (dst[i + j], carry) = digit.mul_add_carry(factor, dst[i + j], carry);
        }
        dst[i + value.len()] = carry;
    }
    let out = shl_one(dst);
    debug_assert!(out.is_zero(), "doubled cross products overflowed");

    let mut carry = false;
    for (i, &digit) in value.iter().enumerate() {
        let (low, high) = digit.mul_add_carry(digit, D::ZERO, D::ZERO);
        (dst[2 * i], carry) = dst[2 * i].add_carry(low, carry);
        (dst[2 * i + 1], carry) = dst[2 * i + 1].add_carry(high, carry);
    }
    assert!(!carry, "square didn't fit into dst");
}

/// `limbs` = `limbs` * `factor` + `add`, returns the carry limb
pub fn mul_limb_add_self<D: Limb>(limbs: &mut [D], factor: D, add: D) -> D {
    let mut carry = add;
    for digit in limbs {
        (*digit, carry) = digit.mul_add_carry(factor, D::ZERO, carry);
    }
    carry
}
