//! division with remainder
use super::{
    add::add_assign,
    trimmed,
};
use crate::{
    big_int::limbs::{Limb, Wide},
    config::Thresholds,
    util::scratch,
};

pub mod burnikel_ziegler;

pub use burnikel_ziegler::Corrections;

/// `quotient` = `lhs` / `rhs` and `remainder` = `lhs` % `rhs`
///
/// `rhs` needs a non zero top limb and at most as many limbs as `lhs`.
/// `quotient.len() == lhs.len() - rhs.len() + 1` and `remainder.len() == rhs.len()`
pub fn div_rem<D: Limb>(lhs: &[D], rhs: &[D], quotient: &mut [D], remainder: &mut [D]) {
    div_rem_with(lhs, rhs, quotient, remainder, &Thresholds::DEFAULT);
}
/// same as [`div_rem`] with custom thresholds
pub fn div_rem_with<D: Limb>(
    lhs: &[D],
    rhs: &[D],
    quotient: &mut [D],
    remainder: &mut [D],
    cfg: &Thresholds,
) {
    check_quotient(lhs, rhs, quotient);
    check_remainder(rhs, remainder);
    let _ = dispatch(lhs, rhs, quotient, remainder, cfg);
}

/// `quotient` = `lhs` / `rhs`, see [`div_rem`]
pub fn divide<D: Limb>(lhs: &[D], rhs: &[D], quotient: &mut [D]) {
    divide_with(lhs, rhs, quotient, &Thresholds::DEFAULT);
}
/// same as [`divide`] with custom thresholds
pub fn divide_with<D: Limb>(lhs: &[D], rhs: &[D], quotient: &mut [D], cfg: &Thresholds) {
    check_quotient(lhs, rhs, quotient);
    let _ = dispatch(lhs, rhs, quotient, &mut [], cfg);
}

/// `remainder` = `lhs` % `rhs`, see [`div_rem`]
pub fn remainder<D: Limb>(lhs: &[D], rhs: &[D], remainder: &mut [D]) {
    remainder_with(lhs, rhs, remainder, &Thresholds::DEFAULT);
}
/// same as [`remainder`] with custom thresholds
pub fn remainder_with<D: Limb>(lhs: &[D], rhs: &[D], remainder: &mut [D], cfg: &Thresholds) {
    assert!(lhs.len() >= rhs.len(), "lhs needs at least as many limbs as rhs");
    check_remainder(rhs, remainder);
    let _ = dispatch(lhs, rhs, &mut [], remainder, cfg);
}

fn check_quotient<D: Limb>(lhs: &[D], rhs: &[D], quotient: &[D]) {
    assert!(
        rhs.last().is_some_and(|it| !it.is_zero()),
        "can't divide by zero or an untrimmed divisor"
    );
    assert!(lhs.len() >= rhs.len(), "lhs needs at least as many limbs as rhs");
    assert_eq!(
        quotient.len(),
        lhs.len() - rhs.len() + 1,
        "quotient needs lhs.len() - rhs.len() + 1 limbs"
    );
}
fn check_remainder<D: Limb>(rhs: &[D], remainder: &[D]) {
    assert!(
        rhs.last().is_some_and(|it| !it.is_zero()),
        "can't divide by zero or an untrimmed divisor"
    );
    assert_eq!(remainder.len(), rhs.len(), "remainder needs rhs.len() limbs");
}

/// picks the algorithm, `quotient` and `remainder` may be empty when they aren't needed
pub(crate) fn dispatch<D: Limb>(
    lhs: &[D],
    rhs: &[D],
    quotient: &mut [D],
    remainder: &mut [D],
    cfg: &Thresholds,
) -> Corrections {
    let lhs = trimmed(lhs);
    if lhs.len() < rhs.len() {
        quotient.fill(D::ZERO);
        if !remainder.is_empty() {
            remainder[..lhs.len()].copy_from_slice(lhs);
            remainder[lhs.len()..].fill(D::ZERO);
        }
        return Corrections::default();
    }
    let quotient = if quotient.is_empty() {
        quotient
    } else {
        let (used, unused) = quotient.split_at_mut(lhs.len() - rhs.len() + 1);
        unused.fill(D::ZERO);
        used
    };

    if rhs.len() == 1 {
        let rem = if quotient.is_empty() {
            rem_limb(lhs, rhs[0])
        } else {
            div_rem_limb(lhs, rhs[0], quotient)
        };
        if let Some(slot) = remainder.first_mut() {
            *slot = rem;
        }
        return Corrections::default();
    }

    let threshold = cfg.divide_threshold();
    if rhs.len() < threshold || lhs.len() - rhs.len() < threshold {
        let mut work = scratch::acquire_copy(lhs);
        let estimate_rounds = grammar_school(&mut work, rhs, quotient);
        if !remainder.is_empty() {
            remainder.copy_from_slice(&work[..rhs.len()]);
        }
        Corrections {
            estimate_rounds,
            ..Corrections::default()
        }
    } else {
        tracing::trace!(lhs = lhs.len(), rhs = rhs.len(), threshold, "burnikel-ziegler division");
        burnikel_ziegler::divide(lhs, rhs, quotient, remainder, cfg)
    }
}

/// `quotient` = `lhs` / `divisor`, returns the remainder
///
/// needs `quotient.len() == lhs.len()`
pub fn div_rem_limb<D: Limb>(lhs: &[D], divisor: D, quotient: &mut [D]) -> D {
    assert!(!divisor.is_zero(), "can't divide by zero");
    assert_eq!(quotient.len(), lhs.len(), "quotient needs as many limbs as lhs");
    let divisor = D::Wide::widen(divisor);
    let mut carry = D::ZERO;
    for (slot, &digit) in quotient.iter_mut().zip(lhs).rev() {
        let value = D::Wide::new(digit, carry);
        let digit = value / divisor;
        *slot = digit.lower();
        carry = (value - digit * divisor).lower();
    }
    carry
}
/// `limbs` /= `divisor`, returns the remainder
pub fn div_rem_limb_self<D: Limb>(limbs: &mut [D], divisor: D) -> D {
    assert!(!divisor.is_zero(), "can't divide by zero");
    let divisor = D::Wide::widen(divisor);
    let mut carry = D::ZERO;
    for slot in limbs.iter_mut().rev() {
        let value = D::Wide::new(*slot, carry);
        let digit = value / divisor;
        *slot = digit.lower();
        carry = (value - digit * divisor).lower();
    }
    carry
}
fn rem_limb<D: Limb>(lhs: &[D], divisor: D) -> D {
    let divisor = D::Wide::widen(divisor);
    lhs.iter().rev().fold(D::ZERO, |carry, &digit| {
        (D::Wide::new(digit, carry) % divisor).lower()
    })
}

/// Schoolbook long division, `left` is replaced by the remainder and `quotient` receives the digits.
///
/// Needs `right.len() >= 2`. `quotient` may be shorter than `left.len() - right.len() + 1`
/// (even empty), digits that don't fit into it are dropped.
/// Returns the most decrements a single digit estimate needed, never more than 2.
pub(crate) fn grammar_school<D: Limb>(left: &mut [D], right: &[D], quotient: &mut [D]) -> usize {
    let n = right.len();
    debug_assert!(n >= 2, "single limb divisors have their own path");
    debug_assert!(left.len() >= n);

    // the top two limbs of the divisor, normalized so the top bit is set
    let shift = right[n - 1].leading_zeros();
    let div_hi = right[n - 1].shl_with(right[n - 2], shift);
    let div_lo = right[n - 2].shl_with(if n > 2 { right[n - 3] } else { D::ZERO }, shift);

    let mut max_rounds = 0;
    for i in (n..=left.len()).rev() {
        let pos = i - n;
        let top = left.get(i).copied().unwrap_or(D::ZERO);

        // the matching window of the dividend, normalized the same way
        let l1 = left[i - 1];
        let l2 = left[i - 2];
        let l3 = if i > 2 { left[i - 3] } else { D::ZERO };
        let val_hi = D::Wide::new(l1.shl_with(l2, shift), top.shl_with(l1, shift));
        let val_lo = l2.shl_with(l3, shift);

        let mut digit = estimate(val_hi, div_hi);
        let mut rounds = 0;
        while guess_too_big(digit, val_hi, val_lo, div_hi, div_lo) {
            digit = digit.overflowing_sub(D::ONE).0;
            rounds += 1;
        }
        debug_assert!(rounds <= 2, "digit estimate was {rounds} too big");
        max_rounds = max_rounds.max(rounds);

        if !digit.is_zero() {
            let window = &mut left[pos..pos + n];
            let carry = subtract_divisor(window, right, digit);
            if carry != top {
                debug_assert_eq!(carry, top.overflowing_add(D::ONE).0, "digit was more than one too big");
                let overflow = add_assign(window, right);
                debug_assert!(overflow, "adding back didn't cancel the borrow");
                digit = digit.overflowing_sub(D::ONE).0;
            }
        }
        if let Some(slot) = quotient.get_mut(pos) {
            *slot = digit;
        }
        if let Some(slot) = left.get_mut(i) {
            *slot = D::ZERO;
        }
    }
    max_rounds
}

/// (`val_hi` / `div_hi`), saturated to a single limb
fn estimate<D: Limb>(val_hi: D::Wide, div_hi: D) -> D {
    let digit = val_hi / D::Wide::widen(div_hi);
    if digit > D::Wide::widen(D::MAX) {
        D::MAX
    } else {
        digit.lower()
    }
}

/// checks if `digit` * (`div_hi`, `div_lo`) > (`val_hi`, `val_lo`)
fn guess_too_big<D: Limb>(digit: D, val_hi: D::Wide, val_lo: D, div_hi: D, div_lo: D) -> bool {
    let digit_wide = D::Wide::widen(digit);
    let (chk_lo, carry) = (D::Wide::widen(div_lo) * digit_wide).split_le();
    let chk_hi = D::Wide::widen(div_hi) * digit_wide + D::Wide::widen(carry);
    match chk_hi.cmp(&val_hi) {
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Equal => chk_lo > val_lo,
    }
}

/// `left` -= `right` * `digit`, returns the limb that would have to be borrowed from above
fn subtract_divisor<D: Limb>(left: &mut [D], right: &[D], digit: D) -> D {
    let mut carry = D::ZERO;
    for (slot, &divisor) in left.iter_mut().zip(right) {
        let (low, high) = divisor.mul_add_carry(digit, D::ZERO, carry);
        let (value, borrow) = slot.overflowing_sub(low);
        *slot = value;
        carry = high.overflowing_add(D::from(borrow)).0;
    }
    carry
}
