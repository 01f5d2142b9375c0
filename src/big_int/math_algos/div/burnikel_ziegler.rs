//! Recursive division by Burnikel and Ziegler, "Fast Recursive Division" (1998).
//!
//! The divisor is split into blocks of `n` limbs, `n` being the threshold times a power of two,
//! so halving it keeps hitting whole limbs until the blocks get small enough for schoolbook division.
use super::{super::mul::multiply_any_with, grammar_school};
use crate::{
    big_int::{
        limbs::{Limb, Wide},
        math_algos::{
            add::{add, add_self},
            compare,
            shift::{shl_into, shr_into},
            sub::sub_self,
            trimmed,
        },
    },
    config::Thresholds,
    util::scratch,
};

/// how often the remainder estimate of a `3n/2n` step had to be corrected
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Corrections {
    /// number of `3n/2n` steps
    pub steps: usize,
    /// the most rounds a single step needed
    pub max_rounds: usize,
    /// rounds over all steps
    pub total_rounds: usize,
    /// steps that estimated the quotient block as all ones
    pub saturated: usize,
    /// the most decrements a schoolbook digit estimate needed
    pub estimate_rounds: usize,
}
impl Corrections {
    fn record(&mut self, rounds: usize, saturated: bool) {
        self.steps += 1;
        self.saturated += usize::from(saturated);
        self.max_rounds = self.max_rounds.max(rounds);
        self.total_rounds += rounds;
    }
    fn record_estimate(&mut self, rounds: usize) {
        self.estimate_rounds = self.estimate_rounds.max(rounds);
    }
}

/// needs `left` trimmed, `right.len() >= divide threshold` and `left.len() - right.len() >= divide threshold`.
/// `quotient` is empty or has exactly `left.len() - right.len() + 1` limbs, `remainder` is empty or has `right.len()`
pub(crate) fn divide<D: Limb>(
    left: &[D],
    right: &[D],
    quotient: &mut [D],
    remainder: &mut [D],
    cfg: &Thresholds,
) -> Corrections {
    let threshold = cfg.divide_threshold();
    let mut corrections = Corrections::default();

    // block size, a multiple of a power of two close to the divisor length
    let m = (right.len() / threshold + 1).next_power_of_two();
    let n = right.len().div_ceil(m) * m;
    let sigma_limbs = n - right.len();
    let sigma_bits = right[right.len() - 1].leading_zeros();

    // normalize, so the divisor fills exactly n limbs with the top bit set
    let mut b = scratch::acquire::<D>(n);
    let out = shl_into(right, sigma_bits, &mut b[sigma_limbs..]);
    debug_assert!(out.is_zero(), "normalized divisor grew");

    let mut a_len = left.len() + sigma_limbs;
    if left[left.len() - 1].leading_zeros() <= sigma_bits {
        a_len += 1;
    }
    let t = a_len.div_ceil(n).max(2);
    let mut a = scratch::acquire::<D>(t * n);
    let out = shl_into(left, sigma_bits, &mut a[sigma_limbs..sigma_limbs + left.len()]);
    if !out.is_zero() {
        a[sigma_limbs + left.len()] = out;
    }

    // the top block pair is divided first, the remainder then moves down block by block
    let mut z = scratch::acquire_copy(&a[(t - 2) * n..t * n]);
    let mut r = scratch::acquire::<D>(n + 1);
    let mut spare = scratch::acquire::<D>(n);

    let upper = (t - 2) * n;
    if quotient.len() >= upper + n {
        d2n1n(&z, &b, &mut quotient[upper..upper + n], &mut r, cfg, &mut corrections);
        quotient[upper + n..].fill(D::ZERO);
    } else {
        d2n1n(&z, &b, &mut spare, &mut r, cfg, &mut corrections);
        if quotient.len() > upper {
            let len = quotient.len() - upper;
            debug_assert!(spare[len..].iter().all(|it| it.is_zero()), "quotient didn't fit");
            quotient[upper..].copy_from_slice(&spare[..len]);
        }
    }

    for i in (0..t - 2).rev() {
        debug_assert!(r[n].is_zero(), "remainder exceeded the divisor");
        z[n..].copy_from_slice(&r[..n]);
        z[..n].copy_from_slice(&a[i * n..(i + 1) * n]);
        r.fill(D::ZERO);
        let q_block = if quotient.is_empty() {
            &mut spare[..]
        } else {
            &mut quotient[i * n..(i + 1) * n]
        };
        q_block.fill(D::ZERO);
        d2n1n(&z, &b, q_block, &mut r, cfg, &mut corrections);
    }

    if !remainder.is_empty() {
        debug_assert!(
            r[..sigma_limbs].iter().all(|it| it.is_zero()),
            "normalized remainder lost its trailing zero limbs"
        );
        shr_into(&r[sigma_limbs..n], sigma_bits, remainder);
    }
    if corrections.max_rounds > 0 || corrections.estimate_rounds > 0 {
        tracing::trace!(?corrections, "corrected 3n/2n remainders");
    }
    corrections
}

/// divides a `2n` limb `left` by the `n` limb `right`, needs `left < right * B^n`.
/// `quotient` gets `n` limbs, `remainder` `n + 1` (the top one stays zero)
fn d2n1n<D: Limb>(
    left: &[D],
    right: &[D],
    quotient: &mut [D],
    remainder: &mut [D],
    cfg: &Thresholds,
    corrections: &mut Corrections,
) {
    let n = right.len();
    debug_assert_eq!(left.len(), 2 * n);
    debug_assert_eq!(quotient.len(), n);
    debug_assert_eq!(remainder.len(), n + 1);

    if n % 2 == 1 || n < cfg.divide_threshold() {
        fallback(left, right, quotient, remainder, corrections);
        return;
    }
    let half = n / 2;
    let mut r1 = scratch::acquire::<D>(n + 1);
    let (q_low, q_high) = quotient.split_at_mut(half);
    d3n2n(&left[n..], &left[half..n], right, q_high, &mut r1, cfg, corrections);
    d3n2n(&r1[..n], &left[..half], right, q_low, remainder, cfg, corrections);
}

/// divides (`left12`, `left3`), `3n/2` limbs, by the `n` limb `right`, needs `left12 < right * B^(n/2)`.
/// `quotient` gets `n/2` limbs, `remainder` `n + 1` (the top one stays zero)
fn d3n2n<D: Limb>(
    left12: &[D],
    left3: &[D],
    right: &[D],
    quotient: &mut [D],
    remainder: &mut [D],
    cfg: &Thresholds,
    corrections: &mut Corrections,
) {
    let n = right.len();
    let half = n / 2;
    let (b2, b1) = right.split_at(half);
    let a1 = &left12[half..];

    remainder.fill(D::ZERO);
    let mut d = scratch::acquire::<D>(n);
    let saturated = compare(a1, b1).is_ge();
    if !saturated {
        d2n1n(left12, b1, quotient, &mut remainder[half..], cfg, corrections);
        let (quotient, b2) = (trimmed(quotient), trimmed(b2));
        multiply_any_with(quotient, b2, &mut d[..quotient.len() + b2.len()], cfg);
    } else {
        // a1 == b1, the quotient block is estimated as B^half - 1
        quotient.fill(D::MAX);
        add(&left12[..half], b1, &mut remainder[half..]);
        d[half..].copy_from_slice(b2);
        sub_self(&mut d, b2);
    }
    // remainder = (r1, a3) - d
    remainder[..half].copy_from_slice(left3);

    let mut rounds = 0;
    while compare(remainder, &d).is_lt() {
        add_self(remainder, right);
        decrement(quotient);
        rounds += 1;
    }
    sub_self(remainder, &d);
    corrections.record(rounds, saturated);
}

fn decrement<D: Limb>(quotient: &mut [D]) {
    let Some(pos) = quotient.iter().position(|it| !it.is_zero()) else {
        panic!("quotient underflowed while correcting the remainder");
    };
    quotient[pos] = quotient[pos].overflowing_sub(D::ONE).0;
    quotient[..pos].fill(D::MAX);
}

fn fallback<D: Limb>(
    left: &[D],
    right: &[D],
    quotient: &mut [D],
    remainder: &mut [D],
    corrections: &mut Corrections,
) {
    let n = right.len();
    remainder.fill(D::ZERO);
    if n == 1 {
        let divisor = D::Wide::widen(right[0]);
        let value = D::Wide::new(left[0], left[1]);
        let digit = value / divisor;
        quotient[0] = digit.lower();
        remainder[0] = (value - digit * divisor).lower();
    } else {
        let mut work = scratch::acquire_copy(left);
        corrections.record_estimate(grammar_school(&mut work, right, quotient));
        remainder[..n].copy_from_slice(&work[..n]);
    }
}
