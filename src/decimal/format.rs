use super::{PowersOf1e9, MAX_PARTIAL_DIGITS, TEN_POW_MAX_PARTIAL};
use crate::{
    big_int::{
        limbs::Limb,
        math_algos::{compare, div::div_rem_limb_self, div_rem_with, trimmed},
        signed::SigNum,
    },
    config::Thresholds,
    util::scratch,
};

/// Formats `magnitude` with the sign of `signum`, zero padded to at least `min_digits` digits.
///
/// # Panics
/// if `signum` is [`SigNum::Zero`] for a non zero magnitude or the other way around
pub fn format_decimal<D: Limb>(magnitude: &[D], signum: SigNum, min_digits: usize) -> String {
    format_decimal_with(magnitude, signum, min_digits, &Thresholds::DEFAULT)
}
/// same as [`format_decimal`] with custom thresholds
pub fn format_decimal_with<D: Limb>(
    magnitude: &[D],
    signum: SigNum,
    min_digits: usize,
    cfg: &Thresholds,
) -> String {
    let magnitude = trimmed(magnitude);
    assert_eq!(
        magnitude.is_empty(),
        signum.is_zero(),
        "zero needs SigNum::Zero and the other way around"
    );
    let super_limbs = to_super_limbs(magnitude, cfg);
    let (top_digits, digits) = super_limbs.last().map_or((0, 0), |&top| {
        let top_digits = top.checked_ilog10().map_or(1, |it| it as usize + 1);
        (
            top_digits,
            top_digits + MAX_PARTIAL_DIGITS * (super_limbs.len() - 1),
        )
    });

    let len = digits.max(min_digits).max(1);
    let mut out = String::with_capacity(len + 1);
    if signum.is_negative() {
        out.push('-');
    }
    out.extend(std::iter::repeat('0').take(len - digits));
    if let Some((&top, rest)) = super_limbs.split_last() {
        push_digits(&mut out, top, top_digits);
        for &super_limb in rest.iter().rev() {
            push_digits(&mut out, super_limb, MAX_PARTIAL_DIGITS);
        }
    }
    out
}

fn push_digits(out: &mut String, mut value: u32, count: usize) {
    let mut buf = [b'0'; MAX_PARTIAL_DIGITS];
    for slot in buf[..count].iter_mut().rev() {
        *slot = b'0' + (value % 10) as u8;
        value /= 10;
    }
    out.extend(buf[..count].iter().map(|&it| char::from(it)));
}

/// `magnitude` in base `10^9`, least significant first, without leading zeros
pub fn to_super_limbs<D: Limb>(magnitude: &[D], cfg: &Thresholds) -> Vec<u32> {
    let magnitude = trimmed(magnitude);
    if magnitude.is_empty() {
        return Vec::new();
    }
    // log_(10^9)(2^BITS) < BITS / 29
    let mut out = vec![0; magnitude.len() * D::BITS as usize / 29 + 2];
    let written = if magnitude.len() < cfg.format_naive_limbs {
        tracing::trace!(limbs = magnitude.len(), "naive format");
        naive(magnitude, &mut out)
    } else {
        tracing::trace!(limbs = magnitude.len(), "divide and conquer format");
        let mut powers = PowersOf1e9::new();
        let k = powers.ensure_for_len(magnitude.len(), cfg);
        split(magnitude, Some(k), &powers, &mut out, cfg)
    };
    out.truncate(written);
    out
}

/// repeatedly divides by `10^9`, returns the number of super limbs written
fn naive<D: Limb>(value: &[D], out: &mut [u32]) -> usize {
    let mut value = scratch::acquire_copy(trimmed(value));
    let mut len = value.len();
    let mut written = 0;
    while len > 0 {
        let rem = div_rem_limb_self(&mut value[..len], D::from(TEN_POW_MAX_PARTIAL));
        out[written] = rem.low_u32();
        written += 1;
        len = trimmed(&value[..len]).len();
    }
    written
}

/// Splits `value` at the biggest power `(10^9)^(2^j)` with `j <= k` that isn't bigger than it.
///
/// The lower part fills exactly `2^j` super limbs, the upper part is written after it.
fn split<D: Limb>(
    value: &[D],
    k: Option<usize>,
    powers: &PowersOf1e9<D>,
    out: &mut [u32],
    cfg: &Thresholds,
) -> usize {
    let value = trimmed(value);
    let Some(mut k) = k else {
        return naive(value, out);
    };
    if value.len() < cfg.format_naive_limbs {
        return naive(value, out);
    }
    let (power, omitted) = loop {
        let (power, omitted) = powers.entry(k);
        if value.len() >= omitted + power.len() && compare(&value[omitted..], power).is_ge() {
            break (power, omitted);
        }
        let Some(smaller) = k.checked_sub(1) else {
            return naive(value, out);
        };
        k = smaller;
    };

    let mut upper = scratch::acquire::<D>(value.len() - omitted - power.len() + 1);
    let mut lower = scratch::acquire::<D>(omitted + power.len());
    let (low, rest) = lower.split_at_mut(omitted);
    low.copy_from_slice(&value[..omitted]);
    div_rem_with(&value[omitted..], power, &mut upper, rest, cfg);

    let window = 1 << k;
    let written = split(&lower, k.checked_sub(1), powers, &mut out[..window], cfg);
    out[written..window].fill(0);
    window + split(&upper, k.checked_sub(1), powers, &mut out[window..], cfg)
}
