use super::{NumberBuffer, ParseError, PowersOf1e9, MAX_PARTIAL_DIGITS, TEN_POW_MAX_PARTIAL};
use crate::{
    big_int::{
        limbs::Limb,
        math_algos::{actual_len, add_self, mul::multiply_any_with, mul_limb_add_self},
        signed::SigNum,
    },
    config::Thresholds,
    util::scratch,
};

/// parses `text` into its sign and trimmed magnitude
pub fn parse_decimal<D: Limb>(text: &str) -> Result<(SigNum, Vec<D>), ParseError> {
    parse_decimal_with(text, &Thresholds::DEFAULT)
}
/// same as [`parse_decimal`] with custom thresholds
pub fn parse_decimal_with<D: Limb>(
    text: &str,
    cfg: &Thresholds,
) -> Result<(SigNum, Vec<D>), ParseError> {
    let number = NumberBuffer::parse(text)?;
    let magnitude = magnitude_of(&number, cfg)?;
    let signum = if magnitude.is_empty() {
        SigNum::Zero
    } else if number.is_negative() {
        SigNum::Negative
    } else {
        SigNum::Positive
    };
    Ok((signum, magnitude))
}

/// The trimmed magnitude of a scanned number.
///
/// Fails with [`ParseError::NonZeroFraction`] if `number` isn't an integer.
pub fn magnitude_of<D: Limb>(number: &NumberBuffer, cfg: &Thresholds) -> Result<Vec<D>, ParseError> {
    require!(
        !number.has_nonzero_tail(),
        ParseError::NonZeroFraction {
            position: number.last_digit_position()
        }
    );
    let (digits, trailing_zeros) = number.integer_part();
    if digits.is_empty() {
        return Ok(Vec::new());
    }
    let super_limbs = digits
        .rchunks(MAX_PARTIAL_DIGITS)
        .map(super_limb)
        .collect::<Vec<_>>();

    let total_digits = digits.len() + trailing_zeros;
    let mut magnitude = if total_digits <= cfg.parse_naive_digits {
        tracing::trace!(digits = total_digits, "naive parse");
        let mut magnitude = horner(&super_limbs, trailing_zeros / MAX_PARTIAL_DIGITS + 1);
        scale_naive(&mut magnitude, trailing_zeros);
        magnitude
    } else {
        tracing::trace!(digits = total_digits, "divide and conquer parse");
        let mut powers = PowersOf1e9::new();
        let magnitude = combine_blocks(&super_limbs, &mut powers, cfg);
        if trailing_zeros == 0 {
            magnitude
        } else {
            powers.multiply_power_of_ten(&magnitude, trailing_zeros, cfg)
        }
    };
    magnitude.truncate(actual_len(&magnitude));
    Ok(magnitude)
}

fn super_limb(chunk: &[u8]) -> u32 {
    chunk
        .iter()
        .fold(0, |acc, digit| acc * 10 + u32::from(digit - b'0'))
}

/// folds the super limbs most significant first, reserving `extra` limbs for later growth
fn horner<D: Limb>(super_limbs: &[u32], extra: usize) -> Vec<D> {
    let base = D::from(TEN_POW_MAX_PARTIAL);
    let mut magnitude = Vec::with_capacity(super_limbs.len() + extra);
    for &super_limb in super_limbs.iter().rev() {
        let carry = mul_limb_add_self(&mut magnitude, base, D::from(super_limb));
        if !carry.is_zero() {
            magnitude.push(carry);
        }
    }
    magnitude
}

fn scale_naive<D: Limb>(magnitude: &mut Vec<D>, zeros: usize) {
    let partial = zeros % MAX_PARTIAL_DIGITS;
    let factors = std::iter::repeat(TEN_POW_MAX_PARTIAL)
        .take(zeros / MAX_PARTIAL_DIGITS)
        .chain((partial > 0).then(|| (0..partial).fold(1, |acc, _| acc * 10)));
    for factor in factors {
        let carry = mul_limb_add_self(magnitude, D::from(factor), D::ZERO);
        if !carry.is_zero() {
            magnitude.push(carry);
        }
    }
}

/// Combines the super limbs pairwise, level `k` joins blocks of `2^k` super limbs as
/// `lower + upper * (10^9)^(2^k)`.
fn combine_blocks<D: Limb>(super_limbs: &[u32], powers: &mut PowersOf1e9<D>, cfg: &Thresholds) -> Vec<D> {
    // every super limb fits into one limb and a block of 2^k super limbs into 2^k limbs
    let len = super_limbs.len().next_power_of_two();
    let mut current = scratch::acquire::<D>(len);
    for (slot, &super_limb) in current.iter_mut().zip(super_limbs) {
        *slot = D::from(super_limb);
    }
    let mut next = scratch::acquire::<D>(len);

    let mut k = 0;
    while (1 << k) < super_limbs.len() {
        powers.ensure(k, cfg);
        let (power, omitted) = powers.entry(k);
        let block = 1 << k;
        next.fill(D::ZERO);
        for start in (0..len).step_by(2 * block) {
            let lower = &current[start..start + block];
            let upper = &current[start + block..start + 2 * block];
            let dst = &mut next[start..start + 2 * block];
            dst[..block].copy_from_slice(lower);

            let upper = &upper[..actual_len(upper)];
            if upper.is_empty() {
                continue;
            }
            let mut product = scratch::acquire::<D>(upper.len() + power.len());
            multiply_any_with(upper, power, &mut product, cfg);
            let product = &product[..actual_len(&product)];
            add_self(&mut dst[omitted..], product);
        }
        std::mem::swap(&mut current, &mut next);
        k += 1;
    }
    current[..actual_len(&current)].to_vec()
}
