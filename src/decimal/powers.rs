use super::{MAX_PARTIAL_DIGITS, TEN_POW_MAX_PARTIAL};
use crate::{
    big_int::{
        limbs::Limb,
        math_algos::{actual_len, mul::multiply_any_with, mul_limb_add_self, square_with},
    },
    config::Thresholds,
    util::scratch,
};

/// The powers `(10^9)^(2^k)`, grown on demand by squaring the last entry.
///
/// `10^(9 * 2^k)` is divisible by `2^(9 * 2^k)`, so its lowest [`omitted_len`](Self::omitted_len)
/// limbs are zero. These are not stored, an entry is the rest shifted down by that many limbs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowersOf1e9<D> {
    limbs: Vec<D>,
    index: Vec<(usize, usize)>,
}

impl<D: Limb> Default for PowersOf1e9<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Limb> PowersOf1e9<D> {
    /// a table only holding `10^9`
    pub fn new() -> Self {
        Self {
            limbs: vec![D::from(TEN_POW_MAX_PARTIAL)],
            index: vec![(0, 1)],
        }
    }

    /// number of zero limbs elided from entry `k`
    pub const fn omitted_len(k: usize) -> usize {
        (MAX_PARTIAL_DIGITS << k) / D::BITS as usize
    }

    /// number of computed entries
    pub fn len(&self) -> usize {
        self.index.len()
    }
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The stored limbs of entry `k` and the number of elided limbs below them.
    ///
    /// # Panics
    /// if entry `k` wasn't computed with [`ensure`](Self::ensure) yet
    pub fn entry(&self, k: usize) -> (&[D], usize) {
        let (offset, len) = self.index[k];
        (&self.limbs[offset..offset + len], Self::omitted_len(k))
    }
    /// number of limbs of entry `k` including the elided ones
    pub fn full_len(&self, k: usize) -> usize {
        self.index[k].1 + Self::omitted_len(k)
    }

    /// computes all entries up to and including `k`
    pub fn ensure(&mut self, k: usize, cfg: &Thresholds) {
        while self.index.len() <= k {
            let last = self.index.len() - 1;
            let (offset, len) = self.index[last];
            let mut square = scratch::acquire::<D>(2 * len);
            square_with(&self.limbs[offset..offset + len], &mut square, cfg);

            let dropped = Self::omitted_len(last + 1) - 2 * Self::omitted_len(last);
            debug_assert!(
                square[..dropped].iter().all(|it| it.is_zero()),
                "dropped limbs of entry {} weren't zero",
                last + 1
            );
            let square = &square[dropped..actual_len(&square)];
            self.index.push((self.limbs.len(), square.len()));
            self.limbs.extend_from_slice(square);
        }
    }

    /// Computes entries until the next one would have more than `len` limbs, returns the index of the
    /// biggest entry not longer than `len` (but at least 0).
    pub fn ensure_for_len(&mut self, len: usize, cfg: &Thresholds) -> usize {
        let mut k = 0;
        loop {
            // squaring a number with l limbs gives at least 2l - 1 limbs
            if 2 * self.full_len(k) - 1 > len {
                return k;
            }
            self.ensure(k + 1, cfg);
            if self.full_len(k + 1) > len {
                return k;
            }
            k += 1;
        }
    }

    /// `value * 10^zeros`, trimmed
    ///
    /// the partial power `10^(zeros % 9)` is applied first, then one table entry per set bit of `zeros / 9`
    pub fn multiply_power_of_ten(&mut self, value: &[D], zeros: usize, cfg: &Thresholds) -> Vec<D> {
        let mut result = value[..actual_len(value)].to_vec();
        if result.is_empty() {
            return result;
        }
        let partial = zeros % MAX_PARTIAL_DIGITS;
        if partial > 0 {
            let factor = (0..partial).fold(1u32, |acc, _| acc * 10);
            let carry = mul_limb_add_self(&mut result, D::from(factor), D::ZERO);
            if !carry.is_zero() {
                result.push(carry);
            }
        }

        let mut blocks = zeros / MAX_PARTIAL_DIGITS;
        let mut omitted = 0;
        let mut k = 0;
        while blocks > 0 {
            if blocks & 1 == 1 {
                self.ensure(k, cfg);
                let (power, power_omitted) = self.entry(k);
                let mut product = vec![D::ZERO; result.len() + power.len()];
                multiply_any_with(&result, power, &mut product, cfg);
                product.truncate(actual_len(&product));
                result = product;
                omitted += power_omitted;
            }
            blocks >>= 1;
            k += 1;
        }

        if omitted > 0 {
            result.splice(0..0, std::iter::repeat(D::ZERO).take(omitted));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decimal::format_decimal, SigNum};

    fn full_entry<D: Limb>(powers: &PowersOf1e9<D>, k: usize) -> Vec<D> {
        let (limbs, omitted) = powers.entry(k);
        let mut full = vec![D::ZERO; omitted];
        full.extend_from_slice(limbs);
        full
    }

    #[test]
    fn omitted() {
        assert_eq!(PowersOf1e9::<u32>::omitted_len(0), 0);
        assert_eq!(PowersOf1e9::<u32>::omitted_len(1), 0);
        assert_eq!(PowersOf1e9::<u32>::omitted_len(2), 1);
        assert_eq!(PowersOf1e9::<u32>::omitted_len(5), 9);
        assert_eq!(PowersOf1e9::<u64>::omitted_len(2), 0);
        assert_eq!(PowersOf1e9::<u64>::omitted_len(3), 1);
        assert_eq!(PowersOf1e9::<u64>::omitted_len(6), 9);
    }

    #[test]
    fn entries_are_powers_of_ten() {
        let cfg = Thresholds::forced_small();
        let mut powers = PowersOf1e9::<u32>::new();
        powers.ensure(6, &cfg);
        assert_eq!(powers.len(), 7);
        assert_eq!(powers.entry(0), (&[1_000_000_000u32][..], 0));
        assert_eq!(full_entry(&powers, 1), vec![0xA764_0000, 0x0DE0_B6B3]);
        for k in 0..=6 {
            let text = "1".to_owned() + &"0".repeat(9 << k);
            assert_eq!(format_decimal(&full_entry(&powers, k), SigNum::Positive, 0), text);
            assert_eq!(powers.full_len(k), full_entry(&powers, k).len());
        }

        let mut wide = PowersOf1e9::<u64>::new();
        wide.ensure(4, &cfg);
        assert_eq!(full_entry(&wide, 1), vec![0x0DE0_B6B3_A764_0000]);
        let text = "1".to_owned() + &"0".repeat(9 << 4);
        assert_eq!(format_decimal(&full_entry(&wide, 4), SigNum::Positive, 0), text);
    }

    #[test]
    fn ensure_for_len() {
        let cfg = Thresholds::DEFAULT;
        let mut powers = PowersOf1e9::<u32>::new();
        assert_eq!(powers.ensure_for_len(1, &cfg), 0);
        assert_eq!(powers.ensure_for_len(2, &cfg), 1);
        for len in [3, 10, 100, 1000] {
            let k = powers.ensure_for_len(len, &cfg);
            assert!(powers.full_len(k) <= len);
            assert!(k + 1 >= powers.len() || powers.full_len(k + 1) > len);
        }
    }

    #[test]
    fn power_of_ten() {
        let cfg = Thresholds::forced_small();
        let mut powers = PowersOf1e9::<u32>::new();
        for zeros in [0, 1, 8, 9, 10, 27, 100, 500] {
            let value = powers.multiply_power_of_ten(&[7u32], zeros, &cfg);
            let text = "7".to_owned() + &"0".repeat(zeros);
            assert_eq!(format_decimal(&value, SigNum::Positive, 0), text);
        }
        assert!(powers.multiply_power_of_ten(&[0u32], 20, &cfg).is_empty());
    }
}
