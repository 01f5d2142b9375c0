// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
use crate::{
    big_int::{
        limbs::Limb,
        math_algos,
        primitve::{Primitive, UNum},
    },
    config::Thresholds,
    decimal::{self, ParseError},
    BigIInt, SigNum, Sign,
};

use itertools::Itertools;
use rand::RngCore;
use std::{
    cmp::Ordering,
    fmt::{Debug, Write},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, RangeInclusive, Rem, RemAssign, Sub, SubAssign},
    str::FromStr,
};

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BigInt<D> {
    /// holds the limbs in LE order, never with a leading zero
    pub(super) limbs: Vec<D>,
}

impl<D: Limb> Debug for BigInt<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Number {{ ")?;
        self.inner_debug(f)?;
        write!(f, "}}")
    }
}
impl<D: Limb> std::fmt::Display for BigInt<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(
            true,
            "",
            &decimal::format_decimal(&self.limbs, self.signum(), 0),
        )
    }
}
impl<D: Limb> std::fmt::LowerHex for BigInt<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(true, "0x", &self.hex_digits()?)
    }
}

impl<D: Limb> Ord for BigInt<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        math_algos::compare(&self.limbs, &other.limbs)
    }
}
impl<D: Limb> PartialOrd for BigInt<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// From traits
impl<POSITIVE: UNum, D: Limb> FromIterator<POSITIVE> for BigInt<D> {
    /// the iter should contain the digits in little endian order
    fn from_iter<T: IntoIterator<Item = POSITIVE>>(iter: T) -> Self {
        let bytes = iter
            .into_iter()
            .flat_map(Primitive::to_le_bytes)
            .collect_vec();
        Self::from_limbs(bytes.chunks(D::BYTES).map(D::from_le_bytes_padded))
    }
}
impl<POSITIVE: UNum, D: Limb> From<POSITIVE> for BigInt<D> {
    fn from(pos: POSITIVE) -> Self {
        std::iter::once(pos).collect()
    }
}
impl<D: Limb> From<Vec<D>> for BigInt<D> {
    fn from(limbs: Vec<D>) -> Self {
        Self::from_vec(limbs)
    }
}

impl<D: Limb> FromStr for BigInt<D> {
    type Err = ParseError;

    /// parses decimal text, a minus sign is only accepted for zero
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (signum, limbs) = decimal::parse_decimal(s)?;
        require!(
            !signum.is_negative(),
            ParseError::InvalidDigit {
                digit: '-',
                position: s.len() - s.trim_start().len(),
            }
        );
        Ok(Self::from_vec(limbs))
    }
}

impl<D: Limb> BigInt<D> {
    pub const ZERO: Self = Self { limbs: Vec::new() };

    // construction
    pub fn one() -> Self {
        Self::from_limb(D::ONE)
    }
    pub fn with_sign(self, sign: Sign) -> BigIInt<D> {
        BigIInt::new(sign, self)
    }
    pub fn from_limb(value: D) -> Self {
        Self::from_vec(vec![value])
    }
    pub fn from_limbs(iter: impl IntoIterator<Item = D>) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
    pub fn from_vec(limbs: Vec<D>) -> Self {
        let mut num = Self { limbs };
        num.trim();
        num
    }
    /// generate a new random number with at least `limbs.start()` and at most `limbs.end()` limbs
    /// # Example
    /// `0x1_00000000` <= `BigInt::<u32>::new_random(2..=3, _)` <= `0xffffffff_ffffffff_ffffffff`,
    pub fn new_random(limbs: RangeInclusive<usize>, rng: &mut impl RngCore) -> Self {
        let len = crate::util::rng::random_len(limbs, rng);
        Self::from_vec(crate::util::rng::random_limbs(len, rng))
    }

    // inner utils
    /// removes leading zero limbs
    pub fn trim(&mut self) {
        self.limbs.truncate(math_algos::actual_len(&self.limbs));
    }
    pub(super) fn inner_debug(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x[",)?;
        for (pos, elem) in self.limbs.iter().rev().with_position() {
            write!(f, "{elem:0size$x}", size = D::BYTES * 2)?;
            if matches!(
                pos,
                itertools::Position::First | itertools::Position::Middle
            ) {
                f.write_str(", ")?;
            }
        }
        write!(f, "]")
    }
    fn hex_digits(&self) -> Result<String, std::fmt::Error> {
        let mut buf = String::with_capacity(self.limbs.len() * D::BYTES * 2);
        let mut limbs = self.limbs.iter().rev();
        match limbs.next() {
            None => buf.push('0'),
            Some(top) => {
                write!(buf, "{top:x}")?;
                for limb in limbs {
                    write!(buf, "{limb:0size$x}", size = D::BYTES * 2)?;
                }
            }
        }
        Ok(buf)
    }

    // getter
    pub fn limbs(&self) -> &[D] {
        &self.limbs
    }
    pub fn into_limbs(self) -> Vec<D> {
        self.limbs
    }
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }
    pub fn is_one(&self) -> bool {
        self.limbs.len() == 1 && self.limbs[0] == D::ONE
    }
    pub fn signum(&self) -> SigNum {
        SigNum::from_uint(self.is_zero())
    }
    /// decimal text, zero padded to at least `min_digits` digits
    pub fn to_decimal(&self, min_digits: usize) -> String {
        decimal::format_decimal(&self.limbs, self.signum(), min_digits)
    }

    // math
    fn add_in_place(&mut self, rhs: &Self) {
        let len = self.limbs.len().max(rhs.limbs.len()) + 1;
        self.limbs.resize(len, D::ZERO);
        math_algos::add_self(&mut self.limbs, &rhs.limbs);
        self.trim();
    }
    fn sum(lhs: &Self, rhs: &Self) -> Self {
        let (long, short) = if lhs.limbs.len() >= rhs.limbs.len() {
            (lhs, rhs)
        } else {
            (rhs, lhs)
        };
        let mut limbs = vec![D::ZERO; long.limbs.len() + 1];
        math_algos::add(&long.limbs, &short.limbs, &mut limbs);
        Self::from_vec(limbs)
    }
    fn sub_in_place(&mut self, rhs: &Self) {
        assert!(*self >= *rhs, "result would be negative");
        math_algos::sub_self(&mut self.limbs, &rhs.limbs);
        self.trim();
    }
    fn difference(lhs: &Self, rhs: &Self) -> Self {
        assert!(*lhs >= *rhs, "result would be negative");
        let mut limbs = vec![D::ZERO; lhs.limbs.len()];
        math_algos::sub(&lhs.limbs, &rhs.limbs, &mut limbs);
        Self::from_vec(limbs)
    }
    fn mul_in_place(&mut self, rhs: &Self) {
        *self = Self::product(self, rhs);
    }
    fn product(lhs: &Self, rhs: &Self) -> Self {
        lhs.mul_with(rhs, &Thresholds::DEFAULT)
    }
    fn div_in_place(&mut self, rhs: &Self) {
        *self = Self::quotient(self, rhs);
    }
    fn quotient(lhs: &Self, rhs: &Self) -> Self {
        assert!(!rhs.is_zero(), "can't divide by zero");
        if *lhs < *rhs {
            return Self::ZERO;
        }
        let mut quotient = vec![D::ZERO; lhs.limbs.len() - rhs.limbs.len() + 1];
        math_algos::divide(&lhs.limbs, &rhs.limbs, &mut quotient);
        Self::from_vec(quotient)
    }
    fn rem_in_place(&mut self, rhs: &Self) {
        *self = Self::remainder(self, rhs);
    }
    fn remainder(lhs: &Self, rhs: &Self) -> Self {
        assert!(!rhs.is_zero(), "can't divide by zero");
        if *lhs < *rhs {
            return lhs.clone();
        }
        let mut remainder = vec![D::ZERO; rhs.limbs.len()];
        math_algos::remainder(&lhs.limbs, &rhs.limbs, &mut remainder);
        Self::from_vec(remainder)
    }

    /// `self * rhs` with custom thresholds
    pub fn mul_with(&self, rhs: &Self, cfg: &Thresholds) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO;
        }
        if std::ptr::eq(self, rhs) {
            return self.square_with(cfg);
        }
        let (long, short) = if self.limbs.len() >= rhs.limbs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };
        let mut limbs = vec![D::ZERO; long.limbs.len() + short.limbs.len()];
        math_algos::multiply_with(&long.limbs, &short.limbs, &mut limbs, cfg);
        Self::from_vec(limbs)
    }
    pub fn square(&self) -> Self {
        self.square_with(&Thresholds::DEFAULT)
    }
    pub fn square_with(&self, cfg: &Thresholds) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        let mut limbs = vec![D::ZERO; 2 * self.limbs.len()];
        math_algos::square_with(&self.limbs, &mut limbs, cfg);
        Self::from_vec(limbs)
    }
    /// `self^exponent` by square and multiply, `0^0` is one
    pub fn pow(&self, exponent: u32) -> Self {
        let mut out = Self::one();
        let mut base = self.clone();
        let mut exponent = exponent;
        while exponent > 0 {
            if exponent & 1 == 1 {
                out *= &base;
            }
            exponent >>= 1;
            if exponent > 0 {
                base = base.square();
            }
        }
        out
    }
    /// quotient and remainder of `self / rhs`
    pub fn div_rem(&self, rhs: &Self) -> (Self, Self) {
        self.div_rem_with(rhs, &Thresholds::DEFAULT)
    }
    pub fn div_rem_with(&self, rhs: &Self, cfg: &Thresholds) -> (Self, Self) {
        assert!(!rhs.is_zero(), "can't divide by zero");
        if *self < *rhs {
            return (Self::ZERO, self.clone());
        }
        let mut quotient = vec![D::ZERO; self.limbs.len() - rhs.limbs.len() + 1];
        let mut remainder = vec![D::ZERO; rhs.limbs.len()];
        math_algos::div_rem_with(&self.limbs, &rhs.limbs, &mut quotient, &mut remainder, cfg);
        (Self::from_vec(quotient), Self::from_vec(remainder))
    }
}

macro_rules! implBigMath {
    ($assign_trait:ident, $assign_func:ident, $trait:ident, $func:ident, $in_place:ident, $ref_func:ident) => {
        impl<D: Limb> $trait<BigInt<D>> for BigInt<D> {
            type Output = BigInt<D>;
            fn $func(mut self, rhs: BigInt<D>) -> Self::Output {
                self.$in_place(&rhs);
                self
            }
        }
        impl<D: Limb> $trait<&BigInt<D>> for BigInt<D> {
            type Output = BigInt<D>;
            fn $func(mut self, rhs: &BigInt<D>) -> Self::Output {
                self.$in_place(rhs);
                self
            }
        }
        impl<D: Limb> $trait<BigInt<D>> for &BigInt<D> {
            type Output = BigInt<D>;
            fn $func(self, rhs: BigInt<D>) -> Self::Output {
                BigInt::$ref_func(self, &rhs)
            }
        }
        impl<D: Limb> $trait<&BigInt<D>> for &BigInt<D> {
            type Output = BigInt<D>;
            fn $func(self, rhs: &BigInt<D>) -> Self::Output {
                BigInt::$ref_func(self, rhs)
            }
        }
        impl<D: Limb> $assign_trait<BigInt<D>> for BigInt<D> {
            fn $assign_func(&mut self, rhs: BigInt<D>) {
                self.$in_place(&rhs);
            }
        }
        impl<D: Limb> $assign_trait<&BigInt<D>> for BigInt<D> {
            fn $assign_func(&mut self, rhs: &BigInt<D>) {
                self.$in_place(rhs);
            }
        }
    };
}
implBigMath!(AddAssign, add_assign, Add, add, add_in_place, sum);
implBigMath!(SubAssign, sub_assign, Sub, sub, sub_in_place, difference);
implBigMath!(MulAssign, mul_assign, Mul, mul, mul_in_place, product);
implBigMath!(DivAssign, div_assign, Div, div, div_in_place, quotient);
implBigMath!(RemAssign, rem_assign, Rem, rem, rem_in_place, remainder);
