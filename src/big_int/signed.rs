// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
use crate::{
    big_int::{
        limbs::Limb,
        primitve::{Either, INum, Primitive},
    },
    config::Thresholds,
    decimal::{self, ParseError},
    BigUInt,
};

use std::{
    cmp::Ordering,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign},
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Sign {
    Negative = -1,
    Positive = 1,
}
impl From<Sign> for SigNum {
    fn from(value: Sign) -> Self {
        match value {
            Sign::Negative => Self::Negative,
            Sign::Positive => Self::Positive,
        }
    }
}
impl From<SigNum> for Sign {
    fn from(value: SigNum) -> Self {
        match value {
            SigNum::Negative => Self::Negative,
            SigNum::Zero | SigNum::Positive => Self::Positive,
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum SigNum {
    Negative = -1,
    Zero = 0,
    Positive = 1,
}
impl Default for SigNum {
    fn default() -> Self {
        Self::Zero
    }
}
impl From<SigNum> for i8 {
    fn from(value: SigNum) -> Self {
        value.into_i8()
    }
}
impl SigNum {
    const fn into_i8(self) -> i8 {
        self as i8
    }
    /// the sign of `value`
    pub const fn from_i8(value: i8) -> Self {
        match value.signum() {
            -1 => Self::Negative,
            0 => Self::Zero,
            _ => Self::Positive,
        }
    }
    pub const fn from_uint(is_zero: bool) -> Self {
        if is_zero {
            Self::Zero
        } else {
            Self::Positive
        }
    }
    pub const fn is_negative(self) -> bool {
        self.into_i8().is_negative()
    }
    pub const fn is_positive(self) -> bool {
        self.into_i8().is_positive()
    }
    pub const fn is_zero(self) -> bool {
        self.into_i8() == 0
    }
    #[must_use]
    pub const fn negate(self) -> Self {
        self.const_mul(Self::Negative)
    }
    #[must_use]
    pub const fn abs(self) -> Self {
        Self::from_i8(self.into_i8().abs())
    }
    #[must_use]
    pub const fn const_mul(self, rhs: Self) -> Self {
        Self::from_i8(self.into_i8() * rhs.into_i8())
    }
    /// if exactly one of both is negative
    pub const fn is_different(self, other: Self) -> bool {
        self.is_negative() ^ other.is_negative()
    }
}
impl Neg for SigNum {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}
impl Mul for SigNum {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.const_mul(rhs)
    }
}

impl<D: Limb> From<BigInt<D>> for BigUInt<D> {
    fn from(value: BigInt<D>) -> Self {
        value.unsigned
    }
}
impl<D: Limb> AsRef<BigUInt<D>> for BigInt<D> {
    fn as_ref(&self) -> &BigUInt<D> {
        self.abs()
    }
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BigInt<D> {
    /// the sign of the number or zero <=> `unsigned.is_zero()`
    signum: SigNum,
    /// the absolute value
    unsigned: BigUInt<D>,
}

impl<D: Limb> std::fmt::Debug for BigInt<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Number {{ {} ",
            match self.signum {
                SigNum::Negative => "-",
                SigNum::Zero => "",
                SigNum::Positive => "+",
            }
        )?;
        self.unsigned.inner_debug(f)?;
        write!(f, "}}")
    }
}
impl<D: Limb> std::fmt::Display for BigInt<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(
            !self.is_negative(),
            "",
            &decimal::format_decimal(self.unsigned.limbs(), self.signum.abs(), 0),
        )
    }
}
impl<D: Limb> std::fmt::LowerHex for BigInt<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad_integral(
            !self.is_negative(),
            if f.alternate() { "0x" } else { "" },
            &format!("{:x}", self.unsigned),
        )
    }
}

impl<D: Limb> Ord for BigInt<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.signum.cmp(&other.signum).then_with(|| {
            let ord = self.unsigned.cmp(&other.unsigned);
            if self.signum.is_negative() {
                ord.reverse()
            } else {
                ord
            }
        })
    }
}
impl<D: Limb> PartialOrd for BigInt<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<PRIMITIVE: Primitive, D: Limb> From<PRIMITIVE> for BigInt<D> {
    fn from(value: PRIMITIVE) -> Self {
        match value.select_sign() {
            Either::Left(pos) => BigUInt::from(pos).into(),
            Either::Right(neg) => BigUInt::from(INum::abs(neg)).with_sign(if INum::is_negative(neg) {
                Sign::Negative
            } else {
                Sign::Positive
            }),
        }
    }
}
impl<D: Limb> From<BigUInt<D>> for BigInt<D> {
    fn from(value: BigUInt<D>) -> Self {
        value.with_sign(Sign::Positive)
    }
}
impl<D: Limb> FromStr for BigInt<D> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (signum, limbs) = decimal::parse_decimal(s)?;
        Ok(Self::from_parts(signum, BigUInt::from_vec(limbs)))
    }
}

impl<D: Limb> BigInt<D> {
    pub const ZERO: Self = Self {
        signum: SigNum::Zero,
        unsigned: BigUInt::ZERO,
    };
    pub fn new(sign: impl Into<Sign>, unsigned: impl Into<BigUInt<D>>) -> Self {
        let unsigned = unsigned.into();
        let sign: Sign = sign.into();
        Self {
            signum: if unsigned.is_zero() {
                SigNum::Zero
            } else {
                sign.into()
            },
            unsigned,
        }
    }
    /// Builds a number from a signum and a magnitude.
    ///
    /// # Panics
    /// if `signum` is [`SigNum::Zero`] for a non zero magnitude or the other way around
    pub fn from_parts(signum: SigNum, unsigned: BigUInt<D>) -> Self {
        assert_eq!(
            signum.is_zero(),
            unsigned.is_zero(),
            "zero needs SigNum::Zero and the other way around"
        );
        Self { signum, unsigned }
    }
    pub fn split_sign(self) -> (SigNum, BigUInt<D>) {
        (self.signum, self.unsigned)
    }

    // getter
    pub const fn signum(&self) -> SigNum {
        self.signum
    }
    pub const fn is_negative(&self) -> bool {
        self.signum.is_negative()
    }
    pub const fn is_positive(&self) -> bool {
        self.signum.is_positive()
    }
    pub const fn is_zero(&self) -> bool {
        self.signum.is_zero()
    }
    pub const fn abs(&self) -> &BigUInt<D> {
        &self.unsigned
    }
    /// decimal text, zero padded to at least `min_digits` digits after the sign
    pub fn to_decimal(&self, min_digits: usize) -> String {
        decimal::format_decimal(self.unsigned.limbs(), self.signum, min_digits)
    }

    // math
    fn add_in_place(&mut self, rhs: &Self) {
        if rhs.is_zero() {
            return;
        }
        if self.is_zero() {
            self.clone_from(rhs);
            return;
        }
        if !self.signum.is_different(rhs.signum) {
            self.unsigned += &rhs.unsigned;
            return;
        }
        match self.unsigned.cmp(&rhs.unsigned) {
            Ordering::Equal => *self = Self::ZERO,
            Ordering::Greater => self.unsigned -= &rhs.unsigned,
            Ordering::Less => {
                self.unsigned = &rhs.unsigned - &self.unsigned;
                self.signum = rhs.signum;
            }
        }
    }
    fn sum(lhs: &Self, rhs: &Self) -> Self {
        let mut out = lhs.clone();
        out.add_in_place(rhs);
        out
    }
    fn sub_in_place(&mut self, rhs: &Self) {
        // a - b = -(-a + b)
        self.signum = -self.signum;
        self.add_in_place(rhs);
        self.signum = -self.signum;
    }
    fn difference(lhs: &Self, rhs: &Self) -> Self {
        let mut out = lhs.clone();
        out.sub_in_place(rhs);
        out
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
        lhs.div_rem(rhs).0
    }
    fn rem_in_place(&mut self, rhs: &Self) {
        *self = Self::remainder(self, rhs);
    }
    fn remainder(lhs: &Self, rhs: &Self) -> Self {
        lhs.div_rem(rhs).1
    }

    /// `self * rhs` with custom thresholds
    pub fn mul_with(&self, rhs: &Self, cfg: &Thresholds) -> Self {
        Self::from_parts(
            self.signum * rhs.signum,
            self.unsigned.mul_with(&rhs.unsigned, cfg),
        )
    }
    pub fn square(&self) -> Self {
        self.unsigned.square().into()
    }
    pub fn pow(&self, exponent: u32) -> Self {
        let sign = if self.is_negative() && exponent & 1 == 1 {
            Sign::Negative
        } else {
            Sign::Positive
        };
        Self::new(sign, self.unsigned.pow(exponent))
    }
    /// truncating division, the remainder has the sign of `self`
    pub fn div_rem(&self, rhs: &Self) -> (Self, Self) {
        self.div_rem_with(rhs, &Thresholds::DEFAULT)
    }
    pub fn div_rem_with(&self, rhs: &Self, cfg: &Thresholds) -> (Self, Self) {
        let (quotient, remainder) = self.unsigned.div_rem_with(&rhs.unsigned, cfg);
        (
            Self::new(self.signum * rhs.signum, quotient),
            Self::new(self.signum, remainder),
        )
    }
}

impl<D: Limb> Neg for BigInt<D> {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.signum = -self.signum;
        self
    }
}
impl<D: Limb> Neg for &BigInt<D> {
    type Output = BigInt<D>;

    fn neg(self) -> Self::Output {
        -self.clone()
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
