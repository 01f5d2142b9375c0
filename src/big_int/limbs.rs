// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
use std::{
    cell::RefCell,
    fmt::{Debug, LowerHex},
    hash::Hash,
    ops::{Add, BitOr, Div, Mul, Not, Rem, Shl, Shr, Sub},
};

use crate::util::scratch::ScratchPool;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "limb32", feature = "limb64"))] {
        compile_error!("feature \"limb32\" and feature \"limb64\" cannot be enabled at the same time");
    } else if #[cfg(feature = "limb32")] {
        /// the limb used when nothing else is requested
        pub type NativeLimb = u32;
    } else if #[cfg(any(feature = "limb64", target_pointer_width = "64"))] {
        /// the limb used when nothing else is requested
        pub type NativeLimb = u64;
    } else {
        /// the limb used when nothing else is requested
        pub type NativeLimb = u32;
    }
}

/// A 'Limb' of a magnitude
/// is assumed to be an unsigned integer with at least 32 bits, so that a single limb can hold `10^9`
pub trait Limb:
    Copy
    + Default
    + Debug
    + Eq
    + Ord
    + Hash
    + LowerHex
    + From<u8>
    + From<bool>
    + From<u32>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + Send
    + Sync
    + 'static
{
    const BITS: u32;
    const BYTES: usize = (Self::BITS / 8) as usize;
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;
    type Wide: Wide<Self>;

    fn leading_zeros(self) -> u32;
    fn overflowing_add(self, rhs: Self) -> (Self, bool);
    fn overflowing_sub(self, rhs: Self) -> (Self, bool);
    /// truncates to the lowest 32 bits
    fn low_u32(self) -> u32;
    /// reads up to `Self::BYTES` little endian bytes, missing bytes are zero
    fn from_le_bytes_padded(bytes: &[u8]) -> Self;

    /// runs `f` with the scratch pool of this limb type on the current thread.
    /// Returns `None` while the thread is shutting down and the pool is already gone.
    fn with_pool<R>(f: impl FnOnce(&mut ScratchPool<Self>) -> R) -> Option<R>;

    fn is_zero(self) -> bool {
        self == Self::ZERO
    }
    fn add_carry(self, rhs: Self, in_carry: bool) -> (Self, bool) {
        let (res, carry_1) = self.overflowing_add(rhs);
        let (res, carry_2) = res.overflowing_add(Self::from(in_carry));
        (res, carry_1 | carry_2)
    }
    fn sub_borrow(self, rhs: Self, in_borrow: bool) -> (Self, bool) {
        let (res, borrow_1) = self.overflowing_sub(rhs);
        let (res, borrow_2) = res.overflowing_sub(Self::from(in_borrow));
        (res, borrow_1 | borrow_2)
    }
    /// ((0, `self`) * (0, `rhs`)) + (0, `carry_in`) = (`carry_out`, `result`)
    fn widening_mul(self, rhs: Self, carry: Self) -> Self::Wide {
        Self::Wide::widen(self) * Self::Wide::widen(rhs) + Self::Wide::widen(carry)
    }
    /// `self` * `rhs` + `add` + `carry` as (`lower`, `upper`).
    /// Even with every input at `MAX` this can't overflow the wide type
    fn mul_add_carry(self, rhs: Self, add: Self, carry: Self) -> (Self, Self) {
        (self.widening_mul(rhs, carry) + Self::Wide::widen(add)).split_le()
    }
    /// the upper limb of ((`self`, `lower`) << `shift`)
    fn shl_with(self, lower: Self, shift: u32) -> Self {
        debug_assert!(shift < Self::BITS, "can't shift by a whole limb");
        if shift == 0 {
            self
        } else {
            (self << shift) | (lower >> (Self::BITS - shift))
        }
    }
    /// the lower limb of ((`upper`, `self`) >> `shift`)
    fn shr_with(self, upper: Self, shift: u32) -> Self {
        debug_assert!(shift < Self::BITS, "can't shift by a whole limb");
        if shift == 0 {
            self
        } else {
            (self >> shift) | (upper << (Self::BITS - shift))
        }
    }
}

/// an unsigned type with twice the bits of `Half`
pub trait Wide<Half>:
    Copy
    + Ord
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
{
    fn new(lower: Half, upper: Half) -> Self;
    fn widen(value: Half) -> Self;
    fn split_le(self) -> (Half, Half);
    fn lower(self) -> Half {
        self.split_le().0
    }
}

macro_rules! implLimb {
    ($limb:ident, $wide:ident) => {
        impl Limb for $limb {
            const BITS: u32 = $limb::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = $limb::MAX;
            type Wide = $wide;

            fn leading_zeros(self) -> u32 {
                $limb::leading_zeros(self)
            }
            fn overflowing_add(self, rhs: Self) -> (Self, bool) {
                $limb::overflowing_add(self, rhs)
            }
            fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
                $limb::overflowing_sub(self, rhs)
            }
            fn low_u32(self) -> u32 {
                self as u32
            }
            fn from_le_bytes_padded(bytes: &[u8]) -> Self {
                assert!(
                    bytes.len() <= Self::BYTES,
                    "{} bytes don't fit into a {}",
                    bytes.len(),
                    stringify!($limb)
                );
                let mut buf = [0; $limb::BITS as usize / 8];
                buf[..bytes.len()].copy_from_slice(bytes);
                Self::from_le_bytes(buf)
            }

            fn with_pool<R>(f: impl FnOnce(&mut ScratchPool<Self>) -> R) -> Option<R> {
                thread_local! {
                    static POOL: RefCell<ScratchPool<$limb>> = RefCell::new(ScratchPool::new());
                }
                POOL.try_with(|pool| f(&mut pool.borrow_mut())).ok()
            }
        }

        impl Wide<$limb> for $wide {
            fn new(lower: $limb, upper: $limb) -> Self {
                ((upper as Self) << $limb::BITS) | lower as Self
            }
            fn widen(value: $limb) -> Self {
                value as Self
            }
            fn split_le(self) -> ($limb, $limb) {
                (self as $limb, (self >> $limb::BITS) as $limb)
            }
        }
    };
}
implLimb!(u32, u64);
implLimb!(u64, u128);
