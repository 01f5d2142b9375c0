//! Limb generic arbitrary precision integers.
//!
//! The kernels in [`big_int::math_algos`] work on little endian limb slices with caller provided
//! destinations, [`decimal`] converts between those and decimal text. [`BigUInt`] and [`BigIInt`]
//! wrap both into owned values with the usual operators.

/// returns `Err($err)` from the surrounding function if `$cond` doesn't hold
macro_rules! require {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

pub mod big_int;
pub mod config;
pub mod decimal;

pub use big_int::{
    limbs::{Limb, NativeLimb},
    signed::{BigInt as BigIInt, SigNum, Sign},
    unsigned::BigInt as BigUInt,
};
pub use config::Thresholds;

pub mod util {
    pub(crate) mod rng;
    pub mod scratch;
}
