// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
pub mod limbs;
pub mod math_algos;
pub mod primitve;

pub mod signed;
pub mod unsigned;

#[cfg(test)]
mod tests;
