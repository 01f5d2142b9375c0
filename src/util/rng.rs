use rand::{Rng, RngCore};

use crate::big_int::limbs::Limb;

#[cfg(test)]
pub fn generate_array<const N: usize>(rng: &mut impl RngCore) -> Result<[u8; N], rand::Error> {
    let mut buf = [0; N];
    rng.try_fill_bytes(&mut buf)?;
    Ok(buf)
}

/// a random limb, every bit pattern is equally likely
pub fn random_limb<D: Limb>(rng: &mut (impl RngCore + ?Sized)) -> D {
    let mut buf = [0u8; 16];
    let buf = &mut buf[..D::BYTES];
    rng.fill_bytes(buf);
    D::from_le_bytes_padded(buf)
}

/// `len` random limbs, the top one is never zero
pub fn random_limbs<D: Limb>(len: usize, rng: &mut (impl RngCore + ?Sized)) -> Vec<D> {
    let mut limbs = (0..len).map(|_| random_limb(rng)).collect::<Vec<D>>();
    if let Some(top) = limbs.last_mut() {
        while top.is_zero() {
            *top = random_limb(rng);
        }
    }
    limbs
}

/// a random length in `range`, weighted towards the lower end so small operands get hit as well
pub fn random_len(range: std::ops::RangeInclusive<usize>, rng: &mut (impl Rng + ?Sized)) -> usize {
    let upper = rng.gen_range(range.clone());
    rng.gen_range(*range.start()..=upper)
}

#[allow(clippy::module_name_repetitions)]
#[cfg(test)]
pub fn seeded_rng() -> ([u8; 32], rand::rngs::StdRng) {
    let seed = generate_array(&mut rand::rngs::OsRng).expect("failed to generate seed");
    let rng = <rand::rngs::StdRng as rand::SeedableRng>::from_seed(seed);
    (seed, rng)
}
