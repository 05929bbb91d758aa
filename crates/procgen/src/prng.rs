//! Deterministic seeded randomness for procedural content.
//!
//! **Seed-based determinism:** every stream here is a pure function of its
//! integer seed, so the same world seed always rebuilds the same chunks in
//! any load order. World seeds themselves are drawn from `rand`.

use rand::Rng;

/// Mersenne prime 2^31 - 1.
const MODULUS: i64 = 2_147_483_647;
/// Park–Miller minimal standard multiplier.
const MULTIPLIER: i64 = 16_807;

/// Upper bound (exclusive) for freshly drawn world seeds.
pub const WORLD_SEED_LIMIT: u32 = 1_000_000;

/// Park–Miller linear congruential generator.
///
/// State is always in `[1, MODULUS - 1]`, so zero is never reached and the
/// stream never collapses to a fixed point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: i64,
}

impl SeededRandom {
    pub fn new(seed: i64) -> Self {
        let mut state = seed % MODULUS;
        if state <= 0 {
            state += MODULUS - 1;
        }
        // Only `-(MODULUS - 1)` lands here.
        if state == 0 {
            state = MODULUS - 1;
        }
        Self { state }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER) % MODULUS;
        (self.state - 1) as f64 / (MODULUS - 1) as f64
    }

    /// Next value in `[min, max)`.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Next integer in `[min, max)`.
    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        self.range(min as f64, max as f64).floor() as i64
    }
}

impl Iterator for SeededRandom {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

/// Fold two grid coordinates into a base seed (`hash * 31 + coord`, 32-bit
/// wrapping), returning the magnitude.
pub fn hash_coords(x: i32, z: i32, base_seed: u32) -> u32 {
    let mut hash = base_seed as i32;
    hash = hash.wrapping_mul(31).wrapping_add(x);
    hash = hash.wrapping_mul(31).wrapping_add(z);
    hash.unsigned_abs()
}

/// Draw a fresh world seed in `[0, WORLD_SEED_LIMIT)`.
pub fn random_world_seed<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(0..WORLD_SEED_LIMIT)
}
