//! Deterministic multiply-with-carry generator for hill generation.
//!
//! Two 32-bit words, each advanced by a 16-bit multiply plus the carry held in
//! its upper half. The words are signed and shifted arithmetically, and all
//! arithmetic wraps modulo 2^32, so a seed produces the same stream on every
//! platform.

/// Initial offsets mixed into the seed
const W_INIT: i32 = 123_456_789;
const Z_INIT: i32 = 987_654_321;

/// Multipliers for the two words
const Z_MUL: i32 = 36_969;
const W_MUL: i32 = 18_000;

/// Seeded stream of floats in `[0, 1)`
#[derive(Clone, Debug)]
pub struct SeededRng {
    w: i32,
    z: i32,
}

impl SeededRng {
    pub fn new(seed: i32) -> Self {
        Self {
            w: W_INIT.wrapping_add(seed),
            z: Z_INIT.wrapping_sub(seed),
        }
    }

    /// Advance both words and return the combined 32-bit output
    pub fn next_u32(&mut self) -> u32 {
        self.z = Z_MUL.wrapping_mul(self.z & 0xffff).wrapping_add(self.z >> 16);
        self.w = W_MUL.wrapping_mul(self.w & 0xffff).wrapping_add(self.w >> 16);
        ((self.z as u32) << 16).wrapping_add((self.w & 0xffff) as u32)
    }

    /// Next value in `[0, 1)`.
    ///
    /// Uses the top 24 bits so the result is exactly representable and can
    /// never round up to 1.0.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Next value in `[min, max)`
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}
