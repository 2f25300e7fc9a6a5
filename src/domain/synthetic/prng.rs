//! Park-Miller minimal standard generator

use rand::RngCore;

use crate::shared::errors::GeneratorError;

/// 2^31 - 1
pub const MODULUS: u64 = 2_147_483_647;
pub const MULTIPLIER: u64 = 16_807;

/// Deterministic multiplicative LCG: `state = state * 16807 mod (2^31 - 1)`.
///
/// The generator is a plain value owned by the caller. Two instances built
/// from the same seed yield the same stream regardless of what else runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkMiller {
    state: u64,
}

impl ParkMiller {
    /// Seeds that are multiples of the modulus would pin the state at zero
    /// and are rejected.
    pub fn new(seed: u64) -> Result<Self, GeneratorError> {
        let state = seed % MODULUS;
        if state == 0 {
            return Err(GeneratorError::DegenerateSeed(seed));
        }
        Ok(Self { state })
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advance and map the new state onto `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state * MULTIPLIER % MODULUS;
        (self.state - 1) as f64 / (MODULUS - 1) as f64
    }
}

impl RngCore for ParkMiller {
    fn next_u32(&mut self) -> u32 {
        (self.next_f64() * 4_294_967_296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
