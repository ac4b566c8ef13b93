use rug::Integer;

use crate::arith::cycle_exponent;
use crate::error::{PuzzleError, Result};

/// Largest accepted `t`. Every cycle builds `2^t` exactly, so `t` is kept to a
/// size that stays cheap to hold in memory.
pub const MAX_EXPONENT_LOG: u32 = 1 << 20;

// Rivest-Shamir-Wagner puzzle parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleParams {
    modulus: Integer,  // N - the RSA modulus (p × q)
    base: Integer,     // x - starting value in [0, N)
    exponent_log: u32, // t - each cycle raises to e = 2^t
    cycles: u64,       // C - number of sequential cycles
}

impl PuzzleParams {
    pub fn new(modulus: Integer, base: Integer, exponent_log: u32, cycles: u64) -> Result<Self> {
        if modulus <= 1 {
            return Err(PuzzleError::InvalidParameter(format!(
                "modulus must be greater than 1, got {}",
                modulus
            )));
        }
        if base < 0 || base >= modulus {
            return Err(PuzzleError::InvalidParameter(format!(
                "base must lie in [0, modulus), got {}",
                base
            )));
        }

        if exponent_log > MAX_EXPONENT_LOG {
            return Err(PuzzleError::InvalidParameter(format!(
                "exponent log must be at most {}, got {}",
                MAX_EXPONENT_LOG, exponent_log
            )));
        }

        Ok(PuzzleParams {
            modulus,
            base,
            exponent_log,
            cycles,
        })
    }

    pub fn modulus(&self) -> &Integer {
        &self.modulus
    }

    pub fn base(&self) -> &Integer {
        &self.base
    }

    pub fn exponent_log(&self) -> u32 {
        self.exponent_log
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// `e = 2^t`, rebuilt from `t` on every call.
    pub fn cycle_exponent(&self) -> Integer {
        cycle_exponent(self.exponent_log)
    }

    /// Total modular squarings a solver performs: `t × C`.
    pub fn total_squarings(&self) -> Integer {
        Integer::from(self.exponent_log) * self.cycles
    }
}
