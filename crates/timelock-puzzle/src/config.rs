use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PuzzleError, Result};
use crate::params::MAX_EXPONENT_LOG;
use crate::prime::DEFAULT_MAX_STEPS;

/// Parameters for generating one puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// `p` is the first probable prime at or above `2^p_bits`.
    pub p_bits: u32,
    /// `q` is the first probable prime at or above `2^q_bits`. When equal to
    /// `p_bits`, `q` is the next probable prime after `p`.
    pub q_bits: u32,
    /// `t`, so each cycle raises to `e = 2^t`.
    pub exponent_log: u32,
    /// `C`, the number of sequential cycles.
    pub cycles: u64,
    /// Measured or assumed cost of one cycle, used only for the displayed
    /// unlock estimate.
    pub cycle_duration_hint: Duration,
    pub prime_search_cap: u64,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            p_bits: 1234,
            q_bits: 1010,
            exponent_log: 5000,
            cycles: 0,
            cycle_duration_hint: Duration::from_secs(1),
            prime_search_cap: DEFAULT_MAX_STEPS,
        }
    }
}

impl PuzzleConfig {
    /// Both primes searched from the same bit length.
    pub fn new(prime_bits: u32, exponent_log: u32, cycles: u64) -> Self {
        Self {
            p_bits: prime_bits,
            q_bits: prime_bits,
            exponent_log,
            cycles,
            ..Self::default()
        }
    }

    pub fn with_cycle_duration_hint(mut self, hint: Duration) -> Self {
        self.cycle_duration_hint = hint;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.p_bits < 2 || self.q_bits < 2 {
            return Err(PuzzleError::InvalidParameter(format!(
                "prime bit lengths must be at least 2, got {} and {}",
                self.p_bits, self.q_bits
            )));
        }
        if self.prime_search_cap == 0 {
            return Err(PuzzleError::InvalidParameter(
                "prime search cap must be positive".to_string(),
            ));
        }
        check_exponent_log(self.exponent_log)
    }
}

/// Parameters for solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Report progress every this many cycles; `0` disables reporting.
    pub progress_interval: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            progress_interval: 100,
        }
    }
}

impl SolverConfig {
    pub fn new(progress_interval: u64) -> Self {
        Self { progress_interval }
    }
}

/// Parameters for timing one cycle on this machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    pub exponent_log: u32,
    pub samples: usize,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            exponent_log: 5000,
            samples: 10,
        }
    }
}

impl CalibrationConfig {
    pub fn new(exponent_log: u32, samples: usize) -> Self {
        Self {
            exponent_log,
            samples,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(PuzzleError::InvalidParameter(
                "calibration needs at least one sample".to_string(),
            ));
        }
        check_exponent_log(self.exponent_log)
    }
}

fn check_exponent_log(exponent_log: u32) -> Result<()> {
    if exponent_log > MAX_EXPONENT_LOG {
        return Err(PuzzleError::InvalidParameter(format!(
            "exponent log must be at most {}, got {}",
            MAX_EXPONENT_LOG, exponent_log
        )));
    }
    Ok(())
}
