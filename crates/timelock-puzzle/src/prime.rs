//! Probable-prime search.
//!
//! [`IncrementalSearch`] walks upward one integer at a time from a fixed
//! starting point, so for a given bit length it always lands on the same
//! prime. That is reproducible but it is not a uniform sample among primes of
//! that size. Generators only see the [`PrimalityOracle`] trait, so a
//! randomised strategy can be dropped in without touching them.

use rug::Integer;
use rug::integer::IsPrime;
use tracing::debug;

use crate::error::{PuzzleError, Result};

/// Miller-Rabin rounds for a false-positive bound of 2^-100.
pub const DEFAULT_MILLER_RABIN_ROUNDS: u32 = 50;

/// Candidates examined before a search gives up.
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

pub trait PrimalityOracle {
    /// Returns a probable prime no smaller than `2^bit_length`.
    fn find_probable_prime(&self, bit_length: u32) -> Result<Integer>;

    /// Returns a probable prime strictly greater than `after`.
    fn next_probable_prime(&self, after: &Integer) -> Result<Integer>;
}

/// Deterministic search: the smallest probable prime at or above the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncrementalSearch {
    rounds: u32,
    max_steps: u64,
}

impl Default for IncrementalSearch {
    fn default() -> Self {
        Self::new(DEFAULT_MILLER_RABIN_ROUNDS, DEFAULT_MAX_STEPS)
    }
}

impl IncrementalSearch {
    pub fn new(rounds: u32, max_steps: u64) -> Self {
        IncrementalSearch { rounds, max_steps }
    }

    fn is_probable_prime(&self, candidate: &Integer) -> bool {
        candidate.is_probably_prime(self.rounds) != IsPrime::No
    }

    /// Tests `start`, `start + 1`, ... until one passes or the cap is hit.
    fn search_from(&self, start: Integer) -> Result<Integer> {
        let start_bits = start.significant_bits();
        let mut candidate = start;

        for step in 0..self.max_steps {
            if self.is_probable_prime(&candidate) {
                debug!(bits = candidate.significant_bits(), step, "probable prime found");
                return Ok(candidate);
            }
            candidate += 1;
        }

        Err(PuzzleError::PrimalitySearchExhausted {
            start_bits,
            steps: self.max_steps,
        })
    }
}

impl PrimalityOracle for IncrementalSearch {
    fn find_probable_prime(&self, bit_length: u32) -> Result<Integer> {
        self.search_from(Integer::from(1) << bit_length)
    }

    fn next_probable_prime(&self, after: &Integer) -> Result<Integer> {
        // Anything below 2 can only be followed by 2.
        let start = if *after < 2 {
            Integer::from(2)
        } else {
            Integer::from(after + 1)
        };
        self.search_from(start)
    }
}
