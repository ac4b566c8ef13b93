use rand::RngCore;
use rug::Integer;
use rug::ops::RemRounding;
use tracing::{debug, info};

use crate::arith::{cycle_exponent, exp_mod};
use crate::commitment::{Commitment, fingerprint};
use crate::config::PuzzleConfig;
use crate::error::{PuzzleError, Result};
use crate::params::PuzzleParams;
use crate::prime::{DEFAULT_MILLER_RABIN_ROUNDS, IncrementalSearch, PrimalityOracle};
use crate::record::{PuzzleRecord, estimate_unlock_duration};
use crate::rng::random_below;

/// Factorisation of the modulus. Lives only inside [`TrapdoorGenerator::generate`].
struct Trapdoor {
    p: Integer,
    q: Integer,
    phi: Integer,
}

impl Trapdoor {
    fn new(p: Integer, q: Integer) -> Self {
        let phi = Integer::from(&p - 1u32) * Integer::from(&q - 1u32);
        Trapdoor { p, q, phi }
    }

    fn modulus(&self) -> Integer {
        Integer::from(&self.p * &self.q)
    }

    /// `e^C mod phi`, accumulated one cycle at a time.
    fn reduced_exponent(&self, exponent: &Integer, cycles: u64) -> Integer {
        let step = exponent.clone().rem_euc(&self.phi);
        let mut acc = Integer::from(1);
        for _ in 0..cycles {
            acc *= &step;
            acc %= &self.phi;
        }
        acc
    }

    /// The value `C` sequential cycles of `y -> y^e mod N` reach from `base`.
    fn unlock(&self, base: &Integer, exponent: &Integer, cycles: u64) -> Result<Integer> {
        exp_mod(
            base,
            &self.reduced_exponent(exponent, cycles),
            &self.modulus(),
        )
    }
}

/// Builds puzzles in time independent of the cycle count by reducing the
/// exponent modulo the totient.
pub struct TrapdoorGenerator<O = IncrementalSearch> {
    config: PuzzleConfig,
    oracle: O,
}

impl TrapdoorGenerator<IncrementalSearch> {
    pub fn new(config: PuzzleConfig) -> Self {
        let oracle = IncrementalSearch::new(DEFAULT_MILLER_RABIN_ROUNDS, config.prime_search_cap);
        TrapdoorGenerator { config, oracle }
    }
}

impl<O: PrimalityOracle> TrapdoorGenerator<O> {
    pub fn with_oracle(config: PuzzleConfig, oracle: O) -> Self {
        TrapdoorGenerator { config, oracle }
    }

    fn draw_primes(&self) -> Result<(Integer, Integer)> {
        let p = self.oracle.find_probable_prime(self.config.p_bits)?;
        let q = if self.config.q_bits == self.config.p_bits {
            self.oracle.next_probable_prime(&p)?
        } else {
            self.oracle.find_probable_prime(self.config.q_bits)?
        };

        if p == q {
            return Err(PuzzleError::InvalidParameter(
                "the two primes of the modulus must differ".to_string(),
            ));
        }
        Ok((p, q))
    }

    /// Generates a puzzle, drawing the base from `rng`.
    ///
    /// Both primes, the totient and the solution are dropped before this
    /// returns; the record carries only `H(H(solution))`.
    pub fn generate<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<PuzzleRecord> {
        self.config.validate()?;

        let exponent_log = self.config.exponent_log;
        let cycles = self.config.cycles;
        info!(
            p_bits = self.config.p_bits,
            q_bits = self.config.q_bits,
            exponent_log,
            cycles,
            "generating time-lock puzzle"
        );

        let (p, q) = self.draw_primes()?;
        let trapdoor = Trapdoor::new(p, q);
        let modulus = trapdoor.modulus();
        debug!(
            modulus_bits = modulus.significant_bits(),
            modulus_fingerprint = %fingerprint(&modulus),
            "modulus ready"
        );

        let exponent = cycle_exponent(exponent_log);
        let base = random_below(&modulus, rng)?;

        let commitment = {
            let solution = trapdoor.unlock(&base, &exponent, cycles)?;
            Commitment::of(&solution)
        };
        drop(trapdoor);

        let estimate = estimate_unlock_duration(cycles, self.config.cycle_duration_hint);
        let params = PuzzleParams::new(modulus, base, exponent_log, cycles)?;
        info!(%commitment, estimate = %estimate, "puzzle generated");

        Ok(PuzzleRecord::new(params, commitment, estimate))
    }
}

/// Generates a puzzle with the default incremental prime search.
pub fn generate_puzzle<R: RngCore + ?Sized>(
    config: &PuzzleConfig,
    rng: &mut R,
) -> Result<PuzzleRecord> {
    TrapdoorGenerator::new(config.clone()).generate(rng)
}
