//! Rivest-Shamir-Wagner time-lock puzzles over `rug` integers.
//!
//! A generator who knows the factorisation of `N = p × q` publishes a
//! [`PuzzleRecord`]: a base `x`, an exponent log `t` and a cycle count `C`,
//! together with the commitment `H(H(y))` to `y = x^((2^t)^C) mod N`. Knowing
//! `phi(N)` it reaches `y` with a single exponentiation. A solver without the
//! factorisation has to run `C` cycles of `y -> y^(2^t) mod N` one after the
//! other.
//!
//! ```no_run
//! use rand::rngs::OsRng;
//! use timelock_puzzle::{PuzzleConfig, generate_puzzle, solve_puzzle};
//!
//! let config = PuzzleConfig::new(512, 5000, 60);
//! let record = generate_puzzle(&config, &mut OsRng)?;
//! let json = record.to_json()?;
//!
//! let record: timelock_puzzle::PuzzleRecord = json.parse()?;
//! let solution = solve_puzzle(&record, None)?;
//! println!("{}", hex::encode(solution.unlock_key()));
//! # Ok::<(), timelock_puzzle::PuzzleError>(())
//! ```

pub mod arith;
pub mod calibrate;
pub mod commitment;
pub mod config;
pub mod error;
pub mod generator;
pub mod params;
pub mod prime;
pub mod record;
pub mod rng;
pub mod solver;

pub use calibrate::{Calibration, calibrate};
pub use commitment::Commitment;
pub use config::{CalibrationConfig, PuzzleConfig, SolverConfig};
pub use error::{PuzzleError, Result};
pub use generator::{TrapdoorGenerator, generate_puzzle};
pub use params::PuzzleParams;
pub use prime::{IncrementalSearch, PrimalityOracle};
pub use record::PuzzleRecord;
pub use solver::{
    CancellationToken, NoProgress, Progress, ProgressSink, SequentialSolver, SolutionResult,
    solve_puzzle,
};
