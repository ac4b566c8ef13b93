use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rug::Integer;
use tracing::{debug, info, warn};

use crate::arith::{cycle_exponent, exp_mod};
use crate::commitment::{Commitment, DIGEST_LEN, unlock_key};
use crate::config::SolverConfig;
use crate::error::{PuzzleError, Result};
use crate::record::PuzzleRecord;

/// Snapshot handed to a [`ProgressSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Cycles already completed.
    pub current: u64,
    pub total: u64,
    /// Extrapolated from the mean cycle time so far; `None` before the first
    /// cycle has finished.
    pub estimated_remaining: Option<Duration>,
}

pub trait ProgressSink {
    fn report(&mut self, progress: Progress);
}

impl<F: FnMut(Progress)> ProgressSink for F {
    fn report(&mut self, progress: Progress) {
        self(progress)
    }
}

/// Discards every report.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _progress: Progress) {}
}

#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation to any listening operations
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Checks if cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionResult {
    value: Integer,
    cycles: u64,
    elapsed: Duration,
}

impl SolutionResult {
    pub fn value(&self) -> &Integer {
        &self.value
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// `H(solution)`, the secret the puzzle was locking.
    pub fn unlock_key(&self) -> [u8; DIGEST_LEN] {
        unlock_key(&self.value)
    }
}

/// Replays a puzzle without the trapdoor.
///
/// Cycle `i` raises the output of cycle `i - 1` to `e = 2^t` modulo `N`; there
/// is no way to start a cycle before its predecessor has finished.
pub struct SequentialSolver<'a> {
    record: &'a PuzzleRecord,
    config: SolverConfig,
}

impl<'a> SequentialSolver<'a> {
    pub fn new(record: &'a PuzzleRecord, config: SolverConfig) -> Self {
        SequentialSolver { record, config }
    }

    pub fn solve(&self) -> Result<SolutionResult> {
        self.solve_with(&mut NoProgress, &CancellationToken::new())
    }

    /// Runs all cycles, then checks the result against the record's
    /// commitment.
    ///
    /// A cancelled solve yields [`PuzzleError::Cancelled`] and no value.
    pub fn solve_with(
        &self,
        progress: &mut dyn ProgressSink,
        cancelled: &CancellationToken,
    ) -> Result<SolutionResult> {
        let modulus = self.record.modulus();
        let total = self.record.cycles();
        // Rebuilt from t rather than taken from anywhere precomputed.
        let exponent = cycle_exponent(self.record.exponent_log());
        let interval = self.config.progress_interval;

        info!(
            modulus_bits = modulus.significant_bits(),
            exponent_log = self.record.exponent_log(),
            cycles = total,
            squarings = %self.record.params().total_squarings(),
            "solving time-lock puzzle"
        );

        let started = Instant::now();
        let mut value = self.record.base().clone();

        for current in 0..total {
            if cancelled.is_cancelled() {
                warn!(current, total, "solve cancelled");
                return Err(PuzzleError::Cancelled);
            }

            if interval > 0 && current % interval == 0 {
                let update = Progress {
                    current,
                    total,
                    estimated_remaining: estimate_remaining(started.elapsed(), current, total),
                };
                debug!(current, total, "solve progress");
                progress.report(update);
            }

            value = exp_mod(&value, &exponent, modulus)?;
        }

        let elapsed = started.elapsed();
        let actual = Commitment::of(&value);
        if actual != *self.record.commitment() {
            warn!(expected = %self.record.commitment(), actual = %actual, "commitment mismatch");
            return Err(PuzzleError::SolutionMismatch {
                expected: self.record.commitment().to_hex(),
                actual: actual.to_hex(),
            });
        }

        info!(?elapsed, "time-lock puzzle solved");
        Ok(SolutionResult {
            value,
            cycles: total,
            elapsed,
        })
    }
}

fn estimate_remaining(elapsed: Duration, current: u64, total: u64) -> Option<Duration> {
    if current == 0 {
        return None;
    }
    let per_cycle = elapsed.as_nanos() / u128::from(current);
    let remaining = per_cycle.saturating_mul(u128::from(total - current));
    let secs = u64::try_from(remaining / 1_000_000_000).unwrap_or(u64::MAX);
    // Always below 10^9, so the cast cannot truncate.
    let nanos = (remaining % 1_000_000_000) as u32;
    Some(Duration::new(secs, nanos))
}

/// Solves with default settings, optionally reporting progress.
pub fn solve_puzzle(
    record: &PuzzleRecord,
    progress: Option<&mut dyn ProgressSink>,
) -> Result<SolutionResult> {
    let solver = SequentialSolver::new(record, SolverConfig::default());
    match progress {
        Some(sink) => solver.solve_with(sink, &CancellationToken::new()),
        None => solver.solve(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PuzzleParams;

    fn record(base: u32, cycles: u64, solution: u32) -> PuzzleRecord {
        let params = PuzzleParams::new(Integer::from(77), Integer::from(base), 2, cycles).unwrap();
        PuzzleRecord::new(params, Commitment::of(&Integer::from(solution)), "")
    }

    #[test]
    fn test_solve_small_example() {
        let record = record(5, 3, 9);
        let result = SequentialSolver::new(&record, SolverConfig::default())
            .solve()
            .unwrap();
        assert_eq!(result.value(), &Integer::from(9));
        assert_eq!(result.cycles(), 3);
        assert_eq!(result.unlock_key(), unlock_key(&Integer::from(9)));
    }

    #[test]
    fn test_solve_zero_cycles_returns_base() {
        let record = record(5, 0, 5);
        let result = solve_puzzle(&record, None).unwrap();
        assert_eq!(result.value(), &Integer::from(5));
        assert_eq!(result.cycles(), 0);
    }

    #[test]
    fn test_solve_one_cycle() {
        // 5^4 mod 77 = 9
        let record = record(5, 1, 9);
        let mut seen = Vec::new();
        let mut sink = |p: Progress| seen.push((p.current, p.total));

        let result = SequentialSolver::new(&record, SolverConfig::new(1))
            .solve_with(&mut sink, &CancellationToken::new())
            .unwrap();

        assert_eq!(result.value(), &Integer::from(9));
        assert_eq!(result.cycles(), 1);
        assert_eq!(seen, vec![(0, 1)]);
    }

    #[test]
    fn test_solve_detects_mismatch() {
        let record = record(5, 3, 16);
        let err = solve_puzzle(&record, None).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::SolutionMismatch {
                expected: Commitment::of(&Integer::from(16)).to_hex(),
                actual: Commitment::of(&Integer::from(9)).to_hex(),
            }
        );
    }

    #[test]
    fn test_progress_cadence() {
        let record = record(5, 10, 16);
        let mut seen = Vec::new();
        let mut sink = |p: Progress| seen.push((p.current, p.total));

        SequentialSolver::new(&record, SolverConfig::new(3))
            .solve_with(&mut sink, &CancellationToken::new())
            .unwrap();

        assert_eq!(seen, vec![(0, 10), (3, 10), (6, 10), (9, 10)]);
    }

    #[test]
    fn test_progress_disabled() {
        let record = record(5, 10, 16);
        let mut calls = 0;
        let mut sink = |_: Progress| calls += 1;

        SequentialSolver::new(&record, SolverConfig::new(0))
            .solve_with(&mut sink, &CancellationToken::new())
            .unwrap();

        assert_eq!(calls, 0);
    }

    #[test]
    fn test_progress_does_not_change_result() {
        let record = record(5, 10, 16);
        let quiet = solve_puzzle(&record, None).unwrap();
        let mut sink = |_: Progress| {};
        let noisy = solve_puzzle(&record, Some(&mut sink as &mut dyn ProgressSink)).unwrap();
        assert_eq!(quiet.value(), noisy.value());
    }

    #[test]
    fn test_solve_with_cancellation() {
        let record = record(5, 3, 9);
        let token = CancellationToken::new();
        token.cancel();

        let result = SequentialSolver::new(&record, SolverConfig::default())
            .solve_with(&mut NoProgress, &token);
        assert_eq!(result, Err(PuzzleError::Cancelled));
    }

    #[test]
    fn test_cancel_from_progress_sink() {
        let record = record(5, 10, 16);
        let token = CancellationToken::new();
        let observer = token.clone();
        let mut last = 0;
        let mut sink = |p: Progress| {
            last = p.current;
            if p.current == 4 {
                observer.cancel();
            }
        };

        let result = SequentialSolver::new(&record, SolverConfig::new(1))
            .solve_with(&mut sink, &token);
        assert_eq!(result, Err(PuzzleError::Cancelled));
        assert_eq!(last, 4);
    }

    #[test]
    fn test_cancellation_token_functionality() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());

        let shared = token.clone();
        shared.cancel();
        assert!(token.is_cancelled());
        assert!(shared.is_cancelled());
    }

    #[test]
    fn test_estimate_remaining() {
        assert_eq!(estimate_remaining(Duration::from_secs(5), 0, 10), None);
        assert_eq!(
            estimate_remaining(Duration::from_secs(5), 5, 10),
            Some(Duration::from_secs(5))
        );
        assert_eq!(
            estimate_remaining(Duration::from_millis(300), 3, 10),
            Some(Duration::from_millis(700))
        );
        assert_eq!(
            estimate_remaining(Duration::from_secs(1), 10, 10),
            Some(Duration::ZERO)
        );
    }
}
