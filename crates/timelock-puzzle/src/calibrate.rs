use std::time::{Duration, Instant};

use rand::RngCore;
use rug::Integer;
use tracing::{debug, info};

use crate::arith::{cycle_exponent, exp_mod};
use crate::config::CalibrationConfig;
use crate::error::{PuzzleError, Result};
use crate::rng::random_below;

/// Wall-clock cost of single cycles measured on this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calibration {
    samples: Vec<Duration>,
}

impl Calibration {
    pub fn samples(&self) -> &[Duration] {
        &self.samples
    }

    pub fn mean(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let total: u128 = self.samples.iter().map(Duration::as_nanos).sum();
        let mean = total / self.samples.len() as u128;
        Duration::from_nanos(u64::try_from(mean).unwrap_or(u64::MAX))
    }

    /// Cycle count whose expected solve time is closest to `target`, never
    /// less than one.
    pub fn cycles_for(&self, target: Duration) -> u64 {
        let per_cycle = self.mean().as_nanos().max(1);
        let cycles = (target.as_nanos() + per_cycle / 2) / per_cycle;
        u64::try_from(cycles).unwrap_or(u64::MAX).max(1)
    }
}

/// Times `config.samples` independent cycles over fresh random bases.
///
/// Advisory only: the result helps a human pick a cycle count and has no
/// bearing on puzzle correctness.
pub fn calibrate<R: RngCore + ?Sized>(
    modulus: &Integer,
    config: &CalibrationConfig,
    rng: &mut R,
) -> Result<Calibration> {
    config.validate()?;
    if *modulus <= 1 {
        return Err(PuzzleError::InvalidParameter(format!(
            "modulus must be greater than 1, got {}",
            modulus
        )));
    }

    let exponent = cycle_exponent(config.exponent_log);
    let mut samples = Vec::with_capacity(config.samples);

    for sample in 0..config.samples {
        let base = random_below(modulus, rng)?;
        let started = Instant::now();
        let value = exp_mod(&base, &exponent, modulus)?;
        let took = started.elapsed();
        std::hint::black_box(value);

        debug!(sample, ?took, "calibration sample");
        samples.push(took);
    }

    let calibration = Calibration { samples };
    info!(mean = ?calibration.mean(), samples = config.samples, "calibration finished");
    Ok(calibration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_calibrate_collects_samples() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let modulus = Integer::from(1_000_003u32) * 998_244_353u32;
        let calibration = calibrate(&modulus, &CalibrationConfig::new(256, 4), &mut rng).unwrap();

        assert_eq!(calibration.samples().len(), 4);
        assert!(calibration.mean() <= *calibration.samples().iter().max().unwrap());
        assert!(calibration.mean() >= *calibration.samples().iter().min().unwrap());
    }

    #[test]
    fn test_calibrate_rejects_bad_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(matches!(
            calibrate(&Integer::from(77), &CalibrationConfig::new(8, 0), &mut rng),
            Err(PuzzleError::InvalidParameter(_))
        ));
        assert!(matches!(
            calibrate(&Integer::from(1), &CalibrationConfig::new(8, 3), &mut rng),
            Err(PuzzleError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_mean_and_cycles_for() {
        let calibration = Calibration {
            samples: vec![
                Duration::from_millis(900),
                Duration::from_millis(1000),
                Duration::from_millis(1100),
            ],
        };
        assert_eq!(calibration.mean(), Duration::from_secs(1));
        assert_eq!(calibration.cycles_for(Duration::from_secs(3600)), 3600);
        assert_eq!(calibration.cycles_for(Duration::from_millis(1400)), 1);
        assert_eq!(calibration.cycles_for(Duration::from_millis(1600)), 2);
        assert_eq!(calibration.cycles_for(Duration::ZERO), 1);
    }

    #[test]
    fn test_empty_calibration_mean() {
        let calibration = Calibration { samples: vec![] };
        assert_eq!(calibration.mean(), Duration::ZERO);
        assert_eq!(calibration.cycles_for(Duration::from_secs(5)), 5_000_000_000);
    }
}
