//! The public puzzle artifact handed from generator to solver.
//!
//! On the wire a record is a JSON object whose numeric fields are decimal
//! strings:
//!
//! ```json
//! {
//!   "modulus": "77",
//!   "base": "5",
//!   "cycleExponentLog": "2",
//!   "cycleCount": "3",
//!   "commitment": "2ad16b189b68e7672a886c82a0550bc531782a3a4cfb2f08324e316bb0f3174d",
//!   "estimatedUnlockDuration": "3s"
//! }
//! ```
//!
//! Parsing goes through a string-only wire struct and then validates each
//! field on its own, so every deviation surfaces as
//! [`PuzzleError::MalformedRecord`].

use std::str::FromStr;
use std::time::Duration;

use rug::Integer;
use serde::{Deserialize, Serialize};

use crate::commitment::Commitment;
use crate::error::{PuzzleError, Result};
use crate::params::PuzzleParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleRecord {
    params: PuzzleParams,
    commitment: Commitment,
    estimated_unlock_duration: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RecordWire {
    modulus: String,
    base: String,
    cycle_exponent_log: String,
    cycle_count: String,
    commitment: String,
    estimated_unlock_duration: String,
}

impl PuzzleRecord {
    pub fn new(
        params: PuzzleParams,
        commitment: Commitment,
        estimated_unlock_duration: impl Into<String>,
    ) -> Self {
        PuzzleRecord {
            params,
            commitment,
            estimated_unlock_duration: estimated_unlock_duration.into(),
        }
    }

    pub fn params(&self) -> &PuzzleParams {
        &self.params
    }

    pub fn modulus(&self) -> &Integer {
        self.params.modulus()
    }

    pub fn base(&self) -> &Integer {
        self.params.base()
    }

    pub fn exponent_log(&self) -> u32 {
        self.params.exponent_log()
    }

    pub fn cycles(&self) -> u64 {
        self.params.cycles()
    }

    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    /// Advisory only; never used by the solver.
    pub fn estimated_unlock_duration(&self) -> &str {
        &self.estimated_unlock_duration
    }

    fn to_wire(&self) -> RecordWire {
        RecordWire {
            modulus: self.params.modulus().to_string_radix(10),
            base: self.params.base().to_string_radix(10),
            cycle_exponent_log: self.params.exponent_log().to_string(),
            cycle_count: self.params.cycles().to_string(),
            commitment: self.commitment.to_hex(),
            estimated_unlock_duration: self.estimated_unlock_duration.clone(),
        }
    }

    fn from_wire(wire: RecordWire) -> Result<Self> {
        let modulus = parse_integer("modulus", &wire.modulus)?;
        if modulus <= 1 {
            return Err(PuzzleError::MalformedRecord(format!(
                "modulus must be greater than 1, got {}",
                modulus
            )));
        }

        let base = parse_integer("base", &wire.base)?;
        if base >= modulus {
            return Err(PuzzleError::MalformedRecord(
                "base must be smaller than modulus".to_string(),
            ));
        }

        let exponent_log: u32 = parse_word("cycleExponentLog", &wire.cycle_exponent_log)?;
        let cycles: u64 = parse_word("cycleCount", &wire.cycle_count)?;
        let commitment = Commitment::from_hex(&wire.commitment)?;

        let params = PuzzleParams::new(modulus, base, exponent_log, cycles)
            .map_err(|e| PuzzleError::MalformedRecord(e.to_string()))?;

        Ok(PuzzleRecord::new(
            params,
            commitment,
            wire.estimated_unlock_duration,
        ))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.to_wire())
            .map_err(|e| PuzzleError::MalformedRecord(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_wire())
            .map_err(|e| PuzzleError::MalformedRecord(e.to_string()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let wire: RecordWire = serde_json::from_str(text)
            .map_err(|e| PuzzleError::MalformedRecord(e.to_string()))?;
        Self::from_wire(wire)
    }
}

impl FromStr for PuzzleRecord {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(s)
    }
}

fn check_digits(field: &str, text: &str) -> Result<()> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PuzzleError::MalformedRecord(format!(
            "{} must be a non-negative decimal integer, got {:?}",
            field, text
        )));
    }
    Ok(())
}

fn parse_integer(field: &str, text: &str) -> Result<Integer> {
    check_digits(field, text)?;
    Integer::from_str_radix(text, 10)
        .map_err(|e| PuzzleError::MalformedRecord(format!("{}: {}", field, e)))
}

fn parse_word<T: FromStr>(field: &str, text: &str) -> Result<T> {
    check_digits(field, text)?;
    text.parse::<T>()
        .map_err(|_| PuzzleError::MalformedRecord(format!("{} is out of range: {}", field, text)))
}

/// Renders `cycles × per_cycle` as e.g. `1h0m0s`, `2m5s`, `45s` or `250ms`.
pub fn estimate_unlock_duration(cycles: u64, per_cycle: Duration) -> String {
    let total_nanos = per_cycle.as_nanos().saturating_mul(u128::from(cycles));
    let total_secs = total_nanos / 1_000_000_000;

    if total_secs == 0 && total_nanos > 0 {
        return format!("{}ms", total_nanos / 1_000_000);
    }

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
