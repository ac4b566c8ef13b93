//! Double-SHA-256 commitment to a puzzle solution.
//!
//! Integers are hashed as their minimal big-endian magnitude bytes, so zero
//! hashes as the empty string. `H(solution)` is the unlock key a solver
//! obtains; only `H(H(solution))` is ever published.

use std::fmt;
use std::str::FromStr;

use rug::Integer;
use rug::integer::Order;
use sha2::{Digest, Sha256};

use crate::error::{PuzzleError, Result};

pub const DIGEST_LEN: usize = 32;

/// Minimal big-endian bytes of the magnitude of `value`.
pub fn integer_bytes(value: &Integer) -> Vec<u8> {
    value.to_digits::<u8>(Order::MsfBe)
}

/// `H(solution)`, the secret revealed by solving.
pub fn unlock_key(solution: &Integer) -> [u8; DIGEST_LEN] {
    Sha256::digest(integer_bytes(solution)).into()
}

/// Hex of `H(value)`; a short display handle for large public integers.
pub fn fingerprint(value: &Integer) -> String {
    hex::encode(unlock_key(value))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment([u8; DIGEST_LEN]);

impl Commitment {
    /// `H(H(solution))`.
    pub fn of(solution: &Integer) -> Self {
        Self::from_key(&unlock_key(solution))
    }

    pub fn from_key(key: &[u8; DIGEST_LEN]) -> Self {
        Commitment(Sha256::digest(key).into())
    }

    pub fn matches(&self, solution: &Integer) -> bool {
        *self == Self::of(solution)
    }

    pub fn verify_key(&self, key: &[u8; DIGEST_LEN]) -> bool {
        *self == Self::from_key(key)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses exactly 64 lowercase hex digits.
    pub fn from_hex(text: &str) -> Result<Self> {
        let well_formed = text.len() == DIGEST_LEN * 2
            && text
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return Err(PuzzleError::MalformedRecord(format!(
                "commitment must be {} lowercase hex digits, got {:?}",
                DIGEST_LEN * 2,
                text
            )));
        }

        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(text, &mut bytes)
            .map_err(|e| PuzzleError::MalformedRecord(format!("commitment: {}", e)))?;
        Ok(Commitment(bytes))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Commitment {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
