//! Binary exponentiation over `rug::Integer`.
//!
//! Both routines walk the exponent from its least significant bit: the running
//! power of the base is squared once per bit and folded into the accumulator
//! whenever the bit is set. The modular variant reduces after every multiply
//! and square so operands never grow past twice the modulus width.

use rug::Integer;
use rug::ops::RemRounding;

use crate::error::{PuzzleError, Result};

/// Squares `value` in place and reduces it modulo `modulus`.
#[inline]
pub(crate) fn square_mod(value: &mut Integer, modulus: &Integer) {
    value.square_mut();
    *value %= modulus;
}

/// Computes `base^exponent mod modulus` by square-and-multiply.
///
/// `exponent` must be non-negative and `modulus` greater than one. The result
/// always lies in `[0, modulus)`, including for a negative `base`.
pub fn exp_mod(base: &Integer, exponent: &Integer, modulus: &Integer) -> Result<Integer> {
    if *modulus <= 1 {
        return Err(PuzzleError::InvalidParameter(format!(
            "modulus must be greater than 1, got {}",
            modulus
        )));
    }
    if exponent.is_negative() {
        return Err(PuzzleError::InvalidParameter(format!(
            "exponent must be non-negative, got {}",
            exponent
        )));
    }

    let mut acc = Integer::from(1);
    let mut power = base.clone().rem_euc(modulus);
    let bits = exponent.significant_bits();

    for bit in 0..bits {
        if exponent.get_bit(bit) {
            acc *= &power;
            acc %= modulus;
        }
        // The last square would never be used.
        if bit + 1 < bits {
            square_mod(&mut power, modulus);
        }
    }

    Ok(acc)
}

/// Computes the exact power `base^exponent` without any reduction.
///
/// Used to materialise the per-cycle exponent `e = 2^t`, which for realistic
/// `t` is an integer of several thousand bits.
pub fn exp_exact(base: &Integer, exponent: u32) -> Integer {
    let mut acc = Integer::from(1);
    let mut power = base.clone();
    let mut remaining = exponent;

    while remaining > 0 {
        if remaining & 1 == 1 {
            acc *= &power;
        }
        remaining >>= 1;
        if remaining > 0 {
            power.square_mut();
        }
    }

    acc
}

/// The exponent applied once per cycle: `e = 2^exponent_log`.
pub fn cycle_exponent(exponent_log: u32) -> Integer {
    exp_exact(&Integer::from(2), exponent_log)
}
