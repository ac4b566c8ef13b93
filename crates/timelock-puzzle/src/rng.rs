use rand::RngCore;
use rug::Integer;
use rug::rand::{ThreadRandGen, ThreadRandState};

use crate::error::{PuzzleError, Result};

/// Feeds GMP's sampler from a caller-supplied `RngCore`.
struct RngSource<'a, R: RngCore + ?Sized>(&'a mut R);

impl<R: RngCore + ?Sized> ThreadRandGen for RngSource<'_, R> {
    fn r#gen(&mut self) -> u32 {
        self.0.next_u32()
    }
}

/// Draws an integer uniformly from `[0, bound)`.
pub fn random_below<R: RngCore + ?Sized>(bound: &Integer, rng: &mut R) -> Result<Integer> {
    if *bound <= 0 {
        return Err(PuzzleError::InvalidParameter(format!(
            "random bound must be positive, got {}",
            bound
        )));
    }

    let mut source = RngSource(rng);
    let mut state = ThreadRandState::new_custom(&mut source);
    Ok(bound.clone().random_below(&mut state))
}
