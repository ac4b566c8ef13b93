//! File persistence for time-lock puzzle artifacts.
//!
//! Two formats live here: the raw big-endian bytes of a single integer, used
//! to cache expensive parameters such as a modulus between runs, and the JSON
//! puzzle record handed from generator to solver.

mod error;
mod integer;
mod record;

pub use error::StorageError;
pub use integer::{read_integer, write_integer};
pub use record::{load_record, save_record};
