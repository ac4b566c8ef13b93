use anyhow::Result;
use rug::Integer;
use rug::integer::Order;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::StorageError;

/// Writes the magnitude of `value` as minimal big-endian bytes.
///
/// Zero becomes an empty file.
pub fn write_integer(path: impl AsRef<Path>, value: &Integer) -> Result<()> {
    if value.is_negative() {
        return Err(StorageError::NegativeInteger.into());
    }

    let path = path.as_ref();
    let bytes = value.to_digits::<u8>(Order::MsfBe);
    fs::write(path, &bytes).map_err(StorageError::Io)?;
    debug!(path = %path.display(), bytes = bytes.len(), "integer written");
    Ok(())
}

/// Reads an integer written by [`write_integer`]; an empty file reads as zero.
pub fn read_integer(path: impl AsRef<Path>) -> Result<Integer> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(StorageError::Io)?;
    debug!(path = %path.display(), bytes = bytes.len(), "integer read");
    Ok(Integer::from_digits(&bytes, Order::MsfBe))
}
