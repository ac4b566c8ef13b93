use anyhow::Result;
use std::fs;
use std::path::Path;
use timelock_puzzle::PuzzleRecord;
use tracing::info;

use crate::StorageError;

/// Writes `record` as pretty-printed JSON.
pub fn save_record(path: impl AsRef<Path>, record: &PuzzleRecord) -> Result<()> {
    let path = path.as_ref();
    let json = record.to_json_pretty().map_err(StorageError::Record)?;
    fs::write(path, json).map_err(StorageError::Io)?;
    info!(path = %path.display(), commitment = %record.commitment(), "puzzle record saved");
    Ok(())
}

/// Reads and validates a record written by [`save_record`] or any other
/// producer of the same JSON shape.
pub fn load_record(path: impl AsRef<Path>) -> Result<PuzzleRecord> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(StorageError::Io)?;
    let record = PuzzleRecord::from_json(&json).map_err(StorageError::Record)?;
    info!(path = %path.display(), cycles = record.cycles(), "puzzle record loaded");
    Ok(record)
}
