//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::BudgetError;

/// Read JSON from a file, returning `None` if the file doesn't exist
pub fn read_json_opt<T, P>(path: P) -> Result<Option<T>, BudgetError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| BudgetError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map(Some)
        .map_err(|e| BudgetError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The value is encoded before anything touches the disk, so an encoding
/// failure returns `BudgetError::Json` and leaves the existing file as it was.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), BudgetError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    stage_json(path, data)?.commit()
}

/// Encode `data` and write it, synced, to a temp file beside `path`
///
/// Nothing at `path` changes until [`StagedWrite::commit`]. Dropping the
/// staged write without committing removes the temp file.
pub fn stage_json<T, P>(path: P, data: &T) -> Result<StagedWrite, BudgetError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let encoded = serde_json::to_vec_pretty(data)
        .map_err(|e| BudgetError::Json(format!("Failed to serialize data: {}", e)))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            BudgetError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let staged = StagedWrite {
        temp_path: path.with_extension("json.tmp"),
        path: path.to_path_buf(),
    };

    let mut file = File::create(&staged.temp_path)
        .map_err(|e| BudgetError::Storage(format!("Failed to create temp file: {}", e)))?;

    file.write_all(&encoded)
        .map_err(|e| BudgetError::Storage(format!("Failed to write data: {}", e)))?;

    file.sync_all()
        .map_err(|e| BudgetError::Storage(format!("Failed to sync data: {}", e)))?;

    Ok(staged)
}

/// A fully written temp file waiting to replace its target
#[derive(Debug)]
pub struct StagedWrite {
    temp_path: PathBuf,
    path: PathBuf,
}

impl StagedWrite {
    /// Atomically replace the target with the staged contents
    pub fn commit(self) -> Result<(), BudgetError> {
        fs::rename(&self.temp_path, &self.path).map_err(|e| {
            BudgetError::Storage(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        // Already gone after a successful commit
        let _ = fs::remove_file(&self.temp_path);
    }
}
