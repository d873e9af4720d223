//! JSON persistence for the ledger files
//!
//! `transactions.json` and `budgets.json` are rewritten whole on every change.
//! A write goes to a sibling `.json.tmp` file first and replaces the target
//! only once it is on disk, so a crash leaves either the old or the new file.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::LedgerError;

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> LedgerError {
    LedgerError::Storage(format!("{} {}: {}", action, path.display(), err))
}

/// Sibling path the next version of `path` is staged in
fn staging_path(path: &Path) -> PathBuf {
    path.with_extension("json.tmp")
}

/// Load a ledger file; a file that was never written reads as `T::default()`
pub fn read_json<T, P>(path: P) -> Result<T, LedgerError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error("Cannot open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| storage_error("Corrupt ledger file", path, e))
}

/// Replace a ledger file with the JSON form of `data`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), LedgerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("Cannot create", dir, e))?;
    }

    let staged = staging_path(path);
    let result = stage(&staged, data).and_then(|()| {
        fs::rename(&staged, path).map_err(|e| storage_error("Cannot replace", path, e))
    });

    if result.is_err() {
        let _ = fs::remove_file(&staged);
    }
    result?;

    log::trace!("Wrote {}", path.display());
    Ok(())
}

/// Serialize into `staged` and flush it to disk
fn stage<T: Serialize>(staged: &Path, data: &T) -> Result<(), LedgerError> {
    let file = File::create(staged).map_err(|e| storage_error("Cannot create", staged, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("Cannot serialize", staged, e))?;

    let file = writer
        .into_inner()
        .map_err(|e| storage_error("Cannot flush", staged, e.error()))?;
    file.sync_all().map_err(|e| storage_error("Cannot sync", staged, e))
}
