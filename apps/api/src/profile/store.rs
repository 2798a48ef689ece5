//! Flat-file profile store.
//!
//! Records are JSON documents in `<folder>/<name>.txt`. Overwrite mode writes the
//! record alone; append mode keeps a JSON list, wrapping a previously stored single
//! record. Every write goes through a temp file and an atomic rename, and a failed
//! append restores the file's previous bytes before returning the error.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{error, info};

use crate::errors::AppError;

const FILE_SUFFIX: &str = ".txt";

/// Serializes writers per target path.
#[derive(Debug, Default)]
pub struct ProfileStore {
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

/// Appends `.txt` unless the name already ends with it.
pub fn file_name(base: &str) -> String {
    if base.ends_with(FILE_SUFFIX) {
        base.to_string()
    } else {
        format!("{base}{FILE_SUFFIX}")
    }
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|p| p.into_inner());
        Arc::clone(locks.entry(path.to_path_buf()).or_default())
    }

    /// Saves `record` under `folder`, returning the path written.
    pub fn save<T: Serialize>(
        &self,
        record: &T,
        folder: &Path,
        file_base: &str,
        overwrite: bool,
    ) -> Result<PathBuf, AppError> {
        // Serialize before touching the file system.
        let value = serde_json::to_value(record)
            .map_err(|e| AppError::Serialization(format!("Invalid record: {e}")))?;

        fs::create_dir_all(folder)?;
        let path = folder.join(file_name(file_base));

        let lock = self.lock_for(&path);
        let result = {
            let _guard = lock.lock().unwrap_or_else(|p| p.into_inner());
            write_record(folder, &path, value, overwrite)
        };
        drop(lock);
        self.release(&path);

        result.map(|()| path)
    }

    /// Drops the lock entry for `path` once no writer holds or waits on it.
    fn release(&self, path: &Path) {
        let mut locks = self.locks.lock().unwrap_or_else(|p| p.into_inner());
        if locks
            .get(path)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(path);
        }
    }
}

fn write_record(folder: &Path, path: &Path, value: Value, overwrite: bool) -> Result<(), AppError> {
    if overwrite {
        write_atomic(folder, path, &encode(&value)?)?;
        info!("Saved profile to {}", path.display());
        return Ok(());
    }

    let original = match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };

    match append_record(folder, path, original.as_deref(), value) {
        Ok(count) => {
            info!("Appended profile to {} ({count} records)", path.display());
            Ok(())
        }
        Err(e) => {
            if let Some(bytes) = &original {
                restore(path, bytes);
            }
            Err(e)
        }
    }
}

fn encode(value: &Value) -> Result<Vec<u8>, AppError> {
    serde_json::to_vec(value).map_err(|e| AppError::Serialization(format!("Invalid record: {e}")))
}

fn append_record(
    folder: &Path,
    path: &Path,
    original: Option<&[u8]>,
    value: Value,
) -> Result<usize, AppError> {
    let mut records = match original {
        Some(bytes) if !bytes.iter().all(u8::is_ascii_whitespace) => {
            let existing: Value = serde_json::from_slice(bytes).map_err(|e| {
                AppError::Corruption(format!("{} is not valid JSON: {e}", path.display()))
            })?;
            match existing {
                Value::Array(items) => items,
                single => vec![single],
            }
        }
        _ => Vec::new(),
    };

    records.push(value);
    let count = records.len();
    write_atomic(folder, path, &encode(&Value::Array(records))?)?;
    Ok(count)
}

fn write_atomic(folder: &Path, path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    let mut tmp = NamedTempFile::new_in(folder)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| AppError::Storage(e.error))?;
    Ok(())
}

/// Puts `original` back if the file no longer holds exactly those bytes.
fn restore(path: &Path, original: &[u8]) {
    let unchanged = fs::read(path).map(|now| now == original).unwrap_or(false);
    if unchanged {
        return;
    }
    if let Err(e) = fs::write(path, original) {
        error!("Failed to restore {}: {e}", path.display());
    }
}
