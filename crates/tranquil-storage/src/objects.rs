use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Resolve a store key (e.g. `sessions/morning.json`) under `root`.
pub fn object_path(root: &Path, key: &str) -> PathBuf {
    key.split('/').fold(root.to_path_buf(), |path, part| path.join(part))
}

/// Read an object. Missing files map to [`StorageError::NotFound`].
pub async fn get_object(root: &Path, key: &str) -> Result<Vec<u8>, StorageError> {
    let path = object_path(root, key);
    match tokio::fs::read(&path).await {
        Ok(body) => Ok(body),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound {
            key: key.to_string(),
        }),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

/// Write an object atomically: temp file in the same directory, then rename.
pub async fn put_object(root: &Path, key: &str, body: Vec<u8>) -> Result<(), StorageError> {
    let path = object_path(root, key);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::io(parent, e))?;
    }

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, &body)
        .await
        .map_err(|e| StorageError::io(&tmp_path, e))?;
    tokio::fs::rename(&tmp_path, &path)
        .await
        .map_err(|e| StorageError::io(&path, e))?;

    tracing::debug!(path = %path.display(), bytes = body.len(), "object written");
    Ok(())
}

/// Delete an object. Deleting a missing object succeeds.
pub async fn delete_object(root: &Path, key: &str) -> Result<(), StorageError> {
    let path = object_path(root, key);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "object deleted");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

/// List `.json` objects directly under a prefix such as `assessments/`.
/// Returns keys, sorted. A missing prefix directory lists as empty.
pub async fn list_objects(root: &Path, prefix: &str) -> Result<Vec<String>, StorageError> {
    let dir = object_path(root, prefix.trim_end_matches('/'));
    let mut entries = match tokio::fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StorageError::io(dir, e)),
    };

    let mut keys = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| StorageError::io(&dir, e))?
    {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.ends_with(".json") {
            keys.push(format!("{prefix}{name}"));
        }
    }
    keys.sort();
    Ok(keys)
}
