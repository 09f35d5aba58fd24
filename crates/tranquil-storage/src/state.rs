use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::objects;

/// Load a JSON document from the store.
pub async fn load_state<T: DeserializeOwned>(root: &Path, key: &str) -> Result<T, StorageError> {
    let body = objects::get_object(root, key).await?;
    let value: T = serde_json::from_slice(&body)?;
    Ok(value)
}

/// Like [`load_state`], but a missing document is `Ok(None)`.
pub async fn load_state_opt<T: DeserializeOwned>(
    root: &Path,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match load_state(root, key).await {
        Ok(value) => Ok(Some(value)),
        Err(StorageError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Save a JSON document to the store.
pub async fn save_state<T: Serialize>(
    root: &Path,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    objects::put_object(root, key, body).await
}
