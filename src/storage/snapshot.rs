//! Durable snapshot of the participant list.
//!
//! The whole collection is stored as one pretty-printed JSON array and
//! rewritten in full after every ingestion. Writes land in a sibling temp
//! file first and are renamed over the snapshot, so a failed write leaves the
//! previous copy intact.

use super::store::StoreError;
use super::types::ParticipantRecord;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Reads the snapshot at `path`.
///
/// A missing, unreadable or corrupt file is not fatal: the condition is logged
/// and an empty list is returned.
pub async fn load_snapshot(path: &Path) -> Vec<ParticipantRecord> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::info!(
                "No snapshot at {}, starting with an empty store",
                path.display()
            );
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read snapshot {}: {}. Starting with an empty store",
                path.display(),
                err
            );
            return Vec::new();
        }
    };

    match serde_json::from_slice::<Vec<ParticipantRecord>>(&bytes) {
        Ok(records) => {
            tracing::info!(
                "Loaded {} participants from {}",
                records.len(),
                path.display()
            );
            records
        }
        Err(err) => {
            tracing::warn!(
                "Snapshot {} is corrupt: {}. Starting with an empty store",
                path.display(),
                err
            );
            Vec::new()
        }
    }
}

/// Overwrites the snapshot at `path` with `records`.
pub async fn write_snapshot(path: &Path, records: &[ParticipantRecord]) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(records)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, &json)
        .await
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    if let Err(source) = fs::rename(&tmp_path, path).await {
        if let Err(err) = fs::remove_file(&tmp_path).await {
            tracing::debug!("Failed to remove {}: {}", tmp_path.display(), err);
        }
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    tracing::debug!(
        "Wrote snapshot of {} participants to {}",
        records.len(),
        path.display()
    );
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "participants.json".to_string());
    path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()))
}
