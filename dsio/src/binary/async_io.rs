//! Async binary writer built on `tokio::fs`

use super::{meta_record, payload};
use crate::artifact::{meta_path, staging_path};
use crate::dataset::{DatasetElement, Matrix};
use crate::error::{IoResultExt, Result};
use crate::SaveOptions;
use std::path::Path;
use tokio::fs::File as AsyncFile;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

async fn write_staged_async(tmp: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = AsyncFile::create(tmp).await.at_path(tmp)?;
    file.write_all(bytes).await.at_path(tmp)?;
    file.flush().await.at_path(tmp)?;
    file.sync_all().await.at_path(tmp)?;
    drop(file);
    tokio::fs::rename(tmp, path).await.at_path(path)
}

async fn write_artifact_async(path: &Path, bytes: &[u8], staged: bool) -> Result<()> {
    if !staged {
        let mut file = AsyncFile::create(path).await.at_path(path)?;
        file.write_all(bytes).await.at_path(path)?;
        return file.flush().await.at_path(path);
    }

    let tmp = staging_path(path);
    let written = write_staged_async(&tmp, path, bytes).await;
    if written.is_err() {
        if let Err(err) = tokio::fs::remove_file(&tmp).await {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %tmp.display(), error = %err, "failed to remove staging file");
            }
        }
    }
    written
}

/// Async counterpart of [`super::save_with`]
///
/// Writes the metadata artifact, then the payload, through `tokio::fs`.
pub async fn save_async<T: DatasetElement, P: AsRef<Path>>(
    matrix: &Matrix<T>,
    path: P,
    options: SaveOptions,
) -> Result<()> {
    let path = path.as_ref();
    let record = meta_record(matrix);

    write_artifact_async(&meta_path(path), record.to_text().as_bytes(), options.staged()).await?;

    let bytes = payload::encode(matrix.as_slice());
    write_artifact_async(path, &bytes, options.staged()).await?;

    info!(
        path = %path.display(),
        rows = record.rows,
        cols = record.cols,
        dtype = %record.data_type,
        "binary dataset saved (async)"
    );
    Ok(())
}
