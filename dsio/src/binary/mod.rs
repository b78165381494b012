//! Binary dataset codec
//!
//! A binary dataset is written as a storage pair:
//!
//! - `<path>.meta`: four text lines, `BINARY`, rows, cols, element type
//! - `<path>`: raw row-major little-endian element bytes
//!
//! The metadata artifact is always written before the payload and read
//! before it. When it is missing, the caller must supply the shape through
//! [`LoadOptions`].

mod payload;

#[cfg(feature = "async")]
mod async_io;

#[cfg(feature = "async")]
pub use async_io::save_async;

use crate::artifact::{meta_path, write_artifact};
use crate::dataset::{for_data_type, DatasetElement, DynamicDataset, Matrix};
use crate::error::{Error, IoResultExt, Result};
use crate::{LoadOptions, SaveOptions};
use dsio_core::constants::{BINARY_TAG, DEFAULT_DATA_TYPE, TAG_LEN};
use dsio_core::validation::{payload_len, to_usize};
use dsio_core::{DataType, MetaRecord};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Metadata record describing a matrix
pub fn meta_record<T: DatasetElement>(matrix: &Matrix<T>) -> MetaRecord {
    MetaRecord::new(matrix.nrows() as u64, matrix.ncols() as u64, T::data_type())
}

/// Save with default [`SaveOptions`]
pub fn save<T: DatasetElement>(matrix: &Matrix<T>, path: impl AsRef<Path>) -> Result<()> {
    save_with(matrix, path, &SaveOptions::default())
}

/// Write the metadata artifact, then the payload
pub fn save_with<T: DatasetElement>(
    matrix: &Matrix<T>,
    path: impl AsRef<Path>,
    options: &SaveOptions,
) -> Result<()> {
    let path = path.as_ref();
    let record = meta_record(matrix);
    let meta = meta_path(path);

    write_artifact(&meta, record.to_text().as_bytes(), options.staged())?;

    let bytes = payload::encode(matrix.as_slice());
    write_artifact(path, &bytes, options.staged())?;

    info!(
        path = %path.display(),
        rows = record.rows,
        cols = record.cols,
        dtype = %record.data_type,
        "binary dataset saved"
    );
    Ok(())
}

/// Read and parse the metadata artifact for `path`, if one exists
pub fn read_meta(path: impl AsRef<Path>) -> Result<Option<MetaRecord>> {
    let meta = meta_path(path.as_ref());
    let text = match fs::read(&meta) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(Error::io(&meta, err)),
    };
    let text = String::from_utf8_lossy(&text);

    let record = MetaRecord::parse(&text).map_err(|err| Error::format(&meta, err))?;
    let extra = MetaRecord::trailing_lines(&text);
    if extra > 0 {
        warn!(path = %meta.display(), lines = extra, "ignoring trailing metadata lines");
    }
    Ok(Some(record))
}

/// Resolve shape and element type from metadata or caller options
fn resolve(path: &Path, options: &LoadOptions) -> Result<(usize, usize, DataType)> {
    if let Some(record) = read_meta(path)? {
        let overridden = options.rows().is_some_and(|rows| rows as u64 != record.rows)
            || options.cols().is_some_and(|cols| cols as u64 != record.cols)
            || options.data_type().is_some_and(|dt| dt != record.data_type);
        if overridden {
            debug!(path = %path.display(), "metadata overrides caller shape");
        }
        let meta = meta_path(path);
        let rows = to_usize(record.rows).map_err(|err| Error::format(&meta, err))?;
        let cols = to_usize(record.cols).map_err(|err| Error::format(&meta, err))?;
        return Ok((rows, cols, record.data_type));
    }

    let (rows, cols) = options.shape().ok_or_else(|| Error::Configuration {
        path: path.to_path_buf(),
        reason: "no metadata artifact present; rows and cols must be supplied",
    })?;
    Ok((rows, cols, options.data_type().unwrap_or(DEFAULT_DATA_TYPE)))
}

/// Load a binary dataset whose element type is decided at run time
pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<DynamicDataset> {
    let path = path.as_ref();
    let (rows, cols, data_type) = resolve(path, options)?;
    for_data_type!(data_type, |T| read_payload::<T>(path, rows, cols))
}

/// Load a binary dataset of a known element type
pub fn load_as<T: DatasetElement>(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Matrix<T>> {
    let path = path.as_ref();
    let (rows, cols, data_type) = resolve(path, options)?;
    if data_type != T::data_type() {
        return Err(Error::DataTypeMismatch {
            expected: T::data_type(),
            found: data_type,
        });
    }
    read_payload(path, rows, cols)
}

fn read_payload<T: DatasetElement>(path: &Path, rows: usize, cols: usize) -> Result<Matrix<T>> {
    let expected = payload_len(rows as u64, cols as u64, T::data_type())
        .map_err(|err| Error::format(path, err))?;

    let file = File::open(path).at_path(path)?;
    let actual = file.metadata().at_path(path)?.len();
    if actual < expected {
        return Err(Error::TruncatedData {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }
    if actual > expected {
        debug!(path = %path.display(), excess = actual - expected, "ignoring bytes past declared shape");
    }

    let len = to_usize(expected).map_err(|err| Error::format(path, err))?;
    let data = payload::read_prefix::<T>(file, path, len)?;
    let matrix = Matrix::from_vec(rows, cols, data)?;

    info!(
        path = %path.display(),
        rows,
        cols,
        dtype = %T::data_type(),
        "binary dataset loaded"
    );
    Ok(matrix)
}

/// Whether the file's first bytes are the `BINARY` tag. Short files are not.
fn has_tag(path: &Path) -> Result<bool> {
    let file = File::open(path).at_path(path)?;
    let mut head = Vec::with_capacity(TAG_LEN);
    file.take(TAG_LEN as u64).read_to_end(&mut head).at_path(path)?;
    Ok(head == BINARY_TAG)
}

/// Sniff for a binary dataset.
///
/// True if `path` starts with the `BINARY` tag, or if `path` is the payload
/// of a storage pair whose metadata artifact does.
pub fn check(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if has_tag(path)? {
        return Ok(true);
    }
    let meta = meta_path(path);
    if meta.is_file() {
        return has_tag(&meta);
    }
    Ok(false)
}
