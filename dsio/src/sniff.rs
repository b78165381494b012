//! Format detection and format-agnostic load/save

use crate::artifact::payload_path;
use crate::dataset::DynamicDataset;
use crate::error::{Error, FormatError, Result};
use crate::{binary, text, LoadOptions, SaveOptions};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// On-disk dataset encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FileFormat {
    /// `BINARY` metadata artifact plus raw payload
    Binary,
    /// Whitespace-delimited numeric text
    Text,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileFormat::Binary => "binary",
            FileFormat::Text => "text",
        })
    }
}

/// Identify the encoding of `path`. The binary check runs first.
pub fn sniff(path: impl AsRef<Path>) -> Result<Option<FileFormat>> {
    let path = path.as_ref();
    let format = if binary::check(path)? {
        Some(FileFormat::Binary)
    } else if text::check(path)? {
        Some(FileFormat::Text)
    } else {
        None
    };
    debug!(path = %path.display(), format = ?format, "sniffed");
    Ok(format)
}

/// Load whichever encoding `path` holds.
///
/// A path naming a metadata artifact loads its storage pair. An
/// unrecognized file is read as a raw binary payload when the options
/// carry both rows and cols.
pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<DynamicDataset> {
    let path = path.as_ref();
    match sniff(path)? {
        Some(FileFormat::Binary) => binary::load(payload_path(path), options),
        Some(FileFormat::Text) => text::load(path, options),
        None if options.shape().is_some() => binary::load(path, options),
        None => Err(Error::format(path, FormatError::Unrecognized)),
    }
}

/// Save with default [`SaveOptions`]
pub fn save(dataset: &DynamicDataset, path: impl AsRef<Path>, format: FileFormat) -> Result<()> {
    save_with(dataset, path, format, &SaveOptions::default())
}

pub fn save_with(
    dataset: &DynamicDataset,
    path: impl AsRef<Path>,
    format: FileFormat,
    options: &SaveOptions,
) -> Result<()> {
    match format {
        FileFormat::Binary => dataset.save_binary(path, options),
        FileFormat::Text => dataset.save_text(path, options),
    }
}
