//! Metadata record for binary datasets
//!
//! The metadata artifact is four newline-terminated ASCII lines:
//!
//! ```text
//! BINARY
//! <rows>
//! <cols>
//! <dtype-name>
//! ```

use super::constants::BINARY_TAG;
use super::DataType;
use crate::validation::{element_count, parse_count, payload_len};
use crate::{DsioError, Field, Result};

/// Shape and element type of a binary payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaRecord {
    /// Number of rows
    pub rows: u64,
    /// Number of columns
    pub cols: u64,
    /// Element type of the payload
    pub data_type: DataType,
}

impl MetaRecord {
    pub const fn new(rows: u64, cols: u64, data_type: DataType) -> Self {
        Self {
            rows,
            cols,
            data_type,
        }
    }

    /// Number of elements the payload holds
    pub fn element_count(&self) -> Result<u64> {
        element_count(self.rows, self.cols)
    }

    /// Exact payload length in bytes
    pub fn payload_len(&self) -> Result<u64> {
        payload_len(self.rows, self.cols, self.data_type)
    }

    /// Parse the text of a metadata artifact.
    ///
    /// Lines may end in `\n` or `\r\n` and the final newline is optional.
    /// Content after the fourth line is ignored; use [`Self::trailing_lines`]
    /// to detect it.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();

        let tag = lines.next().ok_or(DsioError::MissingTag)?;
        if tag.trim().as_bytes() != BINARY_TAG {
            return Err(DsioError::TagMismatch);
        }

        let rows = lines.next().ok_or(DsioError::MissingField(Field::Rows))?;
        let rows = parse_count(rows.trim(), Field::Rows)?;

        let cols = lines.next().ok_or(DsioError::MissingField(Field::Cols))?;
        let cols = parse_count(cols.trim(), Field::Cols)?;

        let name = lines
            .next()
            .ok_or(DsioError::MissingField(Field::DataType))?;
        let data_type = DataType::from_name(name).ok_or(DsioError::UnsupportedDataType)?;

        let record = Self::new(rows, cols, data_type);
        record.payload_len()?;
        Ok(record)
    }

    /// Count non-blank lines after the four header lines
    pub fn trailing_lines(text: &str) -> usize {
        text.lines()
            .skip(super::constants::META_LINES)
            .filter(|line| !line.trim().is_empty())
            .count()
    }

    /// Write the four header lines, each newline-terminated
    pub fn write_to<W: core::fmt::Write>(&self, out: &mut W) -> core::fmt::Result {
        // BINARY_TAG is ASCII
        for &byte in BINARY_TAG {
            out.write_char(byte as char)?;
        }
        write!(out, "\n{}\n{}\n{}\n", self.rows, self.cols, self.data_type)
    }

    /// Render the metadata artifact text
    #[cfg(feature = "alloc")]
    pub fn to_text(&self) -> alloc::string::String {
        let mut text = alloc::string::String::new();
        // Writing into a String cannot fail
        let _ = self.write_to(&mut text);
        text
    }
}
