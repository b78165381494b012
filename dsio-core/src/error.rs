//! Error types for dataset header and shape handling

/// Header field a parse error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Rows,
    Cols,
    DataType,
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Field::Rows => "row count",
            Field::Cols => "column count",
            Field::DataType => "element type",
        };
        write!(f, "{name}")
    }
}

/// Errors that can occur while decoding or validating dataset metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DsioError {
    /// Metadata text is empty, so no format tag is present
    MissingTag,
    /// First metadata line is not the `BINARY` tag
    TagMismatch,
    /// A required header line is absent
    MissingField(Field),
    /// A count line is not a non-negative decimal integer
    InvalidNumber(Field),
    /// Element type name is not one of the supported types
    UnsupportedDataType,
    /// rows * cols * element size does not fit the address space
    ShapeOverflow,
    /// Byte buffer too small for the requested element
    InsufficientBuffer,
}

impl core::fmt::Display for DsioError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DsioError::MissingTag => write!(f, "metadata is empty, expected BINARY tag"),
            DsioError::TagMismatch => write!(f, "first metadata line is not the BINARY tag"),
            DsioError::MissingField(field) => write!(f, "metadata is missing the {field} line"),
            DsioError::InvalidNumber(field) => write!(f, "metadata {field} is not a valid count"),
            DsioError::UnsupportedDataType => write!(f, "unsupported element type"),
            DsioError::ShapeOverflow => write!(f, "dataset shape overflows addressable size"),
            DsioError::InsufficientBuffer => write!(f, "insufficient bytes for element"),
        }
    }
}

impl core::error::Error for DsioError {}

/// Result type for core dataset operations
pub type Result<T> = core::result::Result<T, DsioError>;
