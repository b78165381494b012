//! Format constants for the dataset file layouts

/// Tag on the first line of every binary metadata artifact
pub const BINARY_TAG: &[u8; 6] = b"BINARY";

/// Number of bytes read when sniffing for [`BINARY_TAG`]
pub const TAG_LEN: usize = BINARY_TAG.len();

/// Suffix appended to the payload path to name the metadata artifact
pub const META_SUFFIX: &str = ".meta";

/// Suffix appended to an artifact path while it is being staged
pub const STAGING_SUFFIX: &str = ".tmp";

/// Number of lines in a metadata artifact
pub const META_LINES: usize = 4;

/// Element type assumed when neither metadata nor caller names one
pub const DEFAULT_DATA_TYPE: super::DataType = super::DataType::F32;

/// Text format constants
pub mod text {
    /// Marks the rest of a line as a comment
    pub const COMMENT_MARKER: char = '#';

    /// Separator written between values on a row
    pub const SEPARATOR: char = ' ';

    /// Significant digits written per value
    pub const SIGNIFICANT_DIGITS: usize = 6;

    /// Upper bound on bytes read for a single line while sniffing
    pub const MAX_SNIFF_LINE_BYTES: u64 = 5_000_000;
}
