//! Load and save options
//!
//! Builder-style configuration passed to every codec entry point.

use dsio_core::DataType;

/// Caller-supplied shape and type hints for loading
///
/// For binary datasets, a metadata artifact overrides every field. Without
/// one, `rows` and `cols` are required and `data_type` defaults to
/// `float32`. For text datasets, `data_type` selects the element type and
/// `rows`/`cols`, when set, are checked against the inferred shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    rows: Option<usize>,
    cols: Option<usize>,
    data_type: Option<DataType>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both dimensions
    pub fn with_shape(mut self, rows: usize, cols: usize) -> Self {
        self.rows = Some(rows);
        self.cols = Some(cols);
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_cols(mut self, cols: usize) -> Self {
        self.cols = Some(cols);
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn rows(&self) -> Option<usize> {
        self.rows
    }

    pub fn cols(&self) -> Option<usize> {
        self.cols
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.data_type
    }

    /// Both dimensions, if both were supplied
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.rows.zip(self.cols)
    }
}

/// Options controlling how artifacts are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    staged: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self { staged: true }
    }
}

impl SaveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write each artifact to a `.tmp` sibling, sync it, then rename it into
    /// place. When disabled, artifacts are written directly.
    pub fn with_staging(mut self, staged: bool) -> Self {
        self.staged = staged;
        self
    }

    pub fn staged(&self) -> bool {
        self.staged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_options_builder() {
        let options = LoadOptions::new();
        assert_eq!(options.shape(), None);
        assert_eq!(options.data_type(), None);

        let options = options.with_rows(3);
        assert_eq!(options.rows(), Some(3));
        assert_eq!(options.shape(), None);

        let options = options.with_cols(2).with_data_type(DataType::U8);
        assert_eq!(options.shape(), Some((3, 2)));
        assert_eq!(options.data_type(), Some(DataType::U8));

        assert_eq!(LoadOptions::new().with_shape(5, 7).shape(), Some((5, 7)));
    }

    #[test]
    fn test_save_options_default_staged() {
        assert!(SaveOptions::default().staged());
        assert!(!SaveOptions::new().with_staging(false).staged());
    }
}
