//! In-memory datasets
//!
//! [`Matrix`] is the typed buffer: contiguous row-major storage plus shape.
//! [`DynamicDataset`] wraps one matrix per supported element type and is what
//! loaders return when the element type is only known at run time.

use crate::error::{Error, FormatError, Result};
use crate::SaveOptions;
use dsio_core::{DataType, Element};
use std::path::Path;

/// A `rows x cols` dataset stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: Element> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Element> Matrix<T> {
    /// Wrap a row-major buffer. Fails if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = rows.checked_mul(cols).ok_or(Error::InvalidDataset(
            FormatError::Header(dsio_core::DsioError::ShapeOverflow),
        ))?;
        if data.len() != expected {
            return Err(Error::InvalidDataset(FormatError::ShapeMismatch {
                rows,
                cols,
                expected,
                found: data.len(),
            }));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from nested rows. Every row must have the first row's length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::InvalidDataset(FormatError::InconsistentRow {
                    line: index + 1,
                    expected: cols,
                    found: row.len(),
                }));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::zeroed(); rows * cols],
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// Dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data_type(&self) -> DataType {
        T::data_type()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        self.data.get(start..start + self.cols)
    }

    /// Iterate rows in order. Zero-column matrices yield empty rows.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |row| &self.data[row * self.cols..(row + 1) * self.cols])
    }

    /// Convert every element to f64
    pub fn to_f64(&self) -> Matrix<f64> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&value| value.to_f64()).collect(),
        }
    }
}

/// Element types the I/O layer can load, save and wrap dynamically
///
/// Extends [`dsio_core::Element`] with the run-time wrapping and text token
/// parsing the codecs need.
pub trait DatasetElement: Element {
    /// Wrap a typed matrix in the matching [`DynamicDataset`] variant
    fn into_dynamic(matrix: Matrix<Self>) -> DynamicDataset;

    /// Unwrap the matching variant, handing the dataset back otherwise
    fn from_dynamic(dataset: DynamicDataset) -> std::result::Result<Matrix<Self>, DynamicDataset>;

    fn from_dynamic_ref(dataset: &DynamicDataset) -> Option<&Matrix<Self>>;

    /// Parse a text token
    fn parse_token(token: &str) -> Option<Self>;
}

macro_rules! impl_dataset_element_common {
    ($type:ty, $variant:ident) => {
        fn into_dynamic(matrix: Matrix<Self>) -> DynamicDataset {
            DynamicDataset::$variant(matrix)
        }

        fn from_dynamic(
            dataset: DynamicDataset,
        ) -> std::result::Result<Matrix<Self>, DynamicDataset> {
            match dataset {
                DynamicDataset::$variant(matrix) => Ok(matrix),
                other => Err(other),
            }
        }

        fn from_dynamic_ref(dataset: &DynamicDataset) -> Option<&Matrix<Self>> {
            match dataset {
                DynamicDataset::$variant(matrix) => Some(matrix),
                _ => None,
            }
        }
    };
}

macro_rules! impl_integer_element {
    ($type:ty, $variant:ident) => {
        impl DatasetElement for $type {
            impl_dataset_element_common!($type, $variant);

            // Integers also accept float spellings of exact in-range values
            // such as "1e+06".
            fn parse_token(token: &str) -> Option<Self> {
                if let Ok(value) = token.parse::<$type>() {
                    return Some(value);
                }
                let value = token.parse::<f64>().ok()?;
                // MAX + 1 is a power of two; `MAX as f64` alone rounds up for 64-bit types
                let upper = <$type>::MAX as f64 + 1.0;
                let in_range = value >= <$type>::MIN as f64 && value < upper;
                (value.fract() == 0.0 && in_range).then(|| value as $type)
            }
        }
    };
}

macro_rules! impl_float_element {
    ($type:ty, $variant:ident) => {
        impl DatasetElement for $type {
            impl_dataset_element_common!($type, $variant);

            fn parse_token(token: &str) -> Option<Self> {
                token.parse::<$type>().ok()
            }
        }
    };
}

impl_integer_element!(i8, I8);
impl_integer_element!(i16, I16);
impl_integer_element!(i32, I32);
impl_integer_element!(i64, I64);
impl_integer_element!(u8, U8);
impl_integer_element!(u16, U16);
impl_integer_element!(u32, U32);
impl_integer_element!(u64, U64);
impl_float_element!(f32, F32);
impl_float_element!(f64, F64);

/// Dataset whose element type is known only at run time
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicDataset {
    I8(Matrix<i8>),
    I16(Matrix<i16>),
    I32(Matrix<i32>),
    I64(Matrix<i64>),
    U8(Matrix<u8>),
    U16(Matrix<u16>),
    U32(Matrix<u32>),
    U64(Matrix<u64>),
    F32(Matrix<f32>),
    F64(Matrix<f64>),
}

/// Evaluate `$body` with `$m` bound to the inner matrix of any variant
macro_rules! each_variant {
    ($dataset:expr, $m:ident => $body:expr) => {
        match $dataset {
            DynamicDataset::I8($m) => $body,
            DynamicDataset::I16($m) => $body,
            DynamicDataset::I32($m) => $body,
            DynamicDataset::I64($m) => $body,
            DynamicDataset::U8($m) => $body,
            DynamicDataset::U16($m) => $body,
            DynamicDataset::U32($m) => $body,
            DynamicDataset::U64($m) => $body,
            DynamicDataset::F32($m) => $body,
            DynamicDataset::F64($m) => $body,
        }
    };
}

/// Evaluate `$body` (a `Result<Matrix<$t>>`) with `$t` aliased to the
/// element type named by `$data_type`, wrapping the result dynamically
macro_rules! for_data_type {
    ($data_type:expr, |$t:ident| $body:expr) => {
        match $data_type {
            dsio_core::DataType::I8 => {
                type $t = i8;
                ($body).map(<$t as $crate::dataset::DatasetElement>::into_dynamic)
            }
            dsio_core::DataType::I16 => {
                type $t = i16;
                ($body).map(<$t as $crate::dataset::DatasetElement>::into_dynamic)
            }
            dsio_core::DataType::I32 => {
                type $t = i32;
                ($body).map(<$t as $crate::dataset::DatasetElement>::into_dynamic)
            }
            dsio_core::DataType::I64 => {
                type $t = i64;
                ($body).map(<$t as $crate::dataset::DatasetElement>::into_dynamic)
            }
            dsio_core::DataType::U8 => {
                type $t = u8;
                ($body).map(<$t as $crate::dataset::DatasetElement>::into_dynamic)
            }
            dsio_core::DataType::U16 => {
                type $t = u16;
                ($body).map(<$t as $crate::dataset::DatasetElement>::into_dynamic)
            }
            dsio_core::DataType::U32 => {
                type $t = u32;
                ($body).map(<$t as $crate::dataset::DatasetElement>::into_dynamic)
            }
            dsio_core::DataType::U64 => {
                type $t = u64;
                ($body).map(<$t as $crate::dataset::DatasetElement>::into_dynamic)
            }
            dsio_core::DataType::F32 => {
                type $t = f32;
                ($body).map(<$t as $crate::dataset::DatasetElement>::into_dynamic)
            }
            dsio_core::DataType::F64 => {
                type $t = f64;
                ($body).map(<$t as $crate::dataset::DatasetElement>::into_dynamic)
            }
        }
    };
}

pub(crate) use for_data_type;

impl DynamicDataset {
    pub fn nrows(&self) -> usize {
        each_variant!(self, m => m.nrows())
    }

    pub fn ncols(&self) -> usize {
        each_variant!(self, m => m.ncols())
    }

    /// Dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        each_variant!(self, m => m.dimensions())
    }

    pub fn len(&self) -> usize {
        each_variant!(self, m => m.len())
    }

    pub fn is_empty(&self) -> bool {
        each_variant!(self, m => m.is_empty())
    }

    pub fn data_type(&self) -> DataType {
        each_variant!(self, m => m.data_type())
    }

    /// Unwrap into a typed matrix, failing if the element type differs
    pub fn into_matrix<T: DatasetElement>(self) -> Result<Matrix<T>> {
        let found = self.data_type();
        T::from_dynamic(self).map_err(|_| Error::DataTypeMismatch {
            expected: T::data_type(),
            found,
        })
    }

    /// Borrow the typed matrix if the element type matches
    pub fn as_matrix<T: DatasetElement>(&self) -> Option<&Matrix<T>> {
        T::from_dynamic_ref(self)
    }

    /// Convert every element to f64
    pub fn to_f64(&self) -> Matrix<f64> {
        each_variant!(self, m => m.to_f64())
    }

    /// Save as a binary storage pair, see [`crate::binary::save_with`]
    pub fn save_binary(&self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<()> {
        each_variant!(self, m => crate::binary::save_with(m, path, options))
    }

    /// Save as delimited text, see [`crate::text::save_with`]
    pub fn save_text(&self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<()> {
        each_variant!(self, m => crate::text::save_with(m, path, options))
    }
}

impl<T: DatasetElement> From<Matrix<T>> for DynamicDataset {
    fn from(matrix: Matrix<T>) -> Self {
        T::into_dynamic(matrix)
    }
}
