//! Delimited text dataset codec
//!
//! One row per line, values separated by whitespace. `#` starts a comment
//! running to the end of the line; blank and comment-only lines are skipped
//! on load. Values are written in `%g` style with six significant digits,
//! so float data round-trips only to that precision.
//!
//! A zero-column dataset has no text representation: it saves as empty
//! lines and loads back as `0 x 0`.

pub mod general;

use crate::artifact::write_artifact;
use crate::dataset::{for_data_type, DatasetElement, DynamicDataset, Matrix};
use crate::error::{Error, FormatError, IoResultExt, Result};
use crate::{LoadOptions, SaveOptions};
use dsio_core::constants::text::{MAX_SNIFF_LINE_BYTES, SEPARATOR};
use dsio_core::constants::DEFAULT_DATA_TYPE;
use dsio_core::validation::{is_comment_line, is_numeric_line, strip_comment};
use general::write_general;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::info;

fn format_row<T: DatasetElement>(row: &[T]) -> String {
    let mut line = String::with_capacity(row.len() * 12 + 1);
    for (index, &value) in row.iter().enumerate() {
        if index > 0 {
            line.push(SEPARATOR);
        }
        write_general(&mut line, value.to_f64());
    }
    line.push('\n');
    line
}

/// Save with default [`SaveOptions`]
pub fn save<T: DatasetElement>(matrix: &Matrix<T>, path: impl AsRef<Path>) -> Result<()> {
    save_with(matrix, path, &SaveOptions::default())
}

/// Write one line per row, no header
pub fn save_with<T: DatasetElement>(
    matrix: &Matrix<T>,
    path: impl AsRef<Path>,
    options: &SaveOptions,
) -> Result<()> {
    let path = path.as_ref();
    let rows: Vec<&[T]> = matrix.rows().collect();
    let lines: Vec<String> = rows.par_iter().map(|row| format_row(row)).collect();
    let text = lines.concat();

    write_artifact(path, text.as_bytes(), options.staged())?;

    info!(
        path = %path.display(),
        rows = matrix.nrows(),
        cols = matrix.ncols(),
        "text dataset saved"
    );
    Ok(())
}

fn parse_row<T: DatasetElement>(line: usize, content: &str) -> std::result::Result<Vec<T>, FormatError> {
    content
        .split_whitespace()
        .map(|token| {
            T::parse_token(token).ok_or_else(|| FormatError::InvalidToken {
                line,
                token: token.to_string(),
                data_type: T::data_type(),
            })
        })
        .collect()
}

fn check_dimension(
    path: &Path,
    dimension: &'static str,
    expected: Option<usize>,
    found: usize,
) -> Result<()> {
    match expected {
        Some(expected) if expected != found => Err(Error::format(
            path,
            FormatError::ShapeConflict {
                dimension,
                expected,
                found,
            },
        )),
        _ => Ok(()),
    }
}

/// Parse text artifact contents into a typed matrix
pub fn parse<T: DatasetElement>(path: &Path, text: &str, options: &LoadOptions) -> Result<Matrix<T>> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, strip_comment(line)))
        .filter(|(_, content)| !content.trim().is_empty())
        .collect();

    let parsed: Vec<std::result::Result<Vec<T>, FormatError>> = lines
        .par_iter()
        .map(|&(line, content)| parse_row::<T>(line, content))
        .collect();

    let mut cols = None;
    let mut data = Vec::new();
    for (row, &(line, _)) in parsed.into_iter().zip(&lines) {
        let row = row.map_err(|kind| Error::format(path, kind))?;
        match cols {
            None => cols = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(Error::format(
                    path,
                    FormatError::InconsistentRow {
                        line,
                        expected,
                        found: row.len(),
                    },
                ));
            }
            Some(_) => {}
        }
        data.extend(row);
    }

    let rows = lines.len();
    let cols = cols.unwrap_or(0);
    check_dimension(path, "rows", options.rows(), rows)?;
    check_dimension(path, "cols", options.cols(), cols)?;

    Matrix::from_vec(rows, cols, data)
}

fn read_text(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::InvalidData => {
            Err(Error::format(path, FormatError::NotUtf8))
        }
        Err(err) => Err(Error::io(path, err)),
    }
}

/// Load a text dataset of a known element type
pub fn load_as<T: DatasetElement>(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Matrix<T>> {
    let path = path.as_ref();
    if let Some(requested) = options.data_type() {
        if requested != T::data_type() {
            return Err(Error::DataTypeMismatch {
                expected: T::data_type(),
                found: requested,
            });
        }
    }

    let text = read_text(path)?;
    let matrix = parse::<T>(path, &text, options)?;

    info!(
        path = %path.display(),
        rows = matrix.nrows(),
        cols = matrix.ncols(),
        dtype = %T::data_type(),
        "text dataset loaded"
    );
    Ok(matrix)
}

/// Load a text dataset as `options.data_type()`, or `float32`
pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<DynamicDataset> {
    let path = path.as_ref();
    let data_type = options.data_type().unwrap_or(DEFAULT_DATA_TYPE);
    for_data_type!(data_type, |T| load_as::<T>(path, options))
}

/// Sniff for numeric text.
///
/// Skips full-line comments and classifies the first remaining line, less
/// any trailing comment: true only if it has at least one token and every
/// token is a number. Empty
/// files and non-UTF-8 content are not numeric text.
pub fn check(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path).at_path(path)?);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = (&mut reader)
            .take(MAX_SNIFF_LINE_BYTES)
            .read_until(b'\n', &mut buf)
            .at_path(path)?;
        if read == 0 {
            return Ok(false);
        }
        let Ok(line) = std::str::from_utf8(&buf) else {
            return Ok(false);
        };
        if is_comment_line(line) {
            continue;
        }
        return Ok(is_numeric_line(strip_comment(line)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsio_core::DataType;
    use tempfile::TempDir;

    fn sample() -> Matrix<f32> {
        Matrix::from_rows(&[[1.0f32, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_save_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("points.txt");
        let matrix = Matrix::from_rows(&[[1.5f64, -2.0, 1e6], [0.25, 0.0, 1234567.0]]).unwrap();

        save(&matrix, &path).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1.5 -2 1e+06\n0.25 0 1.23457e+06\n"
        );
    }

    #[test]
    fn test_round_trip_within_precision() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("points.txt");
        let matrix = Matrix::from_rows(&[
            [0.123456789f64, -98765.4321, 3.0],
            [1e-9, 2.5e12, -7.77777777],
        ])
        .unwrap();

        save(&matrix, &path).unwrap();
        let loaded: Matrix<f64> =
            load_as(&path, &LoadOptions::new().with_data_type(DataType::F64)).unwrap();

        assert_eq!(loaded.dimensions(), (2, 3));
        for (&a, &b) in matrix.as_slice().iter().zip(loaded.as_slice()) {
            assert!((a - b).abs() <= a.abs() * 5e-6, "{a} vs {b}");
        }
    }

    #[test]
    fn test_default_type_is_float32() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("points.txt");
        save(&sample(), &path).unwrap();

        let loaded = load(&path, &LoadOptions::default()).unwrap();
        assert_eq!(loaded, DynamicDataset::F32(sample()));
    }

    #[test]
    fn test_integer_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ints.txt");
        let matrix = Matrix::from_rows(&[[1i32, -2, 3], [1_000_000, 0, 42]]).unwrap();

        save(&matrix, &path).unwrap();
        let loaded = load(&path, &LoadOptions::new().with_data_type(DataType::I32)).unwrap();
        assert_eq!(loaded, DynamicDataset::I32(matrix));
    }

    #[test]
    fn test_inconsistent_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ragged.txt");
        fs::write(&path, "1 2 3\n4 5\n").unwrap();

        let err = load(&path, &LoadOptions::default()).unwrap_err();
        assert!(err.is_format());
        assert_eq!(
            err.format_kind(),
            Some(&FormatError::InconsistentRow {
                line: 2,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("commented.txt");
        fs::write(&path, "# header\n\n1 2 # first\n   \n# middle\n3 4\n").unwrap();

        let loaded: Matrix<f32> = load_as(&path, &LoadOptions::default()).unwrap();
        assert_eq!(loaded.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_invalid_token_reports_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "1 2\n3 x\n").unwrap();

        let err = load(&path, &LoadOptions::default()).unwrap_err();
        assert_eq!(
            err.format_kind(),
            Some(&FormatError::InvalidToken {
                line: 2,
                token: "x".to_string(),
                data_type: DataType::F32
            })
        );
    }

    #[test]
    fn test_shape_options_checked() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("points.txt");
        save(&sample(), &path).unwrap();

        assert!(load(&path, &LoadOptions::new().with_shape(3, 2)).is_ok());
        let err = load(&path, &LoadOptions::new().with_cols(3)).unwrap_err();
        assert_eq!(
            err.format_kind(),
            Some(&FormatError::ShapeConflict {
                dimension: "cols",
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_load_as_rejects_conflicting_type_option() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("points.txt");
        save(&sample(), &path).unwrap();

        let err = load_as::<f32>(&path, &LoadOptions::new().with_data_type(DataType::U8)).unwrap_err();
        assert!(matches!(err, Error::DataTypeMismatch { .. }));
    }

    #[test]
    fn test_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        let loaded = load(&path, &LoadOptions::default()).unwrap();
        assert_eq!(loaded.dimensions(), (0, 0));
        assert!(!check(&path).unwrap());
    }

    #[test]
    fn test_not_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.txt");
        fs::write(&path, [0xff, 0xfe, b'1', b'\n']).unwrap();

        let err = load(&path, &LoadOptions::default()).unwrap_err();
        assert_eq!(err.format_kind(), Some(&FormatError::NotUtf8));
        assert!(!check(&path).unwrap());
    }

    #[test]
    fn test_check() {
        let dir = TempDir::new().unwrap();

        let path = dir.path().join("saved.txt");
        save(&sample(), &path).unwrap();
        assert!(check(&path).unwrap());

        let path = dir.path().join("commented.txt");
        fs::write(&path, "# one\n# two\n1.5 -2 3e4\n").unwrap();
        assert!(check(&path).unwrap());

        let path = dir.path().join("inline.txt");
        fs::write(&path, "1 2 # first point\n3 4\n").unwrap();
        assert!(check(&path).unwrap());

        let path = dir.path().join("words.txt");
        fs::write(&path, "x y z\n1 2 3\n").unwrap();
        assert!(!check(&path).unwrap());

        let path = dir.path().join("blank_first.txt");
        fs::write(&path, "\n1 2 3\n").unwrap();
        assert!(!check(&path).unwrap());

        let path = dir.path().join("meta");
        fs::write(&path, "BINARY\n3\n2\nfloat32\n").unwrap();
        assert!(!check(&path).unwrap());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn small_integers_round_trip_exactly(
                rows in 1usize..8,
                cols in 1usize..8,
                seed in proptest::collection::vec(-999_999i32..=999_999, 64),
            ) {
                let dir = TempDir::new().unwrap();
                let path = dir.path().join("ints.txt");
                let data = seed.into_iter().cycle().take(rows * cols).collect();
                let matrix = Matrix::from_vec(rows, cols, data).unwrap();

                save(&matrix, &path).unwrap();
                let loaded: Matrix<i32> =
                    load_as(&path, &LoadOptions::new().with_data_type(DataType::I32)).unwrap();
                prop_assert_eq!(loaded, matrix);
            }

            #[test]
            fn floats_round_trip_to_six_digits(values in proptest::collection::vec(-1e12f64..1e12, 1..40)) {
                let dir = TempDir::new().unwrap();
                let path = dir.path().join("floats.txt");
                let matrix = Matrix::from_vec(1, values.len(), values).unwrap();

                save(&matrix, &path).unwrap();
                let loaded: Matrix<f64> =
                    load_as(&path, &LoadOptions::new().with_data_type(DataType::F64)).unwrap();
                for (&a, &b) in matrix.as_slice().iter().zip(loaded.as_slice()) {
                    prop_assert!((a - b).abs() <= a.abs() * 5e-6 + f64::MIN_POSITIVE);
                }
            }
        }
    }
}
