//! DSIO - Dataset serialization for numeric matrices
//!
//! Saves and loads two-dimensional numeric datasets in two encodings and
//! tells them apart on disk.
//!
//! ## Architecture
//!
//! - **dsio-core**: element types, metadata record and validation (no I/O)
//! - **dsio**: file codecs, format sniffing and the `dsio` command-line tool
//!
//! ## Encodings
//!
//! - **Binary**: a storage pair of `<path>.meta` (`BINARY`, rows, cols,
//!   element type) and `<path>` (raw row-major little-endian values)
//! - **Text**: one row per line, whitespace-separated values, `#` comments
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dsio::{FileFormat, LoadOptions, Matrix};
//!
//! fn example() -> dsio::Result<()> {
//!     let matrix = Matrix::from_rows(&[[1.0f32, 2.0], [3.0, 4.0]])?;
//!     dsio::binary::save(&matrix, "points.dat")?;
//!
//!     let loaded = dsio::load("points.dat", &LoadOptions::default())?;
//!     assert_eq!(loaded.dimensions(), (2, 2));
//!
//!     dsio::save(&loaded, "points.txt", FileFormat::Text)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **mmap**: memory-mapped payload reads
//! - **async**: `tokio`-based binary writer
//! - **serde**: serializable metadata and format descriptors
//! - **cli**: the `dsio` binary

pub use dsio_core::{constants, DataType, DsioError, Element, Field, MetaRecord};

pub mod artifact;
pub mod binary;
pub mod config;
pub mod dataset;
pub mod error;
pub mod sniff;
pub mod text;

pub use config::{LoadOptions, SaveOptions};
pub use dataset::{DatasetElement, DynamicDataset, Matrix};
pub use error::{Error, FormatError, Result};
pub use sniff::{load, save, save_with, sniff, FileFormat};
