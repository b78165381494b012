//! Format definitions for dataset artifacts
//!
//! Pure data structure definitions for the metadata header and element
//! type tags. No I/O.

pub mod constants;
pub mod data_type;
pub mod header;

pub use data_type::DataType;
pub use header::MetaRecord;
