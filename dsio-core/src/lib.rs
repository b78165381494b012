#![no_std]

//! DSIO Core - Dataset Format Definitions
//!
//! This crate provides the element type tags, the binary metadata header
//! codec and shape validation shared by the dataset readers and writers.
//! It performs no I/O.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod format;
pub mod traits;
pub mod validation;

pub use error::*;
pub use format::constants;
pub use format::{DataType, MetaRecord};
pub use traits::Element;
