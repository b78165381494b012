//! Validation utilities for dataset formats
//!
//! Pure functions with no I/O dependencies: shape arithmetic and token
//! classification.

pub mod bounds;
pub mod parsing;

pub use bounds::{element_count, payload_len, to_usize, validate_array_bounds};
pub use parsing::{is_comment_line, is_numeric_line, is_numeric_token, parse_count, strip_comment};
