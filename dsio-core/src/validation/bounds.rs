//! Shape and payload size validation
//!
//! Pure arithmetic with overflow protection. No I/O.

use crate::{DataType, DsioError};

/// Number of elements in a `rows x cols` dataset
pub const fn element_count(rows: u64, cols: u64) -> Result<u64, DsioError> {
    match rows.checked_mul(cols) {
        Some(count) => Ok(count),
        None => Err(DsioError::ShapeOverflow),
    }
}

/// Payload length in bytes for a `rows x cols` dataset of `data_type`
pub const fn payload_len(rows: u64, cols: u64, data_type: DataType) -> Result<u64, DsioError> {
    let count = match element_count(rows, cols) {
        Ok(count) => count,
        Err(err) => return Err(err),
    };
    match count.checked_mul(data_type.size_bytes() as u64) {
        Some(len) => Ok(len),
        None => Err(DsioError::ShapeOverflow),
    }
}

/// Narrow a file-level size to an in-memory length
pub fn to_usize(value: u64) -> Result<usize, DsioError> {
    usize::try_from(value).map_err(|_| DsioError::ShapeOverflow)
}

/// Validate that a byte length holds a whole number of `T` elements
///
/// Returns the element count.
pub const fn validate_array_bounds<T>(byte_len: usize) -> Result<usize, DsioError> {
    let element_size = core::mem::size_of::<T>();

    if element_size == 0 || byte_len % element_size != 0 {
        return Err(DsioError::InsufficientBuffer);
    }

    Ok(byte_len / element_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_len() {
        assert_eq!(payload_len(3, 2, DataType::F32), Ok(24));
        assert_eq!(payload_len(3, 2, DataType::F64), Ok(48));
        assert_eq!(payload_len(0, 100, DataType::I16), Ok(0));
        assert_eq!(payload_len(7, 0, DataType::U8), Ok(0));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(element_count(u64::MAX, 2), Err(DsioError::ShapeOverflow));
        assert_eq!(
            payload_len(u64::MAX / 2, 1, DataType::F64),
            Err(DsioError::ShapeOverflow)
        );
        assert_eq!(element_count(u64::MAX, 1), Ok(u64::MAX));
    }

    #[test]
    fn test_validate_array_bounds() {
        assert_eq!(validate_array_bounds::<u32>(16), Ok(4));
        assert_eq!(validate_array_bounds::<u64>(24), Ok(3));
        assert_eq!(validate_array_bounds::<u32>(0), Ok(0));
        assert_eq!(
            validate_array_bounds::<u32>(15),
            Err(DsioError::InsufficientBuffer)
        );
    }
}
