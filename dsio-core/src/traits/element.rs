//! Element type constraints for dataset payloads
//!
//! This module defines the trait that constrains what types can be
//! stored as dataset elements.

use crate::format::DataType;
use crate::DsioError;

/// Trait for types that can be stored as dataset elements
///
/// Elements are plain-old-data so a payload can be reinterpreted as a byte
/// slice without copying on little-endian hosts. `Send + Sync` lets codecs
/// split rows across worker threads.
pub trait Element: bytemuck::Pod + PartialEq + core::fmt::Debug + Send + Sync + 'static {
    /// Get the DataType tag for this element type
    fn data_type() -> DataType;

    /// Get the size in bytes of this element type
    fn size_bytes() -> usize {
        core::mem::size_of::<Self>()
    }

    /// Read one element from the first `size_bytes()` bytes, little-endian
    fn from_le_slice(bytes: &[u8]) -> Result<Self, DsioError>;

    /// Write one element into the first `size_bytes()` bytes, little-endian
    fn write_le(self, out: &mut [u8]) -> Result<(), DsioError>;

    /// Convert to f64 for generic operations
    fn to_f64(self) -> f64;
}

macro_rules! impl_element {
    ($type:ty, $data_type:ident) => {
        impl Element for $type {
            fn data_type() -> DataType {
                DataType::$data_type
            }

            fn from_le_slice(bytes: &[u8]) -> Result<Self, DsioError> {
                const SIZE: usize = core::mem::size_of::<$type>();
                let array: [u8; SIZE] = bytes
                    .get(..SIZE)
                    .and_then(|head| head.try_into().ok())
                    .ok_or(DsioError::InsufficientBuffer)?;
                Ok(<$type>::from_le_bytes(array))
            }

            fn write_le(self, out: &mut [u8]) -> Result<(), DsioError> {
                const SIZE: usize = core::mem::size_of::<$type>();
                let head = out.get_mut(..SIZE).ok_or(DsioError::InsufficientBuffer)?;
                head.copy_from_slice(&self.to_le_bytes());
                Ok(())
            }

            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_element!(i8, I8);
impl_element!(i16, I16);
impl_element!(i32, I32);
impl_element!(i64, I64);
impl_element!(u8, U8);
impl_element!(u16, U16);
impl_element!(u32, U32);
impl_element!(u64, U64);
impl_element!(f32, F32);
impl_element!(f64, F64);
