//! Element type tags for dataset payloads
//!
//! The canonical names written to metadata artifacts follow the numeric
//! library convention (`float32`, `int16`, ...). Parsing also accepts the
//! short array-protocol codes (`f4`, `<i2`, `|u1`).

use crate::DsioError;

/// Element types a dataset may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    /// 8-bit signed integer
    #[cfg_attr(feature = "serde", serde(rename = "int8"))]
    I8,
    /// 16-bit signed integer
    #[cfg_attr(feature = "serde", serde(rename = "int16"))]
    I16,
    /// 32-bit signed integer
    #[cfg_attr(feature = "serde", serde(rename = "int32"))]
    I32,
    /// 64-bit signed integer
    #[cfg_attr(feature = "serde", serde(rename = "int64"))]
    I64,
    /// 8-bit unsigned integer
    #[cfg_attr(feature = "serde", serde(rename = "uint8"))]
    U8,
    /// 16-bit unsigned integer
    #[cfg_attr(feature = "serde", serde(rename = "uint16"))]
    U16,
    /// 32-bit unsigned integer
    #[cfg_attr(feature = "serde", serde(rename = "uint32"))]
    U32,
    /// 64-bit unsigned integer
    #[cfg_attr(feature = "serde", serde(rename = "uint64"))]
    U64,
    /// 32-bit floating point
    #[cfg_attr(feature = "serde", serde(rename = "float32"))]
    F32,
    /// 64-bit floating point
    #[cfg_attr(feature = "serde", serde(rename = "float64"))]
    F64,
}

impl DataType {
    /// Every supported type
    pub const ALL: [DataType; 10] = [
        DataType::I8,
        DataType::I16,
        DataType::I32,
        DataType::I64,
        DataType::U8,
        DataType::U16,
        DataType::U32,
        DataType::U64,
        DataType::F32,
        DataType::F64,
    ];

    /// Canonical name written to metadata artifacts
    pub const fn name(self) -> &'static str {
        match self {
            DataType::I8 => "int8",
            DataType::I16 => "int16",
            DataType::I32 => "int32",
            DataType::I64 => "int64",
            DataType::U8 => "uint8",
            DataType::U16 => "uint16",
            DataType::U32 => "uint32",
            DataType::U64 => "uint64",
            DataType::F32 => "float32",
            DataType::F64 => "float64",
        }
    }

    /// Get the size in bytes for this data type
    pub const fn size_bytes(self) -> usize {
        match self {
            DataType::I8 | DataType::U8 => 1,
            DataType::I16 | DataType::U16 => 2,
            DataType::I32 | DataType::U32 | DataType::F32 => 4,
            DataType::I64 | DataType::U64 | DataType::F64 => 8,
        }
    }

    /// Resolve a type name.
    ///
    /// Accepts canonical names, `float`/`int`, and array-protocol codes with
    /// an optional `<`, `=` or `|` byte-order prefix. Big-endian codes (`>`)
    /// are rejected since payloads are always little-endian.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let code = name.strip_prefix(['<', '=', '|']).unwrap_or(name);

        let data_type = match code {
            "int8" | "i1" => DataType::I8,
            "int16" | "i2" => DataType::I16,
            "int32" | "i4" => DataType::I32,
            "int64" | "i8" | "int" => DataType::I64,
            "uint8" | "u1" => DataType::U8,
            "uint16" | "u2" => DataType::U16,
            "uint32" | "u4" => DataType::U32,
            "uint64" | "u8" => DataType::U64,
            "float32" | "f4" => DataType::F32,
            "float64" | "f8" | "float" => DataType::F64,
            _ => return None,
        };
        Some(data_type)
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for DataType {
    type Err = DsioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or(DsioError::UnsupportedDataType)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_round_trip() {
        for data_type in DataType::ALL {
            assert_eq!(DataType::from_name(data_type.name()), Some(data_type));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(DataType::from_name("f4"), Some(DataType::F32));
        assert_eq!(DataType::from_name("<f8"), Some(DataType::F64));
        assert_eq!(DataType::from_name("|u1"), Some(DataType::U8));
        assert_eq!(DataType::from_name("=i2"), Some(DataType::I16));
        assert_eq!(DataType::from_name("float"), Some(DataType::F64));
        assert_eq!(DataType::from_name("int"), Some(DataType::I64));
        assert_eq!(DataType::from_name(" float32\n"), Some(DataType::F32));
    }

    #[test]
    fn test_rejected_names() {
        assert_eq!(DataType::from_name(">f4"), None);
        assert_eq!(DataType::from_name("complex64"), None);
        assert_eq!(DataType::from_name(""), None);
        assert_eq!(
            "bool".parse::<DataType>(),
            Err(DsioError::UnsupportedDataType)
        );
    }

    #[test]
    fn test_sizes() {
        assert_eq!(DataType::I8.size_bytes(), 1);
        assert_eq!(DataType::U16.size_bytes(), 2);
        assert_eq!(DataType::F32.size_bytes(), 4);
        assert_eq!(DataType::F64.size_bytes(), 8);
    }
}
