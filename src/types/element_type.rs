//! This module defines the canonical, type-safe tag for the element type of a
//! wrapped array.

use crate::error::ArrowHostError;
use arrow::datatypes::DataType as ArrowDataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The element type tag carried by every array proxy.
///
/// Each registered class name declares exactly one of these, and the Arrow
/// array a proxy builds always reports the matching Arrow `DataType`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Boolean,
    Utf8,
    /// 64-bit timestamp; unit and time zone are per-array parameters.
    Timestamp,
}

impl ElementType {
    /// Converts an Arrow `DataType` into an `ElementType`.
    pub fn from_arrow_type(arrow_type: &ArrowDataType) -> Result<Self, ArrowHostError> {
        match arrow_type {
            ArrowDataType::Int8 => Ok(Self::Int8),
            ArrowDataType::Int16 => Ok(Self::Int16),
            ArrowDataType::Int32 => Ok(Self::Int32),
            ArrowDataType::Int64 => Ok(Self::Int64),
            ArrowDataType::UInt8 => Ok(Self::UInt8),
            ArrowDataType::UInt16 => Ok(Self::UInt16),
            ArrowDataType::UInt32 => Ok(Self::UInt32),
            ArrowDataType::UInt64 => Ok(Self::UInt64),
            ArrowDataType::Float32 => Ok(Self::Float32),
            ArrowDataType::Float64 => Ok(Self::Float64),
            ArrowDataType::Boolean => Ok(Self::Boolean),
            ArrowDataType::Utf8 => Ok(Self::Utf8),
            ArrowDataType::Timestamp(_, _) => Ok(Self::Timestamp),
            dt => Err(ArrowHostError::UnsupportedType(format!(
                "Cannot convert Arrow type {:?} to ElementType",
                dt
            ))),
        }
    }

    /// Converts an `ElementType` back into an Arrow `DataType`.
    ///
    /// Returns `None` for `Timestamp`, whose Arrow type depends on the unit and
    /// time zone of the individual array.
    pub fn to_arrow_type(&self) -> Option<ArrowDataType> {
        let dt = match self {
            Self::Int8 => ArrowDataType::Int8,
            Self::Int16 => ArrowDataType::Int16,
            Self::Int32 => ArrowDataType::Int32,
            Self::Int64 => ArrowDataType::Int64,
            Self::UInt8 => ArrowDataType::UInt8,
            Self::UInt16 => ArrowDataType::UInt16,
            Self::UInt32 => ArrowDataType::UInt32,
            Self::UInt64 => ArrowDataType::UInt64,
            Self::Float32 => ArrowDataType::Float32,
            Self::Float64 => ArrowDataType::Float64,
            Self::Boolean => ArrowDataType::Boolean,
            Self::Utf8 => ArrowDataType::Utf8,
            Self::Timestamp => return None,
        };
        Some(dt)
    }

    /// Width in bytes of one element's data slot, for fixed-width types.
    pub fn byte_width(&self) -> Option<usize> {
        match self {
            Self::Int8 | Self::UInt8 => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Float32 => Some(4),
            Self::Int64 | Self::UInt64 | Self::Float64 | Self::Timestamp => Some(8),
            // Bit-packed and variable-width layouts have no per-element byte width.
            Self::Boolean | Self::Utf8 => None,
        }
    }
}

/// Provides the canonical string representation for an `ElementType`.
impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::TimeUnit;

    #[test]
    fn test_fixed_width_types_roundtrip_through_arrow() {
        for tag in [
            ElementType::Int8,
            ElementType::UInt16,
            ElementType::Int32,
            ElementType::UInt64,
            ElementType::Float32,
            ElementType::Float64,
            ElementType::Boolean,
            ElementType::Utf8,
        ] {
            let dt = tag.to_arrow_type().unwrap();
            assert_eq!(ElementType::from_arrow_type(&dt).unwrap(), tag);
        }
    }

    #[test]
    fn test_timestamp_has_no_single_arrow_type() {
        assert_eq!(ElementType::Timestamp.to_arrow_type(), None);
        let dt = ArrowDataType::Timestamp(TimeUnit::Second, Some("UTC".into()));
        assert_eq!(ElementType::from_arrow_type(&dt).unwrap(), ElementType::Timestamp);
    }

    #[test]
    fn test_unsupported_arrow_type() {
        let result = ElementType::from_arrow_type(&ArrowDataType::Date32);
        assert!(matches!(result, Err(ArrowHostError::UnsupportedType(_))));
    }
}
