//! This module defines the traits tables that let one generic code path serve
//! every host element type.

use std::panic::RefUnwindSafe;

use arrow::datatypes::{
    ArrowNativeType, ArrowPrimitiveType, Float32Type, Float64Type, Int16Type, Int32Type,
    Int64Type, Int8Type, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};

use crate::host::{HostArray, HostValue};
use crate::types::ElementType;

/// A type that can live inside a [`HostValue`] array.
pub trait HostElement: Clone + Sized {
    /// Name of the matching `HostValue` variant, for error messages.
    const HOST_KIND: &'static str;

    fn from_host(value: &HostValue) -> Option<&HostArray<Self>>;

    fn into_host(array: HostArray<Self>) -> HostValue;
}

/// A fixed-width numeric element that maps one-to-one onto an Arrow primitive type.
///
/// `RefUnwindSafe` is required because a shared host array becomes the owner of
/// an Arrow buffer allocation.
pub trait NumericElement:
    HostElement + ArrowNativeType + bytemuck::Pod + RefUnwindSafe + Send + Sync + 'static
{
    type ArrowType: ArrowPrimitiveType<Native = Self> + std::fmt::Debug;

    const ELEMENT_TYPE: ElementType;
}

macro_rules! impl_host_element {
    ($T:ty, $variant:ident, $kind:literal) => {
        impl HostElement for $T {
            const HOST_KIND: &'static str = $kind;

            fn from_host(value: &HostValue) -> Option<&HostArray<Self>> {
                match value {
                    HostValue::$variant(array) => Some(array),
                    _ => None,
                }
            }

            fn into_host(array: HostArray<Self>) -> HostValue {
                HostValue::$variant(array)
            }
        }
    };
}

macro_rules! impl_numeric_element {
    ($T:ty, $variant:ident, $kind:literal, $arrow:ty) => {
        impl_host_element!($T, $variant, $kind);

        impl NumericElement for $T {
            type ArrowType = $arrow;
            const ELEMENT_TYPE: ElementType = ElementType::$variant;
        }
    };
}

impl_numeric_element!(i8, Int8, "int8 array", Int8Type);
impl_numeric_element!(i16, Int16, "int16 array", Int16Type);
impl_numeric_element!(i32, Int32, "int32 array", Int32Type);
impl_numeric_element!(i64, Int64, "int64 array", Int64Type);
impl_numeric_element!(u8, UInt8, "uint8 array", UInt8Type);
impl_numeric_element!(u16, UInt16, "uint16 array", UInt16Type);
impl_numeric_element!(u32, UInt32, "uint32 array", UInt32Type);
impl_numeric_element!(u64, UInt64, "uint64 array", UInt64Type);
impl_numeric_element!(f32, Float32, "single array", Float32Type);
impl_numeric_element!(f64, Float64, "double array", Float64Type);

impl_host_element!(bool, Bool, "logical array");
impl_host_element!(String, Str, "string array");

#[cfg(test)]
mod tests {
    use super::*;

    fn width_of<T: NumericElement>() -> usize {
        std::mem::size_of::<T>()
    }

    #[test]
    fn test_element_tags_agree_with_byte_widths() {
        assert_eq!(i8::ELEMENT_TYPE.byte_width(), Some(width_of::<i8>()));
        assert_eq!(u16::ELEMENT_TYPE.byte_width(), Some(width_of::<u16>()));
        assert_eq!(f32::ELEMENT_TYPE.byte_width(), Some(width_of::<f32>()));
        assert_eq!(u64::ELEMENT_TYPE.byte_width(), Some(width_of::<u64>()));
    }

    #[test]
    fn test_element_tags_agree_with_arrow_types() {
        assert_eq!(
            i32::ELEMENT_TYPE.to_arrow_type().unwrap(),
            <i32 as NumericElement>::ArrowType::DATA_TYPE
        );
        assert_eq!(
            f64::ELEMENT_TYPE.to_arrow_type().unwrap(),
            <f64 as NumericElement>::ArrowType::DATA_TYPE
        );
    }
}
