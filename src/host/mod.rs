//! The host-side data model.
//!
//! Everything that crosses the boundary between the host environment and the
//! proxy layer is a [`HostValue`]. Host arrays are reference-counted,
//! copy-on-write 2-D arrays (`ndarray::ArcArray2`), which lets a proxy share a
//! host buffer without copying it: a clone of the `ArcArray2` keeps the memory
//! alive, and any later host-side mutation detaches into a private copy instead
//! of writing through the shared storage.
//!
//! Constructor requests are a named bag of values, [`FunctionArguments`].

use hashbrown::HashMap;
use ndarray::ArcArray2;

use crate::error::ArrowHostError;
use crate::proxy::ProxyRef;
use crate::traits::HostElement;

/// A host-native array: shared, copy-on-write, two-dimensional.
pub type HostArray<T> = ArcArray2<T>;

/// Builds a column-shaped `[len, 1]` host array from owned values.
pub fn column<T>(values: Vec<T>) -> Result<HostArray<T>, ArrowHostError> {
    let len = values.len();
    Ok(ArcArray2::from_shape_vec((len, 1), values)?)
}

/// A single value passed to, or returned from, the proxy layer.
#[derive(Debug, Clone)]
pub enum HostValue {
    Int8(HostArray<i8>),
    Int16(HostArray<i16>),
    Int32(HostArray<i32>),
    Int64(HostArray<i64>),
    UInt8(HostArray<u8>),
    UInt16(HostArray<u16>),
    UInt32(HostArray<u32>),
    UInt64(HostArray<u64>),
    Float32(HostArray<f32>),
    Float64(HostArray<f64>),
    Bool(HostArray<bool>),
    Str(HostArray<String>),
    /// A scalar text option, e.g. a time unit or time zone.
    Text(String),
    /// Handles to previously constructed proxies.
    Proxies(Vec<ProxyRef>),
    /// Named columns, in order.
    Table(Vec<(String, HostValue)>),
}

impl HostValue {
    /// A short name for the variant, used in argument-type errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int8(_) => "int8 array",
            Self::Int16(_) => "int16 array",
            Self::Int32(_) => "int32 array",
            Self::Int64(_) => "int64 array",
            Self::UInt8(_) => "uint8 array",
            Self::UInt16(_) => "uint16 array",
            Self::UInt32(_) => "uint32 array",
            Self::UInt64(_) => "uint64 array",
            Self::Float32(_) => "single array",
            Self::Float64(_) => "double array",
            Self::Bool(_) => "logical array",
            Self::Str(_) => "string array",
            Self::Text(_) => "text scalar",
            Self::Proxies(_) => "proxy list",
            Self::Table(_) => "table",
        }
    }

    /// Wraps a single `i64` as a `[1, 1]` host array.
    pub fn scalar_i64(value: i64) -> Result<Self, ArrowHostError> {
        Ok(Self::Int64(ArcArray2::from_shape_vec((1, 1), vec![value])?))
    }

    /// Borrows the typed host array inside this value, if the variant matches.
    pub fn as_array<T: HostElement>(&self) -> Option<&HostArray<T>> {
        T::from_host(self)
    }
}

//==================================================================================
// Constructor Arguments
//==================================================================================

/// The named argument bag passed to a proxy constructor or method.
#[derive(Debug, Clone, Default)]
pub struct FunctionArguments {
    values: HashMap<String, HostValue>,
}

impl FunctionArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: HostValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: HostValue) {
        self.values.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the named value, if present.
    pub fn get_optional(&self, name: &str) -> Option<&HostValue> {
        self.values.get(name)
    }

    /// Returns the named value, failing with `MissingArgument` when absent.
    pub fn get(&self, name: &str) -> Result<&HostValue, ArrowHostError> {
        self.values
            .get(name)
            .ok_or_else(|| ArrowHostError::MissingArgument(name.to_string()))
    }

    /// Returns the named argument as a typed host array.
    pub fn array<T: HostElement>(&self, name: &str) -> Result<&HostArray<T>, ArrowHostError> {
        let value = self.get(name)?;
        value.as_array::<T>().ok_or_else(|| ArrowHostError::ArgumentType {
            name: name.to_string(),
            expected: T::HOST_KIND,
            actual: value.kind(),
        })
    }

    /// Returns an optional scalar text argument.
    pub fn text(&self, name: &str) -> Result<Option<&str>, ArrowHostError> {
        match self.get_optional(name) {
            None => Ok(None),
            Some(HostValue::Text(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(ArrowHostError::ArgumentType {
                name: name.to_string(),
                expected: "text scalar",
                actual: other.kind(),
            }),
        }
    }

    /// Returns the named argument as a list of proxies.
    pub fn proxies(&self, name: &str) -> Result<&[ProxyRef], ArrowHostError> {
        match self.get(name)? {
            HostValue::Proxies(list) => Ok(list.as_slice()),
            other => Err(ArrowHostError::ArgumentType {
                name: name.to_string(),
                expected: "proxy list",
                actual: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_shape() {
        let col = column(vec![1.0f64, 2.0, 3.0]).unwrap();
        assert_eq!(col.shape(), &[3, 1]);
        assert!(col.is_standard_layout());
    }

    #[test]
    fn test_missing_argument() {
        let args = FunctionArguments::new();
        let err = args.array::<f64>("HostArray").unwrap_err();
        assert!(matches!(err, ArrowHostError::MissingArgument(ref n) if n == "HostArray"));
    }

    #[test]
    fn test_wrong_argument_variant() {
        let args = FunctionArguments::new()
            .with("HostArray", HostValue::Int32(column(vec![1, 2]).unwrap()));
        let err = args.array::<f64>("HostArray").unwrap_err();
        match err {
            ArrowHostError::ArgumentType { expected, actual, .. } => {
                assert_eq!(expected, "double array");
                assert_eq!(actual, "int32 array");
            }
            other => panic!("Expected ArgumentType, got {:?}", other),
        }
    }

    #[test]
    fn test_optional_text() {
        let args = FunctionArguments::new().with("TimeZone", HostValue::Text("UTC".into()));
        assert_eq!(args.text("TimeZone").unwrap(), Some("UTC"));
        assert_eq!(args.text("TimeUnit").unwrap(), None);
    }
}
