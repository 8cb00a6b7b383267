// In: src/proxy/string_array.rs

//! Proxy for Arrow `StringArray` (UTF-8, 32-bit offsets).
//!
//! Host strings are owned by the host runtime and are not laid out the way
//! Arrow needs, so construction copies them into a new offsets/values pair.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray};

use crate::config::HostConfig;
use crate::error::ArrowHostError;
use crate::host::{self, FunctionArguments, HostValue};
use crate::proxy::{factory, host_elements, validity_bitmap, Proxy, ProxyRef, DATA_ARG};
use crate::types::ElementType;

#[derive(Debug)]
pub struct StringArrayProxy {
    values: StringArray,
    array: ArrayRef,
}

impl StringArrayProxy {
    pub fn make(args: &FunctionArguments, config: &HostConfig) -> Result<ProxyRef, ArrowHostError> {
        let host_data = args.array::<String>(DATA_ARG)?;
        let length = host_data.len();
        let validity = validity_bitmap(args, length, config)?;

        let strings = host_elements(host_data);
        let data = StringArray::from_iter_values(strings.iter())
            .into_data()
            .into_builder()
            .null_bit_buffer(validity)
            .build()?;

        let values = StringArray::from(data);
        crate::log_event!(
            "event" = "make",
            "type" = ElementType::Utf8,
            "length" = length,
            "value_bytes" = values.value_data().len()
        );
        let array: ArrayRef = Arc::new(values.clone());
        Ok(Arc::new(Self { values, array }))
    }
}

impl Proxy for StringArrayProxy {
    fn class_name(&self) -> &'static str {
        factory::array_class_name(ElementType::Utf8)
    }

    fn array(&self) -> Option<&ArrayRef> {
        Some(&self.array)
    }

    /// Null slots come back as whatever string was stored under them.
    fn to_host(&self) -> Result<HostValue, ArrowHostError> {
        let values: Vec<String> = (0..self.values.len())
            .map(|i| self.values.value(i).to_string())
            .collect();
        Ok(HostValue::Str(host::column(values)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::column;
    use crate::proxy::VALID_ARG;

    #[test]
    fn test_string_array_with_null() {
        let strings = vec!["alpha".to_string(), "".to_string(), "gamma".to_string()];
        let args = FunctionArguments::new()
            .with(DATA_ARG, HostValue::Str(column(strings.clone()).unwrap()))
            .with(VALID_ARG, HostValue::Bool(column(vec![true, false, true]).unwrap()));

        let proxy = StringArrayProxy::make(&args, &HostConfig::default()).unwrap();
        let array = proxy.array().unwrap();
        assert!(array.is_valid(0));
        assert!(array.is_null(1));

        match proxy.to_host().unwrap() {
            HostValue::Str(out) => assert_eq!(out.iter().cloned().collect::<Vec<_>>(), strings),
            other => panic!("Expected string host array, got {}", other.kind()),
        }
    }

    #[test]
    fn test_string_array_rejects_numeric_data() {
        let args = FunctionArguments::new()
            .with(DATA_ARG, HostValue::Float64(column(vec![1.0]).unwrap()))
            .with(VALID_ARG, HostValue::Bool(column(vec![true]).unwrap()));
        let err = StringArrayProxy::make(&args, &HostConfig::default()).unwrap_err();
        assert_eq!(err.id(), crate::error::ARGUMENT_TYPE_ERROR_ID);
    }
}
