// In: src/proxy/boolean_array.rs

//! Proxy for Arrow `BooleanArray`.
//!
//! Arrow stores boolean values bit-packed, so unlike the numeric proxies the
//! data payload is always copied: it goes through the same packer as the
//! validity mask.

use std::sync::Arc;

use arrow::array::{Array, ArrayData, ArrayRef, BooleanArray};
use arrow::datatypes::DataType;

use crate::config::HostConfig;
use crate::error::ArrowHostError;
use crate::host::{self, FunctionArguments, HostValue};
use crate::null_handling::bitmap;
use crate::proxy::{factory, host_elements, validity_bitmap, Proxy, ProxyRef, DATA_ARG};
use crate::types::ElementType;

#[derive(Debug)]
pub struct BooleanArrayProxy {
    values: BooleanArray,
    array: ArrayRef,
}

impl BooleanArrayProxy {
    pub fn make(args: &FunctionArguments, config: &HostConfig) -> Result<ProxyRef, ArrowHostError> {
        let host_data = args.array::<bool>(DATA_ARG)?;
        let length = host_data.len();
        let validity = validity_bitmap(args, length, config)?;
        let packed_values = bitmap::pack(&host_elements(host_data))?;

        let data = ArrayData::builder(DataType::Boolean)
            .len(length)
            .add_buffer(packed_values)
            .null_bit_buffer(validity)
            .build()?;

        let values = BooleanArray::from(data);
        crate::log_event!(
            "event" = "make",
            "type" = ElementType::Boolean,
            "length" = length,
            "nulls" = values.null_count()
        );
        let array: ArrayRef = Arc::new(values.clone());
        Ok(Arc::new(Self { values, array }))
    }
}

impl Proxy for BooleanArrayProxy {
    fn class_name(&self) -> &'static str {
        factory::array_class_name(ElementType::Boolean)
    }

    fn array(&self) -> Option<&ArrayRef> {
        Some(&self.array)
    }

    fn to_host(&self) -> Result<HostValue, ArrowHostError> {
        let values: Vec<bool> = self.values.values().iter().collect();
        Ok(HostValue::Bool(host::column(values)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::column;
    use crate::proxy::VALID_ARG;

    #[test]
    fn test_boolean_roundtrip_keeps_values_under_nulls() {
        let args = FunctionArguments::new()
            .with(DATA_ARG, HostValue::Bool(column(vec![true, false, true]).unwrap()))
            .with(VALID_ARG, HostValue::Bool(column(vec![true, true, false]).unwrap()));

        let proxy = BooleanArrayProxy::make(&args, &HostConfig::default()).unwrap();
        let array = proxy.array().unwrap();
        assert_eq!(array.data_type(), &DataType::Boolean);
        assert_eq!(array.null_count(), 1);

        match proxy.to_host().unwrap() {
            HostValue::Bool(out) => {
                assert_eq!(out.shape(), &[3, 1]);
                assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![true, false, true]);
            }
            other => panic!("Expected logical host array, got {}", other.kind()),
        }
    }
}
