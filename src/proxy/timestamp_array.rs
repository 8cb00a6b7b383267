// In: src/proxy/timestamp_array.rs

//! Proxy for Arrow timestamp arrays.
//!
//! Timestamps are 64-bit integers plus a unit and an optional time zone, so the
//! payload is wrapped zero-copy exactly like an `Int64` numeric array.

use std::sync::Arc;

use arrow::array::{make_array, Array, ArrayData, ArrayRef};
use arrow::buffer::ScalarBuffer;
use arrow::datatypes::DataType;
use arrow_schema::TimeUnit;

use crate::config::HostConfig;
use crate::error::ArrowHostError;
use crate::host::{self, FunctionArguments, HostValue};
use crate::proxy::numeric_array::wrap_host_buffer;
use crate::proxy::{factory, validity_bitmap, Proxy, ProxyRef, DATA_ARG};
use crate::types::ElementType;

/// Name of the optional constructor argument selecting the time unit.
pub const TIME_UNIT_ARG: &str = "TimeUnit";
/// Name of the optional constructor argument selecting the time zone.
pub const TIME_ZONE_ARG: &str = "TimeZone";

/// Parses a host time-unit name (`"Second"`, `"ms"`, ...), case-insensitively.
pub fn parse_time_unit(name: &str) -> Result<TimeUnit, ArrowHostError> {
    match name.to_lowercase().as_str() {
        "second" | "s" => Ok(TimeUnit::Second),
        "millisecond" | "ms" => Ok(TimeUnit::Millisecond),
        "microsecond" | "us" => Ok(TimeUnit::Microsecond),
        "nanosecond" | "ns" => Ok(TimeUnit::Nanosecond),
        _ => Err(ArrowHostError::UnsupportedType(format!(
            "Invalid time unit '{}'. Must be 'Second', 'Millisecond', 'Microsecond', or 'Nanosecond'.",
            name
        ))),
    }
}

#[derive(Debug)]
pub struct TimestampArrayProxy {
    ticks: ScalarBuffer<i64>,
    array: ArrayRef,
}

impl TimestampArrayProxy {
    pub fn make(args: &FunctionArguments, config: &HostConfig) -> Result<ProxyRef, ArrowHostError> {
        let host_data = args.array::<i64>(DATA_ARG)?;
        let length = host_data.len();
        let validity = validity_bitmap(args, length, config)?;

        let unit = match args.text(TIME_UNIT_ARG)? {
            Some(name) => parse_time_unit(name)?,
            None => config.default_time_unit,
        };
        let time_zone = match args.text(TIME_ZONE_ARG)? {
            Some("") => None,
            Some(tz) => Some(tz.to_string()),
            None => config.default_time_zone.clone(),
        };

        let data_buffer = wrap_host_buffer(host_data);
        let ticks = ScalarBuffer::<i64>::new(data_buffer.clone(), 0, length);
        let data = ArrayData::builder(DataType::Timestamp(unit, time_zone.map(Into::into)))
            .len(length)
            .add_buffer(data_buffer)
            .null_bit_buffer(validity)
            .build()?;

        let array = make_array(data);
        crate::log_event!(
            "event" = "make",
            "type" = ElementType::Timestamp,
            "length" = length,
            "arrow_type" = array.data_type()
        );
        Ok(Arc::new(Self { ticks, array }))
    }
}

impl Proxy for TimestampArrayProxy {
    fn class_name(&self) -> &'static str {
        factory::array_class_name(ElementType::Timestamp)
    }

    fn array(&self) -> Option<&ArrayRef> {
        Some(&self.array)
    }

    /// Copies the raw ticks (in the array's own unit) into a `[len, 1]` host array.
    fn to_host(&self) -> Result<HostValue, ArrowHostError> {
        Ok(HostValue::Int64(host::column(self.ticks.to_vec())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::column;
    use crate::proxy::VALID_ARG;

    fn args(ticks: Vec<i64>, valid: Vec<bool>) -> FunctionArguments {
        FunctionArguments::new()
            .with(DATA_ARG, HostValue::Int64(column(ticks).unwrap()))
            .with(VALID_ARG, HostValue::Bool(column(valid).unwrap()))
    }

    #[test]
    fn test_timestamp_uses_explicit_unit_and_zone() {
        let args = args(vec![1_000, 2_000], vec![true, false])
            .with(TIME_UNIT_ARG, HostValue::Text("ms".into()))
            .with(TIME_ZONE_ARG, HostValue::Text("America/New_York".into()));

        let proxy = TimestampArrayProxy::make(&args, &HostConfig::default()).unwrap();
        assert_eq!(
            proxy.array().unwrap().data_type(),
            &DataType::Timestamp(TimeUnit::Millisecond, Some("America/New_York".into()))
        );
    }

    #[test]
    fn test_timestamp_falls_back_to_config_defaults() {
        let config = HostConfig {
            default_time_unit: TimeUnit::Nanosecond,
            default_time_zone: Some("UTC".to_string()),
            ..HostConfig::default()
        };
        let proxy = TimestampArrayProxy::make(&args(vec![5], vec![true]), &config).unwrap();
        assert_eq!(
            proxy.array().unwrap().data_type(),
            &DataType::Timestamp(TimeUnit::Nanosecond, Some("UTC".into()))
        );
    }

    #[test]
    fn test_timestamp_export_copies_ticks() {
        let proxy = TimestampArrayProxy::make(&args(vec![7, 8, 9], vec![true; 3]), &HostConfig::default())
            .unwrap();
        match proxy.to_host().unwrap() {
            HostValue::Int64(out) => assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![7, 8, 9]),
            other => panic!("Expected int64 host array, got {}", other.kind()),
        }
    }

    #[test]
    fn test_invalid_time_unit() {
        let args = args(vec![1], vec![true]).with(TIME_UNIT_ARG, HostValue::Text("fortnight".into()));
        let err = TimestampArrayProxy::make(&args, &HostConfig::default()).unwrap_err();
        assert!(err.to_string().contains("fortnight"));
    }
}
