// In: src/proxy/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Proxy Layer
// ====================================================================================
//
// A proxy is the Rust-side object a host handle refers to. It owns one Arrow value
// (an array or a record batch) and answers name-keyed method calls from the host.
//
// Data Flow (Construction):
//
//   1. [Factory (factory::make_proxy)]     -> Receives class name + FunctionArguments
//         |
//         `-> looks the class name up in the immutable ProxyRegistry
//
//   2. [Typed constructor (e.g. NumericArray::<f64>::make)]
//         |
//         `-> a. wraps the host data buffer zero-copy (shared ownership)
//         `-> b. packs the host validity mask via `null_handling::bitmap`
//         `-> c. assembles and validates the Arrow `ArrayData`
//
//   3. [ProxyRef]                           -> Returned to the host as an opaque handle
//
// Data Flow (Export):
//
//   1. [Proxy::call("toHost")] -> copies the Arrow values into a new [len, 1] HostArray
//
// ====================================================================================

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef};
use arrow::buffer::Buffer;

use crate::config::HostConfig;
use crate::error::ArrowHostError;
use crate::host::{self, FunctionArguments, HostArray, HostValue};
use crate::null_handling::bitmap;

pub mod boolean_array;
pub mod factory;
pub mod numeric_array;
pub mod record_batch;
pub mod string_array;
pub mod timestamp_array;

pub use factory::{make_proxy, ProxyRegistry};
pub use numeric_array::NumericArray;

/// Name of the constructor argument carrying the host data array.
pub const DATA_ARG: &str = "HostArray";
/// Name of the constructor argument carrying the host validity mask.
pub const VALID_ARG: &str = "Valid";

/// A shared handle to a constructed proxy.
pub type ProxyRef = Arc<dyn Proxy>;

/// The object protocol every constructed proxy implements.
pub trait Proxy: Send + Sync + fmt::Debug {
    /// The registered class name this proxy was constructed under.
    fn class_name(&self) -> &'static str;

    /// The wrapped Arrow array, for array proxies.
    fn array(&self) -> Option<&ArrayRef> {
        None
    }

    /// Renders the proxy back into host-native form. Always copies.
    fn to_host(&self) -> Result<HostValue, ArrowHostError>;

    /// Invokes a named method. The default handles the methods every array
    /// proxy shares.
    fn call(&self, method: &str, args: &FunctionArguments) -> Result<HostValue, ArrowHostError> {
        call_array_method(self, method, args)
    }
}

/// Dispatches the methods shared by all array proxies.
pub fn call_array_method<P: Proxy + ?Sized>(
    proxy: &P,
    method: &str,
    _args: &FunctionArguments,
) -> Result<HostValue, ArrowHostError> {
    crate::log_event!("event" = "call", "class" = proxy.class_name(), "method" = method);

    if method == "toHost" {
        return proxy.to_host();
    }

    let unknown = || ArrowHostError::UnknownMethod {
        class_name: proxy.class_name(),
        method: method.to_string(),
    };
    let array = proxy.array().ok_or_else(unknown)?;

    match method {
        "length" => HostValue::scalar_i64(array.len() as i64),
        "valid" => {
            let valid = bitmap::unpack_nulls(array.nulls(), array.len())?;
            Ok(HostValue::Bool(host::column(valid)?))
        }
        "toString" => Ok(HostValue::Text(format!("{:?}", array))),
        _ => Err(unknown()),
    }
}

//==================================================================================
// Shared construction helpers
//==================================================================================

/// Borrows a host array's elements in logical order, copying only when the
/// array is not stored contiguously.
pub(crate) fn host_elements<T: Clone>(array: &HostArray<T>) -> Cow<'_, [T]> {
    match array.as_slice() {
        Some(slice) => Cow::Borrowed(slice),
        None => Cow::Owned(array.iter().cloned().collect()),
    }
}

/// Extracts the `Valid` argument, checks it against the data length, and packs it.
///
/// Returns `None` when the configuration elides all-valid bitmaps and the mask
/// has no nulls.
pub(crate) fn validity_bitmap(
    args: &FunctionArguments,
    data_len: usize,
    config: &HostConfig,
) -> Result<Option<Buffer>, ArrowHostError> {
    let valid = args.array::<bool>(VALID_ARG)?;
    check_lengths(DATA_ARG, data_len, VALID_ARG, valid.len())?;
    bitmap::pack_valid(&host_elements(valid), config.elide_all_valid_bitmap)
}

/// Rejects mismatched argument lengths instead of truncating.
pub(crate) fn check_lengths(
    left: &str,
    left_len: usize,
    right: &str,
    right_len: usize,
) -> Result<(), ArrowHostError> {
    if left_len != right_len {
        return Err(ArrowHostError::LengthMismatch {
            left: left.to_string(),
            left_len,
            right: right.to_string(),
            right_len,
        });
    }
    Ok(())
}
