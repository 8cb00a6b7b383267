// In: src/proxy/numeric_array.rs

//! The generic proxy for every fixed-width numeric array type.
//!
//! One implementation serves all ten element types; the element type only
//! selects the Arrow primitive type and the type tag (see `NumericElement`).

use std::ptr::NonNull;
use std::sync::Arc;

use arrow::array::{Array, ArrayData, ArrayRef, PrimitiveArray};
use arrow::buffer::Buffer;
use arrow::datatypes::ArrowPrimitiveType;

use crate::config::HostConfig;
use crate::error::ArrowHostError;
use crate::host::{self, FunctionArguments, HostArray, HostValue};
use crate::proxy::{factory, validity_bitmap, Proxy, ProxyRef, DATA_ARG};
use crate::traits::NumericElement;

/// Wraps a host numeric array as an Arrow buffer without copying it.
///
/// The returned buffer's allocation owner is a clone of the shared host array,
/// so the memory stays alive for as long as any Arrow view references it. A host
/// array that is not in standard (contiguous, row-major) layout is copied into
/// standard layout first.
pub(crate) fn wrap_host_buffer<T: NumericElement>(host_array: &HostArray<T>) -> Buffer {
    let shared = if host_array.is_standard_layout() {
        host_array.clone()
    } else {
        log::debug!(
            "host {} array is not contiguous, copying {} elements",
            T::ELEMENT_TYPE,
            host_array.len()
        );
        host_array.as_standard_layout().into_owned().into_shared()
    };

    let values: &[T] = shared.as_slice().unwrap_or(&[]);
    let bytes: &[u8] = bytemuck::cast_slice(values);
    let ptr = NonNull::from(bytes).cast::<u8>();
    let byte_len = bytes.len();

    // SAFETY: `ptr` points to `byte_len` initialised bytes owned by `shared`'s
    // reference-counted storage. `shared` is moved into the owner `Arc`, which the
    // buffer holds until the last view is dropped. `ArcArray` is copy-on-write, so
    // host-side writes never reach this storage while it is shared.
    unsafe { Buffer::from_custom_allocation(ptr, byte_len, Arc::new(shared)) }
}

/// A proxy around an Arrow `PrimitiveArray` built from host memory.
#[derive(Debug)]
pub struct NumericArray<T: NumericElement> {
    values: PrimitiveArray<T::ArrowType>,
    array: ArrayRef,
}

impl<T: NumericElement> NumericArray<T> {
    pub fn new(values: PrimitiveArray<T::ArrowType>) -> Self {
        let array: ArrayRef = Arc::new(values.clone());
        Self { values, array }
    }

    /// Builds the array from `HostArray` (data) and `Valid` (validity mask).
    ///
    /// The data payload is shared with the host array, not copied. The validity
    /// mask is always packed into a new bitmap.
    pub fn make(args: &FunctionArguments, config: &HostConfig) -> Result<ProxyRef, ArrowHostError> {
        let host_data = args.array::<T>(DATA_ARG)?;
        let length = host_data.len();
        let validity = validity_bitmap(args, length, config)?;

        let data_buffer = wrap_host_buffer(host_data);
        let data = ArrayData::builder(T::ArrowType::DATA_TYPE)
            .len(length)
            .add_buffer(data_buffer)
            .null_bit_buffer(validity)
            .build()?;

        let proxy = Self::new(PrimitiveArray::<T::ArrowType>::from(data));
        crate::log_event!(
            "event" = "make",
            "type" = T::ELEMENT_TYPE,
            "length" = length,
            "nulls" = proxy.values.null_count()
        );
        Ok(Arc::new(proxy))
    }
}

impl<T: NumericElement> Proxy for NumericArray<T> {
    fn class_name(&self) -> &'static str {
        factory::array_class_name(T::ELEMENT_TYPE)
    }

    fn array(&self) -> Option<&ArrayRef> {
        Some(&self.array)
    }

    /// Copies the raw values into a `[len, 1]` host array. Null slots keep
    /// whatever value their data slot holds.
    fn to_host(&self) -> Result<HostValue, ArrowHostError> {
        let raw: &[T] = self.values.values();
        Ok(T::into_host(host::column(raw.to_vec())?))
    }
}
