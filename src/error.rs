// In: src/error.rs

//! This module defines the single, unified error type for the arrow-host library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Every variant carries a fixed, stable identifier (see [`ArrowHostError::id`])
//! so host callers can branch on the error category without parsing messages.

use thiserror::Error;

//==================================================================================
// 1. Stable Error Identifiers
//==================================================================================

pub const BITPACK_VALIDITY_BITMAP_ERROR_ID: &str = "arrow:bitpack:ValidityBitmap";
pub const TRUNCATED_BITMAP_ERROR_ID: &str = "arrow:bitpack:TruncatedBitmap";
pub const UNKNOWN_PROXY_ERROR_ID: &str = "arrow:proxy:UnknownProxy";
pub const UNKNOWN_METHOD_ERROR_ID: &str = "arrow:proxy:UnknownMethod";
pub const MISSING_ARGUMENT_ERROR_ID: &str = "arrow:proxy:MissingArgument";
pub const ARGUMENT_TYPE_ERROR_ID: &str = "arrow:proxy:ArgumentType";
pub const LENGTH_MISMATCH_ERROR_ID: &str = "arrow:proxy:LengthMismatch";
pub const UNSUPPORTED_TYPE_ERROR_ID: &str = "arrow:type:Unsupported";
pub const CONFIG_ERROR_ID: &str = "arrow:config:Invalid";
pub const ARROW_ERROR_ID: &str = "arrow:status:Invalid";
pub const SHAPE_ERROR_ID: &str = "arrow:host:Shape";
pub const IO_ERROR_ID: &str = "arrow:io:Failed";
pub const FFI_ERROR_ID: &str = "arrow:ffi:Failed";

//==================================================================================
// 2. The Error Type
//==================================================================================

#[derive(Error, Debug)]
pub enum ArrowHostError {
    // =========================================================================
    // === Bitmap Codec Errors
    // =========================================================================
    #[error("Failed to pack validity bitmap: {0}")]
    BitpackValidityBitmap(#[from] std::collections::TryReserveError),

    #[error("Validity bitmap is truncated: {length} elements need {needed} bytes, got {actual}")]
    TruncatedBitmap {
        length: usize,
        needed: usize,
        actual: usize,
    },

    // =========================================================================
    // === Proxy Dispatch Errors
    // =========================================================================
    #[error("Did not find matching proxy for {0}")]
    UnknownProxy(String),

    #[error("Unknown method '{method}' for proxy {class_name}")]
    UnknownMethod {
        class_name: &'static str,
        method: String,
    },

    // =========================================================================
    // === Constructor Argument Errors (caller misuse)
    // =========================================================================
    #[error("Missing required constructor argument '{0}'")]
    MissingArgument(String),

    #[error("Constructor argument '{name}' holds {actual}, expected {expected}")]
    ArgumentType {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Length mismatch: '{left}' has {left_len} elements but '{right}' has {right_len}")]
    LengthMismatch {
        left: String,
        left_len: usize,
        right: String,
        right_len: usize,
    },

    #[error("Unsupported data type for this operation: {0}")]
    UnsupportedType(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    // =========================================================================
    // === External Error Wrappers
    // =========================================================================
    /// An error originating from the Arrow library (e.g. `ArrayData` validation).
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// A host array could not be given the requested shape.
    #[error("Host array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error for Python FFI operations.
    #[error("FFI operation failed: {0}")]
    FfiError(String), // PyErr doesn't impl Error, so we can't use #[from] here.
}

impl ArrowHostError {
    /// Returns the fixed identifier for this error's category.
    pub fn id(&self) -> &'static str {
        match self {
            Self::BitpackValidityBitmap(_) => BITPACK_VALIDITY_BITMAP_ERROR_ID,
            Self::TruncatedBitmap { .. } => TRUNCATED_BITMAP_ERROR_ID,
            Self::UnknownProxy(_) => UNKNOWN_PROXY_ERROR_ID,
            Self::UnknownMethod { .. } => UNKNOWN_METHOD_ERROR_ID,
            Self::MissingArgument(_) => MISSING_ARGUMENT_ERROR_ID,
            Self::ArgumentType { .. } => ARGUMENT_TYPE_ERROR_ID,
            Self::LengthMismatch { .. } => LENGTH_MISMATCH_ERROR_ID,
            Self::UnsupportedType(_) => UNSUPPORTED_TYPE_ERROR_ID,
            Self::Config(_) => CONFIG_ERROR_ID,
            Self::Arrow(_) => ARROW_ERROR_ID,
            Self::Shape(_) => SHAPE_ERROR_ID,
            Self::SerdeJson(_) => CONFIG_ERROR_ID,
            Self::Io(_) => IO_ERROR_ID,
            Self::FfiError(_) => FFI_ERROR_ID,
        }
    }
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

#[cfg(feature = "python")]
impl From<pyo3::PyErr> for ArrowHostError {
    fn from(err: pyo3::PyErr) -> Self {
        ArrowHostError::FfiError(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<ArrowHostError> for pyo3::PyErr {
    fn from(err: ArrowHostError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(format!("{}: {}", err.id(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_proxy_message_echoes_name() {
        let err = ArrowHostError::UnknownProxy("not.a.real.class".to_string());
        assert_eq!(err.id(), UNKNOWN_PROXY_ERROR_ID);
        assert!(err.to_string().contains("not.a.real.class"));
    }

    #[test]
    fn test_try_reserve_failure_maps_to_bitpack_id() {
        let reserve_err = Vec::<u8>::new().try_reserve_exact(usize::MAX).unwrap_err();
        let err: ArrowHostError = reserve_err.into();
        assert_eq!(err.id(), BITPACK_VALIDITY_BITMAP_ERROR_ID);
    }
}
