//! This module serves as the public API for all null-handling logic within the
//! arrow-host core.
//!
//! Host environments describe nullability as one boolean per element, while
//! Arrow stores it as a packed validity bitmap. The `bitmap` codec converts
//! between the two. This module is PURE RUST and is decoupled from the FFI layer.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// The codec for packing and unpacking Arrow-compatible validity bitmaps.
pub mod bitmap;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================

pub use bitmap::{pack, pack_valid, unpack, unpack_nulls, unpack_valid};

//==================================================================================
// 3. Unit Tests (Module-level integration tests)
//==================================================================================

#[cfg(test)]
mod bitmap_tests;
