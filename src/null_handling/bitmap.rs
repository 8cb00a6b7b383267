// --- IN: src/null_handling/bitmap.rs ---

//! Pure, stateless kernels for converting host validity flags into Arrow
//! validity bitmaps and back.
//!
//! Bitmaps use Arrow's convention: one bit per element, least-significant bit
//! first within each byte, bit = 1 meaning "valid". A missing bitmap means every
//! element is valid.

use arrow::buffer::{Buffer, NullBuffer};
use bitvec::prelude::*;

use crate::error::ArrowHostError;

//==================================================================================
// 1. Packing
//==================================================================================

/// Packs a sequence of booleans into a freshly allocated bitmap of
/// `ceil(len / 8)` bytes.
///
/// Bit `i` (bit `i % 8` of byte `i / 8`) equals `bools[i]`. Padding bits in the
/// final byte are left zero. The output never aliases the input.
///
/// # Errors
/// Returns `ArrowHostError::BitpackValidityBitmap` if the bitmap cannot be
/// allocated.
pub fn pack(bools: &[bool]) -> Result<Buffer, ArrowHostError> {
    let num_bytes = bools.len().div_ceil(8);

    let mut bytes: Vec<u8> = Vec::new();
    bytes.try_reserve_exact(num_bytes)?;
    bytes.resize(num_bytes, 0);

    let bits = bytes.view_bits_mut::<Lsb0>();
    for (i, &valid) in bools.iter().enumerate() {
        bits.set(i, valid);
    }

    Ok(Buffer::from_vec(bytes))
}

/// Packs a validity mask, optionally eliding the bitmap when nothing is null.
///
/// With `elide_all_valid` set, an input with no `false` entries (including an
/// empty input) yields `None`, which Arrow reads as "all valid". Otherwise the
/// result is always `Some(pack(valid)?)`.
pub fn pack_valid(valid: &[bool], elide_all_valid: bool) -> Result<Option<Buffer>, ArrowHostError> {
    if elide_all_valid && valid.iter().all(|&v| v) {
        return Ok(None);
    }
    pack(valid).map(Some)
}

//==================================================================================
// 2. Unpacking
//==================================================================================

/// Unpacks exactly `length` booleans from a packed bitmap.
///
/// # Errors
/// Returns `ArrowHostError::TruncatedBitmap` if `bitmap` holds fewer than
/// `ceil(length / 8)` bytes.
pub fn unpack(bitmap: &[u8], length: usize) -> Result<Vec<bool>, ArrowHostError> {
    unpack_at(bitmap, 0, length)
}

/// Unpacks an optional bitmap; `None` yields `length` copies of `true`.
pub fn unpack_valid(bitmap: Option<&[u8]>, length: usize) -> Result<Vec<bool>, ArrowHostError> {
    match bitmap {
        Some(bytes) => unpack(bytes, length),
        None => Ok(vec![true; length]),
    }
}

/// Reads an Arrow array's validity back into host booleans, honouring the
/// bit offset of sliced arrays.
pub fn unpack_nulls(nulls: Option<&NullBuffer>, length: usize) -> Result<Vec<bool>, ArrowHostError> {
    match nulls {
        Some(nb) => unpack_at(nb.validity(), nb.offset(), length),
        None => Ok(vec![true; length]),
    }
}

fn unpack_at(bitmap: &[u8], bit_offset: usize, length: usize) -> Result<Vec<bool>, ArrowHostError> {
    let needed = (bit_offset + length).div_ceil(8);
    if bitmap.len() < needed {
        return Err(ArrowHostError::TruncatedBitmap {
            length,
            needed,
            actual: bitmap.len(),
        });
    }

    let bits = bitmap.view_bits::<Lsb0>();
    Ok(bits[bit_offset..bit_offset + length].iter().by_vals().collect())
}
