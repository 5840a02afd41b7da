//! Translation between coordinates, logical positions and buffer offsets.
//!
//! Three spaces are involved:
//!
//! - a *coordinate* is an index tuple, one entry per axis;
//! - a *logical position* is the rank of a coordinate in row-major
//!   enumeration order, i.e. its offset under canonical strides;
//! - a *physical offset* is where the element lives in the buffer, i.e. the
//!   coordinate's offset under the live (possibly permuted) strides.
//!
//! `ravel` and `unravel` are mutual inverses only when both use canonical
//! strides. `ravel_unravel` maps logical position straight to physical offset.

use crate::shape::Dims;
use crate::{Result, StridedError};

/// Offset of `indices` under `strides`: `sum(indices[i] * strides[i])`.
///
/// Only the tuple length is validated; see [`ravel_checked`] for per-axis
/// bounds checking.
#[inline]
pub fn ravel(indices: &[usize], strides: &[usize]) -> Result<usize> {
    if indices.len() != strides.len() {
        return Err(StridedError::DimensionMismatch {
            expected: strides.len(),
            got: indices.len(),
        });
    }
    Ok(indices.iter().zip(strides).map(|(&i, &s)| i * s).sum())
}

/// [`ravel`] that also checks `indices[i] < shape[i]` on every axis.
pub fn ravel_checked(indices: &[usize], shape: &[usize], strides: &[usize]) -> Result<usize> {
    if indices.len() != shape.len() {
        return Err(StridedError::DimensionMismatch {
            expected: shape.len(),
            got: indices.len(),
        });
    }
    for (&index, &bound) in indices.iter().zip(shape) {
        if index >= bound {
            return Err(StridedError::IndexOutOfBounds { index, bound });
        }
    }
    ravel(indices, strides)
}

/// Decompose `flat` against `strides`, most significant axis first.
///
/// `indices[i] = flat / strides[i]; flat %= strides[i]`, left to right.
/// A zero stride (an axis following a zero extent) decomposes to 0.
pub fn unravel(mut flat: usize, strides: &[usize]) -> Dims {
    strides
        .iter()
        .map(|&stride| {
            if stride == 0 {
                return 0;
            }
            let idx = flat / stride;
            flat %= stride;
            idx
        })
        .collect()
}

/// Physical offset of logical position `flat`, without building a coordinate.
///
/// Walks the axes in canonical order, splitting `flat` by `canon[i]` and
/// accumulating `quotient * strides[i]`. When `strides == canon` the layout is
/// dense row-major and `flat` is returned unchanged.
#[inline]
pub fn ravel_unravel(mut flat: usize, strides: &[usize], canon: &[usize]) -> usize {
    if strides == canon {
        return flat;
    }
    let mut offset = 0;
    for (&stride, &c) in strides.iter().zip(canon) {
        if c == 0 {
            continue;
        }
        offset += (flat / c) * stride;
        flat %= c;
    }
    offset
}
