//! Pure shape and stride math.

use smallvec::SmallVec;

use crate::{Result, StridedError};

/// Stack-allocated sequence of extents, strides or coordinates.
/// Six inline slots cover the ranks seen in practice without touching the heap.
pub type Dims = SmallVec<[usize; 6]>;

/// Number of elements spanned by `shape`, or `None` if it overflows `usize`.
///
/// Any zero extent makes the count 0, however large the other extents are.
pub fn checked_product(shape: &[usize]) -> Option<usize> {
    if shape.contains(&0) {
        return Some(0);
    }
    shape.iter().try_fold(1usize, |acc, &n| acc.checked_mul(n))
}

/// Number of elements spanned by `shape`.
///
/// The empty shape yields 1 (the multiplicative identity), which is the
/// element count of a scalar. Saturates at `usize::MAX`; use
/// [`checked_product`] to validate a caller-supplied shape.
#[inline]
pub fn product(shape: &[usize]) -> usize {
    checked_product(shape).unwrap_or(usize::MAX)
}

/// Element count of a caller-supplied shape, failing with `ShapeOverflow`.
pub fn validate_shape(shape: &[usize]) -> Result<usize> {
    checked_product(shape).ok_or_else(|| StridedError::ShapeOverflow(shape.to_vec()))
}

/// Compute dense row-major strides (last axis varies fastest).
///
/// `canon[d-1] = 1` and `canon[i] = canon[i+1] * shape[i+1]`. For a shape
/// whose element count fits in `usize`, a stride can only exceed it to the
/// left of a zero extent, where no coordinate exists; such strides saturate.
pub fn canonical_strides(shape: &[usize]) -> Dims {
    let rank = shape.len();
    let mut strides: Dims = smallvec::smallvec![1; rank];
    for i in (0..rank.saturating_sub(1)).rev() {
        strides[i] = strides[i + 1].saturating_mul(shape[i + 1]);
    }
    strides
}

/// Check that `axes` is a bijection on `[0, rank)`.
pub fn validate_permutation(axes: &[usize], rank: usize) -> Result<()> {
    if axes.len() != rank {
        return Err(StridedError::InvalidPermutation(axes.to_vec()));
    }
    let mut seen: SmallVec<[bool; 6]> = smallvec::smallvec![false; rank];
    for &a in axes {
        if a >= rank || seen[a] {
            return Err(StridedError::InvalidPermutation(axes.to_vec()));
        }
        seen[a] = true;
    }
    Ok(())
}

/// Reorder `values` so that `result[i] = values[axes[i]]`.
pub fn permute_sequence(values: &[usize], axes: &[usize]) -> Result<Dims> {
    validate_permutation(axes, values.len())?;
    Ok(axes.iter().map(|&a| values[a]).collect())
}

/// The permutation that undoes `axes`.
pub fn inverse_permutation(axes: &[usize]) -> Result<Dims> {
    validate_permutation(axes, axes.len())?;
    let mut inv: Dims = smallvec::smallvec![0; axes.len()];
    for (i, &a) in axes.iter().enumerate() {
        inv[a] = i;
    }
    Ok(inv)
}
