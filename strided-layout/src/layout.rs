//! Layout descriptor: shape, live strides and canonical strides.

use crate::index::{ravel_checked, ravel_unravel, unravel};
use crate::shape::{canonical_strides, permute_sequence, product, validate_shape, Dims};
use crate::{Result, StridedError};

/// Shape plus the strides that place each coordinate in a flat buffer.
///
/// `canon` is always `canonical_strides(shape)`; it is recomputed whenever the
/// shape changes and never set independently. The layout is contiguous iff
/// `strides == canon`.
///
/// Transformations return a new `Layout` rather than editing fields, so a
/// failed call leaves the original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layout {
    shape: Dims,
    strides: Dims,
    canon: Dims,
}

impl Layout {
    /// Dense row-major layout for `shape`.
    pub fn contiguous(shape: &[usize]) -> Self {
        let canon = canonical_strides(shape);
        Self {
            shape: shape.into(),
            strides: canon.clone(),
            canon,
        }
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn canonical_strides(&self) -> &[usize] {
        &self.canon
    }

    /// Number of axes.
    #[inline]
    pub fn dim(&self) -> usize {
        self.shape.len()
    }

    /// Product of the extents; 1 for the rank-0 layout.
    #[inline]
    pub fn numel(&self) -> usize {
        product(&self.shape)
    }

    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.strides == self.canon
    }

    /// Extent of axis `i`.
    pub fn extent(&self, i: usize) -> Result<usize> {
        self.shape.get(i).copied().ok_or(StridedError::IndexOutOfBounds {
            index: i,
            bound: self.dim(),
        })
    }

    /// Live stride of axis `i`.
    pub fn stride(&self, i: usize) -> Result<usize> {
        self.strides.get(i).copied().ok_or(StridedError::IndexOutOfBounds {
            index: i,
            bound: self.dim(),
        })
    }

    /// Reinterpret a contiguous layout under `new_shape`.
    ///
    /// Fails with `ShapeOverflow` when `new_shape` spans more than `usize::MAX`
    /// elements, with `SizeMismatch` when the element counts differ and with
    /// `NotContiguous` on a view; a view must be materialized first.
    pub fn reshape(&self, new_shape: &[usize]) -> Result<Layout> {
        let (from, to) = (self.numel(), validate_shape(new_shape)?);
        if from != to {
            return Err(StridedError::SizeMismatch { from, to });
        }
        if !self.is_contiguous() {
            return Err(StridedError::NotContiguous);
        }
        log::trace!("reshape {:?} -> {:?}", self.shape.as_slice(), new_shape);
        Ok(Layout::contiguous(new_shape))
    }

    /// Reorder axes: `new.shape[i] = shape[axes[i]]`, same for strides.
    ///
    /// Canonical strides are recomputed from the permuted shape, so any
    /// non-identity permutation of a multi-axis layout yields a strided view.
    pub fn permute(&self, axes: &[usize]) -> Result<Layout> {
        let shape = permute_sequence(&self.shape, axes)?;
        let strides = permute_sequence(&self.strides, axes)?;
        let canon = canonical_strides(&shape);
        log::trace!(
            "permute {:?} by {:?} -> shape {:?} strides {:?}",
            self.shape.as_slice(),
            axes,
            shape.as_slice(),
            strides.as_slice()
        );
        Ok(Layout {
            shape,
            strides,
            canon,
        })
    }

    /// Physical offset of a coordinate, with per-axis bounds checks.
    #[inline]
    pub fn offset_of(&self, indices: &[usize]) -> Result<usize> {
        ravel_checked(indices, &self.shape, &self.strides)
    }

    /// Physical offset of logical position `pos`.
    ///
    /// `bound` is the element count of the owning tensor, which differs from
    /// `numel()` only for the empty rank-0 tensor.
    #[inline]
    pub fn offset_of_position(&self, pos: usize, bound: usize) -> Result<usize> {
        if pos >= bound {
            return Err(StridedError::IndexOutOfBounds { index: pos, bound });
        }
        Ok(self.offset_of_position_unchecked(pos))
    }

    /// [`offset_of_position`](Self::offset_of_position) without the bound check.
    #[inline]
    pub fn offset_of_position_unchecked(&self, pos: usize) -> usize {
        ravel_unravel(pos, &self.strides, &self.canon)
    }

    /// Coordinate of logical position `pos` (row-major decomposition).
    #[inline]
    pub fn coords_of(&self, pos: usize) -> Dims {
        unravel(pos, &self.canon)
    }
}
