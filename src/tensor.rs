//! Owned tensor over a shared, reference-counted buffer.
//!
//! A [`Tensor`] is a buffer handle plus a [`Layout`]. Cloning a tensor, or
//! taking an out-of-place `permute`/`reshape`, produces a new tensor that
//! shares the same buffer under its own layout; no elements are copied. The
//! buffer is copied lazily, on the first write through a handle whose buffer
//! is shared (copy-on-write), so writes never leak between aliasing tensors.

use std::ops::{Index, IndexMut};
use std::sync::Arc;

use strided_layout::{product, validate_shape, Dims, Layout, ShapeIter};

use crate::iter::{Iter, IterMut};
use crate::{Result, StridedError};

// ============================================================================
// Tensor
// ============================================================================

/// N-dimensional array with row-major logical order and strided storage.
///
/// Layout states:
/// - *contiguous*: live strides equal the canonical strides of the shape;
///   logical position `p` lives at buffer offset `p`.
/// - *strided view*: reached through a non-trivial [`permute_`](Self::permute_).
///   Only [`contiguous`](Self::contiguous) leads back.
pub struct Tensor<T> {
    data: Arc<Vec<T>>,
    layout: Layout,
}

impl<T> Clone for Tensor<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            layout: self.layout.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.layout.shape())
            .field("strides", &self.layout.strides())
            .field("data", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

/// Observational equality: same shape and same elements in logical order,
/// regardless of strides.
impl<T: PartialEq> PartialEq for Tensor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.iter().eq(other.iter())
    }
}

impl<T: Clone + Default> Tensor<T> {
    /// Allocate `product(shape)` default-valued elements in row-major layout.
    pub fn new(shape: &[usize]) -> Self {
        Self::full(shape, T::default())
    }
}

impl<T: Clone> Tensor<T> {
    /// Allocate `product(shape)` copies of `value`.
    ///
    /// Panics like `vec!` when the element count cannot be allocated.
    pub fn full(shape: &[usize], value: T) -> Self {
        Self {
            data: Arc::new(vec![value; product(shape)]),
            layout: Layout::contiguous(shape),
        }
    }
}

impl<T> Tensor<T> {
    /// Wrap a row-major buffer.
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Result<Self> {
        let expected = validate_shape(shape)?;
        if data.len() != expected {
            return Err(StridedError::SizeMismatch {
                from: data.len(),
                to: expected,
            });
        }
        Ok(Self::from_parts_unchecked(data, Layout::contiguous(shape)))
    }

    /// Rank-0 tensor holding one element.
    pub fn scalar(value: T) -> Self {
        Self::from_parts_unchecked(vec![value], Layout::contiguous(&[]))
    }

    /// Rank-0 tensor holding no elements.
    pub fn empty() -> Self {
        Self::from_parts_unchecked(Vec::new(), Layout::contiguous(&[]))
    }

    /// Build a row-major tensor by calling `f` with every coordinate in
    /// row-major order.
    pub fn from_fn(shape: &[usize], mut f: impl FnMut(&[usize]) -> T) -> Self {
        let data = ShapeIter::new(shape).map(|idx| f(&idx)).collect();
        Self::from_parts_unchecked(data, Layout::contiguous(shape))
    }

    pub(crate) fn from_parts_unchecked(data: Vec<T>, layout: Layout) -> Self {
        Self {
            data: Arc::new(data),
            layout,
        }
    }

    // ------------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------------

    /// Element count: product of the extents, except that a rank-0 tensor
    /// holds however many elements its buffer has (0 or 1).
    #[inline]
    pub fn numel(&self) -> usize {
        if self.layout.dim() == 0 {
            self.data.len()
        } else {
            self.layout.numel()
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.numel() == 0
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Extent of axis `i`.
    #[inline]
    pub fn extent(&self, i: usize) -> Result<usize> {
        self.layout.extent(i)
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    /// Live stride of axis `i`.
    #[inline]
    pub fn stride(&self, i: usize) -> Result<usize> {
        self.layout.stride(i)
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.layout.dim()
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Whether `self` and `other` currently alias one buffer.
    #[inline]
    pub fn shares_buffer<U>(&self, other: &Tensor<U>) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.data) as *const u8,
            Arc::as_ptr(&other.data) as *const u8,
        )
    }

    // ------------------------------------------------------------------------
    // Index translation
    // ------------------------------------------------------------------------

    /// Buffer offset of a coordinate under the live strides.
    #[inline]
    pub fn flatten_index(&self, indices: &[usize]) -> Result<usize> {
        self.layout.offset_of(indices)
    }

    /// Coordinate of logical position `pos`.
    pub fn unflatten_index(&self, pos: usize) -> Result<Dims> {
        let bound = self.numel();
        if pos >= bound {
            return Err(StridedError::IndexOutOfBounds { index: pos, bound });
        }
        Ok(self.layout.coords_of(pos))
    }

    // ------------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------------

    /// Element at a coordinate.
    pub fn at(&self, indices: &[usize]) -> Result<&T> {
        let offset = self.layout.offset_of(indices)?;
        self.data.get(offset).ok_or(StridedError::IndexOutOfBounds {
            index: offset,
            bound: self.data.len(),
        })
    }

    /// Element at logical (row-major) position `pos`.
    pub fn flat(&self, pos: usize) -> Result<&T> {
        let offset = self.layout.offset_of_position(pos, self.numel())?;
        Ok(&self.data[offset])
    }

    /// Shared borrow of the whole buffer, in storage order.
    ///
    /// Storage order equals logical order only when the tensor is contiguous.
    #[inline]
    pub fn buffer(&self) -> &[T] {
        &self.data
    }

    // ------------------------------------------------------------------------
    // Layout transformations
    // ------------------------------------------------------------------------

    /// Reinterpret under `shape` in place. Requires a contiguous layout.
    pub fn reshape_(&mut self, shape: &[usize]) -> Result<&mut Self> {
        let layout = if self.layout.dim() == 0 && self.data.is_empty() {
            let to = validate_shape(shape)?;
            if to != 0 {
                return Err(StridedError::SizeMismatch { from: 0, to });
            }
            Layout::contiguous(shape)
        } else {
            self.layout.reshape(shape)?
        };
        self.layout = layout;
        Ok(self)
    }

    /// Reshaped copy; the buffer is shared until either side writes.
    pub fn reshape(&self, shape: &[usize]) -> Result<Tensor<T>> {
        let mut out = self.clone();
        out.reshape_(shape)?;
        Ok(out)
    }

    /// Reorder axes in place. Never moves elements.
    pub fn permute_(&mut self, axes: &[usize]) -> Result<&mut Self> {
        self.layout = self.layout.permute(axes)?;
        Ok(self)
    }

    /// Permuted view sharing this tensor's buffer.
    pub fn permute(&self, axes: &[usize]) -> Result<Tensor<T>> {
        let mut out = self.clone();
        out.permute_(axes)?;
        Ok(out)
    }

    // ------------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------------

    /// Elements in logical (row-major) order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.data, &self.layout, self.numel())
    }

    /// Every coordinate of the shape in row-major order.
    pub fn shape_iter(&self) -> ShapeIter {
        ShapeIter::with_len(self.layout.shape(), self.numel())
    }
}

/// Exclusive access to a buffer, copying it first if it is shared.
fn make_unique<'a, T: Clone>(data: &'a mut Arc<Vec<T>>, shape: &[usize]) -> &'a mut Vec<T> {
    if Arc::get_mut(data).is_none() {
        log::debug!(
            "copy-on-write: detaching {} elements of shape {:?}",
            data.len(),
            shape
        );
    }
    Arc::make_mut(data)
}

impl<T: Clone> Tensor<T> {
    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut Vec<T> {
        make_unique(&mut self.data, self.layout.shape())
    }

    /// Mutable element at a coordinate.
    pub fn at_mut(&mut self, indices: &[usize]) -> Result<&mut T> {
        let offset = self.layout.offset_of(indices)?;
        let bound = self.data.len();
        self.data_mut()
            .get_mut(offset)
            .ok_or(StridedError::IndexOutOfBounds {
                index: offset,
                bound,
            })
    }

    /// Mutable element at logical position `pos`.
    pub fn flat_mut(&mut self, pos: usize) -> Result<&mut T> {
        let offset = self.layout.offset_of_position(pos, self.numel())?;
        Ok(&mut self.data_mut()[offset])
    }

    /// Mutable elements in logical order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let len = self.numel();
        let data = make_unique(&mut self.data, self.layout.shape());
        IterMut::new(data, &self.layout, len)
    }

    /// Elements in logical order, collected into a `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Row-major tensor with the same logical contents.
    ///
    /// A contiguous tensor is returned as a buffer-sharing clone; a strided
    /// view is materialized into a fresh buffer.
    pub fn contiguous(&self) -> Tensor<T> {
        if self.is_contiguous() {
            return self.clone();
        }
        log::debug!(
            "materializing strided view shape={:?} strides={:?}",
            self.layout.shape(),
            self.layout.strides()
        );
        Self::from_parts_unchecked(self.to_vec(), Layout::contiguous(self.layout.shape()))
    }
}

impl<T> Index<&[usize]> for Tensor<T> {
    type Output = T;

    fn index(&self, indices: &[usize]) -> &T {
        match self.at(indices) {
            Ok(v) => v,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: Clone> IndexMut<&[usize]> for Tensor<T> {
    fn index_mut(&mut self, indices: &[usize]) -> &mut T {
        match self.at_mut(indices) {
            Ok(v) => v,
            Err(err) => panic!("{err}"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn iota(shape: &[usize]) -> Tensor<i32> {
        Tensor::iota(shape, 0)
    }

    #[test]
    fn test_new_is_default_filled() {
        let t = Tensor::<i32>::new(&[4, 4, 4]);
        assert_eq!(t.numel(), 64);
        assert_eq!(t.dim(), 3);
        assert!(t.iter().all(|&x| x == 0));
    }

    #[test]
    fn test_scalar_and_empty() {
        let s = Tensor::scalar(7);
        assert_eq!(s.dim(), 0);
        assert_eq!(s.numel(), 1);
        assert_eq!(*s.at(&[]).unwrap(), 7);

        let e = Tensor::<i32>::empty();
        assert_eq!(e.dim(), 0);
        assert_eq!(e.numel(), 0);
        assert!(e.is_empty());
        assert!(e.at(&[]).is_err());
        assert_eq!(e.iter().count(), 0);
        assert_eq!(e.shape_iter().count(), 0);
    }

    #[test]
    fn test_from_vec_size_mismatch() {
        assert_eq!(
            Tensor::from_vec(&[2, 3], vec![1, 2, 3]).unwrap_err(),
            StridedError::SizeMismatch { from: 3, to: 6 }
        );
    }

    #[test]
    fn test_from_vec_overflowing_shape() {
        assert_eq!(
            Tensor::<u8>::from_vec(&[usize::MAX, 3], vec![]).unwrap_err(),
            StridedError::ShapeOverflow(vec![usize::MAX, 3])
        );
        let t = Tensor::<u8>::from_vec(&[usize::MAX, 0], vec![]).unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn test_from_fn_row_major() {
        let t = Tensor::from_fn(&[2, 3], |idx| idx[0] * 10 + idx[1]);
        assert_eq!(t.buffer(), &[0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn test_extent_and_stride() {
        let t = iota(&[1, 3, 5, 10]);
        assert_eq!(t.strides(), &[150, 50, 10, 1]);
        assert_eq!(t.stride(1).unwrap(), 50);
        assert_eq!(t.extent(3).unwrap(), 10);
        assert_eq!(
            t.extent(4).unwrap_err(),
            StridedError::IndexOutOfBounds { index: 4, bound: 4 }
        );
    }

    #[test]
    fn test_at_and_at_mut() {
        let mut t = Tensor::<i32>::new(&[4, 4, 4]);
        *t.at_mut(&[1, 2, 3]).unwrap() = 10;
        assert_eq!(*t.at(&[1, 2, 3]).unwrap(), 10);
        assert_eq!(
            t.at(&[1, 2]).unwrap_err(),
            StridedError::DimensionMismatch { expected: 3, got: 2 }
        );
        assert_eq!(
            t.at(&[0, 4, 0]).unwrap_err(),
            StridedError::IndexOutOfBounds { index: 4, bound: 4 }
        );
    }

    #[test]
    fn test_flat_follows_logical_order() {
        let t = iota(&[2, 3]).permute(&[1, 0]).unwrap();
        let got: Vec<i32> = (0..6).map(|p| *t.flat(p).unwrap()).collect();
        assert_eq!(got, vec![0, 3, 1, 4, 2, 5]);
        assert_eq!(
            t.flat(6).unwrap_err(),
            StridedError::IndexOutOfBounds { index: 6, bound: 6 }
        );
    }

    #[test]
    fn test_flatten_unflatten() {
        let t = iota(&[2, 3]);
        for p in 0..t.numel() {
            let idx = t.unflatten_index(p).unwrap();
            assert_eq!(t.flatten_index(&idx).unwrap(), p);
        }
        let v = t.permute(&[1, 0]).unwrap();
        // logical order of the view is row-major over its own shape
        assert_eq!(v.unflatten_index(1).unwrap().as_slice(), &[0, 1]);
        assert_eq!(v.flatten_index(&[0, 1]).unwrap(), 3);
        assert!(v.unflatten_index(6).is_err());
    }

    #[test]
    fn test_permute_shares_buffer() {
        let t = iota(&[2, 3]);
        let v = t.permute(&[1, 0]).unwrap();
        assert!(v.shares_buffer(&t));
        assert!(!v.is_contiguous());
        assert_eq!(v.shape(), &[3, 2]);
        for i in 0..3 {
            for j in 0..2 {
                assert_eq!(v.at(&[i, j]).unwrap(), t.at(&[j, i]).unwrap());
            }
        }
    }

    #[test]
    fn test_write_through_view_detaches() {
        let t = iota(&[2, 3]);
        let mut v = t.permute(&[1, 0]).unwrap();
        *v.at_mut(&[2, 1]).unwrap() = 99;
        assert!(!v.shares_buffer(&t));
        assert_eq!(*v.at(&[2, 1]).unwrap(), 99);
        assert_eq!(*t.at(&[1, 2]).unwrap(), 5);
    }

    #[test]
    fn test_unique_write_stays_in_place() {
        let mut t = iota(&[2, 2]);
        let before = t.buffer().as_ptr();
        t[&[0usize, 1] as &[usize]] = 42;
        assert_eq!(t.buffer().as_ptr(), before);
        assert_eq!(t[&[0usize, 1] as &[usize]], 42);
    }

    #[test]
    fn test_permute_in_place() {
        let mut t = iota(&[2, 3, 4]);
        t.permute_(&[2, 0, 1]).unwrap();
        assert_eq!(t.shape(), &[4, 2, 3]);
        assert_eq!(t.strides(), &[1, 12, 4]);
        assert_eq!(*t.at(&[3, 1, 2]).unwrap(), 23);
    }

    #[test]
    fn test_permute_failure_leaves_tensor_untouched() {
        let mut t = iota(&[2, 3]);
        assert!(t.permute_(&[0, 0]).is_err());
        assert_eq!(t.shape(), &[2, 3]);
        assert!(t.is_contiguous());
    }

    #[test]
    fn test_reshape_in_place() {
        let mut t = iota(&[1, 3, 5, 10]);
        t.reshape_(&[15, 2, 5]).unwrap();
        assert_eq!(t.strides(), &[10, 5, 1]);
        assert_eq!(
            t.reshape_(&[1, 2, 3, 4]).unwrap_err(),
            StridedError::SizeMismatch { from: 150, to: 24 }
        );
        assert_eq!(t.shape(), &[15, 2, 5]);
    }

    #[test]
    fn test_reshape_out_of_place() {
        let t = iota(&[15, 2, 5]);
        let r = t.reshape(&[1, 10, 5, 3]).unwrap();
        assert_eq!(t.shape(), &[15, 2, 5]);
        for i in 0..r.numel() {
            assert_eq!(*r.flat(i).unwrap(), i as i32);
        }
    }

    #[test]
    fn test_reshape_empty_to_huge_extents() {
        let mut t = Tensor::<u8>::new(&[0]);
        t.reshape_(&[usize::MAX, 2, 0]).unwrap();
        assert_eq!(t.shape(), &[usize::MAX, 2, 0]);
        assert_eq!(t.numel(), 0);
        assert_eq!(t.iter().count(), 0);
        assert_eq!(
            t.reshape_(&[usize::MAX, 2]).unwrap_err(),
            StridedError::ShapeOverflow(vec![usize::MAX, 2])
        );
        assert_eq!(t.shape(), &[usize::MAX, 2, 0]);
    }

    #[test]
    fn test_reshape_view_rejected() {
        let mut v = iota(&[2, 3]).permute(&[1, 0]).unwrap();
        assert_eq!(v.reshape_(&[6]).unwrap_err(), StridedError::NotContiguous);
        assert_eq!(v.shape(), &[3, 2]);
    }

    #[test]
    fn test_reshape_empty_scalar() {
        let mut e = Tensor::<f32>::empty();
        e.reshape_(&[0, 3]).unwrap();
        assert_eq!(e.shape(), &[0, 3]);
        assert_eq!(e.numel(), 0);
        let mut e = Tensor::<f32>::empty();
        assert!(e.reshape_(&[1]).is_err());
        let mut e = Tensor::<f32>::empty();
        assert!(matches!(
            e.reshape_(&[usize::MAX, 2]),
            Err(StridedError::ShapeOverflow(_))
        ));
    }

    #[test]
    fn test_contiguous_materializes() {
        let v = iota(&[2, 3]).permute(&[1, 0]).unwrap();
        let c = v.contiguous();
        assert!(c.is_contiguous());
        assert!(!c.shares_buffer(&v));
        assert_eq!(c.buffer(), &[0, 3, 1, 4, 2, 5]);
        assert_eq!(c, v);
    }

    #[test]
    fn test_contiguous_of_contiguous_shares() {
        let t = iota(&[3]);
        assert!(t.contiguous().shares_buffer(&t));
    }

    #[test]
    fn test_iter_mut_logical_order() {
        let mut v = Tensor::<i32>::new(&[2, 3]).permute(&[1, 0]).unwrap();
        for (k, x) in v.iter_mut().enumerate() {
            *x = k as i32;
        }
        assert_eq!(v.to_vec(), vec![0, 1, 2, 3, 4, 5]);
        // underlying row-major storage of the original 2x3 shape
        assert_eq!(v.buffer(), &[0, 2, 4, 1, 3, 5]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_panics_out_of_bounds() {
        let t = iota(&[2, 2]);
        let _ = t[&[2usize, 0] as &[usize]];
    }

    #[test]
    fn test_equality_ignores_strides() {
        let a = iota(&[2, 3]);
        let b = a.permute(&[1, 0]).unwrap().contiguous().permute(&[1, 0]).unwrap();
        assert!(!b.is_contiguous());
        assert_eq!(a, b);
        assert_ne!(a, a.reshape(&[3, 2]).unwrap());
    }
}
