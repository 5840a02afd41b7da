//! Strided element iterators.
//!
//! Both iterators walk logical positions `0..numel` and resolve each one to a
//! buffer offset with `ravel_unravel` against the live and canonical strides.
//! A contiguous layout skips the translation entirely and wraps the slice
//! iterator; the two paths yield the same elements in the same order.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use strided_layout::Layout;

// ============================================================================
// Iter
// ============================================================================

/// Shared references to a tensor's elements in logical (row-major) order.
#[derive(Debug)]
pub struct Iter<'a, T> {
    inner: IterInner<'a, T>,
}

#[derive(Debug)]
enum IterInner<'a, T> {
    Contiguous(std::slice::Iter<'a, T>),
    Strided {
        data: &'a [T],
        layout: &'a Layout,
        front: usize,
        back: usize,
    },
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Clone for IterInner<'_, T> {
    fn clone(&self) -> Self {
        match self {
            Self::Contiguous(it) => Self::Contiguous(it.clone()),
            Self::Strided {
                data,
                layout,
                front,
                back,
            } => Self::Strided {
                data: *data,
                layout: *layout,
                front: *front,
                back: *back,
            },
        }
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(data: &'a [T], layout: &'a Layout, len: usize) -> Self {
        let inner = if layout.is_contiguous() {
            IterInner::Contiguous(data[..len].iter())
        } else {
            IterInner::Strided {
                data,
                layout,
                front: 0,
                back: len,
            }
        };
        Self { inner }
    }

    /// Whether this iterator is on the contiguous fast path.
    pub fn is_contiguous(&self) -> bool {
        matches!(self.inner, IterInner::Contiguous(_))
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        match &mut self.inner {
            IterInner::Contiguous(it) => it.next(),
            IterInner::Strided {
                data,
                layout,
                front,
                back,
            } => {
                if *front >= *back {
                    return None;
                }
                let data: &'a [T] = *data;
                let offset = layout.offset_of_position_unchecked(*front);
                *front += 1;
                Some(&data[offset])
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            IterInner::Contiguous(it) => it.size_hint(),
            IterInner::Strided { front, back, .. } => {
                let n = back - front;
                (n, Some(n))
            }
        }
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<&'a T> {
        match &mut self.inner {
            IterInner::Contiguous(it) => it.nth(n),
            IterInner::Strided { front, back, .. } => {
                *front = front.saturating_add(n).min(*back);
                self.next()
            }
        }
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Contiguous(it) => it.next_back(),
            IterInner::Strided {
                data,
                layout,
                front,
                back,
            } => {
                if *front >= *back {
                    return None;
                }
                let data: &'a [T] = *data;
                *back -= 1;
                Some(&data[layout.offset_of_position_unchecked(*back)])
            }
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

// ============================================================================
// IterMut
// ============================================================================

/// Mutable references to a tensor's elements in logical order.
///
/// The strided path walks a raw pointer to the buffer and hands out one
/// `&mut` per logical position. Every layout a tensor can hold is contiguous
/// or a permutation of a contiguous layout, so positions map to in-bounds
/// offsets one-to-one and no element is yielded twice.
#[derive(Debug)]
pub struct IterMut<'a, T> {
    inner: IterMutInner<'a, T>,
}

#[derive(Debug)]
enum IterMutInner<'a, T> {
    Contiguous(std::slice::IterMut<'a, T>),
    Strided {
        ptr: *mut T,
        buf_len: usize,
        layout: &'a Layout,
        front: usize,
        back: usize,
        _marker: PhantomData<&'a mut T>,
    },
}

// Same auto-trait story as `std::slice::IterMut`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(data: &'a mut [T], layout: &'a Layout, len: usize) -> Self {
        let inner = if layout.is_contiguous() {
            IterMutInner::Contiguous(data[..len].iter_mut())
        } else {
            IterMutInner::Strided {
                ptr: data.as_mut_ptr(),
                buf_len: data.len(),
                layout,
                front: 0,
                back: len,
                _marker: PhantomData,
            }
        };
        Self { inner }
    }
}

/// Mutable reference to the element at `offset`.
///
/// # Safety
/// `ptr` must point to a live buffer of `buf_len` elements, exclusively
/// borrowed for `'a`, and no other reference to the element at `offset` may
/// be handed out during `'a`.
#[inline]
unsafe fn element_at<'a, T>(ptr: *mut T, buf_len: usize, offset: usize) -> &'a mut T {
    assert!(
        offset < buf_len,
        "strided offset {offset} out of bounds for buffer of length {buf_len}"
    );
    unsafe { &mut *ptr.add(offset) }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        match &mut self.inner {
            IterMutInner::Contiguous(it) => it.next(),
            IterMutInner::Strided {
                ptr,
                buf_len,
                layout,
                front,
                back,
                ..
            } => {
                if *front >= *back {
                    return None;
                }
                let offset = layout.offset_of_position_unchecked(*front);
                *front += 1;
                // positions in [front, back) are distinct and not yet yielded
                Some(unsafe { element_at(*ptr, *buf_len, offset) })
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            IterMutInner::Contiguous(it) => it.size_hint(),
            IterMutInner::Strided { front, back, .. } => {
                let n = back - front;
                (n, Some(n))
            }
        }
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterMutInner::Contiguous(it) => it.next_back(),
            IterMutInner::Strided {
                ptr,
                buf_len,
                layout,
                front,
                back,
                ..
            } => {
                if *front >= *back {
                    return None;
                }
                *back -= 1;
                let offset = layout.offset_of_position_unchecked(*back);
                Some(unsafe { element_at(*ptr, *buf_len, offset) })
            }
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}
