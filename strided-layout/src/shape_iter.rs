//! Row-major enumeration of a shape's coordinate space.
//!
//! Two equivalent strategies are provided:
//!
//! - [`ShapeIter`]: an odometer that bumps the last axis and carries into
//!   more significant axes on overflow;
//! - [`UnravelIter`]: a scalar cursor decomposed against canonical strides on
//!   every step (random access, double-ended).
//!
//! Both yield exactly `len` coordinates in the same order. Each iterator owns
//! its cursor, so any number of them can walk the same layout independently.

use std::iter::FusedIterator;

use crate::index::unravel;
use crate::shape::{canonical_strides, product, Dims};

/// Odometer over `[0, shape[0]) x ... x [0, shape[rank-1])`.
#[derive(Debug, Clone)]
pub struct ShapeIter {
    shape: Dims,
    len: usize,
    next: Option<Dims>,
    remaining: usize,
}

impl ShapeIter {
    /// Iterate every coordinate of `shape`. The rank-0 shape yields the empty
    /// coordinate once.
    pub fn new(shape: &[usize]) -> Self {
        Self::with_len(shape, product(shape))
    }

    /// Iterate the first `len` coordinates of `shape`; `len` is clamped to
    /// the shape's element count. Used for the empty rank-0 tensor, whose
    /// shape spans one coordinate but whose buffer holds none.
    pub fn with_len(shape: &[usize], len: usize) -> Self {
        let mut it = Self {
            shape: shape.into(),
            len: len.min(product(shape)),
            next: None,
            remaining: 0,
        };
        it.reset();
        it
    }

    /// Rewind to the first coordinate.
    pub fn reset(&mut self) {
        self.remaining = self.len;
        self.next = (self.len > 0).then(|| smallvec::smallvec![0; self.shape.len()]);
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }
}

impl Iterator for ShapeIter {
    type Item = Dims;

    fn next(&mut self) -> Option<Dims> {
        let current = self.next.take()?;
        self.remaining -= 1;
        if self.remaining > 0 {
            let mut succ = current.clone();
            for axis in (0..self.shape.len()).rev() {
                succ[axis] += 1;
                if succ[axis] < self.shape[axis] {
                    break;
                }
                succ[axis] = 0;
            }
            self.next = Some(succ);
        }
        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ShapeIter {}
impl FusedIterator for ShapeIter {}

/// Flat cursor over `[0, len)`, unravelled against canonical strides.
#[derive(Debug, Clone)]
pub struct UnravelIter {
    canon: Dims,
    front: usize,
    back: usize,
}

impl UnravelIter {
    pub fn new(shape: &[usize]) -> Self {
        Self::with_len(shape, product(shape))
    }

    pub fn with_len(shape: &[usize], len: usize) -> Self {
        Self {
            canon: canonical_strides(shape),
            front: 0,
            back: len.min(product(shape)),
        }
    }
}

impl Iterator for UnravelIter {
    type Item = Dims;

    #[inline]
    fn next(&mut self) -> Option<Dims> {
        if self.front >= self.back {
            return None;
        }
        let coords = unravel(self.front, &self.canon);
        self.front += 1;
        Some(coords)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Dims> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for UnravelIter {
    #[inline]
    fn next_back(&mut self) -> Option<Dims> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(unravel(self.back, &self.canon))
    }
}

impl ExactSizeIterator for UnravelIter {}
impl FusedIterator for UnravelIter {}
