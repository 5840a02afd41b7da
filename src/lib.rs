//! Owned N-dimensional tensors over shared strided buffers.
//!
//! A [`Tensor`] pairs a reference-counted element buffer with a
//! [`Layout`] (shape, live strides, canonical strides). Layout changes are
//! metadata-only: [`Tensor::permute`] returns a view that shares the parent's
//! buffer, and [`Tensor::reshape`] reinterprets a contiguous tensor without
//! moving elements. Writes through a handle whose buffer is shared copy the
//! buffer first, so views never observe each other's mutations.
//!
//! # Core Types
//!
//! - [`Tensor`]: buffer + layout, with coordinate and logical-position access
//! - [`Layout`]: shape/stride metadata, from the `strided-layout` crate
//! - [`Iter`] / [`IterMut`]: element traversal in logical (row-major) order,
//!   with a contiguous fast path
//! - [`ShapeIter`]: coordinate traversal in row-major order
//!
//! # Operations
//!
//! - Elementwise: [`Tensor::map`], [`Tensor::map_`], [`Tensor::fill_`],
//!   [`zip_map`]
//! - Arithmetic with type promotion: [`add`], [`sub`], [`mul`], [`div`] and
//!   the `+ - * /` operators on references
//! - Math: [`Tensor::sin`] and the rest of the trigonometric family on
//!   `num_traits::Float` elements; [`Tensor::astype`] for numeric casts
//!
//! # Example
//!
//! ```rust
//! use strided_tensor::{StridedError, Tensor};
//!
//! let t = Tensor::iota(&[2, 3], 0);
//! let v = t.permute(&[1, 0]).unwrap();
//! assert!(v.shares_buffer(&t));
//! assert_eq!(v.to_vec(), vec![0, 3, 1, 4, 2, 5]);
//!
//! // a view cannot be reshaped until it is materialized
//! assert_eq!(v.reshape(&[6]).unwrap_err(), StridedError::NotContiguous);
//! let flat = v.contiguous().reshape(&[6]).unwrap();
//! assert_eq!(flat.to_vec(), vec![0, 3, 1, 4, 2, 5]);
//! ```
//!
//! # Features
//!
//! - `parallel`: split `map`/`zip_map` over rayon threads once a tensor has
//!   at least [`MIN_PARALLEL_LEN`] elements. Element types and closures must
//!   then be `Send + Sync`.
//! - `random`: [`Tensor::randn`] via `rand` and `rand_distr`.

pub mod construct;
pub mod iter;
pub mod map;
pub mod math;
pub mod maybe_sync;
pub mod ops;
pub mod tensor;

pub use iter::{Iter, IterMut};
pub use map::{zip_map, MIN_PARALLEL_LEN};
pub use maybe_sync::{MaybeSend, MaybeSync};
pub use ops::{add, div, mul, sub};
pub use tensor::Tensor;

pub use strided_layout::{
    canonical_strides, inverse_permutation, product, ravel, ravel_unravel, unravel, Dims, Layout,
    Result, ShapeIter, StridedError, UnravelIter,
};
pub use strided_traits::{Promote, Promoted, ScalarBase};
