//! Device-agnostic layout metadata for strided tensors.
//!
//! Everything in this crate operates on shapes and strides only and never
//! touches element data:
//!
//! - [`shape`]: pure shape/stride math (`product`, `canonical_strides`,
//!   `permute_sequence`)
//! - [`index`]: coordinate <-> offset translation (`ravel`, `unravel`,
//!   `ravel_unravel`)
//! - [`Layout`]: shape + live strides + canonical strides, with the
//!   `reshape`/`permute` transformations
//! - [`ShapeIter`] / [`UnravelIter`]: row-major enumeration of a shape's
//!   coordinate space
//!
//! Strides count elements, not bytes. Canonical strides are always the dense
//! row-major packing of the *current* shape; a layout is contiguous iff its
//! live strides equal its canonical strides.

pub mod index;
pub mod layout;
pub mod shape;
pub mod shape_iter;

pub use index::{ravel, ravel_checked, ravel_unravel, unravel};
pub use layout::Layout;
pub use shape::{
    canonical_strides, checked_product, inverse_permutation, permute_sequence, product,
    validate_permutation, validate_shape, Dims,
};
pub use shape_iter::{ShapeIter, UnravelIter};

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during layout and tensor operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StridedError {
    /// Coordinate tuple (or stride sequence) length does not match the rank.
    #[error("dimension mismatch: expected {expected} indices, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Operand shapes differ where identical shapes are required.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Reshape target has a different element count.
    #[error("size mismatch: cannot reshape {from} elements into {to}")]
    SizeMismatch { from: usize, to: usize },

    /// Reshape attempted on a non-contiguous view.
    #[error("layout is not contiguous; materialize it before reshaping")]
    NotContiguous,

    /// Position or per-axis coordinate is past its bound.
    #[error("index {index} out of bounds for length {bound}")]
    IndexOutOfBounds { index: usize, bound: usize },

    /// Element count of a shape does not fit in `usize`.
    #[error("element count of shape {0:?} overflows usize")]
    ShapeOverflow(Vec<usize>),

    /// Permutation argument is not a bijection on `[0, rank)`.
    #[error("invalid permutation {0:?}")]
    InvalidPermutation(Vec<usize>),
}

/// Result type for layout and tensor operations.
pub type Result<T> = std::result::Result<T, StridedError>;
