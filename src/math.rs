//! Elementwise trigonometric functions and numeric casts.
//!
//! Each function comes in an out-of-place form (fresh contiguous tensor) and
//! an in-place `_` form that keeps the layout.

use num_traits::{AsPrimitive, Float};

use crate::maybe_sync::{MaybeSend, MaybeSync};
use crate::Tensor;

#[inline]
fn cot<T: Float>(x: T) -> T {
    x.tan().recip()
}

#[inline]
fn sec<T: Float>(x: T) -> T {
    x.cos().recip()
}

#[inline]
fn csc<T: Float>(x: T) -> T {
    x.sin().recip()
}

macro_rules! impl_unary_float {
    ($($name:ident, $name_:ident => $f:expr, $doc:literal;)*) => {
        impl<T: Float + MaybeSend + MaybeSync> Tensor<T> {
            $(
                #[doc = $doc]
                pub fn $name(&self) -> Tensor<T> {
                    self.map(|&x| $f(x))
                }

                #[doc = concat!("In-place [`", stringify!($name), "`](Self::", stringify!($name), ").")]
                pub fn $name_(&mut self) -> &mut Self {
                    self.map_(|&x| $f(x))
                }
            )*
        }
    };
}

impl_unary_float! {
    sin, sin_ => T::sin, "Elementwise sine.";
    cos, cos_ => T::cos, "Elementwise cosine.";
    tan, tan_ => T::tan, "Elementwise tangent.";
    cot, cot_ => cot, "Elementwise cotangent, `1 / tan(x)`.";
    sec, sec_ => sec, "Elementwise secant, `1 / cos(x)`.";
    csc, csc_ => csc, "Elementwise cosecant, `1 / sin(x)`.";
}

impl<T> Tensor<T> {
    /// Numeric cast of every element with `as` semantics.
    pub fn astype<U>(&self) -> Tensor<U>
    where
        T: AsPrimitive<U> + MaybeSync,
        U: Copy + 'static + MaybeSend,
    {
        self.map(|&x| x.as_())
    }
}
