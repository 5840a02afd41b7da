//! Elementwise arithmetic with type promotion.
//!
//! `add`/`sub`/`mul`/`div` take two tensors of identical shape (any strides)
//! and return a contiguous tensor of the promoted element type. The `std::ops`
//! impls on references forward to them and panic on a shape mismatch.

use strided_traits::{Promote, Promoted, ScalarBase};

use crate::map::zip_map;
use crate::maybe_sync::{MaybeSend, MaybeSync};
use crate::{Result, Tensor};

macro_rules! impl_binary_op {
    ($(#[$doc:meta])* $fn_name:ident, $trait:ident, $method:ident, $op:tt) => {
        $(#[$doc])*
        pub fn $fn_name<A, B>(a: &Tensor<A>, b: &Tensor<B>) -> Result<Tensor<Promoted<A, B>>>
        where
            A: Promote<B> + Copy + MaybeSync,
            B: Copy + MaybeSync,
            Promoted<A, B>: ScalarBase + MaybeSend,
        {
            zip_map(a, b, |&x, &y| {
                <A as Promote<B>>::promote_lhs(x) $op <A as Promote<B>>::promote_rhs(y)
            })
        }

        impl<A, B> std::ops::$trait<&Tensor<B>> for &Tensor<A>
        where
            A: Promote<B> + Copy + MaybeSync,
            B: Copy + MaybeSync,
            Promoted<A, B>: ScalarBase + MaybeSend,
        {
            type Output = Tensor<Promoted<A, B>>;

            fn $method(self, rhs: &Tensor<B>) -> Self::Output {
                match $fn_name(self, rhs) {
                    Ok(out) => out,
                    Err(err) => panic!("{err}"),
                }
            }
        }
    };
}

impl_binary_op!(
    /// Elementwise `a + b`.
    add, Add, add, +
);
impl_binary_op!(
    /// Elementwise `a - b`.
    sub, Sub, sub, -
);
impl_binary_op!(
    /// Elementwise `a * b`.
    mul, Mul, mul, *
);
impl_binary_op!(
    /// Elementwise `a / b`. Integer division by zero panics like the scalar
    /// operator does.
    div, Div, div, /
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StridedError;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_same_type() {
        let a = Tensor::iota(&[2, 3], 0);
        let b = Tensor::full(&[2, 3], 10);
        assert_eq!(add(&a, &b).unwrap().to_vec(), vec![10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_add_promotes_int_and_float() {
        let a = Tensor::iota(&[3], 1i32);
        let b = Tensor::full(&[3], 0.5f32);
        let c: Tensor<f32> = add(&a, &b).unwrap();
        assert_eq!(c.to_vec(), vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_mixed_signedness_widens() {
        let a = Tensor::full(&[2], 200u8);
        let b = Tensor::full(&[2], -100i8);
        let c: Tensor<i16> = sub(&a, &b).unwrap();
        assert_eq!(c.to_vec(), vec![300, 300]);
    }

    #[test]
    fn test_div_float() {
        let a = Tensor::iota(&[4], 1.0f64);
        let b = Tensor::full(&[4], 4.0f32);
        let c = div(&a, &b).unwrap();
        for (got, want) in c.iter().zip([0.25, 0.5, 0.75, 1.0]) {
            assert_relative_eq!(*got, want);
        }
    }

    #[test]
    fn test_mul_with_permuted_operand() {
        let a = Tensor::iota(&[3, 2], 0);
        let b = Tensor::iota(&[2, 3], 0).permute(&[1, 0]).unwrap();
        assert_eq!(mul(&a, &b).unwrap().to_vec(), vec![0, 3, 2, 12, 8, 25]);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Tensor::<f64>::new(&[2, 3]);
        let b = Tensor::<f64>::new(&[3, 2]);
        assert_eq!(
            add(&a, &b).unwrap_err(),
            StridedError::ShapeMismatch(vec![2, 3], vec![3, 2])
        );
    }

    #[test]
    fn test_operator_impls() {
        let a = Tensor::iota(&[2, 2], 1);
        let b = Tensor::full(&[2, 2], 2);
        assert_eq!((&a + &b).to_vec(), vec![3, 4, 5, 6]);
        assert_eq!((&a - &b).to_vec(), vec![-1, 0, 1, 2]);
        assert_eq!((&a * &b).to_vec(), vec![2, 4, 6, 8]);
        assert_eq!((&a / &b).to_vec(), vec![0, 1, 1, 2]);
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn test_operator_panics_on_mismatch() {
        let a = Tensor::<i32>::new(&[2, 3]);
        let b = Tensor::<i32>::new(&[3, 2]);
        let _ = &a + &b;
    }
}
