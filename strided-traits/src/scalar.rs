//! Scalar type bounds for arithmetic on tensor elements.

/// Shared trait bounds for element types usable with the arithmetic
/// operators.
///
/// This is intentionally a blanket trait: any `Copy` type with the four
/// arithmetic operators and additive/multiplicative identities qualifies,
/// so user-defined numeric types work without extra impls.
pub trait ScalarBase:
    Copy
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Div<Output = Self>
    + num_traits::Zero
    + num_traits::One
    + PartialEq
{
}

impl<T> ScalarBase for T where
    T: Copy
        + std::ops::Add<Output = T>
        + std::ops::Sub<Output = T>
        + std::ops::Mul<Output = T>
        + std::ops::Div<Output = T>
        + num_traits::Zero
        + num_traits::One
        + PartialEq
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{One, Zero};

    fn assert_scalar_base<T: ScalarBase>() {}

    #[test]
    fn test_standard_types() {
        assert_scalar_base::<f32>();
        assert_scalar_base::<f64>();
        assert_scalar_base::<i32>();
        assert_scalar_base::<i64>();
        assert_scalar_base::<u8>();
    }

    #[test]
    fn test_custom_type() {
        #[derive(Debug, Clone, Copy, PartialEq)]
        struct Fixed(i64);

        impl std::ops::Add for Fixed {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Fixed(self.0 + rhs.0)
            }
        }

        impl std::ops::Sub for Fixed {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Fixed(self.0 - rhs.0)
            }
        }

        impl std::ops::Mul for Fixed {
            type Output = Self;
            fn mul(self, rhs: Self) -> Self {
                // two implied decimal places
                Fixed(self.0 * rhs.0 / 100)
            }
        }

        impl std::ops::Div for Fixed {
            type Output = Self;
            fn div(self, rhs: Self) -> Self {
                Fixed(self.0 * 100 / rhs.0)
            }
        }

        impl num_traits::Zero for Fixed {
            fn zero() -> Self {
                Fixed(0)
            }
            fn is_zero(&self) -> bool {
                self.0 == 0
            }
        }

        impl num_traits::One for Fixed {
            fn one() -> Self {
                Fixed(100)
            }
        }

        assert_scalar_base::<Fixed>();

        let a = Fixed(250);
        let b = Fixed(200);
        assert_eq!(a + b, Fixed(450));
        assert_eq!(a - b, Fixed(50));
        assert_eq!(a * b, Fixed(500));
        assert_eq!(a / b, Fixed(125));
        assert!(Fixed::zero().is_zero());
        assert_eq!(a * Fixed::one(), a);
    }
}
