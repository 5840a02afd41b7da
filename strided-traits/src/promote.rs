//! Element type promotion for binary operations.
//!
//! A binary operation over `Tensor<A>` and `Tensor<B>` produces
//! `Tensor<<A as Promote<B>>::Output>`. The promotion table follows the usual
//! arithmetic conversions:
//!
//! - identical types promote to themselves (blanket impl, so custom element
//!   types work without an explicit entry);
//! - a float operand wins over an integer operand, `f64` over `f32`;
//! - integers of the same signedness promote to the wider type;
//! - mixed signedness promotes to the narrowest signed type that holds both,
//!   falling back to `u64` when one side is already `u64`.

/// Common element type of `Self` and `Rhs`, with conversions into it.
pub trait Promote<Rhs = Self> {
    /// The widened type both operands are converted to.
    type Output;

    /// Convert the left operand.
    fn promote_lhs(self) -> Self::Output;

    /// Convert the right operand.
    fn promote_rhs(rhs: Rhs) -> Self::Output;
}

impl<T> Promote<T> for T {
    type Output = T;

    #[inline(always)]
    fn promote_lhs(self) -> T {
        self
    }

    #[inline(always)]
    fn promote_rhs(rhs: T) -> T {
        rhs
    }
}

macro_rules! impl_promote {
    ($($a:ty, $b:ty => $out:ty;)*) => {
        $(
            impl Promote<$b> for $a {
                type Output = $out;

                #[inline(always)]
                fn promote_lhs(self) -> $out {
                    self as $out
                }

                #[inline(always)]
                fn promote_rhs(rhs: $b) -> $out {
                    rhs as $out
                }
            }

            impl Promote<$a> for $b {
                type Output = $out;

                #[inline(always)]
                fn promote_lhs(self) -> $out {
                    self as $out
                }

                #[inline(always)]
                fn promote_rhs(rhs: $a) -> $out {
                    rhs as $out
                }
            }
        )*
    };
}

impl_promote! {
    i8, i16 => i16;
    i8, i32 => i32;
    i8, i64 => i64;
    i8, u8 => i16;
    i8, u16 => i32;
    i8, u32 => i64;
    i8, u64 => u64;
    i8, f32 => f32;
    i8, f64 => f64;
    i16, i32 => i32;
    i16, i64 => i64;
    i16, u8 => i16;
    i16, u16 => i32;
    i16, u32 => i64;
    i16, u64 => u64;
    i16, f32 => f32;
    i16, f64 => f64;
    i32, i64 => i64;
    i32, u8 => i32;
    i32, u16 => i32;
    i32, u32 => i64;
    i32, u64 => u64;
    i32, f32 => f32;
    i32, f64 => f64;
    i64, u8 => i64;
    i64, u16 => i64;
    i64, u32 => i64;
    i64, u64 => u64;
    i64, f32 => f32;
    i64, f64 => f64;
    u8, u16 => u16;
    u8, u32 => u32;
    u8, u64 => u64;
    u8, f32 => f32;
    u8, f64 => f64;
    u16, u32 => u32;
    u16, u64 => u64;
    u16, f32 => f32;
    u16, f64 => f64;
    u32, u64 => u64;
    u32, f32 => f32;
    u32, f64 => f64;
    u64, f32 => f32;
    u64, f64 => f64;
    f32, f64 => f64;
}

/// Shorthand for the promoted element type of `A` and `B`.
pub type Promoted<A, B> = <A as Promote<B>>::Output;
