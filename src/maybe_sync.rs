//! Feature-gated Send/Sync marker traits.
//!
//! With the `parallel` feature, [`MaybeSend`] is [`Send`] and [`MaybeSync`]
//! is [`Sync`], so elementwise kernels can hand elements and closures to
//! rayon. Without it both are blanket-implemented for every type and
//! `Rc`-holding elements keep working.

#[cfg(feature = "parallel")]
pub trait MaybeSend: Send {}
#[cfg(feature = "parallel")]
impl<T: Send> MaybeSend for T {}

#[cfg(feature = "parallel")]
pub trait MaybeSync: Sync {}
#[cfg(feature = "parallel")]
impl<T: Sync> MaybeSync for T {}

#[cfg(not(feature = "parallel"))]
pub trait MaybeSend {}
#[cfg(not(feature = "parallel"))]
impl<T> MaybeSend for T {}

#[cfg(not(feature = "parallel"))]
pub trait MaybeSync {}
#[cfg(not(feature = "parallel"))]
impl<T> MaybeSync for T {}
