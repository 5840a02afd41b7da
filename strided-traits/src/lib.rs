//! Shared element traits for the strided tensor crates.
//!
//! This crate holds the capability bounds that element types must satisfy
//! for arithmetic, kept apart from the layout and tensor crates so that
//! downstream crates can implement them for their own types without orphan
//! rule violations.

pub mod promote;
pub mod scalar;

pub use promote::{Promote, Promoted};
pub use scalar::ScalarBase;
