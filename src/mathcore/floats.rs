//! `mathcore::floats` submodule implements consts and functions that help in
//! work with `f64` type.
//!
//! [`relaxed_equal`] function and [`RELAXED_ZERO`], [`RELAXED_TOLERANCE`] consts are dealing with
//! floating point equality.
//! Every comparison of vectors in `rayprim` goes through [`relaxed_equal`], including
//! degeneracy checks such as "is this vector the X axis", so changing it changes
//! which branches geometric algorithms take.
//!

/// Small number that is used as a threshold for lengths and components.
///
/// Vectors that are shorter than [`EPSILON`] are not normalized, and components that are
/// smaller than [`EPSILON`] are treated as absent when a perpendicular vector is constructed.
///
pub const EPSILON: f64 = 0.0001;

/// Constant that is used in floating point equality.
///
/// Reference values that are closer to zero than this constant are compared absolutely.
///
pub const RELAXED_ZERO: f64 = 0.000001;
/// Constant that is used in floating point equality.
///
/// It represents relative difference that is allowed for two `f64` values to still be considered
/// equal.
///
pub const RELAXED_TOLERANCE: f64 = 0.00001;
/// This function implements relaxed floating point equality for `rayprim` crate.
///
/// The comparison is not symmetric: `reference` decides which rule applies.
/// 1. `NaN` reference equals only `0.0` or another `NaN`;
/// 2. reference that is close to zero equals only other values close to zero;
/// 3. otherwise values are equal when their ratio differs from one by less than [`RELAXED_TOLERANCE`].
///
/// It is used for implementing `PartialEq` on vectors.
///
/// # Example
/// ```rust
/// # use rayprim::mathcore::floats::relaxed_equal;
/// assert!(relaxed_equal(0.15 + 0.15, 0.1 + 0.2));
/// assert!(relaxed_equal(1.00001, 1.0));
/// assert!(!relaxed_equal(1.0, 1.01));
/// assert!(relaxed_equal(f64::NAN, 0.0));
/// ```
///
pub fn relaxed_equal(reference: f64, studied: f64) -> bool {
    if reference.is_nan() {
        return studied == 0.0 || studied.is_nan();
    }
    if reference.abs() < RELAXED_ZERO {
        return studied.abs() < RELAXED_ZERO;
    }
    (studied / reference - 1.0).abs() < RELAXED_TOLERANCE
}
