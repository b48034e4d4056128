//! `mathcore::ext` hidden submodule supplies helper enums for intersection routines.
//!

/// [`Sign`] enum classifies `f64` value as negative, zero or positive.
///
/// Both `0.0` and `-0.0` are [`Sign::Zero`].
/// `NaN` is never zero: it is classified by the sign bit it carries.
///
/// Intersection routines use it to decide which way a ray runs along an axis.
///
/// # Example
/// ```rust
/// # use rayprim::mathcore::Sign;
/// assert_eq!(Sign::from(2.5), Sign::Positive);
/// assert_eq!(Sign::from(-0.0), Sign::Zero);
/// assert_eq!(Sign::from(-f64::NAN), Sign::Negative);
/// ```
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Value is less than zero.
    ///
    Negative,
    /// Value is zero.
    ///
    Zero,
    /// Value is greater than zero.
    ///
    Positive,
}
impl From<f64> for Sign {
    fn from(value: f64) -> Self {
        if value == 0.0 {
            Sign::Zero
        } else if value.is_sign_negative() {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }
}
