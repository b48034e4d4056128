//! `mathcore::vectors` submodule implements two- and three-dimensional vectors which are used to
//! represent points, directions and normals.
//!
//! Vectors are immutable values: every operation returns a new vector.
//! Equality on vectors is relaxed (see [`relaxed_equal`]), so `==` is not transitive and should
//! not be used as a hash key.
//!

use crate::mathcore::floats::{relaxed_equal, EPSILON};
use serde::Serialize;
use std::{
    fmt,
    ops::{Add, AddAssign, BitXor, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

// Macros that implement all common associated functions and methods on vectors could be replaced
// by traits and their default implementations, but vectors are value types with public fields and
// the set of operations is closed, so it is simpler to generate inherent methods.
//
/// [`impl_vector`] macro implements all common associated functions and methods on vectors.
///
/// This macro depends on manual implementation of `elements` function and
/// `From<[f64; $size]>` trait implementation.
///
macro_rules! impl_vector {
    ($struct:ident, $size:expr) => {
        impl $struct {
            /// Applies function to every vector element and returns changed vector.
            ///
            pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
                Self::from(self.elements().map(f))
            }
            /// Combines vectors by applying function on their elements.
            ///
            pub fn combine(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
                let (e1, e2): ([f64; $size], [f64; $size]) = (self.elements(), other.elements());
                let mut elements: [f64; $size] = [0.0; $size];
                for i in 0..$size {
                    elements[i] = f(e1[i], e2[i]);
                }
                Self::from(elements)
            }

            /// Performs dot product operation on two vectors.
            ///
            pub fn dot(self, other: Self) -> f64 {
                self.elements()
                    .iter()
                    .zip(other.elements().iter())
                    .fold(0.0, |acc, (a, b)| acc + *a * *b)
            }

            /// Returns squared length of a vector.
            ///
            pub fn norm(&self) -> f64 {
                self.dot(*self)
            }
            /// Returns length of a vector.
            ///
            pub fn length(&self) -> f64 {
                self.norm().sqrt()
            }
            /// Returns euclidean distance between two vectors that are treated as points.
            ///
            pub fn distance(self, other: Self) -> f64 {
                (self - other).length()
            }

            /// Reflects vector on given axis (`axis` is expected to be of unit length).
            ///
            pub fn reflect(self, axis: Self) -> Self {
                self - axis * (2.0 * axis.dot(self))
            }
            /// Returns rejection of a vector from given axis.
            ///
            /// Projection of a vector plus its rejection is equal to the vector itself.
            ///
            pub fn reject(self, axis: Self) -> Self {
                self - self.project(axis)
            }
        }
        impl PartialEq for $struct {
            /// Compares vectors component-wise with [`relaxed_equal`], `self` being the reference.
            ///
            fn eq(&self, other: &Self) -> bool {
                self.elements()
                    .iter()
                    .zip(other.elements().iter())
                    .all(|(&a, &b)| relaxed_equal(a, b))
            }
        }
        impl fmt::Display for $struct {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "(")?;
                for (i, elem) in self.elements().iter().enumerate() {
                    if i > 0 {
                        write!(f, "/")?;
                    }
                    write!(f, "{}", elem)?;
                }
                write!(f, ")")
            }
        }
    };
}

// All the following macros depend on [`impl_vector`] macro.
/// [`impl_vector_vector_operations`] macro implements vector-vector operations for vector.
///
macro_rules! impl_vector_vector_operations {
    ($struct_name:ident, ($(($trait:ident, $method:ident, $op:tt),)+)) => {$(
        impl $trait<Self> for $struct_name {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self::Output {
                self.combine(rhs, |a, b| a $op b)
            }
        }
    )+}
}
/// [`impl_vector_rhs_operations`] macro implements vector-scalar operations for vector.
///
macro_rules! impl_vector_rhs_operations {
    ($struct_name:ident, ($(($trait:ident, $method:ident, $op:tt),)+)) => {$(
        impl $trait<f64> for $struct_name {
            type Output = Self;

            fn $method(self, rhs: f64) -> Self::Output {
                self.map(|a| a $op rhs)
            }
        }
    )+}
}
/// [`impl_vector_assignoperations`] macro implements `...Assign` trait for vector.
///
macro_rules! impl_vector_assignoperations {
    ($struct_name:ident, $rhs:ty, ($(($trait:ident, $method:ident, $op:tt),)+)) => {$(
        impl $trait<$rhs> for $struct_name {
            fn $method(&mut self, rhs: $rhs) {
                *self = *self $op rhs;
            }
        }
    )+}
}
/// [`impl_vector_operations`] macro implements all operation traits for vector.
///
macro_rules! impl_vector_operations {
    ($struct_name:ident) => {
        impl Neg for $struct_name {
            type Output = Self;

            fn neg(self) -> Self::Output {
                self.map(|a| -a)
            }
        }
        impl Mul for $struct_name {
            type Output = f64;

            /// Performs dot product operation on two vectors.
            ///
            fn mul(self, other: Self) -> Self::Output {
                self.dot(other)
            }
        }
        impl_vector_vector_operations!($struct_name, ((Add, add, +),
                                                      (Sub, sub, -),));
        impl_vector_assignoperations!($struct_name, Self, ((AddAssign, add_assign, +),
                                                           (SubAssign, sub_assign, -),));
        impl_vector_rhs_operations!($struct_name, ((Mul, mul, *),
                                                   (Div, div, /),));
        impl_vector_assignoperations!($struct_name, f64, ((MulAssign, mul_assign, *),
                                                          (DivAssign, div_assign, /),));
    }
}

/// [`Vector2`] struct represents two-dimensional vector and two-dimensional point with `f64` coordinates.
///
/// # Example
/// ```rust
/// # use rayprim::mathcore::vectors::Vector2;
/// let v: Vector2 = Vector2::new(3.0, 4.0);
/// assert_eq!(v.length(), 5.0);
/// assert_eq!(v.to_unit_length(), Vector2::new(0.6, 0.8));
/// assert_eq!(Vector2::ZERO.to_unit_length(), Vector2::ZERO);
/// ```
///
#[derive(Serialize, Copy, Clone, Debug, Default)]
pub struct Vector2 {
    /// X component of vector.
    ///
    pub x: f64,

    /// Y component of vector.
    ///
    pub y: f64,
}
impl Vector2 {
    /// Vector pointing in the positive X direction.
    ///
    pub const X_AXIS: Vector2 = Vector2::new(1.0, 0.0);
    /// Vector pointing in the positive Y direction.
    ///
    pub const Y_AXIS: Vector2 = Vector2::new(0.0, 1.0);
    /// Zero vector.
    ///
    pub const ZERO: Vector2 = Vector2::new(0.0, 0.0);

    /// Initializes vector from components.
    ///
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// Returns elements of vector.
    ///
    pub fn elements(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Returns vector of unit length that points in the same direction.
    ///
    /// Zero vector stays zero instead of becoming `NaN`.
    ///
    pub fn to_unit_length(self) -> Self {
        let length: f64 = self.length();
        if length == 0.0 {
            return Vector2::ZERO;
        }
        Vector2::new(self.x / length, self.y / length)
    }
    /// Returns vector that is perpendicular to this one (rotated clockwise).
    ///
    pub fn to_perpendicular(self) -> Self {
        Vector2::new(self.y, -self.x)
    }
    /// Returns vector that points in the opposite direction.
    ///
    pub fn to_inverted(self) -> Self {
        -self
    }

    /// Projects vector on given axis.
    ///
    pub fn project(self, axis: Self) -> Self {
        let b: Vector2 = axis.to_unit_length();
        b * self.dot(b)
    }

    /// Rotates point around given pivot by an angle in degrees (counterclockwise).
    ///
    /// # Example
    /// ```rust
    /// # use rayprim::mathcore::vectors::Vector2;
    /// let p: Vector2 = Vector2::new(2.0, 1.0).rotate_around(Vector2::new(1.0, 1.0), 90.0);
    /// assert_eq!(p, Vector2::new(1.0, 2.0));
    /// ```
    ///
    pub fn rotate_around(self, pivot: Self, degrees: f64) -> Self {
        let (s, c): (f64, f64) = degrees.to_radians().sin_cos();

        let p: Vector2 = self - pivot;
        Vector2::new(p.x * c - p.y * s, p.x * s + p.y * c) + pivot
    }
}
impl_vector!(Vector2, 2);
impl_vector_operations!(Vector2);
impl From<[f64; 2]> for Vector2 {
    fn from(arr: [f64; 2]) -> Self {
        Vector2 {
            x: arr[0],
            y: arr[1],
        }
    }
}

/// Type alias for [`Vector2`].
///
pub type Point2 = Vector2;

/// [`Vector3`] struct represents three-dimensional vector and three-dimensional point with `f64` coordinates.
///
/// # Example
/// ```rust
/// # use rayprim::mathcore::vectors::Vector3;
/// let v: Vector3 = Vector3::new(0.0, 3.0, 4.0);
/// assert_eq!(v.normalize(), Vector3::new(0.0, 0.6, 0.8));
/// assert_eq!(Vector3::X_AXIS ^ Vector3::Y_AXIS, Vector3::Z_AXIS);
/// assert_eq!(v * Vector3::Z_AXIS, 4.0);
/// ```
///
#[derive(Serialize, Copy, Clone, Debug, Default)]
pub struct Vector3 {
    /// X component of vector.
    ///
    pub x: f64,

    /// Y component of vector.
    ///
    pub y: f64,

    /// Z component of vector.
    ///
    pub z: f64,
}
impl Vector3 {
    /// Vector pointing in the positive X direction.
    ///
    pub const X_AXIS: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    /// Vector pointing in the positive Y direction.
    ///
    pub const Y_AXIS: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    /// Vector pointing in the positive Z direction.
    ///
    pub const Z_AXIS: Vector3 = Vector3::new(0.0, 0.0, 1.0);
    /// Zero vector.
    ///
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);

    /// Initializes vector from components.
    ///
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }
    /// Initializes vector from two-dimensional vector and depth component.
    ///
    pub const fn from_vector2(v: Vector2, z: f64) -> Self {
        Vector3 { x: v.x, y: v.y, z }
    }

    /// Returns elements of vector.
    ///
    pub fn elements(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns vector of unit length that points in the same direction.
    ///
    /// Vectors shorter than [`EPSILON`] are returned unchanged.
    ///
    pub fn normalize(self) -> Self {
        let length: f64 = self.length();
        if length.abs() < EPSILON {
            return self;
        }
        self * (1.0 / length)
    }

    /// Performs cross product operation on two vectors.
    ///
    pub fn cross(self, other: Self) -> Self {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Projects vector on given axis.
    ///
    pub fn project(self, axis: Self) -> Self {
        let b: Vector3 = axis.normalize();
        b * self.dot(b)
    }

    /// Compares directions of two vectors.
    ///
    /// Vectors are normalized first, and opposite directions are considered equal.
    ///
    /// # Example
    /// ```rust
    /// # use rayprim::mathcore::vectors::Vector3;
    /// assert!(Vector3::new(0.0, 2.0, 0.0).equals_direction(Vector3::new(0.0, -5.0, 0.0)));
    /// assert!(!Vector3::X_AXIS.equals_direction(Vector3::Y_AXIS));
    /// ```
    ///
    pub fn equals_direction(self, other: Self) -> bool {
        let (v1, v2): (Vector3, Vector3) = (self.normalize(), other.normalize());
        v1 == v2 || v1 == -v2
    }

    /// Returns vector that is perpendicular to this one.
    ///
    /// The choice among all perpendicular vectors is fixed: axis-aligned inputs (compared with
    /// relaxed equality) map to fixed axes, otherwise the vector is crossed with a copy of itself
    /// that has its first significant component zeroed.
    /// Plane local frames are built from this vector, so the order of checks must not change.
    ///
    /// # Example
    /// ```rust
    /// # use rayprim::mathcore::vectors::Vector3;
    /// assert_eq!(Vector3::X_AXIS.create_perpendicular(), Vector3::new(0.0, -1.0, 0.0));
    /// assert_eq!((-Vector3::X_AXIS).create_perpendicular(), Vector3::new(0.0, 1.0, 0.0));
    /// ```
    ///
    pub fn create_perpendicular(self) -> Self {
        if self == Vector3::X_AXIS {
            Vector3::new(0.0, -1.0, 0.0)
        } else if self == -Vector3::X_AXIS {
            Vector3::new(0.0, 1.0, 0.0)
        } else if self.x.abs() > EPSILON {
            self.cross(Vector3::new(0.0, self.y, self.z))
        } else if self == Vector3::Y_AXIS {
            Vector3::new(-1.0, 0.0, 0.0)
        } else if self == -Vector3::Y_AXIS {
            Vector3::new(1.0, 0.0, 0.0)
        } else if self.y.abs() > EPSILON {
            self.cross(Vector3::new(self.x, 0.0, self.z))
        } else if self == Vector3::Z_AXIS {
            Vector3::new(1.0, 0.0, 0.0)
        } else if self == -Vector3::Z_AXIS {
            Vector3::new(-1.0, 0.0, 0.0)
        } else {
            self.cross(Vector3::new(self.x, self.y, 0.0))
        }
    }
}
impl_vector!(Vector3, 3);
impl_vector_operations!(Vector3);
impl BitXor for Vector3 {
    type Output = Self;

    /// Performs cross product operation on two vectors.
    ///
    fn bitxor(self, rhs: Self) -> Self::Output {
        self.cross(rhs)
    }
}
impl From<[f64; 3]> for Vector3 {
    fn from(arr: [f64; 3]) -> Self {
        Vector3 {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}
impl From<Vector2> for Vector3 {
    fn from(value: Vector2) -> Self {
        Vector3::from_vector2(value, 0.0)
    }
}

/// Type alias for [`Vector3`].
///
pub type Point3 = Vector3;

#[cfg(test)]
mod tests {
    use crate::mathcore::floats::{relaxed_equal, EPSILON};
    use proptest::prelude::*;

    /// Strategy that produces scalars in [-50.0; 50.0] with extra weight on round numbers.
    ///
    fn scalar() -> impl Strategy<Value = f64> {
        prop_oneof![
            prop_oneof![Just(0.0), Just(1.0), Just(-1.0), Just(0.5), Just(-10.0)],
            -50.0..=50.0,
        ]
    }
    /// Strategy that produces arbitrary three-dimensional vectors.
    ///
    fn vector3() -> impl Strategy<Value = super::Vector3> {
        (scalar(), scalar(), scalar()).prop_map(|(x, y, z)| super::Vector3::new(x, y, z))
    }

    #[test]
    fn vector2() {
        use super::Vector2;

        let mut v1: Vector2 = Vector2::from([3.0, 4.0]);
        assert_eq!(v1.elements(), [3.0, 4.0]);
        assert_eq!(v1.norm(), 25.0);
        assert_eq!(v1.length(), 5.0);

        assert_eq!(v1.map(|n| n * 2.0), Vector2::new(6.0, 8.0));
        assert_eq!(v1.combine(Vector2::new(2.0, 3.0), |a, b| a * b), Vector2::new(6.0, 12.0));

        assert_eq!(v1 + Vector2::new(1.0, 1.0), Vector2::new(4.0, 5.0));
        assert_eq!(v1 - Vector2::new(1.0, 1.0), Vector2::new(2.0, 3.0));
        assert_eq!(v1 * 2.0, Vector2::new(6.0, 8.0));
        assert_eq!(v1 / 2.0, Vector2::new(1.5, 2.0));
        assert_eq!(v1 * Vector2::new(5.0, 3.0), 27.0);
        assert_eq!(v1.dot(Vector2::new(5.0, 3.0)), 27.0);

        v1 += Vector2::new(1.0, 1.0);
        assert_eq!(v1.elements(), [4.0, 5.0]);
        v1 -= Vector2::new(1.0, 1.0);
        v1 *= 4.0;
        v1 /= 2.0;
        assert_eq!(v1.elements(), [6.0, 8.0]);

        assert_eq!(v1.to_perpendicular(), Vector2::new(8.0, -6.0));
        assert_eq!(v1.to_inverted(), Vector2::new(-6.0, -8.0));
        assert_eq!(v1.distance(Vector2::ZERO), 10.0);

        assert_eq!(v1.project(Vector2::X_AXIS * 3.0), Vector2::new(6.0, 0.0));
        assert_eq!(v1.reject(Vector2::X_AXIS), Vector2::new(0.0, 8.0));
        assert_eq!(v1.reflect(Vector2::Y_AXIS), Vector2::new(6.0, -8.0));

        let rotated: Vector2 = Vector2::X_AXIS.rotate_around(Vector2::ZERO, 90.0);
        assert!(rotated.x.abs() < 1e-12 && (rotated.y - 1.0).abs() < 1e-12);
        assert_eq!(
            Vector2::new(3.0, 1.0).rotate_around(Vector2::new(1.0, 1.0), 180.0),
            Vector2::new(-1.0, 1.0)
        );

        assert_eq!(format!("{}", Vector2::new(1.5, -2.0)), "(1.5/-2)");
    }

    #[test]
    fn vector2_equality() {
        use super::Vector2;

        assert_eq!(Vector2::new(1.00001, 1.0), Vector2::new(1.0, 1.0));
        assert_ne!(Vector2::new(1.0, 1.0), Vector2::new(1.0, 1.01));
        assert_eq!(Vector2::new(0.0, 0.0000001), Vector2::ZERO);
    }

    #[test]
    fn vector3_operations() {
        use super::Vector3;

        let v: Vector3 = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v + Vector3::new(1.0, 1.0, 1.0), Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(v - v, Vector3::ZERO);
        assert_eq!(-v, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(v * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(v / 2.0, Vector3::new(0.5, 1.0, 1.5));
        assert_eq!(v.dot(Vector3::new(4.0, -5.0, 6.0)), 12.0);
        assert_eq!(v.norm(), 14.0);
        assert_eq!(v.distance(Vector3::new(1.0, 2.0, 5.0)), 2.0);

        assert_eq!(v.cross(Vector3::new(0.0, 2.0, 3.0)), Vector3::new(0.0, -3.0, 2.0));
        assert_eq!(Vector3::Y_AXIS ^ Vector3::Z_AXIS, Vector3::X_AXIS);

        assert_eq!(v.project(Vector3::Z_AXIS * 7.0), Vector3::new(0.0, 0.0, 3.0));
        assert_eq!(v.reject(Vector3::Z_AXIS), Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(v.project(Vector3::X_AXIS) + v.reject(Vector3::X_AXIS), v);
        assert_eq!(v.reflect(Vector3::Y_AXIS), Vector3::new(1.0, -2.0, 3.0));

        assert_eq!(
            Vector3::from(super::Vector2::new(1.0, 2.0)),
            Vector3::new(1.0, 2.0, 0.0)
        );
        assert_eq!(format!("{}", Vector3::new(1.0, 0.5, -2.0)), "(1/0.5/-2)");
    }

    #[test]
    fn vector3_normalize() {
        use super::Vector3;

        assert_eq!(Vector3::new(0.0, 0.0, 7.0).normalize(), Vector3::Z_AXIS);
        let tiny: Vector3 = Vector3::new(0.00001, 0.0, 0.00002);
        assert_eq!(tiny.normalize().elements(), tiny.elements());
        assert_eq!(Vector3::ZERO.normalize().elements(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn vector3_create_perpendicular() {
        use super::Vector3;

        assert_eq!(
            Vector3::X_AXIS.create_perpendicular().elements(),
            [0.0, -1.0, 0.0]
        );
        assert_eq!(
            (-Vector3::X_AXIS).create_perpendicular().elements(),
            [0.0, 1.0, 0.0]
        );
        // relaxed equality still counts this as the X axis
        assert_eq!(
            Vector3::new(1.000001, 0.0, 0.0)
                .create_perpendicular()
                .elements(),
            [0.0, -1.0, 0.0]
        );
        assert_eq!(
            Vector3::Y_AXIS.create_perpendicular().elements(),
            [-1.0, 0.0, 0.0]
        );
        assert_eq!(
            (-Vector3::Y_AXIS).create_perpendicular().elements(),
            [1.0, 0.0, 0.0]
        );
        assert_eq!(
            Vector3::Z_AXIS.create_perpendicular().elements(),
            [1.0, 0.0, 0.0]
        );
        assert_eq!(
            (-Vector3::Z_AXIS).create_perpendicular().elements(),
            [-1.0, 0.0, 0.0]
        );

        let v: Vector3 = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v.create_perpendicular(), Vector3::new(0.0, -3.0, 2.0));
        let w: Vector3 = Vector3::new(0.0, 2.0, 1.0);
        assert_eq!(w.create_perpendicular(), Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn vector3_equality() {
        use super::Vector3;

        assert_eq!(Vector3::new(1.00001, 2.0, 0.0), Vector3::new(1.0, 2.0, 0.0));
        assert_ne!(Vector3::new(1.0, 2.0, 0.0), Vector3::new(1.01, 2.0, 0.0));
        assert_eq!(
            Vector3::new(f64::NAN, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0)
        );
        assert!(Vector3::new(1.0, 1.0, 0.0).equals_direction(Vector3::new(-3.0, -3.0, 0.0)));
    }

    proptest! {
        #[test]
        fn normalized_vectors_have_unit_length(v in vector3()) {
            let n: super::Vector3 = v.normalize();
            if v.length() < EPSILON {
                prop_assert_eq!(n.elements(), v.elements());
            } else {
                prop_assert!(relaxed_equal(n.length(), 1.0));
            }
        }

        #[test]
        fn add_then_sub_round_trips(v in vector3(), w in vector3()) {
            prop_assert_eq!(v + w - w, v);
        }

        #[test]
        fn perpendicular_is_orthogonal(v in vector3()) {
            let p: super::Vector3 = v.create_perpendicular();
            prop_assert!(p.dot(v).abs() <= 1e-9 * (1.0 + v.norm() * v.norm()));
        }
    }
}
