//! `mathcore::shapes` submodule defines [`Geometry`] trait and implements structs that are
//! representing three-dimensional shapes which rays can intersect.
//!
//! All shapes are immutable: they are constructed once from points and directions and derived
//! quantities (plane's local frame, cone's height and angle) never change afterwards.
//! Shapes are not validated, so zero radius or coincident points lead to `NaN` or zero vectors
//! in results instead of errors.
//!

use crate::mathcore::vectors::{Point2, Point3, Vector2, Vector3};
use serde::Serialize;
use std::fmt;

/// [`Geometry`] trait defines objects that are anchored at an origin point.
///
/// Origin is the anchor of object's local frame and it is never moved after construction.
///
pub trait Geometry {
    /// Returns origin of an object.
    ///
    fn origin(&self) -> Point3;
}

/// [`Plane`] struct represents oriented plane with a local two-dimensional frame.
///
/// Normal is always of unit length. Local frame axes (`x_axis`, `y_axis`) are orthonormal,
/// lie in the plane and are derived from the normal with [`Vector3::create_perpendicular`],
/// so points of the plane can be parameterized in 2D (see [`Plane::to_world`]).
///
/// # Example
/// ```rust
/// # use rayprim::mathcore::shapes::Plane;
/// # use rayprim::mathcore::vectors::{Vector2, Vector3};
/// let plane: Plane = Plane::new(Vector3::new(0.0, 0.0, 2.0), Vector3::new(0.0, 0.0, 5.0));
/// assert_eq!(plane.normal(), Vector3::Z_AXIS);
/// assert_eq!(plane.x_axis(), Vector3::X_AXIS);
/// assert_eq!(plane.y_axis(), Vector3::Y_AXIS);
/// assert_eq!(plane.to_world(Vector2::new(1.0, 1.0)), Vector3::new(1.0, 1.0, 2.0));
/// ```
///
#[derive(Serialize, Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    /// X axis of plane's local frame.
    ///
    #[serde(rename = "xAxis")]
    x_axis: Vector3,
    /// Y axis of plane's local frame.
    ///
    #[serde(rename = "yAxis")]
    y_axis: Vector3,
    /// Normal of unit length.
    ///
    normal: Vector3,
    /// Point on a plane which is the origin of plane's local frame.
    ///
    origin: Point3,
}
impl Plane {
    /// Constructs plane from its unit normal, deriving the local frame.
    ///
    fn from_unit_normal(origin: Point3, normal: Vector3) -> Self {
        let x_axis: Vector3 = normal.create_perpendicular().normalize();
        let y_axis: Vector3 = normal.cross(x_axis).normalize();
        Plane {
            x_axis,
            y_axis,
            normal,
            origin,
        }
    }

    /// Initializes plane from a point and a normal.
    ///
    /// Given point becomes the origin of plane's local frame and normal is normalized.
    ///
    pub fn new(point: Point3, normal: Vector3) -> Self {
        Plane::from_unit_normal(point, normal.normalize())
    }
    /// Initializes plane that passes through three points.
    ///
    /// `a` becomes the origin of plane's local frame.
    /// Normal is `(b - a) x (c - a)` normalized, so the winding of points decides its direction.
    /// Collinear points produce a degenerate (zero) normal.
    ///
    /// # Example
    /// ```rust
    /// # use rayprim::mathcore::shapes::Plane;
    /// # use rayprim::mathcore::vectors::Vector3;
    /// let ccw: Plane = Plane::from_points(Vector3::ZERO, Vector3::X_AXIS, Vector3::Y_AXIS);
    /// let cw: Plane = Plane::from_points(Vector3::ZERO, Vector3::Y_AXIS, Vector3::X_AXIS);
    /// assert_eq!(ccw.normal(), Vector3::Z_AXIS);
    /// assert_eq!(cw.normal(), -Vector3::Z_AXIS);
    /// ```
    ///
    pub fn from_points(a: Point3, b: Point3, c: Point3) -> Self {
        let normal: Vector3 = (b - a)
            .normalize()
            .cross((c - a).normalize())
            .normalize();
        Plane::from_unit_normal(a, normal)
    }

    /// Returns normal of a plane (always of unit length).
    ///
    pub fn normal(&self) -> Vector3 {
        self.normal
    }
    /// Returns X axis of plane's local frame.
    ///
    pub fn x_axis(&self) -> Vector3 {
        self.x_axis
    }
    /// Returns Y axis of plane's local frame.
    ///
    pub fn y_axis(&self) -> Vector3 {
        self.y_axis
    }

    /// Returns signed distance from the plane to a point.
    ///
    /// Distance is positive on the side the normal points to.
    ///
    pub fn signed_distance(&self, point: Point3) -> f64 {
        self.normal.dot(point - self.origin)
    }
    /// Returns distance from the plane to a point.
    ///
    pub fn distance(&self, point: Point3) -> f64 {
        self.signed_distance(point).abs()
    }
    /// Projects point on the plane.
    ///
    pub fn project(&self, point: Point3) -> Point3 {
        point - self.normal * self.signed_distance(point)
    }

    /// Maps point from plane's local frame to world space.
    ///
    pub fn to_world(&self, local: Point2) -> Point3 {
        self.origin + self.x_axis * local.x + self.y_axis * local.y
    }
    /// Maps point from world space to plane's local frame.
    ///
    /// Points that do not lie on the plane are projected on it first.
    ///
    pub fn to_local(&self, point: Point3) -> Point2 {
        let relative: Vector3 = point - self.origin;
        Vector2::new(relative.dot(self.x_axis), relative.dot(self.y_axis))
    }
}
impl Geometry for Plane {
    fn origin(&self) -> Point3 {
        self.origin
    }
}
impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plane@{} | {}", self.origin, self.normal)
    }
}

/// [`Sphere`] struct represents sphere with its center at origin.
///
#[derive(Serialize, Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    /// Radius of a sphere (expected to be positive).
    ///
    radius: f64,
    /// Center of a sphere.
    ///
    origin: Point3,
}
impl Sphere {
    /// Initializes sphere from its center and radius.
    ///
    pub fn new(center: Point3, radius: f64) -> Self {
        Sphere {
            radius,
            origin: center,
        }
    }

    /// Returns radius of a sphere.
    ///
    pub fn radius(&self) -> f64 {
        self.radius
    }
}
impl Geometry for Sphere {
    fn origin(&self) -> Point3 {
        self.origin
    }
}
impl fmt::Display for Sphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sphere@{} | {}", self.origin, self.radius)
    }
}

/// [`Cone`] struct represents single-sided finite cone.
///
/// Origin of a cone is the center of its base circle and apex is its tip;
/// height, direction and angle are derived from those two points.
///
/// # Example
/// ```rust
/// # use rayprim::mathcore::shapes::Cone;
/// # use rayprim::mathcore::vectors::Vector3;
/// let cone: Cone = Cone::new(Vector3::ZERO, 1.0, Vector3::new(0.0, 0.0, 1.0));
/// assert_eq!(cone.height(), 1.0);
/// assert_eq!(cone.direction(), Vector3::Z_AXIS);
/// assert!((cone.angle() - 45.0).abs() < 1e-9);
/// ```
///
#[derive(Serialize, Copy, Clone, Debug, PartialEq)]
pub struct Cone {
    /// Radius of cone's base circle.
    ///
    radius: f64,
    /// Tip of a cone.
    ///
    apex: Point3,
    /// Center of cone's base circle.
    ///
    origin: Point3,
}
impl Cone {
    /// Initializes cone from the center of its base circle, base radius and its tip.
    ///
    pub fn new(base: Point3, radius: f64, apex: Point3) -> Self {
        Cone {
            radius,
            apex,
            origin: base,
        }
    }
    /// Initializes cone from the center of its base circle, base radius and height.
    ///
    /// Tip of a cone is placed along the positive X axis.
    ///
    pub fn with_height(base: Point3, radius: f64, height: f64) -> Self {
        Cone::new(base, radius, base + Vector3::X_AXIS * height)
    }

    /// Returns radius of cone's base circle.
    ///
    pub fn radius(&self) -> f64 {
        self.radius
    }
    /// Returns tip of a cone.
    ///
    pub fn apex(&self) -> Point3 {
        self.apex
    }

    /// Returns height of a cone (distance from base center to tip).
    ///
    pub fn height(&self) -> f64 {
        (self.apex - self.origin).length()
    }
    /// Returns direction of a cone (from base center to tip) of unit length.
    ///
    pub fn direction(&self) -> Vector3 {
        (self.apex - self.origin).normalize()
    }
    /// Returns half-angle between cone's axis and its slant in degrees.
    ///
    pub fn angle(&self) -> f64 {
        let slant: f64 = (self.radius * self.radius + self.height() * self.height()).sqrt();
        (self.radius / slant).asin().to_degrees()
    }
}
impl Geometry for Cone {
    fn origin(&self) -> Point3 {
        self.origin
    }
}
impl fmt::Display for Cone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cone@{} | {}, {}",
            self.origin, self.radius, self.apex
        )
    }
}

/// [`Shape`] enum lists all shapes that rays can intersect.
///
/// It allows to store different shapes together and intersect them through single entry point
/// (see [`crate::mathcore::rays::Ray::intersect`]).
///
#[derive(Serialize, Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    /// Plane.
    ///
    Plane(Plane),
    /// Sphere.
    ///
    Sphere(Sphere),
    /// Cone.
    ///
    Cone(Cone),
}
impl Geometry for Shape {
    fn origin(&self) -> Point3 {
        match self {
            Shape::Plane(plane) => plane.origin(),
            Shape::Sphere(sphere) => sphere.origin(),
            Shape::Cone(cone) => cone.origin(),
        }
    }
}
impl From<Plane> for Shape {
    fn from(value: Plane) -> Self {
        Shape::Plane(value)
    }
}
impl From<Sphere> for Shape {
    fn from(value: Sphere) -> Self {
        Shape::Sphere(value)
    }
}
impl From<Cone> for Shape {
    fn from(value: Cone) -> Self {
        Shape::Cone(value)
    }
}
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Plane(plane) => plane.fmt(f),
            Shape::Sphere(sphere) => sphere.fmt(f),
            Shape::Cone(cone) => cone.fmt(f),
        }
    }
}
