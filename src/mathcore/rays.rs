//! `mathcore::rays` submodule implements [`Ray`] struct and intersection algorithms of rays with
//! shapes from [`crate::mathcore::shapes`].
//!
//! Every intersection is a pure function of a ray and a shape.
//! Intersections are returned as [`Intersections`] - a collection of at most two [`Hit`]s sorted
//! from nearest to farthest; no intersection is represented by an empty collection.
//! Degenerate input (parallel rays, zero radii) is not an error: it either yields an empty result
//! or propagates `NaN`.
//!

use crate::mathcore::{
    floats::RELAXED_TOLERANCE,
    shapes::{Cone, Geometry, Plane, Shape, Sphere},
    vectors::{Point3, Vector3},
    Sign,
};
use log::trace;
use serde::Serialize;
use std::{array, fmt, iter::Flatten, slice};

/// [`Hit`] struct describes single intersection of a ray with a shape.
///
#[derive(Serialize, Copy, Clone, Debug, PartialEq)]
pub struct Hit {
    /// Parameter of a ray at which intersection happens (`point = origin + t * dir`).
    ///
    pub t: f64,
    /// Intersection point in world space.
    ///
    pub point: Point3,
    /// Outward normal of a surface at intersection point.
    ///
    /// Normal is not guaranteed to be of unit length (sphere normals are `point - center`).
    ///
    pub normal: Vector3,
    /// Whether the hit lies on a flat cap of a shape (cone's base) rather than on its curved surface.
    ///
    pub on_cap: bool,
}

/// [`Intersections`] struct is a fixed-size collection of at most two hits.
///
/// Hits are sorted from nearest to farthest along the ray.
///
/// # Example
/// ```rust
/// # use rayprim::mathcore::rays::{Intersections, Ray};
/// # use rayprim::mathcore::shapes::Sphere;
/// # use rayprim::mathcore::vectors::Vector3;
/// let ray: Ray = Ray::new(Vector3::new(-5.0, 0.0, 0.0), Vector3::X_AXIS);
/// let hits: Intersections = ray.intersect(&Sphere::new(Vector3::ZERO, 2.0));
/// assert_eq!(hits.len(), 2);
/// assert_eq!(
///     hits.points().collect::<Vec<Vector3>>(),
///     [Vector3::new(-2.0, 0.0, 0.0), Vector3::new(2.0, 0.0, 0.0)]
/// );
/// ```
///
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Intersections {
    /// Hit slots; occupied slots always come first.
    ///
    hits: [Option<Hit>; 2],
}
impl Intersections {
    /// Initializes empty collection.
    ///
    pub const fn none() -> Self {
        Intersections { hits: [None, None] }
    }
    /// Initializes collection with one hit.
    ///
    fn one(hit: Hit) -> Self {
        Intersections {
            hits: [Some(hit), None],
        }
    }
    /// Initializes collection with two hits (in given order).
    ///
    fn two(first: Hit, second: Hit) -> Self {
        Intersections {
            hits: [Some(first), Some(second)],
        }
    }

    /// Returns amount of hits.
    ///
    pub fn len(&self) -> usize {
        self.hits.iter().flatten().count()
    }
    /// Returns whether there are no hits.
    ///
    pub fn is_empty(&self) -> bool {
        self.hits[0].is_none()
    }

    /// Returns hit by its index (hits are sorted from nearest to farthest).
    ///
    pub fn get(&self, index: usize) -> Option<&Hit> {
        self.hits.get(index).and_then(Option::as_ref)
    }
    /// Returns nearest hit.
    ///
    pub fn first(&self) -> Option<&Hit> {
        self.get(0)
    }

    /// Returns iterator over hits.
    ///
    pub fn iter(&self) -> Flatten<slice::Iter<'_, Option<Hit>>> {
        self.hits.iter().flatten()
    }
    /// Returns iterator over intersection points.
    ///
    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        self.iter().map(|hit| hit.point)
    }
    /// Returns normals of both slots; slots without a hit are `None`.
    ///
    pub fn normals(&self) -> [Option<Vector3>; 2] {
        self.hits.map(|hit| hit.map(|hit| hit.normal))
    }
}
impl IntoIterator for Intersections {
    type Item = Hit;
    type IntoIter = Flatten<array::IntoIter<Option<Hit>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.into_iter().flatten()
    }
}
impl<'a> IntoIterator for &'a Intersections {
    type Item = &'a Hit;
    type IntoIter = Flatten<slice::Iter<'a, Option<Hit>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// [`Intersect`] trait is implemented on shapes that rays can intersect.
///
/// # Example
/// ```rust
/// # use rayprim::mathcore::rays::{Intersect, Ray};
/// # use rayprim::mathcore::shapes::{Cone, Plane, Shape, Sphere};
/// # use rayprim::mathcore::vectors::Vector3;
/// let scene: [Shape; 3] = [
///     Shape::from(Plane::new(Vector3::new(0.0, 0.0, 10.0), Vector3::Z_AXIS)),
///     Shape::from(Sphere::new(Vector3::new(0.0, 0.0, 5.0), 1.0)),
///     Shape::from(Cone::new(Vector3::new(0.0, 0.0, -5.0), 1.0, Vector3::new(0.0, 0.0, -3.0))),
/// ];
/// let ray: Ray = Ray::new(Vector3::ZERO, Vector3::Z_AXIS);
/// let hits: Vec<usize> = scene.iter().map(|shape| ray.intersect(shape).len()).collect();
/// assert_eq!(hits, [1, 2, 0]);
/// ```
///
pub trait Intersect {
    /// Returns intersections of given ray with this shape.
    ///
    fn intersections(&self, ray: &Ray) -> Intersections;
}
impl Intersect for Plane {
    fn intersections(&self, ray: &Ray) -> Intersections {
        match ray.plane_parameter(self) {
            Some(t) => Intersections::one(Hit {
                t,
                point: ray.dir * t + ray.origin,
                normal: self.normal(),
                on_cap: false,
            }),
            None => Intersections::none(),
        }
    }
}
impl Intersect for Sphere {
    fn intersections(&self, ray: &Ray) -> Intersections {
        ray.intersect_sphere(self)
    }
}
impl Intersect for Cone {
    fn intersections(&self, ray: &Ray) -> Intersections {
        ray.intersect_cone(self)
    }
}
impl Intersect for Shape {
    fn intersections(&self, ray: &Ray) -> Intersections {
        match self {
            Shape::Plane(plane) => plane.intersections(ray),
            Shape::Sphere(sphere) => sphere.intersections(ray),
            Shape::Cone(cone) => cone.intersections(ray),
        }
    }
}

/// [`ConeSpan`] enum lists kinds of parameter intervals that a line can share with
/// an infinite single-sided cone.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ConeSpan {
    /// Line touches the cone in a single point.
    ///
    Point,
    /// Line enters and leaves the cone (two finite parameters).
    ///
    Segment,
    /// Line enters the cone and stays inside up to `+inf`.
    ///
    RayForward,
    /// Line is inside the cone from `-inf` until it leaves.
    ///
    RayBackward,
    /// Line lies on the cone's surface.
    ///
    Line,
}

/// Relative rounding budget of a sum; values within it of zero are treated as zero.
///
const CANCELLATION: f64 = 16.0 * f64::EPSILON;

/// [`ConeQuadratic`] struct holds coefficients of `c2 * t^2 + 2 * c1 * t + c0 = 0` together with
/// magnitudes of the terms each coefficient was summed from.
///
/// Coefficients are differences of nearly equal terms for rays that run along the cone's surface
/// or through its tip, so they are compared against zero with respect to those magnitudes.
///
#[derive(Copy, Clone, Debug, PartialEq)]
struct ConeQuadratic {
    /// Coefficient of `t^2`.
    ///
    c2: f64,
    /// Half of the coefficient of `t`.
    ///
    c1: f64,
    /// Free coefficient.
    ///
    c0: f64,
    /// Magnitudes of terms of `c2`, `c1` and `c0`.
    ///
    scale: [f64; 3],
    /// Speed of the ray along the axis.
    ///
    d_du: f64,
    /// Axis coordinate of the ray origin (zero at the tip).
    ///
    d_dpmv: f64,
}
impl ConeQuadratic {
    /// Builds quadratic from the dot products of the ray and cone vectors.
    ///
    fn new(d_du: f64, d_dpmv: f64, u_dpmv: f64, pmv_dpmv: f64, cos_sqr: f64) -> Self {
        ConeQuadratic {
            c2: d_du * d_du - cos_sqr,
            c1: d_du * d_dpmv - cos_sqr * u_dpmv,
            c0: d_dpmv * d_dpmv - cos_sqr * pmv_dpmv,
            scale: [
                d_du * d_du + cos_sqr,
                (d_du * d_dpmv).abs() + (cos_sqr * u_dpmv).abs(),
                d_dpmv * d_dpmv + cos_sqr * pmv_dpmv,
            ],
            d_du,
            d_dpmv,
        }
    }

    /// Returns discriminant, or zero if it is lost in rounding of the coefficients.
    ///
    fn discriminant(&self) -> f64 {
        let discr: f64 = self.c1 * self.c1 - self.c0 * self.c2;
        let [scale2, scale1, scale0] = self.scale;
        let error: f64 = 2.0 * self.c1.abs() * scale1
            + self.c2.abs() * scale0
            + self.c0.abs() * scale2;
        if discr.abs() <= CANCELLATION * error {
            0.0
        } else {
            discr
        }
    }

    /// Classifies roots against the positive nappe (`d_du * t + d_dpmv >= 0`) and returns
    /// parameter interval of the line inside the infinite cone.
    ///
    /// Infinite ends of the interval are represented by `f64::MAX`.
    ///
    fn classify(&self) -> Option<(ConeSpan, [f64; 2])> {
        let (c2, c1, c0) = (self.c2, self.c1, self.c0);
        let [scale2, scale1, scale0] = self.scale;
        let (d_du, d_dpmv) = (self.d_du, self.d_dpmv);

        let on_positive_nappe = |t: f64| d_du * t + d_dpmv >= 0.0 && t > 0.0;
        let one_sided = |t: f64| match Sign::from(d_du) {
            Sign::Positive => (ConeSpan::RayForward, [t, f64::MAX]),
            Sign::Negative | Sign::Zero => (ConeSpan::RayBackward, [-f64::MAX, t]),
        };

        if c2.abs() > CANCELLATION * scale2 {
            let discr: f64 = self.discriminant();
            if discr < 0.0 {
                trace!("line misses the double-sided cone (discriminant {discr})");
                None
            } else if discr > 0.0 {
                let root: f64 = discr.sqrt();
                let inv_c2: f64 = 1.0 / c2;

                let mut parameters: [f64; 2] = [0.0; 2];
                let mut count: usize = 0;
                for t in [(-c1 - root) * inv_c2, (-c1 + root) * inv_c2] {
                    if on_positive_nappe(t) {
                        parameters[count] = t;
                        count += 1;
                    }
                }

                match count {
                    2 => {
                        if parameters[0] > parameters[1] {
                            parameters.swap(0, 1);
                        }
                        Some((ConeSpan::Segment, parameters))
                    }
                    1 => Some(one_sided(parameters[0])),
                    _ => {
                        trace!("line crosses only the negative nappe");
                        None
                    }
                }
            } else if c2 > 0.0 {
                // line runs inside the cone through its tip, where the axis coordinate is zero
                let t: f64 = -d_dpmv * (1.0 / d_du);
                if t > 0.0 {
                    Some(one_sided(t))
                } else {
                    trace!("tip of the cone is behind the ray");
                    None
                }
            } else {
                let t: f64 = -c1 / c2;
                if on_positive_nappe(t) {
                    Some((ConeSpan::Point, [t, t]))
                } else {
                    trace!("line touches only the negative nappe");
                    None
                }
            }
        } else if c1.abs() > CANCELLATION * scale1 {
            // direction of the line is parallel to the cone's surface
            let t: f64 = -0.5 * c0 / c1;
            if on_positive_nappe(t) {
                Some(one_sided(t))
            } else {
                trace!("line parallel to the surface crosses only the negative nappe");
                None
            }
        } else if c0.abs() > CANCELLATION * scale0 {
            trace!("line is degenerate with respect to the cone");
            None
        } else {
            Some((ConeSpan::Line, [-f64::MAX, f64::MAX]))
        }
    }
}

/// Clamps parameter interval of the line inside the infinite cone by the slab
/// `0 <= d_du * t + d_dpmv <= height`.
///
/// Returns clamped parameters and flags of endpoints that were moved by the slab, or `None` if
/// clamping eliminates the interval.
/// A line perpendicular to the axis (`d_du == 0`) is only checked against the far side of the
/// slab.
///
fn clamp_cone_span(
    mut parameters: [f64; 2],
    d_du: f64,
    d_dpmv: f64,
    height: f64,
) -> Option<([f64; 2], [bool; 2])> {
    let mut on_cap: [bool; 2] = [false; 2];
    let mut intersect: bool = true;

    // infinite (or `NaN`) height leaves the span unbounded
    if height < f64::MAX {
        match Sign::from(d_du) {
            Sign::Zero => {
                if d_dpmv > height {
                    intersect = false;
                }
            }
            sign => {
                let inv_d_du: f64 = 1.0 / d_du;
                let (enter, leave): (f64, f64) = if sign == Sign::Positive {
                    (-d_dpmv * inv_d_du, (height - d_dpmv) * inv_d_du)
                } else {
                    ((height - d_dpmv) * inv_d_du, -d_dpmv * inv_d_du)
                };

                if enter > 0.0 {
                    if enter > parameters[0] {
                        on_cap[0] = true;
                        parameters[0] = enter;
                    }
                    if enter > parameters[1] {
                        intersect = false;
                    }
                }
                if leave > 0.0 {
                    if leave < parameters[1] {
                        on_cap[1] = true;
                        parameters[1] = leave;
                    }
                    if leave < parameters[0] {
                        intersect = false;
                    }
                }
            }
        }
    }

    if intersect {
        Some((parameters, on_cap))
    } else {
        trace!("height of the cone eliminates the intersection");
        None
    }
}

/// [`Ray`] struct represents half-line `origin + t * dir` with `t >= 0`.
///
/// Direction is normalized on construction.
///
/// # Example
/// ```rust
/// # use rayprim::mathcore::rays::Ray;
/// # use rayprim::mathcore::vectors::Vector3;
/// let ray: Ray = Ray::new(Vector3::ZERO, Vector3::new(0.0, 10.0, 0.0));
/// assert_eq!(ray.direction(), Vector3::Y_AXIS);
/// assert_eq!(ray.point_at(2.0), Vector3::new(0.0, 2.0, 0.0));
/// ```
///
#[derive(Serialize, Copy, Clone, Debug)]
pub struct Ray {
    /// Point the ray is emitted from.
    ///
    origin: Point3,
    /// Direction of unit length.
    ///
    dir: Vector3,
}
impl Ray {
    /// Initializes ray from its origin and direction (direction is normalized).
    ///
    pub fn new(origin: Point3, dir: Vector3) -> Self {
        Ray {
            origin,
            dir: dir.normalize(),
        }
    }

    /// Returns direction of a ray.
    ///
    pub fn direction(&self) -> Vector3 {
        self.dir
    }
    /// Returns point of a ray at given parameter.
    ///
    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin + self.dir * t
    }

    /// Returns ray with the same origin which direction is reflected on given axis.
    ///
    pub fn reflect(&self, axis: Vector3) -> Ray {
        Ray::new(self.origin, self.dir.reflect(axis))
    }
    /// Projects point on the line that contains this ray.
    ///
    /// Points behind the origin are projected too.
    ///
    pub fn project(&self, point: Point3) -> Point3 {
        let ap: Vector3 = point - self.origin;
        self.origin + self.dir * (ap.dot(self.dir) / self.dir.dot(self.dir))
    }
    /// Returns whether point lies on the ray (in front of its origin).
    ///
    /// # Example
    /// ```rust
    /// # use rayprim::mathcore::rays::Ray;
    /// # use rayprim::mathcore::vectors::Vector3;
    /// let ray: Ray = Ray::new(Vector3::new(1.0, 1.0, 1.0), Vector3::new(1.0, 1.0, 0.0));
    /// assert!(ray.contains(Vector3::new(3.0, 3.0, 1.0)));
    /// assert!(!ray.contains(Vector3::new(0.0, 0.0, 1.0)));
    /// assert!(!ray.contains(Vector3::new(3.0, 3.0, 2.0)));
    /// ```
    ///
    pub fn contains(&self, point: Point3) -> bool {
        let t: f64 = (point - self.origin).dot(self.dir);
        t >= 0.0 && self.point_at(t).distance(point) < RELAXED_TOLERANCE
    }

    /// Returns intersections of this ray with given shape.
    ///
    pub fn intersect<S: Intersect + ?Sized>(&self, shape: &S) -> Intersections {
        shape.intersections(self)
    }

    /// Returns parameter at which the ray crosses the plane.
    ///
    /// Planes behind the origin and parallel planes (infinite or `NaN` parameter) are rejected.
    ///
    fn plane_parameter(&self, plane: &Plane) -> Option<f64> {
        let normal: Vector3 = plane.normal();
        let d: f64 = (plane.origin() - self.origin).dot(normal) / self.dir.dot(normal);
        if d < 0.0 || !d.is_finite() {
            trace!("ray does not reach the plane (parameter {d})");
            return None;
        }
        Some(d)
    }
    /// Returns the point at which the ray crosses the plane.
    ///
    /// # Example
    /// ```rust
    /// # use rayprim::mathcore::rays::Ray;
    /// # use rayprim::mathcore::shapes::Plane;
    /// # use rayprim::mathcore::vectors::Vector3;
    /// let plane: Plane = Plane::new(Vector3::new(0.0, 0.0, 5.0), Vector3::Z_AXIS);
    /// let ray: Ray = Ray::new(Vector3::new(1.0, 1.0, 0.0), Vector3::Z_AXIS);
    /// assert_eq!(ray.intersect_plane(&plane), Some(Vector3::new(1.0, 1.0, 5.0)));
    /// assert_eq!(ray.reflect(Vector3::Z_AXIS).intersect_plane(&plane), None);
    /// ```
    ///
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Point3> {
        self.plane_parameter(plane).map(|d| self.dir * d + self.origin)
    }

    /// Returns intersections of the ray with a sphere.
    ///
    /// If the origin of a ray is inside the sphere, only the exit point is returned.
    /// Normals are `point - center` and are not normalized.
    ///
    pub fn intersect_sphere(&self, sphere: &Sphere) -> Intersections {
        let center: Point3 = sphere.origin();
        let d: Vector3 = self.dir;
        let o: Vector3 = self.origin - center;

        let a: f64 = d.dot(d);
        let b: f64 = 2.0 * o.dot(d);
        let c: f64 = o.dot(o) - sphere.radius() * sphere.radius();

        let discriminant: f64 = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            trace!("ray misses the sphere (discriminant {discriminant})");
            return Intersections::none();
        }

        // this form of roots does not lose precision when `b` is close to the square root
        let sqrt_discriminant: f64 = discriminant.sqrt();
        let q: f64 = if b < 0.0 {
            (-b - sqrt_discriminant) / 2.0
        } else {
            (-b + sqrt_discriminant) / 2.0
        };

        let (mut t0, mut t1): (f64, f64) = (q / a, c / q);
        if t0 > t1 {
            (t0, t1) = (t1, t0);
        }

        if t1 < 0.0 {
            trace!("sphere is behind the ray");
            return Intersections::none();
        }

        let hit = |t: f64| {
            let point: Point3 = center + (o + d * t);
            Hit {
                t,
                point,
                normal: point - center,
                on_cap: false,
            }
        };
        if t0 < 0.0 {
            Intersections::one(hit(t1))
        } else {
            Intersections::two(hit(t0), hit(t1))
        }
    }

    /// Returns intersections of the ray with a finite cone.
    ///
    /// The cone is bounded by its tip and its base disk. Hits flagged with [`Hit::on_cap`] carry
    /// the cone's axis pointing away from the tip as their normal.
    /// A line that lies on the cone's surface yields the origin of a ray as its single hit.
    ///
    /// Only a line that enters and leaves the infinite cone through its side gives two hits.
    /// A line that stays inside the infinite cone towards one end gives a single hit where it
    /// crosses the side (or the tip); its [`Hit::on_cap`] flag and normal tell whether the ray has
    /// passed through the base disk before reaching that point.
    ///
    /// # Example
    /// ```rust
    /// # use rayprim::mathcore::rays::{Intersections, Ray};
    /// # use rayprim::mathcore::shapes::Cone;
    /// # use rayprim::mathcore::vectors::Vector3;
    /// let cone: Cone = Cone::new(Vector3::ZERO, 1.0, Vector3::new(0.0, 0.0, 2.0));
    /// let ray: Ray = Ray::new(Vector3::new(-5.0, 0.0, 1.0), Vector3::X_AXIS);
    /// let hits: Intersections = ray.intersect_cone(&cone);
    /// assert_eq!(
    ///     hits.points().collect::<Vec<Vector3>>(),
    ///     [Vector3::new(-0.5, 0.0, 1.0), Vector3::new(0.5, 0.0, 1.0)]
    /// );
    /// ```
    ///
    pub fn intersect_cone(&self, cone: &Cone) -> Intersections {
        // The cone is the set of points X with
        //   (X - V)^T * (D * D^T - g^2 * I) * (X - V) = 0,  0 <= D.(X - V) <= h
        // where V is the tip, D is the unit axis pointing from the tip to the base and
        // g = cos(angle). Substituting X = P + t * U gives
        //   c2 * t^2 + 2 * c1 * t + c0 = 0,  0 <= D.U * t + D.(P - V) <= h
        let vertex: Point3 = cone.apex();
        let axis: Vector3 = (cone.origin() - cone.apex()).normalize();
        let height: f64 = cone.height();
        let g: f64 = cone.angle().to_radians().cos();

        let p: Point3 = self.origin;
        let u: Vector3 = self.dir.normalize();

        let pmv: Vector3 = p - vertex;
        let d_du: f64 = axis.dot(u);
        let d_dpmv: f64 = axis.dot(pmv);
        let u_dpmv: f64 = u.dot(pmv);
        let pmv_dpmv: f64 = pmv.dot(pmv);
        let cos_sqr: f64 = g * g;

        let quadratic: ConeQuadratic = ConeQuadratic::new(d_du, d_dpmv, u_dpmv, pmv_dpmv, cos_sqr);
        let Some((span, parameters)) = quadratic.classify() else {
            return Intersections::none();
        };
        let Some((parameters, on_cap)) = clamp_cone_span(parameters, d_du, d_dpmv, height) else {
            return Intersections::none();
        };

        let normal_at = |point: Point3, on_cap: bool| -> Vector3 {
            if on_cap {
                return axis;
            }
            let radial: Vector3 = (point - vertex).normalize();
            let tangent: Vector3 = axis.cross(radial);
            tangent.cross(radial)
        };
        let hit = |t: f64, on_cap: bool| {
            let point: Point3 = p + u * t;
            Hit {
                t,
                point,
                normal: normal_at(point, on_cap),
                on_cap,
            }
        };

        // one-sided spans report a single point and the flag of the span's near end
        match span {
            ConeSpan::Segment => Intersections::two(
                hit(parameters[0], on_cap[0]),
                hit(parameters[1], on_cap[1]),
            ),
            ConeSpan::Point | ConeSpan::RayForward => {
                Intersections::one(hit(parameters[0], on_cap[0]))
            }
            ConeSpan::RayBackward => Intersections::one(hit(parameters[1], on_cap[0])),
            ConeSpan::Line => Intersections::one(hit(0.0, on_cap[0])),
        }
    }
}
impl Geometry for Ray {
    fn origin(&self) -> Point3 {
        self.origin
    }
}
impl PartialEq for Ray {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin && self.dir == other.dir
    }
}
impl fmt::Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} -> {}]", self.origin, self.dir)
    }
}
