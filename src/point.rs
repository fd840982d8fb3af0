use num_traits::{Num, Signed};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A coordinate type that can be used with a [DelaunayMesh](crate::DelaunayMesh).
///
/// All geometric predicates are evaluated after converting the coordinates into `f64`.
/// Using `f32` or a signed integer type only changes how points are stored.
///
/// This type should usually be `f64`, `f32` or `i32`.
pub trait MeshNum: Num + PartialOrd + Into<f64> + Copy + Signed + std::fmt::Debug {}

impl<T> MeshNum for T where T: Num + PartialOrd + Into<f64> + Copy + Signed + std::fmt::Debug {}

/// A point with an optional third coordinate.
///
/// Only `x` and `y` take part in the triangulation. `z` is carried along unchanged, which is
/// useful for storing an elevation or any other sampled value at that position.
#[derive(Debug, PartialEq, Eq, PartialOrd, Clone, Copy, Default, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Point<S> {
    /// The point's x coordinate
    pub x: S,
    /// The point's y coordinate
    pub y: S,
    /// The point's z coordinate. Ignored by all predicates.
    pub z: S,
}

impl<S: MeshNum> Point<S> {
    /// Creates a new planar point. `z` is set to zero.
    #[inline]
    pub fn new(x: S, y: S) -> Self {
        Point { x, y, z: S::zero() }
    }

    /// Creates a new point with an additional z coordinate.
    #[inline]
    pub const fn with_elevation(x: S, y: S, z: S) -> Self {
        Point { x, y, z }
    }

    /// Returns the squared planar distance of this point and another point.
    #[inline]
    pub fn distance_2(&self, other: Self) -> S {
        self.position_2d().sub(other.position_2d()).length2()
    }

    /// Returns the same point projected onto the `z = 0` plane.
    #[inline]
    pub fn position_2d(&self) -> Self {
        Self::new(self.x, self.y)
    }

    pub(crate) fn to_f64(self) -> Point<f64> {
        Point::with_elevation(self.x.into(), self.y.into(), self.z.into())
    }

    pub(crate) fn mul(&self, factor: S) -> Self {
        Point {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    pub(crate) fn add(&self, other: Self) -> Self {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    pub(crate) fn sub(&self, other: Self) -> Self {
        Point {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    pub(crate) fn length2(&self) -> S {
        self.dot(*self)
    }

    pub(crate) fn dot(&self, other: Self) -> S {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub(crate) fn cross(&self, other: Self) -> Self {
        Point {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl<S: MeshNum> From<Point<S>> for [S; 2] {
    #[inline]
    fn from(point: Point<S>) -> Self {
        [point.x, point.y]
    }
}

impl<S: MeshNum> From<Point<S>> for [S; 3] {
    #[inline]
    fn from(point: Point<S>) -> Self {
        [point.x, point.y, point.z]
    }
}

impl<S: MeshNum> From<[S; 2]> for Point<S> {
    #[inline]
    fn from(source: [S; 2]) -> Self {
        Self::new(source[0], source[1])
    }
}

impl<S: MeshNum> From<(S, S)> for Point<S> {
    #[inline]
    fn from(source: (S, S)) -> Self {
        Self::new(source.0, source.1)
    }
}

impl<S: MeshNum> From<[S; 3]> for Point<S> {
    #[inline]
    fn from(source: [S; 3]) -> Self {
        Self::with_elevation(source[0], source[1], source[2])
    }
}

impl<S: MeshNum> From<(S, S, S)> for Point<S> {
    #[inline]
    fn from(source: (S, S, S)) -> Self {
        Self::with_elevation(source.0, source.1, source.2)
    }
}

#[cfg(test)]
mod test {
    use super::Point;

    #[test]
    fn test_new_sets_zero_elevation() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(p.z, 0.0);
        assert_eq!(Point::from((1.0, 2.0)), p);
        assert_eq!(Point::from([1.0, 2.0, 3.0]), Point::with_elevation(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_vector_operations() {
        let a = Point::with_elevation(1.0, 2.0, 3.0);
        let b = Point::with_elevation(4.0, 5.0, 6.0);

        assert_eq!(a.add(b), Point::with_elevation(5.0, 7.0, 9.0));
        assert_eq!(b.sub(a), Point::with_elevation(3.0, 3.0, 3.0));
        assert_eq!(a.mul(2.0), Point::with_elevation(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(a.cross(b), Point::with_elevation(-3.0, 6.0, -3.0));
        assert_eq!(a.length2(), 14.0);
    }

    #[test]
    fn test_planar_cross_is_normal() {
        let a = Point::new(2.0, 0.0);
        let b = Point::new(0.0, 3.0);
        assert_eq!(a.cross(b), Point::with_elevation(0.0, 0.0, 6.0));
        assert_eq!(b.cross(a), Point::with_elevation(0.0, 0.0, -6.0));
    }

    #[test]
    fn test_distance_ignores_elevation() {
        let a = Point::with_elevation(0, 0, 10);
        let b = Point::with_elevation(3, 4, -10);
        assert_eq!(a.distance_2(b), 25);
        assert_eq!(a.to_f64(), Point::with_elevation(0.0, 0.0, 10.0));
    }
}
