use std::{error::Error, fmt::Display};

use super::handles::FixedVertexHandle;
use crate::{LineSideInfo, MeshNum, Point};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The error type used for inserting points into a [DelaunayMesh](crate::DelaunayMesh).
///
/// All checks run before the mesh is modified. A rejected point is not added to the mesh and
/// the mesh stays exactly as it was before the call.
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug, Hash)]
pub enum InsertionError {
    /// A coordinate value was NaN.
    NAN,

    /// A coordinate value was infinite.
    TooLarge,

    /// The point does not lie strictly inside the mesh's frame.
    OutsideOfFrame,

    /// The point coincides with the given, already inserted point.
    DuplicatePosition(FixedVertexHandle),

    /// The point is collinear with an edge of the region it would be connected to. Inserting
    /// it would create a triangle without area.
    Degenerate,

    /// The triangles around the point could not be traced into a single closed boundary.
    ///
    /// This indicates that the mesh's neighbor links became inconsistent, it is never caused
    /// by a point that passed the other checks on a valid mesh.
    BrokenBoundary,
}

impl Display for InsertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Debug>::fmt(self, f)
    }
}

impl Error for InsertionError {}

/// Checks if a coordinate value is suitable for insertion.
///
/// Returns `Err(InsertionError::NAN)` for NaN and `Err(InsertionError::TooLarge)` for any
/// infinite value.
pub fn validate_coordinate<S: MeshNum>(value: S) -> Result<(), InsertionError> {
    let as_f64: f64 = value.into();
    if as_f64.is_nan() {
        Err(InsertionError::NAN)
    } else if as_f64.is_infinite() {
        Err(InsertionError::TooLarge)
    } else {
        Ok(())
    }
}

/// Checks if both planar coordinates of a point are valid. See [validate_coordinate].
///
/// The z coordinate is not checked as it never takes part in any calculation.
pub fn validate_point<S: MeshNum>(point: Point<S>) -> Result<(), InsertionError> {
    validate_coordinate(point.x)?;
    validate_coordinate(point.y)?;
    Ok(())
}

/// The circle passing through all three vertices of a triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Circumcircle {
    /// The circle's center. Its z coordinate is always zero.
    pub center: Point<f64>,
    /// The circle's squared radius.
    pub radius_2: f64,
}

impl Circumcircle {
    /// Returns `true` if `point` lies inside or exactly on this circle.
    pub fn contains<S: MeshNum>(&self, point: Point<S>) -> bool {
        let offset = point.position_2d().to_f64().sub(self.center);
        offset.length2() <= self.radius_2
    }
}

/// Calculates the circumcircle of a triangle.
///
/// The vertices must not be collinear. For collinear vertices, the result contains NaN or
/// infinite values.
pub fn circumcircle<S: MeshNum>(v0: Point<S>, v1: Point<S>, v2: Point<S>) -> Circumcircle {
    let c = v2.position_2d().to_f64();
    let a = v0.position_2d().to_f64().sub(c);
    let b = v1.position_2d().to_f64().sub(c);

    // See https://en.wikipedia.org/wiki/Circumscribed_circle#Circumcircle_equations
    let z = a.cross(b);
    let z_2 = z.length2();
    let a_2 = a.length2();
    let b_2 = b.length2();

    let center = b.mul(a_2).sub(a.mul(b_2)).cross(z).mul(0.5 / z_2).add(c);
    let radius_2 = 0.25 * a_2 * b_2 * a.sub(b).length2() / z_2;

    Circumcircle { center, radius_2 }
}

/// Returns `true` if `p` lies inside or on the circumcircle of `v0`, `v1` and `v2`.
///
/// Points exactly on the circle count as contained. Co-circular configurations are thus
/// always re-triangulated.
pub fn contained_in_circumcircle<S: MeshNum>(
    v0: Point<S>,
    v1: Point<S>,
    v2: Point<S>,
    p: Point<S>,
) -> bool {
    circumcircle(v0, v1, v2).contains(p)
}

fn to_robust_coord<S: MeshNum>(point: Point<S>) -> robust::Coord<f64> {
    robust::Coord {
        x: point.x.into(),
        y: point.y.into(),
    }
}

/// Exact orientation test of `query_point` relative to the directed line `p1 -> p2`.
///
/// Every triangle of a [DelaunayMesh](crate::DelaunayMesh) has its interior on the right side
/// of each of its directed edges.
///
/// # Example
/// ```
/// use bowyer_watson::{side_query, Point};
///
/// let from = Point::new(0.0, 0.0);
/// let to = Point::new(2.0, 0.0);
/// assert!(side_query(from, to, Point::new(1.0, 1.0)).is_on_left_side());
/// assert!(side_query(from, to, Point::new(1.0, -1.0)).is_on_right_side());
/// assert!(side_query(from, to, Point::new(5.0, 0.0)).is_on_line());
/// ```
pub fn side_query<S: MeshNum>(p1: Point<S>, p2: Point<S>, query_point: Point<S>) -> LineSideInfo {
    let p1 = to_robust_coord(p1);
    let p2 = to_robust_coord(p2);
    let query_point = to_robust_coord(query_point);

    let result = robust::orient2d(p1, p2, query_point);
    LineSideInfo::from_determinant(result)
}

/// Returns `true` if `p` lies inside or on the border of the given triangle.
///
/// Works for either vertex orientation.
pub fn is_inside_triangle<S: MeshNum>(
    v0: Point<S>,
    v1: Point<S>,
    v2: Point<S>,
    p: Point<S>,
) -> bool {
    let sides = [side_query(v0, v1, p), side_query(v1, v2, p), side_query(v2, v0, p)];
    sides.iter().all(|side| side.is_on_right_side_or_on_line())
        || sides.iter().all(|side| !side.is_on_right_side())
}
