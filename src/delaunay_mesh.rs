use super::delaunay_core::{insert_point, Mesh};
use crate::delaunay_core::math;
use crate::{
    Circumcircle, FixedTriangleHandle, FixedVertexHandle, InsertionError, InsertionStatistics,
    MeshNum, Point, Triangle, TriangleIterator,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relative tolerance used when checking that no point lies inside a circumcircle.
const DELAUNAY_TOLERANCE: f64 = 1.0e-9;

/// A planar [Delaunay triangulation](https://en.wikipedia.org/wiki/Delaunay_triangulation)
/// of points inside a fixed rectangular frame.
///
/// The mesh starts out as the frame `(0, 0), (width, 0), (width, height), (0, height)`,
/// split along its diagonal into two triangles. Each call to [insert](DelaunayMesh::insert)
/// adds one point using the Bowyer-Watson algorithm: all triangles whose circumcircle contains
/// the point are removed and the resulting hole is re-triangulated by connecting each of its
/// edges to the new point. Afterwards, no point lies strictly inside the circumcircle of any
/// triangle.
///
/// Finding the affected triangles is a linear scan over all triangles. Inserting `n` points
/// takes `O(n²)` time in total.
///
/// # Basic usage
/// ```
/// use bowyer_watson::{DelaunayMesh, InsertionError, Point};
///
/// fn main() -> Result<(), InsertionError> {
///     let mut mesh = DelaunayMesh::new(10.0, 10.0);
///     assert_eq!(mesh.num_vertices(), 4);
///     assert_eq!(mesh.num_triangles(), 2);
///
///     mesh.insert(Point::new(5.0, 5.0))?;
///     mesh.insert(Point::new(5.0, 1.0))?;
///     assert_eq!(mesh.num_vertices(), 6);
///     assert_eq!(mesh.num_triangles(), 6);
///
///     for [a, b, c] in mesh.triangle_indices() {
///         println!("triangle {} {} {}", a, b, c);
///     }
///     Ok(())
/// }
/// ```
///
/// # Vertex order
/// Frame corners have the indices 0 to 3, inserted points follow in insertion order. All
/// triangles share the orientation of the frame triangles `(0, 3, 1)` and `(2, 1, 3)`: their
/// vertices run counterclockwise if the y axis points down (clockwise if it points up).
///
/// # Preconditions
/// Points must lie strictly inside the frame and must not coincide with an existing point.
/// A point that is collinear with an edge it would be connected to is rejected as well. See
/// [InsertionError] for all failure modes. A rejected point leaves the mesh unchanged.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct DelaunayMesh<S = f64> {
    mesh: Mesh<S>,
    width: S,
    height: S,
}

impl<S: MeshNum> DelaunayMesh<S> {
    /// Creates a mesh covering the frame `[0, width] × [0, height]`.
    ///
    /// # Panics
    /// Panics if `width` or `height` is not strictly positive.
    pub fn new(width: S, height: S) -> Self {
        assert!(
            width > S::zero() && height > S::zero(),
            "Frame dimensions must be positive, got {:?} x {:?}",
            width,
            height
        );
        Self {
            mesh: Mesh::framed(width, height),
            width,
            height,
        }
    }

    /// Creates a mesh covering the frame `[0, width] × [0, height]` with enough storage for
    /// inserting `num_points` points without reallocation.
    ///
    /// # Panics
    /// Panics if `width` or `height` is not strictly positive.
    pub fn with_capacity(width: S, height: S, num_points: usize) -> Self {
        let mut result = Self::new(width, height);
        result.mesh.reserve_capacity(num_points, 2 * num_points);
        result
    }

    /// Returns the frame's width.
    pub fn width(&self) -> S {
        self.width
    }

    /// Returns the frame's height.
    pub fn height(&self) -> S {
        self.height
    }

    /// Inserts a point and returns its handle.
    ///
    /// The returned handle's index equals the point's position in [points](DelaunayMesh::points).
    pub fn insert(&mut self, point: Point<S>) -> Result<FixedVertexHandle, InsertionError> {
        self.insert_with_statistics(point)
            .map(|(vertex, _)| vertex)
    }

    /// Inserts a point and reports how many triangles were replaced.
    ///
    /// # Example
    /// ```
    /// use bowyer_watson::{DelaunayMesh, InsertionError, Point};
    ///
    /// # fn main() -> Result<(), InsertionError> {
    /// let mut mesh = DelaunayMesh::new(10.0, 10.0);
    /// let (_, statistics) = mesh.insert_with_statistics(Point::new(5.0, 5.0))?;
    /// assert_eq!(statistics.removed_triangles, 2);
    /// assert_eq!(statistics.boundary_edges, 4);
    /// # Ok(()) }
    /// ```
    pub fn insert_with_statistics(
        &mut self,
        point: Point<S>,
    ) -> Result<(FixedVertexHandle, InsertionStatistics), InsertionError> {
        let result = self
            .check_point(point)
            .and_then(|()| insert_point(&mut self.mesh, point));
        if let Err(error) = &result {
            log::debug!("rejected point ({:?}, {:?}): {}", point.x, point.y, error);
        }
        result
    }

    fn check_point(&self, point: Point<S>) -> Result<(), InsertionError> {
        math::validate_point(point)?;
        let zero = S::zero();
        if point.x > zero && point.x < self.width && point.y > zero && point.y < self.height {
            Ok(())
        } else {
            Err(InsertionError::OutsideOfFrame)
        }
    }

    /// Returns the number of points, including the four frame corners.
    pub fn num_vertices(&self) -> usize {
        self.mesh.num_vertices()
    }

    /// Returns the number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.mesh.num_triangles()
    }

    /// Returns all points, indexed by their vertex handle's index.
    pub fn points(&self) -> &[Point<S>] {
        self.mesh.points()
    }

    /// Returns the position of a vertex.
    pub fn vertex(&self, handle: FixedVertexHandle) -> Point<S> {
        self.mesh.point(handle)
    }

    /// Iterates over all triangles and their handles.
    pub fn triangles(&self) -> TriangleIterator<'_> {
        self.mesh.triangles()
    }

    /// Returns a triangle. Returns `None` if the triangle has been replaced by an insertion.
    pub fn triangle(&self, handle: FixedTriangleHandle) -> Option<&Triangle> {
        self.mesh.get(handle)
    }

    /// Returns the positions of a triangle's vertices.
    pub fn triangle_positions(&self, handle: FixedTriangleHandle) -> Option<[Point<S>; 3]> {
        self.triangle(handle)
            .map(|triangle| self.positions_of(triangle))
    }

    /// Returns the vertex indices of every triangle.
    ///
    /// Together with [points](DelaunayMesh::points) this is everything needed to export or
    /// render the mesh.
    pub fn triangle_indices(&self) -> Vec<[usize; 3]> {
        self.triangles()
            .map(|(_, triangle)| triangle.vertices().map(|vertex| vertex.index()))
            .collect()
    }

    /// Returns the circumcircle of a triangle.
    pub fn circumcircle(&self, handle: FixedTriangleHandle) -> Option<Circumcircle> {
        self.triangle(handle)
            .map(|triangle| self.circumcircle_of(triangle))
    }

    /// Returns a triangle containing `point`, borders included.
    ///
    /// Returns `None` if the point lies outside the frame. Like insertion, this scans all
    /// triangles.
    pub fn locate(&self, point: Point<S>) -> Option<FixedTriangleHandle> {
        self.mesh.locate(point)
    }

    /// Returns `true` if no point lies inside the circumcircle of any triangle.
    ///
    /// Points within a small relative tolerance of a circle count as lying on it. Checks every
    /// pair of triangle and point.
    pub fn is_delaunay(&self) -> bool {
        self.triangles().all(|(_, triangle)| {
            let circle = self.circumcircle_of(triangle);
            let min_distance_2 = circle.radius_2 * (1.0 - DELAUNAY_TOLERANCE);
            self.points().iter().enumerate().all(|(index, point)| {
                triangle.contains_vertex(FixedVertexHandle::new(index))
                    || point.position_2d().to_f64().sub(circle.center).length2() >= min_distance_2
            })
        })
    }

    /// Returns `true` if all neighbor links are mutual.
    ///
    /// For every link from `t` to `n` across the edge `a -> b`, `n` must link back to `t`
    /// exactly once, across the edge `b -> a`.
    pub fn has_reciprocal_neighbors(&self) -> bool {
        self.triangles().all(|(handle, triangle)| {
            (0..3).all(|slot| {
                let Some(other) = triangle.neighbor(slot) else {
                    return true;
                };
                let Some(other_triangle) = self.mesh.get(other) else {
                    return false;
                };
                let mut back_slots =
                    (0..3).filter(|&i| other_triangle.neighbor(i) == Some(handle));
                match (back_slots.next(), back_slots.next()) {
                    (Some(back_slot), None) => {
                        let [from, to] = triangle.opposite_edge(slot);
                        other_triangle.opposite_edge(back_slot) == [to, from]
                    }
                    _ => false,
                }
            })
        })
    }

    /// Panics if the mesh's triangle count, neighbor links or Delaunay property are broken.
    #[cfg(any(test, fuzzing))]
    pub fn sanity_check(&self) {
        assert_eq!(self.triangles().count(), self.num_triangles());
        // All inserted points lie strictly inside the four corner hull
        assert_eq!(self.num_triangles(), 2 * self.num_vertices() - 6);
        assert!(self.has_reciprocal_neighbors());
        assert!(self.is_delaunay());
    }

    fn positions_of(&self, triangle: &Triangle) -> [Point<S>; 3] {
        triangle.vertices().map(|vertex| self.mesh.point(vertex))
    }

    fn circumcircle_of(&self, triangle: &Triangle) -> Circumcircle {
        let [v0, v1, v2] = self.positions_of(triangle);
        math::circumcircle(v0, v1, v2)
    }
}
