use hashbrown::HashSet;
use smallvec::SmallVec;

use super::boundary::{trace_boundary, BoundaryEdge};
use super::handles::*;
use super::math::{self, InsertionError};
use super::mesh::{Mesh, Triangle};
use crate::{MeshNum, Point};

/// Describes what a single insertion changed.
///
/// The number of triangles grows by `boundary_edges - removed_triangles` with every insertion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InsertionStatistics {
    /// Number of triangles whose circumcircle contained the inserted point.
    pub removed_triangles: usize,
    /// Number of edges of the hole left by the removed triangles. Each of these edges is
    /// connected to the new point by exactly one new triangle.
    pub boundary_edges: usize,
}

impl InsertionStatistics {
    /// Returns the number of triangles created by the insertion.
    pub fn created_triangles(&self) -> usize {
        self.boundary_edges
    }
}

type TriangleList = SmallVec<[FixedTriangleHandle; 16]>;

fn is_bad<S: MeshNum>(mesh: &Mesh<S>, triangle: &Triangle, point: Point<S>) -> bool {
    let [v0, v1, v2] = triangle.vertices();
    math::contained_in_circumcircle(mesh.point(v0), mesh.point(v1), mesh.point(v2), point)
}

/// Returns the connected set of triangles to replace when inserting `point`, in ascending
/// handle order.
///
/// The set grows from the triangle containing `point` across edges into every neighbor whose
/// circumcircle contains `point`. Triangles that only pass the circumcircle test due to rounding
/// on nearly co-circular points, without touching the rest of the set, are never included.
/// Returns an empty list if no triangle contains `point`.
pub fn find_bad_triangles<S: MeshNum>(mesh: &Mesh<S>, point: Point<S>) -> TriangleList {
    let Some(start) = mesh.locate(point) else {
        return TriangleList::new();
    };

    let mut bad_set = HashSet::new();
    bad_set.insert(start);
    let mut stack: TriangleList = SmallVec::new();
    stack.push(start);
    while let Some(current) = stack.pop() {
        let Some(triangle) = mesh.get(current) else {
            continue;
        };
        for neighbor in triangle.neighbors().into_iter().flatten() {
            if bad_set.contains(&neighbor) {
                continue;
            }
            if let Some(neighbor_triangle) = mesh.get(neighbor) {
                if is_bad(mesh, neighbor_triangle, point) {
                    bad_set.insert(neighbor);
                    stack.push(neighbor);
                }
            }
        }
    }

    let mut result: TriangleList = bad_set.into_iter().collect();
    result.sort_unstable();
    result
}

/// Returns an existing vertex with the same planar position as `point`.
pub fn find_duplicate<S: MeshNum>(mesh: &Mesh<S>, point: Point<S>) -> Option<FixedVertexHandle> {
    mesh.points()
        .iter()
        .position(|existing| existing.x == point.x && existing.y == point.y)
        .map(FixedVertexHandle::new)
}

/// Checks that every fan triangle `(point, from, to)` has the same orientation as the frame
/// and that every surviving neighbor links back across the shared edge.
fn check_fan<S: MeshNum>(
    mesh: &Mesh<S>,
    point: Point<S>,
    boundary: &[BoundaryEdge],
) -> Result<(), InsertionError> {
    for edge in boundary {
        let side = math::side_query(mesh.point(edge.from), mesh.point(edge.to), point);
        if !side.is_on_right_side() {
            return Err(InsertionError::Degenerate);
        }
        if let Some(outside) = edge.outside {
            if mesh.find_edge_slot(outside, edge.to, edge.from).is_none() {
                return Err(InsertionError::BrokenBoundary);
            }
        }
    }
    Ok(())
}

/// Inserts a point with the Bowyer-Watson algorithm.
///
/// The caller must ensure that `point` has valid coordinates and lies strictly inside the
/// frame. All remaining checks happen before the mesh is changed, an error leaves it untouched.
pub fn insert_point<S: MeshNum>(
    mesh: &mut Mesh<S>,
    point: Point<S>,
) -> Result<(FixedVertexHandle, InsertionStatistics), InsertionError> {
    if let Some(existing) = find_duplicate(mesh, point) {
        return Err(InsertionError::DuplicatePosition(existing));
    }

    let bad_triangles = find_bad_triangles(mesh, point);
    let boundary = trace_boundary(mesh, &bad_triangles)?;
    check_fan(mesh, point, &boundary)?;

    let new_vertex = mesh.push_point(point);
    for bad in &bad_triangles {
        mesh.remove_triangle(*bad);
    }

    let mut fan = TriangleList::with_capacity(boundary.len());
    for edge in &boundary {
        let triangle = mesh.create_triangle(new_vertex, edge.from, edge.to);
        mesh.set_neighbor(triangle, 0, edge.outside);
        if let Some(outside) = edge.outside {
            mesh.set_neighbor_across_edge(outside, edge.to, edge.from, Some(triangle));
        }
        fan.push(triangle);
    }

    // Triangle i shares (new_vertex, from) with its predecessor and (to, new_vertex) with
    // its successor.
    let len = fan.len();
    for (index, triangle) in fan.iter().enumerate() {
        let previous = fan[(index + len - 1) % len];
        let next = fan[(index + 1) % len];
        mesh.set_neighbor(*triangle, 2, Some(previous));
        mesh.set_neighbor(*triangle, 1, Some(next));
    }

    let statistics = InsertionStatistics {
        removed_triangles: bad_triangles.len(),
        boundary_edges: boundary.len(),
    };
    log::debug!(
        "inserted vertex {} at ({:?}, {:?}): {} triangles removed, {} created, {} total",
        new_vertex.index(),
        point.x,
        point.y,
        statistics.removed_triangles,
        statistics.created_triangles(),
        mesh.num_triangles()
    );
    Ok((new_vertex, statistics))
}

#[cfg(test)]
mod test {
    use super::{check_fan, find_bad_triangles, find_duplicate, insert_point, InsertionStatistics};
    use crate::delaunay_core::boundary::{assert_closed, trace_boundary, BoundaryEdge};
    use crate::delaunay_core::handles::FixedVertexHandle;
    use crate::delaunay_core::math::InsertionError;
    use crate::delaunay_core::mesh::Mesh;
    use crate::test_utilities::{fixture_points, random_points_in_frame, shuffled_grid, SEED};
    use crate::Point;

    fn v(index: usize) -> FixedVertexHandle {
        FixedVertexHandle::new(index)
    }

    #[test]
    fn test_find_bad_triangles() -> Result<(), InsertionError> {
        // Both frame triangles share the rectangle's circumcircle
        let mut mesh = Mesh::framed(10.0, 10.0);
        assert_eq!(find_bad_triangles(&mesh, Point::new(5.0, 5.0)).len(), 2);
        assert_eq!(find_bad_triangles(&mesh, Point::new(1.0, 9.0)).len(), 2);

        insert_point(&mut mesh, Point::new(5.0, 5.0))?;
        let bad = find_bad_triangles(&mesh, Point::new(5.0, 1.0));
        assert_eq!(bad.len(), 1);
        assert_eq!(mesh.triangle(bad[0]).vertices(), [v(4), v(1), v(0)]);
        Ok(())
    }

    #[test]
    fn test_find_duplicate() {
        let mesh = Mesh::framed(10.0, 10.0);
        assert_eq!(find_duplicate(&mesh, Point::new(10.0, 0.0)), Some(v(1)));
        assert_eq!(
            find_duplicate(&mesh, Point::with_elevation(0.0, 10.0, 3.0)),
            Some(v(3))
        );
        assert_eq!(find_duplicate(&mesh, Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_insert_into_frame() -> Result<(), InsertionError> {
        let mut mesh = Mesh::framed(10.0, 10.0);
        let (vertex, statistics) = insert_point(&mut mesh, Point::new(5.0, 5.0))?;
        assert_eq!(vertex, v(4));
        assert_eq!(
            statistics,
            InsertionStatistics {
                removed_triangles: 2,
                boundary_edges: 4,
            }
        );
        assert_eq!(mesh.num_triangles(), 4);

        // The fan is created in boundary order, reusing freed slots first
        let triangles: Vec<_> = mesh.triangles().collect();
        let vertices: Vec<_> = triangles.iter().map(|(_, t)| t.vertices()).collect();
        assert_eq!(
            vertices,
            vec![
                [v(4), v(2), v(1)],
                [v(4), v(3), v(2)],
                [v(4), v(1), v(0)],
                [v(4), v(0), v(3)],
            ]
        );

        let handles: Vec<_> = triangles.iter().map(|(h, _)| *h).collect();
        let [t0, t1, t2, t3] = [handles[0], handles[1], handles[2], handles[3]];
        assert_eq!(mesh.triangle(t1).neighbors(), [None, Some(t0), Some(t3)]);
        assert_eq!(mesh.triangle(t0).neighbors(), [None, Some(t2), Some(t1)]);
        assert_eq!(mesh.triangle(t2).neighbors(), [None, Some(t3), Some(t0)]);
        assert_eq!(mesh.triangle(t3).neighbors(), [None, Some(t1), Some(t2)]);
        Ok(())
    }

    #[test]
    fn test_insert_relinks_outside_neighbor() -> Result<(), InsertionError> {
        let mut mesh = Mesh::framed(10.0, 10.0);
        insert_point(&mut mesh, Point::new(5.0, 5.0))?;
        let (vertex, statistics) = insert_point(&mut mesh, Point::new(5.0, 1.0))?;
        assert_eq!(vertex, v(5));
        assert_eq!(statistics.removed_triangles, 1);
        assert_eq!(statistics.boundary_edges, 3);
        assert_eq!(mesh.num_triangles(), 6);

        // The old fan triangle (4, 2, 1) now borders the new triangle (5, 4, 1)
        let (right, _) = mesh
            .triangles()
            .find(|(_, t)| t.vertices() == [v(4), v(2), v(1)])
            .expect("triangle must survive");
        let (new, _) = mesh
            .triangles()
            .find(|(_, t)| t.vertices() == [v(5), v(4), v(1)])
            .expect("triangle must be created");
        assert_eq!(mesh.triangle(right).neighbor(1), Some(new));
        assert_eq!(mesh.triangle(new).neighbor(0), Some(right));
        Ok(())
    }

    #[test]
    fn test_rejected_insertion_keeps_mesh() {
        let mut mesh = Mesh::framed(10.0, 10.0);
        assert_eq!(
            insert_point(&mut mesh, Point::new(0.0, 0.0)),
            Err(InsertionError::DuplicatePosition(v(0)))
        );
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_triangles(), 2);
    }

    #[test]
    fn test_check_fan() {
        let mesh = Mesh::framed(10.0, 10.0);
        let handles: Vec<_> = mesh.triangles().map(|(handle, _)| handle).collect();
        let bottom = BoundaryEdge {
            from: v(1),
            to: v(0),
            outside: None,
        };

        assert_eq!(check_fan(&mesh, Point::new(5.0, 5.0), &[bottom]), Ok(()));
        assert_eq!(
            check_fan(&mesh, Point::new(5.0, 0.0), &[bottom]),
            Err(InsertionError::Degenerate)
        );
        assert_eq!(
            check_fan(&mesh, Point::new(5.0, -1.0), &[bottom]),
            Err(InsertionError::Degenerate)
        );

        // The upper frame triangle has no edge 0 -> 1
        let unlinked = BoundaryEdge {
            outside: Some(handles[1]),
            ..bottom
        };
        assert_eq!(
            check_fan(&mesh, Point::new(5.0, 5.0), &[unlinked]),
            Err(InsertionError::BrokenBoundary)
        );
    }

    fn insert_with_closed_boundary(
        mesh: &mut Mesh<f64>,
        point: Point<f64>,
    ) -> Result<(), InsertionError> {
        let bad = find_bad_triangles(mesh, point);
        let boundary = trace_boundary(mesh, &bad)?;
        assert_closed(&boundary);
        assert_eq!(boundary.len(), bad.len() + 2);

        let before = mesh.num_triangles();
        let (_, statistics) = insert_point(mesh, point)?;
        assert_eq!(statistics.removed_triangles, bad.len());
        assert_eq!(statistics.boundary_edges, boundary.len());
        assert_eq!(mesh.num_triangles(), before + 2);
        assert_eq!(mesh.num_triangles(), 2 * mesh.num_vertices() - 6);
        Ok(())
    }

    #[test]
    fn test_fixture_boundaries() -> Result<(), InsertionError> {
        let mut mesh = Mesh::framed(99.0, 99.0);
        for point in fixture_points() {
            insert_with_closed_boundary(&mut mesh, point)?;
        }
        assert_eq!(mesh.num_triangles(), 42);
        Ok(())
    }

    #[test]
    fn test_random_boundaries() -> Result<(), InsertionError> {
        let mut mesh = Mesh::framed(100.0, 100.0);
        for point in random_points_in_frame(100.0, 100.0, 200, SEED) {
            insert_with_closed_boundary(&mut mesh, point)?;
        }
        Ok(())
    }

    #[test]
    fn test_grid_boundaries() -> Result<(), InsertionError> {
        for seed in 0..10 {
            let mut mesh = Mesh::framed(8.4, 8.4);
            for point in shuffled_grid(11, 0.7, seed) {
                insert_with_closed_boundary(&mut mesh, point)?;
            }
        }
        Ok(())
    }

    #[test]
    fn test_bad_triangles_are_connected() -> Result<(), InsertionError> {
        for seed in 0..10 {
            let mut mesh = Mesh::framed(8.4, 8.4);
            for point in shuffled_grid(11, 0.7, seed) {
                let bad = find_bad_triangles(&mesh, point);
                let containing = mesh.locate(point).expect("point lies inside the frame");
                assert!(bad.contains(&containing));
                assert!(bad.windows(2).all(|pair| pair[0] < pair[1]));
                // Every triangle of the set borders another one
                if bad.len() > 1 {
                    for handle in &bad {
                        let triangle = mesh.triangle(*handle);
                        assert!(triangle
                            .neighbors()
                            .iter()
                            .flatten()
                            .any(|neighbor| bad.contains(neighbor)));
                    }
                }
                insert_point(&mut mesh, point)?;
            }
        }
        Ok(())
    }
}
