use hashbrown::HashSet;

use super::handles::*;
use super::math::InsertionError;
use super::mesh::Mesh;

/// One edge of the hole left by removing a set of triangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundaryEdge {
    pub from: FixedVertexHandle,
    pub to: FixedVertexHandle,
    /// The surviving triangle across this edge. `None` if the edge lies on the frame.
    pub outside: Option<FixedTriangleHandle>,
}

/// Traces the polygon enclosing a connected, hole-free set of triangles.
///
/// The walk starts at slot 0 of the triangle with the lowest handle and follows the triangles'
/// vertex order. Edges shared by two triangles of the set are crossed, all other edges are
/// recorded. The walk ends as soon as the first recorded edge comes up again. Consecutive
/// edges of the result are connected (`edges[i].to == edges[i + 1].from`, cyclically).
///
/// The walk visits every (triangle, slot) pair at most twice. It gives up with
/// [InsertionError::BrokenBoundary] if it cannot close within that bound, if a crossed
/// neighbor has no link back, or if fewer than three edges are found. The result is rejected
/// as well unless the walk entered every triangle of the set and found exactly
/// `bad_triangles.len() + 2` edges, which holds for a disk of triangles whose vertices all lie
/// on its border.
pub fn trace_boundary<S: Copy>(
    mesh: &Mesh<S>,
    bad_triangles: &[FixedTriangleHandle],
) -> Result<Vec<BoundaryEdge>, InsertionError> {
    let start = *bad_triangles
        .iter()
        .min()
        .ok_or(InsertionError::BrokenBoundary)?;
    let bad_set: HashSet<FixedTriangleHandle> = bad_triangles.iter().copied().collect();
    // Every (triangle, slot) pair of the set is stepped over at most twice, two more steps
    // record the repeated first edge.
    let max_steps = 6 * bad_set.len() + 2;

    let mut current = start;
    let mut slot = 0;
    let mut visited: HashSet<FixedTriangleHandle> = HashSet::with_capacity(bad_set.len());
    visited.insert(start);
    let mut boundary: Vec<BoundaryEdge> = Vec::new();

    for _ in 0..max_steps {
        if boundary.len() > 1 && boundary.first() == boundary.last() {
            // The last edge closes the loop and duplicates the first one
            boundary.pop();
            if boundary.len() < 3
                || boundary.len() != bad_set.len() + 2
                || visited.len() != bad_set.len()
            {
                return Err(InsertionError::BrokenBoundary);
            }
            return Ok(boundary);
        }

        let triangle = mesh.get(current).ok_or(InsertionError::BrokenBoundary)?;
        match triangle.neighbor(slot) {
            Some(next) if bad_set.contains(&next) => {
                let back_slot = mesh
                    .get(next)
                    .and_then(|next_triangle| next_triangle.neighbor_slot(current))
                    .ok_or(InsertionError::BrokenBoundary)?;
                current = next;
                visited.insert(current);
                slot = (back_slot + 1) % 3;
            }
            outside => {
                let [from, to] = triangle.opposite_edge(slot);
                log::trace!(
                    "boundary edge {} -> {} of {:?}",
                    from.index(),
                    to.index(),
                    current
                );
                boundary.push(BoundaryEdge { from, to, outside });
                slot = (slot + 1) % 3;
            }
        }
    }
    Err(InsertionError::BrokenBoundary)
}

/// Asserts that `boundary` is a closed cycle without repeated edges.
#[cfg(test)]
pub fn assert_closed(boundary: &[BoundaryEdge]) {
    for (index, current) in boundary.iter().enumerate() {
        let next = &boundary[(index + 1) % boundary.len()];
        assert_eq!(current.to, next.from);
    }
    for (index, current) in boundary.iter().enumerate() {
        for other in &boundary[index + 1..] {
            assert_ne!((current.from, current.to), (other.from, other.to));
        }
    }
}
