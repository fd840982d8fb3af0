use super::handles::*;
use super::math;
use crate::{MeshNum, Point};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle of a mesh: three vertices and the three triangles adjacent to its edges.
///
/// Slot `i` of [neighbors](Triangle::neighbors) refers to the triangle sharing the edge
/// *opposite* of vertex `i`, that is the edge from `vertices[(i + 1) % 3]` to
/// `vertices[(i + 2) % 3]`. `None` marks an edge of the framed region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Triangle {
    vertices: [FixedVertexHandle; 3],
    neighbors: [Option<FixedTriangleHandle>; 3],
}

impl Triangle {
    fn new(vertices: [FixedVertexHandle; 3]) -> Self {
        Self {
            vertices,
            neighbors: [None; 3],
        }
    }

    /// Returns the triangle's vertices in their stored order.
    pub fn vertices(&self) -> [FixedVertexHandle; 3] {
        self.vertices
    }

    /// Returns the vertex at the given slot (0, 1 or 2).
    pub fn vertex(&self, slot: usize) -> FixedVertexHandle {
        self.vertices[slot]
    }

    /// Returns all three neighbors, indexed by the vertex they lie opposite of.
    pub fn neighbors(&self) -> [Option<FixedTriangleHandle>; 3] {
        self.neighbors
    }

    /// Returns the neighbor across the edge opposite of vertex `slot`.
    pub fn neighbor(&self, slot: usize) -> Option<FixedTriangleHandle> {
        self.neighbors[slot]
    }

    /// Returns the directed edge opposite of vertex `slot`.
    pub fn opposite_edge(&self, slot: usize) -> [FixedVertexHandle; 2] {
        [
            self.vertices[(slot + 1) % 3],
            self.vertices[(slot + 2) % 3],
        ]
    }

    /// Returns `true` if `vertex` is one of this triangle's corners.
    pub fn contains_vertex(&self, vertex: FixedVertexHandle) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Returns the neighbor slot whose opposite edge runs from `from` to `to`.
    pub fn edge_slot(&self, from: FixedVertexHandle, to: FixedVertexHandle) -> Option<usize> {
        (0..3)
            .find(|&i| self.vertices[i] == from && self.vertices[(i + 1) % 3] == to)
            .map(|i| (i + 2) % 3)
    }

    /// Returns the slot referencing `other`.
    pub fn neighbor_slot(&self, other: FixedTriangleHandle) -> Option<usize> {
        self.neighbors.iter().position(|n| *n == Some(other))
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
struct TriangleEntry {
    generation: u32,
    triangle: Option<Triangle>,
}

/// Point table and triangle storage shared by all insertion steps.
///
/// Triangles live in a flat slot vector. Neighbor links are plain handles into that vector,
/// the mesh never follows or frees them on its own: whoever removes a triangle must rewrite
/// all links that point to it.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Mesh<S> {
    points: Vec<Point<S>>,
    entries: Vec<TriangleEntry>,
    free_slots: Vec<u32>,
    num_triangles: usize,
}

impl<S> Default for Mesh<S> {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            entries: Vec::new(),
            free_slots: Vec::new(),
            num_triangles: 0,
        }
    }
}

impl<S: Copy> Mesh<S> {
    pub fn reserve_capacity(&mut self, num_points: usize, num_triangles: usize) {
        self.points.reserve(num_points);
        self.entries.reserve(num_triangles);
    }

    pub fn num_vertices(&self) -> usize {
        self.points.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.num_triangles
    }

    pub fn points(&self) -> &[Point<S>] {
        &self.points
    }

    pub fn point(&self, handle: FixedVertexHandle) -> Point<S> {
        self.points[handle.index()]
    }

    pub fn push_point(&mut self, point: Point<S>) -> FixedVertexHandle {
        let handle = FixedVertexHandle::new(self.points.len());
        self.points.push(point);
        handle
    }

    /// Allocates a triangle without any neighbors, reusing the most recently freed slot.
    pub fn create_triangle(
        &mut self,
        v0: FixedVertexHandle,
        v1: FixedVertexHandle,
        v2: FixedVertexHandle,
    ) -> FixedTriangleHandle {
        let triangle = Triangle::new([v0, v1, v2]);
        self.num_triangles += 1;
        if let Some(index) = self.free_slots.pop() {
            let entry = &mut self.entries[index as usize];
            entry.triangle = Some(triangle);
            FixedTriangleHandle::new(index as usize, entry.generation)
        } else {
            self.entries.push(TriangleEntry {
                generation: 0,
                triangle: Some(triangle),
            });
            FixedTriangleHandle::new(self.entries.len() - 1, 0)
        }
    }

    /// Destroys a triangle and frees its slot. Links pointing to it are left untouched.
    pub fn remove_triangle(&mut self, handle: FixedTriangleHandle) -> Triangle {
        let entry = &mut self.entries[handle.index()];
        assert_eq!(
            entry.generation,
            handle.generation(),
            "Removing a stale triangle handle. This is a bug."
        );
        let triangle = entry
            .triangle
            .take()
            .expect("Removing a free triangle slot. This is a bug.");
        entry.generation = entry.generation.wrapping_add(1);
        self.free_slots.push(handle.index() as u32);
        self.num_triangles -= 1;
        triangle
    }

    /// Returns the triangle if `handle` still refers to a live triangle.
    pub fn get(&self, handle: FixedTriangleHandle) -> Option<&Triangle> {
        self.entries
            .get(handle.index())
            .filter(|entry| entry.generation == handle.generation())
            .and_then(|entry| entry.triangle.as_ref())
    }

    #[cfg(test)]
    pub fn triangle(&self, handle: FixedTriangleHandle) -> &Triangle {
        self.get(handle)
            .expect("Access to a destroyed triangle. This is a bug.")
    }

    fn triangle_mut(&mut self, handle: FixedTriangleHandle) -> &mut Triangle {
        self.entries
            .get_mut(handle.index())
            .filter(|entry| entry.generation == handle.generation())
            .and_then(|entry| entry.triangle.as_mut())
            .expect("Access to a destroyed triangle. This is a bug.")
    }

    pub fn set_neighbor(
        &mut self,
        handle: FixedTriangleHandle,
        slot: usize,
        other: Option<FixedTriangleHandle>,
    ) {
        self.triangle_mut(handle).neighbors[slot] = other;
    }

    /// Returns the slot of `handle` whose opposite edge is the directed edge `from -> to`.
    pub fn find_edge_slot(
        &self,
        handle: FixedTriangleHandle,
        from: FixedVertexHandle,
        to: FixedVertexHandle,
    ) -> Option<usize> {
        self.get(handle)?.edge_slot(from, to)
    }

    /// Links `other` as the neighbor across the directed edge `from -> to` of `handle`.
    ///
    /// Panics if `handle` has no such edge: the edge is always taken from a triangle that
    /// was adjacent before, so a miss means the neighbor links were already inconsistent.
    pub fn set_neighbor_across_edge(
        &mut self,
        handle: FixedTriangleHandle,
        from: FixedVertexHandle,
        to: FixedVertexHandle,
        other: Option<FixedTriangleHandle>,
    ) {
        match self.find_edge_slot(handle, from, to) {
            Some(slot) => self.set_neighbor(handle, slot, other),
            None => panic!(
                "Edge {:?} -> {:?} not found in {:?}. This is a bug.",
                from, to, handle
            ),
        }
    }

    /// Iterates over all live triangles in ascending slot order.
    pub fn triangles(&self) -> TriangleIterator<'_> {
        TriangleIterator {
            entries: self.entries.iter().enumerate(),
        }
    }
}

impl<S: MeshNum> Mesh<S> {
    /// Creates the frame `(0, 0), (width, 0), (width, height), (0, height)` covered by the
    /// triangles `(0, 3, 1)` and `(2, 1, 3)`, which share the diagonal `(1, 3)`.
    pub fn framed(width: S, height: S) -> Self {
        let mut mesh = Self::default();
        let v0 = mesh.push_point(Point::new(S::zero(), S::zero()));
        let v1 = mesh.push_point(Point::new(width, S::zero()));
        let v2 = mesh.push_point(Point::new(width, height));
        let v3 = mesh.push_point(Point::new(S::zero(), height));

        let t0 = mesh.create_triangle(v0, v3, v1);
        let t1 = mesh.create_triangle(v2, v1, v3);
        mesh.set_neighbor(t0, 0, Some(t1));
        mesh.set_neighbor(t1, 0, Some(t0));
        mesh
    }

    /// Returns the first triangle in slot order that contains `point`, borders included.
    pub fn locate(&self, point: Point<S>) -> Option<FixedTriangleHandle> {
        self.triangles()
            .find(|(_, triangle)| {
                let [v0, v1, v2] = triangle.vertices().map(|vertex| self.point(vertex));
                math::is_inside_triangle(v0, v1, v2, point)
            })
            .map(|(handle, _)| handle)
    }
}

/// An iterator over all triangles of a mesh and their handles.
///
/// Triangles are returned in ascending slot order. The order changes when triangles are
/// created or destroyed but is fully determined by the sequence of insertions.
pub struct TriangleIterator<'a> {
    entries: std::iter::Enumerate<std::slice::Iter<'a, TriangleEntry>>,
}

impl<'a> Iterator for TriangleIterator<'a> {
    type Item = (FixedTriangleHandle, &'a Triangle);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, entry) in self.entries.by_ref() {
            if let Some(triangle) = &entry.triangle {
                return Some((FixedTriangleHandle::new(index, entry.generation), triangle));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.entries.size_hint().1)
    }
}
