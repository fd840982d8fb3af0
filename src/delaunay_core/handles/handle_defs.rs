use std::convert::TryInto;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn checked_index(index: usize) -> u32 {
    index
        .try_into()
        .expect("Index too big - at most 2^32 elements supported")
}

/// Refers to a point of a [DelaunayMesh](crate::DelaunayMesh).
///
/// The handle is the point's index into the append-only point table. Points are never
/// removed, hence a vertex handle stays valid for the lifetime of its mesh.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct FixedVertexHandle {
    index: u32,
}

impl FixedVertexHandle {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index: checked_index(index),
        }
    }

    /// Returns the index of the referenced point in [DelaunayMesh::points](crate::DelaunayMesh::points).
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl std::fmt::Debug for FixedVertexHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedVertexHandle")
            .field("index", &self.index)
            .finish()
    }
}

/// Refers to a triangle of a [DelaunayMesh](crate::DelaunayMesh).
///
/// Triangles are stored in slots that are recycled once a triangle is destroyed. Each handle
/// carries the generation of its slot: a handle to a destroyed triangle never resolves to the
/// triangle that later reuses the same slot.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct FixedTriangleHandle {
    index: u32,
    generation: u32,
}

impl FixedTriangleHandle {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self {
            index: checked_index(index),
            generation,
        }
    }

    /// Returns the slot index of this triangle.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Returns the slot generation this handle was created for.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl std::fmt::Debug for FixedTriangleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedTriangleHandle")
            .field("index", &self.index)
            .field("generation", &self.generation)
            .finish()
    }
}
