// Copyright 2017 The Spade Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Bowyer-Watson
//! Incremental Delaunay triangulation of points inside a rectangular frame.
//!
//! # Features
//! * A 2D Delaunay triangulation that starts out as a rectangle and grows point by point:
//!   [DelaunayMesh]
//!   * Supports integral and floating point coordinates as input
//!   * Uses exact orientation predicates to reject degenerate triangles
//!   * Carries an optional elevation per point
//!   * Reports what every insertion changed, see [InsertionStatistics]
//! * Stable triangle handles that detect when a triangle has been replaced, see
//!   [FixedTriangleHandle]
//!
//! # Example
//! ```
//! use bowyer_watson::{DelaunayMesh, InsertionError, Point};
//!
//! fn main() -> Result<(), InsertionError> {
//!     let mut mesh = DelaunayMesh::new(99.0, 99.0);
//!     for (x, y) in [(24.0, 31.0), (11.0, 62.0), (39.0, 72.0)] {
//!         mesh.insert(Point::new(x, y))?;
//!     }
//!     assert_eq!(mesh.num_vertices(), 7);
//!     assert_eq!(mesh.num_triangles(), 8);
//!     assert!(mesh.is_delaunay());
//!     Ok(())
//! }
//! ```
//!
//! # Cargo features
//! * `serde`: Enables (de)serialization of meshes, points and handles.

#![warn(missing_docs)]

mod delaunay_core;
mod delaunay_mesh;
mod point;

#[cfg(test)]
mod test_utilities;

pub use crate::delaunay_core::math::{
    circumcircle, side_query, validate_coordinate, validate_point, Circumcircle, InsertionError,
};
pub use crate::delaunay_core::{
    FixedTriangleHandle, FixedVertexHandle, InsertionStatistics, LineSideInfo, Triangle,
    TriangleIterator,
};
pub use crate::delaunay_mesh::DelaunayMesh;
pub use crate::point::{MeshNum, Point};
