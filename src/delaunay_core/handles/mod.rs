mod handle_defs;

pub use handle_defs::{FixedTriangleHandle, FixedVertexHandle};
