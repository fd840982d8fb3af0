mod boundary;
mod handles;
mod insertion;
mod line_side_info;
mod mesh;

pub(crate) mod math;

pub use handles::*;
pub use insertion::InsertionStatistics;
pub use line_side_info::LineSideInfo;
pub use mesh::{Triangle, TriangleIterator};

pub(crate) use insertion::insert_point;
pub(crate) use mesh::Mesh;
