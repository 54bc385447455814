pub(crate) mod edge_algebra;
mod handles;
mod line_side_info;
mod quad_edge;

pub(crate) mod math;

pub use line_side_info::LineSideInfo;
pub use quad_edge::QuadEdgeStore;

pub use handles::iterators;
pub use handles::*;
