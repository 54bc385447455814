mod circular_iterator;
mod hull_iterator;
mod traversal;

pub use circular_iterator::{CircularIterator, NextBackFn};
pub use hull_iterator::HullIterator;
pub use traversal::{TriangleIterator, UndirectedEdgeTraversal, VertexIterator};
