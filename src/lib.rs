//! # quadedge-delaunay
//!
//! Incremental planar Delaunay triangulation built on a quad-edge subdivision.
//!
//! A [Subdivision] is seeded with a triangle and grows by one site at a time. Every
//! insertion locates the new site by walking the triangulation, connects it to the
//! surrounding vertices and restores the empty circumcircle property with Lawson
//! flips.
//!
//! # Features
//!  * Quad-edge storage: every Delaunay edge is stored together with its dual Voronoi
//!    edge. Both are accessible through [handles].
//!  * Sites inside a triangle, on an edge, on the convex hull or outside of the convex
//!    hull are supported.
//!  * Coincident sites are detected with a configurable tolerance, see
//!    [SubdivisionParameters].
//!  * Insertions are atomic: a failed insertion leaves the subdivision unchanged.
//!  * `serde` support with the `serde` feature.
//!
//! # Example
//!
//! ```
//! use quadedge_delaunay::{InsertionError, Point2, Subdivision};
//!
//! # fn main() -> Result<(), InsertionError> {
//! let mut subdivision = Subdivision::new(
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(5.0, 10.0),
//! )?;
//! subdivision.insert_site(Point2::new(5.0, 3.0))?;
//! subdivision.insert_site(Point2::new(5.0, -5.0))?;
//!
//! assert_eq!(subdivision.num_triangles(), 4);
//! for triangle in subdivision.triangles() {
//!     let circle = triangle.circumcircle()?;
//!     println!("center: {:?}, radius: {}", circle.center, circle.radius);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(missing_docs)]

mod delaunay_core;
mod parameters;
mod point;
mod subdivision;

pub use crate::delaunay_core::math::{
    circumcircle, coincide, in_circle, mitigate_underflow, on_segment, orientation,
    side_query, triangle_area, validate_coordinate, validate_vertex, Circle, InsertionError,
    PointProjection, DEFAULT_TOLERANCE, MAX_ALLOWED_VALUE, MIN_ALLOWED_VALUE,
};

pub use delaunay_core::LineSideInfo;
pub use parameters::SubdivisionParameters;
pub use point::{HasPosition, Point2, SubdivisionNum};
pub use subdivision::{PositionInTriangulation, Subdivision};

/// Handle types used for traversal and modification of subdivisions.
///
/// A handle refers to a single element (a vertex, a directed or undirected edge, a
/// triangle or a Voronoi edge) of a [Subdivision].
///
/// # Fixed and dynamic handles
///
/// *Fixed* handles (e.g. [FixedVertexHandle](handles::FixedVertexHandle)) are small
/// indices that do not borrow the subdivision. They can be stored and converted back
/// with [Subdivision::vertex] or [Subdivision::directed_edge].
///
/// *Dynamic* handles (e.g. [VertexHandle](handles::VertexHandle)) borrow the subdivision
/// and allow navigating to adjacent elements. Use `fix()` to convert a dynamic handle
/// into a fixed one.
///
/// Edge handles carry a generation. A fixed edge handle whose edge was removed by a
/// later insertion is detected as stale: [Subdivision::directed_edge] returns `None`.
pub mod handles {
    pub use crate::delaunay_core::{
        DirectedEdgeHandle, DirectedVoronoiEdgeHandle, DynamicHandleImpl,
        FixedDirectedEdgeHandle, FixedDirectedVoronoiEdgeHandle, FixedQuadEdgeHandle,
        FixedTriangleHandle, FixedVertexHandle, TriangleHandle, UndirectedEdgeHandle,
        VertexHandle, VoronoiVertex,
    };
}

/// Iterators over the elements of a subdivision.
pub mod iterators {
    pub use crate::delaunay_core::iterators::{
        CircularIterator, HullIterator, NextBackFn, TriangleIterator, UndirectedEdgeTraversal,
        VertexIterator,
    };
    pub use crate::delaunay_core::OnextNextBackFn;
}

#[cfg(test)]
mod test_utilities;
