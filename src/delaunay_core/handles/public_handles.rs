pub use super::handle_defs::*;

use crate::Point2;

/// Handle to a vertex of a subdivision.
///
/// Use this handle to retrieve the vertex [position](Self::position) or its
/// [outgoing edges](Self::out_edges).
///
/// *See also the [handles module](crate::handles).*
pub type VertexHandle<'a, V> = DynamicHandleImpl<'a, V, FixedVertexHandle>;

/// Handle to a directed Delaunay edge of a subdivision.
///
/// Use this handle to examine the edge's surroundings. All quad-edge navigation
/// operators are available:
///
/// * [onext](Self::onext) / [oprev](Self::oprev): next / previous edge counter clockwise
///   around the origin
/// * [dnext](Self::dnext) / [dprev](Self::dprev): next / previous edge around the
///   destination
/// * [lnext](Self::lnext) / [lprev](Self::lprev): next / previous edge around the left
///   face
/// * [rnext](Self::rnext) / [rprev](Self::rprev): next / previous edge around the right
///   face
/// * [sym](Self::sym): the reversed edge
/// * [rot](Self::rot): the dual Voronoi edge
///
/// *See also the [handles module](crate::handles).*
pub type DirectedEdgeHandle<'a, V> = DynamicHandleImpl<'a, V, FixedDirectedEdgeHandle>;

/// Handle to an undirected Delaunay edge of a subdivision.
///
/// Returned by [Subdivision::traverse](crate::Subdivision::traverse).
///
/// *See also the [handles module](crate::handles).*
pub type UndirectedEdgeHandle<'a, V> = DynamicHandleImpl<'a, V, FixedQuadEdgeHandle>;

/// Handle to a triangle of a subdivision.
///
/// *See also the [handles module](crate::handles).*
pub type TriangleHandle<'a, V> = DynamicHandleImpl<'a, V, FixedTriangleHandle>;

/// Handle to a directed edge of the Voronoi diagram.
///
/// A Voronoi edge connects the circumcenters of the two triangles adjacent to its dual
/// Delaunay edge. It points from the triangle on the Delaunay edge's right side to the
/// triangle on its left side.
pub type DirectedVoronoiEdgeHandle<'a, V> =
    DynamicHandleImpl<'a, V, FixedDirectedVoronoiEdgeHandle>;

/// An end point of a Voronoi edge.
///
/// Returned by [DirectedVoronoiEdgeHandle::from] and [DirectedVoronoiEdgeHandle::to].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoronoiVertex {
    /// The circumcenter of an inner triangle.
    Inner(Point2<f64>),

    /// A vertex at infinity.
    ///
    /// Voronoi edges that are dual to a convex hull edge are rays. The contained vector
    /// points from the hull edge towards the outside and is perpendicular to it. It is
    /// not normalized.
    Outer(Point2<f64>),
}

impl VoronoiVertex {
    /// Returns the circumcenter of an inner Voronoi vertex.
    pub fn position(&self) -> Option<Point2<f64>> {
        match self {
            VoronoiVertex::Inner(position) => Some(*position),
            VoronoiVertex::Outer(_) => None,
        }
    }

    /// Returns the outward direction of an outer Voronoi vertex.
    pub fn direction(&self) -> Option<Point2<f64>> {
        match self {
            VoronoiVertex::Inner(_) => None,
            VoronoiVertex::Outer(direction) => Some(*direction),
        }
    }
}
