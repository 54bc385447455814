use super::super::math::{self, Circle, InsertionError, PointProjection};
use super::iterators::{CircularIterator, NextBackFn};
use super::public_handles::*;
use crate::{HasPosition, LineSideInfo, Point2};

// Debug implementations
impl<'a, V> std::fmt::Debug for VertexHandle<'a, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "VertexHandle({:?})", self.handle.index())
    }
}

impl<'a, V> std::fmt::Debug for DirectedEdgeHandle<'a, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "DirectedEdgeHandle - id: {:?} ({:?} -> {:?})",
            self.handle,
            self.from().fix().index(),
            self.to().fix().index()
        )
    }
}

impl<'a, V> std::fmt::Debug for UndirectedEdgeHandle<'a, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let [v0, v1] = self.vertices();
        write!(
            f,
            "UndirectedEdgeHandle - id: {:?} ({:?} <-> {:?})",
            self.handle,
            v0.fix().index(),
            v1.fix().index(),
        )
    }
}

impl<'a, V> std::fmt::Debug for TriangleHandle<'a, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let [v0, v1, v2] = self.vertices();
        write!(
            f,
            "TriangleHandle ({:?}, {:?}, {:?})",
            v0.fix().index(),
            v1.fix().index(),
            v2.fix().index(),
        )
    }
}

impl<'a, V> std::fmt::Debug for DirectedVoronoiEdgeHandle<'a, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "DirectedVoronoiEdgeHandle - id: {:?}", self.handle.dual)
    }
}

impl<'a, V> VertexHandle<'a, V> {
    /// Returns the index of this vertex in insertion order.
    pub fn index(&self) -> usize {
        self.handle.index()
    }

    /// Returns the data associated with this vertex.
    pub fn data(&self) -> &'a V {
        self.store.vertex_data(self.handle)
    }

    /// Returns an outgoing edge of this vertex.
    ///
    /// If the vertex has multiple outgoing edges, any of them is returned.
    pub fn out_edge(&self) -> Option<DirectedEdgeHandle<'a, V>> {
        self.store
            .out_edge(self.handle)
            .map(|handle| DirectedEdgeHandle::new(self.store, handle))
    }

    /// Returns all directed edges going out of this vertex.
    ///
    /// The edges are returned in counter clockwise order (following `onext`), beginning
    /// at an arbitrary edge. The iterator implements `DoubleEndedIterator`, allowing
    /// traversal in clockwise order.
    pub fn out_edges(&self) -> CircularIterator<'a, V, OnextNextBackFn> {
        match self.out_edge() {
            Some(edge) => CircularIterator::new(edge),
            None => CircularIterator::new_empty(),
        }
    }
}

impl<'a, V> AsRef<V> for VertexHandle<'a, V> {
    fn as_ref(&self) -> &V {
        self.data()
    }
}

impl<'a, V: HasPosition> VertexHandle<'a, V> {
    /// Returns the position of this vertex.
    pub fn position(&self) -> Point2<V::Scalar> {
        self.data().position()
    }
}

/// Steps counter clockwise around the origin of an edge.
pub struct OnextNextBackFn;

impl NextBackFn for OnextNextBackFn {
    fn next<V>(edge_handle: DirectedEdgeHandle<V>) -> DirectedEdgeHandle<V> {
        edge_handle.onext()
    }

    fn next_back<V>(edge_handle: DirectedEdgeHandle<V>) -> DirectedEdgeHandle<V> {
        edge_handle.oprev()
    }
}

impl<'a, V> DirectedEdgeHandle<'a, V> {
    #[inline]
    fn with(&self, handle: FixedDirectedEdgeHandle) -> Self {
        DirectedEdgeHandle::new(self.store, handle)
    }

    /// Returns the edge's origin vertex.
    pub fn from(&self) -> VertexHandle<'a, V> {
        VertexHandle::new(self.store, self.store.org(self.handle))
    }

    /// Returns the edge's destination vertex.
    pub fn to(&self) -> VertexHandle<'a, V> {
        VertexHandle::new(self.store, self.store.dest(self.handle))
    }

    /// Returns the edge's origin and destination vertex.
    pub fn vertices(&self) -> [VertexHandle<'a, V>; 2] {
        [self.from(), self.to()]
    }

    /// Returns the same edge pointing in the opposite direction.
    pub fn sym(&self) -> Self {
        self.with(self.handle.sym())
    }

    /// Returns the next edge counter clockwise around the origin.
    pub fn onext(&self) -> Self {
        self.with(self.store.onext(self.handle))
    }

    /// Returns the next edge clockwise around the origin.
    pub fn oprev(&self) -> Self {
        self.with(self.store.oprev(self.handle))
    }

    /// Returns the next edge counter clockwise around the destination.
    pub fn dnext(&self) -> Self {
        self.with(self.store.dnext(self.handle))
    }

    /// Returns the next edge clockwise around the destination.
    pub fn dprev(&self) -> Self {
        self.with(self.store.dprev(self.handle))
    }

    /// Returns the next edge counter clockwise around the left face.
    ///
    /// Its origin is this edge's destination.
    pub fn lnext(&self) -> Self {
        self.with(self.store.lnext(self.handle))
    }

    /// Returns the previous edge around the left face.
    ///
    /// Its destination is this edge's origin.
    pub fn lprev(&self) -> Self {
        self.with(self.store.lprev(self.handle))
    }

    /// Returns the next edge around the right face.
    pub fn rnext(&self) -> Self {
        self.with(self.store.rnext(self.handle))
    }

    /// Returns the previous edge around the right face.
    pub fn rprev(&self) -> Self {
        self.with(self.store.rprev(self.handle))
    }

    /// Returns the dual Voronoi edge.
    ///
    /// It crosses this edge from right to left.
    pub fn rot(&self) -> DirectedVoronoiEdgeHandle<'a, V> {
        DirectedVoronoiEdgeHandle::new(
            self.store,
            FixedDirectedVoronoiEdgeHandle {
                dual: self.handle.rot(),
            },
        )
    }

    /// Returns the dual Voronoi edge crossing this edge from left to right.
    pub fn inv_rot(&self) -> DirectedVoronoiEdgeHandle<'a, V> {
        self.sym().rot()
    }

    /// Converts this directed edge into an undirected edge.
    pub fn as_undirected(&self) -> UndirectedEdgeHandle<'a, V> {
        UndirectedEdgeHandle::new(self.store, self.handle.quad_edge())
    }
}

impl<'a, V: HasPosition> DirectedEdgeHandle<'a, V> {
    /// Returns the positions of the edge's origin and destination.
    pub fn positions(&self) -> [Point2<V::Scalar>; 2] {
        [self.from().position(), self.to().position()]
    }

    /// Returns the squared length of this edge.
    pub fn length_2(&self) -> V::Scalar {
        let [from, to] = self.positions();
        from.distance_2(to)
    }

    /// Identifies on which side of this edge a point lies.
    pub fn side_query(&self, query_point: Point2<V::Scalar>) -> LineSideInfo {
        math::side_query(
            self.store.org_position(self.handle),
            self.store.dest_position(self.handle),
            query_point.to_f64(),
        )
    }

    /// Projects a point onto the line through this edge.
    pub fn project_point(&self, query_point: Point2<V::Scalar>) -> PointProjection {
        math::project_point(
            self.store.org_position(self.handle),
            self.store.dest_position(self.handle),
            query_point.to_f64(),
        )
    }

    /// Returns the squared distance of a point to this edge.
    pub fn distance_2(&self, query_point: Point2<V::Scalar>) -> f64 {
        math::distance_2(
            self.store.org_position(self.handle),
            self.store.dest_position(self.handle),
            query_point.to_f64(),
        )
    }

    /// Returns `true` if the unbounded face lies on the left side of this edge.
    pub fn is_outer_edge(&self) -> bool {
        self.store.left_face_is_outer(self.handle)
    }

    /// Returns `true` if this edge is a convex hull edge, regardless of its direction.
    pub fn is_part_of_convex_hull(&self) -> bool {
        self.is_outer_edge() || self.sym().is_outer_edge()
    }

    /// Returns the triangle on the left side of this edge, `None` for the unbounded face.
    pub fn face(&self) -> Option<TriangleHandle<'a, V>> {
        if self.is_outer_edge() {
            None
        } else {
            let edge = self.store.canonical_face_edge(self.handle);
            Some(TriangleHandle::new(self.store, FixedTriangleHandle { edge }))
        }
    }

    /// Returns the circumcircle of the triangle on the left side of this edge.
    ///
    /// Returns `Ok(None)` if the left face is the unbounded face and
    /// [InsertionError::DegenerateGeometry] if the triangle is too flat for a
    /// circumcircle to be computed.
    pub fn circumcircle(&self) -> Result<Option<Circle>, InsertionError> {
        match self.face() {
            Some(face) => face.circumcircle().map(Some),
            None => Ok(None),
        }
    }
}

impl<'a, V> UndirectedEdgeHandle<'a, V> {
    /// Returns the directed edge with rotation 0 of this undirected edge.
    pub fn as_directed(&self) -> DirectedEdgeHandle<'a, V> {
        DirectedEdgeHandle::new(self.store, self.handle.as_directed())
    }

    /// Returns the edge's two vertices. Their order is arbitrary.
    pub fn vertices(&self) -> [VertexHandle<'a, V>; 2] {
        self.as_directed().vertices()
    }

    /// Returns the dual Voronoi edge.
    pub fn as_voronoi_edge(&self) -> DirectedVoronoiEdgeHandle<'a, V> {
        self.as_directed().rot()
    }
}

impl<'a, V: HasPosition> UndirectedEdgeHandle<'a, V> {
    /// Returns the positions of the edge's vertices.
    pub fn positions(&self) -> [Point2<V::Scalar>; 2] {
        self.as_directed().positions()
    }

    /// Returns the squared length of this edge.
    pub fn length_2(&self) -> V::Scalar {
        self.as_directed().length_2()
    }

    /// Returns the squared distance of a point to this edge.
    pub fn distance_2(&self, query_point: Point2<V::Scalar>) -> f64 {
        self.as_directed().distance_2(query_point)
    }

    /// Returns `true` if this edge is part of the convex hull.
    pub fn is_part_of_convex_hull(&self) -> bool {
        self.as_directed().is_part_of_convex_hull()
    }
}

impl<'a, V> TriangleHandle<'a, V> {
    /// Returns the edge identifying this triangle. The triangle lies on its left side.
    pub fn adjacent_edge(&self) -> DirectedEdgeHandle<'a, V> {
        DirectedEdgeHandle::new(self.store, self.handle.edge)
    }

    /// Returns the three edges that have this triangle on their left side in counter
    /// clockwise order.
    pub fn adjacent_edges(&self) -> [DirectedEdgeHandle<'a, V>; 3] {
        let e0 = self.adjacent_edge();
        let e1 = e0.lnext();
        let e2 = e1.lnext();
        [e0, e1, e2]
    }

    /// Returns the triangle's vertices in counter clockwise order.
    pub fn vertices(&self) -> [VertexHandle<'a, V>; 3] {
        let [e0, e1, e2] = self.adjacent_edges();
        [e0.from(), e1.from(), e2.from()]
    }
}

impl<'a, V: HasPosition> TriangleHandle<'a, V> {
    /// Returns the positions of the triangle's vertices in counter clockwise order.
    pub fn positions(&self) -> [Point2<V::Scalar>; 3] {
        let [v0, v1, v2] = self.vertices();
        [v0.position(), v1.position(), v2.position()]
    }

    fn positions_f64(&self) -> [Point2<f64>; 3] {
        let [p0, p1, p2] = self.positions();
        [p0.to_f64(), p1.to_f64(), p2.to_f64()]
    }

    /// Returns the area of this triangle.
    pub fn area(&self) -> f64 {
        math::triangle_area(self.positions_f64())
    }

    /// Returns the circle through the triangle's vertices.
    ///
    /// Returns [InsertionError::DegenerateGeometry] if the vertices are (numerically)
    /// collinear.
    pub fn circumcircle(&self) -> Result<Circle, InsertionError> {
        let [p0, p1, p2] = self.positions_f64();
        math::circumcircle(p0, p1, p2)
    }
}

impl<'a, V> DirectedVoronoiEdgeHandle<'a, V> {
    /// Returns the Delaunay edge this Voronoi edge is dual to.
    ///
    /// The Voronoi edge crosses it from right to left.
    pub fn as_delaunay_edge(&self) -> DirectedEdgeHandle<'a, V> {
        DirectedEdgeHandle::new(self.store, self.handle.dual.inv_rot())
    }

    /// Returns the same Voronoi edge pointing in the opposite direction.
    pub fn sym(&self) -> Self {
        DirectedVoronoiEdgeHandle::new(
            self.store,
            FixedDirectedVoronoiEdgeHandle {
                dual: self.handle.dual.sym(),
            },
        )
    }

    /// Rotates back into the primal subdivision.
    ///
    /// `edge.rot().rot()` is `edge.sym()`.
    pub fn rot(&self) -> DirectedEdgeHandle<'a, V> {
        DirectedEdgeHandle::new(self.store, self.handle.dual.rot())
    }

    /// Returns the next Voronoi edge counter clockwise around this edge's origin.
    pub fn onext(&self) -> Self {
        DirectedVoronoiEdgeHandle::new(
            self.store,
            FixedDirectedVoronoiEdgeHandle {
                dual: self.store.onext(self.handle.dual),
            },
        )
    }
}

impl<'a, V: HasPosition> DirectedVoronoiEdgeHandle<'a, V> {
    /// The Voronoi vertex this edge starts at.
    ///
    /// This is the circumcenter of the triangle right of the dual Delaunay edge.
    pub fn from(&self) -> Result<VoronoiVertex, InsertionError> {
        voronoi_vertex_left_of(self.as_delaunay_edge().sym())
    }

    /// The Voronoi vertex this edge points to.
    ///
    /// This is the circumcenter of the triangle left of the dual Delaunay edge.
    pub fn to(&self) -> Result<VoronoiVertex, InsertionError> {
        voronoi_vertex_left_of(self.as_delaunay_edge())
    }

    /// Returns both end points of this Voronoi edge.
    pub fn vertices(&self) -> Result<[VoronoiVertex; 2], InsertionError> {
        Ok([self.from()?, self.to()?])
    }
}

fn voronoi_vertex_left_of<V: HasPosition>(
    edge: DirectedEdgeHandle<V>,
) -> Result<VoronoiVertex, InsertionError> {
    match edge.circumcircle()? {
        Some(circle) => Ok(VoronoiVertex::Inner(circle.center)),
        None => {
            let from = edge.store.org_position(edge.handle);
            let to = edge.store.dest_position(edge.handle);
            let dir = to.sub(from);
            Ok(VoronoiVertex::Outer(Point2::new(-dir.y, dir.x)))
        }
    }
}
