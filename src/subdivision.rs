use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace, warn};

use crate::delaunay_core::edge_algebra::{
    connect, delete_edge, flip, make_edge, splice, split_hull_edge,
};
use crate::delaunay_core::iterators::{
    HullIterator, TriangleIterator, UndirectedEdgeTraversal, VertexIterator,
};
use crate::delaunay_core::math;
use crate::delaunay_core::QuadEdgeStore;
use crate::handles::{DirectedEdgeHandle, FixedDirectedEdgeHandle, FixedVertexHandle, VertexHandle};
use crate::{HasPosition, InsertionError, Point2, SubdivisionParameters};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Describes where a position lies relative to a subdivision.
///
/// Returned by [Subdivision::locate].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PositionInTriangulation {
    /// The position coincides with an existing vertex, taking the configured tolerance
    /// into account.
    OnVertex(FixedVertexHandle),

    /// The position lies inside or on the boundary of the triangle left of the given
    /// edge.
    InsideFace(FixedDirectedEdgeHandle),

    /// The position lies outside the convex hull. The given edge is a convex hull edge
    /// with the unbounded face on its left side. The position is not on its right side.
    ///
    /// *Note*: The given edge is *not* necessarily the *closest* edge to the position.
    OutsideOfConvexHull(FixedDirectedEdgeHandle),
}

/// The result of classifying a new site. Computed before the subdivision is modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertionPlan {
    Duplicate(FixedVertexHandle),
    Inside(FixedDirectedEdgeHandle),
    OnInteriorEdge(FixedDirectedEdgeHandle),
    /// The edge lies on the convex hull and has its triangle on the left side.
    OnHullEdge(FixedDirectedEdgeHandle),
    /// The edge has the unbounded face on its left side and strictly sees the new site.
    Outside(FixedDirectedEdgeHandle),
}

type StepFn<V> = fn(&QuadEdgeStore<V>, FixedDirectedEdgeHandle) -> FixedDirectedEdgeHandle;

/// An incrementally built planar Delaunay triangulation.
///
/// The subdivision is stored as a quad-edge structure: every undirected edge is
/// represented together with its dual Voronoi edge. A subdivision is seeded with a
/// triangle and grows by one [site](Self::insert_site) at a time. After every
/// insertion, no vertex lies strictly inside the circumcircle of any triangle.
///
/// `V` is the vertex type. Any type implementing [HasPosition] can be used, the default
/// is [Point2<f64>].
///
/// # Example
///
/// ```
/// use quadedge_delaunay::{InsertionError, Point2, Subdivision};
///
/// # fn main() -> Result<(), InsertionError> {
/// let mut subdivision = Subdivision::new(
///     Point2::new(0.0, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(5.0, 10.0),
/// )?;
/// subdivision.insert_site(Point2::new(5.0, 3.0))?;
///
/// assert_eq!(subdivision.num_vertices(), 4);
/// assert_eq!(subdivision.num_triangles(), 3);
///
/// for edge in subdivision.traverse() {
///     let [from, to] = edge.positions();
///     println!("{:?} -> {:?}", from, to);
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Tolerance
///
/// Two positions that are at most [SubdivisionParameters::tolerance] apart refer to the
/// same vertex. Inserting such a position again returns the existing vertex and leaves
/// the subdivision unchanged. The circumcircle test does not use any tolerance.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Subdivision<V = Point2<f64>> {
    store: QuadEdgeStore<V>,
    starting_edge: FixedDirectedEdgeHandle,
    parameters: SubdivisionParameters,
}

fn right_of<V: HasPosition>(
    store: &QuadEdgeStore<V>,
    x: Point2<f64>,
    e: FixedDirectedEdgeHandle,
) -> bool {
    math::orientation(x, store.dest_position(e), store.org_position(e)) > 0.0
}

fn left_of<V: HasPosition>(
    store: &QuadEdgeStore<V>,
    x: Point2<f64>,
    e: FixedDirectedEdgeHandle,
) -> bool {
    math::orientation(x, store.org_position(e), store.dest_position(e)) > 0.0
}

/// Checks the edge `e` that lies opposite of `x` against the apex on its right side.
///
/// Both triangles created by flipping `e` must be strictly counter clockwise. The circle
/// test is exact, so the orientation checks only restate it.
fn should_flip<V: HasPosition>(
    store: &QuadEdgeStore<V>,
    e: FixedDirectedEdgeHandle,
    x: Point2<f64>,
) -> bool {
    let from = store.org_position(e);
    let to = store.dest_position(e);
    let apex = store.dest_position(store.oprev(e));
    right_of(store, apex, e)
        && math::in_circle(from, apex, to, x)
        && math::orientation(from, apex, x) > 0.0
        && math::orientation(apex, to, x) > 0.0
}

impl<V: HasPosition> Subdivision<V> {
    /// Creates a subdivision consisting of a single triangle.
    ///
    /// The corners may be given in any orientation. Returns
    /// [InsertionError::DegenerateInitialTriangle] if the three corners are collinear or
    /// if two of them coincide.
    pub fn new(a: V, b: V, c: V) -> Result<Self, InsertionError> {
        Self::with_parameters(a, b, c, SubdivisionParameters::default())
    }

    /// Creates a subdivision consisting of a single triangle with custom parameters.
    ///
    /// A seed triangle is rejected if any of its altitudes is not larger than the
    /// configured tolerance.
    pub fn with_parameters(
        a: V,
        b: V,
        c: V,
        parameters: SubdivisionParameters,
    ) -> Result<Self, InsertionError> {
        for vertex in [&a, &b, &c] {
            math::validate_vertex(vertex)?;
        }

        let positions = [
            a.position().to_f64(),
            b.position().to_f64(),
            c.position().to_f64(),
        ];
        if math::smallest_altitude(positions) <= parameters.tolerance() {
            return Err(InsertionError::DegenerateInitialTriangle);
        }

        let mut store = QuadEdgeStore::default();
        let a = store.insert_vertex(a);
        let b = store.insert_vertex(b);
        let c = store.insert_vertex(c);

        let ea = make_edge(&mut store, a, b);
        let eb = make_edge(&mut store, b, c);
        splice(&mut store, ea.sym(), eb);
        let ec = make_edge(&mut store, c, a);
        splice(&mut store, eb.sym(), ec);
        splice(&mut store, ec.sym(), ea);

        Ok(Self {
            store,
            starting_edge: ea,
            parameters,
        })
    }

    /// Returns the parameters this subdivision was created with.
    pub fn parameters(&self) -> &SubdivisionParameters {
        &self.parameters
    }

    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.store.num_vertices()
    }

    /// Returns the number of undirected Delaunay edges.
    pub fn num_undirected_edges(&self) -> usize {
        self.store.num_undirected_edges()
    }

    /// Returns the number of triangles, not counting the unbounded face.
    pub fn num_triangles(&self) -> usize {
        // Euler's formula: V - E + (triangles + 1) = 2
        self.num_undirected_edges() + 1 - self.num_vertices()
    }

    /// Returns a handle to the anchor edge.
    ///
    /// Every edge of the subdivision can be reached from this edge. Point location walks
    /// start here. The anchor moves with every insertion.
    pub fn starting_edge(&self) -> DirectedEdgeHandle<V> {
        DirectedEdgeHandle::new(&self.store, self.starting_edge)
    }

    /// Returns a handle to a vertex.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this subdivision.
    pub fn vertex(&self, handle: FixedVertexHandle) -> VertexHandle<V> {
        assert!(handle.index() < self.num_vertices(), "Vertex handle out of range");
        VertexHandle::new(&self.store, handle)
    }

    /// Returns a handle to a directed Delaunay edge.
    ///
    /// Returns `None` if the edge has been deleted in the meantime (for example by an
    /// insertion onto it) or if the handle refers to a dual edge.
    pub fn directed_edge(
        &self,
        handle: FixedDirectedEdgeHandle,
    ) -> Option<DirectedEdgeHandle<V>> {
        if handle.is_primal() && self.store.is_valid(handle.quad_edge()) {
            Some(DirectedEdgeHandle::new(&self.store, handle))
        } else {
            None
        }
    }

    /// Iterates over all vertices in insertion order.
    pub fn vertices(&self) -> VertexIterator<V> {
        VertexIterator::new(&self.store)
    }

    /// Iterates over all triangles. The unbounded face is not included.
    pub fn triangles(&self) -> TriangleIterator<V> {
        TriangleIterator::new(&self.store)
    }

    /// Visits every undirected edge exactly once, depth first from the anchor edge.
    ///
    /// Each call creates an independent traversal.
    pub fn traverse(&self) -> UndirectedEdgeTraversal<V> {
        UndirectedEdgeTraversal::new(&self.store, self.starting_edge)
    }

    /// Iterates over the convex hull edges in clockwise order.
    ///
    /// Every returned edge has the unbounded face on its left side.
    pub fn convex_hull(&self) -> HullIterator<V> {
        HullIterator::new(&self.store)
    }

    /// Returns the number of convex hull edges, including edges between collinear hull
    /// vertices.
    pub fn convex_hull_size(&self) -> usize {
        self.convex_hull().count()
    }

    /// Locates a position by walking from the anchor edge.
    ///
    /// Returns [InsertionError::DegenerateGeometry] if the walk does not terminate within
    /// [SubdivisionParameters::max_locate_steps] steps and one of
    /// [InsertionError::NAN], [InsertionError::TooLarge] or [InsertionError::TooSmall]
    /// for invalid coordinates.
    pub fn locate(
        &self,
        position: Point2<V::Scalar>,
    ) -> Result<PositionInTriangulation, InsertionError> {
        math::validate_vertex(&position)?;
        self.locate_position(position.to_f64())
    }

    fn locate_position(&self, x: Point2<f64>) -> Result<PositionInTriangulation, InsertionError> {
        use PositionInTriangulation::*;

        let store = &self.store;
        let tolerance = self.parameters.tolerance();
        let max_steps = self
            .parameters
            .max_locate_steps()
            .unwrap_or_else(|| store.num_directed_edges() + 2);

        let mut e = self.starting_edge;
        for _ in 0..max_steps {
            if math::coincide(x, store.org_position(e), tolerance) {
                return Ok(OnVertex(store.org(e)));
            }
            if math::coincide(x, store.dest_position(e), tolerance) {
                return Ok(OnVertex(store.dest(e)));
            }

            if right_of(store, x, e) {
                e = e.sym();
                continue;
            }

            if !left_of(store, store.dest_position(store.onext(e)), e) {
                return Ok(OutsideOfConvexHull(e));
            }

            let next = store.onext(e);
            if !right_of(store, x, next) {
                e = next;
                continue;
            }

            let prev = store.dprev(e);
            if !right_of(store, x, prev) {
                e = prev;
                continue;
            }

            return Ok(InsideFace(e));
        }

        warn!(x = x.x, y = x.y, max_steps, "Point location did not terminate");
        Err(InsertionError::DegenerateGeometry)
    }

    /// Inserts a new site and restores the Delaunay property.
    ///
    /// Returns the handle of the new vertex. If the site coincides with an existing
    /// vertex, the subdivision is left unchanged and the existing vertex is returned.
    ///
    /// Sites lying on an edge split that edge. Sites outside of the convex hull extend
    /// it.
    ///
    /// On error, the subdivision is left unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use quadedge_delaunay::{InsertionError, Point2, Subdivision};
    ///
    /// # fn main() -> Result<(), InsertionError> {
    /// let mut subdivision = Subdivision::new(
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(10.0, 0.0),
    ///     Point2::new(5.0, 10.0),
    /// )?;
    /// let vertex = subdivision.insert_site(Point2::new(5.0, -5.0))?;
    /// assert_eq!(subdivision.insert_site(Point2::new(5.0, -5.0))?, vertex);
    /// assert_eq!(subdivision.convex_hull_size(), 4);
    ///
    /// let error = subdivision.insert_site(Point2::new(f64::NAN, 1.0));
    /// assert_eq!(error, Err(InsertionError::NAN));
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert_site(&mut self, vertex: V) -> Result<FixedVertexHandle, InsertionError> {
        math::validate_vertex(&vertex)?;
        let x = vertex.position().to_f64();

        let plan = self.plan_insertion(x)?;
        if let InsertionPlan::Duplicate(existing) = plan {
            debug!(vertex = existing.index(), "Site coincides with an existing vertex");
            return Ok(existing);
        }

        let new_vertex = self.store.insert_vertex(vertex);
        let flips = match plan {
            InsertionPlan::Inside(edge) => {
                let flips = self.insert_into_fan(edge, new_vertex, x, false);
                debug!(flips, "Inserted site inside a triangle");
                flips
            }
            InsertionPlan::OnInteriorEdge(edge) => {
                let edge = self.store.oprev(edge);
                let doomed = self.store.onext(edge);
                delete_edge(&mut self.store, doomed);
                let flips = self.insert_into_fan(edge, new_vertex, x, false);
                debug!(flips, "Inserted site on an interior edge");
                flips
            }
            InsertionPlan::OnHullEdge(edge) => {
                let flips = self.insert_on_hull_edge(edge, new_vertex, x);
                debug!(flips, "Inserted site on a convex hull edge");
                flips
            }
            InsertionPlan::Outside(edge) => {
                let flips = self.insert_into_fan(edge, new_vertex, x, true);
                debug!(flips, "Inserted site outside of the convex hull");
                flips
            }
            InsertionPlan::Duplicate(_) => unreachable!(),
        };
        trace!(
            vertices = self.num_vertices(),
            edges = self.num_undirected_edges(),
            flips,
            "Insertion finished"
        );
        Ok(new_vertex)
    }

    fn plan_insertion(&self, x: Point2<f64>) -> Result<InsertionPlan, InsertionError> {
        match self.locate_position(x)? {
            PositionInTriangulation::OnVertex(vertex) => Ok(InsertionPlan::Duplicate(vertex)),
            PositionInTriangulation::InsideFace(edge) => self.classify_inside(edge, x),
            PositionInTriangulation::OutsideOfConvexHull(edge) => self.classify_outside(edge, x),
        }
    }

    fn classify_inside(
        &self,
        e: FixedDirectedEdgeHandle,
        x: Point2<f64>,
    ) -> Result<InsertionPlan, InsertionError> {
        let store = &self.store;
        let tolerance = self.parameters.tolerance();

        let apex = store.dest(store.onext(e));
        if math::coincide(x, store.position(apex), tolerance) {
            return Ok(InsertionPlan::Duplicate(apex));
        }

        let from = store.org_position(e);
        let to = store.dest_position(e);
        if !math::on_segment(x, from, to, tolerance) {
            return Ok(InsertionPlan::Inside(e));
        }

        // Sites within tolerance of an edge but not exactly on it become the corner of a
        // thin, strictly counter clockwise triangle. Legalization removes the edge if the
        // empty circle property requires it.
        let on_line = math::orientation(from, to, x) == 0.0;

        let left_is_outer = store.left_face_is_outer(e);
        if left_is_outer || store.left_face_is_outer(e.sym()) {
            return if on_line {
                self.plan_hull_split(if left_is_outer { e.sym() } else { e }, x)
            } else {
                Ok(InsertionPlan::Inside(e))
            };
        }

        let opposite_apex = store.dest(store.oprev(e));
        if math::coincide(x, store.position(opposite_apex), tolerance) {
            return Ok(InsertionPlan::Duplicate(opposite_apex));
        }

        if on_line {
            Ok(InsertionPlan::OnInteriorEdge(e))
        } else {
            Ok(InsertionPlan::Inside(e))
        }
    }

    /// Checks that splitting the hull edge `e` at `x` creates two strictly counter
    /// clockwise triangles. The inner face must lie left of `e`.
    fn plan_hull_split(
        &self,
        e: FixedDirectedEdgeHandle,
        x: Point2<f64>,
    ) -> Result<InsertionPlan, InsertionError> {
        let store = &self.store;
        let from = store.org_position(e);
        let to = store.dest_position(e);
        let apex = store.dest_position(store.lnext(e));
        if math::orientation(from, x, apex) > 0.0 && math::orientation(x, to, apex) > 0.0 {
            Ok(InsertionPlan::OnHullEdge(e))
        } else {
            warn!(x = x.x, y = x.y, "Splitting the convex hull edge creates a flat triangle");
            Err(InsertionError::DegenerateGeometry)
        }
    }

    /// Classifies a site that lies outside of the convex hull or on its boundary.
    ///
    /// If the site is collinear with the located hull edge, the chain of collinear hull
    /// edges is walked in both directions until either an edge containing the site or an
    /// edge that strictly sees the site is found.
    fn classify_outside(
        &self,
        e: FixedDirectedEdgeHandle,
        x: Point2<f64>,
    ) -> Result<InsertionPlan, InsertionError> {
        let store = &self.store;
        let tolerance = self.parameters.tolerance();

        let steps: [StepFn<V>; 2] = [QuadEdgeStore::lnext, QuadEdgeStore::lprev];
        for step in steps {
            let mut current = e;
            for _ in 0..store.num_directed_edges() {
                let from = store.org_position(current);
                let to = store.dest_position(current);
                let orientation = math::orientation(from, to, x);
                if orientation > 0.0 {
                    return Ok(InsertionPlan::Outside(current));
                }
                if orientation < 0.0 {
                    break;
                }
                if math::coincide(x, from, tolerance) {
                    return Ok(InsertionPlan::Duplicate(store.org(current)));
                }
                if math::coincide(x, to, tolerance) {
                    return Ok(InsertionPlan::Duplicate(store.dest(current)));
                }
                if math::on_segment(x, from, to, tolerance) {
                    return self.plan_hull_split(current.sym(), x);
                }
                current = step(store, current);
            }
        }

        warn!(x = x.x, y = x.y, "No convex hull edge is visible from the new site");
        Err(InsertionError::DegenerateGeometry)
    }

    /// Connects the new vertex to all vertices of the face left of `e` and legalizes the
    /// new triangles. Returns the number of flips.
    ///
    /// For sites outside of the convex hull, the face left of `e` is the unbounded face.
    /// The fan then only covers the part of the hull that is visible from `x`.
    fn insert_into_fan(
        &mut self,
        mut e: FixedDirectedEdgeHandle,
        new_vertex: FixedVertexHandle,
        x: Point2<f64>,
        outside: bool,
    ) -> usize {
        let store = &mut self.store;

        let first = store.org(e);
        let mut base = make_edge(store, first, new_vertex);
        splice(store, base, e);
        let mut start = base;

        if outside {
            loop {
                base = connect(store, e, base.sym());
                e = store.oprev(base);
                if !right_of(store, store.dest_position(e), base) {
                    break;
                }
            }
            e = store.onext(base).sym();

            while left_of(store, store.dest_position(store.onext(start)), start) {
                let hull_edge = store.onext(start).sym();
                start = connect(store, start, hull_edge).sym();
            }
        } else {
            loop {
                base = connect(store, e, base.sym());
                e = store.oprev(base);
                if store.lnext(e) == start {
                    break;
                }
            }
        }

        self.starting_edge = start;
        self.legalize_fan(e, x, start)
    }

    /// Lawson flips around the new vertex, walking the edges opposite of `x` clockwise
    /// until the walk returns to `start`.
    fn legalize_fan(
        &mut self,
        mut e: FixedDirectedEdgeHandle,
        x: Point2<f64>,
        start: FixedDirectedEdgeHandle,
    ) -> usize {
        let store = &mut self.store;
        let mut flips = 0;
        loop {
            if should_flip(store, e, x) {
                flip(store, e);
                flips += 1;
                e = store.oprev(e);
            } else if store.onext(e) == start {
                return flips;
            } else {
                e = store.lprev(store.onext(e));
            }
        }
    }

    fn insert_on_hull_edge(
        &mut self,
        e: FixedDirectedEdgeHandle,
        new_vertex: FixedVertexHandle,
        x: Point2<f64>,
    ) -> usize {
        let store = &mut self.store;
        let [bc, ca] = split_hull_edge(store, e, new_vertex);
        self.starting_edge = e;

        let mut flips = 0;
        let mut stack: SmallVec<[FixedDirectedEdgeHandle; 16]> = smallvec![bc, ca];
        while let Some(edge) = stack.pop() {
            if store.left_face_is_outer(edge.sym()) {
                continue;
            }
            if should_flip(store, edge, x) {
                let e1 = store.lnext(edge.sym());
                let e2 = store.lprev(edge.sym());
                flip(store, edge);
                flips += 1;
                stack.push(e1);
                stack.push(e2);
            }
        }
        flips
    }

    /// Checks all structural invariants and the Delaunay property. Panics on failure.
    #[cfg(test)]
    pub(crate) fn sanity_check(&self) {
        use hashbrown::HashSet;

        let store = &self.store;
        assert!(store.is_valid(self.starting_edge.quad_edge()));
        assert_eq!(store.quad_edges().count(), store.num_undirected_edges());
        assert!(store.num_slots() >= store.num_undirected_edges());

        for quad_edge in store.quad_edges() {
            for rotation in 0..4 {
                let e = quad_edge.directed(rotation);
                assert_eq!(store.onext(store.oprev(e)), e);
                assert_eq!(store.oprev(store.onext(e)), e);
                assert_eq!(store.lnext(store.lprev(e)), e);
                assert!(store.is_valid(store.onext(e).quad_edge()));
            }

            for e in [quad_edge.directed(0), quad_edge.directed(2)] {
                assert_ne!(store.org(e), store.dest(e));
                assert_eq!(store.org(store.onext(e)), store.org(e));
                if store.left_face_is_outer(e) {
                    continue;
                }
                let second = store.lnext(e);
                let third = store.lnext(second);
                assert_eq!(store.lnext(third), e);
                assert!(
                    math::orientation(
                        store.org_position(e),
                        store.dest_position(e),
                        store.dest_position(second)
                    ) > 0.0
                );
            }
        }

        for vertex in self.vertices() {
            let out_edge = vertex
                .out_edge()
                .expect("Every vertex must have an out edge");
            assert_eq!(out_edge.from(), vertex);
            assert!(store.is_valid(out_edge.fix().quad_edge()));
        }

        let hull: Vec<_> = self.convex_hull().collect();
        let hull_vertices: HashSet<_> = hull.iter().map(|edge| edge.from().fix()).collect();
        assert_eq!(hull_vertices.len(), hull.len());
        for (edge, next) in hull.iter().zip(hull.iter().cycle().skip(1)) {
            assert_eq!(edge.to().fix(), next.from().fix());
            let [from, to] = edge.positions();
            assert!(
                math::orientation(from.to_f64(), to.to_f64(), next.to().position().to_f64())
                    <= 0.0,
                "The convex hull bends inwards at {:?}",
                next.from()
            );
        }
        assert_eq!(self.num_triangles(), 2 * self.num_vertices() - hull.len() - 2);
        assert_eq!(self.triangles().count(), self.num_triangles());
        assert_eq!(self.traverse().count(), self.num_undirected_edges());

        for triangle in self.triangles() {
            assert!(
                triangle.circumcircle().is_ok(),
                "Inner triangles must not be degenerate"
            );
            let [a, b, c] = triangle.positions().map(|position| position.to_f64());
            let own: HashSet<_> = triangle.vertices().iter().map(|v| v.fix()).collect();
            for vertex in self.vertices() {
                if own.contains(&vertex.fix()) {
                    continue;
                }
                assert!(
                    !math::in_circle(a, b, c, vertex.position().to_f64()),
                    "Vertex {:?} lies inside the circumcircle of {:?}",
                    vertex,
                    triangle
                );
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{PositionInTriangulation, Subdivision};
    use crate::test_utilities::{
        decimal_grid, random_points_in_range, random_points_with_seed, shuffled_grid, spiral,
        SEED, SEED2,
    };
    use crate::{InsertionError, Point2, SubdivisionParameters};
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn seed_triangle() -> Subdivision {
        Subdivision::new(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 10.0),
        )
        .unwrap()
    }

    fn enclosing_subdivision(radius: f64) -> Subdivision {
        Subdivision::new(
            Point2::new(-3.0 * radius, -3.0 * radius),
            Point2::new(3.0 * radius, -3.0 * radius),
            Point2::new(0.0, 3.0 * radius),
        )
        .unwrap()
    }

    #[test]
    fn test_seed_triangle() {
        let subdivision = seed_triangle();
        assert_eq!(subdivision.num_vertices(), 3);
        assert_eq!(subdivision.num_undirected_edges(), 3);
        assert_eq!(subdivision.num_triangles(), 1);
        assert_eq!(subdivision.traverse().count(), 3);
        assert_eq!(subdivision.convex_hull_size(), 3);
        subdivision.sanity_check();
    }

    #[test]
    fn test_clockwise_seed_triangle() -> Result<(), InsertionError> {
        let mut subdivision = Subdivision::new(
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 10.0),
            Point2::new(10.0, 0.0),
        )?;
        subdivision.sanity_check();
        subdivision.insert_site(Point2::new(5.0, 3.0))?;
        subdivision.insert_site(Point2::new(5.0, -5.0))?;
        assert_eq!(subdivision.num_triangles(), 4);
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_degenerate_seed_triangle() {
        let collinear = Subdivision::new(
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(10.0, 0.0),
        );
        assert_eq!(
            collinear.unwrap_err(),
            InsertionError::DegenerateInitialTriangle
        );

        let coincident = Subdivision::new(
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(3.0, 0.0),
        );
        assert_eq!(
            coincident.unwrap_err(),
            InsertionError::DegenerateInitialTriangle
        );

        let flat = Subdivision::new(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 1e-8),
        );
        assert_eq!(flat.unwrap_err(), InsertionError::DegenerateInitialTriangle);

        let nan = Subdivision::new(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, f64::NAN),
            Point2::new(5.0, 1.0),
        );
        assert_eq!(nan.unwrap_err(), InsertionError::NAN);
    }

    #[test]
    fn test_insert_inside() -> Result<(), InsertionError> {
        let mut subdivision = seed_triangle();
        let handle = subdivision.insert_site(Point2::new(5.0, 3.0))?;
        assert_eq!(handle.index(), 3);
        assert_eq!(subdivision.num_triangles(), 3);
        assert_eq!(subdivision.num_undirected_edges(), 6);
        assert_eq!(subdivision.convex_hull_size(), 3);
        assert_eq!(subdivision.vertex(handle).out_edges().count(), 3);

        // No flips: the seed edges survive next to the three new spokes
        let mut edges: Vec<_> = subdivision
            .traverse()
            .map(|edge| {
                let [from, to] = edge.vertices();
                let (from, to) = (from.index(), to.index());
                (from.min(to), from.max(to))
            })
            .collect();
        edges.sort();
        assert_eq!(edges, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_outside() -> Result<(), InsertionError> {
        let mut subdivision = seed_triangle();
        let handle = subdivision.insert_site(Point2::new(5.0, -5.0))?;
        assert_eq!(subdivision.convex_hull_size(), 4);
        assert_eq!(subdivision.num_triangles(), 2);
        assert_eq!(subdivision.num_undirected_edges(), 5);
        assert_eq!(subdivision.vertex(handle).out_edges().count(), 2);
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_outside_with_flip() -> Result<(), InsertionError> {
        let mut subdivision = seed_triangle();
        // Lies inside the circumcircle of the seed triangle
        subdivision.insert_site(Point2::new(5.0, -1.0))?;
        assert_eq!(subdivision.num_triangles(), 2);
        subdivision.sanity_check();

        let bottom_edge_survived = subdivision.traverse().any(|edge| {
            let [from, to] = edge.positions();
            from.y == 0.0 && to.y == 0.0
        });
        assert!(!bottom_edge_survived);
        Ok(())
    }

    #[test]
    fn test_insert_duplicates() -> Result<(), InsertionError> {
        let mut subdivision = seed_triangle();
        let inner = subdivision.insert_site(Point2::new(5.0, 3.0))?;
        let edges = subdivision.num_undirected_edges();
        let anchor = subdivision.starting_edge().fix();

        assert_eq!(subdivision.insert_site(Point2::new(5.0, 3.0))?, inner);
        assert_eq!(subdivision.insert_site(Point2::new(5.0 + 1e-7, 3.0))?, inner);
        assert_eq!(subdivision.insert_site(Point2::new(0.0, 0.0))?.index(), 0);
        assert_eq!(subdivision.insert_site(Point2::new(10.0, 1e-7))?.index(), 1);
        assert_eq!(subdivision.insert_site(Point2::new(5.0, 10.0))?.index(), 2);

        assert_eq!(subdivision.num_vertices(), 4);
        assert_eq!(subdivision.num_undirected_edges(), edges);
        assert_eq!(subdivision.starting_edge().fix(), anchor);
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_on_interior_edge() -> Result<(), InsertionError> {
        let mut subdivision = seed_triangle();
        subdivision.insert_site(Point2::new(5.0, 3.0))?;
        // (5.0, 3.0) - (5.0, 10.0) is an interior edge
        subdivision.insert_site(Point2::new(5.0, 6.0))?;
        assert_eq!(subdivision.num_vertices(), 5);
        assert_eq!(subdivision.num_triangles(), 5);
        assert_eq!(subdivision.convex_hull_size(), 3);
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_deleted_edge_becomes_stale() -> Result<(), InsertionError> {
        let mut subdivision = seed_triangle();
        subdivision.insert_site(Point2::new(5.0, 3.0))?;
        let interior = subdivision
            .traverse()
            .find(|edge| {
                let [from, to] = edge.positions();
                from.x == 5.0 && to.x == 5.0
            })
            .map(|edge| edge.as_directed().fix())
            .unwrap();
        assert!(subdivision.directed_edge(interior).is_some());
        assert!(subdivision.directed_edge(interior.rot()).is_none());

        subdivision.insert_site(Point2::new(5.0, 6.0))?;
        assert!(subdivision.directed_edge(interior).is_none());
        assert!(subdivision.directed_edge(interior.sym()).is_none());

        // The released slot is reused by later insertions without aliasing the old handle
        subdivision.insert_site(Point2::new(2.0, 1.0))?;
        assert!(subdivision.directed_edge(interior).is_none());
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_on_hull_edge() -> Result<(), InsertionError> {
        let mut subdivision = seed_triangle();
        subdivision.insert_site(Point2::new(5.0, 0.0))?;
        assert_eq!(subdivision.num_vertices(), 4);
        assert_eq!(subdivision.num_triangles(), 2);
        assert_eq!(subdivision.convex_hull_size(), 4);
        subdivision.sanity_check();

        subdivision.insert_site(Point2::new(2.5, 5.0))?;
        assert_eq!(subdivision.num_triangles(), 3);
        assert_eq!(subdivision.convex_hull_size(), 5);
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_near_hull_edge() -> Result<(), InsertionError> {
        let mut subdivision = seed_triangle();
        subdivision.insert_site(Point2::new(5.0, 1e-7))?;
        subdivision.insert_site(Point2::new(3.0, -1e-7))?;
        assert_eq!(subdivision.num_vertices(), 5);
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_near_interior_edge() -> Result<(), InsertionError> {
        let mut subdivision = seed_triangle();
        subdivision.insert_site(Point2::new(5.0, 3.0))?;
        // Within tolerance of the interior edge (5.0, 3.0) - (5.0, 10.0), but not on it
        let handle = subdivision.insert_site(Point2::new(5.0 + 1e-7, 6.0))?;
        assert_eq!(subdivision.num_vertices(), 5);
        assert_eq!(subdivision.num_triangles(), 5);
        assert!(subdivision.vertex(handle).out_edges().count() >= 3);
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_near_hull_sliver_in_every_seed_order() -> Result<(), InsertionError> {
        let a = Point2::new(-0.2, -0.5);
        let b = Point2::new(0.1 * 3.0, 0.0);
        let c = Point2::new(0.0, 0.5);
        let orders = [
            [a, b, c],
            [a, c, b],
            [b, a, c],
            [b, c, a],
            [c, a, b],
            [c, b, a],
        ];
        for [p0, p1, p2] in orders {
            let mut subdivision = Subdivision::new(p0, p1, p2)?;
            // Nearly collinear with a and b
            subdivision.insert_site(Point2::new(0.2, -0.1))?;
            assert_eq!(subdivision.num_vertices(), 4);
            assert_eq!(subdivision.num_undirected_edges(), 5);
            assert_eq!(subdivision.num_triangles(), 2);
            assert_eq!(subdivision.convex_hull_size(), 4);
            assert_eq!(subdivision.triangles().count(), subdivision.num_triangles());
            subdivision.sanity_check();
        }
        Ok(())
    }

    #[test]
    fn test_insert_decimal_grid() -> Result<(), InsertionError> {
        let mut rng = rand::rngs::StdRng::from_seed(*SEED2);
        for _ in 0..50 {
            let mut seed = [0u8; 32];
            rand::RngCore::fill_bytes(&mut rng, &mut seed);
            let mut subdivision = Subdivision::new(
                Point2::new(-0.2, -0.5),
                Point2::new(0.1 * 3.0, 0.0),
                Point2::new(0.0, 0.5),
            )?;
            for site in decimal_grid(10, 40, &seed) {
                subdivision.insert_site(site)?;
            }
            subdivision.sanity_check();
        }
        Ok(())
    }

    #[test]
    fn test_hull_split_requires_counter_clockwise_triangles() {
        use super::InsertionPlan;

        let subdivision = seed_triangle();
        let bottom = subdivision
            .convex_hull()
            .find(|edge| edge.positions().iter().all(|position| position.y == 0.0))
            .map(|edge| edge.fix().sym())
            .unwrap();

        assert_eq!(
            subdivision.plan_hull_split(bottom, Point2::new(4.0, 0.0)),
            Ok(InsertionPlan::OnHullEdge(bottom))
        );
        // On the line through the edge, but beyond its end points
        for x in [-2.0, 12.0] {
            assert_eq!(
                subdivision.plan_hull_split(bottom, Point2::new(x, 0.0)),
                Err(InsertionError::DegenerateGeometry)
            );
        }
    }

    #[test]
    fn test_insert_on_collinear_hull_chain() -> Result<(), InsertionError> {
        let mut subdivision = Subdivision::new(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(2.0, 4.0),
        )?;
        for (x, triangles) in [(2.0, 2), (6.0, 3), (3.0, 4), (-1.0, 5), (5.0, 6), (8.0, 7)] {
            subdivision.insert_site(Point2::new(x, 0.0))?;
            assert_eq!(subdivision.num_triangles(), triangles);
            subdivision.sanity_check();
        }
        assert_eq!(subdivision.convex_hull_size(), 9);
        Ok(())
    }

    #[test]
    fn test_failed_insertion_leaves_subdivision_unchanged() -> Result<(), InsertionError> {
        let mut subdivision = seed_triangle();
        subdivision.insert_site(Point2::new(5.0, 3.0))?;
        let anchor = subdivision.starting_edge().fix();

        assert_eq!(
            subdivision.insert_site(Point2::new(f64::NAN, 0.0)),
            Err(InsertionError::NAN)
        );
        assert_eq!(
            subdivision.insert_site(Point2::new(0.0, f64::INFINITY)),
            Err(InsertionError::TooLarge)
        );
        assert_eq!(
            subdivision.insert_site(Point2::new(1e-50, 1.0)),
            Err(InsertionError::TooSmall)
        );

        assert_eq!(subdivision.num_vertices(), 4);
        assert_eq!(subdivision.starting_edge().fix(), anchor);
        subdivision.insert_site(Point2::new(4.0, 2.0))?;
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_locate() -> Result<(), InsertionError> {
        use PositionInTriangulation::*;

        let subdivision = seed_triangle();
        match subdivision.locate(Point2::new(0.0, 0.0))? {
            OnVertex(vertex) => assert_eq!(vertex.index(), 0),
            other => panic!("Unexpected location: {:?}", other),
        }
        match subdivision.locate(Point2::new(5.0, 3.0))? {
            InsideFace(edge) => {
                let edge = subdivision.directed_edge(edge).unwrap();
                assert!(!edge.is_outer_edge());
                assert!(edge.face().is_some());
            }
            other => panic!("Unexpected location: {:?}", other),
        }
        match subdivision.locate(Point2::new(20.0, 20.0))? {
            OutsideOfConvexHull(edge) => {
                let edge = subdivision.directed_edge(edge).unwrap();
                assert!(edge.is_outer_edge());
                assert!(!edge.side_query(Point2::new(20.0, 20.0)).is_on_right_side());
            }
            other => panic!("Unexpected location: {:?}", other),
        }
        assert_eq!(
            subdivision.locate(Point2::new(f64::NAN, 0.0)),
            Err(InsertionError::NAN)
        );
        Ok(())
    }

    #[test]
    fn test_locate_step_limit() -> Result<(), InsertionError> {
        let parameters = SubdivisionParameters::new().with_max_locate_steps(0);
        let mut subdivision = Subdivision::with_parameters(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 10.0),
            parameters,
        )?;
        assert_eq!(
            subdivision.insert_site(Point2::new(5.0, 3.0)),
            Err(InsertionError::DegenerateGeometry)
        );
        assert_eq!(subdivision.num_vertices(), 3);
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_custom_tolerance() -> Result<(), InsertionError> {
        let parameters = SubdivisionParameters::new().with_tolerance(0.5);
        let mut subdivision = Subdivision::with_parameters(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 10.0),
            parameters,
        )?;
        assert_eq!(subdivision.insert_site(Point2::new(0.3, 0.3))?.index(), 0);
        assert_eq!(subdivision.num_vertices(), 3);
        Ok(())
    }

    #[test]
    fn test_f32_subdivision() -> Result<(), InsertionError> {
        let mut subdivision = Subdivision::new(
            Point2::new(-10.0f32, -10.0),
            Point2::new(10.0, -10.0),
            Point2::new(0.0, 10.0),
        )?;
        for point in random_points_with_seed(50, SEED) {
            subdivision.insert_site(Point2::new(point.x as f32, point.y as f32))?;
        }
        assert_eq!(subdivision.num_vertices(), 53);
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_random_points() -> Result<(), InsertionError> {
        let mut subdivision = enclosing_subdivision(1.0);
        for point in random_points_with_seed(1000, SEED) {
            subdivision.insert_site(point)?;
        }
        assert_eq!(subdivision.num_vertices(), 1003);
        assert_eq!(subdivision.convex_hull_size(), 3);
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_points_outside_of_seed() -> Result<(), InsertionError> {
        let mut subdivision = Subdivision::new(
            Point2::new(-0.01, -0.01),
            Point2::new(0.01, -0.01),
            Point2::new(0.0, 0.01),
        )?;
        for point in random_points_in_range(100.0, 500, SEED2) {
            subdivision.insert_site(point)?;
        }
        assert_eq!(subdivision.num_vertices(), 503);
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_spiral() -> Result<(), InsertionError> {
        let mut subdivision = Subdivision::new(
            Point2::new(0.1, 0.0),
            Point2::new(-0.05, 0.1),
            Point2::new(-0.05, -0.1),
        )?;
        for point in spiral(200) {
            subdivision.insert_site(point)?;
        }
        assert_eq!(subdivision.num_vertices(), 203);
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insert_shuffled_grid() -> Result<(), InsertionError> {
        let mut subdivision = Subdivision::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        )?;
        for point in shuffled_grid(12, SEED) {
            subdivision.insert_site(point)?;
        }
        assert_eq!(subdivision.num_vertices(), 144);
        assert_eq!(subdivision.convex_hull_size(), 44);
        assert_eq!(subdivision.num_triangles(), 2 * 144 - 44 - 2);
        subdivision.sanity_check();
        Ok(())
    }

    #[test]
    fn test_insertion_order_invariance() -> Result<(), InsertionError> {
        let mut points = random_points_with_seed(100, SEED2);
        let mut first = enclosing_subdivision(1.0);
        for point in &points {
            first.insert_site(*point)?;
        }

        let mut rng = rand::rngs::StdRng::from_seed(*SEED);
        points.shuffle(&mut rng);
        let mut second = enclosing_subdivision(1.0);
        for point in &points {
            second.insert_site(*point)?;
        }

        let mut first_edges = edge_set(&first);
        let mut second_edges = edge_set(&second);
        first_edges.sort_by(|a, b| a.partial_cmp(b).unwrap());
        second_edges.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(first_edges, second_edges);
        Ok(())
    }

    fn edge_set(subdivision: &Subdivision) -> Vec<[(f64, f64); 2]> {
        subdivision
            .traverse()
            .map(|edge| {
                let [from, to] = edge.positions();
                let mut endpoints = [(from.x, from.y), (to.x, to.y)];
                endpoints.sort_by(|a, b| a.partial_cmp(b).unwrap());
                endpoints
            })
            .collect()
    }

    #[test]
    fn test_seed_vertices_are_reachable() {
        let subdivision = seed_triangle();
        let positions: Vec<_> = subdivision.vertices().map(|v| v.position()).collect();
        assert_eq!(
            positions,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(5.0, 10.0)
            ]
        );
        let anchor = subdivision.starting_edge();
        assert_eq!(anchor.from().position(), Point2::new(0.0, 0.0));
        assert_eq!(anchor.to().position(), Point2::new(10.0, 0.0));
    }
}
