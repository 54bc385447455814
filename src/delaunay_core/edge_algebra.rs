//! Topological primitives on the quad-edge arena.
//!
//! Every operation is a constant number of `next` link rewrites. None of them inspect
//! vertex positions, geometric decisions are made by the caller.
use super::handles::{FixedDirectedEdgeHandle, FixedVertexHandle};
use super::QuadEdgeStore;

/// Creates a new edge `from -> to` that is not connected to any other edge.
pub fn make_edge<V>(
    store: &mut QuadEdgeStore<V>,
    from: FixedVertexHandle,
    to: FixedVertexHandle,
) -> FixedDirectedEdgeHandle {
    let e = store.allocate(from, to);
    store.set_end_points(e, from, to);
    e
}

/// Joins or separates the rings around the origins of `a` and `b`.
///
/// If both edges belong to different origin rings, the rings are merged. If they belong
/// to the same ring, the ring is split in two. The dual rings are updated accordingly.
/// Splicing is its own inverse.
pub fn splice<V>(
    store: &mut QuadEdgeStore<V>,
    a: FixedDirectedEdgeHandle,
    b: FixedDirectedEdgeHandle,
) {
    let alpha = store.onext(a).rot();
    let beta = store.onext(b).rot();

    let t1 = store.onext(b);
    let t2 = store.onext(a);
    let t3 = store.onext(beta);
    let t4 = store.onext(alpha);

    store.set_onext(a, t1);
    store.set_onext(b, t2);
    store.set_onext(alpha, t3);
    store.set_onext(beta, t4);
}

/// Adds a new edge from the destination of `a` to the origin of `b`.
///
/// `a` and `b` must share the same left face. Afterwards, the new edge, `a` and `b`
/// all have the same left face.
pub fn connect<V>(
    store: &mut QuadEdgeStore<V>,
    a: FixedDirectedEdgeHandle,
    b: FixedDirectedEdgeHandle,
) -> FixedDirectedEdgeHandle {
    let from = store.dest(a);
    let to = store.org(b);
    let e = make_edge(store, from, to);
    let a_lnext = store.lnext(a);
    splice(store, e, a_lnext);
    splice(store, e.sym(), b);
    e
}

/// Disconnects `e` from the rest of the subdivision and releases its record.
///
/// The two faces adjacent to `e` are merged into one.
pub fn delete_edge<V>(store: &mut QuadEdgeStore<V>, e: FixedDirectedEdgeHandle) {
    let org = store.org(e);
    let dest = store.dest(e);
    let org_prev = store.oprev(e);
    let dest_prev = store.oprev(e.sym());

    store.set_out_edge(org, (org_prev != e).then_some(org_prev));
    store.set_out_edge(dest, (dest_prev != e.sym()).then_some(dest_prev));

    splice(store, e, org_prev);
    splice(store, e.sym(), dest_prev);
    store.release(e.quad_edge());
}

/// Flips the diagonal `e` of the quadrilateral formed by its two adjacent triangles.
///
/// ```text
///       d                 d
///     / ^ \             /   \
///    /  |  \           /     \
///   a   |e  c   ->    a <-e-- c
///    \  |  /           \     /
///     \ | /             \   /
///       b                 b
/// ```
/// `e` keeps its handle and afterwards connects the two vertices that were opposite of
/// it. Its left face stays on the same side of the rotated edge.
pub fn flip<V>(store: &mut QuadEdgeStore<V>, e: FixedDirectedEdgeHandle) {
    let a = store.oprev(e);
    let b = store.oprev(e.sym());

    store.set_out_edge(store.org(a), Some(a));
    store.set_out_edge(store.org(b), Some(b));

    splice(store, e, a);
    splice(store, e.sym(), b);
    let a_lnext = store.lnext(a);
    splice(store, e, a_lnext);
    let b_lnext = store.lnext(b);
    splice(store, e.sym(), b_lnext);

    let new_org = store.dest(a);
    let new_dest = store.dest(b);
    store.set_end_points(e, new_org, new_dest);
}

/// Splits a convex hull edge by a vertex `x` lying on it.
///
/// `e = a -> b` must have the triangle `(a, b, c)` on its left side and the unbounded
/// face on its right side.
///
/// ```text
///        c                    c
///       / \                  /|\
///      /   \                / | \
///     /     \      ->      /  |  \
///    a --e-> b            a-e->x--> b
/// ```
/// Afterwards `e` runs from `a` to `x`, a new edge runs from `x` to `b` and `x` is
/// connected to `c`. Returns the two edges `b -> c` and `c -> a` that lie opposite
/// of `x`.
pub fn split_hull_edge<V>(
    store: &mut QuadEdgeStore<V>,
    e: FixedDirectedEdgeHandle,
    x: FixedVertexHandle,
) -> [FixedDirectedEdgeHandle; 2] {
    let a = store.org(e);
    let b = store.dest(e);

    let es = e.sym();
    let b_prev = store.oprev(es);
    splice(store, es, b_prev);

    let m = make_edge(store, x, b);
    splice(store, m.sym(), b_prev);
    store.set_end_points(e, a, x);
    splice(store, e.sym(), m);

    let bc = store.lnext(m);
    let ca = store.lnext(bc);
    let xc = connect(store, e, ca);
    [bc, store.lnext(xc)]
}
