use hashbrown::HashSet;

use crate::delaunay_core::QuadEdgeStore;
use crate::handles::{
    FixedDirectedEdgeHandle, FixedQuadEdgeHandle, FixedTriangleHandle, FixedVertexHandle,
    TriangleHandle, UndirectedEdgeHandle, VertexHandle,
};
use crate::HasPosition;

/// A depth first traversal over all undirected edges of a subdivision.
///
/// Starts at the anchor edge and follows `onext`, `oprev`, `dnext` and `dprev`. Every
/// undirected edge is returned exactly once. The set of visited edges belongs to the
/// iterator, independent traversals do not influence each other.
///
/// This iterator is created by [Subdivision::traverse](crate::Subdivision::traverse).
pub struct UndirectedEdgeTraversal<'a, V> {
    store: &'a QuadEdgeStore<V>,
    stack: Vec<FixedDirectedEdgeHandle>,
    visited: HashSet<FixedQuadEdgeHandle>,
}

impl<'a, V> UndirectedEdgeTraversal<'a, V> {
    pub(crate) fn new(store: &'a QuadEdgeStore<V>, start: FixedDirectedEdgeHandle) -> Self {
        let mut visited = HashSet::with_capacity(store.num_undirected_edges());
        visited.insert(start.quad_edge());
        Self {
            store,
            stack: vec![start],
            visited,
        }
    }
}

impl<'a, V> Iterator for UndirectedEdgeTraversal<'a, V> {
    type Item = UndirectedEdgeHandle<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let edge = self.stack.pop()?;
        let neighbors = [
            self.store.onext(edge),
            self.store.oprev(edge),
            self.store.dnext(edge),
            self.store.dprev(edge),
        ];
        for neighbor in neighbors {
            if self.visited.insert(neighbor.quad_edge()) {
                self.stack.push(neighbor);
            }
        }
        Some(UndirectedEdgeHandle::new(self.store, edge.quad_edge()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.store.num_undirected_edges() - self.visited.len();
        (self.stack.len(), Some(self.stack.len() + remaining))
    }
}

/// An iterator over all triangles (inner faces) of a subdivision.
///
/// This iterator is created by [Subdivision::triangles](crate::Subdivision::triangles).
pub struct TriangleIterator<'a, V> {
    store: &'a QuadEdgeStore<V>,
    candidates: std::vec::IntoIter<FixedDirectedEdgeHandle>,
}

impl<'a, V: HasPosition> TriangleIterator<'a, V> {
    pub(crate) fn new(store: &'a QuadEdgeStore<V>) -> Self {
        let candidates: Vec<_> = store
            .quad_edges()
            .flat_map(|quad_edge| [quad_edge.directed(0), quad_edge.directed(2)])
            .collect();
        Self {
            store,
            candidates: candidates.into_iter(),
        }
    }
}

impl<'a, V: HasPosition> Iterator for TriangleIterator<'a, V> {
    type Item = TriangleHandle<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let store = self.store;
        self.candidates
            .find(|edge| {
                !store.left_face_is_outer(*edge) && store.canonical_face_edge(*edge) == *edge
            })
            .map(|edge| TriangleHandle::new(store, FixedTriangleHandle { edge }))
    }
}

/// An iterator over all vertices of a subdivision in insertion order.
///
/// This iterator is created by [Subdivision::vertices](crate::Subdivision::vertices).
pub struct VertexIterator<'a, V> {
    store: &'a QuadEdgeStore<V>,
    range: std::ops::Range<usize>,
}

impl<'a, V> VertexIterator<'a, V> {
    pub(crate) fn new(store: &'a QuadEdgeStore<V>) -> Self {
        Self {
            store,
            range: 0..store.num_vertices(),
        }
    }
}

impl<'a, V> Iterator for VertexIterator<'a, V> {
    type Item = VertexHandle<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.range
            .next()
            .map(|index| VertexHandle::new(self.store, FixedVertexHandle::new(index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<'a, V> ExactSizeIterator for VertexIterator<'a, V> {}
