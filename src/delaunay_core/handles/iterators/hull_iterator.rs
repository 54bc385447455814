use super::{CircularIterator, NextBackFn};
use crate::delaunay_core::QuadEdgeStore;
use crate::handles::DirectedEdgeHandle;
use crate::HasPosition;

/// An iterator over the edges of the convex hull.
///
/// Every returned edge has the unbounded face on its left side, the hull is walked in
/// clockwise order. Collinear vertices on the hull are part of the walk.
///
/// This iterator is created by [Subdivision::convex_hull](crate::Subdivision::convex_hull).
pub struct HullIterator<'a, V> {
    inner_iterator: CircularIterator<'a, V, HullNextBackFn>,
}

/// Steps along the boundary of the unbounded face.
pub struct HullNextBackFn;

impl NextBackFn for HullNextBackFn {
    fn next<V>(edge_handle: DirectedEdgeHandle<V>) -> DirectedEdgeHandle<V> {
        edge_handle.lnext()
    }

    fn next_back<V>(edge_handle: DirectedEdgeHandle<V>) -> DirectedEdgeHandle<V> {
        edge_handle.lprev()
    }
}

impl<'a, V: HasPosition> HullIterator<'a, V> {
    pub(crate) fn new(store: &'a QuadEdgeStore<V>) -> Self {
        let first_edge = store
            .quad_edges()
            .flat_map(|quad_edge| [quad_edge.directed(0), quad_edge.directed(2)])
            .find(|edge| store.left_face_is_outer(*edge));

        let inner_iterator = match first_edge {
            Some(edge) => CircularIterator::new(DirectedEdgeHandle::new(store, edge)),
            None => CircularIterator::new_empty(),
        };

        Self { inner_iterator }
    }
}

impl<'a, V> Iterator for HullIterator<'a, V> {
    type Item = DirectedEdgeHandle<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner_iterator.next()
    }
}

impl<'a, V> DoubleEndedIterator for HullIterator<'a, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner_iterator.next_back()
    }
}

#[cfg(test)]
mod test {
    use crate::test_utilities::{random_points_with_seed, SEED};
    use crate::{InsertionError, Point2, Subdivision};

    #[test]
    fn test_triangle_hull() -> Result<(), InsertionError> {
        let subdivision = Subdivision::new(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 10.0),
        )?;
        let hull: Vec<_> = subdivision.convex_hull().collect();
        assert_eq!(hull.len(), 3);
        for edge in &hull {
            assert!(edge.is_outer_edge());
            assert!(edge.face().is_none());
        }
        Ok(())
    }

    #[test]
    fn test_bigger_subdivision() -> Result<(), InsertionError> {
        let mut subdivision = Subdivision::new(
            Point2::new(-2.0, -2.0),
            Point2::new(2.0, -2.0),
            Point2::new(0.0, 2.0),
        )?;
        for point in random_points_with_seed(100, SEED) {
            subdivision.insert_site(point)?;
        }

        let convex_hull: Vec<_> = subdivision.convex_hull().collect();
        let mut reversed: Vec<_> = subdivision.convex_hull().rev().collect();

        for hull_edge in &convex_hull {
            assert!(hull_edge.is_outer_edge());
            assert!(hull_edge.sym().face().is_some());
            assert_eq!(hull_edge.lnext().from(), hull_edge.to());
        }

        reversed.reverse();
        assert_eq!(convex_hull, reversed);
        assert_eq!(subdivision.convex_hull_size(), convex_hull.len());
        Ok(())
    }
}
