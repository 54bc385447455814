use core::marker::PhantomData;

use super::super::DirectedEdgeHandle;

/// Defines how a [CircularIterator] advances in both directions.
pub trait NextBackFn {
    /// Returns the edge following `edge_handle`.
    fn next<V>(edge_handle: DirectedEdgeHandle<V>) -> DirectedEdgeHandle<V>;

    /// Returns the edge preceding `edge_handle`.
    fn next_back<V>(edge_handle: DirectedEdgeHandle<V>) -> DirectedEdgeHandle<V>;
}

/// Iterates over a closed ring of directed edges, e.g. around a vertex or a face.
///
/// Iteration stops once the ring closes at the start edge again.
pub struct CircularIterator<'a, V, NB> {
    current_handle: Option<DirectedEdgeHandle<'a, V>>,
    final_handle: Option<DirectedEdgeHandle<'a, V>>,
    next_back_fn: PhantomData<NB>,
}

impl<'a, V, NB: NextBackFn> CircularIterator<'a, V, NB> {
    pub(crate) fn new(start_edge: DirectedEdgeHandle<'a, V>) -> Self {
        CircularIterator {
            current_handle: Some(start_edge),
            final_handle: Some(start_edge),
            next_back_fn: Default::default(),
        }
    }

    pub(crate) fn new_empty() -> Self {
        CircularIterator {
            current_handle: None,
            final_handle: None,
            next_back_fn: Default::default(),
        }
    }

    fn finish(&mut self) {
        self.current_handle = None;
        self.final_handle = None;
    }
}

impl<'a, V, NB: NextBackFn> Iterator for CircularIterator<'a, V, NB> {
    type Item = DirectedEdgeHandle<'a, V>;

    fn next(&mut self) -> Option<DirectedEdgeHandle<'a, V>> {
        let result = self.current_handle?;
        let next = NB::next(result);
        if Some(next) == self.final_handle {
            self.finish();
        } else {
            self.current_handle = Some(next);
        }
        Some(result)
    }
}

impl<'a, V, NB: NextBackFn> DoubleEndedIterator for CircularIterator<'a, V, NB> {
    fn next_back(&mut self) -> Option<DirectedEdgeHandle<'a, V>> {
        let final_handle = NB::next_back(self.final_handle?);
        if Some(final_handle) == self.current_handle {
            self.finish();
        } else {
            self.final_handle = Some(final_handle);
        }
        Some(final_handle)
    }
}
