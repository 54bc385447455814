use super::handles::*;
use super::math::orientation;
use crate::{HasPosition, Point2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub(crate) struct VertexEntry<V> {
    pub(crate) data: V,
    pub(crate) out_edge: Option<FixedDirectedEdgeHandle>,
}

/// The four `next` links and the two end points of one quad-edge record.
///
/// `next[r]` is the next edge counter clockwise around the origin of the directed edge
/// with rotation `r`. `origins[0]` is the origin of rotation 0, `origins[1]` the origin
/// of rotation 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub(crate) struct QuadEdgeEntry {
    pub(crate) next: [FixedDirectedEdgeHandle; 4],
    pub(crate) origins: [FixedVertexHandle; 2],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub(crate) struct ArenaSlot {
    generation: u32,
    entry: Option<QuadEdgeEntry>,
}

/// Arena that owns all vertices and quad-edge records of a subdivision.
///
/// Released records are put on a free list and reused by later allocations. Their
/// generation is bumped so that handles to the released record are detected as stale.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct QuadEdgeStore<V> {
    pub(crate) vertices: Vec<VertexEntry<V>>,
    slots: Vec<ArenaSlot>,
    free_list: Vec<u32>,
}

impl<V> Default for QuadEdgeStore<V> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }
}

impl<V> QuadEdgeStore<V> {
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_undirected_edges(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    pub fn num_directed_edges(&self) -> usize {
        self.num_undirected_edges() * 2
    }

    /// The number of allocated arena slots, including released ones.
    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn insert_vertex(&mut self, data: V) -> FixedVertexHandle {
        let handle = FixedVertexHandle::new(self.vertices.len());
        self.vertices.push(VertexEntry {
            data,
            out_edge: None,
        });
        handle
    }

    pub fn vertex_data(&self, handle: FixedVertexHandle) -> &V {
        &self.vertices[handle.index()].data
    }

    pub fn out_edge(&self, handle: FixedVertexHandle) -> Option<FixedDirectedEdgeHandle> {
        self.vertices[handle.index()].out_edge
    }

    pub(crate) fn set_out_edge(
        &mut self,
        vertex: FixedVertexHandle,
        out_edge: Option<FixedDirectedEdgeHandle>,
    ) {
        self.vertices[vertex.index()].out_edge = out_edge;
    }

    /// Allocates a record whose rings contain only itself.
    ///
    /// The primal edges form two singleton rings, the dual edges form one ring of
    /// length two.
    pub(crate) fn allocate(
        &mut self,
        from: FixedVertexHandle,
        to: FixedVertexHandle,
    ) -> FixedDirectedEdgeHandle {
        let (index, generation) = match self.free_list.pop() {
            Some(index) => (index as usize, self.slots[index as usize].generation),
            None => {
                self.slots.push(ArenaSlot {
                    generation: 0,
                    entry: None,
                });
                (self.slots.len() - 1, 0)
            }
        };
        let quad_edge = FixedQuadEdgeHandle::new(index, generation);
        let entry = QuadEdgeEntry {
            next: [
                quad_edge.directed(0),
                quad_edge.directed(3),
                quad_edge.directed(2),
                quad_edge.directed(1),
            ],
            origins: [from, to],
        };
        self.slots[index].entry = Some(entry);
        quad_edge.as_directed()
    }

    /// Returns a record to the free list.
    ///
    /// All handles to the record become stale.
    pub(crate) fn release(&mut self, quad_edge: FixedQuadEdgeHandle) {
        let slot = &mut self.slots[quad_edge.index()];
        debug_assert_eq!(slot.generation, quad_edge.generation());
        slot.entry = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(quad_edge.index() as u32);
    }

    /// Returns `true` if the record referenced by `quad_edge` is still alive.
    pub fn is_valid(&self, quad_edge: FixedQuadEdgeHandle) -> bool {
        self.get_entry(quad_edge).is_some()
    }

    fn get_entry(&self, quad_edge: FixedQuadEdgeHandle) -> Option<&QuadEdgeEntry> {
        self.slots
            .get(quad_edge.index())
            .filter(|slot| slot.generation == quad_edge.generation())
            .and_then(|slot| slot.entry.as_ref())
    }

    fn entry(&self, quad_edge: FixedQuadEdgeHandle) -> &QuadEdgeEntry {
        self.get_entry(quad_edge)
            .expect("Stale quad-edge handle. This is a bug.")
    }

    fn entry_mut(&mut self, quad_edge: FixedQuadEdgeHandle) -> &mut QuadEdgeEntry {
        self.slots
            .get_mut(quad_edge.index())
            .filter(|slot| slot.generation == quad_edge.generation())
            .and_then(|slot| slot.entry.as_mut())
            .expect("Stale quad-edge handle. This is a bug.")
    }

    /// Iterates over all live records in arena order.
    pub fn quad_edges(&self) -> impl Iterator<Item = FixedQuadEdgeHandle> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.entry.is_some())
            .map(|(index, slot)| FixedQuadEdgeHandle::new(index, slot.generation))
    }

    #[inline]
    pub fn onext(&self, e: FixedDirectedEdgeHandle) -> FixedDirectedEdgeHandle {
        self.entry(e.quad_edge()).next[e.rotation() as usize]
    }

    #[inline]
    pub(crate) fn set_onext(
        &mut self,
        e: FixedDirectedEdgeHandle,
        next: FixedDirectedEdgeHandle,
    ) {
        self.entry_mut(e.quad_edge()).next[e.rotation() as usize] = next;
    }

    #[inline]
    pub fn oprev(&self, e: FixedDirectedEdgeHandle) -> FixedDirectedEdgeHandle {
        self.onext(e.rot()).rot()
    }

    #[inline]
    pub fn dnext(&self, e: FixedDirectedEdgeHandle) -> FixedDirectedEdgeHandle {
        self.onext(e.sym()).sym()
    }

    #[inline]
    pub fn dprev(&self, e: FixedDirectedEdgeHandle) -> FixedDirectedEdgeHandle {
        self.onext(e.inv_rot()).inv_rot()
    }

    #[inline]
    pub fn lnext(&self, e: FixedDirectedEdgeHandle) -> FixedDirectedEdgeHandle {
        self.onext(e.inv_rot()).rot()
    }

    #[inline]
    pub fn lprev(&self, e: FixedDirectedEdgeHandle) -> FixedDirectedEdgeHandle {
        self.onext(e).sym()
    }

    #[inline]
    pub fn rnext(&self, e: FixedDirectedEdgeHandle) -> FixedDirectedEdgeHandle {
        self.onext(e.rot()).inv_rot()
    }

    #[inline]
    pub fn rprev(&self, e: FixedDirectedEdgeHandle) -> FixedDirectedEdgeHandle {
        self.onext(e.sym())
    }

    /// The origin of a primal directed edge.
    #[inline]
    pub fn org(&self, e: FixedDirectedEdgeHandle) -> FixedVertexHandle {
        debug_assert!(e.is_primal(), "Voronoi edges have no origin vertex");
        self.entry(e.quad_edge()).origins[(e.rotation() >> 1) as usize]
    }

    /// The destination of a primal directed edge.
    #[inline]
    pub fn dest(&self, e: FixedDirectedEdgeHandle) -> FixedVertexHandle {
        self.org(e.sym())
    }

    /// Returns the smallest of the directed edges that share the left face of `e`.
    ///
    /// Only meaningful for triangular faces.
    pub(crate) fn canonical_face_edge(
        &self,
        e: FixedDirectedEdgeHandle,
    ) -> FixedDirectedEdgeHandle {
        let second = self.lnext(e);
        let third = self.lnext(second);
        e.min(second).min(third)
    }

    /// Sets both end points of a primal edge and registers it as out edge of both.
    pub(crate) fn set_end_points(
        &mut self,
        e: FixedDirectedEdgeHandle,
        org: FixedVertexHandle,
        dest: FixedVertexHandle,
    ) {
        debug_assert!(e.is_primal());
        let first = (e.rotation() >> 1) as usize;
        let origins = &mut self.entry_mut(e.quad_edge()).origins;
        origins[first] = org;
        origins[1 - first] = dest;
        self.set_out_edge(org, Some(e));
        self.set_out_edge(dest, Some(e.sym()));
    }
}

impl<V: HasPosition> QuadEdgeStore<V> {
    /// The position of a vertex, converted to `f64`.
    #[inline]
    pub fn position(&self, vertex: FixedVertexHandle) -> Point2<f64> {
        self.vertex_data(vertex).position().to_f64()
    }

    #[inline]
    pub fn org_position(&self, e: FixedDirectedEdgeHandle) -> Point2<f64> {
        self.position(self.org(e))
    }

    #[inline]
    pub fn dest_position(&self, e: FixedDirectedEdgeHandle) -> Point2<f64> {
        self.position(self.dest(e))
    }

    /// Returns `true` if the face left of the primal edge `e` is the unbounded face.
    ///
    /// Inner faces are counter clockwise triangles. The unbounded face is either a longer
    /// cycle or, if the convex hull is a triangle, a clockwise cycle of length three.
    pub fn left_face_is_outer(&self, e: FixedDirectedEdgeHandle) -> bool {
        let second = self.lnext(e);
        let third = self.lnext(second);
        if self.lnext(third) != e {
            return true;
        }
        orientation(
            self.org_position(e),
            self.dest_position(e),
            self.dest_position(second),
        ) <= 0.0
    }
}
