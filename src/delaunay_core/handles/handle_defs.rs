use std::convert::TryInto;

use super::super::QuadEdgeStore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Refers to a vertex of a subdivision.
///
/// Vertices are never removed, a fixed vertex handle stays valid for the whole lifetime
/// of the subdivision that returned it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct FixedVertexHandle {
    index: u32,
}

impl FixedVertexHandle {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index: index
                .try_into()
                .expect("Index too big - at most 2^32 vertices supported"),
        }
    }

    /// Returns the index of this vertex in insertion order.
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl std::fmt::Debug for FixedVertexHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedVertexHandle")
            .field("index", &self.index)
            .finish()
    }
}

/// Refers to one quad-edge record, that is one undirected edge together with its dual.
///
/// The generation is bumped whenever a record is released. A handle whose generation
/// does not match the arena slot anymore is stale.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct FixedQuadEdgeHandle {
    index: u32,
    generation: u32,
}

impl FixedQuadEdgeHandle {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self {
            index: index
                .try_into()
                .expect("Index too big - at most 2^32 edges supported"),
            generation,
        }
    }

    /// The arena slot of this record.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// The generation of the arena slot this handle was created for.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Returns one of the four directed views of this record.
    ///
    /// Rotations 0 and 2 are the two primal (Delaunay) edges, 1 and 3 the dual
    /// (Voronoi) edges.
    #[inline]
    pub fn directed(&self, rotation: u8) -> FixedDirectedEdgeHandle {
        FixedDirectedEdgeHandle {
            quad_edge: *self,
            rotation: rotation & 0x3,
        }
    }

    /// The primal directed edge with rotation 0.
    #[inline]
    pub fn as_directed(&self) -> FixedDirectedEdgeHandle {
        self.directed(0)
    }
}

impl std::fmt::Debug for FixedQuadEdgeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedQuadEdgeHandle")
            .field("index", &self.index)
            .field("generation", &self.generation)
            .finish()
    }
}

/// Refers to one of the four directed edges of a quad-edge record.
///
/// `rot`, `inv_rot` and `sym` are pure arithmetic on the rotation and never touch the
/// subdivision.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct FixedDirectedEdgeHandle {
    quad_edge: FixedQuadEdgeHandle,
    rotation: u8,
}

impl FixedDirectedEdgeHandle {
    /// The quad-edge record this edge belongs to.
    #[inline]
    pub fn quad_edge(&self) -> FixedQuadEdgeHandle {
        self.quad_edge
    }

    /// The rotation index of this edge (0..=3).
    #[inline]
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Returns `true` for Delaunay edges and `false` for Voronoi edges.
    #[inline]
    pub fn is_primal(&self) -> bool {
        self.rotation & 0x1 == 0
    }

    /// The dual edge, rotated by 90 degrees counter clockwise.
    #[inline]
    pub fn rot(&self) -> Self {
        self.quad_edge.directed(self.rotation + 1)
    }

    /// The dual edge, rotated by 90 degrees clockwise.
    #[inline]
    pub fn inv_rot(&self) -> Self {
        self.quad_edge.directed(self.rotation + 3)
    }

    /// The same edge pointing in the opposite direction.
    #[inline]
    pub fn sym(&self) -> Self {
        self.quad_edge.directed(self.rotation + 2)
    }

    /// Returns the rotation 0 view of this edge's record.
    ///
    /// All four directed edges of a record share the same normalized handle.
    pub(crate) fn normalized(&self) -> Self {
        self.quad_edge.as_directed()
    }
}

impl std::fmt::Debug for FixedDirectedEdgeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedDirectedEdgeHandle")
            .field("index", &self.quad_edge.index)
            .field("generation", &self.quad_edge.generation)
            .field("rotation", &self.rotation)
            .finish()
    }
}

/// Refers to a triangle (an inner face) of a subdivision.
///
/// Faces carry no records of their own, a triangle is identified by the directed edge
/// with the smallest handle among the three edges that have it on their left side.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct FixedTriangleHandle {
    pub(crate) edge: FixedDirectedEdgeHandle,
}

impl FixedTriangleHandle {
    /// The edge used to identify this triangle. The triangle lies on its left side.
    pub fn adjacent_edge(&self) -> FixedDirectedEdgeHandle {
        self.edge
    }
}

/// Refers to a directed Voronoi edge, the dual of a Delaunay edge.
///
/// Wraps a directed edge with an odd rotation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct FixedDirectedVoronoiEdgeHandle {
    pub(crate) dual: FixedDirectedEdgeHandle,
}

impl FixedDirectedVoronoiEdgeHandle {
    /// The underlying directed edge with rotation 1 or 3.
    pub fn as_directed(&self) -> FixedDirectedEdgeHandle {
        self.dual
    }
}

/// Internal type definition that is only exposed for documentation purposes.
///
/// Rust will currently not generate documentation for type definitions depending
/// `pub(crate)` types, see [#32077](https://github.com/rust-lang/rust/issues/32077).
///
/// Do not use this type directly, use the aliases defined in
/// [handles](crate::handles) instead.
pub struct DynamicHandleImpl<'a, V, Type> {
    pub(crate) store: &'a QuadEdgeStore<V>,
    pub(crate) handle: Type,
}

impl<'a, V, Type: Copy> DynamicHandleImpl<'a, V, Type> {
    #[inline]
    pub(crate) fn new(store: &'a QuadEdgeStore<V>, handle: Type) -> Self {
        Self { store, handle }
    }

    /// Returns the fixed handle wrapped by this handle.
    ///
    /// Fixed handles do not borrow the subdivision.
    #[inline]
    pub fn fix(&self) -> Type {
        self.handle
    }
}

impl<'a, V, Type: Copy> Clone for DynamicHandleImpl<'a, V, Type> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, V, Type: Copy> Copy for DynamicHandleImpl<'a, V, Type> {}

impl<'a, V, Type: PartialEq> PartialEq for DynamicHandleImpl<'a, V, Type> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl<'a, V, Type: Eq> Eq for DynamicHandleImpl<'a, V, Type> {}

impl<'a, V, Type: std::hash::Hash> std::hash::Hash for DynamicHandleImpl<'a, V, Type> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
    }
}
