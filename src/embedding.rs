//! Concrete occurrences of a pattern inside one host graph.
//!
//! A [`DfsEmbedding`] pins each pattern time to a host vertex and records
//! which host edges the occurrence has consumed. Growth extends embeddings
//! by copy-and-append, so every search branch owns its embedding exclusively
//! and sibling branches never alias each other's state.
//!
//! # Invariants
//! - The time → vertex mapping is injective.
//! - The used-edge list holds one edge per extension of the paired code and
//!   never contains a duplicate.

use crate::graph::{EdgeId, GraphId, VertexId};
use serde::{Deserialize, Serialize};

/// One occurrence of a pattern in a specific host graph.
///
/// Both collections are pattern-sized (a handful of entries), so lookups are
/// linear scans over dense vectors rather than hashed sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfsEmbedding {
    /// Host graph this occurrence lives in.
    graph_id: GraphId,
    /// Host vertex for each pattern time; index = time.
    vertex_ids: Vec<VertexId>,
    /// Host edges already consumed by this occurrence.
    edge_ids: Vec<EdgeId>,
}

impl DfsEmbedding {
    /// Creates the embedding of a root-only pattern at `vertex`.
    pub fn root(graph_id: GraphId, vertex: VertexId) -> Self {
        Self {
            graph_id,
            vertex_ids: vec![vertex],
            edge_ids: Vec::new(),
        }
    }

    /// Host graph this occurrence lives in.
    #[inline]
    pub fn graph_id(&self) -> GraphId {
        self.graph_id
    }

    /// Host vertex mapped to `time`, if the time is part of this occurrence.
    #[inline]
    pub fn vertex_id(&self, time: usize) -> Option<VertexId> {
        self.vertex_ids.get(time).copied()
    }

    /// Pattern time mapped to `vertex`, if the host vertex is already
    /// covered by this occurrence.
    #[inline]
    pub fn vertex_time(&self, vertex: VertexId) -> Option<usize> {
        self.vertex_ids.iter().position(|&v| v == vertex)
    }

    /// Whether `edge` has already been consumed by this occurrence.
    #[inline]
    pub fn contains_edge_id(&self, edge: EdgeId) -> bool {
        self.edge_ids.contains(&edge)
    }

    /// Number of pattern vertices mapped so far.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_ids.len()
    }

    /// Host edges consumed so far, in extension order.
    #[inline]
    pub fn edge_ids(&self) -> &[EdgeId] {
        &self.edge_ids
    }

    /// Returns a copy extended by a backward edge.
    ///
    /// The vertex mapping is unchanged; only the used-edge list grows.
    pub fn grow_backwards(&self, edge: EdgeId) -> Self {
        debug_assert!(!self.contains_edge_id(edge), "edge consumed twice");
        let mut edge_ids = Vec::with_capacity(self.edge_ids.len() + 1);
        edge_ids.extend_from_slice(&self.edge_ids);
        edge_ids.push(edge);
        Self {
            graph_id: self.graph_id,
            vertex_ids: self.vertex_ids.clone(),
            edge_ids,
        }
    }

    /// Returns a copy extended by a forward edge and the host vertex it
    /// reaches; the vertex is mapped to the next free time.
    pub fn grow_forwards(&self, edge: EdgeId, vertex: VertexId) -> Self {
        debug_assert!(!self.contains_edge_id(edge), "edge consumed twice");
        debug_assert!(
            self.vertex_time(vertex).is_none(),
            "vertex mapped twice"
        );
        let mut vertex_ids = Vec::with_capacity(self.vertex_ids.len() + 1);
        vertex_ids.extend_from_slice(&self.vertex_ids);
        vertex_ids.push(vertex);
        let mut edge_ids = Vec::with_capacity(self.edge_ids.len() + 1);
        edge_ids.extend_from_slice(&self.edge_ids);
        edge_ids.push(edge);
        Self {
            graph_id: self.graph_id,
            vertex_ids,
            edge_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_embedding_maps_time_zero() {
        let embedding = DfsEmbedding::root(GraphId::new(1), VertexId::new(8));
        assert_eq!(embedding.vertex_id(0), Some(VertexId::new(8)));
        assert_eq!(embedding.vertex_time(VertexId::new(8)), Some(0));
        assert_eq!(embedding.vertex_time(VertexId::new(9)), None);
        assert_eq!(embedding.vertex_count(), 1);
        assert!(embedding.edge_ids().is_empty());
    }

    #[test]
    fn forward_growth_maps_the_next_time() {
        let parent = DfsEmbedding::root(GraphId::new(0), VertexId::new(4));
        let child = parent.grow_forwards(EdgeId::new(2), VertexId::new(5));
        assert_eq!(child.vertex_id(1), Some(VertexId::new(5)));
        assert_eq!(child.vertex_time(VertexId::new(5)), Some(1));
        assert!(child.contains_edge_id(EdgeId::new(2)));
        // parent untouched
        assert_eq!(parent.vertex_count(), 1);
        assert!(!parent.contains_edge_id(EdgeId::new(2)));
    }

    #[test]
    fn backward_growth_only_consumes_the_edge() {
        let parent = DfsEmbedding::root(GraphId::new(0), VertexId::new(0))
            .grow_forwards(EdgeId::new(0), VertexId::new(1));
        let child = parent.grow_backwards(EdgeId::new(1));
        assert_eq!(child.vertex_count(), parent.vertex_count());
        assert_eq!(child.edge_ids(), &[EdgeId::new(0), EdgeId::new(1)]);
    }

    #[test]
    fn siblings_do_not_share_used_edges() {
        let parent = DfsEmbedding::root(GraphId::new(0), VertexId::new(0));
        let left = parent.grow_forwards(EdgeId::new(0), VertexId::new(1));
        let right = parent.grow_forwards(EdgeId::new(1), VertexId::new(2));
        assert!(left.contains_edge_id(EdgeId::new(0)));
        assert!(!left.contains_edge_id(EdgeId::new(1)));
        assert!(right.contains_edge_id(EdgeId::new(1)));
        assert!(!right.contains_edge_id(EdgeId::new(0)));
    }
}
