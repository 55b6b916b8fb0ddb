//! Host graph storage and the read-only view consumed by pattern growth.
//!
//! A host graph is a directed multigraph with dictionary-coded vertex and
//! edge labels. Growth never mutates a host graph; it only queries labels,
//! endpoints, and per-vertex incidence lists partitioned by direction. That
//! query surface is the [`GraphView`] trait; [`DirectedMultigraph`] is the
//! in-memory implementation used by tests, benchmarks, and single-machine
//! drivers.
//!
//! # Citations
//! - Transactional frequent subgraph mining: Yan & Han, "gSpan: Graph-based
//!   substructure pattern mining" (ICDM 2002)
//! - Compact adjacency storage: Petermann et al., "DIMSpan: Transactional
//!   frequent subgraph mining with distributed in-memory dataflow" (2017)

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Identifier of a vertex within one host graph.
///
/// Ids are dense: a graph with `n` vertices uses exactly `0..n`.
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VertexId(u32);

impl VertexId {
    /// Creates a `VertexId` from a raw index.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw index.
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an edge within one host graph.
///
/// Ids are dense: a graph with `m` edges uses exactly `0..m`. Parallel edges
/// between the same endpoints receive distinct ids.
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EdgeId(u32);

impl EdgeId {
    /// Creates an `EdgeId` from a raw index.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw index.
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a host graph within a graph collection.
///
/// Candidates remember which graph they were grown in so that a downstream
/// support counter can group occurrences per graph.
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GraphId(u64);

impl GraphId {
    /// Creates a `GraphId` from a raw value.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dictionary-coded vertex label.
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VertexLabel(u32);

impl VertexLabel {
    /// Creates a `VertexLabel` from a raw dictionary code.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw dictionary code.
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

/// Dictionary-coded edge label.
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EdgeLabel(u32);

impl EdgeLabel {
    /// Creates an `EdgeLabel` from a raw dictionary code.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw dictionary code.
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

/// Read-only query surface over a directed multigraph.
///
/// All lookups return `None` for ids the graph does not know; the growth
/// engine treats that as a fatal upstream inconsistency and propagates it,
/// never skips it. Implementations are expected to be cheaply shareable by
/// reference across many concurrent growth calls.
pub trait GraphView {
    /// Identifier of this graph within its collection.
    fn graph_id(&self) -> GraphId;

    /// Number of vertices. Vertex ids are `0..vertex_count()`.
    fn vertex_count(&self) -> usize;

    /// Number of edges. Edge ids are `0..edge_count()`.
    fn edge_count(&self) -> usize;

    /// Label of a vertex.
    fn vertex_label(&self, vertex: VertexId) -> Option<VertexLabel>;

    /// Label of an edge.
    fn edge_label(&self, edge: EdgeId) -> Option<EdgeLabel>;

    /// Source vertex of an edge.
    fn edge_source(&self, edge: EdgeId) -> Option<VertexId>;

    /// Target vertex of an edge.
    fn edge_target(&self, edge: EdgeId) -> Option<VertexId>;

    /// Ids of all edges whose source is `vertex`.
    fn edge_ids_by_source(&self, vertex: VertexId) -> Option<&[EdgeId]>;

    /// Ids of all edges whose target is `vertex`.
    fn edge_ids_by_target(&self, vertex: VertexId) -> Option<&[EdgeId]>;
}

/// Error raised while assembling a host graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge referenced a vertex that was never added.
    #[error("edge endpoint {0} does not exist in the graph under construction")]
    MissingEndpoint(VertexId),
}

/// One directed, labeled edge of a [`DirectedMultigraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct EdgeRecord {
    source: VertexId,
    target: VertexId,
    label: EdgeLabel,
}

/// In-memory directed multigraph with precomputed incidence lists.
///
/// Construction goes through [`GraphBuilder`]; once built, the graph is
/// immutable and serves lookups in O(1) (incidence lists are `&[EdgeId]`
/// slices, not recomputed per query).
///
/// # Invariants
/// - `out_edges[v]` holds exactly the ids of edges with source `v`, in
///   ascending id order; `in_edges[v]` likewise for targets.
/// - Vertex and edge ids are dense and stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedMultigraph {
    id: GraphId,
    vertex_labels: Vec<VertexLabel>,
    edges: Vec<EdgeRecord>,
    out_edges: Vec<Vec<EdgeId>>,
    in_edges: Vec<Vec<EdgeId>>,
}

impl DirectedMultigraph {
    /// Starts building a graph with the given collection-level id.
    pub fn builder(id: GraphId) -> GraphBuilder {
        GraphBuilder::new(id)
    }
}

impl GraphView for DirectedMultigraph {
    #[inline]
    fn graph_id(&self) -> GraphId {
        self.id
    }

    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertex_labels.len()
    }

    #[inline]
    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    fn vertex_label(&self, vertex: VertexId) -> Option<VertexLabel> {
        self.vertex_labels.get(vertex.index()).copied()
    }

    #[inline]
    fn edge_label(&self, edge: EdgeId) -> Option<EdgeLabel> {
        self.edges.get(edge.index()).map(|e| e.label)
    }

    #[inline]
    fn edge_source(&self, edge: EdgeId) -> Option<VertexId> {
        self.edges.get(edge.index()).map(|e| e.source)
    }

    #[inline]
    fn edge_target(&self, edge: EdgeId) -> Option<VertexId> {
        self.edges.get(edge.index()).map(|e| e.target)
    }

    #[inline]
    fn edge_ids_by_source(&self, vertex: VertexId) -> Option<&[EdgeId]> {
        self.out_edges.get(vertex.index()).map(Vec::as_slice)
    }

    #[inline]
    fn edge_ids_by_target(&self, vertex: VertexId) -> Option<&[EdgeId]> {
        self.in_edges.get(vertex.index()).map(Vec::as_slice)
    }
}

/// Builder for [`DirectedMultigraph`].
///
/// Vertices and edges receive dense ids in insertion order. Incidence lists
/// are materialized once in [`GraphBuilder::build`].
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    id: GraphId,
    vertex_labels: Vec<VertexLabel>,
    edges: Vec<EdgeRecord>,
}

impl GraphBuilder {
    /// Creates an empty builder for the graph with the given id.
    pub fn new(id: GraphId) -> Self {
        Self {
            id,
            vertex_labels: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Adds a vertex and returns its id.
    pub fn add_vertex(&mut self, label: VertexLabel) -> VertexId {
        let id = VertexId::new(self.vertex_labels.len() as u32);
        self.vertex_labels.push(label);
        id
    }

    /// Adds a directed edge and returns its id.
    ///
    /// Both endpoints must already exist. Parallel edges and loops are
    /// allowed.
    pub fn add_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        label: EdgeLabel,
    ) -> Result<EdgeId, GraphError> {
        for endpoint in [source, target] {
            if endpoint.index() >= self.vertex_labels.len() {
                return Err(GraphError::MissingEndpoint(endpoint));
            }
        }
        let id = EdgeId::new(self.edges.len() as u32);
        self.edges.push(EdgeRecord {
            source,
            target,
            label,
        });
        Ok(id)
    }

    /// Finalizes the graph, materializing per-vertex incidence lists.
    pub fn build(self) -> DirectedMultigraph {
        let mut out_edges = vec![Vec::new(); self.vertex_labels.len()];
        let mut in_edges = vec![Vec::new(); self.vertex_labels.len()];
        for (index, edge) in self.edges.iter().enumerate() {
            let id = EdgeId::new(index as u32);
            out_edges[edge.source.index()].push(id);
            in_edges[edge.target.index()].push(id);
        }
        debug!(
            graph = %self.id,
            vertices = self.vertex_labels.len(),
            edges = self.edges.len(),
            "built host graph"
        );
        DirectedMultigraph {
            id: self.id,
            vertex_labels: self.vertex_labels,
            edges: self.edges,
            out_edges,
            in_edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> DirectedMultigraph {
        // a -> b, a -> c, b -> d, c -> d
        let mut builder = GraphBuilder::new(GraphId::new(7));
        let a = builder.add_vertex(VertexLabel::new(0));
        let b = builder.add_vertex(VertexLabel::new(1));
        let c = builder.add_vertex(VertexLabel::new(1));
        let d = builder.add_vertex(VertexLabel::new(2));
        builder.add_edge(a, b, EdgeLabel::new(0)).unwrap();
        builder.add_edge(a, c, EdgeLabel::new(0)).unwrap();
        builder.add_edge(b, d, EdgeLabel::new(1)).unwrap();
        builder.add_edge(c, d, EdgeLabel::new(1)).unwrap();
        builder.build()
    }

    #[test]
    fn incidence_lists_partition_by_direction() {
        let graph = diamond();
        let a = VertexId::new(0);
        let d = VertexId::new(3);

        assert_eq!(
            graph.edge_ids_by_source(a).unwrap(),
            &[EdgeId::new(0), EdgeId::new(1)]
        );
        assert_eq!(graph.edge_ids_by_target(a).unwrap(), &[]);
        assert_eq!(
            graph.edge_ids_by_target(d).unwrap(),
            &[EdgeId::new(2), EdgeId::new(3)]
        );
        assert_eq!(graph.edge_ids_by_source(d).unwrap(), &[]);
    }

    #[test]
    fn endpoint_and_label_lookups() {
        let graph = diamond();
        let e = EdgeId::new(2);
        assert_eq!(graph.edge_source(e), Some(VertexId::new(1)));
        assert_eq!(graph.edge_target(e), Some(VertexId::new(3)));
        assert_eq!(graph.edge_label(e), Some(EdgeLabel::new(1)));
        assert_eq!(
            graph.vertex_label(VertexId::new(3)),
            Some(VertexLabel::new(2))
        );
    }

    #[test]
    fn unknown_ids_return_none() {
        let graph = diamond();
        assert_eq!(graph.vertex_label(VertexId::new(42)), None);
        assert_eq!(graph.edge_label(EdgeId::new(42)), None);
        assert_eq!(graph.edge_ids_by_source(VertexId::new(42)), None);
    }

    #[test]
    fn parallel_edges_get_distinct_ids() {
        let mut builder = GraphBuilder::new(GraphId::new(0));
        let a = builder.add_vertex(VertexLabel::new(0));
        let b = builder.add_vertex(VertexLabel::new(0));
        let e0 = builder.add_edge(a, b, EdgeLabel::new(5)).unwrap();
        let e1 = builder.add_edge(a, b, EdgeLabel::new(5)).unwrap();
        assert_ne!(e0, e1);

        let graph = builder.build();
        assert_eq!(graph.edge_ids_by_source(a).unwrap(), &[e0, e1]);
    }

    #[test]
    fn edge_to_missing_endpoint_is_rejected() {
        let mut builder = GraphBuilder::new(GraphId::new(0));
        let a = builder.add_vertex(VertexLabel::new(0));
        let ghost = VertexId::new(9);
        assert_eq!(
            builder.add_edge(a, ghost, EdgeLabel::new(0)),
            Err(GraphError::MissingEndpoint(ghost))
        );
    }
}
