//! Sprig: a pattern-growth engine for frequent subgraph mining on directed
//! multigraphs.
//!
//! This crate implements the growth step of a gSpan-style miner: given a
//! partially built canonical pattern (a [`DfsCode`]) and one concrete
//! occurrence of it in a host graph (a [`DfsEmbedding`]), it enumerates
//! every valid one-edge extension along the rightmost path together with the
//! extended embedding. It decides which extensions are *candidates*; whether
//! a candidate is canonical or frequent is the surrounding miner's business.
//!
//! # What's here
//! - [`graph`]: the read-only [`GraphView`] contract growth consumes, plus
//!   [`DirectedMultigraph`], an in-memory host graph with a builder.
//! - [`code`]: DFS codes, i.e. ordered extension sequences with a
//!   maintained rightmost path and vertex count.
//! - [`embedding`]: occurrences, each an injective time → vertex mapping
//!   plus a used-edge set, extended by copy-and-append.
//! - [`grow`]: the shared traversal algorithm, parameterized over two
//!   direction strategies (outgoing, incoming), emitting into a
//!   caller-owned [`CandidateSink`].
//!
//! Codes and embeddings are immutable values; growth never mutates a
//! parent, so concurrent growth calls over disjoint parents need no
//! locking. Host graphs are shared by reference and never mutated.
//!
//! # Citations
//! - Yan & Han, "gSpan: Graph-based substructure pattern mining" (ICDM 2002)
//! - Petermann et al., "DIMSpan: Transactional frequent subgraph mining
//!   with distributed in-memory dataflow systems" (2017)
//!
//! # Example
//!
//! ```
//! use sprig::prelude::*;
//!
//! // Host graph: A:0 --0--> B:1
//! let mut builder = GraphBuilder::new(GraphId::new(0));
//! let a = builder.add_vertex(VertexLabel::new(0));
//! let b = builder.add_vertex(VertexLabel::new(1));
//! builder.add_edge(a, b, EdgeLabel::new(0)).unwrap();
//! let graph = builder.build();
//!
//! // Root-only pattern at A, grown one generation.
//! let parent = DfsCode::root(VertexLabel::new(0));
//! let embedding = DfsEmbedding::root(graph.graph_id(), a);
//! let mut children: Vec<Candidate> = Vec::new();
//! grow_by_outgoing_edges(&graph, &parent, &embedding, &mut children).unwrap();
//!
//! assert_eq!(children.len(), 1);
//! assert_eq!(children[0].code.vertex_count(), 2);
//! assert_eq!(children[0].embedding.vertex_id(1), Some(b));
//! ```

pub mod code;
pub mod embedding;
pub mod graph;
pub mod grow;

pub use code::{DfsCode, DfsStep, Direction};
pub use embedding::DfsEmbedding;
pub use graph::{
    DirectedMultigraph, EdgeId, EdgeLabel, GraphBuilder, GraphError, GraphId, GraphView,
    VertexId, VertexLabel,
};
pub use grow::{
    grow_all_children, grow_by_incoming_edges, grow_by_outgoing_edges, grow_children,
    root_candidates, Candidate, CandidateSink, GrowthError, IncomingGrowth, Orientation,
    OutgoingGrowth,
};

/// Prelude for convenient usage.
pub mod prelude {
    pub use crate::code::{DfsCode, DfsStep, Direction};
    pub use crate::embedding::DfsEmbedding;
    pub use crate::graph::{
        DirectedMultigraph, EdgeId, EdgeLabel, GraphBuilder, GraphError, GraphId, GraphView,
        VertexId, VertexLabel,
    };
    pub use crate::grow::{
        grow_all_children, grow_by_incoming_edges, grow_by_outgoing_edges, grow_children,
        root_candidates, Candidate, CandidateSink, GrowthError, IncomingGrowth, Orientation,
        OutgoingGrowth,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    fn triangle() -> DirectedMultigraph {
        // a --0--> b --1--> c --2--> a, all vertices labeled 0
        let mut builder = GraphBuilder::new(GraphId::new(3));
        let a = builder.add_vertex(VertexLabel::new(0));
        let b = builder.add_vertex(VertexLabel::new(0));
        let c = builder.add_vertex(VertexLabel::new(0));
        builder.add_edge(a, b, EdgeLabel::new(0)).unwrap();
        builder.add_edge(b, c, EdgeLabel::new(1)).unwrap();
        builder.add_edge(c, a, EdgeLabel::new(2)).unwrap();
        builder.build()
    }

    /// Grows the directed triangle pattern edge by edge: two forward steps
    /// and one backward step closing the cycle.
    #[test]
    fn triangle_grows_in_three_generations() {
        let graph = triangle();
        let a = VertexId::new(0);

        let parent = DfsCode::root(VertexLabel::new(0));
        let embedding = DfsEmbedding::root(graph.graph_id(), a);

        let mut first = Vec::new();
        grow_by_outgoing_edges(&graph, &parent, &embedding, &mut first).unwrap();
        assert_eq!(first.len(), 1);

        let mut second = Vec::new();
        grow_by_outgoing_edges(&graph, &first[0].code, &first[0].embedding, &mut second)
            .unwrap();
        assert_eq!(second.len(), 1);

        let mut third = Vec::new();
        grow_by_outgoing_edges(&graph, &second[0].code, &second[0].embedding, &mut third)
            .unwrap();
        assert_eq!(third.len(), 1);

        let closed = &third[0];
        assert_eq!(
            closed.code.steps(),
            &[
                DfsStep::Forward {
                    from_time: 0,
                    to_time: 1,
                    edge_label: EdgeLabel::new(0),
                    direction: Direction::Outgoing,
                    to_label: VertexLabel::new(0),
                },
                DfsStep::Forward {
                    from_time: 1,
                    to_time: 2,
                    edge_label: EdgeLabel::new(1),
                    direction: Direction::Outgoing,
                    to_label: VertexLabel::new(0),
                },
                DfsStep::Backward {
                    from_time: 2,
                    to_time: 0,
                    edge_label: EdgeLabel::new(2),
                    direction: Direction::Outgoing,
                },
            ]
        );
        assert_eq!(closed.code.vertex_count(), 3);
        assert_eq!(closed.embedding.edge_ids().len(), 3);

        // the closed triangle has no further outgoing extensions
        let mut fourth = Vec::new();
        grow_by_outgoing_edges(&graph, &closed.code, &closed.embedding, &mut fourth).unwrap();
        assert!(fourth.is_empty());
    }

    /// An edge consumed by one child remains available to a sibling grown
    /// independently from the same parent, and to that sibling's lineage.
    #[test]
    fn sibling_lineages_do_not_alias_used_edges() {
        // a -> b (0), a -> c (1): two siblings from the root at a
        let mut builder = GraphBuilder::new(GraphId::new(0));
        let a = builder.add_vertex(VertexLabel::new(0));
        let b = builder.add_vertex(VertexLabel::new(1));
        let c = builder.add_vertex(VertexLabel::new(1));
        let e0 = builder.add_edge(a, b, EdgeLabel::new(0)).unwrap();
        let e1 = builder.add_edge(a, c, EdgeLabel::new(0)).unwrap();
        let graph = builder.build();

        let parent = DfsCode::root(VertexLabel::new(0));
        let embedding = DfsEmbedding::root(graph.graph_id(), a);

        let mut siblings = Vec::new();
        grow_by_outgoing_edges(&graph, &parent, &embedding, &mut siblings).unwrap();
        assert_eq!(siblings.len(), 2);

        let reaches_b = siblings
            .iter()
            .find(|s| s.embedding.contains_edge_id(e0))
            .unwrap();
        let reaches_c = siblings
            .iter()
            .find(|s| s.embedding.contains_edge_id(e1))
            .unwrap();
        assert!(!reaches_b.embedding.contains_edge_id(e1));
        assert!(!reaches_c.embedding.contains_edge_id(e0));

        // the sibling that went to b can still grow over e1
        let mut grand = Vec::new();
        grow_by_outgoing_edges(&graph, &reaches_b.code, &reaches_b.embedding, &mut grand)
            .unwrap();
        assert_eq!(grand.len(), 1);
        assert!(grand[0].embedding.contains_edge_id(e1));
    }

    /// Seeding plus one merged generation over the triangle.
    #[test]
    fn seeded_generation_over_the_triangle() {
        let graph = triangle();
        let mut roots = Vec::new();
        root_candidates(&graph, &mut roots).unwrap();
        assert_eq!(roots.len(), 3);

        let mut children = Vec::new();
        for root in &roots {
            grow_all_children(&graph, &root.code, &root.embedding, &mut children).unwrap();
        }
        // each vertex has one outgoing and one incoming edge
        assert_eq!(children.len(), 6);
        assert!(children.iter().all(|child| child.code.len() == 1));
        assert!(children
            .iter()
            .all(|child| child.embedding.graph_id() == graph.graph_id()));
    }
}
