//! Rightmost-path pattern growth.
//!
//! Given a parent (code, embedding) pair and a host graph view, the engine
//! enumerates every valid one-edge extension of the pattern together with
//! the extended embedding. Extensions follow the canonical discipline of
//! DFS-code growth: forward edges may leave from any rightmost-path vertex,
//! backward edges only from the deepest one. This bounds the branching
//! factor and is what makes a later canonical-minimality comparison
//! meaningful; that comparison itself, like frequency counting and search
//! scheduling, lives in the surrounding miner, not here.
//!
//! The two traversal directions share one algorithm, parameterized over an
//! [`Orientation`]: a zero-sized strategy supplying the direction-specific
//! incidence lookup and far-endpoint resolution. Dispatch is static.
//!
//! # Citations
//! - Rightmost extension: Yan & Han, "gSpan: Graph-based substructure
//!   pattern mining" (ICDM 2002)
//! - Growth on directed multigraphs: Petermann et al., "DIMSpan" (2017)

use crate::code::{DfsCode, Direction};
use crate::embedding::DfsEmbedding;
use crate::graph::{EdgeId, GraphView, VertexId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// Fatal growth failure.
///
/// Every variant signals a bug in the caller or an upstream collaborator:
/// an embedding referring to times or ids the graph view does not know.
/// Growth never recovers from these; it propagates them so the search driver
/// can abort the branch instead of continuing with an inconsistent
/// embedding. An empty candidate set is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GrowthError {
    /// A rightmost-path time is not mapped by the parent embedding.
    #[error("pattern time {0} is not mapped by the parent embedding")]
    UnmappedTime(usize),
    /// The embedding maps a time to a vertex the graph view does not know.
    #[error("host vertex {0} is unknown to the graph view")]
    UnknownVertex(VertexId),
    /// An incidence list referenced an edge the graph view does not know.
    #[error("host edge {0} is unknown to the graph view")]
    UnknownEdge(EdgeId),
}

/// A child (code, embedding) pair produced by growth.
///
/// The embedding carries the id of the host graph it was grown in, which is
/// what a downstream support counter groups occurrences by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Extended pattern code.
    pub code: DfsCode,
    /// Extended occurrence of that code.
    pub embedding: DfsEmbedding,
}

/// Caller-owned accumulator for emitted candidates.
///
/// The sink is the only mutable state a growth call touches. Drivers that
/// grow concurrently keep one sink per worker and merge afterwards; the
/// engine makes no ordering guarantee across interleaved calls.
pub trait CandidateSink {
    /// Accepts one emitted candidate.
    fn accept(&mut self, candidate: Candidate);
}

impl CandidateSink for Vec<Candidate> {
    #[inline]
    fn accept(&mut self, candidate: Candidate) {
        self.push(candidate);
    }
}

/// Direction-specific half of the growth algorithm.
///
/// Exactly two implementations exist: [`OutgoingGrowth`] traverses edges
/// source → target, [`IncomingGrowth`] target → source. Both are unit
/// structs, so the shared algorithm monomorphizes per direction with no
/// dispatch overhead.
pub trait Orientation {
    /// Direction tag recorded on every step this variant emits.
    const DIRECTION: Direction;

    /// Incident edges of `vertex` in this variant's direction.
    fn incident_edge_ids<G: GraphView + ?Sized>(graph: &G, vertex: VertexId)
        -> Option<&[EdgeId]>;

    /// The endpoint of `edge` opposite to the traversal origin.
    fn far_vertex<G: GraphView + ?Sized>(graph: &G, edge: EdgeId) -> Option<VertexId>;
}

/// Grows along edges whose source is the rightmost-path vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutgoingGrowth;

impl Orientation for OutgoingGrowth {
    const DIRECTION: Direction = Direction::Outgoing;

    #[inline]
    fn incident_edge_ids<G: GraphView + ?Sized>(
        graph: &G,
        vertex: VertexId,
    ) -> Option<&[EdgeId]> {
        graph.edge_ids_by_source(vertex)
    }

    #[inline]
    fn far_vertex<G: GraphView + ?Sized>(graph: &G, edge: EdgeId) -> Option<VertexId> {
        graph.edge_target(edge)
    }
}

/// Grows along edges whose target is the rightmost-path vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncomingGrowth;

impl Orientation for IncomingGrowth {
    const DIRECTION: Direction = Direction::Incoming;

    #[inline]
    fn incident_edge_ids<G: GraphView + ?Sized>(
        graph: &G,
        vertex: VertexId,
    ) -> Option<&[EdgeId]> {
        graph.edge_ids_by_target(vertex)
    }

    #[inline]
    fn far_vertex<G: GraphView + ?Sized>(graph: &G, edge: EdgeId) -> Option<VertexId> {
        graph.edge_source(edge)
    }
}

/// Emits every valid one-edge extension of `parent` for one direction.
///
/// Walks the parent's rightmost path deepest-first. At each vertex, every
/// incident edge not yet consumed by the embedding yields at most one
/// candidate:
///
/// - if its far endpoint is already mapped, a **backward** candidate, but
///   only while standing on the deepest vertex;
/// - if its far endpoint is unmapped, a **forward** candidate assigning the
///   next free time, from any rightmost-path vertex.
///
/// The two cases are mutually exclusive per edge, so an edge is offered at
/// most once per (vertex, direction) pass. All inputs are read-only; the
/// only mutation is appending to `output`.
pub fn grow_children<O, G, S>(
    graph: &G,
    parent: &DfsCode,
    parent_embedding: &DfsEmbedding,
    output: &mut S,
) -> Result<(), GrowthError>
where
    O: Orientation,
    G: GraphView + ?Sized,
    S: CandidateSink + ?Sized,
{
    let mut is_deepest = true;
    let mut emitted = 0usize;

    for &from_time in parent.rightmost_path() {
        let from_id = parent_embedding
            .vertex_id(from_time)
            .ok_or(GrowthError::UnmappedTime(from_time))?;
        let edge_ids = O::incident_edge_ids(graph, from_id)
            .ok_or(GrowthError::UnknownVertex(from_id))?;

        for &edge_id in edge_ids {
            // edge-injectivity: one host edge per pattern edge
            if parent_embedding.contains_edge_id(edge_id) {
                continue;
            }

            let to_id =
                O::far_vertex(graph, edge_id).ok_or(GrowthError::UnknownEdge(edge_id))?;

            match parent_embedding.vertex_time(to_id) {
                // backward: both endpoints mapped, deepest vertex only
                Some(to_time) if is_deepest => {
                    let edge_label = graph
                        .edge_label(edge_id)
                        .ok_or(GrowthError::UnknownEdge(edge_id))?;
                    let code =
                        parent.grow_backwards(from_time, to_time, edge_label, O::DIRECTION);
                    let embedding = parent_embedding.grow_backwards(edge_id);
                    output.accept(Candidate { code, embedding });
                    emitted += 1;
                }
                // backward off the deepest vertex: suppressed
                Some(_) => {}
                // forward: far endpoint joins the pattern at the next time
                None => {
                    let edge_label = graph
                        .edge_label(edge_id)
                        .ok_or(GrowthError::UnknownEdge(edge_id))?;
                    let to_label = graph
                        .vertex_label(to_id)
                        .ok_or(GrowthError::UnknownVertex(to_id))?;
                    let to_time = parent.vertex_count();
                    let code = parent.grow_forwards(
                        from_time,
                        to_time,
                        edge_label,
                        O::DIRECTION,
                        to_label,
                    );
                    let embedding = parent_embedding.grow_forwards(edge_id, to_id);
                    output.accept(Candidate { code, embedding });
                    emitted += 1;
                }
            }
        }

        is_deepest = false;
    }

    trace!(
        graph = %graph.graph_id(),
        direction = ?O::DIRECTION,
        parent_steps = parent.len(),
        emitted,
        "grew children"
    );
    Ok(())
}

/// Emits every outgoing-edge extension of `parent`.
pub fn grow_by_outgoing_edges<G, S>(
    graph: &G,
    parent: &DfsCode,
    parent_embedding: &DfsEmbedding,
    output: &mut S,
) -> Result<(), GrowthError>
where
    G: GraphView + ?Sized,
    S: CandidateSink + ?Sized,
{
    grow_children::<OutgoingGrowth, G, S>(graph, parent, parent_embedding, output)
}

/// Emits every incoming-edge extension of `parent`.
pub fn grow_by_incoming_edges<G, S>(
    graph: &G,
    parent: &DfsCode,
    parent_embedding: &DfsEmbedding,
    output: &mut S,
) -> Result<(), GrowthError>
where
    G: GraphView + ?Sized,
    S: CandidateSink + ?Sized,
{
    grow_children::<IncomingGrowth, G, S>(graph, parent, parent_embedding, output)
}

/// Emits the extensions of both directions, outgoing first.
pub fn grow_all_children<G, S>(
    graph: &G,
    parent: &DfsCode,
    parent_embedding: &DfsEmbedding,
    output: &mut S,
) -> Result<(), GrowthError>
where
    G: GraphView + ?Sized,
    S: CandidateSink + ?Sized,
{
    grow_children::<OutgoingGrowth, G, S>(graph, parent, parent_embedding, output)?;
    grow_children::<IncomingGrowth, G, S>(graph, parent, parent_embedding, output)
}

/// Seeds the search: one root (code, embedding) pair per host vertex.
///
/// Frequency filtering and dedup of equal root codes belong to the driver.
pub fn root_candidates<G, S>(graph: &G, output: &mut S) -> Result<(), GrowthError>
where
    G: GraphView + ?Sized,
    S: CandidateSink + ?Sized,
{
    for raw in 0..graph.vertex_count() {
        let vertex = VertexId::new(raw as u32);
        let label = graph
            .vertex_label(vertex)
            .ok_or(GrowthError::UnknownVertex(vertex))?;
        output.accept(Candidate {
            code: DfsCode::root(label),
            embedding: DfsEmbedding::root(graph.graph_id(), vertex),
        });
    }
    Ok(())
}
