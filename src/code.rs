//! Canonical DFS codes describing patterns as ordered extension sequences.
//!
//! A pattern is serialized as the sequence of one-edge extensions that built
//! it. Pattern vertices are identified by *times*: the order in which a
//! depth-first walk first discovers them. Forward steps introduce a new time;
//! backward steps close an edge between two existing times. The code tracks
//! the derived attributes growth needs: the vertex count and the rightmost
//! path, i.e. the path from the root (time 0) to the most recently added
//! vertex, kept deepest-vertex-first.
//!
//! # Invariants
//! - Times are assigned consecutively from 0 as forward steps occur; a
//!   backward step never introduces a new time.
//! - `vertex_count` equals one plus the highest time used by any forward
//!   step (1 for a root-only code).
//! - `rightmost_path` starts with the deepest vertex and ends with time 0.
//!
//! # Citations
//! - DFS codes and rightmost extension: Yan & Han, "gSpan: Graph-based
//!   substructure pattern mining" (ICDM 2002)
//! - Direction-aware codes for directed graphs: Petermann et al., "DIMSpan"
//!   (2017)

use crate::graph::{EdgeLabel, VertexLabel};
use serde::{Deserialize, Serialize};

/// Traversal direction of one pattern edge, relative to the growth variant
/// that produced it.
///
/// A directed-multigraph pattern is not isomorphic to its direction-reversed
/// counterpart, so every step carries its direction into the canonical code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Direction {
    /// The pattern edge was traversed source → target.
    Outgoing,
    /// The pattern edge was traversed target → source.
    Incoming,
}

/// One extension in a DFS code.
///
/// Forward steps carry the label of the vertex they introduce; backward
/// steps connect two existing times and carry no vertex label. The two
/// shapes are separate variants so a backward step cannot hold a vertex
/// label by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DfsStep {
    /// Adds a new pattern vertex `to_time` and the edge reaching it.
    Forward {
        /// Time the traversal left from (on the rightmost path).
        from_time: usize,
        /// Newly assigned time, equal to the parent's vertex count.
        to_time: usize,
        /// Label of the traversed host edge.
        edge_label: EdgeLabel,
        /// Direction of the traversal.
        direction: Direction,
        /// Label of the newly covered host vertex.
        to_label: VertexLabel,
    },
    /// Adds an edge between two times already present in the pattern.
    Backward {
        /// Time the traversal left from (the deepest rightmost-path vertex).
        from_time: usize,
        /// Already-present time the edge reaches.
        to_time: usize,
        /// Label of the traversed host edge.
        edge_label: EdgeLabel,
        /// Direction of the traversal.
        direction: Direction,
    },
}

impl DfsStep {
    /// Time the step starts from.
    #[inline]
    pub fn from_time(&self) -> usize {
        match *self {
            DfsStep::Forward { from_time, .. } | DfsStep::Backward { from_time, .. } => from_time,
        }
    }

    /// Time the step reaches.
    #[inline]
    pub fn to_time(&self) -> usize {
        match *self {
            DfsStep::Forward { to_time, .. } | DfsStep::Backward { to_time, .. } => to_time,
        }
    }

    /// Label of the traversed edge.
    #[inline]
    pub fn edge_label(&self) -> EdgeLabel {
        match *self {
            DfsStep::Forward { edge_label, .. } | DfsStep::Backward { edge_label, .. } => {
                edge_label
            }
        }
    }

    /// Direction of the traversal.
    #[inline]
    pub fn direction(&self) -> Direction {
        match *self {
            DfsStep::Forward { direction, .. } | DfsStep::Backward { direction, .. } => direction,
        }
    }

    /// Whether this step introduced a new pattern vertex.
    #[inline]
    pub fn is_forward(&self) -> bool {
        matches!(self, DfsStep::Forward { .. })
    }
}

/// Canonical, order-sensitive description of a pattern.
///
/// A `DfsCode` is an immutable value: [`DfsCode::grow_forwards`] and
/// [`DfsCode::grow_backwards`] produce a new code owned independently of its
/// parent, so parent/child codes form a tree with no back-references and
/// concurrent growth over disjoint parents needs no locking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DfsCode {
    /// Label of the root vertex (time 0).
    root_label: VertexLabel,
    /// Extensions in application order.
    steps: Vec<DfsStep>,
    /// Number of distinct pattern vertices.
    vertex_count: usize,
    /// Times on the path root → rightmost vertex, deepest-first.
    rightmost_path: Vec<usize>,
}

impl DfsCode {
    /// Creates the root-only code of a single-vertex pattern.
    ///
    /// Its rightmost path is `[0]`: growth from a root code still offers
    /// forward candidates for the root vertex itself.
    pub fn root(root_label: VertexLabel) -> Self {
        Self {
            root_label,
            steps: Vec::new(),
            vertex_count: 1,
            rightmost_path: vec![0],
        }
    }

    /// Appends a forward step, introducing vertex `to_time`.
    ///
    /// `from_time` must lie on the rightmost path and `to_time` must equal
    /// the current vertex count; both are pattern-growth invariants, so a
    /// violation is a caller bug and panics.
    ///
    /// The child's rightmost path is the parent path cut at `from_time` with
    /// the new vertex prepended, which is O(depth) without a full
    /// recomputation.
    pub fn grow_forwards(
        &self,
        from_time: usize,
        to_time: usize,
        edge_label: EdgeLabel,
        direction: Direction,
        to_label: VertexLabel,
    ) -> Self {
        assert_eq!(
            to_time, self.vertex_count,
            "forward growth must assign the next free time"
        );
        let cut = self
            .rightmost_path
            .iter()
            .position(|&time| time == from_time)
            .expect("forward growth must start on the rightmost path");

        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(DfsStep::Forward {
            from_time,
            to_time,
            edge_label,
            direction,
            to_label,
        });

        let mut rightmost_path = Vec::with_capacity(self.rightmost_path.len() - cut + 1);
        rightmost_path.push(to_time);
        rightmost_path.extend_from_slice(&self.rightmost_path[cut..]);

        Self {
            root_label: self.root_label,
            steps,
            vertex_count: self.vertex_count + 1,
            rightmost_path,
        }
    }

    /// Appends a backward step between two existing times.
    ///
    /// `from_time` must be the deepest rightmost-path vertex and `to_time`
    /// a time already present in the pattern. The vertex count and the
    /// rightmost path are unchanged; only the extension sequence grows.
    pub fn grow_backwards(
        &self,
        from_time: usize,
        to_time: usize,
        edge_label: EdgeLabel,
        direction: Direction,
    ) -> Self {
        assert_eq!(
            Some(&from_time),
            self.rightmost_path.first(),
            "backward growth must start at the deepest rightmost-path vertex"
        );
        assert!(
            to_time < self.vertex_count,
            "backward growth must reach an existing time"
        );

        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(DfsStep::Backward {
            from_time,
            to_time,
            edge_label,
            direction,
        });

        Self {
            root_label: self.root_label,
            steps,
            vertex_count: self.vertex_count,
            rightmost_path: self.rightmost_path.clone(),
        }
    }

    /// Label of the root vertex.
    #[inline]
    pub fn root_label(&self) -> VertexLabel {
        self.root_label
    }

    /// Extensions in application order.
    #[inline]
    pub fn steps(&self) -> &[DfsStep] {
        &self.steps
    }

    /// Number of extensions applied so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether this is a root-only code.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of distinct pattern vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Times on the path root → rightmost vertex, deepest-first.
    #[inline]
    pub fn rightmost_path(&self) -> &[usize] {
        &self.rightmost_path
    }

    /// The deepest rightmost-path vertex, i.e. the most recently added one.
    #[inline]
    pub fn rightmost_time(&self) -> usize {
        self.rightmost_path[0]
    }
}
