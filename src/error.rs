//! Error types for graph loading and shortest-path queries

use thiserror::Error;

use crate::graph::VertexId;

/// Errors reported by a shortest-path query
///
/// Heap contract violations are not listed here: they are bugs and panic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// The graph has no vertices, so there is no valid source
    #[error("graph has no vertices")]
    EmptyGraph,

    /// A source or target vertex is outside `0..vertex_count`
    #[error("vertex {vertex} out of range for graph with {vertex_count} vertices")]
    VertexOutOfRange {
        /// The offending vertex id
        vertex: VertexId,
        /// Number of vertices in the graph
        vertex_count: usize,
    },

    /// An edge weight is negative or not finite
    #[error("edge {from} -> {to} has invalid weight {weight}")]
    InvalidWeight {
        /// Tail of the edge
        from: VertexId,
        /// Head of the edge
        to: VertexId,
        /// The rejected weight
        weight: f64,
    },

    /// The target has no path from the source
    #[error("vertex {target} is not reachable from {origin}")]
    Unreachable {
        /// Source vertex of the traversal
        origin: VertexId,
        /// Requested target
        target: VertexId,
    },
}

/// Errors raised while reading a graph description
#[derive(Debug, Error)]
pub enum GraphError {
    /// Reading the input failed
    #[error("failed to read graph: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be parsed
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// An arc line appeared before the `p sp n m` problem line, or there was none
    #[error("missing 'p sp <nodes> <arcs>' problem line")]
    MissingProblemLine,

    /// An arc references a vertex outside the declared range
    #[error("line {line}: vertex {vertex} out of range 1..={vertex_count}")]
    VertexOutOfRange {
        /// 1-based line number
        line: usize,
        /// The vertex as written in the file (1-based)
        vertex: usize,
        /// Declared vertex count
        vertex_count: usize,
    },
}

/// Result alias for shortest-path queries
pub type PathResult<T> = Result<T, PathError>;
