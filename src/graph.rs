//! Read-only graph input for the shortest-path traversal
//!
//! The traversal only needs a vertex count and, per vertex, an iterator over
//! its outgoing `(neighbor, weight)` pairs. [`Graph`] captures exactly that.
//! [`AdjacencyList`] is the owned implementation used throughout the crate,
//! and plain `Vec<Vec<(VertexId, f64)>>` adjacency lists work too.
//!
//! ## DIMACS .gr format
//!
//! [`AdjacencyList::from_dimacs`] reads the format of the 9th DIMACS
//! Implementation Challenge:
//!
//! - Lines starting with 'c' are comments
//! - Line 'p sp n m' defines problem: n nodes, m edges
//! - Lines 'a u v w' define edge from node u to node v with weight w
//!
//! Node ids in the file are 1-based and become `0..n` in memory.

use std::io::BufRead;

use crate::error::{GraphError, PathError};

/// Index of a vertex, in `0..vertex_count`
pub type VertexId = usize;

/// An outgoing edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Head of the edge
    pub to: VertexId,
    /// Non-negative, finite weight
    pub weight: f64,
}

/// A directed graph the traversal can read
pub trait Graph {
    /// Iterator over the outgoing edges of one vertex
    type OutEdges<'a>: Iterator<Item = Edge>
    where
        Self: 'a;

    /// Returns the number of vertices
    fn vertex_count(&self) -> usize;

    /// Returns the outgoing edges of `vertex`
    ///
    /// `vertex` must be in `0..vertex_count()`.
    fn out_edges(&self, vertex: VertexId) -> Self::OutEdges<'_>;

    /// Checks that every edge stays in range and carries a finite,
    /// non-negative weight
    fn validate(&self) -> Result<(), PathError> {
        let vertex_count = self.vertex_count();
        for from in 0..vertex_count {
            for edge in self.out_edges(from) {
                if edge.to >= vertex_count {
                    return Err(PathError::VertexOutOfRange {
                        vertex: edge.to,
                        vertex_count,
                    });
                }
                if !edge.weight.is_finite() || edge.weight < 0.0 {
                    return Err(PathError::InvalidWeight {
                        from,
                        to: edge.to,
                        weight: edge.weight,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Adjacency list graph representation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyList {
    /// Adjacency list: vertex -> [edge, ...]
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl AdjacencyList {
    /// Creates a graph with `vertex_count` vertices and no edges
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Like [`new`](Self::new), but returns `None` instead of aborting when
    /// the vertex table cannot be allocated
    fn try_new(vertex_count: usize) -> Option<Self> {
        let mut adjacency = Vec::new();
        adjacency.try_reserve_exact(vertex_count).ok()?;
        adjacency.resize_with(vertex_count, Vec::new);
        Some(Self {
            adjacency,
            edge_count: 0,
        })
    }

    /// Builds a graph from `(from, to, weight)` triples
    ///
    /// # Panics
    /// Panics if an endpoint is out of range.
    pub fn from_edges(vertex_count: usize, edges: &[(VertexId, VertexId, f64)]) -> Self {
        let mut graph = Self::new(vertex_count);
        for &(from, to, weight) in edges {
            graph.add_edge(from, to, weight);
        }
        graph
    }

    /// Adds a directed edge
    ///
    /// Weights are not checked here; see [`Graph::validate`].
    ///
    /// # Panics
    /// Panics if `from` or `to` is out of range.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: f64) {
        let n = self.adjacency.len();
        assert!(from < n, "from vertex {from} out of range for {n} vertices");
        assert!(to < n, "to vertex {to} out of range for {n} vertices");
        self.adjacency[from].push(Edge { to, weight });
        self.edge_count += 1;
    }

    /// Adds an edge in both directions
    pub fn add_undirected_edge(&mut self, a: VertexId, b: VertexId, weight: f64) {
        self.add_edge(a, b, weight);
        self.add_edge(b, a, weight);
    }

    /// Returns the number of directed edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the outgoing edges of `vertex` as a slice
    pub fn edges(&self, vertex: VertexId) -> &[Edge] {
        &self.adjacency[vertex]
    }

    /// Parses a DIMACS `.gr` shortest-path file
    ///
    /// Comment lines and unknown line kinds are skipped. Arc lines must come
    /// after the problem line and reference vertices in `1..=n`.
    pub fn from_dimacs<R: BufRead>(reader: R) -> Result<Self, GraphError> {
        let mut graph: Option<AdjacencyList> = None;
        let mut declared_edges = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('c') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();

            match parts[0] {
                "p" => {
                    if graph.is_some() {
                        return Err(GraphError::Parse {
                            line: line_no,
                            message: "duplicate problem line".to_string(),
                        });
                    }
                    if parts.len() < 4 || parts[1] != "sp" {
                        return Err(GraphError::Parse {
                            line: line_no,
                            message: format!("expected 'p sp <nodes> <arcs>', found '{line}'"),
                        });
                    }
                    let nodes = parse_field(parts[2], line_no, "node count")?;
                    declared_edges = parse_field(parts[3], line_no, "arc count")?;
                    graph = Some(AdjacencyList::try_new(nodes).ok_or_else(|| {
                        GraphError::Parse {
                            line: line_no,
                            message: format!("cannot allocate {nodes} vertices"),
                        }
                    })?);
                }
                "a" => {
                    let graph = graph.as_mut().ok_or(GraphError::MissingProblemLine)?;
                    if parts.len() < 4 {
                        return Err(GraphError::Parse {
                            line: line_no,
                            message: format!("expected 'a <from> <to> <weight>', found '{line}'"),
                        });
                    }
                    let from = graph.dimacs_vertex(parts[1], line_no)?;
                    let to = graph.dimacs_vertex(parts[2], line_no)?;
                    let weight: f64 = parts[3].parse().map_err(|_| GraphError::Parse {
                        line: line_no,
                        message: format!("invalid weight '{}'", parts[3]),
                    })?;
                    graph.add_edge(from, to, weight);
                }
                _ => {}
            }
        }

        let graph = graph.ok_or(GraphError::MissingProblemLine)?;
        if graph.edge_count != declared_edges {
            tracing::warn!(
                declared = declared_edges,
                read = graph.edge_count,
                "DIMACS arc count does not match problem line"
            );
        }
        tracing::debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count,
            "loaded DIMACS graph"
        );
        Ok(graph)
    }

    /// Converts a 1-based DIMACS node id to a vertex id
    fn dimacs_vertex(&self, field: &str, line: usize) -> Result<VertexId, GraphError> {
        let vertex: usize = parse_field(field, line, "node id")?;
        let vertex_count = self.adjacency.len();
        if vertex == 0 || vertex > vertex_count {
            return Err(GraphError::VertexOutOfRange {
                line,
                vertex,
                vertex_count,
            });
        }
        Ok(vertex - 1)
    }
}

fn parse_field(field: &str, line: usize, what: &str) -> Result<usize, GraphError> {
    field.parse().map_err(|_| GraphError::Parse {
        line,
        message: format!("invalid {what} '{field}'"),
    })
}

impl Graph for AdjacencyList {
    type OutEdges<'a> = std::iter::Copied<std::slice::Iter<'a, Edge>>;

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn out_edges(&self, vertex: VertexId) -> Self::OutEdges<'_> {
        self.adjacency[vertex].iter().copied()
    }
}

/// Plain adjacency lists of `(neighbor, weight)` pairs
impl Graph for Vec<Vec<(VertexId, f64)>> {
    type OutEdges<'a> = std::iter::Map<
        std::slice::Iter<'a, (VertexId, f64)>,
        fn(&(VertexId, f64)) -> Edge,
    >;

    fn vertex_count(&self) -> usize {
        self.len()
    }

    fn out_edges(&self, vertex: VertexId) -> Self::OutEdges<'_> {
        fn to_edge(&(to, weight): &(VertexId, f64)) -> Edge {
            Edge { to, weight }
        }
        self[vertex].iter().map(to_edge as fn(&(VertexId, f64)) -> Edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
c tiny sample
p sp 4 4
a 1 2 4
a 1 3 1
a 3 2 1
a 2 4 1
";

    #[test]
    fn test_from_edges() {
        let g = AdjacencyList::from_edges(3, &[(0, 1, 2.0), (0, 2, 5.0), (1, 2, 1.0)]);
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.edges(0).len(), 2);
        let heads: Vec<_> = g.out_edges(0).map(|e| e.to).collect();
        assert_eq!(heads, vec![1, 2]);
        assert!(g.out_edges(2).next().is_none());
    }

    #[test]
    fn test_undirected_edge() {
        let mut g = AdjacencyList::new(2);
        g.add_undirected_edge(0, 1, 3.0);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edges(1), &[Edge { to: 0, weight: 3.0 }]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_add_edge_out_of_range_panics() {
        let mut g = AdjacencyList::new(2);
        g.add_edge(0, 2, 1.0);
    }

    #[test]
    fn test_validate_rejects_bad_weights() {
        let g = AdjacencyList::from_edges(2, &[(0, 1, -1.0)]);
        assert_eq!(
            g.validate(),
            Err(PathError::InvalidWeight {
                from: 0,
                to: 1,
                weight: -1.0
            })
        );

        let g = AdjacencyList::from_edges(2, &[(1, 0, f64::INFINITY)]);
        assert!(matches!(g.validate(), Err(PathError::InvalidWeight { .. })));

        let g = AdjacencyList::from_edges(2, &[(1, 0, 0.0)]);
        assert_eq!(g.validate(), Ok(()));
    }

    #[test]
    fn test_vec_adjacency_validate_catches_range() {
        let g: Vec<Vec<(VertexId, f64)>> = vec![vec![(5, 1.0)], vec![]];
        assert_eq!(
            g.validate(),
            Err(PathError::VertexOutOfRange {
                vertex: 5,
                vertex_count: 2
            })
        );
    }

    #[test]
    fn test_vec_adjacency_edges() {
        let g: Vec<Vec<(VertexId, f64)>> = vec![vec![(1, 2.5)], vec![]];
        let edges: Vec<_> = g.out_edges(0).collect();
        assert_eq!(edges, vec![Edge { to: 1, weight: 2.5 }]);
    }

    #[test]
    fn test_parse_dimacs() {
        let g = AdjacencyList::from_dimacs(SAMPLE.as_bytes()).unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(
            g.edges(0),
            &[Edge { to: 1, weight: 4.0 }, Edge { to: 2, weight: 1.0 }]
        );
        assert_eq!(g.edges(1), &[Edge { to: 3, weight: 1.0 }]);
    }

    #[test]
    fn test_parse_dimacs_errors() {
        let err = AdjacencyList::from_dimacs("a 1 2 3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::MissingProblemLine));

        let err = AdjacencyList::from_dimacs("c only comments\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::MissingProblemLine));

        let err = AdjacencyList::from_dimacs("p sp 2 1\na 1 3 1\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            GraphError::VertexOutOfRange {
                line: 2,
                vertex: 3,
                vertex_count: 2
            }
        ));

        let err = AdjacencyList::from_dimacs("p sp 2 1\na 1 2 heavy\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "line 2: invalid weight 'heavy'");

        let err = AdjacencyList::from_dimacs("p max 2 1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::Parse { line: 1, .. }));

        let err = AdjacencyList::from_dimacs("p sp 18446744073709551615 0\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, GraphError::Parse { line: 1, .. }));
        assert!(err.to_string().contains("cannot allocate"));

        let err = AdjacencyList::from_dimacs("p sp 2 1\na 1 2 1\np sp 3 0\n".as_bytes())
            .unwrap_err();
        assert_eq!(err.to_string(), "line 3: duplicate problem line");
    }
}
