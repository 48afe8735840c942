//! Dijkstra's single-source shortest paths on top of the indexed heap
//!
//! The traversal owns one [`DistanceRecord`] per discovered vertex and feeds
//! only vertex ids into an [`IndexedBinaryHeap`]. The heap compares ids by
//! looking up the records' distances, so when a shorter path to a queued
//! vertex is found the record is updated in place and the heap is asked to
//! [`reposition`](IndexedBinaryHeap::reposition) that one slot. No stale
//! entries are ever queued, and the heap never holds more than `vertex_count`
//! elements.
//!
//! # Design
//!
//! Each vertex moves through [`VertexState`] exactly once:
//! `Unseen -> Active(slot) -> Finalized`. A vertex is finalized when it is
//! popped as the minimum; with non-negative weights its distance is optimal at
//! that point and the record is frozen.
//!
//! [`Dijkstra::run_lazy`] is the re-insertion variant on a
//! [`SimpleBinaryHeap`]. It produces the same distances and exists as a
//! baseline for tests and benchmarks.
//!
//! # Example
//!
//! ```rust
//! use indexed_heap_dijkstra::dijkstra::{shortest_path, Dijkstra};
//! use indexed_heap_dijkstra::graph::AdjacencyList;
//!
//! let graph = AdjacencyList::from_edges(
//!     4,
//!     &[(0, 1, 4.0), (0, 2, 1.0), (2, 1, 1.0), (1, 3, 1.0)],
//! );
//!
//! let path = shortest_path(&graph, 0, 3).unwrap();
//! assert_eq!(path.total_distance(), 3.0);
//! assert_eq!(path.vertices_from_source(), vec![0, 2, 1, 3]);
//!
//! // The full tree is available through the builder
//! let tree = Dijkstra::new(&graph).run(0).unwrap();
//! assert_eq!(tree.distance(1), Some(2.0));
//! assert_eq!(tree.predecessor(1), Some(2));
//! ```

use std::fmt;

use tracing::{debug, trace};

use crate::error::{PathError, PathResult};
use crate::graph::{Graph, VertexId};
use crate::indexed_binary::{IndexedBinaryHeap, SlotId};
use crate::simple_binary::SimpleBinaryHeap;
use crate::traits::{ByKey, Compare};

/// Best known distance to one vertex and where it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRecord {
    /// The vertex this record describes
    pub vertex: VertexId,
    /// Tentative distance from the source, final once the vertex is finalized
    pub distance: f64,
    /// Vertex from which `distance` was achieved; the source is its own
    /// predecessor
    pub predecessor: VertexId,
}

impl DistanceRecord {
    /// Creates a record for a newly discovered vertex
    pub fn new(vertex: VertexId, distance: f64, predecessor: VertexId) -> Self {
        Self {
            vertex,
            distance,
            predecessor,
        }
    }

    /// Lowers the distance and records the new predecessor
    ///
    /// # Panics
    /// Panics if `distance` is not strictly smaller than the current one.
    pub fn update(&mut self, distance: f64, predecessor: VertexId) {
        assert!(
            distance < self.distance,
            "distance of vertex {} must decrease: {} -> {}",
            self.vertex,
            self.distance,
            distance
        );
        self.distance = distance;
        self.predecessor = predecessor;
    }
}

/// Where a vertex is in the traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexState {
    /// Never pushed
    Unseen,
    /// Queued in the heap under this slot id
    Active(SlotId),
    /// Popped; its distance is final
    Finalized,
}

/// Counters collected during one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Elements pushed onto the heap
    pub pushes: usize,
    /// Elements popped from the heap, stale ones included
    pub pops: usize,
    /// Stale entries skipped (always zero for the indexed traversal)
    pub stale_pops: usize,
    /// In-place decrease-key operations
    pub repositions: usize,
    /// Edges examined from finalized vertices
    pub relaxations: usize,
}

/// Compares vertex ids by the distance in their records
///
/// Vertices without a record compare as infinitely far; the heap never holds
/// one, since a record is written before its vertex is pushed.
struct ByDistance<'a>(&'a [Option<DistanceRecord>]);

impl ByDistance<'_> {
    fn distance(&self, vertex: VertexId) -> f64 {
        self.0[vertex].map_or(f64::INFINITY, |record| record.distance)
    }
}

impl Compare<VertexId> for ByDistance<'_> {
    fn lt(&self, a: &VertexId, b: &VertexId) -> bool {
        self.distance(*a) < self.distance(*b)
    }

    fn le(&self, a: &VertexId, b: &VertexId) -> bool {
        self.distance(*a) <= self.distance(*b)
    }
}

/// Queue entry of the lazy traversal
#[derive(Debug, Clone, Copy)]
struct Frontier {
    distance: f64,
    vertex: VertexId,
}

/// Configures and runs a shortest-path traversal over a graph
///
/// # Example
///
/// ```rust
/// use indexed_heap_dijkstra::dijkstra::Dijkstra;
/// use indexed_heap_dijkstra::graph::AdjacencyList;
///
/// let graph = AdjacencyList::from_edges(3, &[(0, 1, 2.0), (1, 2, 2.0)]);
/// let tree = Dijkstra::new(&graph)
///     .check_invariants(true)
///     .max_distance(3.0)
///     .run(0)
///     .unwrap();
///
/// assert_eq!(tree.distance(1), Some(2.0));
/// assert_eq!(tree.distance(2), None); // beyond max_distance
/// ```
#[derive(Debug, Clone)]
pub struct Dijkstra<'g, G: ?Sized> {
    graph: &'g G,
    validate_weights: bool,
    check_invariants: bool,
    max_distance: f64,
}

impl<'g, G: Graph + ?Sized> Dijkstra<'g, G> {
    /// Creates a traversal over `graph` with default settings
    ///
    /// Defaults: weights are validated, heap invariants are not checked, and
    /// the search is unbounded.
    pub fn new(graph: &'g G) -> Self {
        Dijkstra {
            graph,
            validate_weights: true,
            check_invariants: false,
            max_distance: f64::INFINITY,
        }
    }

    /// Sets whether every edge is checked for a finite, non-negative weight
    /// before the traversal starts
    ///
    /// With validation off, a negative weight gives meaningless distances.
    pub fn validate_weights(mut self, enabled: bool) -> Self {
        self.validate_weights = enabled;
        self
    }

    /// Sets whether the heap validates all of its invariants after every
    /// operation (O(n) each)
    pub fn check_invariants(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }

    /// Sets the largest distance worth exploring
    ///
    /// Vertices farther than this are never queued and stay unreachable.
    /// The source is always reached at distance 0, even when the bound is
    /// negative.
    ///
    /// # Panics
    /// Panics if `distance` is NaN.
    pub fn max_distance(mut self, distance: f64) -> Self {
        assert!(!distance.is_nan(), "max_distance must not be NaN");
        self.max_distance = distance;
        self
    }

    /// Computes distances and predecessors from `source` using in-place
    /// decrease-key
    ///
    /// # Errors
    /// [`PathError::EmptyGraph`] and [`PathError::VertexOutOfRange`] for a bad
    /// source, [`PathError::InvalidWeight`] when weight validation is on and
    /// an edge fails it.
    pub fn run(&self, source: VertexId) -> PathResult<ShortestPathTree> {
        self.prepare(source)?;

        let n = self.graph.vertex_count();
        let mut records: Vec<Option<DistanceRecord>> = vec![None; n];
        let mut states = vec![VertexState::Unseen; n];
        let mut order = Vec::new();
        let mut stats = TraversalStats::default();
        let mut heap =
            IndexedBinaryHeap::with_capacity(n).with_invariant_checks(self.check_invariants);

        debug!(source, vertices = n, "starting indexed traversal");

        records[source] = Some(DistanceRecord::new(source, 0.0, source));
        let slot = heap.push(source, &ByDistance(&records));
        states[source] = VertexState::Active(slot);
        stats.pushes += 1;

        while let Some(current) = heap.pop(&ByDistance(&records)) {
            stats.pops += 1;
            states[current] = VertexState::Finalized;
            order.push(current);

            let base = ByDistance(&records).distance(current);
            trace!(vertex = current, distance = base, "finalized");

            for edge in self.graph.out_edges(current) {
                stats.relaxations += 1;
                let candidate = base + edge.weight;

                match states[edge.to] {
                    VertexState::Unseen => {
                        if candidate > self.max_distance {
                            continue;
                        }
                        records[edge.to] = Some(DistanceRecord::new(edge.to, candidate, current));
                        let slot = heap.push(edge.to, &ByDistance(&records));
                        states[edge.to] = VertexState::Active(slot);
                        stats.pushes += 1;
                    }
                    VertexState::Active(slot) => {
                        let Some(record) = records[edge.to].as_mut() else {
                            unreachable!("active vertex {} without record", edge.to);
                        };
                        if candidate < record.distance {
                            record.update(candidate, current);
                            heap.reposition(slot, &ByDistance(&records));
                            stats.repositions += 1;
                            trace!(
                                vertex = edge.to,
                                distance = candidate,
                                via = current,
                                "decrease-key"
                            );
                        }
                    }
                    VertexState::Finalized => {}
                }
            }
        }

        debug!(
            source,
            reached = order.len(),
            pushes = stats.pushes,
            repositions = stats.repositions,
            "indexed traversal finished"
        );

        Ok(ShortestPathTree {
            source,
            records,
            order,
            stats,
        })
    }

    /// Computes the same tree by re-inserting improved vertices into a heap
    /// without slot ids and skipping stale entries on pop
    ///
    /// # Errors
    /// Same as [`run`](Self::run).
    pub fn run_lazy(&self, source: VertexId) -> PathResult<ShortestPathTree> {
        self.prepare(source)?;

        let n = self.graph.vertex_count();
        let mut records: Vec<Option<DistanceRecord>> = vec![None; n];
        let mut finalized = vec![false; n];
        let mut order = Vec::new();
        let mut stats = TraversalStats::default();
        let mut heap = SimpleBinaryHeap::with_capacity_and_comparator(
            n,
            ByKey(|entry: &Frontier| entry.distance),
        );

        debug!(source, vertices = n, "starting lazy traversal");

        records[source] = Some(DistanceRecord::new(source, 0.0, source));
        heap.push(Frontier {
            distance: 0.0,
            vertex: source,
        });
        stats.pushes += 1;

        while let Some(Frontier { distance, vertex }) = heap.pop() {
            stats.pops += 1;
            let current_best = ByDistance(&records).distance(vertex);
            if finalized[vertex] || distance > current_best {
                stats.stale_pops += 1;
                continue;
            }
            finalized[vertex] = true;
            order.push(vertex);

            for edge in self.graph.out_edges(vertex) {
                stats.relaxations += 1;
                if finalized[edge.to] {
                    continue;
                }
                let candidate = distance + edge.weight;
                if candidate > self.max_distance {
                    continue;
                }
                if let Some(record) = records[edge.to].as_mut() {
                    if candidate >= record.distance {
                        continue;
                    }
                    record.update(candidate, vertex);
                } else {
                    records[edge.to] = Some(DistanceRecord::new(edge.to, candidate, vertex));
                }
                heap.push(Frontier {
                    distance: candidate,
                    vertex: edge.to,
                });
                stats.pushes += 1;
            }
        }

        debug!(
            source,
            reached = order.len(),
            pushes = stats.pushes,
            stale = stats.stale_pops,
            "lazy traversal finished"
        );

        Ok(ShortestPathTree {
            source,
            records,
            order,
            stats,
        })
    }

    /// Input validation shared by both traversals, done before any heap work
    fn prepare(&self, source: VertexId) -> PathResult<()> {
        let vertex_count = self.graph.vertex_count();
        if vertex_count == 0 {
            return Err(PathError::EmptyGraph);
        }
        if source >= vertex_count {
            return Err(PathError::VertexOutOfRange {
                vertex: source,
                vertex_count,
            });
        }
        if self.validate_weights {
            self.graph.validate()?;
        }
        Ok(())
    }
}

/// Result of a traversal: the shortest distance and predecessor of every
/// vertex reached from the source
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: VertexId,
    /// Indexed by vertex; `None` for vertices never reached
    records: Vec<Option<DistanceRecord>>,
    /// Vertices in the order they were finalized
    order: Vec<VertexId>,
    stats: TraversalStats,
}

impl ShortestPathTree {
    /// Returns the source vertex
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Returns the number of vertices of the traversed graph
    pub fn vertex_count(&self) -> usize {
        self.records.len()
    }

    /// Returns the record of `vertex` if it was reached
    pub fn record(&self, vertex: VertexId) -> Option<&DistanceRecord> {
        self.records.get(vertex).and_then(Option::as_ref)
    }

    /// Returns the shortest distance to `vertex`, or `None` if unreachable
    pub fn distance(&self, vertex: VertexId) -> Option<f64> {
        self.record(vertex).map(|record| record.distance)
    }

    /// Returns the predecessor of `vertex` on its shortest path
    ///
    /// The source is its own predecessor.
    pub fn predecessor(&self, vertex: VertexId) -> Option<VertexId> {
        self.record(vertex).map(|record| record.predecessor)
    }

    /// Returns true if `vertex` was reached
    pub fn is_reachable(&self, vertex: VertexId) -> bool {
        self.record(vertex).is_some()
    }

    /// Returns all distances, indexed by vertex
    pub fn distances(&self) -> Vec<Option<f64>> {
        self.records
            .iter()
            .map(|record| record.map(|r| r.distance))
            .collect()
    }

    /// Iterates over reached vertices in finalization order, which is
    /// non-decreasing in distance
    pub fn reached(&self) -> impl Iterator<Item = &DistanceRecord> + '_ {
        self.order
            .iter()
            .filter_map(move |&vertex| self.records[vertex].as_ref())
    }

    /// Returns the counters collected while building this tree
    pub fn stats(&self) -> TraversalStats {
        self.stats
    }

    /// Walks predecessor links from `target` back to the source
    ///
    /// # Errors
    /// [`PathError::VertexOutOfRange`] for a bad target and
    /// [`PathError::Unreachable`] if the target was never reached.
    pub fn path_to(&self, target: VertexId) -> PathResult<Path> {
        let vertex_count = self.records.len();
        if target >= vertex_count {
            return Err(PathError::VertexOutOfRange {
                vertex: target,
                vertex_count,
            });
        }

        let mut steps = Vec::new();
        let mut current = target;
        loop {
            let record = self.records[current]
                .as_ref()
                .ok_or(PathError::Unreachable {
                    origin: self.source,
                    target,
                })?;
            steps.push((current, record.distance));
            if current == self.source {
                break;
            }
            debug_assert!(steps.len() <= vertex_count, "predecessor cycle");
            current = record.predecessor;
        }

        Ok(Path { steps })
    }
}

/// A shortest path, stored from the target back to the source
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// `(vertex, distance from source)` pairs, target first
    steps: Vec<(VertexId, f64)>,
}

impl Path {
    /// Returns the `(vertex, distance)` pairs ordered from target to source
    pub fn steps(&self) -> &[(VertexId, f64)] {
        &self.steps
    }

    /// Returns the target vertex
    pub fn target(&self) -> VertexId {
        self.steps[0].0
    }

    /// Returns the source vertex
    pub fn source(&self) -> VertexId {
        self.steps[self.steps.len() - 1].0
    }

    /// Returns the length of the path
    pub fn total_distance(&self) -> f64 {
        self.steps[0].1
    }

    /// Returns the number of edges on the path
    pub fn edge_count(&self) -> usize {
        self.steps.len() - 1
    }

    /// Returns the vertices ordered from source to target
    pub fn vertices_from_source(&self) -> Vec<VertexId> {
        self.steps.iter().rev().map(|&(vertex, _)| vertex).collect()
    }
}

/// One `n<vertex> <distance>` line per step, target first
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (vertex, distance) in &self.steps {
            writeln!(f, "n{vertex} {distance}")?;
        }
        Ok(())
    }
}

/// Shortest path from `source` to `target` with default settings
///
/// # Errors
/// See [`Dijkstra::run`] and [`ShortestPathTree::path_to`].
pub fn shortest_path<G>(graph: &G, source: VertexId, target: VertexId) -> PathResult<Path>
where
    G: Graph + ?Sized,
{
    Dijkstra::new(graph).run(source)?.path_to(target)
}
