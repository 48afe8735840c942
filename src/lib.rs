//! Indexed Binary Heap and Decrease-Key Dijkstra
//!
//! This crate provides a binary min-heap whose elements carry stable slot ids,
//! and a single-source shortest-path traversal that uses those ids to perform
//! true decrease-key updates in place instead of re-inserting stale entries.
//!
//! # Features
//!
//! - **Indexed Binary Heap**: O(log n) push, pop and reposition; fixed capacity;
//!   slot ids are recycled only after their holder is popped
//! - **Simple Binary Heap**: O(log n) push and pop, no ids, growable
//! - **Dijkstra**: decrease-key traversal, plus a lazy re-insertion variant for
//!   comparison
//! - **Graph input**: a small read-only [`Graph`] trait, an adjacency list and a
//!   DIMACS `.gr` reader
//!
//! # Example
//!
//! ```rust
//! use indexed_heap_dijkstra::{shortest_path, AdjacencyList, PathError};
//!
//! let graph = AdjacencyList::from_edges(
//!     5,
//!     &[(0, 1, 4.0), (0, 2, 1.0), (2, 1, 1.0), (1, 3, 1.0)],
//! );
//!
//! let path = shortest_path(&graph, 0, 3).unwrap();
//! assert_eq!(path.total_distance(), 3.0);
//! assert_eq!(path.steps(), &[(3, 3.0), (1, 2.0), (2, 1.0), (0, 0.0)]);
//!
//! assert_eq!(
//!     shortest_path(&graph, 0, 4),
//!     Err(PathError::Unreachable { origin: 0, target: 4 })
//! );
//! ```

pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod indexed_binary;
pub mod simple_binary;
pub mod traits;

// Re-export the main types for convenience
pub use dijkstra::{shortest_path, Dijkstra, DistanceRecord, Path, ShortestPathTree};
pub use error::{GraphError, PathError};
pub use graph::{AdjacencyList, Edge, Graph, VertexId};
pub use indexed_binary::{IndexedBinaryHeap, SlotId};
pub use traits::Compare;
