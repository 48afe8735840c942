//! End-to-end tests for the shortest-path traversal
//!
//! Tests cover:
//! - Correctness on small hand-built graphs (decrease-key scenarios)
//! - Unreachable targets and invalid input
//! - Repeated queries and zero-weight edges
//! - Larger grids checked against the lazy traversal
//! - Loading DIMACS input

use indexed_heap_dijkstra::dijkstra::{shortest_path, Dijkstra, TraversalStats};
use indexed_heap_dijkstra::graph::{AdjacencyList, Graph, VertexId};
use indexed_heap_dijkstra::PathError;

// ============================================================================
// Helpers
// ============================================================================

fn grid(width: usize, height: usize) -> AdjacencyList {
    let mut graph = AdjacencyList::new(width * height);
    for y in 0..height {
        for x in 0..width {
            let node = y * width + x;
            // Deterministic, uneven weights so many equal-length paths differ
            let w = ((x * 7 + y * 13) % 5 + 1) as f64;
            if x + 1 < width {
                graph.add_undirected_edge(node, node + 1, w);
            }
            if y + 1 < height {
                graph.add_undirected_edge(node, node + width, w + 0.5);
            }
        }
    }
    graph
}

// ============================================================================
// Correctness
// ============================================================================

#[test]
fn test_prefers_cheaper_longer_path() {
    let graph = AdjacencyList::from_edges(4, &[(0, 1, 4.0), (0, 2, 1.0), (2, 1, 1.0), (1, 3, 1.0)]);

    let path = shortest_path(&graph, 0, 3).unwrap();
    assert_eq!(path.total_distance(), 3.0);
    assert_eq!(path.vertices_from_source(), vec![0, 2, 1, 3]);
    assert_eq!(path.steps(), &[(3, 3.0), (1, 2.0), (2, 1.0), (0, 0.0)]);
}

#[test]
fn test_repeated_decrease_key_on_same_vertex() {
    // Vertex 4 is discovered at 100 and improved three times before it is popped
    let graph = AdjacencyList::from_edges(
        5,
        &[
            (0, 4, 100.0),
            (0, 1, 1.0),
            (0, 2, 2.0),
            (0, 3, 3.0),
            (1, 4, 50.0),
            (2, 4, 20.0),
            (3, 4, 4.0),
        ],
    );

    let tree = Dijkstra::new(&graph).check_invariants(true).run(0).unwrap();
    assert_eq!(tree.distance(4), Some(7.0));
    assert_eq!(tree.predecessor(4), Some(3));
    assert_eq!(
        tree.stats(),
        TraversalStats {
            pushes: 5,
            pops: 5,
            stale_pops: 0,
            repositions: 3,
            relaxations: 7,
        }
    );
}

#[test]
fn test_undirected_weighted_graph() {
    //     A --1-- B --2-- C
    //     |               |
    //     4               1
    //     |               |
    //     D -------1----- E
    let (a, b, c, d, e) = (0, 1, 2, 3, 4);
    let mut graph = AdjacencyList::new(5);
    graph.add_undirected_edge(a, b, 1.0);
    graph.add_undirected_edge(b, c, 2.0);
    graph.add_undirected_edge(c, e, 1.0);
    graph.add_undirected_edge(a, d, 4.0);
    graph.add_undirected_edge(d, e, 1.0);

    let path = shortest_path(&graph, a, e).unwrap();
    assert_eq!(path.total_distance(), 4.0);
    assert_eq!(path.vertices_from_source(), vec![a, b, c, e]);

    let back = shortest_path(&graph, e, a).unwrap();
    assert_eq!(back.total_distance(), 4.0);
}

#[test]
fn test_zero_weight_edges() {
    let graph = AdjacencyList::from_edges(4, &[(0, 1, 0.0), (1, 2, 0.0), (2, 3, 0.0), (0, 3, 0.5)]);
    let tree = Dijkstra::new(&graph).run(0).unwrap();
    assert_eq!(tree.distances(), vec![Some(0.0); 4]);
    assert_eq!(tree.path_to(3).unwrap().vertices_from_source(), vec![0, 1, 2, 3]);
}

#[test]
fn test_cycle_in_graph() {
    let graph = AdjacencyList::from_edges(3, &[(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0), (1, 0, 1.0)]);
    let tree = Dijkstra::new(&graph).run(0).unwrap();
    assert_eq!(tree.distances(), vec![Some(0.0), Some(1.0), Some(2.0)]);
}

#[test]
fn test_self_loops_and_parallel_edges() {
    let graph = AdjacencyList::from_edges(2, &[(0, 0, 1.0), (0, 1, 9.0), (0, 1, 2.0), (1, 1, 0.0)]);
    let path = shortest_path(&graph, 0, 1).unwrap();
    assert_eq!(path.total_distance(), 2.0);
}

#[test]
fn test_large_grid_matches_lazy() {
    let graph = grid(40, 40);
    let dijkstra = Dijkstra::new(&graph);
    let indexed = dijkstra.run(0).unwrap();
    let lazy = dijkstra.run_lazy(0).unwrap();

    assert_eq!(indexed.distances(), lazy.distances());
    assert!(indexed.stats().repositions > 0);
    assert_eq!(indexed.stats().pushes, graph.vertex_count());
    assert!(lazy.stats().pushes > indexed.stats().pushes);

    let last = graph.vertex_count() - 1;
    let path = indexed.path_to(last).unwrap();
    assert_eq!(path.source(), 0);
    assert_eq!(path.target(), last);
}

#[test]
fn test_reached_in_non_decreasing_order() {
    let graph = grid(15, 10);
    let tree = Dijkstra::new(&graph).run(37).unwrap();
    let distances: Vec<f64> = tree.reached().map(|record| record.distance).collect();
    assert_eq!(distances.len(), graph.vertex_count());
    assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_requery_gives_identical_results() {
    let graph = grid(12, 12);
    let dijkstra = Dijkstra::new(&graph);
    let first = dijkstra.run(5).unwrap();
    let second = dijkstra.run(5).unwrap();

    assert_eq!(first.distances(), second.distances());
    for v in 0..graph.vertex_count() {
        assert_eq!(first.predecessor(v), second.predecessor(v));
    }
    assert_eq!(first.stats(), second.stats());
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_unreachable_target_is_reported() {
    let graph = AdjacencyList::from_edges(4, &[(0, 1, 1.0), (2, 3, 1.0)]);
    assert_eq!(
        shortest_path(&graph, 0, 3),
        Err(PathError::Unreachable { origin: 0, target: 3 })
    );

    let tree = Dijkstra::new(&graph).run(0).unwrap();
    assert!(tree.is_reachable(1));
    assert!(!tree.is_reachable(2));
    assert_eq!(tree.record(3), None);
}

#[test]
fn test_reverse_edge_is_not_followed() {
    let graph = AdjacencyList::from_edges(2, &[(1, 0, 1.0)]);
    assert!(matches!(
        shortest_path(&graph, 0, 1),
        Err(PathError::Unreachable { .. })
    ));
}

#[test]
fn test_invalid_input_is_rejected_before_traversal() {
    let empty = AdjacencyList::new(0);
    assert_eq!(shortest_path(&empty, 0, 0), Err(PathError::EmptyGraph));

    let graph = AdjacencyList::from_edges(3, &[(0, 1, 1.0)]);
    let err = shortest_path(&graph, 3, 0).unwrap_err();
    assert_eq!(err.to_string(), "vertex 3 out of range for graph with 3 vertices");

    let nan = AdjacencyList::from_edges(2, &[(0, 1, f64::NAN)]);
    assert!(matches!(
        Dijkstra::new(&nan).run(0),
        Err(PathError::InvalidWeight { from: 0, to: 1, .. })
    ));
}

#[test]
fn test_error_messages() {
    let err = PathError::Unreachable { origin: 2, target: 7 };
    assert_eq!(err.to_string(), "vertex 7 is not reachable from 2");

    let err = PathError::InvalidWeight {
        from: 1,
        to: 2,
        weight: -0.5,
    };
    assert_eq!(err.to_string(), "edge 1 -> 2 has invalid weight -0.5");
}

// ============================================================================
// DIMACS input
// ============================================================================

#[test]
fn test_dimacs_round_trip_query() {
    let input = "\
c 9th DIMACS challenge style
p sp 5 6
a 1 2 4
a 1 3 1
a 3 2 1
a 2 4 1
a 4 5 3
a 5 1 1
";
    let graph = AdjacencyList::from_dimacs(input.as_bytes()).unwrap();
    assert_eq!(graph.vertex_count(), 5);
    assert_eq!(graph.edge_count(), 6);

    let path = shortest_path(&graph, 0, 4).unwrap();
    assert_eq!(path.total_distance(), 6.0);
    let expected: Vec<VertexId> = vec![0, 2, 1, 3, 4];
    assert_eq!(path.vertices_from_source(), expected);
    assert_eq!(path.to_string(), "n4 6\nn3 3\nn1 2\nn2 1\nn0 0\n");
}
