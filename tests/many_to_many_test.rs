use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use naive_many_to_many::error::{PathError, QueryError};
use naive_many_to_many::graph_path::GraphPath;
use naive_many_to_many::graph_representation::{Graph, GraphArray, GraphList};
use naive_many_to_many::many_to_many::many_to_many_algorithm::ManyToManyShortestPathsAlgorithm;
use naive_many_to_many::many_to_many::many_to_many_paths::SourceTargetPair;
use naive_many_to_many::many_to_many::naive::NaiveManyToMany;
use naive_many_to_many::shortest_path::dijkstra::DijkstraShortestPath;
use naive_many_to_many::shortest_path::shortest_path_algorithm::ShortestPathAlgorithm;
use naive_many_to_many::types::*;
use naive_many_to_many::utils::node_picker::{pick_random_ball, pick_random_nodes};

const A: NodeId = 0;
const B: NodeId = 1;
const C: NodeId = 2;
const D: NodeId = 3;

//  A ──1── B
//   \      │
//    5     2
//     \    │
//      └── C ──1── D
fn get_undirected_graph() -> GraphList {
    let mut graph = GraphList::with_nodes(4);
    graph.add_undirected_edge(A, B, 1.0);
    graph.add_undirected_edge(B, C, 2.0);
    graph.add_undirected_edge(A, C, 5.0);
    graph.add_undirected_edge(C, D, 1.0);

    graph
}

// 0 -2-> 1 -3-> 2 -10-> 0 and 3 -1-> 0
fn get_directed_graph() -> GraphArray {
    GraphArray::from_arcs(4, &[(0, 1, 2.0), (1, 2, 3.0), (2, 0, 10.0), (3, 0, 1.0)])
}

fn node_set(nodes: &[NodeId]) -> NodeSet {
    nodes.iter().copied().collect()
}

/// counts the single pair queries issued by the many to many solver
struct CountingShortestPath<S> {
    algorithm: S,
    calls: Arc<AtomicUsize>,
}

impl<S: ShortestPathAlgorithm> ShortestPathAlgorithm for CountingShortestPath<S> {

    type Error = S::Error;

    fn get_path(&mut self, source: NodeId, target: NodeId) -> Result<Option<GraphPath>, S::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.algorithm.get_path(source, target)
    }
}

/// a strategy that does not report trivial paths for source == target
struct WithoutTrivialPaths<S> {
    algorithm: S,
}

impl<S: ShortestPathAlgorithm> ShortestPathAlgorithm for WithoutTrivialPaths<S> {

    type Error = S::Error;

    fn get_path(&mut self, source: NodeId, target: NodeId) -> Result<Option<GraphPath>, S::Error> {
        if source == target {
            return Ok(None);
        }

        self.algorithm.get_path(source, target)
    }
}

#[derive(Debug, PartialEq, Error)]
#[error("search budget of {0} settled nodes exhausted")]
struct BudgetExhausted(usize);

/// fails for one specific target, succeeds with a trivial path otherwise
struct FailingShortestPath {
    failing_target: NodeId,
}

impl ShortestPathAlgorithm for FailingShortestPath {

    type Error = BudgetExhausted;

    fn get_path(&mut self, source: NodeId, target: NodeId) -> Result<Option<GraphPath>, BudgetExhausted> {
        if target == self.failing_target {
            return Err(BudgetExhausted(42));
        }

        Ok(Some(GraphPath::single_vertex(source)))
    }
}

#[test]
fn test_end_to_end_scenario() {
    let mut graph = get_undirected_graph();
    let sources = node_set(&[A]);
    let targets = node_set(&[C, D]);

    let paths = NaiveManyToMany::new(&graph).get_many_to_many_paths(&sources, &targets).unwrap();

    assert_eq!(paths.get_weight(A, C), Ok(3.0));
    assert_eq!(paths.get_weight(A, D), Ok(4.0));
    assert_eq!(paths.get_path(A, C).unwrap().map(GraphPath::vertices), Some(vec![A, B, C]));
    assert_eq!(paths.get_path(A, D).unwrap().map(GraphPath::vertices), Some(vec![A, B, C, D]));

    assert!(graph.remove_undirected_edge(C, D));
    let paths = NaiveManyToMany::new(&graph).get_many_to_many_paths(&sources, &targets).unwrap();

    assert_eq!(paths.get_weight(A, D), Ok(INFINITY));
    assert_eq!(paths.get_path(A, D), Ok(None));
    assert_eq!(paths.get_weight(A, C), Ok(3.0));
    assert_eq!(paths.len(), 2);
}

#[test]
fn test_directed_graph_is_not_symmetric() {
    let graph = get_directed_graph();
    let nodes = node_set(&[0, 1, 2, 3]);

    let paths = NaiveManyToMany::new(&graph).get_many_to_many_paths(&nodes, &nodes).unwrap();

    assert_eq!(paths.get_weight(0, 1), Ok(2.0));
    assert_eq!(paths.get_weight(1, 0), Ok(13.0));
    assert_eq!(paths.get_weight(0, 2), Ok(5.0));
    assert_eq!(paths.get_weight(2, 0), Ok(10.0));
    assert_eq!(paths.get_weight(2, 1), Ok(12.0));
    assert_eq!(paths.get_weight(3, 2), Ok(6.0));

    // 3 has no incoming arcs
    for source in [0, 1, 2] {
        assert_eq!(paths.get_weight(source, 3), Ok(INFINITY));
        assert_eq!(paths.get_path(source, 3), Ok(None));
    }
}

#[test]
fn test_weight_matches_path() {
    let graph = get_directed_graph();
    let nodes = node_set(&[0, 1, 2, 3]);

    let paths = NaiveManyToMany::new(&graph).get_many_to_many_paths(&nodes, &nodes).unwrap();

    for source in &nodes {
        for target in &nodes {
            let path = paths.get_path(*source, *target).unwrap();
            let weight = paths.get_weight(*source, *target).unwrap();

            match path {
                Some(path) => assert_eq!(weight, path.weight()),
                None => assert_eq!(weight, INFINITY),
            }
        }
    }
}

#[test]
fn test_every_pair_is_cached() {
    let graph = get_directed_graph();
    let sources = node_set(&[0, 3]);
    let targets = node_set(&[1, 2, 3]);

    let paths = NaiveManyToMany::new(&graph).get_many_to_many_paths(&sources, &targets).unwrap();

    assert_eq!(paths.len(), sources.len() * targets.len());
    assert_eq!(paths.sources(), &sources);
    assert_eq!(paths.targets(), &targets);

    let pairs: Vec<SourceTargetPair> = paths.iter().map(|(pair, _)| pair).collect();
    assert_eq!(pairs, vec![
        SourceTargetPair::new(0, 1), SourceTargetPair::new(0, 2), SourceTargetPair::new(0, 3),
        SourceTargetPair::new(3, 1), SourceTargetPair::new(3, 2), SourceTargetPair::new(3, 3),
    ]);

    // only 0 -> 3 is unreachable
    assert_eq!(paths.iter().filter(|(_, path)| path.is_none()).count(), 1);
}

#[test]
fn test_one_query_per_pair() {
    let graph = get_undirected_graph();
    let calls = Arc::new(AtomicUsize::new(0));
    let sources = node_set(&[A, B, C]);
    let targets = node_set(&[B, D]);

    let solver = NaiveManyToMany::with_factory(&graph, |graph| CountingShortestPath {
        algorithm: DijkstraShortestPath::new(graph),
        calls: Arc::clone(&calls),
    });
    let paths = solver.get_many_to_many_paths(&sources, &targets).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 6);

    // queries are answered from the cache
    let first = paths.get_path(A, D).unwrap().cloned();
    for _ in 0..10 {
        assert_eq!(paths.get_path(A, D).unwrap().cloned(), first);
        assert_eq!(paths.get_weight(C, B), Ok(2.0));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 6);
}

#[test]
fn test_one_algorithm_per_computation() {
    let graph = get_undirected_graph();
    let created = AtomicUsize::new(0);
    let sources = node_set(&[A, B, C]);
    let targets = node_set(&[A, D]);

    let solver = NaiveManyToMany::with_factory(&graph, |graph| {
        created.fetch_add(1, Ordering::SeqCst);
        DijkstraShortestPath::new(graph)
    });

    let first = solver.get_many_to_many_paths(&sources, &targets).unwrap();
    assert_eq!(created.load(Ordering::SeqCst), 1);

    // a new computation gets a fresh algorithm
    let second = solver.get_many_to_many_paths(&sources, &targets).unwrap();
    assert_eq!(created.load(Ordering::SeqCst), 2);

    assert!(first.iter().eq(second.iter()));
}

#[test]
fn test_parallel_creates_one_algorithm_per_thread() {
    let graph = get_undirected_graph();
    let created = AtomicUsize::new(0);
    let sources = node_set(&[A, B, C, D]);
    let targets = node_set(&[A, B, C, D]);

    let solver = NaiveManyToMany::with_factory(&graph, |graph| {
        created.fetch_add(1, Ordering::SeqCst);
        DijkstraShortestPath::new(graph)
    });

    let single_thread = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
    let paths = single_thread.install(|| solver.get_many_to_many_paths_parallel(&sources, &targets)).unwrap();
    assert_eq!(created.load(Ordering::SeqCst), 1);
    assert_eq!(paths.len(), 16);

    created.store(0, Ordering::SeqCst);
    let two_threads = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
    let paths = two_threads.install(|| solver.get_many_to_many_paths_parallel(&sources, &targets)).unwrap();
    assert!(created.load(Ordering::SeqCst) <= 2);
    assert_eq!(paths.len(), 16);

    // no sources, no work to distribute
    created.store(0, Ordering::SeqCst);
    let paths = two_threads.install(|| solver.get_many_to_many_paths_parallel(&NodeSet::new(), &targets)).unwrap();
    assert!(paths.is_empty());
    assert_eq!(created.load(Ordering::SeqCst), 0);
}

#[test]
fn test_strategies_with_and_without_trivial_paths() {
    let graph = get_undirected_graph();
    let nodes = node_set(&[A, B, C, D]);

    let with_trivial = NaiveManyToMany::with_factory(&graph, DijkstraShortestPath::new).get_many_to_many_paths(&nodes, &nodes).unwrap();
    let without_trivial = NaiveManyToMany::with_factory(&graph, |graph| WithoutTrivialPaths {algorithm: DijkstraShortestPath::new(graph)})
        .get_many_to_many_paths(&nodes, &nodes)
        .unwrap();

    for source in &nodes {
        for target in &nodes {
            if source == target {
                assert_eq!(with_trivial.get_weight(*source, *target), Ok(0.0));
                assert!(with_trivial.get_path(*source, *target).unwrap().map_or(false, GraphPath::is_trivial));

                assert_eq!(without_trivial.get_weight(*source, *target), Ok(INFINITY));
                assert_eq!(without_trivial.get_path(*source, *target), Ok(None));
            }
            else {
                assert_eq!(with_trivial.get_weight(*source, *target), without_trivial.get_weight(*source, *target));
            }
        }
    }

    assert_eq!(with_trivial.len(), 16);
    assert_eq!(without_trivial.len(), 16);
}

#[test]
fn test_invalid_arguments() {
    let graph = get_undirected_graph();
    let paths = NaiveManyToMany::new(&graph).get_many_to_many_paths(&node_set(&[A]), &node_set(&[C, D])).unwrap();

    // B is part of the graph but neither a source nor a target
    assert_eq!(paths.get_path(B, C), Err(QueryError::SourceNotFound(B)));
    assert_eq!(paths.get_weight(A, B), Err(QueryError::TargetNotFound(B)));

    // targets are no sources and vice versa
    assert_eq!(paths.get_weight(C, D), Err(QueryError::SourceNotFound(C)));
    assert_eq!(paths.get_path(A, A), Err(QueryError::TargetNotFound(A)));

    assert_eq!(paths.get_weight(17, C), Err(QueryError::SourceNotFound(17)));
}

#[test]
fn test_empty_sets() {
    let graph = get_undirected_graph();
    let solver = NaiveManyToMany::new(&graph);

    let no_sources = solver.get_many_to_many_paths(&NodeSet::new(), &node_set(&[A, B])).unwrap();
    assert!(no_sources.is_empty());
    assert_eq!(no_sources.len(), 0);
    assert_eq!(no_sources.get_weight(A, B), Err(QueryError::SourceNotFound(A)));

    let no_targets = solver.get_many_to_many_paths(&node_set(&[A, B]), &NodeSet::new()).unwrap();
    assert!(no_targets.is_empty());
    assert_eq!(no_targets.get_path(A, B), Err(QueryError::TargetNotFound(B)));
    assert_eq!(no_targets.iter().count(), 0);

    let nothing = solver.get_many_to_many_paths(&NodeSet::new(), &NodeSet::new()).unwrap();
    assert!(nothing.is_empty());
}

#[test]
fn test_strategy_errors_are_returned_unchanged() {
    let graph = get_undirected_graph();

    let result = NaiveManyToMany::new(&graph).get_many_to_many_paths(&node_set(&[A, 9]), &node_set(&[C]));
    assert_eq!(result.unwrap_err(), PathError::UnknownVertex(9));

    let result = NaiveManyToMany::new(&graph).get_many_to_many_paths(&node_set(&[A]), &node_set(&[C, 12]));
    assert_eq!(result.unwrap_err(), PathError::UnknownVertex(12));

    let calls = Arc::new(AtomicUsize::new(0));
    let solver = NaiveManyToMany::with_factory(&graph, |_graph| CountingShortestPath {
        algorithm: FailingShortestPath {failing_target: C},
        calls: Arc::clone(&calls),
    });
    let result = solver.get_many_to_many_paths(&node_set(&[A, B, D]), &node_set(&[B, C, D]));

    assert_eq!(result.unwrap_err(), BudgetExhausted(42));
    // population stops at the first failing pair (A, C)
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_distance_table() {
    let graph = get_directed_graph();
    let paths = NaiveManyToMany::new(&graph).get_many_to_many_paths(&node_set(&[0, 3]), &node_set(&[0, 1, 2])).unwrap();

    let distance_table = paths.distance_table(&[3, 0], &[2, 0]).unwrap();
    assert_eq!(distance_table.rows(), 2);
    assert_eq!(distance_table.cols(), 2);
    assert_eq!(distance_table.data, vec![6.0, 1.0, 5.0, 0.0]);

    assert_eq!(paths.distance_table(&[0], &[3]), Err(QueryError::TargetNotFound(3)));
}

#[test]
fn test_parallel_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(7);
    let num_vertices = 60;
    let mut graph = GraphArray::with_nodes(num_vertices);

    for _ in 0..240 {
        let start = rng.gen_range(0..num_vertices as NodeId);
        let end = rng.gen_range(0..num_vertices as NodeId);
        graph.add_edge(start, end, rng.gen_range(1..50) as Weight);
    }

    let sources = pick_random_nodes(&graph, 12, &mut rng);
    let targets = pick_random_ball(&graph, 15, &mut rng);
    assert_eq!(sources.len(), 12);

    let calls = Arc::new(AtomicUsize::new(0));
    let solver = NaiveManyToMany::with_factory(&graph, |graph| CountingShortestPath {
        algorithm: DijkstraShortestPath::new(graph),
        calls: Arc::clone(&calls),
    });

    let sequential = solver.get_many_to_many_paths(&sources, &targets).unwrap();
    let parallel = solver.get_many_to_many_paths_parallel(&sources, &targets).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2 * sources.len() * targets.len());
    assert_eq!(parallel.len(), sequential.len());
    assert!(sequential.iter().eq(parallel.iter()));

    let bidirectional = NaiveManyToMany::new(&graph).get_many_to_many_paths_parallel(&sources, &targets).unwrap();
    for ((pair, dijkstra_path), (_, bidirectional_path)) in sequential.iter().zip(bidirectional.iter()) {
        assert_eq!(dijkstra_path.map(GraphPath::weight), bidirectional_path.map(GraphPath::weight), "pair {:?}", pair);
    }
}

#[test]
fn test_parallel_returns_strategy_error() {
    let graph = get_undirected_graph();
    let solver = NaiveManyToMany::with_factory(&graph, |_graph| FailingShortestPath {failing_target: D});

    let result = solver.get_many_to_many_paths_parallel(&node_set(&[A, B, C]), &node_set(&[C, D]));
    assert_eq!(result.unwrap_err(), BudgetExhausted(42));
}

#[test]
fn test_queries_from_many_threads() {
    let graph = get_undirected_graph();
    let nodes = node_set(&[A, B, C, D]);
    let paths = NaiveManyToMany::new(&graph).get_many_to_many_paths(&nodes, &nodes).unwrap();

    std::thread::scope(|scope| {
        for source in [A, B, C, D] {
            let paths = &paths;
            scope.spawn(move || {
                for target in [A, B, C, D] {
                    let weight = paths.get_weight(source, target).unwrap();
                    assert_eq!(weight, paths.get_weight(target, source).unwrap());
                }
            });
        }
    });

    assert_eq!(paths.get_weight(A, D), Ok(4.0));
    assert_eq!(graph.num_edges(), 8);
}
