use std::cmp::Ordering;

use crate::types::*;
use crate::error::PathError;
use crate::graph_path::Edge;
use crate::graph_representation::Graph;
use crate::utils::binary_heap::{HeapElement, MinBinaryHeap};
use crate::utils::data_structures::ValidFlags;

/// queue entry ordered by distance, then node id
#[derive(Copy, Clone, Debug)]
pub struct DijkstraState {
    pub distance: Weight,
    pub node_id: NodeId,
}

impl PartialEq for DijkstraState {

    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DijkstraState {}

impl Ord for DijkstraState {

    fn cmp(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance).then(self.node_id.cmp(&other.node_id))
    }
}

impl PartialOrd for DijkstraState {

    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl HeapElement for DijkstraState {

    fn unique_index(&self) -> usize {
        self.node_id as usize
    }
}

/// an arc scanned while settling a node, reported in search direction
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScannedArc {
    pub node: NodeId,
    pub adjacent: NodeId,
    pub weight: Weight,
    pub node_distance: Weight,
}

/// reusable state of a single dijkstra search
///
/// all arrays are sized once for the graph and invalidated in O(1) between searches. a backward
/// search runs on the reversed graph, which only changes how arcs are reported in errors and paths
pub struct DijkstraSearch {
    queue: MinBinaryHeap<DijkstraState>,
    distances: ValidFlags<Weight>,
    settled: ValidFlags<bool>,
    predecessors: ValidFlags<Option<(NodeId, Weight)>>,
    backward: bool,
}

impl DijkstraSearch {

    pub fn new(num_vertices: usize) -> Self {
        Self::with_direction(num_vertices, false)
    }

    pub fn backward(num_vertices: usize) -> Self {
        Self::with_direction(num_vertices, true)
    }

    fn with_direction(num_vertices: usize, backward: bool) -> Self {
        DijkstraSearch {
            queue: MinBinaryHeap::new(num_vertices),
            distances: ValidFlags::new(num_vertices, INFINITY),
            settled: ValidFlags::new(num_vertices, false),
            predecessors: ValidFlags::new(num_vertices, None),
            backward,
        }
    }

    /// forgets the previous search and starts a new one from root
    pub fn start(&mut self, root: NodeId) {
        self.queue.clear();
        self.distances.reset();
        self.settled.reset();
        self.predecessors.reset();

        self.distances.set(root as usize, 0.0);
        self.queue.insert(DijkstraState {distance: 0.0, node_id: root});
    }

    /// smallest tentative distance in the queue, INFINITY once the search is exhausted
    pub fn min_distance(&self) -> Weight {
        self.queue.get_min().map_or(INFINITY, |state| state.distance)
    }

    pub fn distance(&self, node: NodeId) -> Weight {
        self.distances[node as usize]
    }

    pub fn is_settled(&self, node: NodeId) -> bool {
        self.settled[node as usize]
    }

    /// settles the next node and relaxes its arcs, every scanned arc is passed to on_arc
    pub fn settle_next<G, F>(&mut self, graph: &G, mut on_arc: F) -> Result<Option<NodeId>, PathError>
    where
        G: Graph + ?Sized,
        F: FnMut(ScannedArc),
    {
        let Some(DijkstraState {distance, node_id}) = self.queue.pop() else {
            return Ok(None);
        };

        self.settled.set(node_id as usize, true);

        for edge_id in graph.edge_ids(node_id) {
            let target_node = graph.target_id(node_id, edge_id);
            let edge_weight = graph.weight(node_id, edge_id);

            if edge_weight.is_nan() || edge_weight < 0.0 {
                let (start, end) = self.original_direction(node_id, target_node);
                return Err(PathError::InvalidEdgeWeight {start, end, weight: edge_weight});
            }

            // loops never shorten a path
            if target_node == node_id {
                continue;
            }

            on_arc(ScannedArc {node: node_id, adjacent: target_node, weight: edge_weight, node_distance: distance});

            let new_distance = distance + edge_weight;

            if !self.is_settled(target_node) && self.distances[target_node as usize] > new_distance {
                self.distances.set(target_node as usize, new_distance);
                self.predecessors.set(target_node as usize, Some((node_id, edge_weight)));

                self.queue.insert_or_decrease(DijkstraState {distance: new_distance, node_id: target_node});
            }
        }

        Ok(Some(node_id))
    }

    /// edges of the current tree path between root and node in original graph direction,
    /// ordered from the root for forward searches and towards the root for backward searches
    pub fn tree_path(&self, node: NodeId) -> Vec<Edge> {
        let mut edges = Vec::new();
        let mut current_node = node;

        while let Some((predecessor, weight)) = self.predecessors[current_node as usize] {
            let (start, end) = self.original_direction(predecessor, current_node);
            edges.push(Edge {start, end, weight});
            current_node = predecessor;
        }

        if !self.backward {
            edges.reverse();
        }

        edges
    }

    fn original_direction(&self, node: NodeId, adjacent: NodeId) -> (NodeId, NodeId) {
        if self.backward {
            (adjacent, node)
        }
        else {
            (node, adjacent)
        }
    }
}

pub fn check_vertex(graph: &(impl Graph + ?Sized), node: NodeId) -> Result<(), PathError> {
    if graph.contains_node(node) {
        Ok(())
    }
    else {
        Err(PathError::UnknownVertex(node))
    }
}

/// distance from start to goal, None if goal can not be reached
pub fn dijkstra(start: NodeId, goal: NodeId, graph: &impl Graph) -> Result<Option<Weight>, PathError> {
    check_vertex(graph, start)?;
    check_vertex(graph, goal)?;

    let mut search = DijkstraSearch::new(graph.num_nodes());
    search.start(start);

    while let Some(node_id) = search.settle_next(graph, |_| {})? {
        if node_id == goal {
            return Ok(Some(search.distance(goal)));
        }
    }

    Ok(None)
}
