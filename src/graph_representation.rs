use crate::types::*;
use std::ops::Range;

/// read access to a directed, weighted graph plus the few mutations needed to build one
pub trait Graph {

    fn add_edge(&mut self, start: NodeId, end: NodeId, weight: Weight);

    /// removes the first arc from start to end, returns false if there is none
    fn remove_edge(&mut self, start: NodeId, end: NodeId) -> bool;

    fn node_ids(&self) -> Range<NodeId>;
    fn edge_ids(&self, node: NodeId) -> Range<EdgeId>;
    fn target_id(&self, node: NodeId, edge_id: EdgeId) -> NodeId;
    fn weight(&self, node: NodeId, edge_id: EdgeId) -> Weight;
    fn num_edges(&self) -> usize;

    fn num_nodes(&self) -> usize {
        self.node_ids().len()
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.node_ids().contains(&node)
    }

    /// inserts one arc in each direction
    fn add_undirected_edge(&mut self, first: NodeId, second: NodeId, weight: Weight) {
        self.add_edge(first, second, weight);
        self.add_edge(second, first, weight);
    }

    fn remove_undirected_edge(&mut self, first: NodeId, second: NodeId) -> bool {
        let forward = self.remove_edge(first, second);
        let backward = self.remove_edge(second, first);

        forward || backward
    }
}

/// adjacency array representation: the arcs of node v are stored at first_edge[v]..first_edge[v + 1]
#[derive(Clone, Debug, PartialEq)]
pub struct GraphArray {

    first_edge: Vec<EdgeId>,
    target_node: Vec<NodeId>,
    weights: Vec<Weight>,
}

impl GraphArray {

    pub fn new(first_edge: EdgeIds, target_node: NodeIds, weights: Weights) -> GraphArray {
        GraphArray {
            first_edge,
            target_node,
            weights,
        }
    }

    /// creates a graph without any arcs
    pub fn with_nodes(num_vertices: usize) -> GraphArray {
        GraphArray::new(vec![0; num_vertices + 1], Vec::new(), Vec::new())
    }

    /// builds the adjacency array from (start, end, weight) arcs, keeping the given order per start node
    pub fn from_arcs(num_vertices: usize, arcs: &[(NodeId, NodeId, Weight)]) -> GraphArray {
        let mut adjacency: Vec<Vec<(NodeId, Weight)>> = vec![Vec::new(); num_vertices];

        for (start, end, weight) in arcs {
            adjacency[*start as usize].push((*end, *weight));
        }

        let (first_edge, target_node, weights) = convert_adjacency_to_arrays(&adjacency);
        GraphArray::new(first_edge, target_node, weights)
    }
}

/// adjacency list representation, cheaper to modify than GraphArray
#[derive(Clone, Debug, PartialEq)]
pub struct GraphList {

    edges: Vec<Vec<NodeId>>,
    weights: Vec<Vec<Weight>>,
}

impl GraphList {

    pub fn new(edges: Vec<Vec<NodeId>>, weights: Vec<Vec<Weight>>) -> GraphList {
        GraphList {
            edges,
            weights,
        }
    }

    pub fn with_nodes(num_vertices: usize) -> GraphList {
        GraphList::new(vec![Vec::new(); num_vertices], vec![Vec::new(); num_vertices])
    }

    pub fn from_array(first_edge: &[EdgeId], target_node: &[NodeId], weights: &[Weight]) -> GraphList {
        let mut list_edges: Vec<Vec<NodeId>> = Vec::new();
        let mut list_weights: Vec<Vec<Weight>> = Vec::new();

        for node_index in 0..first_edge.len().saturating_sub(1) {
            let start = first_edge[node_index] as usize;
            let end = first_edge[node_index + 1] as usize;

            list_edges.push(target_node[start..end].to_vec());
            list_weights.push(weights[start..end].to_vec());
        }

        GraphList {
            edges: list_edges,
            weights: list_weights,
        }
    }
}

impl From<&GraphArray> for GraphList {

    fn from(graph: &GraphArray) -> Self {
        GraphList::from_array(&graph.first_edge, &graph.target_node, &graph.weights)
    }
}

impl Graph for GraphArray {

    fn add_edge(&mut self, start: NodeId, end: NodeId, weight: Weight) {
        let current_first_edge: EdgeId = self.first_edge[start as usize];

        // insert new target node and weight
        self.target_node.insert(current_first_edge as usize, end);
        self.weights.insert(current_first_edge as usize, weight);

        // increase all subsequent first edge ids
        for node_id in (start as usize + 1)..self.first_edge.len() {
            self.first_edge[node_id] += 1;
        }
    }

    fn remove_edge(&mut self, start: NodeId, end: NodeId) -> bool {
        let position = self.edge_ids(start).find(|edge_id| self.target_node[*edge_id as usize] == end);

        match position {
            Some(edge_id) => {
                self.target_node.remove(edge_id as usize);
                self.weights.remove(edge_id as usize);

                // decrease all subsequent first edge ids
                for node_id in (start as usize + 1)..self.first_edge.len() {
                    self.first_edge[node_id] -= 1;
                }

                true
            },
            None => false,
        }
    }

    fn node_ids(&self) -> Range<NodeId> {
        0..(self.first_edge.len().saturating_sub(1) as NodeId)
    }

    fn edge_ids(&self, node: NodeId) -> Range<EdgeId> {
        self.first_edge[node as usize]..self.first_edge[(node as usize) + 1]
    }

    fn target_id(&self, _node: NodeId, edge_id: EdgeId) -> NodeId {
        self.target_node[edge_id as usize]
    }

    fn weight(&self, _node: NodeId, edge_id: EdgeId) -> Weight {
        self.weights[edge_id as usize]
    }

    fn num_edges(&self) -> usize {
        self.target_node.len()
    }
}

impl Graph for GraphList {

    fn add_edge(&mut self, start: NodeId, end: NodeId, weight: Weight) {
        self.edges[start as usize].push(end);
        self.weights[start as usize].push(weight);
    }

    fn remove_edge(&mut self, start: NodeId, end: NodeId) -> bool {
        let adjacent = &mut self.edges[start as usize];

        match adjacent.iter().position(|target| *target == end) {
            Some(index) => {
                adjacent.remove(index);
                self.weights[start as usize].remove(index);
                true
            },
            None => false,
        }
    }

    fn node_ids(&self) -> Range<NodeId> {
        0..(self.edges.len() as NodeId)
    }

    fn edge_ids(&self, node: NodeId) -> Range<EdgeId> {
        0..(self.edges[node as usize].len() as EdgeId)
    }

    fn target_id(&self, node: NodeId, edge_id: EdgeId) -> NodeId {
        self.edges[node as usize][edge_id as usize]
    }

    fn weight(&self, node: NodeId, edge_id: EdgeId) -> Weight {
        self.weights[node as usize][edge_id as usize]
    }

    fn num_edges(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }
}

/// creates a graph containing every arc of the given graph with flipped direction
pub fn reverse_graph(graph: &(impl Graph + ?Sized)) -> GraphArray {
    let mut backward_edges: Vec<Vec<(NodeId, Weight)>> = vec![Vec::new(); graph.num_nodes()];

    for node_id in graph.node_ids() {
        for edge_id in graph.edge_ids(node_id) {
            backward_edges[graph.target_id(node_id, edge_id) as usize].push((node_id, graph.weight(node_id, edge_id)));
        }
    }

    let (first_edge, source_node, weights) = convert_adjacency_to_arrays(&backward_edges);
    GraphArray::new(first_edge, source_node, weights)
}

/// converts per node arc lists into the first_edge, head and weight arrays
pub fn convert_adjacency_to_arrays(arcs: &[Vec<(NodeId, Weight)>]) -> (EdgeIds, NodeIds, Weights) {
    let num_vertices = arcs.len();

    let mut first_edge: EdgeIds = vec![0; num_vertices + 1];
    let mut arc_target: NodeIds = Vec::new();
    let mut arc_weight: Weights = Vec::new();

    let mut first_edge_index = 0;

    for node_index in 0..num_vertices {
        first_edge[node_index] = first_edge_index;

        for (adj_node, weight) in &arcs[node_index] {
            arc_target.push(*adj_node);
            arc_weight.push(*weight);
            first_edge_index += 1;
        }
    }

    first_edge[num_vertices] = first_edge_index;

    (first_edge, arc_target, arc_weight)
}
