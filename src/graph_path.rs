use crate::types::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub start: NodeId,
    pub end: NodeId,
    pub weight: Weight,
}

/// an ordered sequence of edges from start to end together with its total weight
///
/// a path without edges is the trivial path of a single vertex (start == end)
#[derive(Clone, Debug, PartialEq)]
pub struct GraphPath {
    start: NodeId,
    end: NodeId,
    edges: Vec<Edge>,
    weight: Weight,
}

impl GraphPath {

    /// creates the path described by the given edges, which have to be connected
    pub fn new(start: NodeId, end: NodeId, edges: Vec<Edge>) -> Self {
        debug_assert!(edges.first().map_or(start == end, |edge| edge.start == start));
        debug_assert!(edges.last().map_or(true, |edge| edge.end == end));
        debug_assert!(edges.windows(2).all(|pair| pair[0].end == pair[1].start));

        let weight = edges.iter().map(|edge| edge.weight).sum();

        GraphPath {
            start,
            end,
            edges,
            weight,
        }
    }

    pub fn single_vertex(node: NodeId) -> Self {
        GraphPath {
            start: node,
            end: node,
            edges: Vec::new(),
            weight: 0.0,
        }
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    /// all visited vertices in order, including start and end
    pub fn vertices(&self) -> NodeIds {
        let mut vertices = Vec::with_capacity(self.edges.len() + 1);
        vertices.push(self.start);
        vertices.extend(self.edges.iter().map(|edge| edge.end));

        vertices
    }
}
