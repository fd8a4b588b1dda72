use crate::types::*;
use crate::error::PathError;
use crate::graph_algorithms::{check_vertex, DijkstraSearch};
use crate::graph_path::GraphPath;
use crate::graph_representation::Graph;
use crate::shortest_path::shortest_path_algorithm::ShortestPathAlgorithm;

/// plain dijkstra from the source that stops as soon as the target is settled
pub struct DijkstraShortestPath<'a, G: Graph + ?Sized> {
    graph: &'a G,
    search: DijkstraSearch,
}

impl<'a, G: Graph + ?Sized> DijkstraShortestPath<'a, G> {

    pub fn new(graph: &'a G) -> Self {
        DijkstraShortestPath {
            graph,
            search: DijkstraSearch::new(graph.num_nodes()),
        }
    }
}

impl<'a, G: Graph + ?Sized> ShortestPathAlgorithm for DijkstraShortestPath<'a, G> {

    type Error = PathError;

    fn get_path(&mut self, source: NodeId, target: NodeId) -> Result<Option<GraphPath>, PathError> {
        check_vertex(self.graph, source)?;
        check_vertex(self.graph, target)?;

        if source == target {
            return Ok(Some(GraphPath::single_vertex(source)));
        }

        self.search.start(source);

        while let Some(node_id) = self.search.settle_next(self.graph, |_| {})? {
            if node_id == target {
                return Ok(Some(GraphPath::new(source, target, self.search.tree_path(target))));
            }
        }

        Ok(None)
    }
}
