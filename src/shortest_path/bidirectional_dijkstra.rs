use tracing::trace;

use crate::types::*;
use crate::error::PathError;
use crate::graph_algorithms::{check_vertex, DijkstraSearch, ScannedArc};
use crate::graph_path::{Edge, GraphPath};
use crate::graph_representation::{reverse_graph, Graph, GraphArray};
use crate::shortest_path::shortest_path_algorithm::ShortestPathAlgorithm;

/// shortest path search that grows one dijkstra tree from the source and one from the target
/// (on the reversed graph) until the two frontiers can no longer improve the best known path
pub struct BidirectionalDijkstraShortestPath<'a, G: Graph + ?Sized> {
    graph: &'a G,
    backward_graph: GraphArray,
    forward: DijkstraSearch,
    backward: DijkstraSearch,
}

/// best connection found so far: forward tree to start, arc start -> end, backward tree from end
#[derive(Copy, Clone, Debug)]
struct MeetingArc {
    start: NodeId,
    end: NodeId,
    weight: Weight,
    total: Weight,
}

impl<'a, G: Graph + ?Sized> BidirectionalDijkstraShortestPath<'a, G> {

    /// builds the reversed arcs of the graph once, they are reused by every query
    pub fn new(graph: &'a G) -> Self {
        let num_vertices = graph.num_nodes();

        BidirectionalDijkstraShortestPath {
            graph,
            backward_graph: reverse_graph(graph),
            forward: DijkstraSearch::new(num_vertices),
            backward: DijkstraSearch::backward(num_vertices),
        }
    }

    fn search(&mut self, source: NodeId, target: NodeId) -> Result<Option<MeetingArc>, PathError> {
        let BidirectionalDijkstraShortestPath { graph, backward_graph, forward, backward } = self;

        forward.start(source);
        backward.start(target);

        let mut best: Option<MeetingArc> = None;

        loop {
            let forward_min = forward.min_distance();
            let backward_min = backward.min_distance();
            let best_total = best.map_or(INFINITY, |meeting| meeting.total);

            // no path through unsettled nodes can beat the best one anymore
            if forward_min + backward_min >= best_total {
                break;
            }

            if forward_min <= backward_min {
                forward.settle_next(*graph, |arc: ScannedArc| {
                    let total = arc.node_distance + arc.weight + backward.distance(arc.adjacent);

                    if total < best.map_or(INFINITY, |meeting| meeting.total) {
                        best = Some(MeetingArc {start: arc.node, end: arc.adjacent, weight: arc.weight, total});
                    }
                })?;
            }
            else {
                backward.settle_next(&*backward_graph, |arc: ScannedArc| {
                    let total = forward.distance(arc.adjacent) + arc.weight + arc.node_distance;

                    if total < best.map_or(INFINITY, |meeting| meeting.total) {
                        best = Some(MeetingArc {start: arc.adjacent, end: arc.node, weight: arc.weight, total});
                    }
                })?;
            }
        }

        Ok(best)
    }
}

impl<'a, G: Graph + ?Sized> ShortestPathAlgorithm for BidirectionalDijkstraShortestPath<'a, G> {

    type Error = PathError;

    fn get_path(&mut self, source: NodeId, target: NodeId) -> Result<Option<GraphPath>, PathError> {
        check_vertex(self.graph, source)?;
        check_vertex(self.graph, target)?;

        if source == target {
            return Ok(Some(GraphPath::single_vertex(source)));
        }

        let Some(meeting) = self.search(source, target)? else {
            trace!(source_node = source, target_node = target, "frontiers exhausted without meeting");
            return Ok(None);
        };

        let mut edges = self.forward.tree_path(meeting.start);
        edges.push(Edge {start: meeting.start, end: meeting.end, weight: meeting.weight});
        edges.extend(self.backward.tree_path(meeting.end));

        Ok(Some(GraphPath::new(source, target, edges)))
    }
}
