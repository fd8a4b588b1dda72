use std::collections::VecDeque;

use rand::Rng;
use rand::seq::index::sample;

use crate::types::*;
use crate::graph_representation::Graph;

/// picks count distinct random nodes of the graph, all nodes if the graph is smaller
pub fn pick_random_nodes<R: Rng + ?Sized>(graph: &(impl Graph + ?Sized), count: usize, rng: &mut R) -> NodeSet {
    let num_vertices = graph.num_nodes();

    sample(rng, num_vertices, count.min(num_vertices))
        .into_iter()
        .map(|index| index as NodeId)
        .collect()
}

/// picks a random node and returns it together with up to ball_size - 1 nodes closest to it
/// (by hop count), useful to create source and target sets that lie in the same region
pub fn pick_random_ball<R: Rng + ?Sized>(graph: &(impl Graph + ?Sized), ball_size: usize, rng: &mut R) -> NodeSet {
    let mut ball = NodeSet::new();

    if graph.num_nodes() == 0 || ball_size == 0 {
        return ball;
    }

    let center: NodeId = rng.gen_range(graph.node_ids());
    let mut queue = VecDeque::from([center]);
    ball.insert(center);

    while let Some(node_id) = queue.pop_front() {
        for edge_id in graph.edge_ids(node_id) {
            if ball.len() >= ball_size {
                return ball;
            }

            let target_node = graph.target_id(node_id, edge_id);

            if ball.insert(target_node) {
                queue.push_back(target_node);
            }
        }
    }

    ball
}
