pub mod shortest_path_algorithm;

pub mod dijkstra;
pub mod bidirectional_dijkstra;
