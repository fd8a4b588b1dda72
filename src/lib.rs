pub mod types;
pub mod error;

pub mod graph_representation;
pub mod graph_path;
pub mod graph_algorithms;
pub mod utils;

pub mod shortest_path;
pub mod many_to_many;
