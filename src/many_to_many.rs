pub mod many_to_many_algorithm;
pub mod many_to_many_paths;

pub mod naive;
