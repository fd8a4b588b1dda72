use crate::types::*;
use crate::many_to_many::many_to_many_paths::ManyToManyPaths;

/// a many to many algorithm computes shortest paths between every source and every target
pub trait ManyToManyShortestPathsAlgorithm {

    type Error;

    /// calculate all source target paths, the result answers queries for exactly these two sets
    fn get_many_to_many_paths(&self, sources: &NodeSet, targets: &NodeSet) -> Result<ManyToManyPaths, Self::Error>;
}
