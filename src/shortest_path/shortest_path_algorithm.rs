use crate::types::*;
use crate::graph_path::GraphPath;

/// a single pair shortest path algorithm bound to one graph
///
/// implementations may keep search state between calls but every call has to be independent of
/// the previous ones, the many to many solvers call get_path once for every source target pair
pub trait ShortestPathAlgorithm {

    type Error;

    /// calculate a shortest path from source to target, Ok(None) if target can not be reached
    fn get_path(&mut self, source: NodeId, target: NodeId) -> Result<Option<GraphPath>, Self::Error>;

    /// weight of a shortest path from source to target, INFINITY if target can not be reached
    fn get_path_weight(&mut self, source: NodeId, target: NodeId) -> Result<Weight, Self::Error> {
        Ok(self.get_path(source, target)?.map_or(INFINITY, |path| path.weight()))
    }
}
