use std::collections::HashMap;

use crate::types::*;
use crate::error::QueryError;
use crate::graph_path::GraphPath;
use crate::utils::data_structures::Matrix;

/// cache key, (a, b) and (b, a) are different pairs
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceTargetPair {
    pub source: NodeId,
    pub target: NodeId,
}

impl SourceTargetPair {

    pub fn new(source: NodeId, target: NodeId) -> Self {
        SourceTargetPair {
            source,
            target,
        }
    }
}

/// precomputed shortest paths between every source and every target
///
/// every pair of the two sets has an entry, None marks an unreachable target. the struct is
/// never modified after the solver returns it, so shared references can be queried from many
/// threads without locking
#[derive(Clone, Debug)]
pub struct ManyToManyPaths {
    sources: NodeSet,
    targets: NodeSet,
    paths: HashMap<SourceTargetPair, Option<GraphPath>>,
}

impl ManyToManyPaths {

    pub(crate) fn new(sources: NodeSet, targets: NodeSet, paths: HashMap<SourceTargetPair, Option<GraphPath>>) -> Self {
        debug_assert_eq!(paths.len(), sources.len() * targets.len());

        ManyToManyPaths {
            sources,
            targets,
            paths,
        }
    }

    pub fn sources(&self) -> &NodeSet {
        &self.sources
    }

    pub fn targets(&self) -> &NodeSet {
        &self.targets
    }

    /// the cached shortest path, Ok(None) if target is not reachable from source
    pub fn get_path(&self, source: NodeId, target: NodeId) -> Result<Option<&GraphPath>, QueryError> {
        self.check_source_and_target(source, target)?;

        Ok(self.paths.get(&SourceTargetPair::new(source, target)).and_then(Option::as_ref))
    }

    /// weight of the cached shortest path, INFINITY if target is not reachable from source
    pub fn get_weight(&self, source: NodeId, target: NodeId) -> Result<Weight, QueryError> {
        Ok(self.get_path(source, target)?.map_or(INFINITY, GraphPath::weight))
    }

    /// number of cached source target pairs, reachable or not
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// all pairs in ascending source then target order
    pub fn iter(&self) -> impl Iterator<Item = (SourceTargetPair, Option<&GraphPath>)> + '_ {
        self.sources.iter().flat_map(move |source| {
            self.targets.iter().map(move |target| {
                let pair = SourceTargetPair::new(*source, *target);
                (pair, self.paths.get(&pair).and_then(Option::as_ref))
            })
        })
    }

    /// weights as a row major matrix, row i belongs to sources[i] and column j to targets[j]
    pub fn distance_table(&self, sources: &[NodeId], targets: &[NodeId]) -> Result<Matrix<Weight>, QueryError> {
        let mut distance_table = Matrix::new(sources.len(), targets.len(), INFINITY);

        for (source_index, source) in sources.iter().enumerate() {
            for (target_index, target) in targets.iter().enumerate() {
                distance_table.set(source_index, target_index, self.get_weight(*source, *target)?);
            }
        }

        Ok(distance_table)
    }

    fn check_source_and_target(&self, source: NodeId, target: NodeId) -> Result<(), QueryError> {
        if !self.sources.contains(&source) {
            return Err(QueryError::SourceNotFound(source));
        }

        if !self.targets.contains(&target) {
            return Err(QueryError::TargetNotFound(target));
        }

        Ok(())
    }
}
