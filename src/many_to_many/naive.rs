use std::collections::HashMap;
use std::fmt::Display;

use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::types::*;
use crate::graph_path::GraphPath;
use crate::graph_representation::Graph;
use crate::many_to_many::many_to_many_algorithm::ManyToManyShortestPathsAlgorithm;
use crate::many_to_many::many_to_many_paths::{ManyToManyPaths, SourceTargetPair};
use crate::shortest_path::bidirectional_dijkstra::BidirectionalDijkstraShortestPath;
use crate::shortest_path::shortest_path_algorithm::ShortestPathAlgorithm;

pub type DefaultFactory<'a, G> = fn(&'a G) -> BidirectionalDijkstraShortestPath<'a, G>;

/// baseline many to many algorithm: runs one independent single pair query for every
/// source target pair and caches the resulting paths
///
/// the single pair algorithm is created by the factory for every computation, by default a
/// bidirectional dijkstra is used. no search state is shared between pairs, so exactly
/// |sources| * |targets| queries are issued
pub struct NaiveManyToMany<'a, G: Graph, F> {
    graph: &'a G,
    factory: F,
}

impl<'a, G: Graph> NaiveManyToMany<'a, G, DefaultFactory<'a, G>> {

    pub fn new(graph: &'a G) -> Self {
        let factory: DefaultFactory<'a, G> = BidirectionalDijkstraShortestPath::new;
        NaiveManyToMany::with_factory(graph, factory)
    }
}

impl<'a, G, F, S> NaiveManyToMany<'a, G, F>
where
    G: Graph,
    F: Fn(&'a G) -> S,
    S: ShortestPathAlgorithm,
{
    pub fn with_factory(graph: &'a G, factory: F) -> Self {
        NaiveManyToMany {
            graph,
            factory,
        }
    }
}

impl<'a, G, F, S> NaiveManyToMany<'a, G, F>
where
    G: Graph + Sync,
    F: Fn(&'a G) -> S + Sync,
    S: ShortestPathAlgorithm,
    S::Error: Display + Send,
{
    /// same result as get_many_to_many_paths but distributes the sources over the rayon thread pool
    ///
    /// the sources are split into one chunk per pool thread and the factory is called once per chunk,
    /// so at most rayon::current_num_threads() single pair algorithms are created.
    /// if several pairs fail, the error of any one of them is returned
    pub fn get_many_to_many_paths_parallel(&self, sources: &NodeSet, targets: &NodeSet) -> Result<ManyToManyPaths, S::Error> {
        let num_chunks = rayon::current_num_threads();
        debug!(num_sources = sources.len(), num_targets = targets.len(), num_chunks, "computing many to many paths in parallel");

        let graph = self.graph;
        let factory = &self.factory;
        let source_list: NodeIds = sources.iter().copied().collect();
        let chunk_size = source_list.len().div_ceil(num_chunks).max(1);

        let chunks = source_list
            .par_chunks(chunk_size)
            .map(|chunk| {
                let mut algorithm = factory(graph);

                chunk.iter()
                    .map(|source| calculate_row(&mut algorithm, *source, targets))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let paths: HashMap<SourceTargetPair, Option<GraphPath>> = chunks.into_iter().flatten().flatten().collect();
        debug!(num_entries = paths.len(), "many to many paths computed");

        Ok(ManyToManyPaths::new(sources.clone(), targets.clone(), paths))
    }
}

impl<'a, G, F, S> ManyToManyShortestPathsAlgorithm for NaiveManyToMany<'a, G, F>
where
    G: Graph,
    F: Fn(&'a G) -> S,
    S: ShortestPathAlgorithm,
    S::Error: Display,
{
    type Error = S::Error;

    fn get_many_to_many_paths(&self, sources: &NodeSet, targets: &NodeSet) -> Result<ManyToManyPaths, S::Error> {
        debug!(num_sources = sources.len(), num_targets = targets.len(), "computing many to many paths");

        let mut algorithm = (self.factory)(self.graph);
        let mut paths = HashMap::with_capacity(sources.len() * targets.len());

        for source in sources {
            paths.extend(calculate_row(&mut algorithm, *source, targets)?);
        }

        debug!(num_entries = paths.len(), "many to many paths computed");

        Ok(ManyToManyPaths::new(sources.clone(), targets.clone(), paths))
    }
}

/// paths from one source to every target, stops at the first failing query
fn calculate_row<S>(algorithm: &mut S, source: NodeId, targets: &NodeSet) -> Result<Vec<(SourceTargetPair, Option<GraphPath>)>, S::Error>
where
    S: ShortestPathAlgorithm,
    S::Error: Display,
{
    let mut row = Vec::with_capacity(targets.len());

    for target in targets {
        let path = algorithm.get_path(source, *target).map_err(|error| {
            warn!(source_node = source, target_node = *target, %error, "shortest path query failed");
            error
        })?;

        trace!(source_node = source, target_node = *target, weight = path.as_ref().map_or(INFINITY, GraphPath::weight), "path computed");
        row.push((SourceTargetPair::new(source, *target), path));
    }

    Ok(row)
}
