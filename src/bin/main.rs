use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use naive_many_to_many::{
    error::{GraphFileError, PathError},
    graph_representation::{Graph, GraphList},
    many_to_many::{many_to_many_algorithm::ManyToManyShortestPathsAlgorithm, many_to_many_paths::ManyToManyPaths, naive::NaiveManyToMany},
    shortest_path::{dijkstra::DijkstraShortestPath, shortest_path_algorithm::ShortestPathAlgorithm},
    types::*,
    utils::{io, measure_time, node_picker::{pick_random_ball, pick_random_nodes}},
};

#[derive(Parser)]
struct Opts {

    /// log debug messages (RUST_LOG takes precedence)
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    subcmd: SubCommand
}

#[derive(Subcommand)]
enum SubCommand {
    Query(QueryCommand),
    Random(RandomCommand)
}

#[derive(Parser)]
struct SolverOptions {

    /// path to the graph file (dimacs 'p sp' / 'a' lines)
    #[clap(short, long)]
    graph_path: String,

    /// single pair algorithm: bidirectional or dijkstra
    #[clap(short, long, default_value="bidirectional")]
    algorithm: String,

    /// worker threads, 1 computes sequentially and 0 uses one thread per core
    #[clap(long, default_value="1")]
    threads: usize,

    /// treat every arc of the graph file as an undirected edge
    #[clap(short, long)]
    undirected: bool
}

/// computes the paths between the given (0-based) source and target nodes
#[derive(Parser)]
struct QueryCommand {

    #[clap(flatten)]
    solver: SolverOptions,

    /// comma separated source node ids
    #[clap(short, long)]
    sources: Option<String>,

    /// comma separated target node ids
    #[clap(short, long)]
    targets: Option<String>,

    /// file with one source node id per line
    #[clap(long)]
    sources_file: Option<String>,

    /// file with one target node id per line
    #[clap(long)]
    targets_file: Option<String>
}

/// computes the paths between randomly picked source and target nodes and reports the time required
#[derive(Parser)]
struct RandomCommand {

    #[clap(flatten)]
    solver: SolverOptions,

    /// number of source nodes
    #[clap(long, default_value="10")]
    num_sources: usize,

    /// number of target nodes
    #[clap(long, default_value="10")]
    num_targets: usize,

    /// seed for the node picker
    #[clap(long)]
    seed: Option<u64>,

    /// pick each node set as a ball of nodes close to a random center instead of uniformly
    #[clap(long)]
    ball: bool,

    /// write the picked sources to this file, one node id per line
    #[clap(long)]
    export_sources: Option<String>,

    /// write the picked targets to this file, one node id per line
    #[clap(long)]
    export_targets: Option<String>
}

#[derive(Debug, Error)]
enum CliError {

    #[error(transparent)]
    GraphFile(#[from] GraphFileError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("unable to create thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("{0}")]
    InvalidArgument(String)
}

fn main() {
    let opts: Opts = Opts::parse();

    let default_level = if opts.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let result = match opts.subcmd {
        SubCommand::Query(query) => run_query(query),
        SubCommand::Random(random) => run_random(random),
    };

    if let Err(error) = result {
        error!(%error, "many to many query failed");
        process::exit(1);
    }
}

fn run_query(query: QueryCommand) -> Result<(), CliError> {
    let sources = read_node_set(query.sources.as_deref(), query.sources_file.as_deref(), "sources")?;
    let targets = read_node_set(query.targets.as_deref(), query.targets_file.as_deref(), "targets")?;

    let paths = solve(&query.solver, |_graph| Ok((sources, targets)))?;
    print_paths(&paths);

    Ok(())
}

fn run_random(random: RandomCommand) -> Result<(), CliError> {
    let mut rng = match random.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let paths = solve(&random.solver, |graph| {
        let (sources, targets) = if random.ball {
            (pick_random_ball(graph, random.num_sources, &mut rng), pick_random_ball(graph, random.num_targets, &mut rng))
        }
        else {
            (pick_random_nodes(graph, random.num_sources, &mut rng), pick_random_nodes(graph, random.num_targets, &mut rng))
        };

        export_node_set(random.export_sources.as_deref(), &sources)?;
        export_node_set(random.export_targets.as_deref(), &targets)?;

        Ok((sources, targets))
    })?;

    let reachable = paths.iter().filter(|(_, path)| path.is_some()).count();
    info!(num_entries = paths.len(), reachable, "random query done");

    Ok(())
}

/// loads the graph, lets pick_nodes choose the sources and targets and runs the configured solver
fn solve<P>(options: &SolverOptions, pick_nodes: P) -> Result<ManyToManyPaths, CliError>
where
    P: FnOnce(&dyn Graph) -> Result<(NodeSet, NodeSet), CliError>,
{
    let graph = io::read_graph_data(&Path::new(&options.graph_path))?;
    info!(num_nodes = graph.num_nodes(), num_edges = graph.num_edges(), "graph loaded");

    if options.threads > 1 {
        rayon::ThreadPoolBuilder::new().num_threads(options.threads).build_global()?;
    }

    if options.undirected {
        let mut undirected = GraphList::from(&graph);
        for node_id in graph.node_ids() {
            for edge_id in graph.edge_ids(node_id) {
                undirected.add_edge(graph.target_id(node_id, edge_id), node_id, graph.weight(node_id, edge_id));
            }
        }

        let (sources, targets) = pick_nodes(&undirected)?;
        return solve_with_algorithm(&undirected, options, &sources, &targets);
    }

    let (sources, targets) = pick_nodes(&graph)?;
    solve_with_algorithm(&graph, options, &sources, &targets)
}

fn solve_with_algorithm<G: Graph + Sync>(graph: &G, options: &SolverOptions, sources: &NodeSet, targets: &NodeSet) -> Result<ManyToManyPaths, CliError> {
    let parallel = options.threads != 1;

    match options.algorithm.as_str() {
        "bidirectional" => compute(&NaiveManyToMany::new(graph), sources, targets, parallel),
        "dijkstra" => compute(&NaiveManyToMany::with_factory(graph, DijkstraShortestPath::new), sources, targets, parallel),
        unknown => Err(CliError::InvalidArgument(format!("unknown algorithm '{}'", unknown))),
    }
}

fn compute<'a, G, F, S>(solver: &NaiveManyToMany<'a, G, F>, sources: &NodeSet, targets: &NodeSet, parallel: bool) -> Result<ManyToManyPaths, CliError>
where
    G: Graph + Sync,
    F: Fn(&'a G) -> S + Sync,
    S: ShortestPathAlgorithm<Error = PathError>,
{
    let (query_time, paths) = measure_time(|| {
        if parallel {
            solver.get_many_to_many_paths_parallel(sources, targets)
        }
        else {
            solver.get_many_to_many_paths(sources, targets)
        }
    });

    let paths = paths?;
    info!(num_sources = sources.len(), num_targets = targets.len(), time_ms = query_time.as_millis() as u64, "many to many paths computed");

    Ok(paths)
}

fn print_paths(paths: &ManyToManyPaths) {
    for (pair, path) in paths.iter() {
        match path {
            Some(path) => println!("{} -> {}: weight {} over {} edges {:?}", pair.source, pair.target, path.weight(), path.len(), path.vertices()),
            None => println!("{} -> {}: unreachable", pair.source, pair.target),
        }
    }
}

fn export_node_set(file: Option<&str>, nodes: &NodeSet) -> Result<(), CliError> {
    if let Some(file) = file {
        let node_ids: NodeIds = nodes.iter().copied().collect();
        io::export_node_ids(&Path::new(file), &node_ids)?;
        info!(file, num_nodes = node_ids.len(), "node set exported");
    }

    Ok(())
}

fn read_node_set(list: Option<&str>, file: Option<&str>, name: &str) -> Result<NodeSet, CliError> {
    match (list, file) {
        (Some(list), None) => parse_node_list(list),
        (None, Some(file)) => Ok(io::read_node_ids(&Path::new(file))?.into_iter().collect()),
        (Some(_), Some(_)) => Err(CliError::InvalidArgument(format!("{} given twice, use either --{} or --{}-file", name, name, name))),
        (None, None) => Err(CliError::InvalidArgument(format!("no {} given, use --{} or --{}-file", name, name, name))),
    }
}

fn parse_node_list(list: &str) -> Result<NodeSet, CliError> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| entry.parse::<NodeId>().map_err(|_| CliError::InvalidArgument(format!("invalid node id '{}'", entry))))
        .collect()
}
