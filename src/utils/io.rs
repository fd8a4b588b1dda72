use std::{path::Path, fs::File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::str::FromStr;

use tracing::debug;

use crate::types::*;
use crate::error::GraphFileError;
use crate::graph_representation::GraphArray;

/// reads a graph in the dimacs shortest path format
///
/// `p sp <nodes> <arcs>` gives the graph size, every `a <source> <target> <weight>` line adds one
/// arc with 1-based node ids, all other lines (e.g. `c` comments) are ignored
pub fn read_graph_data(path: &dyn AsRef<Path>) -> Result<GraphArray, GraphFileError> {
    let reader = BufReader::new(File::open(path)?);

    let mut arcs: Vec<(NodeId, NodeId, Weight)> = Vec::new();
    let mut num_nodes: Option<usize> = None;

    for (line_index, line) in reader.lines().enumerate() {
        let string_line = line?;
        let line_number = line_index + 1;
        let split = string_line.split_whitespace().collect::<Vec<&str>>();

        if is_graph_size_line(&string_line) {
            let size: usize = parse_field(&split, 2, line_number)?;
            num_nodes = Some(size);
        }
        else if is_arc_line(&string_line) {
            let Some(size) = num_nodes else {
                return Err(GraphFileError::MissingSizeLine);
            };

            let source_node: NodeId = parse_field(&split, 1, line_number)?;
            let target_node: NodeId = parse_field(&split, 2, line_number)?;
            let arc_weight: Weight = parse_field(&split, 3, line_number)?;

            for node in [source_node, target_node] {
                if node == 0 || node as usize > size {
                    return Err(GraphFileError::Parse {line: line_number, message: format!("node {} outside of 1..={}", node, size)});
                }
            }

            // reduce source and target node ids by one so that they are zero based
            arcs.push((source_node - 1, target_node - 1, arc_weight));
        }
    }

    let num_nodes = num_nodes.ok_or(GraphFileError::MissingSizeLine)?;
    debug!(num_nodes, num_arcs = arcs.len(), "graph file loaded");

    Ok(GraphArray::from_arcs(num_nodes, &arcs))
}

/// reads one 0-based node id per line, empty lines are skipped
pub fn read_node_ids(path: &dyn AsRef<Path>) -> Result<NodeIds, GraphFileError> {
    let reader = BufReader::new(File::open(path)?);
    let mut nodes = Vec::new();

    for (line_index, line) in reader.lines().enumerate() {
        let string_line = line?;
        let trimmed = string_line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let node = trimmed.parse().map_err(|_| GraphFileError::Parse {line: line_index + 1, message: format!("invalid node id '{}'", trimmed)})?;
        nodes.push(node);
    }

    Ok(nodes)
}

pub fn export_node_ids(path: &dyn AsRef<Path>, node_ids: &[NodeId]) -> Result<(), GraphFileError> {
    let mut writer = BufWriter::new(File::create(path)?);

    for node_id in node_ids {
        writeln!(&mut writer, "{}", node_id)?;
    }

    writer.flush()?;
    Ok(())
}

fn parse_field<T: FromStr>(split: &[&str], index: usize, line: usize) -> Result<T, GraphFileError> {
    let field = split.get(index).ok_or_else(|| GraphFileError::Parse {line, message: format!("missing field {}", index)})?;

    field.parse().map_err(|_| GraphFileError::Parse {line, message: format!("invalid value '{}'", field)})
}

fn is_graph_size_line(line: &str) -> bool {
    line.starts_with("p sp")
}

fn is_arc_line(line: &str) -> bool {
    line.starts_with("a ")
}
