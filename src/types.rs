use std::collections::BTreeSet;

pub type NodeId = u32;
pub type EdgeId = u32;
pub type Weight = f64;

/// weight reported for unreachable source target pairs
pub const INFINITY: Weight = f64::INFINITY;

pub type NodeIds = Vec<NodeId>;
pub type EdgeIds = Vec<EdgeId>;
pub type Weights = Vec<Weight>;

/// source and target sets of a many to many query
pub type NodeSet = BTreeSet<NodeId>;
