//! # Fixpoint Driver
//!
//! A minimal dataflow graph that repeatedly asks each node to recompute its
//! stamp until nothing changes. Every node starts at `Stamp::Empty` and
//! stamps only grow, so loops through phis converge once the join saturates.

use crate::config::InferConfig;
use crate::error::{InferError, Result};
use crate::node::{infer_stamp, Operation};
use stamp_lattice::Stamp;
use tracing::{debug, trace, warn};

/// Index of a node in its graph
pub type NodeId = usize;

#[derive(Debug, Clone)]
struct Node {
    op: Operation,
    inputs: Vec<NodeId>,
    stamp: Stamp,
}

/// Counters from one fixpoint run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixpointStats {
    /// Full passes over the graph, including the final quiet pass
    pub iterations: u64,
    /// Node recomputations
    pub recomputations: u64,
    /// Recomputations that replaced a stamp
    pub changes: u64,
}

/// Nodes with cached stamps, recomputed in insertion order
#[derive(Debug, Clone, Default)]
pub struct StampGraph {
    nodes: Vec<Node>,
}

impl StampGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node whose inputs already exist
    ///
    /// Use [`StampGraph::set_inputs`] to close loops through later nodes.
    pub fn add_node(&mut self, op: Operation, inputs: &[NodeId]) -> Result<NodeId> {
        self.check_ids(inputs)?;
        self.nodes.push(Node {
            op,
            inputs: inputs.to_vec(),
            stamp: Stamp::Empty,
        });
        Ok(self.nodes.len() - 1)
    }

    /// Replace the inputs of an existing node
    pub fn set_inputs(&mut self, id: NodeId, inputs: &[NodeId]) -> Result<()> {
        self.check_ids(inputs)?;
        let node = self.nodes.get_mut(id).ok_or(InferError::UnknownNode(id))?;
        node.inputs = inputs.to_vec();
        Ok(())
    }

    /// Current stamp of a node
    pub fn stamp(&self, id: NodeId) -> Result<Stamp> {
        self.nodes
            .get(id)
            .map(|node| node.stamp)
            .ok_or(InferError::UnknownNode(id))
    }

    pub fn operation(&self, id: NodeId) -> Result<&Operation> {
        self.nodes
            .get(id)
            .map(|node| &node.op)
            .ok_or(InferError::UnknownNode(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn check_ids(&self, ids: &[NodeId]) -> Result<()> {
        match ids.iter().find(|&&id| id >= self.nodes.len()) {
            Some(&id) => Err(InferError::UnknownNode(id)),
            None => Ok(()),
        }
    }

    /// Recompute every node until a full pass changes nothing
    pub fn run(&mut self, config: &InferConfig) -> Result<FixpointStats> {
        let mut stats = FixpointStats::default();
        let mut inputs = Vec::new();

        loop {
            if stats.iterations >= config.max_iterations {
                warn!(limit = config.max_iterations, nodes = self.nodes.len(), "stamp fixpoint hit iteration limit");
                return Err(InferError::FixpointDiverged {
                    limit: config.max_iterations,
                });
            }
            stats.iterations += 1;

            let mut changed = false;
            for id in 0..self.nodes.len() {
                inputs.clear();
                inputs.extend(self.nodes[id].inputs.iter().map(|&input| self.nodes[input].stamp));

                let node = &mut self.nodes[id];
                let stamp = infer_stamp(&node.op, &inputs, config)?;
                stats.recomputations += 1;

                if stamp != node.stamp {
                    trace!(node = id, op = %node.op, old = %node.stamp, new = %stamp, "stamp changed");
                    node.stamp = stamp;
                    stats.changes += 1;
                    changed = true;
                }
            }

            debug!(iteration = stats.iterations, changed, "stamp fixpoint pass");
            if !changed {
                return Ok(stats);
            }
        }
    }
}
