//! IR node operations and their stamp recompute hook

use crate::config::InferConfig;
use crate::error::{InferError, Result};
use crate::reinterpret::reinterpret;
use stamp_lattice::{Constant, Lattice, PrimitiveType, Stamp};
use std::fmt;

/// Operation computed by a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    /// Incoming value with a declared stamp
    Parameter(Stamp),
    /// Literal value
    Constant(Constant),
    /// Raw bits of the single input read as another type of the same width
    Reinterpret(PrimitiveType),
    /// Merge of control-flow predecessors
    Phi,
    /// The single input, narrowed by a fact established by a dominating check
    Guard(Stamp),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Parameter(_) => "parameter",
            Operation::Constant(_) => "constant",
            Operation::Reinterpret(_) => "reinterpret",
            Operation::Phi => "phi",
            Operation::Guard(_) => "guard",
        }
    }

    /// Check the number of inputs this operation accepts
    pub fn check_arity(&self, found: usize) -> Result<()> {
        let (ok, expected) = match self {
            Operation::Parameter(_) | Operation::Constant(_) => (found == 0, "0"),
            Operation::Reinterpret(_) | Operation::Guard(_) => (found == 1, "1"),
            Operation::Phi => (found >= 1, "at least 1"),
        };
        if !ok {
            return Err(InferError::ArityMismatch {
                op: self.name(),
                expected,
                found,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Parameter(s) => write!(f, "parameter {}", s),
            Operation::Constant(c) => write!(f, "constant {}", c),
            Operation::Reinterpret(ty) => write!(f, "reinterpret to {}", ty),
            Operation::Phi => write!(f, "phi"),
            Operation::Guard(s) => write!(f, "guard {}", s),
        }
    }
}

/// Compute the stamp of a node from the current stamps of its inputs
///
/// Inputs still at `Stamp::Empty` have not been reached yet; they are the
/// identity of the phi join and propagate through the other operations.
pub fn infer_stamp(op: &Operation, inputs: &[Stamp], config: &InferConfig) -> Result<Stamp> {
    op.check_arity(inputs.len())?;

    match op {
        Operation::Parameter(stamp) => Ok(*stamp),
        Operation::Constant(value) => Ok(Stamp::for_constant(*value)?),
        Operation::Reinterpret(target) => reinterpret(&inputs[0], *target, config.precision),
        Operation::Phi => {
            let mut result = Stamp::Empty;
            for input in inputs {
                result = result.join(input)?;
            }
            Ok(result)
        }
        Operation::Guard(fact) => Ok(inputs[0].meet(fact)?),
    }
}
