//! Inference error types

use stamp_lattice::{PrimitiveType, StampError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferError {
    #[error("Stamp error: {0}")]
    Stamp(#[from] StampError),

    #[error("Unsupported reinterpret: {input} to {target}")]
    UnsupportedReinterpret { input: String, target: PrimitiveType },

    #[error("Operation {op} expects {expected} inputs, got {found}")]
    ArityMismatch {
        op: &'static str,
        expected: &'static str,
        found: usize,
    },

    #[error("Unknown node: {0}")]
    UnknownNode(usize),

    #[error("Fixpoint did not converge within {limit} iterations")]
    FixpointDiverged { limit: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, InferError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_reinterpret_display() {
        let err = InferError::UnsupportedReinterpret {
            input: "i64".to_string(),
            target: PrimitiveType::F32,
        };
        assert_eq!(err.to_string(), "Unsupported reinterpret: i64 to f32");
    }

    #[test]
    fn test_arity_mismatch_display() {
        let err = InferError::ArityMismatch {
            op: "reinterpret",
            expected: "1",
            found: 2,
        };
        assert_eq!(err.to_string(), "Operation reinterpret expects 1 inputs, got 2");
    }

    #[test]
    fn test_stamp_error_conversion() {
        let err: InferError = StampError::WidthMismatch { left: 32, right: 64 }.into();
        assert!(matches!(err, InferError::Stamp(_)));
        assert_eq!(err.to_string(), "Stamp error: Width mismatch: 32 bits vs 64 bits");
    }

    #[test]
    fn test_fixpoint_diverged_display() {
        let err = InferError::FixpointDiverged { limit: 10 };
        assert_eq!(err.to_string(), "Fixpoint did not converge within 10 iterations");
    }
}
