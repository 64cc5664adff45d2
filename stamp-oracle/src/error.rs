//! Oracle error types

use stamp_infer::InferError;
use stamp_lattice::StampError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Inference error: {0}")]
    Infer(#[from] InferError),

    #[error("Stamp error: {0}")]
    Stamp(#[from] StampError),
}

pub type Result<T> = std::result::Result<T, OracleError>;

#[cfg(test)]
mod tests {
    use super::*;
    use stamp_lattice::Kind;

    #[test]
    fn test_error_display() {
        let err: OracleError = StampError::UnsupportedWidth { kind: Kind::Float, bits: 8 }.into();
        assert!(err.to_string().starts_with("Stamp error: "));

        let err: OracleError = InferError::InvalidConfig("bad".to_string()).into();
        assert_eq!(err.to_string(), "Inference error: Invalid configuration: bad");
    }
}
