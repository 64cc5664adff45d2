//! # Error Types for the Stamp Lattice

use crate::types::Kind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StampError {
    // Construction errors
    #[error("Unsupported {kind} width: {bits} bits")]
    UnsupportedWidth { kind: Kind, bits: u32 },

    #[error("Invalid bounds: lower bound {lower} exceeds upper bound {upper}")]
    InvalidBounds { lower: String, upper: String },

    #[error("Bound {value} does not fit in {bits} bits")]
    BoundOutOfRange { value: i64, bits: u32 },

    #[error("Contradictory masks: must-be-set {must:#x} is not within may-be-set {may:#x}")]
    ContradictoryMasks { must: u64, may: u64 },

    #[error("Mask {mask:#x} has bits outside of {bits}-bit width")]
    MaskOutOfRange { mask: u64, bits: u32 },

    #[error("Float bounds must be both NaN or both numeric, got [{lower}, {upper}]")]
    NanBound { lower: f64, upper: f64 },

    // Usage errors
    #[error("Width mismatch: {left} bits vs {right} bits")]
    WidthMismatch { left: u32, right: u32 },

    #[error("Incompatible stamp kinds: {left} vs {right}")]
    IncompatibleKinds { left: String, right: String },
}

impl StampError {
    /// Check if this error was raised while building a stamp from explicit parts
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            StampError::UnsupportedWidth { .. }
                | StampError::InvalidBounds { .. }
                | StampError::BoundOutOfRange { .. }
                | StampError::ContradictoryMasks { .. }
                | StampError::MaskOutOfRange { .. }
                | StampError::NanBound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, StampError>;
