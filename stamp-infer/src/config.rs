//! # Inference Configuration

use crate::error::{InferError, Result};

/// How hard reinterpretation tries to keep bounds tight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReinterpretPrecision {
    /// Partition the source by sign, zero and NaN and join the mapped parts
    #[default]
    Partitioned,
    /// Give up to the unrestricted stamp on any sign-crossing, NaN or
    /// infinite float source, and on any non-constant integer source
    Conservative,
}

/// Stamp inference configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferConfig {
    /// Reinterpretation strategy
    pub precision: ReinterpretPrecision,

    /// Maximum passes over the graph before the fixpoint driver gives up
    pub max_iterations: u64,
}

impl Default for InferConfig {
    fn default() -> Self {
        Self {
            precision: ReinterpretPrecision::Partitioned,
            max_iterations: 1_000,
        }
    }
}

impl InferConfig {
    /// Create a configuration with validation
    pub fn new(precision: ReinterpretPrecision, max_iterations: u64) -> Result<Self> {
        if max_iterations == 0 {
            return Err(InferError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            precision,
            max_iterations,
        })
    }

    /// Default limits with the conservative strategy
    pub fn conservative() -> Self {
        Self {
            precision: ReinterpretPrecision::Conservative,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InferConfig::default();
        assert_eq!(config.precision, ReinterpretPrecision::Partitioned);
        assert_eq!(config.max_iterations, 1_000);
    }

    #[test]
    fn test_new_validates_iterations() {
        assert!(InferConfig::new(ReinterpretPrecision::Partitioned, 5).is_ok());
        assert!(matches!(
            InferConfig::new(ReinterpretPrecision::Conservative, 0),
            Err(InferError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_conservative() {
        let config = InferConfig::conservative();
        assert_eq!(config.precision, ReinterpretPrecision::Conservative);
        assert_eq!(config.max_iterations, 1_000);
    }
}
