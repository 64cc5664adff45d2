//! Oracle configuration

use stamp_infer::ReinterpretPrecision;

/// Verification run configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OracleConfig {
    /// Strategy under test
    pub precision: ReinterpretPrecision,
}

impl OracleConfig {
    pub fn new(precision: ReinterpretPrecision) -> Self {
        Self { precision }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_checks_partitioned() {
        assert_eq!(OracleConfig::default().precision, ReinterpretPrecision::Partitioned);
        assert_eq!(
            OracleConfig::new(ReinterpretPrecision::Conservative).precision,
            ReinterpretPrecision::Conservative
        );
    }
}
