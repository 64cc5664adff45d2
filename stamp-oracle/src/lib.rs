//! # Stamp Oracle
//!
//! Verify that reinterpret inference is sound against concrete values.
//!
//! A fixed table of interesting bit patterns per width seeds both the
//! candidate source stamps and the values checked against them. For each
//! candidate, every value inside it is reinterpreted concretely and must land
//! inside the inferred stamp.
//!
//! ## Example
//!
//! ```rust
//! use stamp_oracle::{verify_float_to_int, OracleConfig};
//!
//! let report = verify_float_to_int(32, &OracleConfig::default()).unwrap();
//! assert!(report.is_sound(), "{}", report);
//! ```

pub mod candidates;
pub mod checker;
pub mod config;
pub mod error;
pub mod interesting;

pub use candidates::{float_candidates, integer_candidates};
pub use checker::{check_reinterpret, verify_float_to_int, verify_int_to_float, CaseResult, OracleReport, Violation};
pub use config::OracleConfig;
pub use error::{OracleError, Result};
pub use interesting::interesting_bits;
