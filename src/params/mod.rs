//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Physical units (samples, milliseconds, Hz)
//! - Documented ranges and meanings
//! - A `validate` step before use

mod analysis;

// Re-export all types
pub use analysis::{analysis_constants, AnalysisConfig};
