//! High-level journaling operations.
//!
//! This module provides the user-facing operations that tie the classifier and
//! the entry store together: analyzing text and writing analyzed entries.

pub mod analyze;
pub mod write;

// Re-export commonly used items
pub use analyze::AnalysisPipeline;
pub use write::write_entry;
