//! Filter implementations for the ranking pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod already_visited;
pub mod distinct_attraction;

// Re-export for convenience
pub use already_visited::AlreadyVisitedFilter;
pub use distinct_attraction::DistinctAttractionFilter;
