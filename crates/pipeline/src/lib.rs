//! Ranking pipeline for attraction candidates.
//!
//! This crate provides:
//! - FeatureEngineer for building a user's classifier input
//! - StylePreferences mapping visit modes to favoured categories
//! - Filter trait and implementations for post-sort cleanup
//! - FilterPipeline for composing filters
//! - HybridRanker combining the content boost with rating and popularity
//!
//! ## Architecture
//! Candidates arrive from a source in dataset order and go through:
//! 1. Boost assignment from the predicted style's categories
//! 2. Stable sort by (boost, avg rating, popularity), all descending
//! 3. Filters: drop visited attractions, keep one row per attraction
//! 4. Truncation to the result limit
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FeatureEngineer, HybridRanker, StylePreferences};
//!
//! let features = FeatureEngineer::new().mean_features(&profile.history)?;
//! let mode = VisitMode::from_code(classifier.predict(&features)?);
//!
//! let ranker = HybridRanker::new(StylePreferences::default()).with_limit(5);
//! let ranked = ranker.rank(candidates, mode, &profile)?;
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod features;
pub mod preferences;
pub mod ranker;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use features::{FeatureEngineer, FeatureError};
pub use preferences::StylePreferences;
pub use ranker::{DEFAULT_RESULT_LIMIT, HybridRanker};
