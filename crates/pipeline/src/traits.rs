//! Core traits for the ranking pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! order-preserving stages to run over a ranked candidate list.

use anyhow::Result;
use sources::{Candidate, UserProfile};

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Contract
/// - `Send + Sync` so one pipeline can serve many computations
/// - Filters take ownership of the Vec<Candidate> and return a filtered Vec
/// - Filters only remove candidates; relative order of the survivors is kept
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `profile` - The user the candidates are for
    fn apply(
        &self,
        candidates: Vec<Candidate>,
        profile: &UserProfile,
    ) -> Result<Vec<Candidate>>;
}
