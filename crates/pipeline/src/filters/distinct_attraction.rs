//! Keep only the first row of each attraction.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserProfile};
use std::collections::HashSet;

/// Drops every candidate whose attraction id was already seen earlier in
/// the list. Run after sorting, this keeps the highest-ranked row.
pub struct DistinctAttractionFilter;

impl Filter for DistinctAttractionFilter {
    fn name(&self) -> &str {
        "DistinctAttractionFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _profile: &UserProfile,
    ) -> Result<Vec<Candidate>> {
        let mut seen = HashSet::with_capacity(candidates.len());
        Ok(candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.attraction_id))
            .collect())
    }
}
