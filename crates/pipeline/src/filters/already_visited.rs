//! Filter to remove attractions the user has already visited.
//!
//! Candidate sources already exclude the user's history; running this
//! again after ranking keeps the exclusion true for any source.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, UserProfile};

/// Removes candidates whose attraction is in the user's history.
///
/// ## Algorithm
/// Uses the HashSet in UserProfile.visited for O(1) lookups.
pub struct AlreadyVisitedFilter;

impl Filter for AlreadyVisitedFilter {
    fn name(&self) -> &str {
        "AlreadyVisitedFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        profile: &UserProfile,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| !profile.has_visited(candidate.attraction_id))
            .collect();
        Ok(filtered)
    }
}
