//! Popularity Source - the no-personalization path.
//!
//! Used when the collaborative source finds nothing (typically a user
//! with no rating >= the like threshold). Scans the whole dataset,
//! keeping rows in the predicted style's preferred categories, or every
//! row when the style has no preferences. The user's own attractions are
//! excluded here too. Ordering is left to the ranker.

use crate::types::{Candidate, CandidateSource, UserProfile};
use data_loader::TravelIndex;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct PopularitySource {
    data_index: Arc<TravelIndex>,
}

impl PopularitySource {
    pub fn new(data_index: Arc<TravelIndex>) -> Self {
        Self { data_index }
    }

    /// Candidate rows in dataset order.
    ///
    /// An empty `preferred_categories` keeps every category.
    #[instrument(skip(self, profile, preferred_categories), fields(user_id = profile.user_id))]
    pub fn get_candidates(&self, profile: &UserProfile, preferred_categories: &[String]) -> Vec<Candidate> {
        let candidates: Vec<Candidate> = self
            .data_index
            .rows()
            .par_iter()
            .filter(|row| {
                preferred_categories.is_empty() || preferred_categories.contains(&row.category)
            })
            .filter(|row| !profile.has_visited(row.attraction_id))
            .map(|row| Candidate::from_interaction(row, CandidateSource::Popularity))
            .collect();

        debug!(
            "Generated {} popularity candidates over {} preferred categories",
            candidates.len(),
            preferred_categories.len()
        );
        candidates
    }
}
