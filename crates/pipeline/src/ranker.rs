//! Hybrid ranking: content boost on top of collaborative candidates.
//!
//! ## Algorithm
//! 1. Look up the predicted style's preferred categories
//! 2. boost = 1 when a candidate's category is preferred, else 0
//! 3. Stable sort descending by (boost, avg rating, popularity)
//! 4. Post-sort filters: drop visited attractions, keep the first row per
//!    attraction
//! 5. Truncate to the result limit
//!
//! Boost is the primary key, so a preferred category always outranks a
//! non-preferred one. Ties on all three keys keep input order.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::{AlreadyVisitedFilter, DistinctAttractionFilter};
use crate::preferences::StylePreferences;
use anyhow::Result;
use classifier::VisitMode;
use rayon::prelude::*;
use sources::{Candidate, UserProfile};
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Default number of recommendations returned
pub const DEFAULT_RESULT_LIMIT: usize = 10;

pub struct HybridRanker {
    preferences: StylePreferences,
    limit: usize,
    post_filters: FilterPipeline,
}

impl HybridRanker {
    pub fn new(preferences: StylePreferences) -> Self {
        Self {
            preferences,
            limit: DEFAULT_RESULT_LIMIT,
            post_filters: FilterPipeline::new()
                .add_filter(AlreadyVisitedFilter)
                .add_filter(DistinctAttractionFilter),
        }
    }

    /// Configure the result count (default: 10)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn preferences(&self) -> &StylePreferences {
        &self.preferences
    }

    /// Boost, sort, deduplicate and truncate candidates for one user
    #[instrument(skip(self, candidates, profile), fields(user_id = profile.user_id, style = %style))]
    pub fn rank(
        &self,
        mut candidates: Vec<Candidate>,
        style: VisitMode,
        profile: &UserProfile,
    ) -> Result<Vec<Candidate>> {
        apply_boost(&mut candidates, &self.preferences, style);
        sort_by_rank(&mut candidates);

        let mut ranked = self.post_filters.apply(candidates, profile)?;
        ranked.truncate(self.limit);

        debug!(
            "Ranked {} recommendations ({} boosted) after filters {:?}",
            ranked.len(),
            ranked.iter().filter(|c| c.boost == 1).count(),
            self.post_filters.filter_names()
        );
        Ok(ranked)
    }
}

/// Set each candidate's boost from the style's preferred categories
pub fn apply_boost(candidates: &mut [Candidate], preferences: &StylePreferences, style: VisitMode) {
    for candidate in candidates.iter_mut() {
        candidate.boost = u8::from(preferences.is_preferred(style, &candidate.category));
    }
}

/// Stable sort, descending by (boost, avg rating, popularity)
pub fn sort_by_rank(candidates: &mut [Candidate]) {
    // par_sort_by is a stable merge sort
    candidates.par_sort_by(rank_order);
}

fn rank_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.boost
        .cmp(&a.boost)
        .then_with(|| {
            b.avg_rating
                .partial_cmp(&a.avg_rating)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| {
            b.popularity
                .partial_cmp(&a.popularity)
                .unwrap_or(Ordering::Equal)
        })
}
