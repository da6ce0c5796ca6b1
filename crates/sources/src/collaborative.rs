//! Collaborative Source - "people who liked what I liked"
//!
//! ## Algorithm
//! 1. Liked attractions: distinct attractions the user rated >= threshold
//! 2. Similar users: every user with a row on a liked attraction
//!    (semi-join of the dataset against the liked set)
//! 3. Candidates: every row of a similar user whose attraction is not in
//!    the user's own history (anti-join against the visited set)
//!
//! Each step is a public method so the relational logic can be tested on
//! its own. Candidate rows keep dataset order so the ranker's stable sort
//! is reproducible.

use crate::types::{Candidate, CandidateSource, UserProfile};
use data_loader::{AttractionId, TravelIndex, UserId};
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Generates candidates from users with overlapping tastes
#[derive(Clone)]
pub struct CollaborativeSource {
    /// Shared reference to the data index (read-only, so no Mutex needed)
    data_index: Arc<TravelIndex>,

    /// Minimum rating for an attraction to count as "liked"
    like_threshold: f32,

    /// Whether the target user counts as one of their own similar users
    include_self: bool,
}

impl CollaborativeSource {
    pub fn new(data_index: Arc<TravelIndex>) -> Self {
        Self {
            data_index,
            like_threshold: 4.0,
            include_self: true,
        }
    }

    /// Configure the like threshold (default: 4.0)
    pub fn with_like_threshold(mut self, threshold: f32) -> Self {
        self.like_threshold = threshold;
        self
    }

    /// Configure whether the user is part of their own similar set (default: true).
    ///
    /// The output is identical either way since the anti-join removes the
    /// user's own attractions; excluding self only shrinks the scan.
    pub fn with_include_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    /// Generate candidate rows for a user
    #[instrument(skip(self, profile), fields(user_id = profile.user_id))]
    pub fn get_candidates(&self, profile: &UserProfile) -> Vec<Candidate> {
        let liked = self.liked_attractions(profile);
        debug!("User liked {} attractions", liked.len());
        if liked.is_empty() {
            return Vec::new();
        }

        let similar = self.similar_users(profile, &liked);
        debug!("Found {} similar users", similar.len());

        let candidates = self.candidate_rows(profile, &similar);
        debug!("Generated {} collaborative candidates", candidates.len());
        candidates
    }

    /// Distinct attractions the user rated at or above the threshold,
    /// in first-appearance order
    pub fn liked_attractions(&self, profile: &UserProfile) -> Vec<AttractionId> {
        let mut seen = HashSet::new();
        profile
            .history
            .iter()
            .filter(|row| row.rating >= self.like_threshold)
            .map(|row| row.attraction_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Users with any row on a liked attraction
    pub fn similar_users(&self, profile: &UserProfile, liked: &[AttractionId]) -> HashSet<UserId> {
        liked
            .iter()
            .flat_map(|&attraction_id| self.data_index.attraction_rows(attraction_id))
            .map(|row| row.user_id)
            .filter(|&user_id| self.include_self || user_id != profile.user_id)
            .collect()
    }

    /// Rows of similar users minus the user's own attractions, dataset order
    pub fn candidate_rows(&self, profile: &UserProfile, similar: &HashSet<UserId>) -> Vec<Candidate> {
        self.data_index
            .rows()
            .par_iter()
            .filter(|row| similar.contains(&row.user_id) && !profile.has_visited(row.attraction_id))
            .map(|row| Candidate::from_interaction(row, CandidateSource::Collaborative))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user_profile::build_user_profile;
    use data_loader::Interaction;

    fn visit(user_id: UserId, attraction_id: AttractionId, category: &str, rating: f32) -> Interaction {
        Interaction {
            user_id,
            attraction_id,
            category: category.to_string(),
            rating,
            visit_year: 2022,
            visit_month: 6,
            attraction_popularity: 100.0,
            attr_avg_rating: 4.0,
            user_total_visits: 2.0,
            user_avg_rating: 4.0,
        }
    }

    /// U1 liked A1, disliked A2; U2 shares A1 and visited A3; U3 never
    /// touches anything U1 liked.
    fn create_test_index() -> Arc<TravelIndex> {
        let index: TravelIndex = vec![
            visit(1, 1, "Beaches", 5.0),
            visit(1, 2, "Museums", 2.0),
            visit(2, 1, "Beaches", 4.0),
            visit(2, 3, "Parks", 5.0),
            visit(3, 2, "Museums", 5.0),
            visit(3, 4, "Zoos", 5.0),
            visit(2, 3, "Parks", 3.0),
        ]
        .into_iter()
        .collect();
        Arc::new(index)
    }

    #[test]
    fn test_liked_attractions() {
        let index = create_test_index();
        let source = CollaborativeSource::new(index.clone());
        let profile = build_user_profile(&index, 1);

        assert_eq!(source.liked_attractions(&profile), vec![1]);
    }

    #[test]
    fn test_liked_attractions_are_distinct() {
        let index: Arc<TravelIndex> = Arc::new(
            vec![visit(1, 1, "Parks", 5.0), visit(1, 1, "Parks", 4.0), visit(1, 2, "Zoos", 4.5)]
                .into_iter()
                .collect(),
        );
        let source = CollaborativeSource::new(index.clone());
        let profile = build_user_profile(&index, 1);

        assert_eq!(source.liked_attractions(&profile), vec![1, 2]);
    }

    #[test]
    fn test_like_threshold_is_configurable() {
        let index = create_test_index();
        let source = CollaborativeSource::new(index.clone()).with_like_threshold(2.0);
        let profile = build_user_profile(&index, 1);

        assert_eq!(source.liked_attractions(&profile), vec![1, 2]);
    }

    #[test]
    fn test_similar_users_include_self_by_default() {
        let index = create_test_index();
        let source = CollaborativeSource::new(index.clone());
        let profile = build_user_profile(&index, 1);

        let similar = source.similar_users(&profile, &[1]);
        assert_eq!(similar, HashSet::from([1, 2]));
    }

    #[test]
    fn test_similar_users_can_exclude_self() {
        let index = create_test_index();
        let source = CollaborativeSource::new(index.clone()).with_include_self(false);
        let profile = build_user_profile(&index, 1);

        let similar = source.similar_users(&profile, &[1]);
        assert_eq!(similar, HashSet::from([2]));
    }

    #[test]
    fn test_candidate_rows_exclude_history() {
        let index = create_test_index();
        let source = CollaborativeSource::new(index.clone());
        let profile = build_user_profile(&index, 1);

        let candidates = source.get_candidates(&profile);

        // Both of U2's A3 rows, in dataset order; A1 and A2 are U1's own
        let ids: Vec<AttractionId> = candidates.iter().map(|c| c.attraction_id).collect();
        assert_eq!(ids, vec![3, 3]);
        assert!(candidates.iter().all(|c| c.source == CandidateSource::Collaborative));
        assert!(candidates.iter().all(|c| c.via_user == 2));
    }

    #[test]
    fn test_self_inclusion_does_not_change_candidates() {
        let index = create_test_index();
        let profile = build_user_profile(&index, 1);

        let with_self = CollaborativeSource::new(index.clone()).get_candidates(&profile);
        let without_self = CollaborativeSource::new(index.clone())
            .with_include_self(false)
            .get_candidates(&profile);

        assert_eq!(with_self, without_self);
    }

    #[test]
    fn test_no_liked_attractions_yields_no_candidates() {
        let index = create_test_index();
        let source = CollaborativeSource::new(index.clone());

        // U1 rated nothing above 5.5
        let strict = source.clone().with_like_threshold(5.5);
        let profile = build_user_profile(&index, 1);
        assert!(strict.get_candidates(&profile).is_empty());

        // Unknown user
        let empty = build_user_profile(&index, 42);
        assert!(source.get_candidates(&empty).is_empty());
    }
}
