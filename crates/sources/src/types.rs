//! Shared types for candidate generation.

use data_loader::{AttractionId, Interaction, UserId};
use std::collections::HashSet;

/// Which source produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// Rows of users who liked what this user liked
    Collaborative,
    /// Rows from the whole dataset, used when collaborative signal is empty
    Popularity,
}

/// One candidate row.
///
/// Candidates are projected from interaction rows, so the same attraction
/// can appear several times until the ranker deduplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub attraction_id: AttractionId,
    pub category: String,
    /// Rating given on the row this candidate was projected from
    pub rating: f32,
    pub avg_rating: f32,
    pub popularity: f32,
    /// 1 when the category matches the predicted style, else 0
    pub boost: u8,
    pub source: CandidateSource,
    /// User whose row this candidate was projected from
    pub via_user: UserId,
}

impl Candidate {
    pub fn from_interaction(row: &Interaction, source: CandidateSource) -> Self {
        Self {
            attraction_id: row.attraction_id,
            category: row.category.clone(),
            rating: row.rating,
            avg_rating: row.attr_avg_rating,
            popularity: row.attraction_popularity,
            boost: 0,
            source,
            via_user: row.user_id,
        }
    }
}

/// Everything known about one user, gathered once per computation.
///
/// A profile may be empty: the user id was selected but has no rows.
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    pub user_id: UserId,
    /// The user's rows in dataset order
    pub history: Vec<Interaction>,
    /// Attractions present in `history`
    pub visited: HashSet<AttractionId>,
}

impl UserProfile {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn has_visited(&self, attraction_id: AttractionId) -> bool {
        self.visited.contains(&attraction_id)
    }

    /// The first `limit` history rows, in dataset order
    pub fn recent(&self, limit: usize) -> &[Interaction] {
        &self.history[..self.history.len().min(limit)]
    }

    /// Mean of the ratings this user gave, if any
    pub fn avg_rating(&self) -> Option<f32> {
        if self.history.is_empty() {
            return None;
        }
        let total: f32 = self.history.iter().map(|row| row.rating).sum();
        Some(total / self.history.len() as f32)
    }
}
