//! Core domain types for the travel interaction dataset.
//!
//! One `Interaction` is one visit of a user to an attraction, carrying the
//! aggregate statistics that were joined onto the visit when the dataset
//! was exported. `TravelIndex` keeps every row in file order and adds the
//! lookups the recommender needs.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for an attraction
pub type AttractionId = u32;

// =============================================================================
// Interaction Record
// =============================================================================

/// A single (user, attraction) visit.
///
/// Immutable once loaded. The aggregate columns (`attraction_popularity`,
/// `attr_avg_rating`, `user_total_visits`, `user_avg_rating`) are repeated
/// on every row of the same attraction or user.
///
/// Deserializes from the export's column names; serializes with the field
/// names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(rename(deserialize = "UserId"))]
    pub user_id: UserId,
    #[serde(rename(deserialize = "AttractionId"))]
    pub attraction_id: AttractionId,
    /// Attraction category, e.g. "Beaches" or "Museums"
    #[serde(rename(deserialize = "AttractionType"))]
    pub category: String,
    /// Rating given by the user, 1.0 to 5.0
    #[serde(rename(deserialize = "Rating"))]
    pub rating: f32,
    #[serde(rename(deserialize = "VisitYear"))]
    pub visit_year: u16,
    /// Month of the visit, 1 to 12
    #[serde(rename(deserialize = "VisitMonth"))]
    pub visit_month: u8,
    pub attraction_popularity: f32,
    pub attr_avg_rating: f32,
    pub user_total_visits: f32,
    pub user_avg_rating: f32,
}

// =============================================================================
// TravelIndex - The In-Memory Table
// =============================================================================

/// Append-only table of interactions with row-position indices.
///
/// Lookups return rows in the order they were inserted, which is what
/// keeps every downstream sort reproducible.
#[derive(Debug, Default)]
pub struct TravelIndex {
    pub(crate) rows: Vec<Interaction>,

    /// Row positions per user
    pub(crate) user_rows: HashMap<UserId, Vec<usize>>,
    /// Row positions per attraction
    pub(crate) attraction_rows: HashMap<AttractionId, Vec<usize>>,

    /// Distinct users in first-appearance order
    pub(crate) user_order: Vec<UserId>,
}

impl TravelIndex {
    /// Creates a new, empty TravelIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row and update indices
    pub fn insert(&mut self, interaction: Interaction) {
        let position = self.rows.len();

        let user_positions = self.user_rows.entry(interaction.user_id).or_default();
        if user_positions.is_empty() {
            self.user_order.push(interaction.user_id);
        }
        user_positions.push(position);

        self.attraction_rows
            .entry(interaction.attraction_id)
            .or_default()
            .push(position);

        self.rows.push(interaction);
    }

    /// All rows in insertion order
    pub fn rows(&self) -> &[Interaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows belonging to one user, in insertion order.
    ///
    /// Returns an empty Vec for unknown users.
    pub fn user_rows(&self, user_id: UserId) -> Vec<&Interaction> {
        self.collect_positions(self.user_rows.get(&user_id))
    }

    /// Rows recorded against one attraction, in insertion order
    pub fn attraction_rows(&self, attraction_id: AttractionId) -> Vec<&Interaction> {
        self.collect_positions(self.attraction_rows.get(&attraction_id))
    }

    /// Distinct user ids in the order they first appear in the data
    pub fn user_ids(&self) -> &[UserId] {
        &self.user_order
    }

    /// Whether the user has at least one row
    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.user_rows.contains_key(&user_id)
    }

    /// Distinct categories present in the dataset
    pub fn categories(&self) -> HashSet<&str> {
        self.rows.iter().map(|row| row.category.as_str()).collect()
    }

    /// Get counts for debugging/validation: (users, attractions, rows)
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.user_rows.len(),
            self.attraction_rows.len(),
            self.rows.len(),
        )
    }

    fn collect_positions(&self, positions: Option<&Vec<usize>>) -> Vec<&Interaction> {
        positions
            .map(|positions| positions.iter().map(|&p| &self.rows[p]).collect())
            .unwrap_or_default()
    }
}

impl FromIterator<Interaction> for TravelIndex {
    fn from_iter<I: IntoIterator<Item = Interaction>>(iter: I) -> Self {
        let mut index = TravelIndex::new();
        for interaction in iter {
            index.insert(interaction);
        }
        index
    }
}
