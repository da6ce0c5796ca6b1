//! # Sources Crate
//!
//! Candidate generation for attraction recommendations.
//!
//! ## Components
//!
//! ### Collaborative Source
//! "People who liked what I liked, recommend me what they also visited":
//! - Liked attractions (rating >= 4)
//! - Similar users (anyone with a row on a liked attraction)
//! - Their rows, minus attractions already in the user's history
//!
//! ### Popularity Source
//! Fallback when collaborative signal is empty:
//! - Every row in the style's preferred categories (or all rows)
//! - Minus the user's own attractions
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{CollaborativeSource, PopularitySource, user_profile::build_user_profile};
//! use data_loader::TravelIndex;
//! use std::sync::Arc;
//!
//! let data_index = Arc::new(TravelIndex::load_from_file(path)?);
//! let profile = build_user_profile(&data_index, user_id);
//!
//! let collaborative = CollaborativeSource::new(data_index.clone());
//! let mut candidates = collaborative.get_candidates(&profile);
//! if candidates.is_empty() {
//!     let popularity = PopularitySource::new(data_index.clone());
//!     candidates = popularity.get_candidates(&profile, &preferred_categories);
//! }
//! ```

// Public modules
pub mod types;
pub mod user_profile;
pub mod collaborative;
pub mod popularity;

// Re-export commonly used types
pub use types::{Candidate, CandidateSource, UserProfile};
pub use collaborative::CollaborativeSource;
pub use popularity::PopularitySource;

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Interaction;

    fn sample_row() -> Interaction {
        Interaction {
            user_id: 12,
            attraction_id: 640,
            category: "Beaches".to_string(),
            rating: 5.0,
            visit_year: 2022,
            visit_month: 7,
            attraction_popularity: 312.0,
            attr_avg_rating: 4.6,
            user_total_visits: 4.0,
            user_avg_rating: 4.25,
        }
    }

    #[test]
    fn test_candidate_from_interaction() {
        let candidate = Candidate::from_interaction(&sample_row(), CandidateSource::Collaborative);

        assert_eq!(candidate.attraction_id, 640);
        assert_eq!(candidate.category, "Beaches");
        assert_eq!(candidate.rating, 5.0);
        assert_eq!(candidate.avg_rating, 4.6);
        assert_eq!(candidate.popularity, 312.0);
        assert_eq!(candidate.boost, 0);
        assert_eq!(candidate.via_user, 12);
        assert_eq!(candidate.source, CandidateSource::Collaborative);
    }

    #[test]
    fn test_empty_profile() {
        let profile = UserProfile::new(3);
        assert!(profile.is_empty());
        assert!(!profile.has_visited(640));
    }
}
