//! # Recommendation Engine
//!
//! Coordinates one user's computation:
//! 1. Build the user profile (may be empty)
//! 2. Predict the travel style from mean features (skipped when empty)
//! 3. Generate collaborative candidates
//! 4. Fall back to popularity candidates when there are none
//! 5. Rank with the hybrid ranker
//!
//! The index and classifier are injected and only ever read, so one
//! engine can serve any number of computations, including concurrent ones.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use classifier::{ClassifierError, FeatureVector, StyleClassifier, VisitMode};
use data_loader::{AttractionId, Interaction, TravelIndex, UserId};
use pipeline::{FeatureEngineer, FeatureError, HybridRanker};
use sources::{Candidate, CollaborativeSource, PopularitySource, UserProfile};

use crate::config::{ConfigError, EngineConfig};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("No data available for user {0}")]
    NoData(UserId),

    #[error("Could not build features: {0}")]
    Features(#[from] FeatureError),

    #[error("Style prediction failed: {0}")]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ranking(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Classifier output for one user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StylePrediction {
    /// The mean feature vector the classifier was given
    pub features: FeatureVector,
    pub mode: VisitMode,
}

impl StylePrediction {
    /// Raw class code the classifier returned
    pub fn code(&self) -> i64 {
        self.mode.code()
    }

    /// Label for display; the raw code when the class is unknown
    pub fn label(&self) -> String {
        self.mode.to_string()
    }
}

/// Which candidate set produced the recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingPath {
    Collaborative,
    Fallback,
}

/// One recommended attraction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// 1-based position in the result list
    pub rank: usize,
    pub attraction_id: AttractionId,
    pub category: String,
    pub rating: f32,
    pub avg_rating: f32,
    pub popularity: f32,
    pub boost: u8,
    pub via_user: UserId,
}

impl Recommendation {
    fn from_candidate(rank: usize, candidate: Candidate) -> Self {
        Self {
            rank,
            attraction_id: candidate.attraction_id,
            category: candidate.category,
            rating: candidate.rating,
            avg_rating: candidate.avg_rating,
            popularity: candidate.popularity,
            boost: candidate.boost,
            via_user: candidate.via_user,
        }
    }

    /// Short reason for the position of this item
    pub fn explanation(&self, path: RankingPath) -> String {
        let origin = match path {
            RankingPath::Collaborative => format!("liked by similar user {}", self.via_user),
            RankingPath::Fallback => "popular in the dataset".to_string(),
        };
        if self.boost == 1 {
            format!("{} matches the predicted style, {}", self.category, origin)
        } else {
            format!("{}, avg rating {:.2}", origin, self.avg_rating)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecommendations {
    pub path: RankingPath,
    pub items: Vec<Recommendation>,
}

impl RankedRecommendations {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Full result of one user selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UserReport {
    /// The user id has no rows; nothing was predicted or ranked
    NoData { user_id: UserId },
    Ready {
        user_id: UserId,
        prediction: StylePrediction,
        recommendations: RankedRecommendations,
        /// The first rows of the user's history, dataset order
        history: Vec<Interaction>,
    },
}

impl UserReport {
    pub fn user_id(&self) -> UserId {
        match self {
            UserReport::NoData { user_id } | UserReport::Ready { user_id, .. } => *user_id,
        }
    }
}

/// Main engine that coordinates prediction and ranking
pub struct RecommendationEngine {
    data_index: Arc<TravelIndex>,
    classifier: Arc<dyn StyleClassifier>,
    collaborative: CollaborativeSource,
    popularity: PopularitySource,
    feature_engineer: FeatureEngineer,
    ranker: HybridRanker,
    history_limit: usize,
}

impl RecommendationEngine {
    /// Create an engine over an index and classifier
    ///
    /// Fails only when the config is invalid.
    pub fn new(
        data_index: Arc<TravelIndex>,
        classifier: Arc<dyn StyleClassifier>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let collaborative = CollaborativeSource::new(data_index.clone())
            .with_like_threshold(config.like_threshold)
            .with_include_self(config.include_self);
        let popularity = PopularitySource::new(data_index.clone());
        let ranker = HybridRanker::new(config.style_preferences()?).with_limit(config.result_limit);

        info!(
            "Engine ready: classifier={}, result_limit={}, like_threshold={}, include_self={}",
            classifier.name(),
            config.result_limit,
            config.like_threshold,
            config.include_self
        );

        Ok(Self {
            data_index,
            classifier,
            collaborative,
            popularity,
            feature_engineer: FeatureEngineer::new(),
            ranker,
            history_limit: config.history_limit,
        })
    }

    pub fn data_index(&self) -> &Arc<TravelIndex> {
        &self.data_index
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    pub fn result_limit(&self) -> usize {
        self.ranker.limit()
    }

    /// Gather a user's rows; empty for ids without data
    pub fn user_profile(&self, user_id: UserId) -> UserProfile {
        sources::user_profile::build_user_profile(&self.data_index, user_id)
    }

    /// Predict the travel style from the user's mean features.
    ///
    /// An empty profile returns `NoData` without calling the classifier.
    #[instrument(skip(self, profile), fields(user_id = profile.user_id))]
    pub fn predict_style(&self, profile: &UserProfile) -> Result<StylePrediction> {
        if profile.is_empty() {
            return Err(EngineError::NoData(profile.user_id));
        }

        let features = self.feature_engineer.mean_features(&profile.history)?;
        let code = self.classifier.predict(&features)?;
        let mode = VisitMode::from_code(code);
        debug!("Predicted style {} (code {})", mode, code);

        Ok(StylePrediction { features, mode })
    }

    /// Rank recommendations for a user and style
    #[instrument(skip(self, profile), fields(user_id = profile.user_id))]
    pub fn recommend(&self, profile: &UserProfile, style: VisitMode) -> Result<RankedRecommendations> {
        let mut path = RankingPath::Collaborative;
        let mut candidates = self.collaborative.get_candidates(profile);

        if candidates.is_empty() {
            info!("No collaborative candidates for user {}, using fallback", profile.user_id);
            path = RankingPath::Fallback;
            candidates = self
                .popularity
                .get_candidates(profile, self.ranker.preferences().categories_for(style));
        }

        let ranked = self.ranker.rank(candidates, style, profile)?;
        let items = ranked
            .into_iter()
            .enumerate()
            .map(|(i, candidate)| Recommendation::from_candidate(i + 1, candidate))
            .collect();

        Ok(RankedRecommendations { path, items })
    }

    /// Main entry point: prediction, recommendations and history for one user
    pub fn recommend_for_user(&self, user_id: UserId) -> Result<UserReport> {
        let start_time = Instant::now();

        let profile = self.user_profile(user_id);
        if profile.is_empty() {
            info!("No data available for user {}", user_id);
            return Ok(UserReport::NoData { user_id });
        }

        let prediction = self.predict_style(&profile)?;
        let recommendations = self.recommend(&profile, prediction.mode)?;
        let history = profile.recent(self.history_limit).to_vec();

        info!(
            "User {}: style {}, {} recommendations via {:?} in {:.2?}",
            user_id,
            prediction.mode,
            recommendations.len(),
            recommendations.path,
            start_time.elapsed()
        );

        Ok(UserReport::Ready {
            user_id,
            prediction,
            recommendations,
            history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classifier::FEATURE_NAMES;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed code, counting calls and recording inputs
    struct MockClassifier {
        code: i64,
        calls: AtomicUsize,
        seen: Mutex<Vec<FeatureVector>>,
    }

    impl MockClassifier {
        fn new(code: i64) -> Arc<Self> {
            Arc::new(Self {
                code,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl StyleClassifier for MockClassifier {
        fn name(&self) -> &str {
            "mock"
        }

        fn predict(&self, features: &FeatureVector) -> classifier::Result<i64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(*features);
            Ok(self.code)
        }
    }

    struct FailingClassifier;

    impl StyleClassifier for FailingClassifier {
        fn name(&self) -> &str {
            "failing"
        }

        fn predict(&self, _features: &FeatureVector) -> classifier::Result<i64> {
            Err(ClassifierError::Prediction("model unavailable".to_string()))
        }
    }

    fn visit(user_id: UserId, attraction_id: AttractionId, category: &str, rating: f32) -> Interaction {
        Interaction {
            user_id,
            attraction_id,
            category: category.to_string(),
            rating,
            visit_year: 2021,
            visit_month: 4,
            attraction_popularity: 100.0 + attraction_id as f32,
            attr_avg_rating: 4.0,
            user_total_visits: 2.0,
            user_avg_rating: 3.5,
        }
    }

    fn build_test_data_index() -> Arc<TravelIndex> {
        let index: TravelIndex = vec![
            visit(1, 1, "Beaches", 5.0),
            visit(1, 2, "Museums", 2.0),
            visit(2, 1, "Beaches", 4.0),
            visit(2, 3, "Parks", 5.0),
            visit(3, 4, "Zoos", 1.0),
        ]
        .into_iter()
        .collect();
        Arc::new(index)
    }

    fn build_engine(classifier: Arc<dyn StyleClassifier>) -> RecommendationEngine {
        RecommendationEngine::new(build_test_data_index(), classifier, EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_no_data_skips_classifier() {
        let mock = MockClassifier::new(1);
        let engine = build_engine(mock.clone());

        let report = engine.recommend_for_user(99).unwrap();
        assert_eq!(report, UserReport::NoData { user_id: 99 });
        assert_eq!(mock.calls(), 0);

        let err = engine.predict_style(&UserProfile::new(99)).unwrap_err();
        assert!(matches!(err, EngineError::NoData(99)));
        assert_eq!(mock.calls(), 0);
    }

    #[test]
    fn test_prediction_uses_mean_features() {
        let mock = MockClassifier::new(1);
        let engine = build_engine(mock.clone());

        let prediction = engine.predict_style(&engine.user_profile(1)).unwrap();
        assert_eq!(prediction.mode, VisitMode::Couples);
        assert_eq!(prediction.label(), "Couples");
        assert_eq!(mock.calls(), 1);

        let seen = mock.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].values().len(), FEATURE_NAMES.len());
        assert_eq!(seen[0].get("attraction_popularity"), Some(101.5));
        assert_eq!(seen[0].get("VisitMonth"), Some(4.0));
    }

    #[test]
    fn test_unknown_code_keeps_raw_integer() {
        let engine = build_engine(MockClassifier::new(42));

        let prediction = engine.predict_style(&engine.user_profile(1)).unwrap();
        assert_eq!(prediction.mode, VisitMode::Unknown(42));
        assert_eq!(prediction.code(), 42);
        assert_eq!(prediction.label(), "42");
    }

    #[test]
    fn test_known_code_round_trips_through_mode() {
        let engine = build_engine(MockClassifier::new(3));

        let prediction = engine.predict_style(&engine.user_profile(1)).unwrap();
        assert_eq!(prediction.mode, VisitMode::Friends);
        assert_eq!(prediction.code(), 3);
    }

    #[test]
    fn test_unknown_code_still_recommends() {
        let engine = build_engine(MockClassifier::new(42));

        match engine.recommend_for_user(1).unwrap() {
            UserReport::Ready { recommendations, .. } => {
                let ids: Vec<_> = recommendations.items.iter().map(|r| r.attraction_id).collect();
                assert_eq!(ids, vec![3]);
                assert_eq!(recommendations.items[0].boost, 0);
            }
            other => panic!("expected a ready report, got {other:?}"),
        }
    }

    #[test]
    fn test_collaborative_path() {
        let engine = build_engine(MockClassifier::new(1));
        let profile = engine.user_profile(1);

        let ranked = engine.recommend(&profile, VisitMode::Couples).unwrap();
        assert_eq!(ranked.path, RankingPath::Collaborative);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked.items[0].rank, 1);
        assert_eq!(ranked.items[0].attraction_id, 3);
        assert_eq!(ranked.items[0].rating, 5.0);
        assert_eq!(ranked.items[0].boost, 1);
        assert_eq!(ranked.items[0].via_user, 2);
    }

    #[test]
    fn test_fallback_path_excludes_history() {
        let engine = build_engine(MockClassifier::new(2));
        let profile = engine.user_profile(3);

        let ranked = engine.recommend(&profile, VisitMode::Couples).unwrap();
        assert_eq!(ranked.path, RankingPath::Fallback);

        // Couples prefers Beaches and Parks; user 3 only visited attraction 4
        let ids: Vec<_> = ranked.items.iter().map(|r| r.attraction_id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert!(ranked.items.iter().all(|r| r.boost == 1));
    }

    #[test]
    fn test_fallback_without_preferences_uses_every_category() {
        let engine = build_engine(MockClassifier::new(7));
        let profile = engine.user_profile(3);

        let ranked = engine.recommend(&profile, VisitMode::Unknown(7)).unwrap();
        assert_eq!(ranked.path, RankingPath::Fallback);

        // Same avg rating everywhere, so popularity decides
        let ids: Vec<_> = ranked.items.iter().map(|r| r.attraction_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_ready_report_includes_history() {
        let config = EngineConfig {
            history_limit: 1,
            ..EngineConfig::default()
        };
        let engine =
            RecommendationEngine::new(build_test_data_index(), MockClassifier::new(1), config).unwrap();

        match engine.recommend_for_user(1).unwrap() {
            UserReport::Ready {
                user_id, history, ..
            } => {
                assert_eq!(user_id, 1);
                assert_eq!(history.len(), 1);
                assert_eq!(history[0].attraction_id, 1);
            }
            other => panic!("expected a ready report, got {other:?}"),
        }
    }

    #[test]
    fn test_classifier_error_is_surfaced() {
        let engine = build_engine(Arc::new(FailingClassifier));

        let err = engine.recommend_for_user(1).unwrap_err();
        assert!(matches!(err, EngineError::Classifier(_)));
        assert!(err.to_string().contains("model unavailable"));

        // The failure is local; the next user still works
        assert_eq!(
            engine.recommend_for_user(99).unwrap(),
            UserReport::NoData { user_id: 99 }
        );
    }

    #[test]
    fn test_non_finite_features_are_surfaced() {
        let mut row = visit(5, 9, "Parks", 5.0);
        row.user_avg_rating = f32::NAN;
        let index: TravelIndex = vec![row].into_iter().collect();
        let mock = MockClassifier::new(1);
        let engine =
            RecommendationEngine::new(Arc::new(index), mock.clone(), EngineConfig::default()).unwrap();

        let err = engine.recommend_for_user(5).unwrap_err();
        assert!(matches!(err, EngineError::Features(FeatureError::NonFinite { .. })));
        assert_eq!(mock.calls(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            result_limit: 0,
            ..EngineConfig::default()
        };
        let result = RecommendationEngine::new(build_test_data_index(), MockClassifier::new(1), config);
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_explanation_mentions_origin() {
        let engine = build_engine(MockClassifier::new(1));
        let ranked = engine.recommend(&engine.user_profile(1), VisitMode::Couples).unwrap();

        let text = ranked.items[0].explanation(ranked.path);
        assert!(text.contains("Parks"));
        assert!(text.contains("similar user 2"));
    }
}
