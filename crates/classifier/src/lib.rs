//! Travel style classification.
//!
//! This crate defines the seam between the recommender and whatever model
//! predicts a user's visit mode:
//! - `FeatureVector`: the six averaged feature values a model consumes
//! - `StyleClassifier`: one call, feature vector in, integer class out
//! - `VisitMode`: the closed set of labels, with a fallback for codes the
//!   label table does not know
//! - `NearestCentroidClassifier`: a model that can be loaded from a JSON
//!   file so the binary works without any external service

pub mod centroid;
pub mod visit_mode;

pub use centroid::{Centroid, NearestCentroidClassifier};
pub use visit_mode::VisitMode;

use serde::Serialize;
use thiserror::Error;

/// Number of features a classifier consumes
pub const FEATURE_COUNT: usize = 6;

/// Feature column names, in the order they appear in a `FeatureVector`
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "VisitYear",
    "VisitMonth",
    "attraction_popularity",
    "attr_avg_rating",
    "user_total_visits",
    "user_avg_rating",
];

/// Errors that can occur when loading or calling a classifier
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Model file not found: {path}")]
    ModelNotFound { path: String },

    #[error("I/O error reading model: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed model file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;

/// A single feature vector, one value per entry of `FEATURE_NAMES`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Look up a value by feature name
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|&feature| feature == name)
            .map(|i| self.0[i])
    }

    /// (name, value) pairs in feature order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

/// A model that maps one feature vector to one integer class.
///
/// Implementations are loaded once and shared read-only across
/// computations, hence `Send + Sync` and `&self`.
pub trait StyleClassifier: Send + Sync {
    /// Returns the name of this classifier (for logging)
    fn name(&self) -> &str;

    /// Predict the class code for a feature vector
    fn predict(&self, features: &FeatureVector) -> Result<i64>;
}
