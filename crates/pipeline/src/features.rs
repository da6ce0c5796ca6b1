//! Feature engineering for style prediction.
//!
//! A user's classifier input is the column-wise mean of six numeric
//! columns over all of that user's rows.

use classifier::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};
use data_loader::Interaction;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FeatureError {
    /// No rows to average over
    #[error("No interaction rows to build features from")]
    EmptyProfile,

    /// A mean came out NaN or infinite
    #[error("Feature {feature} is not finite")]
    NonFinite { feature: &'static str },
}

/// Computes classifier inputs from interaction rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEngineer;

impl FeatureEngineer {
    pub fn new() -> Self {
        Self
    }

    /// Mean of each feature column across `rows`.
    ///
    /// Fails on empty input instead of dividing by zero, and on any
    /// non-finite result instead of passing it to a model.
    pub fn mean_features(&self, rows: &[Interaction]) -> Result<FeatureVector, FeatureError> {
        if rows.is_empty() {
            return Err(FeatureError::EmptyProfile);
        }

        let mut sums = [0.0f64; FEATURE_COUNT];
        for row in rows {
            for (sum, value) in sums.iter_mut().zip(Self::row_values(row)) {
                *sum += value;
            }
        }

        let count = rows.len() as f64;
        let mut means = [0.0f64; FEATURE_COUNT];
        for (i, (mean, sum)) in means.iter_mut().zip(sums).enumerate() {
            *mean = sum / count;
            if !mean.is_finite() {
                return Err(FeatureError::NonFinite {
                    feature: FEATURE_NAMES[i],
                });
            }
        }

        Ok(FeatureVector::new(means))
    }

    /// One row's raw feature values, in `FEATURE_NAMES` order
    fn row_values(row: &Interaction) -> [f64; FEATURE_COUNT] {
        [
            f64::from(row.visit_year),
            f64::from(row.visit_month),
            f64::from(row.attraction_popularity),
            f64::from(row.attr_avg_rating),
            f64::from(row.user_total_visits),
            f64::from(row.user_avg_rating),
        ]
    }
}
