//! Nearest-centroid visit mode model.
//!
//! Model file format (JSON):
//!
//! ```json
//! {
//!   "centroids": [
//!     { "class": 0, "values": [2021.0, 6.0, 150.0, 4.2, 5.0, 4.0] },
//!     { "class": 1, "values": [2022.0, 7.0, 300.0, 4.5, 3.0, 4.4] }
//!   ],
//!   "scale": [1.0, 3.0, 100.0, 0.5, 2.0, 0.5]
//! }
//! ```
//!
//! `scale` is optional and defaults to all ones. Each feature is divided by
//! its scale before the Euclidean distance is taken.

use crate::{ClassifierError, FEATURE_COUNT, FeatureVector, Result, StyleClassifier};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// One class centroid as stored in the model file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub class: i64,
    pub values: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct ModelFile {
    centroids: Vec<Centroid>,
    #[serde(default)]
    scale: Option<Vec<f64>>,
}

/// Predicts the class of the closest centroid.
///
/// Ties go to the centroid listed first.
#[derive(Debug, Clone)]
pub struct NearestCentroidClassifier {
    centroids: Vec<(i64, [f64; FEATURE_COUNT])>,
    scale: [f64; FEATURE_COUNT],
}

impl NearestCentroidClassifier {
    /// Build a classifier, validating dimensions and values
    pub fn new(centroids: Vec<Centroid>, scale: Option<Vec<f64>>) -> Result<Self> {
        if centroids.is_empty() {
            return Err(ClassifierError::InvalidModel(
                "model has no centroids".to_string(),
            ));
        }

        let centroids = centroids
            .into_iter()
            .map(|centroid| {
                let values = to_feature_array(&centroid.values, "centroid")?;
                Ok((centroid.class, values))
            })
            .collect::<Result<Vec<_>>>()?;

        let scale = match scale {
            Some(scale) => to_feature_array(&scale, "scale")?,
            None => [1.0; FEATURE_COUNT],
        };
        if scale.iter().any(|&s| s <= 0.0) {
            return Err(ClassifierError::InvalidModel(
                "scale values must be positive".to_string(),
            ));
        }

        Ok(Self { centroids, scale })
    }

    /// Parse a model from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let model: ModelFile = serde_json::from_str(json)?;
        Self::new(model.centroids, model.scale)
    }

    /// Load a model file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ClassifierError::ModelNotFound {
                path: path.display().to_string(),
            },
            _ => ClassifierError::Io(e),
        })?;

        let model = Self::from_json_str(&json)?;
        info!(
            "Loaded nearest-centroid model with {} classes from {:?}",
            model.centroids.len(),
            path
        );
        Ok(model)
    }

    /// Class codes this model can emit, in file order
    pub fn classes(&self) -> Vec<i64> {
        self.centroids.iter().map(|(class, _)| *class).collect()
    }

    fn distance(&self, a: &[f64; FEATURE_COUNT], b: &[f64; FEATURE_COUNT]) -> f64 {
        a.iter()
            .zip(b.iter())
            .zip(self.scale.iter())
            .map(|((x, y), s)| ((x - y) / s).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

impl StyleClassifier for NearestCentroidClassifier {
    fn name(&self) -> &str {
        "NearestCentroidClassifier"
    }

    fn predict(&self, features: &FeatureVector) -> Result<i64> {
        let values = features.values();
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ClassifierError::Prediction(
                "feature vector contains non-finite values".to_string(),
            ));
        }

        let mut best: Option<(i64, f64)> = None;
        for (class, centroid) in &self.centroids {
            let distance = self.distance(values, centroid);
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((*class, distance));
            }
        }

        let (class, distance) = best
            .ok_or_else(|| ClassifierError::Prediction("model has no centroids".to_string()))?;
        debug!("Nearest centroid: class {} at distance {:.4}", class, distance);
        Ok(class)
    }
}

fn to_feature_array(values: &[f64], what: &str) -> Result<[f64; FEATURE_COUNT]> {
    let array: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
        ClassifierError::InvalidModel(format!(
            "{} has {} values, expected {}",
            what,
            values.len(),
            FEATURE_COUNT
        ))
    })?;
    if array.iter().any(|v| !v.is_finite()) {
        return Err(ClassifierError::InvalidModel(format!(
            "{} contains non-finite values",
            what
        )));
    }
    Ok(array)
}
