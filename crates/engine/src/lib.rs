//! Engine crate for the tour-recs recommender.
//!
//! This crate contains the engine that coordinates style prediction,
//! candidate generation and ranking for one user at a time, plus the
//! TOML configuration it is built from.

pub mod config;
pub mod engine;

pub use config::{ConfigError, EngineConfig};
pub use engine::{
    EngineError, RankedRecommendations, RankingPath, Recommendation, RecommendationEngine,
    Result, StylePrediction, UserReport,
};
