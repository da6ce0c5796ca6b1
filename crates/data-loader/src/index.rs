//! TravelIndex loading and validation.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::path::Path;
use tracing::info;

impl TravelIndex {
    /// Load the interaction table from a CSV export.
    ///
    /// Steps:
    /// 1. Parse all rows (in parallel, file order preserved)
    /// 2. Build the user and attraction indices
    /// 3. Validate value ranges
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading travel dataset from {:?}", path);

        let rows = parser::parse_interactions(path)?;
        let index: TravelIndex = rows.into_iter().collect();
        index.validate()?;

        let (users, attractions, rows) = index.counts();
        info!(
            "Loaded {} rows covering {} users and {} attractions",
            rows, users, attractions
        );
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - Ratings are in range (1.0 - 5.0)
    /// - Visit months are in range (1 - 12)
    /// - Every aggregate column is finite
    pub fn validate(&self) -> Result<()> {
        self.rows.par_iter().try_for_each(validate_row)
    }
}

fn validate_row(row: &Interaction) -> Result<()> {
    if !(1.0..=5.0).contains(&row.rating) {
        return Err(DataLoadError::InvalidValue {
            field: "Rating".to_string(),
            value: row.rating.to_string(),
        });
    }
    if !(1..=12).contains(&row.visit_month) {
        return Err(DataLoadError::InvalidValue {
            field: "VisitMonth".to_string(),
            value: row.visit_month.to_string(),
        });
    }

    let aggregates = [
        ("attraction_popularity", row.attraction_popularity),
        ("attr_avg_rating", row.attr_avg_rating),
        ("user_total_visits", row.user_total_visits),
        ("user_avg_rating", row.user_avg_rating),
    ];
    for (field, value) in aggregates {
        if !value.is_finite() {
            return Err(DataLoadError::InvalidValue {
                field: field.to_string(),
                value: value.to_string(),
            });
        }
    }
    Ok(())
}
