//! Parser for the interaction CSV export.
//!
//! The first record is a header. Columns are located by name so exports
//! with extra or reordered columns still load; a missing required column
//! fails the whole load. Quoting follows RFC 4180 via the `csv` crate.
//!
//! Required columns:
//! `UserId, AttractionId, AttractionType, Rating, VisitYear, VisitMonth,
//! attraction_popularity, attr_avg_rating, user_total_visits, user_avg_rating`

use crate::error::{DataLoadError, Result};
use crate::types::Interaction;
use csv::StringRecord;
use rayon::prelude::*;
use std::io::{self, ErrorKind};
use std::path::Path;

pub const COL_USER_ID: &str = "UserId";
pub const COL_ATTRACTION_ID: &str = "AttractionId";
pub const COL_CATEGORY: &str = "AttractionType";
pub const COL_RATING: &str = "Rating";
pub const COL_VISIT_YEAR: &str = "VisitYear";
pub const COL_VISIT_MONTH: &str = "VisitMonth";
pub const COL_POPULARITY: &str = "attraction_popularity";
pub const COL_ATTR_AVG_RATING: &str = "attr_avg_rating";
pub const COL_USER_TOTAL_VISITS: &str = "user_total_visits";
pub const COL_USER_AVG_RATING: &str = "user_avg_rating";

/// Columns every export must carry
pub const REQUIRED_COLUMNS: [&str; 10] = [
    COL_USER_ID,
    COL_ATTRACTION_ID,
    COL_CATEGORY,
    COL_RATING,
    COL_VISIT_YEAR,
    COL_VISIT_MONTH,
    COL_POPULARITY,
    COL_ATTR_AVG_RATING,
    COL_USER_TOTAL_VISITS,
    COL_USER_AVG_RATING,
];

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All);
    builder
}

/// Parse the interaction file at `path`
pub fn parse_interactions(path: &Path) -> Result<Vec<Interaction>> {
    let reader = reader_builder().from_path(path).map_err(|e| {
        let not_found = matches!(e.kind(), csv::ErrorKind::Io(io) if io.kind() == ErrorKind::NotFound);
        if not_found {
            DataLoadError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            csv_error(e)
        }
    })?;

    read_interactions(reader)
}

/// Parse interaction rows from in-memory CSV text
pub fn parse_interactions_str(content: &str) -> Result<Vec<Interaction>> {
    read_interactions(reader_builder().from_reader(content.as_bytes()))
}

/// Read raw records in file order, then deserialize them in parallel.
///
/// The returned Vec keeps file order.
fn read_interactions<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Interaction>> {
    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.is_empty() {
        return Err(DataLoadError::EmptyDataset);
    }
    if let Some(column) = REQUIRED_COLUMNS
        .iter()
        .find(|&&column| !headers.iter().any(|name| name == column))
    {
        return Err(DataLoadError::MissingColumn {
            column: column.to_string(),
        });
    }

    let records = reader
        .records()
        .collect::<std::result::Result<Vec<StringRecord>, _>>()
        .map_err(csv_error)?;
    if records.is_empty() {
        return Err(DataLoadError::EmptyDataset);
    }

    records
        .par_iter()
        .map(|record| parse_record(record, &headers))
        .collect()
}

fn parse_record(record: &StringRecord, headers: &StringRecord) -> Result<Interaction> {
    let line = record.position().map_or(0, |pos| pos.line() as usize);
    let row: Interaction = record
        .deserialize(Some(headers))
        .map_err(|e| DataLoadError::ParseError {
            line,
            reason: e.to_string(),
        })?;

    if row.category.is_empty() {
        return Err(DataLoadError::ParseError {
            line,
            reason: format!("Empty {}", COL_CATEGORY),
        });
    }
    Ok(row)
}

fn csv_error(err: csv::Error) -> DataLoadError {
    let line = err.position().map_or(0, |pos| pos.line() as usize);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => DataLoadError::IoError(e),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => DataLoadError::FieldCountMismatch {
            expected: expected_len as usize,
            found: len as usize,
            line,
        },
        _ => DataLoadError::ParseError { line, reason },
    }
}
