//! # Data Loader Crate
//!
//! Loads the travel interaction table and indexes it for per-user and
//! per-attraction lookups.
//!
//! ## Main Components
//!
//! - **types**: `Interaction` rows and the `TravelIndex` table
//! - **parser**: Parse the CSV export into `Interaction` rows
//! - **index**: Load, index and validate a dataset file
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::TravelIndex;
//! use std::path::Path;
//!
//! let index = TravelIndex::load_from_file(Path::new("data/interactions.csv"))?;
//!
//! for &user_id in index.user_ids().iter().take(5) {
//!     println!("User {} has {} visits", user_id, index.user_rows(user_id).len());
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    AttractionId,
    // Core types
    Interaction,
    TravelIndex,
};
