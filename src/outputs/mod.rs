//! Persisting news records.
//!
//! Storage sits outside the query pipeline: it receives records the caller
//! already owns, so a failed write never affects the returned results.
//!
//! # Submodules
//!
//! - [`json`]: writes each batch to a dated JSON file
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! └── 2025-05-06/
//!     ├── top-headlines_081500.json
//!     └── climate-change_093012.json
//! ```

pub mod json;

use crate::error::GNewsError;
use crate::models::NewsRecord;

pub use json::JsonStore;

/// Destination for batches of [`NewsRecord`]s.
pub trait NewsStore {
    /// Store `records` under `label`; returns how many were written.
    async fn insert(&self, label: &str, records: &[NewsRecord]) -> Result<usize, GNewsError>;
}
