//! Output sink trait and types
//!
//! The crawler hands its finished record sequence to an [`OutputSink`]; it
//! never writes rows itself.

use crate::record::PropertyRecord;
use thiserror::Error;

/// Column order every sink must honor
pub const COLUMNS: [&str; 13] = [
    "url",
    "price",
    "price_period",
    "beds",
    "bathrooms",
    "area",
    "location",
    "creation_date",
    "floor",
    "amenities",
    "ad_id",
    "latitude",
    "longitude",
];

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Receiver for the final record sequence
///
/// Contract: one row per record, columns in [`COLUMNS`] order, absent
/// fields as empty cells (never a literal "null" or "None"), amenities as
/// a delimited list.
pub trait OutputSink {
    fn write(&mut self, records: &[PropertyRecord]) -> OutputResult<()>;
}
