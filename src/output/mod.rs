//! Output handling for harvested records

mod csv_output;
mod traits;

pub use csv_output::CsvSink;
pub use traits::{OutputError, OutputResult, OutputSink, COLUMNS};
