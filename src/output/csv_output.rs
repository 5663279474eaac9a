//! CSV implementation of the output sink

use crate::output::traits::{OutputResult, OutputSink, COLUMNS};
use crate::record::PropertyRecord;
use std::path::PathBuf;

/// Delimiter used inside the amenities cell
const LIST_DELIMITER: &str = "|";

/// Writes records to a CSV file, header included
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSink for CsvSink {
    fn write(&mut self, records: &[PropertyRecord]) -> OutputResult<()> {
        let mut writer = csv::Writer::from_path(&self.path)?;

        writer.write_record(COLUMNS)?;
        for record in records {
            let amenities = amenities_cell(&record.amenities);
            writer.write_record([
                record.url.as_str(),
                cell(&record.price),
                cell(&record.price_period),
                cell(&record.beds),
                cell(&record.bathrooms),
                cell(&record.area),
                cell(&record.location),
                cell(&record.creation_date),
                cell(&record.floor),
                amenities.as_str(),
                cell(&record.ad_id),
                cell(&record.latitude),
                cell(&record.longitude),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Absent values become empty cells, never a literal "None"
fn cell(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn amenities_cell(value: &Option<Vec<String>>) -> String {
    value
        .as_ref()
        .map(|items| items.join(LIST_DELIMITER))
        .unwrap_or_default()
}
