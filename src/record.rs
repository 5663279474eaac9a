//! The unified property record and its merge rule

use crate::extract::{field, ExtractedFields};

/// One harvested property, merged from the listing and detail stages
///
/// Every field except `url` is optional: `None` means the corresponding
/// markup node was never found, which is distinct from an empty value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyRecord {
    /// Absolute detail-page URL; the record's identity
    pub url: String,

    // Summary-stage fields
    pub price: Option<String>,
    pub price_period: Option<String>,
    pub beds: Option<String>,
    pub bathrooms: Option<String>,
    pub area: Option<String>,
    pub location: Option<String>,
    pub creation_date: Option<String>,

    // Detail-stage fields
    pub floor: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub ad_id: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl PropertyRecord {
    /// Creates a record holding only its URL key
    pub fn new(url: String) -> Self {
        Self {
            url,
            ..Self::default()
        }
    }

    /// Merges extracted fields into the record, additively
    ///
    /// A value only lands in a slot that is still empty; populated fields
    /// are authoritative and never clobbered by a later stage. Fields the
    /// extraction did not produce leave their slots untouched.
    pub fn apply(&mut self, fields: &ExtractedFields) {
        fill(&mut self.price, fields.text(field::PRICE));
        fill(&mut self.price_period, fields.text(field::PRICE_PERIOD));
        fill(&mut self.beds, fields.text(field::BEDS));
        fill(&mut self.bathrooms, fields.text(field::BATHROOMS));
        fill(&mut self.area, fields.text(field::AREA));
        fill(&mut self.location, fields.text(field::LOCATION));
        fill(&mut self.creation_date, fields.text(field::CREATION_DATE));
        fill(&mut self.floor, fields.text(field::FLOOR));
        fill(&mut self.ad_id, fields.text(field::AD_ID));
        fill(&mut self.latitude, fields.text(field::LATITUDE));
        fill(&mut self.longitude, fields.text(field::LONGITUDE));

        if self.amenities.is_none() {
            if let Some(items) = fields.list(field::AMENITIES) {
                self.amenities = Some(items.to_vec());
            }
        }
    }
}

fn fill(slot: &mut Option<String>, value: Option<&str>) {
    if slot.is_none() {
        if let Some(text) = value {
            *slot = Some(text.to_string());
        }
    }
}
