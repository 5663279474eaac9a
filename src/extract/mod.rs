//! Schema-driven field extraction over parsed HTML
//!
//! Extraction rules are declarative: each names a container selector, an
//! optional child selector with a position, and a mode. One interpreter
//! evaluates every rule, so "node missing" is handled in exactly one place
//! and always degrades to an absent field.

mod extractor;
mod geo;
mod schema;

pub use extractor::{extract, extract_detail, ExtractedFields, FieldValue};
pub use geo::{extract_geo, parse_static_map_coords};
pub use schema::{detail_schema, field, listing_schema, ExtractMode, FieldRule, FieldSchema};
