//! The rule interpreter: schemas in, optional field values out
//!
//! Absence is the normal case here. A missing container, a missing child, an
//! out-of-range child index, or an unparseable selector all end evaluation
//! for that one field; nothing panics and nothing propagates.

use crate::extract::geo::extract_geo;
use crate::extract::schema::{detail_schema, field, ExtractMode, FieldRule, FieldSchema};
use scraper::{ElementRef, Selector};
use std::collections::HashMap;

/// A single extracted value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

/// Field values produced by one extraction pass
///
/// A field that had no matching markup is simply not present in the map;
/// an empty string or empty list means the node existed.
#[derive(Debug, Clone, Default)]
pub struct ExtractedFields {
    values: HashMap<&'static str, FieldValue>,
}

impl ExtractedFields {
    pub fn insert(&mut self, name: &'static str, value: FieldValue) {
        self.values.insert(name, value);
    }

    /// Text value of a field, if extracted
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            FieldValue::Text(text) => Some(text),
            FieldValue::List(_) => None,
        }
    }

    /// List value of a field, if extracted
    pub fn list(&self, name: &str) -> Option<&[String]> {
        match self.values.get(name)? {
            FieldValue::List(items) => Some(items),
            FieldValue::Text(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Applies every rule of a schema to the given scope
///
/// The scope is a listing-item element for the summary stage and the
/// document root for the detail stage.
pub fn extract(scope: ElementRef<'_>, schema: &FieldSchema) -> ExtractedFields {
    let mut fields = ExtractedFields::default();
    for rule in &schema.rules {
        if let Some(value) = eval_rule(scope, rule) {
            fields.insert(rule.name, value);
        }
    }
    fields
}

/// Runs the detail schema plus the static-map geo rule over a detail page
pub fn extract_detail(scope: ElementRef<'_>) -> ExtractedFields {
    let mut fields = extract(scope, &detail_schema());
    if let Some((latitude, longitude)) = extract_geo(scope) {
        fields.insert(field::LATITUDE, FieldValue::Text(latitude));
        fields.insert(field::LONGITUDE, FieldValue::Text(longitude));
    }
    fields
}

fn eval_rule(scope: ElementRef<'_>, rule: &FieldRule) -> Option<FieldValue> {
    let container_sel = Selector::parse(rule.container).ok()?;
    let container = scope.select(&container_sel).next()?;

    match rule.mode {
        ExtractMode::ListOfText => {
            let child_sel = Selector::parse(rule.child?).ok()?;
            let texts = container.select(&child_sel).map(trimmed_text).collect();
            Some(FieldValue::List(texts))
        }
        ExtractMode::Text => {
            let node = resolve_node(container, rule)?;
            Some(FieldValue::Text(trimmed_text(node)))
        }
        ExtractMode::Attribute(attr) => {
            let node = resolve_node(container, rule)?;
            node.value()
                .attr(attr)
                .map(|value| FieldValue::Text(value.trim().to_string()))
        }
    }
}

fn resolve_node<'a>(container: ElementRef<'a>, rule: &FieldRule) -> Option<ElementRef<'a>> {
    match rule.child {
        Some(child) => {
            let child_sel = Selector::parse(child).ok()?;
            container.select(&child_sel).nth(rule.child_index)
        }
        // The container itself only stands in for the first position
        None => (rule.child_index == 0).then_some(container),
    }
}

fn trimmed_text(node: ElementRef<'_>) -> String {
    node.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::schema::listing_schema;
    use scraper::Html;

    fn eval_on(html: &str, schema: &FieldSchema) -> ExtractedFields {
        let document = Html::parse_document(html);
        extract(document.root_element(), schema)
    }

    #[test]
    fn test_missing_container_yields_absent_field() {
        let fields = eval_on("<html><body></body></html>", &listing_schema());
        assert!(fields.is_empty());
        assert_eq!(fields.text(field::PRICE), None);
    }

    #[test]
    fn test_missing_child_yields_absent_field() {
        let html = r#"<div aria-class="Beds"><em>no span here</em></div>"#;
        let fields = eval_on(html, &listing_schema());
        assert_eq!(fields.text(field::BEDS), None);
    }

    #[test]
    fn test_text_is_trimmed() {
        let html = r#"<div aria-class="Location"><span>  Shorouk City  </span></div>"#;
        let fields = eval_on(html, &listing_schema());
        assert_eq!(fields.text(field::LOCATION), Some("Shorouk City"));
    }

    #[test]
    fn test_empty_text_is_not_absent() {
        let html = r#"<div aria-class="Location"><span>   </span></div>"#;
        let fields = eval_on(html, &listing_schema());
        // The node exists; the value is an empty string, not a missing field
        assert_eq!(fields.text(field::LOCATION), Some(""));
    }

    #[test]
    fn test_price_with_two_spans() {
        let html = r#"<div aria-class="Price"><span>5,000</span><span>Monthly</span></div>"#;
        let fields = eval_on(html, &listing_schema());
        assert_eq!(fields.text(field::PRICE), Some("5,000"));
        assert_eq!(fields.text(field::PRICE_PERIOD), Some("Monthly"));
    }

    #[test]
    fn test_price_with_one_span_degrades() {
        let html = r#"<div aria-class="Price"><span>5,000</span></div>"#;
        let fields = eval_on(html, &listing_schema());
        assert_eq!(fields.text(field::PRICE), Some("5,000"));
        assert_eq!(fields.text(field::PRICE_PERIOD), None);
    }

    #[test]
    fn test_price_with_no_spans_degrades() {
        let html = r#"<div aria-class="Price"></div>"#;
        let fields = eval_on(html, &listing_schema());
        assert_eq!(fields.text(field::PRICE), None);
        assert_eq!(fields.text(field::PRICE_PERIOD), None);
    }

    #[test]
    fn test_list_collects_in_document_order() {
        let html = r#"
            <div aria-class="Amenities">
                <span>Balcony</span>
                <span> Elevator </span>
                <span>Parking</span>
            </div>"#;
        let fields = eval_on(html, &detail_schema());
        assert_eq!(
            fields.list(field::AMENITIES),
            Some(&["Balcony".to_string(), "Elevator".to_string(), "Parking".to_string()][..])
        );
    }

    #[test]
    fn test_empty_list_container_yields_empty_list() {
        let html = r#"<div aria-class="Amenities"><em>none listed</em></div>"#;
        let fields = eval_on(html, &detail_schema());
        // Container present, no matching children: empty list, not absent
        assert_eq!(fields.list(field::AMENITIES), Some(&[][..]));
    }

    #[test]
    fn test_missing_list_container_yields_absent() {
        let fields = eval_on("<div></div>", &detail_schema());
        assert_eq!(fields.list(field::AMENITIES), None);
    }

    #[test]
    fn test_attribute_mode() {
        let schema = FieldSchema {
            rules: vec![FieldRule {
                name: "link",
                container: r#"div[aria-class="More"]"#,
                child: Some("a"),
                child_index: 0,
                mode: ExtractMode::Attribute("href"),
            }],
        };
        let html = r#"<div aria-class="More"><a href="/ad/123">more</a></div>"#;
        let fields = eval_on(html, &schema);
        assert_eq!(fields.text("link"), Some("/ad/123"));
    }

    #[test]
    fn test_attribute_missing_yields_absent() {
        let schema = FieldSchema {
            rules: vec![FieldRule {
                name: "link",
                container: r#"div[aria-class="More"]"#,
                child: Some("a"),
                child_index: 0,
                mode: ExtractMode::Attribute("href"),
            }],
        };
        let html = r#"<div aria-class="More"><a>no href</a></div>"#;
        let fields = eval_on(html, &schema);
        assert_eq!(fields.text("link"), None);
    }

    #[test]
    fn test_scoped_extraction_does_not_leak_across_items() {
        let html = r#"
            <ul>
                <li id="one"><div aria-class="Price"><span>1,000</span></div></li>
                <li id="two"><div aria-class="Price"><span>2,000</span></div></li>
            </ul>"#;
        let document = Html::parse_document(html);
        let item_sel = Selector::parse("li#two").unwrap();
        let item = document.select(&item_sel).next().unwrap();

        let fields = extract(item, &listing_schema());
        assert_eq!(fields.text(field::PRICE), Some("2,000"));
    }

    #[test]
    fn test_detail_extraction_includes_geo() {
        let html = r#"
            <div aria-class="Floor"><span>3</span></div>
            <div aria-label="Map">
                <img src="https://maps.example.com/static/31.234,30.123,14/300x200@2x?access_token=tk" />
            </div>"#;
        let document = Html::parse_document(html);
        let fields = extract_detail(document.root_element());

        assert_eq!(fields.text(field::FLOOR), Some("3"));
        assert_eq!(fields.text(field::LATITUDE), Some("31.234"));
        assert_eq!(fields.text(field::LONGITUDE), Some("30.123"));
    }
}
