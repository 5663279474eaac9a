//! Field schemas: which markup nodes feed which record fields
//!
//! Containers on the target site are flagged with `aria-class` labels, so
//! every rule is a tag plus attribute-equality selector. The price container
//! holds two positional spans: the amount first, the rental period second.

/// Record field names, shared between schemas, extraction output, and merge
pub mod field {
    pub const PRICE: &str = "price";
    pub const PRICE_PERIOD: &str = "price_period";
    pub const BEDS: &str = "beds";
    pub const BATHROOMS: &str = "bathrooms";
    pub const AREA: &str = "area";
    pub const LOCATION: &str = "location";
    pub const CREATION_DATE: &str = "creation_date";
    pub const FLOOR: &str = "floor";
    pub const AMENITIES: &str = "amenities";
    pub const AD_ID: &str = "ad_id";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
}

/// How a located node is turned into a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Trimmed text content of the node
    Text,

    /// Value of a named attribute on the node
    Attribute(&'static str),

    /// Trimmed text of every matching child, in document order
    ListOfText,
}

/// One declarative extraction rule
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Field name the value lands under
    pub name: &'static str,

    /// Selector locating the container node within the scope
    pub container: &'static str,

    /// Selector locating child nodes within the container; the container
    /// itself is used when absent
    pub child: Option<&'static str>,

    /// Which matching child to take (Text/Attribute modes)
    pub child_index: usize,

    pub mode: ExtractMode,
}

impl FieldRule {
    /// Text of the first matching child
    fn text(name: &'static str, container: &'static str, child: &'static str) -> Self {
        Self {
            name,
            container,
            child: Some(child),
            child_index: 0,
            mode: ExtractMode::Text,
        }
    }

    /// Text of the `index`-th matching child
    fn nth_text(
        name: &'static str,
        container: &'static str,
        child: &'static str,
        index: usize,
    ) -> Self {
        Self {
            child_index: index,
            ..Self::text(name, container, child)
        }
    }

    /// Text list over every matching child
    fn list(name: &'static str, container: &'static str, child: &'static str) -> Self {
        Self {
            name,
            container,
            child: Some(child),
            child_index: 0,
            mode: ExtractMode::ListOfText,
        }
    }
}

/// A named set of extraction rules
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub rules: Vec<FieldRule>,
}

/// Rules applied to each listing item on the summary page
pub fn listing_schema() -> FieldSchema {
    FieldSchema {
        rules: vec![
            FieldRule::nth_text(field::PRICE, r#"div[aria-class="Price"]"#, "span", 0),
            FieldRule::nth_text(field::PRICE_PERIOD, r#"div[aria-class="Price"]"#, "span", 1),
            FieldRule::text(field::BEDS, r#"div[aria-class="Beds"]"#, "span"),
            FieldRule::text(field::BATHROOMS, r#"div[aria-class="Bathrooms"]"#, "span"),
            FieldRule::text(field::AREA, r#"div[aria-class="Area"]"#, "span"),
            FieldRule::text(field::LOCATION, r#"div[aria-class="Location"]"#, "span"),
            FieldRule::text(
                field::CREATION_DATE,
                r#"div[aria-class="Creation Date"]"#,
                "span",
            ),
        ],
    }
}

/// Rules applied to a property's detail page
///
/// Latitude and longitude come from the static-map rule in the geo module,
/// not from a schema entry.
pub fn detail_schema() -> FieldSchema {
    FieldSchema {
        rules: vec![
            FieldRule::text(field::FLOOR, r#"div[aria-class="Floor"]"#, "span"),
            FieldRule::list(field::AMENITIES, r#"div[aria-class="Amenities"]"#, "span"),
            FieldRule::text(field::AD_ID, r#"div[aria-class="Ad ID"]"#, "span"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_schema_fields() {
        let names: Vec<_> = listing_schema().rules.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                field::PRICE,
                field::PRICE_PERIOD,
                field::BEDS,
                field::BATHROOMS,
                field::AREA,
                field::LOCATION,
                field::CREATION_DATE,
            ]
        );
    }

    #[test]
    fn test_price_spans_are_positional() {
        let schema = listing_schema();
        let price = schema.rules.iter().find(|r| r.name == field::PRICE).unwrap();
        let period = schema
            .rules
            .iter()
            .find(|r| r.name == field::PRICE_PERIOD)
            .unwrap();

        assert_eq!(price.container, period.container);
        assert_eq!(price.child_index, 0);
        assert_eq!(period.child_index, 1);
    }

    #[test]
    fn test_detail_schema_amenities_is_list() {
        let schema = detail_schema();
        let amenities = schema
            .rules
            .iter()
            .find(|r| r.name == field::AMENITIES)
            .unwrap();
        assert_eq!(amenities.mode, ExtractMode::ListOfText);
    }
}
