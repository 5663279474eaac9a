//! Geo-coordinate extraction from an embedded static-map image
//!
//! Detail pages embed a static-map image inside a labeled map dialog. The
//! map provider encodes the coordinates in the image URL as
//! `.../static/<lat>,<lng>,<zoom>/...`; this is the one rule that reads
//! structured data out of a URL instead of markup text. Coordinates are kept
//! as the captured text so sign and decimal precision survive untouched.

use scraper::{ElementRef, Selector};

const MAP_CONTAINER: &str = r#"div[aria-label="Map"]"#;
const STATIC_SEGMENT: &str = "/static/";

/// Reads `(latitude, longitude)` from the static-map image under the scope
///
/// Returns `None` if the map container, the image, its `src`, or the
/// coordinate pattern is missing at any step.
pub fn extract_geo(scope: ElementRef<'_>) -> Option<(String, String)> {
    let container_sel = Selector::parse(MAP_CONTAINER).ok()?;
    let container = scope.select(&container_sel).next()?;

    let image_sel = Selector::parse("img").ok()?;
    let image = container.select(&image_sel).next()?;

    let src = image.value().attr("src")?;
    parse_static_map_coords(src)
}

/// Matches `.../static/<lat>,<lng>,` against a static-map source URL
///
/// Both captures must look numeric; the trailing comma after the longitude
/// is required, so a URL with only two segments after `static/` does not
/// match.
pub fn parse_static_map_coords(src: &str) -> Option<(String, String)> {
    let start = src.find(STATIC_SEGMENT)? + STATIC_SEGMENT.len();
    let mut segments = src[start..].split(',');

    let latitude = segments.next()?;
    let longitude = segments.next()?;
    segments.next()?;

    if !is_coordinate(latitude) || !is_coordinate(longitude) {
        return None;
    }

    Some((latitude.to_string(), longitude.to_string()))
}

fn is_coordinate(text: &str) -> bool {
    !text.is_empty() && text.parse::<f64>().is_ok()
}
