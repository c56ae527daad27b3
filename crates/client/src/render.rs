//! Text renderers for a fetched document.

use serde_json::Value;
use tracing::warn;

use models::{CityRecord, RecordCollection};

/// The document as compact JSON text.
pub fn raw(document: &Value) -> String {
    document.to_string()
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// One HTML sentence placing a city by hemisphere.
pub fn describe(city: &CityRecord) -> String {
    let c = &city.coordinates;
    format!(
        "<b>{}</b> lies in {} at a latitude of {}° ({}) and a longitude of {}° ({}).",
        escape_html(&city.name),
        escape_html(&city.continent),
        c.latitude,
        c.latitude_hemisphere(),
        c.longitude,
        c.longitude_hemisphere(),
    )
}

/// Formatted HTML view: a count header followed by one sentence per city.
/// Entries that are not city records are skipped with a warning.
pub fn formatted(collection: &RecordCollection) -> String {
    let cities: Vec<CityRecord> = collection
        .cities()
        .filter_map(|(key, rec)| match rec {
            Ok(city) => Some(city),
            Err(e) => {
                warn!(%key, error = %e, "skipping entry in formatted view");
                None
            }
        })
        .collect();
    let noun = if cities.len() == 1 { "city" } else { "cities" };
    let sentences: Vec<String> = cities.iter().map(describe).collect();
    format!("There is data of {} {}: {}", cities.len(), noun, sentences.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection(v: Value) -> RecordCollection {
        RecordCollection::from_value(v).expect("object")
    }

    #[test]
    fn kyoto_renders_north_and_east() {
        let out = formatted(&crate::demo::kyoto());
        assert!(out.starts_with("There is data of 1 city: "));
        assert!(out.contains("<b>Kyoto</b> lies in Asia"));
        assert!(out.contains("latitude of 35.012° (north)"));
        assert!(out.contains("longitude of 135.768° (east)"));
    }

    #[test]
    fn southern_western_city_and_plural_header() {
        let out = formatted(&collection(json!({
            "a": {"name": "Kyoto", "continent": "Asia",
                  "coordinates": {"longitude": 135.768, "latitude": 35.012}},
            "b": {"name": "Lima", "continent": "South America",
                  "coordinates": {"longitude": -77.03, "latitude": -12.05}}
        })));
        assert!(out.starts_with("There is data of 2 cities: "));
        assert!(out.contains("latitude of -12.05° (south) and a longitude of -77.03° (west)."));
    }

    #[test]
    fn empty_and_malformed_entries() {
        assert_eq!(formatted(&RecordCollection::new()), "There is data of 0 cities: ");
        let out = formatted(&collection(json!({"x": {"name": "nowhere"}})));
        assert_eq!(out, "There is data of 0 cities: ");
    }

    #[test]
    fn entries_with_non_numeric_coordinates_are_skipped() {
        let out = formatted(&collection(json!({
            "a": {"name": "Kyoto", "continent": "Asia",
                  "coordinates": {"longitude": 135.768, "latitude": 35.012}},
            "b": {"name": "Nowhere", "continent": "None",
                  "coordinates": {"longitude": "east", "latitude": 1.0}},
            "c": {"name": 7, "continent": "Asia",
                  "coordinates": {"longitude": 1.0, "latitude": 1.0}},
            "d": {"name": "Grid", "continent": "Asia",
                  "coordinates": {"longitude": 10, "latitude": -5}}
        })));
        assert!(out.starts_with("There is data of 2 cities: "));
        assert!(!out.contains("Nowhere"));
        assert!(out.contains("latitude of -5° (south) and a longitude of 10° (east)."));
    }

    #[test]
    fn names_are_escaped() {
        let out = formatted(&collection(json!({
            "c": {"name": "<i>Q</i>", "continent": "A&B",
                  "coordinates": {"longitude": 1.0, "latitude": 1.0}}
        })));
        assert!(out.contains("<b>&lt;i&gt;Q&lt;/i&gt;</b> lies in A&amp;B"));
    }

    #[test]
    fn raw_is_compact_json() {
        assert_eq!(raw(&json!({"k": [1, 2]})), r#"{"k":[1,2]}"#);
    }
}
