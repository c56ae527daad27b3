//! Fixed payloads sent by the add/delete commands.

use serde_json::json;

use models::RecordCollection;

pub const DEMO_KEY: &str = "city0";

pub fn kyoto() -> RecordCollection {
    let mut records = RecordCollection::new();
    records.insert(
        DEMO_KEY,
        json!({
            "name": "Kyoto",
            "continent": "Asia",
            "coordinates": {
                "longitude": 135.768,
                "latitude": 35.012
            }
        }),
    );
    records
}
