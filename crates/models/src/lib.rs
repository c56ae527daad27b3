//! Data model for the city record store.
//! - `collection` is the untyped document the service persists.
//! - `city` is the typed view the renderer reads out of it.

pub mod errors;
pub mod city;
pub mod collection;

pub use city::{CityRecord, Coordinates, LatitudeHemisphere, LongitudeHemisphere};
pub use collection::RecordCollection;
