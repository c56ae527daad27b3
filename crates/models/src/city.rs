use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

/// One entry of the record collection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CityRecord {
    pub name: String,
    pub continent: String,
    pub coordinates: Coordinates,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LatitudeHemisphere {
    North,
    South,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LongitudeHemisphere {
    East,
    West,
}

impl LatitudeHemisphere {
    /// Positive latitudes are north; zero and below count as south.
    pub fn of(latitude: f64) -> Self {
        if latitude > 0.0 { Self::North } else { Self::South }
    }
}

impl LongitudeHemisphere {
    /// East is `(0, 180]`; everything else, including out-of-range values, is west.
    pub fn of(longitude: f64) -> Self {
        if longitude > 0.0 && longitude <= 180.0 { Self::East } else { Self::West }
    }
}

impl fmt::Display for LatitudeHemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::North => "north",
            Self::South => "south",
        })
    }
}

impl fmt::Display for LongitudeHemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::East => "east",
            Self::West => "west",
        })
    }
}

impl Coordinates {
    pub fn latitude_hemisphere(&self) -> LatitudeHemisphere {
        LatitudeHemisphere::of(self.latitude)
    }

    pub fn longitude_hemisphere(&self) -> LongitudeHemisphere {
        LongitudeHemisphere::of(self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kyoto_is_north_east() {
        let c = Coordinates { longitude: 135.768, latitude: 35.012 };
        assert_eq!(c.latitude_hemisphere(), LatitudeHemisphere::North);
        assert_eq!(c.longitude_hemisphere(), LongitudeHemisphere::East);
    }

    #[test]
    fn hemisphere_boundaries() {
        assert_eq!(LatitudeHemisphere::of(0.0), LatitudeHemisphere::South);
        assert_eq!(LatitudeHemisphere::of(-33.9), LatitudeHemisphere::South);
        assert_eq!(LongitudeHemisphere::of(0.0), LongitudeHemisphere::West);
        assert_eq!(LongitudeHemisphere::of(180.0), LongitudeHemisphere::East);
        assert_eq!(LongitudeHemisphere::of(180.5), LongitudeHemisphere::West);
        assert_eq!(LongitudeHemisphere::of(-74.0), LongitudeHemisphere::West);
        assert_eq!(LongitudeHemisphere::West.to_string(), "west");
    }

    #[test]
    fn city_record_json_shape() {
        let rec: CityRecord = serde_json::from_str(
            r#"{"name":"Kyoto","continent":"Asia","coordinates":{"longitude":135.768,"latitude":35.012}}"#,
        )
        .expect("decode");
        assert_eq!(rec.name, "Kyoto");
        assert_eq!(rec.coordinates.latitude, 35.012);
    }
}
