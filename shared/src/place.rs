use serde::{Deserialize, Serialize};

/// A place to be shown on the map. Immutable per render cycle; the marker
/// layer is rebuilt from scratch whenever the list changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(alias = "map_x")]
    pub latitude: f64,
    #[serde(alias = "map_y")]
    pub longitude: f64,
}

impl Place {
    pub fn coord(&self) -> Coord {
        Coord {
            lat: self.latitude,
            lng: self.longitude,
        }
    }
}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lng: f64,
}

/// Minimal axis-aligned region covering a set of coordinates, used to fit
/// the viewport after markers are (re)created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl Bounds {
    pub fn from_point(c: Coord) -> Self {
        Self {
            min_lat: c.lat,
            min_lng: c.lng,
            max_lat: c.lat,
            max_lng: c.lng,
        }
    }

    pub fn extend(&mut self, c: Coord) {
        self.min_lat = self.min_lat.min(c.lat);
        self.min_lng = self.min_lng.min(c.lng);
        self.max_lat = self.max_lat.max(c.lat);
        self.max_lng = self.max_lng.max(c.lng);
    }

    pub fn south_west(&self) -> Coord {
        Coord {
            lat: self.min_lat,
            lng: self.min_lng,
        }
    }

    pub fn north_east(&self) -> Coord {
        Coord {
            lat: self.max_lat,
            lng: self.max_lng,
        }
    }
}
