use std::fmt::{Display, Formatter};

use geo_types::{Coord, Point};

/// A position in RD New, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RdPoint {
    pub x: f64,
    pub y: f64,
}

impl RdPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Display for RdPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({x}, {y})", x = self.x, y = self.y)
    }
}

impl From<RdPoint> for Coord<f64> {
    fn from(value: RdPoint) -> Self {
        Coord {
            x: value.x,
            y: value.y,
        }
    }
}

impl From<Coord<f64>> for RdPoint {
    fn from(value: Coord<f64>) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

/// A WGS84 position in degrees.
///
/// Kept as a named pair so that lat/lon can never be swapped silently: the
/// map hands out `(lat, lon)` while projection libraries want `(lon, lat)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl Display for LatLon {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({lat}, {lon})", lat = self.lat, lon = self.lon)
    }
}

/// `x` is longitude and `y` latitude, like GeoJSON.
impl From<LatLon> for Coord<f64> {
    fn from(value: LatLon) -> Self {
        Coord {
            x: value.lon,
            y: value.lat,
        }
    }
}

impl From<LatLon> for Point<f64> {
    fn from(value: LatLon) -> Self {
        Point::new(value.lon, value.lat)
    }
}

impl From<Coord<f64>> for LatLon {
    fn from(value: Coord<f64>) -> Self {
        Self {
            lat: value.y,
            lon: value.x,
        }
    }
}
