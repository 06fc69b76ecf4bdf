use std::{fmt::Display, str::FromStr};

use bag::BoundingBox;
use rd::{LatLon, Transform, TransformError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Buildings,
}

/// Everything the map tells the viewer about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    Click(LatLon),
    MoveEnd(Viewport),
    OverlayAdd(Overlay),
    OverlayRemove(Overlay),
}

/// The part of the map currently on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub south_west: LatLon,
    pub north_east: LatLon,
}

impl Viewport {
    pub fn new(south_west: LatLon, north_east: LatLon) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// The view the map opens with, around Delft.
    pub fn initial() -> Self {
        Self::new(LatLon::new(51.995, 4.335), LatLon::new(52.025, 4.400))
    }

    /// The view as a query box in RD; each side rounded like a drawn box.
    pub fn visible_bounds(&self, transform: &dyn Transform) -> Result<BoundingBox, TransformError> {
        let sw = transform.geo_to_grid(self.south_west)?;
        let ne = transform.geo_to_grid(self.north_east)?;
        Ok(BoundingBox::from_corners(sw, ne))
    }
}

impl Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.south_west.lat, self.south_west.lon, self.north_east.lat, self.north_east.lon
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected \"south,west,north,east\" in degrees, got: {0}")]
pub struct ParseViewportError(pub String);

impl FromStr for Viewport {
    type Err = ParseViewportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseViewportError(s.into()))?;
        match values.as_slice() {
            [south, west, north, east] => Ok(Self::new(
                LatLon::new(south.min(*north), west.min(*east)),
                LatLon::new(south.max(*north), west.max(*east)),
            )),
            _ => Err(ParseViewportError(s.into())),
        }
    }
}
