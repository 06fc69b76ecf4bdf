use proj::Proj;

use crate::{LatLon, RdPoint, Transform, TransformError, RD_NEW_PROJ4};

const WGS84: &str = "EPSG:4326";

/// PROJ backed transform using the exact RD New definition.
///
/// Errors are whatever PROJ reports; there is no envelope of its own.
pub struct ProjTransform {
    to_geo: Proj,
    to_grid: Proj,
}

impl ProjTransform {
    pub fn new() -> Result<Self, TransformError> {
        let rd_new = format!("{RD_NEW_PROJ4} +type=crs");
        let make = |from: &str, to: &str| {
            Proj::new_known_crs(from, to, None).map_err(|e| TransformError::Create(e.to_string()))
        };
        Ok(Self {
            to_geo: make(&rd_new, WGS84)?,
            to_grid: make(WGS84, &rd_new)?,
        })
    }
}

// new_known_crs normalises axis order, so both sides speak (x, y) = (lon, lat)
impl Transform for ProjTransform {
    fn grid_to_geo(&self, point: RdPoint) -> Result<LatLon, TransformError> {
        let (lon, lat) = self
            .to_geo
            .convert((point.x, point.y))
            .map_err(|e| TransformError::Proj(e.to_string()))?;
        Ok(LatLon { lat, lon })
    }

    fn geo_to_grid(&self, point: LatLon) -> Result<RdPoint, TransformError> {
        let (x, y) = self
            .to_grid
            .convert((point.lon, point.lat))
            .map_err(|e| TransformError::Proj(e.to_string()))?;
        Ok(RdPoint { x, y })
    }
}
