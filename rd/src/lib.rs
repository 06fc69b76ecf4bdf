//! Conversion between the Dutch national grid (Rijksdriehoeksstelsel, EPSG:28992)
//! and geographic WGS84 coordinates (EPSG:4326).

pub mod error;
pub mod point;
pub mod proj_backend;
pub mod reproject;

pub use error::TransformError;
pub use point::{LatLon, RdPoint};
pub use proj_backend::ProjTransform;
pub use reproject::reproject_geometry;

/// Definition of RD New as used by the background map and the BAG API.
pub const RD_NEW_PROJ4: &str = "+proj=sterea +lat_0=52.15616055555555 +lon_0=5.38763888888889 +k=0.9999079 +x_0=155000 +y_0=463000 +ellps=bessel +units=m +towgs84=565.2369,50.0087,465.658,-0.406857330322398,0.350732676542563,-1.8703473836068,4.0812 +no_defs";

/// A pair of conversions between grid and geographic coordinates.
pub trait Transform {
    fn grid_to_geo(&self, point: RdPoint) -> Result<LatLon, TransformError>;
    fn geo_to_grid(&self, point: LatLon) -> Result<RdPoint, TransformError>;
}

impl<T: Transform + ?Sized> Transform for &T {
    fn grid_to_geo(&self, point: RdPoint) -> Result<LatLon, TransformError> {
        (**self).grid_to_geo(point)
    }

    fn geo_to_grid(&self, point: LatLon) -> Result<RdPoint, TransformError> {
        (**self).geo_to_grid(point)
    }
}

/// The transform every caller gets unless it asks for something else: PROJ
/// with [`RD_NEW_PROJ4`].
pub fn default_transform() -> Result<Box<dyn Transform>, TransformError> {
    Ok(Box::new(ProjTransform::new()?))
}
