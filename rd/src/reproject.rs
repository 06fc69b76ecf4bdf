use geo::MapCoords;
use geo_types::{Coord, Geometry};

use crate::{RdPoint, Transform, TransformError};

/// Reprojects an RD geometry to WGS84 (`x` = lon, `y` = lat) for display.
pub fn reproject_geometry(
    transform: &dyn Transform,
    geometry: &Geometry<f64>,
) -> Result<Geometry<f64>, TransformError> {
    geometry.try_map_coords(|c: Coord<f64>| {
        transform
            .grid_to_geo(RdPoint::from(c))
            .map(Coord::<f64>::from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LatLon, ProjTransform};
    use geo_types::{line_string, polygon, Polygon};

    /// Swaps axes up to x = 1000 km and fails beyond.
    struct Picky;

    impl Transform for Picky {
        fn grid_to_geo(&self, point: RdPoint) -> Result<LatLon, TransformError> {
            if point.x > 1_000_000.0 {
                return Err(TransformError::Proj("latitude or longitude exceeded limits".into()));
            }
            Ok(LatLon::new(point.y, point.x))
        }

        fn geo_to_grid(&self, point: LatLon) -> Result<RdPoint, TransformError> {
            Ok(RdPoint::new(point.lon, point.lat))
        }
    }

    #[test]
    fn polygon_ends_up_in_degrees() {
        let footprint: Polygon<f64> = polygon![
            (x: 84_900.0, y: 447_300.0),
            (x: 84_920.0, y: 447_300.0),
            (x: 84_920.0, y: 447_320.0),
            (x: 84_900.0, y: 447_320.0),
        ];
        let rd = ProjTransform::new().unwrap();
        let out = reproject_geometry(&rd, &Geometry::Polygon(footprint)).unwrap();
        let Geometry::Polygon(poly) = out else {
            panic!("expected a polygon, got {out:?}");
        };
        assert_eq!(poly.exterior().0.len(), 5);
        for c in poly.exterior().coords() {
            assert!((4.3..4.4).contains(&c.x), "lon {}", c.x);
            assert!((51.9..52.1).contains(&c.y), "lat {}", c.y);
        }
    }

    #[test]
    fn first_bad_coordinate_fails_the_whole_geometry() {
        let line = Geometry::LineString(geo_types::line_string![
            (x: 84_900.0, y: 447_300.0),
            (x: 9_000_000.0, y: 447_300.0),
        ]);
        assert_eq!(
            reproject_geometry(&Picky, &line),
            Err(TransformError::Proj("latitude or longitude exceeded limits".into()))
        );
    }
}
