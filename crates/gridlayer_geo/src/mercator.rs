//! # Web Mercator World Coordinates
//!
//! Maps WGS84 lon/lat onto the unit square the tile pyramid is cut from:
//! `x` grows east from the antimeridian, `y` grows south from the top edge.
//! One world unit is the full map width at zoom 0.

use std::f64::consts::PI;

use geo::{Coord, Geometry, MapCoords};

/// Latitude at which Web Mercator becomes a square.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Projects one lon/lat coordinate to world units.
#[must_use]
pub fn to_world(coord: Coord<f64>) -> Coord<f64> {
    let x = (coord.x + 180.0) / 360.0;
    let lat = coord.y.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0;
    Coord { x, y }
}

/// Projects a whole geometry to world units.
#[must_use]
pub fn project(geometry: &Geometry<f64>) -> Geometry<f64> {
    geometry.map_coords(to_world)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_origin_is_center() {
        let world = to_world(Coord { x: 0.0, y: 0.0 });
        assert!(close(world.x, 0.5));
        assert!(close(world.y, 0.5));
    }

    #[test]
    fn test_corners() {
        let north_west = to_world(Coord {
            x: -180.0,
            y: MAX_LATITUDE,
        });
        assert!(close(north_west.x, 0.0));
        assert!(close(north_west.y, 0.0));

        let south_east = to_world(Coord { x: 180.0, y: -90.0 });
        assert!(close(south_east.x, 1.0));
        assert!(close(south_east.y, 1.0));
    }
}
