use geo::algorithm::geodesic_area::GeodesicArea;
use geo::orient::Direction;
use geo::{Coord, Orient, Polygon};

use crate::metrics::SQUARE_METERS_PER_HECTARE;
use crate::ring::Ring;

/// Geodesic area on the WGS84 ellipsoid (geo crate), in hectares. Only used
/// to show how far the field-scale approximation drifts; it never replaces
/// the stored value.
pub fn geodesic_area_hectares(ring: &Ring) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let coords: Vec<Coord<f64>> = ring
        .points()
        .iter()
        .map(|p| Coord {
            x: p.lon(),
            y: p.lat(),
        })
        .collect();

    // exterior ring, no holes; geo closes the ring itself
    let geo_polygon = Polygon::new(coords.into(), vec![]).orient(Direction::Default);

    geo_polygon.geodesic_area_unsigned() / SQUARE_METERS_PER_HECTARE
}
