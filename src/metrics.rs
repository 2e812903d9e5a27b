use serde::Serialize;

use crate::error::{GeometryError, Reason};
use crate::point::GeoPoint;
use crate::ring::{MIN_VERTICES, Ring};

/// Mean earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Derived values of one ring. Recomputed on every create or edit, never
/// patched.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryMetrics {
    pub centroid_lat: f64,
    pub centroid_lon: f64,
    pub area_hectares: f64,
}

impl BoundaryMetrics {
    pub fn compute(ring: &Ring) -> Result<Self, GeometryError> {
        let centroid = compute_centroid(ring)?;
        Ok(BoundaryMetrics {
            centroid_lat: centroid.lat(),
            centroid_lon: centroid.lon(),
            area_hectares: compute_area_hectares(ring),
        })
    }

    pub fn centroid(&self) -> GeoPoint {
        GeoPoint::new_unchecked(self.centroid_lat, self.centroid_lon)
    }
}

/// Vertex centroid: latitudes and longitudes are averaged independently.
/// Not area-weighted and not geodesic; close enough to re-center a map on a
/// field-sized polygon.
pub fn compute_centroid(ring: &Ring) -> Result<GeoPoint, GeometryError> {
    if ring.is_empty() {
        return Err(Reason::Empty.into());
    }
    let n = ring.len() as f64;
    let (sum_lat, sum_lon) = ring
        .points()
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat(), lon + p.lon()));
    Ok(GeoPoint::new_unchecked(sum_lat / n, sum_lon / n))
}

/// Area in hectares using the spherical excess approximation
/// `|Σ (λ2 - λ1)(2 + sin φ1 + sin φ2)| · R² / 2` over every edge, the
/// closing edge included. Rings with fewer than three points have zero
/// area, so half-drawn shapes can be displayed.
///
/// Only valid at field scale: large latitude spans or rings crossing the
/// antimeridian give wrong results. The formula is kept as is because stored
/// and displayed values depend on it.
pub fn compute_area_hectares(ring: &Ring) -> f64 {
    let points = ring.points();
    if points.len() < MIN_VERTICES {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..points.len() {
        let p1 = &points[i];
        let p2 = &points[(i + 1) % points.len()];
        let (lat1, lon1) = (p1.lat().to_radians(), p1.lon().to_radians());
        let (lat2, lon2) = (p2.lat().to_radians(), p2.lon().to_radians());
        sum += (lon2 - lon1) * (2.0 + lat1.sin() + lat2.sin());
    }

    let square_meters = sum.abs() * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0;
    log::trace!("area of {}: {:.1} m²", ring, square_meters);
    square_meters / SQUARE_METERS_PER_HECTARE
}
