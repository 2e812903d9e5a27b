use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Reason};

/// A validated WGS84 position. Latitude in [-90, 90], longitude in
/// [-180, 180], both finite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DrawnPoint", into = "DrawnPoint")]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeometryError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(Reason::NonFinite.into());
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(Reason::OutOfRange { lat, lon }.into());
        }
        Ok(GeoPoint { lat, lon })
    }

    // Means and stored values of valid points are valid points.
    pub(crate) fn new_unchecked(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Storage axis order.
    pub fn lon_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wgs(lat: {:.5}, lon: {:.5})", self.lat, self.lon)
    }
}

/// The shape the drawing surface hands over: `{ "lat": .., "lng": .. }`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DrawnPoint {
    pub lat: f64,
    pub lng: f64,
}

impl TryFrom<DrawnPoint> for GeoPoint {
    type Error = GeometryError;

    fn try_from(p: DrawnPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(p.lat, p.lng)
    }
}

impl From<GeoPoint> for DrawnPoint {
    fn from(p: GeoPoint) -> Self {
        DrawnPoint {
            lat: p.lat,
            lng: p.lon,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BoundingBox {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

impl BoundingBox {
    pub fn of(points: &[GeoPoint]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points.iter().fold((first, first), |(min, max), curr| {
            (
                GeoPoint::new_unchecked(min.lat.min(curr.lat), min.lon.min(curr.lon)),
                GeoPoint::new_unchecked(max.lat.max(curr.lat), max.lon.max(curr.lon)),
            )
        });
        Some(BoundingBox { min, max })
    }
    pub fn width(&self) -> f64 {
        self.max.lon - self.min.lon
    }
    pub fn height(&self) -> f64 {
        self.max.lat - self.min.lat
    }
    pub fn contains(&self, p: &GeoPoint) -> bool {
        p.lon >= self.min.lon
            && p.lon <= self.max.lon
            && p.lat >= self.min.lat
            && p.lat <= self.max.lat
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wgsbbox(min: {}, max: {})", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_point() {
        let p = GeoPoint::new(18.88, -69.14).unwrap();
        assert_eq!(p.lat(), 18.88);
        assert_eq!(p.lon(), -69.14);
        assert_eq!(p.lon_lat(), [-69.14, 18.88]);
    }

    #[test]
    fn test_edge_cases() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        let err = GeoPoint::new(90.5, 0.0).unwrap_err();
        assert_eq!(err.reason(), &Reason::OutOfRange { lat: 90.5, lon: 0.0 });
        assert!(GeoPoint::new(0.0, -180.1).is_err());
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(
            GeoPoint::new(f64::NAN, 0.0).unwrap_err().reason(),
            &Reason::NonFinite
        );
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_drawn_json() {
        let p: GeoPoint = serde_json::from_str(r#"{"lat": 12.5, "lng": 77.25}"#).unwrap();
        assert_eq!(p, GeoPoint::new(12.5, 77.25).unwrap());
        assert!(serde_json::from_str::<GeoPoint>(r#"{"lat": 120.0, "lng": 0.0}"#).is_err());
        let back = serde_json::to_value(p).unwrap();
        assert_eq!(back, serde_json::json!({"lat": 12.5, "lng": 77.25}));
    }

    #[test]
    fn test_bbox() {
        let points = [
            GeoPoint::new(1.0, 5.0).unwrap(),
            GeoPoint::new(-2.0, 7.0).unwrap(),
            GeoPoint::new(3.0, 6.0).unwrap(),
        ];
        let b = BoundingBox::of(&points).unwrap();
        assert_eq!(b.min, GeoPoint::new(-2.0, 5.0).unwrap());
        assert_eq!(b.max, GeoPoint::new(3.0, 7.0).unwrap());
        assert_eq!(b.width(), 2.0);
        assert_eq!(b.height(), 5.0);
        assert!(points.iter().all(|p| b.contains(p)));
        assert!(BoundingBox::of(&[]).is_none());
    }
}
