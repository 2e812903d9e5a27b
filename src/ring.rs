use core::fmt;

use crate::error::{GeometryError, Reason};
use crate::point::{BoundingBox, DrawnPoint, GeoPoint};

pub const MIN_VERTICES: usize = 3;

/// Boundary vertices in the order they were drawn. The ring may be open or
/// already closed; operations check their own vertex-count requirements, so
/// in-progress drawings with fewer than three points are representable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ring {
    points: Vec<GeoPoint>,
}

impl Ring {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Ring { points }
    }

    /// Builds a ring from the drawing surface's `{lat, lng}` pairs,
    /// rejecting the whole ring if any point is invalid.
    pub fn from_drawn(drawn: &[DrawnPoint]) -> Result<Self, GeometryError> {
        let points = drawn
            .iter()
            .map(|p| GeoPoint::try_from(*p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Ring { points })
    }

    /// Builds a ring from `[lon, lat, ...]` positions (GeoJSON axis order).
    /// Extra dimensions such as elevation are ignored.
    pub fn from_positions<P: AsRef<[f64]>>(positions: &[P]) -> Result<Self, GeometryError> {
        let points = positions
            .iter()
            .map(|p| match p.as_ref() {
                [lon, lat, ..] => GeoPoint::new(*lat, *lon),
                _ => Err(Reason::NotAPolygon.into()),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Ring { points })
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.points.len() > 1 && self.points.first() == self.points.last()
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::of(&self.points)
    }

    /// Drops consecutive duplicates, the wrap-around pair included, so the
    /// result is open and every vertex differs from its successor.
    pub fn dedup(&self) -> Ring {
        let mut points = self.points.clone();
        points.dedup();
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Ring { points }
    }
}

impl From<Vec<GeoPoint>> for Ring {
    fn from(points: Vec<GeoPoint>) -> Self {
        Ring::new(points)
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ring(len: {}, closed: {})", self.len(), self.is_closed())
    }
}

/// An explicitly closed ring in `[lon, lat]` order, ready for the
/// geospatial store. Always at least four positions, first equal to last.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosedRing {
    coordinates: Vec<[f64; 2]>,
}

impl ClosedRing {
    pub fn coordinates(&self) -> &[[f64; 2]] {
        &self.coordinates
    }

    /// Number of distinct vertices, without the closing repeat.
    pub fn vertex_count(&self) -> usize {
        self.coordinates.len() - 1
    }

    /// Polygon with a single outer ring: `[[[lon, lat], ..., [lon, lat]]]`.
    pub fn to_geojson(&self) -> geojson::Geometry {
        let outer = self.coordinates.iter().map(|c| c.to_vec()).collect();
        geojson::Geometry::new(geojson::Value::Polygon(vec![outer]))
    }
}

impl From<&ClosedRing> for Ring {
    fn from(closed: &ClosedRing) -> Self {
        let points = closed
            .coordinates
            .iter()
            .map(|[lon, lat]| GeoPoint::new_unchecked(*lat, *lon))
            .collect();
        Ring { points }
    }
}

/// Converts a drawn ring into its persisted form: axis order swapped to
/// `[lon, lat]`, consecutive duplicates removed and the first vertex repeated
/// once at the end. Applying it to its own output yields the same ring.
pub fn normalize_for_storage(ring: &Ring) -> Result<ClosedRing, GeometryError> {
    let first = ring.points.first().ok_or(Reason::Empty)?;
    if ring.points.iter().all(|p| p == first) {
        return Err(Reason::Coincident.into());
    }
    let open = ring.dedup();
    if open.len() < MIN_VERTICES {
        return Err(Reason::TooFewVertices {
            required: MIN_VERTICES,
            found: open.len(),
        }
        .into());
    }
    let mut coordinates: Vec<[f64; 2]> = open.points.iter().map(GeoPoint::lon_lat).collect();
    coordinates.push(coordinates[0]);
    log::trace!("normalized {} into {} positions", ring, coordinates.len());
    Ok(ClosedRing { coordinates })
}

/// An edit replaces the whole ring. Nothing is carried over from `existing`;
/// the caller recomputes centroid and area afterwards.
pub fn on_user_edit(existing: Ring, edited: Vec<GeoPoint>) -> Ring {
    log::trace!("replacing {} with {} edited vertices", existing, edited.len());
    drop(existing);
    Ring::new(edited)
}
