use serde::Serialize;

use crate::error::{GeometryError, Reason};
use crate::metrics::BoundaryMetrics;
use crate::point::GeoPoint;
use crate::ring::{ClosedRing, Ring, normalize_for_storage, on_user_edit};

/// A property boundary: the ring it owns plus the metrics derived from it.
/// The ring is only ever replaced as a whole.
#[derive(Clone, Debug)]
pub struct Boundary {
    ring: Ring,
    closed: ClosedRing,
    metrics: BoundaryMetrics,
}

impl Boundary {
    /// Validates `ring` and derives its metrics. Repeated vertices and a
    /// closing repeat are dropped first, so they do not weigh on the centroid
    /// and the boundary reads back from storage unchanged.
    pub fn new(ring: Ring) -> Result<Self, GeometryError> {
        let closed = normalize_for_storage(&ring)?;
        let ring = ring.dedup();
        let metrics = BoundaryMetrics::compute(&ring)?;
        log::debug!(
            "boundary: {}, centroid: {}, area: {:.4} ha",
            ring,
            metrics.centroid(),
            metrics.area_hectares
        );
        Ok(Boundary {
            ring,
            closed,
            metrics,
        })
    }

    /// Reads a stored polygon back. Only the outer ring is used and the
    /// closing repeat is dropped, so the centroid matches the drawn ring.
    pub fn from_storage(geometry: &geojson::Geometry) -> Result<Self, GeometryError> {
        match &geometry.value {
            geojson::Value::Polygon(rings) => {
                let outer = rings.first().ok_or(Reason::Empty)?;
                Boundary::new(Ring::from_positions(outer.as_slice())?.dedup())
            }
            _ => Err(Reason::NotAPolygon.into()),
        }
    }

    /// Replaces the ring with `vertices` and recomputes the metrics. If the
    /// new ring is rejected the boundary keeps its previous state.
    pub fn edit(&mut self, vertices: Vec<GeoPoint>) -> Result<(), GeometryError> {
        let candidate = on_user_edit(std::mem::take(&mut self.ring), vertices);
        let replacement = match Boundary::new(candidate) {
            Ok(b) => b,
            Err(e) => {
                // the stored form is the deduplicated ring plus its closing repeat
                self.ring = Ring::from(&self.closed).dedup();
                return Err(e);
            }
        };
        log::info!(
            "boundary edited: area {:.4} ha -> {:.4} ha",
            self.metrics.area_hectares,
            replacement.metrics.area_hectares
        );
        *self = replacement;
        Ok(())
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn closed_ring(&self) -> &ClosedRing {
        &self.closed
    }

    pub fn metrics(&self) -> &BoundaryMetrics {
        &self.metrics
    }

    pub fn storage_document(&self) -> StoredBoundary {
        StoredBoundary {
            location: self.closed.to_geojson(),
            center_coordinates: CenterCoordinates {
                latitude: self.metrics.centroid_lat,
                longitude: self.metrics.centroid_lon,
            },
            area: Area {
                value: self.metrics.area_hectares,
                unit: AreaUnit::Hectares,
            },
        }
    }
}

/// Boundary fields of a property record as the document store expects them.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBoundary {
    pub location: geojson::Geometry,
    pub center_coordinates: CenterCoordinates,
    pub area: Area,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CenterCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Area {
    pub value: f64,
    pub unit: AreaUnit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    Hectares,
}
