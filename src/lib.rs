pub mod boundary;
pub mod display;
pub mod error;
pub mod metrics;
pub mod point;
pub mod read_polygon;
pub mod reference;
pub mod ring;
pub mod svg;

pub use boundary::Boundary;
pub use error::{GeometryError, Reason};
pub use metrics::{BoundaryMetrics, compute_area_hectares, compute_centroid};
pub use point::GeoPoint;
pub use ring::{ClosedRing, Ring, normalize_for_storage, on_user_edit};
