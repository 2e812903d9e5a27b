use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(Reason),
}

/// Why a ring or point was rejected. Surfaced to the user as a request to
/// redraw; nothing here is transient.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Reason {
    #[error("ring is empty")]
    Empty,
    #[error("need at least {required} distinct vertices, got {found}")]
    TooFewVertices { required: usize, found: usize },
    #[error("all vertices are coincident")]
    Coincident,
    #[error("coordinate out of range (lat: {lat}, lon: {lon})")]
    OutOfRange { lat: f64, lon: f64 },
    #[error("coordinate is not a finite number")]
    NonFinite,
    #[error("geometry is not a polygon")]
    NotAPolygon,
}

impl From<Reason> for GeometryError {
    fn from(reason: Reason) -> Self {
        GeometryError::InvalidGeometry(reason)
    }
}

impl GeometryError {
    pub fn reason(&self) -> &Reason {
        match self {
            GeometryError::InvalidGeometry(r) => r,
        }
    }
}
