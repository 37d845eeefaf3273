use thiserror::Error;

/// Error type for mgrs-grid operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MgrsError {
    /// Latitude outside the range covered by UTM/MGRS (80°S to 84°N).
    #[error("Invalid latitude: {0} (UTM/MGRS covers -80 to 84 degrees)")]
    InvalidLatitude(f64),
    /// Zone number outside 1-60, or a zone/band pair that does not exist.
    #[error("Invalid zone: {0}")]
    InvalidZone(String),
    /// A coordinate string that does not follow the MGRS or UTM grammar.
    #[error("Malformed coordinate: {0}")]
    MalformedCoordinate(String),
    /// Two candidate 100 km squares were equally close to the band center.
    #[error("Ambiguous 100 km square: {0}")]
    AmbiguousSquare(String),
    /// Invalid grid or labeler configuration.
    #[error("Config error: {0}")]
    Config(String),
    /// File I/O or serialization error.
    #[error("IO error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, MgrsError>;

impl From<std::io::Error> for MgrsError {
    fn from(err: std::io::Error) -> Self {
        MgrsError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MgrsError {
    fn from(err: serde_json::Error) -> Self {
        MgrsError::Config(err.to_string())
    }
}
