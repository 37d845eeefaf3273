pub mod bounds;
pub mod coord;
pub mod error;
pub mod identifier;

pub use bounds::Bounds;
pub use coord::{
    Coordinate, GeoPoint, Hemisphere, ProjectedPoint, Projection, degrees_to_meters,
    meters_to_degrees,
};
pub use error::{MgrsError, Result};
pub use identifier::{MgrsParts, format_identifier, parse_identifier};
