pub mod constants;
pub mod ellipsoid;
pub mod geometry;
pub mod grid;
pub mod precision;
pub mod projection;

pub use ellipsoid::{Ellipsoid, WGS84};
pub use geometry::{Label, Line};
pub use grid::{GridWindow, draw_window};
pub use precision::Precision;
pub use projection::{TransverseMercator, central_meridian};
