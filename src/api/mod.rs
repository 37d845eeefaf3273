pub mod config;
pub mod grid;
pub mod mgrs;
pub mod search;
pub mod utm;

pub use config::{GridStyle, GridsConfig, LabelerStyle};
pub use grid::{GridGeometry, GridGeometryBuilder, labels, lines};
pub use mgrs::{Mgrs, decode, encode, is_valid, precision_of, resolve_northing};
pub use search::{Location, locate};
pub use utm::{Utm, to_geo_point, to_utm};
