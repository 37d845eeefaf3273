pub mod grid_zone;
pub mod range;
pub mod zones;

pub use grid_zone::GridZone;
pub use range::GridRange;
pub use zones::{
    all_zones, band_index, band_latitudes, band_letter, classify, grid_range, grid_zone,
    nominal_zone_number, zone_bounds, zone_number,
};
