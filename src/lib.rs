//! # mgrs-grid
//!
//! Conversion between longitude/latitude, UTM and MGRS, plus the grid geometry
//! needed to draw MGRS grids over a map. There are three main entry points.
//!
//! ### 1. `encode` / `decode` - MGRS References
//!
//! ```
//! use mgrs_grid::{GeoPoint, Precision, decode, encode};
//!
//! # fn main() -> Result<(), mgrs_grid::MgrsError> {
//! let white_house = GeoPoint::new(-77.0365, 38.8977)?;
//! let mgrs = encode(&white_house, Precision::Meter)?;
//! assert_eq!(mgrs.to_string(), "18SUJ2339407395");
//! assert_eq!(mgrs.coordinate(Precision::Kilometer), "18SUJ2307");
//!
//! let center = decode("18SUJ2339407395")?;
//! assert!((center.lat() - 38.8977).abs() < 1e-4);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `Utm` - Transverse Mercator Coordinates
//!
//! ```
//! use mgrs_grid::{GeoPoint, Utm, to_utm};
//!
//! # fn main() -> Result<(), mgrs_grid::MgrsError> {
//! let utm = to_utm(&GeoPoint::new(-77.0365, 38.8977)?, None)?;
//! assert_eq!(utm.zone(), 18);
//!
//! let parsed: Utm = "18 N 323394.3 4307395.6".parse()?;
//! assert!((parsed.to_point().lon() - -77.0365).abs() < 1e-5);
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `GridGeometry` - Grid Lines and Labels
//!
//! Grid zones overlapping a box are found with [`grid_range`]; lines and labels are
//! generated per zone in parallel.
//!
//! ```
//! use mgrs_grid::{GridGeometry, Precision, Projection};
//!
//! # fn main() -> Result<(), mgrs_grid::MgrsError> {
//! let grid = GridGeometry::builder()
//!     .precision(Precision::HundredKm)
//!     .extent(4.0, 58.0, 14.0, 62.0)
//!     .build()?;
//!
//! let zones: Vec<String> = grid.zones().iter().map(|z| z.name()).collect();
//! assert_eq!(zones, vec!["32V", "33V"]);
//!
//! // Web Mercator meters for drawing.
//! let drawn = grid.lines_in(Projection::WebMercator)?;
//! assert_eq!(drawn.len(), grid.lines().len());
//! # Ok(())
//! # }
//! ```
//!
//! Which grid to draw at a map zoom level is configured with [`GridsConfig`].

pub mod api;
pub mod core;
pub mod gzd;
pub mod io;
pub mod util;

pub use api::{
    GridGeometry, GridGeometryBuilder, GridStyle, GridsConfig, LabelerStyle, Location, Mgrs,
    Utm, decode, encode, is_valid, labels, lines, locate, precision_of, resolve_northing,
    to_geo_point, to_utm,
};
pub use core::{Ellipsoid, Label, Line, Precision, TransverseMercator, WGS84};
pub use gzd::{
    GridRange, GridZone, all_zones, band_letter, classify, grid_range, grid_zone, zone_bounds,
    zone_number,
};
pub use util::{Bounds, Coordinate, GeoPoint, Hemisphere, MgrsError, ProjectedPoint, Projection};

pub use geo_types;

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use geo_types::point;

    #[test]
    fn test_end_to_end_workflow() -> Result<(), MgrsError> {
        let point = GeoPoint::new(-77.0365, 38.8977)?;

        let zone = classify(&point)?;
        assert_eq!(zone.name(), "18S");

        let utm = to_utm(&point, None)?;
        let mgrs = encode(&point, Precision::Meter)?;
        assert_eq!(mgrs.zone(), utm.zone());
        assert_eq!(mgrs.grid_zone(), zone);

        let decoded = decode(&mgrs.to_string())?;
        let back = to_utm(&decoded, Some(utm.zone()))?;
        assert!((back.easting() - utm.easting()).abs() <= 1.0);
        assert!((back.northing() - utm.northing()).abs() <= 1.0);

        let geometry = GridGeometry::new(
            &Bounds::degrees(-77.1, 38.85, -77.0, 38.95),
            Precision::Kilometer,
        )?;
        let square = mgrs.coordinate(Precision::Kilometer)[3..].to_string();
        assert_eq!(square, "UJ2307");
        assert!(geometry.labels().iter().any(|label| label.name == square));
        Ok(())
    }

    #[test]
    fn test_geo_types_points() -> Result<(), MgrsError> {
        let pt = point! { x: 5.0, y: 61.0 };
        let zone = classify(&GeoPoint::from_coord(&pt)?)?;
        assert_eq!(zone.name(), "32V");

        let mgrs = encode(&GeoPoint::from_coord(&(21.0, 78.0))?, Precision::HundredKm)?;
        assert_eq!(mgrs.zone(), 33);
        assert_eq!(mgrs.band(), 'X');
        Ok(())
    }

    #[test]
    fn test_documented_vectors() -> Result<(), MgrsError> {
        let white_house = GeoPoint::new(-77.0365, 38.8977)?;
        assert_eq!(
            encode(&white_house, Precision::Meter)?.to_string(),
            "18SUJ2339407395"
        );

        let reference = decode("18SUJ2338306479")?;
        let utm = to_utm(&reference, None)?;
        assert_float_eq!(utm.easting(), 323_383.5, abs <= 1.0);
        assert_float_eq!(utm.northing(), 4_306_479.5, abs <= 1.0);
        assert_eq!(encode(&reference, Precision::Meter)?.to_string(), "18SUJ2338306479");

        for bad in ["99Z", "31ABC", "4QFJ123"] {
            assert!(matches!(decode(bad), Err(MgrsError::MalformedCoordinate(_))));
        }
        Ok(())
    }

    #[test]
    fn test_irregular_zones() -> Result<(), MgrsError> {
        assert_eq!(zone_number(5.0, 61.0)?, 32);
        assert_eq!(zone_number(21.0, 78.0)?, 33);
        assert_eq!(zone_number(20.0, 78.0)?, 33);
        assert!(grid_zone(34, 'X').is_err());
        assert_eq!(zone_bounds(32, 'V')?.width(), 9.0);
        Ok(())
    }

    #[test]
    fn test_grid_lines_on_hundred_km_multiples() -> Result<(), MgrsError> {
        let query = Bounds::degrees(-80.0, 36.0, -70.0, 42.0);
        for zone in grid_range(&query)?.iter() {
            let region = zone.bounds().intersection(&query);
            for line in lines(zone, &query, Precision::HundredKm)? {
                let vertical = line.start.x == line.end.x;
                let coordinate = if vertical { line.start.x } else { line.start.y };
                assert_eq!(coordinate % 100_000.0, 0.0);

                for end in [line.start, line.end] {
                    let geo = end.to_geo()?;
                    assert!(region.is_some_and(|r| r.expand(1e-6).contains(&geo)));
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_search_then_zoom() -> Result<(), MgrsError> {
        let config = GridsConfig::new();
        let found = locate("18SUJ23")?;
        let precision = found.precision.unwrap_or(Precision::Gzd);
        assert_eq!(precision, Precision::TenKm);
        assert_eq!(config.coordinate_zoom(precision, 2), Some(5));
        assert_eq!(config.coordinate(&decode("18SUJ23")?, 5)?, "18SUJ23");
        Ok(())
    }
}
