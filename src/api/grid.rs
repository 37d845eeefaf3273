use crate::core::constants::SQUARE_SIZE;
use crate::core::geometry::{Label, Line, clip_segment};
use crate::core::grid::{ZoneProjection, clip_samples, draw_window, region_size};
use crate::core::precision::Precision;
use crate::gzd::grid_zone::GridZone;
use crate::gzd::range::GridRange;
use crate::gzd::zones::grid_range;
use crate::util::bounds::Bounds;
use crate::util::coord::{GeoPoint, ProjectedPoint, Projection};
use crate::util::error::MgrsError;
use crate::util::identifier::{column_letter, row_letter};
use geo::Centroid;
use log::debug;
use rayon::prelude::*;

/// Grid lines of `zone` at `precision` inside `bounds`.
///
/// GZD lines are the zone rectangle's edges in degrees, clipped to `bounds`. Finer
/// grids are node-to-node UTM segments on exact multiples of the cell size, each
/// clipped to `bounds ∩ zone.bounds()`.
pub fn lines(
    zone: &GridZone,
    bounds: &Bounds,
    precision: Precision,
) -> Result<Vec<Line>, MgrsError> {
    let query = bounds.to_degrees()?;
    let Some(cell) = precision.meters() else {
        return Ok(zone_edges(zone, &query));
    };
    let Some(region) = zone.bounds().intersection(&query) else {
        return Ok(Vec::new());
    };
    if region.is_empty() {
        return Ok(Vec::new());
    }

    let window = draw_window(zone, &region, cell);
    let projection = ZoneProjection::new(zone);
    let utm = zone.projection();
    let size = region_size(&region);
    let inside = |e: f64, n: f64| projection.inside(&region, e, n);

    let mut lines = Vec::new();
    let mut push = |a: (f64, f64), b: (f64, f64)| {
        let Some((a, b)) = window.cut(a, b) else {
            return;
        };
        let samples = clip_samples((b.0 - a.0).hypot(b.1 - a.1), size);
        for (start, end) in clip_segment(a, b, samples, inside) {
            lines.push(Line::new(
                ProjectedPoint::new(start.0, start.1, utm),
                ProjectedPoint::new(end.0, end.1, utm),
                precision,
            ));
        }
    };

    for column in window.min_easting..=window.max_easting {
        let easting = window.easting(column);
        for row in window.min_northing..window.max_northing {
            push(
                (easting, window.northing(row)),
                (easting, window.northing(row + 1)),
            );
        }
    }
    for row in window.min_northing..=window.max_northing {
        let northing = window.northing(row);
        for column in window.min_easting..window.max_easting {
            push(
                (window.easting(column), northing),
                (window.easting(column + 1), northing),
            );
        }
    }

    Ok(lines)
}

fn zone_edges(zone: &GridZone, query: &Bounds) -> Vec<Line> {
    zone.bounds()
        .edges()
        .iter()
        .filter_map(|(a, b)| {
            let edge = Bounds::degrees(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y));
            query.intersection(&edge)
        })
        .filter(|clipped| clipped.width() > 0.0 || clipped.height() > 0.0)
        .map(|clipped| {
            Line::new(
                ProjectedPoint::new(clipped.west(), clipped.south(), Projection::Geographic),
                ProjectedPoint::new(clipped.east(), clipped.north(), Projection::Geographic),
                Precision::Gzd,
            )
        })
        .collect()
}

/// One label per grid cell of `zone` overlapping `bounds`.
///
/// A GZD label names the zone and spans its rectangle. Finer labels are named by the
/// 100 km square letters plus the cell's truncated digits (`UJ`, `UJ20`, ...) and
/// carry the geodetic box inscribed in the cell. A label's center may fall outside
/// `bounds` when the cell is only partly inside.
pub fn labels(
    zone: &GridZone,
    bounds: &Bounds,
    precision: Precision,
) -> Result<Vec<Label>, MgrsError> {
    let query = bounds.to_degrees()?;
    let zone_bounds = zone.bounds();
    if !zone_bounds.overlaps(&query) {
        return Ok(Vec::new());
    }
    let Some(cell) = precision.meters() else {
        return Ok(vec![label(zone, zone.name(), Precision::Gzd, zone_bounds)]);
    };
    let Some(region) = zone_bounds.intersection(&query) else {
        return Ok(Vec::new());
    };

    let window = draw_window(zone, &region, cell);
    let projection = ZoneProjection::new(zone);
    let digits = precision.digits().unwrap_or_default();
    let mut labels = Vec::new();

    for column in window.min_easting..window.max_easting {
        let west = window.easting(column);
        let east = window.easting(column + 1);
        let Ok(column_id) = column_letter(zone.number(), west) else {
            continue;
        };
        for row in window.min_northing..window.max_northing {
            let south = window.northing(row);
            let north = window.northing(row + 1);

            let Some(footprint) = cell_footprint(&projection, west, south, east, north)
                .and_then(|b| b.intersection(&zone_bounds))
                .filter(|b| !b.is_empty() && b.overlaps(&query))
            else {
                continue;
            };

            let mut name = format!("{}{}", column_id, row_letter(zone.number(), south));
            if digits > 0 {
                let offset = |value: f64| (value.rem_euclid(SQUARE_SIZE) / cell).round() as u32;
                name.push_str(&format!(
                    "{:0width$}{:0width$}",
                    offset(west),
                    offset(south),
                    width = digits
                ));
            }
            labels.push(label(zone, name, precision, footprint));
        }
    }

    Ok(labels)
}

fn label(zone: &GridZone, name: String, precision: Precision, bounds: Bounds) -> Label {
    let center = bounds.to_rect().centroid();
    Label {
        name,
        zone: zone.number(),
        band: zone.band(),
        precision,
        bounds,
        center: GeoPoint::wrapped(center.x(), center.y()),
    }
}

/// Geodetic box inscribed in the cell's four inverse-projected corners.
fn cell_footprint(
    projection: &ZoneProjection,
    west: f64,
    south: f64,
    east: f64,
    north: f64,
) -> Option<Bounds> {
    let sw = projection.inverse(west, south);
    let se = projection.inverse(east, south);
    let ne = projection.inverse(east, north);
    let nw = projection.inverse(west, north);

    let lon_min = sw.0.max(nw.0);
    let lon_max = se.0.min(ne.0);
    let lat_min = sw.1.max(se.1);
    let lat_max = nw.1.min(ne.1);
    if lon_min >= lon_max || lat_min >= lat_max {
        return None;
    }
    Some(Bounds::degrees(lon_min, lat_min, lon_max, lat_max))
}

/// Lines and labels of every grid zone overlapping a query box at one precision.
#[derive(Debug, Clone)]
pub struct GridGeometry {
    bounds: Bounds,
    precision: Precision,
    zones: GridRange,
    lines: Vec<Line>,
    labels: Vec<Label>,
}

impl GridGeometry {
    pub fn builder() -> GridGeometryBuilder {
        GridGeometryBuilder::new()
    }

    /// Lines and labels for `bounds` at `precision`.
    ///
    /// # Example
    /// ```
    /// use mgrs_grid::{Bounds, GridGeometry, Precision};
    ///
    /// # fn main() -> Result<(), mgrs_grid::MgrsError> {
    /// let bounds = Bounds::degrees(-78.0, 38.0, -76.0, 40.0);
    /// let grid = GridGeometry::new(&bounds, Precision::HundredKm)?;
    /// assert!(!grid.lines().is_empty());
    /// assert!(grid.labels().iter().any(|label| label.name == "UJ"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(bounds: &Bounds, precision: Precision) -> Result<Self, MgrsError> {
        Self::generate(bounds, precision, true)
    }

    fn generate(
        bounds: &Bounds,
        precision: Precision,
        with_labels: bool,
    ) -> Result<Self, MgrsError> {
        let zones = grid_range(bounds)?;

        let per_zone = zones
            .zones()
            .par_iter()
            .map(|zone| {
                let zone_lines = lines(zone, bounds, precision)?;
                let zone_labels = if with_labels {
                    labels(zone, bounds, precision)?
                } else {
                    Vec::new()
                };
                Ok((zone_lines, zone_labels))
            })
            .collect::<Result<Vec<_>, MgrsError>>()?;

        let (lines, labels): (Vec<Vec<Line>>, Vec<Vec<Label>>) = per_zone.into_iter().unzip();
        let lines: Vec<Line> = lines.into_iter().flatten().collect();
        let labels: Vec<Label> = labels.into_iter().flatten().collect();

        debug!(
            "Generated {} grid over {} zones: {} lines, {} labels",
            precision,
            zones.len(),
            lines.len(),
            labels.len()
        );

        Ok(Self {
            bounds: *bounds,
            precision,
            zones,
            lines,
            labels,
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn zones(&self) -> &GridRange {
        &self.zones
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.labels.is_empty()
    }

    /// All lines re-expressed in one projection, e.g. Web Mercator for drawing.
    pub fn lines_in(&self, projection: Projection) -> Result<Vec<Line>, MgrsError> {
        self.lines
            .par_iter()
            .map(|line| line.to_projection(projection))
            .collect()
    }

    pub fn filter_labels<F>(&self, predicate: F) -> Vec<&Label>
    where
        F: Fn(&Label) -> bool,
    {
        self.labels.iter().filter(|label| predicate(label)).collect()
    }
}

#[derive(Debug, Default)]
pub struct GridGeometryBuilder {
    precision: Option<Precision>,
    bounds: Option<Bounds>,
    labels: Option<bool>,
}

impl GridGeometryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn bounds(mut self, bounds: &Bounds) -> Self {
        self.bounds = Some(*bounds);
        self
    }

    /// Query box in degrees; `west > east` wraps across the antimeridian.
    pub fn extent(mut self, west: f64, south: f64, east: f64, north: f64) -> Self {
        self.bounds = Some(Bounds::degrees(west, south, east, north));
        self
    }

    /// Whether to generate labels (default true).
    pub fn labels(mut self, labels: bool) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn build(self) -> Result<GridGeometry, MgrsError> {
        let precision = self
            .precision
            .ok_or_else(|| MgrsError::Config("precision must be set".to_string()))?;
        let bounds = self
            .bounds
            .ok_or_else(|| MgrsError::Config("bounds must be set".to_string()))?;
        GridGeometry::generate(&bounds, precision, self.labels.unwrap_or(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gzd::zones::grid_zone;

    const SLACK: f64 = 1e-6;

    fn assert_inside(line: &Line, region: &Bounds) -> Result<(), MgrsError> {
        for point in [line.start, line.end] {
            let geo = point.to_geo()?;
            assert!(
                region.expand(SLACK).contains(&geo),
                "{} outside {:?}",
                geo,
                region
            );
        }
        Ok(())
    }

    #[test]
    fn test_hundred_km_lines_whole_zone() -> Result<(), MgrsError> {
        let zone = grid_zone(18, 'S')?;
        let lines = lines(&zone, &zone.bounds(), Precision::HundredKm)?;
        assert!(!lines.is_empty());

        for line in &lines {
            assert_eq!(line.projection(), zone.projection());
            if line.start.x == line.end.x {
                assert_eq!(line.start.x % 100_000.0, 0.0);
            } else {
                assert_eq!(line.start.y, line.end.y);
                assert_eq!(line.start.y % 100_000.0, 0.0);
            }
            assert_inside(line, &zone.bounds())?;
        }
        Ok(())
    }

    #[test]
    fn test_lines_confined_to_query() -> Result<(), MgrsError> {
        let zone = grid_zone(18, 'S')?;
        let query = Bounds::degrees(-77.5, 38.5, -76.5, 39.5);
        let lines = lines(&zone, &query, Precision::TenKm)?;
        assert!(!lines.is_empty());
        for line in &lines {
            assert_inside(line, &query)?;
            assert!(line.length() <= 10_000.0 + 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_hundred_km_line_in_tiny_box() -> Result<(), MgrsError> {
        let zone = grid_zone(18, 'S')?;
        let projection = ZoneProjection::new(&zone);
        for step in 0..20 {
            let northing = 3_600_000.0 + step as f64 * 40_000.0;
            let (lon, lat) = projection.inverse(300_000.0, northing);
            let query = Bounds::degrees(lon - 1e-4, lat - 1e-4, lon + 1e-4, lat + 1e-4);

            let lines = lines(&zone, &query, Precision::HundredKm)?;
            assert!(
                lines
                    .iter()
                    .any(|l| l.start.x == 300_000.0 && l.end.x == 300_000.0),
                "no line at northing {}",
                northing
            );
            for line in &lines {
                assert_inside(line, &query)?;
            }
        }
        Ok(())
    }

    #[test]
    fn test_lines_outside_zone() -> Result<(), MgrsError> {
        let zone = grid_zone(18, 'S')?;
        let query = Bounds::degrees(10.0, 10.0, 11.0, 11.0);
        assert!(lines(&zone, &query, Precision::HundredKm)?.is_empty());
        assert!(lines(&zone, &query, Precision::Gzd)?.is_empty());
        assert!(labels(&zone, &query, Precision::HundredKm)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_gzd_lines() -> Result<(), MgrsError> {
        let zone = grid_zone(18, 'S')?;

        let whole = lines(&zone, &Bounds::degrees(-80.0, 30.0, -70.0, 45.0), Precision::Gzd)?;
        assert_eq!(whole.len(), 4);
        assert!(whole.iter().all(|l| l.projection() == Projection::Geographic));

        let inner = lines(&zone, &Bounds::degrees(-77.0, 35.0, -76.0, 36.0), Precision::Gzd)?;
        assert!(inner.is_empty());

        // Crosses the south-west corner of 18S: part of the south and west edges.
        let corner = lines(&zone, &Bounds::degrees(-79.0, 31.0, -77.0, 33.0), Precision::Gzd)?;
        assert_eq!(corner.len(), 2);
        for line in &corner {
            assert_inside(line, &Bounds::degrees(-79.0, 31.0, -77.0, 33.0))?;
        }
        Ok(())
    }

    #[test]
    fn test_gzd_label() -> Result<(), MgrsError> {
        let zone = grid_zone(18, 'S')?;
        let labels = labels(&zone, &Bounds::degrees(-77.1, 38.85, -77.0, 38.95), Precision::Gzd)?;
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].name, "18S");
        assert_eq!(labels[0].bounds, zone.bounds());
        assert!((labels[0].center.lon() - -75.0).abs() < 1e-9);
        assert!((labels[0].center.lat() - 36.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_hundred_km_label_partially_visible() -> Result<(), MgrsError> {
        let zone = grid_zone(18, 'S')?;
        let query = Bounds::degrees(-77.1, 38.85, -77.0, 38.95);
        let labels = labels(&zone, &query, Precision::HundredKm)?;
        let names: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["UJ"]);
        // Anchored at the square's center, outside the small query box.
        assert!(!query.contains(&labels[0].center));
        assert!(zone.contains(&labels[0].center));
        Ok(())
    }

    #[test]
    fn test_ten_km_labels() -> Result<(), MgrsError> {
        let zone = grid_zone(18, 'S')?;
        let query = Bounds::degrees(-77.1, 38.85, -77.0, 38.95);
        let mut names: Vec<String> = labels(&zone, &query, Precision::TenKm)?
            .into_iter()
            .map(|l| l.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["UJ10", "UJ11", "UJ20", "UJ21"]);
        Ok(())
    }

    #[test]
    fn test_geometry_builder() -> Result<(), MgrsError> {
        let grid = GridGeometry::builder()
            .precision(Precision::HundredKm)
            .extent(-78.0, 38.0, -76.0, 40.0)
            .labels(false)
            .build()?;
        assert!(!grid.lines().is_empty());
        assert!(grid.labels().is_empty());
        assert_eq!(grid.zones().len(), 1);
        assert_eq!(grid.precision(), Precision::HundredKm);

        let missing = GridGeometry::builder().precision(Precision::Gzd).build();
        assert!(matches!(missing, Err(MgrsError::Config(_))));
        Ok(())
    }

    #[test]
    fn test_geometry_across_antimeridian() -> Result<(), MgrsError> {
        let bounds = Bounds::degrees(179.5, -1.0, -179.5, 1.0);
        let grid = GridGeometry::new(&bounds, Precision::HundredKm)?;
        let names: Vec<String> = grid.zones().iter().map(|z| z.name()).collect();
        assert_eq!(names, vec!["1M", "1N", "60M", "60N"]);
        assert!(!grid.lines().is_empty());

        for line in grid.lines_in(Projection::Geographic)? {
            for x in [line.start.x, line.end.x] {
                assert!(x >= 179.5 - SLACK || x <= -179.5 + SLACK, "lon {}", x);
            }
        }
        Ok(())
    }

    #[test]
    fn test_geometry_in_web_mercator() -> Result<(), MgrsError> {
        let bounds = Bounds::degrees(-78.0, 38.0, -76.0, 40.0).to_meters()?;
        let grid = GridGeometry::new(&bounds, Precision::HundredKm)?;
        let drawn = grid.lines_in(Projection::WebMercator)?;
        assert_eq!(drawn.len(), grid.lines().len());
        assert!(drawn.iter().all(|l| l.projection() == Projection::WebMercator));
        assert!(!grid.filter_labels(|l| l.name.starts_with('U')).is_empty());
        Ok(())
    }

    #[test]
    fn test_svalbard_lines() -> Result<(), MgrsError> {
        let zone = grid_zone(33, 'X')?;
        let lines = lines(&zone, &zone.bounds(), Precision::HundredKm)?;
        assert!(!lines.is_empty());
        for line in &lines {
            assert_inside(line, &zone.bounds())?;
        }
        Ok(())
    }
}
