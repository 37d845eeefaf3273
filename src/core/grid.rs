use crate::core::projection::TransverseMercator;
use crate::gzd::grid_zone::GridZone;
use crate::util::bounds::Bounds;
use crate::util::coord::Coordinate;
use log::trace;

/// Slack in degrees when testing whether an inverse-projected point lies in a region.
pub(crate) const CONTAINS_EPSILON: f64 = 1e-9;

/// Sample cap per segment when clipping.
const MAX_SAMPLES: usize = 1024;

/// Margin in meters kept around the region's UTM extent when cutting segments.
const EXTENT_MARGIN: f64 = 1.0;

/// Grid node indices covering a region of one zone: nodes sit at `index * cell`
/// meters of easting and (false-northing inclusive) northing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridWindow {
    pub cell: f64,
    pub min_easting: i64,
    pub max_easting: i64,
    pub min_northing: i64,
    pub max_northing: i64,
    /// UTM extent of the region in meters: min easting, min northing, max easting,
    /// max northing.
    pub extent: [f64; 4],
}

impl GridWindow {
    pub fn easting(&self, index: i64) -> f64 {
        index as f64 * self.cell
    }

    pub fn northing(&self, index: i64) -> f64 {
        index as f64 * self.cell
    }

    /// Number of cells in the window.
    pub fn cell_count(&self) -> usize {
        let columns = (self.max_easting - self.min_easting).max(0) as usize;
        let rows = (self.max_northing - self.min_northing).max(0) as usize;
        columns * rows
    }

    /// Cuts an axis-aligned UTM segment to the region's extent, or `None` when it
    /// misses the extent entirely.
    pub fn cut(&self, a: (f64, f64), b: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        let [min_e, min_n, max_e, max_n] = self.extent;
        let (min_e, min_n) = (min_e - EXTENT_MARGIN, min_n - EXTENT_MARGIN);
        let (max_e, max_n) = (max_e + EXTENT_MARGIN, max_n + EXTENT_MARGIN);

        let (x0, x1) = (a.0.min(b.0).max(min_e), a.0.max(b.0).min(max_e));
        let (y0, y1) = (a.1.min(b.1).max(min_n), a.1.max(b.1).min(max_n));
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some(((x0, y0), (x1, y1)))
    }
}

/// UTM projection of a zone with its hemisphere's false northing handled.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ZoneProjection {
    tm: TransverseMercator,
    false_northing: f64,
}

impl ZoneProjection {
    pub(crate) fn new(zone: &GridZone) -> Self {
        Self {
            tm: TransverseMercator::utm(zone.number()),
            false_northing: zone.hemisphere().false_northing(),
        }
    }

    pub(crate) fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (easting, northing) = self.tm.forward(lon, lat);
        (easting, northing + self.false_northing)
    }

    /// Unwrapped longitude, so points west of zone 1 or east of zone 60 stay outside.
    pub(crate) fn inverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        self.tm.inverse(easting, northing - self.false_northing)
    }

    pub(crate) fn central_meridian(&self) -> f64 {
        self.tm.central_meridian()
    }

    /// True if the UTM point falls in `region` (degrees), with a small slack.
    pub(crate) fn inside(&self, region: &Bounds, easting: f64, northing: f64) -> bool {
        let (lon, lat) = self.inverse(easting, northing);
        region.expand(CONTAINS_EPSILON).contains(&(lon, lat))
    }
}

/// Node window snapped to `cell` meters around a geodetic region of `zone`.
///
/// The region's UTM extent comes from its corners plus the points where its southern
/// and northern edges meet the central meridian (or the edge nearest to it), where
/// parallels reach their extreme northings.
pub fn draw_window(zone: &GridZone, region: &Bounds, cell: f64) -> GridWindow {
    let projection = ZoneProjection::new(zone);
    let meridian = projection
        .central_meridian()
        .clamp(region.west(), region.east());

    let mut points: Vec<(f64, f64)> = region
        .corners()
        .iter()
        .map(|c| projection.forward(c.x(), c.y()))
        .collect();
    points.push(projection.forward(meridian, region.south()));
    points.push(projection.forward(meridian, region.north()));

    let (min_e, max_e, min_n, max_n) = points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(min_e, max_e, min_n, max_n), &(e, n)| {
            (min_e.min(e), max_e.max(e), min_n.min(n), max_n.max(n))
        },
    );

    let window = GridWindow {
        cell,
        min_easting: (min_e / cell).floor() as i64,
        max_easting: (max_e / cell).ceil() as i64,
        min_northing: (min_n / cell).floor() as i64,
        max_northing: (max_n / cell).ceil() as i64,
        extent: [min_e, min_n, max_e, max_n],
    };
    trace!("Draw window for {} at {} m: {:?}", zone, cell, window);
    window
}

/// Samples used to clip a segment of `length` meters, already cut to the region's
/// extent, against a region whose smaller side is `region_size` meters.
pub(crate) fn clip_samples(length: f64, region_size: f64) -> usize {
    let by_length = (length / 1_000.0).ceil();
    let by_region = if region_size > 0.0 {
        (4.0 * length / region_size).ceil()
    } else {
        MAX_SAMPLES as f64
    };
    (by_length.max(by_region).max(8.0) as usize).min(MAX_SAMPLES)
}

/// Approximate smaller side of a geodetic region in meters.
pub(crate) fn region_size(region: &Bounds) -> f64 {
    const METERS_PER_DEGREE: f64 = 111_320.0;
    let mid_lat = ((region.south() + region.north()) / 2.0).to_radians();
    let width = region.width() * METERS_PER_DEGREE * mid_lat.cos();
    let height = region.height() * METERS_PER_DEGREE;
    width.min(height)
}
