use crate::api::utm::{Utm, to_utm_in};
use crate::core::constants::{ROW_CYCLE, SQUARE_SIZE};
use crate::core::precision::Precision;
use crate::core::projection::TransverseMercator;
use crate::gzd::grid_zone::GridZone;
use crate::gzd::zones::{band_latitudes, classify, grid_zone};
use crate::util::coord::GeoPoint;
use crate::util::error::MgrsError;
use crate::util::identifier::{
    MAX_DIGITS, MgrsParts, column_index, column_letter, format_identifier, parse_identifier,
    row_index, row_letter,
};
use log::trace;
use std::fmt;
use std::str::FromStr;

/// Row-cycle repeats tried when placing a 100 km square; five cover 0-10 000 km.
const ROW_CYCLES: u32 = 5;

/// Inset in degrees from an east or north edge owned by the neighbouring zone.
const EDGE_INSET: f64 = 1e-9;

/// An MGRS reference: grid zone, optional 100 km square and truncated offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mgrs {
    zone: GridZone,
    parts: MgrsParts,
}

impl Mgrs {
    /// Encodes a geodetic point at `precision`.
    ///
    /// # Example
    /// ```
    /// use mgrs_grid::{GeoPoint, Mgrs, Precision};
    ///
    /// # fn main() -> Result<(), mgrs_grid::MgrsError> {
    /// let white_house = GeoPoint::new(-77.0365, 38.8977)?;
    /// let mgrs = Mgrs::from_point(&white_house, Precision::Meter)?;
    /// assert_eq!(mgrs.to_string(), "18SUJ2339407395");
    /// assert_eq!(mgrs.coordinate(Precision::Kilometer), "18SUJ2307");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_point(point: &GeoPoint, precision: Precision) -> Result<Self, MgrsError> {
        let zone = classify(point)?;
        let utm = to_utm_in(point, zone.number(), zone.hemisphere())?;
        Self::from_zone_utm(zone, &utm, precision)
    }

    /// Encodes a UTM coordinate that lies in grid zone `utm.zone()` + `band`.
    pub fn from_utm(utm: &Utm, band: char, precision: Precision) -> Result<Self, MgrsError> {
        let zone = grid_zone(utm.zone(), band)?;
        if zone.hemisphere() != utm.hemisphere() {
            return Err(MgrsError::InvalidZone(format!(
                "band {} is not in the {:?} hemisphere",
                zone.band(),
                utm.hemisphere()
            )));
        }
        Self::from_zone_utm(zone, utm, precision)
    }

    fn from_zone_utm(zone: GridZone, utm: &Utm, precision: Precision) -> Result<Self, MgrsError> {
        let Some(digits) = precision.digits() else {
            return Ok(Self {
                zone,
                parts: MgrsParts {
                    zone: zone.number(),
                    band: zone.band(),
                    square: None,
                    easting: 0,
                    northing: 0,
                    digits: 0,
                },
            });
        };

        let column = column_letter(zone.number(), utm.easting())?;
        let row = row_letter(zone.number(), utm.northing());
        let divisor = 10u32.pow((MAX_DIGITS - digits) as u32);
        let truncate = |meters: f64| (meters.rem_euclid(SQUARE_SIZE).floor() as u32) / divisor;

        Ok(Self {
            zone,
            parts: MgrsParts {
                zone: zone.number(),
                band: zone.band(),
                square: Some((column, row)),
                easting: truncate(utm.easting()),
                northing: truncate(utm.northing()),
                digits,
            },
        })
    }

    pub fn zone(&self) -> u8 {
        self.parts.zone
    }

    pub fn band(&self) -> char {
        self.parts.band
    }

    pub fn grid_zone(&self) -> GridZone {
        self.zone
    }

    pub fn column(&self) -> Option<char> {
        self.parts.square.map(|(column, _)| column)
    }

    pub fn row(&self) -> Option<char> {
        self.parts.square.map(|(_, row)| row)
    }

    /// Two-letter 100 km square id, e.g. `UJ`.
    pub fn square_id(&self) -> Option<String> {
        self.parts
            .square
            .map(|(column, row)| format!("{}{}", column, row))
    }

    /// Easting digits as a number, e.g. `23` for `18SUJ2307`.
    pub fn easting(&self) -> u32 {
        self.parts.easting
    }

    pub fn northing(&self) -> u32 {
        self.parts.northing
    }

    pub fn precision(&self) -> Precision {
        self.parts.precision()
    }

    /// Southwest corner of the referenced cell in UTM; for a GZD-only reference the
    /// southwest corner of the zone.
    pub fn to_utm(&self) -> Result<Utm, MgrsError> {
        let Some((column, row)) = self.parts.square else {
            let corner = self.zone.bounds().southwest();
            return to_utm_in(
                &GeoPoint::wrapped(corner.x, corner.y),
                self.zone.number(),
                self.zone.hemisphere(),
            );
        };
        let (cell, column_offset, row_offset) = self.square_offsets(column, row)?;
        let base = resolve_northing(row_offset, band_center_northing(&self.zone))?;
        trace!(
            "{} placed at row offset {} -> northing {}",
            self,
            row_offset,
            base
        );
        Utm::new(
            self.zone.number(),
            self.zone.hemisphere(),
            column_offset + self.parts.easting as f64 * cell,
            base + self.parts.northing as f64 * cell,
        )
    }

    /// Southwest corner of the referenced cell in degrees.
    pub fn to_point(&self) -> Result<GeoPoint, MgrsError> {
        if self.parts.square.is_none() {
            let corner = self.zone.bounds().southwest();
            return Ok(GeoPoint::wrapped(corner.x, corner.y));
        }
        Ok(self.to_utm()?.to_point())
    }

    /// Center of the referenced cell in degrees; for a GZD-only reference the center
    /// of the zone rectangle.
    ///
    /// Cells cut by the zone's edges resolve to a point of the grid zone, so the
    /// center of a cell at 80°S or 84°N stays encodable.
    pub fn center(&self) -> Result<GeoPoint, MgrsError> {
        if self.parts.square.is_none() {
            let center = self.zone.bounds().center();
            return Ok(GeoPoint::wrapped(center.x, center.y));
        }
        let half = self.cell_size() / 2.0;
        let corner = self.to_utm()?;
        let center = Utm::new(
            corner.zone(),
            corner.hemisphere(),
            corner.easting() + half,
            corner.northing() + half,
        )?
        .to_point();
        Ok(self.clamp_to_zone(&center))
    }

    fn clamp_to_zone(&self, point: &GeoPoint) -> GeoPoint {
        let bounds = self.zone.bounds();
        let clamped = GeoPoint::wrapped(
            point.lon().clamp(bounds.west(), bounds.east()),
            point.lat().clamp(bounds.south(), bounds.north()),
        );
        if classify(&clamped).is_ok_and(|zone| zone == self.zone) {
            return clamped;
        }
        // Shared east and north edges classify into the neighbour.
        GeoPoint::wrapped(
            clamped.lon().min(bounds.east() - EDGE_INSET),
            clamped.lat().min(bounds.north() - EDGE_INSET),
        )
    }

    /// Cell size in meters at this reference's precision; 0 for GZD-only.
    pub fn cell_size(&self) -> f64 {
        self.precision().meters().unwrap_or(0.0)
    }

    /// The reference rendered at a coarser precision. Finer precisions than the
    /// reference carries return it unchanged.
    pub fn coordinate(&self, precision: Precision) -> String {
        if precision >= self.precision() {
            return self.to_string();
        }
        let Some(digits) = precision.digits() else {
            return self.zone.name();
        };
        let divisor = 10u32.pow((self.parts.digits - digits) as u32);
        format_identifier(&MgrsParts {
            easting: self.parts.easting / divisor,
            northing: self.parts.northing / divisor,
            digits,
            ..self.parts
        })
    }

    fn square_offsets(&self, column: char, row: char) -> Result<(f64, f64, f64), MgrsError> {
        let zone = self.zone.number();
        let column = column_index(zone, column)
            .ok_or_else(|| MgrsError::MalformedCoordinate(format!("column {}", column)))?;
        let row = row_index(zone, row)
            .ok_or_else(|| MgrsError::MalformedCoordinate(format!("row {}", row)))?;
        Ok((
            self.cell_size(),
            (column + 1) as f64 * SQUARE_SIZE,
            row as f64 * SQUARE_SIZE,
        ))
    }
}

/// Northing (false northing included) of the band's mid-latitude on the zone's
/// central meridian.
fn band_center_northing(zone: &GridZone) -> f64 {
    let (south, north) = band_latitudes(zone.band()).unwrap_or((0.0, 0.0));
    let tm = TransverseMercator::utm(zone.number());
    let (_, northing) = tm.forward(zone.central_meridian(), (south + north) / 2.0);
    northing + zone.hemisphere().false_northing()
}

/// Places a 100 km row within the 2000 km letter cycle.
///
/// Candidates are `row_offset + k * 2000 km`; the one whose square midpoint lies
/// nearest `center` wins. An exact tie between two candidates is `AmbiguousSquare`.
///
/// # Example
/// ```
/// use mgrs_grid::resolve_northing;
///
/// # fn main() -> Result<(), mgrs_grid::MgrsError> {
/// assert_eq!(resolve_northing(300_000.0, 4_400_000.0)?, 4_300_000.0);
/// assert!(resolve_northing(0.0, 1_050_000.0).is_err());
/// # Ok(())
/// # }
/// ```
pub fn resolve_northing(row_offset: f64, center: f64) -> Result<f64, MgrsError> {
    let mut best: Option<(f64, f64)> = None;
    let mut tied = false;
    for k in 0..ROW_CYCLES {
        let candidate = row_offset + k as f64 * ROW_CYCLE;
        let distance = (candidate + SQUARE_SIZE / 2.0 - center).abs();
        match best {
            Some((best_distance, _)) if distance > best_distance => {}
            Some((best_distance, _)) if distance == best_distance => tied = true,
            _ => {
                best = Some((distance, candidate));
                tied = false;
            }
        }
    }
    match best {
        Some((_, northing)) if !tied => Ok(northing),
        _ => Err(MgrsError::AmbiguousSquare(format!(
            "row offset {} is equidistant from band center {}",
            row_offset, center
        ))),
    }
}

/// Encodes a point as an MGRS reference at `precision`.
pub fn encode(point: &GeoPoint, precision: Precision) -> Result<Mgrs, MgrsError> {
    Mgrs::from_point(point, precision)
}

/// Decodes an MGRS string to a geodetic point.
///
/// References with a 100 km square resolve to the center of the referenced cell, so a
/// 1 m reference lands within a meter of any point it encodes. GZD-only references
/// resolve to the southwest corner of the grid zone.
///
/// # Example
/// ```
/// use mgrs_grid::{decode, encode, Precision};
///
/// # fn main() -> Result<(), mgrs_grid::MgrsError> {
/// let point = decode("18SUJ2338306479")?;
/// assert_eq!(encode(&point, Precision::Meter)?.to_string(), "18SUJ2338306479");
/// assert!(decode("4QFJ123").is_err());
/// # Ok(())
/// # }
/// ```
pub fn decode(mgrs: &str) -> Result<GeoPoint, MgrsError> {
    let parsed: Mgrs = mgrs.parse()?;
    if parsed.parts.square.is_none() {
        parsed.to_point()
    } else {
        parsed.center()
    }
}

/// Precision carried by a well-formed MGRS string.
pub fn precision_of(mgrs: &str) -> Result<Precision, MgrsError> {
    parse_identifier(mgrs).map(|parts| parts.precision())
}

/// Non-failing grammar check, for filtering input before [`decode`].
pub fn is_valid(mgrs: &str) -> bool {
    parse_identifier(mgrs).is_ok()
}

impl fmt::Display for Mgrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_identifier(&self.parts))
    }
}

impl FromStr for Mgrs {
    type Err = MgrsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts = parse_identifier(value)?;
        let zone = grid_zone(parts.zone, parts.band)
            .map_err(|e| MgrsError::MalformedCoordinate(e.to_string()))?;
        Ok(Self { zone, parts })
    }
}
