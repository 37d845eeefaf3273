//! Grid zone classification: longitude to zone number, latitude to band letter,
//! and the zone/band rectangles including the Norway and Svalbard exceptions.

use crate::core::constants::{
    ABSENT_ZONES, BAND_HEIGHT, BAND_LETTERS, IRREGULAR_ZONES, MAX_LATITUDE, MAX_ZONE,
    MIN_LATITUDE, MIN_ZONE, ZONE_WIDTH,
};
use crate::gzd::grid_zone::GridZone;
use crate::gzd::range::GridRange;
use crate::util::bounds::Bounds;
use crate::util::coord::{GeoPoint, Projection};
use crate::util::error::MgrsError;
use log::debug;
use once_cell::sync::Lazy;

/// Every existing zone/band rectangle, indexed by `(zone - 1) * 20 + band_index`.
static GRID_ZONES: Lazy<Vec<Option<GridZone>>> = Lazy::new(|| {
    let table: Vec<Option<GridZone>> = (MIN_ZONE..=MAX_ZONE)
        .flat_map(|zone| BAND_LETTERS.iter().map(move |&band| (zone, band)))
        .map(|(zone, band)| {
            compute_zone_bounds(zone, band)
                .ok()
                .map(|bounds| GridZone::new(zone, band, bounds))
        })
        .collect();
    debug!(
        "Built grid zone table with {} zones",
        table.iter().flatten().count()
    );
    table
});

/// Zone number from longitude alone, ignoring the irregular zones.
///
/// `floor((lon + 180) / 6) + 1`, clamped to 1-60 so that 180° falls in zone 60.
pub fn nominal_zone_number(lon: f64) -> u8 {
    let zone = ((lon + 180.0) / ZONE_WIDTH).floor() + 1.0;
    zone.clamp(MIN_ZONE as f64, MAX_ZONE as f64) as u8
}

/// Zone number of a position, applying the Norway and Svalbard exceptions.
///
/// On a meridian shared by two irregular zones the western zone is returned.
///
/// # Example
/// ```
/// use mgrs_grid::zone_number;
///
/// # fn main() -> Result<(), mgrs_grid::MgrsError> {
/// assert_eq!(zone_number(5.0, 61.0)?, 32);  // Norway
/// assert_eq!(zone_number(5.0, 50.0)?, 31);
/// assert_eq!(zone_number(20.0, 78.0)?, 33); // Svalbard
/// # Ok(())
/// # }
/// ```
pub fn zone_number(lon: f64, lat: f64) -> Result<u8, MgrsError> {
    let band = band_letter(lat)?;
    Ok(irregular_zone(band, lon).unwrap_or_else(|| nominal_zone_number(lon)))
}

fn irregular_zone(band: char, lon: f64) -> Option<u8> {
    IRREGULAR_ZONES
        .iter()
        .find(|(b, _, west, east)| *b == band && lon > *west && lon <= *east)
        .map(|(_, zone, _, _)| *zone)
}

/// Index of the latitude band containing `lat`, 0 for band C.
pub fn band_index(lat: f64) -> Result<usize, MgrsError> {
    if !lat.is_finite() || !(MIN_LATITUDE..=MAX_LATITUDE).contains(&lat) {
        return Err(MgrsError::InvalidLatitude(lat));
    }
    let index = ((lat - MIN_LATITUDE) / BAND_HEIGHT).floor() as usize;
    Ok(index.min(BAND_LETTERS.len() - 1))
}

/// Latitude band letter, C (80°S) to X (72°N-84°N).
pub fn band_letter(lat: f64) -> Result<char, MgrsError> {
    band_index(lat).map(|i| BAND_LETTERS[i])
}

/// Position of a band letter in `C..=X`, case-insensitive.
pub fn band_position(band: char) -> Option<usize> {
    let band = band.to_ascii_uppercase();
    BAND_LETTERS.iter().position(|&b| b == band)
}

/// South and north latitude of a band.
pub fn band_latitudes(band: char) -> Result<(f64, f64), MgrsError> {
    let index =
        band_position(band).ok_or_else(|| MgrsError::InvalidZone(format!("band '{}'", band)))?;
    let south = MIN_LATITUDE + BAND_HEIGHT * index as f64;
    let north = if index == BAND_LETTERS.len() - 1 {
        MAX_LATITUDE
    } else {
        south + BAND_HEIGHT
    };
    Ok((south, north))
}

fn validate_zone(zone: u8) -> Result<(), MgrsError> {
    if (MIN_ZONE..=MAX_ZONE).contains(&zone) {
        Ok(())
    } else {
        Err(MgrsError::InvalidZone(format!(
            "zone {} outside {}-{}",
            zone, MIN_ZONE, MAX_ZONE
        )))
    }
}

fn compute_zone_bounds(zone: u8, band: char) -> Result<Bounds, MgrsError> {
    validate_zone(zone)?;
    let band = band.to_ascii_uppercase();
    let (south, north) = band_latitudes(band)?;
    if ABSENT_ZONES.contains(&(band, zone)) {
        return Err(MgrsError::InvalidZone(format!(
            "{}{} does not exist",
            zone, band
        )));
    }
    let (west, east) = IRREGULAR_ZONES
        .iter()
        .find(|(b, z, _, _)| *b == band && *z == zone)
        .map(|(_, _, west, east)| (*west, *east))
        .unwrap_or_else(|| {
            let west = -180.0 + ZONE_WIDTH * (zone - 1) as f64;
            (west, west + ZONE_WIDTH)
        });
    Ok(Bounds::new(west, south, east, north, Projection::Geographic))
}

/// The geodetic rectangle of a zone/band pair.
///
/// Fails with `InvalidZone` for zones outside 1-60, unknown band letters, and the
/// designations 32X, 34X and 36X, which do not exist.
pub fn zone_bounds(zone: u8, band: char) -> Result<Bounds, MgrsError> {
    grid_zone(zone, band).map(|z| z.bounds())
}

/// Cached [`GridZone`] for a zone/band pair.
pub fn grid_zone(zone: u8, band: char) -> Result<GridZone, MgrsError> {
    validate_zone(zone)?;
    let index =
        band_position(band).ok_or_else(|| MgrsError::InvalidZone(format!("band '{}'", band)))?;
    GRID_ZONES[(zone as usize - 1) * BAND_LETTERS.len() + index].ok_or_else(|| {
        MgrsError::InvalidZone(format!(
            "{}{} does not exist",
            zone,
            band.to_ascii_uppercase()
        ))
    })
}

/// Grid zone containing a point.
///
/// # Example
/// ```
/// use mgrs_grid::{GeoPoint, classify};
///
/// # fn main() -> Result<(), mgrs_grid::MgrsError> {
/// let zone = classify(&GeoPoint::new(-77.0365, 38.8977)?)?;
/// assert_eq!(zone.name(), "18S");
/// # Ok(())
/// # }
/// ```
pub fn classify(point: &GeoPoint) -> Result<GridZone, MgrsError> {
    let band = band_letter(point.lat())?;
    let zone = zone_number(point.lon(), point.lat())?;
    grid_zone(zone, band)
}

/// All existing grid zones, ordered by zone then band.
pub fn all_zones() -> impl Iterator<Item = GridZone> {
    GRID_ZONES.iter().flatten().copied()
}

/// Grid zones whose rectangles overlap `bounds`, ordered by zone then band.
///
/// Bounds in meters are converted to degrees first. A box across the antimeridian
/// returns the zones on both sides. Zones merely touching the box along an edge are
/// left out unless the box itself has no area.
pub fn grid_range(bounds: &Bounds) -> Result<GridRange, MgrsError> {
    let query = bounds.to_degrees()?;
    let degenerate = query.is_empty();
    let mut zones: Vec<GridZone> = Vec::new();

    for piece in query.pieces() {
        let south = piece.south().max(MIN_LATITUDE);
        let north = piece.north().min(MAX_LATITUDE);
        if south > north {
            continue;
        }
        let first_band = band_index(south)?;
        let last_band = band_index(north)?;
        let first_zone = nominal_zone_number(piece.west()).saturating_sub(1).max(MIN_ZONE);
        let last_zone = (nominal_zone_number(piece.east()) + 1).min(MAX_ZONE);

        for zone in first_zone..=last_zone {
            for band in &BAND_LETTERS[first_band..=last_band] {
                let Ok(candidate) = grid_zone(zone, *band) else {
                    continue;
                };
                let hit = if degenerate {
                    candidate.bounds().intersects(&piece)
                } else {
                    candidate.bounds().overlaps(&piece)
                };
                if hit {
                    zones.push(candidate);
                }
            }
        }
    }

    zones.sort_by_key(|z| (z.number(), z.band_index()));
    zones.dedup_by_key(|z| (z.number(), z.band()));
    debug!("Grid range for {:?} holds {} zones", bounds, zones.len());
    Ok(GridRange::new(zones))
}
