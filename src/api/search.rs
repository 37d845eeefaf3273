use crate::api::mgrs::{Mgrs, is_valid};
use crate::api::utm::Utm;
use crate::core::precision::Precision;
use crate::util::coord::GeoPoint;
use crate::util::error::MgrsError;

/// A resolved coordinate query.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub point: GeoPoint,
    /// Uppercased MGRS text when the query was an MGRS reference.
    pub mgrs: Option<String>,
    /// Precision of the MGRS reference.
    pub precision: Option<Precision>,
}

impl Location {
    fn at(point: GeoPoint) -> Self {
        Self {
            point,
            mgrs: None,
            precision: None,
        }
    }
}

/// Resolves a free-form coordinate: an MGRS reference, a UTM coordinate or a
/// `lon, lat` pair, tried in that order.
///
/// MGRS references resolve to the southwest corner of the referenced cell (of the
/// zone for GZD-only references).
///
/// # Example
/// ```
/// use mgrs_grid::{Precision, locate};
///
/// # fn main() -> Result<(), mgrs_grid::MgrsError> {
/// let found = locate(" 18suj2307 ")?;
/// assert_eq!(found.mgrs.as_deref(), Some("18SUJ2307"));
/// assert_eq!(found.precision, Some(Precision::Kilometer));
///
/// let pair = locate("-77.0365, 38.8977")?;
/// assert_eq!(pair.point.lat(), 38.8977);
/// # Ok(())
/// # }
/// ```
pub fn locate(query: &str) -> Result<Location, MgrsError> {
    let query = query.trim();

    if is_valid(query) {
        let mgrs: Mgrs = query.parse()?;
        return Ok(Location {
            point: mgrs.to_point()?,
            mgrs: Some(mgrs.to_string()),
            precision: Some(mgrs.precision()),
        });
    }

    if Utm::is_utm(query) {
        let utm: Utm = query.parse()?;
        return Ok(Location::at(utm.to_point()));
    }

    let parts: Vec<&str> = query.split(',').map(str::trim).collect();
    if let [lon, lat] = parts.as_slice() {
        if let (Ok(lon), Ok(lat)) = (lon.parse::<f64>(), lat.parse::<f64>()) {
            return GeoPoint::new(lon, lat).map(Location::at);
        }
    }

    Err(MgrsError::MalformedCoordinate(format!(
        "'{}': not an MGRS, UTM or lon, lat coordinate",
        query
    )))
}
