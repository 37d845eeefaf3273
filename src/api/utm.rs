use crate::core::constants::{MAX_ZONE, MIN_ZONE};
use crate::core::projection::TransverseMercator;
use crate::gzd::zones::{band_letter, zone_number};
use crate::util::coord::{GeoPoint, Hemisphere, ProjectedPoint, Projection};
use crate::util::error::MgrsError;
use std::fmt;
use std::str::FromStr;

/// A UTM coordinate: zone, hemisphere, easting and northing in meters.
///
/// Southern-hemisphere northings include the 10 000 km false northing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Utm {
    zone: u8,
    hemisphere: Hemisphere,
    easting: f64,
    northing: f64,
}

impl Utm {
    pub fn new(
        zone: u8,
        hemisphere: Hemisphere,
        easting: f64,
        northing: f64,
    ) -> Result<Self, MgrsError> {
        if !(MIN_ZONE..=MAX_ZONE).contains(&zone) {
            return Err(MgrsError::InvalidZone(format!(
                "zone {} outside {}-{}",
                zone, MIN_ZONE, MAX_ZONE
            )));
        }
        Ok(Self {
            zone,
            hemisphere,
            easting,
            northing,
        })
    }

    /// Projects a point into its own zone, Norway and Svalbard exceptions included.
    ///
    /// # Example
    /// ```
    /// use mgrs_grid::{GeoPoint, Utm};
    ///
    /// # fn main() -> Result<(), mgrs_grid::MgrsError> {
    /// let utm = Utm::from_point(&GeoPoint::new(-77.0365, 38.8977)?)?;
    /// assert_eq!(utm.zone(), 18);
    /// assert_eq!(utm.to_string(), "18 N 323394.3 4307395.6");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_point(point: &GeoPoint) -> Result<Self, MgrsError> {
        to_utm(point, None)
    }

    /// Projects a point into a given zone, which may lie outside it.
    pub fn from_point_in_zone(point: &GeoPoint, zone: u8) -> Result<Self, MgrsError> {
        to_utm(point, Some(zone))
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    pub fn easting(&self) -> f64 {
        self.easting
    }

    pub fn northing(&self) -> f64 {
        self.northing
    }

    pub fn projection(&self) -> Projection {
        Projection::Utm {
            zone: self.zone,
            hemisphere: self.hemisphere,
        }
    }

    pub fn to_projected(&self) -> ProjectedPoint {
        ProjectedPoint::new(self.easting, self.northing, self.projection())
    }

    pub fn to_point(&self) -> GeoPoint {
        let tm = TransverseMercator::utm(self.zone);
        let (lon, lat) = tm.inverse(
            self.easting,
            self.northing - self.hemisphere.false_northing(),
        );
        GeoPoint::wrapped(lon, lat)
    }

    /// Non-failing check of the UTM string grammar.
    pub fn is_utm(value: &str) -> bool {
        value.parse::<Utm>().is_ok()
    }
}

/// Projects a geodetic point to UTM.
///
/// Without a zone the point's own zone is used. The hemisphere follows the latitude
/// band, so the equator itself is northern. Fails with `InvalidLatitude` outside
/// 80°S to 84°N and `InvalidZone` for a zone outside 1-60.
pub fn to_utm(point: &GeoPoint, zone: Option<u8>) -> Result<Utm, MgrsError> {
    let band = band_letter(point.lat())?;
    let zone = match zone {
        Some(zone) => zone,
        None => zone_number(point.lon(), point.lat())?,
    };
    to_utm_in(point, zone, Hemisphere::from_band(band))
}

/// Projects a point into an explicit zone and hemisphere, with no latitude limit.
pub(crate) fn to_utm_in(
    point: &GeoPoint,
    zone: u8,
    hemisphere: Hemisphere,
) -> Result<Utm, MgrsError> {
    if !(MIN_ZONE..=MAX_ZONE).contains(&zone) {
        return Err(MgrsError::InvalidZone(format!(
            "zone {} outside {}-{}",
            zone, MIN_ZONE, MAX_ZONE
        )));
    }
    let (easting, northing) = TransverseMercator::utm(zone).forward(point.lon(), point.lat());
    Ok(Utm {
        zone,
        hemisphere,
        easting,
        northing: northing + hemisphere.false_northing(),
    })
}

/// Inverse projection of a UTM coordinate.
pub fn to_geo_point(utm: &Utm) -> Result<GeoPoint, MgrsError> {
    if !(MIN_ZONE..=MAX_ZONE).contains(&utm.zone) {
        return Err(MgrsError::InvalidZone(utm.zone.to_string()));
    }
    Ok(utm.to_point())
}

/// `ZZ H EEEEEE.E NNNNNNN.N`, e.g. `18 N 323394.3 4307395.6`.
impl fmt::Display for Utm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02} {} {:.1} {:.1}",
            self.zone,
            self.hemisphere.letter(),
            self.easting,
            self.northing
        )
    }
}

impl FromStr for Utm {
    type Err = MgrsError;

    /// Accepts a 1-2 digit zone, `N` or `S`, then easting and northing as integers or
    /// decimals. Whitespace between zone and hemisphere is optional.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| {
            MgrsError::MalformedCoordinate(format!("'{}': {}", value.trim(), reason))
        };
        let trimmed = value.trim();

        let zone_len = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
        if zone_len == 0 || zone_len > 2 {
            return Err(malformed("expected a 1-2 digit zone number"));
        }
        let zone: u8 = trimmed[..zone_len]
            .parse()
            .map_err(|_| malformed("invalid zone number"))?;
        if !(MIN_ZONE..=MAX_ZONE).contains(&zone) {
            return Err(malformed("zone outside 1-60"));
        }

        let rest = trimmed[zone_len..].trim_start();
        let mut chars = rest.chars();
        let hemisphere = chars
            .next()
            .and_then(Hemisphere::from_letter)
            .ok_or_else(|| malformed("expected hemisphere N or S"))?;
        let rest = chars.as_str();
        if !rest.starts_with(char::is_whitespace) {
            return Err(malformed("expected whitespace after hemisphere"));
        }

        let numbers: Vec<&str> = rest.split_whitespace().collect();
        let [easting, northing] = numbers.as_slice() else {
            return Err(malformed("expected easting and northing"));
        };
        let number = |s: &str| -> Result<f64, MgrsError> {
            let valid = !s.is_empty()
                && s.chars().all(|c| c.is_ascii_digit() || c == '.')
                && s.chars().filter(|&c| c == '.').count() <= 1
                && s.chars().any(|c| c.is_ascii_digit());
            if !valid {
                return Err(malformed("invalid easting/northing"));
            }
            s.parse::<f64>()
                .map_err(|_| malformed("invalid easting/northing"))
        };

        Utm::new(zone, hemisphere, number(*easting)?, number(*northing)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn test_to_utm_white_house() -> Result<(), MgrsError> {
        let utm = to_utm(&GeoPoint::new(-77.0365, 38.8977)?, None)?;
        assert_eq!(utm.zone(), 18);
        assert_eq!(utm.hemisphere(), Hemisphere::North);
        assert_float_eq!(utm.easting(), 323_394.296, abs <= 1e-3);
        assert_float_eq!(utm.northing(), 4_307_395.634, abs <= 1e-3);
        Ok(())
    }

    #[test]
    fn test_to_utm_southern_hemisphere() -> Result<(), MgrsError> {
        let utm = to_utm(&GeoPoint::new(151.2, -33.9)?, None)?;
        assert_eq!(utm.zone(), 56);
        assert_eq!(utm.hemisphere(), Hemisphere::South);
        assert!(utm.northing() > 6_000_000.0 && utm.northing() < 10_000_000.0);
        Ok(())
    }

    #[test]
    fn test_to_utm_uses_exception_zones() -> Result<(), MgrsError> {
        assert_eq!(to_utm(&GeoPoint::new(5.0, 61.0)?, None)?.zone(), 32);
        assert_eq!(to_utm(&GeoPoint::new(20.0, 78.0)?, None)?.zone(), 33);
        Ok(())
    }

    #[test]
    fn test_to_utm_forced_zone() -> Result<(), MgrsError> {
        let point = GeoPoint::new(-77.0365, 38.8977)?;
        let utm = to_utm(&point, Some(17))?;
        assert_eq!(utm.zone(), 17);
        assert!(utm.easting() > 800_000.0);
        assert_eq!(Utm::from_point_in_zone(&point, 17)?, utm);
        assert!(matches!(
            to_utm(&point, Some(61)),
            Err(MgrsError::InvalidZone(_))
        ));
        Ok(())
    }

    #[test]
    fn test_to_utm_latitude_limits() -> Result<(), MgrsError> {
        assert!(to_utm(&GeoPoint::new(0.0, 84.0)?, None).is_ok());
        assert!(to_utm(&GeoPoint::new(0.0, -80.0)?, None).is_ok());
        assert!(matches!(
            to_utm(&GeoPoint::new(0.0, 84.5)?, None),
            Err(MgrsError::InvalidLatitude(_))
        ));
        assert!(matches!(
            to_utm(&GeoPoint::new(0.0, -80.5)?, None),
            Err(MgrsError::InvalidLatitude(_))
        ));
        Ok(())
    }

    #[test]
    fn test_roundtrip_within_centimeter() -> Result<(), MgrsError> {
        for (lon, lat) in [
            (-77.0365, 38.8977),
            (151.2, -33.9),
            (5.0, 61.0),
            (21.0, 78.0),
            (179.9, -79.9),
            (-0.1, 51.5),
            (0.0, 0.0),
        ] {
            let point = GeoPoint::new(lon, lat)?;
            let utm = to_utm(&point, None)?;
            let back = to_geo_point(&utm)?;
            let again = to_utm(&back, Some(utm.zone()))?;
            assert!((again.easting() - utm.easting()).abs() < 0.01);
            assert!((again.northing() - utm.northing()).abs() < 0.01);
            assert_float_eq!(back.lon(), lon, abs <= 1e-8);
            assert_float_eq!(back.lat(), lat, abs <= 1e-8);
        }
        Ok(())
    }

    #[test]
    fn test_new_rejects_zone() {
        assert!(matches!(
            Utm::new(0, Hemisphere::North, 500_000.0, 0.0),
            Err(MgrsError::InvalidZone(_))
        ));
    }

    #[test]
    fn test_display() -> Result<(), MgrsError> {
        let utm = Utm::new(4, Hemisphere::South, 500_000.04, 7_000_000.96)?;
        assert_eq!(utm.to_string(), "04 S 500000.0 7000001.0");
        Ok(())
    }

    #[test]
    fn test_parse() -> Result<(), MgrsError> {
        let utm: Utm = "18 N 323394.3 4307395.6".parse()?;
        assert_eq!(utm.zone(), 18);
        assert_eq!(utm.hemisphere(), Hemisphere::North);
        assert_float_eq!(utm.easting(), 323_394.3, abs <= 1e-9);

        let compact: Utm = "4s 500000 7000000".parse()?;
        assert_eq!(compact.zone(), 4);
        assert_eq!(compact.hemisphere(), Hemisphere::South);

        let utm_again: Utm = utm.to_string().parse()?;
        assert_eq!(utm_again, utm);
        Ok(())
    }

    #[test]
    fn test_parse_rejects() {
        for bad in [
            "",
            "18",
            "18 N",
            "18 N 323394.3",
            "18 Q 323394.3 4307395.6",
            "61 N 323394.3 4307395.6",
            "18 N 3233a4.3 4307395.6",
            "18 N 323394.3 4307395.6 1",
            "18N323394.3 4307395.6",
            "18 N -1 4307395.6",
            "18 N 1.2.3 4307395.6",
            "18SUJ2339407395",
        ] {
            assert!(!Utm::is_utm(bad), "{} should not parse", bad);
        }
        assert!(Utm::is_utm("18 N 323394.3 4307395.6"));
    }
}
