use crate::core::constants::{
    FALSE_NORTHING_SOUTH, MAX_ZONE, MIN_ZONE, WEB_MERCATOR_HALF_WORLD, WEB_MERCATOR_MAX_LATITUDE,
};
use crate::core::projection::TransverseMercator;
use crate::util::error::MgrsError;
use geo_types::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

pub trait Coordinate {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

impl Coordinate for GeoPoint {
    fn x(&self) -> f64 {
        self.lon
    }
    fn y(&self) -> f64 {
        self.lat
    }
}

impl Coordinate for ProjectedPoint {
    fn x(&self) -> f64 {
        self.x
    }
    fn y(&self) -> f64 {
        self.y
    }
}

/// A geodetic position in decimal degrees, longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    lon: f64,
    lat: f64,
}

impl GeoPoint {
    /// Creates a point, rejecting longitudes outside [-180, 180] and latitudes outside [-90, 90].
    ///
    /// # Example
    /// ```
    /// use mgrs_grid::GeoPoint;
    ///
    /// # fn main() -> Result<(), mgrs_grid::MgrsError> {
    /// let white_house = GeoPoint::new(-77.0365, 38.8977)?;
    /// assert_eq!(white_house.lat(), 38.8977);
    /// assert!(GeoPoint::new(-77.0, 91.0).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(lon: f64, lat: f64) -> Result<Self, MgrsError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(MgrsError::InvalidLatitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(MgrsError::MalformedCoordinate(format!(
                "longitude {} outside [-180, 180]",
                lon
            )));
        }
        Ok(Self { lon, lat })
    }

    pub fn from_coord<C: Coordinate>(coord: &C) -> Result<Self, MgrsError> {
        Self::new(coord.x(), coord.y())
    }

    /// Builds a point from computed values, wrapping longitude into [-180, 180]
    /// and clamping latitude to [-90, 90].
    pub(crate) fn wrapped(lon: f64, lat: f64) -> Self {
        let lon = if (-180.0..=180.0).contains(&lon) {
            lon
        } else {
            (lon + 180.0).rem_euclid(360.0) - 180.0
        };
        Self {
            lon,
            lat: lat.clamp(-90.0, 90.0),
        }
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// Web Mercator meters; latitude is clamped to the square Web Mercator plane.
    pub fn to_meters(&self) -> ProjectedPoint {
        let (x, y) = degrees_to_meters(self.lon, self.lat);
        ProjectedPoint::new(x, y, Projection::WebMercator)
    }

    pub fn to_projected(&self) -> ProjectedPoint {
        ProjectedPoint::new(self.lon, self.lat, Projection::Geographic)
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        point.to_point()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lon, self.lat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    pub fn from_latitude(lat: f64) -> Self {
        if lat < 0.0 {
            Hemisphere::South
        } else {
            Hemisphere::North
        }
    }

    /// Bands C through M lie south of the equator, N through X north of it.
    pub fn from_band(band: char) -> Self {
        if band.to_ascii_uppercase() < 'N' {
            Hemisphere::South
        } else {
            Hemisphere::North
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        }
    }

    pub fn false_northing(&self) -> f64 {
        match self {
            Hemisphere::North => 0.0,
            Hemisphere::South => FALSE_NORTHING_SOUTH,
        }
    }
}

/// The coordinate space a [`ProjectedPoint`] or [`Bounds`](crate::Bounds) is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Projection {
    /// Longitude/latitude in degrees.
    Geographic,
    /// Spherical (EPSG:3857) meters.
    WebMercator,
    /// UTM meters in one zone, with the hemisphere's false northing.
    Utm { zone: u8, hemisphere: Hemisphere },
}

impl Projection {
    pub fn is_meters(&self) -> bool {
        !matches!(self, Projection::Geographic)
    }
}

/// A 2D point tagged with the projection its coordinates belong to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub projection: Projection,
}

impl ProjectedPoint {
    pub fn new(x: f64, y: f64, projection: Projection) -> Self {
        Self { x, y, projection }
    }

    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }

    /// Converts to a geodetic point, inverting whichever projection the point carries.
    pub fn to_geo(&self) -> Result<GeoPoint, MgrsError> {
        match self.projection {
            Projection::Geographic => GeoPoint::new(self.x, self.y),
            Projection::WebMercator => {
                let (lon, lat) = meters_to_degrees(self.x, self.y);
                Ok(GeoPoint::wrapped(lon, lat))
            }
            Projection::Utm { zone, hemisphere } => {
                if !(MIN_ZONE..=MAX_ZONE).contains(&zone) {
                    return Err(MgrsError::InvalidZone(zone.to_string()));
                }
                let tm = TransverseMercator::utm(zone);
                let (lon, lat) = tm.inverse(self.x, self.y - hemisphere.false_northing());
                Ok(GeoPoint::wrapped(lon, lat))
            }
        }
    }

    /// Re-expresses the point in `target`.
    pub fn to_projection(&self, target: Projection) -> Result<ProjectedPoint, MgrsError> {
        if self.projection == target {
            return Ok(*self);
        }
        let geo = self.to_geo()?;
        Ok(match target {
            Projection::Geographic => geo.to_projected(),
            Projection::WebMercator => geo.to_meters(),
            Projection::Utm { zone, hemisphere } => {
                if !(MIN_ZONE..=MAX_ZONE).contains(&zone) {
                    return Err(MgrsError::InvalidZone(zone.to_string()));
                }
                let (x, y) = TransverseMercator::utm(zone).forward(geo.lon(), geo.lat());
                ProjectedPoint::new(x, y + hemisphere.false_northing(), target)
            }
        })
    }
}

/// Longitude/latitude in degrees to Web Mercator meters.
pub fn degrees_to_meters(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-WEB_MERCATOR_MAX_LATITUDE, WEB_MERCATOR_MAX_LATITUDE);
    let x = lon * WEB_MERCATOR_HALF_WORLD / 180.0;
    let y = ((90.0 + lat) * PI / 360.0).tan().ln() / (PI / 180.0);
    (x, y * WEB_MERCATOR_HALF_WORLD / 180.0)
}

/// Web Mercator meters to longitude/latitude in degrees.
pub fn meters_to_degrees(x: f64, y: f64) -> (f64, f64) {
    let lon = x * 180.0 / WEB_MERCATOR_HALF_WORLD;
    let lat = (y * PI / WEB_MERCATOR_HALF_WORLD).exp().atan() * 360.0 / PI - 90.0;
    (lon, lat)
}
