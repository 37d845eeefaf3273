use crate::core::constants::BAND_LETTERS;
use crate::core::projection::central_meridian;
use crate::util::bounds::Bounds;
use crate::util::coord::{GeoPoint, Hemisphere, Projection};
use std::fmt;

/// A grid zone designation: UTM zone number plus latitude band, with its geodetic extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridZone {
    number: u8,
    band: char,
    bounds: Bounds,
}

impl GridZone {
    pub(crate) fn new(number: u8, band: char, bounds: Bounds) -> Self {
        Self {
            number,
            band,
            bounds,
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn band(&self) -> char {
        self.band
    }

    /// Position of the band letter in `C..=X`, 0 for C.
    pub fn band_index(&self) -> usize {
        BAND_LETTERS
            .iter()
            .position(|&b| b == self.band)
            .unwrap_or_default()
    }

    /// The zone/band rectangle in degrees.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn hemisphere(&self) -> Hemisphere {
        Hemisphere::from_band(self.band)
    }

    /// The UTM projection cells of this zone are measured in.
    pub fn projection(&self) -> Projection {
        Projection::Utm {
            zone: self.number,
            hemisphere: self.hemisphere(),
        }
    }

    pub fn central_meridian(&self) -> f64 {
        central_meridian(self.number)
    }

    /// True for the widened or narrowed Norway and Svalbard zones.
    pub fn is_irregular(&self) -> bool {
        self.bounds.width() != 6.0
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.bounds.contains(point)
    }

    /// Zone number and band, e.g. `32V`.
    pub fn name(&self) -> String {
        format!("{}{}", self.number, self.band)
    }
}

impl fmt::Display for GridZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.band)
    }
}
