use crate::util::error::MgrsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// MGRS grid precision, ordered from coarsest to finest.
///
/// | Precision     | Cell size | Digits per axis | Example            |
/// |---------------|-----------|-----------------|--------------------|
/// | `Gzd`         | zone/band | –               | `18S`              |
/// | `HundredKm`   | 100 km    | 0               | `18SUJ`            |
/// | `TenKm`       | 10 km     | 1               | `18SUJ20`          |
/// | `Kilometer`   | 1 km      | 2               | `18SUJ2307`        |
/// | `HundredMeter`| 100 m     | 3               | `18SUJ233073`      |
/// | `TenMeter`    | 10 m      | 4               | `18SUJ23390739`    |
/// | `Meter`       | 1 m       | 5               | `18SUJ2339407395`  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Precision {
    Gzd,
    HundredKm,
    TenKm,
    Kilometer,
    HundredMeter,
    TenMeter,
    Meter,
}

impl Precision {
    /// All precisions, coarse to fine.
    pub const ALL: [Precision; 7] = [
        Precision::Gzd,
        Precision::HundredKm,
        Precision::TenKm,
        Precision::Kilometer,
        Precision::HundredMeter,
        Precision::TenMeter,
        Precision::Meter,
    ];

    /// Digits per axis in an MGRS string; `None` for GZD-only references.
    pub fn digits(&self) -> Option<usize> {
        match self {
            Precision::Gzd => None,
            Precision::HundredKm => Some(0),
            Precision::TenKm => Some(1),
            Precision::Kilometer => Some(2),
            Precision::HundredMeter => Some(3),
            Precision::TenMeter => Some(4),
            Precision::Meter => Some(5),
        }
    }

    /// Precision carried by `digits` digits per axis.
    pub fn from_digits(digits: usize) -> Option<Precision> {
        match digits {
            0 => Some(Precision::HundredKm),
            1 => Some(Precision::TenKm),
            2 => Some(Precision::Kilometer),
            3 => Some(Precision::HundredMeter),
            4 => Some(Precision::TenMeter),
            5 => Some(Precision::Meter),
            _ => None,
        }
    }

    /// Grid cell size in meters; `None` for GZD, whose cells are zone/band rectangles.
    pub fn meters(&self) -> Option<f64> {
        self.digits().map(|d| 10f64.powi(5 - d as i32))
    }

    /// Next finer precision, if any.
    pub fn finer(&self) -> Option<Precision> {
        Self::ALL.get(*self as usize + 1).copied()
    }

    /// Next coarser precision, if any.
    pub fn coarser(&self) -> Option<Precision> {
        (*self as usize).checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn name(&self) -> &'static str {
        match self {
            Precision::Gzd => "gzd",
            Precision::HundredKm => "100km",
            Precision::TenKm => "10km",
            Precision::Kilometer => "1km",
            Precision::HundredMeter => "100m",
            Precision::TenMeter => "10m",
            Precision::Meter => "1m",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Precision {
    type Err = MgrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Precision::ALL
            .into_iter()
            .find(|p| p.name() == lower)
            .ok_or_else(|| MgrsError::Config(format!("unknown precision '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Precision::Gzd < Precision::HundredKm);
        assert!(Precision::Kilometer < Precision::Meter);
        let mut sorted = Precision::ALL;
        sorted.sort();
        assert_eq!(sorted, Precision::ALL);
    }

    #[test]
    fn test_meters_and_digits() {
        assert_eq!(Precision::Gzd.meters(), None);
        assert_eq!(Precision::HundredKm.meters(), Some(100_000.0));
        assert_eq!(Precision::Kilometer.meters(), Some(1_000.0));
        assert_eq!(Precision::Meter.meters(), Some(1.0));
        assert_eq!(Precision::Kilometer.digits(), Some(2));
        for p in Precision::ALL.into_iter().skip(1) {
            assert_eq!(p.digits().and_then(Precision::from_digits), Some(p));
        }
        assert_eq!(Precision::from_digits(6), None);
    }

    #[test]
    fn test_neighbours() {
        assert_eq!(Precision::Gzd.coarser(), None);
        assert_eq!(Precision::Gzd.finer(), Some(Precision::HundredKm));
        assert_eq!(Precision::Meter.finer(), None);
        assert_eq!(Precision::Meter.coarser(), Some(Precision::TenMeter));
    }

    #[test]
    fn test_parse() -> Result<(), MgrsError> {
        assert_eq!("100km".parse::<Precision>()?, Precision::HundredKm);
        assert_eq!("GZD".parse::<Precision>()?, Precision::Gzd);
        assert_eq!(" 1m ".parse::<Precision>()?, Precision::Meter);
        assert!("5km".parse::<Precision>().is_err());
        Ok(())
    }

    #[test]
    fn test_serde_names() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Precision::HundredKm)?, "\"HUNDRED_KM\"");
        let p: Precision = serde_json::from_str("\"TEN_METER\"")?;
        assert_eq!(p, Precision::TenMeter);
        Ok(())
    }
}
