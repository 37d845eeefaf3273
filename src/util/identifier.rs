//! MGRS reference grammar: `ZZ[B[CR[E..N..]]]`.
//!
//! | Part | Meaning                      | Example |
//! |------|------------------------------|---------|
//! | ZZ   | zone number, 1-60, no padding | `4`, `18` |
//! | B    | latitude band, C-X without I and O | `S` |
//! | C    | 100 km column letter, set by `(zone - 1) % 3` | `U` |
//! | R    | 100 km row letter, set by `(zone - 1) % 2` | `J` |
//! | E..N.. | equal-length easting and northing digits, 0-5 each | `2339407395` |
//!
//! Input is case-insensitive and whitespace anywhere is ignored; output is uppercase
//! without spaces.

use crate::core::constants::{
    BAND_LETTERS, COLUMN_LETTERS, MAX_ZONE, MIN_ZONE, ROW_LETTERS, SQUARE_SIZE,
};
use crate::core::precision::Precision;
use crate::gzd::zones::grid_zone;
use crate::util::error::MgrsError;

/// Maximum easting/northing digits per axis.
pub const MAX_DIGITS: usize = 5;

/// The components of a grammatically valid MGRS reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MgrsParts {
    pub zone: u8,
    pub band: char,
    /// Column and row letter of the 100 km square; `None` for a GZD-only reference.
    pub square: Option<(char, char)>,
    /// Easting digits as a number, e.g. `23394` for `2339407395`.
    pub easting: u32,
    pub northing: u32,
    /// Digits per axis.
    pub digits: usize,
}

impl MgrsParts {
    pub fn precision(&self) -> Precision {
        match self.square {
            None => Precision::Gzd,
            Some(_) => Precision::from_digits(self.digits).unwrap_or(Precision::Meter),
        }
    }
}

fn malformed(input: &str, reason: &str) -> MgrsError {
    MgrsError::MalformedCoordinate(format!("'{}': {}", input, reason))
}

/// Splits an MGRS string into its parts, checking every grammar rule.
///
/// Fails with `MalformedCoordinate` for a zone outside 1-60, unknown band letters,
/// grid zone designations that do not exist (32X, 34X, 36X), letters outside the
/// zone's 100 km sets, and digit strings that are odd-length, too long or non-numeric.
pub fn parse_identifier(input: &str) -> Result<MgrsParts, MgrsError> {
    let value: Vec<char> = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let zone_len = value.iter().take_while(|c| c.is_ascii_digit()).count();
    if zone_len == 0 || zone_len > 2 {
        return Err(malformed(input, "expected a 1-2 digit zone number"));
    }
    let zone: u8 = value[..zone_len]
        .iter()
        .collect::<String>()
        .parse()
        .map_err(|_| malformed(input, "invalid zone number"))?;
    if !(MIN_ZONE..=MAX_ZONE).contains(&zone) {
        return Err(malformed(input, "zone outside 1-60"));
    }

    let band = *value
        .get(zone_len)
        .ok_or_else(|| malformed(input, "missing band letter"))?;
    if !BAND_LETTERS.contains(&band) {
        return Err(malformed(input, "invalid band letter"));
    }
    if grid_zone(zone, band).is_err() {
        return Err(malformed(input, "grid zone does not exist"));
    }

    let rest = &value[zone_len + 1..];
    if rest.is_empty() {
        return Ok(MgrsParts {
            zone,
            band,
            square: None,
            easting: 0,
            northing: 0,
            digits: 0,
        });
    }
    if rest.len() < 2 {
        return Err(malformed(input, "incomplete 100 km square"));
    }

    let (column, row) = (rest[0], rest[1]);
    if column_index(zone, column).is_none() {
        return Err(malformed(input, "column letter not valid for zone"));
    }
    if row_index(zone, row).is_none() {
        return Err(malformed(input, "invalid row letter"));
    }

    let digits = &rest[2..];
    if !digits.iter().all(|c| c.is_ascii_digit()) {
        return Err(malformed(input, "non-digit in easting/northing"));
    }
    if digits.len() % 2 != 0 {
        return Err(malformed(input, "odd number of digits"));
    }
    let per_axis = digits.len() / 2;
    if per_axis > MAX_DIGITS {
        return Err(malformed(input, "more than 10 digits"));
    }

    let number = |chars: &[char]| -> u32 {
        chars
            .iter()
            .filter_map(|c| c.to_digit(10))
            .fold(0, |acc, d| acc * 10 + d)
    };

    Ok(MgrsParts {
        zone,
        band,
        square: Some((column, row)),
        easting: number(&digits[..per_axis]),
        northing: number(&digits[per_axis..]),
        digits: per_axis,
    })
}

/// Canonical string for a reference: unpadded zone, band, square letters and
/// zero-padded digits.
pub fn format_identifier(parts: &MgrsParts) -> String {
    let mut out = format!("{}{}", parts.zone, parts.band);
    if let Some((column, row)) = parts.square {
        out.push(column);
        out.push(row);
        if parts.digits > 0 {
            out.push_str(&format!(
                "{:0width$}{:0width$}",
                parts.easting,
                parts.northing,
                width = parts.digits
            ));
        }
    }
    out
}

/// 100 km column letter for a UTM easting in `zone`.
pub fn column_letter(zone: u8, easting: f64) -> Result<char, MgrsError> {
    let column = (easting / SQUARE_SIZE).floor() as i64 - 1;
    let set = &COLUMN_LETTERS[(zone.max(1) as usize - 1) % 3];
    usize::try_from(column)
        .ok()
        .and_then(|i| set.get(i))
        .copied()
        .ok_or_else(|| {
            MgrsError::InvalidZone(format!("easting {} outside zone {}", easting, zone))
        })
}

/// 100 km row letter for a UTM northing (false northing included) in `zone`.
pub fn row_letter(zone: u8, northing: f64) -> char {
    let row = ((northing / SQUARE_SIZE).floor() as i64).rem_euclid(20) as usize;
    ROW_LETTERS[(zone.max(1) as usize - 1) % 2][row]
}

/// Position of a column letter in the zone's set; the square's west edge is
/// `(index + 1) * 100 km`.
pub fn column_index(zone: u8, letter: char) -> Option<usize> {
    COLUMN_LETTERS[(zone.max(1) as usize - 1) % 3]
        .iter()
        .position(|&c| c == letter.to_ascii_uppercase())
}

/// Position of a row letter in the zone's set; the square's south edge is
/// `index * 100 km` modulo 2000 km.
pub fn row_index(zone: u8, letter: char) -> Option<usize> {
    ROW_LETTERS[(zone.max(1) as usize - 1) % 2]
        .iter()
        .position(|&c| c == letter.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_reference() -> Result<(), MgrsError> {
        let parts = parse_identifier("18SUJ2339407395")?;
        assert_eq!(parts.zone, 18);
        assert_eq!(parts.band, 'S');
        assert_eq!(parts.square, Some(('U', 'J')));
        assert_eq!(parts.easting, 23394);
        assert_eq!(parts.northing, 7395);
        assert_eq!(parts.digits, 5);
        assert_eq!(parts.precision(), Precision::Meter);
        Ok(())
    }

    #[test]
    fn test_parse_whitespace_and_case() -> Result<(), MgrsError> {
        let parts = parse_identifier(" 18s uj 23394 07395 ")?;
        assert_eq!(format_identifier(&parts), "18SUJ2339407395");
        Ok(())
    }

    #[test]
    fn test_parse_short_forms() -> Result<(), MgrsError> {
        let gzd = parse_identifier("4Q")?;
        assert_eq!(gzd.square, None);
        assert_eq!(gzd.precision(), Precision::Gzd);

        let square = parse_identifier("4QFJ")?;
        assert_eq!(square.precision(), Precision::HundredKm);

        let km = parse_identifier("4QFJ1234")?;
        assert_eq!(km.precision(), Precision::Kilometer);
        assert_eq!((km.easting, km.northing), (12, 34));
        Ok(())
    }

    #[test]
    fn test_malformed() {
        for bad in [
            "", "S", "99Z", "0N", "61N", "123N", "31ABC", "31I", "4QFJ123", "4Q F", "4QFI",
            "4QZJ", "4QFJ12a4", "4QFJ123456789012", "32X", "34XCD", "4QFJ12-34",
        ] {
            assert!(
                matches!(
                    parse_identifier(bad),
                    Err(MgrsError::MalformedCoordinate(_))
                ),
                "{} should be malformed",
                bad
            );
        }
    }

    #[test]
    fn test_format_pads_digits() {
        let parts = MgrsParts {
            zone: 4,
            band: 'Q',
            square: Some(('F', 'J')),
            easting: 12,
            northing: 3,
            digits: 3,
        };
        assert_eq!(format_identifier(&parts), "4QFJ012003");
    }

    #[test]
    fn test_column_letters() -> Result<(), MgrsError> {
        assert_eq!(column_letter(1, 100_000.0)?, 'A');
        assert_eq!(column_letter(1, 899_999.0)?, 'H');
        assert_eq!(column_letter(2, 500_000.0)?, 'N');
        assert_eq!(column_letter(18, 323_394.0)?, 'U');
        assert!(column_letter(18, 99_999.0).is_err());
        assert!(column_letter(18, 900_000.0).is_err());
        assert_eq!(column_index(18, 'u'), Some(2));
        assert_eq!(column_index(18, 'A'), None);
        Ok(())
    }

    #[test]
    fn test_row_letters() {
        assert_eq!(row_letter(1, 0.0), 'A');
        assert_eq!(row_letter(2, 0.0), 'F');
        assert_eq!(row_letter(1, 1_999_999.0), 'V');
        assert_eq!(row_letter(1, 2_000_000.0), 'A');
        assert_eq!(row_letter(18, 4_307_395.0), 'J');
        assert_eq!(row_index(18, 'J'), Some(3));
        assert_eq!(row_index(17, 'J'), Some(8));
        assert_eq!(row_index(17, 'W'), None);
    }
}
