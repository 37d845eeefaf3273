/// WGS84 semi-major axis in meters
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 flattening
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// UTM scale factor on the central meridian
pub const UTM_SCALE_FACTOR: f64 = 0.9996;

/// UTM false easting in meters
pub const FALSE_EASTING: f64 = 500_000.0;

/// False northing applied in the southern hemisphere
pub const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Number of UTM zones
pub const MIN_ZONE: u8 = 1;
pub const MAX_ZONE: u8 = 60;

/// Width of a regular UTM zone in degrees
pub const ZONE_WIDTH: f64 = 6.0;

/// Southern and northern limits of UTM/MGRS coverage in degrees
pub const MIN_LATITUDE: f64 = -80.0;
pub const MAX_LATITUDE: f64 = 84.0;

/// Height of a regular latitude band in degrees (band X is 12)
pub const BAND_HEIGHT: f64 = 8.0;

/// Latitude band letters from 80°S northwards, I and O skipped
pub const BAND_LETTERS: [char; 20] = [
    'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W',
    'X',
];

/// Size of a 100 km square in meters
pub const SQUARE_SIZE: f64 = 100_000.0;

/// Distance after which the 100 km row letters repeat
pub const ROW_CYCLE: f64 = 2_000_000.0;

/// 100 km column letters, selected by `(zone - 1) % 3`
pub const COLUMN_LETTERS: [[char; 8]; 3] = [
    ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'],
    ['J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R'],
    ['S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z'],
];

/// 100 km row letters, selected by `(zone - 1) % 2`; even zones start at F
pub const ROW_LETTERS: [[char; 20]; 2] = [
    [
        'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T',
        'U', 'V',
    ],
    [
        'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'A', 'B', 'C',
        'D', 'E',
    ],
];

/// Irregular zone widths: (band, zone, west, east) in degrees.
///
/// | Band | Zone | Longitudes  |
/// |------|------|-------------|
/// | V    | 31   | 0°E – 3°E   |
/// | V    | 32   | 3°E – 12°E  |
/// | X    | 31   | 0°E – 9°E   |
/// | X    | 33   | 9°E – 21°E  |
/// | X    | 35   | 21°E – 33°E |
/// | X    | 37   | 33°E – 42°E |
pub const IRREGULAR_ZONES: [(char, u8, f64, f64); 6] = [
    ('V', 31, 0.0, 3.0),
    ('V', 32, 3.0, 12.0),
    ('X', 31, 0.0, 9.0),
    ('X', 33, 9.0, 21.0),
    ('X', 35, 21.0, 33.0),
    ('X', 37, 33.0, 42.0),
];

/// Grid zone designations absorbed by the Svalbard zones
pub const ABSENT_ZONES: [(char, u8); 3] = [('X', 32), ('X', 34), ('X', 36)];

/// Half the width of the Web Mercator plane in meters
pub const WEB_MERCATOR_HALF_WORLD: f64 = 20_037_508.342_789_244;

/// Latitude limit of the square Web Mercator plane
pub const WEB_MERCATOR_MAX_LATITUDE: f64 = 85.051_128_779_806_59;
