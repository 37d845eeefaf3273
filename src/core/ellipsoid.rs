use crate::core::constants::{WGS84_FLATTENING, WGS84_SEMI_MAJOR_AXIS};

/// Reference ellipsoid, defined by its semi-major axis and flattening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
}

/// WGS84 is the only ellipsoid MGRS is defined on.
pub const WGS84: Ellipsoid = Ellipsoid::new(WGS84_SEMI_MAJOR_AXIS, WGS84_FLATTENING);

impl Default for Ellipsoid {
    fn default() -> Self {
        WGS84
    }
}

impl Ellipsoid {
    #[must_use]
    pub const fn new(semi_major_axis: f64, flattening: f64) -> Self {
        Self {
            a: semi_major_axis,
            f: flattening,
        }
    }

    /// The semi-major axis, *a*
    #[must_use]
    pub fn semi_major_axis(&self) -> f64 {
        self.a
    }

    /// The semi-minor axis, *b = a(1 - f)*
    #[must_use]
    pub fn semi_minor_axis(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// The flattening, *f = (a - b)/a*
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// The squared eccentricity *e² = f(2 - f)*
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// The eccentricity *e*
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// The third flattening *n = (a - b)/(a + b) = f/(2 - f)*
    #[must_use]
    pub fn third_flattening(&self) -> f64 {
        self.f / (2.0 - self.f)
    }

    /// The rectifying radius *A*, the meridian arc length per radian of rectifying latitude.
    #[must_use]
    pub fn rectifying_radius(&self) -> f64 {
        let n = self.third_flattening();
        let n2 = n * n;
        self.a / (1.0 + n) * (1.0 + n2 * (1.0 / 4.0 + n2 * (1.0 / 64.0 + n2 / 256.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn test_wgs84_parameters() {
        let e = Ellipsoid::default();
        assert_eq!(e.semi_major_axis(), 6_378_137.0);
        assert_float_eq!(e.semi_minor_axis(), 6_356_752.314_245, abs <= 1e-6);
        assert_float_eq!(e.eccentricity_squared(), 0.006_694_379_990_14, abs <= 1e-14);
        assert_float_eq!(e.eccentricity(), 0.081_819_190_842_62, abs <= 1e-13);
    }

    #[test]
    fn test_third_flattening() {
        let e = WGS84;
        let b = e.semi_minor_axis();
        let n = (e.semi_major_axis() - b) / (e.semi_major_axis() + b);
        assert_float_eq!(e.third_flattening(), n, abs <= 1e-15);
    }

    #[test]
    fn test_rectifying_radius() {
        // Quarter meridian of WGS84 is 10 001 965.729 m
        let quarter = WGS84.rectifying_radius() * std::f64::consts::FRAC_PI_2;
        assert_float_eq!(quarter, 10_001_965.729, abs <= 1e-3);
    }
}
