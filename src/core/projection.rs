//! Transverse Mercator projection, Krüger series to 6th order in the third flattening.
//!
//! Follows Karney (2011), "Transverse Mercator with an accuracy of a few nanometers".
//! Within a UTM zone the series is accurate to well below a millimeter.

use crate::core::constants::{FALSE_EASTING, MAX_ZONE, MIN_ZONE, UTM_SCALE_FACTOR, ZONE_WIDTH};
use crate::core::ellipsoid::{Ellipsoid, WGS84};

/// A Transverse Mercator projection about one central meridian.
///
/// Northings are measured from the equator and carry no false northing; the
/// southern-hemisphere offset is applied by the UTM layer, which knows the hemisphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercator {
    central_meridian: f64,
    k0: f64,
    false_easting: f64,
    e: f64,
    e2: f64,
    a_hat: f64,
    alpha: [f64; 6],
    beta: [f64; 6],
}

/// Central meridian of a UTM zone in degrees.
pub fn central_meridian(zone: u8) -> f64 {
    -183.0 + ZONE_WIDTH * zone as f64
}

impl TransverseMercator {
    pub fn new(ellipsoid: Ellipsoid, central_meridian: f64, k0: f64, false_easting: f64) -> Self {
        let n = ellipsoid.third_flattening();
        Self {
            central_meridian,
            k0,
            false_easting,
            e: ellipsoid.eccentricity(),
            e2: ellipsoid.eccentricity_squared(),
            a_hat: ellipsoid.rectifying_radius(),
            alpha: alpha_coefficients(n),
            beta: beta_coefficients(n),
        }
    }

    /// The WGS84 projection for a UTM zone. Zones outside 1-60 are clamped.
    pub fn utm(zone: u8) -> Self {
        let zone = zone.clamp(MIN_ZONE, MAX_ZONE);
        Self::new(WGS84, central_meridian(zone), UTM_SCALE_FACTOR, FALSE_EASTING)
    }

    pub fn central_meridian(&self) -> f64 {
        self.central_meridian
    }

    /// Projects (longitude, latitude) in degrees to (easting, northing) in meters.
    pub fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let lam = (lon - self.central_meridian).to_radians();
        let tau_prime = self.conformal_tangent(lat.to_radians().tan());
        let (sin_lam, cos_lam) = lam.sin_cos();

        let xi_prime = tau_prime.atan2(cos_lam);
        let eta_prime = (sin_lam / tau_prime.hypot(cos_lam)).asinh();

        let mut xi = xi_prime;
        let mut eta = eta_prime;
        for (j, a) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            xi += a * (k * xi_prime).sin() * (k * eta_prime).cosh();
            eta += a * (k * xi_prime).cos() * (k * eta_prime).sinh();
        }

        (
            self.false_easting + self.k0 * self.a_hat * eta,
            self.k0 * self.a_hat * xi,
        )
    }

    /// Inverse of [`forward`](Self::forward): (easting, northing) in meters to
    /// (longitude, latitude) in degrees.
    pub fn inverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        let xi = northing / (self.k0 * self.a_hat);
        let eta = (easting - self.false_easting) / (self.k0 * self.a_hat);

        let mut xi_prime = xi;
        let mut eta_prime = eta;
        for (j, b) in self.beta.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            xi_prime -= b * (k * xi).sin() * (k * eta).cosh();
            eta_prime -= b * (k * xi).cos() * (k * eta).sinh();
        }

        let sinh_eta = eta_prime.sinh();
        let (sin_xi, cos_xi) = xi_prime.sin_cos();
        let tau_prime = sin_xi / sinh_eta.hypot(cos_xi);

        let lat = self.geodetic_tangent(tau_prime).atan().to_degrees();
        let lon = self.central_meridian + sinh_eta.atan2(cos_xi).to_degrees();
        (lon, lat)
    }

    /// τ → τ′, geodetic to conformal latitude tangent.
    fn conformal_tangent(&self, tau: f64) -> f64 {
        let tau1 = tau.hypot(1.0);
        let sigma = (self.e * (self.e * tau / tau1).atanh()).sinh();
        tau * sigma.hypot(1.0) - sigma * tau1
    }

    /// τ′ → τ by Newton iteration.
    fn geodetic_tangent(&self, tau_prime: f64) -> f64 {
        let mut tau = tau_prime / (1.0 - self.e2);
        for _ in 0..20 {
            let tau1 = tau.hypot(1.0);
            let estimate = self.conformal_tangent(tau);
            let delta = (tau_prime - estimate) * (1.0 + (1.0 - self.e2) * tau * tau)
                / ((1.0 - self.e2) * tau1 * estimate.hypot(1.0));
            tau += delta;
            if delta.abs() < 1e-12 * tau.abs().max(1.0) {
                break;
            }
        }
        tau
    }
}

/// α₁..α₆, forward series
fn alpha_coefficients(n: f64) -> [f64; 6] {
    let n2 = n * n;
    let n3 = n2 * n;
    let n4 = n3 * n;
    let n5 = n4 * n;
    let n6 = n5 * n;
    [
        n / 2.0 - 2.0 / 3.0 * n2 + 5.0 / 16.0 * n3 + 41.0 / 180.0 * n4 - 127.0 / 288.0 * n5
            + 7891.0 / 37800.0 * n6,
        13.0 / 48.0 * n2 - 3.0 / 5.0 * n3 + 557.0 / 1440.0 * n4 + 281.0 / 630.0 * n5
            - 1983433.0 / 1935360.0 * n6,
        61.0 / 240.0 * n3 - 103.0 / 140.0 * n4 + 15061.0 / 26880.0 * n5 + 167603.0 / 181440.0 * n6,
        49561.0 / 161280.0 * n4 - 179.0 / 168.0 * n5 + 6601661.0 / 7257600.0 * n6,
        34729.0 / 80640.0 * n5 - 3418889.0 / 1995840.0 * n6,
        212378941.0 / 319334400.0 * n6,
    ]
}

/// β₁..β₆, inverse series
fn beta_coefficients(n: f64) -> [f64; 6] {
    let n2 = n * n;
    let n3 = n2 * n;
    let n4 = n3 * n;
    let n5 = n4 * n;
    let n6 = n5 * n;
    [
        n / 2.0 - 2.0 / 3.0 * n2 + 37.0 / 96.0 * n3 - 1.0 / 360.0 * n4 - 81.0 / 512.0 * n5
            + 96199.0 / 604800.0 * n6,
        1.0 / 48.0 * n2 + 1.0 / 15.0 * n3 - 437.0 / 1440.0 * n4 + 46.0 / 105.0 * n5
            - 1118711.0 / 3870720.0 * n6,
        17.0 / 480.0 * n3 - 37.0 / 840.0 * n4 - 209.0 / 4480.0 * n5 + 5569.0 / 90720.0 * n6,
        4397.0 / 161280.0 * n4 - 11.0 / 504.0 * n5 - 830251.0 / 7257600.0 * n6,
        4583.0 / 161280.0 * n5 - 108847.0 / 3991680.0 * n6,
        20648693.0 / 638668800.0 * n6,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn test_central_meridian() {
        assert_eq!(central_meridian(1), -177.0);
        assert_eq!(central_meridian(18), -75.0);
        assert_eq!(central_meridian(31), 3.0);
        assert_eq!(central_meridian(60), 177.0);
    }

    #[test]
    fn test_origin_of_zone() {
        let tm = TransverseMercator::utm(31);
        let (e, n) = tm.forward(3.0, 0.0);
        assert_float_eq!(e, 500_000.0, abs <= 1e-9);
        assert_float_eq!(n, 0.0, abs <= 1e-9);
    }

    #[test]
    fn test_forward_white_house() {
        let tm = TransverseMercator::utm(18);
        let (e, n) = tm.forward(-77.0365, 38.8977);
        assert_float_eq!(e, 323_394.296, abs <= 1e-3);
        assert_float_eq!(n, 4_307_395.634, abs <= 1e-3);
    }

    #[test]
    fn test_forward_empire_state() {
        let tm = TransverseMercator::utm(18);
        let (e, n) = tm.forward(-73.985278, 40.748333);
        assert_float_eq!(e, 585_664.121, abs <= 1e-3);
        assert_float_eq!(n, 4_511_315.422, abs <= 1e-3);
    }

    #[test]
    fn test_forward_alaska() {
        let tm = TransverseMercator::utm(6);
        let (e, n) = tm.forward(-149.119325194, 60.9679875497);
        assert_float_eq!(e, 385_273.02, abs <= 0.01);
        assert_float_eq!(n, 6_761_077.20, abs <= 0.01);
    }

    #[test]
    fn test_southern_northing_is_negative() {
        let tm = TransverseMercator::utm(56);
        let (_, n) = tm.forward(151.2, -33.9);
        assert!(n < 0.0);
    }

    #[test]
    fn test_roundtrip_across_zone() {
        let tm = TransverseMercator::utm(33);
        for lat in [-79.5, -45.0, -0.5, 0.0, 12.25, 55.0, 83.5] {
            for dlon in [-3.0, -1.5, 0.0, 2.0, 3.0] {
                let lon = tm.central_meridian() + dlon;
                let (e, n) = tm.forward(lon, lat);
                let (lon2, lat2) = tm.inverse(e, n);
                assert_float_eq!(lon2, lon, abs <= 1e-9);
                assert_float_eq!(lat2, lat, abs <= 1e-9);
            }
        }
    }

    #[test]
    fn test_clamped_zone() {
        assert_eq!(TransverseMercator::utm(0), TransverseMercator::utm(1));
        assert_eq!(TransverseMercator::utm(61), TransverseMercator::utm(60));
    }
}
