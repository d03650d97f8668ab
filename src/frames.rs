//! Reference frame rotations: Earth rotation (GMST), IAU-76 precession for
//! the TEME output of the propagator, and the fixed equatorial → galactic
//! rotation.
use hifitime::Epoch;
use nalgebra::{Matrix3, Vector3};

use crate::constants::ARCSEC_TO_RAD;

/// J2000 reference Julian date
const JD_J2000: f64 = 2451545.0;

/// Equatorial (J2000) → galactic rotation, rows = galactic axes.
const EQ_TO_GAL: [[f64; 3]; 3] = [
    [-0.0548755604162154, -0.8734370902348850, -0.4838350155487132],
    [0.4941094278755837, -0.4448296299600112, 0.7469822444972189],
    [-0.8676661490190047, -0.1980763734312015, 0.4559837761750669],
];

/// Coordinate rotation about the y axis.
fn rot2(angle_rad: f64) -> Matrix3<f64> {
    let (s, c) = angle_rad.sin_cos();
    Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c)
}

/// Coordinate rotation about the z axis.
fn rot3(angle_rad: f64) -> Matrix3<f64> {
    let (s, c) = angle_rad.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

/// Julian centuries since J2000 at requested [Epoch].
fn centuries_since_j2000(t: Epoch) -> f64 {
    (t.to_jde_utc_days() - JD_J2000) / 36525.0
}

/// Greenwich mean sidereal time (radians), IAU-82 expression.
pub(crate) fn gmst_rad(t: Epoch) -> f64 {
    let d = t.to_jde_utc_days() - JD_J2000;
    let tc = d / 36525.0;
    let gmst_deg =
        280.46061837 + 360.98564736629 * d + 0.000387933 * tc * tc - tc * tc * tc / 38710000.0;
    gmst_deg.to_radians().rem_euclid(2.0 * std::f64::consts::PI)
}

/// TEME (mean equinox of date) → J2000, IAU-76 precession angles. The
/// equation of the equinoxes is neglected: the residual is far below any
/// constraint margin handled here.
pub(crate) fn teme_to_j2000(t: Epoch) -> Matrix3<f64> {
    let tc = centuries_since_j2000(t);
    let zeta = (2306.2181 * tc + 0.30188 * tc * tc + 0.017998 * tc * tc * tc) * ARCSEC_TO_RAD;
    let theta = (2004.3109 * tc - 0.42665 * tc * tc - 0.041833 * tc * tc * tc) * ARCSEC_TO_RAD;
    let z = (2306.2181 * tc + 1.09468 * tc * tc + 0.018203 * tc * tc * tc) * ARCSEC_TO_RAD;
    rot3(zeta) * rot2(-theta) * rot3(z)
}

/// J2000 → Earth fixed, through the precessed frame of date and GMST.
/// Polar motion and nutation are neglected: consumers are coarse position
/// keyed lookups, not pointing solutions.
pub(crate) fn j2000_to_ecef(t: Epoch) -> Matrix3<f64> {
    rot3(gmst_rad(t)) * teme_to_j2000(t).transpose()
}

/// Galactic latitude of an equatorial J2000 unit vector (radians).
pub(crate) fn galactic_latitude_rad(dir: &Vector3<f64>) -> f64 {
    let row = EQ_TO_GAL[2];
    let sin_b = row[0] * dir.x + row[1] * dir.y + row[2] * dir.z;
    sin_b.clamp(-1.0, 1.0).asin()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sky::SkyCoord;
    use hifitime::Epoch;

    #[test]
    fn precession_identity_at_j2000() {
        let t = Epoch::from_gregorian_utc(2000, 1, 1, 12, 0, 0, 0);
        let p = teme_to_j2000(t);
        let delta = (p - nalgebra::Matrix3::identity()).norm();
        assert!(delta < 1e-6, "precession at J2000 should vanish: {}", delta);
    }

    #[test]
    fn precession_magnitude_2026() {
        // ~0.36° equinox drift accumulated over 26 years
        let t = Epoch::from_gregorian_utc_at_midnight(2026, 1, 1);
        let x = nalgebra::Vector3::new(1.0, 0.0, 0.0);
        let rotated = teme_to_j2000(t) * x;
        let angle = crate::sky::angular_separation_rad(&x, &rotated).to_degrees();
        assert!(angle > 0.2 && angle < 0.5, "unexpected drift: {}°", angle);
    }

    #[test]
    fn gmst_at_j2000() {
        let t = Epoch::from_gregorian_utc(2000, 1, 1, 12, 0, 0, 0);
        let gmst_deg = gmst_rad(t).to_degrees();
        assert!((gmst_deg - 280.46061837).abs() < 0.01, "gmst: {}", gmst_deg);
    }

    #[test]
    fn galactic_pole_and_center() {
        // north galactic pole (J2000)
        let pole = SkyCoord::from_degrees(192.859508, 27.128336).unit_vector();
        assert!((galactic_latitude_rad(&pole).to_degrees() - 90.0).abs() < 0.01);

        // galactic center direction lies in the plane
        let center = SkyCoord::from_degrees(266.405, -28.936).unit_vector();
        assert!(galactic_latitude_rad(&center).to_degrees().abs() < 0.1);
    }
}
