//! Sky plane pointing type and separation math.
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Pointing direction on the celestial sphere (equatorial, J2000).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct SkyCoord {
    /// Right ascension (radians)
    pub ra_rad: f64,
    /// Declination (radians)
    pub dec_rad: f64,
}

impl SkyCoord {
    /// New [SkyCoord] from right ascension and declination in radians.
    /// Values are stored as given: footprint pieces use ra = 2π to denote
    /// the eastern edge of the 0/360° meridian.
    pub fn new(ra_rad: f64, dec_rad: f64) -> Self {
        Self { ra_rad, dec_rad }
    }

    /// New [SkyCoord] from right ascension and declination in degrees.
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Self {
        Self {
            ra_rad: ra_deg.to_radians(),
            dec_rad: dec_deg.to_radians(),
        }
    }

    /// Right ascension in degrees
    pub fn ra_deg(&self) -> f64 {
        self.ra_rad.to_degrees()
    }

    /// Declination in degrees
    pub fn dec_deg(&self) -> f64 {
        self.dec_rad.to_degrees()
    }

    /// Unit vector in the equatorial frame.
    pub fn unit_vector(&self) -> Vector3<f64> {
        let (sin_ra, cos_ra) = self.ra_rad.sin_cos();
        let (sin_dec, cos_dec) = self.dec_rad.sin_cos();
        Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
    }

    /// [SkyCoord] from any non-null vector, with right ascension normalized
    /// to [0, 2π).
    pub fn from_unit_vector(v: &Vector3<f64>) -> Self {
        let ra_rad = v.y.atan2(v.x).rem_euclid(2.0 * std::f64::consts::PI);
        let dec_rad = (v.z / v.norm()).clamp(-1.0, 1.0).asin();
        Self { ra_rad, dec_rad }
    }

    /// Shortest great-circle arc to `rhs`, in radians. Well conditioned for
    /// both tiny and antipodal separations.
    pub fn separation_rad(&self, rhs: &Self) -> f64 {
        angular_separation_rad(&self.unit_vector(), &rhs.unit_vector())
    }
}

/// Shortest great-circle arc between two unit vectors (radians).
pub(crate) fn angular_separation_rad(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}

#[cfg(test)]
mod test {
    use super::SkyCoord;

    #[test]
    fn separation() {
        let origin = SkyCoord::from_degrees(0.0, 0.0);
        assert!((origin.separation_rad(&origin)).abs() < 1e-12);

        let east = SkyCoord::from_degrees(90.0, 0.0);
        assert!((origin.separation_rad(&east) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        let antipode = SkyCoord::from_degrees(180.0, 0.0);
        assert!((origin.separation_rad(&antipode) - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn unit_vector_roundtrip() {
        for (ra, dec) in [(0.0, 0.0), (123.4, -56.7), (359.9, 89.0), (42.0, 12.3)] {
            let coord = SkyCoord::from_degrees(ra, dec);
            let back = SkyCoord::from_unit_vector(&coord.unit_vector());
            assert!((coord.ra_deg() - back.ra_deg()).abs() < 1e-9);
            assert!((coord.dec_deg() - back.dec_deg()).abs() < 1e-9);
        }
    }
}
