//! Slew kinematics: angular separation and the bounded acceleration,
//! bounded velocity transit time bound.
use thiserror::Error as ThisError;

use crate::sky::SkyCoord;

/// Degenerate pointing geometry. Exactly antipodal pointings are NOT an
/// error: their separation resolves to π by the documented tie-break.
#[derive(Debug, PartialEq, ThisError)]
pub enum Error {
    /// Pointing coordinates must be finite.
    #[error("non finite pointing coordinates")]
    NonFinite,
}

/// Shortest great-circle arc between two pointings (radians).
///
/// Exactly antipodal pointings have no unique slew azimuth; the separation
/// itself is still well defined and resolves to the maximum-separation case,
/// π, without raising.
pub fn slew_separation(a: SkyCoord, b: SkyCoord) -> Result<f64, Error> {
    if !(a.ra_rad.is_finite()
        && a.dec_rad.is_finite()
        && b.ra_rad.is_finite()
        && b.dec_rad.is_finite())
    {
        return Err(Error::NonFinite);
    }
    Ok(a.separation_rad(&b))
}

/// Minimum transit time (seconds) to cover `separation_rad` from rest to
/// rest, under angular velocity and acceleration bounds.
///
/// Below `2·d_acc` with `d_acc = v²/(2a)` the profile is triangular (peak
/// velocity is never reached); above it, trapezoidal. Both expressions agree
/// exactly at the crossover.
pub fn slew_time(
    separation_rad: f64,
    max_velocity_rad_s: f64,
    max_acceleration_rad_s2: f64,
) -> f64 {
    let d_acc = max_velocity_rad_s * max_velocity_rad_s / (2.0 * max_acceleration_rad_s2);
    if separation_rad <= 2.0 * d_acc {
        2.0 * (separation_rad / max_acceleration_rad_s2).sqrt()
    } else {
        separation_rad / max_velocity_rad_s + max_velocity_rad_s / max_acceleration_rad_s2
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sky::SkyCoord;
    use rand::{rngs::SmallRng, Rng, SeedableRng};
    use rstest::rstest;

    #[test]
    fn triangular_closed_form() {
        // d_acc ≈ 1.56° >> 0.1°: triangular branch
        let time_s = slew_time(
            0.2_f64.to_radians(),
            0.872_f64.to_radians(),
            0.244_f64.to_radians(),
        );
        let expected = 2.0 * (0.2_f64 / 0.244).sqrt();
        assert!((time_s - expected).abs() < 1e-12, "{} vs {}", time_s, expected);
    }

    #[test]
    fn branches_agree_at_crossover() {
        let (v, a) = (0.872_f64.to_radians(), 0.244_f64.to_radians());
        let crossover = v * v / a; // 2·d_acc
        let triangular = 2.0 * (crossover / a).sqrt();
        let trapezoidal = crossover / v + v / a;
        assert!((triangular - trapezoidal).abs() < 1e-12);
        assert!((slew_time(crossover, v, a) - triangular).abs() < 1e-12);
    }

    #[rstest]
    #[case(0.872, 0.244)]
    #[case(0.1, 0.02)]
    #[case(2.0, 5.0)]
    fn monotonic_in_separation(#[case] v_deg_s: f64, #[case] a_deg_s2: f64) {
        let (v, a) = (v_deg_s.to_radians(), a_deg_s2.to_radians());
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            let s1: f64 = rng.random_range(0.0..std::f64::consts::PI);
            let s2: f64 = rng.random_range(0.0..std::f64::consts::PI);
            let (lo, hi) = if s1 <= s2 { (s1, s2) } else { (s2, s1) };
            assert!(slew_time(lo, v, a) <= slew_time(hi, v, a) + 1e-12);
        }
    }

    #[test]
    fn zero_separation_is_free() {
        assert_eq!(slew_time(0.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn antipodal_tie_break() {
        let a = SkyCoord::from_degrees(10.0, 20.0);
        let b = SkyCoord::from_degrees(190.0, -20.0);
        let sep = slew_separation(a, b).unwrap();
        assert!((sep - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn non_finite_rejected() {
        let a = SkyCoord::new(f64::NAN, 0.0);
        let b = SkyCoord::from_degrees(0.0, 0.0);
        assert_eq!(slew_separation(a, b), Err(Error::NonFinite));
    }
}
