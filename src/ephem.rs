//! Shared almanac and solar system geometry.
use std::sync::OnceLock;

use anise::{
    constants::frames::{EARTH_J2000, MOON_J2000, SUN_J2000},
    prelude::Almanac,
};
use hifitime::Epoch;
use log::debug;
use nalgebra::Vector3;

use crate::orbit::Error;

static ALMANAC: OnceLock<Almanac> = OnceLock::new();

/// Embedded [Almanac], built once per process and shared by every mission.
pub(crate) fn almanac() -> Result<&'static Almanac, Error> {
    if let Some(almanac) = ALMANAC.get() {
        return Ok(almanac);
    }
    let built = Almanac::until_2035().map_err(Error::Almanac)?;
    debug!("embedded almanac ready");
    Ok(ALMANAC.get_or_init(|| built))
}

/// Geocentric Sun position (km, J2000) at requested [Epoch].
pub(crate) fn sun_position_km(t: Epoch) -> Result<Vector3<f64>, Error> {
    let state = almanac()?
        .transform(SUN_J2000, EARTH_J2000, t, None)
        .map_err(Error::Almanac)?;
    Ok(state.radius_km)
}

/// Geocentric Moon position (km, J2000) at requested [Epoch].
pub(crate) fn moon_position_km(t: Epoch) -> Result<Vector3<f64>, Error> {
    let state = almanac()?
        .transform(MOON_J2000, EARTH_J2000, t, None)
        .map_err(Error::Almanac)?;
    Ok(state.radius_km)
}

#[cfg(test)]
mod test {
    use super::*;
    use hifitime::Epoch;

    #[test]
    fn sun_moon_geometry() {
        let t = Epoch::from_gregorian_utc_at_midnight(2026, 1, 1);

        let sun_km = sun_position_km(t).unwrap();
        let au_km = 149_597_870.7;
        let dist = sun_km.norm();
        assert!(
            (dist / au_km - 1.0).abs() < 0.05,
            "Sun at {} km is not ~1 au",
            dist
        );

        let moon_km = moon_position_km(t).unwrap();
        let dist = moon_km.norm();
        assert!(
            (356_000.0..407_000.0).contains(&dist),
            "Moon at {} km out of range",
            dist
        );
    }
}
