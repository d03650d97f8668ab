//! Ephemeris kernel orbit source.
use std::sync::{Mutex, OnceLock};

use anise::{
    almanac::metaload::{MetaAlmanac, MetaFile},
    constants::frames::EARTH_J2000,
    prelude::{Almanac, Frame},
};
use hifitime::Epoch;
use log::info;
use nalgebra::Vector3;

use super::Error;

/// Serializes remote kernel retrieval. ANISE keeps its on-disk cache keyed
/// by file name; holding this lock across the cache check and the download
/// makes the fetch exactly-once per locator, process wide, even under
/// concurrent first use.
static FETCH_LOCK: Mutex<()> = Mutex::new(());

/// Orbit resolved from externally hosted ephemeris kernels. Kernels are
/// fetched once, lazily, on the first position query, and the loaded
/// [Almanac] is memoized for the mission lifetime. A failed fetch is not
/// memoized: the next query fetches again, under the caller's control.
pub struct SpiceOrbit {
    /// NAIF id of the body carried by the kernels
    body_id: i32,
    /// Kernel locators, in load order
    kernels: Vec<String>,
    almanac: OnceLock<Almanac>,
}

impl std::fmt::Debug for SpiceOrbit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpiceOrbit")
            .field("body_id", &self.body_id)
            .field("kernels", &self.kernels)
            .finish()
    }
}

impl SpiceOrbit {
    /// New [SpiceOrbit] for a NAIF body id and kernel locator list.
    /// The kernel set must chain the body to the Earth center.
    pub fn new(body_id: i32, kernels: Vec<String>) -> Self {
        Self {
            body_id,
            kernels,
            almanac: OnceLock::new(),
        }
    }

    /// Kernel locators, in load order.
    pub fn kernels(&self) -> &[String] {
        &self.kernels
    }

    fn almanac(&self) -> Result<&Almanac, Error> {
        if let Some(almanac) = self.almanac.get() {
            return Ok(almanac);
        }
        let guard = FETCH_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // may have been resolved while we waited on the lock
        if let Some(almanac) = self.almanac.get() {
            return Ok(almanac);
        }
        info!("fetching {} ephemeris kernel(s)", self.kernels.len());
        let files = self
            .kernels
            .iter()
            .map(|uri| MetaFile {
                uri: uri.clone(),
                crc32: None,
            })
            .collect();
        let mut meta = MetaAlmanac { files };
        let almanac = meta.process(true).map_err(Error::KernelFetch)?;
        drop(guard);
        Ok(self.almanac.get_or_init(|| almanac))
    }

    /// Geocentric position (km, J2000) at requested [Epoch]. Epochs outside
    /// the kernel coverage are rejected by the almanac query.
    pub(crate) fn position_km(&self, t: Epoch) -> Result<Vector3<f64>, Error> {
        let almanac = self.almanac()?;
        let frame = Frame::from_ephem_j2000(self.body_id);
        let state = almanac
            .transform(frame, EARTH_J2000, t, None)
            .map_err(Error::Almanac)?;
        Ok(state.radius_km)
    }
}

/// NAIF id for a body designation: a raw integer id, or one of the known
/// body names (case insensitive).
pub fn body_id(name: &str) -> Option<i32> {
    let name = name.trim();
    if let Ok(id) = name.parse::<i32>() {
        return Some(id);
    }
    match name.to_ascii_lowercase().as_str() {
        "sun" => Some(10),
        "mercury" => Some(199),
        "venus" => Some(299),
        "earth" => Some(399),
        "moon" => Some(301),
        "mars" => Some(499),
        "jupiter barycenter" => Some(5),
        "saturn barycenter" => Some(6),
        "uranus barycenter" => Some(7),
        "neptune barycenter" => Some(8),
        "tess" => Some(-95),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::body_id;

    #[test]
    fn body_designations() {
        assert_eq!(body_id("moon"), Some(301));
        assert_eq!(body_id("TESS"), Some(-95));
        assert_eq!(body_id("-95"), Some(-95));
        assert_eq!(body_id("301"), Some(301));
        assert_eq!(body_id("phobos deimos express"), None);
    }
}
