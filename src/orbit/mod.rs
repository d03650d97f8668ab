//! Spacecraft orbit sources.
use anise::errors::AlmanacError;
use hifitime::Epoch;
use nalgebra::Vector3;
use thiserror::Error as ThisError;

use crate::{ephem, frames};

mod spice;
mod tle;

pub use spice::{body_id, SpiceOrbit};
pub use tle::TleOrbit;

/// Orbit data errors: the requested state exists but could not be obtained.
/// Never retried here; the caller decides whether to retry or abort.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Element set rejected by the parser: wrong line length, field format
    /// or checksum.
    #[error("invalid element set: {0}")]
    ElementSet(#[from] sgp4::ElementsError),

    /// TLE line pair rejected by the parser: wrong line length, field format
    /// or checksum.
    #[error("invalid TLE: {0}")]
    Tle(#[from] sgp4::TleError),

    /// SGP4 propagation failure (decayed or non elliptic state).
    #[error("propagation failure: {0}")]
    Propagation(#[from] sgp4::Error),

    /// Element set file could not be read.
    #[error("failed to read element set: {0}")]
    ElementSetIo(#[from] std::io::Error),

    /// Element set file holds no `1 `/`2 ` line pair.
    #[error("no element set found in file")]
    ElementSetMissing,

    /// Requested [Epoch] too far from the element set epoch: element sets
    /// are not extrapolated indefinitely.
    #[error("{t} outside the ±{window_days} day validity window around {epoch}")]
    OutsideValidityWindow {
        t: Epoch,
        epoch: Epoch,
        window_days: f64,
    },

    /// Remote kernel retrieval failed: fetch error, checksum mismatch or
    /// local storage issue.
    #[error("kernel retrieval issue: {0}")]
    KernelFetch(AlmanacError),

    /// Almanac query failure, including epochs outside the covered interval.
    #[error("almanac issue: {0}")]
    Almanac(AlmanacError),
}

/// Resolved spacecraft and solar system geometry at one instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpacecraftState {
    /// [Epoch] of this state
    pub epoch: Epoch,
    /// Geocentric spacecraft position (km, J2000)
    pub position_km: Vector3<f64>,
    /// Earth fixed spacecraft position (km), for position keyed lookups
    pub position_ecef_km: Vector3<f64>,
    /// Geocentric Sun position (km, J2000)
    pub sun_km: Vector3<f64>,
    /// Geocentric Moon position (km, J2000)
    pub moon_km: Vector3<f64>,
}

/// Closed set of supported orbit sources.
#[derive(Debug)]
pub enum Orbit {
    /// NORAD two line element set, SGP4 propagation
    Tle(TleOrbit),
    /// Externally hosted ephemeris kernels, fetched by URL
    Spice(SpiceOrbit),
}

impl Orbit {
    /// Resolve spacecraft and Sun/Moon geometry at each requested [Epoch],
    /// in request order. The first query parses the element set or fetches
    /// the kernels; later queries reuse them.
    pub fn states(&self, times: &[Epoch]) -> Result<Vec<SpacecraftState>, Error> {
        times.iter().map(|t| self.state_at(*t)).collect()
    }

    fn state_at(&self, t: Epoch) -> Result<SpacecraftState, Error> {
        let position_km = match self {
            Self::Tle(tle) => tle.position_km(t)?,
            Self::Spice(spice) => spice.position_km(t)?,
        };
        Ok(SpacecraftState {
            epoch: t,
            position_ecef_km: frames::j2000_to_ecef(t) * position_km,
            position_km,
            sun_km: ephem::sun_position_km(t)?,
            moon_km: ephem::moon_position_km(t)?,
        })
    }
}
