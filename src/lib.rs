#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Internal convention: angles in radians (`_rad`), distances in kilometers
// (`_km`), rates in `_rad_s` / `_rad_s2`. Degrees (`_deg`) appear only in the
// serde configuration layer and in display helpers. Instants are
// [hifitime::Epoch], durations are [hifitime::Duration].

// private modules
mod cfg;
mod constants;
mod constraint;
mod ephem;
mod error;
mod fov;
mod frames;
mod grid;
mod mission;
mod orbit;
mod schedule;
mod sky;
mod slew;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::cfg::{
        ConstraintConfig, Error as ConfigError, FovConfig, MissionConfig, OrbitConfig,
    };
    pub use crate::constraint::{Constraint, Particle, SolarActivity};
    pub use crate::fov::Fov;
    pub use crate::grid::{PixelOrdering, RegardGrid, SkyGrid};
    pub use crate::mission::Mission;
    pub use crate::orbit::{Error as OrbitError, Orbit, SpacecraftState, SpiceOrbit, TleOrbit};
    pub use crate::schedule::ExposureRecord;
    pub use crate::sky::SkyCoord;
    pub use crate::slew::{slew_separation, slew_time, Error as GeometryError};
    // re-export
    pub use hifitime::{Duration, Epoch, TimeScale, Unit};
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
