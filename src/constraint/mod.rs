//! Observing constraints.
//!
//! Each variant is a pure function of precomputed spacecraft states and sky
//! directions; the thresholds it carries are its only state. Evaluation
//! produces a [RegardGrid] with `true` = observation permitted; a mission
//! intersects all of them, so constraint ordering never affects the result.
use crate::cfg;
use crate::grid::{RegardGrid, SkyGrid};
use crate::orbit::SpacecraftState;

mod flux;
mod limb;
mod separation;

pub use flux::{Particle, SolarActivity};

/// Closed set of observing constraint variants.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Constraint {
    /// Forbids directions closer than Earth's apparent angular radius plus
    /// `margin_rad` to the Earth center direction.
    EarthLimb {
        /// Extra margin beyond the apparent limb (radians)
        margin_rad: f64,
    },

    /// Same geometric test as [Constraint::EarthLimb], with the extra margin
    /// applied only where the nearest limb point is sunlit. The unlit limb
    /// blocks nothing beyond the disk itself.
    BrightEarthLimb {
        /// Extra margin beyond the sunlit limb (radians)
        margin_rad: f64,
    },

    /// Gates entire time steps on modeled trapped radiation flux at the
    /// spacecraft position: direction independent by construction.
    TrappedParticleFlux {
        /// Highest acceptable integral flux (cm⁻² s⁻¹)
        max_flux_cm2_s: f64,
        /// Integral channel threshold (MeV)
        energy_mev: f64,
        /// Species the thresholds apply to
        particle: Particle,
        /// Solar activity regime of the model tables
        solar: SolarActivity,
    },

    /// Forbids directions within `min_angle_rad` of the Sun, as seen from
    /// the spacecraft.
    SunSeparation {
        /// Minimum Sun separation (radians)
        min_angle_rad: f64,
    },

    /// Forbids directions within `min_angle_rad` of the Moon, as seen from
    /// the spacecraft.
    MoonSeparation {
        /// Minimum Moon separation (radians)
        min_angle_rad: f64,
    },

    /// Forbids directions within `min_angle_rad` of the galactic plane.
    GalacticLatitude {
        /// Minimum |galactic latitude| (radians)
        min_angle_rad: f64,
    },
}

impl Constraint {
    /// Parameter checks, run at mission construction so that a constraint
    /// that cannot be evaluated is rejected before any costly computation.
    pub(crate) fn validate(&self) -> Result<(), cfg::Error> {
        match self {
            Self::EarthLimb { margin_rad } | Self::BrightEarthLimb { margin_rad } => {
                if !(*margin_rad >= 0.0 && *margin_rad < std::f64::consts::PI) {
                    return Err(cfg::Error::LimbMarginRange);
                }
            },
            Self::TrappedParticleFlux {
                max_flux_cm2_s,
                energy_mev,
                ..
            } => {
                if !(*max_flux_cm2_s > 0.0) {
                    return Err(cfg::Error::NonPositiveThreshold("flux"));
                }
                if !(*energy_mev > 0.0) {
                    return Err(cfg::Error::NonPositiveThreshold("energy"));
                }
            },
            Self::SunSeparation { min_angle_rad } | Self::MoonSeparation { min_angle_rad } => {
                if !(*min_angle_rad > 0.0 && *min_angle_rad <= std::f64::consts::PI) {
                    return Err(cfg::Error::SeparationAngleRange);
                }
            },
            Self::GalacticLatitude { min_angle_rad } => {
                if !(*min_angle_rad > 0.0 && *min_angle_rad < std::f64::consts::FRAC_PI_2) {
                    return Err(cfg::Error::GalacticBandRange);
                }
            },
        }
        Ok(())
    }

    /// Evaluate over resolved spacecraft states and a sky grid:
    /// cell (t, p) is `true` when this constraint permits observing
    /// direction p at time step t.
    pub fn evaluate(&self, states: &[SpacecraftState], grid: &SkyGrid) -> RegardGrid {
        match self {
            Self::EarthLimb { margin_rad } => limb::evaluate(states, grid, *margin_rad, false),
            Self::BrightEarthLimb { margin_rad } => limb::evaluate(states, grid, *margin_rad, true),
            Self::TrappedParticleFlux {
                max_flux_cm2_s,
                energy_mev,
                particle,
                solar,
            } => flux::evaluate(states, grid, *max_flux_cm2_s, *energy_mev, *particle, *solar),
            Self::SunSeparation { min_angle_rad } => {
                separation::body(states, grid, separation::Body::Sun, *min_angle_rad)
            },
            Self::MoonSeparation { min_angle_rad } => {
                separation::body(states, grid, separation::Body::Moon, *min_angle_rad)
            },
            Self::GalacticLatitude { min_angle_rad } => {
                separation::galactic_plane(states, grid, *min_angle_rad)
            },
        }
    }
}
