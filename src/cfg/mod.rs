//! Mission configuration.
//!
//! The configuration layer speaks boundary units: degrees for angles,
//! seconds for durations, cm⁻²s⁻¹ / MeV for the flux channels. Everything
//! is converted to the internal radian convention when the mission is built.
use thiserror::Error as ThisError;

#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::constraint::{Constraint, Particle, SolarActivity};
use crate::fov::Fov;

/// Configuration Error: invalid mission parameters, raised at construction
/// and never at evaluation time.
#[derive(Debug, PartialEq, ThisError)]
pub enum Error {
    /// Slew velocity bound must be strictly positive.
    #[error("max angular velocity must be strictly positive")]
    InvalidAngularVelocity,

    /// Slew acceleration bound must be strictly positive.
    #[error("max angular acceleration must be strictly positive")]
    InvalidAngularAcceleration,

    /// The fixed overhead is a dead time: it cannot be negative.
    #[error("min overhead must be non negative")]
    NegativeOverhead,

    /// Flux / energy thresholds must be strictly positive.
    #[error("{0} threshold must be strictly positive")]
    NonPositiveThreshold(&'static str),

    /// Sun/Moon separation angles must lie within (0, π].
    #[error("separation angle must lie within (0, π]")]
    SeparationAngleRange,

    /// Galactic latitude bands must lie within (0, π/2).
    #[error("galactic latitude band must lie within (0, π/2)")]
    GalacticBandRange,

    /// Limb margins must be non negative and below π.
    #[error("limb margin must be non negative and below π")]
    LimbMarginRange,

    /// Field of view half-widths must lie within (0, π/2).
    #[error("field of view half width must lie within (0, π/2)")]
    FovRange,

    /// An ephemeris orbit needs at least one kernel locator.
    #[error("ephemeris orbit requires at least one kernel locator")]
    EmptyKernelList,

    /// Ephemeris body is neither a NAIF integer nor a known body name.
    #[error("unknown ephemeris body \"{0}\"")]
    UnknownBody(String),
}

/// One observing constraint, thresholds in boundary units.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ConstraintConfig {
    /// Earth limb avoidance margin (degrees)
    EarthLimb { margin_deg: f64 },
    /// Sunlit Earth limb avoidance margin (degrees)
    BrightEarthLimb { margin_deg: f64 },
    /// Trapped particle flux gate
    TrappedParticleFlux {
        /// Highest acceptable integral flux (cm⁻² s⁻¹)
        max_flux_cm2_s: f64,
        /// Integral channel threshold (MeV)
        energy_mev: f64,
        /// Species
        particle: Particle,
        /// Solar activity regime
        solar: SolarActivity,
    },
    /// Minimum Sun separation (degrees)
    SunSeparation { min_angle_deg: f64 },
    /// Minimum Moon separation (degrees)
    MoonSeparation { min_angle_deg: f64 },
    /// Minimum |galactic latitude| (degrees)
    GalacticLatitude { min_angle_deg: f64 },
}

impl ConstraintConfig {
    pub(crate) fn build(&self) -> Constraint {
        match self {
            Self::EarthLimb { margin_deg } => Constraint::EarthLimb {
                margin_rad: margin_deg.to_radians(),
            },
            Self::BrightEarthLimb { margin_deg } => Constraint::BrightEarthLimb {
                margin_rad: margin_deg.to_radians(),
            },
            Self::TrappedParticleFlux {
                max_flux_cm2_s,
                energy_mev,
                particle,
                solar,
            } => Constraint::TrappedParticleFlux {
                max_flux_cm2_s: *max_flux_cm2_s,
                energy_mev: *energy_mev,
                particle: *particle,
                solar: *solar,
            },
            Self::SunSeparation { min_angle_deg } => Constraint::SunSeparation {
                min_angle_rad: min_angle_deg.to_radians(),
            },
            Self::MoonSeparation { min_angle_deg } => Constraint::MoonSeparation {
                min_angle_rad: min_angle_deg.to_radians(),
            },
            Self::GalacticLatitude { min_angle_deg } => Constraint::GalacticLatitude {
                min_angle_rad: min_angle_deg.to_radians(),
            },
        }
    }
}

/// Field of view shape: full width(s) in degrees, square when `height_deg`
/// is left out.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct FovConfig {
    /// Full width (degrees)
    pub width_deg: f64,
    /// Full height (degrees), defaults to `width_deg`
    #[cfg_attr(feature = "serde", serde(default))]
    pub height_deg: Option<f64>,
}

impl FovConfig {
    pub(crate) fn build(&self) -> Fov {
        let width_rad = self.width_deg.to_radians();
        let height_rad = self.height_deg.unwrap_or(self.width_deg).to_radians();
        Fov::from_half_widths(width_rad / 2.0, height_rad / 2.0)
    }
}

/// Orbit source.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum OrbitConfig {
    /// Element set file path
    Tle { path: String },
    /// Inline element set
    TleLines { line1: String, line2: String },
    /// Ephemeris body + kernel locators
    Spice { body: String, kernels: Vec<String> },
}

fn default_max_angular_velocity_deg_s() -> f64 {
    0.872
}

fn default_max_angular_acceleration_deg_s2() -> f64 {
    0.244
}

/// Mission construction input.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct MissionConfig {
    /// Ordered observing constraint set
    pub constraints: Vec<ConstraintConfig>,

    /// Field of view shape
    pub fov: FovConfig,

    /// Orbit source
    pub orbit: OrbitConfig,

    /// Fixed dead time between observations (seconds): readout and settling
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_overhead_s: f64,

    /// Maximum slew angular velocity (degrees/s)
    #[cfg_attr(
        feature = "serde",
        serde(default = "default_max_angular_velocity_deg_s")
    )]
    pub max_angular_velocity_deg_s: f64,

    /// Maximum slew angular acceleration (degrees/s²)
    #[cfg_attr(
        feature = "serde",
        serde(default = "default_max_angular_acceleration_deg_s2")
    )]
    pub max_angular_acceleration_deg_s2: f64,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn constraint_conversion() {
        let constraint = ConstraintConfig::SunSeparation {
            min_angle_deg: 46.0,
        }
        .build();
        match constraint {
            Constraint::SunSeparation { min_angle_rad } => {
                assert!((min_angle_rad - 46_f64.to_radians()).abs() < 1e-12);
            },
            other => panic!("unexpected constraint {:?}", other),
        }
    }

    #[test]
    fn square_fov_by_default() {
        let fov = FovConfig {
            width_deg: 7.1,
            height_deg: None,
        }
        .build();
        let (half_lon, half_lat) = fov.half_widths_rad();
        assert!((half_lon - half_lat).abs() < 1e-12);
        assert!((half_lon - 3.55_f64.to_radians()).abs() < 1e-12);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parses_json_config() {
        let cfg: MissionConfig = serde_json::from_str(
            r#"{
                "constraints": [
                    {"type": "earth_limb", "margin_deg": 6.0},
                    {"type": "trapped_particle_flux",
                     "max_flux_cm2_s": 1.0, "energy_mev": 20.0,
                     "particle": "proton", "solar": "max"},
                    {"type": "sun_separation", "min_angle_deg": 46.0}
                ],
                "fov": {"width_deg": 7.1},
                "orbit": {"type": "tle", "path": "orbit.tle"}
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.constraints.len(), 3);
        assert_eq!(cfg.min_overhead_s, 0.0);
        assert_eq!(cfg.max_angular_velocity_deg_s, 0.872);
        match &cfg.constraints[1] {
            ConstraintConfig::TrappedParticleFlux {
                particle, solar, ..
            } => {
                assert_eq!(*particle, Particle::Proton);
                assert_eq!(*solar, SolarActivity::Max);
            },
            other => panic!("unexpected constraint {:?}", other),
        }
    }
}
