//! Mission aggregate: one orbit, one field of view, an ordered constraint
//! set and the slew envelope, exposed to the external scheduler.
use hifitime::{Duration, Epoch, Unit};
use log::{debug, info};
use rayon::prelude::*;

use crate::cfg::{self, MissionConfig, OrbitConfig};
use crate::constraint::{Constraint, Particle, SolarActivity};
use crate::error::Error;
use crate::fov::Fov;
use crate::grid::{RegardGrid, SkyGrid};
use crate::orbit::{body_id, Orbit, SpacecraftState, SpiceOrbit, TleOrbit};
use crate::sky::SkyCoord;
use crate::slew;

// 625 km circular sun-synchronous orbit, epoch 2026-01-01T00:00:00 UTC
const SUNSYNC_625KM_TLE: (&str, &str) = (
    "1 99990U 26001A   26001.00000000  .00000000  00000-0  00000-0 0  9994",
    "2 99990  97.8000 100.0000 0001000  90.0000 270.0000 14.81370966000018",
);

// geosynchronous orbit, epoch 2026-01-01T00:00:00 UTC
const GEOSYNC_TLE: (&str, &str) = (
    "1 99991U 26002A   26001.00000000  .00000000  00000-0  00000-0 0  9996",
    "2 99991   0.0500 260.0000 0000500 180.0000 180.0000  1.00271000000017",
);

/// Immutable mission description. Built and validated once at startup,
/// then freely shared across concurrent evaluations: nothing here mutates.
#[derive(Debug)]
pub struct Mission {
    /// Ordered observing constraints; the field of regard is their
    /// intersection, so the order never affects the result.
    pub constraints: Vec<Constraint>,

    /// Field of view
    pub fov: Fov,

    /// The orbit
    pub orbit: Orbit,

    /// Minimum overhead between observations (readout and settling time)
    pub min_overhead: Duration,

    /// Maximum angular velocity for slews (rad/s)
    pub max_angular_velocity_rad_s: f64,

    /// Maximum angular acceleration for slews (rad/s²)
    pub max_angular_acceleration_rad_s2: f64,
}

impl Mission {
    /// Build and validate a [Mission]. Every parameter issue is raised
    /// here, before any costly evaluation.
    pub fn new(cfg: MissionConfig) -> Result<Self, Error> {
        if !(cfg.max_angular_velocity_deg_s > 0.0) {
            return Err(cfg::Error::InvalidAngularVelocity.into());
        }
        if !(cfg.max_angular_acceleration_deg_s2 > 0.0) {
            return Err(cfg::Error::InvalidAngularAcceleration.into());
        }
        if !(cfg.min_overhead_s >= 0.0) {
            return Err(cfg::Error::NegativeOverhead.into());
        }

        let constraints: Vec<Constraint> =
            cfg.constraints.iter().map(|config| config.build()).collect();
        for constraint in &constraints {
            constraint.validate()?;
        }

        let fov = cfg.fov.build();
        fov.validate()?;

        let orbit = match &cfg.orbit {
            OrbitConfig::Tle { path } => Orbit::Tle(TleOrbit::from_path(path)?),
            OrbitConfig::TleLines { line1, line2 } => {
                Orbit::Tle(TleOrbit::from_lines(line1, line2))
            },
            OrbitConfig::Spice { body, kernels } => {
                if kernels.is_empty() {
                    return Err(cfg::Error::EmptyKernelList.into());
                }
                let id = body_id(body).ok_or_else(|| cfg::Error::UnknownBody(body.clone()))?;
                Orbit::Spice(SpiceOrbit::new(id, kernels.clone()))
            },
        };

        let orbit_kind = match &orbit {
            Orbit::Tle(_) => "TLE",
            Orbit::Spice(_) => "SPICE",
        };
        info!(
            "mission ready: {} constraint(s), {} orbit",
            constraints.len(),
            orbit_kind
        );
        Ok(Self {
            constraints,
            fov,
            orbit,
            min_overhead: cfg.min_overhead_s * Unit::Second,
            max_angular_velocity_rad_s: cfg.max_angular_velocity_deg_s.to_radians(),
            max_angular_acceleration_rad_s2: cfg.max_angular_acceleration_deg_s2.to_radians(),
        })
    }

    /// Field of regard over `times`, at the grid's native resolution:
    /// cell (t, p) is `true` when every constraint permits observing pixel
    /// p at time step t.
    ///
    /// `jobs` workers evaluate contiguous chunks of the time axis (0 = one
    /// per core). Orbit state and any lazily fetched kernel are fully
    /// resolved before dispatch, and the result is identical for any worker
    /// count.
    pub fn get_field_of_regard(
        &self,
        grid: &SkyGrid,
        times: &[Epoch],
        jobs: usize,
    ) -> Result<RegardGrid, Error> {
        let states = self.orbit.states(times)?;

        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
        let workers = pool.current_num_threads().max(1);
        let chunk_len = states.len().div_ceil(workers).max(1);
        debug!(
            "evaluating {} × {} cells on {} worker(s)",
            states.len(),
            grid.npix(),
            workers
        );

        let parts: Vec<RegardGrid> = pool.install(|| {
            states
                .par_chunks(chunk_len)
                .map(|chunk| self.evaluate_chunk(chunk, grid))
                .collect()
        });
        Ok(RegardGrid::concat_times(parts, grid.npix()))
    }

    fn evaluate_chunk(&self, states: &[SpacecraftState], grid: &SkyGrid) -> RegardGrid {
        let mut combined = RegardGrid::filled(states.len(), grid.npix(), true);
        for constraint in &self.constraints {
            combined.intersect(&constraint.evaluate(states, grid));
        }
        combined
    }

    /// Dead time before an exposure at `to`, after an exposure at `from`:
    /// the slew transit bound, floored by the fixed overhead. The floor
    /// applies even to a zero-distance repoint (repeated exposures of the
    /// same field).
    pub fn overhead(&self, from: SkyCoord, to: SkyCoord) -> Result<Duration, Error> {
        let separation_rad = slew::slew_separation(from, to)?;
        let transit = slew::slew_time(
            separation_rad,
            self.max_angular_velocity_rad_s,
            self.max_angular_acceleration_rad_s2,
        ) * Unit::Second;
        Ok(if transit > self.min_overhead {
            transit
        } else {
            self.min_overhead
        })
    }

    /// Dorado: 625 km sun-synchronous ultraviolet survey mission.
    ///
    /// Trapped proton channel after the Fermi LAT belt study; the electron
    /// channel removes the polar horns. Earth, Sun and Moon margins follow
    /// the Swift technical handbook values.
    pub fn dorado() -> Result<Self, Error> {
        Self::new(MissionConfig {
            constraints: vec![
                cfg::ConstraintConfig::TrappedParticleFlux {
                    max_flux_cm2_s: 1.0,
                    energy_mev: 20.0,
                    particle: Particle::Proton,
                    solar: SolarActivity::Max,
                },
                cfg::ConstraintConfig::TrappedParticleFlux {
                    max_flux_cm2_s: 100.0,
                    energy_mev: 1.0,
                    particle: Particle::Electron,
                    solar: SolarActivity::Max,
                },
                cfg::ConstraintConfig::BrightEarthLimb { margin_deg: 28.0 },
                cfg::ConstraintConfig::EarthLimb { margin_deg: 6.0 },
                cfg::ConstraintConfig::SunSeparation { min_angle_deg: 46.0 },
                cfg::ConstraintConfig::MoonSeparation { min_angle_deg: 23.0 },
                cfg::ConstraintConfig::GalacticLatitude { min_angle_deg: 10.0 },
            ],
            fov: cfg::FovConfig {
                width_deg: 7.1,
                height_deg: None,
            },
            orbit: OrbitConfig::TleLines {
                line1: SUNSYNC_625KM_TLE.0.to_string(),
                line2: SUNSYNC_625KM_TLE.1.to_string(),
            },
            min_overhead_s: 0.0,
            max_angular_velocity_deg_s: 0.872,
            max_angular_acceleration_deg_s2: 0.244,
        })
    }

    /// ULTRASAT: wide field ultraviolet transient explorer in a
    /// geosynchronous orbit.
    pub fn ultrasat() -> Result<Self, Error> {
        Self::new(MissionConfig {
            constraints: vec![
                cfg::ConstraintConfig::EarthLimb { margin_deg: 28.0 },
                cfg::ConstraintConfig::SunSeparation { min_angle_deg: 46.0 },
                cfg::ConstraintConfig::MoonSeparation { min_angle_deg: 23.0 },
                cfg::ConstraintConfig::GalacticLatitude { min_angle_deg: 10.0 },
            ],
            fov: cfg::FovConfig {
                width_deg: 14.1,
                height_deg: None,
            },
            orbit: OrbitConfig::TleLines {
                line1: GEOSYNC_TLE.0.to_string(),
                line2: GEOSYNC_TLE.1.to_string(),
            },
            min_overhead_s: 0.0,
            max_angular_velocity_deg_s: 0.872,
            max_angular_acceleration_deg_s2: 0.244,
        })
    }

    /// UVEX: ultraviolet explorer on a TESS-like lunar resonant orbit,
    /// resolved from published ephemeris kernels. No galactic plane
    /// constraint: the mission surveys the plane.
    pub fn uvex() -> Result<Self, Error> {
        Self::new(MissionConfig {
            constraints: vec![
                cfg::ConstraintConfig::EarthLimb { margin_deg: 25.0 },
                cfg::ConstraintConfig::SunSeparation { min_angle_deg: 46.0 },
                cfg::ConstraintConfig::MoonSeparation { min_angle_deg: 25.0 },
            ],
            fov: cfg::FovConfig {
                width_deg: 3.3,
                height_deg: None,
            },
            orbit: OrbitConfig::Spice {
                body: "tess".to_string(),
                kernels: vec![
                    "https://archive.stsci.edu/missions/tess/models/TESS_EPH_PRE_LONG_2021252_21.bsp".to_string(),
                    "https://naif.jpl.nasa.gov/pub/naif/generic_kernels/pck/earth_latest_high_prec.bpc".to_string(),
                ],
            },
            min_overhead_s: 0.0,
            max_angular_velocity_deg_s: 0.872,
            max_angular_acceleration_deg_s2: 0.244,
        })
    }
}
