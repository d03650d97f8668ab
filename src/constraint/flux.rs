//! Trapped particle flux: an opaque lookup keyed by Earth fixed position,
//! channel energy, species and solar activity regime.
//!
//! The model is an eccentric-dipole shell parametrization: the offset dipole
//! L value and relative field strength B/B0 feed a baked two-belt table.
//! Coarse by design, it reproduces the structures the constraint cares
//! about: the inner proton belt reaching down over the South Atlantic, and
//! the outer electron belt horns at high latitude.
use log::debug;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::constants::EARTH_EQUATORIAL_RADIUS_KM;
use crate::grid::{RegardGrid, SkyGrid};
use crate::orbit::SpacecraftState;

/// Trapped particle species carried by the flux tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Particle {
    /// Inner belt protons
    Proton,
    /// Inner and outer belt electrons
    Electron,
}

/// Solar activity regime of the flux tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SolarActivity {
    /// Solar minimum tables
    Min,
    /// Solar maximum tables
    Max,
}

/// One radiation belt of the parametric table.
struct Belt {
    /// Dipole shell of peak flux
    l_peak: f64,
    /// Gaussian width in L
    l_width: f64,
    /// Integral spectrum e-folding energy (MeV)
    e_fold_mev: f64,
    /// Off-equator suppression scale, in (B/B0 - 1)
    mirror_scale: f64,
    /// Peak integral flux at solar minimum (cm⁻² s⁻¹)
    flux_solar_min: f64,
    /// Peak integral flux at solar maximum (cm⁻² s⁻¹)
    flux_solar_max: f64,
}

const PROTON_BELTS: &[Belt] = &[Belt {
    l_peak: 1.5,
    l_width: 0.25,
    e_fold_mev: 25.0,
    mirror_scale: 0.25,
    flux_solar_min: 1.5e5,
    flux_solar_max: 1.0e5,
}];

const ELECTRON_BELTS: &[Belt] = &[
    Belt {
        l_peak: 1.45,
        l_width: 0.25,
        e_fold_mev: 0.6,
        mirror_scale: 0.3,
        flux_solar_min: 5.0e6,
        flux_solar_max: 1.0e7,
    },
    // outer belt: wide mirror scale keeps the polar horns populated at
    // low altitude
    Belt {
        l_peak: 4.6,
        l_width: 0.9,
        e_fold_mev: 0.35,
        mirror_scale: 40.0,
        flux_solar_min: 8.0e6,
        flux_solar_max: 2.0e7,
    },
];

/// North geomagnetic pole, IGRF era (geocentric, degrees)
const DIPOLE_POLE_LAT_DEG: f64 = 80.65;
const DIPOLE_POLE_LON_DEG: f64 = 287.4;

/// Eccentric dipole center offset (km, Earth fixed): what pulls the inner
/// belt down over the South Atlantic.
const DIPOLE_CENTER_KM: (f64, f64, f64) = (-396.0, 332.0, 188.0);

fn dipole_axis() -> Vector3<f64> {
    let (lat, lon) = (
        DIPOLE_POLE_LAT_DEG.to_radians(),
        DIPOLE_POLE_LON_DEG.to_radians(),
    );
    Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

fn dipole_center_km() -> Vector3<f64> {
    Vector3::new(DIPOLE_CENTER_KM.0, DIPOLE_CENTER_KM.1, DIPOLE_CENTER_KM.2)
}

/// Modeled integral flux above `energy_mev`, at an Earth fixed position
/// (cm⁻² s⁻¹).
pub(crate) fn trapped_flux_cm2_s(
    position_ecef_km: &Vector3<f64>,
    energy_mev: f64,
    particle: Particle,
    solar: SolarActivity,
) -> f64 {
    let rel = position_ecef_km - dipole_center_km();
    let r_re = rel.norm() / EARTH_EQUATORIAL_RADIUS_KM;
    let sin_maglat = (rel.dot(&dipole_axis()) / rel.norm()).clamp(-1.0, 1.0);
    let cos2_maglat = (1.0 - sin_maglat * sin_maglat).max(1e-9);

    let l_shell = r_re / cos2_maglat;
    // dipole field strength relative to the shell's equator
    let b_ratio = (1.0 + 3.0 * sin_maglat * sin_maglat).sqrt() / cos2_maglat.powi(3);

    let belts = match particle {
        Particle::Proton => PROTON_BELTS,
        Particle::Electron => ELECTRON_BELTS,
    };
    belts
        .iter()
        .map(|belt| {
            let peak = match solar {
                SolarActivity::Min => belt.flux_solar_min,
                SolarActivity::Max => belt.flux_solar_max,
            };
            let shape = (-((l_shell - belt.l_peak) / belt.l_width).powi(2)).exp();
            let spectrum = (-energy_mev / belt.e_fold_mev).exp();
            let mirror = (-(b_ratio - 1.0) / belt.mirror_scale).exp();
            peak * shape * spectrum * mirror
        })
        .sum()
}

/// Whole time steps are gated: when the modeled flux at the spacecraft
/// position exceeds the threshold, every direction of that step is
/// forbidden. Direction independent by construction.
pub(crate) fn evaluate(
    states: &[SpacecraftState],
    grid: &SkyGrid,
    max_flux_cm2_s: f64,
    energy_mev: f64,
    particle: Particle,
    solar: SolarActivity,
) -> RegardGrid {
    let mut out = RegardGrid::filled(states.len(), grid.npix(), true);
    for (t, state) in states.iter().enumerate() {
        let flux = trapped_flux_cm2_s(&state.position_ecef_km, energy_mev, particle, solar);
        if flux > max_flux_cm2_s {
            debug!(
                "{}: {:?} flux {:.3e} cm⁻²s⁻¹ above threshold, step gated",
                state.epoch, particle, flux
            );
            out.row_mut(t).fill(false);
        }
    }
    out
}
