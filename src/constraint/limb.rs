//! Earth limb occlusion.
use nalgebra::Vector3;

use crate::constants::EARTH_EQUATORIAL_RADIUS_KM;
use crate::grid::{RegardGrid, SkyGrid};
use crate::orbit::SpacecraftState;
use crate::sky::angular_separation_rad;

/// Earth's apparent angular radius from a geocentric distance (radians).
/// Grows as the spacecraft altitude decreases.
pub(crate) fn earth_angular_radius_rad(r_km: f64) -> f64 {
    (EARTH_EQUATORIAL_RADIUS_KM / r_km).clamp(-1.0, 1.0).asin()
}

/// Directions closer than (apparent radius + margin) to the Earth center
/// direction are forbidden. With `bright_only`, the margin applies only
/// where the nearest limb point is sunlit; the disk itself always blocks.
pub(crate) fn evaluate(
    states: &[SpacecraftState],
    grid: &SkyGrid,
    margin_rad: f64,
    bright_only: bool,
) -> RegardGrid {
    let mut out = RegardGrid::filled(states.len(), grid.npix(), true);
    for (t, state) in states.iter().enumerate() {
        let r_km = state.position_km.norm();
        let r_hat = state.position_km / r_km;
        let nadir = -r_hat;
        let rho = earth_angular_radius_rad(r_km);
        // colatitude of the limb circle, seen from the Earth center
        let limb_colat = (EARTH_EQUATORIAL_RADIUS_KM / r_km).clamp(-1.0, 1.0).acos();
        let sun_hat = state.sun_km.normalize();

        let row = out.row_mut(t);
        for (p, dir) in grid.directions().iter().enumerate() {
            let sep = angular_separation_rad(dir, &nadir);
            let blocked = if sep < rho {
                true
            } else if sep < rho + margin_rad {
                if bright_only {
                    sunlit_limb(dir, &r_hat, limb_colat, &sun_hat)
                } else {
                    true
                }
            } else {
                false
            };
            row[p] = !blocked;
        }
    }
    out
}

/// Whether the limb point nearest to `dir` faces the illuminated hemisphere.
fn sunlit_limb(
    dir: &Vector3<f64>,
    r_hat: &Vector3<f64>,
    limb_colat: f64,
    sun_hat: &Vector3<f64>,
) -> bool {
    // nearest limb point lies in the plane spanned by the radial axis and dir
    let off_axis = dir - dir.dot(r_hat) * r_hat;
    match off_axis.try_normalize(1e-12) {
        Some(toward_dir) => {
            let limb_point = limb_colat.cos() * r_hat + limb_colat.sin() * toward_dir;
            limb_point.dot(sun_hat) > 0.0
        },
        // dir on the nadir axis itself: no unique nearest limb, treat as lit
        None => true,
    }
}
