//! Solar system body separation and galactic plane constraints.
use crate::frames;
use crate::grid::{RegardGrid, SkyGrid};
use crate::orbit::SpacecraftState;
use crate::sky::angular_separation_rad;

pub(crate) enum Body {
    Sun,
    Moon,
}

/// Directions within `min_angle_rad` of the body, as seen from the
/// spacecraft, are forbidden. The finite body distance matters for the Moon
/// in low orbits (parallax reaches a degree).
pub(crate) fn body(
    states: &[SpacecraftState],
    grid: &SkyGrid,
    body: Body,
    min_angle_rad: f64,
) -> RegardGrid {
    let mut out = RegardGrid::filled(states.len(), grid.npix(), true);
    for (t, state) in states.iter().enumerate() {
        let body_km = match body {
            Body::Sun => state.sun_km,
            Body::Moon => state.moon_km,
        };
        let from_spacecraft = (body_km - state.position_km).normalize();
        let row = out.row_mut(t);
        for (p, dir) in grid.directions().iter().enumerate() {
            row[p] = angular_separation_rad(dir, &from_spacecraft) >= min_angle_rad;
        }
    }
    out
}

/// Directions with |galactic latitude| below `min_angle_rad` are forbidden.
/// Time independent: one pixel row, replicated across time steps.
pub(crate) fn galactic_plane(
    states: &[SpacecraftState],
    grid: &SkyGrid,
    min_angle_rad: f64,
) -> RegardGrid {
    let row: Vec<bool> = grid
        .directions()
        .iter()
        .map(|dir| frames::galactic_latitude_rad(dir).abs() >= min_angle_rad)
        .collect();
    let mut out = RegardGrid::filled(states.len(), grid.npix(), true);
    for t in 0..states.len() {
        out.row_mut(t).copy_from_slice(&row);
    }
    out
}
