//! Instrument field of view footprint.
use std::f64::consts::PI;

use itertools::Itertools;
use nalgebra::Vector3;

use crate::cfg;
use crate::grid::SkyGrid;
use crate::sky::{angular_separation_rad, SkyCoord};

/// Sky plane footprint of the instrument: a rectangle described by two
/// half-widths around the pointing center. Stateless given a center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fov {
    half_lon_rad: f64,
    half_lat_rad: f64,
}

impl Fov {
    /// Square footprint of full width `width_rad`.
    pub fn from_rectangle(width_rad: f64) -> Self {
        Self::from_half_widths(width_rad / 2.0, width_rad / 2.0)
    }

    /// General rectangle from its two half-widths (radians).
    pub fn from_half_widths(half_lon_rad: f64, half_lat_rad: f64) -> Self {
        Self {
            half_lon_rad,
            half_lat_rad,
        }
    }

    /// Footprint half-widths (radians).
    pub fn half_widths_rad(&self) -> (f64, f64) {
        (self.half_lon_rad, self.half_lat_rad)
    }

    pub(crate) fn validate(&self) -> Result<(), cfg::Error> {
        for half in [self.half_lon_rad, self.half_lat_rad] {
            if !(half > 0.0 && half < std::f64::consts::FRAC_PI_2) {
                return Err(cfg::Error::FovRange);
            }
        }
        Ok(())
    }

    /// Local tangent frame at the pointing center: (center, east, north).
    fn frame(center: SkyCoord) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        let c = center.unit_vector();
        let (sin_ra, cos_ra) = center.ra_rad.sin_cos();
        let east = Vector3::new(-sin_ra, cos_ra, 0.0);
        let north = c.cross(&east);
        (c, east, north)
    }

    /// Corner vertices of the footprint traced on the sphere, split into
    /// one or more contiguous pieces where the boundary crosses the 0/360°
    /// meridian. Boundary vertices carry ra = 0 or ra = 2π depending on the
    /// side they close.
    pub fn footprint_polygon(&self, center: SkyCoord) -> Vec<Vec<SkyCoord>> {
        let (c, east, north) = Self::frame(center);
        let tan_lon = self.half_lon_rad.tan();
        let tan_lat = self.half_lat_rad.tan();
        let corners: Vec<Vector3<f64>> = [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)]
            .iter()
            .map(|&(sx, sy)| (c + sx * tan_lon * east + sy * tan_lat * north).normalize())
            .collect();
        split_prime_meridian(&corners)
    }

    /// Pixel indices covered by the footprint, at the grid's resolution and
    /// in the grid's ordering.
    pub fn footprint_pixels(&self, center: SkyCoord, grid: &SkyGrid) -> Vec<usize> {
        let (c, east, north) = Self::frame(center);
        grid.directions()
            .iter()
            .enumerate()
            .filter_map(|(p, dir)| {
                let depth = dir.dot(&c);
                if depth <= 0.0 {
                    return None;
                }
                let lon = (dir.dot(&east) / depth).atan();
                let lat = (dir.dot(&north) / depth).atan();
                (lon.abs() <= self.half_lon_rad && lat.abs() <= self.half_lat_rad).then_some(p)
            })
            .collect()
    }
}

/// Walk the closed vertex loop, cutting every edge that wraps across the
/// 0/360° meridian at its great-circle crossing latitude.
fn split_prime_meridian(vertices: &[Vector3<f64>]) -> Vec<Vec<SkyCoord>> {
    const TWO_PI: f64 = 2.0 * PI;
    let mut pieces: Vec<Vec<SkyCoord>> = Vec::new();
    let mut current: Vec<SkyCoord> = Vec::new();

    for (a, b) in vertices.iter().circular_tuple_windows() {
        let coord_a = SkyCoord::from_unit_vector(a);
        current.push(coord_a);

        let lon_b = SkyCoord::from_unit_vector(b).ra_rad;
        let mut delta = lon_b - coord_a.ra_rad;
        if delta > PI {
            delta -= TWO_PI;
        } else if delta < -PI {
            delta += TWO_PI;
        }
        let unwrapped = coord_a.ra_rad + delta;
        if unwrapped >= TWO_PI {
            // eastward across 0
            let lat = crossing_latitude_rad(a, b);
            current.push(SkyCoord::new(TWO_PI, lat));
            pieces.push(std::mem::take(&mut current));
            current.push(SkyCoord::new(0.0, lat));
        } else if unwrapped < 0.0 {
            // westward across 0
            let lat = crossing_latitude_rad(a, b);
            current.push(SkyCoord::new(0.0, lat));
            pieces.push(std::mem::take(&mut current));
            current.push(SkyCoord::new(TWO_PI, lat));
        }
    }

    if pieces.is_empty() {
        pieces.push(current);
    } else {
        // trailing run continues the piece that opened the loop
        let first = pieces.remove(0);
        current.extend(first);
        pieces.insert(0, current);
    }
    pieces
}

/// Latitude where the great-circle edge a → b crosses the 0/360° meridian
/// plane.
fn crossing_latitude_rad(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let omega = angular_separation_rad(a, b);
    let t = f64::atan2(omega.sin() * a.y, a.y * omega.cos() - b.y) / omega;
    let v = (((1.0 - t) * omega).sin() * a + (t * omega).sin() * b) / omega.sin();
    (v.z / v.norm()).clamp(-1.0, 1.0).asin()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::SkyGrid;
    use crate::sky::SkyCoord;

    #[test]
    fn vertices_stay_within_the_half_diagonal() {
        let fov = Fov::from_half_widths(3.55_f64.to_radians(), 2.0_f64.to_radians());
        let (half_lon, half_lat) = fov.half_widths_rad();
        let half_diagonal = (half_lon.tan().hypot(half_lat.tan())).atan();

        for (ra, dec) in [(180.0, 0.0), (90.0, 45.0), (200.0, -75.0)] {
            let center = SkyCoord::from_degrees(ra, dec);
            let pieces = fov.footprint_polygon(center);
            assert_eq!(pieces.len(), 1);
            for vertex in &pieces[0] {
                let sep = vertex.separation_rad(&center);
                assert!(
                    sep <= half_diagonal + 1e-9,
                    "vertex {}° off center",
                    sep.to_degrees()
                );
            }
        }
    }

    #[test]
    fn splits_across_the_prime_meridian() {
        let fov = Fov::from_rectangle(20_f64.to_radians());
        let pieces = fov.footprint_polygon(SkyCoord::from_degrees(1.0, 0.0));
        assert_eq!(pieces.len(), 2);

        let total: usize = pieces.iter().map(|piece| piece.len()).sum();
        assert_eq!(total, 8, "4 corners + 2 crossings, each on both sides");

        // eastern piece spans [0°, ~11°], western piece [~351°, 360°]
        for vertex in &pieces[0] {
            assert!(vertex.ra_deg() <= 12.0, "east piece ra {}", vertex.ra_deg());
        }
        for vertex in &pieces[1] {
            assert!(vertex.ra_deg() >= 350.0, "west piece ra {}", vertex.ra_deg());
        }
    }

    #[test]
    fn covered_pixels() {
        let fov = Fov::from_rectangle(20_f64.to_radians());
        let grid = SkyGrid::healpix_ring(8);
        let center = SkyCoord::from_degrees(120.0, 30.0);

        let pixels = fov.footprint_pixels(center, &grid);
        assert!(
            (2..=20).contains(&pixels.len()),
            "400 deg² at nside 8 covers a handful of pixels, got {}",
            pixels.len()
        );

        // the pixel closest to the center must be covered
        let center_vec = center.unit_vector();
        let nearest = (0..grid.npix())
            .max_by(|a, b| {
                let da = grid.direction(*a).dot(&center_vec);
                let db = grid.direction(*b).dot(&center_vec);
                da.partial_cmp(&db).unwrap()
            })
            .unwrap();
        assert!(pixels.contains(&nearest));

        // every covered pixel lies within the half diagonal
        let (half_lon, half_lat) = fov.half_widths_rad();
        let half_diagonal = (half_lon.tan().hypot(half_lat.tan())).atan();
        for p in pixels {
            let sep = angular_separation_rad(grid.direction(p), &center_vec);
            assert!(sep <= half_diagonal + 1e-9);
        }
    }
}
