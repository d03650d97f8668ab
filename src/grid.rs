//! Sky pixelization and boolean regard grids.
use nalgebra::Vector3;

use crate::sky::SkyCoord;

/// Pixel ordering convention of an equal-area sky grid.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum PixelOrdering {
    /// Iso-latitude rings, pole to pole
    #[default]
    Ring,
    /// Hierarchical (quad tree) ordering
    Nested,
}

/// Equal-area tessellation of the celestial sphere, shared by constraint
/// evaluation and footprint lookups so that both agree on pixel indexing.
///
/// Either supplied externally ([SkyGrid::from_directions]) or generated by
/// the bundled HEALPix ring-scheme generator ([SkyGrid::healpix_ring]).
#[derive(Debug, Clone)]
pub struct SkyGrid {
    ordering: PixelOrdering,
    directions: Vec<Vector3<f64>>,
}

impl SkyGrid {
    /// HEALPix grid in ring ordering: 12·nside² pixels.
    ///
    /// Panics if `nside` is null.
    pub fn healpix_ring(nside: u32) -> Self {
        assert!(nside >= 1, "nside must be at least 1");
        let nside = u64::from(nside);
        let npix = 12 * nside * nside;
        let directions = (0..npix)
            .map(|p| {
                let (z, phi) = healpix_ring_center(nside, p);
                let sin_theta = (1.0 - z * z).max(0.0).sqrt();
                Vector3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), z)
            })
            .collect();
        Self {
            ordering: PixelOrdering::Ring,
            directions,
        }
    }

    /// Externally pixelized grid: unit direction per pixel, in the supplied
    /// ordering. Directions are renormalized.
    pub fn from_directions(ordering: PixelOrdering, directions: Vec<Vector3<f64>>) -> Self {
        let directions = directions.into_iter().map(|d| d.normalize()).collect();
        Self {
            ordering,
            directions,
        }
    }

    /// Pixel count
    pub fn npix(&self) -> usize {
        self.directions.len()
    }

    /// Ordering convention
    pub fn ordering(&self) -> PixelOrdering {
        self.ordering
    }

    /// Unit direction of one pixel center
    pub fn direction(&self, pixel: usize) -> &Vector3<f64> {
        &self.directions[pixel]
    }

    /// All pixel center directions, in pixel order
    pub fn directions(&self) -> &[Vector3<f64>] {
        &self.directions
    }

    /// Pixel center as a [SkyCoord]
    pub fn coord(&self, pixel: usize) -> SkyCoord {
        SkyCoord::from_unit_vector(&self.directions[pixel])
    }
}

/// Ring scheme pixel center: (z, φ) for pixel `p` of an nside grid.
fn healpix_ring_center(nside: u64, p: u64) -> (f64, f64) {
    let npix = 12 * nside * nside;
    let ncap = 2 * nside * (nside - 1);
    let nside_f = nside as f64;

    if p < ncap {
        // north polar cap
        let ph = (p as f64 + 1.0) / 2.0;
        let ring = (ph - ph.floor().sqrt()).sqrt().floor() as u64 + 1;
        let j = p + 1 - 2 * ring * (ring - 1);
        let z = 1.0 - (ring * ring) as f64 / (3.0 * nside_f * nside_f);
        let phi = (j as f64 - 0.5) * std::f64::consts::FRAC_PI_2 / ring as f64;
        (z, phi)
    } else if p < npix - ncap {
        // equatorial belt
        let pp = p - ncap;
        let ring = pp / (4 * nside) + nside;
        let j = pp % (4 * nside) + 1;
        let s = ((ring - nside + 1) % 2) as f64;
        let z = 4.0 / 3.0 - 2.0 * ring as f64 / (3.0 * nside_f);
        let phi = (j as f64 - s / 2.0) * std::f64::consts::FRAC_PI_2 / nside_f;
        (z, phi)
    } else {
        // south polar cap, mirrored from the north
        let ps = npix - 1 - p;
        let ph = (ps as f64 + 1.0) / 2.0;
        let ring = (ph - ph.floor().sqrt()).sqrt().floor() as u64 + 1;
        let j = ps + 1 - 2 * ring * (ring - 1);
        let j = 4 * ring + 1 - j;
        let z = (ring * ring) as f64 / (3.0 * nside_f * nside_f) - 1.0;
        let phi = (j as f64 - 0.5) * std::f64::consts::FRAC_PI_2 / ring as f64;
        (z, phi)
    }
}

/// Boolean (time × pixel) matrix: `true` means the direction is observable
/// at that time step. Produced fresh by each evaluation, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegardGrid {
    n_times: usize,
    n_pixels: usize,
    cells: Vec<bool>,
}

impl RegardGrid {
    /// Uniform grid of `value`
    pub fn filled(n_times: usize, n_pixels: usize, value: bool) -> Self {
        Self {
            n_times,
            n_pixels,
            cells: vec![value; n_times * n_pixels],
        }
    }

    /// Time step count
    pub fn n_times(&self) -> usize {
        self.n_times
    }

    /// Pixel count
    pub fn n_pixels(&self) -> usize {
        self.n_pixels
    }

    /// Cell lookup
    pub fn get(&self, time: usize, pixel: usize) -> bool {
        self.cells[time * self.n_pixels + pixel]
    }

    /// One time step as a pixel slice
    pub fn row(&self, time: usize) -> &[bool] {
        &self.cells[time * self.n_pixels..(time + 1) * self.n_pixels]
    }

    pub(crate) fn row_mut(&mut self, time: usize) -> &mut [bool] {
        &mut self.cells[time * self.n_pixels..(time + 1) * self.n_pixels]
    }

    /// Fraction of the sky permitted at one time step.
    pub fn allowed_fraction(&self, time: usize) -> f64 {
        let allowed = self.row(time).iter().filter(|cell| **cell).count();
        allowed as f64 / self.n_pixels as f64
    }

    /// Elementwise AND with another grid of identical shape.
    pub fn intersect(&mut self, rhs: &Self) {
        assert_eq!(
            (self.n_times, self.n_pixels),
            (rhs.n_times, rhs.n_pixels),
            "regard grid shape mismatch"
        );
        for (cell, other) in self.cells.iter_mut().zip(rhs.cells.iter()) {
            *cell &= *other;
        }
    }

    /// Stack time-contiguous parts back into one grid, in part order.
    pub(crate) fn concat_times(parts: Vec<Self>, n_pixels: usize) -> Self {
        let n_times = parts.iter().map(|part| part.n_times).sum();
        let mut cells = Vec::with_capacity(n_times * n_pixels);
        for part in parts {
            assert_eq!(part.n_pixels, n_pixels, "regard grid shape mismatch");
            cells.extend_from_slice(&part.cells);
        }
        Self {
            n_times,
            n_pixels,
            cells,
        }
    }
}
