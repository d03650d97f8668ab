use thiserror::Error;

use crate::{cfg, orbit, slew};

/// Top level error, covering every operation exposed by a mission.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid mission parameters, rejected at construction before any
    /// evaluation takes place.
    #[error("configuration error: {0}")]
    Configuration(#[from] cfg::Error),

    /// Orbit or ephemeris data that exists but could not be obtained:
    /// rejected element sets, kernel retrieval failures, epochs outside
    /// the covered interval. Propagated as-is: retrying is the caller's
    /// decision, never performed here.
    #[error("orbit data unavailable: {0}")]
    Orbit(#[from] orbit::Error),

    /// Degenerate pointing geometry that the documented tie-breaks do not
    /// cover (non finite coordinates).
    #[error("geometry error: {0}")]
    Geometry(#[from] slew::Error),

    /// Failed to size the worker pool for parallel evaluation.
    #[error("worker pool setup issue: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
