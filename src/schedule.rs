//! Schedule boundary records.
//!
//! Schedules are produced by the external optimizer and consumed by plotting
//! and metrics collaborators; the core only fixes the row type they share.
//! No schedule I/O happens here.
use hifitime::Epoch;

#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::sky::SkyCoord;

/// One observation of a schedule table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct ExposureRecord {
    /// Exposure start time
    pub time: Epoch,
    /// Survey the exposure belongs to
    pub survey: String,
    /// Pointing center
    pub center: SkyCoord,
    /// Sky map reference (file name or URL)
    pub skymap: String,
}
