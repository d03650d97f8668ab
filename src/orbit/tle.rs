//! Two line element sets, propagated with SGP4.
use std::path::Path;
use std::sync::OnceLock;

use chrono::{Datelike, Timelike};
use hifitime::{Epoch, Unit};
use log::debug;
use nalgebra::Vector3;

use crate::constants::TLE_VALIDITY_WINDOW_DAYS;
use crate::frames;

use super::Error;

struct Propagator {
    constants: sgp4::Constants,
    /// Element set reference epoch
    epoch: Epoch,
}

/// NORAD two line element set. Kept as raw lines until the first position
/// query; parsing (with line length and checksum validation) and the derived
/// propagation constants are memoized for the mission lifetime.
pub struct TleOrbit {
    line1: String,
    line2: String,
    propagator: OnceLock<Propagator>,
}

impl std::fmt::Debug for TleOrbit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TleOrbit")
            .field("line1", &self.line1)
            .field("line2", &self.line2)
            .finish()
    }
}

impl TleOrbit {
    /// New [TleOrbit] from the two standard 69 character lines.
    pub fn from_lines(line1: &str, line2: &str) -> Self {
        Self {
            line1: line1.to_string(),
            line2: line2.to_string(),
            propagator: OnceLock::new(),
        }
    }

    /// New [TleOrbit] from a file holding one element set; a possible name
    /// line is skipped.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        let mut line1 = None;
        let mut line2 = None;
        for line in content.lines() {
            if line.starts_with("1 ") && line1.is_none() {
                line1 = Some(line.trim_end());
            } else if line.starts_with("2 ") && line2.is_none() {
                line2 = Some(line.trim_end());
            }
        }
        match (line1, line2) {
            (Some(line1), Some(line2)) => Ok(Self::from_lines(line1, line2)),
            _ => Err(Error::ElementSetMissing),
        }
    }

    fn propagator(&self) -> Result<&Propagator, Error> {
        if let Some(propagator) = self.propagator.get() {
            return Ok(propagator);
        }
        let elements =
            sgp4::Elements::from_tle(None, self.line1.as_bytes(), self.line2.as_bytes())?;
        let dt = elements.datetime;
        let epoch = Epoch::from_gregorian_utc(
            dt.year(),
            dt.month() as u8,
            dt.day() as u8,
            dt.hour() as u8,
            dt.minute() as u8,
            dt.second() as u8,
            dt.nanosecond(),
        );
        let constants = sgp4::Constants::from_elements(&elements)?;
        debug!("element set parsed, epoch {}", epoch);
        Ok(self
            .propagator
            .get_or_init(|| Propagator { constants, epoch }))
    }

    /// Element set reference epoch (parses on first use).
    pub fn epoch(&self) -> Result<Epoch, Error> {
        Ok(self.propagator()?.epoch)
    }

    /// Geocentric position (km, J2000) at requested [Epoch]. Epochs more
    /// than [TLE_VALIDITY_WINDOW_DAYS] from the element set epoch are
    /// rejected rather than silently extrapolated.
    pub(crate) fn position_km(&self, t: Epoch) -> Result<Vector3<f64>, Error> {
        let propagator = self.propagator()?;
        let elapsed = t - propagator.epoch;
        if elapsed.to_unit(Unit::Day).abs() > TLE_VALIDITY_WINDOW_DAYS {
            return Err(Error::OutsideValidityWindow {
                t,
                epoch: propagator.epoch,
                window_days: TLE_VALIDITY_WINDOW_DAYS,
            });
        }
        let minutes = elapsed.to_unit(Unit::Minute);
        let prediction = propagator
            .constants
            .propagate(sgp4::MinutesSinceEpoch(minutes))?;
        let teme_km = Vector3::new(
            prediction.position[0],
            prediction.position[1],
            prediction.position[2],
        );
        Ok(frames::teme_to_j2000(t) * teme_km)
    }
}
