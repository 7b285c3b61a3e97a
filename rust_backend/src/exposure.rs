//! Exposure-time estimate for a selected tile under the current sky.
//!
//! The reference exposure of the tile's program is scaled by multiplicative
//! penalties for seeing, transparency, airmass and dust, then by the S/N²
//! requested relative to the nominal one. The Moon is not modelled yet.

use qtty::Seconds;
use serde::{Deserialize, Serialize};

use crate::error::{SchedulerError, SchedulerResult};

/// Reference exposure for DARK-program tiles.
pub const DARK_REFERENCE_EXPOSURE_S: f64 = 1000.0;
/// Reference exposure for BRIGHT-program tiles.
pub const BRIGHT_REFERENCE_EXPOSURE_S: f64 = 300.0;
/// S/N² the reference exposures deliver.
pub const NOMINAL_SN2: f64 = 100.0;

// Seeing response a + b·s + c·s², minimal at s = -b / 2c.
const SEEING_A: f64 = 4.6;
const SEEING_B: f64 = -1.55;
const SEEING_C: f64 = 1.15;

const OPAQUE_TRANSPARENCY_FACTOR: f64 = 1.0e9;

/// Weather at the time of the exposure.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyConditions {
    /// FWHM seeing in arcseconds.
    pub seeing: f64,
    /// Sky transparency, 1 for photometric.
    pub transparency: f64,
}

impl SkyConditions {
    pub fn new(seeing: f64, transparency: f64) -> Self {
        Self {
            seeing,
            transparency,
        }
    }
}

/// Exposure a program needs in reference conditions.
pub fn reference_exposure(program: &str) -> SchedulerResult<Seconds> {
    match program {
        "DARK" => Ok(Seconds::new(DARK_REFERENCE_EXPOSURE_S)),
        "BRIGHT" => Ok(Seconds::new(BRIGHT_REFERENCE_EXPOSURE_S)),
        other => Err(SchedulerError::UnknownProgram(other.to_string())),
    }
}

/// Exposure multiplier for the given seeing, 1 at the optimum.
pub fn seeing_factor(seeing: f64) -> f64 {
    let best = SEEING_A - 0.25 * SEEING_B * SEEING_B / SEEING_C;
    best / (SEEING_A + SEEING_B * seeing + SEEING_C * seeing * seeing)
}

pub fn transparency_factor(transparency: f64) -> f64 {
    if transparency > 0.0 {
        1.0 / transparency
    } else {
        OPAQUE_TRANSPARENCY_FACTOR
    }
}

/// Exposure needed to reach `sn2` on a tile of `program`.
///
/// Falls back to the reference exposure when the combined factor is not a
/// non-negative number (e.g. a negative airmass).
pub fn estimate_exposure(
    sky: &SkyConditions,
    airmass: f64,
    program: &str,
    ebmv: f64,
    sn2: f64,
) -> SchedulerResult<Seconds> {
    let reference = reference_exposure(program)?;

    let factor = seeing_factor(sky.seeing)
        * transparency_factor(sky.transparency)
        * airmass.sqrt()
        * (-ebmv).exp();

    if factor >= 0.0 {
        Ok(Seconds::new(reference.value() * factor * (sn2 / NOMINAL_SN2)))
    } else {
        log::debug!(
            "Exposure factor {} for {} is not usable; using reference exposure",
            factor,
            program
        );
        Ok(reference)
    }
}
