//! Setup time between two pointings: telescope focus plus an optional slew.
//!
//! The slew cost is linear in the larger of the RA and Dec offsets (the mount
//! moves both axes at once), plus a fixed settle time. The total is floored so
//! even a zero-length move pays for readout of the previous exposure.

use qtty::{Degrees, Seconds};
use serde::{Deserialize, Serialize};

/// Sidereal seconds per degree of LST (86 400 s / 360°).
pub const SIDEREAL_SECONDS_PER_DEGREE: f64 = 240.0;

/// Overhead constants of the telescope.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverheadModel {
    pub focus_time: Seconds,
    /// Floor applied to the total setup time.
    pub min_overhead: Seconds,
    pub slew_settle: Seconds,
    /// Slew speed in degrees per second.
    pub slew_rate: f64,
}

impl Default for OverheadModel {
    fn default() -> Self {
        Self {
            focus_time: Seconds::new(30.0),
            min_overhead: Seconds::new(120.0),
            slew_settle: Seconds::new(11.5),
            slew_rate: 0.45,
        }
    }
}

impl OverheadModel {
    /// Setup time to move by `dra`/`ddec` (both non-negative, `dra` already
    /// folded to at most 180°, see [`ra_offset`]).
    pub fn setup_time(&self, slew: bool, dra: Degrees, ddec: Degrees) -> Seconds {
        let slew_time = if slew {
            let distance = dra.value().max(ddec.value());
            self.slew_settle.value() + distance / self.slew_rate
        } else {
            0.0
        };
        let total = self.focus_time.value() + slew_time;
        Seconds::new(total.max(self.min_overhead.value()))
    }
}

/// [`OverheadModel::setup_time`] with the default telescope constants.
pub fn setup_time(slew: bool, dra: Degrees, ddec: Degrees) -> Seconds {
    OverheadModel::default().setup_time(slew, dra, ddec)
}

/// Absolute RA difference folded onto `[0, 180]`.
pub fn ra_offset(a: Degrees, b: Degrees) -> Degrees {
    let d = (a.value() - b.value()).abs().rem_euclid(360.0);
    Degrees::new(if d > 180.0 { 360.0 - d } else { d })
}
