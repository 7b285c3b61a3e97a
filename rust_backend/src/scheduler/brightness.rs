//! Sky-brightness compatibility between a tile and the Moon.

use serde::{Deserialize, Serialize};

use crate::models::{ConditionSet, MoonGeometry, ObservingCondition};

/// Thresholds applied to each candidate tile.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionThresholds {
    /// Tiles at or above this airmass are rejected.
    pub max_airmass: f64,
    /// Minimum Moon distance (degrees) for GRAY tiles while the Moon is up.
    pub gray_min_moon_separation: f64,
    /// Minimum Moon distance (degrees) for BRIGHT tiles while the Moon is up.
    pub bright_min_moon_separation: f64,
    /// GRAY is allowed below this illuminated fraction.
    pub gray_max_moon_fraction: f64,
    /// GRAY is also allowed while Moon altitude × fraction stays below this.
    pub gray_max_moon_brightness: f64,
    /// S/N² reference reported with the selected tile.
    pub reference_sn2: f64,
}

impl Default for SelectionThresholds {
    fn default() -> Self {
        Self {
            max_airmass: 10.0,
            gray_min_moon_separation: 90.0,
            bright_min_moon_separation: 5.0,
            gray_max_moon_fraction: 0.2,
            gray_max_moon_brightness: 12.0,
            reference_sn2: 100.0,
        }
    }
}

/// Whether a tile supporting `conditions` may be observed under this Moon.
///
/// With the Moon below the horizon only DARK tiles qualify. With the Moon up a
/// tile qualifies as GRAY when far from a faint or low Moon, or as BRIGHT when
/// merely not right next to it.
pub fn brightness_compatible(
    conditions: ConditionSet,
    moon: &MoonGeometry,
    moon_fraction: f64,
    thresholds: &SelectionThresholds,
) -> bool {
    let altitude = moon.altitude.value();
    let distance = moon.distance.value();

    if altitude < 0.0 {
        return conditions.contains(ObservingCondition::Dark);
    }

    let faint_moon = moon_fraction < thresholds.gray_max_moon_fraction
        || altitude * moon_fraction < thresholds.gray_max_moon_brightness;
    let gray = conditions.contains(ObservingCondition::Gray)
        && distance > thresholds.gray_min_moon_separation
        && faint_moon;
    let bright = conditions.contains(ObservingCondition::Bright)
        && distance > thresholds.bright_min_moon_separation;

    gray || bright
}
