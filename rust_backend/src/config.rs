//! Scheduler configuration file support.
//!
//! Reads the site, overhead and selection constants from a TOML file. Every
//! field is optional and falls back to the Kitt Peak reference values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{SchedulerError, SchedulerResult};
use crate::overhead::OverheadModel;
use crate::scheduler::{SelectionThresholds, ServiceFailurePolicy};
use crate::services::avoidance::DEFAULT_MIN_PLANET_SEPARATION_DEG;
use crate::site::Site;

/// Scheduler configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub site: Site,
    #[serde(default)]
    pub overhead: OverheadModel,
    #[serde(default)]
    pub selection: SelectionSettings,
}

/// Per-tile selection limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSettings {
    #[serde(default = "default_max_airmass")]
    pub max_airmass: f64,
    #[serde(default = "default_gray_min_moon_separation")]
    pub gray_min_moon_separation: f64,
    #[serde(default = "default_bright_min_moon_separation")]
    pub bright_min_moon_separation: f64,
    #[serde(default = "default_gray_max_moon_fraction")]
    pub gray_max_moon_fraction: f64,
    #[serde(default = "default_gray_max_moon_brightness")]
    pub gray_max_moon_brightness: f64,
    #[serde(default = "default_reference_sn2")]
    pub reference_sn2: f64,
    #[serde(default = "default_min_planet_separation")]
    pub min_planet_separation: f64,
    #[serde(default)]
    pub failure_policy: ServiceFailurePolicy,
}

fn default_max_airmass() -> f64 {
    SelectionThresholds::default().max_airmass
}

fn default_gray_min_moon_separation() -> f64 {
    SelectionThresholds::default().gray_min_moon_separation
}

fn default_bright_min_moon_separation() -> f64 {
    SelectionThresholds::default().bright_min_moon_separation
}

fn default_gray_max_moon_fraction() -> f64 {
    SelectionThresholds::default().gray_max_moon_fraction
}

fn default_gray_max_moon_brightness() -> f64 {
    SelectionThresholds::default().gray_max_moon_brightness
}

fn default_reference_sn2() -> f64 {
    SelectionThresholds::default().reference_sn2
}

fn default_min_planet_separation() -> f64 {
    DEFAULT_MIN_PLANET_SEPARATION_DEG
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            max_airmass: default_max_airmass(),
            gray_min_moon_separation: default_gray_min_moon_separation(),
            bright_min_moon_separation: default_bright_min_moon_separation(),
            gray_max_moon_fraction: default_gray_max_moon_fraction(),
            gray_max_moon_brightness: default_gray_max_moon_brightness(),
            reference_sn2: default_reference_sn2(),
            min_planet_separation: default_min_planet_separation(),
            failure_policy: ServiceFailurePolicy::default(),
        }
    }
}

impl SelectionSettings {
    pub fn thresholds(&self) -> SelectionThresholds {
        SelectionThresholds {
            max_airmass: self.max_airmass,
            gray_min_moon_separation: self.gray_min_moon_separation,
            bright_min_moon_separation: self.bright_min_moon_separation,
            gray_max_moon_fraction: self.gray_max_moon_fraction,
            gray_max_moon_brightness: self.gray_max_moon_brightness,
            reference_sn2: self.reference_sn2,
        }
    }
}

impl SchedulerConfig {
    /// Load scheduler configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(SchedulerConfig)` if successful
    /// * `Err(SchedulerError)` if the file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> SchedulerResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            SchedulerError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> SchedulerResult<Self> {
        let config: SchedulerConfig = toml::from_str(content).map_err(|e| {
            SchedulerError::Configuration(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks that every constant is usable.
    pub fn validate(&self) -> SchedulerResult<()> {
        let lat = self.site.latitude.value();
        if !(-90.0..=90.0).contains(&lat) {
            return Err(invalid("site.latitude", lat, "must be within [-90, 90]"));
        }
        let lon = self.site.longitude.value();
        if !(-180.0..=360.0).contains(&lon) {
            return Err(invalid("site.longitude", lon, "must be within [-180, 360]"));
        }

        let o = &self.overhead;
        for (field, value) in [
            ("overhead.focus_time", o.focus_time.value()),
            ("overhead.min_overhead", o.min_overhead.value()),
            ("overhead.slew_settle", o.slew_settle.value()),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(invalid(field, value, "must be a non-negative number"));
            }
        }
        if !(o.slew_rate > 0.0 && o.slew_rate.is_finite()) {
            return Err(invalid("overhead.slew_rate", o.slew_rate, "must be positive"));
        }

        let s = &self.selection;
        if !(s.max_airmass >= 1.0) {
            return Err(invalid("selection.max_airmass", s.max_airmass, "must be at least 1"));
        }
        for (field, value) in [
            ("selection.gray_min_moon_separation", s.gray_min_moon_separation),
            ("selection.bright_min_moon_separation", s.bright_min_moon_separation),
            ("selection.min_planet_separation", s.min_planet_separation),
        ] {
            if !(0.0..=180.0).contains(&value) {
                return Err(invalid(field, value, "must be within [0, 180] degrees"));
            }
        }
        if !(0.0..=1.0).contains(&s.gray_max_moon_fraction) {
            return Err(invalid(
                "selection.gray_max_moon_fraction",
                s.gray_max_moon_fraction,
                "must be within [0, 1]",
            ));
        }
        if !s.gray_max_moon_brightness.is_finite() {
            return Err(invalid(
                "selection.gray_max_moon_brightness",
                s.gray_max_moon_brightness,
                "must be finite",
            ));
        }
        if !(s.reference_sn2 > 0.0 && s.reference_sn2.is_finite()) {
            return Err(invalid("selection.reference_sn2", s.reference_sn2, "must be positive"));
        }

        Ok(())
    }
}

fn invalid(field: &str, value: f64, rule: &str) -> SchedulerError {
    SchedulerError::Configuration(format!("{} = {} {}", field, value, rule))
}
