//! Fixed per-night body positions.
//!
//! The afternoon plan records where the Moon (and, when known, the planets)
//! sit for the coming night. Over a single night the planets move by far less
//! than the avoidance radius, so one position per body is enough for them; the
//! Moon moves about 6° in a night, which the brightness rule tolerates.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use super::{BodyEphemeris, EquatorialPosition, ServiceError, ServiceResult, SolarSystemBody};

/// Ephemeris answering with one position per body inside a night window.
#[derive(Debug, Clone)]
pub struct NightlyEphemeris {
    night: RangeInclusive<f64>,
    positions: HashMap<SolarSystemBody, EquatorialPosition>,
}

impl NightlyEphemeris {
    /// Empty ephemeris valid for `night` (MJD range).
    pub fn new(night: RangeInclusive<f64>) -> Self {
        Self {
            night,
            positions: HashMap::new(),
        }
    }

    pub fn with_body(mut self, body: SolarSystemBody, position: EquatorialPosition) -> Self {
        self.positions.insert(body, position);
        self
    }

    pub fn set_body(&mut self, body: SolarSystemBody, position: EquatorialPosition) {
        self.positions.insert(body, position);
    }

    pub fn night(&self) -> &RangeInclusive<f64> {
        &self.night
    }
}

impl BodyEphemeris for NightlyEphemeris {
    fn position(&self, body: SolarSystemBody, mjd: f64) -> ServiceResult<EquatorialPosition> {
        if !self.night.contains(&mjd) {
            return Err(ServiceError::EpochOutOfRange { mjd });
        }
        self.positions
            .get(&body)
            .copied()
            .ok_or_else(|| ServiceError::EphemerisUnavailable(format!("no position for {}", body)))
    }
}
