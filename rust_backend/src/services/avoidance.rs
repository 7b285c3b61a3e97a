//! Planet avoidance.

use qtty::Degrees;

use super::{AvoidanceService, BodyEphemeris, ServiceResult, SolarSystemBody};
use crate::geometry::angular_separation;

/// Default minimum separation from each planet.
pub const DEFAULT_MIN_PLANET_SEPARATION_DEG: f64 = 2.0;

/// Rejects pointings closer than `min_separation` to any avoided body.
///
/// The Moon is not in the default list; its effect is handled by the
/// brightness rule.
#[derive(Debug, Clone)]
pub struct PlanetAvoidance<E> {
    ephemeris: E,
    min_separation: Degrees,
    bodies: Vec<SolarSystemBody>,
}

impl<E: BodyEphemeris> PlanetAvoidance<E> {
    pub fn new(ephemeris: E) -> Self {
        Self {
            ephemeris,
            min_separation: Degrees::new(DEFAULT_MIN_PLANET_SEPARATION_DEG),
            bodies: SolarSystemBody::PLANETS.to_vec(),
        }
    }

    pub fn with_min_separation(mut self, min_separation: Degrees) -> Self {
        self.min_separation = min_separation;
        self
    }

    pub fn with_bodies(mut self, bodies: impl IntoIterator<Item = SolarSystemBody>) -> Self {
        self.bodies = bodies.into_iter().collect();
        self
    }

    pub fn min_separation(&self) -> Degrees {
        self.min_separation
    }
}

impl<E: BodyEphemeris> AvoidanceService for PlanetAvoidance<E> {
    fn is_clear(&self, mjd: f64, ra: Degrees, dec: Degrees) -> ServiceResult<bool> {
        for body in &self.bodies {
            let position = self.ephemeris.position(*body, mjd)?;
            let separation = angular_separation(position.ra, position.dec, ra, dec);
            if separation.value() < self.min_separation.value() {
                log::debug!(
                    "Pointing ({:.3}, {:.3}) is {:.3} deg from {}",
                    ra.value(),
                    dec.value(),
                    separation.value(),
                    body
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}
