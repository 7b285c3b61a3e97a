//! Collaborators the selector consults for each candidate tile.
//!
//! The selector only knows these traits. Concrete adapters are provided for
//! the plane-parallel airmass model, planet avoidance and Moon geometry; all
//! positions come from a pluggable [`BodyEphemeris`] backend.

pub mod airmass;
pub mod avoidance;
pub mod ephemeris;
pub mod moon;

use std::fmt;
use std::sync::Arc;

use qtty::Degrees;
use serde::{Deserialize, Serialize};

use crate::models::MoonGeometry;

pub use crate::error::ServiceError;
pub use airmass::PlaneParallelAirmass;
pub use avoidance::PlanetAvoidance;
pub use ephemeris::NightlyEphemeris;
pub use moon::EphemerisMoon;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Bodies an ephemeris backend is asked about.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolarSystemBody {
    Moon,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl SolarSystemBody {
    /// Planets a pointing must keep clear of.
    pub const PLANETS: [SolarSystemBody; 6] = [
        SolarSystemBody::Venus,
        SolarSystemBody::Mars,
        SolarSystemBody::Jupiter,
        SolarSystemBody::Saturn,
        SolarSystemBody::Uranus,
        SolarSystemBody::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SolarSystemBody::Moon => "moon",
            SolarSystemBody::Venus => "venus",
            SolarSystemBody::Mars => "mars",
            SolarSystemBody::Jupiter => "jupiter",
            SolarSystemBody::Saturn => "saturn",
            SolarSystemBody::Uranus => "uranus",
            SolarSystemBody::Neptune => "neptune",
        }
    }
}

impl fmt::Display for SolarSystemBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apparent topocentric right ascension and declination.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquatorialPosition {
    pub ra: Degrees,
    pub dec: Degrees,
}

impl EquatorialPosition {
    pub fn new(ra: Degrees, dec: Degrees) -> Self {
        Self { ra, dec }
    }

    pub fn from_degrees(ra: f64, dec: f64) -> Self {
        Self::new(Degrees::new(ra), Degrees::new(dec))
    }
}

/// Decides whether a pointing is far enough from bright solar-system objects.
pub trait AvoidanceService: Send + Sync {
    fn is_clear(&self, mjd: f64, ra: Degrees, dec: Degrees) -> ServiceResult<bool>;
}

/// Airmass of a pointing at a local sidereal time.
pub trait AirmassService: Send + Sync {
    fn airmass(&self, ra: Degrees, dec: Degrees, lst: Degrees) -> ServiceResult<f64>;
}

/// Moon distance from a pointing, and the Moon's altitude/azimuth.
pub trait MoonService: Send + Sync {
    fn moon_position(&self, mjd: f64, ra: Degrees, dec: Degrees) -> ServiceResult<MoonGeometry>;
}

/// Source of solar-system positions.
pub trait BodyEphemeris: Send + Sync {
    fn position(&self, body: SolarSystemBody, mjd: f64) -> ServiceResult<EquatorialPosition>;
}

impl<T: BodyEphemeris + ?Sized> BodyEphemeris for Arc<T> {
    fn position(&self, body: SolarSystemBody, mjd: f64) -> ServiceResult<EquatorialPosition> {
        (**self).position(body, mjd)
    }
}
