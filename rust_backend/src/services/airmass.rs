//! Plane-parallel atmosphere airmass.

use qtty::Degrees;

use super::{AirmassService, ServiceResult};
use crate::geometry::horizontal_coordinates;
use crate::site::Site;

/// `X = 1 / sin(alt)` at the site latitude.
///
/// Valid for small to moderate zenith distances. Pointings at or below the
/// horizon report `f64::INFINITY` so any airmass limit rejects them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaneParallelAirmass {
    latitude: Degrees,
}

impl PlaneParallelAirmass {
    pub fn new(latitude: Degrees) -> Self {
        Self { latitude }
    }

    pub fn for_site(site: &Site) -> Self {
        Self::new(site.latitude)
    }
}

impl Default for PlaneParallelAirmass {
    fn default() -> Self {
        Self::for_site(&Site::kitt_peak())
    }
}

impl AirmassService for PlaneParallelAirmass {
    fn airmass(&self, ra: Degrees, dec: Degrees, lst: Degrees) -> ServiceResult<f64> {
        let altitude = horizontal_coordinates(ra, dec, lst, self.latitude).altitude;
        let sin_alt = altitude.value().to_radians().sin();
        if sin_alt <= 0.0 {
            return Ok(f64::INFINITY);
        }
        Ok(1.0 / sin_alt)
    }
}
