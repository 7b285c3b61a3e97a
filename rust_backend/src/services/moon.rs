//! Moon geometry for a candidate pointing.

use qtty::Degrees;

use super::{BodyEphemeris, MoonService, ServiceResult, SolarSystemBody};
use crate::geometry::{angular_separation, horizontal_coordinates};
use crate::models::MoonGeometry;
use crate::site::Site;
use crate::time::mjd_to_lst;

/// Derives Moon distance and altitude/azimuth from any ephemeris backend.
#[derive(Debug, Clone)]
pub struct EphemerisMoon<E> {
    ephemeris: E,
    site: Site,
}

impl<E: BodyEphemeris> EphemerisMoon<E> {
    pub fn new(ephemeris: E, site: Site) -> Self {
        Self { ephemeris, site }
    }
}

impl<E: BodyEphemeris> MoonService for EphemerisMoon<E> {
    fn moon_position(&self, mjd: f64, ra: Degrees, dec: Degrees) -> ServiceResult<MoonGeometry> {
        let moon = self.ephemeris.position(SolarSystemBody::Moon, mjd)?;
        let distance = angular_separation(moon.ra, moon.dec, ra, dec);

        let lst = mjd_to_lst(mjd, self.site.longitude);
        let horizontal = horizontal_coordinates(moon.ra, moon.dec, lst, self.site.latitude);

        Ok(MoonGeometry {
            distance,
            altitude: horizontal.altitude,
            azimuth: horizontal.azimuth,
        })
    }
}
