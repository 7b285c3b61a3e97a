//! Time scales used by the selector: MJD/UTC conversions and local sidereal
//! time at the site.

pub mod mjd;
pub mod sidereal;

pub use mjd::{jd_to_mjd, mjd_to_jd, mjd_to_utc, utc_to_mjd, MJD_EPOCH_JD, SECONDS_PER_DAY};
pub use sidereal::{earth_orientation, mjd_to_lst, EarthOrientation};
