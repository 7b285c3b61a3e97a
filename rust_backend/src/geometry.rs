//! Spherical astronomy helpers: equatorial to horizontal coordinates and
//! great-circle separation. All angles are in degrees.

use qtty::Degrees;
use serde::{Deserialize, Serialize};

/// Wraps an angle into `[0, 360)`.
pub fn wrap_degrees(angle: Degrees) -> Degrees {
    let wrapped = angle.value().rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.
    Degrees::new(if wrapped >= 360.0 { 0.0 } else { wrapped })
}

/// Local horizontal coordinates of a sky position.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizontalCoordinates {
    pub altitude: Degrees,
    /// Measured from north through east, in `[0, 360)`.
    pub azimuth: Degrees,
}

/// Converts an equatorial position to altitude/azimuth for an observer at
/// `latitude` when the local sidereal time is `lst`.
///
/// Inputs should be observed (not mean) coordinates. Azimuth is unstable for
/// positions next to the celestial pole; that case is not special-cased.
pub fn horizontal_coordinates(
    ra: Degrees,
    dec: Degrees,
    lst: Degrees,
    latitude: Degrees,
) -> HorizontalCoordinates {
    let h = wrap_degrees(lst - ra).value().to_radians();
    let d = dec.value().to_radians();
    let phi = latitude.value().to_radians();

    let (sin_h, cos_h) = h.sin_cos();
    let (sin_d, cos_d) = d.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();

    let sin_alt = (sin_phi * sin_d + cos_phi * cos_d * cos_h).clamp(-1.0, 1.0);
    let altitude = sin_alt.asin().to_degrees();

    let y = -cos_d * sin_h;
    let x = sin_d * cos_phi - cos_d * cos_h * sin_phi;
    let azimuth = wrap_degrees(Degrees::new(y.atan2(x).to_degrees()));

    HorizontalCoordinates {
        altitude: Degrees::new(altitude),
        azimuth,
    }
}

/// Great-circle distance between two equatorial positions.
///
/// Spherical law of cosines, written as
/// `cos θ = cos(δ1 − δ2) − cos δ1 cos δ2 (1 − cos Δα)` so that coincident
/// points give exactly zero; the cosine is clamped to `[-1, 1]`.
pub fn angular_separation(ra1: Degrees, dec1: Degrees, ra2: Degrees, dec2: Degrees) -> Degrees {
    let d1 = dec1.value().to_radians();
    let d2 = dec2.value().to_radians();
    let delta_ra = (ra1.value() - ra2.value()).to_radians();

    let cos_theta = (d1 - d2).cos() - d1.cos() * d2.cos() * (1.0 - delta_ra.cos());
    Degrees::new(cos_theta.clamp(-1.0, 1.0).acos().to_degrees())
}
