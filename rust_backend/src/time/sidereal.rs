//! Local apparent sidereal time for the observatory.
//!
//! UTC is converted to UT1 with a coarse analytic Earth-orientation model,
//! then GMST (Earth Rotation Angle plus the Capitaine et al. 2003 polynomial)
//! is corrected by the equation of the equinoxes and shifted by the site's
//! east longitude.
//!
//! The orientation model stands in for IERS Bulletin A tables. It is an
//! approximation fitted around MJD 57689 (late 2016) and drifts linearly
//! away from that epoch; see [`EOP_MODEL_VALID_MJD`].

use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use qtty::Degrees;
use serde::{Deserialize, Serialize};

use super::mjd::{mjd_to_jd, SECONDS_PER_DAY};
use crate::geometry::wrap_degrees;

/// Julian Date of the J2000.0 epoch.
pub const J2000_JD: f64 = 2_451_545.0;

/// Epochs (MJD) over which the Earth-orientation model is trusted.
pub const EOP_MODEL_VALID_MJD: RangeInclusive<f64> = 57_000.0..=61_000.0;

/// Polar motion and UT1−UTC at an epoch.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthOrientation {
    pub mjd: f64,
    /// Polar motion x (arcsec).
    pub x: f64,
    /// Polar motion y (arcsec).
    pub y: f64,
    /// UT1 − UTC (seconds).
    pub ut1_utc: f64,
}

impl EarthOrientation {
    /// `true` when the epoch lies outside [`EOP_MODEL_VALID_MJD`].
    pub fn is_extrapolated(&self) -> bool {
        !EOP_MODEL_VALID_MJD.contains(&self.mjd)
    }
}

/// Naval Observatory approximation of the Earth-orientation parameters.
///
/// Polar motion: annual and Chandler (435 d) terms. UT1−UTC: linear drift
/// minus the seasonal UT2−UT1 correction.
pub fn earth_orientation(mjd: f64) -> EarthOrientation {
    let besselian = 2000.0 + (mjd - 51_544.03) / 365.2422;
    let b = TAU * besselian;
    let ut2_ut1 = 0.022 * b.sin() - 0.012 * b.cos() - 0.006 * (2.0 * b).sin()
        + 0.007 * (2.0 * b).cos();

    let a = TAU * (mjd - 57_681.0) / 365.25;
    let c = TAU * (mjd - 57_681.0) / 435.0;
    let x = 0.1042 + 0.0809 * a.cos() - 0.0636 * a.sin() + 0.0229 * c.cos() - 0.0156 * c.sin();
    let y = 0.3713 - 0.0593 * a.cos() - 0.0798 * a.sin() - 0.0156 * c.cos() - 0.0229 * c.sin();

    let ut1_utc = -0.3259 - 0.00138 * (mjd - 57_689.0) - ut2_ut1;

    EarthOrientation { mjd, x, y, ut1_utc }
}

/// Greenwich Mean Sidereal Time in degrees, `[0, 360)`, at a UT1 Julian Date.
///
/// GMST = ERA + 0.014506″ + 4612.156534″·T + 1.3915817″·T² − …
/// (IERS Conventions 2010 Eq. 5.15; Capitaine et al. 2003, Table 2).
pub fn gmst_deg(jd_ut1: f64) -> f64 {
    let du = jd_ut1 - J2000_JD;
    let era_turns = 0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du;

    let t = du / 36_525.0;
    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t.powi(2)
        - 0.00000044 * t.powi(3)
        - 0.000029956 * t.powi(4)
        - 0.0000000368 * t.powi(5);

    let gmst = era_turns.rem_euclid(1.0) * 360.0 + poly_arcsec / 3600.0;
    wrap_degrees(Degrees::new(gmst)).value()
}

/// Equation of the equinoxes, Δψ·cos ε, in degrees.
///
/// Four-term nutation in longitude and obliquity (Meeus, ch. 22); good to
/// about 0.5″, which is far below what the tile windows resolve.
pub fn equation_of_equinoxes_deg(jd: f64) -> f64 {
    let t = (jd - J2000_JD) / 36_525.0;

    let omega = (125.04452 - 1934.136261 * t).to_radians();
    let sun = (280.4665 + 36_000.7698 * t).to_radians();
    let moon = (218.3165 + 481_267.8813 * t).to_radians();

    let dpsi = -17.20 * omega.sin() - 1.32 * (2.0 * sun).sin() - 0.23 * (2.0 * moon).sin()
        + 0.21 * (2.0 * omega).sin();
    let deps = 9.20 * omega.cos() + 0.57 * (2.0 * sun).cos() + 0.10 * (2.0 * moon).cos()
        - 0.09 * (2.0 * omega).cos();

    let eps0 = 84_381.448 - 46.8150 * t - 0.00059 * t.powi(2) + 0.001813 * t.powi(3);
    let eps = ((eps0 + deps) / 3600.0).to_radians();

    dpsi * eps.cos() / 3600.0
}

/// Local apparent sidereal time at `longitude` (east-positive) for a UTC MJD.
pub fn mjd_to_lst(mjd: f64, longitude: Degrees) -> Degrees {
    let eop = earth_orientation(mjd);
    if eop.is_extrapolated() {
        log::debug!(
            "Earth orientation extrapolated at MJD {:.3} (UT1-UTC = {:.3} s)",
            mjd,
            eop.ut1_utc
        );
    }

    let jd_ut1 = mjd_to_jd(mjd) + eop.ut1_utc / SECONDS_PER_DAY;
    let gast = gmst_deg(jd_ut1) + equation_of_equinoxes_deg(jd_ut1);
    wrap_degrees(Degrees::new(gast + longitude.value()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::Site;

    /// USNO low-precision GMST, used as an independent reference.
    fn usno_gmst_deg(jd: f64) -> f64 {
        let d = jd - J2000_JD;
        (18.697374558 + 24.06570982441908 * d).rem_euclid(24.0) * 15.0
    }

    #[test]
    fn test_gmst_at_j2000() {
        let gmst = gmst_deg(J2000_JD);
        assert!((gmst - 280.460_618).abs() < 1e-4, "GMST = {gmst}");
    }

    #[test]
    fn test_gmst_matches_usno_formula() {
        for mjd in [57_689.0, 58_849.25, 60_000.3] {
            let jd = mjd_to_jd(mjd);
            let diff = gmst_deg(jd) - usno_gmst_deg(jd);
            assert!(diff.abs() < 1e-4, "MJD {mjd}: diff {diff}");
        }
    }

    #[test]
    fn test_gmst_range() {
        for jd in [2_451_545.0, 2_451_544.5, 2_460_000.5, 2_440_000.5] {
            let g = gmst_deg(jd);
            assert!((0.0..360.0).contains(&g), "GMST out of range: {g}");
        }
    }

    #[test]
    fn test_orientation_at_fit_epoch() {
        let eop = earth_orientation(57_689.0);
        assert!((eop.ut1_utc + 0.3015).abs() < 1e-3, "UT1-UTC = {}", eop.ut1_utc);
        assert!((eop.x - 0.1966).abs() < 1e-3);
        assert!((eop.y - 0.2835).abs() < 1e-3);
        assert!(!eop.is_extrapolated());
    }

    #[test]
    fn test_orientation_outside_window_is_flagged() {
        assert!(earth_orientation(51_544.5).is_extrapolated());
        assert!(earth_orientation(70_000.0).is_extrapolated());
    }

    #[test]
    fn test_equation_of_equinoxes_is_small() {
        for mjd in [51_544.5, 57_689.0, 60_000.3] {
            let eq = equation_of_equinoxes_deg(mjd_to_jd(mjd));
            // |Δψ cos ε| never exceeds ~18″.
            assert!(eq.abs() < 0.0055, "MJD {mjd}: {eq}");
        }
    }

    #[test]
    fn test_lst_at_greenwich_tracks_gmst() {
        let lst = mjd_to_lst(57_689.0, Degrees::new(0.0));
        let reference = usno_gmst_deg(mjd_to_jd(57_689.0));
        assert!((lst.value() - reference).abs() < 0.01, "LST = {}", lst.value());
    }

    #[test]
    fn test_lst_at_kitt_peak() {
        let site = Site::kitt_peak();
        let lst = mjd_to_lst(57_689.0, site.longitude);
        assert!((lst.value() - 285.1684).abs() < 1e-3, "LST = {}", lst.value());
    }

    #[test]
    fn test_lst_advances_one_sidereal_turn_per_sidereal_day() {
        let site = Site::kitt_peak();
        let a = mjd_to_lst(60_000.1, site.longitude).value();
        let b = mjd_to_lst(60_000.1 + 1.0 / 24.0, site.longitude).value();
        let advance = (b - a).rem_euclid(360.0);
        // One solar hour is 15.041 sidereal degrees.
        assert!((advance - 15.041).abs() < 0.001, "advance = {advance}");
    }
}
