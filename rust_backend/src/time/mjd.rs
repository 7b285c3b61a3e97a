use chrono::{DateTime, Utc};

/// Julian Date of MJD 0.
pub const MJD_EPOCH_JD: f64 = 2_400_000.5;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// MJD epoch (1858-11-17 00:00:00 UTC) as Unix timestamp
const MJD_EPOCH_UNIX: i64 = -3_506_716_800;

/// Convert a Modified Julian Date to a Julian Date.
#[inline]
pub fn mjd_to_jd(mjd: f64) -> f64 {
    mjd + MJD_EPOCH_JD
}

/// Convert a Julian Date to a Modified Julian Date.
#[inline]
pub fn jd_to_mjd(jd: f64) -> f64 {
    jd - MJD_EPOCH_JD
}

/// Convert a UTC Modified Julian Date to a calendar timestamp.
///
/// Returns `None` for non-finite input or dates chrono cannot represent.
pub fn mjd_to_utc(mjd: f64) -> Option<DateTime<Utc>> {
    if !mjd.is_finite() {
        return None;
    }
    let total = mjd * SECONDS_PER_DAY;
    let secs = total.floor();
    let nanos = ((total - secs) * 1e9).round().min(999_999_999.0) as u32;
    if !(i64::MIN as f64..=i64::MAX as f64).contains(&secs) {
        return None;
    }
    let timestamp = MJD_EPOCH_UNIX.checked_add(secs as i64)?;
    DateTime::from_timestamp(timestamp, nanos)
}

/// Convert a calendar timestamp to a UTC Modified Julian Date.
pub fn utc_to_mjd(datetime: &DateTime<Utc>) -> f64 {
    let secs = (datetime.timestamp() - MJD_EPOCH_UNIX) as f64;
    let frac = f64::from(datetime.timestamp_subsec_nanos()) / 1e9;
    (secs + frac) / SECONDS_PER_DAY
}
