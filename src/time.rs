//! # Time-Scale Conversion
//!
//! Maps civil UTC timestamps onto the continuous Julian date scale used by
//! the ephemeris, and back again.
//!
//! The conversion goes through Unix milliseconds:
//!
//! ```text
//! JD = unix_ms / 86_400_000 - 0.5 + 2_440_588
//! ```
//!
//! `2_440_588` is the Julian day number of 1970-01-01 and the `-0.5` moves
//! the day boundary from noon (Julian convention) to midnight. There is no
//! leap-second or ΔT handling: UTC is treated as a uniform time scale.

use std::f64::consts::TAU;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Milliseconds in one day.
pub const DAY_MS: f64 = 86_400_000.0;

/// Julian day number of the Unix epoch (1970-01-01).
pub const J1970: f64 = 2_440_588.0;

/// Julian date of the J2000.0 epoch.
pub const J2000: f64 = 2_451_545.0;

/// Mean-transit offset in days used by the Julian cycle approximation.
pub const J0: f64 = 0.0009;

/// Convert a UTC timestamp to a Julian date.
pub fn to_julian(date: DateTime<Utc>) -> f64 {
    let ms = date.timestamp() as f64 * 1000.0 + f64::from(date.timestamp_subsec_nanos()) / 1.0e6;
    ms / DAY_MS - 0.5 + J1970
}

/// Convert a Julian date back to a UTC timestamp.
///
/// The result is rounded to the nearest microsecond. Returns `None` when
/// `julian_date` is NaN/infinite or falls outside chrono's representable
/// range, which is how undefined event times propagate.
pub fn from_julian(julian_date: f64) -> Option<DateTime<Utc>> {
    if !julian_date.is_finite() {
        return None;
    }
    let micros = ((julian_date + 0.5 - J1970) * DAY_MS * 1000.0).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }
    let micros = micros as i64;
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1000) as u32;
    DateTime::from_timestamp(secs, nanos)
}

/// Days (fractional) elapsed since J2000.0.
pub fn to_days(date: DateTime<Utc>) -> f64 {
    to_julian(date) - J2000
}

/// Index of the solar day containing `days` for an observer at west
/// longitude `lw` (radians, west positive).
pub fn julian_cycle(days: f64, lw: f64) -> f64 {
    (days - J0 - lw / TAU).round()
}

/// Approximate day offset (since J2000) at which the local hour angle
/// reaches `ht` during cycle `n`. With `ht = 0` this is the mean transit.
pub fn approx_transit(ht: f64, lw: f64, n: f64) -> f64 {
    J0 + (ht + lw) / TAU + n
}

/// Approximate UTC instant of local solar noon on calendar `day` at
/// longitude `lng` (degrees, east positive).
///
/// `noon = 00:00 UTC + 12h - lng / 15°·h`. Feeding this to the event solver
/// selects the solar day the observer would call `day`, even far from
/// Greenwich where 00:00 UTC belongs to the neighbouring local day.
///
/// Returns `None` when `lng` is not finite or pushes the instant outside
/// chrono's representable range.
pub fn approximate_local_noon(day: NaiveDate, lng: f64) -> Option<DateTime<Utc>> {
    let offset_ms = (DAY_MS * (0.5 - lng / 360.0)).round();
    if !offset_ms.is_finite() || offset_ms.abs() >= i64::MAX as f64 {
        return None;
    }
    let midnight = Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN));
    midnight.checked_add_signed(Duration::try_milliseconds(offset_ms as i64)?)
}
