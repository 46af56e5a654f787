//! # Sun Position and Sunlight Phases
//!
//! This library computes where the sun stands in the sky and when it crosses
//! the altitudes that define sunrise, sunset, the three twilights and the
//! golden hour, for any date and place on Earth.
//!
//! ## Design Philosophy
//!
//! ### Closed-Form Ephemeris
//! - **Low precision, no tables**: the sun's mean elements come from a
//!   handful of trigonometric terms, good to about one arcminute
//! - **No iteration**: event times are solved directly from the hour angle,
//!   so every call costs a fixed, small amount of arithmetic
//! - **UTC only**: Julian dates are derived from Unix time; there is no
//!   leap-second or ΔT correction
//!
//! ### Undefined Is Data
//! Near the poles the sun may never reach a given altitude. That is an
//! expected outcome, not a failure: the event is `None`, a warning is
//! logged, and every other event is still reported.
//!
//! ### Scalars and Sequences
//! Every argument of [`get_position`] and [`get_times`] may be a single
//! value or a sequence (see [`vectorize::Column`]). Scalars are broadcast
//! against sequences and the result comes back in the same shape.
//!
//! ## Data Flow
//! 1. **Time**: timestamp → Julian date → days since J2000 ([`time`])
//! 2. **Ephemeris**: days → mean anomaly, ecliptic longitude, declination,
//!    right ascension ([`ephemeris`])
//! 3. **Position**: sidereal time and hour angle → azimuth/altitude
//!    ([`horizontal`])
//! 4. **Events**: solar noon plus one hour-angle solve per threshold in the
//!    phase table ([`events`], [`phases`])
//!
//! ## Example
//! ```
//! use chrono::{TimeZone, Utc};
//!
//! let date = Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap();
//!
//! let position = suncalc::get_position(date, 30.5, 50.5).unwrap().scalar().unwrap();
//! assert!(position.altitude < 0.0); // night in Kyiv
//!
//! let times = suncalc::get_times(date, 30.5, 50.5, 0.0).unwrap().scalar().unwrap();
//! let sunrise = times.get("sunrise").unwrap();
//! assert_eq!(sunrise.format("%H:%M:%S").to_string(), "04:34:56");
//! ```

use chrono::{DateTime, Utc};

pub mod config;
pub mod ephemeris;
pub mod error;
pub mod events;
pub mod horizontal;
pub mod phases;
pub mod profile;
pub mod renderer;
pub mod time;
pub mod vectorize;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, SunCalcError};
pub use events::SunTimes;
pub use horizontal::Position;
pub use phases::{HorizonDip, PhaseTable, SunPhase, SUN_PHASES};
pub use vectorize::{Column, PositionColumns, Shaped, TimesColumns};

/// Sun azimuth and altitude (radians) at `date` for the given longitude and
/// latitude (degrees).
///
/// Returns [`Shaped::Scalar`] when every argument is a scalar and
/// [`Shaped::Columns`] otherwise.
///
/// # Errors
/// [`SunCalcError::ShapeMismatch`] if two sequence arguments differ in
/// length.
pub fn get_position(
    date: impl Into<Column<DateTime<Utc>>>,
    lng: impl Into<Column<f64>>,
    lat: impl Into<Column<f64>>,
) -> Result<Shaped<Position, PositionColumns>, SunCalcError> {
    let (date, lng, lat) = (date.into(), lng.into(), lat.into());
    let rows = vectorize::broadcast_len(&[
        ("date", date.series_len()),
        ("lng", lng.series_len()),
        ("lat", lat.series_len()),
    ])?;

    let row = |i: usize| horizontal::position_at(*date.at(i), *lat.at(i), *lng.at(i));
    Ok(match rows {
        None => Shaped::Scalar(row(0)),
        Some(n) => Shaped::Columns((0..n).map(row).collect()),
    })
}

/// Sunlight phase times on the solar day containing `date`, for an observer
/// `height` metres above the horizon plane.
///
/// Produces `solar_noon`, `nadir` and the morning/evening pair of every
/// entry in [`SUN_PHASES`], 14 events in all. Events the sun never reaches
/// that day are `None`.
///
/// # Errors
/// [`SunCalcError::ShapeMismatch`] if two sequence arguments differ in
/// length.
pub fn get_times(
    date: impl Into<Column<DateTime<Utc>>>,
    lng: impl Into<Column<f64>>,
    lat: impl Into<Column<f64>>,
    height: impl Into<Column<f64>>,
) -> Result<Shaped<SunTimes, TimesColumns>, SunCalcError> {
    get_times_with(date, lng, lat, height, &PhaseTable::default())
}

/// [`get_times`] with an explicit phase table and horizon-dip model.
pub fn get_times_with(
    date: impl Into<Column<DateTime<Utc>>>,
    lng: impl Into<Column<f64>>,
    lat: impl Into<Column<f64>>,
    height: impl Into<Column<f64>>,
    table: &PhaseTable,
) -> Result<Shaped<SunTimes, TimesColumns>, SunCalcError> {
    let (date, lng, lat, height) = (date.into(), lng.into(), lat.into(), height.into());
    let rows = vectorize::broadcast_len(&[
        ("date", date.series_len()),
        ("lng", lng.series_len()),
        ("lat", lat.series_len()),
        ("height", height.series_len()),
    ])?;

    let row = |i: usize| events::event_times(*date.at(i), *lat.at(i), *lng.at(i), *height.at(i), table);
    Ok(match rows {
        None => Shaped::Scalar(row(0)),
        Some(n) => Shaped::Columns((0..n).map(row).collect()),
    })
}
