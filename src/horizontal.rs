//! # Horizontal Coordinates
//!
//! Converts the sun's equatorial coordinates into the observer's local sky.
//!
//! ## Conventions
//! - **Azimuth** is measured from south, increasing towards west, in
//!   `[-π, π]`. A value of `-π/2` is due east, `π/2` due west.
//! - **Altitude** is the geometric elevation above the horizon plane, in
//!   `[-π/2, π/2]`. No refraction is applied.
//! - **Hour angle** `H = LST - α`, positive after transit.
//!
//! Latitudes near ±90° lose precision (`tan δ · cos φ` tends to zero) but
//! never panic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ephemeris::{sidereal_time, SolarElements, RAD};
use crate::time::to_days;

/// Sun position in the observer's horizontal frame, radians.
///
/// # Example
/// ```
/// use suncalc::Position;
///
/// let due_south_horizon = Position { azimuth: 0.0, altitude: 0.0 };
/// assert_eq!(due_south_horizon.altitude_deg(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Direction along the horizon, from south towards west
    pub azimuth: f64,
    /// Elevation above the horizon
    pub altitude: f64,
}

impl Position {
    /// Azimuth in degrees.
    pub fn azimuth_deg(&self) -> f64 {
        self.azimuth.to_degrees()
    }

    /// Altitude in degrees.
    pub fn altitude_deg(&self) -> f64 {
        self.altitude.to_degrees()
    }
}

/// Azimuth for hour angle `h`, latitude `phi`, declination `dec`.
pub fn azimuth(h: f64, phi: f64, dec: f64) -> f64 {
    h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos())
}

/// Altitude for hour angle `h`, latitude `phi`, declination `dec`.
pub fn altitude(h: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos()).asin()
}

/// Equatorial → horizontal transform. All arguments in radians.
pub fn to_horizontal(hour_angle: f64, declination: f64, latitude: f64) -> Position {
    Position {
        azimuth: azimuth(hour_angle, latitude, declination),
        altitude: altitude(hour_angle, latitude, declination),
    }
}

/// Sun position at `date` for an observer at `lat`/`lng` degrees.
pub fn position_at(date: DateTime<Utc>, lat: f64, lng: f64) -> Position {
    let lw = RAD * -lng;
    let phi = RAD * lat;
    let d = to_days(date);

    let sun = SolarElements::at(d);
    let h = sidereal_time(d, lw) - sun.right_ascension;

    to_horizontal(h, sun.declination, phi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn transit_on_equator_at_equinox_is_zenith() {
        let p = to_horizontal(0.0, 0.0, 0.0);
        assert!((p.altitude - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn transit_altitude_is_colatitude_plus_declination() {
        let phi = 50.0_f64.to_radians();
        let dec = 10.0_f64.to_radians();
        let p = to_horizontal(0.0, dec, phi);
        assert!((p.altitude_deg() - 50.0).abs() < 1e-9);
        assert!(p.azimuth.abs() < 1e-12, "transit should be due south");
    }

    #[test]
    fn morning_sun_is_east_of_south() {
        let phi = 45.0_f64.to_radians();
        let p = to_horizontal(-PI / 3.0, 0.0, phi);
        assert!(p.azimuth < 0.0);
        let q = to_horizontal(PI / 3.0, 0.0, phi);
        assert!((p.azimuth + q.azimuth).abs() < 1e-12, "symmetric about meridian");
        assert!((p.altitude - q.altitude).abs() < 1e-12);
    }

    #[test]
    fn ranges_hold_for_extreme_latitudes() {
        for lat in [-90.0_f64, -89.999, 0.0, 89.999, 90.0] {
            for step in 0..24 {
                let h = f64::from(step) * PI / 12.0;
                let p = to_horizontal(h, 0.3, lat.to_radians());
                assert!(p.azimuth.abs() <= PI);
                assert!(p.altitude.abs() <= FRAC_PI_2);
            }
        }
    }
}
