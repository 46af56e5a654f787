//! Low-precision solar ephemeris.
//!
//! Closed-form mean elements of the sun, accurate to roughly one arcminute
//! for dates within a couple of centuries of J2000. All angles are radians,
//! all times are days since J2000 unless noted. The coefficients must stay
//! exactly as written: the reference sunrise/sunset tables depend on them.

use std::f64::consts::{PI, TAU};

use crate::time::J2000;

/// Degrees → radians factor.
pub const RAD: f64 = PI / 180.0;

/// Obliquity of the ecliptic, held fixed at its J2000 value.
pub const OBLIQUITY: f64 = RAD * 23.4397;

/// Ecliptic longitude of Earth's perihelion.
const PERIHELION: f64 = RAD * 102.9372;

/// Mean solar elements at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarElements {
    /// Mean anomaly, reduced to [0, 2π)
    pub mean_anomaly: f64,
    /// Apparent ecliptic longitude
    pub ecliptic_longitude: f64,
    /// Equatorial declination
    pub declination: f64,
    /// Equatorial right ascension
    pub right_ascension: f64,
    /// Equation of time, in days
    pub equation_of_time: f64,
}

impl SolarElements {
    /// Elements at `days` since J2000.
    pub fn at(days: f64) -> Self {
        let m = solar_mean_anomaly(days);
        let l = ecliptic_longitude(m);
        Self {
            mean_anomaly: m,
            ecliptic_longitude: l,
            declination: declination(l, 0.0),
            right_ascension: right_ascension(l, 0.0),
            equation_of_time: equation_of_time(m, l),
        }
    }
}

/// Elements at a Julian date.
pub fn solar_elements(julian_date: f64) -> SolarElements {
    SolarElements::at(julian_date - J2000)
}

/// Mean anomaly: `357.5291° + 0.98560028°/day`.
pub fn solar_mean_anomaly(days: f64) -> f64 {
    (RAD * (357.5291 + 0.985_600_28 * days)).rem_euclid(TAU)
}

/// Ecliptic longitude from the mean anomaly, via a three-term equation of
/// centre plus the perihelion longitude.
pub fn ecliptic_longitude(mean_anomaly: f64) -> f64 {
    let m = mean_anomaly;
    let center = RAD * (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    m + center + PERIHELION + PI
}

/// Declination of a point at ecliptic longitude `l`, latitude `b`.
pub fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

/// Right ascension of a point at ecliptic longitude `l`, latitude `b`.
pub fn right_ascension(l: f64, b: f64) -> f64 {
    (l.sin() * OBLIQUITY.cos() - b.tan() * OBLIQUITY.sin()).atan2(l.cos())
}

/// Equation of time in days (transit correction).
pub fn equation_of_time(mean_anomaly: f64, ecliptic_longitude: f64) -> f64 {
    0.0053 * mean_anomaly.sin() - 0.0069 * (2.0 * ecliptic_longitude).sin()
}

/// Local sidereal time for an observer at west longitude `lw`.
pub fn sidereal_time(days: f64, lw: f64) -> f64 {
    RAD * (280.16 + 360.985_623_5 * days) - lw
}

/// Julian date of solar transit for day offset `ds`.
pub fn solar_transit_j(ds: f64, mean_anomaly: f64, ecliptic_longitude: f64) -> f64 {
    J2000 + ds + equation_of_time(mean_anomaly, ecliptic_longitude)
}
