//! # Sun Event Times
//!
//! Solves for the instants at which the sun's centre crosses each altitude
//! in a [`PhaseTable`] on one solar day.
//!
//! ## Algorithm
//! 1. Pick the solar day (Julian cycle `n`) containing the query instant for
//!    the observer's longitude, and the mean transit `ds` of that day.
//! 2. Evaluate the solar elements once, at `ds`. Solar noon is the transit
//!    corrected by the equation of time; nadir is exactly half a day
//!    earlier. No iteration: this trades a few seconds of accuracy for a
//!    closed form.
//! 3. For every threshold `h`, solve
//!    `cos H = (sin h - sin φ sin δ) / (cos φ cos δ)`. The evening event is
//!    the transit at hour angle `+H`, the morning event its mirror image
//!    about solar noon.
//!
//! ## Undefined events
//! Near the poles the right-hand side leaves `[-1, 1]` (the sun stays above
//! or below the threshold all day) or turns NaN when `cos φ cos δ` vanishes.
//! Both members of the pair are then `None` and a warning is logged; the
//! remaining events are unaffected.

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::ephemeris::{solar_transit_j, SolarElements, RAD};
use crate::phases::{PhaseTable, NADIR, SOLAR_NOON};
use crate::time::{approx_transit, from_julian, julian_cycle, to_days};

/// Event name → instant for one date and location, in table order.
///
/// `None` marks an event that does not happen on that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SunTimes {
    events: Vec<(&'static str, Option<DateTime<Utc>>)>,
}

impl SunTimes {
    pub(crate) fn from_events(events: Vec<(&'static str, Option<DateTime<Utc>>)>) -> Self {
        Self { events }
    }

    /// Instant of `name`, or `None` if the event is undefined or unknown.
    pub fn get(&self, name: &str) -> Option<DateTime<Utc>> {
        self.events
            .iter()
            .find(|(event, _)| *event == name)
            .and_then(|(_, time)| *time)
    }

    /// Whether `name` is one of the events in this result.
    pub fn contains(&self, name: &str) -> bool {
        self.events.iter().any(|(event, _)| *event == name)
    }

    pub fn solar_noon(&self) -> Option<DateTime<Utc>> {
        self.get(SOLAR_NOON)
    }

    pub fn nadir(&self) -> Option<DateTime<Utc>> {
        self.get(NADIR)
    }

    /// Events in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<DateTime<Utc>>)> + '_ {
        self.events.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Serialize for SunTimes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.events.len()))?;
        for (name, time) in &self.events {
            map.serialize_entry(name, time)?;
        }
        map.end()
    }
}

/// `cos H` for the sun's centre to stand at altitude `h` (radians).
pub fn cos_hour_angle(h: f64, phi: f64, dec: f64) -> f64 {
    (h.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos())
}

/// Hour angle at which the sun reaches altitude `h`, if it does at all.
pub fn hour_angle(h: f64, phi: f64, dec: f64) -> Option<f64> {
    let cos_h = cos_hour_angle(h, phi, dec);
    (-1.0..=1.0).contains(&cos_h).then(|| cos_h.acos())
}

/// The solar day containing a query instant.
#[derive(Debug, Clone, Copy)]
struct SolarDay {
    /// Julian cycle index
    n: f64,
    /// Sun's elements at the mean transit
    sun: SolarElements,
    /// Julian date of solar noon
    j_noon: f64,
}

impl SolarDay {
    fn containing(date: DateTime<Utc>, lw: f64) -> Self {
        let n = julian_cycle(to_days(date), lw);
        let ds = approx_transit(0.0, lw, n);
        let sun = SolarElements::at(ds);
        let j_noon = solar_transit_j(ds, sun.mean_anomaly, sun.ecliptic_longitude);
        Self { n, sun, j_noon }
    }

    /// Solar noon and the nadir exactly 12 hours before it.
    fn noon_and_nadir(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let noon = from_julian(self.j_noon);
        let nadir = noon.and_then(|t| t.checked_sub_signed(Duration::hours(12)));
        (noon, nadir)
    }
}

/// Solar noon and the preceding nadir on the solar day containing `date`.
pub fn solar_noon_and_nadir(date: DateTime<Utc>, lng: f64) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    SolarDay::containing(date, RAD * -lng).noon_and_nadir()
}

/// Every event of `table` on the solar day containing `date`.
///
/// `lat`/`lng` in degrees, `height` in metres above the horizon plane.
pub fn event_times(
    date: DateTime<Utc>,
    lat: f64,
    lng: f64,
    height: f64,
    table: &PhaseTable,
) -> SunTimes {
    let lw = RAD * -lng;
    let phi = RAD * lat;

    let day = SolarDay::containing(date, lw);
    let (n, j_noon) = (day.n, day.j_noon);
    let (m, l, dec) = (
        day.sun.mean_anomaly,
        day.sun.ecliptic_longitude,
        day.sun.declination,
    );
    debug!(
        "solar day {n} at lat {lat}, lng {lng}: noon JD {j_noon:.6}, dec {:.4}°",
        dec.to_degrees()
    );

    let (noon, nadir) = day.noon_and_nadir();
    let mut events = Vec::with_capacity(2 + table.phases.len() * 2);
    events.push((SOLAR_NOON, noon));
    events.push((NADIR, nadir));

    for phase in table.phases {
        let h = table.target_altitude_deg(phase, height) * RAD;
        match hour_angle(h, phi, dec) {
            Some(w) => {
                let j_set = solar_transit_j(approx_transit(w, lw, n), m, l);
                let j_rise = j_noon - (j_set - j_noon);
                events.push((phase.rise, from_julian(j_rise)));
                events.push((phase.set, from_julian(j_set)));
            }
            None => {
                let cos_h = cos_hour_angle(h, phi, dec);
                let state = if cos_h > 1.0 {
                    "stays below"
                } else if cos_h < -1.0 {
                    "stays above"
                } else {
                    "is degenerate at"
                };
                warn!(
                    "sun {state} {:.3}° on {} at lat {lat}, lng {lng}; {}/{} undefined",
                    phase.angle_deg,
                    date.date_naive(),
                    phase.rise,
                    phase.set
                );
                events.push((phase.rise, None));
                events.push((phase.set, None));
            }
        }
    }

    SunTimes::from_events(events)
}
