//! # Daily Altitude Profile
//!
//! Samples the sun's altitude every 10 minutes across one UTC day, giving a
//! compact curve for charts and for quick daylight checks.
//!
//! ## Layout
//! - **145 samples**: 00:00 to 24:00 inclusive, so both midnights appear
//! - **Minutes since midnight** stored as `u16` (0..=1440)
//! - All samples come from a single vectorized [`get_position`] call

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SunCalcError;
use crate::vectorize::Shaped;
use crate::get_position;

/// Minutes between consecutive samples.
pub const SAMPLE_INTERVAL_MINUTES: u16 = 10;

/// Samples in one profile: 24 h at 10-minute steps, both ends included.
pub const SAMPLES_PER_DAY: usize = 145;

/// Sun altitude at one moment of the day.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AltitudeSample {
    /// Minutes since 00:00 UTC (0 to 1440)
    pub minutes: u16,
    /// Altitude of the sun's centre in degrees
    pub altitude_deg: f64,
}

/// Altitude curve for one UTC day at one location.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DayProfile {
    pub day: NaiveDate,
    pub samples: Vec<AltitudeSample>,
}

impl DayProfile {
    /// Sample the sun over `day` at `lat`/`lng` degrees.
    pub fn compute(day: NaiveDate, lat: f64, lng: f64) -> Result<Self, SunCalcError> {
        let midnight = Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN));
        let dates: Vec<DateTime<Utc>> = (0..SAMPLES_PER_DAY)
            .map(|i| midnight + Duration::minutes(i as i64 * i64::from(SAMPLE_INTERVAL_MINUTES)))
            .collect();

        let altitudes = match get_position(dates, lng, lat)? {
            Shaped::Columns(columns) => columns.altitude,
            Shaped::Scalar(position) => vec![position.altitude],
        };

        let mut samples = Vec::with_capacity(SAMPLES_PER_DAY);
        for (i, altitude) in altitudes.into_iter().enumerate() {
            samples.push(AltitudeSample {
                minutes: i as u16 * SAMPLE_INTERVAL_MINUTES,
                altitude_deg: altitude.to_degrees(),
            });
        }

        Ok(Self { day, samples })
    }

    /// Highest sample of the day.
    pub fn peak(&self) -> Option<AltitudeSample> {
        self.samples
            .iter()
            .copied()
            .max_by(|a, b| a.altitude_deg.total_cmp(&b.altitude_deg))
    }

    /// Lowest sample of the day.
    pub fn trough(&self) -> Option<AltitudeSample> {
        self.samples
            .iter()
            .copied()
            .min_by(|a, b| a.altitude_deg.total_cmp(&b.altitude_deg))
    }

    /// Minutes with the sun's centre above `threshold_deg`, to sample
    /// resolution.
    pub fn minutes_above(&self, threshold_deg: f64) -> u32 {
        let count = self
            .samples
            .windows(2)
            .filter(|w| w[0].altitude_deg > threshold_deg && w[1].altitude_deg > threshold_deg)
            .count();
        count as u32 * u32::from(SAMPLE_INTERVAL_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kyiv_march() -> DayProfile {
        let day = NaiveDate::from_ymd_opt(2013, 3, 5).unwrap();
        DayProfile::compute(day, 50.5, 30.5).unwrap()
    }

    #[test]
    fn sample_layout() {
        let profile = kyiv_march();
        assert_eq!(profile.samples.len(), SAMPLES_PER_DAY);
        assert_eq!(profile.samples.capacity(), SAMPLES_PER_DAY);
        assert_eq!(profile.samples[0].minutes, 0);
        assert_eq!(profile.samples[144].minutes, 1440);
        for w in profile.samples.windows(2) {
            assert_eq!(w[1].minutes - w[0].minutes, SAMPLE_INTERVAL_MINUTES);
        }
    }

    #[test]
    fn peak_near_solar_noon() {
        // Solar noon is 10:10:57 UTC
        let peak = kyiv_march().peak().unwrap();
        assert!((600..=620).contains(&peak.minutes), "peak at {}", peak.minutes);
        // 90 - 50.5 + dec(-5.9)
        assert!((peak.altitude_deg - 33.6).abs() < 0.5, "peak {}", peak.altitude_deg);
    }

    #[test]
    fn trough_near_nadir() {
        let trough = kyiv_march().trough().unwrap();
        assert!(trough.altitude_deg < -40.0);
        assert!(trough.minutes < 60 || trough.minutes > 1300);
    }

    #[test]
    fn daylight_about_eleven_hours() {
        // Sunrise 04:34:56, sunset 15:46:57
        let minutes = kyiv_march().minutes_above(-0.833);
        assert!((650..=690).contains(&minutes), "daylight {minutes} min");
    }
}
