//! # Text Rendering
//!
//! Turns event times and altitude profiles into terminal output: a
//! chronological event table and an ASCII chart of the sun's altitude over
//! the day. Rendering builds `String`s so it can be tested; the `draw_*`
//! functions only print.

use chrono::{DateTime, Utc};

use crate::events::SunTimes;
use crate::profile::DayProfile;

/// Chart height in text rows.
const ROWS: usize = 20;

/// Columns reserved for the Y-axis labels and axis line.
const Y_AXIS_WIDTH: usize = 5;

/// Samples per hour tick on the time axis.
const SAMPLES_PER_HOUR: usize = 6;

/// `HH:MM:SS` in UTC, or a placeholder for an undefined event.
pub fn format_time(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(time) => time.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

/// Format an altitude label with sign, dropping the fraction when whole.
fn format_altitude(altitude_deg: f64) -> String {
    if altitude_deg == 0.0 {
        " 0".to_string()
    } else if altitude_deg.fract() == 0.0 {
        format!("{:+.0}", altitude_deg)
    } else {
        format!("{:+.1}", altitude_deg)
    }
}

/// Events sorted by time, undefined ones last, one per line.
pub fn format_times(times: &SunTimes) -> String {
    let mut rows: Vec<_> = times.iter().collect();
    rows.sort_by_key(|(_, time)| time.map_or(i64::MAX, |t| t.timestamp_millis()));

    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (name, time) in rows {
        out.push_str(&format!("{:<width$}  {}\n", name, format_time(time), width = width));
    }
    out
}

/// Print the event table.
pub fn draw_times(times: &SunTimes) {
    print!("{}", format_times(times));
}

/// Render the altitude profile as an ASCII chart.
///
/// The peak sample is marked with `X`, the horizon (0°) with `─` when it
/// falls inside the plotted range.
pub fn render_ascii(profile: &DayProfile) -> String {
    let sample_count = profile.samples.len();
    if sample_count == 0 {
        return String::new();
    }

    let (min_alt, max_alt) = profile
        .samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), sample| {
            (min.min(sample.altitude_deg), max.max(sample.altitude_deg))
        });
    let span = (max_alt - min_alt).max(f64::EPSILON);

    let alt_to_row = |altitude: f64| {
        let normalized = (altitude - min_alt) / span;
        ((1.0 - normalized) * (ROWS as f64 - 1.0)).round() as usize
    };

    let mut grid = vec![vec![' '; sample_count + Y_AXIS_WIDTH]; ROWS];

    // Y-axis labels every 10 or 20 degrees
    let step = if span > 60.0 { 20.0 } else { 10.0 };
    let mut label_alt = (min_alt / step).ceil() * step;
    while label_alt <= max_alt {
        let row = alt_to_row(label_alt);
        if row < ROWS {
            let label = format!("{:<width$}", format_altitude(label_alt), width = Y_AXIS_WIDTH - 1);
            for (i, ch) in label.chars().take(Y_AXIS_WIDTH - 1).enumerate() {
                grid[row][i] = ch;
            }
            grid[row][Y_AXIS_WIDTH - 1] = '│';
        }
        label_alt += step;
    }

    if min_alt < 0.0 && max_alt > 0.0 {
        let horizon = alt_to_row(0.0);
        for cell in grid[horizon].iter_mut().skip(Y_AXIS_WIDTH) {
            *cell = '─';
        }
    }

    let peak_index = profile
        .samples
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.altitude_deg.total_cmp(&b.1.altitude_deg))
        .map(|(i, _)| i);

    for (column, sample) in profile.samples.iter().enumerate() {
        let row = alt_to_row(sample.altitude_deg);
        grid[row][column + Y_AXIS_WIDTH] = if Some(column) == peak_index { 'X' } else { '•' };
    }

    let mut out = String::new();
    out.push_str(&format!("Sun altitude on {} (UTC)\n", profile.day));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    let padding = " ".repeat(Y_AXIS_WIDTH);
    let ticks: String = (0..sample_count)
        .map(|i| if i % SAMPLES_PER_HOUR == 0 { '|' } else { ' ' })
        .collect();
    out.push_str(&format!("{padding}{ticks}\n"));

    let middle = "12h";
    let left_width = (sample_count / 2).saturating_sub(middle.len() / 2);
    let right_width = sample_count.saturating_sub(left_width + middle.len());
    out.push_str(&format!(
        "{padding}{:<left_width$}{middle}{:>right_width$}\n",
        "0h", "24h"
    ));
    out
}

/// Print the altitude chart.
pub fn draw_ascii(profile: &DayProfile) {
    print!("{}", render_ascii(profile));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::AltitudeSample;
    use chrono::{NaiveDate, TimeZone};

    fn test_profile() -> DayProfile {
        let altitudes = [-30.0, -10.0, 5.0, 20.0, 5.0, -10.0, -30.0];
        DayProfile {
            day: NaiveDate::from_ymd_opt(2013, 3, 5).unwrap(),
            samples: altitudes
                .iter()
                .enumerate()
                .map(|(i, &altitude_deg)| AltitudeSample {
                    minutes: i as u16 * 10,
                    altitude_deg,
                })
                .collect(),
        }
    }

    #[test]
    fn test_format_altitude() {
        assert_eq!(format_altitude(0.0), " 0");
        assert_eq!(format_altitude(10.0), "+10");
        assert_eq!(format_altitude(-20.0), "-20");
        assert_eq!(format_altitude(2.5), "+2.5");
    }

    #[test]
    fn test_format_time() {
        let t = Utc.with_ymd_and_hms(2013, 3, 5, 4, 34, 56).unwrap();
        assert_eq!(format_time(Some(t)), "04:34:56");
        assert_eq!(format_time(None), "--:--:--");
    }

    #[test]
    fn test_times_are_chronological() {
        let day = Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap();
        let times = crate::events::event_times(day, 50.5, 30.5, 0.0, &Default::default());
        let table = format_times(&times);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 14);
        assert!(lines[0].starts_with("nadir"));
        assert!(lines[13].starts_with("night "));
        assert!(table.contains("04:34:56"));
    }

    #[test]
    fn test_undefined_sorts_last() {
        let june = Utc.with_ymd_and_hms(2020, 6, 21, 0, 0, 0).unwrap();
        let times = crate::events::event_times(june, 78.0, 15.6, 0.0, &Default::default());
        let table = format_times(&times);
        let last = table.lines().last().unwrap();
        assert!(last.ends_with("--:--:--"));
    }

    #[test]
    fn test_ascii_rendering() {
        let chart = render_ascii(&test_profile());
        assert!(chart.starts_with("Sun altitude on 2013-03-05"));
        assert_eq!(chart.matches('X').count(), 1);
        assert!(chart.contains('─'), "horizon line expected");
        assert!(chart.contains("+20"));
    }

    #[test]
    fn test_empty_profile() {
        let profile = DayProfile {
            day: NaiveDate::from_ymd_opt(2013, 3, 5).unwrap(),
            samples: vec![],
        };
        assert!(render_ascii(&profile).is_empty());
        draw_ascii(&profile);
    }
}
