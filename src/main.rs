//! # Sun Report Entry Point
//!
//! Prints the sunlight phases and altitude curve for one day at the
//! configured observer location.
//!
//! ```text
//! suncalc [--config=PATH] [--date=YYYY-MM-DD] [--json] [--write-config]
//! ```
//!
//! Without `--date` the current UTC date is used. Logging goes to stderr and
//! follows `RUST_LOG` (default `warn`).

use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info};
use serde::Serialize;
use std::env;

use suncalc::config::{Config, ObserverConfig, CONFIG_FILE};
use suncalc::profile::DayProfile;
use suncalc::renderer::{draw_ascii, draw_times};
use suncalc::time::approximate_local_noon;
use suncalc::{get_times_with, SunTimes};

/// Command line options.
#[derive(Debug, Default)]
struct Args {
    config_path: Option<String>,
    date: Option<NaiveDate>,
    json: bool,
    write_config: bool,
}

impl Args {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut parsed = Args::default();
        for arg in args {
            if let Some(path) = arg.strip_prefix("--config=") {
                parsed.config_path = Some(path.to_string());
            } else if let Some(date) = arg.strip_prefix("--date=") {
                let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .with_context(|| format!("invalid --date `{date}`, expected YYYY-MM-DD"))?;
                parsed.date = Some(date);
            } else if arg == "--json" {
                parsed.json = true;
            } else if arg == "--write-config" {
                parsed.write_config = true;
            } else {
                bail!("unknown argument `{arg}`");
            }
        }
        Ok(parsed)
    }
}

/// Everything the JSON output contains.
#[derive(Serialize)]
struct Report<'a> {
    observer: &'a ObserverConfig,
    date: NaiveDate,
    query: DateTime<Utc>,
    times: &'a SunTimes,
    profile: &'a DayProfile,
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse(env::args().skip(1))?;
    let config_path = args.config_path.as_deref().unwrap_or(CONFIG_FILE);

    if args.write_config {
        Config::rewrite_path(config_path).with_context(|| format!("writing {config_path}"))?;
        return Ok(());
    }

    let config = Config::load_from_path(config_path);

    let observer = &config.observer;
    let day = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let query = approximate_local_noon(day, observer.longitude).with_context(|| {
        format!("longitude {} has no local noon on {day}", observer.longitude)
    })?;
    info!(
        "Computing {} for {} ({}, {}) at {} m",
        day, observer.name, observer.latitude, observer.longitude, observer.height
    );
    debug!("Query instant {query}");

    let times = get_times_with(
        query,
        observer.longitude,
        observer.latitude,
        observer.height,
        &config.phase_table(),
    )?
    .scalar()
    .context("scalar input produced column output")?;

    let profile = DayProfile::compute(day, observer.latitude, observer.longitude)?;

    if args.json || config.display.json {
        let report = Report {
            observer,
            date: day,
            query,
            times: &times,
            profile: &profile,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} ({:.4}, {:.4}, {} m) on {}, times in UTC",
        observer.name, observer.latitude, observer.longitude, observer.height, day
    );
    println!();
    draw_times(&times);
    if config.display.chart {
        println!();
        draw_ascii(&profile);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_all_flags() {
        let args = Args::parse(strings(&[
            "--config=alps.toml",
            "--date=2013-03-05",
            "--json",
            "--write-config",
        ]))
        .unwrap();
        assert_eq!(args.config_path.as_deref(), Some("alps.toml"));
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2013, 3, 5));
        assert!(args.json);
        assert!(args.write_config);
    }

    #[test]
    fn no_flags_is_default() {
        let args = Args::parse(Vec::new()).unwrap();
        assert!(args.config_path.is_none());
        assert!(args.date.is_none());
        assert!(!args.json);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Args::parse(strings(&["--date=05/03/2013"])).is_err());
        assert!(Args::parse(strings(&["--stdout"])).is_err());
    }
}
