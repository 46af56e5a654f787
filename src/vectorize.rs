//! # Scalar/Sequence Broadcasting
//!
//! Lets every public entry point take either a single value or a sequence
//! for each argument. All sequences must have the same length; scalars are
//! repeated against them. If every argument is a scalar the result is a
//! single row, otherwise it is column-aligned with one entry per input row
//! in input order.
//!
//! ```
//! use suncalc::vectorize::Column;
//!
//! let lat: Column<f64> = 50.5.into();
//! let lng: Column<f64> = vec![30.5, 31.0, 31.5].into();
//! assert!(lat.is_scalar());
//! assert_eq!(lng.series_len(), Some(3));
//! ```

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

use crate::error::SunCalcError;
use crate::events::SunTimes;
use crate::horizontal::Position;

/// One argument: a single value or one value per row.
#[derive(Debug, Clone, PartialEq)]
pub enum Column<T> {
    Scalar(T),
    Series(Vec<T>),
}

impl<T> Column<T> {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Row count if this is a sequence.
    pub fn series_len(&self) -> Option<usize> {
        match self {
            Self::Scalar(_) => None,
            Self::Series(values) => Some(values.len()),
        }
    }

    /// Value for row `i`, repeating a scalar.
    ///
    /// Callers index within the broadcast length only.
    pub fn at(&self, i: usize) -> &T {
        match self {
            Self::Scalar(value) => value,
            Self::Series(values) => &values[i],
        }
    }
}

impl From<f64> for Column<f64> {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<f64>> for Column<f64> {
    fn from(values: Vec<f64>) -> Self {
        Self::Series(values)
    }
}

impl From<&[f64]> for Column<f64> {
    fn from(values: &[f64]) -> Self {
        Self::Series(values.to_vec())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Column<DateTime<Utc>> {
    fn from(date: DateTime<Tz>) -> Self {
        Self::Scalar(date.with_timezone(&Utc))
    }
}

/// Naive timestamps are taken as UTC.
impl From<NaiveDateTime> for Column<DateTime<Utc>> {
    fn from(date: NaiveDateTime) -> Self {
        Self::Scalar(Utc.from_utc_datetime(&date))
    }
}

impl<Tz: TimeZone> From<Vec<DateTime<Tz>>> for Column<DateTime<Utc>> {
    fn from(dates: Vec<DateTime<Tz>>) -> Self {
        Self::Series(dates.iter().map(|d| d.with_timezone(&Utc)).collect())
    }
}

impl<Tz: TimeZone> From<&[DateTime<Tz>]> for Column<DateTime<Utc>> {
    fn from(dates: &[DateTime<Tz>]) -> Self {
        Self::Series(dates.iter().map(|d| d.with_timezone(&Utc)).collect())
    }
}

impl From<Vec<NaiveDateTime>> for Column<DateTime<Utc>> {
    fn from(dates: Vec<NaiveDateTime>) -> Self {
        Self::Series(dates.iter().map(|d| Utc.from_utc_datetime(d)).collect())
    }
}

/// Common row count of the named columns.
///
/// `Ok(None)` means every column is scalar. Fails on the first sequence
/// whose length differs from the first sequence seen.
pub fn broadcast_len(columns: &[(&'static str, Option<usize>)]) -> Result<Option<usize>, SunCalcError> {
    let mut expected: Option<usize> = None;
    for &(field, len) in columns {
        match (expected, len) {
            (_, None) => {}
            (None, Some(found)) => expected = Some(found),
            (Some(expected), Some(found)) if expected != found => {
                return Err(SunCalcError::ShapeMismatch {
                    field,
                    expected,
                    found,
                });
            }
            (Some(_), Some(_)) => {}
        }
    }
    Ok(expected)
}

/// A result shaped like its input.
#[derive(Debug, Clone, PartialEq)]
pub enum Shaped<S, C> {
    /// Every input was scalar
    Scalar(S),
    /// At least one input was a sequence
    Columns(C),
}

impl<S, C> Shaped<S, C> {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn scalar(self) -> Option<S> {
        match self {
            Self::Scalar(row) => Some(row),
            Self::Columns(_) => None,
        }
    }

    pub fn columns(self) -> Option<C> {
        match self {
            Self::Scalar(_) => None,
            Self::Columns(columns) => Some(columns),
        }
    }
}

impl<S: Serialize, C: Serialize> Serialize for Shaped<S, C> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        match self {
            Self::Scalar(row) => row.serialize(serializer),
            Self::Columns(columns) => columns.serialize(serializer),
        }
    }
}

/// Column-aligned positions.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, Deserialize)]
pub struct PositionColumns {
    pub azimuth: Vec<f64>,
    pub altitude: Vec<f64>,
}

impl PositionColumns {
    pub fn len(&self) -> usize {
        self.azimuth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.azimuth.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<Position> {
        Some(Position {
            azimuth: *self.azimuth.get(i)?,
            altitude: *self.altitude.get(i)?,
        })
    }
}

impl FromIterator<Position> for PositionColumns {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut columns = Self::default();
        for position in iter {
            columns.azimuth.push(position.azimuth);
            columns.altitude.push(position.altitude);
        }
        columns
    }
}

/// Column-aligned event times: one column per event name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimesColumns {
    columns: Vec<(&'static str, Vec<Option<DateTime<Utc>>>)>,
    rows: usize,
}

impl TimesColumns {
    /// Number of input rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// All values of one event, in row order.
    pub fn column(&self, name: &str) -> Option<&[Option<DateTime<Utc>>]> {
        self.columns
            .iter()
            .find(|(event, _)| *event == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Event names in column order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(name, _)| *name)
    }

    /// Reassemble row `i` as a single result.
    pub fn row(&self, i: usize) -> Option<SunTimes> {
        if i >= self.rows {
            return None;
        }
        let events = self
            .columns
            .iter()
            .map(|(name, values)| (*name, values[i]))
            .collect();
        Some(SunTimes::from_events(events))
    }
}

impl FromIterator<SunTimes> for TimesColumns {
    fn from_iter<I: IntoIterator<Item = SunTimes>>(iter: I) -> Self {
        let mut table = Self::default();
        for times in iter {
            if table.rows == 0 {
                table.columns = times.iter().map(|(name, _)| (name, Vec::new())).collect();
            }
            for ((_, values), (_, time)) in table.columns.iter_mut().zip(times.iter()) {
                values.push(time);
            }
            table.rows += 1;
        }
        table
    }
}

impl Serialize for TimesColumns {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, values) in &self.columns {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}
