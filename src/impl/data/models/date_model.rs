use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use fractic_server_error::ServerError;

use crate::{entities::RawCell, errors::InvalidDate};

/// Accepted textual date layouts, tried in order. Ambiguous numeric dates are
/// read day-first. Two-digit years come before four-digit ones, since `%Y`
/// would happily read "24" as year 24.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%d/%m/%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d",
];
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Spreadsheet serial numbers are only trusted in this range (1900-01-01 to
/// 2173-10-14), anything else is more likely an amount or an id.
const SERIAL_RANGE: std::ops::RangeInclusive<f64> = 1.0..=100_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateModel(pub NaiveDate);

impl FromStr for DateModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DATE_FORMATS
            .iter()
            .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
            .or_else(|| {
                DATE_TIME_FORMATS
                    .iter()
                    .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                    .map(|dt| dt.date())
            })
            .map(DateModel)
            .ok_or_else(|| InvalidDate::new(s))
    }
}

impl TryFrom<&RawCell> for DateModel {
    type Error = ServerError;
    fn try_from(cell: &RawCell) -> Result<Self, Self::Error> {
        match cell {
            RawCell::Date(d) => Ok(DateModel(*d)),
            RawCell::Text(s) => DateModel::from_str(s),
            RawCell::Number(n) if SERIAL_RANGE.contains(n) => {
                from_spreadsheet_serial(*n).ok_or_else(|| InvalidDate::new(&n.to_string()))
            }
            other => Err(InvalidDate::new(&other.display())),
        }
    }
}

impl Into<NaiveDate> for DateModel {
    fn into(self) -> NaiveDate {
        self.0
    }
}

/// Day count since 1899-12-30 (the 1900 date system, which counts the
/// non-existent 1900-02-29).
fn from_spreadsheet_serial(serial: f64) -> Option<DateModel> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch
        .checked_add_signed(Duration::days(serial.trunc() as i64))
        .map(DateModel)
}

/// Lenient date parsing: unparseable or blank input yields `None`.
pub fn parse_date(raw: &RawCell) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    match DateModel::try_from(raw) {
        Ok(d) => Some(d.into()),
        Err(_) => {
            log::debug!("unparseable date {:?}, leaving blank", raw);
            None
        }
    }
}
