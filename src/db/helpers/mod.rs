use std::convert::TryFrom;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

pub fn to_i64(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| anyhow!("value {value} exceeds SQLite INTEGER range"))
}

pub fn to_u64(value: i64, field: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| anyhow!("{field} contains negative value {value}"))
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_day_of_week(value: i64) -> Result<u8> {
    match value {
        0..=6 => Ok(value as u8),
        other => Err(anyhow!("day_of_week {other} outside 0..=6")),
    }
}

pub fn parse_hour(value: i64) -> Result<u8> {
    match value {
        0..=23 => Ok(value as u8),
        other => Err(anyhow!("hour {other} outside 0..=23")),
    }
}
