//! Time utilities: hours formatting and optional instant parsing.

use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_local_datetime;
use chrono::{DateTime, Utc};

/// `7.25` → `"7.3 hours"` with `precision = 1`.
pub fn format_hours(hours: f64, precision: usize) -> String {
    format!("{:.*} hours", precision, hours)
}

/// `7.25` → `"07h 15m"`.
pub fn hours2readable(hours: f64) -> String {
    let total = (hours * 60.0).round().max(0.0) as i64;
    format!("{:02}h {:02}m", total / 60, total % 60)
}

pub fn parse_optional_instant(input: Option<&String>) -> AppResult<Option<DateTime<Utc>>> {
    if let Some(s) = input {
        let t = parse_local_datetime(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}
