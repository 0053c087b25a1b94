// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

fn invalid(what: &str, raw: &str) -> AppError {
    AppError::InvalidDate(format!("{what}: '{raw}'"))
}

/// First and last day covered by a single YYYY / YYYY-MM / YYYY-MM-DD token.
fn token_bounds(token: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match token.len() {
        // YYYY
        4 => {
            let y: i32 = token.parse().map_err(|_| invalid("invalid year", token))?;
            let d1 =
                NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid("invalid year", token))?;
            let d2 =
                NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid("invalid year", token))?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{token}-01"), "%Y-%m-%d")
                .map_err(|_| invalid("invalid month", token))?;
            let d2 = month_last_day(d1).ok_or_else(|| invalid("invalid month", token))?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(token, "%Y-%m-%d")
                .map_err(|_| invalid("invalid date", token))?;
            Ok((d, d))
        }
        _ => Err(invalid("unsupported --range format", token)),
    }
}

fn month_last_day(first: NaiveDate) -> Option<NaiveDate> {
    first.checked_add_months(chrono::Months::new(1))?.pred_opt()
}

/// Parse --range (year / month / day / interval), inclusive bounds.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let Some((start_raw, end_raw)) = r.split_once(':') else {
        return token_bounds(r.trim());
    };

    let start = start_raw.trim();
    let end = end_raw.trim();

    if start.len() != end.len() {
        return Err(invalid("start and end must have same format", r));
    }

    let (d1, _) = token_bounds(start)?;
    let (_, d2) = token_bounds(end)?;

    if d2 < d1 {
        return Err(invalid("range end precedes start", r));
    }

    Ok((d1, d2))
}
