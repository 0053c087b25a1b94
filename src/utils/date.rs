use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Local midnight of `day` expressed in UTC.
///
/// On DST gaps where midnight does not exist the earliest valid instant is
/// used.
pub fn local_midnight_utc(day: NaiveDate) -> DateTime<Utc> {
    let naive = day.and_hms_opt(0, 0, 0).unwrap_or(NaiveDateTime::MIN);
    match Local.from_local_datetime(&naive).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&naive),
    }
}

/// `[today 00:00, tomorrow 00:00)` in local time, as UTC instants.
pub fn today_range() -> (DateTime<Utc>, DateTime<Utc>) {
    day_range(today())
}

pub fn day_range(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let next = day.succ_opt().unwrap_or(day + Duration::days(1));
    (local_midnight_utc(day), local_midnight_utc(next))
}

/// Parse a local "YYYY-MM-DD HH:MM" (or RFC 3339) instant.
pub fn parse_local_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s.trim()) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M").ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_range_spans_one_local_day() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let (start, end) = day_range(d);
        assert!(end > start);
        assert_eq!(start.with_timezone(&Local).date_naive(), d);
        assert!((end - start) >= Duration::hours(23) && (end - start) <= Duration::hours(25));
    }

    #[test]
    fn parses_local_and_rfc3339_instants() {
        assert!(parse_local_datetime("2025-02-01 08:30").is_some());
        assert_eq!(
            parse_local_datetime("2025-02-01T08:30:00Z"),
            Some(Utc.with_ymd_and_hms(2025, 2, 1, 8, 30, 0).unwrap())
        );
        assert!(parse_local_datetime("08:30").is_none());
    }
}
