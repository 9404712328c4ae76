//! Wall-clock formatting for scheduler and UI text.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// `HH:MM` in the given offset, with `" (+N)"` when the local date is `N`
/// days after `reference_date` (or `" (-N)"` before it).
pub fn format_time(at: DateTime<Utc>, reference_date: NaiveDate, offset: &FixedOffset) -> String {
    let local = at.with_timezone(offset);
    let hhmm = local.format("%H:%M");
    match (local.date_naive() - reference_date).num_days() {
        0 => hhmm.to_string(),
        days if days > 0 => format!("{hhmm} (+{days})"),
        days => format!("{hhmm} ({days})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 23, 10, 40).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(format_time(at, ymd(2024, 1, 15), &utc), "23:10");
    }

    #[test]
    fn next_day_suffix() {
        let at = Utc.with_ymd_and_hms(2024, 1, 16, 5, 30, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(format_time(at, ymd(2024, 1, 15), &utc), "05:30 (+1)");
    }

    #[test]
    fn offset_moves_across_midnight() {
        // 23:30 UTC is 00:30 the next day at UTC+1.
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 23, 30, 0).unwrap();
        let cet = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(format_time(at, ymd(2024, 1, 15), &cet), "00:30 (+1)");
    }

    #[test]
    fn earlier_day() {
        let at = Utc.with_ymd_and_hms(2024, 1, 14, 21, 0, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(format_time(at, ymd(2024, 1, 15), &utc), "21:00 (-1)");
    }
}
