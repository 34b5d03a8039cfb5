//! Wall-clock arithmetic and label formatting for the schedule timeline.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid time regex"));

/// Height of the timeline in animation units, one per minute of a full day.
pub const TIMELINE_HEIGHT_UNITS: f64 = 1440.0;

/// Hour label without minutes; hours beyond 23 wrap around the day.
pub fn convert_24h_to_12h(hour: u32) -> String {
    let hour = hour % 24;
    let period = if hour < 12 { "AM" } else { "PM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12} {period}")
}

pub fn convert_minute_of_day_to_12h(minutes_of_day: u32) -> String {
    let hours = minutes_of_day / 60;
    let minutes = minutes_of_day % 60;
    let period = if hours < 12 { "AM" } else { "PM" };
    let hour12 = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12}:{minutes:02} {period}")
}

/// `None` unless the string is zero-padded `"HH:MM"`. The minutes are
/// echoed as given, without carrying overflow into the hour.
pub fn convert_hhmm_to_12h(hhmm: &str) -> Option<String> {
    let (hours, minutes) = time_from_string(hhmm)?;
    let hour = hours % 24;
    let period = if hour < 12 { "AM" } else { "PM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    Some(format!("{hour12}:{minutes:02} {period}"))
}

/// Out-of-range components roll over instead of failing: month 13 is
/// January of the following year, day 00 the last day of the prior month.
pub fn date_from_string(date_str: &str) -> Option<NaiveDate> {
    if !DATE_RE.is_match(date_str) {
        return None;
    }
    let mut parts = date_str.split('-');
    let year: i64 = parts.next()?.parse().ok()?;
    let month: i64 = parts.next()?.parse().ok()?;
    let day: i64 = parts.next()?.parse().ok()?;

    let months = year * 12 + (month - 1);
    let first_of_month = NaiveDate::from_ymd_opt(
        months.div_euclid(12) as i32,
        (months.rem_euclid(12) + 1) as u32,
        1,
    )?;
    first_of_month.checked_add_signed(chrono::Duration::days(day - 1))
}

/// The time rolls over like the date: 24:30 lands on half past midnight
/// of the next day.
pub fn datetime_from_string(date_str: &str, time_str: &str) -> Option<NaiveDateTime> {
    let date = date_from_string(date_str)?;
    let (hours, minutes) = time_from_string(time_str)?;
    date.and_hms_opt(0, 0, 0)?
        .checked_add_signed(chrono::Duration::minutes(i64::from(hours) * 60 + i64::from(minutes)))
}

/// Raw components, unvalidated beyond shape: `"99:99"` parses to `(99, 99)`.
pub fn time_from_string(time_str: &str) -> Option<(u32, u32)> {
    if !TIME_RE.is_match(time_str) {
        return None;
    }
    let (hours, minutes) = time_str.split_once(':')?;
    Some((hours.parse().ok()?, minutes.parse().ok()?))
}

pub fn height_of_one_minute(min_hour: u32, max_hour: u32) -> f64 {
    let num_hours_displayed = max_hour as f64 - min_hour as f64;
    let height_of_one_hour = TIMELINE_HEIGHT_UNITS / num_hours_displayed;
    height_of_one_hour / 60.0
}

pub fn current_minutes_of_day() -> u32 {
    minutes_of_day(&Local::now())
}

pub fn minutes_of_day<T: Timelike>(time: &T) -> u32 {
    time.hour() * 60 + time.minute()
}

pub fn current_hhmm_string() -> String {
    let now = Local::now();
    format!("{:02}:{:02}", now.hour(), now.minute())
}

pub fn convert_hour_to_hhmm(hour: u32) -> String {
    format!("{hour:02}:00")
}

pub fn is_same_date(a: &NaiveDateTime, b: &NaiveDateTime) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_labels_cover_noon_and_midnight() {
        assert_eq!(convert_24h_to_12h(0), "12 AM");
        assert_eq!(convert_24h_to_12h(1), "1 AM");
        assert_eq!(convert_24h_to_12h(11), "11 AM");
        assert_eq!(convert_24h_to_12h(12), "12 PM");
        assert_eq!(convert_24h_to_12h(13), "1 PM");
        assert_eq!(convert_24h_to_12h(23), "11 PM");
    }

    #[test]
    fn hour_labels_wrap_past_a_day() {
        assert_eq!(convert_24h_to_12h(24), "12 AM");
        assert_eq!(convert_24h_to_12h(25), "1 AM");
        assert_eq!(convert_24h_to_12h(36), "12 PM");
    }

    #[test]
    fn minute_of_day_labels_pad_minutes() {
        assert_eq!(convert_minute_of_day_to_12h(0), "12:00 AM");
        assert_eq!(convert_minute_of_day_to_12h(65), "1:05 AM");
        assert_eq!(convert_minute_of_day_to_12h(720), "12:00 PM");
        assert_eq!(convert_minute_of_day_to_12h(1275), "9:15 PM");
    }

    #[test]
    fn minute_of_day_labels_do_not_wrap_hours() {
        // Hours past a full day keep counting as PM.
        assert_eq!(convert_minute_of_day_to_12h(1440), "12:00 PM");
        assert_eq!(convert_minute_of_day_to_12h(1500), "1:00 PM");
    }

    #[test]
    fn hhmm_labels_require_padded_shape() {
        assert_eq!(convert_hhmm_to_12h("19:05").as_deref(), Some("7:05 PM"));
        assert_eq!(convert_hhmm_to_12h("00:00").as_deref(), Some("12:00 AM"));
        assert_eq!(convert_hhmm_to_12h("9:05"), None);
        assert_eq!(convert_hhmm_to_12h("19:5"), None);
        assert_eq!(convert_hhmm_to_12h("late"), None);
        // Overflowing minutes are echoed, not carried into the hour.
        assert_eq!(convert_hhmm_to_12h("19:99").as_deref(), Some("7:99 PM"));
    }

    #[test]
    fn dates_parse_and_roll_over() {
        assert_eq!(
            date_from_string("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        // Month 13 rolls into January of the next year.
        assert_eq!(
            date_from_string("2024-13-01"),
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );
        // Day 00 rolls back to the last day of the prior month.
        assert_eq!(
            date_from_string("2024-03-00"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        // Day 32 of January is February 1st.
        assert_eq!(
            date_from_string("2024-01-32"),
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
        assert_eq!(date_from_string("2024-1-05"), None);
        assert_eq!(date_from_string("not a date"), None);
    }

    #[test]
    fn datetimes_roll_hours_into_the_next_day() {
        let expected = NaiveDate::from_ymd_opt(2025, 10, 4)
            .and_then(|d| d.and_hms_opt(0, 30, 0));
        assert_eq!(datetime_from_string("2025-10-03", "24:30"), expected);

        let plain = NaiveDate::from_ymd_opt(2025, 10, 3)
            .and_then(|d| d.and_hms_opt(19, 0, 0));
        assert_eq!(datetime_from_string("2025-10-03", "19:00"), plain);

        assert_eq!(datetime_from_string("2025-10-03", "7pm"), None);
        assert_eq!(datetime_from_string("bad", "19:00"), None);
    }

    #[test]
    fn raw_time_components_come_back_unchecked() {
        assert_eq!(time_from_string("09:30"), Some((9, 30)));
        assert_eq!(time_from_string("99:99"), Some((99, 99)));
        assert_eq!(time_from_string("9:30"), None);
    }

    #[test]
    fn minute_height_scales_with_the_window() {
        assert_eq!(height_of_one_minute(0, 24), 1.0);
        assert_eq!(height_of_one_minute(12, 24), 2.0);
        assert_eq!(height_of_one_minute(18, 22), 6.0);
    }

    #[test]
    fn minutes_of_day_counts_from_midnight() {
        let time = NaiveDate::from_ymd_opt(2025, 10, 3)
            .and_then(|d| d.and_hms_opt(21, 15, 30))
            .expect("valid datetime");
        assert_eq!(minutes_of_day(&time), 1275);
    }

    #[test]
    fn hour_to_hhmm_pads() {
        assert_eq!(convert_hour_to_hhmm(0), "00:00");
        assert_eq!(convert_hour_to_hhmm(9), "09:00");
        assert_eq!(convert_hour_to_hhmm(21), "21:00");
    }

    #[test]
    fn same_date_ignores_time_of_day() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 3).expect("valid date");
        let morning = date.and_hms_opt(1, 0, 0).expect("valid time");
        let night = date.and_hms_opt(23, 59, 0).expect("valid time");
        let next_day = NaiveDate::from_ymd_opt(2025, 10, 4)
            .and_then(|d| d.and_hms_opt(1, 0, 0))
            .expect("valid datetime");
        assert!(is_same_date(&morning, &night));
        assert!(!is_same_date(&night, &next_day));
    }
}
