//! Classification of state-change names reported by the animation. Day
//! tabs report `DAY{n}`; tapping a set block lands in a state whose name
//! mentions `displayDrawer`.

use once_cell::sync::Lazy;
use regex::Regex;

static DAY_EVENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^DAY(\d+)$").expect("valid day event regex"));

pub fn is_day_click_event(state_name: &str) -> bool {
    DAY_EVENT_RE.is_match(state_name)
}

/// `None` for anything but a day-tab state name.
pub fn day_number_from_event(state_name: &str) -> Option<u32> {
    DAY_EVENT_RE
        .captures(state_name)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

pub fn is_set_click_event(state_name: &str) -> bool {
    state_name.trim().contains("displayDrawer")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_events_need_the_exact_shape() {
        assert!(is_day_click_event("DAY1"));
        assert!(is_day_click_event("DAY12"));
        assert!(!is_day_click_event("DAY"));
        assert!(!is_day_click_event("day1"));
        assert!(!is_day_click_event("DAY1 "));
        assert!(!is_day_click_event("SOMEDAY1"));
    }

    #[test]
    fn day_numbers_come_from_the_suffix() {
        assert_eq!(day_number_from_event("DAY1"), Some(1));
        assert_eq!(day_number_from_event("DAY42"), Some(42));
        assert_eq!(day_number_from_event("displayDrawer"), None);
        assert_eq!(day_number_from_event("DAY"), None);
    }

    #[test]
    fn set_events_match_anywhere_after_trimming() {
        assert!(is_set_click_event("displayDrawer"));
        assert!(is_set_click_event("  displayDrawer 3 "));
        assert!(is_set_click_event("openDisplay displayDrawerNow"));
        assert!(!is_set_click_event("drawer"));
        assert!(!is_set_click_event("DAY1"));
    }
}
