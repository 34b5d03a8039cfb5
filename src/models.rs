use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Slot capacities baked into the animation asset; callers cut their data
/// to these before handing it over.
pub const MAX_STAGES_PER_DAY: usize = 5;
pub const MAX_SETS_PER_STAGE: usize = 12;
/// Capacity of the companion list rendering of the same asset family.
pub const MAX_SETS_IN_LIST_VIEW: usize = 7;

/// Display window used when a schedule carries no sets to derive one from.
pub const DEFAULT_MIN_DISPLAY_HOUR: u32 = 0;
pub const DEFAULT_MAX_DISPLAY_HOUR: u32 = 24;

/// Padding added around the first and last set when deriving a window.
pub const HOURS_BEFORE_FIRST_SET: u32 = 0;
pub const HOURS_AFTER_LAST_SET: u32 = 0;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ScheduleDay {
    pub display_date: String, // YYYY-MM-DD
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ScheduleStage {
    pub display_date: String,
    pub name: String,
    pub guest_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ScheduleArtist {
    pub thumbnail_url: Option<String>,
    pub name_line1: String,
    pub name_line2: String,
    pub is_past: bool,
    pub is_saved: bool,
    pub time: String,
}

/// `artist_pos` and `artist_height` are vertical placement in timeline
/// units, precomputed by the data loader for the display window.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ScheduleSet {
    pub event_name: String,
    pub display_date: String,
    pub stage_name: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub artist_pos: f64,
    pub artist_height: f64,
    pub artist: ScheduleArtist,
}

impl ScheduleSet {
    pub fn list_key(&self) -> String {
        set_list_key(&self.display_date, &self.stage_name)
    }
}

/// Key a set list is grouped under: one per stage per day.
pub fn set_list_key(display_date: &str, stage_name: &str) -> String {
    format!("{display_date}-{stage_name}")
}

/// One screen's worth of schedule plus the hour window the timeline
/// spans, assumed non-empty.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ScheduleData {
    pub days: Vec<ScheduleDay>,
    pub stages: Vec<ScheduleStage>,
    pub sets: Vec<ScheduleSet>,
    pub min_hour_to_display: u32,
    pub max_hour_to_display: u32,
}

impl Default for ScheduleData {
    fn default() -> Self {
        Self {
            days: Vec::new(),
            stages: Vec::new(),
            sets: Vec::new(),
            min_hour_to_display: DEFAULT_MIN_DISPLAY_HOUR,
            max_hour_to_display: DEFAULT_MAX_DISPLAY_HOUR,
        }
    }
}

impl ScheduleData {
    /// Display window hugging the sets: earliest start hour to the hour
    /// after the latest end, padded and clamped to a day. Full-day
    /// defaults when there are no sets or the window would be empty.
    pub fn with_window_from_sets(
        days: Vec<ScheduleDay>,
        stages: Vec<ScheduleStage>,
        sets: Vec<ScheduleSet>,
    ) -> Self {
        let (min_hour_to_display, max_hour_to_display) = display_window(&sets);
        Self {
            days,
            stages,
            sets,
            min_hour_to_display,
            max_hour_to_display,
        }
    }
}

fn display_window(sets: &[ScheduleSet]) -> (u32, u32) {
    let mut bounds: Option<(u32, u32)> = None;
    for set in sets {
        let start_hour = set.start_time.hour();
        // A set ending at 22:30 still occupies the 22:00 hour row.
        let end_hour = set.end_time.hour() + u32::from(set.end_time.minute() > 0);
        bounds = Some(match bounds {
            None => (start_hour, end_hour),
            Some((min, max)) => (min.min(start_hour), max.max(end_hour)),
        });
    }

    let Some((first_start, last_end)) = bounds else {
        return (DEFAULT_MIN_DISPLAY_HOUR, DEFAULT_MAX_DISPLAY_HOUR);
    };

    let min_hour = first_start.saturating_sub(HOURS_BEFORE_FIRST_SET);
    let max_hour = (last_end + HOURS_AFTER_LAST_SET).min(DEFAULT_MAX_DISPLAY_HOUR);
    if min_hour >= max_hour {
        // Sets crossing midnight produce an inverted window; show the day.
        return (DEFAULT_MIN_DISPLAY_HOUR, DEFAULT_MAX_DISPLAY_HOUR);
    }
    (min_hour, max_hour)
}
