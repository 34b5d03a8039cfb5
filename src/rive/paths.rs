//! The naming contract shared with the animation asset.
//!
//! Artboards are addressed by slash-joined path segments, inputs and text
//! runs by name within an artboard; every name below has to match the
//! asset byte for byte.

use std::fmt;

use crate::models::{MAX_SETS_PER_STAGE, MAX_STAGES_PER_DAY};

/// Name of the asset's single state machine, also its root artboard.
pub const STATE_MACHINE: &str = "LIVENATION";

/// Artboard holding the hour labels of the vertical timeline.
pub const TIME_FRAME: &str = "timeFrame";

/// Artboard holding the day selector tabs.
pub const DAYS: &str = "DAYS";

pub mod inputs {
    //! Input and text-run names, grouped by the artboard they live on.

    /// `timeFrame`: how many hours the timeline currently spans.
    pub const NUM_HOURS_DISPLAYED: &str = "numHoursDisplayed";

    /// `DAYS`: how many day tabs are visible.
    pub const NUM_DAYS: &str = "numOfDays";
    /// `DAYS`: 1-based index of the active day tab.
    pub const SELECTED_DAY: &str = "selectedDay";

    /// `STAGE{n}`: how many set slots the stage renders.
    pub const NUM_SETS: &str = "numOfSets";
    /// `STAGE{n}`: 1-based slot of the expanded set, 0 when collapsed.
    pub const DISPLAYED_ARTIST: &str = "displayedArtist";

    /// `STAGENAME{n}` text runs.
    pub const STAGE_NAME: &str = "stageName";
    pub const GUEST_NAME: &str = "guestName";

    /// `STAGE{n}/SETPOS{m}`: vertical placement of the set block, in
    /// timeline units.
    pub const ARTIST_POS: &str = "artistPos";
    pub const ARTIST_HEIGHT: &str = "artistHeight";

    /// `myArtist` text runs.
    pub const ARTIST_NAME_LINE_1: &str = "artistName";
    pub const ARTIST_NAME_LINE_2: &str = "artistName2";
    pub const ARTIST_TIME: &str = "time";
    /// `myArtist` flags. The combined flag supersedes the plain one.
    pub const ARTIST_IS_PAST: &str = "isPast";
    pub const ARTIST_IS_PAST_AND_SAVED: &str = "isPastAndFav";
    /// `myArtist` triggers, mutually exclusive.
    pub const ARTIST_SAVED: &str = "isFav";
    pub const ARTIST_NOT_SAVED: &str = "isNotFav";

    /// Root: position of the time indicator, 0 to 1440 timeline units.
    pub const TIME_INDICATOR_POSITION: &str = "currentTime";
    /// Root: text on the time indicator.
    pub const TIME_INDICATOR_LABEL: &str = "curTimeHour";
    /// Root: visibility toggle for the time indicator. Despite the name,
    /// the screen writes its hide flag here.
    pub const TIME_INDICATOR_VISIBILITY: &str = "displayCurrentTime";

    /// `timeFrame`: text run for one hour label, 1-based.
    pub fn hour_label(hour_number: u32) -> String {
        format!("H{hour_number}")
    }

    /// `DAYS`: text run for one day tab, 1-based.
    pub fn day_label(day_number: u32) -> String {
        format!("dayOneString{day_number}")
    }

    /// Root: stage count for one day tab, 1-based.
    pub fn stage_count_for_day(day_number: u32) -> String {
        format!("NumStageDay{day_number}")
    }
}

/// 1-based stage column, bounded by [`MAX_STAGES_PER_DAY`]. The asset has
/// artboards for exactly these, so an out-of-range number cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageNumber(u8);

impl StageNumber {
    pub fn new(number: u8) -> Option<Self> {
        (1..=MAX_STAGES_PER_DAY as u8)
            .contains(&number)
            .then_some(Self(number))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (1..=MAX_STAGES_PER_DAY as u8).map(Self)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// `STAGE{n}`: the stage's set grid.
    pub fn stage_path(self) -> String {
        format!("STAGE{}", self.0)
    }

    /// `STAGENAME{n}`: the stage's header, a sibling of the grid.
    pub fn name_path(self) -> String {
        format!("STAGENAME{}", self.0)
    }
}

impl fmt::Display for StageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based set slot within a stage, bounded by [`MAX_SETS_PER_STAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SetSlot(u8);

impl SetSlot {
    pub fn new(number: u8) -> Option<Self> {
        (1..=MAX_SETS_PER_STAGE as u8)
            .contains(&number)
            .then_some(Self(number))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (1..=MAX_SETS_PER_STAGE as u8).map(Self)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// `STAGE{n}/SETPOS{m}`: the slot's block artboard.
    pub fn set_path(self, stage: StageNumber) -> String {
        format!("{}/SETPOS{}", stage.stage_path(), self.0)
    }

    /// `STAGE{n}/SETPOS{m}/myArtist`: the artist card inside the block.
    pub fn artist_path(self, stage: StageNumber) -> String {
        format!("{}/myArtist", self.set_path(stage))
    }
}

impl fmt::Display for SetSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
