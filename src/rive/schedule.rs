//! Write sequences that push schedule data into the animation.
//!
//! Operations issue direct, unbuffered writes in a fixed order; the
//! runtime is the single source of truth for what is on screen.

use crate::clock;
use crate::models::{
    set_list_key, ScheduleArtist, ScheduleData, ScheduleDay, ScheduleSet, ScheduleStage,
    MAX_SETS_PER_STAGE, MAX_STAGES_PER_DAY,
};
use crate::rive::paths::{self, inputs, SetSlot, StageNumber};
use crate::rive::{Result, RiveHandle};

/// Stage and slot of the set currently expanded by the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedSet {
    pub stage_number: StageNumber,
    pub set_number: u32,
}

// Artboard "timeFrame": the vertical timeline.

/// All 24 labels are rewritten each time; ones past the displayed span
/// stay off screen.
pub fn update_hour_labels(handle: &impl RiveHandle, min_hour: u32) -> Result<()> {
    for hour_index in 0..24 {
        let hour_value = min_hour + hour_index;
        let hour_name = clock::convert_24h_to_12h(hour_value);
        handle.set_text_run_value_at_path(
            &inputs::hour_label(hour_index + 1),
            &hour_name,
            paths::TIME_FRAME,
        )?;
    }
    Ok(())
}

pub fn update_total_hours_displayed(handle: &impl RiveHandle, num_hours: u32) -> Result<()> {
    handle.set_input_state_at_path(inputs::NUM_HOURS_DISPLAYED, num_hours.into(), paths::TIME_FRAME)
}

// Root artboard: the time indicator.

pub fn update_time_indicator_label(handle: &impl RiveHandle) -> Result<()> {
    let label = clock::convert_minute_of_day_to_12h(clock::current_minutes_of_day());
    handle.set_text_run_value(inputs::TIME_INDICATOR_LABEL, &label)
}

/// Leaves the indicator untouched when the current hour falls outside
/// `min_hour..=max_hour`.
pub fn update_time_indicator_position(
    handle: &impl RiveHandle,
    min_hour: u32,
    max_hour: u32,
) -> Result<()> {
    let current_minutes_of_day = clock::current_minutes_of_day();

    let current_hours = current_minutes_of_day / 60;
    if current_hours < min_hour || current_hours > max_hour {
        return Ok(());
    }

    let minutes_since_min = f64::from(current_minutes_of_day - min_hour * 60);
    let position = minutes_since_min * clock::height_of_one_minute(min_hour, max_hour);
    handle.set_input_state(
        paths::STATE_MACHINE,
        inputs::TIME_INDICATOR_POSITION,
        position.into(),
    )
}

pub fn update_time_indicator_visibility(handle: &impl RiveHandle, hide: bool) -> Result<()> {
    handle.set_input_state(
        paths::STATE_MACHINE,
        inputs::TIME_INDICATOR_VISIBILITY,
        hide.into(),
    )
}

pub fn refresh_time_indicator(
    handle: &impl RiveHandle,
    min_hour: u32,
    max_hour: u32,
) -> Result<()> {
    update_time_indicator_label(handle)?;
    update_time_indicator_position(handle, min_hour, max_hour)
}

// Artboard "DAYS": the day selector.

pub fn update_selected_day(handle: &impl RiveHandle, selected_day_number: u32) -> Result<()> {
    handle.set_input_state_at_path(
        inputs::SELECTED_DAY,
        selected_day_number.into(),
        paths::DAYS,
    )
}

pub fn update_days_displayed(handle: &impl RiveHandle, days: &[ScheduleDay]) -> Result<()> {
    handle.set_input_state_at_path(inputs::NUM_DAYS, days.len().into(), paths::DAYS)?;

    for (day_index, day) in days.iter().enumerate() {
        let day_number = day_index as u32 + 1;
        handle.set_text_run_value_at_path(&inputs::day_label(day_number), &day.name, paths::DAYS)?;
    }
    Ok(())
}

pub fn update_stage_count_for_day(
    handle: &impl RiveHandle,
    day_number: u32,
    num_stages: u32,
) -> Result<()> {
    handle.set_input_state(
        paths::STATE_MACHINE,
        &inputs::stage_count_for_day(day_number),
        num_stages.into(),
    )
}

// Artboards "STAGENAME1" through "STAGENAME5": stage headers.

/// A missing guest line blanks its run; stages past the asset's capacity
/// are ignored.
pub fn update_stages_displayed<'a>(
    handle: &impl RiveHandle,
    stages: impl IntoIterator<Item = &'a ScheduleStage>,
) -> Result<()> {
    for (stage, stage_number) in stages.into_iter().zip(StageNumber::all()) {
        let stage_name_path = stage_number.name_path();
        handle.set_text_run_value_at_path(inputs::STAGE_NAME, &stage.name, &stage_name_path)?;
        handle.set_text_run_value_at_path(
            inputs::GUEST_NAME,
            stage.guest_name.as_deref().unwrap_or(""),
            &stage_name_path,
        )?;
    }
    Ok(())
}

// Artboards "STAGE1" through "STAGE5": selection state.

/// A reading of zero or no reading at all means no selection.
#[allow(clippy::never_loop)]
pub async fn selected_set_number(handle: &impl RiveHandle) -> Result<Option<SelectedSet>> {
    // TODO: decide whether this scan should fall through to stages 2-5
    // when stage 1 reports nothing; as written it answers from stage 1
    // alone, and the shipped drawer logic was tuned against that.
    for stage_number in StageNumber::all() {
        let selected = selected_set_in_stage(handle, stage_number).await?;

        let set_number = match selected {
            Some(value) if value != 0.0 => value as u32,
            _ => return Ok(None),
        };

        return Ok(Some(SelectedSet {
            stage_number,
            set_number,
        }));
    }

    Ok(None)
}

async fn selected_set_in_stage(
    handle: &impl RiveHandle,
    stage_number: StageNumber,
) -> Result<Option<f64>> {
    handle
        .number_state_at_path(inputs::DISPLAYED_ARTIST, &stage_number.stage_path())
        .await
}

pub fn reset_selected_sets(handle: &impl RiveHandle) -> Result<()> {
    for stage_number in StageNumber::all() {
        update_selected_set_in_stage(handle, stage_number, 0)?;
    }
    Ok(())
}

pub fn update_selected_set_in_stage(
    handle: &impl RiveHandle,
    stage_number: StageNumber,
    set_number: u32,
) -> Result<()> {
    handle.set_input_state_at_path(
        inputs::DISPLAYED_ARTIST,
        set_number.into(),
        &stage_number.stage_path(),
    )
}

// Artboards "SETPOS1" through "SETPOS12": the set grid of one stage.

/// Every slot is touched even when fewer sets are given: unoccupied
/// slots get zero position and height so leftovers from a previous day
/// collapse. Their artist text runs are left alone, a zero-height block
/// never shows them.
pub fn update_sets_in_stage<'a>(
    handle: &impl RiveHandle,
    stage_number: StageNumber,
    sets: impl IntoIterator<Item = &'a ScheduleSet>,
) -> Result<()> {
    let stage_path = stage_number.stage_path();
    let sets: Vec<&ScheduleSet> = sets.into_iter().collect();

    // The asset wants the full slot count here, not the occupied count.
    handle.set_input_state_at_path(inputs::NUM_SETS, MAX_SETS_PER_STAGE.into(), &stage_path)?;

    for slot in SetSlot::all() {
        let set_path = slot.set_path(stage_number);
        let set = sets.get(slot.get() as usize - 1);

        handle.set_input_state_at_path(
            inputs::ARTIST_POS,
            set.map_or(0.0, |s| s.artist_pos).into(),
            &set_path,
        )?;
        handle.set_input_state_at_path(
            inputs::ARTIST_HEIGHT,
            set.map_or(0.0, |s| s.artist_height).into(),
            &set_path,
        )?;

        if let Some(set) = set {
            update_artist(handle, stage_number, slot, &set.artist)?;
        }
    }
    Ok(())
}

fn update_artist(
    handle: &impl RiveHandle,
    stage_number: StageNumber,
    slot: SetSlot,
    artist: &ScheduleArtist,
) -> Result<()> {
    let artist_path = slot.artist_path(stage_number);

    // The trailing carriage return is part of the asset's text layout.
    handle.set_text_run_value_at_path(
        inputs::ARTIST_NAME_LINE_1,
        &format!("{}\r", artist.name_line1),
        &artist_path,
    )?;
    handle.set_text_run_value_at_path(
        inputs::ARTIST_NAME_LINE_2,
        &format!("{}\r", artist.name_line2),
        &artist_path,
    )?;
    handle.set_text_run_value_at_path(inputs::ARTIST_TIME, &artist.time, &artist_path)?;

    let is_past_and_saved = artist.is_past && artist.is_saved;
    handle.set_input_state_at_path(
        inputs::ARTIST_IS_PAST_AND_SAVED,
        is_past_and_saved.into(),
        &artist_path,
    )?;

    // The combined state supersedes the plain flags; leave them alone
    // when it is set.
    if is_past_and_saved {
        return Ok(());
    }

    handle.set_input_state_at_path(inputs::ARTIST_IS_PAST, artist.is_past.into(), &artist_path)?;

    // TODO: the saved trigger sometimes fails to take on the first pass;
    // needs a reproduction against the runtime.
    fire_artist_saved_state(handle, stage_number, slot, artist.is_saved)
}

/// Fire and forget: the animation owns the resulting state.
pub fn fire_artist_saved_state(
    handle: &impl RiveHandle,
    stage_number: StageNumber,
    slot: SetSlot,
    is_saved: bool,
) -> Result<()> {
    let trigger = if is_saved {
        inputs::ARTIST_SAVED
    } else {
        inputs::ARTIST_NOT_SAVED
    };
    handle.fire_state_at_path(trigger, &slot.artist_path(stage_number))
}

// Whole-screen orchestration.

/// Pushes a full schedule and lands on day 1. Stage and set lists are cut
/// to the asset's capacities before the per-artboard operations see them.
pub fn apply_schedule(handle: &impl RiveHandle, data: &ScheduleData) -> Result<()> {
    let num_hours = data
        .max_hour_to_display
        .saturating_sub(data.min_hour_to_display);

    update_hour_labels(handle, data.min_hour_to_display)?;
    update_total_hours_displayed(handle, num_hours)?;
    update_time_indicator_label(handle)?;
    update_time_indicator_position(handle, data.min_hour_to_display, data.max_hour_to_display)?;
    update_days_displayed(handle, &data.days)?;

    for (day_index, day) in data.days.iter().enumerate() {
        let num_stages = stages_for_day(data, day).count().min(MAX_STAGES_PER_DAY);
        update_stage_count_for_day(handle, day_index as u32 + 1, num_stages as u32)?;
    }

    apply_day(handle, data, 1)
}

/// Unknown day numbers are a no-op.
pub fn apply_day(handle: &impl RiveHandle, data: &ScheduleData, day_number: u32) -> Result<()> {
    let Some(day) = day_number
        .checked_sub(1)
        .and_then(|day_index| data.days.get(day_index as usize))
    else {
        return Ok(());
    };

    update_selected_day(handle, day_number)?;
    reset_selected_sets(handle)?;

    let stages: Vec<&ScheduleStage> = stages_for_day(data, day).take(MAX_STAGES_PER_DAY).collect();
    update_stages_displayed(handle, stages.iter().copied())?;

    for (stage_number, stage) in StageNumber::all().zip(stages.iter().copied()) {
        let sets = sets_for_stage(data, day, stage);
        update_sets_in_stage(handle, stage_number, sets)?;
    }
    Ok(())
}

fn stages_for_day<'a>(
    data: &'a ScheduleData,
    day: &'a ScheduleDay,
) -> impl Iterator<Item = &'a ScheduleStage> {
    data.stages
        .iter()
        .filter(move |stage| stage.display_date == day.display_date)
}

fn sets_for_stage<'a>(
    data: &'a ScheduleData,
    day: &ScheduleDay,
    stage: &ScheduleStage,
) -> Vec<&'a ScheduleSet> {
    let key = set_list_key(&day.display_date, &stage.name);
    let mut sets: Vec<&ScheduleSet> = data
        .sets
        .iter()
        .filter(|set| set.list_key() == key)
        .collect();
    sets.sort_by_key(|set| set.start_time);
    sets.truncate(MAX_SETS_PER_STAGE);
    sets
}
