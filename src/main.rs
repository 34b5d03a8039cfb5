use std::env;

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};

use stagetime::config::ConfigStore;
use stagetime::rive::schedule::{apply_schedule, selected_set_number};
use stagetime::rive::{InputValue, Result as RiveResult, RiveHandle};
use stagetime::{
    clock, ConnectivityMonitor, ReachabilityProbe, ScheduleArtist, ScheduleData, ScheduleDay,
    ScheduleSet, ScheduleStage,
};

mod cli;

/// Prints every write instead of driving a real animation surface.
struct ConsoleHandle;

impl RiveHandle for ConsoleHandle {
    fn set_text_run_value(&self, name: &str, value: &str) -> RiveResult<()> {
        println!("text  {name} = {value:?}");
        Ok(())
    }

    fn set_text_run_value_at_path(&self, name: &str, value: &str, path: &str) -> RiveResult<()> {
        println!("text  {path} :: {name} = {value:?}");
        Ok(())
    }

    fn set_input_state(&self, machine: &str, name: &str, value: InputValue) -> RiveResult<()> {
        println!("input {machine} :: {name} = {value:?}");
        Ok(())
    }

    fn set_input_state_at_path(&self, name: &str, value: InputValue, path: &str) -> RiveResult<()> {
        println!("input {path} :: {name} = {value:?}");
        Ok(())
    }

    fn fire_state_at_path(&self, name: &str, path: &str) -> RiveResult<()> {
        println!("fire  {path} :: {name}");
        Ok(())
    }

    async fn number_state_at_path(&self, _name: &str, _path: &str) -> RiveResult<Option<f64>> {
        Ok(None)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());

    let store = match args.config_path {
        Some(path) => ConfigStore::load_from(path),
        None => ConfigStore::load(),
    };
    if !store.path().exists() {
        store
            .update(|_| {})
            .map_err(anyhow::Error::msg)
            .context("writing default config")?;
        println!("wrote default config to {}", store.path().display());
    }
    let config = store.read();

    let handle = ConsoleHandle;
    let data = sample_schedule();
    println!(
        "applying sample schedule: {} days, {} stages, {} sets, hours {}..{}",
        data.days.len(),
        data.stages.len(),
        data.sets.len(),
        data.min_hour_to_display,
        data.max_hour_to_display,
    );
    apply_schedule(&handle, &data).context("applying sample schedule")?;

    let selected = selected_set_number(&handle)
        .await
        .context("reading selection")?;
    println!("selected set: {selected:?}");

    if args.schedule_only {
        return Ok(());
    }

    let monitor = ConnectivityMonitor::from_config(&config.connectivity);
    let mut indicator = monitor.subscribe();
    let probe =
        ReachabilityProbe::new(&config.connectivity).context("building reachability probe")?;
    tokio::spawn(probe.run(monitor));

    println!(
        "watching connectivity against {} (debounce {:?}), Ctrl-C to quit",
        config.connectivity.reachability_url,
        config.connectivity.offline_debounce(),
    );

    loop {
        tokio::select! {
            changed = indicator.changed() => {
                if changed.is_err() {
                    break;
                }
                let showing = *indicator.borrow_and_update();
                println!(
                    "offline indicator: {}",
                    if showing { "shown" } else { "hidden" }
                );
            }
            _ = tokio::signal::ctrl_c() => {
                println!("shutting down");
                break;
            }
        }
    }

    Ok(())
}

fn sample_schedule() -> ScheduleData {
    let today = Local::now().date_naive();
    let tomorrow = today + Duration::days(1);

    let days = vec![sample_day(today, "Day 1"), sample_day(tomorrow, "Day 2")];
    let stages = vec![
        sample_stage(today, "Main Stage", Some("Hosted by KEXP")),
        sample_stage(today, "River Stage", None),
        sample_stage(tomorrow, "Main Stage", None),
    ];
    let sets = vec![
        sample_set(today, "Main Stage", "The Midnight", "Quiet Bison", "19:00", "20:00", true),
        sample_set(today, "Main Stage", "Jungle", "", "21:30", "23:00", false),
        sample_set(today, "River Stage", "Men I Trust", "", "20:15", "21:15", false),
        sample_set(tomorrow, "Main Stage", "Caribou", "", "22:00", "23:30", false),
    ];

    let mut data = ScheduleData::with_window_from_sets(days, stages, sets);
    layout_sets(&mut data);
    data
}

/// Places each set vertically for the schedule's display window.
fn layout_sets(data: &mut ScheduleData) {
    let height_of_one_minute =
        clock::height_of_one_minute(data.min_hour_to_display, data.max_hour_to_display);
    let min_minutes = data.min_hour_to_display * 60;

    for set in &mut data.sets {
        let start = clock::minutes_of_day(&set.start_time);
        let end = clock::minutes_of_day(&set.end_time);
        set.artist_pos = f64::from(start.saturating_sub(min_minutes)) * height_of_one_minute;
        set.artist_height = f64::from(end.saturating_sub(start)) * height_of_one_minute;
    }
}

fn sample_day(date: NaiveDate, name: &str) -> ScheduleDay {
    ScheduleDay {
        display_date: date.format("%Y-%m-%d").to_string(),
        name: name.to_string(),
    }
}

fn sample_stage(date: NaiveDate, name: &str, guest_name: Option<&str>) -> ScheduleStage {
    ScheduleStage {
        display_date: date.format("%Y-%m-%d").to_string(),
        name: name.to_string(),
        guest_name: guest_name.map(str::to_string),
    }
}

fn sample_set(
    date: NaiveDate,
    stage_name: &str,
    line1: &str,
    line2: &str,
    start: &str,
    end: &str,
    is_saved: bool,
) -> ScheduleSet {
    let display_date = date.format("%Y-%m-%d").to_string();
    let start_time =
        clock::datetime_from_string(&display_date, start).expect("sample start time parses");
    let end_time = clock::datetime_from_string(&display_date, end).expect("sample end time parses");
    let is_past = end_time < Local::now().naive_local();

    ScheduleSet {
        event_name: "Sample Fest".to_string(),
        display_date,
        stage_name: stage_name.to_string(),
        start_time,
        end_time,
        artist_pos: 0.0,
        artist_height: 0.0,
        artist: ScheduleArtist {
            thumbnail_url: None,
            name_line1: line1.to_string(),
            name_line2: line2.to_string(),
            is_past,
            is_saved,
            time: clock::convert_hhmm_to_12h(start).expect("sample start label formats"),
        },
    }
}
