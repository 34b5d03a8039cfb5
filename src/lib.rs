//! Drives the bundled festival-schedule animation and the offline banner.
//!
//! [`rive`] projects a [`models::ScheduleData`] onto the animation's named
//! inputs through a caller-supplied [`rive::RiveHandle`]; [`connectivity`]
//! debounces reachability into a boolean the screen can watch.

pub mod clock;
pub mod config;
pub mod connectivity;
pub mod models;
pub mod rive;
mod utils;

pub use connectivity::{ConnectivityMonitor, NetState, ReachabilityProbe};
pub use models::{ScheduleArtist, ScheduleData, ScheduleDay, ScheduleSet, ScheduleStage};
pub use rive::{InputValue, RiveError, RiveHandle};
