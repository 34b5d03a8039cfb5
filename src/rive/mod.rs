//! Bindings for the bundled schedule animation.
//!
//! Artboards and inputs form a fixed naming contract (see [`paths`]);
//! writes go through a [`RiveHandle`] supplied by the embedding screen.
//! Nothing validates names against the asset; a mismatch surfaces inside
//! the runtime, never here.

pub mod events;
pub mod paths;
pub mod schedule;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RiveError>;

#[derive(Debug, Error)]
pub enum RiveError {
    #[error("animation runtime error: {0}")]
    Runtime(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputValue {
    Number(f64),
    Bool(bool),
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for InputValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<usize> for InputValue {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Handle to the running animation. Implementations wrap whatever the
/// platform exposes; calls come from the single context that owns the
/// animation surface, so the trait carries no `Send` or `Sync` bounds.
#[allow(async_fn_in_trait)] // futures are awaited in place on the owning thread
pub trait RiveHandle {
    /// Replaces the text run `name` on the root artboard.
    fn set_text_run_value(&self, name: &str, value: &str) -> Result<()>;

    fn set_text_run_value_at_path(&self, name: &str, value: &str, path: &str) -> Result<()>;

    fn set_input_state(&self, machine: &str, name: &str, value: InputValue) -> Result<()>;

    fn set_input_state_at_path(&self, name: &str, value: InputValue, path: &str) -> Result<()>;

    fn fire_state_at_path(&self, name: &str, path: &str) -> Result<()>;

    /// Round-trips to the runtime; `None` when it has no value for the
    /// input.
    async fn number_state_at_path(&self, name: &str, path: &str) -> Result<Option<f64>>;
}
