use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::utils;

/// Settings for the reachability probe and the offline indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    pub reachability_url: String,
    pub expected_status: u16,
    pub long_poll_secs: u64,
    pub short_poll_secs: u64,
    pub request_timeout_ms: u64,
    pub failed_checks_before_offline: u32,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            // A plain 204 endpoint for now; swap in an owned ping route
            // once the backend grows one.
            reachability_url: "https://clients3.google.com/generate_204".to_string(),
            expected_status: 204,
            long_poll_secs: 60,
            short_poll_secs: 5,
            request_timeout_ms: 3_500,
            failed_checks_before_offline: 1,
        }
    }
}

impl ConnectivityConfig {
    pub fn long_poll(&self) -> Duration {
        Duration::from_secs(self.long_poll_secs)
    }

    pub fn short_poll(&self) -> Duration {
        Duration::from_secs(self.short_poll_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// One full failed probe cycle, short poll plus request timeout, per
    /// configured failed check.
    pub fn offline_debounce(&self) -> Duration {
        (self.short_poll() + self.request_timeout()) * self.failed_checks_before_offline
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub connectivity: ConnectivityConfig,
}

pub struct ConfigStore {
    path: PathBuf,
    data: Mutex<AppConfig>,
}

impl ConfigStore {
    pub fn load() -> Self {
        Self::load_from(utils::config_path())
    }

    pub fn load_from(path: PathBuf) -> Self {
        let data = match read_config(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("failed to read config {}: {err}", path.display());
                AppConfig::default()
            }
        };
        Self {
            path,
            data: Mutex::new(data),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> AppConfig {
        self.data.lock().expect("config mutex poisoned").clone()
    }

    pub fn update<F>(&self, transform: F) -> Result<AppConfig, String>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut guard = self
            .data
            .lock()
            .map_err(|_| "config mutex poisoned".to_string())?;
        transform(&mut guard);
        write_config(&self.path, &guard)?;
        Ok(guard.clone())
    }
}

fn read_config(path: &Path) -> Result<AppConfig, String> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = fs::read_to_string(path).map_err(|err| err.to_string())?;
    serde_json::from_str(&contents).map_err(|err| err.to_string())
}

fn write_config(path: &Path, config: &AppConfig) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            return Err(err.to_string());
        }
    }
    let contents = serde_json::to_string_pretty(config).map_err(|err| err.to_string())?;
    fs::write(path, contents).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_debounce_is_one_failed_cycle() {
        let config = ConnectivityConfig::default();
        assert_eq!(config.offline_debounce(), Duration::from_millis(8_500));
    }

    #[test]
    fn debounce_scales_with_the_failed_check_count() {
        let config = ConnectivityConfig {
            failed_checks_before_offline: 3,
            ..ConnectivityConfig::default()
        };
        assert_eq!(config.offline_debounce(), Duration::from_millis(25_500));
    }

    #[test]
    fn partial_config_files_fall_back_per_field() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{ "connectivity": { "short_poll_secs": 2 } }"#)
                .expect("valid config json");
        assert_eq!(parsed.connectivity.short_poll_secs, 2);
        assert_eq!(parsed.connectivity.expected_status, 204);
        assert_eq!(
            parsed.connectivity.reachability_url,
            "https://clients3.google.com/generate_204"
        );
    }
}
