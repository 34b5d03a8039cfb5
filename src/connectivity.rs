//! Offline detection for the schedule screen.
//!
//! [`ConnectivityMonitor`] folds connectivity samples into a debounced
//! "show the offline banner" flag; [`ReachabilityProbe`] produces the
//! samples by polling a known always-up endpoint.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::ConnectivityConfig;

#[derive(Debug, Error)]
pub enum ConnectivityError {
    #[error("http client error: {0}")]
    Client(String),
}

/// One sample of what the platform knows about the network. `None` means
/// the corresponding signal has not been decided yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetState {
    pub is_connected: Option<bool>,
    pub is_internet_reachable: Option<bool>,
}

/// Undecided signals count as online.
pub fn offline_from_state(state: &NetState) -> bool {
    match (state.is_connected, state.is_internet_reachable) {
        (Some(connected), Some(reachable)) => !connected || !reachable,
        _ => false,
    }
}

/// Shared between the monitor and its debounce timers. Every transition
/// bumps the generation, so a timer that fires late can tell it has been
/// superseded.
struct IndicatorState {
    generation: u64,
    tx: watch::Sender<bool>,
}

/// Folds connectivity samples into the banner flag: an offline run has to
/// outlast the debounce before the flag raises; coming back online lowers
/// it immediately.
pub struct ConnectivityMonitor {
    debounce: Duration,
    offline: bool,
    shared: Arc<Mutex<IndicatorState>>,
    indicator_rx: watch::Receiver<bool>,
    pending: Option<JoinHandle<()>>,
}

impl ConnectivityMonitor {
    pub fn new(debounce: Duration) -> Self {
        let (tx, indicator_rx) = watch::channel(false);
        Self {
            debounce,
            offline: false,
            shared: Arc::new(Mutex::new(IndicatorState { generation: 0, tx })),
            indicator_rx,
            pending: None,
        }
    }

    pub fn from_config(config: &ConnectivityConfig) -> Self {
        Self::new(config.offline_debounce())
    }

    /// Feeds one sample into the monitor. Needs a running tokio runtime;
    /// the debounce timer is a spawned task.
    pub fn apply(&mut self, state: NetState) {
        let offline = offline_from_state(&state);
        if offline == self.offline {
            return;
        }
        self.offline = offline;

        // Aborting only stops a timer that is still sleeping; one already
        // past its sleep is fenced out by the generation bump below.
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let mut indicator = self.shared.lock().expect("indicator mutex poisoned");
        indicator.generation += 1;

        if offline {
            let generation = indicator.generation;
            let shared = Arc::clone(&self.shared);
            let debounce = self.debounce;
            self.pending = Some(tokio::spawn(async move {
                tokio::time::sleep(debounce).await;
                let indicator = shared.lock().expect("indicator mutex poisoned");
                // A reconnect may have superseded this timer after its
                // sleep already ended.
                if indicator.generation == generation {
                    indicator.tx.send_replace(true);
                }
            }));
        } else {
            indicator.tx.send_replace(false);
        }
    }

    /// The undebounced offline state of the latest sample.
    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Whether the banner should currently be on screen.
    pub fn is_showing_offline_indicator(&self) -> bool {
        *self.indicator_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.indicator_rx.clone()
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

/// Polls a reachability endpoint and feeds the verdicts to a monitor.
pub struct ReachabilityProbe {
    client: Client,
    url: String,
    expected_status: u16,
    long_poll: Duration,
    short_poll: Duration,
}

impl ReachabilityProbe {
    pub fn new(config: &ConnectivityConfig) -> Result<Self, ConnectivityError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| ConnectivityError::Client(err.to_string()))?;
        Ok(Self {
            client,
            url: config.reachability_url.clone(),
            expected_status: config.expected_status,
            long_poll: config.long_poll(),
            short_poll: config.short_poll(),
        })
    }

    /// The expected status within the request timeout means reachable.
    pub async fn check(&self) -> bool {
        match self.client.get(&self.url).send().await {
            Ok(response) => response.status().as_u16() == self.expected_status,
            Err(_) => false,
        }
    }

    /// Probes forever: the long interval while reachable, the short one
    /// while not. The probe has no view of the link layer, so it reports
    /// the connection as up and lets reachability carry the signal.
    pub async fn run(self, mut monitor: ConnectivityMonitor) {
        loop {
            let reachable = self.check().await;
            monitor.apply(NetState {
                is_connected: Some(true),
                is_internet_reachable: Some(reachable),
            });

            let delay = if reachable {
                self.long_poll
            } else {
                self.short_poll
            };
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn online() -> NetState {
        NetState {
            is_connected: Some(true),
            is_internet_reachable: Some(true),
        }
    }

    fn offline() -> NetState {
        NetState {
            is_connected: Some(false),
            is_internet_reachable: Some(false),
        }
    }

    #[test]
    fn undecided_signals_read_as_online() {
        assert!(!offline_from_state(&NetState::default()));
        assert!(!offline_from_state(&NetState {
            is_connected: Some(true),
            is_internet_reachable: None,
        }));
        assert!(!offline_from_state(&NetState {
            is_connected: None,
            is_internet_reachable: Some(false),
        }));
    }

    #[test]
    fn either_decided_signal_down_reads_as_offline() {
        assert!(offline_from_state(&NetState {
            is_connected: Some(false),
            is_internet_reachable: Some(true),
        }));
        assert!(offline_from_state(&NetState {
            is_connected: Some(true),
            is_internet_reachable: Some(false),
        }));
        assert!(offline_from_state(&offline()));
        assert!(!offline_from_state(&online()));
    }

    #[tokio::test(start_paused = true)]
    async fn indicator_waits_out_the_debounce() {
        let mut monitor = ConnectivityMonitor::new(Duration::from_millis(300));
        monitor.apply(offline());
        assert!(monitor.is_offline());
        assert!(!monitor.is_showing_offline_indicator());

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(!monitor.is_showing_offline_indicator());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(monitor.is_showing_offline_indicator());
        assert!(monitor.is_offline());
    }

    #[tokio::test(start_paused = true)]
    async fn reconnect_cancels_the_pending_indicator() {
        let mut monitor = ConnectivityMonitor::new(Duration::from_millis(300));
        monitor.apply(offline());
        tokio::time::sleep(Duration::from_millis(100)).await;

        monitor.apply(online());
        assert!(!monitor.is_offline());
        assert!(!monitor.is_showing_offline_indicator());

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(!monitor.is_showing_offline_indicator());
    }

    #[tokio::test(start_paused = true)]
    async fn reconnect_lowers_a_raised_indicator_immediately() {
        let mut monitor = ConnectivityMonitor::new(Duration::from_millis(300));
        monitor.apply(offline());
        tokio::time::sleep(Duration::from_millis(301)).await;
        assert!(monitor.is_showing_offline_indicator());

        monitor.apply(online());
        assert!(!monitor.is_showing_offline_indicator());
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_offline_samples_do_not_restart_the_debounce() {
        let mut monitor = ConnectivityMonitor::new(Duration::from_millis(300));
        monitor.apply(offline());
        tokio::time::sleep(Duration::from_millis(100)).await;
        monitor.apply(offline());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(monitor.is_showing_offline_indicator());
    }

    #[tokio::test(start_paused = true)]
    async fn flapping_rearms_the_debounce_from_scratch() {
        let mut monitor = ConnectivityMonitor::new(Duration::from_millis(300));
        monitor.apply(offline());
        tokio::time::sleep(Duration::from_millis(100)).await;
        monitor.apply(online());
        tokio::time::sleep(Duration::from_millis(100)).await;
        monitor.apply(offline());

        // 250ms into the second outage: the first timer is long gone and
        // the fresh one has not fired yet.
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(!monitor.is_showing_offline_indicator());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(monitor.is_showing_offline_indicator());
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_the_indicator_flip() {
        let mut monitor = ConnectivityMonitor::new(Duration::from_millis(300));
        let mut indicator = monitor.subscribe();
        monitor.apply(offline());

        tokio::time::sleep(Duration::from_millis(301)).await;
        indicator.changed().await.expect("monitor alive");
        assert!(*indicator.borrow_and_update());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn reconnect_at_the_deadline_never_leaves_the_indicator_latched() {
        // Real time and a second worker, so a timer can wake at the same
        // instant the reconnect lands.
        let mut monitor = ConnectivityMonitor::new(Duration::from_millis(1));
        for _ in 0..1000 {
            monitor.apply(offline());
            tokio::time::sleep(Duration::from_millis(1)).await;
            monitor.apply(online());

            tokio::time::sleep(Duration::from_millis(1)).await;
            assert!(!monitor.is_showing_offline_indicator());
        }
    }

    #[test]
    fn probe_builds_from_the_default_config() {
        assert!(ReachabilityProbe::new(&ConnectivityConfig::default()).is_ok());
    }
}
