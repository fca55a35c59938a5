//! Background stats/analytics refresh.
//!
//! The dashboard re-fetches its two read-only snapshots on a fixed period.
//! The timer is the one resource that needs explicit lifecycle management:
//! [`Poller::spawn`] acquires it, and [`Poller::stop`] or dropping the
//! handle releases it exactly once, regardless of in-flight requests.

use crate::api::ApiClient;
use crate::app::AppMessage;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// How often the dashboard re-fetches stats and analytics.
pub const POLL_PERIOD: Duration = Duration::from_secs(5);

/// Handle to the background refresh task.
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    /// Spawn the refresh loop.
    ///
    /// The first tick fires immediately, so the dashboard fills in right
    /// after startup; subsequent ticks fire every `period`. Each tick
    /// fetches stats and analytics together and delivers them as a single
    /// [`AppMessage::DataRefreshed`]; if either fetch fails the whole tick
    /// is dropped and logged, never surfaced to the operator.
    pub fn spawn(
        client: Arc<ApiClient>,
        tx: UnboundedSender<AppMessage>,
        period: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match tokio::try_join!(client.fetch_stats(), client.fetch_analytics()) {
                    Ok((stats, analytics)) => {
                        if tx.send(AppMessage::DataRefreshed { stats, analytics }).is_err() {
                            // Receiver gone, the app is shutting down.
                            break;
                        }
                    }
                    Err(error) => tracing::warn!("poll tick failed: {error}"),
                }
            }
        });
        Self { handle }
    }

    /// Stop the refresh loop. Idempotent.
    pub fn stop(&self) {
        self.handle.abort();
    }

    /// Whether the task has exited (stopped, or the app side hung up).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
