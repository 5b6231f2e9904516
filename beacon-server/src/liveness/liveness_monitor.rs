use crate::lobby::LobbyRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(30);

const MIN_PING_INTERVAL: Duration = Duration::from_millis(10);

/// Periodically pings every registered connection so idle sockets stay up
/// and dead ones surface through the transport's close path.
pub struct LivenessMonitor {
    registry: Arc<LobbyRegistry>,
    interval: Duration,
}

impl LivenessMonitor {
    pub fn new(registry: Arc<LobbyRegistry>, interval: Duration) -> Self {
        Self {
            registry,
            interval: interval.max(MIN_PING_INTERVAL),
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(self) {
        info!("Liveness monitor started, probing every {:?}", self.interval);

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.probe();
        }
    }

    /// Pings every open host and client once. Returns how many were probed.
    pub fn probe(&self) -> usize {
        let mut probed = 0;

        for connection in self.registry.connections() {
            if connection.is_open() {
                connection.ping();
                probed += 1;
            }
        }

        debug!("Liveness probe sent to {} connection(s)", probed);
        probed
    }
}
