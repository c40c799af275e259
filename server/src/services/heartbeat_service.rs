use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Background task that logs on a fixed interval until stopped.
pub struct HeartbeatService {
    interval: Duration,
    token: CancellationToken,
    ticks: Arc<AtomicU64>,
}

impl HeartbeatService {
    /// Periods below one millisecond are raised to one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            token: CancellationToken::new(),
            ticks: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Spawns the loop. The first tick fires immediately.
    pub fn start(&self) -> JoinHandle<()> {
        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Heartbeat service started.");

        let token = self.token.clone();
        let ticks = self.ticks.clone();
        let period = self.interval;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let tick = ticks.fetch_add(1, Ordering::Relaxed) + 1;
                        tracing::info!(time = %chrono::Utc::now(), tick, "Doing some work");
                    }
                }
            }
        })
    }

    pub fn stop(&self) {
        tracing::info!("Heartbeat service is stopping.");
        self.token.cancel();
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }
}
